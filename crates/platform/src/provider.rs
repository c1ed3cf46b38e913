use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::PlatformError;

/// Names of the environment providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProviderName {
    PixelRatio,
    ScreenWidth,
    PostWidth,
    VideoPixelRatio,
    IsNative,
}

impl ProviderName {
    pub const ALL: [ProviderName; 5] = [
        ProviderName::PixelRatio,
        ProviderName::ScreenWidth,
        ProviderName::PostWidth,
        ProviderName::VideoPixelRatio,
        ProviderName::IsNative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderName::PixelRatio => "pixelRatio",
            ProviderName::ScreenWidth => "screenWidth",
            ProviderName::PostWidth => "postWidth",
            ProviderName::VideoPixelRatio => "videoPixelRatio",
            ProviderName::IsNative => "isNative",
        }
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderName {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| PlatformError::UnknownProvider(s.to_string()))
    }
}

/// Value produced by a provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderValue {
    Number(f64),
    Flag(bool),
}

impl ProviderValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ProviderValue::Number(n) => Some(*n),
            ProviderValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ProviderValue::Flag(b) => Some(*b),
            ProviderValue::Number(_) => None,
        }
    }
}
