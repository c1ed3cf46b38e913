use super::*;
use async_trait::async_trait;
use platform::runtime::MOBILE_NAVIGATOR_PRODUCT;
use platform::{ProviderName, ProviderValue, FALLBACK_PIXEL_RATIO, FALLBACK_SCREEN_WIDTH};
use std::sync::atomic::{AtomicUsize, Ordering};

const GIB: u64 = 1024 * 1024 * 1024;

struct Phone {
    os: OsFamily,
    memory: u64,
}

impl DeviceMetrics for Phone {
    fn pixel_ratio(&self) -> Option<f64> {
        Some(3.0)
    }

    fn window_width(&self) -> Option<f64> {
        Some(400.0)
    }

    fn total_memory_bytes(&self) -> Option<u64> {
        Some(self.memory)
    }

    fn os_family(&self) -> OsFamily {
        self.os
    }
}

#[derive(Default)]
struct CountingOpener {
    calls: AtomicUsize,
}

#[async_trait]
impl LinkOpener for CountingOpener {
    async fn can_open_url(&self, _url: &str) -> probe::Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

fn native_ctx() -> RuntimeContext {
    RuntimeContext::new().with_navigator_product(MOBILE_NAVIGATOR_PRODUCT)
}

fn phone(os: OsFamily) -> Arc<Phone> {
    Arc::new(Phone {
        os,
        memory: 12 * GIB,
    })
}

#[test]
fn server_context_gets_fallback_providers() {
    let env = compose(
        &RuntimeContext::new(),
        &EngineConfig::default(),
        HostBindings::default().with_device(phone(OsFamily::Ios)),
    );

    assert_eq!(env.runtime(), RuntimeKind::Server);
    let providers = env.providers();
    assert!(!providers.is_native());
    assert_eq!(providers.pixel_ratio(), FALLBACK_PIXEL_RATIO);
    assert_eq!(providers.screen_width(), FALLBACK_SCREEN_WIDTH);
    assert_eq!(providers.post_width(), 128.0);
}

#[test]
fn web_context_ignores_native_device_state() {
    let ctx = RuntimeContext::new()
        .with_dom_document(true)
        .with_test_harness(true);
    let device = Arc::new(Phone {
        os: OsFamily::Android,
        memory: 2 * GIB,
    });
    let env = compose(
        &ctx,
        &EngineConfig::default(),
        HostBindings::default().with_device(device),
    );

    assert_eq!(env.runtime(), RuntimeKind::Web);
    assert_eq!(env.providers().pixel_ratio(), FALLBACK_PIXEL_RATIO);
    assert_eq!(env.providers().video_pixel_ratio(), FALLBACK_PIXEL_RATIO);
}

#[test]
fn native_context_reads_device() {
    let env = compose(
        &native_ctx(),
        &EngineConfig::default(),
        HostBindings::default().with_device(phone(OsFamily::Android)),
    );

    let providers = env.providers();
    assert_eq!(env.runtime(), RuntimeKind::Native);
    assert_eq!(providers.get(ProviderName::IsNative), ProviderValue::Flag(true));
    assert_eq!(providers.pixel_ratio(), 3.0);
    assert_eq!(providers.video_pixel_ratio(), 1.5);
    assert_eq!(providers.screen_width(), 400.0);
    assert_eq!(providers.post_width(), (400.0 - platform::POST_MARGIN) / 2.0);
}

#[test]
fn native_context_applies_config() {
    let config = EngineConfig {
        post_margin: 20.0,
        ..Default::default()
    };
    let ctx = native_ctx().with_test_harness(true);
    let device = Arc::new(Phone {
        os: OsFamily::Ios,
        memory: 4 * GIB,
    });
    let env = compose(&ctx, &config, HostBindings::default().with_device(device));

    assert_eq!(env.providers().post_width(), 190.0);
    assert_eq!(env.providers().pixel_ratio(), 1.0);
}

#[test]
fn non_finite_margin_never_leaks_into_post_width() {
    let config = EngineConfig {
        post_margin: f64::NAN,
        ..Default::default()
    };
    let env = compose(
        &native_ctx(),
        &config,
        HostBindings::default().with_device(phone(OsFamily::Ios)),
    );

    let post_width = env.providers().post_width();
    assert!(post_width.is_finite());
    assert_eq!(post_width, platform::FALLBACK_POST_WIDTH);
}

#[test]
fn native_without_device_falls_back() {
    let env = compose(&native_ctx(), &EngineConfig::default(), HostBindings::default());

    assert!(env.providers().is_native());
    assert_eq!(env.providers().pixel_ratio(), FALLBACK_PIXEL_RATIO);
    assert_eq!(env.providers().screen_width(), FALLBACK_SCREEN_WIDTH);
}

#[tokio::test]
async fn native_messaging_probe_asks_host_once() {
    let opener = Arc::new(CountingOpener::default());
    let env = compose(
        &native_ctx(),
        &EngineConfig::default(),
        HostBindings::default()
            .with_device(phone(OsFamily::Ios))
            .with_link_opener(opener.clone()),
    );

    let (a, b) = tokio::join!(env.is_messaging_supported(), env.is_messaging_supported());
    assert!(a.unwrap());
    assert!(b.unwrap());
    assert_eq!(opener.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn disabled_messaging_probe_never_asks_host() {
    let opener = Arc::new(CountingOpener::default());
    let config = EngineConfig {
        messaging_probe_enabled: false,
        ..Default::default()
    };
    let env = compose(
        &native_ctx(),
        &config,
        HostBindings::default().with_link_opener(opener.clone()),
    );

    assert!(!env.is_messaging_supported().await.unwrap());
    assert_eq!(opener.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn web_messaging_probe_is_unsupported() {
    let opener = Arc::new(CountingOpener::default());
    let env = compose(
        &RuntimeContext::new().with_dom_document(true),
        &EngineConfig::default(),
        HostBindings::default().with_link_opener(opener.clone()),
    );

    let supported = tokio_test::block_on(env.is_messaging_supported()).unwrap();
    assert!(!supported);
    assert_eq!(opener.calls.load(Ordering::SeqCst), 0);
    assert_eq!(env.messaging_probe().capability(), "messaging deep link");
}

#[test]
fn engine_error_wraps_platform_error() {
    let err: EngineError = "dpi".parse::<ProviderName>().unwrap_err().into();
    assert_eq!(err.to_string(), "Platform error: Unknown provider: dpi");
}
