/// Host-specific capability queries

pub mod fallback;
pub mod messaging;
