pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{AllowedOrigins, Settings, TokenTransport};
