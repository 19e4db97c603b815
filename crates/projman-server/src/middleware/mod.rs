//! Middleware modules

pub mod sanitize;
pub mod security;

pub use sanitize::{SanitizeConfig, sanitize_request};
pub use security::{SecurityHeaders, security_headers};
