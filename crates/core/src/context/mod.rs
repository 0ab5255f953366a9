//! Admin context: validated bookkeeping configuration.
//!
//! - `admin` - The `AdminContext` value object and its construction from configuration
//! - `error` - Configuration validation errors

pub mod admin;
pub mod error;

#[cfg(test)]
mod props;

pub use admin::AdminContext;
pub use error::ContextError;
