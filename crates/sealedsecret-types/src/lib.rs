//! # sealedsecret types
//!
//! Core types, enums, and errors shared across the sealedsecret crates.
//!
//! - Disclosure scopes and their token forms
//! - Binding labels and resource identifiers
//! - Configuration structures
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```
//! use sealedsecret_types::{BindingLabel, ResourceId, SealingScope};
//!
//! let scope = SealingScope::resolve(Some("namespace-wide")).unwrap();
//! let label = BindingLabel::derive("prod", "db-pass", scope);
//! assert_eq!(ResourceId::from(&label).as_str(), "prod");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod identifiers;
pub mod enums;
pub mod config;

// Re-export common types for convenience
pub use errors::{SealError, Result};
pub use identifiers::{BindingLabel, ResourceId};
pub use enums::{LogLevel, PayloadBinding, SealingScope};
pub use config::{LogConfig, LogFormat, SealerConfig};
