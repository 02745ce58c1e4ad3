//! # sealedsecret core
//!
//! Configuration and logging shared by the sealedsecret binaries and the
//! provider.
//!
//! - **Configuration**: multi-layer configuration (defaults, file, set, environment)
//! - **Logging**: `tracing` subscriber setup with pretty, JSON, or compact output
//! - **Data utilities**: YAML loading, deep merging, dotted-path lookup
//!
//! ## Example
//!
//! ```no_run
//! use sealedsecret_core::{config, log};
//!
//! let sealer = config::load_sealer_config(None)?;
//! let _guard = log::init(&sealer.log)?;
//! # Ok::<(), sealedsecret_types::SealError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod log;
pub mod util;

// Re-export commonly used items
pub use config::{load_sealer_config, Config};
pub use sealedsecret_types::{Result, SealError, SealerConfig};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "sealedsecret";
