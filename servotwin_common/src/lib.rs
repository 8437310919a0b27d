//! Servotwin Common Library
//!
//! Shared types and configuration loading for all servotwin workspace
//! crates.
//!
//! # Module Structure
//!
//! - [`state`] - Safety state and fault category enums
//! - [`config`] - Simulation configuration with TOML loading and validation
//! - [`consts`] - System-wide constants and default scenario parameters
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use servotwin_common::prelude::*;
//!
//! let config = SimConfig::default();
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod consts;
pub mod prelude;
pub mod state;
