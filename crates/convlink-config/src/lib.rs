//! Configuration management for convlink
//!
//! This crate provides the code-parameter structure and configuration
//! loading for the convlink codec:
//! - CodecConfig: register length and feedback schemes, with defaults
//! - TOML configuration file parsing

pub mod codec_config;
pub mod toml_config;

pub use codec_config::*;
pub use toml_config::*;
