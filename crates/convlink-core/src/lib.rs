//! Core utilities for convlink
//!
//! This crate provides the fundamental types used across the codec:
//! - BitBuffer for bit-level stream manipulation
//! - CodecErr, the shared error type
//! - Logging setup helpers

pub mod bitbuffer;
pub mod codec_error;
pub mod debug;

// Re-export commonly used items
pub use bitbuffer::BitBuffer;
pub use codec_error::CodecErr;
