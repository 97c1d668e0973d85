//! Common library for the Reelshare application
//!
//! This crate provides shared functionality used by the gateway and the
//! profile app, namely backend configuration and error types.

pub mod config;
pub mod error;
