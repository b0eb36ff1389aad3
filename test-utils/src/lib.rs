//! Shared test utilities for the pact model crates.
//!
//! This crate provides:
//! - Proptest strategies for generators, categories, bodies and content types
//! - Mock generators and content-type handlers that record their calls
//! - Test fixtures with sample bodies, generator maps and interactions

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod generators;
pub mod mocks;
pub mod fixtures;

pub use generators::*;
