//! Core types shared across apiassert facilities
//!
//! This crate provides foundational types used by the assertion engine,
//! the case runner and the logging facility:
//!
//! - **Schema constants**: Canonical field keys and event names
//! - **Sensitive data**: Sensitive<T> marker for automatic redaction

pub mod schema;
pub mod sensitive;

pub use sensitive::Sensitive;
