//! Core types shared across datosync facilities
//!
//! This crate provides foundational types used by both error handling
//! and logging facilities:
//!
//! - **Sensitive data**: Sensitive<T> marker for API tokens and other secrets
//! - **Schema constants**: Canonical event names and diff side names

pub mod schema;
pub mod sensitive;

pub use sensitive::Sensitive;
