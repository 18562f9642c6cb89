//! Core types for the ibex iBoot image toolkit
//!
//! This crate provides the foundational types shared by the parser and the
//! command-line frontend.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
