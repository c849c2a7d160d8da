//! Error types for the Cicerone walkthrough engine.
//!
//! This crate provides the foundation error types used throughout the Cicerone
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use cicerone_error::{CiceroneResult, JsonError};
//!
//! fn load_snapshot() -> CiceroneResult<String> {
//!     Err(JsonError::new("unexpected end of input", "diagram snapshot"))?
//! }
//!
//! match load_snapshot() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod json;
mod presentation;
mod replay;

pub use error::{CiceroneError, CiceroneErrorKind, CiceroneResult};
pub use json::JsonError;
pub use presentation::{PresentationError, PresentationErrorKind};
pub use replay::{ReplayError, ReplayErrorKind};
