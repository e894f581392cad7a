//! # quill-core
//!
//! Shared vocabulary for the Quill crates:
//!
//! - **Errors**: [`ErrorKind`], the taxonomy every crate-level error maps into, and the
//!   [`Classify`] trait that performs the mapping
//! - **Logging**: [`logging::init_subscriber`] for the `tracing` stderr subscriber

#![deny(unsafe_code)]

pub mod errors;
pub mod logging;

pub use errors::{Classify, ErrorKind};
