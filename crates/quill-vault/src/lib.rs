//! # quill-vault
//!
//! A flat directory of markdown notes that link to each other with
//! `[[Page Name]]` tokens.
//!
//! - [`Vault`] enumerates, reads and writes `*.md` files
//! - [`extract_links`] pulls the `[[...]]` tokens out of note text
//! - [`ExistingPage`] pairs a file with the links found in it, for use as
//!   prompt context

#![deny(unsafe_code)]

pub mod errors;
pub mod vault;

pub use errors::{Result, VaultError};
pub use vault::{ExistingPage, Vault, extract_links, note_file_name};
