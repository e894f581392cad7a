//! # quill-settings
//!
//! Layered configuration for the Quill toolkit.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`QuillSettings::default()`]
//! 2. **User file**: `~/.quill/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `QUILL_*` and `OPENAI_*` overrides (highest priority)
//!
//! The inference API key is only ever read from the environment and is never
//! serialized back out.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    apply_env_overrides, apply_overrides_from, deep_merge, load_file_layer, load_settings,
    load_settings_from_path, settings_path,
};
pub use types::*;
