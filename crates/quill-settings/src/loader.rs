//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`QuillSettings::default()`]
//! 2. If the settings file exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::types::QuillSettings;

/// Resolve the path to the settings file (`~/.quill/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".quill").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<QuillSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<QuillSettings> {
    let mut settings = load_file_layer(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Defaults merged with the settings file, without environment overrides.
pub fn load_file_layer(path: &Path) -> Result<QuillSettings> {
    let defaults = serde_json::to_value(QuillSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply process environment overrides to loaded settings.
pub fn apply_env_overrides(settings: &mut QuillSettings) {
    apply_overrides_from(settings, |name| std::env::var(name).ok());
}

/// Apply overrides using an arbitrary variable lookup.
///
/// Empty values are treated as unset. Invalid numeric values are ignored
/// with a warning (the file/default value is kept).
pub fn apply_overrides_from<F>(settings: &mut QuillSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|v| !v.is_empty());

    // ── Inference ───────────────────────────────────────────────────
    // OPENAI_KEY wins over OPENAI_API_KEY when both are set
    if let Some(key) = read("OPENAI_KEY").or_else(|| read("OPENAI_API_KEY")) {
        settings.inference.api_key = Some(SecretString::from(key));
    }
    if let Some(v) = read("QUILL_MODEL") {
        settings.inference.model = v;
    }
    if let Some(v) = read("QUILL_BASE_URL") {
        settings.inference.base_url = v;
    }
    if let Some(raw) = read("QUILL_TEMPERATURE") {
        match parse_f64_range(&raw, 0.0, 2.0) {
            Some(v) => settings.inference.temperature = v,
            None => warn!(key = "QUILL_TEMPERATURE", value = %raw, "invalid float env var, ignoring"),
        }
    }
    if let Some(raw) = read("QUILL_HTTP_TIMEOUT_SECS") {
        match parse_u64_range(&raw, 1, 3600) {
            Some(v) => settings.inference.http_timeout_secs = Some(v),
            None => warn!(key = "QUILL_HTTP_TIMEOUT_SECS", value = %raw, "invalid u64 env var, ignoring"),
        }
    }

    // ── Directories ─────────────────────────────────────────────────
    if let Some(v) = read("QUILL_PROMPTS_DIR") {
        settings.prompts.dir = v;
    }
    if let Some(v) = read("QUILL_VAULT_DIR") {
        settings.vault.dir = v;
    }

    // ── Media ───────────────────────────────────────────────────────
    if let Some(v) = read("QUILL_YTDLP") {
        settings.media.ytdlp_path = v;
    }
    if let Some(v) = read("QUILL_SUB_LANG") {
        settings.media.sub_lang = v;
    }

    // ── Logging ─────────────────────────────────────────────────────
    if let Some(v) = read("QUILL_LOG_LEVEL") {
        settings.logging.level = v;
    }
    if let Some(raw) = read("QUILL_JSON_LOGS") {
        match parse_bool(&raw) {
            Some(v) => settings.logging.json = v,
            None => warn!(key = "QUILL_JSON_LOGS", value = %raw, "invalid boolean env var, ignoring"),
        }
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `u64` within a range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a finite `f64` within a range.
pub fn parse_f64_range(val: &str, min: f64, max: f64) -> Option<f64> {
    let n: f64 = val.trim().parse().ok()?;
    (n.is_finite() && n >= min && n <= max).then_some(n)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
