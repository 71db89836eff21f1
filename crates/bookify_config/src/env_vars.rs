//! Environment variable handling for the Bookify service.
//!
//! Plain settings are overridden with `BOOKIFY__SECTION__KEY`. Secrets are
//! marked `secret_from_env` in the config file and read from
//! `BOOKIFY_SECRET_SECTION_KEY`, or the shorter `SECTION_KEY` form.

use serde_json::Value;
use std::env;
use tracing::warn;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "BOOKIFY";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "BOOKIFY_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker value that asks for a secret to be injected from the environment
pub const SECRET_MARKER: &str = "secret_from_env";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a secret path (e.g. `emailjs.public_key`) to its environment
/// variable name (`BOOKIFY_SECRET_EMAILJS_PUBLIC_KEY`).
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Short secret name without the prefix (`EMAILJS_PUBLIC_KEY`).
pub fn short_secret_path_to_env_var(path: &str) -> String {
    path.replace('.', SECRET_SEPARATOR).to_uppercase()
}

/// Look up a secret, trying the prefixed name first.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    env::var(secret_path_to_env_var(path))
        .or_else(|_| env::var(short_secret_path_to_env_var(path)))
        .ok()
}

/// Replaces every `secret_from_env` string in `value` with its environment
/// variable, keyed by the dotted path to the string.
///
/// Returns `true` if any value was replaced. Markers without a matching
/// variable are left in place and logged.
pub fn inject_env_vars(value: &mut Value) -> bool {
    let mut path = Vec::new();
    inject_at(&mut path, value)
}

fn inject_at(path: &mut Vec<String>, value: &mut Value) -> bool {
    let children: Vec<(String, &mut Value)> = match value {
        Value::String(s) if s == SECRET_MARKER => {
            let key = path.join(".");
            return match get_secret_env_var(&key) {
                Some(secret) => {
                    *s = secret;
                    true
                }
                None => {
                    warn!("No environment variable for secret '{}'", key);
                    false
                }
            };
        }
        Value::Object(map) => map.iter_mut().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(items) => items
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => return false,
    };

    let mut replaced = false;
    for (segment, child) in children {
        path.push(segment);
        replaced |= inject_at(path, child);
        path.pop();
    }
    replaced
}
