//! Configuration paths and settings for Turmalin.
//!
//! Settings live in a tolerant `key = value` file at
//! `~/.config/turmalin/turmalin.conf`. The backend base URL is resolved from
//! the command line first, then the `TURMALIN_API_URL` environment variable,
//! then the config file, and finally a localhost default.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Fallback backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// User-tunable settings parsed from `turmalin.conf`.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Base URL of the REST backend.
    pub base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Return `$HOME/.config/turmalin`, ensuring it exists. `None` without HOME.
fn home_config_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        let dir = Path::new(&home).join(".config").join("turmalin");
        if fs::create_dir_all(&dir).is_ok() {
            return Some(dir);
        }
    }
    None
}

/// XDG config directory for Turmalin (ensured to exist).
pub fn config_dir() -> PathBuf {
    if let Some(dir) = home_config_dir() {
        return dir;
    }
    let base = xdg_base_dir("XDG_CONFIG_HOME", &[".config"]);
    let dir = base.join("turmalin");
    let _ = fs::create_dir_all(&dir);
    dir
}

/// Logs directory under config: `~/.config/turmalin/logs` (ensured to exist).
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = fs::create_dir_all(&dir);
    dir
}

/// Path of the persisted session file.
pub fn session_path() -> PathBuf {
    config_dir().join("session.json")
}

/// What: Check if a config line should be skipped (empty or comment).
///
/// Inputs:
/// - `line`: Line to check
///
/// Output:
/// - `true` if the line should be skipped, `false` otherwise
fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Parse a `key = value` pair from a config line.
///
/// Inputs:
/// - `line`: Line containing key=value format
///
/// Output:
/// - `Some((key, value))` if parsing succeeds, `None` otherwise
///
/// Details:
/// - Splits on the first `=`; keys are lowercased with `.`/`-`/space folded to `_`.
fn parse_key_value(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    if !trimmed.contains('=') {
        return None;
    }
    let mut parts = trimmed.splitn(2, '=');
    let raw_key = parts.next()?.trim();
    let key = raw_key.to_lowercase().replace(['.', '-', ' '], "_");
    let value = parts.next()?.trim().to_string();
    Some((key, value))
}

/// Apply one parsed config entry to `out`. Unknown keys are ignored.
fn apply_setting(out: &mut Settings, key: &str, val: &str) {
    match key {
        "base_url" => {
            if !val.is_empty() {
                out.base_url = val.trim_end_matches('/').to_string();
            }
        }
        _ => {
            tracing::debug!(key, "ignoring unknown config key");
        }
    }
}

/// Load user settings from `turmalin.conf`.
/// Falls back to [`Settings::default`] when missing or invalid.
pub fn settings() -> Settings {
    let mut out = Settings::default();
    let path = config_dir().join("turmalin.conf");
    let Ok(content) = fs::read_to_string(&path) else {
        return out;
    };
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        if let Some((key, val)) = parse_key_value(line) {
            apply_setting(&mut out, &key, &val);
        }
    }
    out
}

/// What: Resolve the backend base URL from all configuration sources.
///
/// Inputs:
/// - `flag`: Optional `--base-url` value from the command line
/// - `settings`: Parsed config-file settings
///
/// Output:
/// - The first configured value in flag -> env -> conf -> default order,
///   without a trailing slash.
pub fn resolve_base_url(flag: Option<String>, settings: &Settings) -> String {
    if let Some(url) = flag
        && !url.trim().is_empty()
    {
        return url.trim_end_matches('/').to_string();
    }
    if let Ok(url) = env::var("TURMALIN_API_URL")
        && !url.trim().is_empty()
    {
        return url.trim_end_matches('/').to_string();
    }
    settings.base_url.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Comment and blank lines are skipped by the conf parser
    ///
    /// - Input: Lines with `#`, `//`, `;` prefixes and whitespace
    /// - Output: All reported as skippable
    fn comments_are_skipped() {
        assert!(skip_comment_or_empty(""));
        assert!(skip_comment_or_empty("   "));
        assert!(skip_comment_or_empty("# comment"));
        assert!(skip_comment_or_empty("// comment"));
        assert!(skip_comment_or_empty("; comment"));
        assert!(!skip_comment_or_empty("base_url = x"));
    }

    #[test]
    /// What: Key normalization folds separators and case
    ///
    /// - Input: `Base-URL = http://x`
    /// - Output: key `base_url`, value `http://x`
    fn key_value_normalizes() {
        let (k, v) = parse_key_value("Base-URL = http://x").unwrap();
        assert_eq!(k, "base_url");
        assert_eq!(v, "http://x");
        assert!(parse_key_value("no separator here").is_none());
    }

    #[test]
    /// What: Flag wins over everything and trailing slashes are trimmed
    ///
    /// - Input: Flag with trailing slash plus default settings
    /// - Output: Flag value without the slash
    fn flag_wins_resolution() {
        let s = Settings::default();
        let url = resolve_base_url(Some("http://a:9/".into()), &s);
        assert_eq!(url, "http://a:9");
    }

    #[test]
    /// What: Settings value is used when no flag or env override exists
    ///
    /// - Input: No flag, settings carrying a custom URL
    /// - Output: Settings URL
    fn settings_used_without_flag() {
        // Scoped: the env var may leak between tests, so pick an unset name path.
        let s = Settings {
            base_url: "http://conf:8000".into(),
        };
        if env::var("TURMALIN_API_URL").is_err() {
            assert_eq!(resolve_base_url(None, &s), "http://conf:8000");
        }
    }
}
