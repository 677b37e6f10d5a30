use crate::level::LintLevel;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable overriding the constructor parameter limit.
pub const PARAMETERS_LIMIT_ENV: &str = "ANDROID_LINT_CONSTRUCTOR_PARAMETERS_COUNT_LIMIT";

const DEFAULT_PARAMETERS_LIMIT: usize = 2;

/// Maximum parameter count a constructor may have before it is flagged.
///
/// Resolved once at startup and immutable afterwards. Absent, unparsable, and
/// non-positive overrides all fall back to the default of 2; the fallback is
/// silent on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterLimit(usize);

impl ParameterLimit {
    /// Read the override from the process environment.
    pub fn from_env() -> Self {
        Self::resolve(std::env::var(PARAMETERS_LIMIT_ENV).ok().as_deref())
    }

    /// Interpret a raw override value.
    pub fn resolve(raw: Option<&str>) -> Self {
        let parsed = raw.and_then(|v| v.parse::<i64>().ok()).unwrap_or(0);
        if parsed <= 0 {
            Self(DEFAULT_PARAMETERS_LIMIT)
        } else {
            Self(parsed as usize)
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for ParameterLimit {
    fn default() -> Self {
        Self(DEFAULT_PARAMETERS_LIMIT)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct JavaClippyConfig {
    #[serde(default)]
    pub lints: LintsConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct LintsConfig {
    #[serde(default)]
    pub disabled: Vec<String>,

    #[serde(flatten)]
    pub levels: HashMap<String, LintLevel>,
}

pub const DEFAULT_CONFIG_FILE_NAME: &str = "java-clippy.toml";

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut cur = Some(start_dir);
    while let Some(dir) = cur {
        let candidate = dir.join(DEFAULT_CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        cur = dir.parent();
    }
    None
}

pub fn load_config_file(path: &Path) -> Result<JavaClippyConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let cfg: JavaClippyConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    Ok(cfg)
}

pub fn load_config(
    explicit_path: Option<&Path>,
    start_dir: &Path,
) -> Result<Option<(PathBuf, JavaClippyConfig)>> {
    if let Some(p) = explicit_path {
        let cfg = load_config_file(p)?;
        return Ok(Some((p.to_path_buf(), cfg)));
    }

    let Some(p) = find_config_file(start_dir) else {
        return Ok(None);
    };
    let cfg = load_config_file(&p)?;
    Ok(Some((p, cfg)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_to_two_when_unset() {
        assert_eq!(ParameterLimit::resolve(None).get(), 2);
    }

    #[test]
    fn limit_accepts_a_positive_override() {
        assert_eq!(ParameterLimit::resolve(Some("5")).get(), 5);
        assert_eq!(ParameterLimit::resolve(Some("1")).get(), 1);
    }

    #[test]
    fn unparsable_override_falls_back_silently() {
        assert_eq!(ParameterLimit::resolve(Some("abc")).get(), 2);
        assert_eq!(ParameterLimit::resolve(Some("")).get(), 2);
        assert_eq!(ParameterLimit::resolve(Some("3.5")).get(), 2);
    }

    #[test]
    fn non_positive_override_falls_back_silently() {
        assert_eq!(ParameterLimit::resolve(Some("0")).get(), 2);
        assert_eq!(ParameterLimit::resolve(Some("-4")).get(), 2);
    }

    #[test]
    fn config_file_parses_levels_and_disabled() {
        let raw = r#"
[lints]
disabled = ["TooManyParametersConstructor"]
"#;
        let cfg: JavaClippyConfig = toml::from_str(raw).expect("config should parse");
        assert_eq!(cfg.lints.disabled, vec!["TooManyParametersConstructor"]);

        let raw = r#"
[lints]
TooManyParametersConstructor = "error"
"#;
        let cfg: JavaClippyConfig = toml::from_str(raw).expect("config should parse");
        assert_eq!(
            cfg.lints.levels.get("TooManyParametersConstructor"),
            Some(&crate::level::LintLevel::Error)
        );
    }
}
