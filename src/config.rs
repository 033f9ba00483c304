use std::{collections::HashMap, fs, io, path::Path};

use thiserror::Error;

use crate::{
    build_env::BuildEnvironment,
    log_facade::LogFacade,
    log_sink::PlatformSink,
    severity::Severity,
    writer_log_sink::{TagThresholds, WriterSink},
};

/// Section overriding the detected build signals (`type`, `device`).
pub const BUILD_SECTION: &str = "build";
/// Section holding `debuggable = true|false`.
pub const FACADE_SECTION: &str = "facade";
/// Section mapping tags to minimum severities; `default` sets the fallback.
pub const TAGS_SECTION: &str = "tags";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error reading file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: expected `key = value` or `[section]`, got {content:?}")]
    MalformedLine { line: usize, content: String },
    #[error("[{section}] {key}: invalid severity {value:?}")]
    InvalidSeverity {
        section: String,
        key: String,
        value: String,
    },
    #[error("[{section}] {key}: expected true or false, got {value:?}")]
    InvalidBool {
        section: String,
        key: String,
        value: String,
    },
}

/// Raw INI-style key/value store: `#` comments, `[section]` headers,
/// `key = value` lines with optional surrounding quotes.
#[derive(Debug, Default)]
pub struct Config {
    pub globals: HashMap<String, String>,
    pub sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut globals = HashMap::new();
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current_section: Option<String> = None;

        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = line[1..line.len() - 1].trim();
                current_section = Some(name.to_ascii_lowercase());
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::MalformedLine {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            let key = key.trim().to_string();
            let value = value.trim().trim_matches('"').to_string();

            match &current_section {
                None => {
                    globals.insert(key, value);
                }
                Some(sec) => {
                    sections.entry(sec.clone()).or_default().insert(key, value);
                }
            }
        }
        Ok(Config { globals, sections })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|sec| sec.get(key))
            .map(|s| s.as_str())
    }

    #[must_use]
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn get_global(&self, key: &str) -> Option<&str> {
        self.globals.get(key).map(|s| s.as_str())
    }

    /// All key/value pairs of `section`, empty when the section is absent.
    pub fn section(&self, section: &str) -> impl Iterator<Item = (&str, &str)> {
        self.sections
            .get(section)
            .into_iter()
            .flat_map(|sec| sec.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

/// Resolved facade settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub environment: BuildEnvironment,
    /// Explicit override; `None` keeps the environment's default.
    pub debuggable: Option<bool>,
    pub thresholds: TagThresholds,
}

impl LogConfig {
    /// Loads `path` on top of the detected build environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_config(&Config::load(path)?, BuildEnvironment::detect())
    }

    /// Resolves settings from `config`, falling back to `detected` for any
    /// build signal the file leaves out.
    pub fn from_config(config: &Config, detected: BuildEnvironment) -> Result<Self, ConfigError> {
        let environment = BuildEnvironment::new(
            config
                .get_non_empty(BUILD_SECTION, "type")
                .unwrap_or(detected.build_type()),
            config
                .get_non_empty(BUILD_SECTION, "device")
                .unwrap_or(detected.device()),
        );

        let debuggable = config
            .get_non_empty(FACADE_SECTION, "debuggable")
            .map(|v| parse_bool(FACADE_SECTION, "debuggable", v))
            .transpose()?;

        let mut thresholds = TagThresholds::default();
        for (tag, value) in config.section(TAGS_SECTION) {
            let min: Severity = value.parse().map_err(|_| ConfigError::InvalidSeverity {
                section: TAGS_SECTION.to_string(),
                key: tag.to_string(),
                value: value.to_string(),
            })?;
            if tag == "default" {
                thresholds.set_default(min);
            } else {
                thresholds.set(tag, min);
            }
        }

        Ok(Self {
            environment,
            debuggable,
            thresholds,
        })
    }

    /// Builds a facade over `sink` with these settings.
    pub fn facade<S: PlatformSink>(&self, sink: S) -> LogFacade<S> {
        let debuggable = self
            .debuggable
            .unwrap_or_else(|| self.environment.default_debuggable());
        LogFacade::with_debuggable(sink, self.environment.clone(), debuggable)
    }

    /// A writer sink filtered by the configured tag thresholds.
    pub fn writer_sink<W: io::Write + Send>(&self, out: W) -> WriterSink<W> {
        WriterSink::new(out, self.thresholds.clone())
    }
}

fn parse_bool(section: &str, key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    const SAMPLE: &str = r#"
# shipped defaults
name = "demo"

[Build]
type = user
device = generic_x86

[facade]
debuggable = "false"

[tags]
default = WARN
Network = debug
"#;

    #[test]
    fn parses_globals_and_sections() {
        let cfg = Config::parse(SAMPLE).unwrap();
        assert_eq!(cfg.get_global("name"), Some("demo"));
        assert_eq!(cfg.get("build", "device"), Some("generic_x86"));
        assert_eq!(cfg.get("facade", "debuggable"), Some("false"));
        assert_eq!(cfg.get("tags", "missing"), None);
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let err = Config::parse("[tags]\nNetwork DEBUG\n").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn resolves_log_config() {
        let cfg = Config::parse(SAMPLE).unwrap();
        let resolved = LogConfig::from_config(&cfg, BuildEnvironment::development()).unwrap();
        assert_eq!(resolved.environment, BuildEnvironment::new("user", "generic_x86"));
        assert_eq!(resolved.debuggable, Some(false));
        assert_eq!(resolved.thresholds.threshold("Network"), Severity::Debug);
        assert_eq!(resolved.thresholds.threshold("Other"), Severity::Warn);
    }

    #[test]
    fn explicit_override_beats_environment_default() {
        let cfg = Config::parse(SAMPLE).unwrap();
        let resolved = LogConfig::from_config(&cfg, BuildEnvironment::development()).unwrap();
        // generic device would default to debuggable; the file says otherwise.
        assert!(resolved.environment.default_debuggable());
        let facade = resolved.facade(resolved.writer_sink(Vec::new()));
        assert!(!facade.is_debuggable());
    }

    #[test]
    fn missing_build_section_keeps_detected_environment() {
        let cfg = Config::empty();
        let resolved = LogConfig::from_config(&cfg, BuildEnvironment::production()).unwrap();
        assert_eq!(resolved.environment, BuildEnvironment::production());
        assert_eq!(resolved.debuggable, None);
        assert!(!resolved.facade(crate::NoopSink).is_debuggable());
    }

    #[test]
    fn rejects_bad_values() {
        let cfg = Config::parse("[tags]\nNet = loud\n").unwrap();
        assert!(matches!(
            LogConfig::from_config(&cfg, BuildEnvironment::production()),
            Err(ConfigError::InvalidSeverity { .. })
        ));
        let cfg = Config::parse("[facade]\ndebuggable = maybe\n").unwrap();
        assert!(matches!(
            LogConfig::from_config(&cfg, BuildEnvironment::production()),
            Err(ConfigError::InvalidBool { .. })
        ));
    }
}
