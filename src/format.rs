//! Env source file formats.
//!
//! The loader treats "how a file becomes a [`SourceConfig`]" as a
//! pluggable capability keyed by file name: sectioned dotenv for
//! `.env*` files, plus JSON, TOML, and YAML documents that deserialize
//! straight into the mode-keyed shape.

use std::path::Path;

use crate::error::{EnvError, Result};
use crate::source::SourceConfig;

/// A recognized env source file format.
///
/// # Example
///
/// ```
/// use modenv::SourceFormat;
/// use std::path::Path;
///
/// let format = SourceFormat::for_path(Path::new(".env.staging")).unwrap();
/// let config = format
///     .parse("[staging]\nAPI_URL=https://staging.example.com\n", Path::new(".env.staging"))
///     .unwrap();
///
/// assert_eq!(
///     config["staging"].get("API_URL").map(String::as_str),
///     Some("https://staging.example.com")
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Sectioned dotenv: `[mode]` headers over `KEY=value` lines.
    Dotenv,
    /// JSON object: `{"mode": {"KEY": "value"}}`.
    Json,
    /// TOML document: one `[mode]` table of string values per mode.
    Toml,
    /// YAML mapping of mode → variables.
    Yaml,
}

impl SourceFormat {
    /// Pick the format for a path from its file name.
    ///
    /// Names starting with `.env` (`.env`, `.env.staging`) and the `env`
    /// extension select [`SourceFormat::Dotenv`]; `json`, `toml`, and
    /// `yaml`/`yml` extensions select their formats. Anything else has
    /// no registered format and returns `None`.
    pub fn for_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name.starts_with(".env") {
            return Some(Self::Dotenv);
        }

        match path.extension()?.to_str()? {
            "env" => Some(Self::Dotenv),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Parse file content into a source configuration.
    ///
    /// The serde-backed formats enforce the flat mode → variable → string
    /// shape at deserialization time, so nested or non-string values fail
    /// here rather than corrupting the merge downstream.
    pub fn parse(self, content: &str, path: &Path) -> Result<SourceConfig> {
        match self {
            Self::Dotenv => parse_dotenv(content, path),
            Self::Json => serde_json::from_str(content).map_err(|e| parse_error(path, e)),
            Self::Toml => toml::from_str(content).map_err(|e| parse_error(path, e)),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(path, e)),
        }
    }
}

fn parse_error(path: &Path, err: impl std::fmt::Display) -> EnvError {
    EnvError::SourceParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Parse sectioned dotenv content.
///
/// # Supported Syntax
///
/// - Mode headers: `[development]`
/// - Simple pairs: `KEY=value`
/// - Quoted values: `KEY="value with spaces"` or `KEY='single quoted'`
/// - Empty values: `KEY=`
/// - Comments: `# This is a comment`
/// - Whitespace around equals: `KEY = value`
/// - Values containing equals signs: `URL=https://example.com?foo=bar`
///
/// Every `KEY=value` pair must appear below a `[mode]` header; a pair
/// before any header, a malformed header, or a line that is neither is
/// a parse error carrying the 1-based line number.
fn parse_dotenv(content: &str, path: &Path) -> Result<SourceConfig> {
    let mut config = SourceConfig::new();
    let mut mode: Option<String> = None;

    for (line_num, raw) in content.lines().enumerate() {
        let line = raw.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // [mode] section header
        if let Some(rest) = line.strip_prefix('[') {
            let name = match rest.strip_suffix(']') {
                Some(name) => name.trim(),
                None => {
                    return Err(parse_error(
                        path,
                        format!("line {}: malformed mode header", line_num + 1),
                    ));
                }
            };
            if name.is_empty() {
                return Err(parse_error(
                    path,
                    format!("line {}: empty mode name", line_num + 1),
                ));
            }
            config.entry(name.to_string()).or_default();
            mode = Some(name.to_string());
            continue;
        }

        // KEY=value
        let eq_pos = match line.find('=') {
            Some(pos) => pos,
            None => {
                return Err(parse_error(
                    path,
                    format!("line {}: expected KEY=value or [mode] header", line_num + 1),
                ));
            }
        };

        let current = match &mode {
            Some(mode) => mode,
            None => {
                return Err(parse_error(
                    path,
                    format!("line {}: variable outside a [mode] section", line_num + 1),
                ));
            }
        };

        let key = line[..eq_pos].trim().to_string();
        let value = unquote(line[eq_pos + 1..].trim());
        config
            .entry(current.clone())
            .or_default()
            .insert(key, value);
    }

    Ok(config)
}

/// Remove surrounding quotes from a value.
fn unquote(value: &str) -> String {
    if ((value.starts_with('"') && value.ends_with('"'))
        || (value.starts_with('\'') && value.ends_with('\'')))
        && value.len() >= 2
    {
        value[1..value.len() - 1].to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_dotenv_for_env_prefixed_names() {
        assert_eq!(
            SourceFormat::for_path(Path::new(".env")),
            Some(SourceFormat::Dotenv)
        );
        assert_eq!(
            SourceFormat::for_path(Path::new(".env.production")),
            Some(SourceFormat::Dotenv)
        );
        assert_eq!(
            SourceFormat::for_path(Path::new("config/ci.env")),
            Some(SourceFormat::Dotenv)
        );
    }

    #[test]
    fn picks_serde_formats_by_extension() {
        assert_eq!(
            SourceFormat::for_path(Path::new("env.json")),
            Some(SourceFormat::Json)
        );
        assert_eq!(
            SourceFormat::for_path(Path::new("env.toml")),
            Some(SourceFormat::Toml)
        );
        assert_eq!(
            SourceFormat::for_path(Path::new("env.yaml")),
            Some(SourceFormat::Yaml)
        );
        assert_eq!(
            SourceFormat::for_path(Path::new("env.yml")),
            Some(SourceFormat::Yaml)
        );
    }

    #[test]
    fn unknown_names_have_no_format() {
        assert_eq!(SourceFormat::for_path(Path::new("env.ini")), None);
        assert_eq!(SourceFormat::for_path(Path::new("envfile")), None);
    }

    #[test]
    fn dotenv_parses_sections() {
        let content = r#"
# Regional endpoints
[development]
API_URL=http://localhost:3000

[production]
API_URL=https://api.example.com
REGION=eu-west-1
"#;

        let config = SourceFormat::Dotenv.parse(content, Path::new(".env")).unwrap();

        assert_eq!(
            config["development"].get("API_URL"),
            Some(&"http://localhost:3000".to_string())
        );
        assert_eq!(
            config["production"].get("API_URL"),
            Some(&"https://api.example.com".to_string())
        );
        assert_eq!(config["production"].get("REGION"), Some(&"eu-west-1".to_string()));
    }

    #[test]
    fn dotenv_handles_quoted_values() {
        let content = "[dev]\nDOUBLE=\"double quoted\"\nSINGLE='single quoted'\nPLAIN=no quotes";
        let config = SourceFormat::Dotenv.parse(content, Path::new(".env")).unwrap();

        let dev = &config["dev"];
        assert_eq!(dev.get("DOUBLE"), Some(&"double quoted".to_string()));
        assert_eq!(dev.get("SINGLE"), Some(&"single quoted".to_string()));
        assert_eq!(dev.get("PLAIN"), Some(&"no quotes".to_string()));
    }

    #[test]
    fn dotenv_handles_empty_values_and_whitespace() {
        let content = "[dev]\nEMPTY=\nSPACED = padded value ";
        let config = SourceFormat::Dotenv.parse(content, Path::new(".env")).unwrap();

        let dev = &config["dev"];
        assert_eq!(dev.get("EMPTY"), Some(&String::new()));
        assert_eq!(dev.get("SPACED"), Some(&"padded value".to_string()));
    }

    #[test]
    fn dotenv_keeps_equals_in_values() {
        let content = "[dev]\nURL=https://example.com?foo=bar&baz=1";
        let config = SourceFormat::Dotenv.parse(content, Path::new(".env")).unwrap();

        assert_eq!(
            config["dev"].get("URL"),
            Some(&"https://example.com?foo=bar&baz=1".to_string())
        );
    }

    #[test]
    fn dotenv_rejects_variable_before_section() {
        let content = "API_URL=http://localhost\n[dev]\n";
        let err = SourceFormat::Dotenv
            .parse(content, Path::new(".env"))
            .unwrap_err();

        assert!(matches!(err, EnvError::SourceParse { .. }));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn dotenv_rejects_line_without_equals() {
        let content = "[dev]\nnot a pair";
        let err = SourceFormat::Dotenv
            .parse(content, Path::new(".env"))
            .unwrap_err();

        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn dotenv_rejects_malformed_headers() {
        let err = SourceFormat::Dotenv
            .parse("[dev\nA=1", Path::new(".env"))
            .unwrap_err();
        assert!(err.to_string().contains("malformed mode header"));

        let err = SourceFormat::Dotenv
            .parse("[ ]\nA=1", Path::new(".env"))
            .unwrap_err();
        assert!(err.to_string().contains("empty mode name"));
    }

    #[test]
    fn dotenv_empty_content_is_empty_config() {
        let config = SourceFormat::Dotenv
            .parse("\n# only comments\n", Path::new(".env"))
            .unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn dotenv_header_without_pairs_creates_empty_mode() {
        let config = SourceFormat::Dotenv
            .parse("[staging]\n", Path::new(".env"))
            .unwrap();
        assert!(config["staging"].is_empty());
    }

    #[test]
    fn json_parses_mode_keyed_object() {
        let config = SourceFormat::Json
            .parse(r#"{"dev":{"A":"1"},"prod":{"A":"2"}}"#, Path::new("env.json"))
            .unwrap();

        assert_eq!(config["dev"].get("A"), Some(&"1".to_string()));
        assert_eq!(config["prod"].get("A"), Some(&"2".to_string()));
    }

    #[test]
    fn json_rejects_non_string_values() {
        let err = SourceFormat::Json
            .parse(r#"{"dev":{"PORT":3000}}"#, Path::new("env.json"))
            .unwrap_err();
        assert!(matches!(err, EnvError::SourceParse { .. }));
    }

    #[test]
    fn toml_parses_mode_tables() {
        let content = "[dev]\nA = \"1\"\n\n[prod]\nA = \"2\"\nB = \"3\"\n";
        let config = SourceFormat::Toml.parse(content, Path::new("env.toml")).unwrap();

        assert_eq!(config["dev"].get("A"), Some(&"1".to_string()));
        assert_eq!(config["prod"].get("B"), Some(&"3".to_string()));
    }

    #[test]
    fn toml_rejects_nested_tables() {
        let content = "[dev.nested]\nA = \"1\"\n";
        let err = SourceFormat::Toml
            .parse(content, Path::new("env.toml"))
            .unwrap_err();
        assert!(matches!(err, EnvError::SourceParse { .. }));
    }

    #[test]
    fn yaml_parses_mode_mapping() {
        let content = "dev:\n  A: \"1\"\nprod:\n  A: \"2\"\n";
        let config = SourceFormat::Yaml.parse(content, Path::new("env.yaml")).unwrap();

        assert_eq!(config["dev"].get("A"), Some(&"1".to_string()));
        assert_eq!(config["prod"].get("A"), Some(&"2".to_string()));
    }

    #[test]
    fn yaml_rejects_non_string_values() {
        let err = SourceFormat::Yaml
            .parse("dev:\n  PORT: 3000\n", Path::new("env.yaml"))
            .unwrap_err();
        assert!(matches!(err, EnvError::SourceParse { .. }));
    }

    #[test]
    fn malformed_syntax_reports_the_path() {
        let err = SourceFormat::Json
            .parse("{not json", Path::new("conf/env.json"))
            .unwrap_err();
        assert!(err.to_string().contains("conf/env.json"));
    }
}
