//! Configuration for lvc.
//!
//! Configuration is optional and loaded from the working directory:
//! 1. Defaults (`lvc.db`, `Version`, `git`)
//! 2. Project config: `lvc.jsonc` or `lvc.json`
//! 3. Environment override: `LVC_GIT` replaces the git program
//!
//! JSONC `//` and `/* */` comments are accepted.

use crate::error::{LvcError, LvcResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project config file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["lvc.jsonc", "lvc.json"];

/// Environment variable overriding [`LvcConfig::git_program`].
pub const GIT_PROGRAM_ENV: &str = "LVC_GIT";

/// Settings shared by every lvc command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LvcConfig {
    /// Name of the counter file at the working directory root.
    pub counter_file: String,

    /// Prefix of snapshot folder names; folders are `<prefix> <label>`.
    pub folder_prefix: String,

    /// Program invoked for version-control operations.
    pub git_program: String,
}

impl Default for LvcConfig {
    fn default() -> Self {
        Self {
            counter_file: "lvc.db".to_string(),
            folder_prefix: "Version".to_string(),
            git_program: "git".to_string(),
        }
    }
}

impl LvcConfig {
    /// Load configuration for the working directory `dir`.
    ///
    /// Returns the config and the file it came from, if any.
    pub async fn load(dir: &Path) -> LvcResult<(Self, Option<PathBuf>)> {
        let mut config = Self::default();
        let mut source = None;

        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.is_file() {
                let content = tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|e| LvcError::io_at(&path, e))?;
                config = Self::parse_jsonc(&content, &path.display().to_string())?;
                debug!(path = %path.display(), "Loaded config");
                source = Some(path);
                break;
            }
        }

        if let Ok(program) = std::env::var(GIT_PROGRAM_ENV) {
            config.apply_git_override(&program);
        }

        config.validate(
            &source
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<defaults>".to_string()),
        )?;

        Ok((config, source))
    }

    /// Parse a JSON or JSONC document.
    pub fn parse_jsonc(content: &str, source: &str) -> LvcResult<Self> {
        let stripped = strip_comments(content);
        serde_json::from_str(&stripped).map_err(|e| LvcError::Config {
            path: source.to_string(),
            message: e.to_string(),
        })
    }

    fn apply_git_override(&mut self, program: &str) {
        let program = program.trim();
        if !program.is_empty() {
            debug!(program, "Using git program from {}", GIT_PROGRAM_ENV);
            self.git_program = program.to_string();
        }
    }

    /// Reject values that would make lvc write outside the working directory.
    pub fn validate(&self, source: &str) -> LvcResult<()> {
        let invalid = |message: String| LvcError::Config {
            path: source.to_string(),
            message,
        };

        if !is_plain_name(&self.counter_file) {
            return Err(invalid(format!(
                "counterFile must be a plain file name, got {:?}",
                self.counter_file
            )));
        }
        if !is_plain_name(&self.folder_prefix) {
            return Err(invalid(format!(
                "folderPrefix must be a plain name, got {:?}",
                self.folder_prefix
            )));
        }
        if self.counter_file.starts_with(&self.folder_prefix) {
            return Err(invalid(format!(
                "counterFile {:?} must not start with folderPrefix {:?}",
                self.counter_file, self.folder_prefix
            )));
        }
        if self.git_program.trim().is_empty() {
            return Err(invalid("gitProgram must not be empty".to_string()));
        }
        Ok(())
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}

/// Strip `//` and `/* */` comments outside of string literals.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape_next = false;

    while let Some(c) = chars.next() {
        if escape_next {
            result.push(c);
            escape_next = false;
            continue;
        }

        if in_string {
            match c {
                '\\' => escape_next = true,
                '"' => in_string = false,
                _ => {}
            }
            result.push(c);
            continue;
        }

        let next = chars.peek().copied();
        match (c, next) {
            ('"', _) => {
                in_string = true;
                result.push(c);
            }
            ('/', Some('/')) => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        result.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = ' ';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            }
            _ => result.push(c),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = LvcConfig::default();
        assert_eq!(config.counter_file, "lvc.db");
        assert_eq!(config.folder_prefix, "Version");
        assert_eq!(config.git_program, "git");
        assert!(config.validate("<defaults>").is_ok());
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config = LvcConfig::parse_jsonc(r#"{ "folderPrefix": "Snap" }"#, "lvc.json").unwrap();
        assert_eq!(config.folder_prefix, "Snap");
        assert_eq!(config.counter_file, "lvc.db");
    }

    #[test]
    fn test_parse_jsonc_comments() {
        let content = r#"{
            // line comment
            "gitProgram": "/usr/local/bin/git", /* block */
            "counterFile": "counter//not-a-comment"
        }"#;
        let config = LvcConfig::parse_jsonc(content, "lvc.jsonc").unwrap();
        assert_eq!(config.git_program, "/usr/local/bin/git");
        assert_eq!(config.counter_file, "counter//not-a-comment");
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = LvcConfig::parse_jsonc("{ not json", "lvc.json").unwrap_err();
        assert!(matches!(err, LvcError::Config { .. }));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_validate_rejects_paths() {
        let config = LvcConfig {
            counter_file: "../lvc.db".to_string(),
            ..LvcConfig::default()
        };
        assert!(config.validate("lvc.json").is_err());

        let config = LvcConfig {
            folder_prefix: String::new(),
            ..LvcConfig::default()
        };
        assert!(config.validate("lvc.json").is_err());
    }

    #[test]
    fn test_validate_rejects_counter_shadowed_by_prefix() {
        let config = LvcConfig {
            counter_file: "Version.db".to_string(),
            ..LvcConfig::default()
        };
        assert!(config.validate("lvc.json").is_err());
    }

    #[test]
    fn test_git_override_ignores_blank() {
        let mut config = LvcConfig::default();
        config.apply_git_override("   ");
        assert_eq!(config.git_program, "git");
        config.apply_git_override("/opt/git/bin/git");
        assert_eq!(config.git_program, "/opt/git/bin/git");
    }

    #[tokio::test]
    async fn test_load_project_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("lvc.json"),
            r#"{ "counterFile": "versions.txt" }"#,
        )
        .unwrap();

        let (config, source) = LvcConfig::load(temp.path()).await.unwrap();
        assert_eq!(config.counter_file, "versions.txt");
        assert_eq!(source, Some(temp.path().join("lvc.json")));
    }

    #[tokio::test]
    async fn test_load_without_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let (config, source) = LvcConfig::load(temp.path()).await.unwrap();
        assert_eq!(config.counter_file, "lvc.db");
        assert!(source.is_none());
    }

    #[tokio::test]
    async fn test_jsonc_takes_precedence() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("lvc.json"), r#"{ "folderPrefix": "A" }"#).unwrap();
        std::fs::write(temp.path().join("lvc.jsonc"), r#"{ "folderPrefix": "B" }"#).unwrap();

        let (config, _) = LvcConfig::load(temp.path()).await.unwrap();
        assert_eq!(config.folder_prefix, "B");
    }
}
