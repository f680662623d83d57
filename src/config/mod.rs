use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// File name of the optional on-disk config, looked up next to the executable.
pub const CONFIG_FILE_NAME: &str = "config.json";

const DEFAULT_TEMPLATE: &str = "Auto-commit: {{toolName}} modified {{fileName}}\n\n\
- File: {{filePath}}\n\
- Tool: {{toolName}}\n\
- Session: {{sessionId}}\n\n\
🤖 Generated with Claude Code\n\
Co-Authored-By: Claude <noreply@anthropic.com>";

const DEFAULT_EXCLUDES: &[&str] = &[
    "*.log",
    "*.tmp",
    "*.temp",
    ".env*",
    "*.key",
    "*.pem",
    "*.p12",
    "*.pfx",
    "node_modules/**",
    ".git/**",
    "*.pyc",
    "__pycache__/**",
];

/// Effective configuration for one hook invocation.
///
/// Field names serialize as camelCase to match the `defaultConfig` object in
/// `config.json`. `matcher`, `timeout` and `description` are informational:
/// they are read by whatever registers the hook, not by the hook itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub enabled: bool,
    pub matcher: String,
    pub timeout: u64,
    pub description: String,
    pub commit_message_template: String,
    pub exclude_patterns: Vec<String>,
    pub skip_empty_commits: bool,
    /// Carried for compatibility; staging is always limited to the edited file.
    pub add_all_files: bool,
    pub branch_restrictions: BTreeSet<String>,
    pub max_commit_message_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            enabled: true,
            matcher: "Edit|Write|MultiEdit".to_string(),
            timeout: 30,
            description: "Automatically commit file changes with contextual messages".to_string(),
            commit_message_template: DEFAULT_TEMPLATE.to_string(),
            exclude_patterns: DEFAULT_EXCLUDES.iter().map(|p| p.to_string()).collect(),
            skip_empty_commits: true,
            add_all_files: false,
            branch_restrictions: BTreeSet::new(),
            max_commit_message_length: 500,
        }
    }
}

/// Errors that can occur when resolving the effective config.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    #[diagnostic(code(auto_commit::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in config {path}: {source}")]
    #[diagnostic(
        code(auto_commit::config::parse),
        help("the file must hold a JSON object, e.g. {{\"defaultConfig\": {{\"skipEmptyCommits\": false}}}}")
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    #[diagnostic(
        code(auto_commit::config::invalid),
        help("check the value types against `auto-commit-hook config` output")
    )]
    Invalid(String),
}

impl Config {
    /// Resolve the effective config from three layers, lowest precedence first:
    /// built-in defaults, the `defaultConfig` object of the JSON file at
    /// `file`, and `overrides`.
    ///
    /// The merge is shallow: a key present in a later layer replaces the
    /// whole value, lists included. A missing file is not an error.
    pub fn resolve(
        file: Option<&Path>,
        overrides: Option<&Map<String, Value>>,
    ) -> Result<Self, ConfigError> {
        let mut merged = match serde_json::to_value(Config::default()) {
            Ok(Value::Object(map)) => map,
            Ok(_) => Map::new(),
            Err(e) => return Err(ConfigError::Invalid(e.to_string())),
        };

        if let Some(path) = file {
            merged.extend(file_layer(path)?);
        }
        if let Some(overrides) = overrides {
            merged.extend(overrides.clone());
        }

        serde_json::from_value(Value::Object(merged))
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Default location of `config.json`: the directory holding the executable.
    pub fn default_path() -> Option<PathBuf> {
        let exe = std::env::current_exe().ok()?;
        exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME))
    }
}

/// Read the `defaultConfig` object out of a config file.
///
/// Absent file → empty layer. Present but unreadable or malformed → error.
fn file_layer(path: &Path) -> Result<Map<String, Value>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let doc: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Object(mut doc) = doc else {
        return Err(ConfigError::Invalid(format!(
            "{}: top level must be a JSON object",
            path.display()
        )));
    };

    match doc.remove("defaultConfig") {
        None => Ok(Map::new()),
        Some(Value::Object(layer)) => Ok(layer),
        Some(_) => Err(ConfigError::Invalid(
            "`defaultConfig` must be a JSON object".to_string(),
        )),
    }
}
