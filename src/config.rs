//! 配置模块，负责加载 `lookql` 命令行的 JSON 配置文件

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 默认配置文件，在当前工作目录中查找
pub const DEFAULT_CONFIG_FILE: &str = "lookql.json";

/// 配置加载错误
#[derive(Error, Debug)]
#[error("config error: {message}")]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// 是否格式化输出语句 JSON
    pub pretty: bool,
    /// REPL 提示符
    pub prompt: String,
    /// REPL 历史记录文件，未设置时不保存历史
    pub history_file: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            prompt: "lookql> ".to_string(),
            history_file: None,
        }
    }
}

impl CliConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();

        // 检查文件是否存在
        if !path_ref.exists() {
            return Err(ConfigError::new(format!(
                "config file does not exist: {}",
                path_ref.display()
            )));
        }

        // 读取文件内容
        let content = fs::read_to_string(path_ref).map_err(|e| {
            ConfigError::new(format!("cannot read config file {}: {}", path_ref.display(), e))
        })?;

        // 解析JSON
        serde_json::from_str(&content).map_err(|e| {
            ConfigError::new(format!("cannot parse config file {}: {}", path_ref.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lookql-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_load_valid_json_config() {
        let path = temp_path("valid.json");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"{{
            "pretty": false,
            "prompt": "> ",
            "history_file": "/tmp/lookql_history"
        }}"#
        )
        .unwrap();

        let config = CliConfig::from_json_file(&path).unwrap();
        assert!(!config.pretty);
        assert_eq!(config.prompt, "> ");
        assert_eq!(config.history_file, Some(PathBuf::from("/tmp/lookql_history")));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let path = temp_path("partial.json");
        fs::write(&path, r#"{"pretty": false}"#).unwrap();

        let config = CliConfig::from_json_file(&path).unwrap();
        assert!(!config.pretty);
        assert_eq!(config.prompt, CliConfig::default().prompt);
        assert_eq!(config.history_file, None);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_invalid_json_config() {
        let path = temp_path("invalid.json");
        fs::write(&path, "invalid json").unwrap();

        let err = CliConfig::from_json_file(&path).unwrap_err();
        assert!(err.message.starts_with("cannot parse config file"));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file() {
        let err = CliConfig::from_json_file("non_existent_lookql.json").unwrap_err();
        assert_eq!(
            err.to_string(),
            "config error: config file does not exist: non_existent_lookql.json"
        );
    }
}
