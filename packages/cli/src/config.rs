use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use twinspect_editor::EditorOptions;

pub const DEFAULT_CONFIG_NAME: &str = "twinspect.config.json";

/// Twinspect configuration file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Editor options, stored at the top level of the file
    #[serde(flatten)]
    pub editor: EditorOptions,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid {}: {}", config_path.display(), e))?;
            tracing::debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "classAttribute": "class",
            "indent": "    ",
            "hideWhitespaceText": false,
            "viewportWidth": 1024
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.editor.class_attribute, "class");
        assert_eq!(config.editor.indent, "    ");
        assert!(!config.editor.hide_whitespace_text);
        assert_eq!(config.editor.viewport_width, 1024.0);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{ "indent": "\t" }"#).unwrap();

        assert_eq!(config.editor.indent, "\t");
        assert_eq!(config.editor.class_attribute, "className");
        assert!(config.editor.hide_whitespace_text);
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = std::env::temp_dir().join(format!("twinspect-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let config = Config::load(&dir.display().to_string()).unwrap();
        assert_eq!(config, Config::default());

        std::fs::write(dir.join(DEFAULT_CONFIG_NAME), r#"{ "viewportWidth": 320 }"#).unwrap();
        let config = Config::load(&dir.display().to_string()).unwrap();
        assert_eq!(config.editor.viewport_width, 320.0);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
