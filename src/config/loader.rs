// file: src/config/loader.rs
// version: 1.0.0
// guid: e3a7d1b0-5f8c-4b24-86d4-f8a9b0c1d2e3

//! Configuration file loading and environment variable substitution

use super::ShellConfig;
use crate::{Result, ShellError};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
    env_vars: HashMap<String, String>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            env_vars: std::env::vars().collect(),
        }
    }

    /// Load shell configuration from a YAML file
    pub fn load_shell_config<P: AsRef<Path>>(&self, path: P) -> Result<ShellConfig> {
        let content = fs::read_to_string(&path).map_err(|e| {
            ShellError::config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        self.parse_shell_config(&content)
    }

    /// Parse shell configuration from YAML text
    pub fn parse_shell_config(&self, content: &str) -> Result<ShellConfig> {
        let expanded = self.expand_env_vars(content)?;

        // serde_yaml reads an empty document as null, not as an empty map
        let config: ShellConfig = if expanded.trim().is_empty() {
            ShellConfig::default()
        } else {
            serde_yaml::from_str(&expanded)?
        };

        config.validate()?;

        Ok(config)
    }

    /// Expand `${VAR}` references in configuration content
    fn expand_env_vars(&self, content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ShellError::config(format!("Invalid regex pattern: {}", e)))?;

        let mut result = content.to_string();
        let mut missing_vars = Vec::new();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];

            if let Some(value) = self.env_vars.get(var_name) {
                result = result.replace(placeholder, value);
            } else {
                missing_vars.push(var_name.to_string());
            }
        }

        if !missing_vars.is_empty() {
            return Err(ShellError::config(format!(
                "Missing environment variables: {}",
                missing_vars.join(", ")
            )));
        }

        Ok(result)
    }

    /// Set environment variable for substitution
    pub fn set_env_var(&mut self, key: String, value: String) {
        self.env_vars.insert(key, value);
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_env_var_expansion() {
        let mut loader = ConfigLoader::new();
        loader.set_env_var("SANDBOX_TEST_ROOT".to_string(), "/srv/sandbox".to_string());

        let config = loader.parse_shell_config("root: ${SANDBOX_TEST_ROOT}").unwrap();
        assert_eq!(config.root, PathBuf::from("/srv/sandbox"));
    }

    #[test]
    fn test_missing_env_var() {
        let loader = ConfigLoader::new();

        let result = loader.parse_shell_config("root: ${SANDBOX_TEST_DEFINITELY_MISSING}");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Missing environment variables"));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let loader = ConfigLoader::new();
        assert_eq!(loader.parse_shell_config("").unwrap(), ShellConfig::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let loader = ConfigLoader::new();
        assert!(loader.parse_shell_config("batch_size_hint: 0").is_err());
        assert!(matches!(
            loader.parse_shell_config("batch_size_hint: [1, 2]"),
            Err(ShellError::Yaml(_))
        ));
    }

    #[test]
    fn test_load_shell_config() -> Result<()> {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
root: /tmp/sandbox
prompt: "$ "
batch_size_hint: 16
"#
        )
        .unwrap();

        let loader = ConfigLoader::new();
        let config = loader.load_shell_config(file.path())?;

        assert_eq!(config.root, PathBuf::from("/tmp/sandbox"));
        assert_eq!(config.prompt, "$ ");
        assert_eq!(config.batch_size_hint, 16);

        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let loader = ConfigLoader::new();
        let result = loader.load_shell_config("/definitely/not/here.yaml");
        assert!(matches!(result, Err(ShellError::Config(_))));
    }
}
