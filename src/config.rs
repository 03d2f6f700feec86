use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub generator: GeneratorConfig,
    pub output: OutputConfig,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Name shown on the root page
    pub name: String,
    /// Prefix for module names inside the project
    pub package_name: String,
}

/// Generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub include_ambient_modules: bool,
    pub document_globals: bool,
    pub globals_page_name: String,
    /// Dump generation statistics after a run
    pub debug: bool,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub pretty: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "index".to_string(),
            package_name: ".".to_string(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            include_ambient_modules: true,
            document_globals: true,
            globals_page_name: "(globals)".to_string(),
            debug: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("docgraph.json"),
            pretty: true,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(&mut self, output: Option<PathBuf>, compact: bool, debug: bool) {
        if let Some(out) = output {
            self.output.path = out;
        }

        if compact {
            self.output.pretty = false;
        }

        if debug {
            self.generator.debug = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.project.package_name.trim().is_empty() {
            return Err(Error::config_validation("package_name cannot be empty"));
        }

        if self.generator.globals_page_name.trim().is_empty() {
            return Err(Error::config_validation("globals_page_name cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.project.name, "index");
        assert_eq!(config.project.package_name, ".");
        assert!(config.generator.include_ambient_modules);
        assert!(config.generator.document_globals);
        assert_eq!(config.generator.globals_page_name, "(globals)");
        assert_eq!(config.output.path, PathBuf::from("docgraph.json"));
        assert!(config.output.pretty);
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[project]
name = "My Library"
package_name = "mylib"

[generator]
document_globals = false

[output]
path = "out/docs.json"
pretty = false
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.project.name, "My Library");
        assert_eq!(config.project.package_name, "mylib");
        assert!(!config.generator.document_globals);
        assert!(config.generator.include_ambient_modules);
        assert_eq!(config.output.path, PathBuf::from("out/docs.json"));
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/docgraph.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[generator\ndebug = ").unwrap();
        let result = Config::load(file.path());
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let config = Config::load_or_default(Path::new("/nonexistent/docgraph.toml"));
        assert_eq!(config.project.package_name, ".");
    }

    #[test]
    fn test_validation_empty_package_name() {
        let mut config = Config::default();
        config.project.package_name = "  ".to_string();
        let result = config.validate();
        assert!(matches!(result, Err(Error::ConfigValidation(_))));
    }

    #[test]
    fn test_validation_empty_globals_page_name() {
        let mut config = Config::default();
        config.generator.globals_page_name.clear();
        let result = config.validate();
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_cli_output() {
        let mut config = Config::default();
        config.merge_cli(Some(PathBuf::from("/custom/out.json")), false, false);
        assert_eq!(config.output.path, PathBuf::from("/custom/out.json"));
        assert!(config.output.pretty);
    }

    #[test]
    fn test_merge_cli_compact_and_debug() {
        let mut config = Config::default();
        config.merge_cli(None, true, true);
        assert!(!config.output.pretty);
        assert!(config.generator.debug);
        assert_eq!(config.output.path, PathBuf::from("docgraph.json"));
    }

    #[test]
    fn test_generator_section_parsing() {
        let toml_str = r#"globals_page_name = "Globals""#;
        let generator: GeneratorConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(generator.globals_page_name, "Globals");
        assert!(!generator.debug);
    }
}
