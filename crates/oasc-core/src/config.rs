use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Project configuration loaded from `.oasc.yaml`.
///
/// Command-line flags take precedence over every value here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OascConfig {
    /// A path or URL to the OpenAPI document.
    pub source: String,
    pub output_dir: String,
    /// The package that generated modules live under, like `petstore.client`.
    pub base_package: Option<String>,
    pub allow_warnings: bool,
}

impl Default for OascConfig {
    fn default() -> Self {
        Self {
            source: "openapi.yaml".to_string(),
            output_dir: "src/generated".to_string(),
            base_package: None,
            allow_warnings: false,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".oasc.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OascConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: OascConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# oasc configuration
source: openapi.yaml        # path or http(s) URL
output_dir: src/generated
# base_package: petstore.client
allow_warnings: false       # allOf/oneOf/anyOf and non-JSON bodies emit warnings
"#
}
