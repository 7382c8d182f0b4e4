//! Generator configuration.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

fn default_view_annotation() -> String {
    "FxView".to_string()
}

fn default_component_annotation() -> String {
    "FxComponent".to_string()
}

fn default_handler_annotation() -> String {
    "FxHandler".to_string()
}

fn default_handlers_annotation() -> String {
    "FxHandlers".to_string()
}

fn default_name_template() -> String {
    "{name}Generated".to_string()
}

fn default_lifecycle_method() -> String {
    "init".to_string()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file")]
    Io(#[from] io::Error),
    #[error("failed to parse config file")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenConfig {
    /// Type-level marker selecting generation candidates. Carries the view
    /// resource identifier in its `name` element.
    #[serde(default = "default_view_annotation")]
    pub view_annotation: String,
    /// Field-level marker carrying a widget identifier.
    #[serde(default = "default_component_annotation")]
    pub component_annotation: String,
    /// Method-level marker carrying a widget identifier, action name and
    /// declared control type.
    #[serde(default = "default_handler_annotation")]
    pub handler_annotation: String,
    /// Method-level container aggregating repeated handler markers.
    #[serde(default = "default_handlers_annotation")]
    pub handlers_annotation: String,
    /// Template for the generated type name; `{name}` is the candidate's
    /// simple name.
    #[serde(default = "default_name_template")]
    pub name_template: String,
    /// Zero-parameter method invoked last in the generated constructor,
    /// when the candidate declares it.
    #[serde(default = "default_lifecycle_method")]
    pub lifecycle_method: String,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            view_annotation: default_view_annotation(),
            component_annotation: default_component_annotation(),
            handler_annotation: default_handler_annotation(),
            handlers_annotation: default_handlers_annotation(),
            name_template: default_name_template(),
            lifecycle_method: default_lifecycle_method(),
        }
    }
}

impl GenConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn generated_name(&self, simple_name: &str) -> String {
        self.name_template.replace("{name}", simple_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_per_field() {
        let config: GenConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GenConfig::default());

        let config: GenConfig =
            serde_json::from_str(r#"{"name_template": "{name}Wired"}"#).unwrap();
        assert_eq!(config.name_template, "{name}Wired");
        assert_eq!(config.view_annotation, "FxView");
    }

    #[test]
    fn generated_name_substitutes_template() {
        let config = GenConfig::default();
        assert_eq!(config.generated_name("MainView"), "MainViewGenerated");

        let custom = GenConfig {
            name_template: "Wired{name}".to_string(),
            ..GenConfig::default()
        };
        assert_eq!(custom.generated_name("MainView"), "WiredMainView");
    }
}
