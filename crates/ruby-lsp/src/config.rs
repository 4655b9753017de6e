//! Server configuration sourced from `initialize`'s `initializationOptions`.
//!
//! None of these fields are acted on by the core handlers; they are stored
//! so that a future extension point (a real formatter integration, linter
//! diagnostics) has somewhere to read them from without another
//! round-trip to the client.

use serde::Deserialize;

/// The recognized `enabledFeatures` bag, with the exact default table this
/// backend ships: every feature defaults to enabled except `inlayHint`,
/// which this core never implements and advertises as off by default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnabledFeatures {
    pub code_actions: bool,
    pub diagnostics: bool,
    pub document_highlights: bool,
    pub document_symbols: bool,
    pub folding_ranges: bool,
    pub formatting: bool,
    pub hover: bool,
    pub inlay_hint: bool,
    pub on_type_formatting: bool,
    pub selection_ranges: bool,
    pub semantic_highlighting: bool,
    pub completion: bool,
    pub definition: bool,
    pub references: bool,
    pub signatures_help: bool,
    pub workspace_symbol: bool,
}

impl Default for EnabledFeatures {
    fn default() -> Self {
        Self {
            code_actions: true,
            diagnostics: true,
            document_highlights: true,
            document_symbols: true,
            folding_ranges: true,
            formatting: true,
            hover: true,
            inlay_hint: false,
            on_type_formatting: true,
            selection_ranges: true,
            semantic_highlighting: true,
            completion: true,
            definition: true,
            references: true,
            signatures_help: true,
            workspace_symbol: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub formatter: Option<String>,
    pub linters: Vec<String>,
    pub enabled_features: EnabledFeatures,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { formatter: None, linters: Vec::new(), enabled_features: EnabledFeatures::default() }
    }
}

impl ServerConfig {
    /// Parse `initializationOptions`. Missing or ill-typed fields fall back
    /// to their defaults rather than failing `initialize`.
    pub fn from_initialization_options(value: Option<&serde_json::Value>) -> Self {
        value.and_then(|v| serde_json::from_value(v.clone()).ok()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_options_yields_defaults() {
        let config = ServerConfig::from_initialization_options(None);
        assert!(config.formatter.is_none());
        assert!(config.linters.is_empty());
        assert!(config.enabled_features.hover);
        assert!(!config.enabled_features.inlay_hint);
    }

    #[test]
    fn parses_known_fields() {
        let options = serde_json::json!({
            "formatter": "rubocop",
            "linters": ["rubocop", "standardrb"],
            "enabledFeatures": { "hover": true, "completion": false }
        });
        let config = ServerConfig::from_initialization_options(Some(&options));
        assert_eq!(config.formatter.as_deref(), Some("rubocop"));
        assert_eq!(config.linters, vec!["rubocop".to_string(), "standardrb".to_string()]);
        assert!(config.enabled_features.hover);
        assert!(!config.enabled_features.completion);
        // fields not mentioned keep their documented defaults
        assert!(config.enabled_features.definition);
        assert!(!config.enabled_features.inlay_hint);
    }

    #[test]
    fn ill_typed_options_fall_back_to_defaults() {
        let options = serde_json::json!("not an object");
        let config = ServerConfig::from_initialization_options(Some(&options));
        assert!(config.formatter.is_none());
    }
}
