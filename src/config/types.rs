//! Supporting types and default values for the config model.

use serde::{Deserialize, Serialize};

/// Quality tier requested from the image endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImageQuality {
    /// Standard tier.
    Standard,
    /// High quality tier (default).
    #[default]
    Hd,
}

impl ImageQuality {
    /// Wire value sent to the image endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageQuality::Standard => "standard",
            ImageQuality::Hd => "hd",
        }
    }
}

// Default value functions for serde
pub(super) fn default_credential_env() -> String {
    "AI_API_KEY".to_string()
}
pub(super) fn default_api_base_url() -> String {
    "https://api.openai.com".to_string()
}
pub(super) fn default_drafts_globs() -> Vec<String> {
    vec!["source/drafts/*.txt".to_string()]
}
pub(super) fn default_mermaid_output_dir() -> String {
    "source/mermaid".to_string()
}
pub(super) fn default_system_prompt_path() -> String {
    "prompts/mermaid-generator.md".to_string()
}
pub(super) fn default_spec_globs() -> Vec<String> {
    vec![
        "source/generative/*.json".to_string(),
        "source/polished/*.json".to_string(),
    ]
}
pub(super) fn default_image_output_dir() -> String {
    "assets/diagrams-generated".to_string()
}
pub(super) fn default_text_model() -> String {
    "gpt-4o".to_string()
}
pub(super) fn default_image_model() -> String {
    "dall-e-3".to_string()
}
pub(super) fn default_image_size() -> String {
    "1024x1024".to_string()
}
pub(super) fn default_request_timeout_secs() -> u64 {
    300
}
pub(super) fn default_true() -> bool {
    true
}
