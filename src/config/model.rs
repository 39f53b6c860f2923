//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for an assetgen project.
///
/// This struct represents the contents of `assetgen.yaml`. All paths are
/// relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Service settings
    // =========================================================================
    /// Environment variable holding the service credential.
    #[serde(default = "default_credential_env")]
    pub credential_env: String,

    /// Base URL of the generation service (no trailing `/v1`).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Model used for draft-to-diagram text generation.
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Model used for image generation.
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Requested image size, `WIDTHxHEIGHT`.
    #[serde(default = "default_image_size")]
    pub image_size: String,

    /// Requested image quality tier.
    #[serde(default)]
    pub image_quality: ImageQuality,

    /// Per-request timeout in seconds. 0 keeps the transport default.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    // =========================================================================
    // Diagram job
    // =========================================================================
    /// Globs selecting draft text files.
    #[serde(default = "default_drafts_globs")]
    pub drafts_globs: Vec<String>,

    /// Directory receiving `<draft>.mmd` outputs.
    #[serde(default = "default_mermaid_output_dir")]
    pub mermaid_output_dir: String,

    /// System-role instruction file for the diagram job.
    #[serde(default = "default_system_prompt_path")]
    pub system_prompt_path: String,

    // =========================================================================
    // Image job
    // =========================================================================
    /// Globs selecting JSON image specs, unioned in order.
    #[serde(default = "default_spec_globs")]
    pub spec_globs: Vec<String>,

    /// Directory receiving `<spec>.png` when a spec names no `output_image`.
    #[serde(default = "default_image_output_dir")]
    pub image_output_dir: String,

    // =========================================================================
    // Output settings
    // =========================================================================
    /// Write outputs through a temp file and rename.
    #[serde(default = "default_true")]
    pub atomic_writes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credential_env: default_credential_env(),
            api_base_url: default_api_base_url(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            image_size: default_image_size(),
            image_quality: ImageQuality::default(),
            request_timeout_secs: default_request_timeout_secs(),
            drafts_globs: default_drafts_globs(),
            mermaid_output_dir: default_mermaid_output_dir(),
            system_prompt_path: default_system_prompt_path(),
            spec_globs: default_spec_globs(),
            image_output_dir: default_image_output_dir(),
            atomic_writes: default_true(),
        }
    }
}
