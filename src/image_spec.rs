//! JSON image specs and how their prompt is sourced.
//!
//! A spec file looks like:
//!
//! ```json
//! {
//!   "prompt": "isometric server rack",
//!   "output_image": "assets/custom/rack.png",
//!   "source_logic": "source/mermaid/rack.mmd",
//!   "style_prompt": "flat pastel, thin outlines"
//! }
//! ```
//!
//! Every field is optional. When `source_logic` is present the prompt is built
//! from that file plus `style_prompt`, and `prompt` is ignored.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Fields recognised in a spec file. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawImageSpec {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub output_image: Option<String>,
    #[serde(default)]
    pub source_logic: Option<String>,
    #[serde(default)]
    pub style_prompt: Option<String>,
}

/// Where the image prompt comes from, decided once at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSource {
    /// The spec's own `prompt` field (empty if absent).
    Plain(String),
    /// A diagram description file combined with a style guide.
    LogicDerived {
        /// Diagram description to read, resolved against the project root.
        source_logic: PathBuf,
        /// Style guide text (empty if absent).
        style_prompt: String,
    },
}

impl PromptSource {
    /// True when there is nothing to send to the service.
    pub fn is_empty(&self) -> bool {
        matches!(self, PromptSource::Plain(p) if p.trim().is_empty())
    }
}

/// A parsed spec with its output path resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSpec {
    /// The JSON file this spec was read from.
    pub spec_path: PathBuf,
    /// Where the generated image is written.
    pub output_path: PathBuf,
    /// How to build the prompt.
    pub prompt: PromptSource,
}

impl ImageSpec {
    /// Parse spec JSON read from `spec_path`.
    ///
    /// Relative paths inside the spec resolve against `root`. Without
    /// `output_image`, the output is `<default_dir>/<spec stem>.png`.
    pub fn parse(
        spec_path: &Path,
        json: &str,
        root: &Path,
        default_dir: &Path,
    ) -> Result<Self, serde_json::Error> {
        let raw: RawImageSpec = serde_json::from_str(json)?;
        Ok(Self::from_raw(spec_path, raw, root, default_dir))
    }

    /// Resolve a raw spec into its output path and prompt source.
    pub fn from_raw(spec_path: &Path, raw: RawImageSpec, root: &Path, default_dir: &Path) -> Self {
        let output_path = match raw.output_image {
            Some(explicit) => root.join(explicit),
            None => default_dir.join(default_image_name(spec_path)),
        };

        let prompt = match raw.source_logic {
            Some(logic) => PromptSource::LogicDerived {
                source_logic: root.join(logic),
                style_prompt: raw.style_prompt.unwrap_or_default(),
            },
            None => PromptSource::Plain(raw.prompt.unwrap_or_default()),
        };

        Self {
            spec_path: spec_path.to_path_buf(),
            output_path,
            prompt,
        }
    }
}

/// `<stem>.png` for a spec file, e.g. `flow.json` becomes `flow.png`.
fn default_image_name(spec_path: &Path) -> String {
    let stem = spec_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}.png", stem)
}
