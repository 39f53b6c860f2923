//! Prompt assembly for both jobs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Preamble placed before diagram logic in an image prompt.
pub const LOGIC_PREAMBLE: &str = "Create a diagram based on this logic:";

/// Heading placed before the style guide in an image prompt.
pub const STYLE_PREAMBLE: &str = "Style Guide:";

/// System-role instruction for the draft-to-diagram job.
///
/// Loaded once per run; its absence aborts the diagram job.
#[derive(Debug, Clone)]
pub struct SystemPrompt {
    /// File the instruction was read from.
    pub path: PathBuf,
    /// Instruction text.
    pub text: String,
}

impl SystemPrompt {
    /// Read the instruction template from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }
}

/// Build the image prompt for a spec derived from a diagram description.
pub fn build_logic_prompt(logic: &str, style_prompt: &str) -> String {
    format!(
        "{}\n{}\n\n{}\n{}",
        LOGIC_PREAMBLE, logic, STYLE_PREAMBLE, style_prompt
    )
}
