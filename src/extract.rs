//! Extraction of diagram source from chat responses.

use regex::Regex;
use std::sync::LazyLock;

static MERMAID_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```mermaid\r?\n(.*?)\r?\n```").expect("mermaid block pattern is valid")
});

/// Return the interior of the first ```` ```mermaid ```` fenced block.
///
/// The opening line and closing fence are excluded. `None` means no block
/// was found; `Some("")` is an empty but well-formed block.
pub fn extract_mermaid_block(response: &str) -> Option<&str> {
    MERMAID_BLOCK
        .captures(response)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
