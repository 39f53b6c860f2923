//! Generation service seam.
//!
//! Jobs talk to the external service only through [`GenerationService`].
//! [`OpenAiClient`] is the network implementation; tests substitute a fake.

pub mod client;
pub mod types;

pub use client::OpenAiClient;

/// Errors from generation calls.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("service returned no {0}")]
    EmptyResult(&'static str),
}

/// Text and image generation, one request/response exchange each.
///
/// Neither call is idempotent at the service: repeating it produces a
/// different artifact and costs another request.
pub trait GenerationService {
    /// Run a system + user exchange and return the raw response text.
    fn generate_text(&self, system_prompt: &str, user_content: &str)
    -> Result<String, GenerationError>;

    /// Generate one image for `prompt` and return its encoded bytes.
    fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, GenerationError>;
}
