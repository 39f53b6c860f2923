//! Blocking HTTP client for the chat-completions and image endpoints.

use super::types::{ChatMessage, ChatRequest, ChatResponse, ImageRequest, ImageResponse};
use super::{GenerationError, GenerationService};
use crate::config::{Config, ImageQuality};
use crate::context::Credential;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

/// Settings the client sends with every request.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub image_size: String,
    pub image_quality: ImageQuality,
}

impl ClientSettings {
    /// Take service settings from a validated config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            image_size: config.image_size.clone(),
            image_quality: config.image_quality,
        }
    }
}

/// Network implementation of [`GenerationService`].
#[derive(Debug)]
pub struct OpenAiClient {
    http: Client,
    credential: Credential,
    settings: ClientSettings,
}

impl OpenAiClient {
    /// Create a client from config and the resolved credential.
    pub fn new(config: &Config, credential: Credential) -> Result<Self, GenerationError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            credential,
            settings: ClientSettings::from_config(config),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{}", self.settings.base_url, path)
    }

    fn post_json<B: serde::Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, GenerationError> {
        let response = self
            .http
            .post(self.endpoint(path))
            .bearer_auth(self.credential.expose())
            .json(body)
            .send()?;

        let response = check_status(response)?;

        response
            .json()
            .map_err(|e| GenerationError::InvalidResponse(format!("failed to parse response: {e}")))
    }

    fn image_request(&self, prompt: &str) -> ImageRequest {
        ImageRequest {
            model: self.settings.image_model.clone(),
            prompt: prompt.to_string(),
            size: self.settings.image_size.clone(),
            quality: self.settings.image_quality.as_str().to_string(),
            n: 1,
        }
    }
}

impl GenerationService for OpenAiClient {
    fn generate_text(
        &self,
        system_prompt: &str,
        user_content: &str,
    ) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: self.settings.text_model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_content),
            ],
        };

        let response: ChatResponse = self.post_json("chat/completions", &request)?;
        response
            .first_content()
            .ok_or(GenerationError::EmptyResult("message content"))
    }

    fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, GenerationError> {
        let response: ImageResponse = self.post_json("images/generations", &self.image_request(prompt))?;
        let url = response
            .first_url()
            .ok_or(GenerationError::EmptyResult("image URL"))?;

        // The URL is pre-signed; the credential is not sent to it.
        let download = check_status(self.http.get(&url).send()?)?;
        Ok(download.bytes()?.to_vec())
    }
}

/// Turn a non-success status into [`GenerationError::Api`] carrying the body.
fn check_status(response: Response) -> Result<Response, GenerationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().unwrap_or_else(|_| "(no body)".into());
    Err(GenerationError::Api {
        status: status.as_u16(),
        message,
    })
}
