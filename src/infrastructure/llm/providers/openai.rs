//! OpenAI-compatible provider - chat, image generation and transcription

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::application::errors::BackendError;
use crate::domain::entities::ChatMessage;
use crate::domain::traits::{ImageGenerator, Transcriber};
use crate::infrastructure::config::OpenAIConfig;
use crate::infrastructure::llm::{LLMError, LLMResponse, LLMResult, LLMUsage, LLM};

/// OpenAI provider
pub struct OpenAIProvider {
    api_key: String,
    client: Client,
    base_url: String,
    model: String,
    image_model: String,
    image_size: String,
    transcription_model: String,
}

impl OpenAIProvider {
    pub fn new(api_key: impl Into<String>, model: Option<&str>) -> Self {
        let defaults = OpenAIConfig::default();
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            base_url: defaults.base_url,
            model: model.unwrap_or(&defaults.model).to_string(),
            image_model: defaults.image_model,
            image_size: defaults.image_size,
            transcription_model: defaults.transcription_model,
        }
    }

    pub fn from_config(config: &OpenAIConfig) -> Result<Self, LLMError> {
        let api_key = config.api_key.clone().ok_or(LLMError::MissingApiKey)?;
        Ok(Self {
            api_key,
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            image_model: config.image_model.clone(),
            image_size: config.image_size.clone(),
            transcription_model: config.transcription_model.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Map HTTP failures onto provider errors
    async fn check(response: Response) -> LLMResult<Response> {
        if response.status() == 429 {
            return Err(LLMError::RateLimited);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LLMError::Api(format!("status: {}, body: {}", status, body)));
        }
        Ok(response)
    }
}

/// API request structure
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// API response structure
#[derive(Deserialize, Debug)]
struct ChatResponse {
    model: String,
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
    user: &'a str,
}

#[derive(Deserialize, Debug)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Deserialize, Debug)]
struct ImageData {
    url: Option<String>,
}

#[derive(Deserialize, Debug)]
struct TranscriptionResponse {
    text: String,
}

#[async_trait]
impl LLM for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        model: Option<&str>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> LLMResult<LLMResponse> {
        let model = model.unwrap_or(&self.model);

        let request = ChatRequest {
            model: model.to_string(),
            messages,
            temperature,
            max_tokens,
        };

        let response = self.client
            .post(self.url("chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LLMError::Network(e.to_string()))?;

        let chat_response: ChatResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| LLMError::Parse(e.to_string()))?;

        let choice = chat_response.choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::Api("No choices in response".to_string()))?;

        let usage = chat_response.usage.map(|u| LLMUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(LLMResponse {
            content: choice.message.content.unwrap_or_default(),
            model: chat_response.model,
            usage,
            finish_reason: choice.finish_reason,
        })
    }
}

#[async_trait]
impl ImageGenerator for OpenAIProvider {
    async fn generate_image(&self, identity: &str, prompt: &str) -> Result<String, BackendError> {
        let request = ImageRequest {
            model: &self.image_model,
            prompt,
            n: 1,
            size: &self.image_size,
            user: identity,
        };

        let response = self.client
            .post(self.url("images/generations"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LLMError::Network(e.to_string()))?;

        let images: ImageResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| LLMError::Parse(e.to_string()))?;

        images.data
            .into_iter()
            .find_map(|d| d.url)
            .ok_or_else(|| BackendError::Api("No image in response".to_string()))
    }
}

#[async_trait]
impl Transcriber for OpenAIProvider {
    async fn transcribe(&self, identity: &str, path: &Path) -> Result<String, BackendError> {
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.mp3".to_string());
        tracing::debug!("Transcribing {} ({} bytes) for {}", file_name, data.len(), identity);

        let form = multipart::Form::new()
            .text("model", self.transcription_model.clone())
            .part("file", multipart::Part::bytes(data).file_name(file_name));

        let response = self.client
            .post(self.url("audio/transcriptions"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| LLMError::Network(e.to_string()))?;

        let transcription: TranscriptionResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| LLMError::Parse(e.to_string()))?;

        Ok(transcription.text)
    }
}
