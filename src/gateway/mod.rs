use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::GatewayError;
use crate::payload::CompiledPayload;

/// Extra form fields owned by the wizard, not the compiler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SubmitReceipt {
    pub status: u16,
    /// Parsed JSON body, or the raw text as a JSON string.
    pub body: Value,
}

#[async_trait]
pub trait Gateway: Send + Sync {
    async fn submit(&self, payload: &CompiledPayload, opts: &SubmitOptions) -> Result<SubmitReceipt, GatewayError>;
}

pub struct HttpGateway {
    endpoint: String,
    client: Client,
    timeout: Duration,
}

impl HttpGateway {
    pub fn new(endpoint: Option<String>, timeout_secs: u64) -> Result<Self, GatewayError> {
        let endpoint = endpoint.filter(|e| !e.trim().is_empty()).ok_or(GatewayError::MissingEndpoint)?;
        Ok(Self { endpoint, client: Client::new(), timeout: Duration::from_secs(timeout_secs) })
    }
}

/// Multipart form: `prompt`, one `images` part per file in order,
/// `image_instructions` as JSON, then the optional wizard fields.
pub fn build_form(payload: &CompiledPayload, opts: &SubmitOptions) -> Result<Form, GatewayError> {
    let mut form = Form::new().text("prompt", payload.prompt.clone());
    for file in &payload.files {
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(if file.mime.is_empty() { "application/octet-stream" } else { &file.mime })?;
        form = form.part("images", part);
    }
    form = form.text("image_instructions", payload.instructions_json()?);
    if let Some(v) = &opts.aspect_ratio {
        form = form.text("aspect_ratio", v.clone());
    }
    if let Some(v) = &opts.resolution {
        form = form.text("resolution", v.clone());
    }
    if let Some(v) = &opts.template_name {
        form = form.text("template_name", v.clone());
    }
    Ok(form)
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn submit(&self, payload: &CompiledPayload, opts: &SubmitOptions) -> Result<SubmitReceipt, GatewayError> {
        let form = build_form(payload, opts)?;
        debug!(endpoint = %self.endpoint, images = payload.files.len(), "submitting payload");

        let resp = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(GatewayError::Status { status: status.as_u16(), body: text });
        }
        info!(status = status.as_u16(), "generation request accepted");

        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(SubmitReceipt { status: status.as_u16(), body })
    }
}
