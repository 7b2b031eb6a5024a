use std::io::Cursor;
use std::time::Instant;

use async_trait::async_trait;
use image::{ImageFormat, Rgb, RgbImage};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::services::codec;

/// Raster size requested from the provider and rendered by the placeholder.
pub const OUTPUT_WIDTH: u32 = 1024;
pub const OUTPUT_HEIGHT: u32 = 1536;

const TRYON_PROMPT: &str = concat!(
    "Create a realistic virtual try-on result by placing the clothing item from the second ",
    "image onto the person in the first image. The clothing should fit naturally on the ",
    "person's body with realistic proportions, shadows and lighting. Keep the background, ",
    "the person's pose and body position unchanged. The result must look photorealistic."
);

/// Backend capable of compositing a person photo with a clothing photo.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Short identifier used in logs and health output.
    fn name(&self) -> &'static str;

    async fn render(&self, person: &[u8], clothing: &[u8]) -> Result<Vec<u8>, GenerationError>;
}

/// Output of a single generation call.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    /// Wall-clock duration of the backend call.
    pub elapsed_ms: i64,
}

/// Times calls into whichever [`ImageGenerator`] is configured.
pub struct GenerationGateway {
    backend: Box<dyn ImageGenerator>,
}

impl GenerationGateway {
    pub fn new(backend: impl ImageGenerator + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Use the OpenAI backend when a key is configured, the placeholder otherwise.
    pub fn from_config(config: &AppConfig) -> Self {
        match config.openai_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Self::new(OpenAiImageClient::new(
                config.openai_base_url.clone(),
                key.to_string(),
                config.openai_image_model.clone(),
            )),
            _ => Self::new(PlaceholderGenerator::default()),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Run one generation. Failures are returned as-is, never retried.
    pub async fn generate(
        &self,
        person: &[u8],
        clothing: &[u8],
    ) -> Result<GeneratedImage, GenerationError> {
        let start = Instant::now();
        let bytes = self.backend.render(person, clothing).await?;
        let elapsed = start.elapsed();

        metrics::histogram!("tryon_generation_seconds", "backend" => self.backend.name())
            .record(elapsed.as_secs_f64());

        tracing::debug!(
            backend = self.backend.name(),
            elapsed_ms = elapsed.as_millis() as u64,
            output_bytes = bytes.len(),
            "Generation finished"
        );

        Ok(GeneratedImage {
            bytes,
            elapsed_ms: i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX),
        })
    }
}

/// Client for an OpenAI-compatible `images/edits` endpoint.
pub struct OpenAiImageClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    b64_json: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ProviderErrorBody,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    message: String,
}

impl OpenAiImageClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            http: Client::new(),
            base_url,
            api_key,
            model,
        }
    }
}

/// Build a multipart file part, sniffing the MIME type from the bytes.
fn image_part(bytes: &[u8], label: &str) -> Result<Part, GenerationError> {
    let (mime, extension) = image::guess_format(bytes)
        .map(|format| {
            (
                format.to_mime_type(),
                format.extensions_str().first().copied().unwrap_or("png"),
            )
        })
        .unwrap_or(("image/png", "png"));

    Ok(Part::bytes(bytes.to_vec())
        .file_name(format!("{label}.{extension}"))
        .mime_str(mime)?)
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn render(&self, person: &[u8], clothing: &[u8]) -> Result<Vec<u8>, GenerationError> {
        let url = format!("{}/images/edits", self.base_url.trim_end_matches('/'));

        let form = Form::new()
            .text("model", self.model.clone())
            .text("prompt", TRYON_PROMPT)
            .text("size", format!("{OUTPUT_WIDTH}x{OUTPUT_HEIGHT}"))
            .text("n", "1")
            .part("image[]", image_part(person, "person")?)
            .part("image[]", image_part(clothing, "clothing")?);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorEnvelope>().await {
                Ok(envelope) => envelope.error.message,
                Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
            };
            return Err(GenerationError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body: ImagesResponse = response.json().await?;
        let encoded = body
            .data
            .into_iter()
            .next()
            .and_then(|image| image.b64_json)
            .ok_or_else(|| GenerationError::MalformedOutput("no image in response".to_string()))?;

        codec::decode(&encoded).map_err(|e| GenerationError::MalformedOutput(e.to_string()))
    }
}

/// Renders a fixed gradient PNG so the service runs without a provider.
pub struct PlaceholderGenerator {
    width: u32,
    height: u32,
}

impl PlaceholderGenerator {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }
}

impl Default for PlaceholderGenerator {
    fn default() -> Self {
        Self::with_size(OUTPUT_WIDTH, OUTPUT_HEIGHT)
    }
}

#[async_trait]
impl ImageGenerator for PlaceholderGenerator {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    async fn render(&self, _person: &[u8], _clothing: &[u8]) -> Result<Vec<u8>, GenerationError> {
        let height = self.height as f32;
        let canvas = RgbImage::from_fn(self.width, self.height, |_, y| {
            let t = y as f32 / height;
            Rgb([
                (96.0 + 96.0 * t) as u8,
                (112.0 + 64.0 * t) as u8,
                (168.0 + 56.0 * t) as u8,
            ])
        });

        let mut buffer = Cursor::new(Vec::new());
        canvas.write_to(&mut buffer, ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Image provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Image provider returned malformed output: {0}")]
    MalformedOutput(String),

    #[error("Failed to render placeholder image: {0}")]
    Render(#[from] image::ImageError),
}
