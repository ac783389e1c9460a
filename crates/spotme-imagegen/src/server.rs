use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::Client;
use spotme_config::ImageGenConfig;
use spotme_core::{keys::object_key, text::truncate};
use spotme_storage::StorageClient;

use crate::{
    client::GeminiClient,
    error::{ImageGenError, Result},
    prompt::{Scene, instruction, styled_prompt},
    protocol::{GenerateContentRequest, GenerationConfig, Part},
    reference::fetch_reference_image,
    types::{DeferredImageRequest, DeferredImageResponse, GenerateImageRequest, GenerateImageResponse},
};

const JPEG: &str = "image/jpeg";

/// Validated deferred job
#[derive(Debug, Clone)]
pub struct DeferredJob {
    pub job_id: String,
    pub text: String,
    pub scene: Scene,
    pub output_filename: String,
    pub user_image_url: Option<String>,
}

/// Image generation server shared by the synchronous and deferred endpoints
#[derive(Debug)]
pub struct Server {
    gemini: Option<GeminiClient>,
    storage: Arc<StorageClient>,
    http: Client,
    config: ImageGenConfig,
}

impl Server {
    /// Generate from a free-text prompt
    ///
    /// The image is stored when possible and otherwise returned inline.
    pub async fn generate(&self, request: GenerateImageRequest) -> Result<GenerateImageResponse> {
        let prompt = request.prompt.ok_or(ImageGenError::MissingField("prompt"))?;
        let gemini = self.gemini.as_ref().ok_or(ImageGenError::NotConfigured)?;

        let prompt = styled_prompt(&prompt, &self.config.style_suffix, request.style.as_deref());
        tracing::info!(model = %self.config.model, prompt = truncate(&prompt, 100), "generating image");

        let request = GenerateContentRequest::new(
            vec![Part::Text {
                text: instruction(&prompt),
            }],
            None,
        );
        let image = gemini.generate_image(&self.config.model, &request).await?;

        let key = object_key("generated", ".jpg");
        let asset = self.storage.persist_or_inline(&key, JPEG, JPEG, &image.data).await;

        Ok(asset.into())
    }

    /// Check a deferred request's fields and the required credentials
    pub fn prepare_deferred(&self, request: DeferredImageRequest) -> Result<DeferredJob> {
        let (Some(text), Some(scene), Some(job_id), Some(output_filename)) =
            (request.text, request.scene, request.job_id, request.output_filename)
        else {
            return Err(ImageGenError::MissingParameters);
        };

        tracing::info!(
            %job_id,
            %scene,
            text = truncate(&text, 50),
            user_image = request.user_image_url.as_deref().map(|url| truncate(url, 60)),
            "deferred image job"
        );

        if self.gemini.is_none() || !self.storage.is_configured() {
            return Err(ImageGenError::KeysNotConfigured);
        }

        Ok(DeferredJob {
            job_id,
            text,
            scene: Scene::from_name(&scene),
            output_filename,
            user_image_url: request.user_image_url,
        })
    }

    /// Public URL the job's image is written to
    pub fn job_url(&self, job: &DeferredJob) -> String {
        self.storage.public_url(&job.output_filename)
    }

    /// Generate a scene image and store it at the job's output location
    ///
    /// There is no inline fallback: a failed upload fails the job.
    pub async fn run_deferred(&self, job: &DeferredJob) -> Result<DeferredImageResponse> {
        let gemini = self.gemini.as_ref().ok_or(ImageGenError::KeysNotConfigured)?;

        let prompt = job.scene.render(&job.text);
        let mut parts = vec![Part::Text {
            text: instruction(&prompt),
        }];

        if let Some(url) = &job.user_image_url
            && let Some(reference) = fetch_reference_image(&self.http, url).await
        {
            parts.push(reference);
        }

        let request = GenerateContentRequest::new(
            parts,
            Some(GenerationConfig::image_only(&self.config.aspect_ratio, &self.config.image_size)),
        );

        tracing::debug!(job_id = %job.job_id, model = %self.config.deferred_model, "calling gemini");

        let image = gemini
            .generate_image(&self.config.deferred_model, &request)
            .await
            .map_err(|e| match e {
                ImageGenError::GenerationFailed { status, body } => ImageGenError::GeminiApi { status, body },
                other => other,
            })?;

        let mime_type = image.mime_type.as_deref().filter(|m| !m.is_empty()).unwrap_or(JPEG);
        let bytes = STANDARD
            .decode(&image.data)
            .map_err(|e| ImageGenError::InvalidResponse(format!("image payload is not valid base64: {e}")))?;

        let image_url = self
            .storage
            .upload(&job.output_filename, mime_type, bytes)
            .await
            .map_err(|e| {
                tracing::error!(job_id = %job.job_id, error = %e, "deferred upload failed");
                ImageGenError::UploadFailed(e.to_string())
            })?;

        tracing::info!(job_id = %job.job_id, %image_url, "deferred image stored");

        Ok(DeferredImageResponse {
            success: true,
            image_url,
        })
    }
}

/// Builder for constructing the image generation server from configuration
pub struct ImageGenServerBuilder<'a> {
    config: &'a spotme_config::Config,
    http: Client,
    storage: Arc<StorageClient>,
}

impl<'a> ImageGenServerBuilder<'a> {
    pub fn new(config: &'a spotme_config::Config, http: Client, storage: Arc<StorageClient>) -> Self {
        Self { config, http, storage }
    }

    pub fn build(self) -> Server {
        let gemini = self.config.google.api_key.clone().map(|key| {
            GeminiClient::new(self.http.clone(), key, self.config.google.generative_url.clone())
        });

        if gemini.is_none() {
            tracing::debug!("image generation disabled until google.api_key is set");
        }

        Server {
            gemini,
            storage: self.storage,
            http: self.http,
            config: self.config.imagegen.clone(),
        }
    }
}
