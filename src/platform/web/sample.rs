use crate::config::AppConfig;
use crate::error::{IntakeError, IntakeResult};
use crate::usecase::ports::sample::SampleSource;
use crate::usecase::services::import_service::{PickedFile, CSV_MIME};

/// Fetches `{origin}{base_path}/{sample_file}` from the page's own server.
pub struct HttpSample {
    client: reqwest::Client,
}

impl HttpSample {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

fn page_origin() -> IntakeResult<String> {
    web_sys::window()
        .ok_or_else(|| IntakeError::SampleRequest("window is unavailable".to_string()))?
        .location()
        .origin()
        .map_err(|err| IntakeError::SampleRequest(format!("{err:?}")))
}

impl SampleSource for HttpSample {
    async fn fetch(&self, config: &AppConfig) -> IntakeResult<PickedFile> {
        let url = format!("{}{}", page_origin()?, config.sample_path());
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| IntakeError::SampleRequest(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntakeError::SampleFetch {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| IntakeError::SampleRequest(err.to_string()))?;
        Ok(PickedFile {
            name: config.sample_file.clone(),
            mime: Some(CSV_MIME.to_string()),
            bytes: bytes.to_vec(),
        })
    }
}
