use crate::config::AppConfig;
use crate::error::IntakeResult;
use crate::usecase::ports::sample::SampleSource;
use crate::usecase::services::import_service::{PickedFile, CSV_MIME};

pub const BUNDLED_SAMPLE: &[u8] = include_bytes!("../../../public/sample.csv");

/// The desktop build has no web server, so the sample ships inside the binary.
pub struct BundledSample;

impl SampleSource for BundledSample {
    async fn fetch(&self, config: &AppConfig) -> IntakeResult<PickedFile> {
        Ok(PickedFile {
            name: config.sample_file.clone(),
            mime: Some(CSV_MIME.to_string()),
            bytes: BUNDLED_SAMPLE.to_vec(),
        })
    }
}
