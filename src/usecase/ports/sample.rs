use crate::config::AppConfig;
use crate::error::IntakeResult;
use crate::usecase::services::import_service::PickedFile;

/// Where the bundled sample balance sheet comes from on first visit.
#[allow(async_fn_in_trait)]
pub trait SampleSource {
    async fn fetch(&self, config: &AppConfig) -> IntakeResult<PickedFile>;
}
