pub const APP_TITLE: &str = "データ可視化ダッシュボード";
pub const SAMPLE_FILE_NAME: &str = "sample.csv";
pub const DEFAULT_BASE_PATH: &str = "/dashboard";

/// Build-time settings. `APP_BASE_PATH` is read when the crate is compiled and
/// prefixes every asset URL on the web build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_path: String,
    pub sample_file: String,
    pub preview_rows: usize,
    pub label_min_height: u32,
    pub chart_height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_path: normalize_base_path(
                option_env!("APP_BASE_PATH").unwrap_or(DEFAULT_BASE_PATH),
            ),
            sample_file: SAMPLE_FILE_NAME.to_string(),
            preview_rows: 10,
            label_min_height: 15,
            chart_height: 450,
        }
    }
}

impl AppConfig {
    #[cfg_attr(not(feature = "web"), allow(dead_code))]
    pub fn sample_path(&self) -> String {
        format!("{}/{}", self.base_path, self.sample_file)
    }
}

/// `"dashboard/"` and `"/dashboard"` both become `"/dashboard"`; an empty or
/// root path becomes `""`.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(all(feature = "desktop", not(feature = "web")))]
pub fn default_webview_data_dir() -> anyhow::Result<std::path::PathBuf> {
    use anyhow::{anyhow, Context};

    let project_dirs = directories::ProjectDirs::from("com", "bs-dashboard", "bs-dashboard")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    let webview_data_dir = project_dirs.data_local_dir().join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}
