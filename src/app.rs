use dioxus::prelude::*;
use tracing::info;

use crate::config::{AppConfig, APP_TITLE};
use crate::ui::components::data_chart::BalanceSheetCharts;
use crate::ui::components::data_preview::DataPreview;
use crate::ui::components::file_upload::{FileUpload, UploadedFile};
use crate::ui::state::app_state::AppState;
use crate::ui::styles::{error_box_style, loading_style, page_card_style, root_container_style};
use crate::usecase::ports::sample::SampleSource;
use crate::usecase::services::chart_service::build_year_charts;
use crate::usecase::services::import_service::ImportService;

#[cfg(not(feature = "web"))]
fn sample_source() -> crate::platform::desktop::sample::BundledSample {
    crate::platform::desktop::sample::BundledSample
}

#[cfg(feature = "web")]
fn sample_source() -> crate::platform::web::sample::HttpSample {
    crate::platform::web::sample::HttpSample::new()
}

#[component]
pub fn App() -> Element {
    let config = use_hook(AppConfig::default);
    let mut state = AppState::new();
    let load = state.load;

    let charts = use_memo(move || build_year_charts(&load.read().table));

    let sample_config = config.clone();
    use_future(move || {
        let config = sample_config.clone();
        async move {
            let ticket = state.begin_load(config.sample_file.clone());
            let result = match sample_source().fetch(&config).await {
                Ok(file) => ImportService::new().import(&file),
                Err(err) => Err(err),
            };
            state.finish_load(ticket, result);
        }
    });

    let on_file = move |upload: UploadedFile| {
        let ticket = state.begin_load(upload.name());
        spawn(async move {
            let result = match upload.read().await {
                Ok(file) => {
                    info!(file = %file.name, bytes = file.bytes.len(), "read picked file");
                    ImportService::new().import(&file)
                }
                Err(err) => Err(err),
            };
            state.finish_load(ticket, result);
        });
    };

    let (loading, error, current_file, loaded_at, has_rows, show_results) = {
        let snapshot = load.read();
        (
            snapshot.loading,
            snapshot.error.clone(),
            snapshot.file_name.clone(),
            snapshot.loaded_at.clone(),
            !snapshot.table.is_empty(),
            snapshot.show_results(),
        )
    };

    rsx! {
        main { style: "{root_container_style()}",
            div { style: "{page_card_style()}",
                header { style: "margin-bottom: 32px; text-align: center;",
                    h1 { style: "font-size: 32px; font-weight: 700; color: #1f2937;", "{APP_TITLE}" }
                    p { style: "color: #4b5563; margin-top: 8px;",
                        "CSVまたはExcelファイルをアップロードしてデータをグラフ化します。"
                    }
                }

                FileUpload { disabled: loading, on_file }

                if loading {
                    div { style: "{loading_style()}",
                        p { "データを読み込み中..." }
                    }
                }

                if let Some(message) = error {
                    div { style: "{error_box_style()}",
                        p { style: "font-weight: 600;", "エラー:" }
                        p { "{message}" }
                    }
                }

                if show_results {
                    div { style: "margin-top: 32px;",
                        h2 { style: "font-size: 24px; font-weight: 600; color: #374151; margin-bottom: 16px;",
                            "読み込みデータ: {current_file.clone().unwrap_or_default()}"
                        }
                        if let Some(at) = loaded_at {
                            p { style: "font-size: 12px; color: #9ca3af; margin-bottom: 8px;", "読込時刻: {at}" }
                        }
                        DataPreview { table: load.read().table.clone(), limit: config.preview_rows }
                        if has_rows {
                            BalanceSheetCharts {
                                charts: charts(),
                                file_name: current_file.clone(),
                                chart_height: config.chart_height,
                                label_min_height: config.label_min_height,
                            }
                        }
                    }
                }
            }
        }
    }
}
