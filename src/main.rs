mod app;
mod config;
mod error;

mod domain {
    pub mod entities {
        pub mod balance_sheet;
        pub mod table;
    }
}

mod infra {
    pub mod import {
        pub mod csv;
        pub mod xlsx;
    }
}

mod platform {
    #[cfg(not(feature = "web"))]
    pub mod desktop {
        pub mod sample;
    }
    #[cfg(feature = "web")]
    pub mod web {
        pub mod sample;
    }
}

mod ui {
    pub mod chart_layout;
    pub mod styles;
    pub mod components {
        pub mod data_chart;
        pub mod data_preview;
        pub mod file_upload;
    }
    pub mod state {
        pub mod app_state;
    }
}

mod usecase {
    pub mod ports {
        pub mod sample;
    }
    pub mod services {
        pub mod chart_service;
        pub mod import_service;
    }
}

#[cfg(test)]
mod tests;

use crate::app::App;

#[cfg(feature = "web")]
fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[cfg(all(feature = "desktop", not(feature = "web")))]
fn main() {
    dioxus::logger::initialize_default();

    let webview_data_dir = config::default_webview_data_dir()
        .expect("should resolve and create WebView2 data directory");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title(config::APP_TITLE))
                .with_data_directory(webview_data_dir),
        )
        .launch(App);
}
