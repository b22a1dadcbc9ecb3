use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use rfd::{AsyncFileDialog, FileHandle};
use tracing::warn;

use crate::error::{IntakeError, IntakeResult};
use crate::ui::styles::{drop_zone_style, upload_button_style};
use crate::usecase::services::import_service::{FileKind, PickedFile, ACCEPTED_EXTENSIONS};

/// Outcome of checking a picked file name before anything is read.
pub fn check_selection(file_name: &str) -> Result<FileKind, String> {
    FileKind::sniff(file_name, None).map_err(|err| err.to_string())
}

/// Only the first dropped file is taken, and nothing while a load is running.
pub fn first_drop<T>(disabled: bool, files: Vec<T>) -> Option<T> {
    if disabled {
        return None;
    }
    files.into_iter().next()
}

/// A file that passed the name check, from either the dialog or a drop.
#[derive(Debug)]
pub enum UploadedFile {
    Picked(FileHandle),
    Dropped(FileData),
}

impl UploadedFile {
    pub fn name(&self) -> String {
        match self {
            UploadedFile::Picked(handle) => handle.file_name(),
            UploadedFile::Dropped(file) => file.name(),
        }
    }

    pub async fn read(self) -> IntakeResult<PickedFile> {
        match self {
            UploadedFile::Picked(handle) => Ok(PickedFile {
                name: handle.file_name(),
                mime: None,
                bytes: handle.read().await,
            }),
            UploadedFile::Dropped(file) => {
                let bytes = file
                    .read_bytes()
                    .await
                    .map_err(|err| IntakeError::FileRead(err.to_string()))?;
                Ok(PickedFile {
                    name: file.name(),
                    mime: file.content_type(),
                    bytes: bytes.to_vec(),
                })
            }
        }
    }
}

#[component]
pub fn FileUpload(disabled: bool, on_file: EventHandler<UploadedFile>) -> Element {
    let mut selected_file = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);
    let mut dragging = use_signal(|| false);

    let mut accept = move |file: UploadedFile| {
        let name = file.name();
        match check_selection(&name) {
            Ok(_) => {
                selected_file.set(Some(name));
                error.set(None);
                on_file.call(file);
            }
            Err(message) => {
                warn!(file = %name, "unsupported file selected");
                selected_file.set(None);
                error.set(Some(message));
            }
        }
    };

    rsx! {
        div {
            style: "{drop_zone_style(dragging())}",
            ondragover: move |evt| {
                evt.prevent_default();
                if !disabled {
                    dragging.set(true);
                }
            },
            ondragleave: move |_| dragging.set(false),
            ondrop: move |evt| {
                evt.prevent_default();
                dragging.set(false);
                if let Some(file) = first_drop(disabled, evt.files()) {
                    accept(UploadedFile::Dropped(file));
                }
            },
            label {
                style: "display: block; font-size: 14px; color: #374151; margin-bottom: 4px;",
                "ファイルを選択 (CSV or Excel):"
            }
            button {
                style: "{upload_button_style(disabled)}",
                disabled: disabled,
                onclick: move |_| {
                    spawn(async move {
                        let Some(handle) = AsyncFileDialog::new()
                            .add_filter("CSV / Excel", &ACCEPTED_EXTENSIONS)
                            .pick_file()
                            .await else {
                            return;
                        };
                        accept(UploadedFile::Picked(handle));
                    });
                },
                "ファイルを開く"
            }
            p { style: "margin-top: 8px; font-size: 12px; color: #6b7280;",
                "またはここにファイルをドロップしてください"
            }
            if let Some(name) = selected_file() {
                p { style: "margin-top: 8px; font-size: 14px; color: #16a34a;", "選択されたファイル: {name}" }
            }
            if let Some(message) = error() {
                p { style: "margin-top: 8px; font-size: 14px; color: #dc2626;", "{message}" }
            }
        }
    }
}
