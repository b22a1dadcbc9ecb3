use dioxus::prelude::*;

use crate::domain::entities::table::Table;
use crate::ui::styles::{preview_cell_style, preview_container_style, preview_header_cell_style};

pub fn remaining_rows_note(total_rows: usize, limit: usize) -> Option<String> {
    (total_rows > limit).then(|| {
        format!(
            "...他 {} 行 (最初の{}行のみ表示)",
            total_rows - limit,
            limit
        )
    })
}

#[component]
pub fn DataPreview(table: Table, limit: usize) -> Element {
    if table.is_empty() {
        return rsx! {
            p { style: "color: #6b7280;", "表示するデータがありません。" }
        };
    }

    let note = remaining_rows_note(table.row_count(), limit);
    let preview_rows: Vec<(usize, Vec<String>)> = table
        .rows
        .iter()
        .take(limit)
        .map(|row| row.iter().map(|cell| cell.display()).collect())
        .enumerate()
        .collect();

    rsx! {
        div { style: "{preview_container_style()}",
            table { style: "border-collapse: collapse; min-width: 100%;",
                thead {
                    tr {
                        for header in table.headers.iter() {
                            th { style: "{preview_header_cell_style()}", "{header}" }
                        }
                    }
                }
                tbody {
                    for (row_idx, row) in preview_rows {
                        tr { key: "{row_idx}",
                            for value in row {
                                td { style: "{preview_cell_style(row_idx)}", "{value}" }
                            }
                        }
                    }
                }
            }
            if let Some(note) = note {
                p { style: "padding: 12px; font-size: 13px; color: #6b7280; text-align: center;", "{note}" }
            }
        }
    }
}
