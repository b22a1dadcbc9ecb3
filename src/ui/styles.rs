pub fn root_container_style() -> &'static str {
    "min-height: 100vh; display: flex; flex-direction: column; align-items: center; padding: 32px 16px; background: #f9fafb; font-family: sans-serif; box-sizing: border-box;"
}

pub fn page_card_style() -> &'static str {
    "width: 100%; max-width: 1024px; background: #fff; padding: 24px 32px; border-radius: 12px; box-shadow: 0 10px 24px rgba(0,0,0,0.08); box-sizing: border-box;"
}

pub fn error_box_style() -> &'static str {
    "margin-top: 24px; padding: 16px; background: #fee2e2; color: #b91c1c; border: 1px solid #fca5a5; border-radius: 6px;"
}

pub fn loading_style() -> &'static str {
    "margin-top: 24px; text-align: center; color: #2563eb;"
}

pub fn upload_button_style(disabled: bool) -> String {
    let cursor = if disabled { "not-allowed" } else { "pointer" };
    let opacity = if disabled { "0.6" } else { "1" };
    format!(
        "border: 1px solid #d1d5db; background: #f9fafb; padding: 8px 14px; border-radius: 8px; cursor: {cursor}; opacity: {opacity};"
    )
}

pub fn drop_zone_style(dragging: bool) -> String {
    let (border, background) = if dragging {
        ("#6366f1", "#eef2ff")
    } else {
        ("#d1d5db", "transparent")
    };
    format!(
        "margin-bottom: 16px; padding: 16px; border: 2px dashed {border}; border-radius: 8px; background: {background};"
    )
}

pub fn preview_container_style() -> &'static str {
    "overflow-x: auto; background: #fff; border: 1px solid #e5e7eb; border-radius: 6px; box-shadow: 0 1px 3px rgba(0,0,0,0.06);"
}

pub fn preview_header_cell_style() -> &'static str {
    "position: sticky; top: 0; z-index: 1; background: #f9fafb; padding: 10px 14px; text-align: left; font-size: 12px; color: #6b7280; border-bottom: 1px solid #e5e7eb; white-space: nowrap;"
}

pub fn preview_cell_style(row_idx: usize) -> String {
    let background = if row_idx % 2 == 0 { "#fff" } else { "#f9fafb" };
    format!(
        "padding: 10px 14px; font-size: 13px; color: #374151; white-space: nowrap; background: {background};"
    )
}

pub fn chart_panel_style() -> &'static str {
    "margin-top: 32px; padding: 20px; background: #fff; border: 1px solid #e5e7eb; border-radius: 6px; box-shadow: 0 10px 24px rgba(0,0,0,0.08);"
}

pub fn year_card_style() -> &'static str {
    "position: relative; flex: 1; min-width: 320px; margin-bottom: 24px; padding: 16px; border: 1px solid #e5e7eb; border-radius: 8px; box-shadow: inset 0 1px 3px rgba(0,0,0,0.06);"
}

pub fn tooltip_style(left_pct: f64, top: f64) -> String {
    format!(
        "position: absolute; left: {left_pct}%; top: {top}px; transform: translateX(-50%); max-width: 280px; background: #fff; padding: 12px; border: 1px solid #d1d5db; border-radius: 6px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200; pointer-events: none;"
    )
}

pub fn legend_swatch_style(color: &str) -> String {
    format!("display: inline-block; width: 12px; height: 12px; background: {color}; margin-right: 4px;")
}
