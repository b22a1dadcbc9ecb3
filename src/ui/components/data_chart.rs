use dioxus::prelude::*;

use crate::domain::entities::balance_sheet::{Bucket, StackCategory, StackDatum, YearChart};
use crate::ui::chart_layout::{
    format_amount, format_percentage, grid_percentages, layout_bars, ChartGeometry,
};
use crate::ui::styles::{chart_panel_style, legend_swatch_style, tooltip_style, year_card_style};

const CHART_WIDTH: f64 = 420.0;
const NO_DATA_MESSAGE: &str =
    "グラフを表示するためのデータが不足しているか、形式が正しくありません。";

pub fn chart_title(file_name: Option<&str>) -> String {
    format!("貸借対照表 構成比 (ファイル: {})", file_name.unwrap_or("N/A"))
}

pub fn detail_line(name: &str, value: f64, percentage: f64) -> String {
    format!(
        "{name}: {} (百万円) - {}%",
        format_amount(value),
        format_percentage(percentage)
    )
}

#[component]
pub fn BalanceSheetCharts(
    charts: Vec<YearChart>,
    file_name: Option<String>,
    chart_height: u32,
    label_min_height: u32,
) -> Element {
    if charts.is_empty() {
        return rsx! {
            p { style: "margin-top: 24px; text-align: center; color: #6b7280;", "{NO_DATA_MESSAGE}" }
        };
    }

    let title = chart_title(file_name.as_deref());

    rsx! {
        div { style: "{chart_panel_style()}",
            h3 { style: "font-size: 20px; font-weight: 600; color: #374151; margin-bottom: 24px; text-align: center;",
                "{title}"
            }
            div { style: "display: flex; flex-wrap: wrap; gap: 16px;",
                for chart in charts {
                    YearChartCard {
                        key: "{chart.year}",
                        chart: chart.clone(),
                        chart_height,
                        label_min_height,
                    }
                }
            }
        }
    }
}

#[component]
fn YearChartCard(chart: YearChart, chart_height: u32, label_min_height: u32) -> Element {
    let mut hovered = use_signal(|| None::<StackCategory>);
    let geometry = ChartGeometry::new(CHART_WIDTH, chart_height as f64);
    let bars = layout_bars(&chart, &geometry, label_min_height as f64);
    let view_box = format!("0 0 {} {}", geometry.width, geometry.height);
    let grid_left = geometry.margin_left;
    let grid_right = geometry.width - geometry.margin_right;
    let axis_y = geometry.plot_bottom() + 20.0;

    let tooltip = hovered().and_then(|category| {
        let stack = match category {
            StackCategory::Assets => chart.assets.clone(),
            StackCategory::LiabilitiesAndEquity => chart.liabilities_and_equity.clone(),
        };
        let left_pct = bars
            .iter()
            .find(|bar| bar.category == category)
            .map(|bar| bar.center_x() / geometry.width * 100.0)
            .unwrap_or(50.0);
        stack.has_details().then_some((stack, left_pct))
    });

    rsx! {
        div { style: "{year_card_style()}",
            h3 { style: "font-size: 24px; font-weight: 700; text-align: center; margin-bottom: 16px; color: #4f46e5;",
                "{chart.year}"
            }
            svg {
                width: "100%",
                view_box: "{view_box}",
                for pct in grid_percentages() {
                    line {
                        x1: "{grid_left}",
                        x2: "{grid_right}",
                        y1: "{geometry.y_for(pct)}",
                        y2: "{geometry.y_for(pct)}",
                        stroke: "#e5e7eb",
                        stroke_dasharray: "3 3",
                    }
                }
                for bar in bars.clone() {
                    g {
                        key: "{bar.category.label()}",
                        onmouseenter: move |_| hovered.set(Some(bar.category)),
                        onmouseleave: move |_| hovered.set(None),
                        for segment in bar.segments.clone() {
                            rect {
                                x: "{segment.x}",
                                y: "{segment.y}",
                                width: "{segment.width}",
                                height: "{segment.height}",
                                fill: "{segment.bucket.color()}",
                            }
                            if let Some(label) = segment.label.clone() {
                                text {
                                    x: "{segment.center_x()}",
                                    y: "{segment.center_y()}",
                                    fill: "#333",
                                    text_anchor: "middle",
                                    dominant_baseline: "middle",
                                    font_size: "10",
                                    "{label}"
                                }
                            }
                        }
                        text {
                            x: "{bar.center_x()}",
                            y: "{axis_y}",
                            fill: "#666",
                            text_anchor: "middle",
                            font_size: "12",
                            "{bar.category.label()}"
                        }
                    }
                }
            }
            Legend {}
            if let Some((stack, left_pct)) = tooltip {
                StackTooltip { year: chart.year.clone(), stack, left_pct, top: 80.0 }
            }
        }
    }
}

#[component]
fn StackTooltip(year: String, stack: StackDatum, left_pct: f64, top: f64) -> Element {
    // Tooltip lists sections top-down, the reverse of the drawing order.
    let sections: Vec<_> = stack
        .segments
        .iter()
        .rev()
        .filter(|segment| !segment.details.is_empty())
        .cloned()
        .collect();

    rsx! {
        div { style: "{tooltip_style(left_pct, top)}",
            p { style: "font-weight: 600; color: #374151; margin: 0 0 8px 0;", "{year} 内訳" }
            for segment in sections {
                div { key: "{segment.bucket.label()}",
                    p { style: "font-weight: 600; margin: 8px 0 4px 0; color: {segment.bucket.color()};",
                        "{segment.bucket.label()} ({format_amount(segment.amount)} 百万円)"
                    }
                    for (idx, item) in segment.details.iter().enumerate() {
                        p { key: "{idx}", style: "font-size: 13px; margin: 0 0 0 8px; color: #1f2937;",
                            "{detail_line(&item.name, item.value, item.percentage)}"
                        }
                    }
                }
            }
            p { style: "font-size: 12px; margin: 8px 0 0 0; color: #6b7280;",
                "{stack.category.label()}合計: {format_amount(stack.total)} (百万円)"
            }
        }
    }
}

#[component]
fn Legend() -> Element {
    rsx! {
        div { style: "display: flex; flex-wrap: wrap; justify-content: center; gap: 12px; padding-top: 10px; font-size: 12px; color: #374151;",
            for bucket in Bucket::ALL {
                span { key: "{bucket.label()}",
                    span { style: "{legend_swatch_style(bucket.color())}" }
                    "{bucket.label()}"
                }
            }
        }
    }
}
