use crate::domain::entities::balance_sheet::{Bucket, StackCategory, StackDatum, YearChart};
use crate::domain::entities::table::format_f64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
}

impl ChartGeometry {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin_top: 20.0,
            margin_right: 30.0,
            margin_bottom: 40.0,
            margin_left: 20.0,
        }
    }

    pub fn plot_top(&self) -> f64 {
        self.margin_top
    }

    pub fn plot_bottom(&self) -> f64 {
        self.height - self.margin_bottom
    }

    pub fn plot_height(&self) -> f64 {
        (self.plot_bottom() - self.plot_top()).max(0.0)
    }

    pub fn plot_width(&self) -> f64 {
        (self.width - self.margin_left - self.margin_right).max(0.0)
    }

    /// Y coordinate of a 0–100 percentage on the value axis.
    pub fn y_for(&self, percentage: f64) -> f64 {
        self.plot_bottom() - self.plot_height() * percentage / 100.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRect {
    pub bucket: Bucket,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: Option<String>,
}

impl SegmentRect {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub category: StackCategory,
    pub x: f64,
    pub width: f64,
    pub segments: Vec<SegmentRect>,
}

impl BarLayout {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

pub fn segment_label(bucket: Bucket, percentage: f64) -> String {
    format!("{} ({}%)", bucket.label(), format_percentage(percentage))
}

pub fn label_visible(height: f64, percentage: f64, min_height: f64) -> bool {
    height >= min_height && percentage != 0.0
}

fn layout_stack(
    stack: &StackDatum,
    x: f64,
    width: f64,
    geometry: &ChartGeometry,
    label_min_height: f64,
) -> BarLayout {
    let mut cursor = 0.0_f64;
    let segments = stack
        .segments
        .iter()
        .map(|segment| {
            // negative equity has no drawable extent
            let extent = segment.percentage.max(0.0);
            let y = geometry.y_for(cursor + extent);
            let height = geometry.y_for(cursor) - y;
            cursor += extent;
            SegmentRect {
                bucket: segment.bucket,
                x,
                y,
                width,
                height,
                label: label_visible(height, segment.percentage, label_min_height)
                    .then(|| segment_label(segment.bucket, segment.percentage)),
            }
        })
        .collect();

    BarLayout {
        category: stack.category,
        x,
        width,
        segments,
    }
}

/// Places the two stacks side by side with no gap between categories,
/// stacking each from the bottom of the plot area.
pub fn layout_bars(
    chart: &YearChart,
    geometry: &ChartGeometry,
    label_min_height: f64,
) -> Vec<BarLayout> {
    let stacks = chart.stacks();
    let bar_width = geometry.plot_width() / stacks.len() as f64;
    stacks
        .iter()
        .enumerate()
        .map(|(idx, stack)| {
            let x = geometry.margin_left + bar_width * idx as f64;
            layout_stack(stack, x, bar_width, geometry, label_min_height)
        })
        .collect()
}

pub fn grid_percentages() -> [f64; 5] {
    [0.0, 25.0, 50.0, 75.0, 100.0]
}

pub fn format_percentage(percentage: f64) -> String {
    format_f64(percentage)
}

/// Groups the integer part with commas and keeps at most three decimals.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let rounded = (value * 1000.0).round() / 1000.0;
    let text = format_f64(rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::new();
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    if rounded < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}
