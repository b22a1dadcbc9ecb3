use std::collections::HashMap;

use tracing::debug;

use crate::domain::entities::balance_sheet::{
    Bucket, DetailItem, Segment, StackCategory, StackDatum, YearChart,
};
use crate::domain::entities::table::{is_subject_header, Table};

pub const TOTAL_ASSETS: &str = "資産合計";
pub const TOTAL_LIABILITIES: &str = "負債合計";
pub const TOTAL_LIABILITIES_AND_EQUITY: &str = "負債純資産合計";
pub const EQUITY_HEADERS: [&str; 3] = ["純資産", "株主資本", "純資産合計"];

const YEAR_MARKER: &str = "年度";
const YEAR_LABEL_SUFFIXES: [&str; 2] = ["年度末残高(百万円)", "残高(百万円)"];
pub const MAX_YEAR_COLUMNS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Unknown,
    Bucket(Bucket),
}

fn section_for(subject: &str) -> Option<Section> {
    if EQUITY_HEADERS.contains(&subject) {
        return Some(Section::Bucket(Bucket::NetEquity));
    }
    [
        Bucket::CurrentAssets,
        Bucket::FixedAssets,
        Bucket::CurrentLiabilities,
        Bucket::FixedLiabilities,
    ]
    .into_iter()
    .find(|bucket| bucket.label() == subject)
    .map(Section::Bucket)
}

fn is_total_row(subject: &str) -> bool {
    [TOTAL_ASSETS, TOTAL_LIABILITIES, TOTAL_LIABILITIES_AND_EQUITY].contains(&subject)
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn percent_of(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        round1(value / total * 100.0)
    } else {
        0.0
    }
}

/// Rounds each share to one decimal while keeping the sum at exactly 100.0:
/// tenths are floored and the leftover tenths go to the largest remainders.
pub fn stack_percentages(amounts: &[f64], total: f64) -> Vec<f64> {
    if amounts.is_empty() || total == 0.0 {
        return vec![0.0; amounts.len()];
    }
    let raw: Vec<f64> = amounts.iter().map(|a| a / total * 1000.0).collect();
    let mut tenths: Vec<i64> = raw.iter().map(|r| r.floor() as i64).collect();
    let target = (raw.iter().sum::<f64>()).round() as i64;
    let mut leftover = target - tenths.iter().sum::<i64>();

    let mut order: Vec<usize> = (0..raw.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = raw[a] - raw[a].floor();
        let rb = raw[b] - raw[b].floor();
        rb.total_cmp(&ra).then(a.cmp(&b))
    });
    for idx in order.into_iter().cycle() {
        if leftover <= 0 {
            break;
        }
        tenths[idx] += 1;
        leftover -= 1;
    }

    tenths.into_iter().map(|t| t as f64 / 10.0).collect()
}

/// Removes the unit suffix from a year column header.
pub fn clean_year_label(header: &str) -> String {
    let mut label = header.to_string();
    for suffix in YEAR_LABEL_SUFFIXES {
        label = label.replace(suffix, "");
    }
    label.trim().to_string()
}

/// Headers treated as fiscal-year columns, in file order, capped at
/// [`MAX_YEAR_COLUMNS`].
pub fn detect_year_columns(table: &Table) -> Vec<String> {
    if table.is_empty() {
        return Vec::new();
    }
    table
        .headers
        .iter()
        .filter(|header| !is_subject_header(header))
        .filter(|header| {
            header.contains(YEAR_MARKER) || table.value(0, header).as_number().is_some()
        })
        .take(MAX_YEAR_COLUMNS)
        .cloned()
        .collect()
}

struct YearValues {
    by_subject: HashMap<String, f64>,
    /// Every non-total row in file order; the amount is `None` when the cell
    /// is not numeric.
    rows: Vec<(String, Option<f64>)>,
}

impl YearValues {
    fn collect(table: &Table, year_header: &str) -> Self {
        let mut by_subject = HashMap::new();
        let mut rows = Vec::new();
        for row_idx in 0..table.row_count() {
            let value = table.value(row_idx, year_header).as_number();
            let subject = table.subject(row_idx);
            if let Some(amount) = value {
                by_subject.insert(subject.clone(), amount);
            }
            if !is_total_row(&subject) {
                rows.push((subject, value));
            }
        }
        Self { by_subject, rows }
    }

    fn get(&self, subject: &str) -> f64 {
        self.by_subject.get(subject).copied().unwrap_or(0.0)
    }

    /// Explicit total row when present and non-zero, otherwise the sum of parts.
    fn total_or(&self, subject: &str, parts: f64) -> f64 {
        match self.by_subject.get(subject) {
            Some(value) if *value != 0.0 => *value,
            _ => parts,
        }
    }
}

fn classify_details(
    rows: &[(String, Option<f64>)],
    total_assets: f64,
    total_liabilities_and_equity: f64,
) -> HashMap<Bucket, Vec<DetailItem>> {
    let mut details: HashMap<Bucket, Vec<DetailItem>> = HashMap::new();
    let mut section = Section::Unknown;

    for (name, value) in rows {
        if let Some(next) = section_for(name) {
            section = next;
            continue;
        }
        let (Section::Bucket(bucket), Some(value)) = (section, *value) else {
            continue;
        };
        let stack_total = match bucket.stack() {
            StackCategory::Assets => total_assets,
            StackCategory::LiabilitiesAndEquity => total_liabilities_and_equity,
        };
        details.entry(bucket).or_default().push(DetailItem {
            name: name.clone(),
            value,
            percentage: percent_of(value, stack_total),
        });
    }

    details
}

fn build_stack(
    category: StackCategory,
    total: f64,
    amounts: &HashMap<Bucket, f64>,
    details: &mut HashMap<Bucket, Vec<DetailItem>>,
) -> StackDatum {
    let buckets = category.buckets();
    let bucket_amounts: Vec<f64> = buckets
        .iter()
        .map(|bucket| amounts.get(bucket).copied().unwrap_or(0.0))
        .collect();
    let percentages = stack_percentages(&bucket_amounts, total);

    let segments = buckets
        .iter()
        .zip(bucket_amounts)
        .zip(percentages)
        .map(|((bucket, amount), percentage)| Segment {
            bucket: *bucket,
            amount,
            percentage,
            details: details.remove(bucket).unwrap_or_default(),
        })
        .collect();

    StackDatum {
        category,
        total,
        segments,
    }
}

fn build_year_chart(table: &Table, year_header: &str) -> Option<YearChart> {
    let values = YearValues::collect(table, year_header);

    let current_assets = values.get(Bucket::CurrentAssets.label());
    let fixed_assets = values.get(Bucket::FixedAssets.label());
    let total_assets = values.total_or(TOTAL_ASSETS, current_assets + fixed_assets);

    let current_liabilities = values.get(Bucket::CurrentLiabilities.label());
    let fixed_liabilities = values.get(Bucket::FixedLiabilities.label());
    let total_liabilities =
        values.total_or(TOTAL_LIABILITIES, current_liabilities + fixed_liabilities);

    let equity = total_assets - total_liabilities;
    let total_liabilities_and_equity = total_liabilities + equity;

    if total_assets == 0.0 || total_liabilities_and_equity == 0.0 {
        debug!(year = year_header, "skipping year with zero totals");
        return None;
    }

    let amounts = HashMap::from([
        (Bucket::CurrentAssets, current_assets),
        (Bucket::FixedAssets, fixed_assets),
        (Bucket::CurrentLiabilities, current_liabilities),
        (Bucket::FixedLiabilities, fixed_liabilities),
        (Bucket::NetEquity, equity),
    ]);
    let mut details = classify_details(&values.rows, total_assets, total_liabilities_and_equity);

    Some(YearChart {
        year: clean_year_label(year_header),
        assets: build_stack(StackCategory::Assets, total_assets, &amounts, &mut details),
        liabilities_and_equity: build_stack(
            StackCategory::LiabilitiesAndEquity,
            total_liabilities_and_equity,
            &amounts,
            &mut details,
        ),
    })
}

/// Pivots a parsed balance sheet into per-year composition charts, most
/// recent year first. Years whose totals are zero are left out.
pub fn build_year_charts(table: &Table) -> Vec<YearChart> {
    let mut charts: Vec<YearChart> = detect_year_columns(table)
        .iter()
        .filter_map(|header| build_year_chart(table, header))
        .collect();
    charts.sort_by(|a, b| b.year.cmp(&a.year));
    charts
}

