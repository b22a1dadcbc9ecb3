use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

use crate::config::{normalize_base_path, AppConfig};
use crate::domain::entities::balance_sheet::{Bucket, StackCategory, YearChart};
use crate::domain::entities::table::{format_f64, CellValue, Table};
use crate::error::{IntakeError, IntakeResult};
use crate::infra::import::csv::parse_csv_bytes;
use crate::infra::import::xlsx::parse_xlsx_bytes;
use crate::ui::chart_layout::{format_amount, layout_bars, ChartGeometry};
use crate::ui::components::data_chart::{chart_title, detail_line};
use crate::ui::components::data_preview::remaining_rows_note;
use crate::ui::components::file_upload::{check_selection, first_drop};
use crate::ui::state::app_state::{is_current_load, LoadState};
use crate::ui::styles::{preview_header_cell_style, tooltip_style, upload_button_style};
use crate::usecase::services::chart_service::{
    build_year_charts, clean_year_label, detect_year_columns, stack_percentages,
};
use crate::usecase::services::import_service::{
    FileKind, ImportService, PickedFile, TableParser, XLSX_MIME,
};

const SAMPLE_CSV: &[u8] = include_bytes!("../public/sample.csv");

fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|cell| CellValue::infer(cell)).collect())
            .collect(),
    )
}

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

fn percentages(chart: &YearChart, category: StackCategory) -> Vec<(Bucket, f64)> {
    let stack = match category {
        StackCategory::Assets => &chart.assets,
        StackCategory::LiabilitiesAndEquity => &chart.liabilities_and_equity,
    };
    stack
        .segments
        .iter()
        .map(|segment| (segment.bucket, segment.percentage))
        .collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn worked_example() -> Table {
    table(
        &["科目", "2023"],
        &[
            &["流動資産", "100"],
            &["固定資産", "50"],
            &["資産合計", "150"],
            &["流動負債", "60"],
            &["固定負債", "40"],
            &["負債合計", "100"],
        ],
    )
}

struct CountingParser {
    calls: Cell<usize>,
}

impl TableParser for CountingParser {
    fn parse(&self, _kind: FileKind, _bytes: &[u8]) -> IntakeResult<Table> {
        self.calls.set(self.calls.get() + 1);
        Ok(Table::default())
    }
}

#[test]
fn worked_example_splits_both_stacks() {
    let charts = build_year_charts(&worked_example());

    assert_eq!(charts.len(), 1);
    let chart = &charts[0];
    assert_eq!(chart.year, "2023");
    assert_eq!(
        percentages(chart, StackCategory::Assets),
        vec![(Bucket::FixedAssets, 33.3), (Bucket::CurrentAssets, 66.7)]
    );
    assert_eq!(
        percentages(chart, StackCategory::LiabilitiesAndEquity),
        vec![
            (Bucket::NetEquity, 33.3),
            (Bucket::FixedLiabilities, 26.7),
            (Bucket::CurrentLiabilities, 40.0),
        ]
    );
    assert_close(chart.liabilities_and_equity.total, 150.0);
    let equity = chart
        .liabilities_and_equity
        .segment(Bucket::NetEquity)
        .expect("equity segment should exist");
    assert_close(equity.amount, 50.0);
}

#[test]
fn both_stacks_sum_to_one_hundred() {
    let sample = parse_csv_bytes(SAMPLE_CSV).expect("bundled sample should parse");
    let thirds = table(
        &["科目", "2021年度"],
        &[
            &["流動資産", "1"],
            &["固定資産", "2"],
            &["流動負債", "1"],
            &["固定負債", "1"],
        ],
    );

    for source in [worked_example(), sample, thirds] {
        let charts = build_year_charts(&source);
        assert!(!charts.is_empty(), "expected at least one year");
        for chart in &charts {
            for stack in chart.stacks() {
                assert_close(stack.percentage_sum(), 100.0);
            }
        }
    }
}

#[test]
fn stack_percentages_hand_leftover_tenths_to_largest_remainders() {
    assert_eq!(stack_percentages(&[1.0, 1.0, 1.0], 3.0), vec![33.4, 33.3, 33.3]);
    assert_eq!(stack_percentages(&[50.0, 100.0], 150.0), vec![33.3, 66.7]);
    assert_eq!(stack_percentages(&[0.0, 0.0], 0.0), vec![0.0, 0.0]);
}

#[test]
fn zero_totals_skip_the_year() {
    let source = table(
        &["科目", "2023年度", "2022年度"],
        &[
            &["流動資産", "0", "80"],
            &["固定資産", "0", "20"],
            &["流動負債", "0", "30"],
            &["固定負債", "0", "10"],
        ],
    );

    let charts = build_year_charts(&source);

    let years: Vec<&str> = charts.iter().map(|c| c.year.as_str()).collect();
    assert_eq!(years, vec!["2022年度"]);
}

#[test]
fn empty_or_yearless_tables_produce_no_charts() {
    assert!(build_year_charts(&Table::default()).is_empty());

    let no_years = table(&["科目", "備考"], &[&["流動資産", "メモ"]]);
    assert!(detect_year_columns(&no_years).is_empty());
    assert!(build_year_charts(&no_years).is_empty());
}

#[test]
fn year_columns_are_detected_by_marker_or_numeric_value_and_capped() {
    let source = table(
        &["科目", "備考", "前期", "2022年度", "2021年度"],
        &[&["流動資産", "注記", "10", "", "5"]],
    );

    assert_eq!(
        detect_year_columns(&source),
        vec!["前期".to_string(), "2022年度".to_string()]
    );
}

#[test]
fn latin_subject_header_is_recognised() {
    let source = table(
        &["subject", "2023"],
        &[&["流動資産", "60"], &["固定資産", "40"], &["流動負債", "50"]],
    );

    let charts = build_year_charts(&source);

    assert_eq!(charts.len(), 1);
    assert_eq!(detect_year_columns(&source), vec!["2023".to_string()]);
}

#[test]
fn year_labels_are_cleaned_and_sorted_descending() {
    assert_eq!(clean_year_label("2023年度末残高(百万円)"), "2023");
    assert_eq!(clean_year_label(" 前期残高(百万円) "), "前期");
    assert_eq!(clean_year_label("2022年度"), "2022年度");

    let charts =
        build_year_charts(&parse_csv_bytes(SAMPLE_CSV).expect("sample should parse"));
    let years: Vec<&str> = charts.iter().map(|c| c.year.as_str()).collect();
    assert_eq!(years, vec!["2024", "2023"]);
}

#[test]
fn totals_fall_back_to_sum_of_sections() {
    let with_total = table(
        &["科目", "2023"],
        &[
            &["流動資産", "60"],
            &["固定資産", "20"],
            &["資産合計", "100"],
            &["流動負債", "30"],
        ],
    );
    let without_total = table(
        &["科目", "2023"],
        &[&["流動資産", "60"], &["固定資産", "20"], &["流動負債", "30"]],
    );

    let explicit = &build_year_charts(&with_total)[0];
    let derived = &build_year_charts(&without_total)[0];

    assert_close(explicit.assets.total, 100.0);
    assert_close(derived.assets.total, 80.0);
    assert_eq!(
        percentages(derived, StackCategory::Assets),
        vec![(Bucket::FixedAssets, 25.0), (Bucket::CurrentAssets, 75.0)]
    );
}

#[test]
fn detail_rows_follow_the_active_section() {
    let sample = parse_csv_bytes(SAMPLE_CSV).expect("sample should parse");
    let charts = build_year_charts(&sample);
    let latest = &charts[0];

    let current_assets = latest
        .assets
        .segment(Bucket::CurrentAssets)
        .expect("current assets");
    let names: Vec<&str> = current_assets
        .details
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["現金及び預金", "受取手形及び売掛金", "棚卸資産", "その他流動資産"]
    );
    assert_eq!(current_assets.details[0].value, 720.0);
    assert_eq!(current_assets.details[0].percentage, 20.6);

    let fixed_liabilities = latest
        .liabilities_and_equity
        .segment(Bucket::FixedLiabilities)
        .expect("fixed liabilities");
    assert_eq!(fixed_liabilities.details.len(), 2);
    assert_eq!(fixed_liabilities.details[0].percentage, 14.9);

    let equity = latest
        .liabilities_and_equity
        .segment(Bucket::NetEquity)
        .expect("equity");
    let equity_names: Vec<&str> = equity.details.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(equity_names, vec!["資本金", "利益剰余金"]);
    assert_eq!(equity.details[1].percentage, 34.0);
    assert_eq!(equity.percentage, 48.3);

    let all_names: Vec<&str> = latest
        .stacks()
        .iter()
        .flat_map(|stack| stack.segments.iter())
        .flat_map(|segment| segment.details.iter())
        .map(|d| d.name.as_str())
        .collect();
    for excluded in ["資産合計", "負債合計", "負債純資産合計", "流動資産", "純資産"] {
        assert!(!all_names.contains(&excluded), "{excluded} should not be a detail");
    }
}

#[test]
fn rows_before_any_section_header_are_dropped() {
    let source = table(
        &["科目", "2023"],
        &[
            &["単位調整", "5"],
            &["流動資産", "100"],
            &["現金", "100"],
            &["流動負債", "40"],
        ],
    );

    let chart = &build_year_charts(&source)[0];

    let details: Vec<&str> = chart
        .stacks()
        .iter()
        .flat_map(|stack| stack.segments.iter())
        .flat_map(|segment| segment.details.iter())
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(details, vec!["現金"]);
}

#[test]
fn reparsing_the_same_file_is_idempotent() {
    let service = ImportService::new();
    let file = PickedFile {
        name: "sample.csv".to_string(),
        mime: None,
        bytes: SAMPLE_CSV.to_vec(),
    };

    let first = build_year_charts(&service.import(&file).expect("first import"));
    let second = build_year_charts(&service.import(&file).expect("second import"));

    assert_eq!(first, second);
}

#[test]
fn unsupported_file_never_reaches_the_parser() {
    let parser = CountingParser {
        calls: Cell::new(0),
    };
    let service = ImportService::with_parser(&parser);
    let file = PickedFile {
        name: "report.pdf".to_string(),
        mime: Some("application/pdf".to_string()),
        bytes: b"%PDF-1.7".to_vec(),
    };

    let result = service.import(&file);

    assert_eq!(result, Err(IntakeError::UnsupportedFileType));
    assert_eq!(
        result.unwrap_err().to_string(),
        "CSVまたはExcelファイルを選択してください。"
    );
    assert_eq!(parser.calls.get(), 0);
    assert!(check_selection("report.pdf").is_err());
}

#[test]
fn supported_files_are_dispatched_by_extension_then_mime() {
    assert_eq!(FileKind::sniff("BS.CSV", None), Ok(FileKind::Csv));
    assert_eq!(FileKind::sniff("bs.xlsx", None), Ok(FileKind::Xlsx));
    assert_eq!(FileKind::sniff("download", Some("text/csv")), Ok(FileKind::Csv));
    assert_eq!(FileKind::sniff("download", Some(XLSX_MIME)), Ok(FileKind::Xlsx));
    assert_eq!(
        FileKind::sniff("bs.xls", None),
        Err(IntakeError::UnsupportedFileType)
    );
    assert_eq!(check_selection("bs.xlsx"), Ok(FileKind::Xlsx));

    let parser = CountingParser {
        calls: Cell::new(0),
    };
    let service = ImportService::with_parser(&parser);
    let file = PickedFile {
        name: "bs.csv".to_string(),
        mime: None,
        bytes: Vec::new(),
    };
    service.import(&file).expect("csv should be accepted");
    service.import(&file).expect("csv should be accepted");
    assert_eq!(parser.calls.get(), 2);
}

#[test]
fn xlsx_first_sheet_becomes_the_table() {
    let bytes = fs::read(fixture_path("balance_sheet.xlsx")).expect("should read xlsx fixture");

    let parsed = parse_xlsx_bytes(&bytes).expect("xlsx should parse");

    assert_eq!(
        parsed.headers,
        vec![
            "科目".to_string(),
            "2022年度".to_string(),
            "2023年度".to_string()
        ]
    );
    assert_eq!(parsed.row_count(), 13);
    assert_eq!(parsed.value(0, "2022年度"), &CellValue::Number(100.0));
    assert_eq!(parsed.subject(4), "建物");

    let charts = build_year_charts(&parsed);
    let years: Vec<&str> = charts.iter().map(|c| c.year.as_str()).collect();
    assert_eq!(years, vec!["2023年度", "2022年度"]);
    assert_eq!(
        percentages(&charts[0], StackCategory::LiabilitiesAndEquity),
        vec![
            (Bucket::NetEquity, 40.0),
            (Bucket::FixedLiabilities, 25.0),
            (Bucket::CurrentLiabilities, 35.0),
        ]
    );
    let cash = &charts[0]
        .assets
        .segment(Bucket::CurrentAssets)
        .expect("current assets")
        .details[0];
    assert_eq!(cash.name, "現金及び預金");
    assert_eq!(cash.percentage, 35.0);
}

#[test]
fn xlsx_import_through_service_uses_extension() {
    let bytes = fs::read(fixture_path("balance_sheet.xlsx")).expect("should read xlsx fixture");
    let file = PickedFile {
        name: "balance_sheet.xlsx".to_string(),
        mime: None,
        bytes,
    };

    let parsed = ImportService::new().import(&file).expect("xlsx import");

    assert_eq!(parsed.row_count(), 13);
}

#[test]
fn corrupt_workbook_reports_excel_parse_error() {
    let err = parse_xlsx_bytes(b"definitely not a zip").expect_err("should fail");

    assert!(matches!(err, IntakeError::XlsxParse(_)));
    assert!(err.to_string().starts_with("Excelパースエラー: "));
}

#[test]
fn intake_error_messages_are_prefixed() {
    assert_eq!(
        IntakeError::CsvParse("bad quote".to_string()).to_string(),
        "CSVパースエラー: bad quote"
    );
    assert_eq!(
        IntakeError::SampleFetch {
            status: 404,
            body: "Not Found".to_string()
        }
        .to_string(),
        "サンプルファイルの取得に失敗しました (HTTP 404): Not Found"
    );
}

#[test]
fn small_and_zero_segments_hide_their_labels() {
    let source = table(
        &["科目", "2023"],
        &[
            &["流動資産", "990"],
            &["固定資産", "10"],
            &["流動負債", "500"],
            &["固定負債", "500"],
        ],
    );
    let chart = &build_year_charts(&source)[0];
    let geometry = ChartGeometry::new(420.0, 450.0);

    let bars = layout_bars(chart, &geometry, 15.0);

    let assets = &bars[0];
    assert_eq!(assets.category, StackCategory::Assets);
    assert_eq!(assets.segments[0].bucket, Bucket::FixedAssets);
    assert!(assets.segments[0].height < 15.0);
    assert_eq!(assets.segments[0].label, None);
    assert_eq!(
        assets.segments[1].label.as_deref(),
        Some("流動資産 (99%)")
    );
    assert_close(assets.segments[1].y, geometry.plot_top());

    let liabilities = &bars[1];
    assert_eq!(liabilities.segments[0].bucket, Bucket::NetEquity);
    assert_close(liabilities.segments[0].height, 0.0);
    assert_eq!(liabilities.segments[0].label, None);
    assert_close(liabilities.x, assets.x + assets.width);
}

#[test]
fn negative_equity_is_not_drawn() {
    let source = table(
        &["科目", "2023"],
        &[&["流動資産", "100"], &["流動負債", "150"]],
    );
    let chart = &build_year_charts(&source)[0];

    let bars = layout_bars(chart, &ChartGeometry::new(420.0, 450.0), 15.0);

    let equity = &bars[1].segments[0];
    assert_eq!(chart.liabilities_and_equity.segments[0].percentage, -50.0);
    assert_close(equity.height, 0.0);
    assert_eq!(equity.label, None);
    assert_close(chart.liabilities_and_equity.percentage_sum(), 100.0);
}

#[test]
fn amounts_are_grouped_by_thousands() {
    assert_eq!(format_amount(1234567.0), "1,234,567");
    assert_eq!(format_amount(-1500.0), "-1,500");
    assert_eq!(format_amount(999.0), "999");
    assert_eq!(format_amount(1234.5678), "1,234.568");
}

#[test]
fn tooltip_and_title_text() {
    assert_eq!(chart_title(None), "貸借対照表 構成比 (ファイル: N/A)");
    assert_eq!(
        chart_title(Some("bs.csv")),
        "貸借対照表 構成比 (ファイル: bs.csv)"
    );
    assert_eq!(
        detail_line("現金及び預金", 1200.0, 40.0),
        "現金及び預金: 1,200 (百万円) - 40%"
    );
}

#[test]
fn preview_note_only_when_rows_are_hidden() {
    assert_eq!(remaining_rows_note(10, 10), None);
    assert_eq!(
        remaining_rows_note(21, 10).as_deref(),
        Some("...他 11 行 (最初の10行のみ表示)")
    );
}

#[test]
fn stale_loads_are_discarded() {
    assert!(is_current_load(3, 3));
    assert!(!is_current_load(4, 3));

    let mut state = LoadState::default();
    let sample_ticket = state.begin("sample.csv".to_string());
    let upload_ticket = state.begin("upload.csv".to_string());
    assert!(state.loading);

    let before = state.clone();
    let applied = state.finish(
        sample_ticket,
        Ok(table(&["科目", "2023"], &[&["流動資産", "100"]])),
    );
    assert!(!applied);
    assert_eq!(state, before);
    assert!(state.table.is_empty());
    assert!(state.loading);
    assert_eq!(state.error, None);

    let applied = state.finish(upload_ticket, Ok(table(&["科目", "2024"], &[&["流動資産", "5"]])));
    assert!(applied);
    assert!(!state.loading);
    assert_eq!(state.file_name.as_deref(), Some("upload.csv"));
    assert_eq!(state.table.headers, vec!["科目", "2024"]);
    assert!(state.loaded_at.is_some());
    assert!(state.show_results());
}

#[test]
fn superseded_failure_does_not_surface_an_error() {
    let mut state = LoadState::default();
    let first = state.begin("broken.xlsx".to_string());
    let second = state.begin("sample.csv".to_string());

    assert!(!state.finish(first, Err(IntakeError::XlsxParse("zip".to_string()))));
    assert_eq!(state.error, None);

    assert!(state.finish(second, Err(IntakeError::UnsupportedFileType)));
    assert_eq!(
        state.error.as_deref(),
        Some("CSVまたはExcelファイルを選択してください。")
    );
    assert!(!state.loading);
    assert!(!state.show_results());
}

#[test]
fn new_load_clears_previous_result() {
    let mut state = LoadState::default();
    let ticket = state.begin("a.csv".to_string());
    state.finish(ticket, Ok(table(&["科目", "2023"], &[&["流動資産", "1"]])));
    assert!(!state.table.is_empty());

    state.begin("b.csv".to_string());
    assert!(state.table.is_empty());
    assert_eq!(state.loaded_at, None);
    assert!(!state.show_results());
}

#[test]
fn drops_take_the_first_file_unless_busy() {
    assert_eq!(first_drop(false, vec!["a.csv", "b.xlsx"]), Some("a.csv"));
    assert_eq!(first_drop(true, vec!["a.csv"]), None);
    assert_eq!(first_drop::<&str>(false, Vec::new()), None);

    assert_eq!(
        check_selection("dropped.pdf"),
        Err("CSVまたはExcelファイルを選択してください。".to_string())
    );
    assert_eq!(check_selection("dropped.XLSX"), Ok(FileKind::Xlsx));
}

#[test]
fn header_without_amount_still_switches_section() {
    let source = parse_csv_bytes(
        "科目,2023年度\n流動資産,100\n現金,100\n固定資産,\n建物,50\n流動負債,60\n固定負債,40\n"
            .as_bytes(),
    )
    .expect("csv should parse");
    let chart = &build_year_charts(&source)[0];

    let names = |bucket: Bucket| -> Vec<String> {
        chart
            .assets
            .segment(bucket)
            .map(|segment| segment.details.iter().map(|d| d.name.clone()).collect())
            .unwrap_or_default()
    };
    assert_eq!(names(Bucket::CurrentAssets), vec!["現金"]);
    assert_eq!(names(Bucket::FixedAssets), vec!["建物"]);
}

#[test]
fn rows_without_amount_are_not_details() {
    let source = table(
        &["科目", "2023"],
        &[
            &["流動資産", "100"],
            &["現金", "60"],
            &["注記", ""],
            &["売掛金", "40"],
        ],
    );
    let chart = &build_year_charts(&source)[0];
    let current = chart
        .assets
        .segment(Bucket::CurrentAssets)
        .expect("current assets");
    let names: Vec<&str> = current.details.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["現金", "売掛金"]);
}

#[test]
fn huge_whole_numbers_keep_every_digit() {
    assert_eq!(format_f64(1e20), "100000000000000000000");
    assert_eq!(format_f64(-1e19), "-10000000000000000000");
    assert_eq!(format_f64(-0.0), "0");
    assert_eq!(format_f64(42.0), "42");
    assert_eq!(format_amount(1e19), "10,000,000,000,000,000,000");
}

#[test]
fn base_path_is_normalised() {
    assert_eq!(normalize_base_path("dashboard/"), "/dashboard");
    assert_eq!(normalize_base_path("/dashboard"), "/dashboard");
    assert_eq!(normalize_base_path("/"), "");

    let config = AppConfig {
        base_path: "/dashboard".to_string(),
        ..AppConfig::default()
    };
    assert_eq!(config.sample_path(), "/dashboard/sample.csv");
    assert_eq!(config.preview_rows, 10);
    assert_eq!(config.label_min_height, 15);
}

#[test]
fn header_and_tooltip_styles_include_positioning() {
    let header = preview_header_cell_style();
    assert!(header.contains("position: sticky"));
    assert!(header.contains("top: 0"));

    let tooltip = tooltip_style(25.0, 80.0);
    assert!(tooltip.contains("position: absolute"));
    assert!(tooltip.contains("left: 25%"));
    assert!(tooltip.contains("pointer-events: none"));

    assert!(upload_button_style(true).contains("not-allowed"));
    assert!(upload_button_style(false).contains("cursor: pointer"));
}
