pub const SUBJECT_HEADER: &str = "科目";
pub const SUBJECT_HEADER_LATIN: &str = "subject";

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// Infers a typed value from raw text: blank is `Empty`, anything that
    /// parses as a number (thousands separators allowed) is `Number`.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        match parse_number(trimmed) {
            Some(value) => CellValue::Number(value),
            None => CellValue::Text(raw.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Text(text) => parse_number(text.trim()),
            CellValue::Empty => None,
        }
    }

    pub fn display(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Number(value) => format_f64(*value),
            CellValue::Empty => String::new(),
        }
    }
}

fn parse_number(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    let cleaned = text.replace(',', "");
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn format_f64(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if (value.fract()).abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        let mut text = format!("{value:.6}");
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
        text
    }
}

pub fn is_subject_header(header: &str) -> bool {
    let trimmed = header.trim();
    trimmed == SUBJECT_HEADER || trimmed.eq_ignore_ascii_case(SUBJECT_HEADER_LATIN)
}

/// Parsed upload: one row per accounting line item, keyed by header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    pub fn subject_header(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| is_subject_header(h))
            .map(|h| h.as_str())
    }

    pub fn value(&self, row_idx: usize, header: &str) -> &CellValue {
        self.column_index(header)
            .and_then(|col_idx| self.rows.get(row_idx)?.get(col_idx))
            .unwrap_or(&CellValue::Empty)
    }

    pub fn subject(&self, row_idx: usize) -> String {
        match self.subject_header() {
            Some(header) => self.value(row_idx, header).display().trim().to_string(),
            None => String::new(),
        }
    }
}
