use tracing::{debug, warn};

use crate::domain::entities::table::Table;
use crate::error::{IntakeError, IntakeResult};
use crate::infra::import::csv::parse_csv_bytes;
use crate::infra::import::xlsx::parse_xlsx_bytes;

pub const CSV_MIME: &str = "text/csv";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["csv", "xlsx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Xlsx,
}

impl FileKind {
    /// Decides the format from the file name, falling back to the MIME type.
    /// File contents are never inspected.
    pub fn sniff(file_name: &str, mime: Option<&str>) -> IntakeResult<Self> {
        let lower = file_name.trim().to_ascii_lowercase();
        if lower.ends_with(".csv") {
            return Ok(FileKind::Csv);
        }
        if lower.ends_with(".xlsx") {
            return Ok(FileKind::Xlsx);
        }
        match mime.map(str::trim) {
            Some(CSV_MIME) => Ok(FileKind::Csv),
            Some(XLSX_MIME) => Ok(FileKind::Xlsx),
            _ => Err(IntakeError::UnsupportedFileType),
        }
    }
}

/// A file picked by the user, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

pub trait TableParser {
    fn parse(&self, kind: FileKind, bytes: &[u8]) -> IntakeResult<Table>;
}

impl<T: TableParser + ?Sized> TableParser for &T {
    fn parse(&self, kind: FileKind, bytes: &[u8]) -> IntakeResult<Table> {
        (**self).parse(kind, bytes)
    }
}

pub struct DefaultParser;

impl TableParser for DefaultParser {
    fn parse(&self, kind: FileKind, bytes: &[u8]) -> IntakeResult<Table> {
        match kind {
            FileKind::Csv => parse_csv_bytes(bytes),
            FileKind::Xlsx => parse_xlsx_bytes(bytes),
        }
    }
}

pub struct ImportService<P: TableParser = DefaultParser> {
    parser: P,
}

impl ImportService<DefaultParser> {
    pub fn new() -> Self {
        Self {
            parser: DefaultParser,
        }
    }
}

impl Default for ImportService<DefaultParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: TableParser> ImportService<P> {
    #[cfg(test)]
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    pub fn import(&self, file: &PickedFile) -> IntakeResult<Table> {
        let kind = match FileKind::sniff(&file.name, file.mime.as_deref()) {
            Ok(kind) => kind,
            Err(err) => {
                warn!(file = %file.name, "rejected unsupported file type");
                return Err(err);
            }
        };
        debug!(file = %file.name, ?kind, bytes = file.bytes.len(), "parsing upload");
        let table = self.parser.parse(kind, &file.bytes).inspect_err(|err| {
            warn!(file = %file.name, error = %err, "failed to parse upload");
        })?;
        debug!(file = %file.name, rows = table.row_count(), "parsed upload");
        Ok(table)
    }
}
