use thiserror::Error;

#[cfg_attr(not(feature = "web"), allow(dead_code))]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("CSVまたはExcelファイルを選択してください。")]
    UnsupportedFileType,
    #[error("CSVパースエラー: {0}")]
    CsvParse(String),
    #[error("Excelパースエラー: {0}")]
    XlsxParse(String),
    #[error("ファイル読み込みエラー: {0}")]
    FileRead(String),
    #[error("サンプルファイルの取得に失敗しました (HTTP {status}): {body}")]
    SampleFetch { status: u16, body: String },
    #[error("サンプルファイルの取得に失敗しました: {0}")]
    SampleRequest(String),
}

impl From<csv::Error> for IntakeError {
    fn from(err: csv::Error) -> Self {
        IntakeError::CsvParse(err.to_string())
    }
}

impl From<calamine::XlsxError> for IntakeError {
    fn from(err: calamine::XlsxError) -> Self {
        IntakeError::XlsxParse(err.to_string())
    }
}

pub type IntakeResult<T> = std::result::Result<T, IntakeError>;
