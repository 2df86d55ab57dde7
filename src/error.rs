// File: src/error.rs
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum TranslitError {
    #[error("{table} table is malformed: {keys} keys but {values} values")]
    TableMismatch {
        table: &'static str,
        keys: usize,
        values: usize,
    },

    #[error("unrecognized symbol {symbol:?} in token {token:?}")]
    UnknownSymbol { symbol: char, token: String },

    #[error("nukta with nothing before it in token {token:?}")]
    DanglingNukta { token: String },

    #[error("{base:?} has no nukta form (token {token:?})")]
    MissingNukta { base: char, token: String },

    #[error("invalid Devanagari: {text:?}")]
    InvalidDevanagari { text: String },

    #[error("line {line_no}: malformed record {line:?}")]
    MalformedLine { line_no: usize, line: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TranslitError>;
