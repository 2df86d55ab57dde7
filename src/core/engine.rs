// src/core/engine.rs
use crate::config::DriverConfig;
use crate::core::converter::Transliterator;
use crate::core::types::{OutputLayout, Record, UnconvertiblePolicy};
use crate::error::{Result, TranslitError};
use log::{debug, info, warn};
use std::io::{BufRead, Write};

/// Counters reported at the end of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub lines: usize,
    pub converted: usize,
    pub unconvertible: usize,
    /// Lines dropped because of an unknown symbol (lenient runs only).
    pub rejected: usize,
}

/// Splits `<id><whitespace><token>` into its two fields.
pub fn parse_line(line: &str, line_no: usize) -> Result<(i64, &str)> {
    let malformed = || TranslitError::MalformedLine { line_no, line: line.to_string() };
    let (head, tail) = line.trim().split_once(char::is_whitespace).ok_or_else(malformed)?;
    let token = tail.trim_start();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(malformed());
    }
    let id = head.parse::<i64>().map_err(|_| malformed())?;
    Ok((id, token))
}

/// The line-oriented driver: one record per input line, written in input order.
pub struct BatchEngine {
    config: DriverConfig,
    transliterator: Transliterator,
}

impl BatchEngine {
    pub fn new(config: DriverConfig) -> Self {
        let transliterator = Transliterator::new(config.scheme);
        Self { config, transliterator }
    }

    /// Converts one line. Returns `None` for blank lines and for lines the
    /// config says to drop.
    pub fn process_line(&self, line: &str, line_no: usize) -> Result<Option<Record>> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        let (id, token) = parse_line(line, line_no)?;

        if !self.config.is_convertible(token) {
            debug!("line {line_no}: {token:?} is not convertible");
            return Ok(match self.config.on_unconvertible {
                UnconvertiblePolicy::Skip => None,
                UnconvertiblePolicy::PassthroughWithMarker => Some(Record {
                    id,
                    token: token.to_string(),
                    converted: None,
                }),
            });
        }

        let converted = self.transliterator.transliterate(token)?;
        Ok(Some(Record { id, token: token.to_string(), converted: Some(converted) }))
    }

    pub fn format_record(&self, record: &Record) -> Result<String> {
        Ok(match self.config.layout {
            OutputLayout::Pair => format!("{}\t{}", record.id, record.converted_or_marker()),
            OutputLayout::Triple => {
                format!("{} {} {}", record.id, record.token, record.converted_or_marker())
            }
            OutputLayout::Json => serde_json::to_string(record)?,
        })
    }

    /// Processes every line of `reader`, writing one row per kept record.
    pub fn run<R: BufRead>(&self, reader: R, writer: &mut dyn Write) -> Result<RunStats> {
        let mut stats = RunStats::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;
            stats.lines += 1;

            let record = match self.process_line(&line, line_no) {
                Ok(record) => record,
                Err(TranslitError::UnknownSymbol { symbol, token }) if self.config.lenient => {
                    warn!("line {line_no}: skipping {token:?}, unknown symbol {symbol:?}");
                    stats.rejected += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let Some(record) = record else {
                if !line.trim().is_empty() {
                    stats.unconvertible += 1;
                }
                continue;
            };
            if record.converted.is_some() {
                stats.converted += 1;
            } else {
                stats.unconvertible += 1;
            }
            writeln!(writer, "{}", self.format_record(&record)?)?;
        }

        info!(
            "{} scheme: {} lines, {} converted, {} unconvertible, {} rejected",
            self.config.scheme, stats.lines, stats.converted, stats.unconvertible, stats.rejected
        );
        Ok(stats)
    }
}
