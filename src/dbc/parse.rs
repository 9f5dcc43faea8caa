use std::fs;

use encoding_rs::WINDOWS_1252;
use log::warn;

use crate::dbc::core;
use crate::types::database::Database;
use crate::types::errors::DbcParseError;

/// Counters accumulated over one parse run.
///
/// `skipped` counts `SG_` lines that could not be attached: malformed
/// sub-fields, or a signal declared before any message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Messages successfully declared.
    pub messages: usize,
    /// Signals successfully attached to a message.
    pub signals: usize,
    /// `SG_` lines skipped with a logged reason.
    pub skipped: usize,
}

/// Parses a DBC file and returns the resulting [`Database`] with a
/// [`ParseReport`] of what was read.
///
/// The file is decoded as Windows-1252, the de facto encoding of `.dbc`
/// files exported by automotive tooling. Only `BO_` and `SG_` lines
/// contribute to the database; node lists (`BU_`) and every other section
/// kind are consumed and ignored.
///
/// # Errors
/// Returns `Err(DbcParseError)` when the path does not end in `.dbc` or
/// the file cannot be read. Malformed lines inside the file never fail the
/// whole parse; they are skipped and counted in the report.
pub fn from_file(path: &str) -> Result<(Database, ParseReport), DbcParseError> {
    if !path.ends_with(".dbc") {
        return Err(DbcParseError::InvalidExtension {
            path: path.to_string(),
        });
    }

    let bytes: Vec<u8> = fs::read(path).map_err(|source| DbcParseError::OpenFile {
        path: path.to_string(),
        source,
    })?;
    let (text, _, _) = WINDOWS_1252.decode(&bytes);

    Ok(from_str(&text))
}

/// Parses DBC text already in memory.
///
/// Line-oriented with one piece of carried state: the most recently
/// declared message id. `SG_` lines attach to that message; an `SG_` line
/// before any `BO_` is an error for that line (logged and counted), never
/// a write into some default entry.
pub fn from_str(text: &str) -> (Database, ParseReport) {
    let mut db: Database = Database::default();
    let mut report: ParseReport = ParseReport::default();

    // Id of the message most recently declared by a BO_ line.
    let mut current: Option<u32> = None;

    for line in text.lines() {
        let line_trimmed: &str = line.trim_start();

        // skip comments and empty lines
        if line_trimmed.is_empty() || line_trimmed.starts_with("//") {
            continue;
        }

        let token: &str = line_trimmed.split_whitespace().next().unwrap_or("");

        match token {
            "BO_" => match core::bo_::decode(line_trimmed) {
                Some(msg) => {
                    current = Some(msg.id);
                    db.add_message(msg);
                    report.messages += 1;
                }
                None => {
                    warn!("skipping malformed BO_ line: {line_trimmed}");
                }
            },
            "SG_" => {
                let Some(id) = current else {
                    warn!("SG_ line before any BO_ declaration: {line_trimmed}");
                    report.skipped += 1;
                    continue;
                };
                match core::sg_::decode(line_trimmed) {
                    Ok(sig) => {
                        // The message was inserted when `current` was set.
                        if let Some(msg) = db.get_message_by_id_mut(id) {
                            msg.signals.push(sig);
                            report.signals += 1;
                        }
                    }
                    Err(err) => {
                        warn!("skipping malformed SG_ line ({err:?}): {line_trimmed}");
                        report.skipped += 1;
                    }
                }
            }
            // Node declarations carry no decoding information here.
            "BU_:" | "BU_" => {}
            _ => {}
        }
    }

    (db, report)
}
