// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Output sink: renders records as pretty JSON or hashcat lines and names
//! the file they are written to.

use log::debug;
use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::projector::{OutputMode, Record};

#[derive(Debug)]
pub enum OutputError {
    Io(io::Error),
    Json(serde_json::Error),
    /// A record was projected for a different mode than the one rendered
    ModeMismatch(OutputMode),
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<serde_json::Error> for OutputError {
    fn from(e: serde_json::Error) -> Self {
        OutputError::Json(e)
    }
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "error writing output: {}", e),
            OutputError::Json(e) => write!(f, "error encoding JSON: {}", e),
            OutputError::ModeMismatch(mode) => {
                write!(f, "record does not match {:?} output mode", mode)
            }
        }
    }
}

impl Error for OutputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Json(e) => Some(e),
            OutputError::ModeMismatch(_) => None,
        }
    }
}

/// Structured records become a pretty printed JSON array, flat records one
/// line each with no trailing newline. Every record must have been projected
/// for `mode`.
pub fn render(records: &[Record], mode: OutputMode) -> Result<String, OutputError> {
    match mode {
        OutputMode::Structured => {
            if records.iter().any(|r| !matches!(r, Record::Structured(_))) {
                return Err(OutputError::ModeMismatch(mode));
            }
            Ok(serde_json::to_string_pretty(records)?)
        }
        OutputMode::Flat => {
            let lines = records
                .iter()
                .map(|record| match record {
                    Record::Flat(line) => Ok(line.as_str()),
                    Record::Structured(_) => Err(OutputError::ModeMismatch(mode)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(lines.join("\n"))
        }
    }
}

pub fn extension(mode: OutputMode) -> &'static str {
    match mode {
        OutputMode::Structured => "json",
        OutputMode::Flat => "txt",
    }
}

/// `dumps/site.sql` + `users` -> `dumps/site_users.json`
pub fn output_path(input: &Path, table: &str, mode: OutputMode) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = file_name.strip_suffix(".sql").unwrap_or(&file_name);
    input.with_file_name(format!("{}_{}.{}", base, table, extension(mode)))
}

pub fn write_records(path: &Path, records: &[Record], mode: OutputMode) -> Result<(), OutputError> {
    let rendered = render(records, mode)?;
    fs::write(path, rendered)?;
    debug!("write_records: {} records to {}", records.len(), path.display());
    Ok(())
}
