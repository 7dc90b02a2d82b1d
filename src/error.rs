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

use std::error::Error;
use std::fmt;

/// Terminal failures of the extraction pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// No `CREATE TABLE` statement for the requested table.
    TableNotFound(String),
    /// The definition has no parenthesized column section.
    NoColumnSection(String),
    /// A column section was found but no column name could be recovered.
    NoColumns(String),
    /// Invocation parameters rejected before parsing started.
    InvalidConfig(String),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExtractError::TableNotFound(table) => {
                write!(f, "table {} not found in the dump", table)
            }
            ExtractError::NoColumnSection(table) => write!(
                f,
                "sql parse error: unable to extract column definitions for table {}",
                table
            ),
            ExtractError::NoColumns(table) => {
                write!(f, "sql parse error: no columns found for table {}", table)
            }
            ExtractError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl Error for ExtractError {}
