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

//! Table extractor for mysqldump files
//!
//! This crate pulls the rows of one table out of a mysqldump file. The
//! table's section is located, its column names are read from the
//! `CREATE TABLE` statement and every INSERT value-list is split into
//! fields. Rows come out as column name to value records (JSON) or as
//! `value:value` lines ready for hashcat.
//!
//! ```rust
//! use sqldump_extract::{extract, output, ExtractConfig, OutputMode};
//!
//! let dump = "CREATE TABLE `users` (
//!   `id` int(11) NOT NULL,
//!   `user_email` varchar(100) NOT NULL,
//!   `user_pass` varchar(255) NOT NULL,
//!   PRIMARY KEY (`id`)
//! ) ENGINE=InnoDB;
//! INSERT INTO `users` VALUES (1,'a@example.com','$P$B1'),(2,'b@example.com','$P$B2');
//! UNLOCK TABLES;";
//!
//! let config = ExtractConfig::new("users")?
//!     .with_columns("user_email,user_pass")
//!     .with_mode(OutputMode::Flat);
//! let records = extract(dump, &config)?;
//! assert_eq!(
//!     output::render(&records, config.mode())?,
//!     "a@example.com:$P$B1\nb@example.com:$P$B2"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use log::{debug, warn};

pub mod columns;
pub mod config;
pub mod dump;
mod error;
pub mod locator;
pub mod output;
pub mod projector;
pub mod rows;
mod scanner;
pub mod value;

pub use columns::{extract_columns, ColumnList};
pub use config::ExtractConfig;
pub use error::ExtractError;
pub use locator::{locate_table, TableBlock};
pub use projector::{ColumnFilter, OutputMode, Projector, Record, FLAT_DELIMITER};
pub use rows::{tokenize_rows, RawRow};
pub use value::Field;

/// Run the whole pipeline over an in-memory dump.
pub fn extract(dump: &str, config: &ExtractConfig) -> Result<Vec<Record>, ExtractError> {
    let block = locate_table(dump, config.table())?;
    let columns = extract_columns(&block)?;
    for name in config.filter().unknown(&columns) {
        warn!("column {} does not exist in table {}", name, config.table());
    }

    let rows = tokenize_rows(&block);
    let projector = Projector::new(&columns, config.filter(), config.mode())
        .unescape(config.unescape());
    let records = projector.project_all(&rows);
    debug!("extract: {} records from {}", records.len(), config.table());
    Ok(records)
}
