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

//! Table locator
//!
//! Cuts the section of a dump that belongs to one table: its `CREATE TABLE`
//! statement and everything after it up to `UNLOCK TABLES;`, or up to the
//! `DROP TABLE` / `CREATE TABLE` opening the next table's section.

use log::debug;

use super::error::ExtractError;
use super::scanner::Scanner;

/// The slice of the dump holding one table's definition and data.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBlock<'a> {
    name: String,
    text: &'a str,
    definition_end: usize,
}

impl<'a> TableBlock<'a> {
    /// The table name as requested by the caller.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The `CREATE TABLE` statement, including its terminating `;`.
    pub fn definition(&self) -> &'a str {
        &self.text[..self.definition_end]
    }

    /// Everything following the definition statement.
    pub fn data(&self) -> &'a str {
        &self.text[self.definition_end..]
    }
}

/// Find the first `CREATE TABLE` for `table` and return its block.
pub fn locate_table<'a>(dump: &'a str, table: &str) -> Result<TableBlock<'a>, ExtractError> {
    let mut scanner = Scanner::new(dump);

    let start = loop {
        if !scanner.seek(|s| s.at_keywords(&["CREATE", "TABLE"])) {
            return Err(ExtractError::TableNotFound(table.to_string()));
        }
        let start = scanner.pos();
        scanner.consume_keywords(&["CREATE", "TABLE"]);
        scanner.skip_whitespace();
        if scanner.consume_keywords(&["IF", "NOT", "EXISTS"]) {
            scanner.skip_whitespace();
        }
        match scanner.take_quoted_identifier() {
            Some(name) if name.eq_ignore_ascii_case(table) => break start,
            Some(name) => debug!("locate_table: skipping definition of {}", name),
            None => debug!("locate_table: skipping unquoted definition at {}", start),
        }
    };

    scanner.skip_statement();
    let definition_end = scanner.pos() - start;
    debug!(
        "locate_table: definition of {} spans {}..{}",
        table,
        start,
        scanner.pos()
    );

    let end = if scanner.seek(is_section_end) {
        if scanner.consume_keywords(&["UNLOCK", "TABLES"]) {
            let mut probe = scanner;
            probe.skip_whitespace();
            if probe.peek() == Some(';') {
                probe.next_char();
                scanner = probe;
            }
            debug!("locate_table: section of {} closed by UNLOCK TABLES", table);
        } else {
            debug!("locate_table: section of {} ends at next table", table);
        }
        scanner.pos()
    } else {
        debug!("locate_table: section of {} runs to end of dump", table);
        dump.len()
    };

    Ok(TableBlock {
        name: table.to_string(),
        text: &dump[start..end],
        definition_end,
    })
}

fn is_section_end(scanner: &Scanner) -> bool {
    scanner.at_keywords(&["UNLOCK", "TABLES"])
        || scanner.at_keywords(&["DROP", "TABLE"])
        || scanner.at_keywords(&["CREATE", "TABLE"])
}
