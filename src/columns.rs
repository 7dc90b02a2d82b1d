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

//! Column extractor
//!
//! Recovers column names, in declaration order, from a `CREATE TABLE`
//! statement. A column is a backtick quoted identifier followed by
//! whitespace and a type name; anything declared differently is not seen.

use log::debug;
use std::slice::Iter;

use super::error::ExtractError;
use super::locator::TableBlock;
use super::scanner::Scanner;

/// Table level definitions that close the column part of the section
const CONSTRAINT_KEYWORDS: &[&[&str]] = &[
    &["PRIMARY", "KEY"],
    &["UNIQUE", "KEY"],
    &["UNIQUE", "INDEX"],
    &["FOREIGN", "KEY"],
    &["KEY"],
    &["INDEX"],
    &["FULLTEXT"],
    &["SPATIAL"],
    &["CONSTRAINT"],
    &["CHECK"],
];

/// Ordered, non-empty list of column names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnList(Vec<String>);

impl ColumnList {
    pub fn new(table: &str, names: Vec<String>) -> Result<Self, ExtractError> {
        if names.is_empty() {
            return Err(ExtractError::NoColumns(table.to_string()));
        }
        Ok(ColumnList(names))
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String> {
        self.0.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }
}

impl<'a> IntoIterator for &'a ColumnList {
    type Item = &'a String;
    type IntoIter = Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

pub fn extract_columns(block: &TableBlock) -> Result<ColumnList, ExtractError> {
    let section = column_section(block.definition())
        .ok_or_else(|| ExtractError::NoColumnSection(block.name().to_string()))?;
    debug!("extract_columns: column section of {} is {:?}", block.name(), section);

    let mut names = vec![];
    let mut scanner = Scanner::new(section);
    while !scanner.is_eof() {
        match scanner.peek() {
            Some('`') => {
                if let Some(name) = scanner.take_quoted_identifier() {
                    if scanner.skip_whitespace()
                        && scanner.peek().map(|c| c.is_ascii_alphabetic()).unwrap_or(false)
                    {
                        names.push(name.into_owned());
                    }
                }
            }
            Some('\'') | Some('"') => {
                scanner.skip_literal();
            }
            _ => {
                scanner.next_char();
            }
        }
    }

    debug!("extract_columns: {} has columns {:?}", block.name(), names);
    ColumnList::new(block.name(), names)
}

/// The text between the opening parenthesis of the definition and either the
/// first table level constraint or the parenthesis closing the section.
fn column_section(definition: &str) -> Option<&str> {
    let mut scanner = Scanner::new(definition);
    if !scanner.seek(|s| s.peek() == Some('(')) {
        return None;
    }
    scanner.next_char();
    let start = scanner.pos();
    let mut depth = 0usize;

    while !scanner.is_eof() {
        if scanner.skip_opaque() {
            continue;
        }
        let here = scanner.pos();
        match scanner.next_char() {
            Some('(') => depth += 1,
            Some(')') if depth == 0 => return Some(&definition[start..here]),
            Some(')') => depth -= 1,
            Some(',') if depth == 0 => {
                let mut probe = scanner;
                probe.skip_whitespace();
                if CONSTRAINT_KEYWORDS.iter().any(|kw| probe.at_keywords(kw)) {
                    return Some(&definition[start..here]);
                }
            }
            _ => {}
        }
    }
    None
}
