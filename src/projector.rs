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

//! Record projector
//!
//! Pairs row fields with column names by position, drops the columns the
//! filter does not allow and shapes the result as a structured record or a
//! flat `value:value` line.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeSet;

use super::columns::ColumnList;
use super::rows::RawRow;

/// Separator of the values of a flat record
pub const FLAT_DELIMITER: &str = ":";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Column name to value mappings (JSON)
    #[default]
    Structured,
    /// Delimited values only (hashcat)
    Flat,
}

/// Allow-list of column names. Empty means every column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnFilter(BTreeSet<String>);

impl ColumnFilter {
    /// Parse a comma separated list such as `user_email,user_pass`.
    pub fn parse(list: &str) -> Self {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn allows(&self, column: &str) -> bool {
        self.0.is_empty() || self.0.contains(column)
    }

    /// Filter entries that name none of `columns`.
    pub fn unknown<'a>(&'a self, columns: &'a ColumnList) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |name| !columns.contains(name))
            .map(String::as_str)
    }
}

impl<S: Into<String>> std::iter::FromIterator<S> for ColumnFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ColumnFilter(iter.into_iter().map(Into::into).collect())
    }
}

/// One output unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// `(column, value)` pairs in column order
    Structured(Vec<(String, String)>),
    /// Values joined with [`FLAT_DELIMITER`]
    Flat(String),
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&str> {
        match self {
            Record::Structured(pairs) => pairs
                .iter()
                .find(|(name, _)| name == column)
                .map(|(_, value)| value.as_str()),
            Record::Flat(_) => None,
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Record::Structured(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (name, value) in pairs {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
            Record::Flat(line) => serializer.serialize_str(line),
        }
    }
}

pub struct Projector<'a> {
    columns: &'a ColumnList,
    filter: &'a ColumnFilter,
    mode: OutputMode,
    unescape: bool,
}

impl<'a> Projector<'a> {
    pub fn new(columns: &'a ColumnList, filter: &'a ColumnFilter, mode: OutputMode) -> Self {
        Projector {
            columns,
            filter,
            mode,
            unescape: false,
        }
    }

    /// Resolve backslash escapes of quoted values.
    pub fn unescape(mut self, unescape: bool) -> Self {
        self.unescape = unescape;
        self
    }

    pub fn project(&self, row: &RawRow) -> Record {
        let retained = self
            .columns
            .iter()
            .zip(row.iter())
            .filter(|(column, _)| self.filter.allows(column))
            .map(|(column, field)| {
                let value = if self.unescape {
                    field.unescaped().into_owned()
                } else {
                    field.as_str().to_string()
                };
                (column.clone(), value)
            });

        match self.mode {
            OutputMode::Structured => Record::Structured(retained.collect()),
            OutputMode::Flat => {
                let values: Vec<String> = retained.map(|(_, value)| value).collect();
                Record::Flat(values.join(FLAT_DELIMITER))
            }
        }
    }

    pub fn project_all(&self, rows: &[RawRow]) -> Vec<Record> {
        rows.iter().map(|row| self.project(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Field;

    fn column_list(names: &[&str]) -> ColumnList {
        ColumnList::new("t", names.iter().map(|n| n.to_string()).collect()).unwrap()
    }

    fn alice() -> RawRow {
        RawRow::new(vec![
            Field::Bare("1".to_string()),
            Field::Quoted("Alice".to_string()),
        ])
    }

    #[test]
    fn structured_record_keeps_column_order() {
        let columns = column_list(&["id", "name"]);
        let filter = ColumnFilter::default();
        let record = Projector::new(&columns, &filter, OutputMode::Structured).project(&alice());
        assert_eq!(
            record,
            Record::Structured(vec![
                ("id".to_string(), "1".to_string()),
                ("name".to_string(), "Alice".to_string()),
            ])
        );
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"id":"1","name":"Alice"}"#
        );
    }

    #[test]
    fn flat_record_joins_values_in_column_order() {
        let columns = column_list(&["id", "name"]);
        let filter = ColumnFilter::parse("name,id");
        let record = Projector::new(&columns, &filter, OutputMode::Flat).project(&alice());
        assert_eq!(record, Record::Flat("1:Alice".to_string()));
    }

    #[test]
    fn filter_restricts_both_modes() {
        let columns = column_list(&["id", "name"]);
        let filter = ColumnFilter::parse("name");

        let record = Projector::new(&columns, &filter, OutputMode::Structured).project(&alice());
        assert_eq!(record.get("name"), Some("Alice"));
        assert_eq!(record.get("id"), None);

        let record = Projector::new(&columns, &filter, OutputMode::Flat).project(&alice());
        assert_eq!(record, Record::Flat("Alice".to_string()));
    }

    #[test]
    fn short_and_long_rows_are_truncated() {
        let columns = column_list(&["id", "name", "email"]);
        let filter = ColumnFilter::default();
        let projector = Projector::new(&columns, &filter, OutputMode::Structured);
        let short = projector.project(&alice());
        assert_eq!(short.get("email"), None);
        assert_eq!(short.get("name"), Some("Alice"));

        let columns = column_list(&["id"]);
        let projector = Projector::new(&columns, &filter, OutputMode::Flat);
        assert_eq!(projector.project(&alice()), Record::Flat("1".to_string()));
    }

    #[test]
    fn unescaping_is_opt_in() {
        let columns = column_list(&["s"]);
        let filter = ColumnFilter::default();
        let row = RawRow::new(vec![Field::Quoted(r"c\'d".to_string())]);

        let projector = Projector::new(&columns, &filter, OutputMode::Flat);
        assert_eq!(projector.project(&row), Record::Flat(r"c\'d".to_string()));
        let projector = projector.unescape(true);
        assert_eq!(projector.project(&row), Record::Flat("c'd".to_string()));
    }

    #[test]
    fn filter_parsing_trims_and_reports_unknown_names() {
        let filter = ColumnFilter::parse(" id, ,nope ");
        assert!(filter.allows("id"));
        assert!(!filter.allows("name"));
        let columns = column_list(&["id", "name"]);
        assert_eq!(filter.unknown(&columns).collect::<Vec<_>>(), vec!["nope"]);
        assert!(ColumnFilter::parse("").is_empty());
    }
}
