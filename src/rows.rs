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

//! Row tokenizer
//!
//! Walks the INSERT statements of a table block and turns every value-list
//! `( ... )` after `VALUES` into a [`RawRow`]. Malformed input never fails:
//! it just produces fewer or shorter rows.

use log::debug;
use std::borrow::Cow;
use std::ops::Index;
use std::slice::Iter;

use super::locator::TableBlock;
use super::scanner::Scanner;
use super::value::Field;

/// Positional field tokens of one value-list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow(Vec<Field>);

impl RawRow {
    pub fn new(fields: Vec<Field>) -> Self {
        RawRow(fields)
    }

    pub fn fields(&self) -> &[Field] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Field> {
        self.0.iter()
    }
}

impl Index<usize> for RawRow {
    type Output = Field;

    fn index(&self, index: usize) -> &Field {
        &self.0[index]
    }
}

/// Every row of every INSERT into the block's table, in dump order.
pub fn tokenize_rows(block: &TableBlock) -> Vec<RawRow> {
    let mut rows = vec![];
    let mut scanner = Scanner::new(block.data());
    let mut statements = 0usize;

    while scanner.seek(|s| s.at_keyword("INSERT") || s.at_keyword("REPLACE")) {
        let statement_start = scanner.pos();
        if !consume_insert_into(&mut scanner) {
            scanner.next_char();
            continue;
        }

        scanner.skip_whitespace();
        let target = take_table_name(&mut scanner);
        if !target.eq_ignore_ascii_case(block.name()) {
            debug!(
                "tokenize_rows: skipping insert into {} inside block of {}",
                target,
                block.name()
            );
            scanner.skip_statement();
            continue;
        }

        let has_values = scanner.seek(|s| s.at_keyword("VALUES") || s.peek() == Some(';'))
            && scanner.consume_keyword("VALUES");
        if !has_values {
            debug!("tokenize_rows: insert at {} has no VALUES", statement_start);
            scanner.skip_statement();
            continue;
        }

        statements += 1;
        loop {
            scanner.skip_whitespace();
            match scanner.take_group() {
                Some((inner, closed)) => {
                    rows.push(RawRow(split_fields(inner)));
                    if !closed {
                        debug!("tokenize_rows: unclosed value-list at end of block");
                        break;
                    }
                }
                None => {
                    debug!(
                        "tokenize_rows: expected value-list at {}, found {:?}",
                        scanner.pos(),
                        scanner.peek()
                    );
                    scanner.skip_statement();
                    break;
                }
            }
            scanner.skip_whitespace();
            match scanner.peek() {
                Some(',') => {
                    scanner.next_char();
                }
                Some(';') => {
                    scanner.next_char();
                    break;
                }
                _ => {
                    debug!("tokenize_rows: insert at {} is not terminated", statement_start);
                    break;
                }
            }
        }
    }

    debug!(
        "tokenize_rows: {} rows from {} statements into {}",
        rows.len(),
        statements,
        block.name()
    );
    rows
}

/// `INSERT [IGNORE] INTO` or `REPLACE INTO`
fn consume_insert_into(scanner: &mut Scanner) -> bool {
    scanner.consume_keywords(&["INSERT", "INTO"])
        || scanner.consume_keywords(&["INSERT", "IGNORE", "INTO"])
        || scanner.consume_keywords(&["REPLACE", "INTO"])
}

/// Last segment of a possibly schema qualified table name.
fn take_table_name<'a>(scanner: &mut Scanner<'a>) -> Cow<'a, str> {
    loop {
        let name = match scanner.peek() {
            Some('`') => scanner.take_quoted_identifier().unwrap_or_default(),
            _ => Cow::Borrowed(
                scanner.peeking_take_while(|c| c != '.' && c != '(' && !c.is_whitespace()),
            ),
        };
        if scanner.peek() == Some('.') {
            scanner.next_char();
        } else {
            return name;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Outside,
    InQuote,
    AfterEscape,
}

/// Split the inside of one value-list on top level commas. Commas inside
/// quoted literals or nested parentheses belong to the field.
pub fn split_fields(inner: &str) -> Vec<Field> {
    if inner.trim().is_empty() {
        return vec![];
    }

    let mut fields = vec![];
    let mut state = State::Outside;
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in inner.char_indices() {
        state = match (state, ch) {
            (State::Outside, '\'') => State::InQuote,
            (State::Outside, '(') => {
                depth += 1;
                State::Outside
            }
            (State::Outside, ')') => {
                depth = depth.saturating_sub(1);
                State::Outside
            }
            (State::Outside, ',') if depth == 0 => {
                fields.push(Field::from_token(&inner[start..i]));
                start = i + 1;
                State::Outside
            }
            (State::InQuote, '\\') => State::AfterEscape,
            (State::InQuote, '\'') => State::Outside,
            (State::AfterEscape, _) => State::InQuote,
            (state, _) => state,
        };
    }
    fields.push(Field::from_token(&inner[start..]));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::locate_table;

    fn quoted(s: &str) -> Field {
        Field::Quoted(s.to_string())
    }

    fn bare(s: &str) -> Field {
        Field::Bare(s.to_string())
    }

    fn rows_of(dump: &str) -> Vec<RawRow> {
        let block = locate_table(dump, "t").unwrap();
        tokenize_rows(&block)
    }

    #[test]
    fn quoted_commas_and_escapes_survive() {
        assert_eq!(
            split_fields(r"'a,b', 2, 'c\'d'"),
            vec![quoted("a,b"), bare("2"), quoted(r"c\'d")]
        );
    }

    #[test]
    fn nested_parentheses_stay_in_one_field() {
        assert_eq!(
            split_fields("1,ST_GeomFromText('POINT(1 2)'),NULL"),
            vec![bare("1"), bare("ST_GeomFromText('POINT(1 2)')"), bare("NULL")]
        );
    }

    #[test]
    fn escaped_backslash_closes_quote() {
        assert_eq!(
            split_fields(r"'a\\','b'"),
            vec![quoted(r"a\\"), quoted("b")]
        );
    }

    #[test]
    fn empty_and_unterminated_lists_degrade() {
        assert!(split_fields("  ").is_empty());
        assert_eq!(split_fields("1,'x,y"), vec![bare("1"), bare("'x,y")]);
    }

    #[test]
    fn multi_row_insert_yields_one_row_per_group() {
        let dump = "CREATE TABLE `t` (`id` int, `s` text) ENGINE=InnoDB;\n\
                    INSERT INTO `t` VALUES (1,'a);b'),(2,'c'),\n(3,NULL);\n\
                    insert into t values (4,'d');";
        let rows = rows_of(dump);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].fields(), &[bare("1"), quoted("a);b")][..]);
        assert_eq!(rows[2][1], bare("NULL"));
        assert_eq!(rows[3][1], quoted("d"));
    }

    #[test]
    fn explicit_column_list_and_qualified_name() {
        let dump = "CREATE TABLE `t` (`id` int) ENGINE=InnoDB;\n\
                    INSERT IGNORE INTO `db`.`t` (`id`) VALUES (5);\n\
                    REPLACE INTO `t` VALUES (6);";
        let rows = rows_of(dump);
        assert_eq!(rows, vec![RawRow::new(vec![bare("5")]), RawRow::new(vec![bare("6")])]);
    }

    #[test]
    fn inserts_into_other_tables_are_skipped() {
        let dump = "CREATE TABLE `t` (`id` int) ENGINE=InnoDB;\n\
                    INSERT INTO `t_log` VALUES (9);\n\
                    INSERT INTO `t` VALUES (1);";
        let rows = rows_of(dump);
        assert_eq!(rows, vec![RawRow::new(vec![bare("1")])]);
    }

    #[test]
    fn keywords_inside_values_are_data() {
        let dump = "CREATE TABLE `t` (`s` text) ENGINE=InnoDB;\n\
                    INSERT INTO `t` VALUES ('INSERT INTO `t` VALUES (0);'),('UNLOCK TABLES;');\n";
        let rows = rows_of(dump);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], quoted("UNLOCK TABLES;"));
    }
}
