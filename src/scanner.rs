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

//! Dump scanner
//!
//! A forward-only cursor over the dump text. It knows just enough of the
//! mysqldump lexical rules to step over string literals, backtick quoted
//! identifiers and comments as opaque units, so that keyword and punctuation
//! searches never look inside them. Every operation is linear in the text
//! it consumes; nothing backtracks.

use std::borrow::Cow;

/// Cursor over a borrowed piece of SQL text.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Scanner { src, pos: 0 }
    }

    /// Byte offset of the cursor inside the scanned text.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn next_char(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Read while `predicate` holds or EOF is hit. The first non-matching
    /// char stays available as `peek()`.
    pub fn peeking_take_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        &self.src[start..self.pos]
    }

    /// Returns true if at least one whitespace char was consumed.
    pub fn skip_whitespace(&mut self) -> bool {
        !self.peeking_take_while(char::is_whitespace).is_empty()
    }

    /// Case-insensitive keyword test at the cursor. The keyword must not be
    /// glued to identifier characters on either side.
    pub fn at_keyword(&self, keyword: &str) -> bool {
        let rest = self.rest();
        let matches = rest
            .get(..keyword.len())
            .map(|head| head.eq_ignore_ascii_case(keyword))
            .unwrap_or(false);
        if !matches {
            return false;
        }
        let before = self.src[..self.pos].chars().next_back();
        let after = rest[keyword.len()..].chars().next();
        !before.map(is_identifier_part).unwrap_or(false)
            && !after.map(is_identifier_part).unwrap_or(false)
    }

    /// Test for a whitespace separated keyword sequence, e.g. `CREATE TABLE`.
    pub fn at_keywords(&self, keywords: &[&str]) -> bool {
        let mut probe = *self;
        probe.consume_keywords(keywords)
    }

    pub fn consume_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    /// Consume a keyword sequence or leave the cursor untouched.
    pub fn consume_keywords(&mut self, keywords: &[&str]) -> bool {
        let start = self.pos;
        for (index, keyword) in keywords.iter().enumerate() {
            if index > 0 && !self.skip_whitespace() {
                self.pos = start;
                return false;
            }
            if !self.consume_keyword(keyword) {
                self.pos = start;
                return false;
            }
        }
        true
    }

    /// Read a `` `quoted` `` identifier, returning its content with doubled
    /// backticks collapsed. `None` if the cursor is not on a backtick or the
    /// identifier is never closed.
    pub fn take_quoted_identifier(&mut self) -> Option<Cow<'a, str>> {
        if self.peek() != Some('`') {
            return None;
        }
        self.next_char();
        let start = self.pos;
        loop {
            self.peeking_take_while(|ch| ch != '`');
            match self.next_char() {
                Some('`') if self.peek() == Some('`') => {
                    self.next_char();
                }
                Some('`') => break,
                _ => return None,
            }
        }
        let raw = &self.src[start..self.pos - 1];
        if raw.contains("``") {
            Some(Cow::Owned(raw.replace("``", "`")))
        } else {
            Some(Cow::Borrowed(raw))
        }
    }

    /// Step over a string literal starting at the cursor. Backslash escapes
    /// any char and a doubled quote stays inside the literal. Returns false
    /// when EOF is hit before the closing quote.
    pub fn skip_literal(&mut self) -> bool {
        let quote = match self.peek() {
            Some(q @ '\'') | Some(q @ '"') => q,
            _ => return false,
        };
        self.next_char();
        while let Some(ch) = self.next_char() {
            if ch == '\\' {
                self.next_char();
            } else if ch == quote {
                if self.peek() == Some(quote) {
                    self.next_char();
                } else {
                    return true;
                }
            }
        }
        false
    }

    /// Step over a `-- ` line comment or a `/* */` block comment.
    pub fn skip_comment(&mut self) -> bool {
        let rest = self.rest();
        if rest.starts_with("--") {
            let third = rest[2..].chars().next();
            if third.map(char::is_whitespace).unwrap_or(true) {
                self.peeking_take_while(|ch| ch != '\n');
                self.next_char();
                return true;
            }
        } else if rest.starts_with("/*") {
            self.pos = match rest[2..].find("*/") {
                Some(end) => self.pos + 2 + end + 2,
                None => self.src.len(),
            };
            return true;
        }
        false
    }

    /// Step over whatever opaque unit starts at the cursor: literal, quoted
    /// identifier or comment.
    pub fn skip_opaque(&mut self) -> bool {
        match self.peek() {
            Some('\'') | Some('"') => {
                self.skip_literal();
                true
            }
            Some('`') => {
                if self.take_quoted_identifier().is_none() {
                    self.pos = self.src.len();
                }
                true
            }
            Some('-') | Some('/') => self.skip_comment(),
            _ => false,
        }
    }

    /// Advance until `predicate` holds at the cursor, never stopping inside
    /// an opaque unit. Returns false (cursor at EOF) if nothing matched.
    pub fn seek<F>(&mut self, mut predicate: F) -> bool
    where
        F: FnMut(&Scanner<'a>) -> bool,
    {
        while !self.is_eof() {
            if predicate(self) {
                return true;
            }
            if !self.skip_opaque() {
                self.next_char();
            }
        }
        false
    }

    /// Move past the next statement terminator. False if none is left.
    pub fn skip_statement(&mut self) -> bool {
        if self.seek(|s| s.peek() == Some(';')) {
            self.next_char();
            true
        } else {
            false
        }
    }

    /// Take the content of the parenthesized group opening at the cursor,
    /// consuming the matching `)`. The flag is false when the group runs to
    /// EOF unclosed.
    pub fn take_group(&mut self) -> Option<(&'a str, bool)> {
        if self.peek() != Some('(') {
            return None;
        }
        self.next_char();
        let start = self.pos;
        let mut depth = 0usize;
        while !self.is_eof() {
            if self.skip_opaque() {
                continue;
            }
            match self.peek() {
                Some('(') => depth += 1,
                Some(')') if depth == 0 => {
                    let inner = &self.src[start..self.pos];
                    self.next_char();
                    return Some((inner, true));
                }
                Some(')') => depth -= 1,
                _ => {}
            }
            self.next_char();
        }
        Some((&self.src[start..], false))
    }
}

pub fn is_identifier_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}
