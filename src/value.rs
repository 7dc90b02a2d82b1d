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

use std::borrow::Cow;

/// One field token of an INSERT value-list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    /// 'string value', stored without the enclosing quotes and with the
    /// escape sequences left as written
    Quoted(String),
    /// Anything else, verbatim: numbers, `NULL`, hex literals, expressions
    Bare(String),
}

impl Field {
    /// Classify a raw token cut out of a value-list.
    pub fn from_token(token: &str) -> Field {
        let token = token.trim();
        if let Some(inner) = strip_quotes(token) {
            return Field::Quoted(inner.to_string());
        }
        // Charset introducer, e.g. _binary 'abc' or _utf8mb4'abc'
        if token.starts_with('_') {
            if let Some(quote) = token.find('\'') {
                let introducer = token[..quote].trim_end();
                if introducer[1..].chars().all(|c| c.is_ascii_alphanumeric()) {
                    if let Some(inner) = strip_quotes(&token[quote..]) {
                        return Field::Quoted(inner.to_string());
                    }
                }
            }
        }
        Field::Bare(token.to_string())
    }

    /// The cleaned value: quoted literals lose their quotes, nothing is
    /// unescaped.
    pub fn as_str(&self) -> &str {
        match self {
            Field::Quoted(v) | Field::Bare(v) => v,
        }
    }

    /// The value with MySQL string escapes resolved. Bare tokens are returned
    /// as they are.
    pub fn unescaped(&self) -> Cow<'_, str> {
        match self {
            Field::Quoted(v) if v.contains('\\') || v.contains("''") => {
                Cow::Owned(unescape(v))
            }
            other => Cow::Borrowed(other.as_str()),
        }
    }
}

fn strip_quotes(token: &str) -> Option<&str> {
    if token.len() >= 2 && token.starts_with('\'') && token.ends_with('\'') {
        Some(&token[1..token.len() - 1])
    } else {
        None
    }
}

fn unescape(value: &str) -> String {
    let mut s = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('0') => s.push('\0'),
                Some('b') => s.push('\u{8}'),
                Some('n') => s.push('\n'),
                Some('r') => s.push('\r'),
                Some('t') => s.push('\t'),
                Some('Z') => s.push('\u{1a}'),
                // LIKE wildcards keep their backslash
                Some(c @ '%') | Some(c @ '_') => {
                    s.push('\\');
                    s.push(c);
                }
                Some(c) => s.push(c),
                None => s.push('\\'),
            },
            '\'' if chars.peek() == Some(&'\'') => {
                chars.next();
                s.push('\'');
            }
            c => s.push(c),
        }
    }
    s
}
