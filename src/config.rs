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

use super::error::ExtractError;
use super::projector::{ColumnFilter, OutputMode};

/// What to extract and how to shape it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    table: String,
    filter: ColumnFilter,
    mode: OutputMode,
    unescape: bool,
}

impl ExtractConfig {
    pub fn new(table: &str) -> Result<Self, ExtractError> {
        let table = table.trim();
        if table.is_empty() {
            return Err(ExtractError::InvalidConfig(
                "table name must not be empty".to_string(),
            ));
        }
        Ok(ExtractConfig {
            table: table.to_string(),
            filter: ColumnFilter::default(),
            mode: OutputMode::default(),
            unescape: false,
        })
    }

    /// Restrict output to a comma separated list of columns.
    pub fn with_columns(mut self, list: &str) -> Self {
        self.filter = ColumnFilter::parse(list);
        self
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_unescape(mut self, unescape: bool) -> Self {
        self.unescape = unescape;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn filter(&self) -> &ColumnFilter {
        &self.filter
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn unescape(&self) -> bool {
        self.unescape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matches::assert_matches;

    #[test]
    fn table_name_is_required() {
        assert_matches!(ExtractConfig::new("  "), Err(ExtractError::InvalidConfig(_)));
        assert_eq!(ExtractConfig::new(" users ").unwrap().table(), "users");
    }

    #[test]
    fn defaults_to_all_columns_as_json() {
        let config = ExtractConfig::new("users").unwrap();
        assert!(config.filter().is_empty());
        assert_eq!(config.mode(), OutputMode::Structured);
        assert!(!config.unescape());

        let config = config.with_columns("user_email,user_pass").with_mode(OutputMode::Flat);
        assert!(config.filter().allows("user_pass"));
        assert!(!config.filter().allows("id"));
        assert_eq!(config.mode(), OutputMode::Flat);
    }
}
