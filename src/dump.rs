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

use log::debug;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use utf8_chars::BufReadCharsExt;

/// Read a whole dump as UTF-8 text. Invalid UTF-8 is an I/O error.
pub fn read_dump<R: BufRead>(mut reader: R) -> io::Result<String> {
    let mut dump = String::new();
    for ch in reader.io_chars() {
        dump.push(ch?);
    }
    Ok(dump)
}

pub fn read_dump_file<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let path = path.as_ref();
    let dump = read_dump(BufReader::new(File::open(path)?))?;
    debug!("read_dump_file: {} bytes from {}", dump.len(), path.display());
    Ok(dump)
}
