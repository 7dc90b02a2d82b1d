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

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const DUMP: &str = include_str!("fixtures/wordpress.sql");

fn dump_in(dir: &Path) -> PathBuf {
    let input = dir.join("wordpress.sql");
    fs::write(&input, DUMP).unwrap();
    input
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sqldump-extract"))
        .args(args)
        .output()
        .unwrap()
}

fn logged(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn writes_next_to_the_dump() {
    let dir = tempfile::tempdir().unwrap();
    let input = dump_in(dir.path());

    let output = run(&[
        "-f",
        input.to_str().unwrap(),
        "-t",
        "wp_users",
        "-c",
        "user_login",
        "--hashcat",
    ]);
    assert!(output.status.success(), "{}", logged(&output));
    assert_eq!(
        fs::read_to_string(dir.path().join("wordpress_wp_users.txt")).unwrap(),
        "admin\neditor\nghost"
    );
}

#[test]
fn explicit_output_wins() {
    let dir = tempfile::tempdir().unwrap();
    let input = dump_in(dir.path());
    let custom = dir.path().join("custom.txt");

    let output = run(&[
        "-f",
        input.to_str().unwrap(),
        "-t",
        "wp_users",
        "-c",
        "user_login",
        "--hashcat",
        "--output",
        custom.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", logged(&output));
    assert_eq!(fs::read_to_string(&custom).unwrap(), "admin\neditor\nghost");
    assert!(!dir.path().join("wordpress_wp_users.txt").exists());
}

#[test]
fn json_is_the_default() {
    let dir = tempfile::tempdir().unwrap();
    let input = dump_in(dir.path());

    let output = run(&["-f", input.to_str().unwrap(), "-t", "wp_options"]);
    assert!(output.status.success(), "{}", logged(&output));
    let written = fs::read_to_string(dir.path().join("wordpress_wp_options.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(2));
}

#[test]
fn unknown_table_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = dump_in(dir.path());

    let output = run(&["-f", input.to_str().unwrap(), "-t", "wp_posts"]);
    assert!(!output.status.success());
    assert!(logged(&output).contains("table wp_posts not found"));
    assert!(!dir.path().join("wordpress_wp_posts.json").exists());
}

#[test]
fn missing_dump_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nothing.sql");

    let output = run(&["-f", missing.to_str().unwrap(), "-t", "wp_users"]);
    assert!(!output.status.success());
    assert!(logged(&output).contains("error reading file"));
}
