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

use clap::Parser;
use log::{debug, error, info, LevelFilter};
use simple_logger::SimpleLogger;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use sqldump_extract::{dump, extract, output, ExtractConfig, OutputMode};

/// Extract the rows of one table from a SQL dump as JSON, or as
/// `value1:value2` lines for hashcat.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the SQL dump file.
    #[arg(short, long)]
    file: PathBuf,

    /// Name of the table to extract data from.
    #[arg(short, long)]
    table: String,

    /// Comma-separated list of columns to include. All columns if omitted.
    #[arg(short, long)]
    column: Option<String>,

    /// Format output for hashcat (value1:value2) instead of JSON.
    #[arg(long)]
    hashcat: bool,

    /// Resolve backslash escapes inside quoted values.
    #[arg(long)]
    unescape: bool,

    /// Output file. Defaults to <dump>_<table>.json or .txt next to the dump.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("unable to initialise logging: {}", e);
    }

    if let Err(e) = run(args) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mode = if args.hashcat {
        OutputMode::Flat
    } else {
        OutputMode::Structured
    };
    let config = ExtractConfig::new(&args.table)?
        .with_columns(args.column.as_deref().unwrap_or(""))
        .with_mode(mode)
        .with_unescape(args.unescape);
    debug!("run: {:?}", config);

    let content = dump::read_dump_file(&args.file)
        .map_err(|e| format!("error reading file {}: {}", args.file.display(), e))?;
    let records = extract(&content, &config)?;

    let path = match args.output {
        Some(path) => path,
        None => output::output_path(&args.file, config.table(), mode),
    };
    output::write_records(&path, &records, mode)?;

    info!("{} records written to {}", records.len(), path.display());
    Ok(())
}
