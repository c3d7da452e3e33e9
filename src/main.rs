// SPDX-License-Identifier: MIT
//
// keypress — press keys, see what the terminal sends.
//
// A small viewer wired on top of the two crates:
//
//   kp-term → raw-mode capture of one keypress at a time
//   kp-keys → code tables and decoding into a KeyEvent
//
// For every key it prints the character (when printable), the raw codes,
// and the description, then goes back for the next key. The loop ends on
// a quit key: `q` and Enter by default.
//
// Terminal raw mode is only active inside each read, so plain `println!`
// output between reads renders normally. Trace output goes to a file
// (`--log-file`) because anything written to the terminal while a read
// is blocked would interleave with the keys being typed.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::Mutex;

use clap::Parser;
use tracing::{Level, info};

use kp_keys::{KeyEvent, KeyTable, NamedKey};
use kp_term::KeyReader;

// ─── Command line ───────────────────────────────────────────────────────────

/// Read single keypresses and show their codes and names.
#[derive(Debug, Parser)]
#[command(name = "keypress", version, about)]
struct Cli {
    /// Text of a key that ends the session. Repeat for several keys.
    #[arg(short, long = "quit", value_name = "TEXT", default_value = "q")]
    quit: Vec<String>,

    /// Do not treat Enter as a quit key.
    #[arg(long)]
    no_enter_quit: bool,

    /// Write trace output to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Most verbose level written to the log file.
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: Level,
}

impl Cli {
    /// Whether `key` ends the session.
    fn is_quit_key(&self, table: &KeyTable, key: &KeyEvent) -> bool {
        let enter = !self.no_enter_quit && *key == *table.sequence(NamedKey::Enter);
        enter || self.quit.iter().any(|text| *key == **text)
    }
}

// ─── Logging ────────────────────────────────────────────────────────────────

/// Install a file-backed subscriber when `--log-file` is given.
fn init_logging(cli: &Cli) -> io::Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_max_level(cli.log_level)
        .with_ansi(false)
        .init();
    Ok(())
}

// ─── Main loop ──────────────────────────────────────────────────────────────

fn print_key(key: &KeyEvent) {
    if key.is_printable() {
        println!("{key}");
    }
    println!("{:?}", key.codes());
    println!("{}", key.description());
}

fn run(cli: &Cli, reader: KeyReader) -> kp_keys::Result<()> {
    loop {
        let key = reader.read_key()?;
        print_key(&key);
        if cli.is_quit_key(reader.table(), &key) {
            info!(key = %key.description(), "quit key pressed");
            return Ok(());
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("keypress: cannot open log file: {e}");
        process::exit(1);
    }

    let reader = KeyReader::detect().unwrap_or_else(|e| {
        eprintln!("keypress: {e}");
        process::exit(1);
    });
    info!(platform = %reader.table().platform, "reading keys");

    if let Err(e) = run(&cli, reader) {
        eprintln!("keypress: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
