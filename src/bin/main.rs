// Copyright (C) 2024 Jelmer Vernooij <jelmer@samba.org>
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Command-line interface for the dartfix tool.
//!
//! Runs every fixer over its built-in list of files in the Flutter app:
//!
//! - TODO comments are attributed (`// TODO(copilot): ...`)
//! - nullable private fields in the IP calculator become `late`
//! - deprecated `Color` channel getters get an ignore marker
//! - discarded futures are wrapped in `unawaited(...)`

use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;

use dartfix::{run, Config, DEFAULT_ROOT};

#[derive(Parser)]
#[command(name = "dartfix")]
#[command(about = "dartfix - Fix Flutter analyzer info-level issues")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Root of the Flutter app the target paths are relative to
    #[arg(long, default_value = DEFAULT_ROOT)]
    root: PathBuf,

    /// Print the run report as JSON instead of progress text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    if cli.debug || std::env::var("RUST_LOG").is_ok() {
        let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => {
                if cli.debug {
                    tracing_subscriber::EnvFilter::new("debug")
                } else {
                    tracing_subscriber::EnvFilter::new("warn")
                }
            }
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(io::stderr)
            .init();
    }

    let config = Config::with_root(cli.root);

    if cli.json {
        let report = run(&config, &mut io::sink())?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        run(&config, &mut io::stdout().lock())?;
    }

    Ok(())
}
