// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A command line tool for accessing the pins of a single-board computer.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod analog;
mod common;
mod detect;
mod get;
mod pins;
mod set;

fn main() -> ExitCode {
    match Opts::try_parse() {
        Ok(opt) => {
            init_logging(opt.verbose);
            let res = match opt.cmd {
                Command::Analog(cfg) => analog::cmd(&cfg),
                Command::Detect(cfg) => detect::cmd(&cfg),
                Command::Get(cfg) => get::cmd(&cfg),
                Command::Pins(cfg) => pins::cmd(&cfg),
                Command::Set(cfg) => set::cmd(&cfg),
            };
            return if res {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
        Err(e) => eprintln!("{e}"),
    }
    ExitCode::FAILURE
}

// Events go to stderr so they never mix with command output.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[derive(Parser)]
#[command(
    name = "hwpin",
    about = "A utility to access the pins of single-board computers via sysfs.",
    version,
    propagate_version = true
)]
struct Opts {
    /// Provide more detailed error messages and log driver activity.
    #[arg(short = 'v', long, global = true, display_order = 800)]
    pub verbose: bool,

    /// Locate sysfs, procfs and /dev under this directory
    #[arg(
        long,
        value_name = "dir",
        env = "HWPIN_ROOT",
        global = true,
        display_order = 801
    )]
    pub root: Option<std::path::PathBuf>,

    /// Use this board revision rather than the detected one
    #[arg(long, value_name = "rev", global = true, display_order = 802)]
    pub revision: Option<u32>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
enum Command {
    /// Read analog pins.
    Analog(analog::Opts),

    /// Identify the board.
    Detect(detect::Opts),

    /// Read the levels of digital pins.
    Get(get::Opts),

    /// List the pins of the board.
    Pins(pins::Opts),

    /// Set the levels of digital pins.
    Set(set::Opts),
}
