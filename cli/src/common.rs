// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use anyhow::{Context, Result};
use clap::Parser;
use hwpin::{Driver, Paths};
use std::path::PathBuf;
use std::time::Duration;

// common helper functions

/// Identify the board, without initializing the driver.
pub fn detect_driver(opts: &DriverOpts) -> Result<Driver> {
    let paths = match &opts.root {
        Some(root) => Paths::with_root(root),
        None => Paths::default(),
    };
    let cpuinfo = paths.cpuinfo.clone();
    let driver = Driver::detect(paths)
        .with_context(|| format!("unable to identify board from '{}'", cpuinfo.display()))?;
    Ok(match opts.revision {
        Some(rev) => driver.with_revision(rev),
        None => driver,
    })
}

/// Identify the board and bring up all its modules.
pub fn open_driver(opts: &DriverOpts) -> Result<Driver> {
    let mut driver = detect_driver(opts)?;
    driver
        .initialize()
        .with_context(|| format!("unable to initialize {}", driver.board().name()))?;
    Ok(driver)
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseDurationError {
    #[error("'{0}' unknown units - use 's', 'ms' or 'us'.")]
    Units(String),
    #[error("'{0}' must start with a digit")]
    NoDigits(String),
    #[error("'{0}' {1}")]
    ParseDigits(String, std::num::ParseIntError),
}

pub fn parse_duration(s: &str) -> std::result::Result<Duration, ParseDurationError> {
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    let t = match s.find(|c: char| !c.is_ascii_digit()) {
        Some(0) => return Err(ParseDurationError::NoDigits(s.into())),
        Some(n) => {
            let (num, units) = s.split_at(n);
            let t = num
                .parse::<u64>()
                .map_err(|e| ParseDurationError::ParseDigits(num.into(), e))?;
            t * match units {
                "us" => 1000,
                "ms" => 1000000,
                "s" => 1000000000,
                _ => return Err(ParseDurationError::Units(s.into())),
            }
        }
        None => {
            s.parse::<u64>()
                .map_err(|e| ParseDurationError::ParseDigits(s.into(), e))?
                * 1000000
        }
    };
    Ok(Duration::from_nanos(t))
}

// common command line parser options

/// Options to control how the board is located.
#[derive(Clone, Debug, Default, Parser)]
pub struct DriverOpts {
    #[arg(from_global)]
    pub root: Option<PathBuf>,

    #[arg(from_global)]
    pub revision: Option<u32>,
}

#[derive(Clone, Copy, Debug, Default, Parser)]
pub struct EmitOpts {
    #[arg(from_global)]
    pub verbose: bool,

    /// Emit output in JSON format
    #[cfg(feature = "json")]
    #[arg(long, group = "emit")]
    pub json: bool,

    /// Quote pin names.
    #[arg(long)]
    pub quoted: bool,
}

pub fn emit_error(opts: &EmitOpts, e: &anyhow::Error) {
    let e_str = format_error(opts, e);
    #[cfg(feature = "json")]
    if opts.json {
        println!("{}", serde_json::json!({ "error": e_str }));
        return;
    }
    eprintln!("{e_str}");
}

pub fn format_error(opts: &EmitOpts, e: &anyhow::Error) -> String {
    if opts.verbose {
        format!("{e:#}")
    } else {
        format!("{e}")
    }
}

pub fn format_name(opts: &EmitOpts, name: &str) -> String {
    if opts.quoted {
        format!("\"{name}\"")
    } else {
        name.to_string()
    }
}
