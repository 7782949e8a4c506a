// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::common::{self, emit_error, format_error, DriverOpts, EmitOpts};
use anyhow::{Context, Result};
use clap::Parser;
use hwpin::{Capabilities, Driver};
#[cfg(feature = "serde")]
use serde_derive::Serialize;

#[derive(Debug, Parser)]
#[command(alias("a"))]
pub struct Opts {
    /// The analog pins to read
    ///
    /// If none specified then all the analog pins of the board are read.
    #[arg(value_name = "pin")]
    pins: Vec<String>,

    /// Display only the samples
    #[arg(long, group = "emit")]
    pub numeric: bool,

    #[command(flatten)]
    driver: DriverOpts,

    #[command(flatten)]
    emit: EmitOpts,
}

pub fn cmd(opts: &Opts) -> bool {
    let driver = match common::open_driver(&opts.driver) {
        Ok(d) => d,
        Err(e) => {
            emit_error(&opts.emit, &e);
            return false;
        }
    };
    let names = if opts.pins.is_empty() {
        match analog_pins(&driver) {
            Ok(names) => names,
            Err(e) => {
                emit_error(&opts.emit, &e);
                return false;
            }
        }
    } else {
        opts.pins.clone()
    };
    let mut res = CmdResult::default();
    for name in names {
        let sample = driver
            .pin(&name)
            .and_then(|pin| driver.analog_read(pin))
            .with_context(|| format!("unable to read analog pin '{name}'"));
        match sample {
            Ok(value) => res.samples.push(Sample { id: name, value }),
            Err(e) => res.errors.push(format_error(&opts.emit, &e)),
        }
    }
    res.emit(opts);
    res.errors.is_empty()
}

// The canonical names of the analog pins, in board order.
fn analog_pins(driver: &Driver) -> Result<Vec<String>> {
    Ok(driver
        .pin_map()?
        .with_capability(Capabilities::ANALOG)
        .map(|(_, def)| def.name().to_string())
        .collect())
}

#[derive(Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
struct CmdResult {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    samples: Vec<Sample>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    errors: Vec<String>,
}

impl CmdResult {
    fn emit(&self, opts: &Opts) {
        #[cfg(feature = "json")]
        if opts.emit.json {
            match serde_json::to_string(self) {
                Ok(s) => println!("{s}"),
                Err(e) => emit_error(&opts.emit, &e.into()),
            }
            return;
        }
        let samples: Vec<String> = self
            .samples
            .iter()
            .map(|s| {
                if opts.numeric {
                    s.value.to_string()
                } else {
                    format!("{}={}", common::format_name(&opts.emit, &s.id), s.value)
                }
            })
            .collect();
        if !samples.is_empty() {
            println!("{}", samples.join(" "));
        }
        for e in &self.errors {
            eprintln!("{e}");
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize))]
struct Sample {
    id: String,
    value: u32,
}
