// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::common::{self, emit_error, format_error, DriverOpts, EmitOpts};
use anyhow::Context;
use clap::Parser;
use hwpin::{Mode, Pin, Value};
#[cfg(feature = "serde")]
use serde_derive::Serialize;
use std::thread;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(alias("g"))]
pub struct Opts {
    /// The pins to get
    ///
    /// The pins are identified by any of their names, ignoring case.
    /// e.g. the following all select the same pin on an ODROID-C2:
    ///     J2.7
    ///     gpio249
    #[arg(value_name = "pin", required = true, verbatim_doc_comment)]
    pins: Vec<String>,

    /// Wait between opening the pins and reading the values
    ///
    /// The period is taken as milliseconds unless otherwise specified.
    #[arg(short = 'p', long, value_name = "period", value_parser = common::parse_duration)]
    hold_period: Option<Duration>,

    /// Display pin values as '0' (low) or '1' (high)
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
    let mut res = CmdResult::default();
    let mut opened: Vec<(&str, Pin)> = Vec::new();
    for name in &opts.pins {
        if opened.iter().any(|(n, _)| *n == name.as_str()) {
            continue;
        }
        let pin = driver
            .pin(name)
            .and_then(|pin| driver.set_mode(pin, Mode::Input).map(|_| pin))
            .with_context(|| format!("unable to open pin '{name}' as an input"));
        match pin {
            Ok(pin) => opened.push((name.as_str(), pin)),
            Err(e) => res.push_error(&opts.emit, &e),
        }
    }
    if let Some(period) = opts.hold_period {
        thread::sleep(period);
    }
    for (name, pin) in opened {
        match driver
            .digital_read(pin)
            .with_context(|| format!("unable to read pin '{name}'"))
        {
            Ok(value) => res.values.push(PinValue {
                id: name.to_string(),
                value,
            }),
            Err(e) => res.push_error(&opts.emit, &e),
        }
    }
    res.emit(opts);
    res.errors.is_empty()
}

#[derive(Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
struct CmdResult {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    values: Vec<PinValue>,
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
        self.print(opts);
    }

    fn push_error(&mut self, opts: &EmitOpts, e: &anyhow::Error) {
        self.errors.push(format_error(opts, e))
    }

    fn print(&self, opts: &Opts) {
        let print_values: Vec<String> = self
            .values
            .iter()
            .map(|pv| {
                if opts.numeric {
                    let v: u8 = pv.value.into();
                    format!("{v}")
                } else {
                    format!("{}={}", common::format_name(&opts.emit, &pv.id), pv.value)
                }
            })
            .collect();
        if !print_values.is_empty() {
            println!("{}", print_values.join(" "));
        }
        for e in &self.errors {
            eprintln!("{e}");
        }
    }
}

struct PinValue {
    id: String,
    value: Value,
}

#[cfg(feature = "serde")]
impl serde::Serialize for PinValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut s = serializer.serialize_map(Some(1))?;
        s.serialize_entry(&self.id, &self.value)?;
        s.end()
    }
}
