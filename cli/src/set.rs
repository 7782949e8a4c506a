// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::common::{self, emit_error, DriverOpts, EmitOpts};
use anyhow::{Context, Result};
use clap::Parser;
use hwpin::{Driver, Mode, Value};
use std::thread;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(alias("s"))]
pub struct Opts {
    /// The pin values
    ///
    /// The values are specified in name=value format.
    ///
    /// Values may be low/off/false/0 or high/on/true/1.
    /// e.g.
    ///     J2.7=on gpio247=low
    #[arg(
        value_name = "pin=value",
        required = true,
        value_parser = parse_pin_value,
        verbatim_doc_comment
    )]
    pin_values: Vec<(String, PinValue)>,

    /// The minimum time period to hold pins at the requested values
    ///
    /// The pins are released when the command exits.
    ///
    /// The period is taken as milliseconds unless otherwise specified.
    #[arg(short = 'p', long, value_name = "period", value_parser = common::parse_duration)]
    hold_period: Option<Duration>,

    #[command(flatten)]
    driver: DriverOpts,

    #[command(flatten)]
    emit: EmitOpts,
}

pub fn cmd(opts: &Opts) -> bool {
    let mut driver = match common::open_driver(&opts.driver) {
        Ok(d) => d,
        Err(e) => {
            emit_error(&opts.emit, &e);
            return false;
        }
    };
    let mut success = true;
    for (name, value) in &opts.pin_values {
        if let Err(e) = set_pin(&driver, name, value.0) {
            emit_error(&opts.emit, &e);
            success = false;
        }
    }
    if success {
        if let Some(period) = opts.hold_period {
            debug!(?period, "holding");
            thread::sleep(period);
        }
    }
    if let Err(e) = driver.close().context("unable to release pins") {
        emit_error(&opts.emit, &e);
        success = false;
    }
    success
}

fn set_pin(driver: &Driver, name: &str, value: Value) -> Result<()> {
    let pin = driver
        .pin(name)
        .with_context(|| format!("unable to find pin '{name}'"))?;
    driver
        .set_mode(pin, Mode::Output)
        .with_context(|| format!("unable to open pin '{name}' as an output"))?;
    driver
        .digital_write(pin, value)
        .with_context(|| format!("unable to set pin '{name}' {value}"))
}

fn parse_pin_value(s: &str) -> std::result::Result<(String, PinValue), InvalidPinValue> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| InvalidPinValue::NoValue(s.into()))?;
    Ok((name.into(), value.parse()?))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct PinValue(Value);

impl std::str::FromStr for PinValue {
    type Err = InvalidPinValue;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let v = match s.to_lowercase().as_str() {
            "0" | "low" | "off" | "false" => Value::Low,
            "1" | "high" | "on" | "true" => Value::High,
            _ => return Err(InvalidPinValue::Value(s.into())),
        };
        Ok(PinValue(v))
    }
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
enum InvalidPinValue {
    #[error("invalid pin=value: no '=' found in '{0}'")]
    NoValue(String),
    #[error("invalid pin value: '{0}'")]
    Value(String),
}
