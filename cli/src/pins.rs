// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::common::{self, emit_error, DriverOpts, EmitOpts};
use anyhow::Result;
use clap::Parser;
use hwpin::{Capabilities, Driver};
#[cfg(feature = "serde")]
use serde_derive::Serialize;

#[derive(Debug, Parser)]
#[command(aliases(["p", "ls"]))]
pub struct Opts {
    /// Only list pins with this capability
    ///
    /// One of gpio, analog, i2c, spi, serial or unassignable.
    #[arg(short, long, value_name = "capability", value_parser = parse_capability)]
    capability: Option<Capabilities>,

    #[command(flatten)]
    driver: DriverOpts,

    #[command(flatten)]
    emit: EmitOpts,
}

fn parse_capability(s: &str) -> std::result::Result<Capabilities, String> {
    Capabilities::from_tag(s).ok_or_else(|| format!("unknown capability '{s}'"))
}

pub fn cmd(opts: &Opts) -> bool {
    match common::open_driver(&opts.driver).and_then(|d| list(&d, opts)) {
        Ok(pins) => {
            emit(&pins, &opts.emit);
            true
        }
        Err(e) => {
            emit_error(&opts.emit, &e);
            false
        }
    }
}

fn list(d: &Driver, opts: &Opts) -> Result<Vec<PinInfo>> {
    let map = d.pin_map()?;
    let registry = d.registry()?;
    let caps = opts.capability.unwrap_or_default();
    Ok(map
        .with_capability(caps)
        .map(|(pin, def)| PinInfo {
            pin: pin.index(),
            names: def.names().to_vec(),
            capabilities: def.capabilities().tags(),
            owner: registry.owner_of(pin),
        })
        .collect())
}

fn emit(pins: &[PinInfo], opts: &EmitOpts) {
    #[cfg(feature = "json")]
    if opts.json {
        match serde_json::to_string(pins) {
            Ok(s) => println!("{s}"),
            Err(e) => emit_error(opts, &e.into()),
        }
        return;
    }
    for p in pins {
        let names: Vec<String> = p
            .names
            .iter()
            .map(|n| common::format_name(opts, n))
            .collect();
        let mut line = format!(
            "\tpin {:>3}:\t{}\t[{}]",
            p.pin,
            names.join(" "),
            p.capabilities.join(" ")
        );
        if let Some(owner) = &p.owner {
            line.push_str(&format!(" owner={owner}"));
        }
        println!("{line}");
    }
}

#[cfg_attr(feature = "serde", derive(Serialize))]
struct PinInfo {
    pin: u32,
    names: Vec<String>,
    capabilities: Vec<&'static str>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    owner: Option<String>,
}
