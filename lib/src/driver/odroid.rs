// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{Board, BusSpec};
use crate::cpuinfo::CpuInfo;
use crate::pin::{Capabilities, PinDefinition};
use crate::Paths;
use std::path::PathBuf;

/// The Hardkernel Odroid C1 and C2.
///
/// Both have a 40 pin J2 header, mostly compatible with the Raspberry Pi,
/// that differ in their GPIO numbering.  The header also provides two
/// 10-bit ADC inputs, at 1.8V, on pins 37 and 40.
///
/// Pins are named by header position, e.g. `J2.7`, with the functional
/// name, e.g. `gpio83`, as an alias.
#[derive(Clone, Copy, Debug, Default)]
pub struct OdroidC;

/// The revision of the Odroid C1.
pub const C1: u32 = 1;

/// The revision of the Odroid C2.
pub const C2: u32 = 2;

#[derive(Clone, Copy)]
enum Role {
    Reserved,
    Gpio(u32),
    Analog { gpio: u32, channel: u32 },
    I2c(u32),
    Spi,
    Serial,
}

use Role::*;

// The I2C buses, as numbered in the header tables.
const I2CA: u32 = 1;
const I2CB: u32 = 2;

const C1_HEADER: [(&str, Role); 40] = [
    ("3.3v-1", Reserved),
    ("5v-1", Reserved),
    ("sda1", I2c(I2CA)),
    ("5v-2", Reserved),
    ("scl1", I2c(I2CA)),
    ("ground-1", Reserved),
    ("gpio83", Gpio(83)),
    ("txd", Serial),
    ("ground-2", Reserved),
    ("rxd", Serial),
    ("gpio88", Gpio(88)),
    ("gpio87", Gpio(87)),
    ("gpio116", Gpio(116)),
    ("ground-3", Reserved),
    ("gpio115", Gpio(115)),
    ("gpio104", Gpio(104)),
    ("3.3v-2", Reserved),
    ("gpio102", Gpio(102)),
    ("mosi", Spi),
    ("ground-4", Reserved),
    ("miso", Spi),
    ("gpio103", Gpio(103)),
    ("sclk", Spi),
    ("ce0", Spi),
    ("ground-5", Reserved),
    ("gpio118", Gpio(118)),
    ("sda2", I2c(I2CB)),
    ("scl2", I2c(I2CB)),
    ("gpio101", Gpio(101)),
    ("ground-6", Reserved),
    ("gpio100", Gpio(100)),
    ("gpio99", Gpio(99)),
    ("gpio108", Gpio(108)),
    ("ground-7", Reserved),
    ("gpio97", Gpio(97)),
    ("gpio98", Gpio(98)),
    ("ain1", Analog { gpio: 26, channel: 1 }),
    ("1.8v", Reserved),
    ("ground-8", Reserved),
    ("ain0", Analog { gpio: 21, channel: 0 }),
];

const C2_HEADER: [(&str, Role); 40] = [
    ("3.3v-1", Reserved),
    ("5v-1", Reserved),
    ("sda1", I2c(I2CA)),
    ("5v-2", Reserved),
    ("scl1", I2c(I2CA)),
    ("ground-1", Reserved),
    ("gpio249", Gpio(249)),
    ("txd", Serial),
    ("ground-2", Reserved),
    ("rxd", Serial),
    ("gpio247", Gpio(247)),
    ("gpio238", Gpio(238)),
    ("gpio239", Gpio(239)),
    ("ground-3", Reserved),
    ("gpio237", Gpio(237)),
    ("gpio236", Gpio(236)),
    ("3.3v-2", Reserved),
    ("gpio233", Gpio(233)),
    ("gpio235", Gpio(235)),
    ("ground-4", Reserved),
    ("gpio232", Gpio(232)),
    ("gpio231", Gpio(231)),
    ("gpio230", Gpio(230)),
    ("gpio229", Gpio(229)),
    ("ground-5", Reserved),
    ("gpio225", Gpio(225)),
    ("sda2", I2c(I2CB)),
    ("scl2", I2c(I2CB)),
    ("gpio228", Gpio(228)),
    ("ground-6", Reserved),
    ("gpio219", Gpio(219)),
    ("gpio224", Gpio(224)),
    ("gpio234", Gpio(234)),
    ("ground-7", Reserved),
    ("gpio214", Gpio(214)),
    ("gpio218", Gpio(218)),
    ("ain1", Analog { gpio: 26, channel: 1 }),
    ("1.8v", Reserved),
    ("ground-8", Reserved),
    ("ain0", Analog { gpio: 21, channel: 0 }),
];

// Pin 0 is a spacer so pins match their header position.
fn header_definitions(header: &[(&str, Role)]) -> Vec<PinDefinition> {
    let mut defs = Vec::with_capacity(header.len() + 1);
    defs.push(PinDefinition::unassignable("dummy"));
    for (idx, (name, role)) in header.iter().enumerate() {
        let names = [format!("J2.{}", idx + 1), name.to_string()];
        let def = match *role {
            Reserved => PinDefinition::new(names, Capabilities::UNASSIGNABLE),
            Gpio(n) => PinDefinition::new(names, Capabilities::GPIO).with_gpio(n),
            Analog { gpio, channel } => PinDefinition::new(names, Capabilities::ANALOG)
                .with_gpio(gpio)
                .with_analog(channel),
            I2c(bus) => PinDefinition::new(names, Capabilities::I2C).with_bus(bus),
            Spi => PinDefinition::new(names, Capabilities::SPI),
            Serial => PinDefinition::new(names, Capabilities::SERIAL),
        };
        defs.push(def);
    }
    defs
}

impl Board for OdroidC {
    fn name(&self) -> &str {
        "odroid-c"
    }

    fn revision(&self, info: &CpuInfo) -> Option<u32> {
        match info.field("Hardware")? {
            "ODROIDC" => Some(C1),
            "ODROID-C2" => Some(C2),
            _ => None,
        }
    }

    fn pin_definitions(&self, revision: u32) -> Vec<PinDefinition> {
        match revision {
            C2 => header_definitions(&C2_HEADER),
            _ => header_definitions(&C1_HEADER),
        }
    }

    fn analog_path(&self, paths: &Paths, channel: u32) -> PathBuf {
        paths
            .sysfs
            .join(format!("class/saradc/saradc_ch{}", channel))
    }

    fn buses(&self, paths: &Paths, _revision: u32) -> Vec<BusSpec> {
        // the kernel numbers the buses from the order they are probed
        vec![
            BusSpec::new("i2ca", I2CA, paths.dev.join("i2c-1")),
            BusSpec::new("i2cb", I2CB, paths.dev.join("i2c-2")),
        ]
    }

    fn aliases(&self) -> Vec<(&str, &str)> {
        vec![("i2c", "i2ca")]
    }
}
