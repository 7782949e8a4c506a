// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(dead_code)]

use hwpin::driver::{Board, BusSpec};
use hwpin::module::{GpioConfig, GpioModule, Module};
use hwpin::{Capabilities, CpuInfo, Driver, Paths, Pin, PinDefinition, Registry};
use pinsim::Sim;
use std::path::PathBuf;
use std::sync::Arc;

pub const CPUINFO: &str = "\
processor\t: 0
model name\t: Test Core

processor\t: 1
model name\t: Test Core

Hardware\t: TESTBOARD
Revision\t: 0001
";

// Pins of the test board.
pub const P1: Pin = Pin::new(0);
pub const P2: Pin = Pin::new(1);
pub const P3: Pin = Pin::new(2);
pub const GND: Pin = Pin::new(3);
pub const AIN0: Pin = Pin::new(4);
pub const AIN1: Pin = Pin::new(5);
pub const SDA: Pin = Pin::new(6);
pub const SCL: Pin = Pin::new(7);

/// A small board with three GPIOs, two ADC channels and an I2C bus.
#[derive(Debug)]
pub struct TestBoard;

impl Board for TestBoard {
    fn name(&self) -> &str {
        "testboard"
    }

    fn revision(&self, info: &CpuInfo) -> Option<u32> {
        match info.field("Hardware")? {
            "TESTBOARD" => Some(1),
            _ => None,
        }
    }

    fn pin_definitions(&self, _revision: u32) -> Vec<PinDefinition> {
        vec![
            PinDefinition::new(["P1", "gpio1"], Capabilities::GPIO).with_gpio(1),
            PinDefinition::new(["P2", "gpio2"], Capabilities::GPIO).with_gpio(2),
            PinDefinition::new(["P3", "gpio3"], Capabilities::GPIO).with_gpio(3),
            PinDefinition::unassignable("gnd"),
            PinDefinition::new(["P11", "ain0"], Capabilities::ANALOG).with_analog(0),
            PinDefinition::new(["P12", "ain1"], Capabilities::ANALOG).with_analog(1),
            PinDefinition::new(["P13", "sda"], Capabilities::I2C).with_bus(0),
            PinDefinition::new(["P14", "scl"], Capabilities::I2C).with_bus(0),
        ]
    }

    fn analog_path(&self, paths: &Paths, channel: u32) -> PathBuf {
        paths.sysfs.join(format!("class/test-adc/ch{}", channel))
    }

    fn buses(&self, paths: &Paths, _revision: u32) -> Vec<BusSpec> {
        vec![BusSpec::new("i2c0", 0, paths.dev.join("i2c-0"))]
    }

    fn aliases(&self) -> Vec<(&str, &str)> {
        vec![("i2c", "i2c0")]
    }
}

/// The test board with GPIOs 1 and 2 present and both ADC channels.
pub fn builder() -> pinsim::Builder {
    let mut b = pinsim::builder();
    b.with_gpios(&[1, 2])
        .with_attr("sys/class/test-adc/ch0", "1\n")
        .with_attr("sys/class/test-adc/ch1", "1000\n")
        .with_cpuinfo(CPUINFO)
        .with_device("i2c-0");
    b
}

pub fn sim() -> Sim {
    builder().live().unwrap()
}

/// An initialized driver for the test board in the sim.
pub fn driver(s: &Sim) -> Driver {
    let mut d = Driver::new(TestBoard, Paths::with_root(s.root()));
    d.initialize().unwrap();
    d
}

/// An enabled digital module serving P1 to P3 in the sim.
pub fn gpio_module(s: &Sim, registry: Arc<Registry>) -> GpioModule {
    let mut m = GpioModule::new("gpio", registry);
    m.configure(
        GpioConfig::default()
            .with_pin(P1, 1)
            .with_pin(P2, 2)
            .with_pin(P3, 3)
            .with_class_dir(s.class_dir()),
    )
    .unwrap();
    m.enable().unwrap();
    m
}

/// Make writes to the unexport file fail.
pub fn break_unexport(s: &Sim) {
    let path = s.class_dir().join("unexport");
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();
}
