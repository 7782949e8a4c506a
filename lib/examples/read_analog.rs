// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Basic example of sampling the analog inputs.

use anyhow::Context;
use hwpin::{Capabilities, Driver, Paths};
use std::thread;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let mut driver = Driver::detect(Paths::default()).context("Failed to detect board")?;
    driver.initialize().context("Failed to initialize board")?;

    let pins: Vec<_> = driver
        .pin_map()?
        .with_capability(Capabilities::ANALOG)
        .map(|(pin, def)| (pin, def.name().to_string()))
        .collect();

    for _ in 0..10 {
        for (pin, name) in &pins {
            let sample = driver
                .analog_read(*pin)
                .with_context(|| format!("Failed to read {}", name))?;
            print!("{}={} ", name, sample);
        }
        println!();
        thread::sleep(Duration::from_millis(200));
    }
    Ok(())
}
