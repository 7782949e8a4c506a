// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Basic example of toggling a single pin.

use anyhow::Context;
use hwpin::{Driver, Mode, Paths, Value};
use std::thread;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let mut driver = Driver::detect(Paths::default()).context("Failed to detect board")?;
    driver.initialize().context("Failed to initialize board")?;

    let pin = driver.pin("J2.7")?;
    let mut value = Value::High;
    driver
        .set_mode(pin, Mode::Output)
        .context("Failed to set pin mode")?;

    loop {
        println!("{}={}", pin, value);
        driver
            .digital_write(pin, value)
            .context("Failed to set value")?;
        thread::sleep(Duration::from_millis(500));
        value = value.not();
    }
}
