// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Example of shifting 12-bit greyscale data into a TLC5940 LED driver,
// counting up in binary on all 16 channels.

use anyhow::Context;
use hwpin::{Driver, Mode, Paths, Pin, Value};

struct Tlc5940 {
    sin: Pin,
    sclk: Pin,
    xlat: Pin,
    gsclk: Pin,
    blank: Pin,
}

impl Tlc5940 {
    fn new(driver: &Driver) -> anyhow::Result<Tlc5940> {
        let tlc = Tlc5940 {
            sin: driver.pin("gpio83")?,
            sclk: driver.pin("gpio88")?,
            xlat: driver.pin("gpio87")?,
            gsclk: driver.pin("gpio116")?,
            blank: driver.pin("gpio115")?,
        };
        for pin in [tlc.sin, tlc.sclk, tlc.xlat, tlc.gsclk, tlc.blank] {
            driver
                .set_mode(pin, Mode::Output)
                .context("Failed to initialise pins")?;
        }
        driver.digital_write(tlc.sclk, Value::Low)?;
        driver.digital_write(tlc.xlat, Value::Low)?;
        driver.digital_write(tlc.gsclk, Value::Low)?;
        Ok(tlc)
    }

    fn pulse(driver: &Driver, pin: Pin) -> hwpin::Result<()> {
        driver.digital_write(pin, Value::High)?;
        driver.digital_write(pin, Value::Low)
    }

    // Shift the value, MSB first, into each of the 16 channels then latch.
    fn write_data(&self, driver: &Driver, val: u16) -> hwpin::Result<usize> {
        let mut bits = 0;
        for _ in 0..16 {
            for bit in (0..12).rev() {
                driver.digital_write(self.sin, Value::from(val & (1 << bit) != 0))?;
                Self::pulse(driver, self.sclk)?;
                bits += 1;
            }
        }
        Self::pulse(driver, self.xlat)?;
        Ok(bits)
    }

    // Run one greyscale cycle.
    fn cycle(&self, driver: &Driver) -> hwpin::Result<()> {
        Self::pulse(driver, self.blank)?;
        for _ in 0..4096 {
            Self::pulse(driver, self.gsclk)?;
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let mut driver = Driver::detect(Paths::default()).context("Failed to detect board")?;
    driver.initialize().context("Failed to initialize board")?;
    let tlc = Tlc5940::new(&driver)?;

    tlc.cycle(&driver)?;
    for val in 0..4096 {
        println!("writing data {}", val);
        let bits = tlc.write_data(&driver, val)?;
        println!("Wrote {} bits", bits);
        for _ in 0..10 {
            tlc.cycle(&driver)?;
        }
    }
    Ok(())
}
