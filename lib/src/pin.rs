// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod map;
pub use self::map::PinMap;

mod value;
pub use self::value::{Mode, Value};

use bitflags::bitflags;
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// The identifier of a physical pin position on a board.
///
/// Pins are assigned when the [`PinMap`] is constructed, and are the index
/// of the pin definition in the board table, so they are stable for the
/// lifetime of the driver that created them.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pin(u32);

impl Pin {
    /// Construct a pin from its index in the board table.
    pub const fn new(index: u32) -> Pin {
        Pin(index)
    }

    /// The index of the pin in the board table.
    #[inline]
    pub const fn index(&self) -> u32 {
        self.0
    }
}

impl nohash_hasher::IsEnabled for Pin {}

impl From<u32> for Pin {
    fn from(index: u32) -> Self {
        Pin(index)
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

bitflags! {
    /// The capabilities of a pin, i.e. the kinds of module that may serve it.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Capabilities: u8 {
        /// The pin can be used for digital input and output.
        const GPIO = 0x01;
        /// The pin is an analog input.
        const ANALOG = 0x02;
        /// The pin belongs to an I2C bus.
        const I2C = 0x04;
        /// The pin belongs to an SPI bus.
        const SPI = 0x08;
        /// The pin belongs to a serial port.
        const SERIAL = 0x10;
        /// The pin is power, ground or otherwise reserved.
        const UNASSIGNABLE = 0x20;
    }
}

const TAGS: [(Capabilities, &str); 6] = [
    (Capabilities::GPIO, "gpio"),
    (Capabilities::ANALOG, "analog"),
    (Capabilities::I2C, "i2c"),
    (Capabilities::SPI, "spi"),
    (Capabilities::SERIAL, "serial"),
    (Capabilities::UNASSIGNABLE, "unassignable"),
];

impl Capabilities {
    /// The capability corresponding to a tag name, ignoring case.
    pub fn from_tag(tag: &str) -> Option<Capabilities> {
        TAGS.iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(tag))
            .map(|(c, _)| *c)
    }

    /// The tag names of the capabilities in the set.
    pub fn tags(&self) -> Vec<&'static str> {
        TAGS.iter()
            .filter(|(c, _)| self.contains(*c))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tags().join(","))
    }
}

/// The immutable description of one pin on a board.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinDefinition {
    /// The names of the pin, the first being the canonical name.
    names: Vec<String>,

    /// What the pin may be used for.
    capabilities: Capabilities,

    /// The kernel GPIO number, for GPIO pins.
    gpio: Option<u32>,

    /// The ADC channel, for analog pins.
    analog: Option<u32>,

    /// The bus number, for pins belonging to a bus.
    bus: Option<u32>,
}

impl PinDefinition {
    /// Basic constructor.
    pub fn new<I, N>(names: I, capabilities: Capabilities) -> PinDefinition
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        PinDefinition {
            names: names.into_iter().map(Into::into).collect(),
            capabilities,
            ..Default::default()
        }
    }

    /// A power, ground or reserved pin.
    pub fn unassignable<N: Into<String>>(name: N) -> PinDefinition {
        PinDefinition::new([name], Capabilities::UNASSIGNABLE)
    }

    /// Set the kernel GPIO number of the pin.
    pub fn with_gpio(mut self, logical: u32) -> Self {
        self.gpio = Some(logical);
        self
    }

    /// Set the ADC channel of the pin.
    pub fn with_analog(mut self, channel: u32) -> Self {
        self.analog = Some(channel);
        self
    }

    /// Set the number of the bus the pin belongs to.
    pub fn with_bus(mut self, bus: u32) -> Self {
        self.bus = Some(bus);
        self
    }

    /// The canonical name of the pin.
    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    /// All the names of the pin.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// What the pin may be used for.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Return true if the pin has all the capabilities in `caps`.
    pub fn supports(&self, caps: Capabilities) -> bool {
        self.capabilities.contains(caps)
    }

    /// Return true if the pin may be claimed by a module.
    pub fn is_assignable(&self) -> bool {
        !self.capabilities.contains(Capabilities::UNASSIGNABLE)
    }

    /// The kernel GPIO number, for GPIO pins.
    pub fn gpio(&self) -> Option<u32> {
        self.gpio
    }

    /// The ADC channel, for analog pins.
    pub fn analog(&self) -> Option<u32> {
        self.analog
    }

    /// The bus number, for pins belonging to a bus.
    pub fn bus(&self) -> Option<u32> {
        self.bus
    }
}
