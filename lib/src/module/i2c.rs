// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{check_configurable, check_configured, config_error, Kind, Module, State};
use crate::pin::Pin;
use crate::registry::Registry;
use crate::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// The configuration for an [`I2cModule`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct I2cConfig {
    /// The pins occupied by the bus.
    pins: Vec<Pin>,

    /// The device node used to access the bus.
    device: Option<PathBuf>,
}

impl I2cConfig {
    /// Add a pin to the set occupied by the bus.
    pub fn with_pin(&mut self, pin: Pin) -> &mut Self {
        if !self.pins.contains(&pin) {
            self.pins.push(pin);
        }
        self
    }

    /// Add a set of pins to the set occupied by the bus.
    pub fn with_pins(&mut self, pins: &[Pin]) -> &mut Self {
        for pin in pins {
            self.with_pin(*pin);
        }
        self
    }

    /// Set the device node used to access the bus.
    pub fn with_device<P: Into<PathBuf>>(&mut self, device: P) -> &mut Self {
        self.device = Some(device.into());
        self
    }

    /// The device node used to access the bus.
    pub fn device(&self) -> Option<&Path> {
        self.device.as_deref()
    }
}

/// A module reserving the pins of an I2C bus.
///
/// The bus itself is accessed through its device node, which the module
/// only reports. The pins are claimed for as long as the module is enabled
/// so they cannot be driven as GPIOs.
#[derive(Debug)]
pub struct I2cModule {
    name: String,
    registry: Arc<Registry>,
    state: State,
    cfg: I2cConfig,
    claimed: Vec<Pin>,
}

impl I2cModule {
    /// Create an unconfigured module that claims pins from the registry.
    pub fn new<N: Into<String>>(name: N, registry: Arc<Registry>) -> I2cModule {
        I2cModule {
            name: name.into(),
            registry,
            state: State::Unconfigured,
            cfg: I2cConfig::default(),
            claimed: Vec::new(),
        }
    }

    /// Set the pins and device node of the bus.
    pub fn configure(&mut self, cfg: &I2cConfig) -> Result<()> {
        check_configurable(&self.name, self.state, cfg.pins.len())?;
        if cfg.device.is_none() {
            return Err(config_error(&self.name, "has no device"));
        }
        self.cfg = cfg.clone();
        self.state = State::Configured;
        Ok(())
    }

    /// The device node used to access the bus.
    pub fn device(&self) -> Option<&Path> {
        self.cfg.device()
    }

    fn release_all(&mut self) -> Result<()> {
        let mut first = None;
        for pin in self.claimed.drain(..) {
            if let Err(e) = self.registry.unassign(pin) {
                warn!(%pin, error = %e, "release failed");
                first.get_or_insert(e);
            }
        }
        first.map_or(Ok(()), Err)
    }
}

impl Module for I2cModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> Kind {
        Kind::Bus
    }

    fn state(&self) -> State {
        self.state
    }

    fn pins(&self) -> Vec<Pin> {
        let mut pins = self.cfg.pins.clone();
        pins.sort_unstable();
        pins
    }

    fn enable(&mut self) -> Result<()> {
        check_configured(&self.name, self.state)?;
        if self.state == State::Enabled {
            return Ok(());
        }
        for pin in self.pins() {
            if let Err(e) = self.registry.assign(pin, &self.name) {
                let _ = self.release_all();
                return Err(e);
            }
            self.claimed.push(pin);
        }
        self.state = State::Enabled;
        Ok(())
    }

    fn disable(&mut self) -> Result<()> {
        if self.state != State::Enabled {
            return Ok(());
        }
        self.state = State::Disabled;
        self.release_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn config() -> I2cConfig {
        let mut cfg = I2cConfig::default();
        cfg.with_pins(&[Pin::new(5), Pin::new(3)])
            .with_device("/dev/i2c-1");
        cfg
    }

    #[test]
    fn configure() {
        let mut m = I2cModule::new("i2ca", Arc::new(Registry::default()));
        assert_eq!(m.device(), None);
        m.configure(&config()).unwrap();
        assert_eq!(m.state(), State::Configured);
        assert_eq!(m.pins(), [Pin::new(3), Pin::new(5)]);
        assert_eq!(m.device(), Some(Path::new("/dev/i2c-1")));
    }

    #[test]
    fn configure_incomplete() {
        let mut m = I2cModule::new("i2ca", Arc::new(Registry::default()));
        assert!(matches!(
            m.configure(I2cConfig::default().with_device("/dev/i2c-1")),
            Err(Error::Configuration { reason, .. }) if reason == "has no pins"
        ));
        assert!(matches!(
            m.configure(I2cConfig::default().with_pin(Pin::new(3))),
            Err(Error::Configuration { reason, .. }) if reason == "has no device"
        ));
        assert_eq!(m.state(), State::Unconfigured);
    }

    #[test]
    fn enable_claims_pins() {
        let r = Arc::new(Registry::default());
        let mut m = I2cModule::new("i2ca", r.clone());
        m.configure(&config()).unwrap();
        m.enable().unwrap();
        assert_eq!(r.owner_of(Pin::new(3)).as_deref(), Some("i2ca"));
        assert_eq!(r.owner_of(Pin::new(5)).as_deref(), Some("i2ca"));
        m.enable().unwrap();

        m.disable().unwrap();
        assert!(r.is_empty());
        m.disable().unwrap();
        assert_eq!(m.state(), State::Disabled);

        m.enable().unwrap();
        assert_eq!(r.assigned().len(), 2);
    }

    #[test]
    fn enable_contended() {
        let r = Arc::new(Registry::default());
        r.assign(Pin::new(5), "gpio").unwrap();
        let mut m = I2cModule::new("i2ca", r.clone());
        m.configure(&config()).unwrap();
        assert!(matches!(
            m.enable(),
            Err(Error::Ownership { pin, owner }) if pin == Pin::new(5) && owner == "gpio"
        ));
        // pin 3 was claimed then released
        assert_eq!(r.owner_of(Pin::new(3)), None);
        assert_eq!(r.assigned(), vec![(Pin::new(5), "gpio".to_string())]);
        assert_eq!(m.state(), State::Configured);
    }
}
