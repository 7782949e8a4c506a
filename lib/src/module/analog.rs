// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{check_configurable, check_configured, pin_io, Kind, Module, State};
use crate::pin::Pin;
use crate::registry::Registry;
use crate::{sysfs, Error, Operation, Result};
use nohash_hasher::IntMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// The configuration for an [`AnalogModule`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AnalogConfig {
    /// The ADC channel and sample file of each pin.
    pins: IntMap<Pin, Channel>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Channel {
    channel: u32,
    path: PathBuf,
}

impl AnalogConfig {
    /// Add a pin, with its ADC channel and the file its samples are read
    /// from, to the set to be served.
    pub fn with_pin<P: Into<PathBuf>>(&mut self, pin: Pin, channel: u32, path: P) -> &mut Self {
        self.pins.insert(
            pin,
            Channel {
                channel,
                path: path.into(),
            },
        );
        self
    }

    /// The ADC channel of the pin, if configured.
    pub fn channel(&self, pin: Pin) -> Option<u32> {
        self.pins.get(&pin).map(|c| c.channel)
    }

    /// The sample file of the pin, if configured.
    pub fn path(&self, pin: Pin) -> Option<&Path> {
        self.pins.get(&pin).map(|c| c.path.as_path())
    }

    /// The configured pins, in ascending order.
    pub fn pins(&self) -> Vec<Pin> {
        let mut pins: Vec<Pin> = self.pins.keys().copied().collect();
        pins.sort_unstable();
        pins
    }
}

/// A module sampling analog inputs.
///
/// All the configured pins are claimed and their sample files opened when
/// the module is enabled.
#[derive(Debug)]
pub struct AnalogModule {
    name: String,
    registry: Arc<Registry>,
    state: State,
    cfg: AnalogConfig,
    // Only changed by enable and disable, so &mut self serializes access.
    open: IntMap<Pin, File>,
}

impl AnalogModule {
    /// Create an unconfigured module that claims pins from the registry.
    pub fn new<N: Into<String>>(name: N, registry: Arc<Registry>) -> AnalogModule {
        AnalogModule {
            name: name.into(),
            registry,
            state: State::Unconfigured,
            cfg: AnalogConfig::default(),
            open: IntMap::default(),
        }
    }

    /// Set the pins the module serves.
    pub fn configure(&mut self, cfg: &AnalogConfig) -> Result<()> {
        check_configurable(&self.name, self.state, cfg.pins.len())?;
        self.cfg = cfg.clone();
        self.state = State::Configured;
        Ok(())
    }

    /// The current configuration.
    pub fn config(&self) -> &AnalogConfig {
        &self.cfg
    }

    /// Read the current sample from the pin.
    pub fn read(&self, pin: Pin) -> Result<u32> {
        if !self.cfg.pins.contains_key(&pin) {
            return Err(Error::UnknownPin {
                module: self.name.clone(),
                pin,
            });
        }
        let file = self.open.get(&pin).ok_or(Error::NotOpen {
            pin,
            op: Operation::AnalogRead,
        })?;
        let buf = sysfs::read_sample(file).map_err(|e| pin_io(pin, Operation::AnalogRead, e))?;
        sysfs::parse_sample(&buf).ok_or_else(|| Error::Parse {
            pin,
            text: String::from_utf8_lossy(&buf).into_owned(),
        })
    }

    fn open_all(&mut self) -> Result<()> {
        for pin in self.cfg.pins() {
            self.registry.assign(pin, &self.name)?;
            let path = &self.cfg.pins[&pin].path;
            match sysfs::open_sample(path) {
                Ok(f) => {
                    debug!(%pin, path = %path.display(), "opened");
                    self.open.insert(pin, f);
                }
                Err(e) => {
                    let _ = self.registry.unassign(pin);
                    return Err(pin_io(pin, Operation::Open, e));
                }
            }
        }
        Ok(())
    }

    fn close_all(&mut self) -> Result<()> {
        let mut first = None;
        for (pin, file) in self.open.drain() {
            drop(file);
            if let Err(e) = self.registry.unassign(pin) {
                warn!(%pin, error = %e, "release failed");
                first.get_or_insert(e);
            }
        }
        first.map_or(Ok(()), Err)
    }
}

impl Module for AnalogModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> Kind {
        Kind::Analog
    }

    fn state(&self) -> State {
        self.state
    }

    fn pins(&self) -> Vec<Pin> {
        self.cfg.pins()
    }

    fn enable(&mut self) -> Result<()> {
        check_configured(&self.name, self.state)?;
        if self.state == State::Enabled {
            return Ok(());
        }
        if let Err(e) = self.open_all() {
            let _ = self.close_all();
            return Err(e);
        }
        self.state = State::Enabled;
        Ok(())
    }

    fn disable(&mut self) -> Result<()> {
        if self.state != State::Enabled {
            return Ok(());
        }
        self.state = State::Disabled;
        self.close_all()
    }
}
