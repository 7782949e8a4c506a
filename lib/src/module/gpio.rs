// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{check_configurable, check_configured, pin_io, Kind, Module, State};
use crate::pin::{Mode, Pin, Value};
use crate::registry::Registry;
use crate::{sysfs, Error, Operation, Result};
use nohash_hasher::IntMap;
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// The configuration for a [`GpioModule`].
///
/// # Examples
/// ```
///    use hwpin::module::GpioConfig;
///    use hwpin::Pin;
///
///    let mut cfg = GpioConfig::default();
///    cfg.with_pin(Pin::new(7), 83)
///        .with_pin(Pin::new(10), 88)
///        .with_class_dir("/tmp/sys/class/gpio");
///    assert_eq!(cfg.logical(Pin::new(10)), Some(88));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GpioConfig {
    /// The kernel GPIO number of each pin.
    pins: IntMap<Pin, u32>,

    /// The sysfs GPIO class directory.
    class_dir: PathBuf,
}

impl Default for GpioConfig {
    fn default() -> Self {
        GpioConfig {
            pins: IntMap::default(),
            class_dir: "/sys/class/gpio".into(),
        }
    }
}

impl GpioConfig {
    /// Add a pin, and its kernel GPIO number, to the set to be served.
    ///
    /// Adding a pin already in the set replaces its GPIO number.
    pub fn with_pin(&mut self, pin: Pin, logical: u32) -> &mut Self {
        self.pins.insert(pin, logical);
        self
    }

    /// Set the sysfs GPIO class directory.
    pub fn with_class_dir<P: Into<PathBuf>>(&mut self, dir: P) -> &mut Self {
        self.class_dir = dir.into();
        self
    }

    /// The kernel GPIO number of the pin, if configured.
    pub fn logical(&self, pin: Pin) -> Option<u32> {
        self.pins.get(&pin).copied()
    }

    /// The configured pins, in ascending order.
    pub fn pins(&self) -> Vec<Pin> {
        let mut pins: Vec<Pin> = self.pins.keys().copied().collect();
        pins.sort_unstable();
        pins
    }

    /// The sysfs GPIO class directory.
    pub fn class_dir(&self) -> &Path {
        &self.class_dir
    }
}

/// A module providing digital input and output on individual pins.
///
/// Pins are claimed and exported when first given a mode, and released
/// when closed.  The value file of each open pin is held open and
/// rewound for each access.
#[derive(Debug)]
pub struct GpioModule {
    name: String,
    registry: Arc<Registry>,
    state: State,
    cfg: GpioConfig,
    open: Mutex<IntMap<Pin, OpenPin>>,
}

#[derive(Debug)]
struct OpenPin {
    logical: u32,
    mode: Mode,
    file: File,
}

impl GpioModule {
    /// Create an unconfigured module that claims pins from the registry.
    pub fn new<N: Into<String>>(name: N, registry: Arc<Registry>) -> GpioModule {
        GpioModule {
            name: name.into(),
            registry,
            state: State::Unconfigured,
            cfg: GpioConfig::default(),
            open: Mutex::default(),
        }
    }

    /// Set the pins the module serves.
    pub fn configure(&mut self, cfg: &GpioConfig) -> Result<()> {
        check_configurable(&self.name, self.state, cfg.pins.len())?;
        self.cfg = cfg.clone();
        self.state = State::Configured;
        Ok(())
    }

    /// The current configuration.
    pub fn config(&self) -> &GpioConfig {
        &self.cfg
    }

    /// Open the pin in the given mode.
    ///
    /// Setting the mode the pin is already open in has no effect.
    /// Changing the mode closes the pin and reopens it in the new mode.
    pub fn set_mode(&self, pin: Pin, mode: Mode) -> Result<()> {
        let logical = self.logical(pin)?;
        if self.state != State::Enabled {
            return Err(Error::NotEnabled(self.name.clone()));
        }
        let mut open = self.lock();
        if let Some(op) = open.get(&pin) {
            if op.mode == mode {
                return Ok(());
            }
            self.close_locked(&mut open, pin)?;
        }
        self.registry.assign(pin, &self.name)?;
        match self.open_pin(pin, logical, mode) {
            Ok(op) => {
                open.insert(pin, op);
                Ok(())
            }
            Err(e) => {
                let _ = self.registry.unassign(pin);
                Err(e)
            }
        }
    }

    /// The mode the pin is open in, if it is open.
    pub fn mode(&self, pin: Pin) -> Option<Mode> {
        self.lock().get(&pin).map(|op| op.mode)
    }

    /// Drive an output pin to the given level.
    pub fn write(&self, pin: Pin, value: Value) -> Result<()> {
        self.logical(pin)?;
        let mut open = self.lock();
        let op = open.get_mut(&pin).ok_or(Error::NotOpen {
            pin,
            op: Operation::Write,
        })?;
        if op.mode != Mode::Output {
            return Err(Error::WrongMode {
                pin,
                mode: op.mode,
                op: Operation::Write,
            });
        }
        op.file
            .seek(SeekFrom::Start(0))
            .map_err(|e| pin_io(pin, Operation::Seek, e))?;
        op.file
            .write_all(sysfs::value_token(value))
            .map_err(|e| pin_io(pin, Operation::Write, e))
    }

    /// Read the level of an open pin.
    ///
    /// For outputs this is the level being driven.
    pub fn read(&self, pin: Pin) -> Result<Value> {
        self.logical(pin)?;
        let open = self.lock();
        let op = open.get(&pin).ok_or(Error::NotOpen {
            pin,
            op: Operation::Read,
        })?;
        sysfs::read_value(&op.file).map_err(|e| pin_io(pin, Operation::Read, e))
    }

    /// Unexport the pin and release it.
    ///
    /// If the pin cannot be unexported it remains open.
    pub fn close(&self, pin: Pin) -> Result<()> {
        self.logical(pin)?;
        let mut open = self.lock();
        self.close_locked(&mut open, pin)
    }

    fn close_locked(&self, open: &mut IntMap<Pin, OpenPin>, pin: Pin) -> Result<()> {
        let logical = match open.get(&pin) {
            Some(op) => op.logical,
            None => {
                return Err(Error::NotOpen {
                    pin,
                    op: Operation::Close,
                })
            }
        };
        sysfs::unexport(&self.cfg.class_dir, logical)
            .map_err(|e| pin_io(pin, Operation::Unexport, e))?;
        debug!(%pin, gpio = logical, "unexported");
        open.remove(&pin);
        self.registry.unassign(pin)
    }

    fn open_pin(&self, pin: Pin, logical: u32, mode: Mode) -> Result<OpenPin> {
        let class = &self.cfg.class_dir;
        let exported =
            sysfs::export(class, logical).map_err(|e| pin_io(pin, Operation::Export, e))?;
        if exported {
            debug!(%pin, gpio = logical, "exported");
        }
        let dir = sysfs::gpio_dir(class, logical);
        let res = sysfs::set_direction(&dir, mode)
            .map_err(|e| pin_io(pin, Operation::SetDirection, e))
            .and_then(|_| {
                sysfs::open_value(&dir, mode).map_err(|e| pin_io(pin, Operation::Open, e))
            });
        match res {
            Ok(file) => Ok(OpenPin {
                logical,
                mode,
                file,
            }),
            Err(e) => {
                if exported {
                    if let Err(ue) = sysfs::unexport(class, logical) {
                        warn!(%pin, gpio = logical, error = %ue, "unexport after failed open failed");
                    } else {
                        debug!(%pin, gpio = logical, "unexported");
                    }
                }
                Err(e)
            }
        }
    }

    fn logical(&self, pin: Pin) -> Result<u32> {
        self.cfg.logical(pin).ok_or_else(|| Error::UnknownPin {
            module: self.name.clone(),
            pin,
        })
    }

    fn lock(&self) -> MutexGuard<'_, IntMap<Pin, OpenPin>> {
        self.open.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Module for GpioModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> Kind {
        Kind::Digital
    }

    fn state(&self) -> State {
        self.state
    }

    fn pins(&self) -> Vec<Pin> {
        self.cfg.pins()
    }

    fn enable(&mut self) -> Result<()> {
        check_configured(&self.name, self.state)?;
        self.state = State::Enabled;
        Ok(())
    }

    fn disable(&mut self) -> Result<()> {
        if self.state != State::Enabled {
            return Ok(());
        }
        let mut open: Vec<(Pin, OpenPin)> = self.lock().drain().collect();
        open.sort_unstable_by_key(|(pin, _)| *pin);
        let mut first = None;
        for (pin, op) in open {
            match sysfs::unexport(&self.cfg.class_dir, op.logical) {
                Ok(()) => debug!(%pin, gpio = op.logical, "unexported"),
                Err(e) => {
                    warn!(%pin, gpio = op.logical, error = %e, "unexport failed");
                    first.get_or_insert(pin_io(pin, Operation::Unexport, e));
                }
            }
            drop(op.file);
            if let Err(e) = self.registry.unassign(pin) {
                warn!(%pin, error = %e, "release failed");
                first.get_or_insert(e);
            }
        }
        self.state = State::Disabled;
        first.map_or(Ok(()), Err)
    }
}
