// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The Hardkernel Odroid C series.
pub mod odroid;
pub use odroid::OdroidC;

use crate::cpuinfo::CpuInfo;
use crate::module::{
    AnalogConfig, AnalogModule, AnyModule, GpioConfig, GpioModule, I2cConfig, I2cModule, Module,
};
use crate::pin::{Capabilities, Mode, Pin, PinDefinition, PinMap, Value};
use crate::registry::Registry;
use crate::{Error, Operation, Paths, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The description of a board.
///
/// A board provides the tables and wiring the [`Driver`] uses to bring it up.
pub trait Board: fmt::Debug + Send + Sync {
    /// The name of the board.
    fn name(&self) -> &str;

    /// Identify the revision of the board from the processor information.
    ///
    /// Returns None if the hardware is not this board.
    fn revision(&self, info: &CpuInfo) -> Option<u32>;

    /// The pin table for a revision of the board.
    ///
    /// The [`Pin`] of each definition is its position in the table.
    fn pin_definitions(&self, revision: u32) -> Vec<PinDefinition>;

    /// The file samples for an ADC channel are read from.
    fn analog_path(&self, paths: &Paths, channel: u32) -> PathBuf;

    /// The buses on the board.
    ///
    /// The pins of each bus are those tagged [`Capabilities::I2C`] with
    /// the bus number.
    fn buses(&self, paths: &Paths, revision: u32) -> Vec<BusSpec>;

    /// Alternate names for modules, as (alias, module) pairs.
    fn aliases(&self) -> Vec<(&str, &str)> {
        Vec::new()
    }
}

/// The boards that can be detected.
pub fn boards() -> Vec<Box<dyn Board>> {
    vec![Box::new(OdroidC)]
}

/// The wiring of an I2C bus.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BusSpec {
    name: String,
    number: u32,
    device: PathBuf,
}

impl BusSpec {
    /// Describe the bus with the given number and device node, served by
    /// the named module.
    pub fn new<N: Into<String>, P: Into<PathBuf>>(name: N, number: u32, device: P) -> BusSpec {
        BusSpec {
            name: name.into(),
            number,
            device: device.into(),
        }
    }

    /// The name of the module serving the bus.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bus number used in the pin table.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// The device node of the bus.
    pub fn device(&self) -> &Path {
        &self.device
    }
}

/// The composition root for a board.
///
/// The driver builds the pin map of the board, and the modules serving the
/// pins, when initialized.  Pins may then be resolved by name and driven
/// via the driver or the modules.
///
/// The modules are disabled, releasing all pins, when the driver is
/// closed or dropped.
#[derive(Debug)]
pub struct Driver {
    board: Box<dyn Board>,
    paths: Paths,
    revision: Option<u32>,
    live: Option<Live>,
}

// The state created by initialize.
#[derive(Debug)]
struct Live {
    pin_map: PinMap,
    registry: Arc<Registry>,
    modules: Vec<AnyModule>,
    aliases: HashMap<String, String>,
}

impl Driver {
    /// Create a driver for a particular board.
    pub fn new<B: Board + 'static>(board: B, paths: Paths) -> Driver {
        Driver::from_boxed(Box::new(board), paths)
    }

    fn from_boxed(board: Box<dyn Board>, paths: Paths) -> Driver {
        Driver {
            board,
            paths,
            revision: None,
            live: None,
        }
    }

    /// Create a driver for the board the platform identifies as.
    pub fn detect(paths: Paths) -> Result<Driver> {
        let info = CpuInfo::read(&paths.cpuinfo)?;
        for board in boards() {
            if let Some(revision) = board.revision(&info) {
                debug!(board = board.name(), revision, "detected");
                let mut d = Driver::from_boxed(board, paths);
                d.revision = Some(revision);
                return Ok(d);
            }
        }
        Err(Error::UnsupportedHardware(
            info.field("Hardware").unwrap_or_default().into(),
        ))
    }

    /// Use the given revision of the board rather than identifying it
    /// when initialized.
    pub fn with_revision(mut self, revision: u32) -> Self {
        self.revision = Some(revision);
        self
    }

    /// Return true if the platform identifies as the board.
    pub fn matches_hardware(&self) -> bool {
        match CpuInfo::read(&self.paths.cpuinfo) {
            Ok(info) => self.board.revision(&info).is_some(),
            Err(_) => false,
        }
    }

    /// The board being driven.
    pub fn board(&self) -> &dyn Board {
        self.board.as_ref()
    }

    /// The filesystem locations used to access the hardware.
    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    /// The revision of the board, if known.
    pub fn revision(&self) -> Option<u32> {
        self.revision
    }

    /// Build the pin map and modules, and enable the modules.
    ///
    /// If any module fails to enable then the modules already enabled are
    /// disabled before the error is returned.
    pub fn initialize(&mut self) -> Result<()> {
        if self.live.is_some() {
            return Err(Error::AlreadyInitialized(self.board.name().into()));
        }
        let revision = match self.revision {
            Some(r) => r,
            None => {
                let info = CpuInfo::read(&self.paths.cpuinfo)?;
                self.board.revision(&info).ok_or_else(|| {
                    Error::UnsupportedHardware(info.field("Hardware").unwrap_or_default().into())
                })?
            }
        };
        let pin_map = PinMap::new(self.board.pin_definitions(revision))?;
        let registry = Arc::new(Registry::for_pin_map(&pin_map));
        let mut modules = self.build_modules(&pin_map, &registry, revision)?;
        let aliases: HashMap<String, String> = self
            .board
            .aliases()
            .into_iter()
            .map(|(alias, name)| (alias.to_string(), name.to_string()))
            .collect();
        check_names(&modules, &aliases)?;
        for idx in 0..modules.len() {
            if let Err(e) = modules[idx].enable() {
                for m in modules[..idx].iter_mut().rev() {
                    if let Err(de) = m.disable() {
                        warn!(module = m.name(), error = %de, "disable failed");
                    }
                }
                return Err(e);
            }
        }
        self.revision = Some(revision);
        info!(
            board = self.board.name(),
            revision,
            pins = pin_map.len(),
            modules = modules.len(),
            "initialized"
        );
        self.live = Some(Live {
            pin_map,
            registry,
            modules,
            aliases,
        });
        Ok(())
    }

    fn build_modules(
        &self,
        pin_map: &PinMap,
        registry: &Arc<Registry>,
        revision: u32,
    ) -> Result<Vec<AnyModule>> {
        let mut modules = Vec::new();

        let mut cfg = GpioConfig::default();
        cfg.with_class_dir(self.paths.gpio_class());
        for (pin, def) in pin_map.with_capability(Capabilities::GPIO) {
            if let Some(logical) = def.gpio() {
                cfg.with_pin(pin, logical);
            }
        }
        if !cfg.pins().is_empty() {
            let mut m = GpioModule::new("gpio", registry.clone());
            m.configure(&cfg)?;
            modules.push(m.into());
        }

        let mut cfg = AnalogConfig::default();
        for (pin, def) in pin_map.with_capability(Capabilities::ANALOG) {
            if let Some(channel) = def.analog() {
                cfg.with_pin(pin, channel, self.board.analog_path(&self.paths, channel));
            }
        }
        if !cfg.pins().is_empty() {
            let mut m = AnalogModule::new("analog", registry.clone());
            m.configure(&cfg)?;
            modules.push(m.into());
        }

        for bus in self.board.buses(&self.paths, revision) {
            let mut cfg = I2cConfig::default();
            cfg.with_device(bus.device());
            for (pin, def) in pin_map.with_capability(Capabilities::I2C) {
                if def.bus() == Some(bus.number()) {
                    cfg.with_pin(pin);
                }
            }
            let mut m = I2cModule::new(bus.name(), registry.clone());
            m.configure(&cfg)?;
            modules.push(m.into());
        }
        Ok(modules)
    }

    /// Return true if the driver has been initialized and not closed.
    pub fn is_initialized(&self) -> bool {
        self.live.is_some()
    }

    /// The pin map of the board.
    pub fn pin_map(&self) -> Result<&PinMap> {
        self.live().map(|l| &l.pin_map)
    }

    /// The ledger of pin ownership shared by the modules.
    pub fn registry(&self) -> Result<&Arc<Registry>> {
        self.live().map(|l| &l.registry)
    }

    /// Find a module by name or alias.
    pub fn module(&self, name: &str) -> Result<&AnyModule> {
        let live = self.live()?;
        let target = live.aliases.get(name).map(String::as_str).unwrap_or(name);
        live.modules
            .iter()
            .find(|m| m.name() == target)
            .ok_or_else(|| Error::NoSuchModule(name.into()))
    }

    /// The modules of the board.
    pub fn modules(&self) -> Result<&[AnyModule]> {
        self.live().map(|l| l.modules.as_slice())
    }

    /// Find a pin by name.
    pub fn pin(&self, name: &str) -> Result<Pin> {
        self.pin_map()?.resolve(name)
    }

    /// Open a digital pin in the given mode.
    pub fn set_mode(&self, pin: Pin, mode: Mode) -> Result<()> {
        self.digital(pin, Operation::SetDirection)?
            .set_mode(pin, mode)
    }

    /// Drive a digital output.
    pub fn digital_write(&self, pin: Pin, value: Value) -> Result<()> {
        self.digital(pin, Operation::Write)?.write(pin, value)
    }

    /// Read the level of a digital pin.
    pub fn digital_read(&self, pin: Pin) -> Result<Value> {
        self.digital(pin, Operation::Read)?.read(pin)
    }

    /// Read the sample from an analog pin.
    pub fn analog_read(&self, pin: Pin) -> Result<u32> {
        let live = self.live()?;
        if !live.pin_map.capabilities(pin)?.contains(Capabilities::ANALOG) {
            return Err(Error::Capability {
                pin,
                op: Operation::AnalogRead,
            });
        }
        live.modules
            .iter()
            .filter_map(AnyModule::as_analog)
            .find(|m| m.config().channel(pin).is_some())
            .ok_or(Error::Capability {
                pin,
                op: Operation::AnalogRead,
            })?
            .read(pin)
    }

    /// Close a digital pin, releasing it.
    pub fn close_pin(&self, pin: Pin) -> Result<()> {
        self.digital(pin, Operation::Close)?.close(pin)
    }

    fn digital(&self, pin: Pin, op: Operation) -> Result<&GpioModule> {
        let live = self.live()?;
        if !live.pin_map.capabilities(pin)?.contains(Capabilities::GPIO) {
            return Err(Error::Capability { pin, op });
        }
        live.modules
            .iter()
            .filter_map(AnyModule::as_digital)
            .find(|m| m.config().logical(pin).is_some())
            .ok_or(Error::Capability { pin, op })
    }

    fn live(&self) -> Result<&Live> {
        self.live
            .as_ref()
            .ok_or_else(|| Error::NotInitialized(self.board.name().into()))
    }

    /// Disable all the modules, releasing all pins.
    ///
    /// All modules are disabled even if some fail, in which case the first
    /// error is returned.  Closing a closed driver has no effect.
    pub fn close(&mut self) -> Result<()> {
        let Some(mut live) = self.live.take() else {
            return Ok(());
        };
        let mut first = None;
        for m in live.modules.iter_mut() {
            if let Err(e) = m.disable() {
                warn!(module = m.name(), error = %e, "disable failed");
                first.get_or_insert(e);
            }
        }
        info!(board = self.board.name(), "closed");
        first.map_or(Ok(()), Err)
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(board = self.board.name(), error = %e, "close on drop failed");
        }
    }
}

// Pins are owned by module name, so names and aliases must identify
// exactly one module.
fn check_names(modules: &[AnyModule], aliases: &HashMap<String, String>) -> Result<()> {
    for (idx, m) in modules.iter().enumerate() {
        if modules[..idx].iter().any(|prev| prev.name() == m.name()) {
            return Err(Error::Configuration {
                module: m.name().into(),
                reason: "name is used by more than one module".into(),
            });
        }
    }
    for alias in aliases.keys() {
        if modules.iter().any(|m| m.name() == alias) {
            return Err(Error::Configuration {
                module: alias.clone(),
                reason: "name is also used as an alias".into(),
            });
        }
    }
    Ok(())
}
