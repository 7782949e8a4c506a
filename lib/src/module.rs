// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod analog;
pub use self::analog::{AnalogConfig, AnalogModule};

mod gpio;
pub use self::gpio::{GpioConfig, GpioModule};

mod i2c;
pub use self::i2c::{I2cConfig, I2cModule};

use crate::pin::Pin;
use crate::{Error, Operation, Result};
use std::fmt;
use std::io;

/// The common behaviour of the capability providers.
///
/// Capability specific operations, such as [`GpioModule::set_mode`] and
/// [`AnalogModule::read`], are provided by the concrete modules.
pub trait Module {
    /// The name of the module, unique within a driver.
    fn name(&self) -> &str;

    /// The kind of capability the module provides.
    fn kind(&self) -> Kind;

    /// The lifecycle state of the module.
    fn state(&self) -> State;

    /// The pins the module is configured to serve, in ascending order.
    fn pins(&self) -> Vec<Pin>;

    /// Make the module ready to serve its pins.
    ///
    /// Modules serving fixed pin sets claim and open all their pins.
    /// If any pin cannot be claimed then those already claimed are released
    /// before the error is returned.
    ///
    /// Enabling an enabled module has no effect.
    fn enable(&mut self) -> Result<()>;

    /// Close all the pins held by the module and release them.
    ///
    /// All pins are released even if closing some of them fails, in which
    /// case the first error is returned.
    ///
    /// Disabling a module that is not enabled has no effect.
    fn disable(&mut self) -> Result<()>;
}

/// The kind of capability provided by a module.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    /// Digital input and output on individual pins.
    Digital,
    /// Analog sampling on individual pins.
    Analog,
    /// A bus occupying a fixed set of pins.
    Bus,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Digital => "digital",
            Kind::Analog => "analog",
            Kind::Bus => "bus",
        };
        write!(f, "{}", s)
    }
}

/// The lifecycle state of a module.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum State {
    /// The module has been created but not yet configured.
    #[default]
    Unconfigured,
    /// The module has accepted its configuration.
    Configured,
    /// The module is serving its pins.
    Enabled,
    /// The module has released its pins.
    ///
    /// It may be enabled again, or reconfigured.
    Disabled,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            State::Unconfigured => "unconfigured",
            State::Configured => "configured",
            State::Enabled => "enabled",
            State::Disabled => "disabled",
        };
        write!(f, "{}", s)
    }
}

/// The modules a driver may contain.
#[derive(Debug)]
pub enum AnyModule {
    Digital(GpioModule),
    Analog(AnalogModule),
    Bus(I2cModule),
}

impl AnyModule {
    /// The module as a digital module, if it is one.
    pub fn as_digital(&self) -> Option<&GpioModule> {
        match self {
            AnyModule::Digital(m) => Some(m),
            _ => None,
        }
    }

    /// The module as an analog module, if it is one.
    pub fn as_analog(&self) -> Option<&AnalogModule> {
        match self {
            AnyModule::Analog(m) => Some(m),
            _ => None,
        }
    }

    /// The module as a bus module, if it is one.
    pub fn as_bus(&self) -> Option<&I2cModule> {
        match self {
            AnyModule::Bus(m) => Some(m),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn Module {
        match self {
            AnyModule::Digital(m) => m,
            AnyModule::Analog(m) => m,
            AnyModule::Bus(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Module {
        match self {
            AnyModule::Digital(m) => m,
            AnyModule::Analog(m) => m,
            AnyModule::Bus(m) => m,
        }
    }
}

impl Module for AnyModule {
    fn name(&self) -> &str {
        self.inner().name()
    }
    fn kind(&self) -> Kind {
        self.inner().kind()
    }
    fn state(&self) -> State {
        self.inner().state()
    }
    fn pins(&self) -> Vec<Pin> {
        self.inner().pins()
    }
    fn enable(&mut self) -> Result<()> {
        self.inner_mut().enable()
    }
    fn disable(&mut self) -> Result<()> {
        self.inner_mut().disable()
    }
}

impl From<GpioModule> for AnyModule {
    fn from(m: GpioModule) -> Self {
        AnyModule::Digital(m)
    }
}

impl From<AnalogModule> for AnyModule {
    fn from(m: AnalogModule) -> Self {
        AnyModule::Analog(m)
    }
}

impl From<I2cModule> for AnyModule {
    fn from(m: I2cModule) -> Self {
        AnyModule::Bus(m)
    }
}

// Checks common to all module configurations.
fn check_configurable(module: &str, state: State, num_pins: usize) -> Result<()> {
    if state == State::Enabled {
        return Err(config_error(module, "cannot change while enabled"));
    }
    if num_pins == 0 {
        return Err(config_error(module, "has no pins"));
    }
    Ok(())
}

fn check_configured(module: &str, state: State) -> Result<()> {
    if state == State::Unconfigured {
        return Err(config_error(module, "is missing"));
    }
    Ok(())
}

fn pin_io(pin: Pin, op: Operation, source: io::Error) -> Error {
    Error::PinIo { pin, op, source }
}

fn config_error(module: &str, reason: &str) -> Error {
    Error::Configuration {
        module: module.into(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use std::sync::Arc;

    #[test]
    fn any_module_accessors() {
        let r = Arc::new(Registry::default());
        let m = AnyModule::from(GpioModule::new("gpio", r.clone()));
        assert!(m.as_digital().is_some());
        assert!(m.as_analog().is_none());
        assert!(m.as_bus().is_none());
        assert_eq!(m.name(), "gpio");
        assert_eq!(m.kind(), Kind::Digital);
        assert_eq!(m.state(), State::Unconfigured);

        let m = AnyModule::from(I2cModule::new("i2ca", r));
        assert!(m.as_bus().is_some());
        assert_eq!(m.kind(), Kind::Bus);
    }

    #[test]
    fn display() {
        assert_eq!(Kind::Analog.to_string(), "analog");
        assert_eq!(State::default().to_string(), "unconfigured");
        assert_eq!(State::Enabled.to_string(), "enabled");
    }

    #[test]
    fn configurable() {
        assert!(check_configurable("gpio", State::Unconfigured, 2).is_ok());
        assert!(check_configurable("gpio", State::Disabled, 2).is_ok());
        assert!(matches!(
            check_configurable("gpio", State::Configured, 0),
            Err(Error::Configuration { module, reason }) if module == "gpio" && reason == "has no pins"
        ));
        assert!(matches!(
            check_configurable("gpio", State::Enabled, 2),
            Err(Error::Configuration { .. })
        ));
        assert!(check_configured("gpio", State::Unconfigured).is_err());
        assert!(check_configured("gpio", State::Disabled).is_ok());
    }
}
