// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A library for accessing the pins of single-board computers by name
//! on Linux platforms using the sysfs GPIO and ADC interfaces.
//!
//! The board is described and brought up by a [`Driver`], which detects the
//! hardware, builds the [`PinMap`] and creates the modules serving each
//! capability.
//!
//! Pins are resolved by name and then driven through the [`Driver`], or
//! through the [`module`] serving them.
//!
//! ```no_run
//! # fn main() -> hwpin::Result<()> {
//! use hwpin::{Driver, Mode, Paths, Value};
//!
//! let mut driver = Driver::detect(Paths::default())?;
//! driver.initialize()?;
//! let led = driver.pin("gpio83")?;
//! driver.set_mode(led, Mode::Output)?;
//! driver.digital_write(led, Value::High)?;
//! # Ok(())
//! # }
//! ```
//!
//! [`Driver`]: driver::Driver
//! [`PinMap`]: pin::PinMap
//! [`module`]: module@module

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Parsing of the processor information exposed by the kernel.
pub mod cpuinfo;
pub use cpuinfo::CpuInfo;

/// Board descriptions and the composition root that brings a board up.
pub mod driver;
pub use driver::{Board, Driver};

/// Capability providers serving the pins of a board.
///
/// Each module is configured with the subset of pins it serves, and claims
/// those pins from the [`Registry`] before driving them.
///
/// [`Registry`]: crate::registry::Registry
pub mod module;
pub use module::{AnyModule, Module};

/// Types describing the pins of a board.
pub mod pin;
pub use pin::{Capabilities, Mode, Pin, PinDefinition, PinMap, Value};

/// The ledger of which module owns which pin.
pub mod registry;
pub use registry::Registry;

mod sysfs;

/// The filesystem locations used to access the hardware.
///
/// The defaults are the standard Linux locations.
/// All three can be rebased under a common directory using [`with_root`],
/// which is primarily of use for testing.
///
/// [`with_root`]: Paths::with_root
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Paths {
    /// The mount point of sysfs.
    pub sysfs: PathBuf,

    /// The processor information file.
    pub cpuinfo: PathBuf,

    /// The device directory.
    pub dev: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            sysfs: "/sys".into(),
            cpuinfo: "/proc/cpuinfo".into(),
            dev: "/dev".into(),
        }
    }
}

impl Paths {
    /// Locate sysfs, procfs and the device directory under `root`.
    pub fn with_root<P: AsRef<Path>>(root: P) -> Paths {
        let root = root.as_ref();
        Paths {
            sysfs: root.join("sys"),
            cpuinfo: root.join("proc/cpuinfo"),
            dev: root.join("dev"),
        }
    }

    /// The sysfs GPIO class directory.
    pub fn gpio_class(&self) -> PathBuf {
        self.sysfs.join("class/gpio")
    }
}

/// Errors returned by [`hwpin`] functions.
///
/// [`hwpin`]: crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No pin matches the name or index.
    #[error("Pin \"{0}\" not found.")]
    NotFound(String),

    /// A module was given an incomplete or inconsistent configuration.
    #[error("Module \"{module}\" configuration {reason}.")]
    Configuration { module: String, reason: String },

    /// The pin is already owned by another module.
    #[error("Pin {pin} is owned by module \"{owner}\".")]
    Ownership { pin: Pin, owner: String },

    /// The pin is not owned by any module.
    #[error("Pin {0} is not assigned.")]
    NotAssigned(Pin),

    /// The pin is reserved, e.g. power or ground, and cannot be claimed.
    #[error("Pin {0} is unassignable.")]
    Unassignable(Pin),

    /// The pin has not been opened by a call to set its mode.
    #[error("Pin {pin} is not open for {op}.")]
    NotOpen { pin: Pin, op: Operation },

    /// The pin is open, but not in a mode supporting the operation.
    #[error("Pin {pin} is open as {mode} so does not support {op}.")]
    WrongMode { pin: Pin, mode: Mode, op: Operation },

    /// The pin is not one of the pins the module was configured with.
    #[error("Pin {pin} is not known to module \"{module}\".")]
    UnknownPin { module: String, pin: Pin },

    /// The analog sample text did not contain a decimal value.
    #[error("Pin {pin} returned unparsable sample {text:?}.")]
    Parse { pin: Pin, text: String },

    /// An error returned from an underlying OS call while accessing a pin.
    #[error("Pin {pin} {op} failed: {source}")]
    PinIo {
        pin: Pin,
        op: Operation,
        #[source]
        source: io::Error,
    },

    /// The processor information file could not be read.
    #[error("Cannot read \"{0}\": {1}")]
    CpuInfo(PathBuf, #[source] io::Error),

    /// Two pin definitions share a name.
    #[error("Pin name \"{0}\" is defined more than once.")]
    DuplicateName(String),

    /// No module with the name exists on the board.
    #[error("Module \"{0}\" not found.")]
    NoSuchModule(String),

    /// The module must be enabled before it can serve pins.
    #[error("Module \"{0}\" is not enabled.")]
    NotEnabled(String),

    /// The driver must be initialized before it can be used.
    #[error("Driver \"{0}\" is not initialized.")]
    NotInitialized(String),

    /// The driver has already been initialized.
    #[error("Driver \"{0}\" is already initialized.")]
    AlreadyInitialized(String),

    /// The pin does not provide the capability required by the operation.
    #[error("Pin {pin} does not support {op}.")]
    Capability { pin: Pin, op: Operation },

    /// No known board matches the hardware.
    #[error("Unsupported hardware {0:?}.")]
    UnsupportedHardware(String),
}

/// Identifiers for the operations performed on pins, used to report errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
    Export,
    Unexport,
    SetDirection,
    Open,
    Seek,
    Read,
    Write,
    Close,
    AnalogRead,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Export => "export",
            Operation::Unexport => "unexport",
            Operation::SetDirection => "set direction",
            Operation::Open => "open",
            Operation::Seek => "seek",
            Operation::Read => "read",
            Operation::Write => "write",
            Operation::Close => "close",
            Operation::AnalogRead => "analog read",
        };
        write!(f, "{}", name)
    }
}

/// The result for [`hwpin`] functions.
///
/// [`hwpin`]: crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_default() {
        let p = Paths::default();
        assert_eq!(p.sysfs, PathBuf::from("/sys"));
        assert_eq!(p.cpuinfo, PathBuf::from("/proc/cpuinfo"));
        assert_eq!(p.dev, PathBuf::from("/dev"));
        assert_eq!(p.gpio_class(), PathBuf::from("/sys/class/gpio"));
    }

    #[test]
    fn paths_with_root() {
        let p = Paths::with_root("/tmp/board");
        assert_eq!(p.sysfs, PathBuf::from("/tmp/board/sys"));
        assert_eq!(p.cpuinfo, PathBuf::from("/tmp/board/proc/cpuinfo"));
        assert_eq!(p.dev, PathBuf::from("/tmp/board/dev"));
        assert_eq!(p.gpio_class(), PathBuf::from("/tmp/board/sys/class/gpio"));
    }

    #[test]
    fn error_display() {
        let e = Error::Ownership {
            pin: Pin::new(7),
            owner: "analog".into(),
        };
        assert_eq!(e.to_string(), "Pin 7 is owned by module \"analog\".");
        let e = Error::NotOpen {
            pin: Pin::new(3),
            op: Operation::Write,
        };
        assert_eq!(e.to_string(), "Pin 3 is not open for write.");
        let e = Error::PinIo {
            pin: Pin::new(11),
            op: Operation::Export,
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(e.to_string().starts_with("Pin 11 export failed: "));
    }
}
