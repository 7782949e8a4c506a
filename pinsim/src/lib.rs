// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A library for creating fake sysfs GPIO and ADC trees, along with the
//! processor information and device nodes of a board, for testing code that
//! accesses pins via sysfs.
//!
//! Simulators are built using the [`Builder`], and live in a temporary
//! directory that is removed when the [`Sim`] is dropped.
//!
//! The tree is static, so exporting a GPIO does not create its directory.
//! GPIOs that should be usable are added to the tree when it is built, as
//! if already exported.  The values written to the `export` and
//! `unexport` files may be inspected to check what was requested.
//!
//! [`Builder`]: fn.builder.html

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A live simulated board.
#[derive(Debug)]
pub struct Sim {
    /// The root of the simulated tree.
    dir: TempDir,
}

impl Sim {
    /// The root of the simulated tree.
    ///
    /// This is the root to rebase the sysfs, procfs and device paths under.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// The sysfs GPIO class directory.
    pub fn class_dir(&self) -> PathBuf {
        self.root().join("sys/class/gpio")
    }

    /// The directory of a GPIO.
    pub fn gpio_dir(&self, gpio: Gpio) -> PathBuf {
        self.class_dir().join(format!("gpio{}", gpio))
    }

    /// Add a GPIO to the tree, as if it had been exported.
    ///
    /// The GPIO starts as a low input.
    pub fn add_gpio(&self, gpio: Gpio) -> Result<()> {
        let dir = self.gpio_dir(gpio);
        fs::create_dir_all(&dir)?;
        write_attr(&dir, "direction", "in\n")?;
        write_attr(&dir, "value", "0\n")
    }

    /// Remove a GPIO from the tree, as if it had been unexported.
    pub fn remove_gpio(&self, gpio: Gpio) -> Result<()> {
        fs::remove_dir_all(self.gpio_dir(gpio))?;
        Ok(())
    }

    /// Set the level of a GPIO to simulate it being externally driven.
    pub fn set_level(&self, gpio: Gpio, level: Level) -> Result<()> {
        let value = match level {
            Level::Low => "0\n",
            Level::High => "1\n",
        };
        write_attr(&self.gpio_dir(gpio), "value", value)
    }

    /// Toggle the level of a GPIO.
    pub fn toggle(&self, gpio: Gpio) -> Result<Level> {
        let level = match self.get_level(gpio)? {
            Level::High => Level::Low,
            Level::Low => Level::High,
        };
        self.set_level(gpio, level)?;
        Ok(level)
    }

    /// Get the current level of a GPIO.
    pub fn get_level(&self, gpio: Gpio) -> Result<Level> {
        let val = read_attr(&self.gpio_dir(gpio), "value")?;
        match val.as_str() {
            "0" => Ok(Level::Low),
            "1" => Ok(Level::High),
            _ => Err(Error::UnexpectedValue(val)),
        }
    }

    /// Get the direction last written to a GPIO.
    pub fn get_direction(&self, gpio: Gpio) -> Result<Direction> {
        let val = read_attr(&self.gpio_dir(gpio), "direction")?;
        match val.as_str() {
            "in" => Ok(Direction::Input),
            "out" => Ok(Direction::Output),
            _ => Err(Error::UnexpectedValue(val)),
        }
    }

    /// The GPIO last written to the `export` file, if any.
    pub fn exported(&self) -> Result<Option<Gpio>> {
        self.control("export")
    }

    /// The GPIO last written to the `unexport` file, if any.
    pub fn unexported(&self) -> Result<Option<Gpio>> {
        self.control("unexport")
    }

    fn control(&self, attr: &str) -> Result<Option<Gpio>> {
        let val = read_attr(&self.class_dir(), attr)?;
        if val.is_empty() {
            return Ok(None);
        }
        val.parse()
            .map(Some)
            .map_err(|_| Error::UnexpectedValue(val))
    }

    /// Set the contents of a file, relative to the root of the tree.
    ///
    /// Any missing parent directories are created.
    pub fn set_attr<P: AsRef<Path>>(&self, path: P, contents: &str) -> Result<()> {
        let path = self.root().join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the contents of a file, relative to the root of the tree,
    /// with any trailing newline removed.
    pub fn get_attr<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let path = self.root().join(path);
        match (path.parent(), path.file_name()) {
            (Some(dir), Some(file)) => read_attr(dir, &file.to_string_lossy()),
            _ => Err(Error::UnexpectedValue(path.display().to_string())),
        }
    }
}

/// Start building a simulated board.
pub fn builder() -> Builder {
    Builder::default()
}

/// A builder of simulated boards.
///
/// Collects the configuration for the simulator, and then creates
/// the simulated tree when taken live.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Builder {
    /// The GPIOs present in the tree.
    pub gpios: Vec<Gpio>,

    /// Additional files, relative to the root, and their contents.
    pub attrs: Vec<(PathBuf, String)>,

    /// The contents of `/proc/cpuinfo`.
    ///
    /// If None then the file is not created.
    pub cpuinfo: Option<String>,

    /// The device nodes to create in `/dev`.
    pub devices: Vec<String>,
}

impl Builder {
    /// Add a GPIO to the tree.
    pub fn with_gpio(&mut self, gpio: Gpio) -> &mut Self {
        if !self.gpios.contains(&gpio) {
            self.gpios.push(gpio);
        }
        self
    }

    /// Add a set of GPIOs to the tree.
    pub fn with_gpios(&mut self, gpios: &[Gpio]) -> &mut Self {
        for gpio in gpios {
            self.with_gpio(*gpio);
        }
        self
    }

    /// Add a file, such as an ADC channel, to the tree.
    pub fn with_attr<P: Into<PathBuf>, C: Into<String>>(
        &mut self,
        path: P,
        contents: C,
    ) -> &mut Self {
        self.attrs.push((path.into(), contents.into()));
        self
    }

    /// Set the contents of `/proc/cpuinfo`.
    pub fn with_cpuinfo<C: Into<String>>(&mut self, cpuinfo: C) -> &mut Self {
        self.cpuinfo = Some(cpuinfo.into());
        self
    }

    /// Add a device node to `/dev`.
    pub fn with_device<N: Into<String>>(&mut self, name: N) -> &mut Self {
        self.devices.push(name.into());
        self
    }

    /// Take the builder config live and return the created simulator.
    pub fn live(&mut self) -> Result<Sim> {
        let sim = Sim {
            dir: tempfile::Builder::new().prefix("pinsim-").tempdir()?,
        };
        let class = sim.class_dir();
        fs::create_dir_all(&class)?;
        write_attr(&class, "export", "")?;
        write_attr(&class, "unexport", "")?;
        for gpio in &self.gpios {
            sim.add_gpio(*gpio)?;
        }
        for (path, contents) in &self.attrs {
            sim.set_attr(path, contents)?;
        }
        if let Some(cpuinfo) = &self.cpuinfo {
            sim.set_attr("proc/cpuinfo", cpuinfo)?;
        }
        let dev = sim.root().join("dev");
        fs::create_dir_all(&dev)?;
        for name in &self.devices {
            write_attr(&dev, name, "")?;
        }
        Ok(sim)
    }
}

/// The kernel number of a GPIO.
pub type Gpio = u32;

/// The physical value of a line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Level {
    /// The line is physically high.
    High,

    /// The line is physically low.
    Low,
}

/// The direction of a GPIO.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// The GPIO is an input.
    Input,

    /// The GPIO is an output.
    Output,
}

// Helper to write to attribute files.
fn write_attr(dir: &Path, file: &str, value: &str) -> Result<()> {
    fs::write(dir.join(file), value)?;
    Ok(())
}

// Helper to read from attribute files.
fn read_attr(dir: &Path, file: &str) -> Result<String> {
    let val = fs::read_to_string(dir.join(file))?;
    Ok(val.trim_end_matches('\n').to_string())
}

/// The result for [`pinsim`] functions.
///
/// [`pinsim`]: crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`pinsim`] functions.
///
/// [`pinsim`]: crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An unexpected value was read from an attribute file.
    #[error("Read unexpected attr value {0:?}")]
    UnexpectedValue(String),

    /// An IO error detected while accessing an attribute file.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
