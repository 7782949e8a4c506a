// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// The file protocol of the sysfs GPIO and ADC interfaces.
//
// A GPIO is exported by writing its number to <class>/export, which
// creates <class>/gpio<N>.  The direction is set by writing "in" or "out"
// to gpio<N>/direction and the level is accessed via gpio<N>/value.
// Writing the number to <class>/unexport removes the directory.

use crate::pin::{Mode, Value};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::os::unix::fs::FileExt;
use std::path::{Path, PathBuf};

const LOW: &[u8] = b"0";
const HIGH: &[u8] = b"1";

/// The directory of an exported GPIO.
pub(crate) fn gpio_dir(class: &Path, logical: u32) -> PathBuf {
    class.join(format!("gpio{}", logical))
}

/// Export the GPIO unless it is already present.
///
/// Returns true if the GPIO was exported by this call.
pub(crate) fn export(class: &Path, logical: u32) -> io::Result<bool> {
    if gpio_dir(class, logical).exists() {
        return Ok(false);
    }
    write_attr(class, "export", logical.to_string())?;
    Ok(true)
}

pub(crate) fn unexport(class: &Path, logical: u32) -> io::Result<()> {
    write_attr(class, "unexport", logical.to_string())
}

pub(crate) fn set_direction(dir: &Path, mode: Mode) -> io::Result<()> {
    let direction = match mode {
        Mode::Input => "in",
        Mode::Output => "out",
    };
    write_attr(dir, "direction", direction)
}

/// Open the value file of an exported GPIO.
///
/// Inputs are opened read-only. Outputs are opened for writing, and also
/// for reading so the level being driven can be read back.
pub(crate) fn open_value(dir: &Path, mode: Mode) -> io::Result<File> {
    let mut opts = OpenOptions::new();
    match mode {
        Mode::Input => opts.read(true),
        Mode::Output => opts.read(true).write(true).truncate(true),
    };
    opts.open(dir.join("value"))
}

/// The token written to a value file to set a level.
pub(crate) fn value_token(value: Value) -> &'static [u8] {
    match value {
        Value::Low => LOW,
        Value::High => HIGH,
    }
}

/// Read the level from the start of a value file.
///
/// Anything other than a leading '1', including an empty file, is low.
pub(crate) fn read_value(f: &File) -> io::Result<Value> {
    let mut buf = [0_u8; 1];
    let n = f.read_at(&mut buf, 0)?;
    Ok(parse_value(&buf[..n]))
}

fn parse_value(buf: &[u8]) -> Value {
    match buf.first() {
        Some(b) if *b == HIGH[0] => Value::High,
        _ => Value::Low,
    }
}

pub(crate) fn open_sample(path: &Path) -> io::Result<File> {
    File::open(path)
}

/// Read the raw text of an analog sample from the start of the file.
pub(crate) fn read_sample(f: &File) -> io::Result<Vec<u8>> {
    let mut buf = [0_u8; 16];
    let n = f.read_at(&mut buf, 0)?;
    Ok(buf[..n].to_vec())
}

/// Parse the leading decimal digits of an analog sample.
///
/// Any terminator following the digits is ignored.
pub(crate) fn parse_sample(buf: &[u8]) -> Option<u32> {
    let digits = buf.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    std::str::from_utf8(&buf[..digits]).ok()?.parse().ok()
}

// Helper to write to attribute files.
fn write_attr<D: AsRef<[u8]>>(dir: &Path, file: &str, data: D) -> io::Result<()> {
    fs::write(dir.join(file), data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpio_dir() {
        assert_eq!(
            super::gpio_dir(Path::new("/sys/class/gpio"), 83),
            PathBuf::from("/sys/class/gpio/gpio83")
        );
    }

    #[test]
    fn parse_value() {
        assert_eq!(super::parse_value(b"1"), Value::High);
        assert_eq!(super::parse_value(b"1\n"), Value::High);
        assert_eq!(super::parse_value(b"0"), Value::Low);
        assert_eq!(super::parse_value(b""), Value::Low);
        assert_eq!(super::parse_value(b"x"), Value::Low);
    }

    #[test]
    fn value_token() {
        assert_eq!(super::value_token(Value::High), b"1");
        assert_eq!(super::value_token(Value::Low), b"0");
    }

    #[test]
    fn parse_sample() {
        assert_eq!(super::parse_sample(b"1\n"), Some(1));
        assert_eq!(super::parse_sample(b"1000\n"), Some(1000));
        assert_eq!(super::parse_sample(b"1023"), Some(1023));
        assert_eq!(super::parse_sample(b"0\n"), Some(0));
        assert_eq!(super::parse_sample(b""), None);
        assert_eq!(super::parse_sample(b"\n"), None);
        assert_eq!(super::parse_sample(b"-5\n"), None);
        assert_eq!(super::parse_sample(b"99999999999999\n"), None);
    }
}
