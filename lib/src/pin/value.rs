// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// The level of a digital pin.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// The pin is low.
    #[default]
    Low,
    /// The pin is high.
    High,
}

impl Value {
    /// The value opposite the current value.
    pub fn not(&self) -> Value {
        match self {
            Value::High => Value::Low,
            Value::Low => Value::High,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Value::High => "high",
            Value::Low => "low",
        };
        write!(f, "{}", s)
    }
}

impl From<Value> for bool {
    fn from(v: Value) -> bool {
        match v {
            Value::Low => false,
            Value::High => true,
        }
    }
}
impl From<Value> for u8 {
    fn from(v: Value) -> u8 {
        match v {
            Value::Low => 0,
            Value::High => 1,
        }
    }
}
impl From<bool> for Value {
    fn from(b: bool) -> Value {
        match b {
            false => Value::Low,
            true => Value::High,
        }
    }
}
impl From<u8> for Value {
    fn from(i: u8) -> Value {
        match i {
            0 => Value::Low,
            _ => Value::High,
        }
    }
}

/// The direction a digital pin is opened in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// The pin is read.
    Input,
    /// The pin is driven.
    Output,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::Input => "input",
            Mode::Output => "output",
        };
        write!(f, "{}", s)
    }
}
