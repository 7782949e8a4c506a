// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

type Record = HashMap<String, String>;

/// The per-processor properties reported by the kernel in `/proc/cpuinfo`.
///
/// The file is a sequence of `key : value` lines, with each processor's
/// block starting with a `processor` line.
/// On ARM platforms the board identification fields, such as `Hardware`,
/// follow the last processor's block, and so are attributed to the
/// highest numbered processor.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CpuInfo {
    /// Fields preceding the first processor.
    preamble: Record,

    /// Fields for each processor, keyed by processor number.
    processors: BTreeMap<u32, Record>,
}

impl CpuInfo {
    /// Read and parse the processor information file.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<CpuInfo> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::CpuInfo(path.into(), e))?;
        Ok(CpuInfo::parse(&text))
    }

    /// Parse processor information text.
    ///
    /// Lines that are not `key : value` pairs are ignored.
    pub fn parse(text: &str) -> CpuInfo {
        let mut info = CpuInfo::default();
        let mut current: Option<u32> = None;
        for line in text.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            if key == "processor" {
                if let Ok(n) = value.parse() {
                    current = Some(n);
                }
            }
            let record = match current {
                Some(n) => info.processors.entry(n).or_default(),
                None => &mut info.preamble,
            };
            record.insert(key.into(), value.into());
        }
        info
    }

    /// The value of a field from the highest numbered processor.
    ///
    /// Falls back to fields preceding the first processor if the processor
    /// does not have the field.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.processors
            .values()
            .next_back()
            .and_then(|r| r.get(key))
            .or_else(|| self.preamble.get(key))
            .map(String::as_str)
    }

    /// The value of a field for a particular processor.
    pub fn processor(&self, n: u32, key: &str) -> Option<&str> {
        self.processors
            .get(&n)
            .and_then(|r| r.get(key))
            .map(String::as_str)
    }

    /// The number of processors reported.
    pub fn num_processors(&self) -> usize {
        self.processors.len()
    }
}
