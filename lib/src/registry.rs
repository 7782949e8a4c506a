// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::pin::{Pin, PinMap};
use crate::{Error, Result};
use nohash_hasher::{IntMap, IntSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// The ledger of which module owns which pin.
///
/// A pin may be owned by at most one module at a time.
///
/// The registry is shared by all the modules of a driver, and may be
/// accessed from multiple threads.
#[derive(Debug, Default)]
pub struct Registry {
    /// The owner of each assigned pin.
    owners: Mutex<IntMap<Pin, String>>,

    /// The pins that may be assigned, if restricted to a board.
    valid: Option<IntSet<Pin>>,

    /// The pins that may never be assigned.
    reserved: IntSet<Pin>,
}

impl Registry {
    /// Create a registry restricted to the pins of a board.
    ///
    /// Pins not on the board, and pins marked unassignable, are refused.
    pub fn for_pin_map(map: &PinMap) -> Registry {
        let mut valid = IntSet::default();
        let mut reserved = IntSet::default();
        for (pin, def) in map.pins() {
            if def.is_assignable() {
                valid.insert(pin);
            } else {
                reserved.insert(pin);
            }
        }
        Registry {
            owners: Mutex::default(),
            valid: Some(valid),
            reserved,
        }
    }

    /// Assign a pin to a module.
    ///
    /// Assigning a pin to the module that already owns it succeeds
    /// without change.
    pub fn assign(&self, pin: Pin, module: &str) -> Result<()> {
        if self.reserved.contains(&pin) {
            return Err(Error::Unassignable(pin));
        }
        if let Some(valid) = &self.valid {
            if !valid.contains(&pin) {
                return Err(Error::NotFound(pin.to_string()));
            }
        }
        let mut owners = self.lock();
        match owners.get(&pin) {
            Some(owner) if owner == module => Ok(()),
            Some(owner) => Err(Error::Ownership {
                pin,
                owner: owner.clone(),
            }),
            None => {
                debug!(%pin, module, "pin assigned");
                owners.insert(pin, module.into());
                Ok(())
            }
        }
    }

    /// Release a pin from its owner.
    pub fn unassign(&self, pin: Pin) -> Result<()> {
        let mut owners = self.lock();
        match owners.remove(&pin) {
            Some(module) => {
                debug!(%pin, %module, "pin unassigned");
                Ok(())
            }
            None => Err(Error::NotAssigned(pin)),
        }
    }

    /// The name of the module owning the pin, if any.
    pub fn owner_of(&self, pin: Pin) -> Option<String> {
        self.lock().get(&pin).cloned()
    }

    /// A snapshot of the assigned pins and their owners, sorted by pin.
    pub fn assigned(&self) -> Vec<(Pin, String)> {
        let mut assigned: Vec<(Pin, String)> = self
            .lock()
            .iter()
            .map(|(pin, owner)| (*pin, owner.clone()))
            .collect();
        assigned.sort_unstable();
        assigned
    }

    /// Return true if no pins are assigned.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Updates are a single insert or remove, so the table is consistent
    // even if a holder panicked.
    fn lock(&self) -> MutexGuard<'_, IntMap<Pin, String>> {
        self.owners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
