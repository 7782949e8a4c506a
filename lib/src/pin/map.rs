// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{Capabilities, Pin, PinDefinition};
use crate::{Error, Result};
use std::collections::HashMap;

/// The pins of a board, indexed by [`Pin`].
///
/// The map is built once from the board table and never changes,
/// so it may be shared freely between threads.
#[derive(Clone, Debug, Default)]
pub struct PinMap {
    /// The pin definitions, in board order.
    defs: Vec<PinDefinition>,

    /// The lower-cased aliases of all the pins.
    names: HashMap<String, Pin>,
}

impl PinMap {
    /// Build a map from a board table.
    ///
    /// Each definition is assigned the [`Pin`] corresponding to its
    /// position in the table.
    ///
    /// Names are compared ignoring case, and must be unique across the table.
    pub fn new(defs: Vec<PinDefinition>) -> Result<PinMap> {
        let mut names = HashMap::new();
        for (idx, def) in defs.iter().enumerate() {
            let pin = Pin::new(idx as u32);
            for name in def.names() {
                match names.insert(name.to_lowercase(), pin) {
                    Some(prev) if prev != pin => return Err(Error::DuplicateName(name.clone())),
                    _ => (),
                }
            }
        }
        Ok(PinMap { defs, names })
    }

    /// Find the pin with the given name.
    ///
    /// All the names of a pin are searched, ignoring case.
    pub fn resolve(&self, name: &str) -> Result<Pin> {
        self.names
            .get(&name.to_lowercase())
            .copied()
            .ok_or_else(|| Error::NotFound(name.into()))
    }

    /// The definition of a pin.
    pub fn definition(&self, pin: Pin) -> Result<&PinDefinition> {
        self.defs
            .get(pin.index() as usize)
            .ok_or_else(|| Error::NotFound(pin.to_string()))
    }

    /// The capabilities of a pin.
    pub fn capabilities(&self, pin: Pin) -> Result<Capabilities> {
        self.definition(pin).map(PinDefinition::capabilities)
    }

    /// Return true if the pin is on the board.
    pub fn contains(&self, pin: Pin) -> bool {
        (pin.index() as usize) < self.defs.len()
    }

    /// An iterator over all the pins, in board order.
    pub fn pins(&self) -> impl Iterator<Item = (Pin, &PinDefinition)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(idx, def)| (Pin::new(idx as u32), def))
    }

    /// An iterator over the pins having all the capabilities in `caps`.
    pub fn with_capability(
        &self,
        caps: Capabilities,
    ) -> impl Iterator<Item = (Pin, &PinDefinition)> {
        self.pins().filter(move |(_, def)| def.supports(caps))
    }

    /// The number of pins on the board.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Return true if the board has no pins.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> PinMap {
        PinMap::new(vec![
            PinDefinition::new(["P1", "gpio1"], Capabilities::GPIO).with_gpio(1),
            PinDefinition::new(["P2", "gpio2"], Capabilities::GPIO).with_gpio(2),
            PinDefinition::unassignable("gnd"),
            PinDefinition::new(["P11", "ain0"], Capabilities::ANALOG).with_analog(0),
        ])
        .unwrap()
    }

    #[test]
    fn resolve() {
        let m = board();
        assert_eq!(m.resolve("P1").unwrap(), Pin::new(0));
        assert_eq!(m.resolve("gpio2").unwrap(), Pin::new(1));
        assert_eq!(m.resolve("ain0").unwrap(), Pin::new(3));
    }

    #[test]
    fn resolve_ignores_case() {
        let m = board();
        let p = m.resolve("gpio1").unwrap();
        assert_eq!(m.resolve("GPIO1").unwrap(), p);
        assert_eq!(m.resolve("Gpio1").unwrap(), p);
        assert_eq!(m.resolve("p1").unwrap(), p);
    }

    #[test]
    fn resolve_unknown() {
        let m = board();
        assert!(matches!(m.resolve("P99"), Err(Error::NotFound(n)) if n == "P99"));
        assert!(matches!(m.resolve(""), Err(Error::NotFound(_))));
    }

    #[test]
    fn duplicate_name() {
        let res = PinMap::new(vec![
            PinDefinition::new(["P1", "gpio1"], Capabilities::GPIO),
            PinDefinition::new(["P2", "GPIO1"], Capabilities::GPIO),
        ]);
        assert!(matches!(res, Err(Error::DuplicateName(n)) if n == "GPIO1"));
    }

    #[test]
    fn repeated_alias_on_same_pin() {
        let m = PinMap::new(vec![PinDefinition::new(["led", "LED"], Capabilities::GPIO)])
            .unwrap();
        assert_eq!(m.resolve("Led").unwrap(), Pin::new(0));
    }

    #[test]
    fn definition() {
        let m = board();
        assert_eq!(m.definition(Pin::new(1)).unwrap().name(), "P2");
        assert!(matches!(
            m.definition(Pin::new(4)),
            Err(Error::NotFound(n)) if n == "4"
        ));
        assert!(m.contains(Pin::new(3)));
        assert!(!m.contains(Pin::new(4)));
    }

    #[test]
    fn capabilities() {
        let m = board();
        assert_eq!(m.capabilities(Pin::new(0)).unwrap(), Capabilities::GPIO);
        assert_eq!(
            m.capabilities(Pin::new(2)).unwrap(),
            Capabilities::UNASSIGNABLE
        );
        assert!(m.capabilities(Pin::new(99)).is_err());
    }

    #[test]
    fn pins() {
        let m = board();
        assert_eq!(m.len(), 4);
        assert!(!m.is_empty());
        let names: Vec<&str> = m.pins().map(|(_, d)| d.name()).collect();
        assert_eq!(names, ["P1", "P2", "gnd", "P11"]);
        let gpios: Vec<Pin> = m
            .with_capability(Capabilities::GPIO)
            .map(|(p, _)| p)
            .collect();
        assert_eq!(gpios, [Pin::new(0), Pin::new(1)]);
    }

    #[test]
    fn empty() {
        let m = PinMap::default();
        assert!(m.is_empty());
        assert!(m.resolve("P1").is_err());
    }
}
