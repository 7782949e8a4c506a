// SPDX-FileCopyrightText: 2026 The hwpin developers
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod common;

use common::{break_unexport, gpio_module, sim, P1, P2, P3};
use hwpin::module::{Module, State};
use hwpin::{Error, Mode, Operation, Registry, Value};
use pinsim::{Direction, Level};
use std::sync::Arc;

#[test]
fn write_read_round_trip() {
    let s = sim();
    let m = gpio_module(&s, Arc::default());
    m.set_mode(P1, Mode::Output).unwrap();
    assert_eq!(s.get_direction(1).unwrap(), Direction::Output);

    m.write(P1, Value::High).unwrap();
    assert_eq!(m.read(P1).unwrap(), Value::High);
    assert_eq!(s.get_level(1).unwrap(), Level::High);

    m.write(P1, Value::Low).unwrap();
    assert_eq!(m.read(P1).unwrap(), Value::Low);
    assert_eq!(s.get_level(1).unwrap(), Level::Low);

    m.write(P1, Value::from(7)).unwrap();
    assert_eq!(s.get_level(1).unwrap(), Level::High);
}

#[test]
fn read_input() {
    let s = sim();
    let m = gpio_module(&s, Arc::default());
    m.set_mode(P2, Mode::Input).unwrap();
    assert_eq!(s.get_direction(2).unwrap(), Direction::Input);
    assert_eq!(m.read(P2).unwrap(), Value::Low);
    s.set_level(2, Level::High).unwrap();
    assert_eq!(m.read(P2).unwrap(), Value::High);
    s.toggle(2).unwrap();
    assert_eq!(m.read(P2).unwrap(), Value::Low);
}

#[test]
fn write_input() {
    let s = sim();
    let m = gpio_module(&s, Arc::default());
    m.set_mode(P2, Mode::Input).unwrap();
    assert!(matches!(
        m.write(P2, Value::High),
        Err(Error::WrongMode {
            mode: Mode::Input,
            op: Operation::Write,
            ..
        })
    ));
    assert_eq!(s.get_level(2).unwrap(), Level::Low);
}

#[test]
fn never_opened() {
    let s = sim();
    let m = gpio_module(&s, Arc::default());
    assert!(matches!(
        m.write(P1, Value::High),
        Err(Error::NotOpen { op: Operation::Write, .. })
    ));
    assert!(matches!(
        m.read(P1),
        Err(Error::NotOpen { op: Operation::Read, .. })
    ));
}

#[test]
fn mode_change_reopens() {
    let s = sim();
    let r = Arc::new(Registry::default());
    let m = gpio_module(&s, r.clone());
    m.set_mode(P1, Mode::Output).unwrap();
    m.write(P1, Value::High).unwrap();

    m.set_mode(P1, Mode::Input).unwrap();
    assert_eq!(m.mode(P1), Some(Mode::Input));
    assert_eq!(s.unexported().unwrap(), Some(1));
    assert_eq!(s.get_direction(1).unwrap(), Direction::Input);
    assert_eq!(r.owner_of(P1).as_deref(), Some("gpio"));

    // the line is now driven externally
    s.set_level(1, Level::Low).unwrap();
    assert_eq!(m.read(P1).unwrap(), Value::Low);
    assert!(matches!(
        m.write(P1, Value::High),
        Err(Error::WrongMode { .. })
    ));

    m.set_mode(P1, Mode::Output).unwrap();
    assert_eq!(s.get_direction(1).unwrap(), Direction::Output);
    m.write(P1, Value::High).unwrap();
    assert_eq!(m.read(P1).unwrap(), Value::High);
}

#[test]
fn same_mode_reuses_handle() {
    let s = sim();
    let m = gpio_module(&s, Arc::default());
    m.set_mode(P1, Mode::Output).unwrap();
    m.write(P1, Value::High).unwrap();
    m.set_mode(P1, Mode::Output).unwrap();
    assert_eq!(s.unexported().unwrap(), None);
    assert_eq!(m.read(P1).unwrap(), Value::High);
}

#[test]
fn owned_by_other_module() {
    let s = sim();
    let r = Arc::new(Registry::default());
    r.assign(P1, "analog").unwrap();
    let m = gpio_module(&s, r.clone());
    assert!(matches!(
        m.set_mode(P1, Mode::Output),
        Err(Error::Ownership { pin, owner }) if pin == P1 && owner == "analog"
    ));
    assert_eq!(m.mode(P1), None);
    assert_eq!(s.get_direction(1).unwrap(), Direction::Input);
    assert_eq!(r.owner_of(P1).as_deref(), Some("analog"));

    r.unassign(P1).unwrap();
    m.set_mode(P1, Mode::Output).unwrap();
    assert_eq!(r.owner_of(P1).as_deref(), Some("gpio"));
}

#[test]
fn export_rolled_back_on_failure() {
    // gpio3 is absent, so it is exported but never appears
    let s = sim();
    let r = Arc::new(Registry::default());
    let m = gpio_module(&s, r.clone());
    assert!(matches!(
        m.set_mode(P3, Mode::Output),
        Err(Error::PinIo { pin, op: Operation::SetDirection, .. }) if pin == P3
    ));
    assert_eq!(s.exported().unwrap(), Some(3));
    assert_eq!(s.unexported().unwrap(), Some(3));
    assert!(r.is_empty());
    assert_eq!(m.mode(P3), None);
}

#[test]
fn export_skipped_when_present() {
    let s = sim();
    let m = gpio_module(&s, Arc::default());
    m.set_mode(P1, Mode::Input).unwrap();
    assert_eq!(s.exported().unwrap(), None);

    // exported by someone else
    s.add_gpio(3).unwrap();
    m.set_mode(P3, Mode::Input).unwrap();
    assert_eq!(s.exported().unwrap(), None);
}

#[test]
fn close() {
    let s = sim();
    let r = Arc::new(Registry::default());
    let m = gpio_module(&s, r.clone());
    m.set_mode(P1, Mode::Output).unwrap();
    m.close(P1).unwrap();
    assert_eq!(s.unexported().unwrap(), Some(1));
    assert_eq!(r.owner_of(P1), None);
    assert_eq!(m.mode(P1), None);
    assert!(matches!(m.read(P1), Err(Error::NotOpen { .. })));
    assert!(matches!(
        m.close(P1),
        Err(Error::NotOpen { op: Operation::Close, .. })
    ));
}

#[test]
fn close_unexport_failure() {
    let s = sim();
    let r = Arc::new(Registry::default());
    let m = gpio_module(&s, r.clone());
    m.set_mode(P1, Mode::Output).unwrap();
    break_unexport(&s);
    assert!(matches!(
        m.close(P1),
        Err(Error::PinIo { op: Operation::Unexport, .. })
    ));
    assert_eq!(m.mode(P1), Some(Mode::Output));
    assert_eq!(r.owner_of(P1).as_deref(), Some("gpio"));
    m.write(P1, Value::High).unwrap();
}

#[test]
fn disable_releases_all() {
    let s = sim();
    let r = Arc::new(Registry::default());
    let mut m = gpio_module(&s, r.clone());
    m.set_mode(P1, Mode::Output).unwrap();
    m.set_mode(P2, Mode::Input).unwrap();
    assert_eq!(r.assigned().len(), 2);

    m.disable().unwrap();
    assert_eq!(m.state(), State::Disabled);
    assert_eq!(r.owner_of(P1), None);
    assert_eq!(r.owner_of(P2), None);
    assert!(r.is_empty());
    assert!(matches!(m.read(P1), Err(Error::NotOpen { .. })));
    assert!(matches!(
        m.set_mode(P1, Mode::Input),
        Err(Error::NotEnabled(_))
    ));

    m.disable().unwrap();
    m.enable().unwrap();
    m.set_mode(P1, Mode::Input).unwrap();
}

#[test]
fn disable_despite_unexport_failure() {
    let s = sim();
    let r = Arc::new(Registry::default());
    let mut m = gpio_module(&s, r.clone());
    m.set_mode(P1, Mode::Output).unwrap();
    m.set_mode(P2, Mode::Output).unwrap();
    break_unexport(&s);
    assert!(matches!(
        m.disable(),
        Err(Error::PinIo { pin, op: Operation::Unexport, .. }) if pin == P1
    ));
    assert!(r.is_empty());
    assert_eq!(m.mode(P2), None);
    assert_eq!(m.state(), State::Disabled);
}

#[test]
fn concurrent_pins() {
    let s = sim();
    let m = gpio_module(&s, Arc::default());
    m.set_mode(P1, Mode::Output).unwrap();
    m.set_mode(P2, Mode::Output).unwrap();
    std::thread::scope(|scope| {
        for pin in [P1, P2] {
            let m = &m;
            scope.spawn(move || {
                for i in 0..100_u8 {
                    m.write(pin, Value::from(i % 2)).unwrap();
                }
            });
        }
    });
    assert_eq!(m.read(P1).unwrap(), Value::High);
    assert_eq!(m.read(P2).unwrap(), Value::High);
}
