// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::config::{BASE, SIZE};
use crate::error::RegisterError;
use crate::storage::window::RegisterWindow;
use crate::types::address::AddressDescriptor;

fn desc(addr: u64, width: u64) -> AddressDescriptor {
    AddressDescriptor::new(addr, width).unwrap()
}

#[test]
fn test_new_window_is_zeroed() {
    let window = RegisterWindow::new();
    assert_eq!(window.len(), SIZE);
    assert_eq!(window.non_zero_bytes(), 0);
}

#[test]
fn test_little_endian_layout() {
    let mut window = RegisterWindow::new();
    let d = desc(BASE + 8, 4);
    window.write(&d, 0x1122_3344).unwrap();

    assert_eq!(window.raw_slice(&d), &[0x44, 0x33, 0x22, 0x11]);
    assert_eq!(window.as_bytes()[8], 0x44);
    assert_eq!(window.read(&d), 0x1122_3344);
    // Narrower reads see the low bytes.
    assert_eq!(window.read(&desc(BASE + 8, 2)), 0x3344);
    assert_eq!(window.read(&desc(BASE + 10, 1)), 0x22);
}

#[test]
fn test_write_read_round_trip_extremes() {
    let mut window = RegisterWindow::new();
    for (i, w) in [1u64, 2, 4, 8].into_iter().enumerate() {
        let max = if w == 8 { u64::MAX } else { (1u64 << (8 * w)) - 1 };
        for v in [0, 1, max / 2, max] {
            let d = desc(BASE + 0x100 * (i as u64 + 1), w);
            window.clear(&d);
            window.write(&d, v).unwrap();
            assert_eq!(window.read(&d), v);
        }
    }
}

#[test]
fn test_value_overflow() {
    let mut window = RegisterWindow::new();
    let d = desc(BASE, 1);
    assert_eq!(
        window.write(&d, 0x100),
        Err(RegisterError::ValueOverflow { value: 0x100, width: 1 })
    );
    assert_eq!(window.non_zero_bytes(), 0);
}

#[test]
fn test_clear_and_clear_all() {
    let mut window = RegisterWindow::new();
    let a = desc(BASE, 8);
    let b = desc(BASE + 0x40, 4);
    window.write(&a, u64::MAX).unwrap();
    window.write(&b, 7).unwrap();

    window.clear(&a);
    window.clear(&a);
    assert_eq!(window.read(&a), 0);
    assert_eq!(window.read(&b), 7);

    window.clear_all();
    assert_eq!(window.non_zero_bytes(), 0);
}

#[test]
fn test_from_image_requires_exact_size() {
    assert!(RegisterWindow::from_image(vec![0u8; SIZE - 1]).is_none());
    assert!(RegisterWindow::from_image(vec![0u8; SIZE + 1]).is_none());

    let mut image = vec![0u8; SIZE];
    image[SIZE - 1] = 0xAB;
    let window = RegisterWindow::from_image(image).unwrap();
    assert_eq!(window.read(&desc(BASE + SIZE as u64 - 1, 1)), 0xAB);
}

#[test]
fn test_checkpoint_rollback() {
    let mut window = RegisterWindow::new();
    let a = desc(BASE, 4);
    let b = desc(BASE + 4, 4);
    window.write(&a, 0xAA).unwrap();

    let cp = window.checkpoint([&a, &b]);
    window.clear(&a);
    window.write(&b, 0xBB).unwrap();
    window.rollback(cp);
    assert_eq!(window.read(&a), 0xAA);
    assert_eq!(window.read(&b), 0);

    let full = window.checkpoint_all();
    window.clear_all();
    window.rollback(full);
    assert_eq!(window.read(&a), 0xAA);
}
