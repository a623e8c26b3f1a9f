// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::config::BASE;
use crate::error::RegisterError;
use crate::guard::WriteGuard;
use crate::range::expand;
use crate::storage::window::RegisterWindow;
use crate::types::address::AddressDescriptor;

#[test]
fn test_zeroed_targets_are_writable() {
    let window = RegisterWindow::new();
    let targets = expand(BASE, None, Some(16), 4).unwrap();
    assert!(WriteGuard::check_writable(&window, &targets).is_ok());
}

#[test]
fn test_conflict_reports_all_offenders_in_order() {
    let mut window = RegisterWindow::new();
    window.write(&AddressDescriptor::new(BASE + 12, 4).unwrap(), 1).unwrap();
    window.write(&AddressDescriptor::new(BASE + 4, 4).unwrap(), 1).unwrap();

    let targets = expand(BASE, None, Some(4), 4).unwrap();
    assert_eq!(
        WriteGuard::check_writable(&window, &targets),
        Err(RegisterError::WriteConflict { addresses: vec![BASE + 4, BASE + 12] })
    );
}

#[test]
fn test_single_nonzero_byte_in_span_conflicts() {
    let mut window = RegisterWindow::new();
    // Only the top byte of the 8-byte register is set.
    window.write(&AddressDescriptor::new(BASE + 7, 1).unwrap(), 0x80).unwrap();

    let wide = AddressDescriptor::new(BASE, 8).unwrap();
    assert!(!WriteGuard::is_clear(&window, &wide));
    assert!(WriteGuard::check_writable(&window, &[wide]).is_err());

    let low = AddressDescriptor::new(BASE, 4).unwrap();
    assert!(WriteGuard::check_writable(&window, &[low]).is_ok());
}

#[test]
fn test_conflict_message_lists_hex_addresses() {
    let err = RegisterError::WriteConflict { addresses: vec![BASE, BASE + 4] };
    assert_eq!(
        err.to_string(),
        "existing non-zero at addresses: 0x80000000,0x80000004"
    );
    assert_eq!(err.kind(), "WriteConflict");
}
