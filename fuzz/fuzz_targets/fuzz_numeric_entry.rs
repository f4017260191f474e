#![no_main]

use libfuzzer_sys::fuzz_target;
use modal_param_editor::core::numeric_entry::{self, EntryKey};

fuzz_target!(|data: &[u8]| {
    let mut state = numeric_entry::reset();
    for byte in data {
        let key = match byte % 13 {
            0..=9 => EntryKey::Digit(char::from(b'0' + byte % 13)),
            10 => EntryKey::Decimal,
            11 => EntryKey::Negate,
            _ => EntryKey::Backspace,
        };
        state = numeric_entry::update(&state, key);

        if let Some(value) = state.value() {
            assert!(value.is_finite());
        }
        if state.raw().is_none() {
            assert_eq!(state, numeric_entry::reset());
        }
    }
});
