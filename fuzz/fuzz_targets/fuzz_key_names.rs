#![no_main]

use libfuzzer_sys::fuzz_target;
use modal_param_editor::KeyCode;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(key) = text.parse::<KeyCode>() {
            let name = key.to_string();
            assert_eq!(name.parse::<KeyCode>().ok(), Some(key));
        }
    }
});
