#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz YAML conversion, including tagged enum scalars.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(value) = reflect_assert::value::from_yaml_str(s, &Default::default()) {
            let _ = value.to_string();
        }
    }
});
