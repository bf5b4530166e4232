#![no_main]
use libfuzzer_sys::fuzz_target;
use reflect_assert::comparator::{ModeSet, ReflectionComparator};
use reflect_assert::value::{from_json_str, DocumentOptions};

/// Fuzz document conversion and comparison.
///
/// Splits the input at the first NUL byte into two JSON documents, converts
/// both with date parsing on, and compares them under every mode
/// combination. A document must always equal itself.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let (left, right) = text.split_once('\0').unwrap_or((text, text));
    let options = DocumentOptions::with_dates();
    let (Ok(left), Ok(right)) = (from_json_str(left, &options), from_json_str(right, &options))
    else {
        return;
    };
    for modes in ModeSet::all_combinations() {
        let comparator = ReflectionComparator::new(modes);
        if let Ok(Some(difference)) = comparator.get_difference(&left, &right) {
            let _ = difference.to_string();
        }
        assert!(matches!(comparator.is_equal(&left, &left), Ok(true)));
    }
});
