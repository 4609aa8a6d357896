#![no_main]

use libfuzzer_sys::fuzz_target;
use po_merge_helpers::tokenize;

fuzz_target!(|text: &str| {
    let _ = tokenize(text); // Err(_) can happen and it's fine.
});
