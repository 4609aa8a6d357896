#![no_main]

use libfuzzer_sys::fuzz_target;
use po_merge_helpers::{similarity, MessageKey};

fuzz_target!(|keys: (&str, &str, &str)| {
    let (msgid, msgid_plural, other) = keys;
    let plural = MessageKey::Plural { msgid, msgid_plural };
    let singular = MessageKey::Singular(other);
    let score = similarity(plural, singular);
    assert!((0.0..=1.0).contains(&score));
    assert_eq!(score, similarity(singular, plural));
});
