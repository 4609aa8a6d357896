// Copyright 2023 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Fuzzy matching of catalog entries during a catalog update.
//!
//! When the source text changes, a newly extracted entry often has no
//! exact counterpart in the previous catalog but a close one: a typo
//! fix, a reworded sentence. This module scores that closeness,
//! decides whether it clears a threshold, and merges the old
//! translation into the new entry flagged for review. The matching
//! semantics are kept compatible with the reference merging tool, so
//! catalogs round-trip between the two without churn.

use crate::message::{Message, MessageKey, PluralTranslation, Translation};

/// Similarity between two entry keys, in `[0, 1]`.
///
/// This is Jaro-Winkler similarity over the primary msgid of each
/// key. For plural keys `msgid_plural` is ignored entirely, matching
/// the reference tool; two plural entries with very different plural
/// spellings can still score as identical.
///
/// # Examples
///
/// ```
/// use po_merge_helpers::fuzzy::similarity;
/// use po_merge_helpers::message::MessageKey;
///
/// let key = MessageKey::Singular("one cat");
/// assert_eq!(similarity(key, key), 1.0);
/// ```
pub fn similarity(a: MessageKey<'_>, b: MessageKey<'_>) -> f64 {
    jaro_winkler(a.msgid(), b.msgid())
}

/// A successful threshold match.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Match {
    /// The similarity score that cleared the threshold.
    pub distance: f64,
}

/// Build a reusable match predicate for a fixed threshold.
///
/// The returned function yields `Some(Match)` when the similarity of
/// the two keys is at least `threshold` and `None` otherwise. It is
/// pure and can be called from any number of threads.
pub fn make_matcher(threshold: f64) -> impl Fn(MessageKey<'_>, MessageKey<'_>) -> Option<Match> {
    move |a, b| {
        let distance = similarity(a, b);
        (distance >= threshold).then_some(Match { distance })
    }
}

/// Merge a previously translated entry into a newly extracted one.
///
/// The result keeps `new`'s identity and metadata, takes its msgstr
/// content from `existing`, and is always flagged fuzzy. When the two
/// entries disagree on plurality, the content is adapted: a plural
/// `existing` contributes its first form to a singular `new`, and a
/// singular `existing` fills every plural slot of a plural `new` with
/// the same string. Neither input is modified.
pub fn merge(new: &Message, existing: &Message) -> Message {
    match new {
        Message::Singular(new) => {
            let msgstr = match existing {
                Message::Singular(existing) => existing.msgstr.clone(),
                Message::Plural(existing) => {
                    existing.msgstr_plural.first().cloned().unwrap_or_default()
                }
            };
            Message::Singular(Translation {
                msgstr,
                fuzzy: true,
                ..new.clone()
            })
        }
        Message::Plural(new) => {
            let msgstr_plural = match existing {
                Message::Singular(existing) => {
                    vec![existing.msgstr.clone(); new.msgstr_plural.len()]
                }
                Message::Plural(existing) => existing.msgstr_plural.clone(),
            };
            Message::Plural(PluralTranslation {
                msgstr_plural,
                fuzzy: true,
                ..new.clone()
            })
        }
    }
}

/// Jaro similarity over Unicode scalar values.
fn jaro(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Characters match if they are equal and within half the length
    // of the longer string of each other.
    let window = (a.len().max(b.len()) / 2).saturating_sub(1);
    let mut a_matched = vec![false; a.len()];
    let mut b_matched = vec![false; b.len()];
    let mut matches = 0usize;
    for (i, &ca) in a.iter().enumerate() {
        let lo = i.saturating_sub(window);
        let hi = (i + window + 1).min(b.len());
        for j in lo..hi {
            if !b_matched[j] && b[j] == ca {
                a_matched[i] = true;
                b_matched[j] = true;
                matches += 1;
                break;
            }
        }
    }
    if matches == 0 {
        return 0.0;
    }

    // Count matched characters that appear in a different order; each
    // transposed pair counts once.
    let mut transposed = 0usize;
    let mut j = 0;
    for (i, &ca) in a.iter().enumerate() {
        if !a_matched[i] {
            continue;
        }
        while !b_matched[j] {
            j += 1;
        }
        if ca != b[j] {
            transposed += 1;
        }
        j += 1;
    }

    let matches = matches as f64;
    let transpositions = (transposed / 2) as f64;
    (matches / a.len() as f64
        + matches / b.len() as f64
        + (matches - transpositions) / matches)
        / 3.0
}

/// Jaro with the Winkler boost for a shared prefix, capped at four
/// characters with the standard 0.1 scaling.
fn jaro_winkler(a: &str, b: &str) -> f64 {
    let score = jaro(a, b);
    let prefix = a
        .chars()
        .zip(b.chars())
        .take(4)
        .take_while(|(ca, cb)| ca == cb)
        .count();
    score + prefix as f64 * 0.1 * (1.0 - score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn singular(msgid: &str, msgstr: &str) -> Message {
        let mut translation = Translation::new(msgid);
        translation.msgstr = String::from(msgstr);
        Message::Singular(translation)
    }

    fn plural(msgid: &str, msgid_plural: &str, msgstr_plural: &[&str]) -> Message {
        let mut translation = PluralTranslation::new(msgid, msgid_plural, msgstr_plural.len());
        translation.msgstr_plural = msgstr_plural.iter().map(|s| String::from(*s)).collect();
        Message::Plural(translation)
    }

    #[test]
    fn test_similarity_identity() {
        for key in [
            MessageKey::Singular("one cat"),
            MessageKey::Plural {
                msgid: "one cat",
                msgid_plural: "many cats",
            },
            MessageKey::Singular(""),
        ] {
            assert_eq!(similarity(key, key), 1.0);
        }
    }

    #[test]
    fn test_similarity_symmetry() {
        let pairs = [
            ("crate", "trace"),
            ("one cat", "one bat"),
            ("", "cats"),
            ("grüße", "grüsse"),
        ];
        for (a, b) in pairs {
            assert_eq!(
                similarity(a.into(), b.into()),
                similarity(b.into(), a.into())
            );
        }
    }

    #[test]
    fn test_similarity_disjoint_strings() {
        assert_eq!(similarity("abc".into(), "xyz".into()), 0.0);
        assert_eq!(similarity("".into(), "cats".into()), 0.0);
    }

    #[test]
    fn test_similarity_known_value() {
        // MARTHA/MARHTA is the textbook Jaro-Winkler pair: six
        // matches, one transposition, three-character prefix.
        let jaro = (1.0 + 1.0 + 5.0 / 6.0) / 3.0;
        let expected = jaro + 3.0 * 0.1 * (1.0 - jaro);
        let actual = similarity("MARTHA".into(), "MARHTA".into());
        assert!((actual - expected).abs() < 1e-12, "got {actual}");
    }

    #[test]
    fn test_similarity_ignores_msgid_plural() {
        let plural_key = MessageKey::Plural {
            msgid: "cat",
            msgid_plural: "cats",
        };
        assert_eq!(
            similarity(plural_key, MessageKey::Singular("cat2")),
            similarity(MessageKey::Singular("cat"), MessageKey::Singular("cat2"))
        );
        // Even a wildly different plural spelling changes nothing.
        let other = MessageKey::Plural {
            msgid: "cat",
            msgid_plural: "unrelated plural spelling",
        };
        assert_eq!(similarity(plural_key, other), 1.0);
    }

    #[test]
    fn test_prefix_boost_orders_candidates() {
        // Same edit distance to "cat", but the shared prefix should
        // rank "cats" above "bat".
        let to_cats = similarity("cat".into(), "cats".into());
        let to_bat = similarity("cat".into(), "bat".into());
        assert!(to_cats > to_bat, "{to_cats} <= {to_bat}");
    }

    #[test]
    fn test_matcher_threshold() {
        let matches = make_matcher(0.9);
        let near = matches("one cat".into(), "one bat".into());
        let expected = similarity("one cat".into(), "one bat".into());
        assert!(expected >= 0.9);
        assert_eq!(near, Some(Match { distance: expected }));
        assert_eq!(matches("one cat".into(), "seventeen dogs".into()), None);
    }

    #[test]
    fn test_matcher_boundary_is_inclusive() {
        let matches = make_matcher(1.0);
        assert_eq!(
            matches("cat".into(), "cat".into()),
            Some(Match { distance: 1.0 })
        );
        assert_eq!(matches("cat".into(), "cats".into()), None);
    }

    #[test]
    fn test_merge_singular_from_singular() {
        let new = singular("one cat", "");
        let existing = singular("one bat", "eine Fledermaus");
        assert_eq!(
            merge(&new, &existing),
            Message::Singular(Translation {
                msgid: String::from("one cat"),
                msgstr: String::from("eine Fledermaus"),
                fuzzy: true,
                source: String::new(),
                comments: String::new(),
            })
        );
        // Inputs are untouched.
        assert!(!new.is_fuzzy());
        assert!(!existing.is_fuzzy());
    }

    #[test]
    fn test_merge_singular_from_plural() {
        let new = singular("one cat", "");
        let existing = plural("one bat", "many bats", &["eine Fledermaus", "Fledermäuse"]);
        let merged = merge(&new, &existing);
        assert_eq!(merged.msgid(), "one cat");
        assert!(merged.is_fuzzy());
        let Message::Singular(translation) = merged else {
            panic!("expected a singular entry");
        };
        assert_eq!(translation.msgstr, "eine Fledermaus");
    }

    #[test]
    fn test_merge_plural_from_singular() {
        let new = plural("one cat", "many cats", &["", "", ""]);
        let existing = singular("one bat", "eine Fledermaus");
        let Message::Plural(translation) = merge(&new, &existing) else {
            panic!("expected a plural entry");
        };
        assert_eq!(
            translation.msgstr_plural,
            vec!["eine Fledermaus", "eine Fledermaus", "eine Fledermaus"]
        );
        assert_eq!(translation.msgid, "one cat");
        assert_eq!(translation.msgid_plural, "many cats");
        assert!(translation.fuzzy);
    }

    #[test]
    fn test_merge_plural_from_plural() {
        let new = plural("one cat", "many cats", &["", ""]);
        let existing = plural("one bat", "many bats", &["eine Fledermaus", "Fledermäuse"]);
        let Message::Plural(translation) = merge(&new, &existing) else {
            panic!("expected a plural entry");
        };
        assert_eq!(translation.msgstr_plural, vec!["eine Fledermaus", "Fledermäuse"]);
        assert!(translation.fuzzy);
    }

    #[test]
    fn test_merge_keeps_new_metadata() {
        let mut translation = Translation::new("one cat");
        translation.source = String::from("src/cats.md:12");
        translation.comments = String::from("the feline greeting");
        let new = Message::Singular(translation);
        let existing = singular("one bat", "eine Fledermaus");
        let Message::Singular(merged) = merge(&new, &existing) else {
            panic!("expected a singular entry");
        };
        assert_eq!(merged.source, "src/cats.md:12");
        assert_eq!(merged.comments, "the feline greeting");
    }

    #[test]
    fn test_merge_from_empty_plural() {
        // A plural entry with zero forms is degenerate, but merge
        // stays total and falls back to an empty msgstr.
        let new = singular("one cat", "");
        let existing = plural("one bat", "many bats", &[]);
        let Message::Singular(merged) = merge(&new, &existing) else {
            panic!("expected a singular entry");
        };
        assert_eq!(merged.msgstr, "");
    }
}
