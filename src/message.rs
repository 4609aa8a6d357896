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

//! Catalog entry types shared between the grammar and the fuzzy
//! matcher.
//!
//! Entries are plain data: the grammar downstream of the lexer builds
//! them, the fuzzy matcher reads them and produces updated copies, and
//! the caller serializes them back out. Nothing here retains state
//! between calls.

use serde::{Deserialize, Serialize};

/// A singular catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub msgid: String,
    pub msgstr: String,
    /// Marks the translation as needing human review.
    pub fuzzy: bool,
    /// `#:` reference comments, e.g. `src/lib.md:12`.
    pub source: String,
    /// `#` translator comments.
    pub comments: String,
}

impl Translation {
    /// A freshly extracted, untranslated entry.
    pub fn new(msgid: impl Into<String>) -> Self {
        Translation {
            msgid: msgid.into(),
            msgstr: String::new(),
            fuzzy: false,
            source: String::new(),
            comments: String::new(),
        }
    }
}

/// A plural catalog entry.
///
/// `msgstr_plural` is indexed by plural index; how many forms a target
/// language has is decided by the catalog header, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluralTranslation {
    pub msgid: String,
    pub msgid_plural: String,
    pub msgstr_plural: Vec<String>,
    pub fuzzy: bool,
    pub source: String,
    pub comments: String,
}

impl PluralTranslation {
    /// A freshly extracted plural entry with `forms` empty msgstr
    /// slots.
    pub fn new(msgid: impl Into<String>, msgid_plural: impl Into<String>, forms: usize) -> Self {
        PluralTranslation {
            msgid: msgid.into(),
            msgid_plural: msgid_plural.into(),
            msgstr_plural: vec![String::new(); forms],
            fuzzy: false,
            source: String::new(),
            comments: String::new(),
        }
    }
}

/// Either kind of catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    Singular(Translation),
    Plural(PluralTranslation),
}

impl Message {
    pub fn msgid(&self) -> &str {
        match self {
            Message::Singular(translation) => &translation.msgid,
            Message::Plural(translation) => &translation.msgid,
        }
    }

    pub fn is_fuzzy(&self) -> bool {
        match self {
            Message::Singular(translation) => translation.fuzzy,
            Message::Plural(translation) => translation.fuzzy,
        }
    }

    /// The key used for similarity comparison.
    pub fn key(&self) -> MessageKey<'_> {
        match self {
            Message::Singular(translation) => MessageKey::Singular(&translation.msgid),
            Message::Plural(translation) => MessageKey::Plural {
                msgid: &translation.msgid,
                msgid_plural: &translation.msgid_plural,
            },
        }
    }
}

/// A borrowed view of an entry's source-string identity.
///
/// Keys exist only for the duration of a similarity comparison; they
/// are never stored.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MessageKey<'a> {
    Singular(&'a str),
    Plural { msgid: &'a str, msgid_plural: &'a str },
}

impl<'a> MessageKey<'a> {
    /// The primary msgid. For a plural key the plural spelling is not
    /// part of the answer.
    pub fn msgid(self) -> &'a str {
        match self {
            MessageKey::Singular(msgid) | MessageKey::Plural { msgid, .. } => msgid,
        }
    }
}

impl<'a> From<&'a str> for MessageKey<'a> {
    fn from(msgid: &'a str) -> Self {
        MessageKey::Singular(msgid)
    }
}
