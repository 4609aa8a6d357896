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

//! Helpers for a Gettext-based translation workflow.
//!
//! This crate covers the two pieces of a PO catalog-update pipeline
//! that are easy to get subtly wrong: lexing raw PO source text into a
//! token stream with precise line-numbered diagnostics, and fuzzy
//! matching between a freshly extracted catalog and the previous
//! translation so existing work is carried forward for review instead
//! of being dropped.
//!
//! The two halves are independent. [`lexer::tokenize`] feeds a PO
//! grammar living elsewhere; [`fuzzy`] operates on the entry values
//! that grammar produces. Everything here is a pure function: no I/O,
//! no shared state, safe to call concurrently over independent
//! inputs.

pub mod fuzzy;
pub mod lexer;
pub mod message;

pub use fuzzy::{make_matcher, merge, similarity, Match};
pub use lexer::{tokenize, Keyword, Token, TokenizeError};
pub use message::{Message, MessageKey, PluralTranslation, Translation};
