//! Mention span index.
//!
//! Answers "which mentions overlap token T" under IOB semantics. For a token
//! `[ts, te)` and a mention `[ms, me)`:
//!
//! - **B** (begin) if `ts <= ms < te`: the mention starts inside the token.
//!   Entity boundaries may fall mid-token, so B does not require `ms == ts`.
//! - **I** (inside) if `ms <= ts < me`: the token starts inside an already
//!   open mention.
//!
//! Matches come back sorted by `(start asc, end desc)`: earliest-starting,
//! then longest-spanning first. Every tie-break downstream ("which mention
//! wins the label") relies on this order.
//!
//! The index sorts the document's mentions once and binary-searches per
//! token instead of rescanning the whole mention list.

use crate::document::{Document, Mention, Token};
use std::cmp::Reverse;

/// IOB position of a token within a mention span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iob {
    /// Token begins the mention.
    B,
    /// Token is inside the mention.
    I,
}

impl Iob {
    /// Tag prefix as written in the output label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Iob::B => "B",
            Iob::I => "I",
        }
    }
}

/// One mention overlapping one token.
///
/// `iob` is `None` when the match was suppressed by the metonymic-precedence
/// rule; the label assembler renders such a top match as `O`.
#[derive(Debug, Clone, Copy)]
pub struct EntityMatch<'a> {
    /// IOB position, or `None` for a suppressed match.
    pub iob: Option<Iob>,
    /// The matched mention.
    pub mention: &'a Mention,
}

impl<'a> EntityMatch<'a> {
    /// A regular (non-suppressed) match.
    #[must_use]
    pub fn new(iob: Iob, mention: &'a Mention) -> Self {
        EntityMatch { iob: Some(iob), mention }
    }
}

/// Per-document index over mention spans.
#[derive(Debug)]
pub struct SpanIndex<'a> {
    // Sorted by (start asc, end desc) so that filtered query results come
    // out in tie-break order without re-sorting.
    sorted: Vec<&'a Mention>,
}

impl<'a> SpanIndex<'a> {
    /// Build the index over a document's mentions.
    #[must_use]
    pub fn new(doc: &'a Document) -> Self {
        let mut sorted: Vec<&Mention> = doc.mentions.iter().collect();
        sorted.sort_by_key(|m| (m.start_offset, Reverse(m.end_offset)));
        SpanIndex { sorted }
    }

    /// All mentions matching the token, tagged B or I, in
    /// `(start asc, end desc)` order.
    #[must_use]
    pub fn matches(&self, token: &Token) -> Vec<EntityMatch<'a>> {
        // Candidates must start before the token ends; everything after the
        // partition point can be skipped wholesale.
        let cutoff = self
            .sorted
            .partition_point(|m| m.start_offset < token.end_offset);

        self.sorted[..cutoff]
            .iter()
            .filter(|m| m.end_offset > token.start_offset)
            .map(|m| {
                let iob = if m.start_offset >= token.start_offset {
                    Iob::B
                } else {
                    Iob::I
                };
                EntityMatch::new(iob, m)
            })
            .collect()
    }
}
