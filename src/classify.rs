//! Mention classification.
//!
//! Partitions the span-index matches of one token into the annotation
//! classes the output format distinguishes: literal, non-literal
//! (metonymic), compound and bibliographic. Compounds are not annotated in
//! this corpus; the slot is kept so the column layout stays format-complete.

use crate::document::Token;
use crate::span::EntityMatch;
use log::debug;

/// Classified matches of one token.
#[derive(Debug, Default)]
pub struct MentionClasses<'a> {
    /// Literal mentions without a bibliographic type.
    pub literal: Vec<EntityMatch<'a>>,
    /// Metonymic mentions. A slot becomes `None` once its match has been
    /// spliced into the literal list by the precedence rule.
    pub non_literal: Vec<Option<EntityMatch<'a>>>,
    /// Bibliographic reference mentions.
    pub biblio: Vec<EntityMatch<'a>>,
    /// Compound mentions (always empty in this corpus).
    pub compound: Vec<EntityMatch<'a>>,
}

impl<'a> MentionClasses<'a> {
    /// Partition a sorted match list.
    ///
    /// `matches` must be in span-index order (earliest start, then longest
    /// span); the partition preserves that order within each class. The
    /// nesting depth beyond the tolerated one-per-class overlap is logged as
    /// a diagnostic, never emitted.
    #[must_use]
    pub fn partition(matches: Vec<EntityMatch<'a>>, token: &Token, doc_id: &str) -> Self {
        let compound: Vec<EntityMatch> = Vec::new();
        let biblio: Vec<EntityMatch> = matches
            .iter()
            .filter(|m| m.mention.entity_biblio.is_some())
            .copied()
            .collect();
        let literal: Vec<EntityMatch> = matches
            .iter()
            .filter(|m| m.mention.literal && m.mention.entity_biblio.is_none())
            .copied()
            .collect();
        let non_literal: Vec<Option<EntityMatch>> = matches
            .iter()
            .filter(|m| !m.mention.literal)
            .map(|m| Some(*m))
            .collect();

        let mut n_nested = matches.len()
            - compound.len().min(1)
            - non_literal.len().min(1)
            - literal.len().min(1);
        if non_literal.len() > 1 {
            // one level of nesting tolerated without penalty
            n_nested = n_nested.saturating_sub(1);
        }
        if n_nested > 0 {
            debug!(
                "Token '{}' in document {} has {} nested entity overlappings",
                token.surface, doc_id, n_nested
            );
        }

        MentionClasses {
            literal,
            non_literal,
            biblio,
            compound,
        }
    }

    /// Apply the literal-fallback and metonymic-precedence rules.
    ///
    /// Call after the nested label has been read from the raw literal list:
    ///
    /// 1. If there is no literal annotation, the metonymic matches are
    ///    promoted into the literal slot so the `LIT` columns are populated
    ///    whenever any annotation exists.
    /// 2. If the earliest metonymic match starts before the earliest literal
    ///    one, it is spliced to the front of the literal list (keeping its
    ///    IOB) and its own slot is nulled out, so an ongoing implicit span
    ///    is not shadowed by a later explicit literal annotation.
    pub fn resolve_precedence(&mut self) {
        if self.literal.is_empty() {
            self.literal = self.non_literal.drain(..).flatten().collect();
            return;
        }

        let meto = self.non_literal.first().copied().flatten();
        let literal_start = self.literal.first().map(|m| m.mention.start_offset);
        if let (Some(meto), Some(literal_start)) = (meto, literal_start) {
            if meto.mention.start_offset < literal_start {
                self.literal.insert(0, meto);
                self.non_literal[0] = None;
            }
        }
    }

    /// Winning literal mention (longest earliest span), if any.
    #[must_use]
    pub fn main_literal(&self) -> Option<&'a crate::document::Mention> {
        self.literal.first().map(|m| m.mention)
    }

    /// Winning metonymic mention, unless spliced away.
    #[must_use]
    pub fn main_non_literal(&self) -> Option<&'a crate::document::Mention> {
        self.non_literal.first().and_then(|m| m.map(|m| m.mention))
    }

    /// Winning bibliographic mention, if any.
    #[must_use]
    pub fn main_biblio(&self) -> Option<&'a crate::document::Mention> {
        self.biblio.first().map(|m| m.mention)
    }
}
