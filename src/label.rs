//! IOB label assembly.
//!
//! Projects a classified match list into one `{B|I}-{type}` label for a
//! requested annotation level, or `O` when nothing applies.

use crate::span::EntityMatch;

/// Which mention attribute is projected into the label suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// Coarse type, e.g. `pers`.
    Coarse,
    /// Fine-grained type, e.g. `pers.ind`.
    Fine,
    /// Bibliographic reference type, e.g. `secondary-full`.
    Biblio,
}

impl LabelKind {
    fn project<'a>(self, m: &EntityMatch<'a>) -> &'a str {
        match self {
            LabelKind::Coarse => &m.mention.entity_coarse,
            LabelKind::Fine => &m.mention.entity_fine,
            LabelKind::Biblio => m.mention.entity_biblio.as_deref().unwrap_or("_"),
        }
    }
}

/// Assemble the IOB label for one annotation level.
///
/// - Empty matches produce `O`.
/// - With `nested`, the label comes from the second-ranked match (the first
///   properly nested entity below the main span), or `O` when there is only
///   one match.
/// - Otherwise the label comes from the top-ranked (earliest, longest)
///   match; a top match whose IOB was suppressed by the precedence rule
///   produces `O`.
#[must_use]
pub fn assemble_label(matches: &[EntityMatch<'_>], kind: LabelKind, nested: bool) -> String {
    if matches.is_empty() {
        return "O".to_string();
    }

    if nested {
        return match matches.get(1) {
            Some(m) => match m.iob {
                Some(iob) => format!("{}-{}", iob.as_str(), kind.project(m)),
                None => "O".to_string(),
            },
            None => "O".to_string(),
        };
    }

    match matches[0].iob {
        Some(iob) => format!("{}-{}", iob.as_str(), kind.project(&matches[0])),
        None => "O".to_string(),
    }
}
