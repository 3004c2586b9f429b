//! Entity-link (NEL) resolution.
//!
//! Maps the winning mention of a token to its knowledge-base identifier,
//! with a NIL fallback for unlinked mentions and a fixed set of entity
//! categories that are never linked.

use crate::document::{AnnotationId, Link, Mention};
use log::error;
use std::collections::HashMap;

/// Sentinel for a mention with no knowledge-base entry.
pub const NIL_FLAG: &str = "NIL";

/// Coarse entity types that never carry a link.
pub const NON_LINKABLE_ENTITY_TYPES: [&str; 3] = ["scope", "date", "object"];

/// Look up the knowledge-base link of a mention.
///
/// Returns `_` when there is no mention, the literal `NIL` when the mention
/// has no (or an empty) identifier. With `strip_base` only the trailing path
/// segment of the identifier is kept, producing a bare id instead of a full
/// URI. With `discard_time_links` any mention whose coarse type contains
/// `time` is forced to `NIL` even if linked (inactive in the current release
/// format, but part of the contract).
#[must_use]
pub fn lookup_nel(
    mention: Option<&Mention>,
    links: &HashMap<AnnotationId, Link>,
    strip_base: bool,
    discard_time_links: bool,
) -> String {
    let Some(mention) = mention else {
        return "_".to_string();
    };

    let mut link = match links.get(&mention.id) {
        Some(nel) => nel
            .wikidata_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(NIL_FLAG)
            .to_string(),
        None => {
            error!(
                "No link record for mention {} ('{}'), defaulting to {}",
                mention.id, mention.surface, NIL_FLAG
            );
            NIL_FLAG.to_string()
        }
    };

    if discard_time_links && mention.entity_coarse.contains("time") {
        link = NIL_FLAG.to_string();
    }

    if strip_base {
        // A trailing slash would strip to the empty string; keep the full
        // identifier in that case, the column must never be empty.
        if let Some(tail) = link.rsplit('/').next().filter(|t| !t.is_empty()) {
            link = tail.to_string();
        }
    }

    link
}

/// Resolve the `NEL-LIT` column for a token, applying the per-category
/// overrides before the plain lookup.
///
/// Non-linkable coarse types and tokens inside a secondary bibliographic
/// reference are forced to `_` regardless of link state.
#[must_use]
pub fn resolve_link(
    main_literal: Option<&Mention>,
    main_biblio: Option<&Mention>,
    links: &HashMap<AnnotationId, Link>,
    discard_time_links: bool,
) -> String {
    if let Some(lit) = main_literal {
        if NON_LINKABLE_ENTITY_TYPES.contains(&lit.entity_coarse.as_str()) {
            return "_".to_string();
        }
    }
    if let Some(biblio) = main_biblio {
        if biblio.entity_coarse.contains("secondary") {
            return "_".to_string();
        }
    }
    lookup_nel(main_literal, links, true, discard_time_links)
}
