//! Hyphenation lookup and dehyphenation.
//!
//! The annotation layer records the span of every word the typesetter split
//! across a line break. A token overlapping such a span is a fragment of the
//! hyphenated word; the orchestrator emits one merged row per logical word
//! and suppresses the continuation fragment.

use crate::document::{HyphenatedWord, Token};
use log::info;

/// Hyphen-like characters scanned by [`dehyphenate`], in scan order:
/// em dash, double oblique hyphen, ASCII hyphen (listed twice in the
/// annotation guidelines).
///
/// The scan unconditionally overwrites the found position, so the **last**
/// listed character that occurs wins. Existing releases were produced with
/// this order; changing it would reflow already-published tokens.
pub const HYPHENS: [char; 4] = ['\u{2014}', '\u{2E17}', '-', '-'];

/// Find the hyphenated word a token is a fragment of, if any.
///
/// Checked in both directions: the token contains the word start (first
/// fragment), or the word contains the token start (continuation fragment).
#[must_use]
pub fn lookup_hyphenation<'a>(
    token: &Token,
    hyphenated_words: &'a [HyphenatedWord],
) -> Option<&'a HyphenatedWord> {
    hyphenated_words.iter().find(|word| {
        (token.start_offset <= word.start_offset && word.start_offset < token.end_offset)
            || (word.start_offset <= token.start_offset && token.start_offset < word.end_offset)
    })
}

/// Remove the line-break hyphen from a reconstructed word surface.
///
/// Scans [`HYPHENS`] and removes the single found occurrence. Text without
/// any hyphen character is returned unchanged, which makes the operation
/// idempotent.
#[must_use]
pub fn dehyphenate(surface: &str) -> String {
    let chars: Vec<char> = surface.chars().collect();

    let mut hyphen_position: Option<usize> = None;
    for hyphen in HYPHENS {
        if let Some(pos) = chars.iter().position(|&c| c == hyphen) {
            hyphen_position = Some(pos);
        }
    }

    match hyphen_position {
        Some(pos) => {
            let dehyphenated: String = chars
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != pos)
                .map(|(_, c)| c)
                .collect();
            info!(
                "Hyphenation - Removed character {} from {} => {}",
                chars[pos], surface, dehyphenated
            );
            dehyphenated
        }
        None => {
            info!("Hyphenation - No hyphen detected in {}", surface);
            surface.to_string()
        }
    }
}
