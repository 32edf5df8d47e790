//! Embedded-media reference scanning
//!
//! Two independent matchers, one per syntax:
//! - wiki embeds: `![[target]]` / `![[target|display]]`
//! - markup embeds: `![alt](target)` / `![alt](target "title")`
//!
//! Each returns spans into the original text so the rewriter can splice
//! replacements without re-matching.

use std::ops::Range;

/// Which embed syntax a match came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedKind {
    Wiki,
    Markup,
}

/// One embed occurrence in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub kind: EmbedKind,
    /// Byte range of the whole embed in the text
    pub span: Range<usize>,
    /// Referenced path as written
    pub reference: String,
    /// Alt text (markup embeds only)
    pub alt: String,
}

fn is_external(target: &str) -> bool {
    let lower = target.get(..8).unwrap_or(target).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Find every `![[...]]` embed.
pub fn wiki_embeds(text: &str) -> Vec<Embed> {
    let mut out = Vec::new();
    let mut pos = 0;

    while let Some(found) = text[pos..].find("![[") {
        let start = pos + found;
        let inner_start = start + 3;
        let Some(close) = text[inner_start..].find("]]") else {
            break;
        };
        let inner = &text[inner_start..inner_start + close];
        let end = inner_start + close + 2;

        if inner.contains('\n') {
            pos = inner_start;
            continue;
        }

        let reference = inner.split('|').next().unwrap_or("").trim();
        if !reference.is_empty() {
            out.push(Embed {
                kind: EmbedKind::Wiki,
                span: start..end,
                reference: reference.to_string(),
                alt: String::new(),
            });
        }
        pos = end;
    }

    out
}

/// Split the inside of `(...)` into the target, dropping an optional title.
fn markup_target(inside: &str) -> &str {
    let inside = inside.trim();
    if let Some(rest) = inside.strip_prefix('<') {
        return rest.split_once('>').map(|(t, _)| t).unwrap_or(rest);
    }
    inside.split_whitespace().next().unwrap_or("")
}

/// Find every local `![alt](target)` embed. External http(s) targets are skipped.
pub fn markup_embeds(text: &str) -> Vec<Embed> {
    let mut out = Vec::new();
    let mut pos = 0;

    while let Some(found) = text[pos..].find("![") {
        let start = pos + found;
        let alt_start = start + 2;
        pos = alt_start;

        let Some(alt_len) = text[alt_start..].find(']') else {
            break;
        };
        let alt = &text[alt_start..alt_start + alt_len];
        if alt.contains('\n') || alt.contains('[') {
            continue;
        }

        let paren = alt_start + alt_len + 1;
        if !text[paren..].starts_with('(') {
            continue;
        }
        let Some(close) = closing_paren(&text[paren + 1..]) else {
            continue;
        };
        let inside = &text[paren + 1..paren + 1 + close];
        if inside.contains('\n') {
            continue;
        }
        let end = paren + 1 + close + 1;

        let target = markup_target(inside);
        if !target.is_empty() && !is_external(target) {
            out.push(Embed {
                kind: EmbedKind::Markup,
                span: start..end,
                reference: target.to_string(),
                alt: alt.to_string(),
            });
        }
        pos = end;
    }

    out
}

/// Offset of the `)` that closes an already opened `(`, skipping nested pairs.
fn closing_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(i),
            ')' => depth -= 1,
            '\n' => return None,
            _ => {}
        }
    }
    None
}

/// All embeds of both syntaxes, ordered by position.
pub fn all_embeds(text: &str) -> Vec<Embed> {
    let mut embeds = wiki_embeds(text);
    embeds.extend(markup_embeds(text));
    embeds.sort_by_key(|e| e.span.start);
    embeds
}

/// Distinct references in order of first appearance.
pub fn extract_references(text: &str) -> Vec<String> {
    let mut refs: Vec<String> = Vec::new();
    for embed in all_embeds(text) {
        if !refs.contains(&embed.reference) {
            refs.push(embed.reference);
        }
    }
    refs
}
