//! Document body rewriting
//!
//! Embeds that point at a resolved asset become `![alt](../image/<name>)`.
//! Wiki embeds that did not resolve are still rewritten by normalizing their
//! base filename, so the link matches whatever the generator would expose.

use std::collections::HashMap;

use super::embeds::{all_embeds, EmbedKind};
use super::normalizer::{asset_link, base_name, normalize_file_name};
use crate::domain::entities::AssetRecord;

/// Rewrite embeds in `content` against the resolved `assets`.
pub fn rewrite_body(content: &str, assets: &[AssetRecord]) -> String {
    let resolved: HashMap<&str, &str> = assets
        .iter()
        .map(|a| (a.reference.as_str(), a.normalized_name.as_str()))
        .collect();

    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;

    for embed in all_embeds(content) {
        if embed.span.start < cursor {
            continue;
        }
        let replacement = match (embed.kind, resolved.get(embed.reference.as_str())) {
            (EmbedKind::Wiki, Some(name)) => format!("![]({})", asset_link(name)),
            (EmbedKind::Wiki, None) => format!(
                "![]({})",
                asset_link(&normalize_file_name(base_name(&embed.reference)))
            ),
            (EmbedKind::Markup, Some(name)) => format!("![{}]({})", embed.alt, asset_link(name)),
            (EmbedKind::Markup, None) => continue,
        };

        out.push_str(&content[cursor..embed.span.start]);
        out.push_str(&replacement);
        cursor = embed.span.end;
    }

    out.push_str(&content[cursor..]);
    out
}
