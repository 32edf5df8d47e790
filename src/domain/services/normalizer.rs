//! Name normalizer
//!
//! Mirrors the static-site generator's slug rules for asset filenames. Every
//! destination filename and every rewritten link goes through
//! [`normalize_file_name`]; nothing else may compute one.

/// Destination directory that holds all mirrored assets
pub const DEST_IMAGE_DIR: &str = "image";

/// Normalize an asset filename. The extension is kept verbatim.
///
/// Rules on the stem, in order: whitespace → `-`, `&` → `-and-`,
/// `%` → `-percent`, `?` and `#` removed.
pub fn normalize_file_name(name: &str) -> String {
    let (stem, ext) = split_extension(name);

    let mut out = String::with_capacity(stem.len() + ext.len() + 8);
    for ch in stem.chars() {
        match ch {
            c if c.is_whitespace() => out.push('-'),
            '&' => out.push_str("-and-"),
            '%' => out.push_str("-percent"),
            '?' | '#' => {}
            c => out.push(c),
        }
    }
    out.push_str(ext);
    out
}

/// Split `name` into stem and extension (with the dot).
///
/// A leading dot is part of the stem, so `.hidden` has no extension.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Base filename of a reference (`a/b/pic.png` → `pic.png`)
pub fn base_name(reference: &str) -> &str {
    reference
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(reference)
}

/// Destination-relative asset path, e.g. `image/pic-1.png`
pub fn dest_asset_path(normalized_name: &str) -> String {
    format!("{}/{}", DEST_IMAGE_DIR, normalized_name)
}

/// Link target written into mirrored documents, e.g. `../image/pic-1.png`
pub fn asset_link(normalized_name: &str) -> String {
    format!("../{}", dest_asset_path(normalized_name))
}
