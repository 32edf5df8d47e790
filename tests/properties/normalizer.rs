//! Property tests for asset name normalization.

use proptest::prelude::*;

use notemirror::domain::services::{asset_link, dest_asset_path, normalize_file_name};

fn asset_name() -> impl Strategy<Value = String> {
    (
        proptest::string::string_regex("[A-Za-z0-9 \t&%?#_.-]{0,24}").unwrap(),
        prop_oneof![Just(".png"), Just(".jpg"), Just(".gif"), Just(".webp")],
    )
        .prop_map(|(stem, ext)| format!("{stem}x{ext}"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: normalizing never panics on arbitrary input.
    #[test]
    fn property_normalize_never_panics(s in "(?s).{0,128}") {
        let _ = normalize_file_name(&s);
    }

    /// PROPERTY: a normalized name is a fixed point.
    #[test]
    fn property_normalize_is_idempotent(name in asset_name()) {
        let once = normalize_file_name(&name);
        prop_assert_eq!(normalize_file_name(&once), once);
    }

    /// PROPERTY: the extension survives and no rewritten character remains.
    #[test]
    fn property_normalized_name_is_link_safe(name in asset_name()) {
        let normalized = normalize_file_name(&name);
        let ext = &name[name.rfind('.').unwrap()..];

        prop_assert!(normalized.ends_with(ext));
        for forbidden in [' ', '\t', '&', '%', '?', '#'] {
            prop_assert!(!normalized.contains(forbidden), "{normalized:?} contains {forbidden:?}");
        }
    }

    /// PROPERTY: copied file path and rewritten link name the same file.
    #[test]
    fn property_link_and_destination_agree(name in asset_name()) {
        let normalized = normalize_file_name(&name);
        let link = asset_link(&normalized);
        let path = dest_asset_path(&normalized);

        prop_assert_eq!(link.strip_prefix("../"), Some(path.as_str()));
        prop_assert!(path.ends_with(&normalized));
    }
}
