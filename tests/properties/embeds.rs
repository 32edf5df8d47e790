//! Property tests for embed scanning and rewriting.

use proptest::prelude::*;

use notemirror::domain::services::{extract_references, rewrite_body};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: scanning and rewriting never panic, even on multi-byte
    /// text full of half-open brackets.
    #[test]
    fn property_scan_never_panics(s in "(?s)[!\\[\\]()|a-z 图片\n]{0,256}") {
        let _ = extract_references(&s);
        let _ = rewrite_body(&s, &[]);
    }

    /// PROPERTY: text without an embed opener is returned untouched.
    #[test]
    fn property_plain_text_is_unchanged(s in "[^!]{0,256}") {
        prop_assert_eq!(rewrite_body(&s, &[]), s);
    }

    /// PROPERTY: every well-formed wiki embed is found, once.
    #[test]
    fn property_wiki_embeds_are_found(
        names in proptest::collection::btree_set("[a-z]{1,8}\\.png", 1..5),
        filler in "[a-z ]{0,16}",
    ) {
        let text: String = names
            .iter()
            .map(|n| format!("{filler}![[{n}]]\n"))
            .collect();
        let refs = extract_references(&text);
        prop_assert_eq!(refs, names.into_iter().collect::<Vec<_>>());
    }
}
