//! Property tests for the publishability filter.

use proptest::prelude::*;

use notemirror::domain::services::PUBLISH_KEYS;
use notemirror::is_publishable;

fn padding() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ \t]{0,3}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: arbitrary text never panics the filter.
    #[test]
    fn property_filter_never_panics(s in "(?s).{0,512}") {
        let _ = is_publishable(&s);
    }

    /// PROPERTY: either key set to true publishes, whatever the spacing
    /// and whatever other header lines or body follow.
    #[test]
    fn property_publish_key_is_recognized(
        key_index in 0..PUBLISH_KEYS.len(),
        before_key in padding(),
        before_colon in padding(),
        after_colon in padding(),
        title in "[a-z ]{0,20}",
        body in "(?s).{0,128}",
    ) {
        let doc = format!(
            "---\ntitle: {title}\n{before_key}{}{before_colon}:{after_colon}true\n---\n{body}",
            PUBLISH_KEYS[key_index]
        );
        prop_assert!(is_publishable(&doc));
    }

    /// PROPERTY: a key that only appears in the body never publishes.
    #[test]
    fn property_body_key_is_ignored(
        key_index in 0..PUBLISH_KEYS.len(),
        body in "[a-z \n]{0,64}",
    ) {
        let doc = format!(
            "---\ntitle: t\n---\n{body}\n{}: true\n",
            PUBLISH_KEYS[key_index]
        );
        prop_assert!(!is_publishable(&doc));
    }
}
