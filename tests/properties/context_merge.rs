//! Property tests for context document merging.

use proptest::prelude::*;

use claude_sync::domain::services::{merge_context, provenance_header, ContextMerge};

fn document() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 #.\n-]{0,200}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: an appended merge keeps the local text as a prefix and the
    /// remote text verbatim.
    #[test]
    fn property_append_preserves_both_sides(local in document(), remote in document()) {
        if let ContextMerge::Appended(merged) = merge_context(&local, &remote, "0000aaaa") {
            prop_assert!(merged.starts_with(&local));
            prop_assert!(merged.ends_with(&remote));
            prop_assert!(merged.contains(&provenance_header("0000aaaa")));
        }
    }

    /// PROPERTY: a second merge of the same remote is always a no-op.
    #[test]
    fn property_merge_is_idempotent(local in document(), remote in document()) {
        let merged = match merge_context(&local, &remote, "0000aaaa") {
            ContextMerge::Appended(merged) => merged,
            ContextMerge::AlreadyMerged => local,
        };

        prop_assert_eq!(
            merge_context(&merged, &remote, "0000aaaa"),
            ContextMerge::AlreadyMerged
        );
    }

    /// PROPERTY: whitespace-only remotes never change the document.
    #[test]
    fn property_blank_remote_is_already_merged(local in document(), blank in "[ \n\t]{0,8}") {
        prop_assert_eq!(merge_context(&local, &blank, "m"), ContextMerge::AlreadyMerged);
    }
}
