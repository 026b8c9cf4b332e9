//! Property-based tests for the Document Tree transcoders
//!
//! These tests use proptest to verify:
//! 1. XML roundtrip: parse(serialize(tree)) == tree when sibling names are unique
//! 2. JSON roundtrip: from_json_str(to_json_pretty(tree)) == tree
//! 3. Materializing with an evaluator that knows no placeholders is the identity
//! 4. Arbitrary input never panics the XML parser

use bodykit::{
    from_json_str, from_xml_str, materialize, to_json_pretty, to_xml_string, Node, Object,
    PassThrough,
};
use proptest::prelude::*;

const NAME: &str = "[a-z][a-z0-9_]{0,6}";

/// Leaves have no whitespace or markup since the parser strips whitespace
fn node() -> impl Strategy<Value = Node> {
    let leaf = "[a-zA-Z0-9.@$-]{1,8}".prop_map(Node::Text);
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop::collection::vec((NAME, inner), 0..4)
            .prop_map(|fields| Node::Object(fields.into_iter().collect()))
    })
}

fn tree() -> impl Strategy<Value = Object> {
    prop::collection::vec((NAME, node()), 1..4).prop_map(|fields| fields.into_iter().collect())
}

proptest! {
    #[test]
    fn xml_roundtrip(tree in tree()) {
        let xml = to_xml_string(&tree);
        let parsed = from_xml_str(&xml);
        prop_assert!(parsed.is_ok(), "failed to parse {xml}");
        prop_assert_eq!(parsed.ok(), Some(tree));
    }

    #[test]
    fn json_roundtrip(tree in tree()) {
        let json = to_json_pretty(&tree);
        prop_assert_eq!(from_json_str(&json).ok(), Some(tree));
    }

    #[test]
    fn pass_through_materialization_is_identity(tree in tree()) {
        prop_assert_eq!(materialize(&tree, &PassThrough).ok(), Some(tree));
    }

    #[test]
    fn arbitrary_input_never_panics(input in any::<String>()) {
        let _ = from_xml_str(&input);
    }

    #[test]
    fn tag_soup_never_panics(input in "(<[a-c]{0,2}>|</[a-c]{0,2}>|[a-c ]{0,3}){0,20}") {
        let _ = from_xml_str(&input);
    }
}
