use choice_content::{ConfigDocument, FlatDocument};
use choice_store::{Document, MemoryStore};
use proptest::prelude::*;
use serde_json::Value;

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z ]{0,8}".prop_map(Value::from),
        prop::collection::vec(any::<u8>().prop_map(Value::from), 0..3).prop_map(Value::from),
    ]
}

// Keys may contain '.', which must never be confused with nesting
fn key() -> impl Strategy<Value = String> {
    "[a-z.]{1,4}"
}

fn node() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 4, |inner| {
        prop::collection::btree_map(key(), inner, 0..4)
            .prop_map(|map| Value::Object(map.into_iter().collect()))
    })
}

fn document() -> impl Strategy<Value = Document> {
    prop::collection::btree_map(key(), node(), 0..5).prop_map(|map| map.into_iter().collect())
}

proptest! {
    #[test]
    fn test_reconstruct_inverts_flatten(doc in document()) {
        let rebuilt = FlatDocument::flatten(&doc).reconstruct().unwrap();

        // Compare rendered text too, so key order is checked and not just membership
        prop_assert_eq!(
            serde_json::to_string(&rebuilt).unwrap(),
            serde_json::to_string(&doc).unwrap()
        );
        prop_assert_eq!(rebuilt, doc);
    }

    #[test]
    fn test_write_then_read_keeps_other_leaves(
        doc in document(),
        pick in any::<prop::sample::Index>(),
        new_value in leaf(),
    ) {
        let before = FlatDocument::flatten(&doc);
        prop_assume!(!before.is_empty());
        let (path, _) = before.iter().nth(pick.index(before.len())).unwrap();
        let path = path.clone();

        let store = MemoryStore::new(doc.clone());
        let config = ConfigDocument::new(&store);
        config.write(path.clone(), new_value.clone()).unwrap();

        prop_assert_eq!(config.read(path.clone()).unwrap(), Some(new_value));

        let after = FlatDocument::flatten(&config.load().unwrap());
        let untouched_before: Vec<_> = before.iter().filter(|(p, _)| **p != path).collect();
        let untouched_after: Vec<_> = after.iter().filter(|(p, _)| **p != path).collect();
        prop_assert_eq!(untouched_before, untouched_after);
    }
}
