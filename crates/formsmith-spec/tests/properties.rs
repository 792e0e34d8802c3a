use formsmith_spec::codec::{deserialize, serialize};
use formsmith_spec::mutate::{add_field_with_id, remove_field, reorder_field};
use formsmith_spec::spec::{FieldId, FieldType, FormDocument};
use formsmith_spec::store::{DOCUMENT_NAME_KEY, InputValue, InputValueStore, reconcile};
use proptest::prelude::*;

fn document(kinds: &[usize]) -> FormDocument {
    kinds
        .iter()
        .enumerate()
        .fold(FormDocument::new(), |doc, (index, kind)| {
            let kind = FieldType::ALL[kind % FieldType::ALL.len()];
            add_field_with_id(&doc, format!("f{index}").into(), kind).expect("unique id")
        })
}

fn ids(doc: &FormDocument) -> Vec<String> {
    doc.ids().map(FieldId::to_string).collect()
}

fn value_strategy() -> impl Strategy<Value = InputValue> {
    prop_oneof![
        "[a-z0-9 ]{0,8}".prop_map(InputValue::Text),
        prop::collection::vec("[a-z]{1,4}", 0..3).prop_map(InputValue::List),
    ]
}

fn store_strategy() -> impl Strategy<Value = InputValueStore> {
    let key = prop_oneof![
        (0usize..10).prop_map(|index| format!("f{index}")),
        Just(DOCUMENT_NAME_KEY.to_string()),
        "[a-z]{1,6}",
    ];
    prop::collection::btree_map(key, value_strategy(), 0..8)
        .prop_map(|values| values.into_iter().collect())
}

proptest! {
    #[test]
    fn reconcile_is_idempotent(
        kinds in prop::collection::vec(0usize..24, 0..10),
        store in store_strategy(),
    ) {
        let doc = document(&kinds);
        let once = reconcile(&store, &doc);
        prop_assert_eq!(reconcile(&once, &doc), once.clone());
        for key in once.keys() {
            prop_assert!(key == DOCUMENT_NAME_KEY || doc.contains(&FieldId::from(key)));
        }
    }

    #[test]
    fn snapshots_round_trip(
        kinds in prop::collection::vec(0usize..24, 0..10),
        store in store_strategy(),
    ) {
        let doc = document(&kinds);
        let bytes = serialize(&doc, &store).expect("serialize");
        let (loaded, loaded_store) = deserialize(&bytes).expect("deserialize");
        prop_assert_eq!(loaded, doc);
        prop_assert_eq!(loaded_store, store);
    }

    #[test]
    fn remove_preserves_relative_order(
        kinds in prop::collection::vec(0usize..24, 1..10),
        pick in any::<prop::sample::Index>(),
    ) {
        let doc = document(&kinds);
        let victim = FieldId::from(format!("f{}", pick.index(kinds.len())));
        let remaining = remove_field(&doc, &victim).expect("present");
        let expected = ids(&doc)
            .into_iter()
            .filter(|id| id.as_str() != victim.as_str())
            .collect::<Vec<_>>();
        prop_assert_eq!(ids(&remaining), expected);
    }

    #[test]
    fn reorder_matches_array_move(
        kinds in prop::collection::vec(0usize..24, 1..10),
        from in any::<prop::sample::Index>(),
        to in any::<prop::sample::Index>(),
    ) {
        let doc = document(&kinds);
        let (from, to) = (from.index(kinds.len()), to.index(kinds.len()));
        let mut expected = ids(&doc);
        let moved = expected.remove(from);
        expected.insert(to, moved);
        let reordered = reorder_field(&doc, from, to).expect("in bounds");
        prop_assert_eq!(ids(&reordered), expected);
    }

    #[test]
    fn reorder_never_clamps(
        kinds in prop::collection::vec(0usize..24, 0..6),
        extra in 0usize..4,
    ) {
        let doc = document(&kinds);
        let past_end = kinds.len() + extra;
        prop_assert!(reorder_field(&doc, past_end, 0).is_err());
        prop_assert!(reorder_field(&doc, 0, past_end).is_err());
    }
}
