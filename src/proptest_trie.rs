use super::*;
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::collections::HashSet;

fn key_value_pairs(
    min_pairs: usize,
    max_pairs: usize,
) -> impl Strategy<Value = Vec<(String, i32)>> {
    proptest::collection::vec(
        ("[a-d]{0,6}".prop_map(String::from), proptest::num::i32::ANY),
        min_pairs..max_pairs,
    )
}

fn wide_key_value_pairs(
    min_pairs: usize,
    max_pairs: usize,
) -> impl Strategy<Value = Vec<(String, i32)>> {
    proptest::collection::vec(
        ("[a-zA-Z0-9éü日本]{1,10}".prop_map(String::from), proptest::num::i32::ANY),
        min_pairs..max_pairs,
    )
}

#[derive(Debug, Clone)]
enum Operation {
    Insert(String, i32),
    Assign(String, i32),
    Remove(String),
    EraseSubtree(String),
}

fn operations() -> impl Strategy<Value = Vec<Operation>> {
    let key = "[a-c]{0,5}".prop_map(String::from);
    proptest::collection::vec(
        prop_oneof![
            (key.clone(), any::<i32>()).prop_map(|(k, v)| Operation::Insert(k, v)),
            (key.clone(), any::<i32>()).prop_map(|(k, v)| Operation::Assign(k, v)),
            key.clone().prop_map(Operation::Remove),
            key.prop_map(Operation::EraseSubtree),
        ],
        1..80,
    )
}

/// Every node reachable in the walk leads to at least one key.
fn assert_no_dangling_nodes(trie: &Trie<i32>) {
    for cursor in trie.cursors() {
        let key = trie.full_key(cursor).unwrap();
        assert!(
            trie.prefix_iter(key.as_str()).next().is_some(),
            "dangling node at {key:?}"
        );
    }
}

#[test]
fn test_empty_trie_behavior() {
    let mut trie: Trie<i32> = Trie::new();

    assert!(trie.is_empty());
    assert!(trie.iter().next().is_none());
    assert!(trie.keys().next().is_none());
    assert!(trie.values().next().is_none());
    assert!(trie.cursors().next().is_none());

    assert!(!trie.starts_with("any"));
    assert!(trie.prefix_iter("any").next().is_none());
    assert_eq!(trie.get_sub_trie("any").err(), Some(TrieError::NotFound));

    if let Entry::Occupied(_) = trie.entry("test") {
        panic!("Entry for nonexistent key should be Vacant");
    }

    assert_eq!(trie.remove("anything"), None);
    assert!(trie.is_empty());
}

proptest! {
    #[test]
    fn trie_matches_btree_model(ops in operations()) {
        let mut trie = Trie::new();
        let mut model: BTreeMap<String, i32> = BTreeMap::new();

        for op in ops {
            match op {
                Operation::Insert(key, value) => {
                    let (_, inserted) = trie.insert(key.as_str(), value);
                    let expected = !model.contains_key(&key);
                    model.entry(key).or_insert(value);
                    prop_assert_eq!(inserted, expected);
                }
                Operation::Assign(key, value) => {
                    let (_, inserted) = trie.insert_or_assign(key.as_str(), value);
                    prop_assert_eq!(inserted, model.insert(key, value).is_none());
                }
                Operation::Remove(key) => {
                    prop_assert_eq!(trie.remove(key.as_str()), model.remove(&key));
                }
                Operation::EraseSubtree(prefix) => {
                    let cursor = trie.find(prefix.as_str());
                    if cursor.is_end() {
                        let covered = model.keys().any(|k| k.starts_with(&prefix));
                        prop_assert!(prefix.is_empty() || !covered);
                        continue;
                    }
                    let expected = model.keys().filter(|k| k.starts_with(&prefix)).count();
                    model.retain(|k, _| !k.starts_with(&prefix));
                    prop_assert_eq!(trie.erase_subtree(cursor), Ok(expected));
                }
            }
            prop_assert_eq!(trie.len(), model.len());
        }

        let trie_pairs: Vec<_> = trie.iter().map(|(k, v)| (k, *v)).collect();
        let model_pairs: Vec<_> = model.into_iter().collect();
        prop_assert_eq!(trie_pairs, model_pairs);
        assert_no_dangling_nodes(&trie);
    }

    #[test]
    fn keys_iterate_in_sorted_order(pairs in wide_key_value_pairs(1, 100)) {
        let trie: Trie<i32> = pairs.iter().map(|(k, v)| (k.as_str(), *v)).collect();

        let unique: HashSet<&String> = pairs.iter().map(|(k, _)| k).collect();
        let mut expected: Vec<String> = unique.into_iter().cloned().collect();
        expected.sort_by(|a, b| a.chars().cmp(b.chars()));

        prop_assert_eq!(trie.keys().collect::<Vec<_>>(), expected);
        prop_assert_eq!(trie.len(), trie.iter().len());
    }

    #[test]
    fn cursor_walk_visits_every_key(pairs in key_value_pairs(1, 60)) {
        let mut trie = Trie::new();
        trie.insert_many(pairs.iter().map(|(k, v)| (k.as_str(), *v)));

        let mut walked = Vec::new();
        let mut cursor = trie.begin();
        while cursor != trie.end() {
            if trie.is_key(cursor).unwrap() {
                walked.push(trie.full_key(cursor).unwrap());
            }
            cursor = trie.advance(cursor).unwrap();
        }
        prop_assert_eq!(walked, trie.keys().collect::<Vec<_>>());
    }

    #[test]
    fn erase_returns_the_successor(
        pairs in key_value_pairs(2, 60),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut trie: Trie<i32> = Trie::new();
        trie.insert_or_assign_many(pairs.iter().map(|(k, v)| (k.as_str(), *v)));
        let keys: Vec<String> = trie.keys().collect();
        let victim = pick.get(&keys).clone();

        let later: Vec<String> = keys.iter().filter(|k| **k > victim).cloned().collect();
        let next = trie.erase(trie.find(victim.as_str())).unwrap();

        // the successor may be a path node: the first key at or after it comes next
        let mut cursor = next;
        while cursor != trie.end() && !trie.is_key(cursor).unwrap() {
            cursor = trie.advance(cursor).unwrap();
        }
        match later.first() {
            Some(expected) => prop_assert_eq!(&trie.full_key(cursor).unwrap(), expected),
            None => prop_assert_eq!(cursor, trie.end()),
        }
        prop_assert!(!trie.contains_key(victim.as_str()));
        prop_assert_eq!(trie.len(), keys.len() - 1);
        assert_no_dangling_nodes(&trie);
    }

    #[test]
    fn erasing_a_key_keeps_its_extensions(pairs in key_value_pairs(1, 60)) {
        let mut trie: Trie<i32> = Trie::new();
        trie.insert_or_assign_many(pairs.iter().map(|(k, v)| (k.as_str(), *v)));
        let before: BTreeMap<String, i32> = trie.iter().map(|(k, v)| (k, *v)).collect();

        for key in before.keys() {
            let mut copy = trie.clone();
            prop_assert_eq!(copy.erase_key(key.as_str()), 1);
            for (other, value) in &before {
                if other != key {
                    prop_assert_eq!(copy.get(other.as_str()), Some(value));
                }
            }
        }
        prop_assert_eq!(trie.len(), before.len());
    }

    #[test]
    fn sub_trie_sees_exactly_the_prefixed_keys(
        pairs in key_value_pairs(1, 60),
        prefix in "[a-d]{1,2}",
    ) {
        let mut trie: Trie<i32> = Trie::new();
        trie.insert_or_assign_many(pairs.iter().map(|(k, v)| (k.as_str(), *v)));
        let expected: Vec<(String, i32)> = trie
            .iter()
            .filter_map(|(k, v)| k.strip_prefix(prefix.as_str()).map(|rest| (rest.to_string(), *v)))
            .collect();
        let total = trie.len();

        match trie.get_sub_trie(prefix.as_str()) {
            Ok(mut view) => {
                let seen: Vec<_> = view.iter().map(|(k, v)| (k, *v)).collect();
                prop_assert_eq!(&seen, &expected);
                view.clear();
                prop_assert!(view.is_empty());
            }
            Err(err) => {
                prop_assert_eq!(err, TrieError::NotFound);
                prop_assert!(expected.is_empty());
            }
        }
        prop_assert_eq!(trie.len(), total - expected.len());
        prop_assert!(!trie.starts_with(prefix.as_str()));
        assert_no_dangling_nodes(&trie);
    }

    #[test]
    fn clone_is_deep_copy(pairs in key_value_pairs(1, 60)) {
        let trie: Trie<i32> = pairs.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        let mut copy = trie.clone();
        prop_assert_eq!(&copy, &trie);

        copy.clear();
        prop_assert!(copy.is_empty());
        for (key, _) in &pairs {
            prop_assert!(trie.contains_key(key.as_str()));
        }
    }

    #[test]
    fn retain_matches_model(pairs in key_value_pairs(1, 60)) {
        let mut trie: Trie<i32> = pairs.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        let mut model: BTreeMap<String, i32> = pairs.into_iter().collect();

        trie.retain(|_, v| *v % 2 == 0);
        model.retain(|_, v| *v % 2 == 0);

        let trie_pairs: Vec<_> = trie.iter().map(|(k, v)| (k, *v)).collect();
        prop_assert_eq!(trie_pairs, model.into_iter().collect::<Vec<_>>());
        assert_no_dangling_nodes(&trie);
    }

    #[test]
    fn trie_round_trip_serialization(pairs in wide_key_value_pairs(1, 100)) {
        use serde::{Deserialize, Serialize};

        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct TestStruct {
            data: Vec<(String, i32)>,
        }

        let trie: Trie<i32> = pairs.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        let test_struct = TestStruct {
            data: trie.iter().map(|(k, &v)| (k, v)).collect(),
        };

        let serialized = serde_json::to_string(&test_struct).unwrap();
        let deserialized: TestStruct = serde_json::from_str(&serialized).unwrap();
        prop_assert_eq!(&deserialized, &test_struct);

        let rebuilt: Trie<i32> = deserialized.data.into_iter().collect();
        prop_assert_eq!(rebuilt, trie);
    }
}
