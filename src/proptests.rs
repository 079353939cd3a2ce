use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

fn validate_index(t: &Index) {
    let groups = t.groups();
    for pair in groups.windows(2) {
        assert!(
            pair[0].letter() < pair[1].letter(),
            "groups must be strictly ascending"
        );
    }

    let mut seen = std::collections::HashSet::new();
    let mut total = 0usize;
    for group in groups {
        assert!(group.letter().is_ascii_uppercase(), "group tag must be A..=Z");
        assert!(!group.is_empty(), "empty group left in the index");
        for (slot, bucket) in group.buckets().iter().enumerate() {
            assert_eq!(bucket.iter().count(), bucket.len(), "bucket length drift");
            for record in bucket.iter() {
                let initials = ident::parse(record.id()).expect("stored id must parse");
                assert_eq!(initials.first_letter(), Some(group.letter()));
                assert_eq!(initials.second_slot(), Some(slot));
                assert!(seen.insert(record.id().to_owned()), "duplicate id stored");
                total += 1;
            }
        }
    }
    assert_eq!(total, t.len(), "reachable record count must match Index::len");
}

#[derive(Clone, Debug)]
enum Op {
    Insert(Record),
    Remove(String),
    Find(String),
    CloneAndMutate(Record),
}

fn id_strategy() -> impl Strategy<Value = String> + Clone {
    // A small alphabet keeps collisions (and therefore duplicates and
    // multi-record buckets) frequent; a few malformed shapes are mixed in.
    prop_oneof![
        8 => ("[A-Da-d][a-c]{0,2}", "[A-Ca-c1][a-c]{0,2}").prop_map(|(a, b)| format!("{a} {b}")),
        1 => "[A-Da-d]{0,3}",
        1 => "[A-D]{1,2} ",
    ]
}

fn time_strategy() -> impl Strategy<Value = Option<Time>> {
    prop::option::of((0u32..24, 0u32..60, 0u32..60).prop_map(|(h, m, s)| Time::new(h, m, s)))
}

fn record_strategy() -> impl Strategy<Value = Record> {
    (id_strategy(), any::<u32>(), time_strategy()).prop_map(|(id, code, time)| {
        let r = Record::new(id, code);
        match time {
            Some(t) => r.with_time(t),
            None => r,
        }
    })
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        50 => record_strategy().prop_map(Op::Insert),
        25 => id_strategy().prop_map(Op::Remove),
        20 => id_strategy().prop_map(Op::Find),
        5 => record_strategy().prop_map(Op::CloneAndMutate),
    ];
    prop::collection::vec(op, 0..=400)
}

fn well_formed(id: &str) -> bool {
    ident::parse(id)
        .map(|i| i.first_letter().is_some() && i.second_slot().is_some())
        .unwrap_or(false)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in ops_strategy()) {
        let mut t = Index::new();
        let mut m: BTreeMap<String, Record> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(record) => {
                    let before = t.len();
                    let res = t.insert(&record);
                    if !well_formed(record.id()) {
                        let is_invalid = matches!(res, Err(Error::InvalidIdentifier { .. }));
                        prop_assert!(is_invalid);
                    } else if m.contains_key(record.id()) {
                        let is_dup = matches!(res, Err(Error::DuplicateIdentifier(_)));
                        prop_assert!(is_dup);
                        prop_assert_eq!(t.len(), before);
                    } else {
                        prop_assert!(res.is_ok());
                        prop_assert_eq!(t.len(), before + 1);
                        m.insert(record.id().to_owned(), record);
                    }
                }
                Op::Remove(id) => {
                    let before = t.len();
                    let res = t.remove(&id);
                    match m.remove(&id) {
                        Some(expected) => {
                            prop_assert_eq!(res.ok(), Some(expected));
                            prop_assert_eq!(t.len(), before - 1);
                        }
                        None => {
                            prop_assert!(res.is_err());
                            prop_assert_eq!(t.len(), before);
                        }
                    }
                }
                Op::Find(id) => {
                    prop_assert_eq!(t.find(&id), m.get(&id));
                }
                Op::CloneAndMutate(record) => {
                    let snapshot = t.clone();
                    prop_assert_eq!(&snapshot, &t);
                    let mut copy = t.clone();
                    let _ = copy.insert(&record);
                    if let Some(first) = m.keys().next() {
                        let _ = copy.remove(first);
                    }
                    prop_assert_eq!(&snapshot, &t);
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        validate_index(&t);
        let mut got: Vec<&Record> = t.iter().collect();
        got.sort_by(|a, b| a.id().cmp(b.id()));
        let expected: Vec<&Record> = m.values().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_codec_roundtrip(records in prop::collection::vec(record_strategy(), 1..=200)) {
        let mut t = Index::new();
        for r in &records {
            let _ = t.insert(r);
        }
        let mut bytes = Vec::new();
        let res = codec::write_to(&t, &mut bytes);
        if t.is_empty() {
            let is_empty_err = matches!(res, Err(Error::EmptyStructure));
            prop_assert!(is_empty_err);
        } else {
            prop_assert!(res.is_ok());
            let back = codec::read_from(bytes.as_slice()).unwrap();
            validate_index(&back);
            prop_assert_eq!(&back, &t);
            // Re-insertion reverses order within a bucket, so compare the
            // dumps as sets of lines.
            let mut got: Vec<String> = back.to_string().lines().map(str::to_owned).collect();
            let mut expected: Vec<String> = t.to_string().lines().map(str::to_owned).collect();
            got.sort();
            expected.sort();
            prop_assert_eq!(got, expected);
        }
    }
}

#[test]
fn exhaustive_remove_order_drops_groups() {
    let ids = ["Ann Bell", "Ann Cole", "Bo Bell", "Cy Dunn", "cy Doe"];
    let mut base = Index::new();
    for (i, id) in ids.iter().enumerate() {
        base.insert(&Record::new(*id, i as u32)).unwrap();
    }

    // All 120 removal orders.
    let mut order: Vec<usize> = (0..ids.len()).collect();
    let mut perms = Vec::new();
    permutations(&mut order, 0, &mut perms);
    assert_eq!(perms.len(), 120);

    for perm in perms {
        let mut t = base.clone();
        for &i in &perm {
            t.remove(ids[i]).unwrap();
            validate_index(&t);
            for letter in t.letters() {
                assert!(
                    t.iter().any(|r| r.id().as_bytes()[0].to_ascii_uppercase() == letter as u8),
                    "group {letter} has no records"
                );
            }
        }
        assert!(t.is_empty());
        assert_eq!(t.group_count(), 0);
    }
    assert_eq!(base.len(), ids.len());
}

fn permutations(items: &mut Vec<usize>, k: usize, out: &mut Vec<Vec<usize>>) {
    if k == items.len() {
        out.push(items.clone());
        return;
    }
    for i in k..items.len() {
        items.swap(k, i);
        permutations(items, k + 1, out);
        items.swap(k, i);
    }
}
