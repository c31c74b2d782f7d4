use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use super::group::dispatch;
use super::stat::{GroupStat, RawEntry};
use super::{creation_order, dedup, project, Snapshot};
use crate::event::Counter;

fn counter() -> impl Strategy<Value = Counter> {
    (0..Counter::ALL.len()).prop_map(|i| Counter::ALL[i])
}

// `nr` followed by `{ value, id }` pairs.
fn group_buf(entries: &[(u64, u64)]) -> Vec<u64> {
    let mut buf = vec![entries.len() as u64];
    for &(value, id) in entries {
        buf.extend([value, id]);
    }
    buf
}

#[test]
fn test_dedup_keeps_first_occurrence() {
    use Counter::*;

    let counters = dedup([Cycles, Instructions, Cycles, TaskClock, Instructions]);
    assert_eq!(counters, vec![Cycles, Instructions, TaskClock]);
    assert!(dedup([]).is_empty());
}

#[test]
fn test_creation_order() {
    use Counter::*;

    let order = creation_order(&[Cycles, Instructions, Cycles]);
    assert_eq!(order, HashMap::from([(Cycles, 0), (Instructions, 1)]));
}

#[test]
fn test_decode_group_read() {
    let buf = group_buf(&[(10, 7), (20, 3)]);
    let stat = GroupStat::from_buf(&buf);

    assert_eq!(stat.nr, 2);
    assert_eq!(
        stat.entries.as_slice(),
        &[RawEntry { value: 10, id: 7 }, RawEntry { value: 20, id: 3 }]
    );
}

#[test]
fn test_decode_short_read() {
    // The kernel claims 3 entries but only 1.5 were read.
    let buf: [u64; 4] = [3, 10, 7, 20];
    let stat = GroupStat::from_buf(&buf);

    assert_eq!(stat.nr, 3);
    assert_eq!(stat.entries.len(), 1);

    let stat = GroupStat::from_buf(&[]);
    assert_eq!(stat.nr, 0);
    assert!(stat.entries.is_empty());
}

#[test]
fn test_dispatch_follows_kernel_order() {
    let ids = HashMap::from([(100, Counter::Cycles), (200, Counter::Instructions)]);
    // Reported in the reverse order of opening.
    let stat = GroupStat::from_buf(&group_buf(&[(5, 200), (9, 100)]));

    let mut seen = vec![];
    dispatch(&stat, 2, &ids, &mut |counter, value| seen.push((counter, value)));

    assert_eq!(seen, vec![(Counter::Instructions, 5), (Counter::Cycles, 9)]);
}

#[test]
fn test_dispatch_value_is_signed() {
    let ids = HashMap::from([(1, Counter::CpuClock)]);
    let stat = GroupStat::from_buf(&group_buf(&[(u64::MAX, 1)]));

    let mut seen = vec![];
    dispatch(&stat, 1, &ids, &mut |counter, value| seen.push((counter, value)));

    assert_eq!(seen, vec![(Counter::CpuClock, -1)]);
}

#[test]
#[should_panic(expected = "incorrect counter count")]
fn test_dispatch_count_mismatch() {
    let ids = HashMap::from([(1, Counter::Cycles), (2, Counter::Instructions)]);
    let stat = GroupStat::from_buf(&group_buf(&[(5, 1)]));
    dispatch(&stat, 2, &ids, &mut |_, _| {});
}

#[test]
#[should_panic(expected = "counter not registered")]
fn test_dispatch_unknown_id() {
    let ids = HashMap::from([(1, Counter::Cycles)]);
    let stat = GroupStat::from_buf(&group_buf(&[(5, 42)]));
    dispatch(&stat, 1, &ids, &mut |_, _| {});
}

#[test]
fn test_project_duplicates() {
    use Counter::*;

    let mut snapshot = Snapshot::default();
    snapshot.push(Instructions, 200);
    snapshot.push(Cycles, 100);

    let mut out = [-1; 4];
    project(&snapshot, &[Cycles, Instructions, Cycles], &mut out);

    assert_eq!(out, [100, 200, 100, -1]);
}

#[test]
fn test_snapshot_lookup() {
    let mut snapshot = Snapshot::default();
    assert!(snapshot.is_empty());

    snapshot.push(Counter::BranchMisses, 3);
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get(Counter::BranchMisses), Some(3));
    assert_eq!(snapshot.get(Counter::CacheMisses), None);
    assert_eq!(snapshot.iter().collect::<Vec<_>>(), vec![(Counter::BranchMisses, 3)]);
}

proptest! {
    #[test]
    fn prop_dedup_is_distinct_and_complete(counters in prop::collection::vec(counter(), 0..32)) {
        let distinct = dedup(counters.iter().copied());
        let order = creation_order(&counters);

        let unique: HashSet<_> = counters.iter().copied().collect();
        prop_assert_eq!(distinct.len(), unique.len());
        prop_assert_eq!(order.len(), distinct.len());

        let positions: HashSet<_> = order.values().copied().collect();
        prop_assert_eq!(positions.len(), order.len());

        for (&counter, &i) in &order {
            prop_assert_eq!(counters[i], counter);
            prop_assert!(!counters[..i].contains(&counter));
        }
    }

    #[test]
    fn prop_dispatch_reports_each_member_once(
        counters in prop::collection::vec(counter(), 1..16),
        seed in any::<u64>(),
    ) {
        let distinct = dedup(counters);
        let ids: HashMap<u64, Counter> = distinct
            .iter()
            .enumerate()
            .map(|(i, &c)| (seed.wrapping_add(i as u64 * 31), c))
            .collect();

        // Any permutation of the members is a valid kernel report.
        let mut entries: Vec<(u64, u64)> = ids.keys().map(|&id| (id ^ 0xff, id)).collect();
        entries.sort_by_key(|&(_, id)| id.rotate_left(7));

        let stat = GroupStat::from_buf(&group_buf(&entries));
        let mut seen = vec![];
        dispatch(&stat, distinct.len(), &ids, &mut |counter, _| seen.push(counter));

        seen.sort();
        let mut expected = distinct.clone();
        expected.sort();
        prop_assert_eq!(seen, expected);
    }
}
