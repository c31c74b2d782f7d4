use arrayvec::ArrayVec;

use crate::config::MAX_COUNTERS;
use crate::event::Counter;

/// Length in `u64` words of a group read with [`MAX_COUNTERS`] members.
pub(crate) const READ_BUF_LEN: usize = 1 + 2 * MAX_COUNTERS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RawEntry {
    pub value: u64,
    pub id: u64,
}

/// A decoded group read, entries are in the order the kernel reported them.
#[derive(Debug)]
pub(crate) struct GroupStat {
    pub nr: usize,
    pub entries: ArrayVec<RawEntry, MAX_COUNTERS>,
}

impl GroupStat {
    // https://github.com/torvalds/linux/blob/v6.13/include/uapi/linux/perf_event.h#L344
    // With `PERF_FORMAT_GROUP | PERF_FORMAT_ID`:
    // struct read_format {
    //     u64 nr;
    //     struct {
    //         u64 value;
    //         u64 id;
    //     } cntr[nr];
    // };
    //
    // Entries beyond the words actually read or beyond the buffer capacity are
    // dropped, `nr` is kept as reported so callers can check it.
    pub(crate) fn from_buf(buf: &[u64]) -> Self {
        let mut words = buf.iter().copied();

        let nr = words.next().unwrap_or(0) as usize;
        let mut entries = ArrayVec::new();
        while entries.len() < nr.min(MAX_COUNTERS) {
            let (Some(value), Some(id)) = (words.next(), words.next()) else {
                break;
            };
            entries.push(RawEntry { value, id });
        }

        Self { nr, entries }
    }
}

/// Values of one group read.
///
/// Entries keep the order the kernel reported them in, which is not
/// necessarily the order the counters were requested in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    values: ArrayVec<(Counter, i64), MAX_COUNTERS>,
}

impl Snapshot {
    pub(crate) fn push(&mut self, counter: Counter, value: i64) {
        self.values.push((counter, value));
    }

    /// Returns the value of `counter`, or `None` if it is not in the group.
    pub fn get(&self, counter: Counter) -> Option<i64> {
        self.values
            .iter()
            .find_map(|&(it, value)| (it == counter).then_some(value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Counter, i64)> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
