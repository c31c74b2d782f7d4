//! Counting with groups of counters.

use std::borrow::Borrow;
use std::collections::HashMap;

use crate::config::Opts;
use crate::error::Result;
use crate::event::Counter;

pub mod group;
mod stat;
#[cfg(test)]
mod test;

use group::CounterGroup;
pub use stat::*;

/// A counter group together with the counters it was requested with.
///
/// The requested counters may contain duplicates, the group opens each of them
/// only once but [`read_all`][Self::read_all] still reports them in the request
/// shape.
///
/// # Examples
///
/// ```rust,no_run
/// use perf_counter_group::count::Measurement;
/// use perf_counter_group::event::Counter;
///
/// let m = Measurement::begin([Counter::Cycles, Counter::Instructions]).unwrap();
///
/// for _ in 0..5 {
///     m.reset();
///     std::hint::black_box((1..=20u64).product::<u64>());
///     let values = m.read_all().unwrap();
///     println!("{} cycles, {} instructions", values[0], values[1]);
/// }
///
/// m.stop();
/// ```
#[derive(Debug)]
pub struct Measurement {
    group: CounterGroup,
    counters: Vec<Counter>,
    order: HashMap<Counter, usize>,
}

impl Measurement {
    /// Starts counting `counters` with default options.
    pub fn begin(counters: impl IntoIterator<Item = Counter>) -> Result<Self> {
        Self::begin_with(counters, Opts::default())
    }

    pub fn begin_with(
        counters: impl IntoIterator<Item = Counter>,
        opts: impl Borrow<Opts>,
    ) -> Result<Self> {
        let counters: Vec<_> = counters.into_iter().collect();
        let group = CounterGroup::open(counters.iter().copied(), opts)?;
        let order = creation_order(&counters);

        Ok(Self {
            group,
            counters,
            order,
        })
    }

    /// The group identifier, see [`CounterGroup::id`].
    pub fn id(&self) -> i32 {
        self.group.id()
    }

    pub fn group(&self) -> &CounterGroup {
        &self.group
    }

    /// The counters as requested, duplicates included.
    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    /// Position of the first occurrence of each counter in the request.
    pub fn order(&self) -> &HashMap<Counter, usize> {
        &self.order
    }

    /// Reads the current value of `counter`.
    ///
    /// Returns `None` if `counter` was not requested.
    pub fn read(&self, counter: Counter) -> Result<Option<i64>> {
        if !self.group.contains(counter) {
            return Ok(None);
        }

        let mut result = None;
        self.group.read(|it, value| {
            if it == counter {
                result = Some(value);
            }
        })?;
        Ok(result)
    }

    /// Reads the current value of the first requested counter.
    pub fn read_first(&self) -> Result<Option<i64>> {
        match self.counters.first() {
            Some(&counter) => self.read(counter),
            None => Ok(None),
        }
    }

    /// Reads all counters in request order.
    pub fn read_all(&self) -> Result<Vec<i64>> {
        let mut out = vec![0; self.counters.len()];
        self.read_all_into(&mut out)?;
        Ok(out)
    }

    /// Writes the value of each requested counter at its position in the request.
    ///
    /// Duplicated counters get the same value at every position. Slots beyond the
    /// request length are left untouched.
    pub fn read_all_into(&self, out: &mut [i64]) -> Result<()> {
        let snapshot = self.group.snapshot()?;
        project(&snapshot, &self.counters, out);
        Ok(())
    }

    /// Clears the counts of all counters, see [`CounterGroup::reset`].
    pub fn reset(&self) {
        self.group.reset();
    }

    /// Stops counting and releases all counters.
    pub fn stop(mut self) {
        self.group.close();
    }
}

/// Collapses duplicated counters into their first occurrence.
pub fn dedup(counters: impl IntoIterator<Item = Counter>) -> Vec<Counter> {
    let mut seen = [false; Counter::ALL.len()];
    counters
        .into_iter()
        .filter(|&it| !std::mem::replace(&mut seen[it.code() as usize], true))
        .collect()
}

/// Maps each counter to the position of its first occurrence.
pub fn creation_order(counters: &[Counter]) -> HashMap<Counter, usize> {
    let mut order = HashMap::with_capacity(counters.len());
    for (i, &counter) in counters.iter().enumerate() {
        order.entry(counter).or_insert(i);
    }
    order
}

fn project(snapshot: &Snapshot, counters: &[Counter], out: &mut [i64]) {
    for (slot, &counter) in out.iter_mut().zip(counters) {
        if let Some(value) = snapshot.get(counter) {
            *slot = value;
        }
    }
}
