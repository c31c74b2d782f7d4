//! Lookup of live counter groups by their identifier.

use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::debug;

use crate::config::Opts;
use crate::count::Measurement;
use crate::error::{Error, Result};
use crate::event::Counter;


/// Owner of every counter group created through it, keyed by [group id][Measurement::id].
///
/// Callers which only carry a bare integer between calls (e.g. bindings to
/// another language) keep one registry alive for as long as they count, and
/// refer to groups by the id [`create`][Self::create] returned. Dropping the
/// registry stops every group still registered.
///
/// The registry is not synchronized, wrap it in a `Mutex` to share it between threads.
///
/// # Examples
///
/// ```rust,no_run
/// use perf_counter_group::event::Counter;
/// use perf_counter_group::registry::Registry;
///
/// let mut registry = Registry::default();
///
/// let codes = [Counter::Cycles.code(), Counter::Instructions.code(), Counter::Cycles.code()];
/// let id = registry.create(&codes).unwrap();
///
/// let mut report = [0; 3];
/// registry.read_all(id, &mut report).unwrap();
/// assert_eq!(report[0], report[2]);
///
/// registry.stop(id);
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    opts: Opts,
    groups: HashMap<i32, Measurement>,
}

impl Registry {
    /// Creates an empty registry opening groups with `opts`.
    pub fn new(opts: impl Borrow<Opts>) -> Self {
        Self {
            opts: opts.borrow().clone(),
            groups: HashMap::new(),
        }
    }

    /// Takes ownership of `measurement`, returns its id.
    ///
    /// A measurement without counters has id `-1`, registering another one
    /// replaces and stops the previous.
    pub fn register(&mut self, measurement: Measurement) -> i32 {
        let id = measurement.id();
        match self.groups.entry(id) {
            Entry::Occupied(mut it) => {
                debug!("replacing counter group {}", id);
                it.insert(measurement).stop();
            }
            Entry::Vacant(it) => {
                it.insert(measurement);
            }
        }
        id
    }

    pub fn lookup(&self, id: i32) -> Result<&Measurement> {
        self.groups.get(&id).ok_or(Error::UnknownGroup(id))
    }

    pub fn lookup_mut(&mut self, id: i32) -> Result<&mut Measurement> {
        self.groups.get_mut(&id).ok_or(Error::UnknownGroup(id))
    }

    /// Stops the group with `id` and forgets it.
    pub fn unregister(&mut self, id: i32) -> Result<()> {
        let measurement = self.groups.remove(&id).ok_or(Error::UnknownGroup(id))?;
        measurement.stop();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.groups.keys().copied()
    }

    /// Starts a group counting the counters coded by `codes`, returns its id.
    ///
    /// Every code is checked before any counter is opened.
    pub fn create(&mut self, codes: &[i32]) -> Result<i32> {
        let counters = codes
            .iter()
            .map(|&code| Counter::try_from(code))
            .collect::<Result<Vec<_>>>()?;

        let measurement = Measurement::begin_with(counters, &self.opts)?;
        Ok(self.register(measurement))
    }

    /// Reads the counter coded by `code` of group `id`.
    ///
    /// Returns `None` if the counter is not part of the group.
    pub fn read(&self, id: i32, code: i32) -> Result<Option<i64>> {
        let measurement = self.lookup(id)?;
        measurement.read(Counter::try_from(code)?)
    }

    /// Writes all counters of group `id` into `out` in the order they were requested.
    pub fn read_all(&self, id: i32, out: &mut [i64]) -> Result<()> {
        self.lookup(id)?.read_all_into(out)
    }

    /// Resets group `id`, unknown ids are ignored.
    pub fn reset(&self, id: i32) {
        if let Ok(measurement) = self.lookup(id) {
            measurement.reset();
        }
    }

    /// Stops group `id`, unknown ids are ignored.
    pub fn stop(&mut self, id: i32) {
        if let Some(measurement) = self.groups.remove(&id) {
            measurement.stop();
        }
    }
}
