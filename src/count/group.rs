use std::borrow::Borrow;
use std::cell::UnsafeCell;
use std::collections::HashMap;
use std::fs::File;
use std::io;

use log::{debug, trace, warn};

use super::dedup;
use super::stat::{GroupStat, Snapshot, READ_BUF_LEN};
use crate::config::attr::from;
use crate::config::Opts;
use crate::error::{Error, Result};
use crate::event::Counter;
use crate::ffi::{self, bindings as b, syscall};

/// Counter group.
///
/// A group opens one counter per distinct requested [`Counter`] for the calling
/// process on any CPU. The first counter becomes the group leader and the others
/// are opened as its siblings, so the group is scheduled onto the CPU as a unit:
/// it will be put onto the CPU only if all of its counters can be.
///
/// This means that the values of the member counters can be meaningfully compared,
/// added, divided (to get ratios), and so on with each other, since they have
/// counted events for the same set of executed instructions.
///
/// The group is counting once [`open`][Self::open] returns, and stays so until
/// it is [closed][Self::close] or dropped.
///
/// # Examples
///
/// ```rust,no_run
/// use perf_counter_group::config::Opts;
/// use perf_counter_group::count::group::CounterGroup;
/// use perf_counter_group::event::Counter;
///
/// let counters = [Counter::Instructions, Counter::Cycles];
/// let group = CounterGroup::open(counters, Opts::default()).unwrap();
///
/// std::hint::black_box((0..1000).sum::<u64>());
///
/// let stat = group.snapshot().unwrap();
/// let instrs = stat.get(Counter::Instructions).unwrap();
/// let cycles = stat.get(Counter::Cycles).unwrap();
///
/// println!("IPC: {}", instrs as f64 / cycles as f64);
/// ```
#[derive(Debug)]
pub struct CounterGroup {
    // Leader first, then siblings in opening order.
    //
    // An empty vector means the group never had counters or has been torn down.
    members: Vec<Member>,

    // Event ID assigned by the kernel -> counter kind.
    ids: HashMap<u64, Counter>,

    // There could be only up to one reference to `read_buf` at the same time,
    // since `CounterGroup` is not `Sync`.
    read_buf: UnsafeCell<Vec<u64>>,
}

#[derive(Debug)]
struct Member {
    counter: Counter,
    perf: File,
}

impl CounterGroup {
    /// Opens and enables a group counting `counters`.
    ///
    /// Duplicated counters are collapsed into their first occurrence. If any counter
    /// fails to open, every counter opened so far is closed before the error returns.
    pub fn open(
        counters: impl IntoIterator<Item = Counter>,
        opts: impl Borrow<Opts>,
    ) -> Result<Self> {
        if !ffi::SUPPORTED {
            return Err(Error::UnsupportedPlatform);
        }

        let opts = opts.borrow();
        let counters = dedup(counters);

        let max = opts.ceiling();
        if counters.len() > max {
            return Err(Error::TooManyCounters {
                requested: counters.len(),
                max,
            });
        }

        // Members are owned files, an early return closes all of them.
        let mut members: Vec<Member> = Vec::with_capacity(counters.len());
        let mut ids = HashMap::with_capacity(counters.len());

        for counter in counters {
            let leader = members.first().map(|it| &it.perf);
            let (perf, id) = open_member(counter, leader, opts)
                .map_err(|source| Error::CounterOpenFailure { counter, source })?;

            ids.insert(id, counter);
            members.push(Member { counter, perf });
        }

        let read_buf = if members.is_empty() {
            vec![]
        } else {
            vec![0; READ_BUF_LEN]
        };
        let group = Self {
            members,
            ids,
            read_buf: UnsafeCell::new(read_buf),
        };

        if let Some(leader) = group.members.first() {
            ioctl_group(&leader.perf, b::PERF_IOC_OP_ENABLE).map_err(|source| {
                Error::CounterOpenFailure {
                    counter: leader.counter,
                    source,
                }
            })?;
        }

        debug!(
            "opened counter group {} with {:?}",
            group.id(),
            group.counters().collect::<Vec<_>>()
        );

        Ok(group)
    }

    /// The descriptor of the group leader, `-1` if the group has no counters.
    pub fn id(&self) -> i32 {
        self.members.first().map_or(-1, |it| ffi::raw_fd(&it.perf))
    }

    /// Counters of the group in the order they were opened.
    pub fn counters(&self) -> impl Iterator<Item = Counter> + '_ {
        self.members.iter().map(|it| it.counter)
    }

    pub fn contains(&self, counter: Counter) -> bool {
        self.members.iter().any(|it| it.counter == counter)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Reads all counters of the group at once.
    ///
    /// `f` is called once per counter, in the order the kernel reports them.
    /// Reading an empty group does nothing. A failed read leaves the group usable.
    pub fn read(&self, mut f: impl FnMut(Counter, i64)) -> Result<()> {
        let Some(leader) = self.members.first() else {
            return Ok(());
        };

        let buf = unsafe { &mut *self.read_buf.get() };
        let bytes: usize =
            syscall!(read, &leader.perf, buf.as_mut_slice()).map_err(Error::ReadFailure)?;
        if bytes == 0 {
            let e = io::Error::from(io::ErrorKind::UnexpectedEof);
            return Err(Error::ReadFailure(e));
        }

        let stat = GroupStat::from_buf(&buf[..bytes / size_of::<u64>()]);
        trace!("group {} read {} bytes: {:?}", self.id(), bytes, stat);

        dispatch(&stat, self.members.len(), &self.ids, &mut f);
        Ok(())
    }

    /// Reads all counters of the group into a [`Snapshot`].
    pub fn snapshot(&self) -> Result<Snapshot> {
        let mut snapshot = Snapshot::default();
        self.read(|counter, value| snapshot.push(counter, value))?;
        Ok(snapshot)
    }

    /// Clears the counts of all counters in the group, they keep counting.
    ///
    /// Resetting is best effort: a failure of the kernel call is ignored.
    pub fn reset(&self) {
        if let Some(leader) = self.members.first() {
            if let Err(e) = ioctl_group(&leader.perf, b::PERF_IOC_OP_RESET) {
                debug!("ignored reset failure of group {}: {}", self.id(), e);
            }
        }
    }

    /// Enables all counters in the group.
    pub fn enable(&self) -> Result<()> {
        match self.members.first() {
            Some(leader) => ioctl_group(&leader.perf, b::PERF_IOC_OP_ENABLE)
                .map_err(Error::ControlFailure),
            None => Ok(()),
        }
    }

    /// Disables all counters in the group, their counts are kept.
    pub fn disable(&self) -> Result<()> {
        match self.members.first() {
            Some(leader) => ioctl_group(&leader.perf, b::PERF_IOC_OP_DISABLE)
                .map_err(Error::ControlFailure),
            None => Ok(()),
        }
    }

    /// Disables the group and closes all of its counters.
    ///
    /// The group is empty afterwards, closing it again does nothing.
    pub fn close(&mut self) {
        let Some(leader) = self.members.first() else {
            return;
        };

        let id = ffi::raw_fd(&leader.perf);
        if let Err(e) = ioctl_group(&leader.perf, b::PERF_IOC_OP_DISABLE) {
            warn!("failed to disable counter group {}: {}", id, e);
        }

        // Siblings go first, the leader is closed last.
        while let Some(member) = self.members.pop() {
            drop(member);
        }
        self.ids.clear();
        self.read_buf.get_mut().clear();

        debug!("closed counter group {}", id);
    }
}

impl Drop for CounterGroup {
    fn drop(&mut self) {
        self.close();
    }
}

fn open_member(counter: Counter, leader: Option<&File>, opts: &Opts) -> io::Result<(File, u64)> {
    let attr = from(counter.event_config(), opts, leader.is_none());
    let group_fd = leader.map_or(-1, ffi::raw_fd);
    let flags = b::PERF_FLAG_FD_CLOEXEC;

    // Current process, any CPU.
    let perf: File = syscall!(perf_event_open, &attr, 0, -1, group_fd, flags)?;

    let mut id: u64 = 0;
    let _: i32 = syscall!(ioctl_argp, &perf, b::PERF_IOC_OP_ID, &mut id)?;

    Ok((perf, id))
}

fn ioctl_group(perf: &File, op: u64) -> io::Result<()> {
    let _: i32 = syscall!(ioctl_arg, perf, op, b::PERF_IOC_FLAG_GROUP)?;
    Ok(())
}

// The kernel reports exactly one entry per group member, anything else means
// the read format assumptions are broken.
pub(super) fn dispatch(
    stat: &GroupStat,
    len: usize,
    ids: &HashMap<u64, Counter>,
    f: &mut impl FnMut(Counter, i64),
) {
    assert_eq!(stat.nr, len, "incorrect counter count");
    assert_eq!(stat.entries.len(), len, "truncated group read");

    for entry in &stat.entries {
        let Some(&counter) = ids.get(&entry.id) else {
            panic!("counter not registered: event id {}", entry.id);
        };
        f(counter, entry.value as i64);
    }
}
