//! Options controlling how counter groups are opened.

pub(crate) mod attr;
#[cfg(test)]
mod test;

/// Capacity of the read buffer every group allocates.
///
/// This is the practical limit of counters the kernel can schedule as one group,
/// [`Opts::max_counters`] larger than this is clamped to it.
pub const MAX_COUNTERS: usize = 64;

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Opts {
    /// Maximum number of distinct counters in a group.
    ///
    /// Defaults to [`MAX_COUNTERS`].
    pub max_counters: usize,

    /// Privilege levels excluded from counting.
    pub exclude: Priv,

    /// Keep the group leader on the PMU whenever possible.
    ///
    /// A pinned leader is never multiplexed with other groups, if the kernel
    /// can't schedule it the group goes into error state and reads return 0.
    pub pin_leader: bool,
}

impl Opts {
    /// The effective counter ceiling.
    pub fn ceiling(&self) -> usize {
        self.max_counters.min(MAX_COUNTERS)
    }
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            max_counters: MAX_COUNTERS,
            exclude: Priv::default(),
            pin_leader: true,
        }
    }
}

/// Privilege levels.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Priv {
    /// Kernel space.
    pub kernel: bool,

    /// Hypervisor.
    pub hv: bool,
}

impl Default for Priv {
    // Only user space is counted, which is allowed for the calling process
    // under the default `perf_event_paranoid` level.
    fn default() -> Self {
        Self {
            kernel: true,
            hv: true,
        }
    }
}
