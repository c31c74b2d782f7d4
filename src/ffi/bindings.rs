// Subset of `include/uapi/linux/perf_event.h` used by counter groups.
// https://github.com/torvalds/linux/blob/v6.13/include/uapi/linux/perf_event.h

pub const PERF_TYPE_HARDWARE: u32 = 0;
pub const PERF_TYPE_SOFTWARE: u32 = 1;

pub const PERF_COUNT_HW_CPU_CYCLES: u64 = 0;
pub const PERF_COUNT_HW_INSTRUCTIONS: u64 = 1;
pub const PERF_COUNT_HW_CACHE_REFERENCES: u64 = 2;
pub const PERF_COUNT_HW_CACHE_MISSES: u64 = 3;
pub const PERF_COUNT_HW_BRANCH_INSTRUCTIONS: u64 = 4;
pub const PERF_COUNT_HW_BRANCH_MISSES: u64 = 5;

pub const PERF_COUNT_SW_CPU_CLOCK: u64 = 0;
pub const PERF_COUNT_SW_TASK_CLOCK: u64 = 1;
pub const PERF_COUNT_SW_CONTEXT_SWITCHES: u64 = 3;

pub const PERF_FORMAT_ID: u64 = 1 << 2;
pub const PERF_FORMAT_GROUP: u64 = 1 << 3;

pub const PERF_FLAG_FD_CLOEXEC: u64 = 1 << 3;

pub const PERF_IOC_FLAG_GROUP: u64 = 1;

pub const PERF_ATTR_SIZE_VER8: u32 = 136;

// <asm-generic/ioctl.h>, with the direction encoding overridden by
// powerpc, mips and sparc.
#[cfg(any(
    target_arch = "powerpc",
    target_arch = "powerpc64",
    target_arch = "mips",
    target_arch = "mips64",
    target_arch = "sparc",
    target_arch = "sparc64"
))]
mod ioc {
    pub const SIZEBITS: u64 = 13;
    pub const NONE: u64 = 1;
    pub const READ: u64 = 2;
}
#[cfg(not(any(
    target_arch = "powerpc",
    target_arch = "powerpc64",
    target_arch = "mips",
    target_arch = "mips64",
    target_arch = "sparc",
    target_arch = "sparc64"
)))]
mod ioc {
    pub const SIZEBITS: u64 = 14;
    pub const NONE: u64 = 0;
    pub const READ: u64 = 2;
}

const IOC_NRSHIFT: u64 = 0;
const IOC_TYPESHIFT: u64 = 8;
const IOC_SIZESHIFT: u64 = 16;
const IOC_DIRSHIFT: u64 = IOC_SIZESHIFT + ioc::SIZEBITS;

const fn ioc(dir: u64, ty: u8, nr: u64, size: usize) -> u64 {
    (dir << IOC_DIRSHIFT)
        | ((ty as u64) << IOC_TYPESHIFT)
        | (nr << IOC_NRSHIFT)
        | ((size as u64) << IOC_SIZESHIFT)
}

pub const PERF_IOC_OP_ENABLE: u64 = ioc(ioc::NONE, b'$', 0, 0);
pub const PERF_IOC_OP_DISABLE: u64 = ioc(ioc::NONE, b'$', 1, 0);
pub const PERF_IOC_OP_RESET: u64 = ioc(ioc::NONE, b'$', 3, 0);
// `_IOR('$', 7, __u64 *)`
pub const PERF_IOC_OP_ID: u64 = ioc(ioc::READ, b'$', 7, size_of::<*mut u64>());

/// `struct perf_event_attr`, laid out as of `PERF_ATTR_SIZE_VER8`.
///
/// Unions are flattened to their first member since counting never uses
/// the alternatives.
#[allow(non_camel_case_types)]
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct perf_event_attr {
    pub type_: u32,
    pub size: u32,
    pub config: u64,
    pub sample_period: u64,
    pub sample_type: u64,
    pub read_format: u64,
    pub flags: u64,
    pub wakeup_events: u32,
    pub bp_type: u32,
    pub config1: u64,
    pub config2: u64,
    pub branch_sample_type: u64,
    pub sample_regs_user: u64,
    pub sample_stack_user: u32,
    pub clockid: i32,
    pub sample_regs_intr: u64,
    pub aux_watermark: u32,
    pub sample_max_stack: u16,
    pub __reserved_2: u16,
    pub aux_sample_size: u32,
    pub __reserved_3: u32,
    pub sig_data: u64,
    pub config3: u64,
}

macro_rules! flag {
    ($($get:ident, $set:ident = $bit:literal;)+) => {
        impl perf_event_attr {
            $(
                #[inline]
                #[cfg(test)]
                pub fn $get(&self) -> bool {
                    self.flags & (1 << $bit) > 0
                }

                #[inline]
                pub fn $set(&mut self, val: bool) {
                    if val {
                        self.flags |= 1 << $bit;
                    } else {
                        self.flags &= !(1 << $bit);
                    }
                }
            )+
        }
    };
}

flag! {
    disabled, set_disabled = 0;
    pinned, set_pinned = 2;
    exclude_kernel, set_exclude_kernel = 5;
    exclude_hv, set_exclude_hv = 6;
}

const _: () = assert!(size_of::<perf_event_attr>() == PERF_ATTR_SIZE_VER8 as usize);
