use super::attr::from;
use super::{Opts, Priv, MAX_COUNTERS};
use crate::event::Counter;
use crate::ffi::bindings as b;

#[test]
fn test_default_opts() {
    let opts = Opts::default();
    assert_eq!(opts.max_counters, MAX_COUNTERS);
    assert_eq!(opts.ceiling(), MAX_COUNTERS);
    assert!(opts.exclude.kernel);
    assert!(opts.exclude.hv);
    assert!(opts.pin_leader);
}

#[test]
fn test_ceiling_is_clamped() {
    let opts = Opts {
        max_counters: MAX_COUNTERS * 2,
        ..Default::default()
    };
    assert_eq!(opts.ceiling(), MAX_COUNTERS);

    let opts = Opts {
        max_counters: 3,
        ..Default::default()
    };
    assert_eq!(opts.ceiling(), 3);
}

#[test]
fn test_leader_attr() {
    let attr = from(Counter::Instructions.event_config(), &Opts::default(), true);

    assert_eq!(attr.size, b::PERF_ATTR_SIZE_VER8);
    assert_eq!(attr.type_, b::PERF_TYPE_HARDWARE);
    assert_eq!(attr.config, b::PERF_COUNT_HW_INSTRUCTIONS);
    assert_eq!(attr.read_format, b::PERF_FORMAT_GROUP | b::PERF_FORMAT_ID);
    assert!(attr.disabled());
    assert!(attr.exclude_kernel());
    assert!(attr.exclude_hv());
    assert!(attr.pinned());
}

#[test]
fn test_sibling_attr() {
    let attr = from(Counter::TaskClock.event_config(), &Opts::default(), false);

    assert_eq!(attr.type_, b::PERF_TYPE_SOFTWARE);
    assert_eq!(attr.config, b::PERF_COUNT_SW_TASK_CLOCK);
    assert!(attr.disabled());
    assert!(!attr.pinned());
}

#[test]
fn test_attr_follows_opts() {
    let opts = Opts {
        exclude: Priv {
            kernel: false,
            hv: true,
        },
        pin_leader: false,
        ..Default::default()
    };
    let attr = from(Counter::Cycles.event_config(), &opts, true);

    assert!(!attr.exclude_kernel());
    assert!(attr.exclude_hv());
    assert!(!attr.pinned());
    // disabled | exclude_hv
    assert_eq!(attr.flags, 1 | 1 << 6);
}
