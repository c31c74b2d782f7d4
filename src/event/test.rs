use super::{Counter, EventConfig};
use crate::error::Error;
use crate::ffi::bindings as b;

#[test]
fn test_codes_round_trip_through_catalog() {
    for (code, counter) in Counter::ALL.into_iter().enumerate() {
        assert_eq!(counter.code(), code as i32);
        assert_eq!(Counter::try_from(code as i32).unwrap(), counter);
    }
}

#[test]
fn test_unknown_code() {
    for code in [-1, 9, 64, i32::MIN, i32::MAX] {
        match Counter::try_from(code) {
            Err(Error::UnsupportedCounterKind(c)) => assert_eq!(c, code),
            other => panic!("unexpected result for {}: {:?}", code, other),
        }
    }
}

#[test]
fn test_event_config() {
    let hw = |config| EventConfig {
        ty: b::PERF_TYPE_HARDWARE,
        config,
    };
    let sw = |config| EventConfig {
        ty: b::PERF_TYPE_SOFTWARE,
        config,
    };

    assert_eq!(Counter::Cycles.event_config(), hw(0));
    assert_eq!(Counter::Instructions.event_config(), hw(1));
    assert_eq!(Counter::CacheReferences.event_config(), hw(2));
    assert_eq!(Counter::CacheMisses.event_config(), hw(3));
    assert_eq!(Counter::BranchInstructions.event_config(), hw(4));
    assert_eq!(Counter::BranchMisses.event_config(), hw(5));

    assert_eq!(Counter::CpuClock.event_config(), sw(0));
    assert_eq!(Counter::TaskClock.event_config(), sw(1));
    assert_eq!(Counter::ContextSwitches.event_config(), sw(3));
}

#[test]
fn test_display() {
    assert_eq!(Counter::TaskClock.to_string(), "Task Clock (ns)");
    assert_eq!(Counter::CpuClock.to_string(), "CPU Clock (ns)");
    assert_eq!(Counter::ContextSwitches.to_string(), "Context switches");
}
