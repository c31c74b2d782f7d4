use super::Opts;
use crate::event::EventConfig;
use crate::ffi::{bindings as b, Attr};

/// Builds the attr of one group member.
///
/// Every member starts disabled and reports in group format with event IDs,
/// so a single read of the leader returns the whole group.
pub(crate) fn from(event_cfg: EventConfig, opts: &Opts, leader: bool) -> Attr {
    let mut attr = Attr {
        size: b::PERF_ATTR_SIZE_VER8,
        ..Default::default()
    };

    attr.type_ = event_cfg.ty;
    attr.config = event_cfg.config;

    attr.set_disabled(true);
    attr.set_exclude_kernel(opts.exclude.kernel);
    attr.set_exclude_hv(opts.exclude.hv);

    // Siblings follow the scheduling of the leader.
    attr.set_pinned(leader && opts.pin_leader);

    attr.read_format = b::PERF_FORMAT_GROUP | b::PERF_FORMAT_ID;

    attr
}
