// SPDX-License-Identifier: CC0-1.0

//! Difficulty retargeting.
//!
//! [`next_work_required`] computes the compact target a block extending `tip` must satisfy.
//! Which rule applies is decided once per call: chain history below the fork height replays the
//! inherited Bitcoin/Litecoin-style retarget ([`legacy`]), the post-fork freeze window pins the
//! minimum difficulty, and everything above runs the adaptive spacing-window algorithm
//! ([`adaptive`]).
//!
//! Consensus-critical: every branch here must be bit-exact across implementations. All
//! arithmetic is integer-only on expanded 256-bit targets; the few floating-point quantities in
//! this subtree exist purely for log output.

pub(crate) mod adaptive;
pub(crate) mod legacy;

use crate::chain::{BlockIndexEntry, ChainView};
use crate::consensus::ChainParams;
use crate::pow::CompactTarget;

/// First height validated by the adaptive retarget algorithm.
pub const FORK_HEIGHT: u32 = 155550;

/// Tip heights for which the post-fork rule returns the minimum difficulty unconditionally.
pub const POST_FORK_FREEZE: core::ops::Range<u32> = 155550..155650;

/// Tip heights for which the legacy rule returns the minimum difficulty unconditionally.
pub const LEGACY_FREEZE: core::ops::Range<u32> = 145364..145464;

/// The retarget rule selected for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RetargetMode {
    /// Inherited periodic retarget, below the fork height.
    Legacy,
    /// Post-fork spacing-window algorithm.
    Adaptive,
    /// Post-fork freeze window: minimum difficulty, no questions asked.
    Frozen,
}

impl RetargetMode {
    fn select(tip_height: u32) -> RetargetMode {
        if POST_FORK_FREEZE.contains(&tip_height) {
            RetargetMode::Frozen
        } else if tip_height + 1 >= FORK_HEIGHT {
            RetargetMode::Adaptive
        } else {
            RetargetMode::Legacy
        }
    }
}

/// Computes the compact target required of the block extending `tip` at `candidate_time`.
///
/// `tip` is `None` only when the chain is empty, in which case the genesis rule (minimum
/// difficulty) applies. `candidate_time` is the candidate block's timestamp; a miner composing
/// a template passes its current clock. The result is always a valid target in
/// `(0, pow_limit]`.
pub fn next_work_required<C: ChainView + ?Sized>(
    view: &C,
    tip: Option<&BlockIndexEntry>,
    candidate_time: i64,
    chain_params: &ChainParams,
) -> CompactTarget {
    let tip = match tip {
        Some(tip) => tip,
        None => return chain_params.base().pow_limit.to_compact_lossy(),
    };
    let params = chain_params.consensus(tip.height + 1);

    match RetargetMode::select(tip.height) {
        RetargetMode::Frozen => params.pow_limit.to_compact_lossy(),
        RetargetMode::Legacy => legacy::next_work_required(view, tip, candidate_time, params),
        RetargetMode::Adaptive => adaptive::next_work_required(view, tip, candidate_time, params),
    }
}
