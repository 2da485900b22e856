// SPDX-License-Identifier: CC0-1.0

//! The pre-fork retarget rule.
//!
//! Inherited, quirks and all, from the Bitcoin/Litecoin/Dogecoin lineage: a periodic retarget
//! clamped to a factor of four, a testnet-style minimum-difficulty exception, a per-block
//! adjustment window around height 145000 and a frozen window right after it.

use crate::chain::{BlockIndexEntry, ChainView};
use crate::consensus::Params;
use crate::pow::{CompactTarget, Target};
use crate::retarget::LEGACY_FREEZE;

/// Heights for which the difficulty adjustment interval drops to a single block.
const PER_BLOCK_WINDOW: core::ops::Range<u32> = 145000..145365;

/// Computes the next required work for a candidate extending `tip`, below the fork height.
pub(crate) fn next_work_required<C: ChainView + ?Sized>(
    view: &C,
    tip: &BlockIndexEntry,
    candidate_time: i64,
    params: &Params,
) -> CompactTarget {
    let pow_limit = params.pow_limit.to_compact_lossy();

    if params.no_pow_retargeting {
        return tip.bits;
    }

    // Special difficulty rule for testnet: if the new block's timestamp is more than
    // 2 * nTargetSpacing then allow mining of a min-difficulty block.
    if allow_digishield_min_difficulty(tip, candidate_time, params) {
        return pow_limit;
    }

    if LEGACY_FREEZE.contains(&tip.height) {
        return pow_limit;
    }

    // Only change once per difficulty adjustment interval, except inside the per-block window.
    let interval = if PER_BLOCK_WINDOW.contains(&tip.height) {
        1
    } else {
        params.difficulty_adjustment_interval()
    };

    if i64::from(tip.height + 1) % interval != 0 {
        if params.allow_min_difficulty_blocks {
            if candidate_time > i64::from(tip.time) + params.pow_target_spacing * 2 {
                return pow_limit;
            }
            // Return the last block that was not mined under the min-difficulty exception.
            let mut index = *tip;
            while let Some(prev) = view.prev(&index) {
                if i64::from(index.height) % params.difficulty_adjustment_interval() == 0
                    || index.bits != pow_limit
                {
                    break;
                }
                index = prev;
            }
            return index.bits;
        }
        return tip.bits;
    }

    // Go back the full period unless it's the first retarget after genesis; this keeps a 51%
    // attacker from shifting the retarget anchor.
    let lookback = if i64::from(tip.height + 1) == interval { interval - 1 } else { interval };
    let first = match view.ancestor(tip, lookback as u32) {
        Some(first) => first,
        None => return pow_limit,
    };

    calculate_next_work(tip, i64::from(first.time), params)
}

/// The actual retarget arithmetic, once the window's first block time is known.
fn calculate_next_work(tip: &BlockIndexEntry, first_time: i64, params: &Params) -> CompactTarget {
    let timespan = params.pow_target_timespan;
    let actual = i64::from(tip.time) - first_time;

    // DigiShield dampens the deviation to an eighth before clamping.
    let modulated = if params.digishield_difficulty_calculation {
        timespan + (actual - timespan) / 8
    } else {
        actual
    };
    let clamped = modulated.clamp(timespan / 4, timespan * 4);

    let mut new =
        Target::from_compact(tip.bits).mul_small(clamped as u32).div_small(timespan as u32);
    if new > params.pow_limit {
        new = params.pow_limit;
    }
    if new.is_zero() {
        new = Target::ONE;
    }
    new.to_compact_lossy()
}

/// Whether the DigiShield flavour of the minimum-difficulty exception lets this candidate
/// through at the floor.
fn allow_digishield_min_difficulty(
    tip: &BlockIndexEntry,
    candidate_time: i64,
    params: &Params,
) -> bool {
    if !params.allow_digishield_min_difficulty_blocks || !params.digishield_difficulty_calculation
    {
        return false;
    }
    // Only past the height this regime switched on.
    if tip.height < params.height_effective {
        return false;
    }
    candidate_time > i64::from(tip.time) + params.pow_target_spacing * 2
}
