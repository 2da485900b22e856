// SPDX-License-Identifier: CC0-1.0

//! The post-fork retarget rule.
//!
//! Retargets every block from an analysis of recent inter-block spacings: a short window drives
//! the normal adjustment, a long window takes over when the short one looks manipulated, stalls
//! trigger multi-tier emergency reductions, and every adjustment is capped against the tip's
//! target by a band picked from the detected regime.
//!
//! The spacing windows, thresholds and cap bands below are consensus constants; changing any of
//! them forks the chain.

use log::{debug, warn};

use crate::chain::{BlockIndexEntry, ChainView};
use crate::consensus::Params;
use crate::pow::{CompactTarget, Target};

/// Number of recent spacings analysed.
const WINDOW_LONG: usize = 12;

/// Number of recent spacings the fast-reacting average uses.
const WINDOW_SHORT: usize = 6;

/// Floor applied to every observed spacing, in seconds.
const MIN_BLOCK_TIME: i64 = 1;

/// Ceiling applied to every observed spacing, as a multiple of the target spacing.
const MAX_BLOCK_TIME_FACTOR: i64 = 100;

/// `time_since_last` beyond this many target spacings resets to the minimum difficulty.
const RESET_FACTOR: i64 = 20;

/// A last spacing beyond this many target spacings triggers a scaled emergency reduction.
const EMERGENCY_FACTOR: i64 = 10;

/// A stall beyond this many target spacings relaxes the adjustment cap.
const PROLONGED_DELAY_FACTOR: i64 = 10;

/// Tolerated clock drift of the tip's timestamp past the candidate's, in seconds.
const MAX_FUTURE_DRIFT: i64 = 2 * 60 * 60;

/// Per-block adjustment cap, in percent up/down from the tip's target, by detected regime.
const CAP_ATTACK: (u32, u32) = (25, 25);
const CAP_LARGE_PRIOR_CHANGE: (u32, u32) = (40, 40);
const CAP_PROLONGED_DELAY: (u32, u32) = (150, 100);
const CAP_NORMAL: (u32, u32) = (75, 75);

/// Computes the next required work for a candidate extending `tip`, at and above the fork
/// height.
pub(crate) fn next_work_required<C: ChainView + ?Sized>(
    view: &C,
    tip: &BlockIndexEntry,
    candidate_time: i64,
    params: &Params,
) -> CompactTarget {
    let pow_limit_bits = params.pow_limit.to_compact_lossy();

    // Genesis block or early blocks safety check.
    let prev = match view.prev(tip) {
        Some(prev) => prev,
        None => return pow_limit_bits,
    };

    let spacing = params.pow_target_spacing;
    let max_block_time = MAX_BLOCK_TIME_FACTOR * spacing;

    // Collect the most recent inter-block spacings, newest first, clamped against timestamp
    // games in either direction.
    let mut spacings = [0i64; WINDOW_LONG];
    let mut n = 0;
    let mut cur = *tip;
    let mut cur_prev = Some(prev);
    while n < WINDOW_LONG {
        let prev = match cur_prev {
            Some(prev) => prev,
            None => break,
        };
        let dt = i64::from(cur.time) - i64::from(prev.time);
        spacings[n] = dt.clamp(MIN_BLOCK_TIME, max_block_time);
        n += 1;
        cur = prev;
        cur_prev = view.prev(&cur);
    }
    let spacings = &spacings[..n];

    // How long the network has been waiting for the candidate. A tip timestamp from far in the
    // future would poison this, so fall back to the median time past.
    let tip_time = i64::from(tip.time);
    let time_since_last = if tip_time > candidate_time + MAX_FUTURE_DRIFT {
        warn!("tip timestamp {}s past the candidate clock, using median time past", tip_time - candidate_time);
        candidate_time - i64::from(view.median_time_past(tip))
    } else {
        candidate_time - tip_time
    };
    let actual_spacing = spacings[0];

    let tip_target = Target::from_compact(tip.bits);

    // Emergency tier one: the chain has stalled outright, reopen it at the floor.
    if time_since_last > RESET_FACTOR * spacing {
        warn!(
            "retarget emergency: {}s since last block (target spacing {}s), resetting to pow limit",
            time_since_last, spacing
        );
        return pow_limit_bits;
    }

    // Emergency tier two: the last block itself took far too long; scale the target up in
    // proportion to the overshoot.
    if actual_spacing > EMERGENCY_FACTOR * spacing {
        let mut new = tip_target
            .mul_small(actual_spacing as u32)
            .div_small((EMERGENCY_FACTOR * spacing) as u32);
        if new > params.pow_limit {
            new = params.pow_limit;
        }
        warn!(
            "retarget emergency: last spacing {}s, easing {:x} -> {:x}",
            actual_spacing,
            tip.bits,
            new.to_compact_lossy()
        );
        return new.to_compact_lossy();
    }

    let long_avg = spacings.iter().sum::<i64>() / n as i64;
    let short_n = n.min(WINDOW_SHORT);
    let short_avg = spacings[..short_n].iter().sum::<i64>() / short_n as i64;

    // A fast/slow alternation inside the short window is the signature of hashrate switching.
    let fast = spacings[..short_n].iter().filter(|&&s| s < spacing / 3).count();
    let slow = spacings[..short_n].iter().filter(|&&s| s > spacing * 3).count();
    let possible_attack = fast >= 2 && slow >= 2;
    if possible_attack {
        warn!("possible hashrate switching attack: {} fast and {} slow of last {} spacings", fast, slow, short_n);
    }

    // Did the previous retarget already move the target by more than a factor of two?
    let prev_target = Target::from_compact(prev.bits);
    let large_prior_change =
        tip_target > prev_target.mul_small(2) || tip_target.mul_small(2) < prev_target;

    let prolonged_delay = time_since_last > PROLONGED_DELAY_FACTOR * spacing;

    // Anomalous windows get judged on the long average, which a short burst cannot steer.
    let chosen_spacing =
        if possible_attack || large_prior_change { long_avg } else { short_avg };

    let mut new = tip_target.mul_small(chosen_spacing as u32).div_small(spacing as u32);

    let (up, down) = if possible_attack {
        CAP_ATTACK
    } else if large_prior_change {
        CAP_LARGE_PRIOR_CHANGE
    } else if prolonged_delay {
        CAP_PROLONGED_DELAY
    } else {
        CAP_NORMAL
    };
    let upper = tip_target.mul_small(100 + up).div_small(100);
    let lower = tip_target.mul_small(100 - down).div_small(100);
    if new > upper {
        new = upper;
    } else if new < lower {
        new = lower;
    }

    if new > params.pow_limit {
        new = params.pow_limit;
    }

    // A strongly deviating window that still rounds to "no change" (the tip pinned at the
    // floor, mostly) gets nudged by a fixed three percent so the chain cannot wedge there.
    let normal_regime = !possible_attack && !large_prior_change && !prolonged_delay;
    if normal_regime {
        let small_change = new < tip_target.mul_small(101).div_small(100)
            && new > tip_target.mul_small(99).div_small(100);
        let strong_deviation =
            chosen_spacing * 100 > 140 * spacing || chosen_spacing * 100 < 60 * spacing;
        if small_change && strong_deviation {
            new = if chosen_spacing > spacing {
                tip_target.mul_small(103).div_small(100)
            } else {
                tip_target.mul_small(97).div_small(100)
            };
            if new > params.pow_limit {
                new = params.pow_limit;
            }
        }
    }

    if new.is_zero() {
        new = Target::ONE;
    }

    // Advisory diagnostics only; nothing below feeds the returned value.
    if log::log_enabled!(log::Level::Debug) {
        let trend = if long_avg > 0 { short_avg as f64 / long_avg as f64 } else { 0.0 };
        debug!(
            "retarget at height {}: chosen spacing {}s (short {}s, long {}s, trend {:.2}), cap +{}%/-{}%, {:x} -> {:x}",
            tip.height + 1,
            chosen_spacing,
            short_avg,
            long_avg,
            trend,
            up,
            down,
            tip.bits,
            new.to_compact_lossy()
        );
    }

    new.to_compact_lossy()
}
