//! # Reconciliation Validators — Aggregates vs Stated Summaries
//!
//! A receipt states the same quantity more than once: per-certificate
//! breakdown rows, per-collection and per-credit rollups, and grand
//! totals. These validators compare an aggregate computed from the most
//! granular rows against the stated summary value.
//!
//! Float totals compare within an explicit epsilon passed at every call
//! site, so each site documents the tolerance it needs. Counts compare
//! exactly. Boolean activity flags must agree with their aggregate in both
//! directions.

use crate::context::{Path, ValidationContext};

/// Default tolerance for float reconciliation.
///
/// Tight enough to catch any authoring mistake in credit amounts while
/// absorbing the rounding drift of summing breakdown rows in a different
/// order than the producer did. Call sites comparing display-rounded
/// values pass a coarser epsilon.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Check that a computed float aggregate matches a stated total within
/// `epsilon`.
///
/// Appends one issue, decorated with the stated and computed values, when
/// `|actual - expected| > epsilon`.
pub fn check_total_matches(
    ctx: &mut ValidationContext,
    actual: f64,
    expected: f64,
    epsilon: f64,
    path: Path,
    message: &str,
) {
    if (actual - expected).abs() > epsilon {
        ctx.report(format!("{message}: stated {expected}, computed {actual}"), path);
    }
}

/// Check that a computed count matches a stated count exactly.
pub fn check_count_matches(
    ctx: &mut ValidationContext,
    actual: usize,
    expected: usize,
    path: Path,
    message: &str,
) {
    if actual != expected {
        ctx.report(format!("{message}: stated {expected}, computed {actual}"), path);
    }
}

/// Check that a boolean activity flag agrees with its aggregate.
///
/// The flag must be true if and only if the aggregate is greater than
/// zero. Each direction of disagreement has its own message:
/// `set_message` when the flag is set with no activity, `clear_message`
/// when activity exists but the flag is clear.
pub fn check_flag_matches_activity(
    ctx: &mut ValidationContext,
    flag: bool,
    total: f64,
    path: Path,
    set_message: &str,
    clear_message: &str,
) {
    if flag && total <= 0.0 {
        ctx.report(set_message, path);
    } else if !flag && total > 0.0 {
        ctx.report(clear_message, path);
    }
}
