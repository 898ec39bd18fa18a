//! # Stopping rules.
//!
//! [`StopRule`] decides how many eligible-task completions a run waits for before
//! returning. Completions are counted in arrival order; each task counts once.
//!
//! ```text
//! eligible = 4
//!   WaitForAll      → 4
//!   First           → 1
//!   Fraction(0.5)   → ceil(0.5 × 4) = 2
//!   Fraction(0.0)   → 1   (minimum one completion)
//! eligible = 0      → 0   (every rule resolves immediately)
//! ```

/// Condition under which a run returns control to its caller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum StopRule {
    /// Resolve when every eligible task has completed.
    #[default]
    WaitForAll,
    /// Resolve on the first eligible completion.
    First,
    /// Resolve once `ceil(fraction × eligible)` tasks completed.
    ///
    /// The fraction is clamped to `[0.0, 1.0]`; a non-finite value means `1.0`.
    Fraction(f64),
}

impl StopRule {
    /// Number of completions required for `eligible` launched tasks.
    ///
    /// Always within `0..=eligible`, and at least 1 when `eligible > 0`.
    pub fn quorum(&self, eligible: usize) -> usize {
        if eligible == 0 {
            return 0;
        }
        match *self {
            StopRule::WaitForAll => eligible,
            StopRule::First => 1,
            StopRule::Fraction(p) => {
                let p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 1.0 };
                let need = (p * eligible as f64).ceil() as usize;
                need.clamp(1, eligible)
            }
        }
    }
}
