//! Bounded busy-retry
//!
//! There is no timer at this layer, so every wait is bounded by an iteration
//! count. The periodic abort keeps the historic firmware behaviour: the check
//! runs after the attempt and skips iteration zero, so a budget of 1000 with
//! an abort period of 100 makes at most 101 attempts.

/// How many times to try and when to give up early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    /// Upper bound on iterations
    pub max_iterations: u32,
    /// Abort after any iteration `i > 0` with `i % abort_every == 0`; zero disables
    pub abort_every: u32,
}

/// Result of a budgeted retry loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOutcome<T> {
    Succeeded { value: T, attempts: u32 },
    Exhausted { attempts: u32, aborted_early: bool },
}

impl<T> RetryOutcome<T> {
    pub fn attempts(&self) -> u32 {
        match self {
            RetryOutcome::Succeeded { attempts, .. } | RetryOutcome::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            RetryOutcome::Succeeded { value, .. } => Some(value),
            RetryOutcome::Exhausted { .. } => None,
        }
    }
}

impl RetryBudget {
    pub const fn new(max_iterations: u32, abort_every: u32) -> Self {
        Self {
            max_iterations,
            abort_every,
        }
    }

    /// Whether the periodic check fires after iteration `i`
    pub fn aborts_after(&self, i: u32) -> bool {
        self.abort_every != 0 && i > 0 && i % self.abort_every == 0
    }

    /// Attempts made when every one of them fails
    pub fn worst_case_attempts(&self) -> u32 {
        (0..self.max_iterations)
            .find(|&i| self.aborts_after(i))
            .map_or(self.max_iterations, |i| i + 1)
    }

    /// Run `attempt` under this budget's periodic abort rule
    pub fn run<T>(&self, attempt: impl FnMut(u32) -> Option<T>) -> RetryOutcome<T> {
        retry_with_budget(self.max_iterations, |i| self.aborts_after(i), attempt)
    }
}

/// Call `attempt` until it yields a value, `max_iterations` is spent, or
/// `early_abort` fires after a failed iteration.
pub fn retry_with_budget<T>(
    max_iterations: u32,
    mut early_abort: impl FnMut(u32) -> bool,
    mut attempt: impl FnMut(u32) -> Option<T>,
) -> RetryOutcome<T> {
    for i in 0..max_iterations {
        if let Some(value) = attempt(i) {
            return RetryOutcome::Succeeded {
                value,
                attempts: i + 1,
            };
        }
        if early_abort(i) {
            return RetryOutcome::Exhausted {
                attempts: i + 1,
                aborted_early: true,
            };
        }
    }
    RetryOutcome::Exhausted {
        attempts: max_iterations,
        aborted_early: false,
    }
}
