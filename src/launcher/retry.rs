//! Bounded retries with a fixed delay.
//!
//! A launch runs through [`LaunchState`]s:
//!
//! ```text
//! Attempting(n) ──ok──────────────────────────▶ Succeeded(n)
//!      │
//!      └─err─▶ FailedRetryable(n)  (n < max) ──wait──▶ Attempting(n + 1)
//!      └─err─▶ FailedTerminal(n)   (n == max)
//! ```
//!
//! The delay goes through the [`Delay`] trait so hosts with their own timer
//! (and tests) can replace the blocking sleep.

use std::time::Duration;

use crate::error::LaunchError;

/// Default number of start attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default wait between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(5000);

/// How many times to try, and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Attempt ceiling; zero is treated as a single attempt.
    pub fn ceiling(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY)
    }
}

/// Waits between attempts.
pub trait Delay {
    fn wait(&mut self, duration: Duration);
}

/// Blocks the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleep;

impl Delay for ThreadSleep {
    fn wait(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Where a launch currently stands.
#[derive(Debug)]
pub enum LaunchState<T> {
    /// About to make attempt number `attempt` (1-based).
    Attempting { attempt: u32 },
    /// Attempt `attempts` started the process.
    Succeeded { attempts: u32, value: T },
    /// Attempt `attempt` failed and another one is allowed.
    FailedRetryable { attempt: u32, error: LaunchError },
    /// Attempt `attempts` failed and it was the last one.
    FailedTerminal { attempts: u32, error: LaunchError },
}

impl<T> LaunchState<T> {
    /// Whether the machine has stopped.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            LaunchState::Succeeded { .. } | LaunchState::FailedTerminal { .. }
        )
    }
}

/// Drive `attempt` until it succeeds or the policy's ceiling is reached.
///
/// `attempt` receives the 1-based attempt number. On success the value is
/// returned with the number of attempts made; otherwise the error from the
/// final attempt is returned unchanged.
pub fn run_with_retries<T, F, D>(
    policy: &RetryPolicy,
    delay: &mut D,
    mut attempt: F,
) -> Result<(T, u32), LaunchError>
where
    F: FnMut(u32) -> Result<T, LaunchError>,
    D: Delay + ?Sized,
{
    let ceiling = policy.ceiling();
    let mut state = LaunchState::Attempting { attempt: 1 };

    loop {
        state = match state {
            LaunchState::Attempting { attempt: n } => match attempt(n) {
                Ok(value) => LaunchState::Succeeded { attempts: n, value },
                Err(error) => {
                    tracing::error!("Launch attempt {} of {} failed: {}", n, ceiling, error);
                    if n < ceiling {
                        LaunchState::FailedRetryable { attempt: n, error }
                    } else {
                        LaunchState::FailedTerminal { attempts: n, error }
                    }
                }
            },
            LaunchState::FailedRetryable { attempt: n, .. } => {
                tracing::info!("Waiting {:?} before retrying", policy.delay);
                delay.wait(policy.delay);
                LaunchState::Attempting { attempt: n + 1 }
            }
            LaunchState::Succeeded { attempts, value } => return Ok((value, attempts)),
            LaunchState::FailedTerminal { error, .. } => return Err(error),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records requested waits instead of sleeping.
    #[derive(Default)]
    struct RecordingDelay {
        waits: Vec<Duration>,
    }

    impl Delay for RecordingDelay {
        fn wait(&mut self, duration: Duration) {
            self.waits.push(duration);
        }
    }

    fn not_started(n: u32) -> LaunchError {
        LaunchError::NotStarted {
            program: format!("attempt-{}", n),
        }
    }

    #[test]
    fn default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay, Duration::from_secs(5));
    }

    #[test]
    fn succeeds_first_time_without_waiting() {
        let policy = RetryPolicy::new(3, Duration::from_millis(250));
        let mut delay = RecordingDelay::default();

        let (value, attempts) = run_with_retries(&policy, &mut delay, |_| Ok("pid")).unwrap();

        assert_eq!(value, "pid");
        assert_eq!(attempts, 1);
        assert!(delay.waits.is_empty());
    }

    #[test]
    fn succeeds_after_n_minus_one_failures() {
        for n in 1..=4u32 {
            let policy = RetryPolicy::new(4, Duration::from_millis(100));
            let mut delay = RecordingDelay::default();
            let mut calls = 0;

            let (_, attempts) = run_with_retries(&policy, &mut delay, |i| {
                calls += 1;
                if i < n {
                    Err(not_started(i))
                } else {
                    Ok(())
                }
            })
            .unwrap();

            assert_eq!(attempts, n);
            assert_eq!(calls, n);
            assert_eq!(
                delay.waits,
                vec![Duration::from_millis(100); (n - 1) as usize]
            );
        }
    }

    #[test]
    fn always_failing_stops_at_ceiling_with_last_error() {
        let policy = RetryPolicy::new(3, Duration::from_millis(10));
        let mut delay = RecordingDelay::default();
        let mut calls = 0;

        let err = run_with_retries::<(), _, _>(&policy, &mut delay, |i| {
            calls += 1;
            Err(not_started(i))
        })
        .unwrap_err();

        assert_eq!(calls, 3);
        assert_eq!(delay.waits.len(), 2);
        match err {
            LaunchError::NotStarted { program } => assert_eq!(program, "attempt-3"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        let policy = RetryPolicy::new(0, Duration::from_millis(10));
        let mut delay = RecordingDelay::default();
        let mut calls = 0;

        let result = run_with_retries::<(), _, _>(&policy, &mut delay, |i| {
            calls += 1;
            Err(not_started(i))
        });

        assert!(result.is_err());
        assert_eq!(calls, 1);
        assert!(delay.waits.is_empty());
    }

    #[test]
    fn final_states() {
        assert!(!LaunchState::<()>::Attempting { attempt: 1 }.is_final());
        assert!(LaunchState::Succeeded {
            attempts: 1,
            value: ()
        }
        .is_final());
        assert!(LaunchState::<()>::FailedTerminal {
            attempts: 3,
            error: not_started(3)
        }
        .is_final());
        assert!(!LaunchState::<()>::FailedRetryable {
            attempt: 1,
            error: not_started(1)
        }
        .is_final());
    }
}
