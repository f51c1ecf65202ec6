//! Bounded retry-with-interval polling.
//!
//! Replaces ad-hoc busy-wait loops: a poll runs at most `attempts` ticks,
//! `interval` apart, and ends early when a tick reports the condition
//! satisfied or the operation cancelled (e.g. playback stopped).

use std::time::Duration;

use tokio::time::sleep;

#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub attempts: u32,
    pub interval: Duration,
}

/// What a single tick observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollTick {
    Satisfied,
    Pending,
    Cancelled,
}

/// How the poll ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Satisfied,
    Cancelled,
    Exhausted,
}

/// Run `tick` until it settles or the attempt budget runs out.
pub async fn poll_until<F>(policy: &PollPolicy, mut tick: F) -> PollOutcome
where
    F: AsyncFnMut() -> PollTick,
{
    for _ in 0..policy.attempts {
        match tick().await {
            PollTick::Satisfied => return PollOutcome::Satisfied,
            PollTick::Cancelled => return PollOutcome::Cancelled,
            PollTick::Pending => {}
        }
        sleep(policy.interval).await;
    }
    PollOutcome::Exhausted
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: PollPolicy = PollPolicy {
        attempts: 5,
        interval: Duration::ZERO,
    };

    #[tokio::test]
    async fn exhausts_after_the_attempt_budget() {
        let mut ticks = 0;
        let outcome = poll_until(&FAST, async || {
            ticks += 1;
            PollTick::Pending
        })
        .await;
        assert_eq!(outcome, PollOutcome::Exhausted);
        assert_eq!(ticks, 5);
    }

    #[tokio::test]
    async fn stops_early_when_satisfied() {
        let mut ticks = 0;
        let outcome = poll_until(&FAST, async || {
            ticks += 1;
            if ticks == 3 {
                PollTick::Satisfied
            } else {
                PollTick::Pending
            }
        })
        .await;
        assert_eq!(outcome, PollOutcome::Satisfied);
        assert_eq!(ticks, 3);
    }

    #[tokio::test]
    async fn stops_immediately_on_cancellation() {
        let mut ticks = 0;
        let outcome = poll_until(&FAST, async || {
            ticks += 1;
            PollTick::Cancelled
        })
        .await;
        assert_eq!(outcome, PollOutcome::Cancelled);
        assert_eq!(ticks, 1);
    }

    #[tokio::test]
    async fn zero_attempts_never_tick() {
        let policy = PollPolicy {
            attempts: 0,
            interval: Duration::ZERO,
        };
        let outcome = poll_until(&policy, async || unreachable!("tick must not run")).await;
        assert_eq!(outcome, PollOutcome::Exhausted);
    }
}
