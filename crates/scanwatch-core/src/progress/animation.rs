/// Display-side smoothing for the progress percentage.
///
/// The animator owns its transient state and only ever *reads* derived
/// percentages. Nothing here flows back into [`super::derive_progress`].
use std::time::{Duration, Instant};

/// Pause before a new transition starts moving.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Length of one transition from the old value to the new target.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1_000);

/// Interpolates the displayed percentage toward the latest derived value.
#[derive(Debug, Clone)]
pub struct ProgressAnimator {
    from: f32,
    target: f32,
    started: Option<Instant>,
    delay: Duration,
    duration: Duration,
}

impl Default for ProgressAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressAnimator {
    /// Animator resting at 0 % with the default delay and duration.
    pub fn new() -> Self {
        Self::with_timing(DEFAULT_DELAY, DEFAULT_DURATION)
    }

    pub fn with_timing(delay: Duration, duration: Duration) -> Self {
        Self {
            from: 0.0,
            target: 0.0,
            started: None,
            delay,
            duration,
        }
    }

    /// The percentage the animator is heading toward.
    pub fn target(&self) -> u8 {
        self.target as u8
    }

    /// Begin moving toward `percentage` from wherever the display is now.
    ///
    /// Re-submitting the current target leaves the running transition alone,
    /// so feeding every poll result in does not restart the ease.
    pub fn set_target(&mut self, percentage: u8, now: Instant) {
        let percentage = f32::from(percentage.min(100));
        if self.started.is_some() && (percentage - self.target).abs() < f32::EPSILON {
            return;
        }
        self.from = self.sample(now);
        self.target = percentage;
        self.started = Some(now);
    }

    /// Displayed value at `now`, in `0.0..=100.0`.
    pub fn sample(&self, now: Instant) -> f32 {
        let Some(started) = self.started else {
            return self.target;
        };
        let elapsed = now.saturating_duration_since(started);
        if elapsed <= self.delay {
            return self.from;
        }
        let t = if self.duration.is_zero() {
            1.0
        } else {
            ((elapsed - self.delay).as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
        };
        self.from + (self.target - self.from) * ease_out_cubic(t)
    }

    /// Displayed value rounded for text output.
    pub fn sample_rounded(&self, now: Instant) -> u8 {
        self.sample(now).round().clamp(0.0, 100.0) as u8
    }

    /// True once the display has reached the target.
    pub fn is_settled(&self, now: Instant) -> bool {
        match self.started {
            None => true,
            Some(started) => now.saturating_duration_since(started) >= self.delay + self.duration,
        }
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn rests_at_zero_until_targeted() {
        let anim = ProgressAnimator::new();
        assert_eq!(anim.sample(Instant::now()), 0.0);
        assert!(anim.is_settled(Instant::now()));
    }

    #[test]
    fn holds_during_delay_then_reaches_target() {
        let t0 = Instant::now();
        let mut anim = ProgressAnimator::new();
        anim.set_target(40, t0);

        assert_eq!(anim.sample(t0 + ms(50)), 0.0);
        let mid = anim.sample(t0 + ms(600));
        assert!(mid > 0.0 && mid < 40.0, "mid-transition value {mid}");
        assert_eq!(anim.sample_rounded(t0 + ms(1_100)), 40);
        assert!(anim.is_settled(t0 + ms(1_100)));
    }

    #[test]
    fn moves_monotonically_toward_target() {
        let t0 = Instant::now();
        let mut anim = ProgressAnimator::new();
        anim.set_target(99, t0);

        let mut last = 0.0;
        for step in 0..=24 {
            let value = anim.sample(t0 + ms(step * 50));
            assert!(value >= last, "step {step}: {value} < {last}");
            last = value;
        }
    }

    #[test]
    fn retarget_starts_from_displayed_value() {
        let t0 = Instant::now();
        let mut anim = ProgressAnimator::new();
        anim.set_target(80, t0);
        let t1 = t0 + ms(400);
        let shown = anim.sample(t1);

        anim.set_target(0, t1);
        assert_eq!(anim.sample(t1), shown);
        assert_eq!(anim.sample_rounded(t1 + ms(1_200)), 0);
    }

    #[test]
    fn same_target_does_not_restart() {
        let t0 = Instant::now();
        let mut anim = ProgressAnimator::new();
        anim.set_target(50, t0);
        anim.set_target(50, t0 + ms(900));
        assert!(anim.is_settled(t0 + ms(1_100)));
    }
}
