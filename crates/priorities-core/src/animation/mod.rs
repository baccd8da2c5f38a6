//! Time-based animation primitives.
//!
//! Animations produce values from explicit `tick(dt)` calls driven by the
//! frame loop; nothing here reads a clock.

mod shared_value;

use std::time::Duration;

pub use shared_value::SharedValue;

/// Easing function signature: maps `t` in [0, 1] to output.
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-out (slow end).
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (slow start and end).
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0f32).mul_add(t, 2.0).powi(2) / 2.0
    }
}

/// Ease-out that overshoots past 1 before settling, for bounce-backs.
pub fn ease_out_back(t: f32) -> f32 {
    const C1: f32 = 1.701_58;
    const C3: f32 = C1 + 1.0;
    let t = t.clamp(0.0, 1.0) - 1.0;
    C1.mul_add(t.powi(2), C3.mul_add(t.powi(3), 1.0))
}

/// A time-based animation.
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value.
    fn value(&self) -> f32;

    /// Reset the animation to its initial state.
    fn reset(&mut self);
}

/// Progression from 0.0 to 1.0 over a duration, with configurable easing.
///
/// Elapsed time is tracked as a [`Duration`] so repeated ticks do not drift.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Fade {
    /// Create a fade with the given duration and default linear easing.
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: linear,
        }
    }

    /// Set the easing function.
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// A fade that has already finished.
    #[must_use]
    pub fn completed(mut self) -> Self {
        self.elapsed = self.duration;
        self
    }

    /// Raw linear progress (before easing), in [0.0, 1.0].
    #[allow(clippy::cast_possible_truncation)]
    pub fn raw_progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.raw_progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

/// Animates a scalar from `from` to `to` along a [`Fade`].
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f32,
    to: f32,
    fade: Fade,
}

impl Tween {
    pub const fn new(from: f32, to: f32, fade: Fade) -> Self {
        Self { from, to, fade }
    }

    /// Spring-like return of a dragged element to its origin
    pub fn bounce_back(from: f32, duration: Duration) -> Self {
        Self::new(from, 0.0, Fade::new(duration).easing(ease_out_back))
    }

    pub const fn start(&self) -> f32 {
        self.from
    }

    pub const fn end(&self) -> f32 {
        self.to
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.fade.tick(dt);
    }

    fn is_complete(&self) -> bool {
        self.fade.is_complete()
    }

    fn value(&self) -> f32 {
        crate::util::lerp(self.from, self.to, self.fade.value())
    }

    fn reset(&mut self) {
        self.fade.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn fade_reaches_one_and_stops() {
        let mut fade = Fade::new(Duration::from_millis(400));
        fade.tick(MS_100);
        assert!((fade.value() - 0.25).abs() < 1e-4);
        assert!(!fade.is_complete());

        fade.tick(Duration::from_secs(5));
        assert!(fade.is_complete());
        assert!((fade.value() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_duration_fade_completes_on_first_tick() {
        let mut fade = Fade::new(Duration::ZERO);
        fade.tick(Duration::from_nanos(1));
        assert!(fade.is_complete());
    }

    #[test]
    fn easing_endpoints() {
        let easings: [EasingFn; 4] = [linear, ease_out, ease_in_out, ease_out_back];
        for easing in easings {
            assert!(easing(0.0).abs() < 1e-5);
            assert!((easing(1.0) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn bounce_back_overshoots_then_settles_at_origin() {
        let mut tween = Tween::bounce_back(120.0, Duration::from_millis(300));
        let mut min_seen = f32::MAX;
        for _ in 0..30 {
            tween.tick(Duration::from_millis(10));
            min_seen = min_seen.min(tween.value());
        }
        assert!(tween.is_complete());
        assert!(tween.value().abs() < 1e-3);
        assert!(min_seen < 0.0, "expected overshoot past origin");
    }
}
