//! Time-weighted animation queue
//!
//! A FIFO of `(target, duration)` steps driving one scalar. The scalar is
//! owned by the caller; `advance` moves it toward the front step's target and
//! reports pops, so the caller can key cues off specific transitions (the
//! storm effect synchronizes thunder to the dark-to-bright pop).

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Snap when the remaining gap falls below this
const SNAP_EPS: f32 = 0.01;

/// One queued transition: drive the scalar to `target` over `remaining`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnimationStep {
    pub target: f32,
    pub remaining: f32,
}

/// Reported when a step expires
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoppedStep {
    /// Target of the step that just expired (now the scalar's baseline)
    pub target: f32,
    /// Target of the step now at the front, if any
    pub next_target: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimationQueue {
    steps: VecDeque<AnimationStep>,
}

impl AnimationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, target: f32, duration: f32) {
        debug_assert!(duration >= 0.0, "animation step with negative duration");
        self.steps.push_back(AnimationStep {
            target,
            remaining: duration,
        });
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Advance the queue by `dt`, moving `value` toward the front target.
    ///
    /// When the front step expires it is popped, `value` snaps to its target
    /// (the new interpolation baseline) and the pop is reported; the value is
    /// not moved further in that call. Otherwise `value` is interpolated
    /// linearly across the step's remaining window, snapping exactly to the
    /// target when the gap falls under an epsilon or would overshoot.
    pub fn advance(&mut self, value: &mut f32, dt: f32) -> Option<PoppedStep> {
        let (window, target, expired) = {
            let front = self.steps.front_mut()?;
            let window = front.remaining;
            front.remaining -= dt;
            (window, front.target, front.remaining <= 0.0)
        };

        if expired {
            self.steps.pop_front();
            *value = target;
            return Some(PoppedStep {
                target,
                next_target: self.steps.front().map(|s| s.target),
            });
        }

        let speed = (target - *value) / window;
        let next = *value + speed * dt;
        let overshot =
            (target - *value).is_sign_negative() != (target - next).is_sign_negative();
        if (next - target).abs() < SNAP_EPS || overshot {
            *value = target;
        } else {
            *value = next;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn linear_interpolation_hits_midpoint() {
        let mut queue = AnimationQueue::new();
        queue.push(0.0, 2.8);
        let mut value = 1.0;

        let popped = queue.advance(&mut value, 1.4);
        assert!(popped.is_none());
        assert!((value - 0.5).abs() < 1e-5, "value = {value}");
    }

    #[test]
    fn expiry_snaps_to_target_and_empties() {
        let mut queue = AnimationQueue::new();
        queue.push(0.0, 2.8);
        let mut value = 1.0;

        queue.advance(&mut value, 1.4);
        let popped = queue.advance(&mut value, 1.4);

        assert_eq!(value, 0.0);
        assert!(queue.is_empty());
        let popped = popped.expect("front step should have expired");
        assert_eq!(popped.target, 0.0);
        assert_eq!(popped.next_target, None);
    }

    #[test]
    fn pop_reports_next_target() {
        let mut queue = AnimationQueue::new();
        queue.push(0.4, 0.3);
        queue.push(1.0, 0.3);
        let mut value = 1.0;

        let popped = queue.advance(&mut value, 0.3).expect("step expired");
        assert_eq!(popped.target, 0.4);
        assert_eq!(popped.next_target, Some(1.0));
        // popped target becomes the baseline
        assert_eq!(value, 0.4);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn pop_does_not_move_value_further() {
        let mut queue = AnimationQueue::new();
        queue.push(0.4, 0.1);
        queue.push(1.0, 1.0);
        let mut value = 0.8;

        // a large dt expires the front step; the second step is untouched
        queue.advance(&mut value, 0.5);
        assert_eq!(value, 0.4);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn tiny_gap_snaps_exactly() {
        let mut queue = AnimationQueue::new();
        queue.push(1.0, 10.0);
        let mut value = 1.005;

        queue.advance(&mut value, 0.01);
        assert_eq!(value, 1.0);
    }

    #[test]
    fn zero_dt_is_idempotent() {
        let mut queue = AnimationQueue::new();
        queue.push(0.0, 2.0);
        let mut value = 0.7;

        queue.advance(&mut value, 0.0);
        assert_eq!(value, 0.7);
        assert_eq!(queue.len(), 1);
    }

    proptest! {
        /// The scalar never leaves the closed interval between its starting
        /// value and the step target, no matter how the time is sliced.
        #[test]
        fn value_stays_bounded(
            start in -2.0f32..2.0,
            target in -2.0f32..2.0,
            slices in prop::collection::vec(0.01f32..0.5, 1..40),
        ) {
            let mut queue = AnimationQueue::new();
            queue.push(target, 2.0);
            let mut value = start;

            let lo = start.min(target);
            let hi = start.max(target);
            for dt in slices {
                queue.advance(&mut value, dt);
                prop_assert!(value >= lo - 1e-4 && value <= hi + 1e-4,
                    "value {value} escaped [{lo}, {hi}]");
            }
        }
    }
}
