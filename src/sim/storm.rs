//! Storm lighting effect
//!
//! Ambient brightness driven by the animation queue. While the round runs,
//! the queue cycles a flash pattern (dark, bright, dark, long dark lull);
//! the thunder cue is synchronized to the dark-to-bright pop, not to every
//! transition. Once the round ends the queue is replaced by a single
//! fade-to-black step and the pattern never resumes.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::audio::Mixer;
use crate::catalog::THUNDER_CLIPS;
use crate::consts::*;
use crate::sim::anim::AnimationQueue;

/// Tolerance when matching queue targets against the brightness sentinels
const SENTINEL_EPS: f32 = 1e-3;

#[derive(Debug)]
pub struct Storm {
    queue: AnimationQueue,
    brightness: f32,
}

impl Default for Storm {
    fn default() -> Self {
        Self::new()
    }
}

impl Storm {
    pub fn new() -> Self {
        Self {
            queue: AnimationQueue::new(),
            brightness: HIGH_BRIGHTNESS,
        }
    }

    /// Ambient brightness for the renderer, in [0, 1]
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Advance the effect one tick. `thunder_pos` spatializes the cue at
    /// the player. The refill (and the initial seed) never fires the cue;
    /// only a dark step popping in front of a bright one does.
    pub fn update(
        &mut self,
        dt: f32,
        round_active: bool,
        thunder_pos: Vec3,
        mixer: &mut Mixer,
        rng: &mut Pcg32,
    ) {
        if let Some(popped) = self.queue.advance(&mut self.brightness, dt) {
            let dark_popped = (popped.target - LOW_BRIGHTNESS).abs() <= SENTINEL_EPS;
            let bright_next = popped
                .next_target
                .is_some_and(|t| (t - HIGH_BRIGHTNESS).abs() <= SENTINEL_EPS);
            if dark_popped && bright_next {
                let clip = THUNDER_CLIPS[rng.random_range(0..THUNDER_CLIPS.len())];
                mixer.play_at(clip, THUNDER_VOLUME, thunder_pos, SOUND_RANGE);
                log::debug!("lightning strike, thunder cue {:?}", clip);
            }
            return;
        }

        if self.queue.is_empty() && round_active {
            self.queue.push(LOW_BRIGHTNESS, STORM_FLASH_SECS);
            self.queue.push(HIGH_BRIGHTNESS, STORM_FLASH_SECS);
            self.queue.push(LOW_BRIGHTNESS, STORM_FLASH_SECS);
            // the lull before the next strike; the dark->bright pop that
            // follows it is what fires the thunder
            self.queue
                .push(LOW_BRIGHTNESS, rng.random_range(STORM_LULL_MIN..STORM_LULL_MAX));
        }
    }

    /// Replace the storm with a single fade-to-black, once, when the round
    /// ends. The refill is suppressed from then on because the round is no
    /// longer active.
    pub fn begin_round_end_fade(&mut self) {
        self.queue.clear();
        self.brightness = HIGH_BRIGHTNESS;
        self.queue.push(0.0, ROUND_END_FADE_SECS);
    }

    #[cfg(test)]
    fn queue_len(&self) -> usize {
        self.queue.len()
    }
}
