//! Player state and crash state machine

use glam::{Quat, Vec3};
use rand::Rng;
use rand_pcg::Pcg32;

use crate::audio::{Clip, Mixer};
use crate::catalog::PLAYER_MESH;
use crate::consts::*;
use crate::lane_center;
use crate::scene::{DrawableId, Scene, Transform};

/// Ballistic flight time back to the ground plane
#[inline]
pub fn crash_flight_time() -> f32 {
    2.0 * CRASH_LAUNCH_SPEED / GRAVITY
}

/// The player's car: lateral lane tracking plus the crash state machine
#[derive(Debug)]
pub struct Player {
    /// Continuous lateral position
    pub lateral: f32,
    /// Lane the car is steering toward, clamped to [-1, 1]
    pub target_lane: i32,
    /// Set once by `enter_crash`; irreversible for the round
    pub crashed: bool,
    secs_since_crash: f32,
    pub transform: Transform,
    drawable: DrawableId,
}

impl Player {
    pub fn new(scene: &mut Scene) -> Self {
        let transform = Transform {
            position: Vec3::new(0.0, PLAYER_Y, 0.0),
            // facing oncoming traffic
            rotation: Quat::from_axis_angle(Vec3::Z, std::f32::consts::PI),
        };
        let drawable = scene.attach(PLAYER_MESH, transform);
        Self {
            lateral: 0.0,
            target_lane: 0,
            crashed: false,
            secs_since_crash: 0.0,
            transform,
            drawable,
        }
    }

    pub fn go_left(&mut self) {
        self.target_lane = (self.target_lane - 1).max(-1);
    }

    pub fn go_right(&mut self) {
        self.target_lane = (self.target_lane + 1).min(1);
    }

    /// Transition into the crash state and play the crash cue.
    ///
    /// Calling this on an already-crashed player means the tick ordering is
    /// broken; that is a programming error and fails loudly.
    pub fn enter_crash(&mut self, mixer: &mut Mixer) {
        assert!(!self.crashed, "enter_crash on an already-crashed player");
        self.crashed = true;
        mixer.play_at(
            Clip::Crash,
            CRASH_VOLUME,
            self.transform.position,
            SOUND_RANGE,
        );
        log::info!("player crashed in lane {}", self.target_lane);
    }

    pub fn update(&mut self, dt: f32, scene: &mut Scene, mixer: &mut Mixer, rng: &mut Pcg32) {
        if self.crashed {
            self.crash_animation(dt, mixer, rng);
        } else {
            let target = lane_center(self.target_lane);
            let step = PLAYER_SPEED * dt;
            if (target - self.lateral).abs() <= step {
                self.lateral = target;
            } else if target > self.lateral {
                self.lateral += step;
            } else {
                self.lateral -= step;
            }
            self.transform.position.x = self.lateral;
        }
        scene.set_transform(self.drawable, self.transform);
    }

    /// Ballistic tumble: z(t) = v0*t - g*t^2/2, with the orientation spun
    /// about a freshly randomized axis every tick. Once the car is back on
    /// the ground the motion freezes and the impact cue fires, exactly once.
    fn crash_animation(&mut self, dt: f32, mixer: &mut Mixer, rng: &mut Pcg32) {
        let flight_time = crash_flight_time();
        if self.secs_since_crash >= flight_time {
            return;
        }

        self.secs_since_crash = (self.secs_since_crash + dt).min(flight_time);
        let t = self.secs_since_crash;
        self.transform.position.z = CRASH_LAUNCH_SPEED * t - 0.5 * GRAVITY * t * t;

        let axis = Vec3::new(rng.random(), rng.random(), rng.random())
            .try_normalize()
            .unwrap_or(Vec3::Z);
        self.transform.rotation =
            (self.transform.rotation * Quat::from_axis_angle(axis, TUMBLE_SPEED * dt)).normalize();

        if self.secs_since_crash >= flight_time {
            mixer.play_at(
                Clip::GroundImpact,
                GROUND_IMPACT_VOLUME,
                self.transform.position,
                SOUND_RANGE,
            );
            log::debug!("player hit the ground after {t:.2}s of flight");
        }
    }

    pub fn secs_since_crash(&self) -> f32 {
        self.secs_since_crash
    }
}

/// Chase camera pose; the audio listener follows it
#[derive(Debug, Clone, Copy)]
pub struct CameraPose {
    pub at: Vec3,
    pub right: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            at: Vec3::new(0.0, -13.0, 6.0),
            right: Vec3::X,
        }
    }
}
