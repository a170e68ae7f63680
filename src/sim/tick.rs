//! Per-frame simulation tick
//!
//! One synchronous traversal per frame, single-threaded. Ordering matters:
//! traffic advances and reports the collision before the crash transition,
//! and the crash transition precedes the mute and the lighting reset, so
//! every subsystem observes the same "just collided" tick. Once crashed,
//! traffic only coasts, which also makes re-entering the crash impossible.

use rand_pcg::Pcg32;

use crate::audio::{Clip, Mixer, VoiceId};
use crate::consts::*;
use crate::scene::Scene;
use crate::sim::road::RoadTiles;
use crate::sim::state::{CameraPose, Player};
use crate::sim::storm::Storm;
use crate::sim::traffic::TrafficPool;

/// Input snapshot for a single tick. `downs` counts key-down edges since
/// the previous tick; the host resets them after each traversal.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left_pressed: bool,
    pub left_downs: u8,
    pub right_pressed: bool,
    pub right_downs: u8,
}

/// One round of the game: the playing state driven by the host loop
#[derive(Debug)]
pub struct Game {
    rng: Pcg32,
    pub player: Player,
    pub traffic: TrafficPool,
    pub storm: Storm,
    road: RoadTiles,
    camera: CameraPose,
    /// Seconds survived; freezes when the round ends
    pub score: f32,
    bgm: Option<VoiceId>,
}

impl Game {
    pub fn new(seed: u64, scene: &mut Scene, mixer: &mut Mixer) -> Self {
        use rand::SeedableRng;

        let road = RoadTiles::new(scene);
        let player = Player::new(scene);
        let bgm = mixer.start_loop(Clip::Bgm, BGM_VOLUME);
        log::info!("round started, seed {seed}");

        Self {
            rng: Pcg32::seed_from_u64(seed),
            player,
            traffic: TrafficPool::new(),
            storm: Storm::new(),
            road,
            camera: CameraPose::default(),
            score: 0.0,
            bgm: Some(bgm),
        }
    }

    /// Ambient brightness for the renderer
    pub fn brightness(&self) -> f32 {
        self.storm.brightness()
    }

    pub fn round_active(&self) -> bool {
        !self.player.crashed
    }

    /// Advance the whole simulation by one frame
    pub fn tick(&mut self, input: &TickInput, scene: &mut Scene, mixer: &mut Mixer, dt: f32) {
        if !self.player.crashed {
            self.score += dt;
            self.road.update(dt, scene);

            let collided = self
                .traffic
                .update(dt, &self.player, scene, mixer, &mut self.rng);
            if collided {
                self.player.enter_crash(mixer);
                self.traffic.mute_all(mixer);
                if let Some(bgm) = self.bgm.take() {
                    mixer.stop(bgm, None);
                }
                self.storm.begin_round_end_fade();
                log::info!("round over, score {:.0}", self.score);
            }

            if input.left_pressed && input.left_downs > 0 {
                self.player.go_left();
            }
            if input.right_pressed && input.right_downs > 0 {
                self.player.go_right();
            }
        } else {
            // cars keep moving and rendering after the round ends
            self.traffic.coast(dt, scene, mixer);
        }

        self.player
            .update(dt, scene, mixer, &mut self.rng);
        self.storm.update(
            dt,
            !self.player.crashed,
            self.player.transform.position,
            mixer,
            &mut self.rng,
        );
        mixer.set_listener(self.camera.at, self.camera.right, dt);
    }
}
