//! Oncoming traffic pool
//!
//! Owns every spawned car together with its drawable and its two looping
//! voices (engine, horn). Cars are created by the spawn countdown, advanced
//! at a fixed closing speed, horn-gated against the player's target lane,
//! and retired exactly once past the despawn threshold. Release paths
//! consume the handles, so a double detach/stop cannot be expressed.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::audio::{Mixer, VoiceId};
use crate::catalog::CarModel;
use crate::consts::*;
use crate::lane_center;
use crate::scene::{DrawableId, Scene, Transform};
use crate::sim::state::Player;

/// The pair of looping voices owned by a living car
#[derive(Debug)]
struct CarAudio {
    engine: VoiceId,
    horn: VoiceId,
}

/// One oncoming car. Present in the pool iff its drawable is attached;
/// `audio` is taken exactly once, by retirement or by the round-end mute.
#[derive(Debug)]
pub struct OncomingCar {
    pub lane: i32,
    pub model: CarModel,
    pub transform: Transform,
    drawable: DrawableId,
    audio: Option<CarAudio>,
}

impl OncomingCar {
    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    /// Voice position: lateral offset from the player, exaggerated so the
    /// stereo pan reflects relative lane position.
    fn voice_position(&self, player_lateral: f32) -> Vec3 {
        let mut pos = self.transform.position;
        pos.x = (pos.x - player_lateral) * SOUND_PAN_SCALE;
        pos
    }

    /// Release the car's resources, consuming it. `fade` softens the stop
    /// for cars that scroll out of earshot.
    fn release(mut self, scene: &mut Scene, mixer: &mut Mixer, fade: Option<f32>) {
        scene.detach(self.drawable);
        if let Some(audio) = self.audio.take() {
            mixer.stop(audio.engine, fade);
            mixer.stop(audio.horn, fade);
        }
    }
}

/// All currently active oncoming cars plus the spawn countdown
#[derive(Debug)]
pub struct TrafficPool {
    cars: Vec<OncomingCar>,
    spawn_countdown: f32,
}

impl Default for TrafficPool {
    fn default() -> Self {
        Self::new()
    }
}

impl TrafficPool {
    pub fn new() -> Self {
        Self {
            cars: Vec::new(),
            spawn_countdown: FIRST_SPAWN_DELAY,
        }
    }

    pub fn cars(&self) -> &[OncomingCar] {
        &self.cars
    }

    /// Advance the pool one tick. Returns true iff a car occupies the
    /// player's target lane within the collision window.
    pub fn update(
        &mut self,
        dt: f32,
        player: &Player,
        scene: &mut Scene,
        mixer: &mut Mixer,
        rng: &mut Pcg32,
    ) -> bool {
        self.spawn_countdown -= dt;
        if self.spawn_countdown <= 0.0 {
            self.spawn(player, scene, mixer, rng);
            self.spawn_countdown = rng.random_range(SPAWN_INTERVAL_MIN..SPAWN_INTERVAL_MAX);
        }

        for car in &mut self.cars {
            car.transform.position.y -= ONCOMING_SPEED * dt;
            scene.set_transform(car.drawable, car.transform);

            if let Some(audio) = &car.audio {
                let voice_pos = car.voice_position(player.lateral);
                mixer.set_position(audio.engine, voice_pos);
                mixer.set_position(audio.horn, voice_pos);

                // horn gate, re-evaluated every tick
                let same_lane = car.lane == player.target_lane;
                let close =
                    (car.transform.position.y - player.transform.position.y).abs() <= HORN_RANGE_Y;
                let volume = if same_lane && close { HORN_VOLUME } else { 0.0 };
                mixer.set_volume(audio.horn, volume);
            }
        }

        self.retire_past_despawn(scene, mixer);

        // collision against the player's *target* lane: a swerve registers
        // as soon as it is committed, not when the car body arrives
        self.cars.iter().any(|car| {
            car.lane == player.target_lane
                && (car.transform.position.y - player.transform.position.y).abs() < COLLISION_Y
        })
    }

    /// Post-round advance: cars keep moving and rendering, but nothing
    /// spawns, horns stay silent and collisions no longer matter.
    pub fn coast(&mut self, dt: f32, scene: &mut Scene, mixer: &mut Mixer) {
        for car in &mut self.cars {
            car.transform.position.y -= ONCOMING_SPEED * dt;
            scene.set_transform(car.drawable, car.transform);
        }
        self.retire_past_despawn(scene, mixer);
    }

    /// Stop and release every car's voices immediately, keeping the cars
    /// attached. Used once, when the round ends.
    pub fn mute_all(&mut self, mixer: &mut Mixer) {
        for car in &mut self.cars {
            if let Some(audio) = car.audio.take() {
                mixer.stop(audio.engine, None);
                mixer.stop(audio.horn, None);
            }
        }
        log::debug!("muted {} cars", self.cars.len());
    }

    fn spawn(&mut self, player: &Player, scene: &mut Scene, mixer: &mut Mixer, rng: &mut Pcg32) {
        let lane = rng.random_range(-1..=1);
        let model = CarModel::ALL[rng.random_range(0..CarModel::ALL.len())];
        let transform = Transform::from_position(Vec3::new(lane_center(lane), SPAWN_Y, 0.0));
        let drawable = scene.attach(model.mesh_name(), transform);

        let mut car = OncomingCar {
            lane,
            model,
            transform,
            drawable,
            audio: None,
        };
        let voice_pos = car.voice_position(player.lateral);
        car.audio = Some(CarAudio {
            engine: mixer.start_loop_at(model.engine_clip(), ENGINE_VOLUME, voice_pos, SOUND_RANGE),
            // silent until the horn gate opens
            horn: mixer.start_loop_at(model.horn_clip(), 0.0, voice_pos, SOUND_RANGE),
        });

        log::debug!("spawned {:?} in lane {lane}", model);
        self.cars.push(car);
    }

    fn retire_past_despawn(&mut self, scene: &mut Scene, mixer: &mut Mixer) {
        let mut i = 0;
        while i < self.cars.len() {
            if self.cars[i].transform.position.y < DESPAWN_Y {
                let car = self.cars.remove(i);
                log::debug!("retired {:?} from lane {}", car.model, car.lane);
                car.release(scene, mixer, Some(RETIRE_FADE_SECS));
            } else {
                i += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn setup() -> (Scene, Mixer, Pcg32) {
        (Scene::new(), Mixer::new(1.0), Pcg32::seed_from_u64(42))
    }

    /// Build a pool with one car placed by hand
    fn pool_with_car(
        lane: i32,
        y: f32,
        scene: &mut Scene,
        mixer: &mut Mixer,
    ) -> TrafficPool {
        let model = CarModel::Sedan;
        let transform = Transform::from_position(Vec3::new(lane_center(lane), y, 0.0));
        let drawable = scene.attach(model.mesh_name(), transform);
        let audio = CarAudio {
            engine: mixer.start_loop_at(model.engine_clip(), 1.0, Vec3::ZERO, SOUND_RANGE),
            horn: mixer.start_loop_at(model.horn_clip(), 0.0, Vec3::ZERO, SOUND_RANGE),
        };
        let mut pool = TrafficPool::new();
        pool.spawn_countdown = 1000.0; // keep the spawner quiet
        pool.cars.push(OncomingCar {
            lane,
            model,
            transform,
            drawable,
            audio: Some(audio),
        });
        pool
    }

    #[test]
    fn no_collision_across_lanes() {
        let (mut scene, mut mixer, mut rng) = setup();
        let player = Player::new(&mut scene);
        let mut pool = pool_with_car(1, PLAYER_Y, &mut scene, &mut mixer);

        // same longitudinal position, different lane
        assert!(!pool.update(0.0, &player, &mut scene, &mut mixer, &mut rng));
    }

    #[test]
    fn collision_in_target_lane_within_window() {
        let (mut scene, mut mixer, mut rng) = setup();
        let player = Player::new(&mut scene);
        let mut pool = pool_with_car(0, PLAYER_Y + 1.5, &mut scene, &mut mixer);

        assert!(pool.update(0.0, &player, &mut scene, &mut mixer, &mut rng));
    }

    #[test]
    fn collision_uses_target_lane_not_position() {
        let (mut scene, mut mixer, mut rng) = setup();
        let mut player = Player::new(&mut scene);
        // player body still at lane 0, but steering right
        player.go_right();
        let mut pool = pool_with_car(1, PLAYER_Y, &mut scene, &mut mixer);

        assert!(pool.update(0.0, &player, &mut scene, &mut mixer, &mut rng));
    }

    #[test]
    fn cars_advance_and_retire_with_handles_released() {
        let (mut scene, mut mixer, mut rng) = setup();
        let player = Player::new(&mut scene);
        let mut pool = pool_with_car(0, DESPAWN_Y + 1.0, &mut scene, &mut mixer);
        let base_drawables = scene.len();

        let y0 = pool.cars()[0].transform.position.y;
        pool.update(0.01, &player, &mut scene, &mut mixer, &mut rng);
        assert!(pool.cars()[0].transform.position.y < y0);

        // push it past the threshold
        pool.update(1.0, &player, &mut scene, &mut mixer, &mut rng);
        assert!(pool.cars().is_empty());
        assert_eq!(scene.len(), base_drawables - 1);
        // voices are fading out, none active
        assert_eq!(mixer.active_voice_count(), 0);
    }

    #[test]
    fn horn_gates_on_target_lane_and_proximity() {
        let (mut scene, mut mixer, mut rng) = setup();
        let player = Player::new(&mut scene);

        // close car in the player's lane: horn at full volume
        let mut pool = pool_with_car(0, PLAYER_Y + 50.0, &mut scene, &mut mixer);
        pool.update(0.0, &player, &mut scene, &mut mixer, &mut rng);
        let horn = pool.cars()[0].audio.as_ref().unwrap().horn;
        assert_eq!(mixer.voice(horn).unwrap().volume, HORN_VOLUME);

        // beyond the proximity window: silenced again
        pool.cars[0].transform.position.y = PLAYER_Y + HORN_RANGE_Y + 50.0;
        pool.update(0.0, &player, &mut scene, &mut mixer, &mut rng);
        assert_eq!(mixer.voice(horn).unwrap().volume, 0.0);
    }

    #[test]
    fn voices_pan_relative_to_player() {
        let (mut scene, mut mixer, mut rng) = setup();
        let player = Player::new(&mut scene);
        let mut pool = pool_with_car(1, 50.0, &mut scene, &mut mixer);

        pool.update(0.0, &player, &mut scene, &mut mixer, &mut rng);
        let engine = pool.cars()[0].audio.as_ref().unwrap().engine;
        let pos = mixer.voice(engine).unwrap().position.unwrap();
        // player at x=0, car at lane 1: offset scaled up for audible panning
        assert_eq!(pos.x, LANE_WIDTH * SOUND_PAN_SCALE);
    }

    #[test]
    fn spawner_creates_cars_with_silent_horn() {
        let (mut scene, mut mixer, mut rng) = setup();
        let player = Player::new(&mut scene);
        let mut pool = TrafficPool::new();

        // run past the first spawn delay
        let mut ticks = 0;
        while pool.cars().is_empty() && ticks < 1000 {
            pool.update(1.0 / 60.0, &player, &mut scene, &mut mixer, &mut rng);
            ticks += 1;
        }
        assert_eq!(pool.cars().len(), 1);

        let car = &pool.cars()[0];
        assert!((-1..=1).contains(&car.lane));
        assert_eq!(car.transform.position.x, lane_center(car.lane));
        let audio = car.audio.as_ref().unwrap();
        assert_eq!(mixer.voice(audio.engine).unwrap().volume, ENGINE_VOLUME);
        // spawned beyond the horn window, so the gate holds it silent
        assert_eq!(mixer.voice(audio.horn).unwrap().volume, 0.0);
    }

    #[test]
    fn mute_all_releases_audio_but_keeps_drawables() {
        let (mut scene, mut mixer, _) = setup();
        let _player = Player::new(&mut scene);
        let mut pool = pool_with_car(0, 100.0, &mut scene, &mut mixer);
        let drawables = scene.len();

        pool.mute_all(&mut mixer);
        assert!(!pool.cars()[0].has_audio());
        assert_eq!(mixer.voice_count(), 0);
        assert_eq!(scene.len(), drawables);

        // second mute is a no-op, not a double release
        pool.mute_all(&mut mixer);
    }

    #[test]
    fn coast_keeps_cars_moving_after_round_end() {
        let (mut scene, mut mixer, _) = setup();
        let _player = Player::new(&mut scene);
        let mut pool = pool_with_car(0, 100.0, &mut scene, &mut mixer);
        pool.mute_all(&mut mixer);

        let y0 = pool.cars()[0].transform.position.y;
        pool.coast(0.5, &mut scene, &mut mixer);
        assert!(pool.cars()[0].transform.position.y < y0);

        // coasting cars still retire once off the road
        pool.cars[0].transform.position.y = DESPAWN_Y - 1.0;
        pool.coast(0.01, &mut scene, &mut mixer);
        assert!(pool.cars().is_empty());
    }
}
