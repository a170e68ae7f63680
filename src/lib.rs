//! Storm Road - a lane-dodging driving game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (traffic, player, storm lighting, tick)
//! - `scene`: Scene/attachment collaborator (opaque drawable handles)
//! - `audio`: Spatial audio collaborator (looping voices, one-shot cues)
//! - `catalog`: Fixed asset catalog (car models, sound clips)
//! - `settings`: Volume preferences

pub mod audio;
pub mod catalog;
pub mod scene;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz host loop)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Lateral distance between adjacent lane centers
    pub const LANE_WIDTH: f32 = 2.0;
    /// Player's fixed longitudinal position
    pub const PLAYER_Y: f32 = -5.0;
    /// Longitudinal position where new traffic appears
    pub const SPAWN_Y: f32 = 150.0;
    /// Traffic past this point is retired
    pub const DESPAWN_Y: f32 = -50.0;

    /// Player lateral lane-tracking speed
    pub const PLAYER_SPEED: f32 = 8.0;
    /// Closing speed of oncoming traffic
    pub const ONCOMING_SPEED: f32 = 20.0;

    /// Spawn countdown reset range (seconds)
    pub const SPAWN_INTERVAL_MIN: f32 = 2.0;
    pub const SPAWN_INTERVAL_MAX: f32 = 5.0;
    /// First car arrives quickly after round setup
    pub const FIRST_SPAWN_DELAY: f32 = 1.0;

    /// Collision window along the travel axis
    pub const COLLISION_Y: f32 = 2.0;
    /// Horn sounds while a same-lane car is within this distance
    pub const HORN_RANGE_Y: f32 = 100.0;

    /// Lateral offset from the player is exaggerated by this factor when
    /// positioning voices, so horn/engine panning tracks relative lane
    /// position instead of imperceptible absolute world separation.
    pub const SOUND_PAN_SCALE: f32 = 5.0;
    /// Rolloff range for spatialized voices
    pub const SOUND_RANGE: f32 = 4.0;
    /// Faded stop applied when a car scrolls off the road
    pub const RETIRE_FADE_SECS: f32 = 2.0;

    /// Voice volumes
    pub const ENGINE_VOLUME: f32 = 1.0;
    pub const HORN_VOLUME: f32 = 1.0;
    pub const CRASH_VOLUME: f32 = 1.0;
    pub const GROUND_IMPACT_VOLUME: f32 = 0.8;
    pub const THUNDER_VOLUME: f32 = 1.0;
    pub const BGM_VOLUME: f32 = 0.1;

    /// Crash ballistics: launch speed and gravity along +Z
    pub const CRASH_LAUNCH_SPEED: f32 = 5.0;
    pub const GRAVITY: f32 = 9.8;
    /// Tumble angular speed while airborne (radians/sec)
    pub const TUMBLE_SPEED: f32 = 3.0 * std::f32::consts::PI;

    /// Storm brightness sentinels
    pub const HIGH_BRIGHTNESS: f32 = 1.0;
    pub const LOW_BRIGHTNESS: f32 = 0.4;
    /// Duration of each flash transition in the storm pattern
    pub const STORM_FLASH_SECS: f32 = 0.3;
    /// Lull between lightning strikes (seconds, drawn uniformly)
    pub const STORM_LULL_MIN: f32 = 5.0;
    pub const STORM_LULL_MAX: f32 = 10.0;
    /// Fade-to-black applied once when the round ends
    pub const ROUND_END_FADE_SECS: f32 = 2.8;

    /// Scrolling road tiles
    pub const ROAD_TILE_COUNT: usize = 20;
    pub const ROAD_TILE_DEPTH: f32 = 10.0;
    pub const ROAD_SPEED: f32 = 10.0;
    pub const ROAD_WRAP_Y: f32 = -50.0;
}

/// Lateral center of a lane (lanes are indexed -1/0/1)
#[inline]
pub fn lane_center(lane: i32) -> f32 {
    lane as f32 * consts::LANE_WIDTH
}
