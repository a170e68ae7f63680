//! Deterministic simulation module
//!
//! All gameplay logic lives here. One synchronous `tick` per frame:
//! - Seeded RNG threaded explicitly (deterministic under a fixed seed)
//! - No rendering or audio-backend dependencies, only collaborator handles

pub mod anim;
pub mod road;
pub mod state;
pub mod storm;
pub mod tick;
pub mod traffic;

pub use anim::{AnimationQueue, AnimationStep, PoppedStep};
pub use road::RoadTiles;
pub use state::{CameraPose, Player, crash_flight_time};
pub use storm::Storm;
pub use tick::{Game, TickInput};
pub use traffic::{OncomingCar, TrafficPool};
