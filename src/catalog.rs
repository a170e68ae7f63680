//! Fixed asset catalog
//!
//! Maps every car model to its mesh and sound clips. The mappings are total
//! `match`es, so a missing catalog entry cannot be represented; several
//! models deliberately share a clip.

use serde::{Deserialize, Serialize};

use crate::audio::Clip;

/// The fixed set of oncoming car models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarModel {
    Sedan,
    Police,
    Ambulance,
    FlatTruck,
    Van,
}

impl CarModel {
    pub const ALL: [CarModel; 5] = [
        CarModel::Sedan,
        CarModel::Police,
        CarModel::Ambulance,
        CarModel::FlatTruck,
        CarModel::Van,
    ];

    pub fn mesh_name(self) -> &'static str {
        match self {
            CarModel::Sedan => "Sedan",
            CarModel::Police => "Police",
            CarModel::Ambulance => "Ambulance",
            CarModel::FlatTruck => "TruckFlat",
            CarModel::Van => "Van",
        }
    }

    /// Looping engine sound; trucks and vans share the heavy engine
    pub fn engine_clip(self) -> Clip {
        match self {
            CarModel::Sedan | CarModel::Police | CarModel::Ambulance => Clip::CarEngine,
            CarModel::FlatTruck | CarModel::Van => Clip::TruckEngine,
        }
    }

    /// Looping horn sound, gated by lane proximity
    pub fn horn_clip(self) -> Clip {
        match self {
            CarModel::Sedan => Clip::SedanHorn,
            CarModel::Police => Clip::PoliceHorn,
            CarModel::Ambulance => Clip::AmbulanceHorn,
            CarModel::FlatTruck | CarModel::Van => Clip::FlatTruckHorn,
        }
    }
}

/// Thunder cues, one picked uniformly per lightning strike
pub const THUNDER_CLIPS: [Clip; 5] = [
    Clip::Thunder1,
    Clip::Thunder2,
    Clip::Thunder3,
    Clip::Thunder4,
    Clip::Thunder5,
];

pub const PLAYER_MESH: &str = "PlayerCar";
pub const ROAD_TILE_MESH: &str = "RoadTile";
