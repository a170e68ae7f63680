//! Spatial audio collaborator
//!
//! The core drives the mixer synchronously: looping spatialized voices are
//! owned through opaque `VoiceId` handles, one-shot cues are queued for the
//! backend to drain. Fades and playback DSP are the backend's business; this
//! table records the authoritative per-voice state each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sound clip identifiers, mapped to asset files by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Clip {
    SedanHorn,
    PoliceHorn,
    AmbulanceHorn,
    FlatTruckHorn,
    CarEngine,
    TruckEngine,
    Crash,
    GroundImpact,
    Thunder1,
    Thunder2,
    Thunder3,
    Thunder4,
    Thunder5,
    Bgm,
}

impl Clip {
    /// Asset file the host resolves this clip to
    pub fn file_name(self) -> &'static str {
        match self {
            Clip::SedanHorn => "SedanHorn.opus",
            Clip::PoliceHorn => "PoliceHorn.opus",
            Clip::AmbulanceHorn => "AmbulanceHorn.opus",
            Clip::FlatTruckHorn => "TruckFlatHorn.opus",
            Clip::CarEngine => "car_engine_2.opus",
            Clip::TruckEngine => "TruckFlatEngine.opus",
            Clip::Crash => "crash.opus",
            Clip::GroundImpact => "hitTheGround.opus",
            Clip::Thunder1 => "thunder1.opus",
            Clip::Thunder2 => "thunder2.opus",
            Clip::Thunder3 => "thunder3.opus",
            Clip::Thunder4 => "thunder4.opus",
            Clip::Thunder5 => "thunder5.opus",
            Clip::Bgm => "bgm.opus",
        }
    }
}

/// Opaque handle to a looping voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceId(u32);

/// A looping voice owned by exactly one entity in the simulation
#[derive(Debug, Clone)]
pub struct Voice {
    pub clip: Clip,
    pub volume: f32,
    /// Panning position; `None` for flat (non-spatialized) loops
    pub position: Option<Vec3>,
    pub range: f32,
    /// Remaining fade-out, set by a faded stop
    fade_out: Option<f32>,
}

impl Voice {
    pub fn is_fading_out(&self) -> bool {
        self.fade_out.is_some()
    }
}

/// A fire-and-forget cue queued for the backend
#[derive(Debug, Clone)]
pub struct OneShot {
    pub clip: Clip,
    pub volume: f32,
    pub position: Option<Vec3>,
    pub range: f32,
}

/// Listener pose for 3D panning
#[derive(Debug, Clone, Copy)]
pub struct ListenerPose {
    pub at: Vec3,
    pub right: Vec3,
}

impl Default for ListenerPose {
    fn default() -> Self {
        Self {
            at: Vec3::ZERO,
            right: Vec3::X,
        }
    }
}

/// Audio command/state table consumed by the playback backend
#[derive(Debug, Default)]
pub struct Mixer {
    voices: HashMap<VoiceId, Voice>,
    one_shots: Vec<OneShot>,
    listener: ListenerPose,
    next_id: u32,
    master_volume: f32,
}

impl Mixer {
    pub fn new(master_volume: f32) -> Self {
        Self {
            master_volume: master_volume.clamp(0.0, 1.0),
            ..Self::default()
        }
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    /// Queue a flat one-shot cue
    pub fn play_once(&mut self, clip: Clip, volume: f32) {
        self.one_shots.push(OneShot {
            clip,
            volume,
            position: None,
            range: 0.0,
        });
    }

    /// Queue a spatialized one-shot cue
    pub fn play_at(&mut self, clip: Clip, volume: f32, position: Vec3, range: f32) {
        self.one_shots.push(OneShot {
            clip,
            volume,
            position: Some(position),
            range,
        });
    }

    /// Start a flat loop (e.g. background music)
    pub fn start_loop(&mut self, clip: Clip, volume: f32) -> VoiceId {
        self.insert_voice(Voice {
            clip,
            volume,
            position: None,
            range: 0.0,
            fade_out: None,
        })
    }

    /// Start a spatialized loop
    pub fn start_loop_at(&mut self, clip: Clip, volume: f32, position: Vec3, range: f32) -> VoiceId {
        self.insert_voice(Voice {
            clip,
            volume,
            position: Some(position),
            range,
            fade_out: None,
        })
    }

    fn insert_voice(&mut self, voice: Voice) -> VoiceId {
        let id = VoiceId(self.next_id);
        self.next_id += 1;
        self.voices.insert(id, voice);
        id
    }

    /// Move a spatialized voice
    pub fn set_position(&mut self, id: VoiceId, position: Vec3) {
        self.voice_mut(id).position = Some(position);
    }

    pub fn set_volume(&mut self, id: VoiceId, volume: f32) {
        self.voice_mut(id).volume = volume;
    }

    /// Stop a looping voice. With `fade` the voice lingers, decaying until
    /// `update` retires it; without, it is cut immediately. Either way the
    /// caller's handle is spent: stopping it again is a programming error.
    pub fn stop(&mut self, id: VoiceId, fade: Option<f32>) {
        match fade {
            Some(secs) if secs > 0.0 => {
                self.voice_mut(id).fade_out = Some(secs);
            }
            _ => {
                let removed = self.voices.remove(&id);
                assert!(removed.is_some(), "stop of unknown voice {id:?}");
            }
        }
    }

    fn voice_mut(&mut self, id: VoiceId) -> &mut Voice {
        self.voices
            .get_mut(&id)
            .unwrap_or_else(|| panic!("unknown voice {id:?}"))
    }

    /// Update the listener pose. `dt` lets the backend smooth the motion.
    pub fn set_listener(&mut self, at: Vec3, right: Vec3, _dt: f32) {
        self.listener = ListenerPose { at, right };
    }

    pub fn listener(&self) -> ListenerPose {
        self.listener
    }

    /// Advance fade-outs; called once per host frame
    pub fn update(&mut self, dt: f32) {
        self.voices.retain(|_, voice| {
            if let Some(remaining) = &mut voice.fade_out {
                *remaining -= dt;
                let gone = *remaining <= 0.0;
                if !gone {
                    // linear decay toward silence over the fade window
                    voice.volume *= (*remaining / (*remaining + dt)).max(0.0);
                }
                !gone
            } else {
                true
            }
        });
    }

    /// Drain queued one-shot cues for the backend
    pub fn take_one_shots(&mut self) -> Vec<OneShot> {
        std::mem::take(&mut self.one_shots)
    }

    pub fn voice(&self, id: VoiceId) -> Option<&Voice> {
        self.voices.get(&id)
    }

    /// Number of live (non-fading) voices
    pub fn active_voice_count(&self) -> usize {
        self.voices.values().filter(|v| !v.is_fading_out()).count()
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_set_and_stop() {
        let mut mixer = Mixer::new(1.0);
        let id = mixer.start_loop_at(Clip::CarEngine, 1.0, Vec3::ZERO, 4.0);
        assert_eq!(mixer.active_voice_count(), 1);

        mixer.set_volume(id, 0.5);
        mixer.set_position(id, Vec3::new(5.0, 100.0, 0.0));
        let voice = mixer.voice(id).unwrap();
        assert_eq!(voice.volume, 0.5);
        assert_eq!(voice.position.unwrap().x, 5.0);

        mixer.stop(id, None);
        assert_eq!(mixer.voice_count(), 0);
    }

    #[test]
    fn faded_stop_lingers_until_update() {
        let mut mixer = Mixer::new(1.0);
        let id = mixer.start_loop_at(Clip::TruckEngine, 1.0, Vec3::ZERO, 4.0);
        mixer.stop(id, Some(0.5));

        assert_eq!(mixer.voice_count(), 1);
        assert_eq!(mixer.active_voice_count(), 0);

        mixer.update(0.3);
        assert_eq!(mixer.voice_count(), 1);
        mixer.update(0.3);
        assert_eq!(mixer.voice_count(), 0);
    }

    #[test]
    #[should_panic(expected = "stop of unknown voice")]
    fn double_stop_fails_loudly() {
        let mut mixer = Mixer::new(1.0);
        let id = mixer.start_loop(Clip::Bgm, 0.1);
        mixer.stop(id, None);
        mixer.stop(id, None);
    }

    #[test]
    fn one_shots_drain_once() {
        let mut mixer = Mixer::new(1.0);
        mixer.play_at(Clip::Crash, 1.0, Vec3::ZERO, 4.0);
        mixer.play_once(Clip::Thunder1, 1.0);

        let cues = mixer.take_one_shots();
        assert_eq!(cues.len(), 2);
        assert!(mixer.take_one_shots().is_empty());
    }
}
