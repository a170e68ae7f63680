//! Storm Road entry point
//!
//! Headless demo host: runs the simulation at a fixed timestep with a
//! scripted driver, printing sound cues and the final score. A real host
//! would pump window events into `TickInput` and render the scene table.

use storm_road::Settings;
use storm_road::audio::Mixer;
use storm_road::consts::SIM_DT;
use storm_road::scene::Scene;
use storm_road::sim::{Game, TickInput};

fn main() {
    env_logger::init();

    let settings = Settings::load();
    log::debug!(
        "settings: {}",
        serde_json::to_string(&settings).unwrap_or_default()
    );

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let mut scene = Scene::new();
    let mut mixer = Mixer::new(settings.effective_master());
    let mut game = Game::new(seed, &mut scene, &mut mixer);

    // scripted driver: wander between lanes every couple of seconds
    let mut elapsed = 0.0f32;
    let mut post_crash = 0.0f32;
    loop {
        let mut input = TickInput::default();
        if game.round_active() {
            let phase = (elapsed / 2.0) as u32 % 4;
            let want = match phase {
                0 => 0,
                1 => -1,
                2 => 0,
                _ => 1,
            };
            if want < game.player.target_lane {
                input.left_pressed = true;
                input.left_downs = 1;
            } else if want > game.player.target_lane {
                input.right_pressed = true;
                input.right_downs = 1;
            }
        }

        game.tick(&input, &mut scene, &mut mixer, SIM_DT);
        mixer.update(SIM_DT);

        for cue in mixer.take_one_shots() {
            log::info!("cue: {} at volume {:.1}", cue.clip.file_name(), cue.volume);
        }

        elapsed += SIM_DT;
        if !game.round_active() {
            post_crash += SIM_DT;
            // let the crash animation and fade-out play out
            if post_crash > 5.0 {
                break;
            }
        }
        if elapsed > 300.0 {
            log::info!("five minutes without a crash, stopping");
            break;
        }
    }

    println!("Game over! Score: {}", game.score as u32);
}
