//! Headless driver: plays a scripted input timeline through the same frame
//! loop the browser build uses and logs where the player ends up.
//!
//! Usage: `sidescroller [config.json]`

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use tracing::info;

use sidescroller::controller::{
    Action, FrameDriver, FrameLoopContext, GamepadSnapshot, InputAggregator, InputEvent, PhysicsSystem,
};
use sidescroller::model::{CanvasSize, Player};
use sidescroller::ui::{MemoryFlagStore, Tutorial};
use sidescroller::view::TraceRenderer;
use sidescroller::{logging, GameConfig, GameError};

const CANVAS: CanvasSize = CanvasSize::new(800.0, 600.0);
const FRAMES: u64 = 180;

/// Events delivered just before the given frame runs.
fn timeline() -> Vec<(u64, InputEvent)> {
    vec![
        (0, InputEvent::KeyDown("ArrowRight".into())),
        (30, InputEvent::KeyDown("Space".into())),
        (32, InputEvent::KeyUp("Space".into())),
        (45, InputEvent::KeyUp("ArrowRight".into())),
        (60, InputEvent::TouchButton { action: Action::Left, pressed: true }),
        (75, InputEvent::TouchButton { action: Action::Left, pressed: false }),
        (80, InputEvent::SwipeStart(DVec2::new(400.0, 300.0))),
        (82, InputEvent::SwipeMove(DVec2::new(410.0, 220.0))),
        (84, InputEvent::SwipeEnd),
        (120, InputEvent::GamepadConnected { index: 0, id: "virtual pad".into() }),
        (150, InputEvent::GamepadDisconnected),
    ]
}

/// Stick pushed right with A held for the first half of the connection.
fn virtual_pad(frame: u64) -> GamepadSnapshot {
    GamepadSnapshot::new(vec![0.8, 0.0], vec![frame < 135])
}

fn main() -> Result<(), GameError> {
    logging::init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };

    let mut store = MemoryFlagStore::new();
    let tutorial = Tutorial::new(config.visited_key.clone(), config.tutorial_hide_ms);
    tutorial.show_on_first_visit(&mut store, || {
        info!(hide_after_ms = tutorial.hide_after_ms, "tutorial overlay would be shown");
        Ok::<(), GameError>(())
    })?;

    let input = Rc::new(RefCell::new(InputAggregator::new()));
    let player = Player::spawn(&config.player, config.spawn_x, CANVAS);
    let mut frame_ctx =
        FrameLoopContext::new(input.clone(), PhysicsSystem::new(config.player), player, TraceRenderer::new());

    let mut script = timeline().into_iter().peekable();
    let driver = FrameDriver::new();
    let frames = driver.run_blocking(|handle| {
        let frame = frame_ctx.frame;
        while let Some((_, event)) = script.next_if(|(at, _)| *at == frame) {
            input.borrow_mut().process_event(&event);
        }

        let pad = input.borrow().connected_gamepad().map(|_| virtual_pad(frame));
        let control = frame_ctx.step(pad.as_ref(), CANVAS);

        if frame % 30 == 0 {
            let s = frame_ctx.player.state;
            info!(frame, x = s.x, y = s.y, airborne = s.airborne, ?control, "tick");
        }
        if frame_ctx.frame >= FRAMES {
            handle.stop();
        }
    });

    let s = frame_ctx.player.state;
    info!(frames, x = s.x, y = s.y, health = frame_ctx.player.health, "done");
    Ok(())
}
