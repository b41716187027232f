/// Platform-agnostic input handling: keyboard, touch buttons, swipes and gamepad
/// all feed one aggregator that yields a single `ControlState` per frame.
use glam::DVec2;
use tracing::info;

use crate::model::ControlState;

/// Analog stick deflection that counts as a direction. Strict: exactly 0.5 does not.
pub const GAMEPAD_AXIS_THRESHOLD: f64 = 0.5;

/// Logical control a key, button or gesture maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Jump,
}

/// Physical keys the game reacts to, named after `KeyboardEvent.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    KeyA,
    KeyD,
    KeyW,
}

impl Key {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "Space" => Some(Key::Space),
            "KeyA" => Some(Key::KeyA),
            "KeyD" => Some(Key::KeyD),
            "KeyW" => Some(Key::KeyW),
            _ => None,
        }
    }

    pub fn action(self) -> Action {
        match self {
            Key::ArrowLeft | Key::KeyA => Action::Left,
            Key::ArrowRight | Key::KeyD => Action::Right,
            Key::Space | Key::KeyW => Action::Jump,
        }
    }

    /// Arrow keys and Space live in the slot that touch, swipe and gamepad also write.
    pub fn is_shared(self) -> bool {
        matches!(self, Key::ArrowLeft | Key::ArrowRight | Key::Space)
    }
}

/// Platform independent input events
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    // Keyboard, by physical key code
    KeyDown(String),
    KeyUp(String),

    // On-screen buttons
    TouchButton { action: Action, pressed: bool },

    // Swipe gestures on the canvas
    SwipeStart(DVec2),
    SwipeMove(DVec2),
    SwipeEnd,

    // Gamepad lifecycle
    GamepadConnected { index: u32, id: String },
    GamepadDisconnected,
}

/// One frame's view of a connected gamepad.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamepadSnapshot {
    pub axes: Vec<f64>,
    /// Pressed flag per button, in the standard mapping order
    pub buttons: Vec<bool>,
}

impl GamepadSnapshot {
    pub fn new(axes: Vec<f64>, buttons: Vec<bool>) -> Self {
        Self { axes, buttons }
    }

    /// Left stick, horizontal.
    pub fn horizontal_axis(&self) -> Option<f64> {
        self.axes.first().copied()
    }

    /// Button 0 (A / Cross).
    pub fn primary_pressed(&self) -> bool {
        self.buttons.first().copied().unwrap_or(false)
    }

    /// What this pad asserts on its own. A missing axis asserts no direction.
    pub fn control(&self) -> ControlState {
        let axis = self.horizontal_axis();
        ControlState {
            move_left: axis.is_some_and(|a| a < -GAMEPAD_AXIS_THRESHOLD),
            move_right: axis.is_some_and(|a| a > GAMEPAD_AXIS_THRESHOLD),
            jump: self.primary_pressed(),
        }
    }
}

/// Merges every input source into the per-frame control state.
///
/// Two latched tables are kept:
/// - `shared` is written by the arrow keys and Space, the touch buttons,
///   swipe gestures and the gamepad. Any of them can clear what another set.
/// - `letters` is written only by A, D and W.
///
/// [`InputAggregator::resolve`] lets a connected gamepad overwrite `shared`
/// outright, then ORs `letters` on top. So the gamepad has the last word over
/// arrows/touch/swipe while the letter keys still get through.
#[derive(Debug, Default)]
pub struct InputAggregator {
    shared: ControlState,
    letters: ControlState,
    swipe_origin: DVec2,
    gamepad: Option<u32>,
}

impl InputAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process an input event and update the latched tables
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(code) => self.set_key(code, true),
            InputEvent::KeyUp(code) => self.set_key(code, false),
            InputEvent::TouchButton { action, pressed } => {
                set_action(&mut self.shared, *action, *pressed);
            }
            InputEvent::SwipeStart(point) => {
                self.swipe_origin = *point;
            }
            InputEvent::SwipeMove(point) => self.swipe_to(*point),
            InputEvent::SwipeEnd => {
                self.shared.clear();
            }
            InputEvent::GamepadConnected { index, id } => {
                info!(index, id = %id, "gamepad connected");
                self.gamepad = Some(*index);
            }
            InputEvent::GamepadDisconnected => {
                info!("gamepad disconnected");
                self.gamepad = None;
            }
        }
    }

    fn set_key(&mut self, code: &str, pressed: bool) {
        let Some(key) = Key::from_code(code) else {
            return;
        };
        let table = if key.is_shared() { &mut self.shared } else { &mut self.letters };
        set_action(table, key.action(), pressed);
    }

    /// Compare the current touch against the gesture origin. Horizontal wins
    /// only when strictly larger; an upward vertical swipe asserts jump but
    /// nothing here ever clears it.
    fn swipe_to(&mut self, point: DVec2) {
        let delta = point - self.swipe_origin;
        if delta.x.abs() > delta.y.abs() {
            let rightward = delta.x > 0.0;
            self.shared.move_right = rightward;
            self.shared.move_left = !rightward;
        } else if delta.y < 0.0 {
            self.shared.jump = true;
        }
    }

    /// Index of the pad the host should poll each frame, if any.
    pub fn connected_gamepad(&self) -> Option<u32> {
        self.gamepad
    }

    /// Resolve this frame's control state.
    ///
    /// `gamepad` is the fresh snapshot of the connected pad; `None` when no pad
    /// is connected or the host could not read it. A pad's contribution is
    /// latched into the shared table, as if it had been written by an event.
    pub fn resolve(&mut self, gamepad: Option<&GamepadSnapshot>) -> ControlState {
        if let Some(pad) = gamepad {
            self.shared = pad.control();
        }
        self.shared.merge(self.letters)
    }
}

fn set_action(table: &mut ControlState, action: Action, pressed: bool) {
    match action {
        Action::Left => table.move_left = pressed,
        Action::Right => table.move_right = pressed,
        Action::Jump => table.jump = pressed,
    }
}

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use super::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Gamepad, GamepadButton, KeyboardEvent, Navigator, TouchEvent};

    pub fn keyboard_event_to_input(e: &KeyboardEvent, is_down: bool) -> InputEvent {
        let code = e.code();
        if is_down {
            InputEvent::KeyDown(code)
        } else {
            InputEvent::KeyUp(code)
        }
    }

    /// Client coordinates of the first active touch.
    pub fn first_touch(e: &TouchEvent) -> Option<DVec2> {
        let touch = e.touches().get(0)?;
        Some(DVec2::new(f64::from(touch.client_x()), f64::from(touch.client_y())))
    }

    pub fn gamepad_snapshot(pad: &Gamepad) -> GamepadSnapshot {
        let axes = pad.axes().iter().map(|v| v.as_f64().unwrap_or(0.0)).collect();
        let buttons = pad
            .buttons()
            .iter()
            .map(|b| b.dyn_into::<GamepadButton>().map(|b| b.pressed()).unwrap_or(false))
            .collect();
        GamepadSnapshot::new(axes, buttons)
    }

    /// Read the pad at `index` fresh from the navigator.
    pub fn poll_gamepad(navigator: &Navigator, index: u32) -> Option<GamepadSnapshot> {
        let pads: js_sys::Array = navigator.get_gamepads().ok()?;
        let pad = pads.get(index).dyn_into::<Gamepad>().ok()?;
        Some(gamepad_snapshot(&pad))
    }
}
