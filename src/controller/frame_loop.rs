use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{info, trace};

use crate::controller::input::{GamepadSnapshot, InputAggregator};
use crate::controller::physics::PhysicsSystem;
use crate::model::{CanvasSize, ControlState, Player};
use crate::view::FrameRenderer;

/// Main game loop state and per-frame update
pub struct FrameLoopContext<R: FrameRenderer> {
    /// Shared with the event listeners, which write into it between frames
    pub input: Rc<RefCell<InputAggregator>>,
    pub physics: PhysicsSystem,
    pub player: Player,
    pub renderer: R,
    pub frame: u64,
}

impl<R: FrameRenderer> FrameLoopContext<R> {
    pub fn new(input: Rc<RefCell<InputAggregator>>, physics: PhysicsSystem, player: Player, renderer: R) -> Self {
        Self { input, physics, player, renderer, frame: 0 }
    }

    /// One frame: resolve input, advance physics, then render.
    ///
    /// Each stage finishes before the next reads its result. Events that
    /// arrive during the frame are seen by the next call.
    pub fn step(&mut self, gamepad: Option<&GamepadSnapshot>, canvas: CanvasSize) -> ControlState {
        let control = self.input.borrow_mut().resolve(gamepad);
        self.player.state = self.physics.advance(control, self.player.state, canvas);

        self.renderer.show_health(self.player.health);
        self.renderer.draw(&self.player, canvas);

        trace!(
            frame = self.frame,
            x = self.player.state.x,
            y = self.player.state.y,
            vy = self.player.state.velocity_y,
            airborne = self.player.state.airborne,
            grounded = self.player.state.is_grounded(&self.physics.config, canvas),
            idle = control.is_idle(),
            "frame"
        );
        self.frame += 1;
        control
    }
}

/// Stop switch for a running frame loop. Clones share the same switch.
#[derive(Debug, Clone)]
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
}

impl LoopHandle {
    fn new() -> Self {
        Self { running: Rc::new(Cell::new(true)) }
    }

    /// No frame starts after this returns, and the loop stops rescheduling itself.
    pub fn stop(&self) {
        if self.running.replace(false) {
            info!("frame loop stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

/// Runs a frame callback once per host refresh until stopped.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    handle: LoopHandle,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self { handle: LoopHandle::new() }
    }

    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    /// Back-to-back frames on the current thread, for hosts without a refresh
    /// signal. Returns how many frames ran.
    pub fn run_blocking(&self, mut tick: impl FnMut(&LoopHandle)) -> u64 {
        let mut frames = 0;
        while self.handle.is_running() {
            tick(&self.handle);
            frames += 1;
        }
        frames
    }

    /// Schedule `tick` on every `requestAnimationFrame` until the handle is stopped.
    #[cfg(target_arch = "wasm32")]
    pub fn run_on_animation_frames(
        self,
        window: web_sys::Window,
        tick: impl FnMut() + 'static,
    ) -> Result<LoopHandle, crate::error::GameError> {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;

        let handle = self.handle.clone();
        let inner: Rc<RefCell<Box<dyn FnMut()>>> = Rc::new(RefCell::new(Box::new(tick)));

        let callback = Rc::new(RefCell::new(None::<Closure<dyn FnMut()>>));
        let callback_clone = callback.clone();
        let window_for_loop = window.clone();
        let loop_handle = handle.clone();

        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if !loop_handle.is_running() {
                return;
            }
            inner.borrow_mut().as_mut()();

            // Recursively schedule next frame
            if !loop_handle.is_running() {
                return;
            }
            let cb_ref = callback_clone.borrow();
            if let Some(cb) = cb_ref.as_ref() {
                if let Err(e) = window_for_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    tracing::error!(error = ?e, "requestAnimationFrame failed");
                    loop_handle.stop();
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(cb) = callback.borrow().as_ref() {
            window.request_animation_frame(cb.as_ref().unchecked_ref())?;
        }

        // The closure owns its own Rc, so it lives as long as the page
        std::mem::forget(callback);
        Ok(handle)
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}
