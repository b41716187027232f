// Re-export all public modules so they can be used from main.rs
pub mod config;
pub mod error;
pub mod logging;
pub mod ui;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

pub use config::{GameConfig, PlayerConfig};
pub use error::GameError;

#[cfg(target_arch = "wasm32")]
pub use self::web::{start, stop};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tracing::{error, info};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::convert::FromWasmAbi;
    use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
    use web_sys::{
        Document, EventTarget, GamepadEvent, HtmlCanvasElement, HtmlElement, KeyboardEvent, TouchEvent, Window,
    };

    use crate::config::{ElementIds, GameConfig};
    use crate::controller::input::wasm as device;
    use crate::controller::{Action, FrameDriver, FrameLoopContext, InputAggregator, InputEvent, LoopHandle, PhysicsSystem};
    use crate::error::GameError;
    use crate::logging;
    use crate::model::Player;
    use crate::ui::{self, LocalStorageFlagStore, Tutorial};
    use crate::view::CanvasRenderer;

    thread_local! {
        static RUNNING: RefCell<Option<LoopHandle>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        logging::init();
        setup_app().map_err(|e| {
            error!(error = %e, "startup failed");
            e.into()
        })
    }

    /// Stop the frame loop. The last drawn frame stays on the canvas.
    #[wasm_bindgen]
    pub fn stop() {
        RUNNING.with(|running| {
            if let Some(handle) = running.borrow_mut().take() {
                handle.stop();
            }
        });
    }

    /// Main application setup for WASM
    fn setup_app() -> Result<(), GameError> {
        let window = web_sys::window().ok_or(GameError::NoWindow)?;
        let document = window.document().ok_or(GameError::NoDocument)?;

        let canvas: HtmlCanvasElement = element_by_id(&document, &GameConfig::default().elements.canvas, "canvas")?;
        let config = GameConfig::from_optional_json(canvas.get_attribute("data-config").as_deref())?;
        // A config may point at a different canvas
        let canvas: HtmlCanvasElement = element_by_id(&document, &config.elements.canvas, "canvas")?;
        let health_el: HtmlElement = element_by_id(&document, &config.elements.health, "element")?;

        let renderer = CanvasRenderer::new(canvas.clone(), health_el)?;
        let size = renderer.fit_to_window(&window);
        info!(width = size.width, height = size.height, "canvas ready");

        let input = Rc::new(RefCell::new(InputAggregator::new()));
        setup_input_listeners(&window, &document, &canvas, &config.elements, input.clone())?;

        let tutorial = Tutorial::new(config.visited_key.clone(), config.tutorial_hide_ms);
        // The visit is only recorded once the overlay is actually on screen
        tutorial.show_on_first_visit(&mut LocalStorageFlagStore::new(&window), || {
            let overlay: HtmlElement = element_by_id(&document, &config.elements.tutorial, "element")?;
            ui::show_overlay(&window, &overlay, tutorial.hide_after_ms)
        })?;

        let player = Player::spawn(&config.player, config.spawn_x, size);
        let mut frame_ctx = FrameLoopContext::new(input, PhysicsSystem::new(config.player), player, renderer);

        // Continuous redraw using requestAnimationFrame. The canvas keeps its startup size.
        let navigator = window.navigator();
        let handle = FrameDriver::new().run_on_animation_frames(window, move || {
            let gamepad = frame_ctx
                .input
                .borrow()
                .connected_gamepad()
                .and_then(|index| device::poll_gamepad(&navigator, index));
            frame_ctx.step(gamepad.as_ref(), size);
        })?;

        RUNNING.with(|running| *running.borrow_mut() = Some(handle));
        Ok(())
    }

    /// Register `f` for `event` on `target` for the lifetime of the page.
    fn listen<E>(target: &EventTarget, event: &str, f: impl FnMut(E) + 'static) -> Result<(), GameError>
    where
        E: FromWasmAbi + 'static,
    {
        let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(E)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Every device writes into the aggregator; nothing here touches the player.
    fn setup_input_listeners(
        window: &Window,
        document: &Document,
        canvas: &HtmlCanvasElement,
        ids: &ElementIds,
        input: Rc<RefCell<InputAggregator>>,
    ) -> Result<(), GameError> {
        // Keyboard
        {
            let input = input.clone();
            listen(document, "keydown", move |e: KeyboardEvent| {
                input.borrow_mut().process_event(&device::keyboard_event_to_input(&e, true));
            })?;
        }
        {
            let input = input.clone();
            listen(document, "keyup", move |e: KeyboardEvent| {
                input.borrow_mut().process_event(&device::keyboard_event_to_input(&e, false));
            })?;
        }

        // On-screen buttons
        for (id, action) in [
            (&ids.left_button, Action::Left),
            (&ids.right_button, Action::Right),
            (&ids.jump_button, Action::Jump),
        ] {
            let button: HtmlElement = element_by_id(document, id, "element")?;
            for (event, pressed) in [("touchstart", true), ("touchend", false)] {
                let input = input.clone();
                listen(&button, event, move |_e: TouchEvent| {
                    input.borrow_mut().process_event(&InputEvent::TouchButton { action, pressed });
                })?;
            }
        }

        // Swipes on the canvas
        {
            let input = input.clone();
            listen(canvas, "touchstart", move |e: TouchEvent| {
                if let Some(point) = device::first_touch(&e) {
                    input.borrow_mut().process_event(&InputEvent::SwipeStart(point));
                }
            })?;
        }
        {
            let input = input.clone();
            listen(canvas, "touchmove", move |e: TouchEvent| {
                if let Some(point) = device::first_touch(&e) {
                    input.borrow_mut().process_event(&InputEvent::SwipeMove(point));
                }
            })?;
        }
        {
            let input = input.clone();
            listen(canvas, "touchend", move |_e: TouchEvent| {
                input.borrow_mut().process_event(&InputEvent::SwipeEnd);
            })?;
        }

        // Gamepad lifecycle; the pad itself is polled every frame
        {
            let input = input.clone();
            listen(window, "gamepadconnected", move |e: GamepadEvent| {
                if let Some(pad) = e.gamepad() {
                    input
                        .borrow_mut()
                        .process_event(&InputEvent::GamepadConnected { index: pad.index(), id: pad.id() });
                }
            })?;
        }
        listen(window, "gamepaddisconnected", move |_e: GamepadEvent| {
            input.borrow_mut().process_event(&InputEvent::GamepadDisconnected);
        })?;

        Ok(())
    }

    fn element_by_id<T: JsCast>(document: &Document, id: &str, expected: &'static str) -> Result<T, GameError> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| GameError::MissingElement(id.to_string()))?
            .dyn_into::<T>()
            .map_err(|_| GameError::WrongElementType { id: id.to_string(), expected })
    }
}
