use tracing::trace;

use crate::model::{CanvasSize, Player};

/// Where a finished frame goes. Called once per frame, after physics.
pub trait FrameRenderer {
    /// Mirror the player's health into the HUD text.
    fn show_health(&mut self, health: u32);

    /// Clear the surface and draw the player rectangle.
    fn draw(&mut self, player: &Player, canvas: CanvasSize);
}

/// Headless renderer: reports each frame through `tracing` and remembers the last one.
#[derive(Debug, Default)]
pub struct TraceRenderer {
    pub frames: u64,
    pub last_rect: Option<(f64, f64, f64, f64)>,
    pub health: Option<u32>,
}

impl TraceRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameRenderer for TraceRenderer {
    fn show_health(&mut self, health: u32) {
        self.health = Some(health);
    }

    fn draw(&mut self, player: &Player, canvas: CanvasSize) {
        let (x, y, w, h) = player.rect();
        trace!(frame = self.frames, x, y, w, h, canvas_w = canvas.width, canvas_h = canvas.height, "draw");
        self.last_rect = Some((x, y, w, h));
        self.frames += 1;
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::canvas::CanvasRenderer;

#[cfg(target_arch = "wasm32")]
mod canvas {
    use super::*;
    use wasm_bindgen::JsCast;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, Window};

    use crate::error::GameError;

    /// Draws onto a 2D canvas and writes health into a text element.
    pub struct CanvasRenderer {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        health_el: HtmlElement,
    }

    impl CanvasRenderer {
        pub fn new(canvas: HtmlCanvasElement, health_el: HtmlElement) -> Result<Self, GameError> {
            let ctx = canvas
                .get_context("2d")?
                .ok_or(GameError::NoContext2d)?
                .dyn_into::<CanvasRenderingContext2d>()
                .map_err(|_| GameError::NoContext2d)?;
            Ok(Self { canvas, ctx, health_el })
        }

        /// Match the canvas backing size to the window's inner size.
        pub fn fit_to_window(&self, window: &Window) -> CanvasSize {
            if let (Ok(w), Ok(h)) = (window.inner_width(), window.inner_height()) {
                let nw = w.as_f64().unwrap_or(800.0) as u32;
                let nh = h.as_f64().unwrap_or(600.0) as u32;
                if nw != self.canvas.width() || nh != self.canvas.height() {
                    self.canvas.set_width(nw);
                    self.canvas.set_height(nh);
                }
            }
            self.size()
        }

        pub fn size(&self) -> CanvasSize {
            CanvasSize::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()))
        }
    }

    impl FrameRenderer for CanvasRenderer {
        fn show_health(&mut self, health: u32) {
            self.health_el.set_text_content(Some(&health.to_string()));
        }

        fn draw(&mut self, player: &Player, canvas: CanvasSize) {
            let (x, y, w, h) = player.rect();
            self.ctx.clear_rect(0.0, 0.0, canvas.width, canvas.height);
            self.ctx.set_fill_style_str(&player.color);
            self.ctx.fill_rect(x, y, w, h);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConfig;

    #[test]
    fn trace_renderer_remembers_last_frame() {
        let canvas = CanvasSize::new(800.0, 600.0);
        let player = Player::spawn(&PlayerConfig::default(), 50.0, canvas);
        let mut renderer = TraceRenderer::new();

        renderer.show_health(player.health);
        renderer.draw(&player, canvas);

        assert_eq!(renderer.frames, 1);
        assert_eq!(renderer.health, Some(100));
        assert_eq!(renderer.last_rect, Some((50.0, 550.0, 50.0, 50.0)));
    }
}
