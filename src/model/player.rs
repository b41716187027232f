use crate::config::PlayerConfig;

/// Size of the drawing surface in CSS pixels. The origin is top-left, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Lowest y the top edge of a rectangle of `height` may reach.
    pub fn floor_for(&self, height: f64) -> f64 {
        self.height - height
    }

    /// Largest x the left edge of a rectangle of `width` may reach.
    pub fn right_edge_for(&self, width: f64) -> f64 {
        self.width - width
    }
}

/// Position and vertical motion of the player.
///
/// `airborne` is set exactly when a jump starts and cleared exactly when the
/// floor clamp engages. It is the jump guard, not a derived "grounded" test.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KinematicState {
    pub x: f64,
    pub y: f64,
    pub velocity_y: f64,
    pub airborne: bool,
}

impl KinematicState {
    /// A player resting on the floor of `canvas` at `x`.
    pub fn grounded_at(x: f64, config: &PlayerConfig, canvas: CanvasSize) -> Self {
        Self {
            x,
            y: canvas.floor_for(config.height),
            velocity_y: 0.0,
            airborne: false,
        }
    }

    /// True when the top edge sits exactly on the floor clamp value.
    pub fn is_grounded(&self, config: &PlayerConfig, canvas: CanvasSize) -> bool {
        self.y == canvas.floor_for(config.height)
    }
}

/// The single player rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub state: KinematicState,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub health: u32,
}

impl Player {
    pub fn spawn(config: &PlayerConfig, spawn_x: f64, canvas: CanvasSize) -> Self {
        Self {
            state: KinematicState::grounded_at(spawn_x, config, canvas),
            width: config.width,
            height: config.height,
            color: config.color.clone(),
            health: config.health,
        }
    }

    /// Rectangle as (x, y, width, height), ready for a fill call.
    pub fn rect(&self) -> (f64, f64, f64, f64) {
        (self.state.x, self.state.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_rests_on_floor() {
        let config = PlayerConfig::default();
        let canvas = CanvasSize::new(800.0, 600.0);
        let player = Player::spawn(&config, 50.0, canvas);

        assert_eq!(player.state.y, 550.0);
        assert_eq!(player.state.velocity_y, 0.0);
        assert!(!player.state.airborne);
        assert!(player.state.is_grounded(&config, canvas));
        assert_eq!(player.rect(), (50.0, 550.0, 50.0, 50.0));
        assert_eq!(player.health, 100);
        assert_eq!(player.color, "red");
    }

    #[test]
    fn canvas_edges() {
        let canvas = CanvasSize::new(800.0, 600.0);
        assert_eq!(canvas.floor_for(50.0), 550.0);
        assert_eq!(canvas.right_edge_for(50.0), 750.0);
    }
}
