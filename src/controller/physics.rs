use tracing::debug;

use crate::config::PlayerConfig;
use crate::model::{CanvasSize, ControlState, KinematicState};

/// Handles player physics (walking, jumping, gravity, edge clamps)
#[derive(Debug, Clone)]
pub struct PhysicsSystem {
    pub config: PlayerConfig,
}

impl PhysicsSystem {
    pub fn new(config: PlayerConfig) -> Self {
        Self { config }
    }

    /// Advance the player one frame.
    ///
    /// Order is fixed: walk, start jump, gravity, integrate, floor clamp,
    /// horizontal clamp. Gravity applies even at rest; the floor clamp is
    /// what settles the player again every frame.
    pub fn advance(&self, control: ControlState, state: KinematicState, canvas: CanvasSize) -> KinematicState {
        let cfg = &self.config;
        let mut next = state;

        // Both directions held cancels out
        next.x += f64::from(control.horizontal()) * cfg.speed;

        if control.jump && !next.airborne {
            next.airborne = true;
            next.velocity_y = -cfg.jump_impulse;
            debug!(x = next.x, y = next.y, "jump");
        }

        next.velocity_y += cfg.gravity;
        next.y += next.velocity_y;

        let floor = canvas.floor_for(cfg.height);
        if next.y > floor {
            if next.airborne {
                debug!(x = next.x, "landed");
            }
            next.y = floor;
            next.airborne = false;
            next.velocity_y = 0.0;
        }

        // Left edge first, then right: a canvas narrower than the player pins it to the right bound
        if next.x < 0.0 {
            next.x = 0.0;
        }
        let right = canvas.right_edge_for(cfg.width);
        if next.x > right {
            next.x = right;
        }

        next
    }
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: CanvasSize = CanvasSize::new(800.0, 600.0);
    const FLOOR: f64 = 550.0;

    fn grounded(x: f64) -> KinematicState {
        KinematicState { x, y: FLOOR, velocity_y: 0.0, airborne: false }
    }

    fn jump() -> ControlState {
        ControlState::new(false, false, true)
    }

    #[test]
    fn walking_moves_by_speed() {
        let physics = PhysicsSystem::default();
        let left = physics.advance(ControlState::new(true, false, false), grounded(100.0), CANVAS);
        assert_eq!(left.x, 95.0);
        let right = physics.advance(ControlState::new(false, true, false), grounded(100.0), CANVAS);
        assert_eq!(right.x, 105.0);
        let both = physics.advance(ControlState::new(true, true, false), grounded(100.0), CANVAS);
        assert_eq!(both.x, 100.0, "opposite directions cancel");
    }

    #[test]
    fn horizontal_clamp_to_right_edge() {
        let physics = PhysicsSystem::default();
        let next = physics.advance(ControlState::new(false, true, false), grounded(790.0), CANVAS);
        assert_eq!(next.x, 750.0);
    }

    #[test]
    fn horizontal_clamp_to_left_edge() {
        let physics = PhysicsSystem::default();
        let next = physics.advance(ControlState::new(true, false, false), grounded(3.0), CANVAS);
        assert_eq!(next.x, 0.0);
    }

    #[test]
    fn horizontal_clamp_leaves_in_range_untouched() {
        let physics = PhysicsSystem::default();
        for x in [0.0, 1.5, 375.0, 749.0, 750.0] {
            let next = physics.advance(ControlState::default(), grounded(x), CANVAS);
            assert_eq!(next.x, x, "x = {x}");
        }
    }

    #[test]
    fn narrow_canvas_pins_to_right_bound() {
        let physics = PhysicsSystem::default();
        let narrow = CanvasSize::new(30.0, 600.0);
        let next = physics.advance(ControlState::default(), grounded(0.0), narrow);
        assert_eq!(next.x, -20.0);
    }

    #[test]
    fn floor_clamp_is_idempotent() {
        let physics = PhysicsSystem::default();
        let mut state = grounded(200.0);
        for frame in 0..500 {
            state = physics.advance(ControlState::default(), state, CANVAS);
            assert_eq!(state, grounded(200.0), "drifted on frame {frame}");
        }
    }

    #[test]
    fn jump_applies_impulse_once() {
        let physics = PhysicsSystem::default();
        let first = physics.advance(jump(), grounded(100.0), CANVAS);
        assert!(first.airborne);
        assert_eq!(first.velocity_y, -14.0);

        let second = physics.advance(jump(), first, CANVAS);
        assert!(second.airborne);
        assert_eq!(second.velocity_y, -13.0, "no second impulse while airborne");
    }

    #[test]
    fn jump_guard_is_airborne_not_position() {
        let physics = PhysicsSystem::default();
        // Mid-air but not marked airborne: the jump still fires
        let floating = KinematicState { x: 100.0, y: 300.0, velocity_y: 4.0, airborne: false };
        let next = physics.advance(jump(), floating, CANVAS);
        assert_eq!(next.velocity_y, -14.0);
        assert_eq!(next.y, 286.0);
    }

    #[test]
    fn full_jump_arc() {
        let physics = PhysicsSystem::default();
        let start = grounded(100.0);

        let f1 = physics.advance(jump(), start, CANVAS);
        assert_eq!(f1.velocity_y, -14.0);
        assert_eq!(f1.y, FLOOR - 14.0);

        let f2 = physics.advance(ControlState::default(), f1, CANVAS);
        assert_eq!(f2.velocity_y, -13.0);
        assert_eq!(f2.y, FLOOR - 27.0);

        let mut state = f2;
        let mut frames = 2;
        while state.airborne {
            state = physics.advance(ControlState::default(), state, CANVAS);
            frames += 1;
            assert!(state.y <= FLOOR, "never below the floor");
            assert!(frames < 100, "should land");
        }

        assert_eq!(state.y, FLOOR);
        assert_eq!(state.velocity_y, 0.0);
        // Velocities -14..=14 sum to zero: back on the floor line but still airborne,
        // the next frame (velocity 15) overshoots and clamps
        assert_eq!(frames, 30);
    }

    #[test]
    fn airborne_clears_exactly_on_floor_clamp() {
        let physics = PhysicsSystem::default();
        let falling = KinematicState { x: 10.0, y: FLOOR - 5.0, velocity_y: 3.0, airborne: true };
        let next = physics.advance(ControlState::default(), falling, CANVAS);
        assert_eq!(next.y, FLOOR - 1.0);
        assert!(next.airborne, "not yet past the floor");

        let landed = physics.advance(ControlState::default(), next, CANVAS);
        assert_eq!(landed.y, FLOOR);
        assert!(!landed.airborne);
        assert_eq!(landed.velocity_y, 0.0);
    }
}
