// MODEL: Game state and data
pub mod control;
pub mod player;

pub use control::ControlState;
pub use player::{CanvasSize, KinematicState, Player};
