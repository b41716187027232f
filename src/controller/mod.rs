// CONTROLLER: Input, physics, and update loop
pub mod input;
pub mod physics;
pub mod frame_loop;

pub use input::{Action, GamepadSnapshot, InputAggregator, InputEvent, Key};
pub use physics::PhysicsSystem;
pub use frame_loop::{FrameDriver, FrameLoopContext, LoopHandle};
