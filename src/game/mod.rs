//! Core game logic module for Snake
//!
//! Everything here is free of I/O and rendering. The terminal front end in
//! `modes` drives it one frame at a time through
//! [`GameEngine::advance_progress`].

pub mod config;
pub mod direction;
pub mod engine;
pub mod fruit;
pub mod speed;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{AdvanceResult, GameEngine, StepInfo, StepResult};
pub use fruit::FruitKind;
pub use speed::SpeedRamp;
pub use state::{CollisionType, GameState, Position, SegmentMotion, Snake, StepOutcome};
