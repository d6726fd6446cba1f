//! Smooth Snake - a terminal Snake game with interpolated movement
//!
//! This library provides:
//! - Core game logic: fixed-step grid loop, collisions, food, speed ramp (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering with sub-cell interpolation (render module)
//! - Session counters (metrics module)
//! - The interactive frame loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
