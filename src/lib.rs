//! bombsite simulation core.
//!
//! This module exposes the ECS components, resources, systems, and events of
//! the top-down shooter's physics, visibility and pathfinding core for use in
//! integration tests and as a reusable library.

pub mod components;
pub mod events;
pub mod game;
pub mod geometry;
pub mod pathfinding;
pub mod physics;
pub mod resources;
pub mod systems;
