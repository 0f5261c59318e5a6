//! Messages and events raised by the simulation.
//!
//! - [`collision`] – bullet impacts and item pickups that the physics step
//!   leaves for the caller to resolve, as bevy_ecs messages
//! - [`switchdebug`] – observer-driven toggle of the debug overlay
pub mod collision;
pub mod switchdebug;
