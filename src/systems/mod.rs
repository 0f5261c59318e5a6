//! Simulation systems.
//!
//! This module groups all ECS systems that advance the simulation. The
//! physics-step systems are scheduled in a fixed order by
//! [`PhysicsStep`](crate::physics::PhysicsStep); the rest are run by the
//! frame driver around it.
//!
//! Submodules overview
//! - [`chase`] – steer enemies along A* routes toward the player or their post
//! - [`collision`] – bullets, item pickups, avatar-vs-wall backtracking, push areas
//! - [`debug`] – emit debug overlay lines while debug mode is on
//! - [`items`] – respawn collected items after their delay
//! - [`movement`] – integrate positions from velocities, apply drag
//! - [`particles`] – advance and expire particle bursts
//! - [`time`] – update simulation time and delta
//! - [`timers`] – expire speed boosts and shockwaves
//! - [`visibility`] – light polygon and enemy line of sight

pub mod chase;
pub mod collision;
pub mod debug;
pub mod items;
pub mod movement;
pub mod particles;
pub mod time;
pub mod timers;
pub mod visibility;
