//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the game world. Components carry data only; the systems in
//! [`crate::systems`] give them behaviour.
//!
//! Submodules overview:
//! - [`boost`] – temporary speed multiplier from a speed-boost pickup
//! - [`bullet`] – projectile marker with its muzzle speed
//! - [`chase`] – A* route-following state for enemies
//! - [`circlecollider`] – circle collider for avatars and items
//! - [`debugline`] – rectangle emitted by the debug overlay
//! - [`enemy`] – AI avatar state (visibility, activation, guard post)
//! - [`health`] – integer hit points
//! - [`item`] – health and speed pickups with respawn countdown
//! - [`lightsource`] – the player's light polygon mesh
//! - [`motion`] – position, angle, velocity and scale
//! - [`nonconvexcollider`] – thick poly-line walls built from hinge points
//! - [`particlesource`] – short-lived debris bursts
//! - [`physics`] – knockback mass and drag marker
//! - [`player`] – the observer avatar
//! - [`pointcollider`] – point-shaped collider for bullets
//! - [`polygoncollider`] – convex polygon collider for static walls
//! - [`sectorcollider`] – circular sector used by push areas
//! - [`shockwave`] – push-area visual effect
//! - [`wall`] – static wall and destroyable markers

pub mod boost;
pub mod bullet;
pub mod chase;
pub mod circlecollider;
pub mod debugline;
pub mod enemy;
pub mod health;
pub mod item;
pub mod lightsource;
pub mod motion;
pub mod nonconvexcollider;
pub mod particlesource;
pub mod physics;
pub mod player;
pub mod pointcollider;
pub mod polygoncollider;
pub mod sectorcollider;
pub mod shockwave;
pub mod wall;
