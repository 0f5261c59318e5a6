//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: timing, configuration, map grids,
//! and toggles. Each submodule documents the semantics and intended usage of
//! its resource(s).
//!
//! Overview
//! - `debugmode` – presence toggles the debug overlay
//! - `gameconfig` – INI-backed physics, visibility and window settings
//! - `gridmap` – per-map occupancy grids and the current map id
//! - `worldtime` – simulation time and delta
pub mod debugmode;
pub mod gameconfig;
pub mod gridmap;
pub mod worldtime;
