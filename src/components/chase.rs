use std::collections::VecDeque;

use bevy_ecs::prelude::Component;

use crate::pathfinding::Cell;

/// Enemy route-following state.
///
/// Every `repath_interval` seconds the chase system runs A* toward the
/// player's cell and stores the result in `route`; between searches the
/// enemy steers toward the front of that route, popping cells as they are
/// reached.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Chase {
    pub speed: f32,
    pub repath_interval: f32,
    pub repath_timer: f32,
    pub route: VecDeque<Cell>,
}

impl Chase {
    pub fn new(speed: f32, repath_interval: f32) -> Self {
        Self {
            speed,
            repath_interval,
            // search on the first frame
            repath_timer: 0.0,
            route: VecDeque::new(),
        }
    }
}
