//! Grid pathfinding for enemy navigation.
//!
//! Two searches over an [`OccupancyGrid`]:
//!
//! - [`breadth_first_search`] – 4-directional flood fill, shortest route in
//!   steps. Never squeezes diagonally between two blocked cells.
//! - [`a_star`] – 8-directional search with unit step cost and a Euclidean
//!   heuristic. The open list is a plain `Vec` scanned for the lowest f-score
//!   on every iteration; that is O(n²) in the worst case, which is fine for a
//!   2 500-cell grid.
//!
//! Both return an empty `Vec` when no route exists. Neither keeps state
//! between calls.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::resources::gridmap::{GRID_SIZE, OccupancyGrid};

/// A grid cell. `row` follows world Y, `col` follows world X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    fn index(self) -> usize {
        self.row as usize * GRID_SIZE + self.col as usize
    }

    /// Straight-line distance in cells.
    pub fn distance(self, other: Cell) -> f32 {
        let dr = (self.row - other.row) as f32;
        let dc = (self.col - other.col) as f32;
        (dr * dr + dc * dc).sqrt()
    }
}

/// BFS neighbour order: north, west, south, east.
const DIRECTIONS_4: [(i32, i32); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

fn neighbours_4(cell: Cell) -> ArrayVec<Cell, 4> {
    DIRECTIONS_4
        .iter()
        .map(|(dr, dc)| cell.offset(*dr, *dc))
        .collect()
}

/// Shortest 4-directional route from `start` to `goal`.
///
/// The result starts with the first step after `start` and ends with `goal`;
/// `start` itself is not included, except when `start == goal`, which yields
/// `[start]`. An unreachable or out-of-bounds goal yields an empty `Vec`.
pub fn breadth_first_search(grid: &OccupancyGrid, start: Cell, goal: Cell) -> Vec<Cell> {
    if start == goal {
        return vec![start];
    }
    if !grid.in_bounds(start) || !grid.in_bounds(goal) {
        return Vec::new();
    }

    let mut visited = vec![false; GRID_SIZE * GRID_SIZE];
    let mut came_from: Vec<Option<Cell>> = vec![None; GRID_SIZE * GRID_SIZE];
    let mut queue = VecDeque::new();

    visited[start.index()] = true;
    came_from[start.index()] = Some(start);
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        if cell == goal {
            return walk_back(&came_from, start, goal);
        }

        for next in neighbours_4(cell) {
            if grid.is_walkable(next) && !visited[next.index()] {
                visited[next.index()] = true;
                came_from[next.index()] = Some(cell);
                queue.push_back(next);
            }
        }
    }

    debug!(
        "BFS found no route from {:?} to {:?}",
        start, goal
    );
    Vec::new()
}

fn walk_back(came_from: &[Option<Cell>], start: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = Vec::new();
    let mut cell = goal;
    while cell != start {
        path.push(cell);
        match came_from[cell.index()] {
            Some(previous) => cell = previous,
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

/// One cell of an A* search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathNode {
    pub cell: Cell,
    /// Cost from the start.
    pub g: f32,
    /// Heuristic estimate to the goal.
    pub h: f32,
    /// `g + h`.
    pub f: f32,
    /// Predecessor on the best known route; the start is its own parent.
    pub parent: Option<Cell>,
}

impl PathNode {
    fn unvisited(cell: Cell) -> Self {
        Self {
            cell,
            g: f32::MAX,
            h: f32::MAX,
            f: f32::MAX,
            parent: None,
        }
    }
}

/// 8-directional A* from `start` to `goal`.
///
/// Returns the route ordered from `start` to `goal`, both included. Returns an
/// empty `Vec` if the goal is blocked or out of bounds, equals the start, or
/// cannot be reached.
///
/// Every step costs 1, diagonals included, and the goal is accepted as soon
/// as it is generated as a neighbour. Ties on f-score go to the node that was
/// pushed first.
pub fn a_star(grid: &OccupancyGrid, start: Cell, goal: Cell) -> Vec<PathNode> {
    if grid.is_blocked(goal) {
        debug!("A* goal {:?} is blocked", goal);
        return Vec::new();
    }
    if start == goal || !grid.in_bounds(start) {
        return Vec::new();
    }

    let mut nodes: Vec<PathNode> = (0..GRID_SIZE * GRID_SIZE)
        .map(|i| {
            PathNode::unvisited(Cell::new(
                (i / GRID_SIZE) as i32,
                (i % GRID_SIZE) as i32,
            ))
        })
        .collect();
    let mut closed = vec![false; GRID_SIZE * GRID_SIZE];

    {
        let origin = &mut nodes[start.index()];
        origin.g = 0.0;
        origin.h = 0.0;
        origin.f = 0.0;
        origin.parent = Some(start);
    }

    let mut open: Vec<PathNode> = vec![nodes[start.index()]];

    while !open.is_empty() && open.len() < GRID_SIZE * GRID_SIZE {
        let mut best = 0;
        let mut best_f = f32::MAX;
        for (i, candidate) in open.iter().enumerate() {
            if candidate.f < best_f {
                best_f = candidate.f;
                best = i;
            }
        }
        let node = open.remove(best);
        closed[node.cell.index()] = true;

        for d_row in -1..=1 {
            for d_col in -1..=1 {
                let next = node.cell.offset(d_row, d_col);
                if grid.is_blocked(next) {
                    continue;
                }
                if next == goal {
                    nodes[next.index()].parent = Some(node.cell);
                    return make_path(&nodes, goal);
                }
                if closed[next.index()] {
                    continue;
                }

                let g = node.g + 1.0;
                let h = next.distance(goal);
                let f = g + h;
                let entry = &mut nodes[next.index()];
                if entry.f == f32::MAX || entry.f > f {
                    entry.g = g;
                    entry.h = h;
                    entry.f = f;
                    entry.parent = Some(node.cell);
                    open.push(*entry);
                }
            }
        }
    }

    debug!("A* found no route from {:?} to {:?}", start, goal);
    Vec::new()
}

fn make_path(nodes: &[PathNode], goal: Cell) -> Vec<PathNode> {
    let mut path = Vec::new();
    let mut cell = goal;
    // bounded by the number of cells in case of a corrupt parent chain
    for _ in 0..nodes.len() {
        let node = nodes[cell.index()];
        path.push(node);
        match node.parent {
            Some(parent) if parent != cell => cell = parent,
            Some(_) => {
                path.reverse();
                return path;
            }
            None => return Vec::new(),
        }
    }
    Vec::new()
}
