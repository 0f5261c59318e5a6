//! Occupancy grids used by the AI pathfinder.
//!
//! Each playable map (ids 1..=3) owns a fixed 50×50 grid of cells, 100 world
//! units per cell, where `1` marks a blocked cell. Grids are loaded once and
//! are read-only while the game runs.
//!
//! # JSON format
//!
//! ```json
//! { "maps": { "1": [[0, 0, 1, ...], ...], "2": [...], "3": [...] } }
//! ```
//!
//! Rows are indexed by world `y / 100`, columns by world `x / 100`.
//!
//! # Related
//!
//! - [`crate::pathfinding`] – BFS and A* searches over an [`OccupancyGrid`]
//! - [`crate::systems::chase`] – steers enemies along A* routes

use std::collections::BTreeMap;
use std::path::Path;

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::pathfinding::{self, Cell, PathNode};

/// Number of rows and columns of every map grid.
pub const GRID_SIZE: usize = 50;
/// World units covered by one grid cell.
pub const CELL_SIZE: f32 = 100.0;

static EMPTY_GRID: OccupancyGrid = OccupancyGrid {
    cells: [[0; GRID_SIZE]; GRID_SIZE],
};

/// Fixed-size blocked-cell grid.
#[derive(Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    cells: [[u8; GRID_SIZE]; GRID_SIZE],
}

impl std::fmt::Debug for OccupancyGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let blocked = self.cells.iter().flatten().filter(|c| **c == 1).count();
        f.debug_struct("OccupancyGrid")
            .field("blocked", &blocked)
            .finish()
    }
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self::empty()
    }
}

impl OccupancyGrid {
    /// Grid with every cell free.
    pub fn empty() -> Self {
        EMPTY_GRID.clone()
    }

    /// Build a grid from JSON-style rows. Every row must have exactly
    /// [`GRID_SIZE`] cells and there must be exactly [`GRID_SIZE`] rows.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, String> {
        if rows.len() != GRID_SIZE {
            return Err(format!(
                "Expected {} grid rows, found {}",
                GRID_SIZE,
                rows.len()
            ));
        }
        let mut grid = Self::empty();
        for (r, row) in rows.iter().enumerate() {
            if row.len() != GRID_SIZE {
                return Err(format!(
                    "Grid row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    GRID_SIZE
                ));
            }
            for (c, value) in row.iter().enumerate() {
                grid.cells[r][c] = *value;
            }
        }
        Ok(grid)
    }

    /// Rows in the JSON layout.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells.iter().map(|row| row.to_vec()).collect()
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0 && cell.col >= 0 && (cell.row as usize) < GRID_SIZE && (cell.col as usize) < GRID_SIZE
    }

    /// Out-of-bounds cells count as blocked.
    #[inline]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        !self.in_bounds(cell) || self.cells[cell.row as usize][cell.col as usize] == 1
    }

    #[inline]
    pub fn is_walkable(&self, cell: Cell) -> bool {
        !self.is_blocked(cell)
    }

    /// Mark or clear a cell. Out-of-bounds cells are ignored.
    pub fn set_blocked(&mut self, cell: Cell, blocked: bool) {
        if self.in_bounds(cell) {
            self.cells[cell.row as usize][cell.col as usize] = u8::from(blocked);
        }
    }

    /// Rasterise a wall rectangle centred at `position` with full size `scale`.
    ///
    /// The centre cell is always marked; the rectangle then grows by
    /// `((scale / 100) - 1) / 2` whole cells on every side, which is how the
    /// level data sizes its walls (odd multiples of a cell).
    pub fn mark_rect(&mut self, position: Vec2, scale: Vec2) {
        let center = Cell::new(
            (position.y / CELL_SIZE) as i32,
            (position.x / CELL_SIZE) as i32,
        );
        self.set_blocked(center, true);

        let reach_x = ((scale.x.abs() / CELL_SIZE) as i32 - 1) / 2;
        let reach_y = ((scale.y.abs() / CELL_SIZE) as i32 - 1) / 2;
        for i in 0..=reach_x.max(0) {
            for j in 0..=reach_y.max(0) {
                self.set_blocked(Cell::new(center.row + j, center.col + i), true);
                self.set_blocked(Cell::new(center.row + j, center.col - i), true);
                self.set_blocked(Cell::new(center.row - j, center.col + i), true);
                self.set_blocked(Cell::new(center.row - j, center.col - i), true);
            }
        }
    }

    /// Cell containing a world position, clamped to the grid.
    pub fn cell_at(&self, position: Vec2) -> Cell {
        let max = GRID_SIZE as i32 - 1;
        Cell::new(
            ((position.y / CELL_SIZE).floor() as i32).clamp(0, max),
            ((position.x / CELL_SIZE).floor() as i32).clamp(0, max),
        )
    }

    /// World position of a cell's centre.
    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        Vec2::new(
            (cell.col as f32 + 0.5) * CELL_SIZE,
            (cell.row as f32 + 0.5) * CELL_SIZE,
        )
    }
}

/// On-disk representation of [`GridMaps`].
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GridFile {
    pub maps: BTreeMap<u8, Vec<Vec<u8>>>,
}

/// All map grids keyed by map id.
#[derive(Resource, Debug, Default, Clone)]
pub struct GridMaps {
    maps: FxHashMap<u8, OccupancyGrid>,
}

impl GridMaps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, map_id: u8, grid: OccupancyGrid) {
        self.maps.insert(map_id, grid);
    }

    pub fn get(&self, map_id: u8) -> Option<&OccupancyGrid> {
        self.maps.get(&map_id)
    }

    pub fn get_mut(&mut self, map_id: u8) -> Option<&mut OccupancyGrid> {
        self.maps.get_mut(&map_id)
    }

    /// Grid for `map_id`, or an all-free grid for ids that were never loaded.
    pub fn grid(&self, map_id: u8) -> &OccupancyGrid {
        match self.maps.get(&map_id) {
            Some(grid) => grid,
            None => {
                warn!("Unknown map id {}, treating every cell as free", map_id);
                &EMPTY_GRID
            }
        }
    }

    /// BFS route on the given map. See [`pathfinding::breadth_first_search`].
    pub fn find_path(&self, start: Cell, goal: Cell, map_id: u8) -> Vec<Cell> {
        pathfinding::breadth_first_search(self.grid(map_id), start, goal)
    }

    /// A* route on the given map. See [`pathfinding::a_star`].
    pub fn a_star(&self, start: Cell, goal: Cell, map_id: u8) -> Vec<PathNode> {
        pathfinding::a_star(self.grid(map_id), start, goal)
    }

    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let file: GridFile =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse grid JSON: {}", e))?;
        let mut maps = Self::new();
        for (id, rows) in file.maps.iter() {
            let grid = OccupancyGrid::from_rows(rows)
                .map_err(|e| format!("Map {}: {}", id, e))?;
            maps.insert(*id, grid);
        }
        Ok(maps)
    }

    pub fn to_json_string(&self) -> Result<String, String> {
        let mut file = GridFile::default();
        for (id, grid) in self.maps.iter() {
            file.maps.insert(*id, grid.to_rows());
        }
        serde_json::to_string(&file).map_err(|e| format!("Failed to serialize grids: {}", e))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read grid file {:?}: {}", path, e))?;
        let maps = Self::from_json_str(&json)?;
        info!("Loaded {} map grid(s) from {:?}", maps.maps.len(), path);
        Ok(maps)
    }
}

/// Id of the map currently being played (1..=3).
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentMap(pub u8);

impl Default for CurrentMap {
    fn default() -> Self {
        CurrentMap(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_cells_are_blocked() {
        let grid = OccupancyGrid::empty();
        assert!(grid.is_blocked(Cell::new(-1, 0)));
        assert!(grid.is_blocked(Cell::new(0, 50)));
        assert!(grid.is_walkable(Cell::new(49, 49)));
    }

    #[test]
    fn mark_rect_single_cell_wall() {
        let mut grid = OccupancyGrid::empty();
        grid.mark_rect(Vec2::new(250.0, 750.0), Vec2::new(100.0, 100.0));
        assert!(grid.is_blocked(Cell::new(7, 2)));
        assert!(grid.is_walkable(Cell::new(7, 3)));
        assert!(grid.is_walkable(Cell::new(6, 2)));
    }

    #[test]
    fn mark_rect_grows_symmetrically() {
        let mut grid = OccupancyGrid::empty();
        // 500 wide, 300 tall: two cells either side horizontally, one vertically
        grid.mark_rect(Vec2::new(1050.0, 1050.0), Vec2::new(500.0, 300.0));
        for col in 8..=12 {
            for row in 9..=11 {
                assert!(grid.is_blocked(Cell::new(row, col)), "({row},{col})");
            }
        }
        assert!(grid.is_walkable(Cell::new(10, 13)));
        assert!(grid.is_walkable(Cell::new(12, 10)));
    }

    #[test]
    fn cell_conversions_round_trip_through_centres() {
        let grid = OccupancyGrid::empty();
        let cell = grid.cell_at(Vec2::new(1234.0, 567.0));
        assert_eq!(cell, Cell::new(5, 12));
        assert_eq!(grid.cell_center(cell), Vec2::new(1250.0, 550.0));
        assert_eq!(grid.cell_at(Vec2::new(-10.0, 9000.0)), Cell::new(49, 0));
    }

    #[test]
    fn from_rows_rejects_wrong_shape() {
        assert!(OccupancyGrid::from_rows(&[vec![0; GRID_SIZE]]).is_err());
        let mut rows = vec![vec![0; GRID_SIZE]; GRID_SIZE];
        rows[3] = vec![0; 10];
        assert!(OccupancyGrid::from_rows(&rows).is_err());
    }

    #[test]
    fn grid_maps_json_round_trip() {
        let mut grid = OccupancyGrid::empty();
        grid.set_blocked(Cell::new(4, 7), true);
        let mut maps = GridMaps::new();
        maps.insert(2, grid.clone());

        let json = maps.to_json_string().unwrap();
        let loaded = GridMaps::from_json_str(&json).unwrap();
        assert_eq!(loaded.get(2), Some(&grid));
        assert!(loaded.get(1).is_none());
    }

    #[test]
    fn unknown_map_id_is_free() {
        let maps = GridMaps::new();
        assert!(maps.grid(9).is_walkable(Cell::new(10, 10)));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = GridMaps::from_json_str("{\"maps\": 3}").unwrap_err();
        assert!(err.starts_with("Failed to parse grid JSON"));
    }
}
