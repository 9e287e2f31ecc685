//! Level grid parsing and loading
//!
//! A level is a fixed 23×17 text grid. Cell codes:
//! - `' '` empty
//! - `'X'` solid wall
//! - `'I'` breakable wall
//! - `'1'` player tank spawn
//!
//! Malformed grids are tolerated: every problem is recorded as a
//! [`LevelIssue`], logged, and the cells that are present still load.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{ActorId, Spawn};
use super::world::World;
use crate::consts::{LEVEL_HEIGHT, LEVEL_WIDTH};

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    BreakableWall,
    PlayerSpawn,
}

impl Cell {
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            ' ' => Some(Cell::Empty),
            'X' => Some(Cell::Wall),
            'I' => Some(Cell::BreakableWall),
            '1' => Some(Cell::PlayerSpawn),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Wall => 'X',
            Cell::BreakableWall => 'I',
            Cell::PlayerSpawn => '1',
        }
    }
}

/// A non-fatal problem found while parsing a level
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LevelIssue {
    #[error("level has {found} rows, expected {expected}")]
    RowCount { found: usize, expected: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("unknown cell code {code:?} at ({x}, {y})")]
    UnknownCode { code: char, x: usize, y: usize },
}

/// Parsed level grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Rows top to bottom; a row may be shorter or longer than the nominal
    /// width if the source was malformed
    rows: Vec<Vec<Cell>>,
}

impl Level {
    /// Parse a level, collecting and logging every problem found.
    ///
    /// Unknown codes load as [`Cell::Empty`].
    pub fn parse(text: &str) -> (Self, Vec<LevelIssue>) {
        let mut issues = Vec::new();
        let mut rows = Vec::new();

        for (y, line) in text.lines().enumerate() {
            let width = line.chars().count();
            if width != LEVEL_WIDTH {
                issues.push(LevelIssue::RowWidth {
                    row: y,
                    found: width,
                    expected: LEVEL_WIDTH,
                });
            }
            let row: Vec<Cell> = line
                .chars()
                .enumerate()
                .map(|(x, code)| {
                    Cell::from_code(code).unwrap_or_else(|| {
                        issues.push(LevelIssue::UnknownCode { code, x, y });
                        Cell::Empty
                    })
                })
                .collect();
            rows.push(row);
        }

        if rows.len() != LEVEL_HEIGHT {
            issues.push(LevelIssue::RowCount {
                found: rows.len(),
                expected: LEVEL_HEIGHT,
            });
        }

        for issue in &issues {
            log::warn!("level: {issue}");
        }
        (Self { rows }, issues)
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Non-empty cells in reading order
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| **cell != Cell::Empty)
                .map(move |(x, cell)| (x, y, *cell))
        })
    }

    /// Spawn requests for every occupied cell, in reading order
    pub fn spawns(&self) -> Vec<Spawn> {
        self.occupied()
            .filter_map(|(x, y, cell)| {
                let position = grid_to_world(x, y);
                match cell {
                    Cell::Empty => None,
                    Cell::Wall => Some(Spawn::Wall {
                        position,
                        breakable: false,
                    }),
                    Cell::BreakableWall => Some(Spawn::Wall {
                        position,
                        breakable: true,
                    }),
                    Cell::PlayerSpawn => Some(Spawn::Tank {
                        position,
                        heading: 0.0,
                    }),
                }
            })
            .collect()
    }
}

/// World position of a grid cell center
pub fn grid_to_world(x: usize, y: usize) -> Vec2 {
    Vec2::new(
        x as f32 - LEVEL_WIDTH as f32 / 2.0,
        y as f32 - LEVEL_HEIGHT as f32 / 2.0,
    )
}

impl World {
    /// Replace the current contents with `level`.
    ///
    /// Returns the player tanks in reading order.
    pub fn load_level(&mut self, level: &Level) -> Vec<ActorId> {
        self.clear();
        let mut tanks = Vec::new();
        let mut walls = 0usize;
        for spawn in level.spawns() {
            let is_tank = matches!(spawn, Spawn::Tank { .. });
            let id = self.spawn(spawn);
            if is_tank {
                tanks.push(id);
            } else {
                walls += 1;
            }
        }
        log::info!("level loaded: {walls} walls, {} tanks", tanks.len());
        tanks
    }
}
