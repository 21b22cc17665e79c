//! Static wall mask for one level
//!
//! Cells are 32px squares. Anything outside the mask is wall, so no entity
//! can ever leave the map.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::cell_of;

/// Which end of a sampled ray is tested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayEnd {
    /// Samples strictly between the endpoints
    Exclusive,
    /// Samples between the endpoints plus the far endpoint itself
    Inclusive,
}

/// Immutable wall/open mask, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    walls: Vec<bool>,
}

impl Grid {
    /// Grid with every cell open
    pub fn open(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            walls: vec![false; (width * height) as usize],
        }
    }

    /// Parse an ASCII layout (`#` wall, anything else open).
    ///
    /// Rows or columns the layout doesn't cover are walls.
    pub fn from_layout(width: i32, height: i32, layout: &[&str]) -> Self {
        let mut grid = Self::open(width, height);
        for y in 0..grid.height {
            let row = layout.get(y as usize).map(|r| r.as_bytes());
            for x in 0..grid.width {
                let wall = match row.and_then(|r| r.get(x as usize)) {
                    Some(&b) => b == b'#',
                    None => true,
                };
                let idx = grid.index(x, y);
                grid.walls[idx] = wall;
            }
        }
        grid
    }

    /// Parse a layout whose size is taken from the rows themselves
    pub fn from_rows(layout: &[&str]) -> Self {
        let width = layout.iter().map(|r| r.len()).max().unwrap_or(0) as i32;
        Self::from_layout(width, layout.len() as i32, layout)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// True for wall cells and for every cell outside the grid
    pub fn is_wall(&self, cell_x: i32, cell_y: i32) -> bool {
        if cell_x < 0 || cell_x >= self.width || cell_y < 0 || cell_y >= self.height {
            return true;
        }
        self.walls[self.index(cell_x, cell_y)]
    }

    /// Wall test for the cell containing a pixel point
    pub fn is_wall_at(&self, point: Vec2) -> bool {
        self.is_wall(cell_of(point.x), cell_of(point.y))
    }

    /// True iff every cell overlapped by the box `[x, x+w) x [y, y+h)` is open
    pub fn is_position_safe(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        let x1 = cell_of(x);
        let y1 = cell_of(y);
        let x2 = cell_of(x + w - 1.0);
        let y2 = cell_of(y + h - 1.0);
        (y1..=y2).all(|cy| (x1..=x2).all(|cx| !self.is_wall(cx, cy)))
    }

    /// Sample a straight line every `step` pixels and report whether no
    /// sample lands in a wall cell. The start point is never sampled.
    pub fn ray_clear(&self, start: Vec2, end: Vec2, step: f32, ray_end: RayEnd) -> bool {
        let delta = end - start;
        let distance = delta.length();
        if distance == 0.0 {
            return true;
        }

        let steps = (distance / step).ceil() as u32;
        let increment = delta / steps as f32;
        let last = match ray_end {
            RayEnd::Exclusive => steps.saturating_sub(1),
            RayEnd::Inclusive => steps,
        };

        (1..=last).all(|i| !self.is_wall_at(start + increment * i as f32))
    }

    /// Row-major iterator of `(cell_x, cell_y, is_wall)` for tile drawing
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, bool)> + '_ {
        self.walls
            .iter()
            .enumerate()
            .map(|(i, &wall)| (i as i32 % self.width, i as i32 / self.width, wall))
    }
}
