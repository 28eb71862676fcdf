//! Spatial aggregation grid for the coarse force model
//!
//! The grid is stretched over the particles' current bounding box every frame,
//! so cell size follows the extent of the cloud. Cells are stored row-major
//! with row 0 at the bottom (`min.y`) and column 0 at the left (`min.x`).

use glam::Vec2;
use particle_physics::{cell_force, pair_potential};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Bounding box of `points`, folding from the first point.
    /// An empty slice gives a degenerate box at the origin.
    pub fn enclosing(points: &[Vec2]) -> Self {
        let Some(&first) = points.first() else {
            return Self {
                min: Vec2::ZERO,
                max: Vec2::ZERO,
            };
        };

        points.iter().fold(
            Self {
                min: first,
                max: first,
            },
            |bounds, &point| Self {
                min: bounds.min.min(point),
                max: bounds.max.max(point),
            },
        )
    }

    pub fn extent(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Number of rows and columns of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl GridShape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

fn axis_cell(value: f32, min: f32, extent: f32, cells: usize) -> usize {
    let last = cells.saturating_sub(1);
    if !(extent > 0.0) {
        return 0;
    }
    let scaled = ((value - min) / extent * cells as f32).floor();
    // Saturating float->int cast; values at exactly `max` land on `cells`
    (scaled.max(0.0) as usize).min(last)
}

/// Map a position to its `(row, col)` cell, clamped into the grid
pub fn classify(position: Vec2, bounds: &Bounds, shape: GridShape) -> (usize, usize) {
    let extent = bounds.extent();
    let row = axis_cell(position.y, bounds.min.y, extent.y, shape.rows);
    let col = axis_cell(position.x, bounds.min.x, extent.x, shape.cols);
    (row, col)
}

/// Center of cell `(row, col)` when the grid spans `bounds`
pub fn cell_center(bounds: &Bounds, shape: GridShape, row: usize, col: usize) -> Vec2 {
    let extent = bounds.extent();
    Vec2::new(
        bounds.min.x + extent.x / shape.cols as f32 * (col as f32 + 0.5),
        bounds.min.y + extent.y / shape.rows as f32 * (row as f32 + 0.5),
    )
}

/// Per-cell mass (particle count) and accumulated inter-cell force
pub struct Grid {
    shape: GridShape,
    bounds: Bounds,
    masses: Vec<f32>,
    forces: Vec<Vec2>,
    centers: Vec<Vec2>,
}

impl Grid {
    pub fn new(shape: GridShape) -> Self {
        let cells = shape.cell_count();
        Self {
            shape,
            bounds: Bounds {
                min: Vec2::ZERO,
                max: Vec2::ZERO,
            },
            masses: vec![0.0; cells],
            forces: vec![Vec2::ZERO; cells],
            centers: vec![Vec2::ZERO; cells],
        }
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn mass(&self, row: usize, col: usize) -> f32 {
        self.masses[self.shape.index(row, col)]
    }

    pub fn force(&self, row: usize, col: usize) -> Vec2 {
        self.forces[self.shape.index(row, col)]
    }

    pub fn center(&self, row: usize, col: usize) -> Vec2 {
        self.centers[self.shape.index(row, col)]
    }

    pub fn total_mass(&self) -> f32 {
        self.masses.iter().sum()
    }

    /// Stretch the grid over `bounds` and recount every particle.
    /// Masses from the previous frame are discarded.
    pub fn rebuild(&mut self, positions: &[Vec2], bounds: Bounds) {
        self.bounds = bounds;

        for row in 0..self.shape.rows {
            for col in 0..self.shape.cols {
                self.centers[self.shape.index(row, col)] =
                    cell_center(&self.bounds, self.shape, row, col);
            }
        }

        self.masses.fill(0.0);
        for &position in positions {
            let (row, col) = classify(position, &self.bounds, self.shape);
            self.masses[self.shape.index(row, col)] += 1.0;
        }
    }

    /// Sum the pull of every other cell on each cell, scaled by `G`
    pub fn accumulate_forces(&mut self, gravitational_constant: f32, min_distance_squared: f32) {
        let cells = self.shape.cell_count();
        for a in 0..cells {
            let mass = self.masses[a];
            let mut force = Vec2::ZERO;
            // An empty cell feels nothing and pulls on nothing
            if mass > 0.0 {
                let center = self.centers[a];
                for b in 0..cells {
                    if a == b || self.masses[b] == 0.0 {
                        continue;
                    }
                    force += cell_force(
                        center,
                        mass,
                        self.centers[b],
                        self.masses[b],
                        min_distance_squared,
                    );
                }
            }
            self.forces[a] = force * gravitational_constant;
        }
    }

    /// Potential energy between distinct occupied cells
    pub fn potential_energy(&self, gravitational_constant: f32, min_distance_squared: f32) -> f32 {
        let cells = self.shape.cell_count();
        let mut potential = 0.0;
        for a in 0..cells {
            if self.masses[a] == 0.0 {
                continue;
            }
            for b in (a + 1)..cells {
                if self.masses[b] == 0.0 {
                    continue;
                }
                let distance_squared = self.centers[a].distance_squared(self.centers[b]);
                potential += self.masses[a]
                    * self.masses[b]
                    * pair_potential(distance_squared, gravitational_constant, min_distance_squared);
            }
        }
        potential
    }
}
