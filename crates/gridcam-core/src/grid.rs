//! Grid cells and the grid-to-model coordinate mapping.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::interp::KnotTable;
use crate::options::Calibration;
use crate::units::LengthUnit;

/// One physical grid position, identified by integer indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub gx: i32,
    pub gy: i32,
}

impl GridCell {
    /// Creates a new grid cell.
    #[must_use]
    pub const fn new(gx: i32, gy: i32) -> Self {
        Self { gx, gy }
    }

    /// Returns true if the cell sits on one of the four extreme index
    /// combinations of a `0..=grid_max` grid.
    #[must_use]
    pub fn is_corner(self, grid_max: i32) -> bool {
        let extreme = |i: i32| i == 0 || i == grid_max;
        extreme(self.gx) && extreme(self.gy)
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.gx, self.gy)
    }
}

impl From<(i32, i32)> for GridCell {
    fn from((gx, gy): (i32, i32)) -> Self {
        Self::new(gx, gy)
    }
}

/// Maps grid cells to horizontal model coordinates.
///
/// The model X axis is driven by the grid Y index and the model Y axis by
/// the grid X index. This is the site's axis convention and must not be
/// "fixed".
#[derive(Debug, Clone)]
pub struct GridMapper {
    x_from_grid_y: KnotTable,
    y_from_grid_x: KnotTable,
    unit: LengthUnit,
    host_unit: LengthUnit,
}

impl GridMapper {
    /// Creates a mapper from calibration data.
    #[must_use]
    pub fn new(calibration: &Calibration) -> Self {
        Self {
            x_from_grid_y: calibration.x_from_grid_y.clone(),
            y_from_grid_x: calibration.y_from_grid_x.clone(),
            unit: calibration.unit,
            host_unit: calibration.host_unit,
        }
    }

    /// Unit of the calibration tables.
    #[must_use]
    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Unit of the render host.
    #[must_use]
    pub fn host_unit(&self) -> LengthUnit {
        self.host_unit
    }

    /// Model XY of a cell in the calibration unit.
    #[must_use]
    pub fn cell_to_model(&self, cell: GridCell) -> DVec2 {
        DVec2::new(
            self.x_from_grid_y.interpolate(cell.gy),
            self.y_from_grid_x.interpolate(cell.gx),
        )
    }

    /// Model XY of a cell in the host unit.
    #[must_use]
    pub fn cell_to_host(&self, cell: GridCell) -> DVec2 {
        let model = self.cell_to_model(cell);
        DVec2::new(self.to_host(model.x), self.to_host(model.y))
    }

    /// Converts a length from the calibration unit to the host unit.
    #[must_use]
    pub fn to_host(&self, length: f64) -> f64 {
        self.unit.convert(length, self.host_unit)
    }
}
