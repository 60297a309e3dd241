//! Horizontal direction basis derived from reference grid cells.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::grid::{GridCell, GridMapper};
use crate::options::CaptureOptions;

/// Magnitude at or below which a vector is treated as degenerate.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// A horizontal capture direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl Direction {
    /// Cardinal directions in capture order.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Diagonal directions in capture order.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// Label used in output filenames.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
            Direction::NorthEast => "NE",
            Direction::SouthEast => "SE",
            Direction::SouthWest => "SW",
            Direction::NorthWest => "NW",
        }
    }

    /// Returns true for NE, SE, SW and NW.
    #[must_use]
    pub fn is_diagonal(self) -> bool {
        Self::DIAGONAL.contains(&self)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returns the unit vector of `v`, or exactly zero if `v` is degenerate.
#[must_use]
pub fn normalize_or_zero(v: DVec2) -> DVec2 {
    let magnitude = v.x.hypot(v.y);
    if magnitude <= DEGENERATE_EPSILON {
        return DVec2::ZERO;
    }
    v / magnitude
}

/// The eight horizontal unit vectors used as base forward directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionBasis {
    pub north: DVec2,
    pub east: DVec2,
    pub south: DVec2,
    pub west: DVec2,
    pub north_east: DVec2,
    pub south_east: DVec2,
    pub south_west: DVec2,
    pub north_west: DVec2,
}

impl DirectionBasis {
    /// Builds the basis from the positions of the center, north reference,
    /// and east reference points.
    ///
    /// Degenerate references yield zero vectors rather than an error.
    #[must_use]
    pub fn from_reference_points(center: DVec2, north_ref: DVec2, east_ref: DVec2) -> Self {
        let north = normalize_or_zero(north_ref - center);
        let east = normalize_or_zero(east_ref - center);
        let south = -north;
        let west = -east;

        let basis = Self {
            north,
            east,
            south,
            west,
            north_east: normalize_or_zero(north + east),
            south_east: normalize_or_zero(south + east),
            south_west: normalize_or_zero(south + west),
            north_west: normalize_or_zero(north + west),
        };

        for direction in Direction::CARDINAL.into_iter().chain(Direction::DIAGONAL) {
            if basis.vector(direction) == DVec2::ZERO {
                log::warn!("Degenerate {direction} direction; check the calibration reference cells");
            }
        }
        basis
    }

    /// Builds the basis from the configured reference cells, in host units.
    #[must_use]
    pub fn from_options(mapper: &GridMapper, options: &CaptureOptions) -> Self {
        Self::from_reference_points(
            mapper.cell_to_host(options.center_cell),
            mapper.cell_to_host(options.north_reference),
            mapper.cell_to_host(options.east_reference),
        )
    }

    /// Returns the vector for `direction`.
    #[must_use]
    pub fn vector(&self, direction: Direction) -> DVec2 {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
            Direction::NorthEast => self.north_east,
            Direction::SouthEast => self.south_east,
            Direction::SouthWest => self.south_west,
            Direction::NorthWest => self.north_west,
        }
    }

    /// Returns the four capture directions for `cell`, in capture order.
    ///
    /// Corner cells use the diagonal set, every other cell the cardinal set.
    #[must_use]
    pub fn directions_for(&self, cell: GridCell, grid_max: i32) -> [(Direction, DVec2); 4] {
        let set = if cell.is_corner(grid_max) {
            Direction::DIAGONAL
        } else {
            Direction::CARDINAL
        };
        set.map(|d| (d, self.vector(d)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn site_basis() -> DirectionBasis {
        let options = CaptureOptions::default();
        let mapper = GridMapper::new(&options.calibration);
        DirectionBasis::from_options(&mapper, &options)
    }

    #[test]
    fn test_site_north_and_east() {
        let basis = site_basis();
        // North runs from (5,5) to (5,0): decreasing grid Y, i.e. model -X.
        assert!((basis.north - DVec2::NEG_X).length() < 1e-12);
        // East runs from (5,5) to (10,5): increasing grid X, i.e. model +Y.
        assert!((basis.east - DVec2::Y).length() < 1e-12);
    }

    #[test]
    fn test_opposites_are_exact_negations() {
        let basis = site_basis();
        assert_eq!(basis.south, -basis.north);
        assert_eq!(basis.west, -basis.east);
    }

    #[test]
    fn test_diagonals_are_unit_and_between_cardinals() {
        let basis = site_basis();
        let ne = basis.north_east;
        assert!((ne.length() - 1.0).abs() < 1e-12);
        assert!((ne.dot(basis.north) - ne.dot(basis.east)).abs() < 1e-12);
        assert!((basis.south_west + ne).length() < 1e-12);
    }

    #[test]
    fn test_degenerate_reference_gives_zero() {
        let p = DVec2::new(1.0, 2.0);
        let basis = DirectionBasis::from_reference_points(p, p, p + DVec2::X);
        assert_eq!(basis.north, DVec2::ZERO);
        assert_eq!(basis.south, DVec2::ZERO);
        assert_eq!(basis.east, DVec2::X);
        // north + east collapses onto east.
        assert_eq!(basis.north_east, DVec2::X);
    }

    #[test]
    fn test_direction_set_selection() {
        let basis = site_basis();
        let corner: Vec<_> = basis
            .directions_for(GridCell::new(0, 0), 10)
            .iter()
            .map(|(d, _)| *d)
            .collect();
        assert_eq!(corner, Direction::DIAGONAL);

        let edge: Vec<_> = basis
            .directions_for(GridCell::new(5, 0), 10)
            .iter()
            .map(|(d, _)| *d)
            .collect();
        assert_eq!(edge, Direction::CARDINAL);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = Direction::CARDINAL
            .into_iter()
            .chain(Direction::DIAGONAL)
            .map(Direction::label)
            .collect();
        assert_eq!(
            labels,
            ["north", "east", "south", "west", "NE", "SE", "SW", "NW"]
        );
        assert!(Direction::SouthWest.is_diagonal());
        assert!(!Direction::West.is_diagonal());
    }

    proptest! {
        #[test]
        fn prop_normalize_gives_unit_length(x in -1e6f64..1e6, y in -1e6f64..1e6) {
            prop_assume!(x.hypot(y) > 1e-6);
            let n = normalize_or_zero(DVec2::new(x, y));
            prop_assert!((n.length() - 1.0).abs() < 1e-6);
        }

        #[test]
        fn prop_normalize_tiny_is_exact_zero(x in -7e-10f64..7e-10, y in -7e-10f64..7e-10) {
            prop_assert_eq!(normalize_or_zero(DVec2::new(x, y)), DVec2::ZERO);
        }

        #[test]
        fn prop_opposites_negate(
            cx in -100f64..100.0, cy in -100f64..100.0,
            nx in -100f64..100.0, ny in -100f64..100.0,
            ex in -100f64..100.0, ey in -100f64..100.0,
        ) {
            let basis = DirectionBasis::from_reference_points(
                DVec2::new(cx, cy),
                DVec2::new(nx, ny),
                DVec2::new(ex, ey),
            );
            prop_assert_eq!(basis.south, -basis.north);
            prop_assert_eq!(basis.west, -basis.east);
        }
    }
}
