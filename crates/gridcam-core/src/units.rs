//! Length units.

use serde::{Deserialize, Serialize};

/// Centimeters per inch, exact by definition.
pub const CM_PER_IN: f64 = 2.54;

/// A length unit used by calibration data or by the render host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Inches (calibration data of the reference site).
    #[default]
    Inch,
    /// Centimeters (native unit of the render host).
    Centimeter,
}

impl LengthUnit {
    /// Converts `value` expressed in `self` into `target`.
    #[must_use]
    pub fn convert(self, value: f64, target: LengthUnit) -> f64 {
        match (self, target) {
            (LengthUnit::Inch, LengthUnit::Centimeter) => value * CM_PER_IN,
            (LengthUnit::Centimeter, LengthUnit::Inch) => value / CM_PER_IN,
            _ => value,
        }
    }

    /// Short unit symbol.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Inch => "in",
            LengthUnit::Centimeter => "cm",
        }
    }
}
