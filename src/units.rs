//! A scalar typographic width, used for all box/glue/penalty measurements.
//!
//! Widths are plain IEEE floats wrapped in a newtype so that arithmetic
//! involving widths stays readable at call sites (`a.width + b.width`
//! rather than bare `f64` additions scattered across the optimizer) and so
//! that serialized item streams carry a distinguishable tag. There is a
//! single unit here, unlike the scaled-point/millimeter duality a page
//! layout engine needs, because nothing downstream of the optimizer cares
//! about physical units: a width oracle can return whatever scale it likes
//! as long as it is consistent.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A typographic width, stretch, or shrink amount.
#[derive(Copy, Clone, Serialize, Deserialize, PartialEq, PartialOrd, Default)]
pub struct Pt(pub f64);

impl Pt {
    /// The zero width.
    pub const ZERO: Pt = Pt(0.0);

    /// Positive infinity, used for unbreakable penalties and the trailing
    /// glue of a paragraph.
    pub const INFINITY: Pt = Pt(f64::INFINITY);

    /// Returns the absolute value of this width.
    pub fn abs(self) -> Pt {
        Pt(self.0.abs())
    }
}

impl fmt::Debug for Pt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}pt", self.0)
    }
}

impl fmt::Display for Pt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}pt", self.0)
    }
}

impl Add for Pt {
    type Output = Pt;
    fn add(self, other: Pt) -> Pt {
        Pt(self.0 + other.0)
    }
}

impl AddAssign for Pt {
    fn add_assign(&mut self, other: Pt) {
        self.0 += other.0;
    }
}

impl Sub for Pt {
    type Output = Pt;
    fn sub(self, other: Pt) -> Pt {
        Pt(self.0 - other.0)
    }
}

impl SubAssign for Pt {
    fn sub_assign(&mut self, other: Pt) {
        self.0 -= other.0;
    }
}

impl Neg for Pt {
    type Output = Pt;
    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

impl Mul<f64> for Pt {
    type Output = Pt;
    fn mul(self, scalar: f64) -> Pt {
        Pt(self.0 * scalar)
    }
}

impl Div<f64> for Pt {
    type Output = Pt;
    fn div(self, scalar: f64) -> Pt {
        Pt(self.0 / scalar)
    }
}

/// Ratio between two widths, used by the adjustment-ratio calculus.
impl Div for Pt {
    type Output = f64;
    fn div(self, other: Pt) -> f64 {
        self.0 / other.0
    }
}

impl Sum for Pt {
    fn sum<I: Iterator<Item = Pt>>(iter: I) -> Pt {
        iter.fold(Pt::ZERO, Add::add)
    }
}

impl From<f64> for Pt {
    fn from(value: f64) -> Pt {
        Pt(value)
    }
}
