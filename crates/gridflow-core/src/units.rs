//! Power quantities.
//!
//! Supply, demand, line capacity and flow are all active power and are carried
//! as [`Megawatts`], which keeps them apart from the bare `f64` cost
//! coefficients in signatures.
//!
//! ```
//! use gridflow_core::units::Megawatts;
//!
//! let supply = Megawatts(150.0);
//! let demand = Megawatts(120.0);
//! assert_eq!((supply - demand).value(), 30.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};

/// Active power in megawatts (MW)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Megawatts(pub f64);

impl Megawatts {
    pub const ZERO: Self = Self(0.0);

    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// `self` as a percentage of `rating`; `None` for a zero rating
    pub fn percent_of(self, rating: Megawatts) -> Option<f64> {
        (rating.0 > 0.0).then(|| self.0 / rating.0 * 100.0)
    }
}

impl Add for Megawatts {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Megawatts {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Megawatts {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Megawatts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|mw| mw.0).sum())
    }
}

impl<'a> Sum<&'a Megawatts> for Megawatts {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Megawatts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} MW", self.0)
    }
}
