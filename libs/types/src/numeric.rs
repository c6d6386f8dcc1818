//! Integer scalar types for prices and quantities
//!
//! Both wrappers carry a non-negative 64-bit integer. They are distinct
//! types: a `Price` can never be assigned to a `Quantity` nor vice versa,
//! and cross-type arithmetic is limited to the notional product used for
//! turnover accumulation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// Price in minimum currency increments
///
/// Zero is representable (it is the "no price" marker of auction results);
/// strict positivity of working orders is enforced at the order-book
/// boundary, not here.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Absolute distance to another price
    pub fn distance(&self, other: Price) -> u64 {
        self.0.abs_diff(other.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        assert!(self.0 >= rhs.0, "Price subtraction would result in negative");
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u64> for Price {
    type Output = Price;

    fn mul(self, rhs: u64) -> Self::Output {
        Price(self.0 * rhs)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quantity in units of the instrument
///
/// Residual quantities decrease monotonically while an order rests; the
/// subtraction discipline below turns an over-consumption into a loud
/// failure instead of a wrapped value.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        assert!(
            self.0 >= rhs.0,
            "Quantity subtraction would result in negative"
        );
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Quantity {
    fn sub_assign(&mut self, rhs: Self) {
        assert!(
            self.0 >= rhs.0,
            "Quantity subtraction would result in negative"
        );
        self.0 -= rhs.0;
    }
}

impl Mul<u64> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: u64) -> Self::Output {
        Quantity(self.0 * rhs)
    }
}

impl Mul<Price> for Quantity {
    type Output = u64;

    fn mul(self, rhs: Price) -> Self::Output {
        self.0 * rhs.as_u64()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_creation() {
        let price = Price::new(50000);
        assert_eq!(price.as_u64(), 50000);
        assert!(!price.is_zero());
        assert!(Price::ZERO.is_zero());
    }

    #[test]
    fn test_price_arithmetic() {
        let p1 = Price::new(100);
        let p2 = Price::new(50);

        assert_eq!(p1 + p2, Price::new(150));
        assert_eq!(p1 - p2, Price::new(50));
        assert_eq!(p1 * 3, Price::new(300));
    }

    #[test]
    #[should_panic(expected = "Price subtraction would result in negative")]
    fn test_price_subtraction_underflow_panics() {
        let _ = Price::new(50) - Price::new(100);
    }

    #[test]
    fn test_price_ordering() {
        assert!(Price::new(100) < Price::new(101));
        assert!(Price::new(100) >= Price::ZERO);
    }

    #[test]
    fn test_price_distance() {
        assert_eq!(Price::new(1000).distance(Price::new(890)), 110);
        assert_eq!(Price::new(890).distance(Price::new(1000)), 110);
    }

    #[test]
    fn test_quantity_arithmetic() {
        let mut qty = Quantity::new(100);
        qty += Quantity::new(50);
        assert_eq!(qty, Quantity::new(150));

        qty -= Quantity::new(150);
        assert!(qty.is_zero());
    }

    #[test]
    #[should_panic(expected = "Quantity subtraction would result in negative")]
    fn test_quantity_subtraction_underflow_panics() {
        let mut qty = Quantity::new(10);
        qty -= Quantity::new(11);
    }

    #[test]
    fn test_notional_product() {
        let qty = Quantity::new(100);
        let price = Price::new(1001);
        assert_eq!(qty * price, 100_100);
    }

    #[test]
    fn test_serialization_is_transparent() {
        let price = Price::new(150);
        assert_eq!(serde_json::to_string(&price).unwrap(), "150");

        let decoded: Quantity = serde_json::from_str("100").unwrap();
        assert_eq!(decoded, Quantity::new(100));
    }
}
