//! Minimal complex arithmetic for the Julia recurrence.

use serde::{Deserialize, Serialize};

/// A complex number with `f64` components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Complex {
    /// The origin.
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    /// Create a complex number.
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Squared magnitude `re² + im²`.
    #[must_use]
    pub fn norm_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// `self² + c`, expanded as `(re² - im² + c.re, 2·re·im + c.im)`.
    #[must_use]
    pub fn square_add(self, c: Self) -> Self {
        Self {
            re: self.re * self.re - self.im * self.im + c.re,
            im: 2.0 * self.re * self.im + c.im,
        }
    }

    /// Whether both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl std::fmt::Display for Complex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.im.is_sign_negative() {
            write!(f, "{}-{}i", self.re, -self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_add() {
        // (1 + 2i)² = -3 + 4i
        let z = Complex::new(1.0, 2.0).square_add(Complex::new(0.5, -0.5));
        assert_eq!(z, Complex::new(-2.5, 3.5));
    }

    #[test]
    fn test_norm_sqr() {
        assert_eq!(Complex::new(3.0, 4.0).norm_sqr(), 25.0);
        assert_eq!(Complex::ZERO.norm_sqr(), 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Complex::new(-0.8, 0.156).to_string(), "-0.8+0.156i");
        assert_eq!(Complex::new(0.285, -0.01).to_string(), "0.285-0.01i");
    }

    #[test]
    fn test_finite() {
        assert!(Complex::new(1.0, -1.0).is_finite());
        assert!(!Complex::new(f64::NAN, 0.0).is_finite());
        assert!(!Complex::new(0.0, f64::INFINITY).is_finite());
    }
}
