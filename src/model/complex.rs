use std::ops::{Add, Mul, Sub};

/// Complex number with `f64` parts
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };

    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Point on the unit circle at `angle` radians
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// Euclidean norm `sqrt(re² + im²)`
    pub fn magnitude(&self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Magnitude truncated towards zero, saturating at `u32::MAX`
    pub fn magnitude_u32(&self) -> u32 {
        self.magnitude() as u32
    }

    pub fn conj(&self) -> Self {
        Self::new(self.re, -self.im)
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.re * factor, self.im * factor)
    }
}

impl From<i32> for Complex {
    fn from(sample: i32) -> Self {
        Self::new(sample as f64, 0.0)
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Complex;

    /// `(a+bi)(c+di) = (ac-bd) + (ad+bc)i`
    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -1.0);

        assert_eq!(a + b, Complex::new(4.0, 1.0));
        assert_eq!(a - b, Complex::new(-2.0, 3.0));
        // (1+2i)(3-i) = 3 - i + 6i - 2i² = 5 + 5i
        assert_eq!(a * b, Complex::new(5.0, 5.0));
    }

    #[test]
    fn test_magnitude_truncates() {
        assert_eq!(Complex::new(3.0, 4.0).magnitude(), 5.0);
        // sqrt(2) = 1.414...
        assert_eq!(Complex::new(1.0, 1.0).magnitude_u32(), 1);
        assert_eq!(Complex::new(2.0, 2.0).magnitude_u32(), 2);
        assert_eq!(Complex::ZERO.magnitude_u32(), 0);
    }

    #[test]
    fn test_from_sample() {
        let c = Complex::from(-1500);
        assert_eq!(c.re, -1500.0);
        assert_eq!(c.im, 0.0);
    }
}
