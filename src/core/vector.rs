use crate::core::math;
use std::fmt;
use std::fmt::Display;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec {
    pub fn new(x: f64, y: f64, z: f64) -> Vec {
        Vec { x, y, z }
    }

    pub fn zero() -> Vec {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn one() -> Vec {
        Self::new(1.0, 1.0, 1.0)
    }

    pub fn x_axis() -> Vec {
        Self::new(1.0, 0.0, 0.0)
    }

    pub fn y_axis() -> Vec {
        Self::new(0.0, 1.0, 0.0)
    }

    pub fn z_axis() -> Vec {
        Self::new(0.0, 0.0, 1.0)
    }

    pub fn cross(&self, other: &Vec) -> Vec {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x)
    }

    pub fn dot(&self, other: &Vec) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn magnitude2(&self) -> f64 {
        self.dot(self)
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude2().sqrt()
    }

    pub fn distance(&self, other: &Vec) -> f64 {
        (*self - *other).magnitude()
    }

    /**
     * Returns the unit vector in the same direction. A zero vector yields NaN components, so
     * only call this where the input is known to be non-zero; see `try_normalized`.
     */
    pub fn normalized(&self) -> Vec {
        let length = self.magnitude();
        Self::new(self.x / length, self.y / length, self.z / length)
    }

    /**
     * Returns the unit vector in the same direction, or None if the vector is exactly zero or
     * not finite. No tolerance is applied, so arbitrarily short vectors still have a direction.
     */
    pub fn try_normalized(&self) -> Option<Vec> {
        if !self.is_finite() || self.is_exactly_zero() {
            return None;
        }
        // Rescale first so the squared length neither underflows nor overflows.
        let largest = self.x.abs().max(self.y.abs()).max(self.z.abs());
        let scaled = *self / largest;
        Some(scaled / scaled.magnitude())
    }

    /**
     * Determines whether a vec's magnitude is zero, within EPS.
     */
    pub fn is_nearly_zero(&self) -> bool {
        math::is_nearly_zero(self.magnitude())
    }

    pub fn is_exactly_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /**
     * Returns some unit vector perpendicular to this one. The cross product with the Z-axis is
     * used unless this vector is parallel to Z, in which case the X-axis is returned.
     */
    pub fn any_perpendicular(&self) -> Vec {
        let candidate = self.cross(&Vec::z_axis());
        if candidate.is_nearly_zero() {
            Vec::x_axis()
        }
        else {
            candidate.normalized()
        }
    }
}

impl Display for Vec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Vec {
    type Output = Vec;
    fn add(self, rhs: Vec) -> Vec {
        Vec::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec {
    fn add_assign(&mut self, rhs: Vec) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec {
    type Output = Vec;
    fn sub(self, rhs: Vec) -> Vec {
        Vec::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec {
    type Output = Vec;
    fn mul(self, rhs: f64) -> Vec {
        Vec::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec> for f64 {
    type Output = Vec;
    fn mul(self, rhs: Vec) -> Vec { rhs * self }
}

impl Div<f64> for Vec {
    type Output = Vec;
    fn div(self, rhs: f64) -> Vec {
        Vec::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec {
    type Output = Vec;
    fn neg(self) -> Vec {
        Vec::new(-self.x, -self.y, -self.z)
    }
}
