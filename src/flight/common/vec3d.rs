use num::traits::{Float, Num, NumAssignOps, NumCast};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// A 3D vector generic over any numeric type.
///
/// Represents a point or direction in space and provides the usual
/// arithmetic, magnitude, normalization and distance operations.
///
/// # Type Parameters
/// * `T` - The available functionality depends on the traits implemented by `T`.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Vec3D<T> {
    /// The x-component of the vector.
    x: T,
    /// The y-component of the vector.
    y: T,
    /// The z-component of the vector.
    z: T,
}

impl<T: Copy> Vec3D<T> {
    /// Creates a new vector with the given components.
    pub const fn new(x: T, y: T, z: T) -> Self { Self { x, y, z } }

    /// Returns the x-component of the vector.
    pub const fn x(&self) -> T { self.x }

    /// Returns the y-component of the vector.
    pub const fn y(&self) -> T { self.y }

    /// Returns the z-component of the vector.
    pub const fn z(&self) -> T { self.z }
}

impl<T: Num + NumCast + Copy> Vec3D<T> {
    /// Creates a zero vector (x = 0, y = 0, z = 0).
    pub fn zero() -> Self { Self::new(T::zero(), T::zero(), T::zero()) }

    /// Computes the dot product of the current vector with another vector.
    ///
    /// # Arguments
    /// * `other` - Another `Vec3D` vector to compute the dot product with.
    ///
    /// # Returns
    /// A scalar of type `T` representing the dot product of the two vectors.
    pub fn dot(self, other: Vec3D<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Computes the cross product of the current vector with another vector.
    ///
    /// # Arguments
    /// * `other` - Another `Vec3D` vector to compute the cross product with.
    ///
    /// # Returns
    /// A new vector orthogonal to both inputs.
    pub fn cross(self, other: Vec3D<T>) -> Vec3D<T> {
        Vec3D::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn cast<D: NumCast>(self) -> Vec3D<D> {
        Vec3D {
            x: D::from(self.x).unwrap(),
            y: D::from(self.y).unwrap(),
            z: D::from(self.z).unwrap(),
        }
    }
}

impl<T> Vec3D<T>
where
    T: Float + NumCast + NumAssignOps,
{
    /// Computes the magnitude (absolute value) of the vector.
    ///
    /// A zero or non-finite magnitude collapses to zero so that callers
    /// never observe `NaN` or `Inf` from this primitive.
    ///
    /// # Returns
    /// The magnitude of the vector as a scalar of type `T`.
    pub fn magnitude(&self) -> T {
        let m = (self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        if m.is_zero() || !m.is_finite() {
            return T::zero();
        }
        m
    }

    /// Normalizes the vector to have a magnitude of 1.
    /// If the magnitude is zero or non-finite, the zero vector is returned.
    ///
    /// # Returns
    /// A unit vector pointing in the direction of `self`, or the zero vector.
    pub fn normalize(self) -> Self {
        let m = self.magnitude();
        if m.is_zero() {
            return Self::zero();
        }
        Self::new(self.x / m, self.y / m, self.z / m)
    }

    /// Creates a vector pointing from the current vector (`self`) to another vector.
    ///
    /// # Arguments
    /// * `other` - The target vector.
    ///
    /// # Returns
    /// A new vector representing the direction from `self` to `other`.
    pub fn to(&self, other: &Vec3D<T>) -> Vec3D<T> {
        Vec3D::new(other.x - self.x, other.y - self.y, other.z - self.z)
    }

    /// Computes the Euclidean distance between the current vector and another vector.
    ///
    /// # Arguments
    /// * `other` - The other vector to compute the distance to.
    ///
    /// # Returns
    /// The Euclidean distance as a scalar of type `T`.
    pub fn euclid_distance(&self, other: &Self) -> T {
        self.to(other).magnitude()
    }

    /// Clamps every component independently to `[-limit, +limit]`.
    ///
    /// # Arguments
    /// * `limit` - The per-axis magnitude bound; assumed non-negative.
    ///
    /// # Returns
    /// A new vector with each component clamped, signs preserved.
    pub fn clamp_per_axis(self, limit: T) -> Self {
        Self::new(
            self.x.min(limit).max(-limit),
            self.y.min(limit).max(-limit),
            self.z.min(limit).max(-limit),
        )
    }
}

impl<T: Num + Copy> Add for Vec3D<T> {
    type Output = Vec3D<T>;

    fn add(self, rhs: Vec3D<T>) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Num + Copy> Sub for Vec3D<T> {
    type Output = Vec3D<T>;

    fn sub(self, rhs: Vec3D<T>) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Num + Neg<Output = T> + Copy> Neg for Vec3D<T> {
    type Output = Vec3D<T>;

    fn neg(self) -> Self::Output { Self::new(-self.x, -self.y, -self.z) }
}

impl<T: NumAssignOps + Copy> AddAssign for Vec3D<T> {
    fn add_assign(&mut self, rhs: Vec3D<T>) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl<T: Num + Copy> Mul<T> for Vec3D<T> {
    type Output = Vec3D<T>;

    /// Implements the `*` operator for a `Vec3D` and a scalar.
    fn mul(self, rhs: T) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl<T: Num + Copy> Mul<Vec3D<T>> for Vec3D<T> {
    type Output = Vec3D<T>;

    /// Implements the `*` operator component-wise between two vectors.
    fn mul(self, rhs: Vec3D<T>) -> Self::Output {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl<T: Num + Copy> Div<T> for Vec3D<T> {
    type Output = Vec3D<T>;

    /// Implements the `/` operator for a `Vec3D` and a scalar.
    fn div(self, rhs: T) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl<T: Num + Copy> From<(T, T, T)> for Vec3D<T> {
    /// Creates a `Vec3D` from a tuple of (x, y, z) values.
    fn from(tuple: (T, T, T)) -> Self {
        Vec3D {
            x: tuple.0,
            y: tuple.1,
            z: tuple.2,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Vec3D<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
