//! Vec3: per-axis sample triplet
use core::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

/// Triplet of per-axis values, X then Y then Z
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec3<T> {
    /// X component
    pub x: T,
    /// Y component
    pub y: T,
    /// Z component
    pub z: T,
}

impl<T> Vec3<T> {
    /// Creates a triplet from its components
    pub const fn new(x: T, y: T, z: T) -> Self {
        Vec3 { x, y, z }
    }
}

impl<T: Default> Default for Vec3<T> {
    fn default() -> Self {
        Vec3 { x: T::default(),
               y: T::default(),
               z: T::default(), }
    }
}

impl<T> Add for Vec3<T> where T: Add<T, Output = T>
{
    type Output = Vec3<T>;

    fn add(self, rhs: Vec3<T>) -> Vec3<T> {
        Vec3 { x: self.x + rhs.x,
               y: self.y + rhs.y,
               z: self.z + rhs.z, }
    }
}

impl<T> AddAssign for Vec3<T> where T: Add<T, Output = T> + Copy
{
    fn add_assign(&mut self, rhs: Vec3<T>) {
        *self = *self + rhs;
    }
}

impl<T> Sub for Vec3<T> where T: Sub<T, Output = T>
{
    type Output = Vec3<T>;

    fn sub(self, rhs: Vec3<T>) -> Vec3<T> {
        Vec3 { x: self.x - rhs.x,
               y: self.y - rhs.y,
               z: self.z - rhs.z, }
    }
}

impl<T> SubAssign for Vec3<T> where T: Sub<T, Output = T> + Copy
{
    fn sub_assign(&mut self, rhs: Vec3<T>) {
        *self = *self - rhs;
    }
}

impl<T> Div<T> for Vec3<T> where T: Div<T, Output = T> + Copy
{
    type Output = Vec3<T>;

    fn div(self, rhs: T) -> Vec3<T> {
        Vec3 { x: self.x / rhs,
               y: self.y / rhs,
               z: self.z / rhs, }
    }
}

/// Scale
pub trait Scale<RHS = Self> {
    /// Scale vector
    fn scale(self, rhs: RHS) -> Self;
}

impl<T> Scale<T> for Vec3<T> where T: Mul<T, Output = T> + Copy
{
    fn scale(self, rhs: T) -> Vec3<T> {
        Vec3 { x: self.x * rhs,
               y: self.y * rhs,
               z: self.z * rhs, }
    }
}

impl Vec3<i16> {
    /// Decodes three little-endian `i16` laid out X, Y, Z as the output
    /// registers are
    pub fn from_le_bytes(buffer: &[u8; 6]) -> Self {
        Vec3 { x: i16::from_le_bytes([buffer[0], buffer[1]]),
               y: i16::from_le_bytes([buffer[2], buffer[3]]),
               z: i16::from_le_bytes([buffer[4], buffer[5]]), }
    }

    /// Converts Vec<i16> to Vec<f32>
    pub fn f32(self) -> Vec3<f32> {
        Vec3 { x: f32::from(self.x),
               y: f32::from(self.y),
               z: f32::from(self.z), }
    }
}

impl Vec3<f32> {
    /// All three components not-a-number, for callers that want the
    /// sentinel instead of an error
    pub fn nan() -> Self {
        Vec3 { x: f32::NAN,
               y: f32::NAN,
               z: f32::NAN, }
    }

    /// True if any component is not-a-number
    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
}
