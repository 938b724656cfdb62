// Copyright Google Inc. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS-IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq};
use num_traits::{Float, Signed};

use crate::util::math::Scalar;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vector2<T: Scalar> {
    x: T,
    y: T,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vector3<T: Scalar> {
    x: T,
    y: T,
    z: T,
}

impl<T: Scalar> Vector2<T> {
    pub fn new(x: T, y: T) -> Vector2<T> {
        Vector2 { x, y }
    }

    pub fn x(&self) -> T {
        self.x
    }

    pub fn y(&self) -> T {
        self.y
    }

    pub fn zero() -> Vector2<T> {
        Vector2::new(T::zero(), T::zero())
    }

    pub fn dot_prod(&self, other: &Vector2<T>) -> T {
        self.x * other.x + self.y * other.y
    }

    /// Squared Euclidean norm (the dot product with itself). Cheaper than
    /// `norm()` when only comparing magnitudes.
    pub fn norm2(&self) -> T {
        self.dot_prod(self)
    }

    /// Euclidean norm. For integer T, correct only if norm2 does not overflow.
    pub fn norm(&self) -> f64 {
        self.norm2().to_f64().unwrap().sqrt()
    }

    /// Unit vector in the same direction, or the zero vector when applied
    /// to the zero vector.
    pub fn normalize(self) -> Vector2<f64> {
        let mut norm = self.norm();
        if norm != 0.0 {
            norm = 1.0 / norm;
        }
        Vector2::new(
            self.x.to_f64().unwrap() * norm,
            self.y.to_f64().unwrap() * norm,
        )
    }
}

impl<T: Scalar> Vector3<T> {
    pub fn new(x: T, y: T, z: T) -> Vector3<T> {
        Vector3 { x, y, z }
    }

    pub fn x(&self) -> T {
        self.x
    }

    pub fn y(&self) -> T {
        self.y
    }

    pub fn z(&self) -> T {
        self.z
    }

    pub fn zero() -> Vector3<T> {
        Vector3::new(T::zero(), T::zero(), T::zero())
    }

    /// Dot product (scalar product) of this vector with another vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use s2tiling::util::math::Vector3;
    ///
    /// let v1 = Vector3::new(1.0, 2.0, 3.0);
    /// let v2 = Vector3::new(4.0, 5.0, 6.0);
    /// assert_eq!(v1.dot_prod(&v2), 32.0); // 1*4 + 2*5 + 3*6 = 32
    /// ```
    pub fn dot_prod(&self, other: &Vector3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Squared Euclidean norm (the dot product with itself). Cheaper than
    /// `norm()` when only comparing magnitudes.
    pub fn norm2(&self) -> T {
        self.dot_prod(self)
    }

    /// Euclidean norm. For integer T, correct only if norm2 does not overflow.
    pub fn norm(&self) -> f64 {
        self.norm2()
            .to_f64()
            .expect("norm: error when converting")
            .sqrt()
    }

    /// Unit vector in the same direction, or the zero vector when applied
    /// to the zero vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use approx::assert_relative_eq;
    /// use s2tiling::util::math::Vector3;
    ///
    /// let v: Vector3<f64> = Vector3::new(3.0, 4.0, 5.0);
    /// assert_relative_eq!(v.normalize().norm(), 1.0);
    /// ```
    pub fn normalize(self) -> Vector3<f64> {
        let mut norm = self.norm();
        if norm != 0.0 {
            norm = 1.0 / norm;
        }
        Vector3::new(
            self.x.to_f64().unwrap() * norm,
            self.y.to_f64().unwrap() * norm,
            self.z.to_f64().unwrap() * norm,
        )
    }

    /// Cross product of this vector with another vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use s2tiling::util::math::Vector3;
    ///
    /// let v1 = Vector3::new(1, 2, 3);
    /// let v2 = Vector3::new(4, 5, 6);
    /// assert_eq!(v1.cross_prod(&v2), Vector3::new(-3, 6, -3));
    /// ```
    pub fn cross_prod(&self, other: &Vector3<T>) -> Vector3<T> {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Angle between this vector and another, in radians.
    pub fn angle(&self, other: &Vector3<T>) -> f64 {
        f64::atan2(
            self.cross_prod(other).norm(),
            self.dot_prod(other).to_f64().unwrap(),
        )
    }
}

impl<T: Scalar> Vector3<T>
where
    T: Signed,
{
    /// Unit vector orthogonal to this vector.
    pub fn ortho(&self) -> Vector3<f64> {
        // Cross with the unit axis "before" the largest component; that
        // axis is never parallel to this vector.
        let k = match self.largest_abs_component() {
            0 => 2,
            k => k - 1,
        };

        let mut temp: Vector3<T> = Vector3::zero();
        temp[k as usize] = T::one();

        self.cross_prod(&temp).normalize()
    }

    /// Vector with the absolute values of each component.
    pub fn abs(&self) -> Vector3<T> {
        Vector3::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Index of the component with the largest absolute value:
    /// 0 for x, 1 for y, 2 for z.
    ///
    /// # Examples
    /// ```
    /// use s2tiling::util::math::Vector3;
    ///
    /// let v = Vector3::new(0.0, 1.0, -2.0);
    /// assert_eq!(v.largest_abs_component(), 2);
    /// ```
    #[allow(clippy::collapsible_else_if)]
    #[rustfmt::skip]
    pub fn largest_abs_component(&self) -> i32 {
        let temp: Vector3<T> = self.abs();
        if temp.x > temp.y {
            if temp.x > temp.z { 0 } else { 2 }
        } else {
            if temp.y > temp.z { 1 } else { 2 }
        }
    }
}

impl<T: Scalar> Add for Vector2<T> {
    type Output = Vector2<T>;

    fn add(self, rhs: Vector2<T>) -> Self::Output {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Scalar> Sub for Vector2<T> {
    type Output = Vector2<T>;

    fn sub(self, rhs: Vector2<T>) -> Self::Output {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Scalar> Mul<T> for Vector2<T> {
    type Output = Vector2<T>;

    fn mul(self, scalar: T) -> Self::Output {
        Vector2::new(self.x * scalar, self.y * scalar)
    }
}

impl<T: Scalar> Add for Vector3<T> {
    type Output = Vector3<T>;

    fn add(self, rhs: Vector3<T>) -> Self::Output {
        &self + &rhs
    }
}

impl<T: Scalar> Add for &Vector3<T> {
    type Output = Vector3<T>;

    fn add(self, rhs: &Vector3<T>) -> Self::Output {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Scalar> Sub for Vector3<T> {
    type Output = Vector3<T>;

    fn sub(self, rhs: Vector3<T>) -> Self::Output {
        &self - &rhs
    }
}

impl<T: Scalar> Sub for &Vector3<T> {
    type Output = Vector3<T>;

    fn sub(self, rhs: &Vector3<T>) -> Self::Output {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Scalar> Mul<T> for Vector3<T> {
    type Output = Vector3<T>;

    fn mul(self, scalar: T) -> Self::Output {
        &self * scalar
    }
}

impl<T: Scalar> Mul<T> for &Vector3<T> {
    type Output = Vector3<T>;

    fn mul(self, scalar: T) -> Self::Output {
        Vector3::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl<T: Scalar + Signed> Neg for Vector3<T> {
    type Output = Vector3<T>;

    fn neg(self) -> Self::Output {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl<T: Scalar> Default for Vector2<T> {
    fn default() -> Self {
        Vector2::zero()
    }
}

impl<T: Scalar> Default for Vector3<T> {
    fn default() -> Self {
        Vector3::zero()
    }
}

impl<T: Scalar> Index<usize> for Vector2<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Vector2: Index {index} out of bounds"),
        }
    }
}

impl<T: Scalar> IndexMut<usize> for Vector2<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Vector2: Index {index} out of bounds"),
        }
    }
}

impl<T: Scalar> Index<usize> for Vector3<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3: Index {index} out of bounds"),
        }
    }
}

impl<T: Scalar> IndexMut<usize> for Vector3<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vector3: Index {index} out of bounds"),
        }
    }
}

impl<T> AbsDiffEq for Vector2<T>
where
    T: Scalar + AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        T::abs_diff_eq(&self.x, &other.x, epsilon) && T::abs_diff_eq(&self.y, &other.y, epsilon)
    }
}

impl<T> RelativeEq for Vector2<T>
where
    T: Scalar + Float + RelativeEq,
    T::Epsilon: Copy,
{
    fn default_max_relative() -> Self::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        T::relative_eq(&self.x, &other.x, epsilon, max_relative)
            && T::relative_eq(&self.y, &other.y, epsilon, max_relative)
    }
}

impl<T> AbsDiffEq for Vector3<T>
where
    T: Scalar + AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        T::abs_diff_eq(&self.x, &other.x, epsilon)
            && T::abs_diff_eq(&self.y, &other.y, epsilon)
            && T::abs_diff_eq(&self.z, &other.z, epsilon)
    }
}

impl<T> RelativeEq for Vector3<T>
where
    T: Scalar + Float + RelativeEq,
    T::Epsilon: Copy,
{
    fn default_max_relative() -> Self::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        T::relative_eq(&self.x, &other.x, epsilon, max_relative)
            && T::relative_eq(&self.y, &other.y, epsilon, max_relative)
            && T::relative_eq(&self.z, &other.z, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector3_add_sub_mul() {
        let v1 = Vector3::new(1, 2, 3);
        let v2 = Vector3::new(4, 5, 6);
        assert_eq!(v1 + v2, Vector3::new(5, 7, 9));
        assert_eq!(v2 - v1, Vector3::new(3, 3, 3));
        assert_eq!(v1 * 3, Vector3::new(3, 6, 9));
        assert_eq!(-v1, Vector3::new(-1, -2, -3));
    }

    #[test]
    fn test_vector3_cross_prod_is_orthogonal() {
        let v1 = Vector3::new(1.0, 2.0, 3.0);
        let v2 = Vector3::new(-4.0, 5.0, 6.0);
        let cross = v1.cross_prod(&v2);
        assert_eq!(cross.dot_prod(&v1), 0.0);
        assert_eq!(cross.dot_prod(&v2), 0.0);
    }

    #[test]
    fn test_vector3_ortho() {
        use approx::{assert_abs_diff_eq, assert_relative_eq};
        for v in [
            Vector3::new(3.0, -4.0, 3.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, -1.0),
        ] {
            assert_relative_eq!(v.ortho().norm(), 1.0);
            assert_abs_diff_eq!(v.dot_prod(&v.ortho()), 0.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_largest_abs_component() {
        assert_eq!(Vector3::new(-3.0, 2.0, -1.0).largest_abs_component(), 0);
        assert_eq!(Vector3::new(1.0, 3.0, -2.0).largest_abs_component(), 1);
        assert_eq!(Vector3::new(0.0, 1.0, -2.0).largest_abs_component(), 2);
    }

    #[test]
    fn test_vector2_norm() {
        let v = Vector2::new(3.0, 4.0);
        assert_eq!(v.norm(), 5.0);
        assert_eq!(v.normalize().norm(), 1.0);
    }
}
