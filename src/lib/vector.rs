//! Small fixed-size vector type used by the camera and scene.

use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};

use paste::paste;

#[derive(PartialEq, Clone, Copy, Debug)]
/// DIM-dimensional vector of TYPE values.
pub struct Vector<const DIM: usize, TYPE = f32> {
    /// Coordinate array.
    pub inner: [TYPE; DIM],
}

/// 3D vector of `f32`, the only shape the host side ever hands to the GPU.
pub type Vec3 = Vector<3, f32>;

impl<const DIM: usize, TYPE: Default + Copy> Default for Vector<DIM, TYPE> {
    fn default() -> Self {
        Self {
            inner: [TYPE::default(); DIM],
        }
    }
}

impl<const DIM: usize, TYPE> Index<usize> for Vector<DIM, TYPE> {
    type Output = TYPE;

    fn index(&self, index: usize) -> &Self::Output {
        &self.inner[index]
    }
}

impl<const DIM: usize, TYPE> From<[TYPE; DIM]> for Vector<DIM, TYPE> {
    fn from(inner: [TYPE; DIM]) -> Self {
        Self { inner }
    }
}

impl<const DIM: usize, TYPE> From<Vector<DIM, TYPE>> for [TYPE; DIM] {
    fn from(value: Vector<DIM, TYPE>) -> Self {
        value.inner
    }
}

macro_rules! impl_vec_vec_op {
    ($trait:ident, $function:ident, $($op:tt)+) => {
        paste! {
            impl<const DIM: usize, TYPE: Copy + [<$trait Assign>]<TYPE>> [<$trait Assign>]<Self> for Vector<DIM, TYPE> {
                fn [<$function _assign>](&mut self, rhs: Self) {
                    for (l, r) in self.inner.iter_mut().zip(rhs.inner.iter()) {
                        *l $($op)+ *r;
                    }
                }
            }

            impl<const DIM: usize, TYPE: Copy + [<$trait Assign>]<TYPE>> $trait<Self> for Vector<DIM, TYPE> {
                type Output = Self;

                fn $function(mut self, rhs: Self) -> Self::Output {
                    self $($op)+ rhs;
                    self
                }
            }
        }
    }
}

impl_vec_vec_op! (Add, add, +=);
impl_vec_vec_op! (Sub, sub, -=);

macro_rules! impl_vec_scalar_op {
    ($trait:ident, $function:ident, $($op:tt)+) => {
        paste! {
            impl<const DIM: usize, TYPE: Copy + [<$trait Assign>]<TYPE>> [<$trait Assign>]<TYPE> for Vector<DIM, TYPE> {
                fn [<$function _assign>](&mut self, rhs: TYPE) {
                    for v in self.inner.iter_mut() {
                        *v $($op)+ rhs;
                    }
                }
            }

            impl<const DIM: usize, TYPE: Copy + [<$trait Assign>]<TYPE>> $trait<TYPE> for Vector<DIM, TYPE> {
                type Output = Self;

                fn $function(mut self, rhs: TYPE) -> Self::Output {
                    self $($op)+ rhs;
                    self
                }
            }
        }
    }
}

impl_vec_scalar_op! (Mul, mul, *=);
impl_vec_scalar_op! (Div, div, /=);

impl<const DIM: usize, TYPE: Copy + Neg<Output = TYPE>> Neg for Vector<DIM, TYPE> {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        for v in self.inner.iter_mut() {
            *v = -*v;
        }
        self
    }
}

impl<TYPE> Vector<3, TYPE> {
    /// Create a new 3D vector from values.
    pub const fn new(x: TYPE, y: TYPE, z: TYPE) -> Self {
        Self { inner: [x, y, z] }
    }
}

impl Vec3 {
    /// All components set to zero.
    pub const ZERO: Self = Self::new(0., 0., 0.);
    /// World up (+Y).
    pub const Y: Self = Self::new(0., 1., 0.);

    /// Perform cross product with `other`.
    pub fn cross_product(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.inner;
        let [bx, by, bz] = other.inner;
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }
}

impl<const DIM: usize> Vector<DIM, f32> {
    /// Perform dot product with `other`.
    pub fn dot_product(&self, other: &Self) -> f32 {
        self.inner
            .iter()
            .zip(other.inner.iter())
            .fold(0., |acc, (l, r)| acc + l * r)
    }

    #[inline]
    /// Get squared length of the vector, slightly faster than [len](Self::len).
    pub fn len_sq(&self) -> f32 {
        self.dot_product(self)
    }

    #[inline]
    /// Get length of the vector.
    pub fn len(&self) -> f32 {
        self.len_sq().sqrt()
    }

    #[inline]
    /// Get normalized vector pointing in the same direction.
    ///
    /// A zero vector yields NaN components; callers keep their inputs away from it.
    pub fn normalize(&self) -> Self {
        *self / self.len()
    }
}
