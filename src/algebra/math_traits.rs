/// Vector operations on slices of [`Scalar`](crate::algebra::Scalar)

pub trait VectorMath {
    type T;

    /// Dot product
    fn dot(&self, y: &Self) -> Self::T;

    /// Dot product with a sparse vector given as (index, value) pairs
    fn dot_sparse(&self, y: &[(usize, Self::T)]) -> Self::T;

    /// Infinity norm
    fn norm_inf(&self) -> Self::T;

    /// Sum of squares
    fn sumsq(&self) -> Self::T;

    /// Elementwise scaling.
    fn scale(&mut self, c: Self::T) -> &mut Self;

    /// Set all elements to zero
    fn zero_out(&mut self) -> &mut Self;

    /// BLAS-like shift and scale in place.  Produces `self = a*x+self`
    fn axpy(&mut self, a: Self::T, x: &Self) -> &mut Self;

    /// Index of the element of largest magnitude, if any
    fn iamax(&self) -> Option<usize>;
}
