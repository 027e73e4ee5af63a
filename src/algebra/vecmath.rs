use super::{Scalar, VectorMath};
use std::iter::zip;

impl<T: Scalar> VectorMath for [T] {
    type T = T;

    fn dot(&self, y: &[T]) -> T {
        zip(self, y).fold(T::zero(), |acc, (x, y)| acc + x.clone() * y.clone())
    }

    fn dot_sparse(&self, y: &[(usize, T)]) -> T {
        y.iter()
            .fold(T::zero(), |acc, (i, v)| acc + self[*i].clone() * v.clone())
    }

    fn norm_inf(&self) -> T {
        self.iter()
            .fold(T::zero(), |acc, x| acc.max_of(x.abs()))
    }

    fn sumsq(&self) -> T {
        self.iter()
            .fold(T::zero(), |acc, x| acc + x.clone() * x.clone())
    }

    fn scale(&mut self, c: T) -> &mut Self {
        for x in &mut *self {
            *x *= c.clone();
        }
        self
    }

    fn zero_out(&mut self) -> &mut Self {
        for x in &mut *self {
            x.set_zero();
        }
        self
    }

    fn axpy(&mut self, a: T, x: &[T]) -> &mut Self {
        assert_eq!(self.len(), x.len());
        for (y, x) in zip(&mut *self, x) {
            *y += a.clone() * x.clone();
        }
        self
    }

    fn iamax(&self) -> Option<usize> {
        let mut best: Option<(usize, T)> = None;
        for (i, x) in self.iter().enumerate() {
            let ax = x.abs();
            match best {
                Some((_, ref b)) if *b >= ax => {}
                _ => best = Some((i, ax)),
            }
        }
        best.map(|(i, _)| i)
    }
}

#[test]
fn test_vector_math() {
    let x = vec![1., -4., 2.];
    let y = vec![2., 1., 0.5];
    assert_eq!(x.dot(&y), -1.);
    assert_eq!(x.dot_sparse(&[(1, 2.), (2, 1.)]), -6.);
    assert_eq!(x.norm_inf(), 4.);
    assert_eq!(x.sumsq(), 21.);
    assert_eq!(x.iamax(), Some(1));

    let mut z = y.clone();
    z.axpy(2., &x);
    assert_eq!(z, vec![4., -7., 4.5]);
    z.scale(2.).zero_out();
    assert_eq!(z, vec![0.; 3]);
    assert_eq!(Vec::<f64>::new().iamax(), None);
}
