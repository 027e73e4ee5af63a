#![allow(non_snake_case)]
use crate::algebra::{AsScalar, Scalar};
use crate::problem::{nonbasic_stat, Bounds, ObjDir, Problem, VarStat};

/// Working copy of an LP as seen by the simplex engines.
///
/// Variables `0..m` are the auxiliary variables of the rows and `m..m+n`
/// the structural variables.  The constraints read `[I | -A] z = 0`, so
/// the column of auxiliary variable `i` is `e_i` and the column of
/// structural variable `j` is `-a_j`.  Costs are always in minimization
/// sense; they are negated for maximization problems.
#[derive(Debug, Clone)]
pub(crate) struct LpData<T> {
    pub m: usize,
    pub n: usize,
    /// structural columns of `A` as (row, value) pairs
    pub A: Vec<Vec<(usize, T)>>,
    pub lb: Vec<Option<T>>,
    pub ub: Vec<Option<T>>,
    /// costs of all m+n variables, zero for auxiliaries
    pub c: Vec<T>,
    /// constant term of the objective, in the problem's own sense
    pub c0: T,
    pub dir: ObjDir,
}

impl<T> LpData<T>
where
    T: Scalar,
{
    pub fn from_problem(P: &Problem) -> Self {
        let (m, n) = (P.num_rows(), P.num_cols());
        let conv = |v: Option<f64>| -> Option<T> { v.map(|v| v.as_T()) };

        let mut lb: Vec<Option<T>> = Vec::with_capacity(m + n);
        let mut ub: Vec<Option<T>> = Vec::with_capacity(m + n);
        for b in P.rows.iter().map(|r| r.bounds).chain(P.cols.iter().map(|c| c.bounds)) {
            lb.push(conv(b.lower()));
            ub.push(conv(b.upper()));
        }

        let sense = match P.obj_dir() {
            ObjDir::Minimize => 1.0,
            ObjDir::Maximize => -1.0,
        };
        let mut c = vec![T::zero(); m];
        c.extend(P.cols.iter().map(|col| (sense * col.obj).as_T()));

        let A: Vec<Vec<(usize, T)>> = P
            .cols
            .iter()
            .map(|col| col.entries.iter().map(|&(i, v)| (i, v.as_T())).collect())
            .collect();

        Self {
            m,
            n,
            A,
            lb,
            ub,
            c,
            c0: P.obj_const().as_T(),
            dir: P.obj_dir(),
        }
    }

    /// true if some variable has lower bound above upper bound
    pub fn has_empty_bounds(&self) -> bool {
        self.lb
            .iter()
            .zip(&self.ub)
            .any(|(l, u)| matches!((l, u), (Some(l), Some(u)) if l > u))
    }

    /// `y' a_k` for the column `a_k` of variable `k`
    pub fn col_dot(&self, k: usize, y: &[T]) -> T {
        if k < self.m {
            y[k].clone()
        } else {
            self.A[k - self.m]
                .iter()
                .fold(T::zero(), |acc, (i, v)| acc - y[*i].clone() * v.clone())
        }
    }

    /// dense column of variable `k`
    pub fn col_dense(&self, k: usize) -> Vec<T> {
        let mut a = vec![T::zero(); self.m];
        if k < self.m {
            a[k] = T::one();
        } else {
            for (i, v) in &self.A[k - self.m] {
                a[*i] = -v.clone();
            }
        }
        a
    }

    /// dense column-major basis matrix for the basic variables `head`
    pub fn basis_matrix(&self, head: &[usize]) -> Vec<T> {
        let m = self.m;
        let mut B = vec![T::zero(); m * m];
        for (p, &k) in head.iter().enumerate() {
            if k < m {
                B[k + p * m] = T::one();
            } else {
                for (i, v) in &self.A[k - m] {
                    B[*i + p * m] = -v.clone();
                }
            }
        }
        B
    }

    /// value of a nonbasic variable with status `stat`
    pub fn nonbasic_value(&self, k: usize, stat: VarStat) -> T {
        let bound = match stat {
            VarStat::AtLower | VarStat::Fixed => self.lb[k].as_ref().or(self.ub[k].as_ref()),
            VarStat::AtUpper => self.ub[k].as_ref().or(self.lb[k].as_ref()),
            VarStat::Free | VarStat::Basic => None,
        };
        bound.cloned().unwrap_or_else(T::zero)
    }

    /// Nonbasic status consistent with the bounds of variable `k`.
    pub fn nonbasic_stat(&self, k: usize, hint: VarStat) -> VarStat {
        let bounds = Bounds::from_pair(
            self.lb[k].as_ref().map(|v| v.to_f64()),
            self.ub[k].as_ref().map(|v| v.to_f64()),
        );
        match (&self.lb[k], &self.ub[k]) {
            // from_pair compares in f64, which can merge distinct values
            (Some(l), Some(u)) if l != u => match hint {
                VarStat::AtUpper => VarStat::AtUpper,
                _ => VarStat::AtLower,
            },
            _ => nonbasic_stat(&bounds, hint),
        }
    }

    /// Append a row with structural coefficients `entries`.  The new
    /// auxiliary variable gets index `m` (the old value), shifting the
    /// structural variables by one.
    pub fn add_row(&mut self, entries: &[(usize, T)], lb: Option<T>, ub: Option<T>) {
        let i = self.m;
        for (j, a) in entries {
            self.A[*j].push((i, a.clone()));
        }
        self.lb.insert(i, lb);
        self.ub.insert(i, ub);
        self.c.insert(i, T::zero());
        self.m += 1;
    }

    /// Standard basis: all auxiliary variables basic, all structural
    /// variables nonbasic.
    pub fn std_stat(&self) -> Vec<VarStat> {
        let mut stat = vec![VarStat::Basic; self.m];
        stat.extend((self.m..self.m + self.n).map(|k| self.nonbasic_stat(k, VarStat::AtLower)));
        stat
    }

    /// minimization objective `c' z` (without constant term)
    pub fn cost(&self, z: &[T]) -> T {
        self.c
            .iter()
            .zip(z)
            .fold(T::zero(), |acc, (c, z)| acc + c.clone() * z.clone())
    }

    /// objective value in the problem's own sense
    pub fn obj_value(&self, z: &[T]) -> T {
        match self.dir {
            ObjDir::Minimize => self.c0.clone() + self.cost(z),
            ObjDir::Maximize => self.c0.clone() - self.cost(z),
        }
    }
}

/// basis statuses of all rows and columns of a problem
pub(crate) fn problem_stat(P: &Problem) -> Vec<VarStat> {
    P.rows
        .iter()
        .map(|r| r.stat)
        .chain(P.cols.iter().map(|c| c.stat))
        .collect()
}

#[test]
fn test_lp_data() {
    let mut P = Problem::new();
    P.add_rows(1);
    P.add_cols(2);
    P.set_obj_dir(ObjDir::Maximize);
    P.set_obj_coef(0, 2.).unwrap();
    P.set_obj_const(1.);
    P.set_mat_row(0, &[(0, 1.), (1, 3.)]).unwrap();
    P.set_row_bnds(0, Bounds::Upper(4.)).unwrap();
    P.set_col_bnds(1, Bounds::Double(0., 1.)).unwrap();

    let lp = LpData::<f64>::from_problem(&P);
    assert_eq!((lp.m, lp.n), (1, 2));
    assert_eq!(lp.c, vec![0., -2., 0.]);
    assert_eq!(lp.ub[0], Some(4.));
    assert_eq!(lp.lb[0], None);
    assert_eq!(lp.col_dense(2), vec![-3.]);
    assert_eq!(lp.col_dot(2, &[2.]), -6.);
    assert_eq!(lp.basis_matrix(&[1]), vec![-1.]);
    assert_eq!(lp.nonbasic_value(2, VarStat::AtUpper), 1.);
    assert_eq!(lp.nonbasic_stat(2, VarStat::Free), VarStat::AtLower);
    assert_eq!(lp.obj_value(&[0., 1., 0.]), 3.);
    assert!(!lp.has_empty_bounds());
    assert_eq!(lp.std_stat(), vec![VarStat::Basic, VarStat::Free, VarStat::AtLower]);

    let mut lp = lp;
    lp.add_row(&[(1, 1.)], Some(0.), None);
    assert_eq!((lp.m, lp.n), (2, 2));
    assert_eq!(lp.ub[3], Some(1.));
    assert_eq!(lp.col_dense(3), vec![-3., -1.]);
}
