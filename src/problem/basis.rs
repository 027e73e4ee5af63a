#![allow(non_snake_case)]
use super::*;
use crate::algebra::factor::{FactorMethod, Factorization};
use crate::params::BasisFactorType;

/// Pivot tolerance when factoring a basis matrix
pub(crate) const FACTOR_EPS: f64 = 1e-11;

/// Number of eta updates before a basis is refactored
pub(crate) const REFACTOR_LIMIT: usize = 50;

/// A factored basis: the basic variables in position order and the
/// factorization of the matrix formed by their columns.
#[derive(Debug)]
pub(crate) struct BasisFactor {
    pub head: Vec<usize>,
    pub lu: Factorization<f64>,
}

impl From<BasisFactorType> for FactorMethod {
    fn from(t: BasisFactorType) -> Self {
        match t {
            BasisFactorType::ForrestTomlin => FactorMethod::LuPartial,
            BasisFactorType::BartelsGolub => FactorMethod::LuComplete,
            BasisFactorType::Givens => FactorMethod::Givens,
        }
    }
}

/// Status of a nonbasic variable with the given bounds.  `hint` selects
/// the bound of a double bounded variable.
pub(crate) fn nonbasic_stat(bounds: &Bounds, hint: VarStat) -> VarStat {
    match bounds {
        Bounds::Free => VarStat::Free,
        Bounds::Lower(_) => VarStat::AtLower,
        Bounds::Upper(_) => VarStat::AtUpper,
        Bounds::Fixed(_) => VarStat::Fixed,
        Bounds::Double(..) => match hint {
            VarStat::AtUpper => VarStat::AtUpper,
            _ => VarStat::AtLower,
        },
    }
}

impl Problem {
    pub fn row_stat(&self, i: usize) -> VarStat {
        self.rows[i].stat
    }

    pub fn col_stat(&self, j: usize) -> VarStat {
        self.cols[j].stat
    }

    /// Set the basis status of row `i`.  Nonbasic statuses are adjusted
    /// to the row bounds.
    pub fn set_row_stat(&mut self, i: usize, stat: VarStat) -> Result<(), ProblemError> {
        let row = self.rows.get_mut(i).ok_or(ProblemError::BadRow(i))?;
        row.stat = match stat {
            VarStat::Basic => stat,
            _ => nonbasic_stat(&row.bounds, stat),
        };
        self.factor = None;
        Ok(())
    }

    /// Set the basis status of column `j`.  Nonbasic statuses are
    /// adjusted to the column bounds.
    pub fn set_col_stat(&mut self, j: usize, stat: VarStat) -> Result<(), ProblemError> {
        let col = self.cols.get_mut(j).ok_or(ProblemError::BadCol(j))?;
        col.stat = match stat {
            VarStat::Basic => stat,
            _ => nonbasic_stat(&col.bounds, stat),
        };
        self.factor = None;
        Ok(())
    }

    /// Install the standard basis: all auxiliary variables basic, all
    /// columns nonbasic.
    pub fn std_basis(&mut self) {
        for row in self.rows.iter_mut() {
            row.stat = VarStat::Basic;
        }
        for col in self.cols.iter_mut() {
            col.stat = nonbasic_stat(&col.bounds, VarStat::AtLower);
        }
        self.factor = None;
    }

    /// true if a factorization of the current basis is cached
    pub fn bf_exists(&self) -> bool {
        self.factor.is_some()
    }

    /// Factor the current basis matrix and cache the result.
    pub fn factorize(&mut self) -> Result<(), ProblemError> {
        self.factor = None;
        let head = self.basis_head()?;
        let B = self.basis_matrix(&head);
        let method = self.params.bf_type().into();
        let lu = Factorization::new(&B, head.len(), method, REFACTOR_LIMIT, FACTOR_EPS)?;
        self.factor = Some(BasisFactor { head, lu });
        Ok(())
    }

    pub(crate) fn var_stat(&self, k: usize) -> VarStat {
        let m = self.rows.len();
        if k < m {
            self.rows[k].stat
        } else {
            self.cols[k - m].stat
        }
    }

    /// the basic variables in index order
    pub(crate) fn basis_head(&self) -> Result<Vec<usize>, ProblemError> {
        let m = self.rows.len();
        let head: Vec<usize> = (0..m + self.cols.len())
            .filter(|&k| self.var_stat(k).is_basic())
            .collect();
        if head.len() != m {
            return Err(ProblemError::BadBasis {
                basic: head.len(),
                rows: m,
            });
        }
        Ok(head)
    }

    /// Dense column-major basis matrix.  The column of auxiliary
    /// variable `i` is the unit vector `e_i`, the column of structural
    /// variable `j` is the negated matrix column `-a_j`.
    pub(crate) fn basis_matrix(&self, head: &[usize]) -> Vec<f64> {
        let m = self.rows.len();
        let mut B = vec![0.0; m * m];
        for (p, &k) in head.iter().enumerate() {
            if k < m {
                B[k + p * m] = 1.0;
            } else {
                for &(i, v) in &self.cols[k - m].entries {
                    B[i + p * m] = -v;
                }
            }
        }
        B
    }
}

#[test]
fn test_factorize_basis() {
    let mut P = Problem::new();
    P.add_rows(2);
    P.add_cols(2);
    P.set_mat_row(0, &[(0, 1.), (1, 1.)]).unwrap();
    P.set_mat_row(1, &[(0, 1.), (1, -1.)]).unwrap();
    P.set_col_bnds(0, Bounds::Lower(0.)).unwrap();
    P.set_col_bnds(1, Bounds::Lower(0.)).unwrap();
    assert!(!P.bf_exists());

    P.factorize().unwrap();
    assert!(P.bf_exists());

    // two basic columns and no basic rows
    P.set_col_stat(0, VarStat::Basic).unwrap();
    P.set_col_stat(1, VarStat::Basic).unwrap();
    assert!(!P.bf_exists());
    assert!(matches!(P.factorize(), Err(ProblemError::BadBasis { .. })));

    P.set_row_stat(0, VarStat::AtLower).unwrap();
    P.set_row_stat(1, VarStat::AtLower).unwrap();
    assert_eq!(P.row_stat(0), VarStat::Free);
    P.factorize().unwrap();
    assert_eq!(P.factor.as_ref().unwrap().head, vec![2, 3]);

    // a singular basis
    P.set_mat_row(1, &[(0, 1.), (1, 1.)]).unwrap();
    assert!(matches!(P.factorize(), Err(ProblemError::Factor(_))));
    assert!(!P.bf_exists());
}
