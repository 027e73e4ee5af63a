#![allow(non_snake_case)]

use lpcontrol::io::ConfigurablePrintTarget;
use lpcontrol::params::*;
use lpcontrol::problem::*;
use lpcontrol::solver::Status;

// maximize 0.5x + y over 0 <= x <= 1 binary with x <= 0.5 + y/10 and
// y <= 0.3: the relaxation takes x = 0.53
fn binary_problem() -> Problem {
    let mut P = Problem::new();
    P.print_to_sink();
    P.set_obj_dir(ObjDir::Maximize);
    P.add_rows(1);
    P.add_cols(2);
    P.set_row_bnds(0, Bounds::Upper(0.5)).unwrap();
    P.set_mat_row(0, &[(0, 1.), (1, -0.1)]).unwrap();
    P.set_col_kind(0, VarKind::Binary).unwrap();
    P.set_col_bnds(1, Bounds::Double(0., 0.3)).unwrap();
    P.set_obj_coef(0, 0.5).unwrap();
    P.set_obj_coef(1, 1.).unwrap();
    P
}

// maximize 5x0 + 4x1 + 3x2 + 7x3
// s.t.  2x0 + 3x1 +  x2 + 4x3 <= 7
//        x0 +  x1 +  x2 +  x3 <= 3
//        x0 + x3 <= 1
//       0 <= x <= 3 integer
//
// integer optimum x = (0, 0, 2, 1) with value 13
fn general_problem() -> Problem {
    let mut P = Problem::new();
    P.print_to_sink();
    P.set_obj_dir(ObjDir::Maximize);
    P.add_rows(3);
    P.add_cols(4);
    P.set_mat_row(0, &[(0, 2.), (1, 3.), (2, 1.), (3, 4.)]).unwrap();
    P.set_mat_row(1, &[(0, 1.), (1, 1.), (2, 1.), (3, 1.)]).unwrap();
    P.set_mat_row(2, &[(0, 1.), (3, 1.)]).unwrap();
    P.set_row_bnds(0, Bounds::Upper(7.)).unwrap();
    P.set_row_bnds(1, Bounds::Upper(3.)).unwrap();
    P.set_row_bnds(2, Bounds::Upper(1.)).unwrap();
    for (j, c) in [5., 4., 3., 7.].into_iter().enumerate() {
        P.set_obj_coef(j, c).unwrap();
        P.set_col_bnds(j, Bounds::Double(0., 3.)).unwrap();
        P.set_col_kind(j, VarKind::Integer).unwrap();
    }
    P
}

fn assert_general_optimum(P: &Problem) {
    assert_eq!(P.mip_status(), SolutionStatus::Optimal);
    assert!((P.mip_obj_val() - 13.).abs() < 1e-9);
    let x: Vec<f64> = (0..4).map(|j| P.mip_col_val(j)).collect();
    assert_eq!(x, vec![0., 0., 2., 1.]);
}

#[test]
fn test_binary_column_converges() {
    let mut P = binary_problem();
    assert_eq!(P.simplex(), Status::Ok);
    let relaxed = P.col_prim(0);
    assert!(relaxed > 0.5 && relaxed < 0.6);

    assert_eq!(P.intopt(false), Status::Ok);
    assert_eq!(P.mip_status(), SolutionStatus::Optimal);
    let x = P.mip_col_val(0);
    assert!(x.abs() < 1e-5 || (x - 1.).abs() < 1e-5);
    // x = 0, y = 0.3
    assert!((P.mip_obj_val() - 0.3).abs() < 1e-9);
}

#[test]
fn test_root_relaxation_required() {
    let mut P = binary_problem();
    assert_eq!(P.intopt(false), Status::Fault);
    assert_eq!(P.mip_status(), SolutionStatus::Undefined);
    assert_eq!(P.intopt(true), Status::Ok);
    assert_eq!(P.mip_status(), SolutionStatus::Optimal);
}

#[test]
fn test_general_integers() {
    let mut P = general_problem();
    assert_eq!(P.intopt(true), Status::Ok);
    assert_general_optimum(&P);
    assert!(P.params().it_cnt() > 0);
}

#[test]
fn test_strategies() {
    for branch in 0..4 {
        for btrack in 0..4 {
            let mut P = general_problem();
            P.set_int_param(ParamKey::Branch, branch).unwrap();
            P.set_int_param(ParamKey::BTrack, btrack).unwrap();
            assert_eq!(P.intopt(true), Status::Ok, "branch {} btrack {}", branch, btrack);
            assert_general_optimum(&P);
        }
    }
}

#[test]
fn test_cut_families() {
    for cuts in [CutFlags::GOMORY, CutFlags::MIR, CutFlags::COVER, CutFlags::CLIQUE, CutFlags::ALL] {
        let mut P = general_problem();
        P.set_param(ParamKey::UseCuts, cuts).unwrap();
        assert_eq!(P.intopt(true), Status::Ok, "{:?}", cuts);
        assert_general_optimum(&P);
    }
}

#[test]
fn test_binarize() {
    let mut P = general_problem();
    P.set_int_param(ParamKey::Binarize, 1).unwrap();
    assert_eq!(P.intopt(true), Status::Ok);
    assert_general_optimum(&P);
    assert_eq!(P.num_cols(), 4);
}

#[test]
fn test_no_integer_point() {
    // 2x + 2y = 1 has no integer solution
    let mut P = Problem::new();
    P.print_to_sink();
    P.add_rows(1);
    P.add_cols(2);
    P.set_row_bnds(0, Bounds::Fixed(1.)).unwrap();
    P.set_mat_row(0, &[(0, 2.), (1, 2.)]).unwrap();
    for j in 0..2 {
        P.set_col_bnds(j, Bounds::Double(0., 4.)).unwrap();
        P.set_col_kind(j, VarKind::Integer).unwrap();
    }
    assert_eq!(P.intopt(true), Status::Ok);
    assert_eq!(P.mip_status(), SolutionStatus::NoFeasible);

    // an infeasible relaxation
    P.set_row_bnds(0, Bounds::Fixed(20.)).unwrap();
    assert_eq!(P.intopt(true), Status::NoPrimalFeasible);
}

#[test]
fn test_unbounded_relaxation() {
    let mut P = Problem::new();
    P.print_to_sink();
    P.set_obj_dir(ObjDir::Maximize);
    P.add_rows(1);
    P.add_cols(1);
    P.set_mat_row(0, &[(0, 1.)]).unwrap();
    P.set_row_bnds(0, Bounds::Lower(1.)).unwrap();
    P.set_col_bnds(0, Bounds::Lower(0.)).unwrap();
    P.set_col_kind(0, VarKind::Integer).unwrap();
    P.set_obj_coef(0, 1.).unwrap();
    assert_eq!(P.intopt(true), Status::NoDualFeasible);
}

// maximize 7x  s.t.  6x <= 2,  x in 0..3 integer
#[test]
fn test_gomory_keeps_zero_solution() {
    let mut P = Problem::new();
    P.print_to_sink();
    P.set_obj_dir(ObjDir::Maximize);
    P.add_rows(1);
    P.add_cols(1);
    P.set_mat_row(0, &[(0, 6.)]).unwrap();
    P.set_row_bnds(0, Bounds::Upper(2.)).unwrap();
    P.set_col_bnds(0, Bounds::Double(0., 3.)).unwrap();
    P.set_col_kind(0, VarKind::Integer).unwrap();
    P.set_obj_coef(0, 7.).unwrap();
    P.set_param(ParamKey::UseCuts, CutFlags::GOMORY).unwrap();

    assert_eq!(P.simplex(), Status::Ok);
    assert_eq!(P.intopt(false), Status::Ok);
    assert_eq!(P.mip_status(), SolutionStatus::Optimal);
    assert_eq!(P.mip_col_val(0), 0.);
    assert_eq!(P.mip_obj_val(), 0.);
}

// maximize 9x0 + 7x1  s.t.  5x0 - 2x1 <= 6,  0 <= x0 <= 2,  0 <= x1 <= 1
#[test]
fn test_gomory_keeps_bounded_optimum() {
    let mut P = Problem::new();
    P.print_to_sink();
    P.set_obj_dir(ObjDir::Maximize);
    P.add_rows(1);
    P.add_cols(2);
    P.set_mat_row(0, &[(0, 5.), (1, -2.)]).unwrap();
    P.set_row_bnds(0, Bounds::Upper(6.)).unwrap();
    P.set_col_bnds(0, Bounds::Double(0., 2.)).unwrap();
    P.set_col_bnds(1, Bounds::Double(0., 1.)).unwrap();
    for j in 0..2 {
        P.set_col_kind(j, VarKind::Integer).unwrap();
    }
    P.set_obj_coef(0, 9.).unwrap();
    P.set_obj_coef(1, 7.).unwrap();
    P.set_param(ParamKey::UseCuts, CutFlags::GOMORY).unwrap();

    assert_eq!(P.simplex(), Status::Ok);
    assert_eq!(P.intopt(false), Status::Ok);
    assert_eq!(P.mip_status(), SolutionStatus::Optimal);
    assert!((P.mip_obj_val() - 16.).abs() < 1e-9);
}

// small pseudo random MIPs: maximize c'x over A x <= b, 0 <= x <= u
// integer, with b >= 0 so that x = 0 is always feasible
struct RandomMip {
    rows: Vec<(Vec<f64>, f64)>,
    ub: Vec<i32>,
    cost: Vec<f64>,
}

struct Lcg(u64);

impl Lcg {
    fn next(&mut self, lo: i32, hi: i32) -> i32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let span = (hi - lo + 1) as u64;
        lo + ((self.0 >> 33) % span) as i32
    }
}

impl RandomMip {
    fn new(rng: &mut Lcg) -> Self {
        let m = rng.next(1, 3) as usize;
        let n = rng.next(1, 3) as usize;
        let rows = (0..m)
            .map(|_| {
                let a = (0..n).map(|_| rng.next(-3, 6) as f64).collect();
                (a, rng.next(0, 12) as f64)
            })
            .collect();
        let ub = (0..n).map(|_| rng.next(1, 3)).collect();
        let cost = (0..n).map(|_| rng.next(1, 9) as f64).collect();
        Self { rows, ub, cost }
    }

    fn problem(&self) -> Problem {
        let n = self.cost.len();
        let mut P = Problem::new();
        P.print_to_sink();
        P.set_obj_dir(ObjDir::Maximize);
        P.add_rows(self.rows.len());
        P.add_cols(n);
        for (i, (a, b)) in self.rows.iter().enumerate() {
            let entries: Vec<(usize, f64)> = a.iter().copied().enumerate().filter(|e| e.1 != 0.).collect();
            P.set_mat_row(i, &entries).unwrap();
            P.set_row_bnds(i, Bounds::Upper(*b)).unwrap();
        }
        for j in 0..n {
            P.set_col_bnds(j, Bounds::Double(0., self.ub[j] as f64)).unwrap();
            P.set_col_kind(j, VarKind::Integer).unwrap();
            P.set_obj_coef(j, self.cost[j]).unwrap();
        }
        P
    }

    // best objective over all integer points of the box
    fn enumerate(&self) -> f64 {
        let n = self.cost.len();
        let mut x = vec![0i32; n];
        let mut best = f64::NEG_INFINITY;
        loop {
            let feasible = self.rows.iter().all(|(a, b)| {
                let act: f64 = a.iter().zip(&x).map(|(a, &v)| a * v as f64).sum();
                act <= *b
            });
            if feasible {
                let obj: f64 = self.cost.iter().zip(&x).map(|(c, &v)| c * v as f64).sum();
                best = best.max(obj);
            }
            let mut j = 0;
            while j < n && x[j] == self.ub[j] {
                x[j] = 0;
                j += 1;
            }
            if j == n {
                return best;
            }
            x[j] += 1;
        }
    }
}

#[test]
fn test_cut_families_match_enumeration() {
    let families = [
        CutFlags::NONE,
        CutFlags::COVER,
        CutFlags::CLIQUE,
        CutFlags::GOMORY,
        CutFlags::MIR,
        CutFlags::ALL,
    ];
    let mut rng = Lcg(20240611);
    for case in 0..60 {
        let mip = RandomMip::new(&mut rng);
        let best = mip.enumerate();
        for cuts in families {
            let mut P = mip.problem();
            P.set_param(ParamKey::UseCuts, cuts).unwrap();
            assert_eq!(P.simplex(), Status::Ok);
            assert_eq!(P.intopt(false), Status::Ok, "case {} cuts {:?}", case, cuts);
            assert_eq!(P.mip_status(), SolutionStatus::Optimal, "case {} cuts {:?}", case, cuts);
            assert!(
                (P.mip_obj_val() - best).abs() < 1e-6,
                "case {} cuts {:?}: {} instead of {}",
                case,
                cuts,
                P.mip_obj_val(),
                best
            );
        }
    }
}

// maximize 2x + 2y  s.t.  2x + 2y <= 3,  x, y binary
//
// every vertex of the relaxation optimum is fractional with value 3, so
// when the first incumbent (value 2) is found an unexplored node still
// carries the bound 3 and the gap is 50%
#[test]
fn test_mip_gap_stops_search() {
    let mut P = Problem::new();
    P.print_to_sink();
    P.set_obj_dir(ObjDir::Maximize);
    P.add_rows(1);
    P.add_cols(2);
    P.set_mat_row(0, &[(0, 2.), (1, 2.)]).unwrap();
    P.set_row_bnds(0, Bounds::Upper(3.)).unwrap();
    for j in 0..2 {
        P.set_col_kind(j, VarKind::Binary).unwrap();
        P.set_obj_coef(j, 2.).unwrap();
    }
    P.set_param(ParamKey::BTrack, Backtrack::DepthFirst).unwrap();
    P.set_real_param(ParamKey::MipGap, 0.6).unwrap();

    assert_eq!(P.intopt(true), Status::MipGap);
    assert_eq!(P.mip_status(), SolutionStatus::Feasible);
    assert!((P.mip_obj_val() - 2.).abs() < 1e-9);
}

#[test]
fn test_time_limit() {
    let mut P = general_problem();
    P.set_real_param(ParamKey::TmLim, 0.).unwrap();
    assert_eq!(P.simplex(), Status::TimeLimit);

    let mut P = general_problem();
    P.set_real_param(ParamKey::TmLim, 0.).unwrap();
    assert_eq!(P.intopt(true), Status::TimeLimit);
}
