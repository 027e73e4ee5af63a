use super::*;

/// The control parameters of one problem instance.
///
/// A store is always fully initialized: [`ControlParams::new`] installs the
/// default of every key, and every later write is validated against the
/// kind and domain of its key.  The iteration counter `it_cnt` is only
/// advanced by the solvers.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlParams {
    slots: [ParamValue; NUM_PARAMS],
}

impl Default for ControlParams {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlParams {
    /// creates a store holding the default value of every key
    pub fn new() -> Self {
        let slots = ParamKey::ALL.map(|k| k.default_value());
        Self { slots }
    }

    /// Reinstall all defaults.  The iteration counter is kept.
    pub fn reset(&mut self) {
        let it_cnt = self.slots[ParamKey::ItCnt.index()];
        *self = Self::new();
        self.slots[ParamKey::ItCnt.index()] = it_cnt;
    }

    /// current value of a parameter
    pub fn get(&self, key: ParamKey) -> ParamValue {
        self.slots[key.index()]
    }

    /// Read an integer (or counter) parameter.
    pub fn get_int(&self, key: ParamKey) -> Result<i32, ParamError> {
        match self.get(key) {
            ParamValue::Int(v) => Ok(v),
            ParamValue::Real(_) => Err(ParamError::TypeMismatch {
                key,
                expected: ParamKind::Real,
                found: ParamKind::Int,
            }),
        }
    }

    /// Read a real parameter.
    pub fn get_real(&self, key: ParamKey) -> Result<f64, ParamError> {
        match self.get(key) {
            ParamValue::Real(v) => Ok(v),
            ParamValue::Int(_) => Err(ParamError::TypeMismatch {
                key,
                expected: key.kind(),
                found: ParamKind::Real,
            }),
        }
    }

    /// Write a parameter.  This is the single point where keys, kinds
    /// and domains are checked.
    pub fn set(&mut self, key: ParamKey, value: impl Into<ParamValue>) -> Result<(), ParamError> {
        let value = value.into();
        let spec = table::spec(key);

        if spec.kind == ParamKind::Counter {
            return Err(ParamError::ReadOnly(key));
        }
        if spec.kind != value.kind() {
            return Err(ParamError::TypeMismatch {
                key,
                expected: spec.kind,
                found: value.kind(),
            });
        }
        if !spec.domain.admits(&value) {
            return Err(ParamError::InvalidValue { key, value });
        }
        self.slots[key.index()] = value;
        Ok(())
    }

    /// Write an integer parameter.
    pub fn set_int(&mut self, key: ParamKey, value: i32) -> Result<(), ParamError> {
        self.set(key, ParamValue::Int(value))
    }

    /// Write a real parameter.
    pub fn set_real(&mut self, key: ParamKey, value: f64) -> Result<(), ParamError> {
        self.set(key, ParamValue::Real(value))
    }

    /// Iterate over all (key, value) pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (ParamKey, ParamValue)> + '_ {
        ParamKey::ALL.iter().map(move |&k| (k, self.get(k)))
    }

    pub(crate) fn add_iterations(&mut self, count: usize) {
        let slot = &mut self.slots[ParamKey::ItCnt.index()];
        if let ParamValue::Int(v) = slot {
            let count = i32::try_from(count).unwrap_or(i32::MAX);
            *v = v.saturating_add(count);
        }
    }

    // writes a counter without the read-only check
    pub(crate) fn restore_counter(&mut self, key: ParamKey, value: i32) {
        debug_assert_eq!(key.kind(), ParamKind::Counter);
        self.slots[key.index()] = ParamValue::Int(value.max(0));
    }

    // ---------------------------------------------------
    // typed getters used by the solver adapters.  Values
    // always lie in their domain, so a failed conversion
    // here means the slot table itself is inconsistent.
    // ---------------------------------------------------

    fn int(&self, key: ParamKey) -> i32 {
        match self.get(key) {
            ParamValue::Int(v) => v,
            other => panic!("parameter table corrupted: {} holds {:?}", key, other),
        }
    }

    fn real(&self, key: ParamKey) -> f64 {
        match self.get(key) {
            ParamValue::Real(v) => v,
            other => panic!("parameter table corrupted: {} holds {:?}", key, other),
        }
    }

    fn typed<E>(&self, key: ParamKey, f: fn(i32) -> Option<E>) -> E {
        let code = self.int(key);
        f(code).unwrap_or_else(|| panic!("parameter table corrupted: {} = {}", key, code))
    }

    pub fn msg_lev(&self) -> MsgLevel {
        self.typed(ParamKey::MsgLev, MsgLevel::from_code)
    }
    pub fn scale(&self) -> ScaleMode {
        self.typed(ParamKey::Scale, ScaleMode::from_code)
    }
    pub fn method(&self) -> SimplexMethod {
        self.typed(ParamKey::Dual, SimplexMethod::from_code)
    }
    pub fn pricing(&self) -> Pricing {
        self.typed(ParamKey::Price, Pricing::from_code)
    }
    pub fn branch(&self) -> BranchRule {
        self.typed(ParamKey::Branch, BranchRule::from_code)
    }
    pub fn btrack(&self) -> Backtrack {
        self.typed(ParamKey::BTrack, Backtrack::from_code)
    }
    pub fn bf_type(&self) -> BasisFactorType {
        self.typed(ParamKey::BfType, BasisFactorType::from_code)
    }
    pub fn use_cuts(&self) -> CutFlags {
        self.typed(ParamKey::UseCuts, CutFlags::from_bits)
    }
    pub fn relax(&self) -> f64 {
        self.real(ParamKey::Relax)
    }
    pub fn tol_bnd(&self) -> f64 {
        self.real(ParamKey::TolBnd)
    }
    pub fn tol_dj(&self) -> f64 {
        self.real(ParamKey::TolDj)
    }
    pub fn tol_piv(&self) -> f64 {
        self.real(ParamKey::TolPiv)
    }
    pub fn tol_int(&self) -> f64 {
        self.real(ParamKey::TolInt)
    }
    pub fn tol_obj(&self) -> f64 {
        self.real(ParamKey::TolObj)
    }
    pub fn round(&self) -> bool {
        self.int(ParamKey::Round) != 0
    }
    pub fn obj_ll(&self) -> f64 {
        self.real(ParamKey::ObjLl)
    }
    pub fn obj_ul(&self) -> f64 {
        self.real(ParamKey::ObjUl)
    }
    pub fn it_lim(&self) -> i32 {
        self.int(ParamKey::ItLim)
    }
    pub fn it_cnt(&self) -> i32 {
        self.int(ParamKey::ItCnt)
    }
    pub fn tm_lim(&self) -> f64 {
        self.real(ParamKey::TmLim)
    }
    pub fn out_frq(&self) -> i32 {
        self.int(ParamKey::OutFrq)
    }
    pub fn out_dly(&self) -> f64 {
        self.real(ParamKey::OutDly)
    }
    pub fn presolve(&self) -> bool {
        self.int(ParamKey::Presol) != 0
    }
    pub fn binarize(&self) -> bool {
        self.int(ParamKey::Binarize) != 0
    }
    pub fn mip_gap(&self) -> f64 {
        self.real(ParamKey::MipGap)
    }
}

#[test]
fn test_store_defaults() {
    let p = ControlParams::new();
    assert_eq!(p.msg_lev(), MsgLevel::All);
    assert_eq!(p.scale(), ScaleMode::Equilibration);
    assert_eq!(p.method(), SimplexMethod::Primal);
    assert_eq!(p.pricing(), Pricing::SteepestEdge);
    assert_eq!(p.branch(), BranchRule::DriebeckTomlin);
    assert_eq!(p.btrack(), Backtrack::BestLocalBound);
    assert_eq!(p.bf_type(), BasisFactorType::ForrestTomlin);
    assert!(p.use_cuts().is_empty());
    assert_eq!(p.obj_ll(), -f64::MAX);
    assert_eq!(p.it_lim(), -1);
    assert_eq!(p.out_frq(), 200);
}

#[test]
fn test_store_set_validation() {
    let mut p = ControlParams::new();

    p.set(ParamKey::Branch, BranchRule::MostFractional).unwrap();
    assert_eq!(p.branch(), BranchRule::MostFractional);

    assert_eq!(
        p.set_int(ParamKey::Branch, 4),
        Err(ParamError::InvalidValue {
            key: ParamKey::Branch,
            value: ParamValue::Int(4)
        })
    );
    assert_eq!(
        p.set_real(ParamKey::Branch, 1.0),
        Err(ParamError::TypeMismatch {
            key: ParamKey::Branch,
            expected: ParamKind::Int,
            found: ParamKind::Real
        })
    );
    assert!(matches!(
        p.set_int(ParamKey::TolBnd, 1),
        Err(ParamError::TypeMismatch { .. })
    ));
    assert!(matches!(
        p.get_real(ParamKey::OutFrq),
        Err(ParamError::TypeMismatch { .. })
    ));
    assert!(matches!(
        p.set_real(ParamKey::TolBnd, f64::NAN),
        Err(ParamError::InvalidValue { .. })
    ));
    assert!(p.set_real(ParamKey::TolBnd, -1e-7).is_err());
    p.set_real(ParamKey::TmLim, -5.0).unwrap();
    assert_eq!(p.set_int(ParamKey::ItCnt, 5), Err(ParamError::ReadOnly(ParamKey::ItCnt)));
    assert!(p.set_int(ParamKey::OutFrq, 0).is_err());

    // failed writes leave the slot untouched
    assert_eq!(p.branch(), BranchRule::MostFractional);
}

#[test]
fn test_store_reset_keeps_counter() {
    let mut p = ControlParams::new();
    p.add_iterations(17);
    p.set_real(ParamKey::TolBnd, 1e-5).unwrap();
    p.reset();
    assert_eq!(p.tol_bnd(), 1e-7);
    assert_eq!(p.it_cnt(), 17);

    p.add_iterations(usize::MAX);
    assert_eq!(p.it_cnt(), i32::MAX);
}
