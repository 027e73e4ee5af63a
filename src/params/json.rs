use super::*;
use std::collections::BTreeMap;
use std::io::{self, Read, Write};

// Parameters are written as a flat map from snake-case key name to
// value, e.g. {"msg_lev": 3, "tol_bnd": 1e-7, ...}

type JsonParams = BTreeMap<String, ParamValue>;

impl ControlParams {
    /// Serialize the store to a JSON string.
    pub fn to_json(&self) -> Result<String, io::Error> {
        let values: JsonParams = self
            .iter()
            .map(|(k, v)| (k.name().to_string(), sanitize(v)))
            .collect();
        Ok(serde_json::to_string_pretty(&values)?)
    }

    /// Build a store from a JSON string.  Keys that are absent keep
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, io::Error> {
        let values: JsonParams = serde_json::from_str(json)?;
        let mut params = ControlParams::new();

        for (name, value) in values {
            let key: ParamKey = name.parse().map_err(invalid_data)?;
            let value = match (key.kind(), value) {
                // integral reals are written without a fractional part
                (ParamKind::Real, ParamValue::Int(v)) => ParamValue::Real(v as f64),
                (_, v) => v,
            };
            match key.kind() {
                ParamKind::Counter => match value {
                    ParamValue::Int(v) => params.restore_counter(key, v),
                    ParamValue::Real(_) => {
                        return Err(invalid_data(ParamError::TypeMismatch {
                            key,
                            expected: ParamKind::Counter,
                            found: ParamKind::Real,
                        }))
                    }
                },
                _ => params.set(key, value).map_err(invalid_data)?,
            }
        }
        Ok(params)
    }

    /// Write the store as JSON.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        writer.write_all(self.to_json()?.as_bytes())
    }

    /// Read a store written by [`ControlParams::write_to`].
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        reader.read_to_string(&mut buffer)?;
        Self::from_json(&buffer)
    }
}

fn invalid_data(e: ParamError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

// infinite values can't be serialized
fn sanitize(v: ParamValue) -> ParamValue {
    match v {
        ParamValue::Real(x) if x == f64::INFINITY => ParamValue::Real(f64::MAX),
        ParamValue::Real(x) if x == f64::NEG_INFINITY => ParamValue::Real(-f64::MAX),
        v => v,
    }
}

#[test]
fn test_json_roundtrip() {
    let mut p = ControlParams::new();
    p.set_real(ParamKey::TmLim, 2.5).unwrap();
    p.set(ParamKey::UseCuts, CutFlags::GOMORY | CutFlags::COVER)
        .unwrap();
    p.set_real(ParamKey::ObjUl, f64::INFINITY).unwrap();
    p.add_iterations(42);

    let json = p.to_json().unwrap();
    let q = ControlParams::from_json(&json).unwrap();
    assert_eq!(q.tm_lim(), 2.5);
    assert_eq!(q.use_cuts(), CutFlags::GOMORY | CutFlags::COVER);
    assert_eq!(q.obj_ul(), f64::MAX);
    assert_eq!(q.obj_ll(), -f64::MAX);
    assert_eq!(q.it_cnt(), 42);

    // partial input and integral reals
    let q = ControlParams::from_json(r#"{"tm_lim": 10, "branch": 0}"#).unwrap();
    assert_eq!(q.tm_lim(), 10.0);
    assert_eq!(q.branch(), BranchRule::FirstFractional);
    assert_eq!(q.tol_bnd(), 1e-7);

    assert!(ControlParams::from_json(r#"{"bogus": 1}"#).is_err());
    assert!(ControlParams::from_json(r#"{"branch": 9}"#).is_err());
    assert!(ControlParams::from_json(r#"{"branch": 1.5}"#).is_err());
}
