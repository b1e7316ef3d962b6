//! Enumerations, encoded by case name.

use indexmap::IndexMap;

use super::{str_field, wire_field, wire_str};
use crate::error::AdapterError;
use crate::graph::Object;
use crate::value::Value;
use crate::wire::{WireMap, WireValue};

/// Scalar backing value of an enumeration case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backing {
    Int(i64),
    Str(String),
}

impl From<i64> for Backing {
    fn from(n: i64) -> Self {
        Backing::Int(n)
    }
}

impl From<&str> for Backing {
    fn from(s: &str) -> Self {
        Backing::Str(s.to_string())
    }
}

impl Backing {
    fn to_value(&self) -> Value {
        match self {
            Backing::Int(n) => Value::Int(*n),
            Backing::Str(s) => Value::from(s.as_str()),
        }
    }

    fn to_wire(&self) -> WireValue {
        match self {
            Backing::Int(n) => WireValue::Int(*n),
            Backing::Str(s) => WireValue::str(s.as_str()),
        }
    }
}

/// An enumeration type: its name and cases in declaration order.
///
/// Instances are objects holding the case `name` and, for backed cases,
/// its `value`. Decoding resolves the case by name, so backing values
/// always come from the definition.
#[derive(Debug, Clone)]
pub struct EnumDef {
    name: String,
    cases: IndexMap<String, Option<Backing>>,
}

impl EnumDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: IndexMap::new(),
        }
    }

    pub fn case(mut self, name: impl Into<String>) -> Self {
        self.cases.insert(name.into(), None);
        self
    }

    pub fn backed_case(mut self, name: impl Into<String>, backing: impl Into<Backing>) -> Self {
        self.cases.insert(name.into(), Some(backing.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cases(&self) -> impl Iterator<Item = &str> {
        self.cases.keys().map(String::as_str)
    }

    fn lookup(&self, case: &str) -> Result<Option<&Backing>, AdapterError> {
        self.cases
            .get(case)
            .map(Option::as_ref)
            .ok_or_else(|| AdapterError::UnknownCase {
                enum_name: self.name.clone(),
                case: case.to_string(),
            })
    }

    /// An object for `case`.
    pub fn instance(&self, case: &str) -> Result<Object, AdapterError> {
        let mut object = Object::new(self.name.as_str()).with_field("name", case);
        if let Some(backing) = self.lookup(case)? {
            object.set("value", backing.to_value());
        }
        Ok(object)
    }

    pub(super) fn encode(&self, object: &Object) -> Result<WireMap, AdapterError> {
        let case = str_field(object, "name")?;
        let mut fields = WireMap::new();
        fields.insert("name".into(), WireValue::str(case));
        if let Some(backing) = self.lookup(case)? {
            fields.insert("value".into(), backing.to_wire());
        }
        Ok(fields)
    }

    pub(super) fn decode(&self, fields: &WireMap) -> Result<Object, AdapterError> {
        let case = wire_str(fields, "name")?;
        let object = self.instance(case)?;
        if let (Ok(found), Some(backing)) = (wire_field(fields, "value"), self.lookup(case)?) {
            if *found != backing.to_wire() {
                return Err(AdapterError::invalid_field(
                    "value",
                    format!("does not match the backing of case `{case}`"),
                ));
            }
        }
        Ok(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suit() -> EnumDef {
        EnumDef::new("Suit")
            .backed_case("Hearts", "H")
            .backed_case("Spades", "S")
    }

    #[test]
    fn instance_carries_backing_value() {
        let object = suit().instance("Spades").unwrap();
        assert_eq!(object.type_name, "Suit");
        assert_eq!(object.get("name"), Some(&Value::from("Spades")));
        assert_eq!(object.get("value"), Some(&Value::from("S")));
    }

    #[test]
    fn pure_case_has_no_value() {
        let def = EnumDef::new("Status").case("Active");
        let fields = def.encode(&def.instance("Active").unwrap()).unwrap();
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn unknown_case_is_reported() {
        assert_eq!(
            suit().instance("Clubs").unwrap_err(),
            AdapterError::UnknownCase {
                enum_name: "Suit".into(),
                case: "Clubs".into(),
            }
        );
    }

    #[test]
    fn decode_takes_backing_from_definition() {
        let mut fields = WireMap::new();
        fields.insert("name".into(), WireValue::str("Hearts"));
        let object = suit().decode(&fields).unwrap();
        assert_eq!(object.get("value"), Some(&Value::from("H")));
    }

    #[test]
    fn decode_rejects_conflicting_backing() {
        let mut fields = WireMap::new();
        fields.insert("name".into(), WireValue::str("Hearts"));
        fields.insert("value".into(), WireValue::str("S"));
        assert!(matches!(
            suit().decode(&fields),
            Err(AdapterError::InvalidField { .. })
        ));
    }
}
