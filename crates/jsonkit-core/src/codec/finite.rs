//! Non-finite float check.
//!
//! serde_json writes `NaN` and infinities as `null`, which loses the value
//! without telling anyone. Before encoding, the codec walks the value once
//! with [`FiniteCheck`], a serializer that produces nothing and fails on the
//! first non-finite `f32`/`f64` it sees.

use std::fmt;

use serde::ser::{self, Serialize, Serializer};

#[derive(Debug)]
pub(crate) enum FiniteError {
    NonFinite(f64),
    /// A `Serialize` impl failed on its own. The serde_json pass reports it
    /// again with its own error type.
    Custom(String),
}

impl fmt::Display for FiniteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FiniteError::NonFinite(v) => write!(f, "non-finite float {v}"),
            FiniteError::Custom(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for FiniteError {}

impl ser::Error for FiniteError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        FiniteError::Custom(msg.to_string())
    }
}

pub(crate) fn check<T: Serialize + ?Sized>(value: &T) -> Result<(), FiniteError> {
    value.serialize(&mut FiniteCheck)
}

pub(crate) struct FiniteCheck;

macro_rules! accept {
    ($($method:ident: $ty:ty),* $(,)?) => {
        $(
            fn $method(self, _v: $ty) -> Result<(), FiniteError> {
                Ok(())
            }
        )*
    };
}

impl<'a> Serializer for &'a mut FiniteCheck {
    type Ok = ();
    type Error = FiniteError;

    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    accept!(
        serialize_bool: bool,
        serialize_i8: i8,
        serialize_i16: i16,
        serialize_i32: i32,
        serialize_i64: i64,
        serialize_i128: i128,
        serialize_u8: u8,
        serialize_u16: u16,
        serialize_u32: u32,
        serialize_u64: u64,
        serialize_u128: u128,
        serialize_char: char,
        serialize_str: &str,
        serialize_bytes: &[u8],
        serialize_unit_struct: &'static str,
    );

    fn serialize_f32(self, v: f32) -> Result<(), FiniteError> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<(), FiniteError> {
        if v.is_finite() {
            Ok(())
        } else {
            Err(FiniteError::NonFinite(v))
        }
    }

    fn serialize_none(self) -> Result<(), FiniteError> {
        Ok(())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<(), FiniteError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), FiniteError> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<(), FiniteError> {
        Ok(())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), FiniteError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<(), FiniteError> {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self, FiniteError> {
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self, FiniteError> {
        Ok(self)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self, FiniteError> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, FiniteError> {
        Ok(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self, FiniteError> {
        Ok(self)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self, FiniteError> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, FiniteError> {
        Ok(self)
    }
}

impl<'a> ser::SerializeSeq for &'a mut FiniteCheck {
    type Ok = ();
    type Error = FiniteError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), FiniteError> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), FiniteError> {
        Ok(())
    }
}

impl<'a> ser::SerializeTuple for &'a mut FiniteCheck {
    type Ok = ();
    type Error = FiniteError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), FiniteError> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), FiniteError> {
        Ok(())
    }
}

impl<'a> ser::SerializeTupleStruct for &'a mut FiniteCheck {
    type Ok = ();
    type Error = FiniteError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), FiniteError> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), FiniteError> {
        Ok(())
    }
}

impl<'a> ser::SerializeTupleVariant for &'a mut FiniteCheck {
    type Ok = ();
    type Error = FiniteError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), FiniteError> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), FiniteError> {
        Ok(())
    }
}

impl<'a> ser::SerializeMap for &'a mut FiniteCheck {
    type Ok = ();
    type Error = FiniteError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), FiniteError> {
        key.serialize(&mut **self)
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), FiniteError> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), FiniteError> {
        Ok(())
    }
}

impl<'a> ser::SerializeStruct for &'a mut FiniteCheck {
    type Ok = ();
    type Error = FiniteError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> Result<(), FiniteError> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), FiniteError> {
        Ok(())
    }
}

impl<'a> ser::SerializeStructVariant for &'a mut FiniteCheck {
    type Ok = ();
    type Error = FiniteError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> Result<(), FiniteError> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<(), FiniteError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Reading {
        sensor: String,
        value: f64,
        history: Vec<f32>,
        calibration: Option<f64>,
    }

    fn reading(value: f64) -> Reading {
        Reading {
            sensor: "t1".to_string(),
            value,
            history: vec![1.0, 2.5],
            calibration: None,
        }
    }

    #[test]
    fn finite_values_pass() {
        assert!(check(&reading(21.5)).is_ok());
        assert!(check(&vec![i128::MAX]).is_ok());
    }

    #[rstest]
    #[case::nan(f64::NAN)]
    #[case::inf(f64::INFINITY)]
    #[case::neg_inf(f64::NEG_INFINITY)]
    fn non_finite_field_is_rejected(#[case] value: f64) {
        assert!(matches!(check(&reading(value)), Err(FiniteError::NonFinite(_))));
    }

    #[test]
    fn nested_values_are_checked() {
        let mut r = reading(1.0);
        r.history.push(f32::INFINITY);
        assert!(matches!(check(&r), Err(FiniteError::NonFinite(v)) if v.is_infinite()));

        let mut r = reading(1.0);
        r.calibration = Some(f64::NAN);
        assert!(matches!(check(&r), Err(FiniteError::NonFinite(v)) if v.is_nan()));

        let mut map = BTreeMap::new();
        map.insert("a", vec![Some(0.0), Some(f64::NAN)]);
        assert!(check(&map).is_err());
    }

    #[test]
    fn custom_failure_is_reported_as_custom() {
        struct Broken;

        impl Serialize for Broken {
            fn serialize<S: Serializer>(&self, _s: S) -> Result<S::Ok, S::Error> {
                Err(ser::Error::custom("broken value"))
            }
        }

        match check(&Broken) {
            Err(FiniteError::Custom(msg)) => assert_eq!(msg, "broken value"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
