// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Finds floats JSON cannot carry.
//!
//! `serde_json` writes NaN and the infinities as `null`, which no component
//! reads back. The JSON writer walks a value with [`non_finite_field`] first
//! and refuses it instead.

use std::fmt;

use serde::ser::{self, Serialize};

/// Returns the dotted path of the first NaN or infinite float inside
/// `value`, or `None` if every float is finite.
pub(crate) fn non_finite_field<T: Serialize + ?Sized>(value: &T) -> Option<String> {
    let mut scan = FiniteScan::default();
    match value.serialize(&mut scan) {
        Ok(()) => None,
        Err(_) => scan.found,
    }
}

#[derive(Default)]
struct FiniteScan {
    path: Vec<&'static str>,
    found: Option<String>,
}

impl FiniteScan {
    fn check(&mut self, finite: bool) -> Result<(), Stop> {
        if finite {
            return Ok(());
        }
        self.found = Some(if self.path.is_empty() {
            "<value>".to_owned()
        } else {
            self.path.join(".")
        });
        Err(Stop)
    }

    fn nested<T: Serialize + ?Sized>(
        &mut self,
        segment: &'static str,
        value: &T,
    ) -> Result<(), Stop> {
        self.path.push(segment);
        value.serialize(&mut *self)?;
        self.path.pop();
        Ok(())
    }
}

/// Ends the walk early.
#[derive(Debug)]
struct Stop;

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("non-finite float")
    }
}

impl std::error::Error for Stop {}

impl ser::Error for Stop {
    fn custom<T: fmt::Display>(_msg: T) -> Self {
        Stop
    }
}

impl<'a> ser::Serializer for &'a mut FiniteScan {
    type Ok = ();
    type Error = Stop;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, _v: bool) -> Result<(), Stop> {
        Ok(())
    }
    fn serialize_i8(self, _v: i8) -> Result<(), Stop> {
        Ok(())
    }
    fn serialize_i16(self, _v: i16) -> Result<(), Stop> {
        Ok(())
    }
    fn serialize_i32(self, _v: i32) -> Result<(), Stop> {
        Ok(())
    }
    fn serialize_i64(self, _v: i64) -> Result<(), Stop> {
        Ok(())
    }
    fn serialize_i128(self, _v: i128) -> Result<(), Stop> {
        Ok(())
    }
    fn serialize_u8(self, _v: u8) -> Result<(), Stop> {
        Ok(())
    }
    fn serialize_u16(self, _v: u16) -> Result<(), Stop> {
        Ok(())
    }
    fn serialize_u32(self, _v: u32) -> Result<(), Stop> {
        Ok(())
    }
    fn serialize_u64(self, _v: u64) -> Result<(), Stop> {
        Ok(())
    }
    fn serialize_u128(self, _v: u128) -> Result<(), Stop> {
        Ok(())
    }
    fn serialize_f32(self, v: f32) -> Result<(), Stop> {
        self.check(v.is_finite())
    }
    fn serialize_f64(self, v: f64) -> Result<(), Stop> {
        self.check(v.is_finite())
    }
    fn serialize_char(self, _v: char) -> Result<(), Stop> {
        Ok(())
    }
    fn serialize_str(self, _v: &str) -> Result<(), Stop> {
        Ok(())
    }
    fn serialize_bytes(self, _v: &[u8]) -> Result<(), Stop> {
        Ok(())
    }
    fn serialize_none(self) -> Result<(), Stop> {
        Ok(())
    }
    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), Stop> {
        value.serialize(self)
    }
    fn serialize_unit(self) -> Result<(), Stop> {
        Ok(())
    }
    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), Stop> {
        Ok(())
    }
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> Result<(), Stop> {
        Ok(())
    }
    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), Stop> {
        value.serialize(self)
    }
    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<(), Stop> {
        self.nested(variant, value)
    }
    fn serialize_seq(self, _len: Option<usize>) -> Result<Self, Stop> {
        Ok(self)
    }
    fn serialize_tuple(self, _len: usize) -> Result<Self, Stop> {
        Ok(self)
    }
    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self, Stop> {
        Ok(self)
    }
    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self, Stop> {
        self.path.push(variant);
        Ok(self)
    }
    fn serialize_map(self, _len: Option<usize>) -> Result<Self, Stop> {
        Ok(self)
    }
    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self, Stop> {
        Ok(self)
    }
    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self, Stop> {
        self.path.push(variant);
        Ok(self)
    }
}

impl ser::SerializeSeq for &mut FiniteScan {
    type Ok = ();
    type Error = Stop;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Stop> {
        value.serialize(&mut **self)
    }
    fn end(self) -> Result<(), Stop> {
        Ok(())
    }
}

impl ser::SerializeTuple for &mut FiniteScan {
    type Ok = ();
    type Error = Stop;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Stop> {
        value.serialize(&mut **self)
    }
    fn end(self) -> Result<(), Stop> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for &mut FiniteScan {
    type Ok = ();
    type Error = Stop;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Stop> {
        value.serialize(&mut **self)
    }
    fn end(self) -> Result<(), Stop> {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for &mut FiniteScan {
    type Ok = ();
    type Error = Stop;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Stop> {
        value.serialize(&mut **self)
    }
    fn end(self) -> Result<(), Stop> {
        self.path.pop();
        Ok(())
    }
}

impl ser::SerializeMap for &mut FiniteScan {
    type Ok = ();
    type Error = Stop;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), Stop> {
        key.serialize(&mut **self)
    }
    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Stop> {
        value.serialize(&mut **self)
    }
    fn end(self) -> Result<(), Stop> {
        Ok(())
    }
}

impl ser::SerializeStruct for &mut FiniteScan {
    type Ok = ();
    type Error = Stop;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Stop> {
        self.nested(key, value)
    }
    fn end(self) -> Result<(), Stop> {
        Ok(())
    }
}

impl ser::SerializeStructVariant for &mut FiniteScan {
    type Ok = ();
    type Error = Stop;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Stop> {
        self.nested(key, value)
    }
    fn end(self) -> Result<(), Stop> {
        self.path.pop();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::math::Vec3;

    #[derive(serde::Serialize)]
    enum Shape {
        Ball { radius: f32 },
    }

    #[derive(serde::Serialize)]
    struct Body {
        velocity: Vec3,
        shape: Shape,
        samples: Vec<f64>,
    }

    #[test]
    fn test_finite_values_pass() {
        let body = Body {
            velocity: Vec3::new(1.0, -2.0, 0.0),
            shape: Shape::Ball { radius: 0.5 },
            samples: vec![0.0, f64::MAX],
        };
        assert_eq!(non_finite_field(&body), None);
    }

    #[test]
    fn test_reports_path_of_first_non_finite_float() {
        let body = Body {
            velocity: Vec3::new(f32::INFINITY, 0.0, 0.0),
            shape: Shape::Ball { radius: 0.5 },
            samples: Vec::new(),
        };
        assert_eq!(non_finite_field(&body).as_deref(), Some("velocity.x"));

        let body = Body {
            velocity: Vec3::ZERO,
            shape: Shape::Ball { radius: f32::NAN },
            samples: Vec::new(),
        };
        assert_eq!(non_finite_field(&body).as_deref(), Some("shape.Ball.radius"));

        let body = Body {
            velocity: Vec3::ZERO,
            shape: Shape::Ball { radius: 1.0 },
            samples: vec![1.0, f64::NEG_INFINITY],
        };
        assert_eq!(non_finite_field(&body).as_deref(), Some("samples"));
        assert_eq!(non_finite_field(&f32::NAN).as_deref(), Some("<value>"));
    }
}
