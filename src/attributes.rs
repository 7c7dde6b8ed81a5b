/*
 * Copyright (c) 2017, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Free-form attributes of nodes and edges.
//!
//! The algorithms of this crate only use the typed fields of
//! [`Node`](crate::graph::Node) and [`Edge`](crate::graph::Edge). Everything
//! else a caller wants to attach to a node or an edge (labels, colors, layout
//! hints for a drawer) is stored in an [`Attributes`] map.
//!
//! # Example
//!
//! ```
//! use netflow::attributes::{Attributes, Value};
//!
//! let mut attrs = Attributes::new();
//! attrs.insert("label".to_string(), Value::from("a"));
//! attrs.insert("width".to_string(), 2.into());
//! assert_eq!(attrs["label"].as_str(), Some("a"));
//! assert_eq!(attrs["width"].as_int(), Some(2));
//! ```

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The value of a single attribute.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

/// A map from attribute names to values.
pub type Attributes = BTreeMap<String, Value>;

impl Value {
    /// Return the integer value or `None` if this is not an integer.
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Value::Int(x) => Some(x),
            _ => None,
        }
    }

    /// Return the value as float.
    ///
    /// Integers are converted.
    pub fn as_float(&self) -> Option<f64> {
        match *self {
            Value::Int(x) => Some(x as f64),
            Value::Float(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(x) => write!(f, "{}", x),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(x: $t) -> Self {
                Value::Int(x as i64)
            }
        })*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32, isize);

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x as f64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}
