//! Problem instance loading.
//!
//! Reads Solomon-format text files (name, `VEHICLE` section with fleet size
//! and capacity, `CUSTOMER` section with one row per location) into an
//! [`Instance`], which converts into a [`CostModel`](crate::models::CostModel)
//! with Euclidean travel costs.

mod err;
mod solomon;

pub use err::{ParseError, ParseErrorKind};
pub use solomon::{load_instance, parse_instance, read_instance, Instance};
