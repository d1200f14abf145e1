//! Solomon-format instance reader.
//!
//! ```text
//! C108_shortened_x10
//!
//! VEHICLE
//! NUMBER     CAPACITY
//! 3         20
//!
//! CUSTOMER
//! CUST NO.  XCOORD.  YCOORD.  DEMAND  READY TIME  DUE DATE  SERVICE TIME
//!     0     40       50       0       0           1236      0
//!     1     45       68       10      830         1049      90
//! ```
//!
//! Blank lines and column header lines (lines starting with a letter) are
//! skipped. Customer rows must be numbered from 0; row 0 is the depot.

use std::fs;
use std::io::Read;
use std::iter::Peekable;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use serde::Serialize;
use tracing::debug;

use crate::models::{CostModel, CostModelError, Customer, TimeWindow};

use super::err::{ParseError, ParseErrorKind};

const VEHICLE: &str = "VEHICLE";
const CUSTOMER: &str = "CUSTOMER";

/// A parsed problem instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instance {
    name: String,
    customers: Vec<Customer>,
    vehicle_count: usize,
    capacity: u32,
}

impl Instance {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All locations, depot first.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Number of customers excluding the depot.
    pub fn num_customers(&self) -> usize {
        self.customers.len().saturating_sub(1)
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicle_count
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builds a cost model with Euclidean travel costs.
    pub fn cost_model(&self) -> Result<CostModel, CostModelError> {
        CostModel::euclidean(self.customers.clone(), self.vehicle_count, self.capacity)
    }

    /// Like [`cost_model`](Self::cost_model), consuming the instance.
    pub fn into_cost_model(self) -> Result<CostModel, CostModelError> {
        CostModel::euclidean(self.customers, self.vehicle_count, self.capacity)
    }
}

/// Parses an instance from its text.
///
/// The first non-blank line names the instance unless it is already the
/// `VEHICLE` header, in which case the name is empty.
///
/// # Examples
///
/// ```
/// use gls_routing::instance::parse_instance;
///
/// let text = "tiny\n\nVEHICLE\nNUMBER CAPACITY\n2 10\n\nCUSTOMER\n\
///             CUST NO. XCOORD. YCOORD. DEMAND READY TIME DUE DATE SERVICE TIME\n\
///             0 0 0 0 0 100 0\n1 3 4 5 0 100 1\n";
/// let instance = parse_instance(text).unwrap();
/// assert_eq!(instance.name(), "tiny");
/// assert_eq!(instance.num_customers(), 1);
/// assert_eq!(instance.capacity(), 10);
/// ```
pub fn parse_instance(text: &str) -> Result<Instance, ParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .peekable();

    let name = match lines.peek() {
        Some(&(_, first)) if !is_section(first) => {
            lines.next();
            first.to_string()
        }
        _ => String::new(),
    };

    seek_section(&mut lines, VEHICLE)?;
    let (line, row) =
        next_data_row(&mut lines).ok_or(ParseError::new(0, ParseErrorKind::MissingSection(VEHICLE)))?;
    let mut fields = row.split_whitespace();
    let vehicle_count: usize = parse_field(&mut fields, "vehicle number", line)?;
    let capacity: u32 = parse_field(&mut fields, "capacity", line)?;

    seek_section(&mut lines, CUSTOMER)?;
    let mut customers = Vec::new();
    while let Some((line, row)) = next_data_row(&mut lines) {
        customers.push(parse_customer(row, line, customers.len())?);
    }
    if customers.is_empty() {
        return Err(ParseError::new(0, ParseErrorKind::NoCustomers));
    }

    debug!(
        name = %name,
        customers = customers.len() - 1,
        vehicles = vehicle_count,
        capacity,
        "instance parsed"
    );

    Ok(Instance {
        name,
        customers,
        vehicle_count,
        capacity,
    })
}

/// Reads and parses an instance from `reader`.
pub fn read_instance<R: Read>(mut reader: R) -> Result<Instance, ParseError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_instance(&text)
}

/// Loads an instance file. An unnamed instance takes the file stem as name.
pub fn load_instance(path: impl AsRef<Path>) -> Result<Instance, ParseError> {
    let path = path.as_ref();
    let instance = parse_instance(&fs::read_to_string(path)?)?;
    if !instance.name.is_empty() {
        return Ok(instance);
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(instance.with_name(stem))
}

fn is_section(line: &str) -> bool {
    line.eq_ignore_ascii_case(VEHICLE) || line.eq_ignore_ascii_case(CUSTOMER)
}

fn seek_section<'a, I>(lines: &mut Peekable<I>, section: &'static str) -> Result<(), ParseError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    for (_, line) in lines.by_ref() {
        if line.eq_ignore_ascii_case(section) {
            return Ok(());
        }
    }
    Err(ParseError::new(0, ParseErrorKind::MissingSection(section)))
}

/// Next line holding numbers, skipping column headers. Stops before the next
/// section keyword.
fn next_data_row<'a, I>(lines: &mut Peekable<I>) -> Option<(usize, &'a str)>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    while let Some(&(no, line)) = lines.peek() {
        if is_section(line) {
            return None;
        }
        lines.next();
        if !line.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Some((no, line));
        }
    }
    None
}

fn parse_field<T: FromStr>(
    fields: &mut SplitWhitespace<'_>,
    field: &'static str,
    line: usize,
) -> Result<T, ParseError> {
    let token = fields
        .next()
        .ok_or(ParseError::new(line, ParseErrorKind::MissingField(field)))?;
    token.parse().map_err(|_| {
        ParseError::new(
            line,
            ParseErrorKind::InvalidNumber {
                field,
                token: token.to_string(),
            },
        )
    })
}

fn parse_customer(row: &str, line: usize, expected: usize) -> Result<Customer, ParseError> {
    let mut fields = row.split_whitespace();
    let id: usize = parse_field(&mut fields, "customer number", line)?;
    if id != expected {
        return Err(ParseError::new(
            line,
            ParseErrorKind::NonContiguousId {
                expected,
                found: id,
            },
        ));
    }
    let x: f64 = parse_field(&mut fields, "x coordinate", line)?;
    let y: f64 = parse_field(&mut fields, "y coordinate", line)?;
    let raw_demand: i64 = parse_field(&mut fields, "demand", line)?;
    let ready: f64 = parse_field(&mut fields, "ready time", line)?;
    let due: f64 = parse_field(&mut fields, "due date", line)?;
    let service: f64 = parse_field(&mut fields, "service time", line)?;

    if raw_demand < 0 {
        return Err(ParseError::new(
            line,
            ParseErrorKind::NegativeDemand { customer: id },
        ));
    }
    let demand = u32::try_from(raw_demand).map_err(|_| {
        ParseError::new(
            line,
            ParseErrorKind::InvalidNumber {
                field: "demand",
                token: raw_demand.to_string(),
            },
        )
    })?;
    let tw = TimeWindow::new(ready, due).ok_or(ParseError::new(
        line,
        ParseErrorKind::InvalidTimeWindow {
            customer: id,
            ready,
            due,
        },
    ))?;

    let customer = if id == 0 {
        Customer::depot(x, y)
    } else {
        Customer::new(id, x, y, demand, service)
    };
    Ok(customer.with_time_window(tw))
}

#[cfg(test)]
mod tests {
    use super::*;

    const C108_SHORT: &str = r#"
C108_shortened_x10

VEHICLE
NUMBER     CAPACITY
3         20

CUSTOMER
CUST NO.   XCOORD.   YCOORD.   DEMAND    READY TIME   DUE DATE   SERVICE TIME

    0      40         50          0          0       1236          0
    1      45         68         10        830       1049         90
    2      45         70         30        756        939         90
    3      42         66         10         16        336         90
    4      42         68         10        643        866         90
    5      42         65         10         15        226         90
    6      40         69         20        499        824         90
    7      40         66         20         87        308         90
    8      38         68         20        150        429         90
    9      38         70         10        429        710         90
"#;

    #[test]
    fn test_parses_solomon_instance() {
        let inst = parse_instance(C108_SHORT).expect("valid instance");
        assert_eq!(inst.name(), "C108_shortened_x10");
        assert_eq!(inst.vehicle_count(), 3);
        assert_eq!(inst.capacity(), 20);
        assert_eq!(inst.num_customers(), 9);

        let depot = &inst.customers()[0];
        assert!(depot.is_depot());
        assert!((depot.x() - 40.0).abs() < 1e-10);
        assert!((depot.y() - 50.0).abs() < 1e-10);

        let c2 = &inst.customers()[2];
        assert_eq!(c2.demand(), 30);
        assert!((c2.service_duration() - 90.0).abs() < 1e-10);
        let tw = c2.time_window().expect("has window");
        assert!((tw.ready() - 756.0).abs() < 1e-10);
        assert!((tw.due() - 939.0).abs() < 1e-10);
    }

    #[test]
    fn test_cost_model_is_euclidean() {
        let model = parse_instance(C108_SHORT)
            .expect("valid")
            .into_cost_model()
            .expect("valid model");
        // (40,50) -> (45,68)
        let expected = (25.0f64 + 324.0).sqrt();
        assert!((model.cost(0, 1) - expected).abs() < 1e-10);
        assert_eq!(model.total_demand(), 140);
    }

    #[test]
    fn test_float_coordinates_accepted() {
        let text = "x\nVEHICLE\n1 5\nCUSTOMER\n0 1.5 2.5 0 0 10 0\n1 3.0 4.0 2 0 10 1.5\n";
        let inst = parse_instance(text).expect("valid");
        assert!((inst.customers()[1].x() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_unnamed_instance() {
        let text = "VEHICLE\n1 5\nCUSTOMER\n0 0 0 0 0 10 0\n";
        let inst = parse_instance(text).expect("valid");
        assert_eq!(inst.name(), "");
        assert_eq!(inst.num_customers(), 0);
    }

    #[test]
    fn test_missing_vehicle_section() {
        let err = parse_instance("x\nCUSTOMER\n0 0 0 0 0 10 0\n").unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::MissingSection("VEHICLE")));
    }

    #[test]
    fn test_missing_vehicle_row() {
        let err = parse_instance("x\nVEHICLE\nNUMBER CAPACITY\nCUSTOMER\n0 0 0 0 0 10 0\n")
            .unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::MissingSection("VEHICLE")));
    }

    #[test]
    fn test_missing_customer_section() {
        let err = parse_instance("x\nVEHICLE\n1 5\n").unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::MissingSection("CUSTOMER")));
    }

    #[test]
    fn test_no_customers() {
        let err = parse_instance("x\nVEHICLE\n1 5\nCUSTOMER\nCUST NO.\n").unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::NoCustomers));
    }

    #[test]
    fn test_invalid_number_reports_line() {
        let err = parse_instance("x\nVEHICLE\n1 abc\nCUSTOMER\n0 0 0 0 0 10 0\n").unwrap_err();
        assert_eq!(err.line(), 3);
        assert!(matches!(
            err.kind(),
            ParseErrorKind::InvalidNumber { field: "capacity", .. }
        ));
        assert_eq!(err.to_string(), "line 3: invalid capacity 'abc'");
    }

    #[test]
    fn test_missing_field() {
        let err = parse_instance("x\nVEHICLE\n1 5\nCUSTOMER\n0 0 0 0 0 10\n").unwrap_err();
        assert!(matches!(
            err.kind(),
            ParseErrorKind::MissingField("service time")
        ));
    }

    #[test]
    fn test_non_contiguous_ids() {
        let text = "x\nVEHICLE\n1 5\nCUSTOMER\n0 0 0 0 0 10 0\n2 1 1 1 0 10 0\n";
        let err = parse_instance(text).unwrap_err();
        assert!(matches!(
            err.kind(),
            ParseErrorKind::NonContiguousId {
                expected: 1,
                found: 2
            }
        ));
        assert_eq!(err.line(), 6);
    }

    #[test]
    fn test_negative_demand() {
        let text = "x\nVEHICLE\n1 5\nCUSTOMER\n0 0 0 0 0 10 0\n1 1 1 -3 0 10 0\n";
        let err = parse_instance(text).unwrap_err();
        assert!(matches!(
            err.kind(),
            ParseErrorKind::NegativeDemand { customer: 1 }
        ));
    }

    #[test]
    fn test_inverted_time_window() {
        let text = "x\nVEHICLE\n1 5\nCUSTOMER\n0 0 0 0 0 10 0\n1 1 1 1 20 10 0\n";
        let err = parse_instance(text).unwrap_err();
        assert!(matches!(
            err.kind(),
            ParseErrorKind::InvalidTimeWindow { customer: 1, .. }
        ));
    }

    #[test]
    fn test_read_instance_from_reader() {
        let inst = read_instance(C108_SHORT.as_bytes()).expect("valid");
        assert_eq!(inst.num_customers(), 9);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_instance("/nonexistent/dir/c101.txt").unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::Io(_)));
        assert_eq!(err.line(), 0);
    }

    #[test]
    fn test_load_unnamed_uses_file_stem() {
        let path = std::env::temp_dir().join(format!("gls_unnamed_{}.txt", std::process::id()));
        std::fs::write(&path, "VEHICLE\n1 5\nCUSTOMER\n0 0 0 0 0 10 0\n").expect("write");
        let inst = load_instance(&path).expect("valid");
        std::fs::remove_file(&path).ok();
        assert_eq!(
            inst.name(),
            format!("gls_unnamed_{}", std::process::id())
        );
    }
}
