/// What went wrong while reading an instance.
#[derive(Debug)]
pub enum ParseErrorKind {
    /// A required section header (`VEHICLE`, `CUSTOMER`) or its data row is absent.
    MissingSection(&'static str),
    /// A token that should be a number is not one.
    InvalidNumber { field: &'static str, token: String },
    /// A data row ends before all of its fields.
    MissingField(&'static str),
    /// Customer rows must be numbered 0, 1, 2, ... in order.
    NonContiguousId { expected: usize, found: usize },
    NegativeDemand { customer: usize },
    /// Ready time after due date, or a non-finite bound.
    InvalidTimeWindow { customer: usize, ready: f64, due: f64 },
    /// The customer section holds no rows, not even the depot.
    NoCustomers,
    Io(std::io::Error),
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorKind::MissingSection(name) => write!(f, "missing {name} section"),
            ParseErrorKind::InvalidNumber { field, token } => {
                write!(f, "invalid {field} '{token}'")
            }
            ParseErrorKind::MissingField(field) => write!(f, "missing field {field}"),
            ParseErrorKind::NonContiguousId { expected, found } => {
                write!(f, "expected customer {expected}, found {found}")
            }
            ParseErrorKind::NegativeDemand { customer } => {
                write!(f, "customer {customer} has a negative demand")
            }
            ParseErrorKind::InvalidTimeWindow {
                customer,
                ready,
                due,
            } => write!(
                f,
                "customer {customer} has an invalid time window [{ready}, {due}]"
            ),
            ParseErrorKind::NoCustomers => write!(f, "customer section is empty"),
            ParseErrorKind::Io(e) => write!(f, "{e}"),
        }
    }
}

/// An instance could not be read.
///
/// `line` is 1-based; 0 means the error is not tied to a line (I/O failures,
/// sections missing at end of input).
#[derive(Debug)]
pub struct ParseError {
    line: usize,
    kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "line {}: {}", self.line, self.kind)
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::new(0, ParseErrorKind::Io(err))
    }
}
