//! Customer and time window types.

use serde::{Deserialize, Serialize};

/// A service time window at a customer location.
///
/// The vehicle may arrive as early as `ready` (and waits until then) and
/// should arrive no later than `due`. Windows are carried as instance data;
/// the search itself only reports violations.
///
/// # Examples
///
/// ```
/// use gls_routing::models::TimeWindow;
///
/// let tw = TimeWindow::new(830.0, 1049.0).unwrap();
/// assert!(tw.contains(900.0));
/// assert_eq!(tw.waiting_time(800.0), 30.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    ready: f64,
    due: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `ready > due` or either value is non-finite.
    pub fn new(ready: f64, due: f64) -> Option<Self> {
        if !ready.is_finite() || !due.is_finite() || ready > due {
            return None;
        }
        Some(Self { ready, due })
    }

    /// Earliest service start.
    pub fn ready(&self) -> f64 {
        self.ready
    }

    /// Latest allowable arrival.
    pub fn due(&self) -> f64 {
        self.due
    }

    /// Returns `true` if `time` lies inside the window (bounds included).
    pub fn contains(&self, time: f64) -> bool {
        time >= self.ready && time <= self.due
    }

    /// Idle time when arriving at `arrival`; zero unless early.
    pub fn waiting_time(&self, arrival: f64) -> f64 {
        (self.ready - arrival).max(0.0)
    }

    /// Returns `true` if arriving at `arrival` is too late.
    pub fn is_violated(&self, arrival: f64) -> bool {
        arrival > self.due
    }
}

/// A customer (or the depot) of a routing instance.
///
/// Identity 0 is the depot by convention. Customers are immutable once
/// loaded.
///
/// # Examples
///
/// ```
/// use gls_routing::models::Customer;
///
/// let depot = Customer::depot(40.0, 50.0);
/// assert!(depot.is_depot());
///
/// let c = Customer::new(3, 42.0, 66.0, 10, 90.0);
/// assert_eq!(c.id(), 3);
/// assert_eq!(c.demand(), 10);
/// assert!(!c.is_depot());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    id: usize,
    x: f64,
    y: f64,
    demand: u32,
    service_duration: f64,
    time_window: Option<TimeWindow>,
    depot: bool,
}

impl Customer {
    /// Creates a regular (non-depot) customer.
    pub fn new(id: usize, x: f64, y: f64, demand: u32, service_duration: f64) -> Self {
        Self {
            id,
            x,
            y,
            demand,
            service_duration,
            time_window: None,
            depot: false,
        }
    }

    /// Creates the depot at the given coordinates (id 0, no demand).
    pub fn depot(x: f64, y: f64) -> Self {
        Self {
            depot: true,
            ..Self::new(0, x, y, 0, 0.0)
        }
    }

    /// Attaches a time window.
    pub fn with_time_window(mut self, tw: TimeWindow) -> Self {
        self.time_window = Some(tw);
        self
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Quantity to deliver.
    pub fn demand(&self) -> u32 {
        self.demand
    }

    pub fn service_duration(&self) -> f64 {
        self.service_duration
    }

    pub fn time_window(&self) -> Option<&TimeWindow> {
        self.time_window.as_ref()
    }

    pub fn is_depot(&self) -> bool {
        self.depot
    }

    /// Euclidean distance to another location.
    pub fn distance_to(&self, other: &Customer) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
