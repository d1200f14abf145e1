use std::io::{self, Write};

use crate::evaluation::{Context, Objective};
use crate::models::{CostModel, Solution};

/// Writes `solution` in the plain result format:
///
/// ```text
/// Route 1: 0 5 3 7 0
/// Route 2: 0 2 1 0
/// Vehicles: 2
/// Distance: 123.45
/// ```
///
/// Unassigned customers, if any, follow on an `Unassigned:` line.
pub fn write_solution<W: Write>(
    model: &CostModel,
    solution: &Solution,
    mut writer: W,
) -> io::Result<()> {
    for (k, route) in solution.routes().iter().enumerate() {
        let path: Vec<String> = route.path().iter().map(|c| c.to_string()).collect();
        writeln!(writer, "Route {}: {}", k + 1, path.join(" "))?;
    }
    writeln!(writer, "Vehicles: {}", solution.num_routes())?;
    let distance = Objective::new(model).evaluate(solution, &Context::Plain);
    writeln!(writer, "Distance: {distance:.2}")?;
    if !solution.unassigned().is_empty() {
        let ids: Vec<String> = solution.unassigned().iter().map(|c| c.to_string()).collect();
        writeln!(writer, "Unassigned: {}", ids.join(" "))?;
    }
    writer.flush()
}
