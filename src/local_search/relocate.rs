//! Inter-route customer relocation.
//!
//! # Algorithm
//!
//! Tries moving each customer out of its route into every position of every
//! other route, and applies the best improving move. Repeats until no move
//! improves. A route emptied by a relocation is dropped when the solution is
//! rebuilt, so relocation never increases the number of routes.
//!
//! # Complexity
//!
//! O(n² × R) per move where n = customers per route, R = number of routes.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use crate::evaluation::{Context, Objective};

use super::IMPROVEMENT_EPS;

/// A relocate move: take a customer from one route and insert it in another.
#[derive(Debug, Clone, PartialEq)]
struct RelocateMove {
    from_route: usize,
    from_pos: usize,
    to_route: usize,
    to_pos: usize,
    delta: f64,
}

/// Applies best-improvement relocation until no improving move exists.
/// Returns `true` if any customer moved.
pub(crate) fn relocate_pass(
    routes: &mut [Vec<usize>],
    objective: &Objective<'_>,
    ctx: &Context<'_>,
) -> bool {
    if routes.len() < 2 {
        return false;
    }

    let mut any = false;
    while let Some(mv) = find_best_relocate(routes, objective, ctx) {
        let customer = routes[mv.from_route].remove(mv.from_pos);
        routes[mv.to_route].insert(mv.to_pos, customer);
        any = true;
    }
    any
}

/// Finds the best strictly improving relocation, if any.
fn find_best_relocate(
    routes: &[Vec<usize>],
    objective: &Objective<'_>,
    ctx: &Context<'_>,
) -> Option<RelocateMove> {
    let model = objective.model();
    let depot = model.depot();
    let check_capacity = ctx.enforces_feasibility();
    let loads: Vec<u64> = routes.iter().map(|r| model.load(r)).collect();

    let mut best: Option<RelocateMove> = None;

    for (from_r, from_route) in routes.iter().enumerate() {
        for from_pos in 0..from_route.len() {
            let cid = from_route[from_pos];
            let removal = removal_delta(from_route, from_pos, depot, objective, ctx);

            for (to_r, to_route) in routes.iter().enumerate() {
                if to_r == from_r {
                    continue;
                }
                if check_capacity && !model.fits(loads[to_r] + u64::from(model.demand(cid))) {
                    continue;
                }

                for to_pos in 0..=to_route.len() {
                    let delta =
                        removal + insertion_delta(to_route, to_pos, cid, depot, objective, ctx);
                    if delta < -IMPROVEMENT_EPS && best.as_ref().is_none_or(|b| delta < b.delta) {
                        best = Some(RelocateMove {
                            from_route: from_r,
                            from_pos,
                            to_route: to_r,
                            to_pos,
                            delta,
                        });
                    }
                }
            }
        }
    }

    best
}

/// Weight change from removing the customer at `pos`.
fn removal_delta(
    route: &[usize],
    pos: usize,
    depot: usize,
    objective: &Objective<'_>,
    ctx: &Context<'_>,
) -> f64 {
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = route.get(pos + 1).copied().unwrap_or(depot);
    let cid = route[pos];

    objective.arc(prev, next, ctx) - objective.arc(prev, cid, ctx) - objective.arc(cid, next, ctx)
}

/// Weight change from inserting `customer` before position `pos`.
fn insertion_delta(
    route: &[usize],
    pos: usize,
    customer: usize,
    depot: usize,
    objective: &Objective<'_>,
    ctx: &Context<'_>,
) -> f64 {
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = route.get(pos).copied().unwrap_or(depot);

    objective.arc(prev, customer, ctx) + objective.arc(customer, next, ctx)
        - objective.arc(prev, next, ctx)
}
