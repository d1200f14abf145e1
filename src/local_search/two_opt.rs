//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For each pair of positions `i < j` in a route, reversing the segment
//! `[i..=j]` replaces the arcs `prev→r[i]` and `r[j]→next` with
//! `prev→r[j]` and `r[i]→next`, and flips the direction of every arc inside
//! the segment. Arc weights are directed (asymmetric costs, directed
//! penalties), so the inner arcs are part of the delta:
//!
//! ```text
//! delta = w(prev, r[j]) + w(r[i], next) - w(prev, r[i]) - w(r[j], next)
//!       + Σ_{k=i}^{j-1} [ w(r[k+1], r[k]) - w(r[k], r[k+1]) ]
//! ```
//!
//! Improving reversals are applied immediately (first improvement) until a
//! full sweep finds none.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::evaluation::{Context, Objective};

use super::IMPROVEMENT_EPS;

/// Applies 2-opt to every route. Returns `true` if any route changed.
///
/// Capacity is unaffected: a reversal keeps the route's customers.
pub(crate) fn two_opt_pass(
    routes: &mut [Vec<usize>],
    objective: &Objective<'_>,
    ctx: &Context<'_>,
) -> bool {
    let mut any = false;
    for route in routes.iter_mut() {
        any |= improve_route(route, objective, ctx);
    }
    any
}

fn improve_route(route: &mut [usize], objective: &Objective<'_>, ctx: &Context<'_>) -> bool {
    let n = route.len();
    if n < 2 {
        return false;
    }
    let depot = objective.model().depot();

    let mut any = false;
    let mut improved = true;
    while improved {
        improved = false;
        for i in 0..n - 1 {
            for j in i + 1..n {
                if reversal_delta(route, depot, i, j, objective, ctx) < -IMPROVEMENT_EPS {
                    route[i..=j].reverse();
                    improved = true;
                    any = true;
                }
            }
        }
    }
    any
}

/// Change in weight from reversing `route[i..=j]`.
fn reversal_delta(
    route: &[usize],
    depot: usize,
    i: usize,
    j: usize,
    objective: &Objective<'_>,
    ctx: &Context<'_>,
) -> f64 {
    let prev = if i == 0 { depot } else { route[i - 1] };
    let next = if j + 1 == route.len() {
        depot
    } else {
        route[j + 1]
    };

    let w = |a: usize, b: usize| objective.arc(a, b, ctx);
    let boundary = w(prev, route[j]) + w(route[i], next) - w(prev, route[i]) - w(route[j], next);
    let inner: f64 = (i..j)
        .map(|k| w(route[k + 1], route[k]) - w(route[k], route[k + 1]))
        .sum();
    boundary + inner
}
