//! Inter-route edge exchange (2-opt*).
//!
//! # Algorithm
//!
//! Removes one arc from each of two routes and reconnects the head of each
//! route to the tail of the other:
//!
//! R1 = [a₁, ..., aᵢ | aᵢ₊₁, ..., aₙ] and R2 = [b₁, ..., bⱼ | bⱼ₊₁, ..., bₘ]
//! become R1' = [a₁, ..., aᵢ, bⱼ₊₁, ..., bₘ] and R2' = [b₁, ..., bⱼ, aᵢ₊₁, ..., aₙ].
//!
//! Tails keep their direction, so only the two cut arcs change. For every
//! route pair the best cut is applied when it improves the objective.
//!
//! # Reference
//!
//! Potvin, J.-Y. & Rousseau, J.-M. (1995). "An Exchange Heuristic for
//! Routeing Problems with Time Windows", *Journal of the Operational Research
//! Society* 46(12), 1433-1446.

use crate::evaluation::{Context, Objective};

use super::IMPROVEMENT_EPS;

/// Best tail exchange found between two routes.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ExchangeMove {
    cut1: usize,
    cut2: usize,
    delta: f64,
}

/// Applies improving tail exchanges between route pairs until none is left.
/// Returns `true` if any pair changed.
pub(crate) fn exchange_pass(
    routes: &mut [Vec<usize>],
    objective: &Objective<'_>,
    ctx: &Context<'_>,
) -> bool {
    if routes.len() < 2 {
        return false;
    }

    let mut any = false;
    let mut improved = true;
    while improved {
        improved = false;
        for r1 in 0..routes.len() {
            for r2 in (r1 + 1)..routes.len() {
                let Some(mv) = best_exchange(&routes[r1], &routes[r2], objective, ctx) else {
                    continue;
                };
                if mv.delta < -IMPROVEMENT_EPS {
                    let tail1 = routes[r1].split_off(mv.cut1);
                    let tail2 = routes[r2].split_off(mv.cut2);
                    routes[r1].extend(tail2);
                    routes[r2].extend(tail1);
                    improved = true;
                    any = true;
                }
            }
        }
    }
    any
}

/// Finds the cheapest exchange between `route1` and `route2`.
///
/// Cuts range over `1..=len`, so each new route keeps at least its first
/// customer. Capacity is checked unless the context waives feasibility.
fn best_exchange(
    route1: &[usize],
    route2: &[usize],
    objective: &Objective<'_>,
    ctx: &Context<'_>,
) -> Option<ExchangeMove> {
    let model = objective.model();
    let depot = model.depot();
    let check_capacity = ctx.enforces_feasibility();

    let prefix1 = prefix_loads(route1, objective);
    let prefix2 = prefix_loads(route2, objective);
    let total1 = prefix1[route1.len()];
    let total2 = prefix2[route2.len()];

    let w = |a: usize, b: usize| objective.arc(a, b, ctx);
    let mut best: Option<ExchangeMove> = None;

    for cut1 in 1..=route1.len() {
        for cut2 in 1..=route2.len() {
            if check_capacity {
                let load1 = prefix1[cut1] + (total2 - prefix2[cut2]);
                let load2 = prefix2[cut2] + (total1 - prefix1[cut1]);
                if !model.fits(load1) || !model.fits(load2) {
                    continue;
                }
            }

            let last1 = route1[cut1 - 1];
            let last2 = route2[cut2 - 1];
            let next1 = route1.get(cut1).copied().unwrap_or(depot);
            let next2 = route2.get(cut2).copied().unwrap_or(depot);

            let delta = w(last1, next2) + w(last2, next1) - w(last1, next1) - w(last2, next2);
            if best.is_none_or(|b| delta < b.delta) {
                best = Some(ExchangeMove { cut1, cut2, delta });
            }
        }
    }

    best
}

/// `loads[k]` is the demand of the first `k` customers.
fn prefix_loads(route: &[usize], objective: &Objective<'_>) -> Vec<u64> {
    let model = objective.model();
    let mut loads = Vec::with_capacity(route.len() + 1);
    loads.push(0);
    let mut acc = 0u64;
    for &c in route {
        acc += u64::from(model.demand(c));
        loads.push(acc);
    }
    loads
}
