//! Metrics and cost calculators
//!
//! Pure functions of a fixture sequence and the room area. Every mutation
//! path must call back into these before a design is stored or returned;
//! the invariant is that observed metrics are never stale.
//!
//! Unknown fixture kinds contribute zero watts, lumens and cost so a
//! partially-corrupt design stays displayable instead of failing.

use crate::catalog::{Catalog, Pricing, NOMINAL_LINEAR_LENGTH_FT};
use crate::models::design::{Fixture, LightingMetrics};
use crate::models::room::parse_leading_float;
use serde::Serialize;

/// Energy code limit on power density (watts per square foot, inclusive)
pub const ENERGY_CODE_WATTS_PER_SQFT: f64 = 1.2;

/// Room area assumed when the analysis carries no parseable area
pub const DEFAULT_ROOM_AREA_SQFT: f64 = 100.0;

/// Square footage from a free-text area field, defaulting when unparseable
pub fn parse_area_sqft(area: &str) -> f64 {
    parse_leading_float(area).unwrap_or(DEFAULT_ROOM_AREA_SQFT)
}

fn fixture_rates(catalog: &Catalog, fixture: &Fixture) -> (f64, f64, f64) {
    match catalog.get(&fixture.kind).map(|spec| spec.pricing) {
        Some(Pricing::Discrete { price, wattage, lumens }) => (price, wattage, lumens),
        Some(Pricing::Linear {
            price_per_foot,
            wattage_per_foot,
            lumens_per_foot,
        }) => {
            let length = fixture.length.unwrap_or(NOMINAL_LINEAR_LENGTH_FT);
            (
                length * price_per_foot,
                length * wattage_per_foot,
                length * lumens_per_foot,
            )
        }
        None => (0.0, 0.0, 0.0),
    }
}

/// Aggregate wattage, lumens and code compliance for a fixture sequence
pub fn compute_metrics(
    catalog: &Catalog,
    fixtures: &[Fixture],
    room_area_sqft: f64,
) -> LightingMetrics {
    let mut total_watts = 0.0;
    let mut total_lumens = 0.0;

    for fixture in fixtures {
        let (_, watts, lumens) = fixture_rates(catalog, fixture);
        total_watts += watts;
        total_lumens += lumens;
    }

    let watts_per_sqft = total_watts / room_area_sqft;

    LightingMetrics {
        total_watts,
        total_lumens,
        watts_per_sqft,
        lumens_per_sqft: (total_lumens / room_area_sqft).round() as i64,
        meets_energy_code: watts_per_sqft <= ENERGY_CODE_WATTS_PER_SQFT,
    }
}

/// Total cost of a fixture sequence, rounded to whole currency units
pub fn compute_cost(catalog: &Catalog, fixtures: &[Fixture]) -> u64 {
    let cost: f64 = fixtures
        .iter()
        .map(|f| fixture_rates(catalog, f).0)
        .sum();
    cost.round() as u64
}

/// Per-kind cost line in a breakdown
///
/// `count` is units for discrete kinds and total footage for linear kinds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KindCost {
    pub count: f64,
    pub cost: f64,
}

/// Cost broken down by fixture kind, in first-appearance order
pub fn cost_breakdown(catalog: &Catalog, fixtures: &[Fixture]) -> Vec<(String, KindCost)> {
    let mut breakdown: Vec<(String, KindCost)> = Vec::new();

    for fixture in fixtures {
        let Some(spec) = catalog.get(&fixture.kind) else {
            continue;
        };

        let cost = fixture_rates(catalog, fixture).0;
        let count = if spec.is_linear() {
            fixture.length.unwrap_or(NOMINAL_LINEAR_LENGTH_FT)
        } else {
            1.0
        };

        match breakdown.iter_mut().find(|(kind, _)| kind == &fixture.kind) {
            Some((_, line)) => {
                line.count += count;
                line.cost += cost;
            }
            None => breakdown.push((fixture.kind.clone(), KindCost { count, cost })),
        }
    }

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn fixture(kind: &str) -> Fixture {
        Fixture::new(format!("{}_t", kind), kind, Point::new(0.0, 0.0))
    }

    #[test]
    fn test_parse_area_sqft_default() {
        assert_eq!(parse_area_sqft("320 sq ft"), 320.0);
        assert_eq!(parse_area_sqft("unknown"), DEFAULT_ROOM_AREA_SQFT);
    }

    #[test]
    fn test_discrete_fixture_metrics() {
        let catalog = Catalog::standard();
        let fixtures = vec![fixture("Pendant"), fixture("Ceiling Can")];

        let metrics = compute_metrics(&catalog, &fixtures, 100.0);
        assert_eq!(metrics.total_watts, 27.0);
        assert_eq!(metrics.total_lumens, 2200.0);
        assert_eq!(metrics.lumens_per_sqft, 22);
        assert!(metrics.meets_energy_code);
    }

    #[test]
    fn test_linear_fixture_uses_nominal_length_when_absent() {
        let catalog = Catalog::standard();
        let fixtures = vec![fixture("Linear Cove")];

        // 10 ft nominal * 4.5 W/ft
        let metrics = compute_metrics(&catalog, &fixtures, 100.0);
        assert_eq!(metrics.total_watts, 45.0);

        // 10 ft nominal * $50/ft
        assert_eq!(compute_cost(&catalog, &fixtures), 500);
    }

    #[test]
    fn test_linear_fixture_explicit_length() {
        let catalog = Catalog::standard();
        let mut cove = fixture("Linear Cove");
        cove.length = Some(4.0);

        assert_eq!(compute_cost(&catalog, &[cove]), 200);
    }

    #[test]
    fn test_unknown_kind_contributes_zero() {
        let catalog = Catalog::standard();
        let fixtures = vec![fixture("Pendant"), fixture("Lava Lamp")];

        let metrics = compute_metrics(&catalog, &fixtures, 100.0);
        assert_eq!(metrics.total_watts, 15.0);
        assert_eq!(compute_cost(&catalog, &fixtures), 150);
        assert_eq!(cost_breakdown(&catalog, &fixtures).len(), 1);
    }

    #[test]
    fn test_energy_code_boundary_is_inclusive() {
        let catalog = Catalog::standard();

        // 10 Ceiling Cans = 120 W over 100 sqft = exactly 1.2 W/sqft
        let at_limit: Vec<Fixture> = (0..10).map(|_| fixture("Ceiling Can")).collect();
        let metrics = compute_metrics(&catalog, &at_limit, 100.0);
        assert_eq!(metrics.total_watts, 120.0);
        assert!(metrics.meets_energy_code);

        // 121 W over 100 sqft exceeds the limit
        let mut over: Vec<Fixture> = at_limit.clone();
        over.push(Fixture {
            length: Some(121.0 - 120.0),
            ..fixture("Linear Cove")
        });
        // 120 + 1 * 4.5 = 124.5 W
        let metrics = compute_metrics(&catalog, &over, 100.0);
        assert!(metrics.total_watts > 120.0);
        assert!(!metrics.meets_energy_code);
    }

    #[test]
    fn test_metrics_and_cost_are_idempotent() {
        let catalog = Catalog::standard();
        let fixtures = vec![fixture("Pendant"), fixture("Linear Cove"), fixture("Chandelier")];

        let first = compute_metrics(&catalog, &fixtures, 224.0);
        let second = compute_metrics(&catalog, &fixtures, 224.0);
        assert_eq!(first, second);

        assert_eq!(
            compute_cost(&catalog, &fixtures),
            compute_cost(&catalog, &fixtures)
        );
    }

    #[test]
    fn test_empty_fixture_list_is_compliant_and_free() {
        let catalog = Catalog::standard();
        let metrics = compute_metrics(&catalog, &[], 100.0);

        assert_eq!(metrics.total_watts, 0.0);
        assert!(metrics.meets_energy_code);
        assert_eq!(compute_cost(&catalog, &[]), 0);
        assert!(cost_breakdown(&catalog, &[]).is_empty());
    }

    #[test]
    fn test_breakdown_groups_by_kind_in_first_appearance_order() {
        let catalog = Catalog::standard();
        let mut cove = fixture("Linear Cove");
        cove.length = Some(4.0);
        let fixtures = vec![fixture("Pendant"), cove, fixture("Pendant")];

        let breakdown = cost_breakdown(&catalog, &fixtures);
        assert_eq!(breakdown.len(), 2);

        assert_eq!(breakdown[0].0, "Pendant");
        assert_eq!(breakdown[0].1, KindCost { count: 2.0, cost: 300.0 });

        assert_eq!(breakdown[1].0, "Linear Cove");
        assert_eq!(breakdown[1].1, KindCost { count: 4.0, cost: 200.0 });
    }
}
