//! Design synthesis orchestration
//!
//! Dispatches the room to its synthesis rule, then derives metrics and cost
//! so the returned Design is complete and internally consistent.

use crate::catalog::Catalog;
use crate::models::design::Design;
use crate::models::room::Room;
use crate::services::metrics::{compute_cost, compute_metrics, parse_area_sqft};
use crate::services::rules;

/// Synthesize a complete lighting design for one room
///
/// Pure given the room and catalog: the same input always produces the same
/// design. Unrecognized room types yield an empty but valid design.
pub fn synthesize(catalog: &Catalog, room: &Room) -> Design {
    let rule = rules::rule_for(&room.room_type);
    let output = rule(room);

    let area_sqft = parse_area_sqft(&room.area);
    let metrics = compute_metrics(catalog, &output.fixtures, area_sqft);
    let total_cost = compute_cost(catalog, &output.fixtures);

    tracing::debug!(
        room_id = %room.id,
        room_type = %room.room_type,
        fixtures = output.fixtures.len(),
        total_cost = total_cost,
        "Synthesized lighting design"
    );

    Design {
        room_id: room.id.clone(),
        room_name: room.name.clone(),
        room_type: room.room_type.clone(),
        fixtures: output.fixtures,
        reasoning: output.reasoning,
        metrics,
        total_cost,
    }
}
