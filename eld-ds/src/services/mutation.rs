//! Mutation engine: applies a classified intent to an existing design
//!
//! The two structural operations (add, remove) build a new Design value from
//! the old one plus the delta, then unconditionally recompute metrics and
//! cost. The informational intents (explain, cost, energy, unknown) never
//! touch the design; they only derive a response string from its current
//! state.

use crate::catalog::Catalog;
use crate::geometry::find_open_slot;
use crate::models::design::{Design, Fixture, ReasoningEntry};
use crate::models::room::Room;
use crate::services::intent::{Intent, HELP_TEXT};
use crate::services::metrics::{compute_cost, compute_metrics, cost_breakdown, parse_area_sqft};
use uuid::Uuid;

/// Result of processing one chat intent against a design
#[derive(Debug)]
pub enum ChatOutcome {
    /// The design changed; the new value has fresh metrics and cost
    Updated { design: Design, reply: String },
    /// Informational reply only, design untouched
    Reply(String),
}

impl ChatOutcome {
    /// The updated design, when the intent mutated one
    pub fn design(&self) -> Option<&Design> {
        match self {
            ChatOutcome::Updated { design, .. } => Some(design),
            ChatOutcome::Reply(_) => None,
        }
    }

    /// The response text for the chat client
    pub fn reply(&self) -> &str {
        match self {
            ChatOutcome::Updated { reply, .. } => reply,
            ChatOutcome::Reply(reply) => reply,
        }
    }
}

/// Apply a classified intent to the design
pub fn respond(catalog: &Catalog, room: &Room, design: &Design, intent: Intent) -> ChatOutcome {
    match intent {
        Intent::Add(kind) => {
            let reply = match kind {
                "Pendant" => "I'll add another pendant light for better task coverage.",
                _ => "Adding more recessed lights for improved general illumination.",
            };
            ChatOutcome::Updated {
                design: add_fixture(catalog, room, design, kind),
                reply: reply.to_string(),
            }
        }
        Intent::Remove => match remove_most_common(catalog, room, design) {
            Some(updated) => ChatOutcome::Updated {
                design: updated,
                reply: "I'll remove some fixtures to reduce the lighting intensity.".to_string(),
            },
            // Nothing left to remove; informational reply, design unchanged
            None => ChatOutcome::Reply(
                "There are no fixtures left to remove in this design.".to_string(),
            ),
        },
        Intent::Explain => ChatOutcome::Reply(explain(catalog, room, design)),
        Intent::Cost => ChatOutcome::Reply(cost_reply(catalog, design)),
        Intent::Energy => ChatOutcome::Reply(energy_reply(design)),
        Intent::Unknown => ChatOutcome::Reply(HELP_TEXT.to_string()),
    }
}

/// Recompute derived state after a fixture-sequence change
///
/// Central choke point: both structural mutations funnel through here so a
/// design can never leave this module with stale metrics.
fn with_derived(catalog: &Catalog, room: &Room, mut design: Design) -> Design {
    let area_sqft = parse_area_sqft(&room.area);
    design.metrics = compute_metrics(catalog, &design.fixtures, area_sqft);
    design.total_cost = compute_cost(catalog, &design.fixtures);
    design
}

/// Append one fixture of `kind` at a collision-free slot
pub fn add_fixture(catalog: &Catalog, room: &Room, design: &Design, kind: &str) -> Design {
    debug_assert!(catalog.contains(kind), "rule and intent kinds come from the catalog");

    let occupied: Vec<_> = design.fixtures.iter().map(|f| f.position).collect();
    let position = find_open_slot(&room.boundary, &occupied);

    let slug = kind.to_lowercase().replace(' ', "_");
    let fixture = Fixture {
        purpose: Some(format!("Additional {} added per request", kind)),
        ..Fixture::new(
            format!("{}_{}", slug, Uuid::new_v4().simple()),
            kind,
            position,
        )
    };

    let mut updated = design.clone();
    updated.fixtures.push(fixture);
    updated.reasoning.push(ReasoningEntry::new(
        kind,
        format!("Added {} based on user preference for more lighting", kind),
    ));

    with_derived(catalog, room, updated)
}

/// Remove the last fixture of the most numerous kind
///
/// Ties on the count are broken by first occurrence in insertion order.
/// Returns None when the design has no fixtures.
pub fn remove_most_common(catalog: &Catalog, room: &Room, design: &Design) -> Option<Design> {
    // Walk kinds in first-appearance order; only a strictly higher count
    // displaces the current candidate, so ties go to the earliest-seen kind
    let mut target: Option<&str> = None;
    for kind in design.kinds_in_order() {
        match target {
            Some(best) if design.count_of(kind) <= design.count_of(best) => {}
            _ => target = Some(kind),
        }
    }
    let target_kind = target?.to_string();

    let index = design
        .fixtures
        .iter()
        .rposition(|f| f.kind == target_kind)?;

    let mut updated = design.clone();
    updated.fixtures.remove(index);
    updated.reasoning.push(ReasoningEntry::new(
        target_kind.clone(),
        format!(
            "Removed {} to reduce lighting intensity per user request",
            target_kind
        ),
    ));

    Some(with_derived(catalog, room, updated))
}

/// Narrative explanation of the current design from its reasoning log
pub fn explain(catalog: &Catalog, room: &Room, design: &Design) -> String {
    let mut text = format!(
        "For this {}, I designed the lighting based on these principles:\n\n",
        room.room_type
    );

    for entry in design.reasoning.iter().filter(|e| e.topic == "overall") {
        text.push_str(&entry.message);
        text.push_str("\n\n");
    }

    for kind in design.kinds_in_order() {
        let count = design.count_of(kind);
        let description = catalog.get(kind).map(|s| s.description).unwrap_or("");
        text.push_str(&format!("**{}** ({}x): {}\n", kind, count, description));

        for entry in design.reasoning.iter().filter(|e| e.topic == kind) {
            text.push_str(&format!("- {}\n", entry.message));
        }

        for fixture in design.fixtures.iter().filter(|f| f.kind == kind) {
            if let Some(purpose) = &fixture.purpose {
                text.push_str(&format!("- {}\n", purpose));
            }
        }
        text.push('\n');
    }

    text
}

fn cost_reply(catalog: &Catalog, design: &Design) -> String {
    let breakdown = cost_breakdown(catalog, &design.fixtures);
    let lines: Vec<String> = breakdown
        .iter()
        .map(|(kind, line)| format!("{}: ${}", kind, line.cost.round() as u64))
        .collect();

    if lines.is_empty() {
        format!("The current design costs ${}.", design.total_cost)
    } else {
        format!(
            "The current design costs ${}. Breakdown: {}",
            design.total_cost,
            lines.join(", ")
        )
    }
}

fn energy_reply(design: &Design) -> String {
    let metrics = &design.metrics;
    let verdict = if metrics.meets_energy_code {
        "✓ Meets energy code requirements."
    } else {
        "⚠️ Exceeds energy code limit of 1.2W/sq.ft."
    };

    format!(
        "Energy usage: {:.1}W total, {:.2}W per sq.ft. {}",
        metrics.total_watts, metrics.watts_per_sqft, verdict
    )
}
