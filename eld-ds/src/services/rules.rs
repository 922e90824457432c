//! Room-type synthesis rules
//!
//! One rule per room category, each a pure function of the Room. Dispatch
//! is a strategy table keyed by the room-type tag; unrecognized categories
//! map to a no-op rule yielding an empty layout. Every non-empty branch
//! records at least one reasoning entry so explanation requests always have
//! content to draw from.

use crate::geometry::{grid_positions, perimeter, Point};
use crate::models::design::{Fixture, ReasoningEntry};
use crate::models::room::{Room, RoomType};

/// Approximate drawing scale of detector output
pub const PIXELS_PER_FOOT: f64 = 25.0;

/// Ceiling can grid spacing in pixels
pub const CAN_GRID_SPACING: f64 = 100.0;

/// Horizontal spacing between island pendants in pixels
pub const PENDANT_SPACING: f64 = 100.0;

/// One pendant per this many feet of island length
pub const ISLAND_FT_PER_PENDANT: f64 = 3.0;

/// Accent track heads in a living room
pub const LIVING_TRACK_COUNT: usize = 3;

/// Result of applying one synthesis rule
#[derive(Debug, Default)]
pub struct RuleOutput {
    pub fixtures: Vec<Fixture>,
    pub reasoning: Vec<ReasoningEntry>,
}

impl RuleOutput {
    fn reason(&mut self, topic: &str, message: impl Into<String>) {
        self.reasoning.push(ReasoningEntry::new(topic, message));
    }
}

/// Synthesis rule signature: pure function of the room
pub type SynthesisRule = fn(&Room) -> RuleOutput;

/// Strategy table mapping a room category to its rule
///
/// Office and study share one rule; unknown categories get the no-op rule.
pub fn rule_for(room_type: &RoomType) -> SynthesisRule {
    match room_type {
        RoomType::Kitchen => kitchen_rule,
        RoomType::Living => living_rule,
        RoomType::Bedroom => bedroom_rule,
        RoomType::Bathroom => bathroom_rule,
        RoomType::Office | RoomType::Study => office_rule,
        RoomType::Dining => dining_rule,
        RoomType::Other(_) => no_op_rule,
    }
}

/// Unrecognized room types synthesize nothing; pass-through, not an error
fn no_op_rule(_room: &Room) -> RuleOutput {
    RuleOutput::default()
}

/// Kitchen: pendants over the island, an under-cabinet run, a can grid
fn kitchen_rule(room: &Room) -> RuleOutput {
    let mut out = RuleOutput::default();
    out.reason(
        "overall",
        "Kitchen requires layered lighting: task lighting for work areas, ambient for general illumination",
    );

    // Island pendant lighting, one pendant per 3 ft of island length
    if let Some(island) = room.find_object("kitchen_island") {
        if let Some(length_ft) = island.length_ft().filter(|l| *l > 0.0) {
            let count = (length_ft / ISLAND_FT_PER_PENDANT).ceil() as usize;
            let first_x = island.x() - (count - 1) as f64 * PENDANT_SPACING / 2.0;

            for i in 0..count {
                out.fixtures.push(Fixture {
                    purpose: Some("Task lighting for island work surface".to_string()),
                    height: Some("30 inches above counter".to_string()),
                    ..Fixture::new(
                        format!("pendant_{}", i),
                        "Pendant",
                        Point::new(first_x + i as f64 * PENDANT_SPACING, island.y()),
                    )
                });
            }

            out.reason(
                "Pendant",
                format!(
                    "{} pendants spaced evenly over the {} island for optimal task lighting",
                    count, island.dimensions
                ),
            );
        }
    }

    // Under-cabinet task run along the cabinet line
    out.fixtures.push(Fixture {
        length: Some(10.0),
        purpose: Some("Under-cabinet task lighting".to_string()),
        placement: Some("Under upper cabinets".to_string()),
        ..Fixture::new(
            "undercab_1",
            "Linear Cove",
            Point::new(room.boundary.x1 + 100.0, room.boundary.y1 + 50.0),
        )
    });

    // Can grid for general illumination
    let grid = grid_positions(&room.boundary, CAN_GRID_SPACING);
    let can_count = grid.len();
    for (i, pos) in grid.into_iter().enumerate() {
        out.fixtures.push(Fixture {
            purpose: Some("General ambient lighting".to_string()),
            ..Fixture::new(format!("can_{}", i), "Ceiling Can", pos)
        });
    }
    out.reason(
        "Ceiling Can",
        format!("{} can lights in grid pattern for even ambient lighting", can_count),
    );

    out
}

/// Living room: perimeter cove plus accent track heads along the upper wall
fn living_rule(room: &Room) -> RuleOutput {
    let mut out = RuleOutput::default();
    out.reason(
        "overall",
        "Living room needs flexible lighting: ambient for general use, accent for artwork, task for reading",
    );

    out.fixtures.push(Fixture {
        length: Some(perimeter(&room.boundary) / PIXELS_PER_FOOT),
        purpose: Some("Indirect ambient lighting".to_string()),
        placement: Some("Perimeter cove".to_string()),
        ..Fixture::new(
            "cove_perimeter",
            "Linear Cove",
            Point::new(room.boundary.x1 + 50.0, room.boundary.y1 + 20.0),
        )
    });
    out.reason(
        "Linear Cove",
        "Perimeter cove provides soft, indirect lighting without glare",
    );

    let width = room.boundary.width();
    for i in 0..LIVING_TRACK_COUNT {
        let x = room.boundary.x1 + width / (LIVING_TRACK_COUNT + 1) as f64 * (i + 1) as f64;
        out.fixtures.push(Fixture {
            purpose: Some("Accent lighting for artwork".to_string()),
            aim_angle: Some(30.0),
            ..Fixture::new(
                format!("track_{}", i),
                "Track Light",
                Point::new(x, room.boundary.y1 + 80.0),
            )
        });
    }
    out.reason(
        "Track Light",
        "Track lights positioned to highlight artwork and create visual interest",
    );

    out
}

/// Bedroom: ambient cove, plus bedside sconces and step lights when a bed
/// exists. A room with no bed keeps just the cove.
fn bedroom_rule(room: &Room) -> RuleOutput {
    let mut out = RuleOutput::default();
    out.reason(
        "overall",
        "Bedroom lighting should be restful: soft ambient light with task lighting for reading",
    );

    out.fixtures.push(Fixture {
        length: Some(20.0),
        purpose: Some("Soft ambient lighting".to_string()),
        placement: Some("Three walls, avoiding headboard".to_string()),
        ..Fixture::new(
            "cove_ambient",
            "Linear Cove",
            Point::new(room.boundary.x1 + 50.0, room.boundary.y1 + 20.0),
        )
    });

    if let Some(bed) = room.find_object("bed") {
        let (bed_x, bed_y) = (bed.x(), bed.y());

        for (id, dx, side) in [("sconce_left", -100.0, "left"), ("sconce_right", 100.0, "right")] {
            out.fixtures.push(Fixture {
                purpose: Some(format!("Reading light {} side", side)),
                mounting: Some("60 inches from floor".to_string()),
                ..Fixture::new(id, "Wall Sconce", Point::new(bed_x + dx, bed_y - 50.0))
            });
        }
        out.reason(
            "Wall Sconce",
            "Wall sconces provide adjustable task lighting without table clutter",
        );

        for (id, dx) in [("step_1", -80.0), ("step_2", 80.0)] {
            out.fixtures.push(Fixture {
                purpose: Some("Night navigation".to_string()),
                ..Fixture::new(id, "Step Light", Point::new(bed_x + dx, bed_y + 80.0))
            });
        }
        out.reason(
            "Step Light",
            "Step lights provide safe nighttime navigation without disturbing sleep",
        );
    }

    out
}

/// Bathroom: vanity run and wet-rated shower can when present, center can always
fn bathroom_rule(room: &Room) -> RuleOutput {
    let mut out = RuleOutput::default();
    out.reason(
        "overall",
        "Bathroom needs bright, even lighting for grooming tasks plus ambient lighting",
    );

    if let Some(vanity) = room.find_object("vanity") {
        out.fixtures.push(Fixture {
            length: Some(4.0),
            purpose: Some("Task lighting for grooming".to_string()),
            placement: Some("Above mirror".to_string()),
            ..Fixture::new(
                "vanity_light",
                "Linear Cove",
                Point::new(vanity.x(), vanity.y() - 40.0),
            )
        });
        out.reason(
            "Linear Cove",
            "Linear LED above mirror provides even, shadow-free lighting for grooming",
        );
    }

    if let Some(shower) = room.find_object("shower") {
        out.fixtures.push(Fixture {
            purpose: Some("Shower task lighting".to_string()),
            rating: Some("Wet location rated".to_string()),
            ..Fixture::new("shower_can", "Ceiling Can", Point::new(shower.x(), shower.y()))
        });
    }

    out.fixtures.push(Fixture {
        purpose: Some("General ambient lighting".to_string()),
        ..Fixture::new("bath_can", "Ceiling Can", room.boundary.center())
    });

    out
}

/// Office or study: desk pendant when present, ambient cove, bookshelf accent
fn office_rule(room: &Room) -> RuleOutput {
    let mut out = RuleOutput::default();
    out.reason(
        "overall",
        "Office lighting optimized for productivity: bright task lighting with minimal glare",
    );

    if let Some(desk) = room.find_object("desk") {
        out.fixtures.push(Fixture {
            purpose: Some("Primary task lighting".to_string()),
            height: Some("30 inches above desk".to_string()),
            ..Fixture::new("desk_pendant", "Pendant", Point::new(desk.x(), desk.y()))
        });
        out.reason("Pendant", "Pendant over desk provides focused task lighting for work");
    }

    out.fixtures.push(Fixture {
        length: Some(15.0),
        purpose: Some("Indirect ambient lighting".to_string()),
        placement: Some("North and west walls".to_string()),
        ..Fixture::new(
            "office_cove",
            "Linear Cove",
            Point::new(room.boundary.x1 + 50.0, room.boundary.y1 + 20.0),
        )
    });

    if let Some(bookshelf) = room.find_object("bookshelf") {
        out.fixtures.push(Fixture {
            purpose: Some("Accent lighting for books".to_string()),
            aim_angle: Some(45.0),
            ..Fixture::new(
                "shelf_track",
                "Track Light",
                Point::new(bookshelf.x(), bookshelf.y() - 100.0),
            )
        });
    }

    out
}

/// Dining room: chandelier centerpiece over the table, flanking wall sconces
fn dining_rule(room: &Room) -> RuleOutput {
    let mut out = RuleOutput::default();
    out.reason(
        "overall",
        "Dining room centers on statement lighting with ambient support",
    );

    if let Some(table) = room.find_object("dining_table") {
        out.fixtures.push(Fixture {
            purpose: Some("Statement lighting and task illumination".to_string()),
            height: Some("30-36 inches above table".to_string()),
            ..Fixture::new("chandelier", "Chandelier", Point::new(table.x(), table.y()))
        });
        out.reason(
            "Chandelier",
            "Chandelier provides both decorative appeal and functional dining light",
        );
    }

    let mid_y = (room.boundary.y1 + room.boundary.y2) / 2.0;
    for (i, x) in [room.boundary.x1 + 50.0, room.boundary.x2 - 50.0]
        .into_iter()
        .enumerate()
    {
        out.fixtures.push(Fixture {
            purpose: Some("Ambient accent lighting".to_string()),
            ..Fixture::new(
                format!("dining_sconce_{}", i + 1),
                "Wall Sconce",
                Point::new(x, mid_y),
            )
        });
    }
    out.reason(
        "Wall Sconce",
        "Wall sconces add layered lighting and create intimate dining atmosphere",
    );

    out
}
