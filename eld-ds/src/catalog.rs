//! Fixture catalog: static reference data for every fixture kind
//!
//! The catalog is versioned static data, not computed. It is built once at
//! startup and shared by reference; nothing in the engine ever mutates it.
//! The Rule Set and Mutation Engine must only reference kinds present here;
//! an unknown kind from those callers is a programming error. The metrics
//! calculator, by contrast, treats unknown kinds as contributing zero cost
//! and power so a partially-corrupt design stays displayable.

use serde::Serialize;

/// Nominal run length assumed for linear fixtures with no explicit length (feet)
pub const NOMINAL_LINEAR_LENGTH_FT: f64 = 10.0;

/// Pricing and power model for a fixture kind
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum Pricing {
    /// Unit fixtures: one price/wattage/lumens per placed fixture
    Discrete { price: f64, wattage: f64, lumens: f64 },
    /// Run-length fixtures: rates per foot of installed run
    Linear {
        price_per_foot: f64,
        wattage_per_foot: f64,
        lumens_per_foot: f64,
    },
}

/// Catalog entry for one fixture kind
///
/// `color`, `icon` and `description` are display metadata only; no engine
/// invariant depends on them.
#[derive(Debug, Clone, Serialize)]
pub struct FixtureSpec {
    pub pricing: Pricing,
    pub color: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

impl FixtureSpec {
    /// Whether this kind is priced per foot of run
    pub fn is_linear(&self) -> bool {
        matches!(self.pricing, Pricing::Linear { .. })
    }
}

/// Read-only `kind name -> FixtureSpec` lookup
///
/// Entries keep a fixed table order so per-kind iteration (cost breakdowns)
/// is deterministic.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<(&'static str, FixtureSpec)>,
}

impl Catalog {
    /// The standard fixture catalog
    pub fn standard() -> Self {
        let entries = vec![
            (
                "Linear Cove",
                FixtureSpec {
                    pricing: Pricing::Linear {
                        price_per_foot: 50.0,
                        wattage_per_foot: 4.5,
                        lumens_per_foot: 450.0,
                    },
                    color: "#00CED1",
                    icon: "━━━",
                    description: "Continuous LED strip in architectural cove",
                },
            ),
            (
                "Pendant",
                FixtureSpec {
                    pricing: Pricing::Discrete {
                        price: 150.0,
                        wattage: 15.0,
                        lumens: 1200.0,
                    },
                    color: "#FFD700",
                    icon: "⬇◉",
                    description: "Suspended decorative light",
                },
            ),
            (
                "Ceiling Can",
                FixtureSpec {
                    pricing: Pricing::Discrete {
                        price: 75.0,
                        wattage: 12.0,
                        lumens: 1000.0,
                    },
                    color: "#87CEEB",
                    icon: "◉",
                    description: "Recessed downlight",
                },
            ),
            (
                "Wall Sconce",
                FixtureSpec {
                    pricing: Pricing::Discrete {
                        price: 95.0,
                        wattage: 8.0,
                        lumens: 600.0,
                    },
                    color: "#FF6347",
                    icon: "▣",
                    description: "Wall-mounted light",
                },
            ),
            (
                "Track Light",
                FixtureSpec {
                    pricing: Pricing::Discrete {
                        price: 85.0,
                        wattage: 12.0,
                        lumens: 900.0,
                    },
                    color: "#32CD32",
                    icon: "◊",
                    description: "Adjustable track spotlight",
                },
            ),
            (
                "Step Light",
                FixtureSpec {
                    pricing: Pricing::Discrete {
                        price: 65.0,
                        wattage: 3.0,
                        lumens: 150.0,
                    },
                    color: "#FFA500",
                    icon: "▢",
                    description: "Low-level pathway light",
                },
            ),
            (
                "Chandelier",
                FixtureSpec {
                    pricing: Pricing::Discrete {
                        price: 350.0,
                        wattage: 60.0,
                        lumens: 4000.0,
                    },
                    color: "#FF69B4",
                    icon: "✦",
                    description: "Decorative centerpiece",
                },
            ),
        ];

        Self { entries }
    }

    /// Look up a fixture kind by name
    pub fn get(&self, kind: &str) -> Option<&FixtureSpec> {
        self.entries
            .iter()
            .find(|(name, _)| *name == kind)
            .map(|(_, spec)| spec)
    }

    /// Whether the catalog knows this kind
    pub fn contains(&self, kind: &str) -> bool {
        self.get(kind).is_some()
    }

    /// Kind names in fixed table order
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}
