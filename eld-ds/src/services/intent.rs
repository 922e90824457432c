//! Chat intent classification
//!
//! Coarse keyword triggers only: case-insensitive substring matching with a
//! fixed priority order, the first matching rule winning. Anything beyond
//! this (actual language understanding) is out of scope by design.

/// Classified purpose of a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Add one fixture of the named catalog kind
    Add(&'static str),
    /// Remove one fixture of the most numerous kind
    Remove,
    /// Explain the design reasoning
    Explain,
    /// Report total cost with a per-kind breakdown
    Cost,
    /// Report energy usage and code compliance
    Energy,
    /// No trigger matched; answer with the canned help text
    Unknown,
}

/// Classify a chat message
///
/// Priority order:
/// 1. add/more + pendant → Add("Pendant")
/// 2. add/more + can/recessed → Add("Ceiling Can")
/// 3. remove/less → Remove
/// 4. why → Explain
/// 5. cost/price → Cost
/// 6. energy/efficiency → Energy
/// 7. fallback → Unknown
///
/// An add/more message naming no known fixture falls through to the later
/// rules rather than producing an Add intent.
pub fn classify(message: &str) -> Intent {
    let lower = message.to_lowercase();

    if lower.contains("add") || lower.contains("more") {
        if lower.contains("pendant") {
            return Intent::Add("Pendant");
        }
        if lower.contains("can") || lower.contains("recessed") {
            return Intent::Add("Ceiling Can");
        }
    }

    if lower.contains("remove") || lower.contains("less") {
        return Intent::Remove;
    }

    if lower.contains("why") {
        return Intent::Explain;
    }

    if lower.contains("cost") || lower.contains("price") {
        return Intent::Cost;
    }

    if lower.contains("energy") || lower.contains("efficiency") {
        return Intent::Energy;
    }

    Intent::Unknown
}

/// Canned response for `Intent::Unknown`
pub const HELP_TEXT: &str = "I can help you adjust the lighting design. You can ask me to \
add or remove fixtures, explain the design choices, or check energy efficiency.";
