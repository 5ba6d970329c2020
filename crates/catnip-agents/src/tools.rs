//! Tool catalog.
//!
//! Every tool has a category, the action it performs, an effectiveness
//! multiplier and a per-action cooldown. Held items the registry does not
//! know about can still be classified from their display name.

use catnip_types::{ToolAction, ToolCategory, ToolId};

/// Static description of a catalog tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolConfig {
    /// Tool id.
    pub id: ToolId,
    /// Display name.
    pub name: &'static str,
    /// Coarse category.
    pub category: ToolCategory,
    /// Action performed when used.
    pub action: ToolAction,
    /// Effect multiplier.
    pub effectiveness: f64,
    /// Cooldown of `action` after a use, in seconds.
    pub cooldown_seconds: f64,
}

/// Tools every human starts with unlocked.
pub const DEFAULT_UNLOCKED: [ToolId; 2] = [ToolId::BasicFood, ToolId::BasicToys];

/// Catalog entry for a tool.
pub const fn tool_config(id: ToolId) -> ToolConfig {
    let (name, category, action, effectiveness, cooldown_seconds) = match id {
        ToolId::BasicFood => ("Basic Cat Food", ToolCategory::Food, ToolAction::Feed, 1.0, 5.0),
        ToolId::BasicToys => ("Basic Toys", ToolCategory::Toy, ToolAction::Play, 1.0, 3.0),
        ToolId::PremiumFood => ("Premium Cat Food", ToolCategory::Food, ToolAction::Feed, 1.5, 5.0),
        ToolId::PremiumToys => ("Premium Toys", ToolCategory::Toy, ToolAction::Play, 1.5, 3.0),
        ToolId::GroomingTools => ("Grooming Kit", ToolCategory::Grooming, ToolAction::Groom, 1.2, 10.0),
        ToolId::MedicalItems => ("Medical Kit", ToolCategory::Medical, ToolAction::Heal, 2.0, 30.0),
    };
    ToolConfig {
        id,
        name,
        category,
        action,
        effectiveness,
        cooldown_seconds,
    }
}

/// Classify a held item by its display name.
///
/// Substring match, case-insensitive: "food" (premium if the name also says
/// "premium"), "toy", "groom", "medical".
pub fn infer_tool_from_item_name(name: &str) -> Option<ToolId> {
    let lower = name.to_lowercase();
    let premium = lower.contains("premium");
    if lower.contains("food") {
        Some(if premium { ToolId::PremiumFood } else { ToolId::BasicFood })
    } else if lower.contains("toy") {
        Some(if premium { ToolId::PremiumToys } else { ToolId::BasicToys })
    } else if lower.contains("groom") {
        Some(ToolId::GroomingTools)
    } else if lower.contains("medical") {
        Some(ToolId::MedicalItems)
    } else {
        None
    }
}
