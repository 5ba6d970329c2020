//! Human context registry.
//!
//! Tracks, per connected human: the equipped tool, unlocked tools, per-action
//! tool cooldowns, the most recent tool use, the cats currently near them and
//! their UI preferences. The decision engine reads this registry to react to
//! humans holding or using tools.

use std::collections::{BTreeMap, BTreeSet};

use catnip_types::{AgentId, DVec3, HumanId, ToolAction, ToolCategory, ToolId, ToolUse};
use serde::Deserialize;
use tracing::debug;

use crate::error::HumanError;
use crate::tools::{DEFAULT_UNLOCKED, tool_config};

/// Rendering quality preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationQuality {
    /// Reduced animation.
    Low,
    /// Balanced.
    Medium,
    /// Full animation.
    #[default]
    High,
}

/// Visual preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualPreferences {
    /// Show mood icons above cats.
    pub show_mood_indicators: bool,
    /// Show relationship bars.
    pub show_relationship_bars: bool,
    /// Animation quality.
    pub animation_quality: AnimationQuality,
}

impl Default for VisualPreferences {
    fn default() -> Self {
        Self {
            show_mood_indicators: true,
            show_relationship_bars: true,
            animation_quality: AnimationQuality::High,
        }
    }
}

/// UI and behavior preferences of a human.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanSettings {
    /// Tool preselected in the UI.
    pub selected_tool: Option<ToolId>,
    /// Interact automatically when near a cat.
    pub auto_interact: bool,
    /// Receive cat notifications.
    pub cat_notifications: bool,
    /// Visual preferences.
    pub visual: VisualPreferences,
}

impl Default for HumanSettings {
    fn default() -> Self {
        Self {
            selected_tool: None,
            auto_interact: false,
            cat_notifications: true,
            visual: VisualPreferences::default(),
        }
    }
}

/// Partial update of [`HumanSettings`]; `None` fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    /// New preselected tool; `Some(None)` clears it.
    pub selected_tool: Option<Option<ToolId>>,
    /// New auto-interact flag.
    pub auto_interact: Option<bool>,
    /// New notification flag.
    pub cat_notifications: Option<bool>,
    /// New mood indicator flag.
    pub show_mood_indicators: Option<bool>,
    /// New relationship bar flag.
    pub show_relationship_bars: Option<bool>,
    /// New animation quality.
    pub animation_quality: Option<AnimationQuality>,
}

/// Everything tracked for one human.
#[derive(Debug, Clone, PartialEq)]
pub struct HumanContext {
    /// Equipped tool, `None` when empty-handed.
    pub current_tool: Option<ToolId>,
    /// Tools the human may equip.
    pub unlocked_tools: BTreeSet<ToolId>,
    /// Cooldown expiry per tool action.
    pub tool_cooldowns: BTreeMap<ToolAction, f64>,
    /// Most recent tool use.
    pub last_tool_use: Option<ToolUse>,
    /// When the equipped tool last changed.
    pub last_tool_change: Option<f64>,
    /// Cats currently near this human.
    pub nearby_agents: Vec<AgentId>,
    /// Preferences.
    pub settings: HumanSettings,
}

impl Default for HumanContext {
    fn default() -> Self {
        Self {
            current_tool: None,
            unlocked_tools: DEFAULT_UNLOCKED.into_iter().collect(),
            tool_cooldowns: BTreeMap::new(),
            last_tool_use: None,
            last_tool_change: None,
            nearby_agents: Vec::new(),
            settings: HumanSettings::default(),
        }
    }
}

/// Registry of connected humans.
#[derive(Debug, Clone, Default)]
pub struct HumanContextRegistry {
    humans: BTreeMap<HumanId, HumanContext>,
}

impl HumanContextRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a human with default context, replacing any previous one.
    pub fn register(&mut self, human: HumanId) {
        debug!(human_id = %human, "Human registered");
        self.humans.insert(human, HumanContext::default());
    }

    /// Forget a human.
    pub fn unregister(&mut self, human: HumanId) -> bool {
        self.humans.remove(&human).is_some()
    }

    /// Context of a human.
    pub fn get(&self, human: HumanId) -> Option<&HumanContext> {
        self.humans.get(&human)
    }

    /// Whether the human is registered.
    pub fn contains(&self, human: HumanId) -> bool {
        self.humans.contains_key(&human)
    }

    fn context_mut(&mut self, human: HumanId) -> Result<&mut HumanContext, HumanError> {
        self.humans.get_mut(&human).ok_or(HumanError::NotFound(human))
    }

    // -----------------------------------------------------------------------
    // Tools
    // -----------------------------------------------------------------------

    /// Equip an unlocked tool.
    pub fn equip_tool(&mut self, human: HumanId, tool: ToolId, now: f64) -> Result<(), HumanError> {
        let context = self.context_mut(human)?;
        if !context.unlocked_tools.contains(&tool) {
            return Err(HumanError::ToolNotUnlocked(tool));
        }
        context.current_tool = Some(tool);
        context.last_tool_change = Some(now);
        debug!(human_id = %human, %tool, "Tool equipped");
        Ok(())
    }

    /// Put the equipped tool away.
    pub fn unequip_tool(&mut self, human: HumanId, now: f64) -> Result<(), HumanError> {
        let context = self.context_mut(human)?;
        context.current_tool = None;
        context.last_tool_change = Some(now);
        Ok(())
    }

    /// Equipped tool of a human.
    pub fn current_tool(&self, human: HumanId) -> Option<ToolId> {
        self.get(human).and_then(|c| c.current_tool)
    }

    /// Whether the human has unlocked `tool`.
    pub fn has_tool(&self, human: HumanId, tool: ToolId) -> bool {
        self.get(human).is_some_and(|c| c.unlocked_tools.contains(&tool))
    }

    /// Unlock a tool. Returns whether it was newly unlocked.
    pub fn unlock_tool(&mut self, human: HumanId, tool: ToolId) -> Result<bool, HumanError> {
        Ok(self.context_mut(human)?.unlocked_tools.insert(tool))
    }

    /// Whether the equipped tool belongs to `category`.
    pub fn is_tool_type(&self, human: HumanId, category: ToolCategory) -> bool {
        self.current_tool(human)
            .is_some_and(|tool| tool_config(tool).category == category)
    }

    // -----------------------------------------------------------------------
    // Cooldowns
    // -----------------------------------------------------------------------

    /// Seconds left on an action's cooldown; zero when ready.
    pub fn cooldown_remaining(&self, human: HumanId, action: ToolAction, now: f64) -> f64 {
        self.get(human)
            .and_then(|c| c.tool_cooldowns.get(&action))
            .map_or(0.0, |expiry| (expiry - now).max(0.0))
    }

    /// Whether the action is off cooldown.
    pub fn can_interact(&self, human: HumanId, action: ToolAction, now: f64) -> bool {
        self.cooldown_remaining(human, action, now) <= 0.0
    }

    /// Start a cooldown of `duration` seconds for an action.
    pub fn set_cooldown(
        &mut self,
        human: HumanId,
        action: ToolAction,
        duration: f64,
        now: f64,
    ) -> Result<(), HumanError> {
        self.context_mut(human)?
            .tool_cooldowns
            .insert(action, now + duration);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Tool use
    // -----------------------------------------------------------------------

    /// Stamp a tool use at `now`.
    pub fn record_tool_use(
        &mut self,
        human: HumanId,
        tool: ToolId,
        position: Option<DVec3>,
        now: f64,
    ) -> Result<ToolUse, HumanError> {
        let tool_use = ToolUse {
            tool,
            position,
            timestamp: now,
        };
        self.context_mut(human)?.last_tool_use = Some(tool_use);
        Ok(tool_use)
    }

    /// The last tool use if it happened within `within` seconds of `now`.
    pub fn recent_tool_use(&self, human: HumanId, within: f64, now: f64) -> Option<ToolUse> {
        self.get(human)
            .and_then(|c| c.last_tool_use)
            .filter(|tool_use| now - tool_use.timestamp <= within)
    }

    /// Use the equipped tool: checks its cooldown, records the use and starts
    /// the cooldown.
    pub fn use_tool(
        &mut self,
        human: HumanId,
        position: Option<DVec3>,
        now: f64,
    ) -> Result<ToolUse, HumanError> {
        let tool = self
            .context_mut(human)?
            .current_tool
            .ok_or(HumanError::NoToolEquipped(human))?;
        let config = tool_config(tool);
        let remaining = self.cooldown_remaining(human, config.action, now);
        if remaining > 0.0 {
            return Err(HumanError::ToolOnCooldown {
                action: config.action,
                remaining,
            });
        }
        let tool_use = self.record_tool_use(human, tool, position, now)?;
        self.set_cooldown(human, config.action, config.cooldown_seconds, now)?;
        debug!(human_id = %human, %tool, "Tool used");
        Ok(tool_use)
    }

    // -----------------------------------------------------------------------
    // Nearby cats and settings
    // -----------------------------------------------------------------------

    /// Replace the list of cats near a human.
    pub fn update_nearby_agents(
        &mut self,
        human: HumanId,
        agents: Vec<AgentId>,
    ) -> Result<(), HumanError> {
        self.context_mut(human)?.nearby_agents = agents;
        Ok(())
    }

    /// Cats near a human.
    pub fn nearby_agents(&self, human: HumanId) -> &[AgentId] {
        self.get(human)
            .map(|c| c.nearby_agents.as_slice())
            .unwrap_or_default()
    }

    /// Merge a partial settings update.
    pub fn update_settings(
        &mut self,
        human: HumanId,
        patch: SettingsPatch,
    ) -> Result<HumanSettings, HumanError> {
        let settings = &mut self.context_mut(human)?.settings;
        if let Some(tool) = patch.selected_tool {
            settings.selected_tool = tool;
        }
        if let Some(flag) = patch.auto_interact {
            settings.auto_interact = flag;
        }
        if let Some(flag) = patch.cat_notifications {
            settings.cat_notifications = flag;
        }
        if let Some(flag) = patch.show_mood_indicators {
            settings.visual.show_mood_indicators = flag;
        }
        if let Some(flag) = patch.show_relationship_bars {
            settings.visual.show_relationship_bars = flag;
        }
        if let Some(quality) = patch.animation_quality {
            settings.visual.animation_quality = quality;
        }
        Ok(*settings)
    }

    /// Drop a removed cat from every nearby list.
    pub fn forget_agent(&mut self, agent: &AgentId) {
        for context in self.humans.values_mut() {
            context.nearby_agents.retain(|a| a != agent);
        }
    }

    /// Iterate registered humans.
    pub fn humans(&self) -> impl Iterator<Item = (&HumanId, &HumanContext)> {
        self.humans.iter()
    }
}
