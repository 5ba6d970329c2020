//! Relationship ledger between humans and cats.
//!
//! One [`Relationship`] per (human, agent) pair, created lazily on first
//! access. Trust lives in `[0, 1]`; the score and tier are derived from
//! trust, history length and recency:
//!
//! ```text
//! score = trust * 50 + min(history * 0.5, 30) + max(0, 20 - hours_since_last)
//! ```
//!
//! capped at 100. A fresh relationship starts at score 0 and tier Neutral
//! and is only derived from the formula once trust is first adjusted.

use std::collections::{BTreeMap, VecDeque};

use catnip_types::{
    AgentId, HumanId, InteractionOutcome, InteractionType, RelationshipSnapshot, RelationshipTier,
};
use tracing::debug;

/// Trust of a relationship nobody has touched yet.
pub const INITIAL_TRUST: f64 = 0.5;

/// Number of favorite activities tracked.
const FAVORITE_COUNT: usize = 3;

/// One entry of a relationship's interaction history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionRecord {
    /// What was attempted.
    pub interaction: InteractionType,
    /// Simulated time of the attempt.
    pub timestamp: f64,
    /// How it went.
    pub outcome: InteractionOutcome,
}

/// Relationship between one human and one cat.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    /// The human.
    pub human_id: HumanId,
    /// The cat.
    pub agent_id: AgentId,
    /// Trust in `[0, 1]`.
    pub trust_level: f64,
    /// Derived score in `[0, 100]`.
    pub relationship_score: f64,
    /// Tier derived from the score.
    pub tier: RelationshipTier,
    /// Bounded history, oldest first.
    pub history: VecDeque<InteractionRecord>,
    /// When the relationship was created.
    pub first_interaction: f64,
    /// When trust last changed.
    pub last_interaction: Option<f64>,
    /// Most frequent successful interaction types, best first.
    pub favorite_activities: Vec<InteractionType>,
}

impl Relationship {
    fn new(human_id: HumanId, agent_id: AgentId, now: f64) -> Self {
        Self {
            human_id,
            agent_id,
            trust_level: INITIAL_TRUST,
            relationship_score: 0.0,
            tier: RelationshipTier::Neutral,
            history: VecDeque::new(),
            first_interaction: now,
            last_interaction: None,
            favorite_activities: Vec::new(),
        }
    }

    /// Recompute score and tier together.
    fn recompute(&mut self, now: f64) {
        let hours_since = self.last_interaction.map(|at| (now - at) / 3600.0);
        self.relationship_score = compute_score(self.trust_level, self.history.len(), hours_since);
        self.tier = RelationshipTier::from_score(self.relationship_score);
    }

    fn recompute_favorites(&mut self) {
        let mut counts: BTreeMap<InteractionType, u32> = BTreeMap::new();
        for record in &self.history {
            if record.outcome == InteractionOutcome::Positive {
                let count = counts.entry(record.interaction).or_insert(0);
                *count = count.saturating_add(1);
            }
        }
        let mut ranked: Vec<(InteractionType, u32)> = counts.into_iter().collect();
        // Stable sort keeps declaration order among equal counts.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        self.favorite_activities = ranked
            .into_iter()
            .take(FAVORITE_COUNT)
            .map(|(kind, _)| kind)
            .collect();
    }

    /// Denormalized copy for the agent's social map.
    pub fn snapshot(&self) -> RelationshipSnapshot {
        RelationshipSnapshot {
            trust_level: self.trust_level,
            relationship_score: self.relationship_score,
            tier: self.tier,
            last_interaction: self.last_interaction,
            interaction_count: u32::try_from(self.history.len()).unwrap_or(u32::MAX),
            favorite_activities: self.favorite_activities.clone(),
        }
    }
}

/// Relationship score from its inputs, capped at 100.
///
/// `hours_since_last` of `None` (never interacted) earns no recency bonus.
pub fn compute_score(trust: f64, history_count: usize, hours_since_last: Option<f64>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let history_bonus = (history_count as f64 * 0.5).min(30.0);
    let recency_bonus = hours_since_last.map_or(0.0, |hours| (20.0 - hours).max(0.0));
    (trust * 50.0 + history_bonus + recency_bonus).min(100.0)
}

/// Owns every relationship.
#[derive(Debug, Clone)]
pub struct RelationshipLedger {
    relationships: BTreeMap<(HumanId, AgentId), Relationship>,
    history_cap: usize,
}

impl RelationshipLedger {
    /// Create an empty ledger keeping at most `history_cap` records per pair.
    pub fn new(history_cap: usize) -> Self {
        Self {
            relationships: BTreeMap::new(),
            history_cap,
        }
    }

    /// Get a relationship, creating it with defaults if absent.
    pub fn get(&mut self, human: HumanId, agent: &AgentId, now: f64) -> &Relationship {
        self.entry(human, agent, now)
    }

    /// Look up a relationship without creating it.
    pub fn peek(&self, human: HumanId, agent: &AgentId) -> Option<&Relationship> {
        self.relationships.get(&(human, agent.clone()))
    }

    /// Trust of a pair, or [`INITIAL_TRUST`] if they never met.
    pub fn trust(&self, human: HumanId, agent: &AgentId) -> f64 {
        self.peek(human, agent).map_or(INITIAL_TRUST, |r| r.trust_level)
    }

    /// Change trust by `delta`, clamped to `[0, 1]`, and recompute.
    pub fn adjust(
        &mut self,
        human: HumanId,
        agent: &AgentId,
        delta: f64,
        now: f64,
    ) -> &Relationship {
        let relationship = self.entry(human, agent, now);
        relationship.trust_level = (relationship.trust_level + delta).clamp(0.0, 1.0);
        relationship.last_interaction = Some(now);
        relationship.recompute(now);
        debug!(
            human_id = %human,
            agent_id = %agent,
            trust = relationship.trust_level,
            score = relationship.relationship_score,
            tier = %relationship.tier,
            "Relationship adjusted"
        );
        relationship
    }

    /// Append to the history, evicting the oldest past the cap, and
    /// recompute favorites.
    pub fn record_interaction(
        &mut self,
        human: HumanId,
        agent: &AgentId,
        record: InteractionRecord,
        now: f64,
    ) -> &Relationship {
        let cap = self.history_cap;
        let relationship = self.entry(human, agent, now);
        relationship.history.push_back(record);
        while relationship.history.len() > cap {
            relationship.history.pop_front();
        }
        relationship.recompute_favorites();
        relationship
    }

    /// Drop every relationship of a removed agent.
    pub fn forget_agent(&mut self, agent: &AgentId) {
        self.relationships.retain(|(_, a), _| a != agent);
    }

    /// Number of tracked pairs.
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    /// Whether no pair is tracked.
    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    fn entry(&mut self, human: HumanId, agent: &AgentId, now: f64) -> &mut Relationship {
        self.relationships
            .entry((human, agent.clone()))
            .or_insert_with(|| Relationship::new(human, agent.clone(), now))
    }
}

impl Default for RelationshipLedger {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(kind: InteractionType, outcome: InteractionOutcome, at: f64) -> InteractionRecord {
        InteractionRecord {
            interaction: kind,
            timestamp: at,
            outcome,
        }
    }

    #[test]
    fn fresh_relationship_defaults() {
        let mut ledger = RelationshipLedger::default();
        let rel = ledger.get(HumanId(1), &AgentId::from("cat_001"), 10.0);
        assert!((rel.trust_level - 0.5).abs() < f64::EPSILON);
        assert!(rel.relationship_score.abs() < f64::EPSILON);
        assert_eq!(rel.tier, RelationshipTier::Neutral);
        assert!(rel.last_interaction.is_none());
        assert!((rel.first_interaction - 10.0).abs() < f64::EPSILON);
        assert!(rel.favorite_activities.is_empty());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn reference_scenario_is_close_friends() {
        let mut ledger = RelationshipLedger::default();
        let human = HumanId(1);
        let agent = AgentId::from("cat_001");
        ledger.adjust(human, &agent, 0.5, 0.0);
        for n in 0..20_u32 {
            ledger.record_interaction(
                human,
                &agent,
                record(InteractionType::Pet, InteractionOutcome::Positive, f64::from(n)),
                f64::from(n),
            );
        }
        let rel = ledger.adjust(human, &agent, 0.0, 20.0);
        assert!((rel.trust_level - 1.0).abs() < f64::EPSILON);
        assert!((rel.relationship_score - 80.0).abs() < 1e-9);
        assert_eq!(rel.tier, RelationshipTier::CloseFriends);
    }

    #[test]
    fn trust_is_clamped() {
        let mut ledger = RelationshipLedger::default();
        let agent = AgentId::from("cat_001");
        assert!((ledger.adjust(HumanId(1), &agent, 5.0, 0.0).trust_level - 1.0).abs() < f64::EPSILON);
        assert!(ledger.adjust(HumanId(1), &agent, -5.0, 0.0).trust_level.abs() < f64::EPSILON);
    }

    #[test]
    fn recency_bonus_fades_over_hours() {
        assert!((compute_score(0.5, 0, Some(0.0)) - 45.0).abs() < 1e-9);
        assert!((compute_score(0.5, 0, Some(10.0)) - 35.0).abs() < 1e-9);
        assert!((compute_score(0.5, 0, Some(30.0)) - 25.0).abs() < 1e-9);
        assert!((compute_score(0.5, 0, None) - 25.0).abs() < 1e-9);
        assert!((compute_score(1.0, 500, Some(0.0)) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn history_is_capped_fifo() {
        let mut ledger = RelationshipLedger::new(50);
        let human = HumanId(3);
        let agent = AgentId::from("cat_001");
        for n in 0..60_u32 {
            ledger.record_interaction(
                human,
                &agent,
                record(InteractionType::Feed, InteractionOutcome::Positive, f64::from(n)),
                f64::from(n),
            );
        }
        let rel = ledger.peek(human, &agent).unwrap();
        assert_eq!(rel.history.len(), 50);
        assert!((rel.history.front().map_or(-1.0, |r| r.timestamp) - 10.0).abs() < f64::EPSILON);
        assert!((rel.history.back().map_or(-1.0, |r| r.timestamp) - 59.0).abs() < f64::EPSILON);
    }

    #[test]
    fn favorites_rank_positive_outcomes_only() {
        let mut ledger = RelationshipLedger::default();
        let human = HumanId(1);
        let agent = AgentId::from("cat_001");
        let entries = [
            (InteractionType::Play, InteractionOutcome::Positive),
            (InteractionType::Play, InteractionOutcome::Positive),
            (InteractionType::Feed, InteractionOutcome::Positive),
            (InteractionType::Hold, InteractionOutcome::Negative),
            (InteractionType::Hold, InteractionOutcome::Negative),
            (InteractionType::Hold, InteractionOutcome::Negative),
            (InteractionType::Pet, InteractionOutcome::Positive),
        ];
        for (kind, outcome) in entries {
            ledger.record_interaction(human, &agent, record(kind, outcome, 0.0), 0.0);
        }
        let rel = ledger.get(human, &agent, 0.0);
        assert_eq!(
            rel.favorite_activities,
            vec![InteractionType::Play, InteractionType::Pet, InteractionType::Feed]
        );
    }

    #[test]
    fn forget_agent_drops_pairs() {
        let mut ledger = RelationshipLedger::default();
        let a = AgentId::from("a");
        let b = AgentId::from("b");
        ledger.get(HumanId(1), &a, 0.0);
        ledger.get(HumanId(2), &a, 0.0);
        ledger.get(HumanId(1), &b, 0.0);
        ledger.forget_agent(&a);
        assert_eq!(ledger.len(), 1);
        assert!(ledger.peek(HumanId(1), &b).is_some());
    }
}
