//! Per-agent perception assembly from world state.
//!
//! Perception is what the decision step sees of the world for one agent:
//! the nearest connected human (with the trust between them and the tool
//! they hold) and the nearest cat tree. It is rebuilt on every decision
//! from the world query, the human registry and the relationship ledger;
//! nothing here is cached.

use catnip_agents::humans::HumanContextRegistry;
use catnip_agents::relationship::RelationshipLedger;
use catnip_agents::tools::{infer_tool_from_item_name, tool_config};
use catnip_agents::world::{CatTree, WorldQuery};
use catnip_types::{Agent, DVec3, HumanId, ToolCategory, ToolId, ToolUse};

/// Read-only world state an agent update consults.
#[derive(Clone, Copy)]
pub struct Environment<'a> {
    /// World queries (ground, trees, avatars).
    pub world: &'a dyn WorldQuery,
    /// Connected humans' tools and cooldowns.
    pub humans: &'a HumanContextRegistry,
    /// Trust between humans and cats.
    pub ledger: &'a RelationshipLedger,
    /// Current simulated time in seconds.
    pub now: f64,
}

/// The nearest human as seen by one agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyHuman {
    /// Human id.
    pub id: HumanId,
    /// Avatar position.
    pub position: DVec3,
    /// Straight-line distance from the agent.
    pub distance: f64,
    /// Trust of the pair.
    pub trust: f64,
    /// Tool the human holds, if any.
    pub tool: Option<ToolId>,
    /// Toy use inside the attention window, if any.
    pub recent_toy_use: Option<ToolUse>,
}

impl NearbyHuman {
    /// Whether the held tool is in `category`.
    pub fn holds(&self, category: ToolCategory) -> bool {
        self.tool
            .is_some_and(|tool| tool_config(tool).category == category)
    }
}

/// The nearest cat tree as seen by one agent.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyTree {
    /// The tree.
    pub tree: CatTree,
    /// Horizontal distance from the agent to the tree base.
    pub distance: f64,
}

/// Everything the decision step needs to know about the surroundings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Perception {
    /// Nearest human within the search radius.
    pub human: Option<NearbyHuman>,
    /// Nearest cat tree anywhere in the world.
    pub tree: Option<NearbyTree>,
}

/// Tool a human holds: the registry first, then the avatar's held item name.
pub fn detect_tool(env: &Environment<'_>, human: HumanId) -> Option<ToolId> {
    env.humans.current_tool(human).or_else(|| {
        env.world
            .equipped_item_name(human)
            .as_deref()
            .and_then(infer_tool_from_item_name)
    })
}

/// Whether `human` currently holds a tool in `category`.
pub fn holds_tool(env: &Environment<'_>, human: HumanId, category: ToolCategory) -> bool {
    detect_tool(env, human).is_some_and(|tool| tool_config(tool).category == category)
}

/// Nearest connected human with a resolvable avatar within `radius`.
///
/// Ties keep the first human in the world's iteration order.
pub fn nearest_human(world: &dyn WorldQuery, position: DVec3, radius: f64) -> Option<(HumanId, DVec3, f64)> {
    let mut best: Option<(HumanId, DVec3, f64)> = None;
    for presence in world.list_connected_humans() {
        let Some(avatar) = presence.avatar_position else {
            continue;
        };
        let distance = position.distance(avatar);
        if distance > radius {
            continue;
        }
        if best.is_none_or(|(_, _, d)| distance < d) {
            best = Some((presence.id, avatar, distance));
        }
    }
    best
}

/// Assemble the perception of one agent.
pub fn perceive(
    agent: &Agent,
    env: &Environment<'_>,
    search_radius: f64,
    toy_use_window: f64,
) -> Perception {
    let human = nearest_human(env.world, agent.position, search_radius).map(
        |(id, position, distance)| NearbyHuman {
            id,
            position,
            distance,
            trust: env.ledger.trust(id, &agent.id),
            tool: detect_tool(env, id),
            recent_toy_use: env
                .humans
                .recent_tool_use(id, toy_use_window, env.now)
                .filter(|tool_use| tool_config(tool_use.tool).category == ToolCategory::Toy),
        },
    );

    let tree = env
        .world
        .find_nearest_tree(agent.position)
        .map(|tree| NearbyTree {
            distance: tree.horizontal_distance(agent.position),
            tree,
        });

    Perception { human, tree }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use catnip_agents::store::AgentStore;
    use catnip_agents::world::StaticWorld;
    use catnip_types::TreeId;

    use super::*;

    fn env<'a>(
        world: &'a StaticWorld,
        humans: &'a HumanContextRegistry,
        ledger: &'a RelationshipLedger,
    ) -> Environment<'a> {
        Environment {
            world,
            humans,
            ledger,
            now: 10.0,
        }
    }

    #[test]
    fn nearest_human_within_radius() {
        let mut world = StaticWorld::flat(0.0);
        world.place_human(HumanId(1), DVec3::new(30.0, 0.0, 0.0));
        world.place_human(HumanId(2), DVec3::new(10.0, 0.0, 0.0));
        world.place_human(HumanId(3), DVec3::new(80.0, 0.0, 0.0));
        world.connect_without_avatar(HumanId(4));
        let (id, _, distance) = nearest_human(&world, DVec3::ZERO, 50.0).unwrap();
        assert_eq!(id, HumanId(2));
        assert!((distance - 10.0).abs() < 1e-9);
        assert!(nearest_human(&world, DVec3::new(200.0, 0.0, 0.0), 50.0).is_none());
    }

    #[test]
    fn tool_falls_back_to_item_name() {
        let mut world = StaticWorld::flat(0.0);
        world.place_human(HumanId(1), DVec3::new(3.0, 0.0, 0.0));
        world.set_equipped_item(HumanId(1), Some("Premium Food Bowl".to_owned()));
        let mut humans = HumanContextRegistry::new();
        let ledger = RelationshipLedger::default();

        let e = env(&world, &humans, &ledger);
        assert_eq!(detect_tool(&e, HumanId(1)), Some(ToolId::PremiumFood));
        assert!(holds_tool(&e, HumanId(1), ToolCategory::Food));

        humans.register(HumanId(1));
        humans.equip_tool(HumanId(1), ToolId::BasicToys, 0.0).unwrap();
        let e = env(&world, &humans, &ledger);
        assert_eq!(detect_tool(&e, HumanId(1)), Some(ToolId::BasicToys));
    }

    #[test]
    fn perceive_reports_trust_and_tree() {
        let mut world = StaticWorld::flat(0.0);
        world.place_human(HumanId(1), DVec3::new(0.0, 0.0, 4.0));
        world.add_tree(CatTree {
            id: TreeId::from("tree_a"),
            base: DVec3::new(6.0, 0.0, 8.0),
            top: DVec3::new(6.0, 5.0, 8.0),
        });
        let humans = HumanContextRegistry::new();
        let mut ledger = RelationshipLedger::default();
        let mut store = AgentStore::new();
        let agent = store.create(None, "Friendly", None, 0.0).clone();
        ledger.adjust(HumanId(1), &agent.id, 0.2, 0.0);

        let perception = perceive(&agent, &env(&world, &humans, &ledger), 50.0, 3.0);
        let human = perception.human.unwrap();
        assert!((human.trust - 0.7).abs() < 1e-9);
        assert!(human.tool.is_none());
        assert!(human.recent_toy_use.is_none());
        let tree = perception.tree.unwrap();
        assert!((tree.distance - 10.0).abs() < 1e-9);
    }
}
