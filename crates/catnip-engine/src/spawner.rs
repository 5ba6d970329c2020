//! Demo world and seed content.
//!
//! Builds the in-memory world (ground plane, cat trees, human avatars) from
//! the `agents` section of `catnip-config.yaml`, connects the configured
//! humans with their tools, and spawns the seed cats.

use catnip_agents::world::{CatTree, StaticWorld, WorldQuery};
use catnip_core::config::AgentsConfig;
use catnip_core::observer::AgentObserver;
use catnip_core::service::CatService;
use catnip_types::{AgentId, HumanId, TreeId};
use tracing::info;

use crate::error::EngineError;

/// Build the demo world.
pub fn build_world(config: &AgentsConfig) -> StaticWorld {
    let mut world = config
        .ground_height
        .map_or_else(StaticWorld::void, StaticWorld::flat);

    for tree in &config.trees {
        world.add_tree(CatTree {
            id: TreeId::new(tree.id.as_str()),
            base: tree.base,
            top: tree.top,
        });
    }
    for human in &config.humans {
        let id = HumanId(human.id);
        world.place_human(id, human.position);
        world.set_equipped_item(id, human.equipped_item.clone());
    }

    info!(
        ground = ?config.ground_height,
        trees = config.trees.len(),
        humans = config.humans.len(),
        "Demo world built"
    );
    world
}

/// Register the configured humans and equip their tools.
pub fn connect_humans<W, O>(
    service: &mut CatService<W, O>,
    config: &AgentsConfig,
) -> Result<(), EngineError>
where
    W: WorldQuery,
    O: AgentObserver,
{
    for human in &config.humans {
        let id = HumanId(human.id);
        service.register_human(id);
        if let Some(tool) = human.tool {
            service
                .equip_tool(id, tool)
                .map_err(|e| EngineError::Spawner {
                    message: format!("failed to equip {} for human {id}: {e}", tool.as_str()),
                })?;
        }
    }
    Ok(())
}

/// Spawn the seed cats. Returns their ids in configuration order.
pub fn spawn_seed_agents<W, O>(
    service: &mut CatService<W, O>,
    config: &AgentsConfig,
) -> Result<Vec<AgentId>, EngineError>
where
    W: WorldQuery,
    O: AgentObserver,
{
    let mut spawned = Vec::with_capacity(config.seed_agents.len());
    for seed in &config.seed_agents {
        let id = service.spawn_wild_agent(&seed.archetype, seed.name.clone(), seed.position)?;
        spawned.push(id);
    }
    info!(count = spawned.len(), "Seed cats spawned");
    Ok(spawned)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use catnip_core::config::SimulationConfig;
    use catnip_core::observer::NoOpObserver;
    use catnip_types::{DVec3, ToolCategory};

    use super::*;

    const YAML: &str = r"
agents:
  ground_height: 2.0
  seed_agents:
    - archetype: Friendly
      name: Mochi
    - archetype: Bengal
      position: [4.0, 0.0, 4.0]
  trees:
    - id: tower
      base: [10.0, 0.0, 0.0]
      top: [10.0, 9.0, 0.0]
  humans:
    - id: 1
      position: [0.0, 2.0, 0.0]
      tool: basicToys
    - id: 2
      position: [5.0, 2.0, 5.0]
      equipped_item: Premium Food Bowl
";

    #[test]
    fn seeds_world_humans_and_cats() {
        let config = SimulationConfig::parse(YAML).unwrap();
        let world = build_world(&config.agents);
        assert!(world.find_nearest_tree(DVec3::ZERO).is_some());
        assert_eq!(
            world.equipped_item_name(HumanId(2)).as_deref(),
            Some("Premium Food Bowl")
        );

        let mut service = CatService::new(&config, world, NoOpObserver).unwrap();
        connect_humans(&mut service, &config.agents).unwrap();
        assert!(
            service
                .state()
                .humans
                .is_tool_type(HumanId(1), ToolCategory::Toy)
        );

        let ids = spawn_seed_agents(&mut service, &config.agents).unwrap();
        assert_eq!(ids.len(), 2);
        let first = ids.first().unwrap();
        assert_eq!(service.get_agent(first, None).unwrap().name, "Mochi");
        let second = service.get_agent(ids.last().unwrap(), None).unwrap();
        assert!((second.position - DVec3::new(4.0, 2.1, 4.0)).length() < 1e-9);
    }

    #[test]
    fn locked_tool_fails_startup() {
        let yaml = r"
agents:
  humans:
    - id: 3
      position: [0.0, 0.0, 0.0]
      tool: medicalItems
";
        let config = SimulationConfig::parse(yaml).unwrap();
        let world = build_world(&config.agents);
        let mut service = CatService::new(&config, world, NoOpObserver).unwrap();
        assert!(matches!(
            connect_humans(&mut service, &config.agents),
            Err(EngineError::Spawner { .. })
        ));
    }
}
