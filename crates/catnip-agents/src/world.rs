//! World-query capabilities the simulation calls into.
//!
//! Ground raycasts, tagged-object discovery and avatar lookup belong to the
//! host environment. [`WorldQuery`] is the seam; [`StaticWorld`] is a plain
//! in-memory implementation with flat ground used by the engine binary and
//! by tests.

use std::collections::BTreeMap;

use catnip_types::{DVec3, HumanId, TreeId};

/// Height added above a ground hit so agents stand on, not in, the surface.
pub const GROUND_CLEARANCE: f64 = 0.1;

/// A climbable object and the point on its top platform.
#[derive(Debug, Clone, PartialEq)]
pub struct CatTree {
    /// Tag identifier of the tree.
    pub id: TreeId,
    /// Position of the tree's main part.
    pub base: DVec3,
    /// Point on the top platform a cat stands on.
    pub top: DVec3,
}

impl CatTree {
    /// Horizontal (XZ) distance from `point` to the tree.
    pub fn horizontal_distance(&self, point: DVec3) -> f64 {
        horizontal_distance(self.base, point)
    }
}

/// A connected human and where their avatar is, if it has one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HumanPresence {
    /// The human.
    pub id: HumanId,
    /// Root position of their avatar, if resolvable.
    pub avatar_position: Option<DVec3>,
}

/// Capabilities the host world provides.
pub trait WorldQuery: Send + Sync {
    /// Surface point beneath (or at) `point`, if any walkable surface exists.
    fn find_ground_position(&self, point: DVec3) -> Option<DVec3>;

    /// Nearest tagged climbable object to `point`.
    fn find_nearest_tree(&self, point: DVec3) -> Option<CatTree>;

    /// Every connected human.
    fn list_connected_humans(&self) -> Vec<HumanPresence>;

    /// Avatar position of one human, if connected and resolvable.
    fn resolve_human_avatar_position(&self, human: HumanId) -> Option<DVec3>;

    /// Display name of the item the human's avatar is holding.
    fn equipped_item_name(&self, _human: HumanId) -> Option<String> {
        None
    }
}

/// Snap `point` onto the ground plus [`GROUND_CLEARANCE`].
///
/// Returns `point` unchanged when no surface is found.
pub fn snap_to_ground(world: &dyn WorldQuery, point: DVec3) -> DVec3 {
    world
        .find_ground_position(point)
        .map_or(point, |hit| DVec3::new(point.x, hit.y + GROUND_CLEARANCE, point.z))
}

/// Distance between two points ignoring height.
pub fn horizontal_distance(a: DVec3, b: DVec3) -> f64 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    dx.hypot(dz)
}

// ---------------------------------------------------------------------------
// StaticWorld
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
struct Avatar {
    position: Option<DVec3>,
    equipped_item: Option<String>,
}

/// In-memory world with an optional flat ground plane.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticWorld {
    ground_height: Option<f64>,
    trees: Vec<CatTree>,
    humans: BTreeMap<HumanId, Avatar>,
}

impl StaticWorld {
    /// A world whose ground is the plane `y = height`.
    pub fn flat(height: f64) -> Self {
        Self {
            ground_height: Some(height),
            ..Self::default()
        }
    }

    /// A world with no ground at all.
    pub fn void() -> Self {
        Self::default()
    }

    /// Add a cat tree.
    pub fn add_tree(&mut self, tree: CatTree) {
        self.trees.push(tree);
    }

    /// Connect a human (or move them) with an avatar at `position`.
    pub fn place_human(&mut self, human: HumanId, position: DVec3) {
        self.humans.entry(human).or_default().position = Some(position);
    }

    /// Connect a human whose avatar cannot be resolved.
    pub fn connect_without_avatar(&mut self, human: HumanId) {
        self.humans.entry(human).or_default().position = None;
    }

    /// Disconnect a human.
    pub fn remove_human(&mut self, human: HumanId) {
        self.humans.remove(&human);
    }

    /// Set the display name of the item the human's avatar holds.
    pub fn set_equipped_item(&mut self, human: HumanId, item: Option<String>) {
        if let Some(avatar) = self.humans.get_mut(&human) {
            avatar.equipped_item = item;
        }
    }
}

impl WorldQuery for StaticWorld {
    fn find_ground_position(&self, point: DVec3) -> Option<DVec3> {
        self.ground_height.map(|y| DVec3::new(point.x, y, point.z))
    }

    fn find_nearest_tree(&self, point: DVec3) -> Option<CatTree> {
        self.trees
            .iter()
            .min_by(|a, b| a.base.distance(point).total_cmp(&b.base.distance(point)))
            .cloned()
    }

    fn list_connected_humans(&self) -> Vec<HumanPresence> {
        self.humans
            .iter()
            .map(|(id, avatar)| HumanPresence {
                id: *id,
                avatar_position: avatar.position,
            })
            .collect()
    }

    fn resolve_human_avatar_position(&self, human: HumanId) -> Option<DVec3> {
        self.humans.get(&human).and_then(|avatar| avatar.position)
    }

    fn equipped_item_name(&self, human: HumanId) -> Option<String> {
        self.humans
            .get(&human)
            .and_then(|avatar| avatar.equipped_item.clone())
    }
}
