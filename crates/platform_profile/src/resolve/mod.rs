//! Resolution engine: turns a flat descriptor registry plus live signals into one ordered
//! chain of active profiles.
//!
//! Every pass builds a fresh [`arena::NodeArena`]; nothing survives between calls, so
//! resolving the same inputs twice yields the same chain.

mod arena;

use std::collections::HashSet;

use arena::{NodeArena, NodeId};

use crate::{PlatformSignals, ProfileRegistry};

/// One active profile in a resolved chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProfile {
    /// Registry name of the profile.
    pub name: String,
    /// Distance from the chain root (`0`).
    pub depth: usize,
    /// Whether this node is the active shell engine. Only the root can be.
    pub is_engine: bool,
}

/// Ordered active-profile chain, most general first and most specific last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileChain {
    profiles: Vec<ResolvedProfile>,
}

impl ProfileChain {
    /// Profiles from root to leaf.
    pub fn profiles(&self) -> &[ResolvedProfile] {
        &self.profiles
    }

    /// Profile names from root to leaf.
    pub fn names(&self) -> Vec<String> {
        self.profiles.iter().map(|p| p.name.clone()).collect()
    }

    /// Most general profile (the engine when one is active).
    pub fn root(&self) -> Option<&ResolvedProfile> {
        self.profiles.first()
    }

    /// Most specific profile.
    pub fn leaf(&self) -> Option<&ResolvedProfile> {
        self.profiles.last()
    }

    /// Active shell engine, if any.
    pub fn engine(&self) -> Option<&ResolvedProfile> {
        self.root().filter(|p| p.is_engine)
    }

    /// Returns whether `name` is part of the chain.
    pub fn contains(&self, name: &str) -> bool {
        self.profiles.iter().any(|p| p.name == name)
    }

    /// Number of profiles in the chain.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Always `false` for chains produced by [`resolve`]; provided for completeness.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

struct Resolver<'a> {
    registry: &'a ProfileRegistry,
    signals: &'a PlatformSignals,
    platform_override: Option<&'a str>,
    arena: NodeArena,
}

impl<'a> Resolver<'a> {
    fn new(registry: &'a ProfileRegistry, signals: &'a PlatformSignals) -> Self {
        Self {
            registry,
            signals,
            platform_override: signals.platform_override(),
            arena: NodeArena::default(),
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self.platform_override {
            Some(value) => PlatformSignals::test_query(value, name),
            None => self
                .registry
                .get(name)
                .is_some_and(|descriptor| descriptor.matches(self.signals)),
        }
    }

    /// Builds a candidate for `name` and returns the root of its upward chain.
    fn match_profile(&mut self, name: &str) -> Option<NodeId> {
        let node = self.arena.alloc(self.registry, name);
        let mut walk = Vec::new();
        self.resolve_root(node, &mut walk)
    }

    /// Depth-first upward walk through `subsets` declarations. The first candidate parent
    /// (registry order) that itself reaches a root is kept. A name revisited on the current
    /// walk counts as "no root".
    fn resolve_root(&mut self, node: NodeId, walk: &mut Vec<String>) -> Option<NodeId> {
        let name = self.arena.node(node).name.clone();
        if walk.contains(&name) {
            tracing::warn!(
                "cyclic `subsets` declaration reaches `{name}` again via {}; ignoring this branch",
                walk.join(" <- ")
            );
            return None;
        }
        if !self.matches(&name) {
            return None;
        }

        let registry = self.registry;
        let parents = registry.subset_parents(&name);
        if parents.is_empty() {
            return Some(node);
        }

        walk.push(name);
        let mut root = None;
        for parent_name in parents {
            let parent = self.arena.alloc(registry, parent_name);
            self.arena.node_mut(parent).child = Some(node);
            if let Some(found) = self.resolve_root(parent, walk) {
                self.arena.node_mut(node).parent = Some(parent);
                root = Some(found);
                break;
            }
        }
        walk.pop();
        root
    }
}

/// Resolves the active profile chain.
///
/// Falls back to a synthesized `default_name` node when no non-engine profile matches, so
/// the returned chain is never empty.
pub fn resolve(
    registry: &ProfileRegistry,
    signals: &PlatformSignals,
    default_name: &str,
) -> ProfileChain {
    let mut resolver = Resolver::new(registry, signals);
    let mut engine: Option<NodeId> = None;
    let mut best: Option<(NodeId, usize)> = None;

    for name in registry.names() {
        let Some(candidate) = resolver.match_profile(name) else {
            continue;
        };

        if resolver.arena.node(candidate).is_engine {
            if let Some(previous) = engine {
                tracing::warn!(
                    "multiple engine profiles matched (`{}` and `{}`); keeping `{}`",
                    resolver.arena.node(previous).name,
                    resolver.arena.node(candidate).name,
                    resolver.arena.node(candidate).name,
                );
            }
            engine = Some(candidate);
            continue;
        }

        let depth = resolver.arena.depth_below(candidate);
        if best.map_or(true, |(_, best_depth)| depth > best_depth) {
            best = Some((candidate, depth));
        }
    }

    let mut arena = resolver.arena;
    let mut root = match best {
        Some((root, _)) => root,
        None => {
            tracing::debug!("no platform profile matched; falling back to `{default_name}`");
            arena.alloc(registry, default_name)
        }
    };

    if let Some(engine) = engine {
        arena.link(engine, root);
        root = engine;
    }

    let mut active: HashSet<String> = arena
        .path_from(root)
        .into_iter()
        .map(|id| arena.node(id).name.clone())
        .collect();
    let mut cursor = Some(root);
    while let Some(id) = cursor {
        insert_supersets(&mut arena, registry, id, engine == Some(id), &mut active);
        cursor = arena.node(id).child;
    }

    let root = arena.root_of(root);
    arena.assign_depths(root);

    let profiles = arena
        .path_from(root)
        .into_iter()
        .map(|id| {
            let node = arena.node(id);
            ResolvedProfile {
                name: node.name.clone(),
                depth: node.depth,
                is_engine: engine == Some(id),
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        "resolved platform chain: {}",
        profiles
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(" > ")
    );

    ProfileChain { profiles }
}

/// Interposes the declared superset chain of `id` directly above it.
fn insert_supersets(
    arena: &mut NodeArena,
    registry: &ProfileRegistry,
    id: NodeId,
    is_active_engine: bool,
    active: &mut HashSet<String>,
) {
    if is_active_engine {
        if let Some(superset) = registry
            .get(&arena.node(id).name)
            .and_then(|d| d.superset_name())
        {
            tracing::debug!(
                "engine `{}` stays the chain root; superset `{superset}` ignored",
                arena.node(id).name
            );
        }
        return;
    }

    let mut current = id;
    loop {
        let name = arena.node(current).name.clone();
        let Some(superset) = registry.get(&name).and_then(|d| d.superset_name()) else {
            break;
        };
        if !active.insert(superset.to_string()) {
            tracing::debug!("superset `{superset}` of `{name}` is already active; not inserted");
            break;
        }
        current = arena.insert_above(registry, current, superset);
    }
}
