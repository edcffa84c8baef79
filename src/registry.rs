use std::{collections::HashMap, ops::Index, sync::Arc};

use log::trace;
use smallvec::SmallVec;

use crate::grid::Grid;
use crate::state::Configuration;

/// Index of a node in its [`Registry`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct StateId(usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// `(from, to)`; `from` is always the node the edge was generated for.
pub type Edge = (StateId, StateId);

pub type Edges = SmallVec<[Edge; 8]>;

/// The one node standing for a configuration, with its outgoing edges once
/// they have been asked for.
#[derive(Debug)]
pub struct StateNode {
    grid: Arc<Grid>,
    configuration: Configuration,
    edges: Option<Edges>,
}

impl StateNode {
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    pub fn is_goal(&self) -> bool {
        self.configuration.is_goal()
    }

    pub fn is_expanded(&self) -> bool {
        self.edges.is_some()
    }
}

/// Owns every node of one search and makes sure equal configurations end up
/// as the same node. Nothing is ever removed.
#[derive(Debug, Default)]
pub struct Registry {
    nodes: Vec<StateNode>,
    index: HashMap<Configuration, StateId>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, configuration: &Configuration) -> Option<StateId> {
        self.index.get(configuration).copied()
    }

    pub fn get_or_create(&mut self, grid: &Arc<Grid>, configuration: Configuration) -> StateId {
        if let Some(id) = self.get(&configuration) {
            return id;
        }

        let id = StateId(self.nodes.len());
        self.index.insert(configuration.clone(), id);
        self.nodes.push(StateNode {
            grid: Arc::clone(grid),
            configuration,
            edges: None,
        });

        id
    }

    /// Outgoing edges of `id`, generated on first use and cached after that.
    pub fn successors(&mut self, id: StateId) -> &[Edge] {
        if !self[id].is_expanded() {
            let edges = self.expand(id);
            self.nodes[id.index()].edges = Some(edges);
        }

        self[id].edges.as_deref().unwrap_or_default()
    }

    fn expand(&mut self, id: StateId) -> Edges {
        let node = &self[id];
        let grid = Arc::clone(&node.grid);
        let next = node.configuration.successors(&grid);

        let edges: Edges = next
            .into_iter()
            .map(|configuration| (id, self.get_or_create(&grid, configuration)))
            .collect();

        trace!(
            "expanded {:?} into {} edges, {} states known",
            id,
            edges.len(),
            self.len()
        );

        edges
    }
}

impl Index<StateId> for Registry {
    type Output = StateNode;
    fn index(&self, id: StateId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parse_map;

    const MAP: &str = "
*+*+*
+   +
a+@ A
+   +
*+*+*
";

    #[test]
    fn equal_configurations_share_a_node() {
        let puzzle = parse_map(MAP).unwrap();
        let mut registry = Registry::new();

        let first = registry.get_or_create(&puzzle.grid, puzzle.initial.clone());
        let second = registry.get_or_create(&puzzle.grid, puzzle.initial.clone());

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&puzzle.initial), Some(first));
        assert_eq!(registry[first].configuration(), &puzzle.initial);
    }

    #[test]
    fn expansion_is_cached() {
        let puzzle = parse_map(MAP).unwrap();
        let mut registry = Registry::new();
        let start = registry.get_or_create(&puzzle.grid, puzzle.initial.clone());
        assert!(!registry[start].is_expanded());

        let first = registry.successors(start).to_vec();
        let known = registry.len();
        let second = registry.successors(start).to_vec();

        assert_eq!(first, second);
        assert_eq!(registry.len(), known);
        assert!(registry[start].is_expanded());

        // only left is open from the start: plain move and picking up `a`
        assert_eq!(first.len(), 2);
        assert!(first.iter().all(|&(from, _)| from == start));
        assert_eq!(known, 3);
    }

    #[test]
    fn converging_moves_reuse_nodes() {
        let puzzle = parse_map(MAP).unwrap();
        let mut registry = Registry::new();
        let start = registry.get_or_create(&puzzle.grid, puzzle.initial.clone());

        // left without picking up, then right again: back where we started
        let (_, plain) = registry.successors(start)[0];
        let back: Vec<_> = registry
            .successors(plain)
            .iter()
            .map(|&(_, to)| to)
            .collect();

        assert!(back.contains(&start));
    }
}
