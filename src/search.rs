use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use log::debug;

use crate::grid::Grid;
use crate::registry::{Edges, Registry, StateId};
use crate::state::Configuration;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Color {
    /// not reached yet
    White,
    /// queued
    Gray,
    /// successors pulled
    Black,
}

/// Counters for one search.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// nodes whose successors were pulled
    pub expanded: usize,
    /// edges seen while doing so
    pub generated: usize,
    /// distinct configurations in the registry
    pub states: usize,
}

/// Breadth-first search over the state graph of one puzzle.
///
/// The graph is built as it is walked: the registry only learns about a
/// node's neighbours when the node is dequeued.
#[derive(Debug)]
pub struct Search {
    registry: Registry,
    start: StateId,
    stats: Stats,
}

impl Search {
    pub fn new(grid: Arc<Grid>, initial: Configuration) -> Search {
        let mut registry = Registry::new();
        let start = registry.get_or_create(&grid, initial);

        Search {
            registry,
            start,
            stats: Stats::default(),
        }
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn stats(&self) -> Stats {
        Stats {
            states: self.registry.len(),
            ..self.stats
        }
    }

    /// Finds a shortest path from the start to a configuration with every pet
    /// at home, start and goal included. `None` when no goal is reachable.
    ///
    /// Stops as soon as the first goal is discovered; breadth-first order
    /// means no goal found later can be closer.
    pub fn run(&mut self) -> Option<Vec<StateId>> {
        if self.registry[self.start].is_goal() {
            return Some(vec![self.start]);
        }

        let mut colors = vec![Color::Gray];
        let mut predecessors = HashMap::new();
        let mut queue = VecDeque::from([self.start]);

        while let Some(u) = queue.pop_front() {
            let edges: Edges = self.registry.successors(u).into();
            self.stats.expanded += 1;
            self.stats.generated += edges.len();
            colors.resize(self.registry.len(), Color::White);

            for (_, w) in edges {
                if colors[w.index()] != Color::White {
                    continue;
                }

                colors[w.index()] = Color::Gray;
                predecessors.insert(w, u);

                if self.registry[w].is_goal() {
                    return Some(path_to(&predecessors, w));
                }

                queue.push_back(w);
            }

            colors[u.index()] = Color::Black;
        }

        None
    }
}

// walks predecessors back from `goal` until the start, which has none
fn path_to(predecessors: &HashMap<StateId, StateId>, goal: StateId) -> Vec<StateId> {
    let mut path: Vec<_> =
        std::iter::successors(Some(goal), |s| predecessors.get(s).copied()).collect();
    path.reverse();
    path
}

/// What a finished search hands to the outside world.
#[derive(Clone, Debug)]
pub struct Solution {
    /// start to goal, or `None` if the goal can't be reached
    pub path: Option<Vec<Configuration>>,
    pub stats: Stats,
}

impl Solution {
    pub fn is_solved(&self) -> bool {
        self.path.is_some()
    }

    /// Number of car moves, `Some(0)` if the puzzle started out solved.
    pub fn moves(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len() - 1)
    }

    /// Path configurations one at a time; nothing when unsolved.
    #[auto_enums::auto_enum(Iterator)]
    pub fn steps(&self) -> impl Iterator<Item = &Configuration> {
        match &self.path {
            Some(path) => path.iter(),
            None => std::iter::empty(),
        }
    }
}

pub fn solve(grid: &Arc<Grid>, initial: &Configuration) -> Solution {
    let mut search = Search::new(Arc::clone(grid), initial.clone());
    debug!(
        "searching from car at {} with {} pets",
        initial.car(),
        initial.pets().len()
    );

    let found = search.run();
    let stats = search.stats();
    debug!(
        "expanded {} states, generated {} edges, {} distinct states",
        stats.expanded, stats.generated, stats.states
    );

    let path = found.map(|ids| {
        ids.into_iter()
            .map(|id| search.registry()[id].configuration().clone())
            .collect()
    });

    Solution { path, stats }
}
