use crate::heuristic::{distance_sum, jump_delta};
use crate::node::{FrontierEntry, Node};
use crate::path::{Step, reconstruct};

use pegsol_common::board::{Board, Coord};
use pegsol_common::jump::Jump;
use pegsol_common::layout::Layout;

use ahash::RandomState;
use anyhow::Result;
use smallvec::SmallVec;
use std::collections::{BinaryHeap, HashSet};
use std::time::{Duration, Instant};

/// Default cap on created search nodes (each node stores a board snapshot,
/// roughly 150 bytes).
pub const DEFAULT_MAX_NODES: u32 = 10_000_000;

/// Searches `layout` for a jump sequence ending with a single peg on the
/// target cell, giving up once `max_nodes` nodes exist.
pub fn solve(layout: &Layout, max_nodes: u32) -> SolveReport {
    Solver::new(layout).run(max_nodes)
}

/// Best-first search over board states.
///
/// The frontier pops the node with the lowest `f = g + h`, breaking ties
/// toward the most recently created node. Expanded boards enter the
/// explored set and are never expanded again; candidate children whose
/// board is already explored are dropped before they reach the frontier.
#[derive(Debug, Clone)]
pub struct Solver {
    start: Board,
    target: Coord,
    arena: Vec<Node>,
    frontier: BinaryHeap<FrontierEntry>,
    explored: HashSet<Board, RandomState>,
    expanded: u64,
}

impl Solver {
    pub fn new(layout: &Layout) -> Self {
        Solver {
            start: layout.board().clone(),
            target: layout.target(),
            arena: Vec::new(),
            frontier: BinaryHeap::new(),
            explored: HashSet::default(),
            expanded: 0,
        }
    }

    /// Builds a solver for an arbitrary position, running the full layout
    /// validation first. Invalid positions never reach the search loop.
    pub fn with_position(board: Board, target: Coord) -> Result<Self> {
        let layout = Layout::from_board(board, target)?;
        Ok(Self::new(&layout))
    }

    /// Runs the search to one of its three terminal outcomes.
    pub fn run(&mut self, max_nodes: u32) -> SolveReport {
        let timer = Instant::now();
        self.arena.clear();
        self.frontier.clear();
        self.explored.clear();
        self.expanded = 0;

        let h = distance_sum(&self.start, self.target);
        self.arena.push(Node {
            board: self.start.clone(),
            parent: None,
            jump: None,
            g: 0,
            h,
        });
        self.frontier.push(FrontierEntry { index: 0, f: h });

        let mut jumps: SmallVec<[Jump; 64]> = SmallVec::new();
        let outcome = loop {
            let Some(entry) = self.frontier.pop() else {
                break Outcome::Exhausted;
            };
            if self.arena.len() as u32 >= max_nodes {
                break Outcome::OutOfBudget;
            }
            let node = &self.arena[entry.index as usize];
            if self.explored.contains(&node.board) {
                continue;
            }
            if node.board.is_goal(self.target) {
                break Outcome::Solved(Solution {
                    moves: node.g,
                    steps: reconstruct(&self.arena, entry.index),
                });
            }
            self.expand(entry.index, &mut jumps);
        };

        SolveReport {
            outcome,
            expanded: self.expanded,
            elapsed: timer.elapsed(),
        }
    }

    fn expand(&mut self, index: u32, jumps: &mut SmallVec<[Jump; 64]>) {
        let node = &self.arena[index as usize];
        let (g, h) = (node.g, node.h);
        let board = node.board.clone();
        self.explored.insert(board.clone());
        self.expanded += 1;

        jumps.clear();
        board.legal_jumps_into(jumps);
        for &jump in jumps.iter() {
            let Some(child_board) = board.apply_jump(jump) else {
                continue;
            };
            if self.explored.contains(&child_board) {
                continue;
            }
            let child = Node {
                board: child_board,
                parent: Some(index),
                jump: Some(jump),
                g: g + 1,
                h: (h as i64 + jump_delta(jump, self.target)) as u32,
            };
            let child_index = self.arena.len() as u32;
            self.frontier.push(FrontierEntry {
                index: child_index,
                f: child.f(),
            });
            self.arena.push(child);
        }
    }
}

/// A successful search: the ordered steps from the start board to the goal
/// board, `moves` jumps in total.
#[derive(Debug, Clone)]
pub struct Solution {
    pub moves: u32,
    pub steps: Vec<Step>,
}

impl Solution {
    pub fn jumps(&self) -> Vec<Jump> {
        self.steps.iter().filter_map(|step| step.jump).collect()
    }

    pub fn final_board(&self) -> &Board {
        let step = self
            .steps
            .last()
            .expect("a solution always contains the start board");
        &step.board
    }
}

/// How a search run ended.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// A jump sequence reaching the goal was found.
    Solved(Solution),
    /// The frontier ran dry: no jump sequence reaches the goal. A normal
    /// result for unsolvable positions, not an error.
    Exhausted,
    /// The node budget ran out before the search finished.
    OutOfBudget,
}

impl Outcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }
}

#[derive(Debug, Clone)]
pub struct SolveReport {
    pub outcome: Outcome,
    /// Boards taken off the frontier and expanded.
    pub expanded: u64,
    pub elapsed: Duration,
}
