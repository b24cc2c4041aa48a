use crate::node::Node;

use pegsol_common::board::Board;
use pegsol_common::jump::Jump;

/// One step of a reconstructed solution: the board reached by playing
/// `jump`, or the start board when `jump` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub board: Board,
    pub jump: Option<Jump>,
}

/// Walks parent links from `goal` back to the root, then reverses into
/// root-to-goal order. Only the first step carries no jump.
pub fn reconstruct(arena: &[Node], goal: u32) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut current = Some(goal);
    while let Some(index) = current {
        let node = &arena[index as usize];
        steps.push(Step {
            board: node.board.clone(),
            jump: node.jump,
        });
        current = node.parent;
    }
    steps.reverse();
    steps
}
