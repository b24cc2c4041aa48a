use anyhow::{Context, Result, bail};
use smallvec::SmallVec;

use crate::jump::Jump;

/// Inline cell capacity, enough for a 9×9 board without heap allocation.
pub const INLINE_CELLS: usize = 81;

/// Jump buffer sized for the densest realistic board position.
pub type JumpList = SmallVec<[Jump; 64]>;

const GLYPH_PEG: char = '#';
const GLYPH_EMPTY: char = '.';
const GLYPH_BLOCKED: char = ' ';

/// The four jump offsets, tried in the order up, down, right, left.
/// The order is observable in which solution a search finds first, so it
/// stays fixed.
const JUMP_OFFSETS: [(i16, i16); 4] = [(-2, 0), (2, 0), (0, 2), (0, -2)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Peg,
    Empty,
    Blocked,
}

impl Cell {
    pub fn glyph(self) -> char {
        match self {
            Cell::Peg => GLYPH_PEG,
            Cell::Empty => GLYPH_EMPTY,
            Cell::Blocked => GLYPH_BLOCKED,
        }
    }
}

/// A cell position, row-major from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub fn new(row: u8, col: u8) -> Self {
        Coord { row, col }
    }

    pub fn manhattan(self, other: Coord) -> u32 {
        self.row.abs_diff(other.row) as u32 + self.col.abs_diff(other.col) as u32
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// One immutable snapshot of the puzzle.
///
/// Equality and hashing cover the full grid contents, never identity: the
/// solver keys its explored set by board content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cols: u8,
    cells: SmallVec<[Cell; INLINE_CELLS]>,
}

impl Board {
    pub(crate) fn from_grid(cols: u8, cells: SmallVec<[Cell; INLINE_CELLS]>) -> Self {
        debug_assert!(cols > 0 && cells.len() % cols as usize == 0);
        Board { cols, cells }
    }

    pub fn rows(&self) -> u8 {
        (self.cells.len() / self.cols as usize) as u8
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// `None` out of bounds.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        if coord.row >= self.rows() || coord.col >= self.cols {
            return None;
        }
        Some(self.cells[coord.row as usize * self.cols as usize + coord.col as usize])
    }

    fn set(&mut self, coord: Coord, cell: Cell) {
        self.cells[coord.row as usize * self.cols as usize + coord.col as usize] = cell;
    }

    /// All cells with their positions, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let cols = self.cols as usize;
        self.cells.iter().enumerate().map(move |(i, &cell)| {
            (Coord::new((i / cols) as u8, (i % cols) as u8), cell)
        })
    }

    pub fn peg_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Cell::Peg).count()
    }

    /// A jump is legal iff the start cell holds a peg, the landing cell is
    /// open, the two are exactly two apart along one axis, and the jumped
    /// cell in between holds a peg. Every illegal variant answers the same
    /// `false`.
    pub fn is_legal_jump(&self, jump: Jump) -> bool {
        let Some(mid) = jump.mid() else {
            return false;
        };
        self.get(jump.from) == Some(Cell::Peg)
            && self.get(mid) == Some(Cell::Peg)
            && self.get(jump.to) == Some(Cell::Empty)
    }

    /// Plays a jump, returning the resulting board and leaving `self`
    /// untouched. `None` when the jump is illegal.
    pub fn apply_jump(&self, jump: Jump) -> Option<Board> {
        if !self.is_legal_jump(jump) {
            return None;
        }
        let mid = jump.mid()?;
        let mut next = self.clone();
        next.set(jump.from, Cell::Empty);
        next.set(mid, Cell::Empty);
        next.set(jump.to, Cell::Peg);
        Some(next)
    }

    /// A board is solved when a single peg remains, sitting on `target`.
    pub fn is_goal(&self, target: Coord) -> bool {
        self.get(target) == Some(Cell::Peg) && self.peg_count() == 1
    }

    /// Collects every legal jump into `out`, scanning pegs row-major and
    /// trying the directions up, down, right, left.
    pub fn legal_jumps_into(&self, out: &mut JumpList) {
        let rows = self.rows() as i16;
        let cols = self.cols as i16;
        for (from, cell) in self.cells() {
            if cell != Cell::Peg {
                continue;
            }
            for (dr, dc) in JUMP_OFFSETS {
                let row = from.row as i16 + dr;
                let col = from.col as i16 + dc;
                if row < 0 || row >= rows || col < 0 || col >= cols {
                    continue;
                }
                let jump = Jump::new(from, Coord::new(row as u8, col as u8));
                if self.is_legal_jump(jump) {
                    out.push(jump);
                }
            }
        }
    }

    pub fn legal_jumps(&self) -> JumpList {
        let mut jumps = JumpList::new();
        self.legal_jumps_into(&mut jumps);
        jumps
    }

    /// Parses a character grid: `#` peg, `.` empty, space blocked. Short
    /// lines are padded with blocked cells. A trailing `Target: row,col`
    /// line designates the goal cell.
    pub fn parse(content: &str) -> Result<(Board, Option<Coord>)> {
        let mut grid: Vec<Vec<Cell>> = Vec::new();
        let mut target = None;

        for line in content.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            if let Some(rest) = line.strip_prefix("Target:") {
                let (row, col) = rest
                    .trim()
                    .split_once(',')
                    .context("Invalid target, expected `row,col`")?;
                target = Some(Coord::new(
                    row.trim().parse().context("Invalid target row")?,
                    col.trim().parse().context("Invalid target column")?,
                ));
                continue;
            }
            let mut cells = Vec::with_capacity(line.len());
            for ch in line.chars() {
                cells.push(match ch {
                    GLYPH_PEG => Cell::Peg,
                    GLYPH_EMPTY => Cell::Empty,
                    GLYPH_BLOCKED => Cell::Blocked,
                    _ => bail!("Invalid board character {ch:?} at '{line}'"),
                });
            }
            grid.push(cells);
        }

        if grid.is_empty() {
            bail!("Board is empty");
        }
        let width = grid.iter().map(|row| row.len()).max().unwrap_or(0);
        let cols = u8::try_from(width).context("Board is too wide")?;
        u8::try_from(grid.len()).context("Board is too tall")?;

        let mut cells = SmallVec::new();
        for mut row in grid {
            row.resize(width, Cell::Blocked);
            cells.extend(row);
        }
        Ok((Board::from_grid(cols, cells), target))
    }

    /// Renders the grid in the same format `parse` reads: blocked cells
    /// blank, pegs and holes as glyphs.
    pub fn pretty_print(&self) -> String {
        let mut output = String::new();
        for row in 0..self.rows() {
            if row > 0 {
                output.push('\n');
            }
            let mut line = String::new();
            for col in 0..self.cols {
                line.push(
                    self.get(Coord::new(row, col))
                        .map(Cell::glyph)
                        .unwrap_or(GLYPH_BLOCKED),
                );
            }
            output.push_str(line.trim_end());
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use std::collections::HashSet;

    fn board(content: &str) -> Board {
        Board::parse(content).unwrap().0
    }

    fn mirrored(board: &Board) -> Board {
        let cols = board.cols as usize;
        let mut cells = board.cells.clone();
        for row in cells.chunks_mut(cols) {
            row.reverse();
        }
        Board::from_grid(board.cols, cells)
    }

    fn mirrored_jump(jump: Jump, cols: u8) -> Jump {
        let flip = |c: Coord| Coord::new(c.row, cols - 1 - c.col);
        Jump::new(flip(jump.from), flip(jump.to))
    }

    #[test]
    fn test_parse_round_trips() {
        const BOARD_STR: &str = "  ###\n  ###\n#######\n###.###\n#######\n  ###\n  ###";
        let parsed = board(BOARD_STR);
        assert_eq!(parsed.rows(), 7);
        assert_eq!(parsed.cols(), 7);
        assert_eq!(parsed.peg_count(), 32);
        assert_eq!(parsed.pretty_print(), BOARD_STR);
        assert_eq!(board(&parsed.pretty_print()), parsed);
    }

    #[test]
    fn test_parse_reads_target_line() {
        let (parsed, target) = Board::parse("##.\n\nTarget: 0, 2\n").unwrap();
        assert_eq!(parsed.rows(), 1);
        assert_eq!(target, Some(Coord::new(0, 2)));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Board::parse("").is_err());
        assert!(Board::parse("##X##").is_err());
        assert!(Board::parse("###\nTarget: 0;1").is_err());
    }

    #[test]
    fn test_jump_legality() {
        let b = board("##.#\n....\n#...\n#...\n#...");
        // the one legal jump on this board
        assert!(b.is_legal_jump(Jump::new(Coord::new(0, 0), Coord::new(0, 2))));
        // jumping over an empty cell
        assert!(!b.is_legal_jump(Jump::new(Coord::new(0, 3), Coord::new(0, 1))));
        // landing on a peg
        assert!(!b.is_legal_jump(Jump::new(Coord::new(4, 0), Coord::new(2, 0))));
        // out of bounds
        assert!(!b.is_legal_jump(Jump::new(Coord::new(0, 3), Coord::new(0, 5))));
        // wrong distance
        assert!(!b.is_legal_jump(Jump::new(Coord::new(0, 0), Coord::new(0, 1))));
        assert!(!b.is_legal_jump(Jump::new(Coord::new(0, 0), Coord::new(0, 3))));
        // diagonal
        assert!(!b.is_legal_jump(Jump::new(Coord::new(2, 0), Coord::new(0, 2))));
    }

    #[test]
    fn test_jump_over_blocked_cell_is_illegal() {
        let b = board("# .\n...\n...");
        assert!(!b.is_legal_jump(Jump::new(Coord::new(0, 0), Coord::new(0, 2))));
        // landing on a blocked cell
        let b = board("## \n...\n...");
        assert!(!b.is_legal_jump(Jump::new(Coord::new(0, 0), Coord::new(0, 2))));
    }

    #[test]
    fn test_apply_jump_leaves_original_untouched() {
        let b = board("##.");
        let jump = Jump::new(Coord::new(0, 0), Coord::new(0, 2));
        let next = b.apply_jump(jump).unwrap();
        assert_eq!(b.peg_count(), 2);
        assert_eq!(next.peg_count(), 1);
        assert_eq!(next.get(Coord::new(0, 0)), Some(Cell::Empty));
        assert_eq!(next.get(Coord::new(0, 1)), Some(Cell::Empty));
        assert_eq!(next.get(Coord::new(0, 2)), Some(Cell::Peg));
        // illegal jumps produce no board at all
        assert_eq!(next.apply_jump(jump), None);
    }

    #[test]
    fn test_goal_requires_single_peg_on_target() {
        let target = Coord::new(0, 2);
        assert!(board("..#").is_goal(target));
        assert!(!board("#.#").is_goal(target));
        assert!(!board("#..").is_goal(target));
        assert!(!board("...").is_goal(target));
    }

    #[test]
    fn test_jump_enumeration_order_is_fixed() {
        // the hole at (2,2) is reachable from all four directions
        let b = board("..#..\n..#..\n##.##\n..#..\n..#..");
        let jumps: Vec<String> = b.legal_jumps().iter().map(|j| j.to_string()).collect();
        // row-major over pegs, directions up/down/right/left per peg
        assert_eq!(
            jumps,
            [
                "(0,2)->(2,2)",
                "(2,0)->(2,2)",
                "(2,4)->(2,2)",
                "(4,2)->(2,2)",
            ]
        );
    }

    #[test]
    fn test_dead_position_has_no_jumps() {
        assert!(board("#.#").legal_jumps().is_empty());
        assert!(board("..#").legal_jumps().is_empty());
    }

    #[test]
    fn test_legality_is_mirror_symmetric() {
        for layout in [Layout::english(), Layout::german()] {
            let b = layout.board();
            let flipped = mirrored(b);
            let jumps: HashSet<Jump> = b.legal_jumps().into_iter().collect();
            let flipped_jumps: HashSet<Jump> = flipped.legal_jumps().into_iter().collect();
            let expected: HashSet<Jump> = jumps
                .iter()
                .map(|&j| mirrored_jump(j, b.cols()))
                .collect();
            assert_eq!(flipped_jumps, expected);
        }
    }
}
