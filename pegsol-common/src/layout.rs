use anyhow::{Result, bail};
use smallvec::SmallVec;

use crate::board::{Board, Cell, Coord};

/// A validated board configuration: the starting board plus the cell the
/// last peg must end on. All states of one search share this shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    board: Board,
    target: Coord,
}

impl Layout {
    /// The classic 7×7 cross: 2×2 corners blocked, 32 pegs around an empty
    /// center, target the center cell (3,3).
    pub fn english() -> Self {
        Self::cross(7)
    }

    /// The 9×9 cross variant: 3×3 corners blocked, 44 pegs, target (4,4).
    pub fn german() -> Self {
        Self::cross(9)
    }

    /// A cross-shaped board with a 3-cell-wide arm band: playable cells are
    /// those within the middle three rows or the middle three columns.
    fn cross(size: u8) -> Self {
        let lo = (size - 3) / 2;
        let hi = lo + 2;
        let band = lo..=hi;
        let center = Coord::new(size / 2, size / 2);

        let mut cells = SmallVec::new();
        for row in 0..size {
            for col in 0..size {
                let coord = Coord::new(row, col);
                cells.push(if !band.contains(&row) && !band.contains(&col) {
                    Cell::Blocked
                } else if coord == center {
                    Cell::Empty
                } else {
                    Cell::Peg
                });
            }
        }

        Layout {
            board: Board::from_grid(size, cells),
            target: center,
        }
    }

    /// Builds a layout from an arbitrary board, rejecting configurations a
    /// search could never handle: a blocked or out-of-bounds target, a
    /// board without pegs, or a playable cell that sits on no line of
    /// three playable cells and so could never join or leave a jump.
    pub fn from_board(board: Board, target: Coord) -> Result<Self> {
        match board.get(target) {
            None => bail!("Target cell {target} is outside the board"),
            Some(Cell::Blocked) => bail!("Target cell {target} is blocked"),
            Some(_) => {}
        }
        if board.peg_count() == 0 {
            bail!("Board has no pegs");
        }
        for (coord, cell) in board.cells() {
            if cell != Cell::Blocked && !on_jump_line(&board, coord) {
                bail!("Cell {coord} cannot take part in any jump");
            }
        }
        Ok(Layout { board, target })
    }

    /// Parses the text format of [`Board::parse`]; without an explicit
    /// `Target:` line the goal defaults to the central cell.
    pub fn parse(content: &str) -> Result<Self> {
        let (board, target) = Board::parse(content)?;
        let target =
            target.unwrap_or_else(|| Coord::new(board.rows() / 2, board.cols() / 2));
        Self::from_board(board, target)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn target(&self) -> Coord {
        self.target
    }
}

/// True when `coord` lies on some axis-aligned run of three playable cells.
fn on_jump_line(board: &Board, coord: Coord) -> bool {
    let playable = |row: i16, col: i16| {
        row >= 0
            && col >= 0
            && board
                .get(Coord::new(row as u8, col as u8))
                .is_some_and(|cell| cell != Cell::Blocked)
    };
    let row = coord.row as i16;
    let col = coord.col as i16;
    for start in -2..=0i16 {
        if (start..start + 3).all(|d| playable(row, col + d)) {
            return true;
        }
        if (start..start + 3).all(|d| playable(row + d, col)) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_layout() {
        let layout = Layout::english();
        let board = layout.board();
        assert_eq!(board.rows(), 7);
        assert_eq!(board.cols(), 7);
        assert_eq!(board.peg_count(), 32);
        assert_eq!(layout.target(), Coord::new(3, 3));
        assert_eq!(board.get(Coord::new(3, 3)), Some(Cell::Empty));
        assert_eq!(board.get(Coord::new(0, 0)), Some(Cell::Blocked));
        let blocked = board
            .cells()
            .filter(|&(_, cell)| cell == Cell::Blocked)
            .count();
        assert_eq!(blocked, 16);
    }

    #[test]
    fn test_german_layout() {
        let layout = Layout::german();
        let board = layout.board();
        assert_eq!(board.rows(), 9);
        assert_eq!(board.peg_count(), 44);
        assert_eq!(layout.target(), Coord::new(4, 4));
        let blocked = board
            .cells()
            .filter(|&(_, cell)| cell == Cell::Blocked)
            .count();
        assert_eq!(blocked, 36);
    }

    #[test]
    fn test_built_in_layouts_pass_their_own_validation() {
        for layout in [Layout::english(), Layout::german()] {
            assert!(Layout::from_board(layout.board().clone(), layout.target()).is_ok());
        }
    }

    #[test]
    fn test_rejects_blocked_or_out_of_bounds_target() {
        let (board, _) = Board::parse("  ###\n  ###\n#####").unwrap();
        assert!(Layout::from_board(board.clone(), Coord::new(0, 0)).is_err());
        assert!(Layout::from_board(board.clone(), Coord::new(9, 9)).is_err());
        assert!(Layout::from_board(board, Coord::new(0, 3)).is_ok());
    }

    #[test]
    fn test_rejects_board_without_pegs() {
        let (board, _) = Board::parse("...\n...\n...").unwrap();
        assert!(Layout::from_board(board, Coord::new(1, 1)).is_err());
    }

    #[test]
    fn test_rejects_isolated_playable_cell() {
        // the lone cell at the bottom right can never join a jump
        let (board, _) = Board::parse("###\n  #").unwrap();
        assert!(Layout::from_board(board, Coord::new(0, 1)).is_err());
    }

    #[test]
    fn test_parse_defaults_target_to_center() {
        let layout = Layout::parse("#####\n#####\n##.##\n#####\n#####").unwrap();
        assert_eq!(layout.target(), Coord::new(2, 2));
    }
}
