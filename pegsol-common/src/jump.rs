use crate::board::{Board, Coord};

/// A single jump: the peg on `from` leaps over the adjacent peg and lands
/// on `to`; the jumped peg leaves the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Jump {
    pub from: Coord,
    pub to: Coord,
}

impl Jump {
    pub fn new(from: Coord, to: Coord) -> Self {
        Jump { from, to }
    }

    /// The jumped-over cell, when `from` and `to` are exactly two apart
    /// along one axis. `None` for any other geometry.
    pub fn mid(&self) -> Option<Coord> {
        let dr = self.to.row as i16 - self.from.row as i16;
        let dc = self.to.col as i16 - self.from.col as i16;
        if !matches!((dr.abs(), dc.abs()), (2, 0) | (0, 2)) {
            return None;
        }
        Some(Coord::new(
            (self.from.row as i16 + dr / 2) as u8,
            (self.from.col as i16 + dc / 2) as u8,
        ))
    }
}

impl std::fmt::Display for Jump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// Formats a jump sequence as aligned columns, ten per row.
pub fn format_jumps(jumps: &[Jump]) -> String {
    let list: Vec<String> = jumps.iter().map(|jump| jump.to_string()).collect();
    let max_width = list.iter().map(|s| s.len()).max().unwrap_or_default() + 1;

    let mut output = String::new();
    for chunk in list.chunks(10) {
        for jump in chunk {
            output.push_str(&format!("{jump:<max_width$}"));
        }
        output.push('\n');
    }
    output
}

/// Applies `jumps` in order, returning the final board, or `None` as soon
/// as a jump is illegal in its position.
pub fn replay(board: &Board, jumps: &[Jump]) -> Option<Board> {
    let mut current = board.clone();
    for &jump in jumps {
        current = current.apply_jump(jump)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mid_requires_axis_aligned_two_step() {
        let mid = |j: Jump| j.mid();
        assert_eq!(
            mid(Jump::new(Coord::new(3, 1), Coord::new(3, 3))),
            Some(Coord::new(3, 2))
        );
        assert_eq!(
            mid(Jump::new(Coord::new(5, 3), Coord::new(3, 3))),
            Some(Coord::new(4, 3))
        );
        assert_eq!(mid(Jump::new(Coord::new(3, 1), Coord::new(3, 2))), None);
        assert_eq!(mid(Jump::new(Coord::new(3, 1), Coord::new(5, 3))), None);
        assert_eq!(mid(Jump::new(Coord::new(3, 1), Coord::new(3, 1))), None);
    }

    #[test]
    fn test_format_jumps_aligns_columns() {
        let jump = Jump::new(Coord::new(1, 3), Coord::new(3, 3));
        let output = format_jumps(&[jump; 12]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].trim_end().split_whitespace().count(), 10);
        assert_eq!(lines[1].trim_end().split_whitespace().count(), 2);
        assert!(lines[0].starts_with("(1,3)->(3,3)"));
    }

    #[test]
    fn test_replay_stops_at_illegal_jump() {
        let (board, _) = Board::parse("##.#.").unwrap();
        let first = Jump::new(Coord::new(0, 0), Coord::new(0, 2));
        let second = Jump::new(Coord::new(0, 3), Coord::new(0, 1));
        let replayed = replay(&board, &[first, second]).unwrap();
        assert_eq!(replayed.peg_count(), 1);
        // the start cell is empty once `first` has been played
        assert_eq!(replay(&board, &[first, first]), None);
    }
}
