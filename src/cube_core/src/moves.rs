//! Typed moves and their algebra: text round-trips and the same-piece
//! merge rule used by the solution simplifier.

use std::fmt;

/// What a move rotates: an outer layer, a wide (two-layer) slab, a middle
/// slice, or the whole cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Pieces {
    Up,
    Down,
    Front,
    Back,
    Right,
    Left,
    FrontWide,
    BackWide,
    UpWide,
    DownWide,
    RightWide,
    LeftWide,
    MSlice,
    ESlice,
    SSlice,
    X,
    Y,
    Z,
}

/// How far the pieces turn. `NoMove` is the identity; the solver also uses
/// a `(Y, NoMove)` move as a stage boundary marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MoveKind {
    Normal,
    Prime,
    Double,
    NoMove,
}

impl MoveKind {
    /// Clockwise quarter turns mod 4.
    fn quarter_turns(self) -> u8 {
        match self {
            MoveKind::Normal => 1,
            MoveKind::Double => 2,
            MoveKind::Prime => 3,
            MoveKind::NoMove => 0,
        }
    }

    fn from_quarter_turns(turns: u8) -> MoveKind {
        match turns % 4 {
            0 => MoveKind::NoMove,
            1 => MoveKind::Normal,
            2 => MoveKind::Double,
            _ => MoveKind::Prime,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub pieces: Pieces,
    pub kind: MoveKind,
}

impl Move {
    /// What the tokeniser yields for an unrecognised token.
    pub const NONE: Move = Move::new(Pieces::Up, MoveKind::NoMove);

    pub const fn new(pieces: Pieces, kind: MoveKind) -> Move {
        Move { pieces, kind }
    }

    /// Decode a single canonical token (`R`, `U'`, `f2`, `M`, `x'`, ...).
    ///
    /// Whole-cube rotations are accepted in either case; everything else is
    /// case-sensitive because case distinguishes outer from wide turns.
    pub fn from_token(token: &str) -> Move {
        let mut chars = token.chars();
        let Some(head) = chars.next() else {
            return Move::NONE;
        };
        let pieces = match head {
            'U' => Pieces::Up,
            'D' => Pieces::Down,
            'F' => Pieces::Front,
            'B' => Pieces::Back,
            'R' => Pieces::Right,
            'L' => Pieces::Left,
            'u' => Pieces::UpWide,
            'd' => Pieces::DownWide,
            'f' => Pieces::FrontWide,
            'b' => Pieces::BackWide,
            'r' => Pieces::RightWide,
            'l' => Pieces::LeftWide,
            'M' => Pieces::MSlice,
            'E' => Pieces::ESlice,
            'S' => Pieces::SSlice,
            'X' | 'x' => Pieces::X,
            'Y' | 'y' => Pieces::Y,
            'Z' | 'z' => Pieces::Z,
            _ => return Move::NONE,
        };
        let kind = match chars.next() {
            None => MoveKind::Normal,
            Some('\'') => MoveKind::Prime,
            Some('2') => MoveKind::Double,
            Some(_) => return Move::NONE,
        };
        if chars.next().is_some() {
            return Move::NONE;
        }
        Move::new(pieces, kind)
    }

    /// Two moves merge iff neither is the identity and both turn the same
    /// pieces. Merging is only meaningful for adjacent moves in a sequence.
    pub fn can_merge_with(&self, other: &Move) -> bool {
        self.kind != MoveKind::NoMove
            && other.kind != MoveKind::NoMove
            && self.pieces == other.pieces
    }

    /// The single move equivalent to `self` followed by `other`. Quarter
    /// turns add mod 4, so a full cancellation comes back as `NoMove`.
    pub fn merge(&self, other: &Move) -> Move {
        let turns = self.kind.quarter_turns() + other.kind.quarter_turns();
        Move::new(self.pieces, MoveKind::from_quarter_turns(turns))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self.pieces {
            Pieces::Up => "U",
            Pieces::Down => "D",
            Pieces::Front => "F",
            Pieces::Back => "B",
            Pieces::Right => "R",
            Pieces::Left => "L",
            Pieces::UpWide => "u",
            Pieces::DownWide => "d",
            Pieces::FrontWide => "f",
            Pieces::BackWide => "b",
            Pieces::RightWide => "r",
            Pieces::LeftWide => "l",
            Pieces::MSlice => "M",
            Pieces::ESlice => "E",
            Pieces::SSlice => "S",
            Pieces::X => "x",
            Pieces::Y => "y",
            Pieces::Z => "z",
        };
        write!(f, "{letter}")?;
        match self.kind {
            MoveKind::Prime => write!(f, "'"),
            MoveKind::Double => write!(f, "2"),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_law() {
        use MoveKind::*;
        let cases = [
            (Normal, Normal, Double),
            (Normal, Prime, NoMove),
            (Normal, Double, Prime),
            (Prime, Normal, NoMove),
            (Prime, Prime, Double),
            (Prime, Double, Normal),
            (Double, Normal, Prime),
            (Double, Prime, Normal),
            (Double, Double, NoMove),
        ];
        for (a, b, expected) in cases {
            let merged = Move::new(Pieces::Right, a).merge(&Move::new(Pieces::Right, b));
            assert_eq!(merged.kind, expected, "{a:?} + {b:?}");
            assert_eq!(merged.pieces, Pieces::Right);
        }
    }

    #[test]
    fn merge_requires_same_pieces_and_real_turns() {
        let r = Move::new(Pieces::Right, MoveKind::Normal);
        let l = Move::new(Pieces::Left, MoveKind::Normal);
        let marker = Move::new(Pieces::Y, MoveKind::NoMove);
        assert!(r.can_merge_with(&r));
        assert!(!r.can_merge_with(&l));
        assert!(!r.can_merge_with(&marker));
        assert!(!marker.can_merge_with(&marker));
    }

    #[test]
    fn tokens_round_trip() {
        let pieces = [
            Pieces::Up,
            Pieces::Down,
            Pieces::Front,
            Pieces::Back,
            Pieces::Right,
            Pieces::Left,
            Pieces::UpWide,
            Pieces::DownWide,
            Pieces::FrontWide,
            Pieces::BackWide,
            Pieces::RightWide,
            Pieces::LeftWide,
            Pieces::MSlice,
            Pieces::ESlice,
            Pieces::SSlice,
            Pieces::X,
            Pieces::Y,
            Pieces::Z,
        ];
        for p in pieces {
            for kind in [MoveKind::Normal, MoveKind::Prime, MoveKind::Double] {
                let mv = Move::new(p, kind);
                assert_eq!(Move::from_token(&mv.to_string()), mv);
            }
        }
    }

    #[test]
    fn rotations_parse_case_insensitively() {
        assert_eq!(
            Move::from_token("X2"),
            Move::new(Pieces::X, MoveKind::Double)
        );
        assert_eq!(
            Move::from_token("x2"),
            Move::new(Pieces::X, MoveKind::Double)
        );
        assert_eq!(Move::from_token("Z'"), Move::new(Pieces::Z, MoveKind::Prime));
    }

    #[test]
    fn junk_tokens_are_no_moves() {
        for junk in ["", "(", "q", "U3", "R''"] {
            assert_eq!(Move::from_token(junk).kind, MoveKind::NoMove);
        }
    }
}
