//! The 3×3×3 cube as a value: faces, sticker colors, the topology that
//! relates them, and the packed state itself with its full move palette.

pub mod cube;
pub mod moves;

pub use cube::{Cube, StateError};
pub use moves::{Move, MoveKind, Pieces};

use strum::{EnumIter, FromRepr};

/// One of the six faces of the cube.
///
/// The discriminants index the packed sticker words of [`Cube`], so the
/// declaration order is load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, FromRepr)]
#[repr(u8)]
pub enum Face {
    Up,
    Down,
    Front,
    Back,
    Right,
    Left,
}

/// A sticker color. `Empty` is reserved so that color comparisons are
/// always done against non-zero values; it never appears in a well-formed
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, FromRepr)]
#[repr(u8)]
pub enum Color {
    Empty,
    White,
    Yellow,
    Red,
    Orange,
    Blue,
    Green,
}

impl Color {
    /// The single-character code used by the 54-character state format.
    pub fn to_char(self) -> char {
        match self {
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Red => 'R',
            Color::Orange => 'O',
            Color::Blue => 'B',
            Color::Green => 'G',
            Color::Empty => ' ',
        }
    }

    /// Decode a state-format character. Anything unrecognised is `Empty`.
    pub fn from_char(c: char) -> Color {
        match c {
            'W' => Color::White,
            'Y' => Color::Yellow,
            'R' => Color::Red,
            'O' => Color::Orange,
            'B' => Color::Blue,
            'G' => Color::Green,
            _ => Color::Empty,
        }
    }
}

/// A whole-cube reorientation, used to walk the face adjacency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    X,
    XPrime,
    Y,
    YPrime,
    Z,
    ZPrime,
}

impl Face {
    /// The face on the opposite side of the cube.
    pub fn opposite(self) -> Face {
        match self {
            Face::Up => Face::Down,
            Face::Down => Face::Up,
            Face::Front => Face::Back,
            Face::Back => Face::Front,
            Face::Right => Face::Left,
            Face::Left => Face::Right,
        }
    }

    /// The face that replaces `self` under the given whole-cube rotation.
    ///
    /// Each face participates in exactly four of the six rotations; asking
    /// for a rotation along a face's own axis is a programming error.
    pub fn adjacent(self, rotation: Rotation) -> Face {
        use Rotation::*;
        match (self, rotation) {
            (Face::Up, X) => Face::Back,
            (Face::Up, XPrime) => Face::Front,
            (Face::Up, Z) => Face::Right,
            (Face::Up, ZPrime) => Face::Left,
            (Face::Down, X) => Face::Front,
            (Face::Down, XPrime) => Face::Back,
            (Face::Down, Z) => Face::Left,
            (Face::Down, ZPrime) => Face::Right,
            (Face::Front, X) => Face::Up,
            (Face::Front, XPrime) => Face::Down,
            (Face::Front, Y) => Face::Left,
            (Face::Front, YPrime) => Face::Right,
            (Face::Back, X) => Face::Down,
            (Face::Back, XPrime) => Face::Up,
            (Face::Back, Y) => Face::Right,
            (Face::Back, YPrime) => Face::Left,
            (Face::Right, Y) => Face::Front,
            (Face::Right, YPrime) => Face::Back,
            (Face::Right, Z) => Face::Down,
            (Face::Right, ZPrime) => Face::Up,
            (Face::Left, Y) => Face::Back,
            (Face::Left, YPrime) => Face::Front,
            (Face::Left, Z) => Face::Up,
            (Face::Left, ZPrime) => Face::Down,
            _ => panic!("face {self:?} does not rotate along {rotation:?}"),
        }
    }

    /// `adjacent` iterated `n` times.
    pub fn relative(self, rotation: Rotation, n: u8) -> Face {
        (0..n).fold(self, |face, _| face.adjacent(rotation))
    }
}

/// Which horizontal third of the cube a sticker lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Bottom,
    Middle,
    Top,
}

/// One non-center sticker, addressed by face and ring index.
///
/// The eight stickers of a face are numbered 0..8 starting in the top left
/// and circling clockwise, so even indices are corners and odd indices are
/// edges. The center is not addressed; only centers carry a face's color
/// identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub face: Face,
    pub idx: u8,
}

impl Location {
    pub const fn new(face: Face, idx: u8) -> Location {
        Location { face, idx }
    }

    pub fn layer(self) -> Layer {
        if self.face == Face::Down {
            Layer::Bottom
        } else if self.face == Face::Up {
            Layer::Top
        } else if self.idx < 3 {
            Layer::Top
        } else if 3 < self.idx && self.idx < 7 {
            Layer::Bottom
        } else {
            Layer::Middle
        }
    }

    /// The other sticker of the edge piece this sticker belongs to.
    ///
    /// Must only be called on an edge sticker (odd index).
    pub fn adjacent_edge(self) -> Location {
        assert!(self.idx % 2 == 1, "adjacent_edge of corner sticker {self:?}");

        let (face, idx) = match (self.face, self.idx) {
            (Face::Up, 1) => (Face::Back, 1),
            (Face::Up, 3) => (Face::Right, 1),
            (Face::Up, 5) => (Face::Front, 1),
            (Face::Up, 7) => (Face::Left, 1),
            (Face::Down, 1) => (Face::Front, 5),
            (Face::Down, 3) => (Face::Right, 5),
            (Face::Down, 5) => (Face::Back, 5),
            (Face::Down, 7) => (Face::Left, 5),
            (Face::Front, 1) => (Face::Up, 5),
            (Face::Front, 3) => (Face::Right, 7),
            (Face::Front, 5) => (Face::Down, 1),
            (Face::Front, 7) => (Face::Left, 3),
            (Face::Back, 1) => (Face::Up, 1),
            (Face::Back, 3) => (Face::Left, 7),
            (Face::Back, 5) => (Face::Down, 5),
            (Face::Back, 7) => (Face::Right, 3),
            (Face::Right, 1) => (Face::Up, 3),
            (Face::Right, 3) => (Face::Back, 7),
            (Face::Right, 5) => (Face::Down, 3),
            (Face::Right, 7) => (Face::Front, 3),
            (Face::Left, 1) => (Face::Up, 7),
            (Face::Left, 3) => (Face::Front, 7),
            (Face::Left, 5) => (Face::Down, 7),
            (Face::Left, 7) => (Face::Back, 3),
            _ => unreachable!("edge index out of range: {self:?}"),
        };
        Location { face, idx }
    }

    /// The other two stickers of the corner piece this sticker belongs to.
    ///
    /// Must only be called on a corner sticker (even index). The returned
    /// pair is ordered by face: UP/DOWN first, then the lower-indexed side
    /// face.
    pub fn adjacent_corner(self) -> (Location, Location) {
        let ((f0, i0), (f1, i1)) = match (self.face, self.idx) {
            (Face::Up, 0) => ((Face::Back, 2), (Face::Left, 0)),
            (Face::Up, 2) => ((Face::Back, 0), (Face::Right, 2)),
            (Face::Up, 4) => ((Face::Front, 2), (Face::Right, 0)),
            (Face::Up, 6) => ((Face::Front, 0), (Face::Left, 2)),
            (Face::Down, 0) => ((Face::Front, 6), (Face::Left, 4)),
            (Face::Down, 2) => ((Face::Front, 4), (Face::Right, 6)),
            (Face::Down, 4) => ((Face::Back, 6), (Face::Right, 4)),
            (Face::Down, 6) => ((Face::Back, 4), (Face::Left, 6)),
            (Face::Front, 0) => ((Face::Up, 6), (Face::Left, 2)),
            (Face::Front, 2) => ((Face::Up, 4), (Face::Right, 0)),
            (Face::Front, 4) => ((Face::Down, 2), (Face::Right, 6)),
            (Face::Front, 6) => ((Face::Down, 0), (Face::Left, 4)),
            (Face::Back, 0) => ((Face::Up, 2), (Face::Right, 2)),
            (Face::Back, 2) => ((Face::Up, 0), (Face::Left, 0)),
            (Face::Back, 4) => ((Face::Down, 6), (Face::Left, 6)),
            (Face::Back, 6) => ((Face::Down, 4), (Face::Right, 4)),
            (Face::Right, 0) => ((Face::Up, 4), (Face::Front, 2)),
            (Face::Right, 2) => ((Face::Up, 2), (Face::Back, 0)),
            (Face::Right, 4) => ((Face::Down, 4), (Face::Back, 6)),
            (Face::Right, 6) => ((Face::Down, 2), (Face::Front, 4)),
            (Face::Left, 0) => ((Face::Up, 0), (Face::Back, 2)),
            (Face::Left, 2) => ((Face::Up, 6), (Face::Front, 0)),
            (Face::Left, 4) => ((Face::Down, 0), (Face::Front, 6)),
            (Face::Left, 6) => ((Face::Down, 6), (Face::Back, 4)),
            _ => panic!("adjacent_corner of non-corner sticker {self:?}"),
        };
        (Location::new(f0, i0), Location::new(f1, i1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn opposite_is_an_involution() {
        for face in Face::iter() {
            assert_eq!(face.opposite().opposite(), face);
        }
    }

    #[test]
    fn adjacent_edge_is_an_involution() {
        for face in Face::iter() {
            for idx in (1..8).step_by(2) {
                let loc = Location::new(face, idx);
                assert_eq!(loc.adjacent_edge().adjacent_edge(), loc);
            }
        }
    }

    #[test]
    fn corner_triples_are_mutually_adjacent() {
        for face in Face::iter() {
            for idx in (0..8).step_by(2) {
                let loc = Location::new(face, idx);
                let (a, b) = loc.adjacent_corner();
                let (a0, a1) = a.adjacent_corner();
                assert!(a0 == loc || a1 == loc, "{loc:?} missing from {a:?}");
                assert!(a0 == b || a1 == b, "{b:?} missing from {a:?}");
                let (b0, b1) = b.adjacent_corner();
                assert!(b0 == loc || b1 == loc, "{loc:?} missing from {b:?}");
                assert!(b0 == a || b1 == a, "{a:?} missing from {b:?}");
            }
        }
    }

    #[test]
    fn four_y_rotations_are_identity() {
        for face in [Face::Front, Face::Back, Face::Right, Face::Left] {
            assert_eq!(face.relative(Rotation::Y, 4), face);
            assert_eq!(face.adjacent(Rotation::Y).adjacent(Rotation::YPrime), face);
        }
    }

    #[test]
    fn layers_partition_the_stickers() {
        assert_eq!(Location::new(Face::Up, 4).layer(), Layer::Top);
        assert_eq!(Location::new(Face::Down, 1).layer(), Layer::Bottom);
        assert_eq!(Location::new(Face::Front, 2).layer(), Layer::Top);
        assert_eq!(Location::new(Face::Front, 5).layer(), Layer::Bottom);
        assert_eq!(Location::new(Face::Front, 3).layer(), Layer::Middle);
        assert_eq!(Location::new(Face::Front, 7).layer(), Layer::Middle);
    }
}
