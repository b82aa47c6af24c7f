//! Bit-packed cube state and the state transition for every basic move.
//!
//! Each face stores its 8 non-center stickers in one `u64`, one color per
//! 8-bit slot, slot `i` at bits `(7 - i) * 8 ..`. Walking the slots 0..8
//! circles the face clockwise from the top left, so a 90° face turn is a
//! 16-bit circular rotate of the word. A seventh word holds the six center
//! colors (slots 0..6, same slot formula), which lets slice and wide turns
//! move centers around.

use std::fmt;

use strum::IntoEnumIterator;
use thiserror::Error;

use crate::moves::{Move, MoveKind, Pieces};
use crate::{Color, Face, Location};

/// Strip masks over a packed face word. The names describe the strip's
/// position when looking at the face: slots 0,1,2 are its top row, 2,3,4
/// its right column, and so on; `LEFT_MASK` wraps around slot 0.
const UP_MASK: u64 = 0xffff_ff00_0000_0000;
const RIGHT_MASK: u64 = 0x0000_ffff_ff00_0000;
const DOWN_MASK: u64 = 0x0000_0000_ffff_ff00;
const LEFT_MASK: u64 = 0xff00_0000_0000_ffff;
const MIDDLE_COL_MASK: u64 = 0x00ff_0000_00ff_0000;
const MIDDLE_ROW_MASK: u64 = 0x0000_00ff_0000_00ff;

/// Bit offset of slot `idx` within a packed word.
const fn slot_shift(idx: u8) -> u64 {
    (7 - idx as u64) * 8
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("state string must be 54 characters, got {found}")]
    Length { found: usize },
}

/// The complete cube state: six packed face words plus the center word.
#[derive(Clone, PartialEq, Eq)]
pub struct Cube {
    stickers: [u64; 7],
}

impl Default for Cube {
    fn default() -> Cube {
        Cube::new()
    }
}

impl Cube {
    pub fn new() -> Cube {
        let mut cube = Cube { stickers: [0; 7] };
        cube.reset();
        cube
    }

    /// Reset to the solved state: face `i` uniformly colored with color
    /// `i + 1`, centers to match.
    pub fn reset(&mut self) {
        let mut centers = 0;
        for i in 0..6u64 {
            let color = i + 1;
            self.stickers[i as usize] = 0x0101_0101_0101_0101 * color;
            centers |= color << ((7 - i) * 8);
        }
        self.stickers[6] = centers;
    }

    /// A cube is solved when every face is uniformly its center's color.
    pub fn is_solved(&self) -> bool {
        for face in Face::iter() {
            let center = self.center(face);
            for idx in 0..8 {
                if self.sticker(Location::new(face, idx)) != center {
                    return false;
                }
            }
        }
        true
    }

    pub fn face(&self, face: Face) -> u64 {
        self.stickers[face as usize]
    }

    pub fn set_face(&mut self, face: Face, value: u64) {
        self.stickers[face as usize] = value;
    }

    pub fn center(&self, face: Face) -> Color {
        decode_color((self.stickers[6] >> slot_shift(face as u8)) as u8)
    }

    pub fn set_center(&mut self, face: Face, color: Color) {
        let shift = slot_shift(face as u8);
        self.stickers[6] =
            (self.stickers[6] & !(0xff << shift)) | ((color as u64) << shift);
    }

    pub fn sticker(&self, loc: Location) -> Color {
        decode_color((self.face(loc.face) >> slot_shift(loc.idx)) as u8)
    }

    pub fn set_sticker(&mut self, loc: Location, color: Color) {
        let shift = slot_shift(loc.idx);
        let word = (self.face(loc.face) & !(0xff << shift)) | ((color as u64) << shift);
        self.set_face(loc.face, word);
    }

    /// Whether the piece owning this sticker sits solved in its home slot:
    /// every sticker of the piece matches the center of the face it is on.
    pub fn is_piece_solved(&self, loc: Location) -> bool {
        if loc.idx % 2 == 0 {
            self.is_corner_solved(loc)
        } else {
            self.is_edge_solved(loc)
        }
    }

    fn is_edge_solved(&self, loc: Location) -> bool {
        if self.center(loc.face) != self.sticker(loc) {
            return false;
        }
        let adj = loc.adjacent_edge();
        self.center(adj.face) == self.sticker(adj)
    }

    fn is_corner_solved(&self, loc: Location) -> bool {
        if self.center(loc.face) != self.sticker(loc) {
            return false;
        }
        let (a, b) = loc.adjacent_corner();
        self.center(a.face) == self.sticker(a) && self.center(b.face) == self.sticker(b)
    }

    /// Load a 54-character state string: nine characters per face in the
    /// order UP, DOWN, FRONT, BACK, RIGHT, LEFT, each face read row-major.
    /// Unrecognised color characters load as `Empty`, leaving a cube the
    /// solver makes no promises about.
    pub fn copy_state(&mut self, state: &str) -> Result<(), StateError> {
        let found = state.chars().count();
        if found != 54 {
            return Err(StateError::Length { found });
        }
        for (i, c) in state.chars().enumerate() {
            let face = Face::from_repr((i / 9) as u8).unwrap();
            let color = Color::from_char(c);
            // Row-major positions onto the clockwise slot ring.
            match i % 9 {
                pos @ 0..=2 => self.set_sticker(Location::new(face, pos as u8), color),
                3 => self.set_sticker(Location::new(face, 7), color),
                4 => self.set_center(face, color),
                5 => self.set_sticker(Location::new(face, 3), color),
                6 => self.set_sticker(Location::new(face, 6), color),
                7 => self.set_sticker(Location::new(face, 5), color),
                _ => self.set_sticker(Location::new(face, 4), color),
            }
        }
        Ok(())
    }

    /// Render the inverse of [`Cube::copy_state`].
    pub fn state_string(&self) -> String {
        let mut out = String::with_capacity(54);
        for face in Face::iter() {
            for pos in [0, 1, 2, 7] {
                out.push(self.sticker(Location::new(face, pos)).to_char());
            }
            out.push(self.center(face).to_char());
            for pos in [3, 6, 5, 4] {
                out.push(self.sticker(Location::new(face, pos)).to_char());
            }
        }
        out
    }

    /// Perform a move of the given kind on an outer face and return the
    /// corresponding [`Move`].
    pub fn twist(&mut self, face: Face, kind: MoveKind) -> Move {
        let pieces = match face {
            Face::Up => Pieces::Up,
            Face::Down => Pieces::Down,
            Face::Front => Pieces::Front,
            Face::Back => Pieces::Back,
            Face::Right => Pieces::Right,
            Face::Left => Pieces::Left,
        };
        let mv = Move::new(pieces, kind);
        self.apply(mv);
        mv
    }

    /// Parse a single token, execute it, and return the move. Unrecognised
    /// tokens execute nothing and come back as `NoMove`.
    pub fn parse_move(&mut self, token: &str) -> Move {
        let mv = Move::from_token(token);
        self.apply(mv);
        mv
    }

    /// Tokenise a move string left to right, executing as it goes, and
    /// return the recognised moves. A `'` or `2` is consumed with the
    /// letter before it; anything unrecognised (including whitespace and
    /// the parentheses conventional in published algorithms) is skipped.
    pub fn read_moves(&mut self, moves: &str) -> Vec<Move> {
        let mut accepted = Vec::new();
        let mut iter = moves.char_indices().peekable();
        while let Some((start, c)) = iter.next() {
            let mut end = start + c.len_utf8();
            if let Some(&(_, next)) = iter.peek() {
                if next == '\'' || next == '2' {
                    end += next.len_utf8();
                    iter.next();
                }
            }
            let mv = self.parse_move(&moves[start..end]);
            if mv.kind != MoveKind::NoMove {
                accepted.push(mv);
            }
        }
        accepted
    }

    /// Replay a stored sequence by re-parsing each move's text form.
    pub fn execute_moves(&mut self, moves: &[Move]) {
        for mv in moves {
            self.parse_move(&mv.to_string());
        }
    }

    fn apply(&mut self, mv: Move) {
        match mv.kind {
            MoveKind::Normal => self.turn_cw(mv.pieces),
            MoveKind::Prime => self.turn_ccw(mv.pieces),
            MoveKind::Double => {
                self.turn_cw(mv.pieces);
                self.turn_cw(mv.pieces);
            }
            MoveKind::NoMove => {}
        }
    }

    fn turn_cw(&mut self, pieces: Pieces) {
        match pieces {
            Pieces::Up => self.u(),
            Pieces::Down => self.d(),
            Pieces::Front => self.f(),
            Pieces::Back => self.b(),
            Pieces::Right => self.r(),
            Pieces::Left => self.l(),
            Pieces::UpWide => self.u_wide(),
            Pieces::DownWide => self.d_wide(),
            Pieces::FrontWide => self.f_wide(),
            Pieces::BackWide => self.b_wide(),
            Pieces::RightWide => self.r_wide(),
            Pieces::LeftWide => self.l_wide(),
            Pieces::MSlice => self.m(),
            Pieces::ESlice => self.e(),
            Pieces::SSlice => self.s(),
            Pieces::X => self.x(),
            Pieces::Y => self.y(),
            Pieces::Z => self.z(),
        }
    }

    fn turn_ccw(&mut self, pieces: Pieces) {
        match pieces {
            Pieces::Up => self.u_prime(),
            Pieces::Down => self.d_prime(),
            Pieces::Front => self.f_prime(),
            Pieces::Back => self.b_prime(),
            Pieces::Right => self.r_prime(),
            Pieces::Left => self.l_prime(),
            Pieces::UpWide => self.u_wide_prime(),
            Pieces::DownWide => self.d_wide_prime(),
            Pieces::FrontWide => self.f_wide_prime(),
            Pieces::BackWide => self.b_wide_prime(),
            Pieces::RightWide => self.r_wide_prime(),
            Pieces::LeftWide => self.l_wide_prime(),
            Pieces::MSlice => self.m_prime(),
            Pieces::ESlice => self.e_prime(),
            Pieces::SSlice => self.s_prime(),
            Pieces::X => self.x_prime(),
            Pieces::Y => self.y_prime(),
            Pieces::Z => self.z_prime(),
        }
    }

    /// Clockwise turn of the up face: rotate its own ring, then cycle the
    /// top rows of the four side faces.
    pub fn u(&mut self) {
        self.set_face(Face::Up, self.face(Face::Up).rotate_right(16));

        let saved = self.face(Face::Front) & UP_MASK;
        self.set_face(
            Face::Front,
            (self.face(Face::Front) & !UP_MASK) | (self.face(Face::Right) & UP_MASK),
        );
        self.set_face(
            Face::Right,
            (self.face(Face::Right) & !UP_MASK) | (self.face(Face::Back) & UP_MASK),
        );
        self.set_face(
            Face::Back,
            (self.face(Face::Back) & !UP_MASK) | (self.face(Face::Left) & UP_MASK),
        );
        self.set_face(Face::Left, (self.face(Face::Left) & !UP_MASK) | saved);
    }

    pub fn u_prime(&mut self) {
        self.set_face(Face::Up, self.face(Face::Up).rotate_left(16));

        let saved = self.face(Face::Front) & UP_MASK;
        self.set_face(
            Face::Front,
            (self.face(Face::Front) & !UP_MASK) | (self.face(Face::Left) & UP_MASK),
        );
        self.set_face(
            Face::Left,
            (self.face(Face::Left) & !UP_MASK) | (self.face(Face::Back) & UP_MASK),
        );
        self.set_face(
            Face::Back,
            (self.face(Face::Back) & !UP_MASK) | (self.face(Face::Right) & UP_MASK),
        );
        self.set_face(Face::Right, (self.face(Face::Right) & !UP_MASK) | saved);
    }

    pub fn d(&mut self) {
        self.set_face(Face::Down, self.face(Face::Down).rotate_right(16));

        let saved = self.face(Face::Front) & DOWN_MASK;
        self.set_face(
            Face::Front,
            (self.face(Face::Front) & !DOWN_MASK) | (self.face(Face::Left) & DOWN_MASK),
        );
        self.set_face(
            Face::Left,
            (self.face(Face::Left) & !DOWN_MASK) | (self.face(Face::Back) & DOWN_MASK),
        );
        self.set_face(
            Face::Back,
            (self.face(Face::Back) & !DOWN_MASK) | (self.face(Face::Right) & DOWN_MASK),
        );
        self.set_face(Face::Right, (self.face(Face::Right) & !DOWN_MASK) | saved);
    }

    pub fn d_prime(&mut self) {
        self.set_face(Face::Down, self.face(Face::Down).rotate_left(16));

        let saved = self.face(Face::Front) & DOWN_MASK;
        self.set_face(
            Face::Front,
            (self.face(Face::Front) & !DOWN_MASK) | (self.face(Face::Right) & DOWN_MASK),
        );
        self.set_face(
            Face::Right,
            (self.face(Face::Right) & !DOWN_MASK) | (self.face(Face::Back) & DOWN_MASK),
        );
        self.set_face(
            Face::Back,
            (self.face(Face::Back) & !DOWN_MASK) | (self.face(Face::Left) & DOWN_MASK),
        );
        self.set_face(Face::Left, (self.face(Face::Left) & !DOWN_MASK) | saved);
    }

    /// Clockwise turn of the front face. The four moving strips are not in
    /// the same slots on their faces, so each copy is realigned with a
    /// 16-bit rotate or shift before landing.
    pub fn f(&mut self) {
        self.set_face(Face::Front, self.face(Face::Front).rotate_right(16));

        let saved = self.face(Face::Up) & DOWN_MASK;
        self.set_face(
            Face::Up,
            (self.face(Face::Up) & !DOWN_MASK) | ((self.face(Face::Left) & RIGHT_MASK) >> 16),
        );
        self.set_face(
            Face::Left,
            (self.face(Face::Left) & !RIGHT_MASK) | ((self.face(Face::Down) & UP_MASK) >> 16),
        );
        self.set_face(
            Face::Down,
            (self.face(Face::Down) & !UP_MASK)
                | (self.face(Face::Right) & LEFT_MASK).rotate_right(16),
        );
        self.set_face(
            Face::Right,
            (self.face(Face::Right) & !LEFT_MASK) | saved.rotate_right(16),
        );
    }

    pub fn f_prime(&mut self) {
        self.set_face(Face::Front, self.face(Face::Front).rotate_left(16));

        let saved = self.face(Face::Up) & DOWN_MASK;
        self.set_face(
            Face::Up,
            (self.face(Face::Up) & !DOWN_MASK)
                | (self.face(Face::Right) & LEFT_MASK).rotate_left(16),
        );
        self.set_face(
            Face::Right,
            (self.face(Face::Right) & !LEFT_MASK)
                | (self.face(Face::Down) & UP_MASK).rotate_left(16),
        );
        self.set_face(
            Face::Down,
            (self.face(Face::Down) & !UP_MASK)
                | (self.face(Face::Left) & RIGHT_MASK).rotate_left(16),
        );
        self.set_face(
            Face::Left,
            (self.face(Face::Left) & !RIGHT_MASK) | (saved << 16),
        );
    }

    pub fn b(&mut self) {
        self.set_face(Face::Back, self.face(Face::Back).rotate_right(16));

        let saved = self.face(Face::Up) & UP_MASK;
        self.set_face(
            Face::Up,
            (self.face(Face::Up) & !UP_MASK) | ((self.face(Face::Right) & RIGHT_MASK) << 16),
        );
        self.set_face(
            Face::Right,
            (self.face(Face::Right) & !RIGHT_MASK) | ((self.face(Face::Down) & DOWN_MASK) << 16),
        );
        self.set_face(
            Face::Down,
            (self.face(Face::Down) & !DOWN_MASK)
                | (self.face(Face::Left) & LEFT_MASK).rotate_left(16),
        );
        self.set_face(
            Face::Left,
            (self.face(Face::Left) & !LEFT_MASK) | saved.rotate_left(16),
        );
    }

    pub fn b_prime(&mut self) {
        self.set_face(Face::Back, self.face(Face::Back).rotate_left(16));

        let saved = self.face(Face::Up) & UP_MASK;
        self.set_face(
            Face::Up,
            (self.face(Face::Up) & !UP_MASK)
                | (self.face(Face::Left) & LEFT_MASK).rotate_right(16),
        );
        self.set_face(
            Face::Left,
            (self.face(Face::Left) & !LEFT_MASK)
                | (self.face(Face::Down) & DOWN_MASK).rotate_right(16),
        );
        self.set_face(
            Face::Down,
            (self.face(Face::Down) & !DOWN_MASK) | ((self.face(Face::Right) & RIGHT_MASK) >> 16),
        );
        self.set_face(
            Face::Right,
            (self.face(Face::Right) & !RIGHT_MASK) | (saved >> 16),
        );
    }

    pub fn r(&mut self) {
        self.set_face(Face::Right, self.face(Face::Right).rotate_right(16));

        let saved = self.face(Face::Up) & RIGHT_MASK;
        self.set_face(
            Face::Up,
            (self.face(Face::Up) & !RIGHT_MASK) | (self.face(Face::Front) & RIGHT_MASK),
        );
        self.set_face(
            Face::Front,
            (self.face(Face::Front) & !RIGHT_MASK) | (self.face(Face::Down) & RIGHT_MASK),
        );
        self.set_face(
            Face::Down,
            (self.face(Face::Down) & !RIGHT_MASK)
                | (self.face(Face::Back) & LEFT_MASK).rotate_right(32),
        );
        self.set_face(
            Face::Back,
            (self.face(Face::Back) & !LEFT_MASK) | saved.rotate_left(32),
        );
    }

    pub fn r_prime(&mut self) {
        self.set_face(Face::Right, self.face(Face::Right).rotate_left(16));

        let saved = self.face(Face::Up) & RIGHT_MASK;
        self.set_face(
            Face::Up,
            (self.face(Face::Up) & !RIGHT_MASK)
                | (self.face(Face::Back) & LEFT_MASK).rotate_right(32),
        );
        self.set_face(
            Face::Back,
            (self.face(Face::Back) & !LEFT_MASK)
                | (self.face(Face::Down) & RIGHT_MASK).rotate_right(32),
        );
        self.set_face(
            Face::Down,
            (self.face(Face::Down) & !RIGHT_MASK) | (self.face(Face::Front) & RIGHT_MASK),
        );
        self.set_face(
            Face::Front,
            (self.face(Face::Front) & !RIGHT_MASK) | saved,
        );
    }

    pub fn l(&mut self) {
        self.set_face(Face::Left, self.face(Face::Left).rotate_right(16));

        let saved = self.face(Face::Up) & LEFT_MASK;
        self.set_face(
            Face::Up,
            (self.face(Face::Up) & !LEFT_MASK)
                | (self.face(Face::Back) & RIGHT_MASK).rotate_right(32),
        );
        self.set_face(
            Face::Back,
            (self.face(Face::Back) & !RIGHT_MASK)
                | (self.face(Face::Down) & LEFT_MASK).rotate_right(32),
        );
        self.set_face(
            Face::Down,
            (self.face(Face::Down) & !LEFT_MASK) | (self.face(Face::Front) & LEFT_MASK),
        );
        self.set_face(Face::Front, (self.face(Face::Front) & !LEFT_MASK) | saved);
    }

    pub fn l_prime(&mut self) {
        self.set_face(Face::Left, self.face(Face::Left).rotate_left(16));

        let saved = self.face(Face::Up) & LEFT_MASK;
        self.set_face(
            Face::Up,
            (self.face(Face::Up) & !LEFT_MASK) | (self.face(Face::Front) & LEFT_MASK),
        );
        self.set_face(
            Face::Front,
            (self.face(Face::Front) & !LEFT_MASK) | (self.face(Face::Down) & LEFT_MASK),
        );
        self.set_face(
            Face::Down,
            (self.face(Face::Down) & !LEFT_MASK)
                | (self.face(Face::Back) & RIGHT_MASK).rotate_right(32),
        );
        self.set_face(
            Face::Back,
            (self.face(Face::Back) & !RIGHT_MASK) | saved.rotate_right(32),
        );
    }

    /// Clockwise M slice (follows L): cycles four centers and the middle
    /// columns of the up, back, down, and front faces.
    pub fn m(&mut self) {
        let saved_center = self.center(Face::Up);
        self.set_center(Face::Up, self.center(Face::Back));
        self.set_center(Face::Back, self.center(Face::Down));
        self.set_center(Face::Down, self.center(Face::Front));
        self.set_center(Face::Front, saved_center);

        let saved = self.face(Face::Up) & MIDDLE_COL_MASK;
        self.set_face(
            Face::Up,
            (self.face(Face::Up) & !MIDDLE_COL_MASK)
                | (self.face(Face::Back) & MIDDLE_COL_MASK).rotate_right(32),
        );
        self.set_face(
            Face::Back,
            (self.face(Face::Back) & !MIDDLE_COL_MASK)
                | (self.face(Face::Down) & MIDDLE_COL_MASK).rotate_right(32),
        );
        self.set_face(
            Face::Down,
            (self.face(Face::Down) & !MIDDLE_COL_MASK)
                | (self.face(Face::Front) & MIDDLE_COL_MASK),
        );
        self.set_face(
            Face::Front,
            (self.face(Face::Front) & !MIDDLE_COL_MASK) | saved,
        );
    }

    pub fn m_prime(&mut self) {
        let saved_center = self.center(Face::Up);
        self.set_center(Face::Up, self.center(Face::Front));
        self.set_center(Face::Front, self.center(Face::Down));
        self.set_center(Face::Down, self.center(Face::Back));
        self.set_center(Face::Back, saved_center);

        let saved = self.face(Face::Up) & MIDDLE_COL_MASK;
        self.set_face(
            Face::Up,
            (self.face(Face::Up) & !MIDDLE_COL_MASK)
                | (self.face(Face::Front) & MIDDLE_COL_MASK),
        );
        self.set_face(
            Face::Front,
            (self.face(Face::Front) & !MIDDLE_COL_MASK)
                | (self.face(Face::Down) & MIDDLE_COL_MASK),
        );
        self.set_face(
            Face::Down,
            (self.face(Face::Down) & !MIDDLE_COL_MASK)
                | (self.face(Face::Back) & MIDDLE_COL_MASK).rotate_right(32),
        );
        self.set_face(
            Face::Back,
            (self.face(Face::Back) & !MIDDLE_COL_MASK) | saved.rotate_right(32),
        );
    }

    /// Clockwise E slice (follows D): cycles four centers and the middle
    /// rows of the side faces.
    pub fn e(&mut self) {
        let saved_center = self.center(Face::Front);
        self.set_center(Face::Front, self.center(Face::Left));
        self.set_center(Face::Left, self.center(Face::Back));
        self.set_center(Face::Back, self.center(Face::Right));
        self.set_center(Face::Right, saved_center);

        let saved = self.face(Face::Front) & MIDDLE_ROW_MASK;
        self.set_face(
            Face::Front,
            (self.face(Face::Front) & !MIDDLE_ROW_MASK)
                | (self.face(Face::Left) & MIDDLE_ROW_MASK),
        );
        self.set_face(
            Face::Left,
            (self.face(Face::Left) & !MIDDLE_ROW_MASK)
                | (self.face(Face::Back) & MIDDLE_ROW_MASK),
        );
        self.set_face(
            Face::Back,
            (self.face(Face::Back) & !MIDDLE_ROW_MASK)
                | (self.face(Face::Right) & MIDDLE_ROW_MASK),
        );
        self.set_face(
            Face::Right,
            (self.face(Face::Right) & !MIDDLE_ROW_MASK) | saved,
        );
    }

    pub fn e_prime(&mut self) {
        let saved_center = self.center(Face::Front);
        self.set_center(Face::Front, self.center(Face::Right));
        self.set_center(Face::Right, self.center(Face::Back));
        self.set_center(Face::Back, self.center(Face::Left));
        self.set_center(Face::Left, saved_center);

        let saved = self.face(Face::Front) & MIDDLE_ROW_MASK;
        self.set_face(
            Face::Front,
            (self.face(Face::Front) & !MIDDLE_ROW_MASK)
                | (self.face(Face::Right) & MIDDLE_ROW_MASK),
        );
        self.set_face(
            Face::Right,
            (self.face(Face::Right) & !MIDDLE_ROW_MASK)
                | (self.face(Face::Back) & MIDDLE_ROW_MASK),
        );
        self.set_face(
            Face::Back,
            (self.face(Face::Back) & !MIDDLE_ROW_MASK)
                | (self.face(Face::Left) & MIDDLE_ROW_MASK),
        );
        self.set_face(
            Face::Left,
            (self.face(Face::Left) & !MIDDLE_ROW_MASK) | saved,
        );
    }

    /// Clockwise S slice (follows F): the strip changes orientation between
    /// row and column as it passes around the cube.
    pub fn s(&mut self) {
        let saved_center = self.center(Face::Up);
        self.set_center(Face::Up, self.center(Face::Left));
        self.set_center(Face::Left, self.center(Face::Down));
        self.set_center(Face::Down, self.center(Face::Right));
        self.set_center(Face::Right, saved_center);

        let saved = self.face(Face::Up) & MIDDLE_ROW_MASK;
        self.set_face(
            Face::Up,
            (self.face(Face::Up) & !MIDDLE_ROW_MASK)
                | ((self.face(Face::Left) & MIDDLE_COL_MASK) >> 16),
        );
        self.set_face(
            Face::Left,
            (self.face(Face::Left) & !MIDDLE_COL_MASK)
                | (self.face(Face::Down) & MIDDLE_ROW_MASK).rotate_right(16),
        );
        self.set_face(
            Face::Down,
            (self.face(Face::Down) & !MIDDLE_ROW_MASK)
                | ((self.face(Face::Right) & MIDDLE_COL_MASK) >> 16),
        );
        self.set_face(
            Face::Right,
            (self.face(Face::Right) & !MIDDLE_COL_MASK) | saved.rotate_right(16),
        );
    }

    pub fn s_prime(&mut self) {
        let saved_center = self.center(Face::Up);
        self.set_center(Face::Up, self.center(Face::Right));
        self.set_center(Face::Right, self.center(Face::Down));
        self.set_center(Face::Down, self.center(Face::Left));
        self.set_center(Face::Left, saved_center);

        let saved = self.face(Face::Up) & MIDDLE_ROW_MASK;
        self.set_face(
            Face::Up,
            (self.face(Face::Up) & !MIDDLE_ROW_MASK)
                | (self.face(Face::Right) & MIDDLE_COL_MASK).rotate_left(16),
        );
        self.set_face(
            Face::Right,
            (self.face(Face::Right) & !MIDDLE_COL_MASK)
                | (self.face(Face::Down) & MIDDLE_ROW_MASK).rotate_left(16),
        );
        self.set_face(
            Face::Down,
            (self.face(Face::Down) & !MIDDLE_ROW_MASK)
                | (self.face(Face::Left) & MIDDLE_COL_MASK).rotate_left(16),
        );
        self.set_face(
            Face::Left,
            (self.face(Face::Left) & !MIDDLE_COL_MASK) | saved.rotate_left(16),
        );
    }

    pub fn u_wide(&mut self) {
        self.u();
        self.e_prime();
    }

    pub fn u_wide_prime(&mut self) {
        self.u_prime();
        self.e();
    }

    pub fn d_wide(&mut self) {
        self.d();
        self.e();
    }

    pub fn d_wide_prime(&mut self) {
        self.d_prime();
        self.e_prime();
    }

    pub fn f_wide(&mut self) {
        self.f();
        self.s();
    }

    pub fn f_wide_prime(&mut self) {
        self.f_prime();
        self.s_prime();
    }

    pub fn b_wide(&mut self) {
        self.b();
        self.s_prime();
    }

    pub fn b_wide_prime(&mut self) {
        self.b_prime();
        self.s();
    }

    pub fn r_wide(&mut self) {
        self.r();
        self.m_prime();
    }

    pub fn r_wide_prime(&mut self) {
        self.r_prime();
        self.m();
    }

    pub fn l_wide(&mut self) {
        self.l();
        self.m();
    }

    pub fn l_wide_prime(&mut self) {
        self.l_prime();
        self.m_prime();
    }

    /// Whole-cube rotations, composed from outer and slice turns. Not the
    /// fastest formulation, but it keeps the move palette closed.
    pub fn x(&mut self) {
        self.r();
        self.l_prime();
        self.m_prime();
    }

    pub fn x_prime(&mut self) {
        self.r_prime();
        self.l();
        self.m();
    }

    pub fn y(&mut self) {
        self.u();
        self.d_prime();
        self.e_prime();
    }

    pub fn y_prime(&mut self) {
        self.u_prime();
        self.d();
        self.e();
    }

    pub fn z(&mut self) {
        self.f();
        self.b_prime();
        self.s();
    }

    pub fn z_prime(&mut self) {
        self.f_prime();
        self.b();
        self.s_prime();
    }
}

impl fmt::Debug for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cube({})", self.state_string())
    }
}

/// The unfolded net: up face, then the left/front/right/back band, then
/// the down face.
impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = |face, idx| self.sticker(Location::new(face, idx)).to_char();
        let c = |face| self.center(face).to_char();

        for row in [[0, 1, 2], [7, 8, 3], [6, 5, 4]] {
            write!(f, "    ")?;
            for idx in row {
                if idx == 8 {
                    write!(f, "{}", c(Face::Up))?;
                } else {
                    write!(f, "{}", s(Face::Up, idx))?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f)?;
        for row in [[0, 1, 2], [7, 8, 3], [6, 5, 4]] {
            for face in [Face::Left, Face::Front, Face::Right, Face::Back] {
                for idx in row {
                    if idx == 8 {
                        write!(f, "{}", c(face))?;
                    } else {
                        write!(f, "{}", s(face, idx))?;
                    }
                }
                if face != Face::Back {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f)?;
        for row in [[0, 1, 2], [7, 8, 3], [6, 5, 4]] {
            write!(f, "    ")?;
            for idx in row {
                if idx == 8 {
                    write!(f, "{}", c(Face::Down))?;
                } else {
                    write!(f, "{}", s(Face::Down, idx))?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn decode_color(byte: u8) -> Color {
    Color::from_repr(byte).expect("corrupt sticker byte in packed state")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TURNS: [&str; 24] = [
        "U", "D", "F", "B", "R", "L", "u", "d", "f", "b", "r", "l", "M", "E", "S", "x", "y", "z",
        "X", "Y", "Z", "x'", "y'", "z'",
    ];

    #[test]
    fn fresh_cube_is_solved() {
        assert!(Cube::new().is_solved());
    }

    #[test]
    fn any_single_turn_unsolves() {
        for token in ["U", "D", "F", "B", "R", "L", "u", "f", "r", "M", "E", "S"] {
            let mut cube = Cube::new();
            cube.parse_move(token);
            assert!(!cube.is_solved(), "{token} left the cube solved");
        }
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        for token in ALL_TURNS {
            let mut cube = Cube::new();
            for _ in 0..4 {
                cube.parse_move(token);
            }
            assert!(cube.is_solved(), "{token}⁴ is not the identity");
        }
    }

    #[test]
    fn two_double_turns_are_identity() {
        for token in ["U2", "D2", "F2", "B2", "R2", "L2", "M2", "E2", "S2", "u2", "r2", "x2"] {
            let mut cube = Cube::new();
            cube.parse_move(token);
            cube.parse_move(token);
            assert!(cube.is_solved(), "{token} twice is not the identity");
        }
    }

    #[test]
    fn prime_undoes_normal() {
        for token in ["U", "D", "F", "B", "R", "L", "u", "d", "f", "b", "r", "l", "M", "E", "S"] {
            let mut cube = Cube::new();
            cube.parse_move(token);
            cube.parse_move(&format!("{token}'"));
            assert!(cube.is_solved(), "{token}' did not undo {token}");
        }
    }

    #[test]
    fn rotation_decompositions_commute() {
        // R L' = x M, U D' = y E, F B' = z S'
        for (lhs, rhs) in [("R L'", "x M"), ("U D'", "y E"), ("F B'", "z S'")] {
            let mut a = Cube::new();
            let mut b = Cube::new();
            a.read_moves(lhs);
            b.read_moves(rhs);
            assert_eq!(a, b, "{lhs} != {rhs}");
        }
    }

    #[test]
    fn rotations_keep_the_cube_solved() {
        let mut cube = Cube::new();
        cube.read_moves("x y z x' z2 y2");
        assert!(cube.is_solved());
    }

    #[test]
    fn read_moves_skips_junk_and_round_trips() {
        let mut cube = Cube::new();
        let moves = cube.read_moves("(R U R' U') f2  M' ... y");
        let rendered: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
        assert_eq!(rendered.join(" "), "R U R' U' f2 M' y");
    }

    #[test]
    fn execute_moves_replays_a_scramble() {
        let mut scrambled = Cube::new();
        let moves = scrambled.read_moves("R U2 F' L D B2 r M E' S u2 x");
        let mut replayed = Cube::new();
        replayed.execute_moves(&moves);
        assert_eq!(scrambled, replayed);
    }

    #[test]
    fn state_string_round_trips() {
        let mut cube = Cube::new();
        cube.read_moves("F2 U L R' F2 L' R U F2 M S E u r'");
        let state = cube.state_string();
        let mut copied = Cube::new();
        copied.copy_state(&state).unwrap();
        assert_eq!(cube, copied);
    }

    #[test]
    fn solved_state_string_loads_solved() {
        let state = Cube::new().state_string();
        let mut cube = Cube::new();
        cube.read_moves("R U R' U'");
        cube.copy_state(&state).unwrap();
        assert!(cube.is_solved());
    }

    #[test]
    fn copy_state_rejects_wrong_length() {
        let mut cube = Cube::new();
        assert_eq!(
            cube.copy_state("WWW"),
            Err(StateError::Length { found: 3 })
        );
    }

    #[test]
    fn slice_turns_move_centers() {
        let mut cube = Cube::new();
        let front = cube.center(Face::Front);
        cube.m();
        assert_eq!(cube.center(Face::Down), front);
        cube.m_prime();
        assert_eq!(cube.center(Face::Front), front);
    }

    #[test]
    fn turned_stickers_stay_on_their_pieces() {
        // After any scramble the piece reachable through the adjacency
        // tables still carries a legal color pairing.
        let mut cube = Cube::new();
        cube.read_moves("R U F' D2 L' B M E S");
        for face in [Face::Up, Face::Front, Face::Right] {
            for idx in (1..8).step_by(2) {
                let loc = Location::new(face, idx);
                let a = cube.sticker(loc);
                let b = cube.sticker(loc.adjacent_edge());
                assert_ne!(a, b, "edge with two identical stickers at {loc:?}");
                assert_ne!(a.to_char(), ' ');
                assert_ne!(b.to_char(), ' ');
            }
        }
    }
}
