//! Final stage: permute the (already oriented) last layer and adjust the
//! up face.
//!
//! Each of the 21 permutation cases is one packed word in the same slot
//! layout as a face word, except each slot holds the index the piece at
//! that slot should move to. A slot equal to its own index means the piece
//! stays. Matching relabels the four side faces on the fly: the first
//! sticker routed to a face fixes that face's color, and every later
//! sticker routed there must agree.

use cube_core::{Color, Cube, Face, Location, Move, MoveKind};
use log::debug;

use crate::{push_u_turns, STAGE_BREAK};

const NUM_PLLS: usize = 21;

const fn perm(slots: [u64; 8]) -> u64 {
    let mut word = 0;
    let mut i = 0;
    while i < 8 {
        word |= slots[i] << ((7 - i) * 8);
        i += 1;
    }
    word
}

/// Where each up-face slot's piece must go, per case.
const PLLS: [u64; NUM_PLLS] = [
    perm([0, 1, 2, 7, 4, 3, 6, 5]), // Ua
    perm([0, 1, 2, 5, 4, 7, 6, 3]), // Ub
    perm([0, 7, 2, 5, 4, 3, 6, 1]), // Z
    perm([0, 5, 2, 7, 4, 1, 6, 3]), // H
    perm([2, 1, 4, 3, 0, 5, 6, 7]), // Aa
    perm([4, 1, 0, 3, 2, 5, 6, 7]), // Ab
    perm([6, 1, 4, 3, 2, 5, 0, 7]), // E
    perm([0, 7, 4, 3, 2, 5, 6, 1]), // Ra
    perm([2, 1, 0, 5, 4, 3, 6, 7]), // Rb
    perm([2, 7, 0, 3, 4, 5, 6, 1]), // Ja
    perm([0, 1, 4, 5, 2, 3, 6, 7]), // Jb
    perm([0, 1, 4, 7, 2, 5, 6, 3]), // T
    perm([0, 5, 4, 3, 2, 1, 6, 7]), // F
    perm([4, 3, 2, 1, 0, 5, 6, 7]), // V
    perm([4, 7, 2, 3, 0, 5, 6, 1]), // Y
    perm([0, 1, 6, 7, 4, 5, 2, 3]), // Na
    perm([4, 1, 2, 7, 0, 5, 6, 3]), // Nb
    perm([2, 7, 6, 1, 4, 5, 0, 3]), // Ga
    perm([6, 3, 0, 7, 4, 5, 2, 1]), // Gb
    perm([6, 1, 2, 5, 0, 7, 4, 3]), // Gc
    perm([2, 7, 6, 3, 4, 1, 0, 5]), // Gd
];

/// Algorithm per case, same order as [`PLLS`].
const PLL_ALGS: [&str; NUM_PLLS] = [
    "(R U' R U) R U (R U' R' U') R2",                                  // Ua
    "R2 U (R U R' U') R' U' (R' U R')",                                // Ub
    "(M2' U M2' U) (M' U2) (M2' U2 M')",                               // Z
    "(M2' U M2') U2 (M2' U M2')",                                      // H
    "x (R' U R') D2 (R U' R') D2 R2 x'",                               // Aa
    "x R2' D2 (R U R') D2 (R U' R) x'",                                // Ab
    "x' (R U' R' D) (R U R' D') (R U R' D) (R U' R' D') x",            // E
    "(R U' R' U') (R U R D) (R' U' R D') (R' U2 R')",                  // Ra
    "(R' U2 R U2') R' F (R U R' U') R' F' R2",                         // Rb
    "(R' U L' U2) (R U' R' U2 R) L",                                   // Ja
    "(R U R' F') (R U R' U') R' F R2 U' R'",                           // Jb
    "(R U R' U') (R' F R2 U') R' U' (R U R' F')",                      // T
    "(R' U' F') (R U R' U') (R' F R2 U') (R' U' R U) (R' U R)",        // F
    "(R' U R' U') y (R' F' R2 U') (R' U R' F) R F",                    // V
    "F (R U' R' U') (R U R' F') (R U R' U') (R' F R F')",              // Y
    "(R U R' U) (R U R' F') (R U R' U') (R' F R2 U') R' U2 (R U' R')", // Na
    "(R' U R U') (R' F' U' F) (R U R' F) R' F' (R U' R)",              // Nb
    "R2 U (R' U R' U') (R U' R2) D U' (R' U R D')",                    // Ga
    "(F' U' F) (R2 u R' U) (R U' R u') R2'",                           // Gb
    "R2 U' (R U' R U) (R' U R2 D') (U R U' R') D",                     // Gc
    "D' (R U R' U') D (R2 U' R U') (R' U R' U) R2",                    // Gd
];

fn face_idx(face: Face) -> usize {
    match face {
        Face::Front => 0,
        Face::Back => 1,
        Face::Right => 2,
        Face::Left => 3,
        _ => unreachable!("the relabeling only tracks side faces"),
    }
}

/// Route the sticker at `loc` to `face`: the first color routed to a face
/// claims it, later ones must agree.
fn check_location(cube: &Cube, faces: &mut [Color; 4], face: Face, loc: Location) -> bool {
    let idx = face_idx(face);
    if faces[idx] == Color::Empty {
        faces[idx] = cube.sticker(loc);
        true
    } else {
        faces[idx] == cube.sticker(loc)
    }
}

/// Whether the top-layer piece at `curr_idx` is consistent with moving to
/// `target_idx` under the current relabeling.
fn should_move_to(cube: &Cube, faces: &mut [Color; 4], curr_idx: u8, target_idx: u8) -> bool {
    if curr_idx % 2 == 0 {
        let (adj0, adj1) = Location::new(Face::Up, curr_idx).adjacent_corner();

        if (curr_idx + 4) % 8 == target_idx {
            // diagonal swap: both stickers land on opposite faces
            check_location(cube, faces, adj0.face.opposite(), adj0)
                && check_location(cube, faces, adj1.face.opposite(), adj1)
        } else if (curr_idx + 2) % 8 == target_idx {
            // one corner clockwise
            if curr_idx == 0 || curr_idx == 4 {
                check_location(cube, faces, adj1.face.opposite(), adj0)
                    && check_location(cube, faces, adj0.face, adj1)
            } else {
                check_location(cube, faces, adj1.face, adj0)
                    && check_location(cube, faces, adj0.face.opposite(), adj1)
            }
        } else if (curr_idx + 6) % 8 == target_idx {
            // one corner counter-clockwise
            if curr_idx == 0 || curr_idx == 4 {
                check_location(cube, faces, adj1.face, adj0)
                    && check_location(cube, faces, adj0.face.opposite(), adj1)
            } else {
                check_location(cube, faces, adj1.face.opposite(), adj0)
                    && check_location(cube, faces, adj0.face, adj1)
            }
        } else {
            true
        }
    } else {
        let target_face = Location::new(Face::Up, target_idx).adjacent_edge().face;
        let adj = Location::new(Face::Up, curr_idx).adjacent_edge();
        check_location(cube, faces, target_face, adj)
    }
}

fn can_piece_stay(cube: &Cube, faces: &mut [Color; 4], idx: u8) -> bool {
    if idx % 2 == 0 {
        let (adj0, adj1) = Location::new(Face::Up, idx).adjacent_corner();
        check_location(cube, faces, adj0.face, adj0) && check_location(cube, faces, adj1.face, adj1)
    } else {
        let adj = Location::new(Face::Up, idx).adjacent_edge();
        check_location(cube, faces, adj.face, adj)
    }
}

fn pll_case_matches(cube: &Cube, pll: u64) -> bool {
    let mut faces = [Color::Empty; 4];
    for curr_idx in 0..8u8 {
        let target_idx = (pll >> ((7 - curr_idx as u64) * 8)) as u8;
        let consistent = if target_idx == curr_idx {
            can_piece_stay(cube, &mut faces, curr_idx)
        } else {
            should_move_to(cube, &mut faces, curr_idx, target_idx)
        };
        if !consistent {
            return false;
        }
    }
    true
}

/// Try the case in all four orientations (a 16-bit rotate per 90°).
fn pll_case_fits(cube: &Cube, mut pll: u64) -> Option<u8> {
    for shifts in 0..4 {
        if pll_case_matches(cube, pll) {
            return Some(shifts);
        }
        pll = pll.rotate_right(16);
    }
    None
}

/// Index and shift count of the matching case, or `(NUM_PLLS, 0)` when
/// none applies — the top layer is at most one turn from solved.
fn find_pll_type(cube: &Cube) -> (usize, u8) {
    for (idx, &pll) in PLLS.iter().enumerate() {
        if let Some(shifts) = pll_case_fits(cube, pll) {
            return (idx, shifts);
        }
    }
    (NUM_PLLS, 0)
}

/// Permute the last layer and finish the solve. Assumes the first two
/// layers are solved and the last layer is oriented.
pub fn solve_pll(cube: &mut Cube, solution: &mut Vec<Move>) {
    let (pll, shifts) = find_pll_type(cube);

    match shifts {
        1 => solution.push(cube.twist(Face::Up, MoveKind::Prime)),
        2 => solution.push(cube.twist(Face::Up, MoveKind::Double)),
        3 => solution.push(cube.twist(Face::Up, MoveKind::Normal)),
        _ => {}
    }

    if pll != NUM_PLLS {
        debug!("pll: case {pll} after {shifts} shifts");
        let moves = cube.read_moves(PLL_ALGS[pll]);
        solution.extend(moves);
    }

    // final adjustment of the up face; bounded so a malformed state
    // terminates unsolved instead of spinning
    let mut turns = 0;
    while !cube.is_solved() && turns < 4 {
        cube.u();
        turns += 1;
    }
    push_u_turns(turns, solution);

    solution.push(STAGE_BREAK);
}
