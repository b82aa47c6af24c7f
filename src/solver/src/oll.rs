//! Third stage: orient the last layer so the whole up face shows the top
//! color.
//!
//! The up face reduces to an 8-bit fingerprint (bit `i` set when slot `i`
//! already shows the top color). The 57 published OLL cases collapse to 29
//! fingerprints up to rotation; [`OLL_HANDLERS`] lists them in decreasing
//! popcount order, so the first match wins. A fingerprint rarely pins down
//! the case on its own — the side faces' top rows disambiguate. For most
//! fingerprints that probe is a single row test and the whole case is
//! data: an adjust-U table per shift count plus the algorithm string. The
//! four cases whose disambiguation walks the side faces searching for bars
//! or headlights keep dedicated handlers.

use cube_core::MoveKind::{Double, NoMove, Normal, Prime};
use cube_core::{Color, Cube, Face, Location, Move, MoveKind, Rotation};
use log::debug;

use crate::STAGE_BREAK;

const NUM_OLL_TYPES: usize = 29;

/// Up-face adjustment indexed by the number of fingerprint shifts.
type Auf = [MoveKind; 4];

struct OllCase {
    auf: Auf,
    alg: &'static str,
}

enum OllHandler {
    /// The side rows don't matter; one adjustment table, one algorithm.
    Fixed(OllCase),
    /// Probe the top row of a shift-relative side face, then apply the
    /// matching sub-case.
    Probe {
        base: Face,
        extra: u8,
        row: (bool, bool, bool),
        hit: OllCase,
        miss: OllCase,
    },
    /// Adjust the up face first, then probe a fixed face to pick between
    /// two algorithms.
    AdjustThenProbe {
        auf: Auf,
        face: Face,
        row: (bool, bool, bool),
        hit: &'static str,
        miss: &'static str,
    },
    /// Disambiguation needs an iterative search over the side faces.
    Special(fn(&mut Cube, Color, u8, &mut Vec<Move>)),
}

/// Every fingerprint with its handler, ordered by decreasing number of
/// oriented stickers. Case names follow the usual printed OLL sheets.
const OLL_HANDLERS: [(u8, OllHandler); NUM_OLL_TYPES] = [
    // OCLL3 / OCLL4
    (
        1 << 0 | 1 << 1 | 1 << 2 | 1 << 3 | 1 << 5 | 1 << 7,
        OllHandler::Probe {
            base: Face::Back,
            extra: 2,
            row: (true, false, true),
            hit: OllCase {
                auf: [NoMove, Prime, Double, Normal],
                alg: "R2 D R' U2 R D' R' U2 R'",
            },
            miss: OllCase {
                auf: [Normal, NoMove, Prime, Double],
                alg: "(r U R' U') (r' F R F')",
            },
        },
    ),
    // OCLL5
    (
        1 << 0 | 1 << 1 | 1 << 3 | 1 << 4 | 1 << 5 | 1 << 7,
        OllHandler::Probe {
            base: Face::Front,
            extra: 0,
            row: (true, false, false),
            hit: OllCase {
                auf: [NoMove, Prime, NoMove, NoMove],
                alg: "y F' (r U R' U') r' F R",
            },
            miss: OllCase {
                auf: [Double, Normal, NoMove, NoMove],
                alg: "y F' (r U R' U') r' F R",
            },
        },
    ),
    // E1
    (
        1 << 0 | 1 << 1 | 1 << 2 | 1 << 4 | 1 << 6 | 1 << 7,
        OllHandler::Fixed(OllCase {
            auf: [NoMove, Prime, Double, Normal],
            alg: "(r U R' U') M (U R U' R')",
        }),
    ),
    // E2
    (
        1 << 0 | 1 << 2 | 1 << 3 | 1 << 4 | 1 << 6 | 1 << 7,
        OllHandler::Fixed(OllCase {
            auf: [NoMove, Normal, NoMove, NoMove],
            alg: "(R U R' U') M' (U R U' r')",
        }),
    ),
    // OCLL6 / OCLL7
    (
        1 << 0 | 1 << 1 | 1 << 3 | 1 << 5 | 1 << 7,
        OllHandler::Probe {
            base: Face::Back,
            extra: 0,
            row: (true, false, false),
            hit: OllCase {
                auf: [Normal, NoMove, Prime, Double],
                alg: "R U2 R' U' R U' R'",
            },
            miss: OllCase {
                auf: [Prime, Double, Normal, NoMove],
                alg: "R U R' U R U2 R'",
            },
        },
    ),
    // OCLL1 / OCLL2
    (
        1 << 1 | 1 << 3 | 1 << 5 | 1 << 7,
        OllHandler::Special(solve_corner_cases),
    ),
    // T1 / T2
    (
        1 << 2 | 1 << 3 | 1 << 4 | 1 << 7,
        OllHandler::AdjustThenProbe {
            auf: [NoMove, Prime, Double, Normal],
            face: Face::Front,
            row: (true, true, false),
            hit: "(R U R' U') (R' F R F')",
            miss: "F (R U R' U') F'",
        },
    ),
    // C1 / C2
    (
        1 << 0 | 1 << 2 | 1 << 3 | 1 << 7,
        OllHandler::Probe {
            base: Face::Front,
            extra: 0,
            row: (true, true, true),
            hit: OllCase {
                auf: [Prime, Double, Normal, NoMove],
                alg: "R' U' (R' F R F') U R",
            },
            miss: OllCase {
                auf: [Double, Normal, NoMove, Prime],
                alg: "(R U R2' U') (R' F R U) R U' F'",
            },
        },
    ),
    // W1 / W2
    (
        1 << 0 | 1 << 4 | 1 << 5 | 1 << 7,
        OllHandler::Probe {
            base: Face::Right,
            extra: 0,
            row: (false, true, true),
            hit: OllCase {
                auf: [NoMove, Prime, Double, Normal],
                alg: "(R' U' R U') (R' U R U) l U' R' U x",
            },
            miss: OllCase {
                auf: [Normal, NoMove, Prime, Double],
                alg: "(R U R' U) (R U' R' U') (R' F R F')",
            },
        },
    ),
    // P1 / P3
    (
        1 << 1 | 1 << 2 | 1 << 3 | 1 << 4,
        OllHandler::Probe {
            base: Face::Front,
            extra: 0,
            row: (true, true, false),
            hit: OllCase {
                auf: [NoMove, Prime, Double, Normal],
                alg: "(R' U' F) (U R U' R') F' R",
            },
            miss: OllCase {
                auf: [Prime, Double, Normal, NoMove],
                alg: "R' U' F' U F R",
            },
        },
    ),
    // P2 / P4
    (
        1 << 2 | 1 << 3 | 1 << 4 | 1 << 5,
        OllHandler::AdjustThenProbe {
            auf: [NoMove, Prime, Double, Normal],
            face: Face::Front,
            row: (true, false, false),
            hit: "R U B' (U' R' U) (R B R')",
            miss: "f (R U R' U') f'",
        },
    ),
    // F3 / F4
    (
        1 << 0 | 1 << 1 | 1 << 4 | 1 << 7,
        OllHandler::Probe {
            base: Face::Front,
            extra: 0,
            row: (true, true, false),
            hit: OllCase {
                auf: [NoMove, Prime, Double, Normal],
                alg: "F (R U' R' U') (R U R' F')",
            },
            miss: OllCase {
                auf: [Double, Normal, NoMove, Prime],
                alg: "(R U2') (R2' F R F') (R U2' R')",
            },
        },
    ),
    // A1 / A4
    (
        1 << 0 | 1 << 2 | 1 << 5 | 1 << 7,
        OllHandler::Probe {
            base: Face::Front,
            extra: 0,
            row: (true, false, true),
            hit: OllCase {
                auf: [NoMove, Prime, Double, Normal],
                alg: "(R' U' R U' R' U2R) F (R U R' U') F'",
            },
            miss: OllCase {
                auf: [Normal, NoMove, Prime, Double],
                alg: "(R U R' U') (R U' R') (F' U' F) (R U R')",
            },
        },
    ),
    // A2 / A3
    (
        1 << 1 | 1 << 4 | 1 << 6 | 1 << 7,
        OllHandler::AdjustThenProbe {
            auf: [NoMove, Prime, Double, Normal],
            face: Face::Back,
            row: (true, false, true),
            hit: "(R U R' U R U2' R') F (R U R' U') F'",
            miss: "F U (R U2 R' U') (R U2 R' U') F'",
        },
    ),
    // B5
    (
        1 << 2 | 1 << 3 | 1 << 6 | 1 << 7,
        OllHandler::Probe {
            base: Face::Back,
            extra: 0,
            row: (false, true, true),
            hit: OllCase {
                auf: [NoMove, Prime, NoMove, NoMove],
                alg: "(L F') (L' U' L U) F U' L'",
            },
            miss: OllCase {
                auf: [Double, Normal, NoMove, NoMove],
                alg: "(L F') (L' U' L U) F U' L'",
            },
        },
    ),
    // B6
    (
        1 << 0 | 1 << 3 | 1 << 4 | 1 << 7,
        OllHandler::Probe {
            base: Face::Back,
            extra: 0,
            row: (true, true, false),
            hit: OllCase {
                auf: [NoMove, Prime, NoMove, NoMove],
                alg: "(R' F) (R U R' U') F' U R",
            },
            miss: OllCase {
                auf: [Double, Normal, NoMove, NoMove],
                alg: "(R' F) (R U R' U') F' U R",
            },
        },
    ),
    // O8
    (
        1 << 0 | 1 << 2 | 1 << 4 | 1 << 6,
        OllHandler::Fixed(OllCase {
            auf: [NoMove, NoMove, NoMove, NoMove],
            alg: "M U (R U R' U') M2' (U R U' r')",
        }),
    ),
    // S1 / S2
    (
        1 << 1 | 1 << 2 | 1 << 3,
        OllHandler::Probe {
            base: Face::Back,
            extra: 0,
            row: (false, false, true),
            hit: OllCase {
                auf: [Normal, NoMove, Prime, Double],
                alg: "(r' U2' R U R' U r)",
            },
            miss: OllCase {
                auf: [NoMove, Prime, Double, Normal],
                alg: "(r U2 R' U' R U' r')",
            },
        },
    ),
    // F1 / F2
    (
        1 << 1 | 1 << 4 | 1 << 7,
        OllHandler::Probe {
            base: Face::Front,
            extra: 0,
            row: (true, true, false),
            hit: OllCase {
                auf: [NoMove, Prime, Double, Normal],
                alg: "(R U R' U') R' F (R2 U R' U') F'",
            },
            miss: OllCase {
                auf: [Prime, Double, Normal, NoMove],
                alg: "(R U R' U) (R' F R F') (R U2' R')",
            },
        },
    ),
    // K1 / K4
    (
        1 << 3 | 1 << 6 | 1 << 7,
        OllHandler::Probe {
            base: Face::Front,
            extra: 0,
            row: (false, true, true),
            hit: OllCase {
                auf: [NoMove, Prime, Double, Normal],
                alg: "(r U' r') (U' r U r') y' (R'U R)",
            },
            miss: OllCase {
                auf: [Double, Normal, NoMove, Prime],
                alg: "(r U r') (R U R' U') (r U' r')",
            },
        },
    ),
    // K2 / K3
    (
        1 << 3 | 1 << 4 | 1 << 7,
        OllHandler::AdjustThenProbe {
            auf: [NoMove, Prime, Double, Normal],
            face: Face::Front,
            row: (true, true, false),
            hit: "(R' F R) (U R' F' R) (F U' F')",
            miss: "(r' U' r) (R' U' R U) (r' U r)",
        },
    ),
    // B1 / B4
    (
        1 << 1 | 1 << 6 | 1 << 7,
        OllHandler::Probe {
            base: Face::Front,
            extra: 0,
            row: (false, true, true),
            hit: OllCase {
                auf: [NoMove, Prime, Double, Normal],
                alg: "(r U R' U R U2' r')",
            },
            miss: OllCase {
                auf: [Normal, NoMove, Prime, Double],
                alg: "M' (R' U' R U' R' U2 R) U' M",
            },
        },
    ),
    // B2 / B3
    (
        1 << 0 | 1 << 5 | 1 << 7,
        OllHandler::Probe {
            base: Face::Back,
            extra: 0,
            row: (true, true, false),
            hit: OllCase {
                auf: [NoMove, Prime, Double, Normal],
                alg: "(r' U' R U' R' U2 r)",
            },
            miss: OllCase {
                auf: [Prime, Double, Normal, NoMove],
                alg: "r' (R2 U R' U R U2 R') U M'",
            },
        },
    ),
    // I1 / I2 / I3 / I4
    (1 << 3 | 1 << 7, OllHandler::Special(solve_bar_cases)),
    // L1 ..= L6
    (1 << 1 | 1 << 7, OllHandler::Special(solve_shape_cases)),
    // O6 / O7
    (
        1 << 0 | 1 << 2,
        OllHandler::Probe {
            base: Face::Front,
            extra: 0,
            row: (true, true, true),
            hit: OllCase {
                auf: [Normal, NoMove, Prime, Double],
                alg: "R U2' (R2' F R F') U2' M' (U R U' r')",
            },
            miss: OllCase {
                auf: [NoMove, Prime, Double, Normal],
                alg: "M U (R U R' U') M' (R' F R F')",
            },
        },
    ),
    // O5
    (
        1 << 0 | 1 << 4,
        OllHandler::Probe {
            base: Face::Back,
            extra: 0,
            row: (true, true, false),
            hit: OllCase {
                auf: [NoMove, Prime, NoMove, NoMove],
                alg: "(R U R' U) (R' F R F') U2' (R' F R F')",
            },
            miss: OllCase {
                auf: [Double, Normal, NoMove, NoMove],
                alg: "(R U R' U) (R' F R F') U2' (R' F R F')",
            },
        },
    ),
    // O3 / O4
    (
        1 << 0,
        OllHandler::Probe {
            base: Face::Left,
            extra: 0,
            row: (false, true, true),
            hit: OllCase {
                auf: [Double, Normal, NoMove, Prime],
                alg: "f (R U R' U') f' U' F (R U R' U') F'",
            },
            miss: OllCase {
                auf: [Normal, NoMove, Prime, Double],
                alg: "f (R U R' U') f' U F (R U R' U') F'",
            },
        },
    ),
    // O1 / O2
    (0, OllHandler::Special(solve_dot_cases)),
];

/// Mask over the top-row slots (0, 1, 2) of a side face's packed word,
/// plus the same slots filled with `color`.
fn row_mask(color: Color, (left, middle, right): (bool, bool, bool)) -> (u64, u64) {
    let mut mask = 0;
    let mut row = 0;
    if left {
        mask |= 0xff << 56;
        row |= (color as u64) << 56;
    }
    if middle {
        mask |= 0xff << 48;
        row |= (color as u64) << 48;
    }
    if right {
        mask |= 0xff << 40;
        row |= (color as u64) << 40;
    }
    (mask, row)
}

fn row_matches(cube: &Cube, color: Color, face: Face, row: (bool, bool, bool)) -> bool {
    let (mask, want) = row_mask(color, row);
    cube.face(face) & mask == want
}

/// Mask over the up-face slots a fingerprint selects, plus the same slots
/// filled with `color`.
fn oll_mask(color: Color, oll: u8) -> (u64, u64) {
    let mut mask = 0;
    let mut face = 0;
    for i in 0..8u64 {
        if oll & (1 << i) != 0 {
            mask |= 0xff << ((7 - i) * 8);
            face |= (color as u64) << ((7 - i) * 8);
        }
    }
    (mask, face)
}

/// Try the fingerprint in all four orientations (a 2-bit rotate per 90°)
/// and report how many clockwise shifts lined it up with the cube.
fn oll_case_fits(cube: &Cube, top_color: Color, mut oll: u8) -> Option<u8> {
    for shifts in 0..4 {
        let (mask, want) = oll_mask(top_color, oll);
        if cube.face(Face::Up) & mask == want {
            return Some(shifts);
        }
        oll = oll.rotate_left(2);
    }
    None
}

fn find_oll_type(cube: &Cube, top_color: Color) -> (usize, u8) {
    for (idx, (fingerprint, _)) in OLL_HANDLERS.iter().enumerate() {
        if let Some(shifts) = oll_case_fits(cube, top_color, *fingerprint) {
            return (idx, shifts);
        }
    }
    unreachable!("the all-zero fingerprint matches every up face");
}

fn adjust_u(cube: &mut Cube, kind: MoveKind, solution: &mut Vec<Move>) {
    if kind != NoMove {
        solution.push(cube.twist(Face::Up, kind));
    }
}

fn run_alg(cube: &mut Cube, alg: &str, solution: &mut Vec<Move>) {
    let moves = cube.read_moves(alg);
    solution.extend(moves);
}

fn apply_case(cube: &mut Cube, shifts: u8, case: &OllCase, solution: &mut Vec<Move>) {
    adjust_u(cube, case.auf[shifts as usize], solution);
    run_alg(cube, case.alg, solution);
}

/// OCLL1 / OCLL2: all four corners are misoriented. Find the face with
/// headlights and check whether the opposite face has them too.
fn solve_corner_cases(cube: &mut Cube, top_color: Color, _shifts: u8, solution: &mut Vec<Move>) {
    let headlights = (true, false, true);
    let mut face = Face::Front;
    while !row_matches(cube, top_color, face, headlights) {
        face = face.adjacent(Rotation::Y);
    }

    if row_matches(cube, top_color, face.opposite(), headlights) {
        if face == Face::Right || face == Face::Left {
            solution.push(cube.twist(Face::Up, Normal));
        }
        run_alg(cube, "(R U2 R') (U' R U R') (U' R U' R')", solution);
    } else {
        match face {
            Face::Back => solution.push(cube.twist(Face::Up, Prime)),
            Face::Right => solution.push(cube.twist(Face::Up, Double)),
            Face::Front => solution.push(cube.twist(Face::Up, Normal)),
            _ => {}
        }
        run_alg(cube, "R U2 R2 U' R2 U' R2 U2 R", solution);
    }
}

/// I1 / I2 / I3 / I4: the oriented stickers form a vertical bar through
/// the center. A continuous side bar separates I2/I3 from I1/I4.
fn solve_bar_cases(cube: &mut Cube, top_color: Color, shifts: u8, solution: &mut Vec<Move>) {
    let bar = (true, true, true);
    let mut face = Face::Front;
    let mut found = false;
    for _ in 0..4 {
        if row_matches(cube, top_color, face, bar) {
            found = true;
            break;
        }
        face = face.adjacent(Rotation::Y);
    }

    if found {
        if !row_matches(cube, top_color, face.opposite(), bar) {
            // I2
            match face {
                Face::Front => solution.push(cube.twist(Face::Up, Prime)),
                Face::Back => solution.push(cube.twist(Face::Up, Normal)),
                Face::Left => solution.push(cube.twist(Face::Up, Double)),
                _ => {}
            }
            run_alg(cube, "(R' U' R U' R' U) y' (R' U R) B", solution);
        } else {
            // I3
            if shifts == 1 {
                solution.push(cube.twist(Face::Up, Normal));
            }
            run_alg(cube, "(R' F R U) (R U' R2' F') R2 U' R' (U R U R')", solution);
        }
    } else {
        let headlights = (true, false, true);
        while !row_matches(cube, top_color, face, headlights) {
            face = face.adjacent(Rotation::Y);
        }
        if !row_matches(cube, top_color, face.opposite(), headlights) {
            // I1
            match face {
                Face::Front => solution.push(cube.twist(Face::Up, Normal)),
                Face::Back => solution.push(cube.twist(Face::Up, Prime)),
                Face::Right => solution.push(cube.twist(Face::Up, Double)),
                _ => {}
            }
            run_alg(cube, "f (R U R' U') (R U R' U') f'", solution);
        } else {
            // I4
            if shifts == 1 {
                solution.push(cube.twist(Face::Up, Normal));
            }
            run_alg(cube, "r' U' r (U' R' U R) (U' R' U R) r' U r", solution);
        }
    }
}

/// L1 ..= L6: an oriented corner-edge L on the up face. The side bars and
/// headlights tell the six variants apart.
fn solve_shape_cases(cube: &mut Cube, top_color: Color, shifts: u8, solution: &mut Vec<Move>) {
    let bar = (true, true, true);
    let mut face = Face::Front;
    let mut found = false;
    for _ in 0..4 {
        if row_matches(cube, top_color, face, bar) {
            found = true;
            break;
        }
        face = face.adjacent(Rotation::Y);
    }

    if !found {
        // L1 or L2
        let headlights = (true, false, true);
        while !row_matches(cube, top_color, face, headlights) {
            face = face.adjacent(Rotation::Y);
        }
        if row_matches(cube, top_color, face.adjacent(Rotation::Y), (true, true, false)) {
            // L1
            adjust_u(cube, [Normal, NoMove, Prime, Double][shifts as usize], solution);
            run_alg(cube, "F' (L' U' L U) (L' U' L U) F", solution);
        } else {
            // L2
            adjust_u(cube, [NoMove, Prime, Double, Normal][shifts as usize], solution);
            run_alg(cube, "F (R U R' U') (R U R' U') F'", solution);
        }
    } else {
        let headlights = (true, false, true);
        if !row_matches(cube, top_color, face.opposite(), headlights) {
            // L3 or L4
            if row_matches(cube, top_color, face.adjacent(Rotation::YPrime), (false, true, true)) {
                // L3
                adjust_u(cube, [Normal, NoMove, Prime, Double][shifts as usize], solution);
                run_alg(cube, "r U' r2' U r2 U r2' U' r", solution);
            } else {
                // L4
                adjust_u(cube, [Double, Normal, NoMove, Prime][shifts as usize], solution);
                run_alg(cube, "r' U r2 U' r2' U' r2 U r'", solution);
            }
        } else {
            // L5 or L6
            if row_matches(cube, top_color, face.adjacent(Rotation::Y), (false, true, false)) {
                // L5
                adjust_u(cube, [Double, Normal, NoMove, Prime][shifts as usize], solution);
                run_alg(cube, "(r' U' R U') (R' U R U') R' U2 r", solution);
            } else {
                // L6
                adjust_u(cube, [Normal, NoMove, Prime, Double][shifts as usize], solution);
                run_alg(cube, "(r U R' U) (R U' R' U) R U2' r'", solution);
            }
        }
    }
}

/// O1 / O2: no sticker oriented. Both have at least one continuous side
/// bar; O1 has one on the opposite face as well.
fn solve_dot_cases(cube: &mut Cube, top_color: Color, _shifts: u8, solution: &mut Vec<Move>) {
    let bar = (true, true, true);
    let mut face = Face::Front;
    while !row_matches(cube, top_color, face, bar) {
        face = face.adjacent(Rotation::Y);
    }

    if row_matches(cube, top_color, face.opposite(), bar) {
        // O1
        if face == Face::Front || face == Face::Back {
            solution.push(cube.twist(Face::Up, Normal));
        }
        run_alg(cube, "(R U2') (R2' F R F') U2' (R' F R F')", solution);
    } else {
        // O2
        match face {
            Face::Front => solution.push(cube.twist(Face::Up, Normal)),
            Face::Back => solution.push(cube.twist(Face::Up, Prime)),
            Face::Right => solution.push(cube.twist(Face::Up, Double)),
            _ => {}
        }
        run_alg(cube, "F (R U R' U') F' f (R U R' U') f'", solution);
    }
}

/// Orient the last layer. Assumes the first two layers are solved with
/// the cross color down.
pub fn solve_oll(cube: &mut Cube, solution: &mut Vec<Move>) {
    let top_color = cube.center(Face::Up);

    if (0..8).all(|idx| cube.sticker(Location::new(Face::Up, idx)) == top_color) {
        return;
    }

    let (idx, shifts) = find_oll_type(cube, top_color);
    debug!("oll: fingerprint {idx} after {shifts} shifts");

    match &OLL_HANDLERS[idx].1 {
        OllHandler::Fixed(case) => apply_case(cube, shifts, case, solution),
        OllHandler::Probe {
            base,
            extra,
            row,
            hit,
            miss,
        } => {
            let face = base.relative(Rotation::Y, extra + shifts);
            let case = if row_matches(cube, top_color, face, *row) {
                hit
            } else {
                miss
            };
            apply_case(cube, shifts, case, solution);
        }
        OllHandler::AdjustThenProbe {
            auf,
            face,
            row,
            hit,
            miss,
        } => {
            adjust_u(cube, auf[shifts as usize], solution);
            let alg = if row_matches(cube, top_color, *face, *row) {
                hit
            } else {
                miss
            };
            run_alg(cube, alg, solution);
        }
        OllHandler::Special(handler) => handler(cube, top_color, shifts, solution),
    }

    solution.push(STAGE_BREAK);
}
