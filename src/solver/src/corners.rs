//! First-layer corners, the beginner-method continuation of the cross.
//!
//! Each corner bearing the cross color is lifted into the top layer,
//! spun until it sits over its home slot, and dropped in with a
//! three-move trigger.

use cube_core::{Color, Cube, Face, Layer, Location, Move, MoveKind, Rotation};
use log::debug;
use strum::IntoEnumIterator;

use crate::{push_u_turns, STAGE_BREAK};

fn find_unsolved_corner(cube: &Cube, color: Color) -> Option<Location> {
    for face in Face::iter() {
        for idx in (0u8..8).step_by(2) {
            let loc = Location::new(face, idx);
            if cube.sticker(loc) == color && !cube.is_piece_solved(loc) {
                return Some(loc);
            }
        }
    }
    None
}

/// Bring the corner into the top layer without disturbing the cross or any
/// solved corner, and return its new location.
fn bring_corner_to_top(cube: &mut Cube, piece: Location, solution: &mut Vec<Move>) -> Location {
    match piece.layer() {
        Layer::Top => piece,
        Layer::Bottom => {
            if piece.face == Face::Down {
                // cross color faces down but the corner is in a wrong slot
                let (adj0, adj1) = piece.adjacent_corner();
                let adj = if adj0.idx == 6 { adj0 } else { adj1 };

                solution.push(cube.twist(adj.face, MoveKind::Normal));
                solution.push(cube.twist(Face::Up, MoveKind::Prime));
                solution.push(cube.twist(adj.face, MoveKind::Prime));
                Location::new(adj.face, 0)
            } else if piece.idx == 4 {
                solution.push(cube.twist(piece.face, MoveKind::Prime));
                solution.push(cube.twist(Face::Up, MoveKind::Prime));
                solution.push(cube.twist(piece.face, MoveKind::Normal));

                let (_, adj1) = piece.adjacent_corner();
                Location::new(adj1.face, 2)
            } else {
                // idx 6: mirror of the case above
                solution.push(cube.twist(piece.face, MoveKind::Normal));
                solution.push(cube.twist(Face::Up, MoveKind::Normal));
                solution.push(cube.twist(piece.face, MoveKind::Prime));

                let (_, adj1) = piece.adjacent_corner();
                Location::new(adj1.face, 0)
            }
        }
        Layer::Middle => unreachable!("corners never sit in the middle layer"),
    }
}

/// Whether the top-layer corner sits directly over its home slot.
fn is_corner_over_slot(cube: &Cube, piece: Location) -> bool {
    let (adj0, adj1) = piece.adjacent_corner();
    if piece.face == Face::Up {
        // cross color up: the side stickers sit swapped over their centers
        cube.center(adj0.face) == cube.sticker(adj1)
            && cube.center(adj1.face) == cube.sticker(adj0)
    } else {
        // the sticker facing up is always the first adjacent
        cube.center(piece.face) == cube.sticker(adj0)
            && cube.center(adj1.face) == cube.sticker(adj1)
    }
}

fn move_corner_over_slot(
    cube: &mut Cube,
    mut piece: Location,
    solution: &mut Vec<Move>,
) -> Location {
    let mut turns = 0;
    while !is_corner_over_slot(cube, piece) {
        cube.u();
        if piece.face == Face::Up {
            piece = Location::new(Face::Up, (piece.idx + 2) % 8);
        } else {
            piece = Location::new(piece.face.adjacent(Rotation::Y), piece.idx);
        }
        turns += 1;
    }
    push_u_turns(turns, solution);
    piece
}

fn insert_corner(cube: &mut Cube, piece: Location, solution: &mut Vec<Move>) {
    if piece.face == Face::Up {
        // cross color up: kick the corner out sideways first, which leaves
        // one of the easy cases below
        let (adj0, adj1) = piece.adjacent_corner();
        let adj = if adj0.idx == 0 { adj0 } else { adj1 };

        solution.push(cube.twist(adj.face, MoveKind::Normal));
        solution.push(cube.parse_move("U2"));
        solution.push(cube.twist(adj.face, MoveKind::Prime));
        solution.push(cube.twist(Face::Up, MoveKind::Prime));
        insert_corner(cube, Location::new(adj.face, 0), solution);
    } else if piece.idx == 0 {
        solution.push(cube.twist(piece.face, MoveKind::Normal));
        solution.push(cube.twist(Face::Up, MoveKind::Normal));
        solution.push(cube.twist(piece.face, MoveKind::Prime));
    } else if piece.idx == 2 {
        solution.push(cube.twist(piece.face, MoveKind::Prime));
        solution.push(cube.twist(Face::Up, MoveKind::Prime));
        solution.push(cube.twist(piece.face, MoveKind::Normal));
    }
}

fn solve_corner(cube: &mut Cube, piece: Location, solution: &mut Vec<Move>) {
    if cube.is_piece_solved(piece) {
        return;
    }

    let piece = bring_corner_to_top(cube, piece, solution);
    let piece = move_corner_over_slot(cube, piece, solution);
    insert_corner(cube, piece, solution);
}

/// Solve the four first-layer corners. Assumes the cross is solved and
/// facing down.
pub fn solve_corners(cube: &mut Cube, solution: &mut Vec<Move>) {
    let color = cube.center(Face::Down);

    while let Some(corner) = find_unsolved_corner(cube, color) {
        debug!("corners: placing {corner:?}");
        solve_corner(cube, corner, solution);
        solution.push(STAGE_BREAK);
    }
}
