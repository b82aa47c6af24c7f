//! Second-layer edges, the beginner-method sibling of F2L.
//!
//! With the first layer done, every unsolved edge that carries no
//! top-color sticker belongs in the middle layer. Buried edges are popped
//! out with the double-sexy extraction, then inserted left or right with
//! the standard eight-move insert.

use cube_core::{Color, Cube, Face, Layer, Location, Move, MoveKind, Rotation};
use log::debug;
use strum::IntoEnumIterator;

use crate::{push_u_turns, STAGE_BREAK};

/// Find an unsolved edge that avoids the given color (the up center's).
/// Starting the scan on the up face saves work: anything already lifted is
/// handled before anything buried.
fn find_unsolved_edge(cube: &Cube, color: Color) -> Option<Location> {
    for face in Face::iter() {
        for idx in (1u8..8).step_by(2) {
            let loc = Location::new(face, idx);
            if cube.sticker(loc) != color
                && cube.sticker(loc.adjacent_edge()) != color
                && !cube.is_piece_solved(loc)
            {
                return Some(loc);
            }
        }
    }
    None
}

/// Bring the edge into the top layer without disturbing the first layer
/// or any solved second-layer edge.
fn bring_edge_to_top(cube: &mut Cube, piece: Location, solution: &mut Vec<Move>) -> Location {
    match piece.layer() {
        Layer::Top => piece,
        Layer::Middle => {
            let left_face = if piece.idx == 3 {
                piece.face
            } else {
                piece.adjacent_edge().face
            };
            let right_face = if piece.idx == 7 {
                piece.face
            } else {
                piece.adjacent_edge().face
            };

            solution.push(cube.twist(right_face, MoveKind::Normal));
            solution.push(cube.twist(Face::Up, MoveKind::Normal));
            solution.push(cube.twist(right_face, MoveKind::Prime));
            solution.push(cube.twist(Face::Up, MoveKind::Prime));
            solution.push(cube.twist(left_face, MoveKind::Prime));
            solution.push(cube.twist(Face::Up, MoveKind::Prime));
            solution.push(cube.twist(left_face, MoveKind::Normal));

            Location::new(left_face.opposite(), 1)
        }
        Layer::Bottom => unreachable!("the first layer is solved under the second"),
    }
}

/// Turn the up face until the edge's outward sticker matches its center.
fn align_edge(cube: &mut Cube, mut piece: Location, solution: &mut Vec<Move>) -> Location {
    let to_match = if piece.face != Face::Up {
        cube.sticker(piece)
    } else {
        cube.sticker(piece.adjacent_edge())
    };
    let mut curr_face = if piece.face != Face::Up {
        piece.face
    } else {
        piece.adjacent_edge().face
    };

    let mut turns = 0;
    while to_match != cube.center(curr_face) {
        cube.u();
        curr_face = curr_face.adjacent(Rotation::Y);
        turns += 1;
    }
    piece = Location::new(curr_face, 1);
    push_u_turns(turns, solution);
    piece
}

/// Insert the aligned edge into the middle layer, to whichever side its
/// top sticker points.
fn insert_edge(cube: &mut Cube, piece: Location, solution: &mut Vec<Move>) {
    let top_piece = if piece.face == Face::Up {
        piece
    } else {
        piece.adjacent_edge()
    };
    let side_piece = if piece.face != Face::Up {
        piece
    } else {
        piece.adjacent_edge()
    };

    let left_face = side_piece.face.adjacent(Rotation::Y);
    let right_face = side_piece.face.adjacent(Rotation::YPrime);

    if cube.center(right_face) == cube.sticker(top_piece) {
        solution.push(cube.twist(Face::Up, MoveKind::Normal));
        solution.push(cube.twist(right_face, MoveKind::Normal));
        solution.push(cube.twist(Face::Up, MoveKind::Prime));
        solution.push(cube.twist(right_face, MoveKind::Prime));
        solution.push(cube.twist(Face::Up, MoveKind::Prime));
        solution.push(cube.twist(side_piece.face, MoveKind::Prime));
        solution.push(cube.twist(Face::Up, MoveKind::Normal));
        solution.push(cube.twist(side_piece.face, MoveKind::Normal));
    } else if cube.center(left_face) == cube.sticker(top_piece) {
        solution.push(cube.twist(Face::Up, MoveKind::Prime));
        solution.push(cube.twist(left_face, MoveKind::Prime));
        solution.push(cube.twist(Face::Up, MoveKind::Normal));
        solution.push(cube.twist(left_face, MoveKind::Normal));
        solution.push(cube.twist(Face::Up, MoveKind::Normal));
        solution.push(cube.twist(side_piece.face, MoveKind::Normal));
        solution.push(cube.twist(Face::Up, MoveKind::Prime));
        solution.push(cube.twist(side_piece.face, MoveKind::Prime));
    }
}

fn solve_edge(cube: &mut Cube, piece: Location, solution: &mut Vec<Move>) {
    if cube.is_piece_solved(piece) {
        return;
    }

    let piece = bring_edge_to_top(cube, piece, solution);
    let piece = align_edge(cube, piece, solution);
    insert_edge(cube, piece, solution);
}

/// Solve the second layer. Assumes the cross color faces down and the
/// whole first layer is solved.
pub fn solve_second_layer(cube: &mut Cube, solution: &mut Vec<Move>) {
    let color = cube.center(Face::Up);

    while let Some(edge) = find_unsolved_edge(cube, color) {
        debug!("second layer: placing {edge:?}");
        solve_edge(cube, edge, solution);
        solution.push(STAGE_BREAK);
    }
}
