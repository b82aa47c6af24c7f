//! First stage: the four bottom-cross edges.
//!
//! Whichever color is on the down center is the cross color; it stays on
//! the down face for the rest of the solve. Each unsolved cross edge is
//! lifted into the top layer (without disturbing edges already placed),
//! spun over its matching center, and inserted back down.

use cube_core::{Color, Cube, Face, Layer, Location, MoveKind, Move, Rotation};
use itertools::iproduct;
use log::debug;
use strum::IntoEnumIterator;

use crate::{push_u_turns, STAGE_BREAK};

fn find_unsolved_cross_edge(cube: &Cube, color: Color) -> Option<Location> {
    iproduct!(Face::iter(), (1u8..8).step_by(2))
        .map(|(face, idx)| Location::new(face, idx))
        .find(|&loc| cube.sticker(loc) == color && !cube.is_piece_solved(loc))
}

/// Bring the edge at `piece` (addressed by its cross-color sticker) into
/// the top layer without disturbing any solved cross edge, and return its
/// new location. The cross color does not necessarily end up facing up.
fn bring_edge_to_top_layer(cube: &mut Cube, piece: Location, solution: &mut Vec<Move>) -> Location {
    match piece.layer() {
        Layer::Top => piece,
        Layer::Bottom => {
            if piece.face != Face::Down {
                // in the bottom layer facing out: its own face lifts it
                solution.push(cube.twist(piece.face, MoveKind::Double));
                Location::new(piece.face, 1)
            } else {
                // facing down in the wrong slot: lift through the side face
                solution.push(cube.twist(piece.adjacent_edge().face, MoveKind::Double));
                let new_idx = if piece.idx == 3 || piece.idx == 7 {
                    piece.idx
                } else {
                    6 - piece.idx
                };
                Location::new(Face::Up, new_idx)
            }
        }
        Layer::Middle => {
            let adj = piece.adjacent_edge();
            if !cube.is_piece_solved(Location::new(adj.face, 5)) {
                // one-move lift, cross color ends facing up
                if adj.idx == 3 {
                    solution.push(cube.twist(adj.face, MoveKind::Prime));
                } else if adj.idx == 7 {
                    solution.push(cube.twist(adj.face, MoveKind::Normal));
                }
                let new_idx = match adj.face {
                    Face::Front => 5,
                    Face::Back => 1,
                    Face::Right => 3,
                    Face::Left => 7,
                    _ => 0,
                };
                Location::new(Face::Up, new_idx)
            } else if !cube.is_piece_solved(Location::new(piece.face, 5)) {
                // one-move lift, cross color ends facing out
                if piece.idx == 3 {
                    solution.push(cube.twist(piece.face, MoveKind::Prime));
                } else if piece.idx == 7 {
                    solution.push(cube.twist(piece.face, MoveKind::Normal));
                }
                Location::new(piece.face, 1)
            } else {
                // solved cross pieces below on both sides; lift, move the
                // edge out of the way, and restore the face below
                if adj.idx == 3 {
                    solution.push(cube.twist(adj.face, MoveKind::Prime));
                    solution.push(cube.twist(Face::Up, MoveKind::Normal));
                    solution.push(cube.twist(adj.face, MoveKind::Normal));
                } else if adj.idx == 7 {
                    solution.push(cube.twist(adj.face, MoveKind::Normal));
                    solution.push(cube.twist(Face::Up, MoveKind::Normal));
                    solution.push(cube.twist(adj.face, MoveKind::Prime));
                }
                let new_idx = match adj.face {
                    Face::Front => 7,
                    Face::Back => 3,
                    Face::Right => 5,
                    Face::Left => 1,
                    _ => 0,
                };
                Location::new(Face::Up, new_idx)
            }
        }
    }
}

/// Turn the up face until the edge's non-cross sticker lines up with its
/// center. Assumes the piece is in the top layer; returns where it ends up.
fn move_edge_over_center(
    cube: &mut Cube,
    mut piece: Location,
    solution: &mut Vec<Move>,
) -> Location {
    let mut turns = 0;
    if piece.face == Face::Up {
        let mut adj = piece.adjacent_edge();
        while cube.sticker(adj) != cube.center(adj.face) {
            cube.u();
            piece.idx = (piece.idx + 2) % 8;
            adj = piece.adjacent_edge();
            turns += 1;
        }
    } else {
        let target = cube.sticker(piece.adjacent_edge());
        while target != cube.center(piece.face) {
            cube.u();
            piece.face = piece.face.adjacent(Rotation::Y);
            turns += 1;
        }
    }
    push_u_turns(turns, solution);
    piece
}

/// Insert the aligned edge into the cross. Two ways in: a double turn when
/// the cross color faces up, or a four-move insert that flips orientation
/// when it faces out.
fn insert_cross_edge(cube: &mut Cube, piece: Location, solution: &mut Vec<Move>) {
    if piece.face == Face::Up {
        solution.push(cube.twist(piece.adjacent_edge().face, MoveKind::Double));
    } else {
        solution.push(cube.twist(Face::Up, MoveKind::Prime));
        let adj_face = Location::new(piece.face, 3).adjacent_edge().face;
        solution.push(cube.twist(adj_face, MoveKind::Prime));
        solution.push(cube.twist(piece.face, MoveKind::Normal));
        solution.push(cube.twist(adj_face, MoveKind::Normal));
    }
}

fn solve_cross_piece(cube: &mut Cube, piece: Location, solution: &mut Vec<Move>) {
    if cube.is_piece_solved(piece) {
        return;
    }

    let piece = bring_edge_to_top_layer(cube, piece, solution);
    let piece = move_edge_over_center(cube, piece, solution);
    insert_cross_edge(cube, piece, solution);
}

/// Reorient the whole cube so the given color faces down.
pub fn orient_down(cube: &mut Cube, color: Color, solution: &mut Vec<Move>) {
    if cube.center(Face::Up) == color {
        solution.push(cube.parse_move("z2"));
    } else if cube.center(Face::Down) == color {
        // already there
    } else if cube.center(Face::Front) == color {
        solution.push(cube.parse_move("x'"));
    } else if cube.center(Face::Back) == color {
        solution.push(cube.parse_move("x"));
    } else if cube.center(Face::Right) == color {
        solution.push(cube.parse_move("z"));
    } else if cube.center(Face::Left) == color {
        solution.push(cube.parse_move("z'"));
    }
}

/// Solve the cross. Nothing about the cube is assumed; the color on the
/// down center is chosen as the cross color.
pub fn solve_cross(cube: &mut Cube, solution: &mut Vec<Move>) {
    let color = cube.center(Face::Down);
    orient_down(cube, color, solution);

    while let Some(edge) = find_unsolved_cross_edge(cube, color) {
        debug!("cross: placing edge at {edge:?}");
        solve_cross_piece(cube, edge, solution);
        solution.push(STAGE_BREAK);
    }
}
