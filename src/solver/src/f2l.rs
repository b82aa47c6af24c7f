//! Second stage: the four corner/edge pairs of the first two layers.
//!
//! Each iteration finds a corner bearing the cross color and the edge
//! sharing its other two colors, works both pieces into the top layer,
//! lines them up (or splits them apart when they met the wrong way
//! round), and inserts the pair into its slot. Solved slots are never
//! disturbed; every maneuver that needs a free slot spins the top layer
//! over an unsolved one first.

use cube_core::{Color, Cube, Face, Layer, Location, Move, MoveKind, Rotation};
use log::debug;
use strum::IntoEnumIterator;

use crate::{push_u_turns, STAGE_BREAK};

/// The edge whose two stickers carry the same colors as the two non-cross
/// stickers of the given corner.
fn find_matching_edge(cube: &Cube, corner: Location) -> Location {
    let (adj0, adj1) = corner.adjacent_corner();
    let color0 = cube.sticker(adj0);
    let color1 = cube.sticker(adj1);

    for face in Face::iter() {
        // each edge has two stickers; visit each piece once
        if matches!(face, Face::Down | Face::Front | Face::Back) {
            continue;
        }
        for idx in (1u8..8).step_by(2) {
            if face == Face::Up && (idx == 3 || idx == 7) {
                continue;
            }
            if (face == Face::Right || face == Face::Left) && idx == 5 {
                continue;
            }
            let edge = Location::new(face, idx);
            let e0 = cube.sticker(edge);
            let e1 = cube.sticker(edge.adjacent_edge());
            if (color0 == e0 && color1 == e1) || (color0 == e1 && color1 == e0) {
                return edge;
            }
        }
    }
    unreachable!("corner at {corner:?} has no matching edge");
}

fn find_unsolved_pair(cube: &Cube, cross_color: Color) -> Option<(Location, Location)> {
    for face in Face::iter() {
        for idx in (0u8..8).step_by(2) {
            let corner = Location::new(face, idx);
            if cube.sticker(corner) == cross_color {
                let edge = find_matching_edge(cube, corner);
                if !cube.is_piece_solved(corner) || !cube.is_piece_solved(edge) {
                    return Some((corner, edge));
                }
            }
        }
    }
    None
}

/// Whether the slot under the given up-face corner index is solved.
fn is_slot_solved(cube: &Cube, idx: u8) -> bool {
    match idx {
        0 => {
            cube.is_piece_solved(Location::new(Face::Left, 6))
                && cube.is_piece_solved(Location::new(Face::Left, 7))
        }
        2 => {
            cube.is_piece_solved(Location::new(Face::Right, 3))
                && cube.is_piece_solved(Location::new(Face::Right, 4))
        }
        4 => {
            cube.is_piece_solved(Location::new(Face::Right, 6))
                && cube.is_piece_solved(Location::new(Face::Right, 7))
        }
        6 => {
            cube.is_piece_solved(Location::new(Face::Left, 3))
                && cube.is_piece_solved(Location::new(Face::Left, 4))
        }
        _ => false,
    }
}

/// Whether corner and edge sit adjacent with their colors aligned.
fn is_pair_joined(cube: &Cube, corner: Location, edge: Location) -> bool {
    let (adj0, adj1) = corner.adjacent_corner();
    let edge_adj = edge.adjacent_edge();

    if adj0.face == edge.face && adj1.face == edge_adj.face {
        cube.sticker(adj0) == cube.sticker(edge) && cube.sticker(adj1) == cube.sticker(edge_adj)
    } else if adj1.face == edge.face && adj0.face == edge_adj.face {
        cube.sticker(adj1) == cube.sticker(edge) && cube.sticker(adj0) == cube.sticker(edge_adj)
    } else {
        false
    }
}

/// Re-find a pair by its edge colors. The first returned location is the
/// cross-color sticker of the corner, the second any sticker of the edge.
///
/// Every corner has a sticker on the up or down face, so scanning those
/// two faces covers all eight corners.
fn locate_pair(cube: &Cube, pair_color0: Color, pair_color1: Color) -> (Location, Location) {
    let cross_color = cube.center(Face::Down);
    let mut corner = None;
    for face in [Face::Up, Face::Down] {
        for idx in (0u8..8).step_by(2) {
            let loc = Location::new(face, idx);
            let (adj0, adj1) = loc.adjacent_corner();
            let color0 = cube.sticker(adj0);
            let color1 = cube.sticker(adj1);

            if cube.sticker(loc) == cross_color {
                if (pair_color0 == color0 && pair_color1 == color1)
                    || (pair_color1 == color0 && pair_color0 == color1)
                {
                    corner = Some(loc);
                }
            } else if color0 == cross_color {
                if (pair_color0 == cube.sticker(loc) && pair_color1 == color1)
                    || (pair_color1 == cube.sticker(loc) && pair_color0 == color1)
                {
                    corner = Some(adj0);
                }
            } else if color1 == cross_color {
                if (pair_color0 == color0 && pair_color1 == cube.sticker(loc))
                    || (pair_color1 == color0 && pair_color0 == cube.sticker(loc))
                {
                    corner = Some(adj1);
                }
            }
        }
    }
    let corner = corner.unwrap_or_else(|| unreachable!("pair is not on the cube"));
    (corner, find_matching_edge(cube, corner))
}

/// The up-face index directly above a middle-layer edge.
fn above_up_idx_of_edge(loc: Location) -> u8 {
    match (loc.face, loc.idx) {
        (Face::Front, 3) => 4,
        (Face::Front, 7) => 6,
        (Face::Back, 3) => 0,
        (Face::Back, 7) => 2,
        (Face::Right, 3) => 2,
        (Face::Right, 7) => 4,
        (Face::Left, 3) => 6,
        (Face::Left, 7) => 0,
        _ => unreachable!("{loc:?} is not a middle-layer edge"),
    }
}

/// The up-face index of the corner piece this sticker belongs to.
fn up_idx_of_corner(loc: Location) -> u8 {
    match (loc.face, loc.idx) {
        (Face::Up, idx) => idx,
        (Face::Down, 0) => 6,
        (Face::Down, 2) => 4,
        (Face::Down, 4) => 2,
        (Face::Down, 6) => 0,
        (Face::Front, 0 | 6) => 6,
        (Face::Front, 2 | 4) => 4,
        (Face::Back, 0 | 6) => 2,
        (Face::Back, 2 | 4) => 0,
        (Face::Right, 0 | 6) => 4,
        (Face::Right, 2 | 4) => 2,
        (Face::Left, 0 | 6) => 0,
        (Face::Left, 2 | 4) => 6,
        _ => unreachable!("{loc:?} is not a corner sticker"),
    }
}

/// The up-face index of a top-layer edge, whichever sticker addresses it.
fn up_idx_of_edge(loc: Location) -> u8 {
    if loc.face == Face::Up {
        loc.idx
    } else {
        loc.adjacent_edge().idx
    }
}

fn up_color_of_edge(cube: &Cube, loc: Location) -> Color {
    if loc.face == Face::Up {
        cube.sticker(loc)
    } else {
        cube.sticker(loc.adjacent_edge())
    }
}

/// Turn the up face until `from_idx` lands on `target_idx`.
fn spin_up_to(cube: &mut Cube, from_idx: u8, target_idx: u8, solution: &mut Vec<Move>) {
    if (from_idx + 2) % 8 == target_idx {
        solution.push(cube.twist(Face::Up, MoveKind::Normal));
    } else if (from_idx + 4) % 8 == target_idx {
        solution.push(cube.twist(Face::Up, MoveKind::Double));
    } else if (from_idx + 6) % 8 == target_idx {
        solution.push(cube.twist(Face::Up, MoveKind::Prime));
    }
}

/// Get both pieces of the pair into the top layer. Where the geometry
/// allows it, set them up so only a three-move insert remains.
fn bring_pair_to_top(
    cube: &mut Cube,
    mut corner: Location,
    edge: Location,
    solution: &mut Vec<Move>,
) {
    let corner_layer = corner.layer();
    let edge_layer = edge.layer();
    let edge_adj = edge.adjacent_edge();

    if corner_layer == Layer::Top && edge_layer == Layer::Top {
        return;
    } else if corner_layer == Layer::Top {
        // corner up top, edge buried in the middle
        if corner.face == Face::Up {
            let (adj0, adj1) = corner.adjacent_corner();
            let left_corner_sticker = if adj0.idx == 2 {
                cube.sticker(adj0)
            } else {
                cube.sticker(adj1)
            };
            let left_edge_sticker = if edge.idx == 3 {
                cube.sticker(edge)
            } else {
                cube.sticker(edge_adj)
            };

            if left_corner_sticker == left_edge_sticker {
                // aligning the corner over the slot forms the pair; do
                // that, then take the pair out together
                spin_up_to(cube, corner.idx, above_up_idx_of_edge(edge), solution);

                let right_face = if edge.idx == 7 { edge.face } else { edge_adj.face };
                solution.push(cube.twist(right_face, MoveKind::Normal));
                solution.push(cube.twist(Face::Up, MoveKind::Prime));
                solution.push(cube.twist(right_face, MoveKind::Prime));
            } else {
                // keep the corner away from the slot, then lift the edge
                if corner.idx == above_up_idx_of_edge(edge)
                    || corner.idx == (above_up_idx_of_edge(edge) + 4) % 8
                {
                    solution.push(cube.twist(Face::Up, MoveKind::Normal));
                }

                let right_face = if edge.idx == 7 { edge.face } else { edge_adj.face };
                solution.push(cube.twist(right_face, MoveKind::Normal));
                solution.push(cube.twist(Face::Up, MoveKind::Normal));
                solution.push(cube.twist(right_face, MoveKind::Prime));
            }
        } else {
            // cross color faces out: share a face with the edge without
            // sitting directly over it
            let mut turns = 0;
            loop {
                if above_up_idx_of_edge(edge) != up_idx_of_corner(corner)
                    && (corner.face == edge.face || corner.face == edge_adj.face)
                {
                    break;
                }
                cube.u();
                turns += 1;
                corner = Location::new(corner.face.adjacent(Rotation::Y), corner.idx);
            }
            push_u_turns(turns, solution);

            let corner_up_color = cube.sticker(Location::new(Face::Up, up_idx_of_corner(corner)));

            if corner.idx == 0 {
                // cross color on the right side
                solution.push(cube.twist(corner.face, MoveKind::Prime));
                if corner_up_color == cube.sticker(Location::new(corner.face, 1).adjacent_edge()) {
                    solution.push(cube.twist(Face::Up, MoveKind::Normal));
                } else {
                    solution.push(cube.twist(Face::Up, MoveKind::Prime));
                }
                solution.push(cube.twist(corner.face, MoveKind::Normal));
            } else if corner.idx == 2 {
                // cross color on the left side
                solution.push(cube.twist(corner.face, MoveKind::Normal));
                if corner_up_color == cube.sticker(Location::new(corner.face, 1).adjacent_edge()) {
                    solution.push(cube.twist(Face::Up, MoveKind::Prime));
                } else {
                    solution.push(cube.twist(Face::Up, MoveKind::Normal));
                }
                solution.push(cube.twist(corner.face, MoveKind::Prime));
            }
        }
    } else if edge_layer == Layer::Top {
        // edge up top, corner in the bottom
        let edge_up_color = up_color_of_edge(cube, edge);

        if corner.face == Face::Down {
            let (adj0, adj1) = corner.adjacent_corner();
            let left_color = if adj0.idx == 4 {
                cube.sticker(adj0)
            } else {
                cube.sticker(adj1)
            };

            // park the edge behind whichever side the corner will rise on
            let target_idx = if left_color == edge_up_color {
                (up_idx_of_corner(corner) + 5) % 8
            } else {
                (up_idx_of_corner(corner) + 3) % 8
            };
            spin_up_to(cube, up_idx_of_edge(edge), target_idx, solution);

            if left_color == edge_up_color {
                let left_face = if adj0.idx == 4 { adj0.face } else { adj1.face };
                solution.push(cube.twist(left_face, MoveKind::Prime));
                solution.push(cube.twist(Face::Up, MoveKind::Normal));
                solution.push(cube.twist(left_face, MoveKind::Normal));
            } else {
                let right_face = if adj0.idx == 6 { adj0.face } else { adj1.face };
                solution.push(cube.twist(right_face, MoveKind::Normal));
                solution.push(cube.twist(Face::Up, MoveKind::Prime));
                solution.push(cube.twist(right_face, MoveKind::Prime));
            }
        } else if corner.idx == 4 {
            // cross color facing left
            let corner_adj_color =
                cube.sticker(Location::new(corner.face.adjacent(Rotation::YPrime), 6));

            let target_idx = if corner_adj_color == edge_up_color {
                (up_idx_of_corner(corner) + 7) % 8
            } else {
                (up_idx_of_corner(corner) + 1) % 8
            };
            spin_up_to(cube, up_idx_of_edge(edge), target_idx, solution);

            solution.push(cube.twist(corner.face, MoveKind::Prime));
            solution.push(cube.twist(Face::Up, MoveKind::Prime));
            solution.push(cube.twist(corner.face, MoveKind::Normal));
        } else if corner.idx == 6 {
            // cross color facing right
            let corner_adj_color =
                cube.sticker(Location::new(corner.face.adjacent(Rotation::Y), 4));

            let target_idx = if corner_adj_color == edge_up_color {
                (up_idx_of_corner(corner) + 1) % 8
            } else {
                (up_idx_of_corner(corner) + 7) % 8
            };
            spin_up_to(cube, up_idx_of_edge(edge), target_idx, solution);

            solution.push(cube.twist(corner.face, MoveKind::Normal));
            solution.push(cube.twist(Face::Up, MoveKind::Normal));
            solution.push(cube.twist(corner.face, MoveKind::Prime));
        }
    } else {
        // corner in the bottom, edge in the middle: pop the edge out (this
        // splits them if they shared a slot) and start over
        let color0 = cube.sticker(edge);
        let color1 = cube.sticker(edge.adjacent_edge());

        let right_face = if edge.idx == 7 { edge.face } else { edge_adj.face };
        solution.push(cube.twist(right_face, MoveKind::Normal));
        solution.push(cube.twist(Face::Up, MoveKind::Prime));
        solution.push(cube.twist(right_face, MoveKind::Prime));

        let (corner, edge) = locate_pair(cube, color0, color1);
        bring_pair_to_top(cube, corner, edge, solution);
    }
}

/// Turn the up face until the piece at `idx` sits over an unsolved slot.
/// Returns the number of clockwise quarter turns made, or 4 if every slot
/// is already solved.
fn move_to_unsolved_slot(cube: &mut Cube, idx: u8, solution: &mut Vec<Move>) -> u8 {
    if !is_slot_solved(cube, idx) {
        return 0;
    }
    if !is_slot_solved(cube, (idx + 2) % 8) {
        solution.push(cube.twist(Face::Up, MoveKind::Normal));
        return 1;
    }
    if !is_slot_solved(cube, (idx + 4) % 8) {
        solution.push(cube.twist(Face::Up, MoveKind::Double));
        return 2;
    }
    if !is_slot_solved(cube, (idx + 6) % 8) {
        solution.push(cube.twist(Face::Up, MoveKind::Prime));
        return 3;
    }
    4
}

/// The up-face index over the slot whose side centers carry the two given
/// colors, or 8 if there is none.
fn find_slot(cube: &Cube, color0: Color, color1: Color) -> u8 {
    for target_idx in (0u8..8).step_by(2) {
        let (adj0, adj1) = Location::new(Face::Up, target_idx).adjacent_corner();
        let c0 = cube.center(adj0.face);
        let c1 = cube.center(adj1.face);
        if (c0 == color0 && c1 == color1) || (c1 == color0 && c0 == color1) {
            return target_idx;
        }
    }
    8
}

/// Turn the up face until the piece at `idx` sits over the slot for the
/// given colors. Returns the index it ends up at.
fn move_to_slot(
    cube: &mut Cube,
    idx: u8,
    color0: Color,
    color1: Color,
    solution: &mut Vec<Move>,
) -> u8 {
    let target_idx = find_slot(cube, color0, color1);
    spin_up_to(cube, idx, target_idx, solution);
    target_idx
}

/// Pull an adjacent corner and edge apart without disturbing solved slots.
/// When the cross color faces out with differing top colors, the split
/// leaves the pieces set up for a three-move insert.
fn split_pair(cube: &mut Cube, corner: Location, edge: Location, solution: &mut Vec<Move>) {
    let mut corner_up_idx = up_idx_of_corner(corner);
    let edge_idx = up_idx_of_edge(edge);

    if (corner_up_idx + 1) % 8 == edge_idx {
        // edge to the left of the corner
        let turns = move_to_unsolved_slot(cube, (corner_up_idx + 6) % 8, solution);
        corner_up_idx = (corner_up_idx + 2 * turns) % 8;

        let (adj0, adj1) = Location::new(Face::Up, corner_up_idx).adjacent_corner();
        let right_face = if adj0.idx == 0 { adj0.face } else { adj1.face };

        solution.push(cube.twist(right_face, MoveKind::Prime));
        if corner.idx == 0 {
            solution.push(cube.twist(Face::Up, MoveKind::Double));
        } else {
            solution.push(cube.twist(Face::Up, MoveKind::Normal));
        }
        solution.push(cube.twist(right_face, MoveKind::Normal));
    } else if (edge_idx + 1) % 8 == corner_up_idx {
        // edge to the right of the corner
        let turns = move_to_unsolved_slot(cube, (corner_up_idx + 2) % 8, solution);
        corner_up_idx = (corner_up_idx + 2 * turns) % 8;

        let (adj0, adj1) = Location::new(Face::Up, corner_up_idx).adjacent_corner();
        let left_face = if adj0.idx == 2 { adj0.face } else { adj1.face };

        solution.push(cube.twist(left_face, MoveKind::Normal));
        if corner.idx == 2 {
            solution.push(cube.twist(Face::Up, MoveKind::Double));
        } else {
            solution.push(cube.twist(Face::Up, MoveKind::Prime));
        }
        solution.push(cube.twist(left_face, MoveKind::Prime));
    }
}

/// Make the pair insertable: paired pieces are left alone, everything else
/// is split up and, when the cross color faces out, arranged for the
/// three-move insert.
fn prep_pair_for_insert(
    cube: &mut Cube,
    mut corner: Location,
    mut edge: Location,
    solution: &mut Vec<Move>,
) {
    if is_pair_joined(cube, corner, edge) {
        return;
    }

    let color0 = cube.sticker(edge);
    let color1 = cube.sticker(edge.adjacent_edge());

    split_pair(cube, corner, edge, solution);

    (corner, edge) = locate_pair(cube, color0, color1);

    // nothing more to do when the cross color faces up
    if corner.face == Face::Up {
        return;
    }

    let corner_up_color = cube.sticker(Location::new(Face::Up, up_idx_of_corner(corner)));
    let edge_up_color = up_color_of_edge(cube, edge);

    if corner_up_color == edge_up_color {
        // matching top colors: join the pieces into a pair
        if corner.idx == 2 {
            move_to_unsolved_slot(cube, (up_idx_of_corner(corner) + 2) % 8, solution);
            (corner, edge) = locate_pair(cube, color0, color1);

            let target_idx = (up_idx_of_corner(corner) + 7) % 8;
            let edge_idx = up_idx_of_edge(edge);

            solution.push(cube.twist(corner.face, MoveKind::Normal));
            // only a U or a U2 is possible since the pieces are split
            if (edge_idx + 2) % 8 == target_idx {
                solution.push(cube.twist(Face::Up, MoveKind::Normal));
            } else if (edge_idx + 4) % 8 == target_idx {
                solution.push(cube.twist(Face::Up, MoveKind::Double));
            }
            solution.push(cube.twist(corner.face, MoveKind::Prime));
        } else if corner.idx == 0 {
            move_to_unsolved_slot(cube, (up_idx_of_corner(corner) + 6) % 8, solution);
            (corner, edge) = locate_pair(cube, color0, color1);

            let target_idx = (up_idx_of_corner(corner) + 1) % 8;
            let edge_idx = up_idx_of_edge(edge);

            solution.push(cube.twist(corner.face, MoveKind::Prime));
            // only a U' or a U2 is possible since the pieces are split
            if (edge_idx + 6) % 8 == target_idx {
                solution.push(cube.twist(Face::Up, MoveKind::Prime));
            } else if (edge_idx + 4) % 8 == target_idx {
                solution.push(cube.twist(Face::Up, MoveKind::Double));
            }
            solution.push(cube.twist(corner.face, MoveKind::Normal));
        }
    } else {
        // differing top colors: set up the three-move insert unless the
        // split already did
        let corner_up_idx = up_idx_of_corner(corner);
        let edge_idx = up_idx_of_edge(edge);

        if corner.idx == 2 && (corner_up_idx + 3) % 8 != edge_idx {
            move_to_unsolved_slot(cube, (up_idx_of_corner(corner) + 2) % 8, solution);
            (corner, _) = locate_pair(cube, color0, color1);

            solution.push(cube.twist(corner.face, MoveKind::Normal));
            solution.push(cube.twist(Face::Up, MoveKind::Prime));
            solution.push(cube.twist(corner.face, MoveKind::Prime));
        } else if corner.idx == 0 && (edge_idx + 3) % 8 != corner_up_idx {
            move_to_unsolved_slot(cube, (up_idx_of_corner(corner) + 2) % 8, solution);
            (corner, _) = locate_pair(cube, color0, color1);

            let face = corner.face.adjacent(Rotation::Y);
            solution.push(cube.twist(face, MoveKind::Normal));
            solution.push(cube.twist(Face::Up, MoveKind::Normal));
            solution.push(cube.twist(face, MoveKind::Prime));
        }
    }
}

/// Put the prepared pair into its slot.
fn insert_pair(
    cube: &mut Cube,
    mut corner: Location,
    mut edge: Location,
    solution: &mut Vec<Move>,
) {
    let color0 = cube.sticker(edge);
    let color1 = cube.sticker(edge.adjacent_edge());

    if is_pair_joined(cube, corner, edge) {
        if corner.idx == 2 {
            // cross color facing left
            move_to_slot(cube, (up_idx_of_corner(corner) + 6) % 8, color0, color1, solution);
            let (corner, _) = locate_pair(cube, color0, color1);

            let face = corner.face.opposite();
            solution.push(cube.twist(face, MoveKind::Normal));
            solution.push(cube.twist(Face::Up, MoveKind::Prime));
            solution.push(cube.twist(face, MoveKind::Prime));
        } else if corner.idx == 0 {
            // cross color facing right
            move_to_slot(cube, (up_idx_of_corner(corner) + 2) % 8, color0, color1, solution);
            let (corner, _) = locate_pair(cube, color0, color1);

            let face = corner.face.opposite();
            solution.push(cube.twist(face, MoveKind::Prime));
            solution.push(cube.twist(Face::Up, MoveKind::Normal));
            solution.push(cube.twist(face, MoveKind::Normal));
        }
    } else if corner.face == Face::Up {
        // cross color faces up: align the edge with its center, then the
        // eight-move insert
        let to_match = if edge.face != Face::Up {
            cube.sticker(edge)
        } else {
            cube.sticker(edge.adjacent_edge())
        };
        let mut curr_face = if edge.face != Face::Up {
            edge.face
        } else {
            edge.adjacent_edge().face
        };

        let mut turns = 0;
        while to_match != cube.center(curr_face) {
            cube.u();
            curr_face = curr_face.adjacent(Rotation::Y);
            turns += 1;
        }

        edge = Location::new(curr_face, 1);
        corner = Location::new(corner.face, (corner.idx + turns * 2) % 8);
        push_u_turns(turns, solution);

        let target_idx = find_slot(cube, color0, color1);
        let edge_idx = edge.adjacent_edge().idx;
        let corner_up_idx = up_idx_of_corner(corner);

        if (target_idx + 1) % 8 == edge_idx {
            // slot to the right of the edge
            solution.push(cube.twist(edge.face, MoveKind::Prime));
            if (corner_up_idx + 3) % 8 == edge_idx {
                solution.push(cube.twist(Face::Up, MoveKind::Double));
            } else if (corner_up_idx + 5) % 8 == edge_idx {
                solution.push(cube.twist(Face::Up, MoveKind::Prime));
            }
            solution.push(cube.twist(edge.face, MoveKind::Normal));
            solution.push(cube.twist(Face::Up, MoveKind::Prime));
            solution.push(cube.twist(edge.face, MoveKind::Prime));
            solution.push(cube.twist(Face::Up, MoveKind::Normal));
            solution.push(cube.twist(edge.face, MoveKind::Normal));
        } else if (edge_idx + 1) % 8 == target_idx {
            // slot to the left of the edge
            solution.push(cube.twist(edge.face, MoveKind::Normal));
            if (corner_up_idx + 3) % 8 == edge_idx {
                solution.push(cube.twist(Face::Up, MoveKind::Normal));
            } else if (corner_up_idx + 5) % 8 == edge_idx {
                solution.push(cube.twist(Face::Up, MoveKind::Double));
            }
            solution.push(cube.twist(edge.face, MoveKind::Prime));
            solution.push(cube.twist(Face::Up, MoveKind::Normal));
            solution.push(cube.twist(edge.face, MoveKind::Normal));
            solution.push(cube.twist(Face::Up, MoveKind::Prime));
            solution.push(cube.twist(edge.face, MoveKind::Prime));
        }
    } else {
        // cross color faces out: three-move insert over the slot
        move_to_slot(cube, up_idx_of_corner(corner), color0, color1, solution);
        let (corner, _) = locate_pair(cube, color0, color1);

        if corner.idx == 2 {
            solution.push(cube.twist(corner.face, MoveKind::Prime));
            solution.push(cube.twist(Face::Up, MoveKind::Prime));
            solution.push(cube.twist(corner.face, MoveKind::Normal));
        } else if corner.idx == 0 {
            solution.push(cube.twist(corner.face, MoveKind::Normal));
            solution.push(cube.twist(Face::Up, MoveKind::Normal));
            solution.push(cube.twist(corner.face, MoveKind::Prime));
        }
    }
}

/// Solve one pair without disturbing any other solved slot. The pair is
/// re-located by its colors after every maneuver that may have moved it.
fn solve_pair(cube: &mut Cube, corner: Location, edge: Location, solution: &mut Vec<Move>) {
    let color0 = cube.sticker(edge);
    let color1 = cube.sticker(edge.adjacent_edge());

    bring_pair_to_top(cube, corner, edge, solution);
    let (corner, edge) = locate_pair(cube, color0, color1);

    prep_pair_for_insert(cube, corner, edge, solution);
    let (corner, edge) = locate_pair(cube, color0, color1);

    insert_pair(cube, corner, edge, solution);
}

/// Solve the first two layers. Assumes the cross is solved and facing
/// down.
pub fn solve_f2l(cube: &mut Cube, solution: &mut Vec<Move>) {
    let color = cube.center(Face::Down);

    while let Some((corner, edge)) = find_unsolved_pair(cube, color) {
        debug!("f2l: pairing {corner:?} with {edge:?}");
        solve_pair(cube, corner, edge, solution);
        solution.push(STAGE_BREAK);
    }
}
