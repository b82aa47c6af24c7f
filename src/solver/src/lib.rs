//! Staged layer-by-layer solving on top of [`cube_core`].
//!
//! [`solve`] runs the CFOP pipeline (cross, F2L, OLL, PLL); each stage
//! observes the cube, chooses moves, executes them as it goes, and appends
//! them to a shared solution vector, separated by stage boundary markers.
//! [`solve_layer_by_layer`] swaps the F2L stage for the beginner-method
//! pair of first-layer corners and second-layer edges. The simplifier
//! collapses the raw move stream into the canonical output.

pub mod corners;
pub mod cross;
pub mod f2l;
pub mod oll;
pub mod pll;
pub mod second_layer;

use cube_core::{Cube, Move, MoveKind, Pieces};
use itertools::Itertools;
use log::debug;

pub use cross::orient_down;

/// Rendered as a line break by [`print_solution`]; separates the pieces
/// and stages of the solution.
pub const STAGE_BREAK: Move = Move::new(Pieces::Y, MoveKind::NoMove);

/// Solve the cube with the CFOP pipeline. The cube is left solved; the
/// returned sequence (markers included) maps the starting state to solved.
pub fn solve(cube: &mut Cube) -> Vec<Move> {
    let mut solution = Vec::new();

    cross::solve_cross(cube, &mut solution);
    debug!("cross done after {} moves", solution.len());
    f2l::solve_f2l(cube, &mut solution);
    debug!("f2l done after {} moves", solution.len());
    oll::solve_oll(cube, &mut solution);
    pll::solve_pll(cube, &mut solution);

    clean_solution(solution, false)
}

/// Solve the cube with the beginner method: cross, first-layer corners,
/// second-layer edges, then the same last-layer stages as [`solve`].
pub fn solve_layer_by_layer(cube: &mut Cube) -> Vec<Move> {
    let mut solution = Vec::new();

    cross::solve_cross(cube, &mut solution);
    corners::solve_corners(cube, &mut solution);
    debug!("first layer done after {} moves", solution.len());
    second_layer::solve_second_layer(cube, &mut solution);
    oll::solve_oll(cube, &mut solution);
    pll::solve_pll(cube, &mut solution);

    clean_solution(solution, false)
}

/// Record `turns` clockwise quarter turns of the up face (already executed
/// on the cube) as a single move in the solution.
pub(crate) fn push_u_turns(turns: u8, solution: &mut Vec<Move>) {
    match turns {
        1 => solution.push(Move::new(Pieces::Up, MoveKind::Normal)),
        2 => solution.push(Move::new(Pieces::Up, MoveKind::Double)),
        3 => solution.push(Move::new(Pieces::Up, MoveKind::Prime)),
        _ => {}
    }
}

/// One simplification pass: walk the solution left to right, merging each
/// move into the output tail whenever the tail turns the same pieces, and
/// dropping full cancellations.
///
/// With `optimized` set, stage markers (and any other identity moves) are
/// dropped too, which lets moves that straddled a boundary cancel. A pass
/// does not always reach a fixpoint; callers that want one run it again.
pub fn clean_solution(solution: Vec<Move>, optimized: bool) -> Vec<Move> {
    let mut cleaned: Vec<Move> = Vec::new();
    for mv in solution {
        if let Some(&tail) = cleaned.last() {
            if tail.can_merge_with(&mv) {
                cleaned.pop();
                let merged = tail.merge(&mv);
                if merged.kind != MoveKind::NoMove {
                    cleaned.push(merged);
                }
                continue;
            }
            if optimized && mv.kind == MoveKind::NoMove {
                continue;
            }
        }
        cleaned.push(mv);
    }
    cleaned
}

/// Print the solution to stdout, one stage per line.
pub fn print_solution(solution: &[Move]) {
    for mv in solution {
        if mv.kind != MoveKind::NoMove {
            print!("{mv} ");
        } else if mv.pieces == Pieces::Y {
            println!();
        }
    }
    println!();
}

/// The solution as a single space-separated line, markers omitted.
pub fn solution_to_string(solution: &[Move]) -> String {
    solution
        .iter()
        .filter(|mv| mv.kind != MoveKind::NoMove)
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(token: &str) -> Move {
        Move::from_token(token)
    }

    #[test]
    fn adjacent_same_piece_moves_merge() {
        let cleaned = clean_solution(vec![mv("R"), mv("R")], false);
        assert_eq!(cleaned, vec![mv("R2")]);
    }

    #[test]
    fn cancellations_cascade_through_the_tail() {
        let cleaned = clean_solution(vec![mv("R"), mv("L"), mv("L'"), mv("R'")], false);
        assert!(cleaned.is_empty());
    }

    #[test]
    fn four_quarters_vanish() {
        let cleaned = clean_solution(vec![mv("R"), mv("R"), mv("R"), mv("R")], false);
        assert!(cleaned.is_empty());
    }

    #[test]
    fn markers_block_merges_unless_optimized() {
        let solution = vec![mv("U"), STAGE_BREAK, mv("U'")];
        let kept = clean_solution(solution.clone(), false);
        assert_eq!(kept, solution);
        let optimized = clean_solution(solution, true);
        assert!(optimized.is_empty());
    }

    #[test]
    fn a_leading_marker_survives_even_optimized() {
        let cleaned = clean_solution(vec![STAGE_BREAK, mv("R")], true);
        assert_eq!(cleaned, vec![STAGE_BREAK, mv("R")]);
    }

    #[test]
    fn rendering_skips_markers() {
        let solution = vec![mv("R"), STAGE_BREAK, mv("U2"), mv("f'")];
        assert_eq!(solution_to_string(&solution), "R U2 f'");
    }
}
