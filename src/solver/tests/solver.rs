use cube_core::{Cube, Move};
use rand::Rng;
use solver::{clean_solution, solution_to_string, solve, solve_layer_by_layer, STAGE_BREAK};

const SCRAMBLE_MOVES: [&str; 18] = [
    "U", "U'", "U2", "D", "D'", "D2", "F", "F'", "F2", "B", "B'", "B2", "R", "R'", "R2", "L",
    "L'", "L2",
];

fn random_scramble(rng: &mut impl Rng, length: usize) -> String {
    (0..length)
        .map(|_| SCRAMBLE_MOVES[rng.gen_range(0..SCRAMBLE_MOVES.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Solve the scrambled cube, then replay the optimized solution against a
/// freshly scrambled cube to make sure the recorded moves really are the
/// executed ones. Returns the optimized solution length.
fn solve_and_replay(scramble: &str, solve_fn: fn(&mut Cube) -> Vec<Move>) -> usize {
    let mut cube = Cube::new();
    cube.read_moves(scramble);
    let solution = solve_fn(&mut cube);
    assert!(cube.is_solved(), "failed to solve {scramble:?}");

    let optimized = clean_solution(solution, true);
    let mut replay = Cube::new();
    replay.read_moves(scramble);
    replay.execute_moves(&optimized);
    assert!(replay.is_solved(), "failed to replicate solve of {scramble:?}");

    optimized.len()
}

#[test_log::test]
fn a_solved_cube_needs_no_moves() {
    let mut cube = Cube::new();
    let solution = solve(&mut cube);
    assert!(cube.is_solved());
    assert_eq!(solution_to_string(&solution), "");
}

#[test_log::test]
fn a_single_turn_solves_short() {
    let length = solve_and_replay("R", solve);
    assert!(length <= 32, "solution for a single R was {length} moves");
}

#[test_log::test]
fn an_adjust_only_scramble_solves_short() {
    let length = solve_and_replay("U", solve);
    assert!(length <= 2, "solution for a single U was {length} moves");
}

#[test_log::test]
fn six_sexy_moves_are_the_identity() {
    let scramble = "R U R' U' ".repeat(6);
    let mut cube = Cube::new();
    cube.read_moves(&scramble);
    assert!(cube.is_solved());
    solve_and_replay(&scramble, solve);
}

#[test_log::test]
fn a_three_cycle_scramble_solves() {
    solve_and_replay("F2 U L R' F2 L' R U F2", solve);
}

#[test_log::test]
fn scrambles_with_slice_and_wide_turns_solve() {
    for scramble in [
        "M2 E' S u r' f2 d b l' x y' z2",
        "r u f M E S R U F",
        "x y z M' E' S'",
    ] {
        solve_and_replay(scramble, solve);
    }
}

#[test_log::test]
fn the_unoptimized_solution_is_partitioned_by_markers() {
    let mut cube = Cube::new();
    cube.read_moves("F2 U L R' F2 L' R U F2");
    let solution = solve(&mut cube);
    assert!(cube.is_solved());
    assert!(solution.contains(&STAGE_BREAK));
}

#[test_log::test]
fn a_state_string_round_trips_through_the_solver() {
    let mut cube = Cube::new();
    cube.read_moves("D2 L' B R2 F' U2 R D' F2 L");
    let state = cube.state_string();

    let mut loaded = Cube::new();
    loaded.copy_state(&state).unwrap();
    assert_eq!(cube, loaded);

    solve(&mut loaded);
    assert!(loaded.is_solved());
}

#[test_log::test]
fn random_scrambles_solve() {
    let mut rng = rand::thread_rng();
    let mut total_length = 0usize;
    let runs = 10_000;

    for _ in 0..runs {
        let scramble = random_scramble(&mut rng, 25);
        total_length += solve_and_replay(&scramble, solve);
    }

    let average = total_length as f64 / runs as f64;
    assert!(
        (20.0..200.0).contains(&average),
        "implausible average solution length {average}"
    );
}

#[test_log::test]
fn random_scrambles_solve_layer_by_layer() {
    let mut rng = rand::thread_rng();
    for _ in 0..2_000 {
        let scramble = random_scramble(&mut rng, 25);
        solve_and_replay(&scramble, solve_layer_by_layer);
    }
}
