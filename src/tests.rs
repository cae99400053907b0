#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};
    use std::num::NonZero;

    use crate::builder::BoardBuilder;
    use crate::color::EMPTY;
    use crate::error::BoardError;
    use crate::location::Location;
    use crate::solver::{solve, Solution, SolveOutcome, SolverConfig};
    use crate::Board;

    fn sequential(limit: usize) -> SolverConfig {
        SolverConfig {
            path_limit: NonZero::new(limit).unwrap(),
            parallel: false,
        }
    }

    // sample "7,7" dataset, 0-indexed
    fn sample_seven() -> Board {
        BoardBuilder::with_size(7)
            .add_termini(1, (Location(0, 4), Location(5, 5)))
            .add_termini(2, (Location(0, 5), Location(6, 3)))
            .add_termini(3, (Location(1, 2), Location(4, 2)))
            .add_termini(4, (Location(1, 5), Location(4, 5)))
            .add_termini(5, (Location(1, 1), Location(5, 1)))
            .build()
            .unwrap()
    }

    /// Check termini, coverage, and that each color's cells are exactly its reported path.
    fn assert_valid(board: &Board, solution: &Solution) {
        let grid = solution.grid();
        assert!(grid.is_full());
        assert_eq!(solution.paths().len(), board.pairs().len());

        for pair in board.pairs() {
            assert_eq!(grid.color_at(pair.start()), pair.color());
            assert_eq!(grid.color_at(pair.end()), pair.color());

            let path = &solution.paths()[&pair.color()];
            let cells = path.cells();
            assert_eq!(path.start(), pair.start());
            assert_eq!(path.end(), pair.end());
            assert!(cells.windows(2).all(|step| step[0].is_adjacent(&step[1])));

            let on_path = cells.iter().copied().collect::<BTreeSet<_>>();
            assert_eq!(on_path.len(), cells.len(), "color {} crosses itself", pair.color());

            let colored = (0..grid.size())
                .flat_map(|row| (0..grid.size()).map(move |col| Location(row, col)))
                .filter(|location| grid.color_at(*location) == pair.color())
                .collect::<BTreeSet<_>>();
            assert_eq!(colored, on_path);
        }
    }

    #[test]
    fn remove_termini() {
        let board = BoardBuilder::with_size(5)
            .add_termini(1, (Location(0, 0), Location(4, 1)))
            .pop_termini()
            .build()
            .unwrap();

        assert_eq!(format!("{}", board), ". . . . .
. . . . .
. . . . .
. . . . .
. . . . .
");
    }

    #[test]
    fn solve_most_basic() {
        // flow free classic pack level 1
        let board = BoardBuilder::with_size(5)
            .add_termini(1, (Location(0, 0), Location(4, 1)))
            .add_termini(2, (Location(0, 2), Location(3, 1)))
            .add_termini(3, (Location(1, 2), Location(4, 2)))
            .add_termini(4, (Location(0, 4), Location(3, 3)))
            .add_termini(5, (Location(1, 4), Location(4, 3)))
            .build()
            .unwrap();

        assert_eq!(format!("{}", board), "1 . 2 . 4
. . 3 . 5
. . . . .
. 2 . 4 .
. 1 3 5 .
");

        let solution = board.solve(&sequential(1000)).into_solution().unwrap();
        assert_eq!(format!("{}", solution), "1 2 2 4 4
1 2 3 4 5
1 2 3 4 5
1 2 3 4 5
1 1 3 5 5
");
        assert_valid(&board, &solution);
    }

    #[test]
    fn solve_sample_seven() {
        let board = sample_seven();

        let solution = board.solve(&sequential(1000)).into_solution().unwrap();
        assert_eq!(format!("{}", solution), "5 5 5 5 1 2 2
5 5 3 5 1 4 2
5 5 3 5 1 4 2
5 5 3 5 1 4 2
5 5 3 5 1 4 2
5 5 5 5 1 1 2
5 5 5 2 2 2 2
");
        assert_valid(&board, &solution);
    }

    #[test]
    fn same_input_same_solution() {
        let board = sample_seven();

        let first = board.solve(&sequential(1000));
        let second = sample_seven().solve(&sequential(1000));
        assert!(first.is_found());
        assert_eq!(first, second);
    }

    #[test]
    fn lower_limits_never_yield_invalid_boards() {
        let board = sample_seven();

        // fewer candidates per pair steer the search to another covering
        let solution = board.solve(&sequential(50)).into_solution().unwrap();
        assert_eq!(format!("{}", solution), "1 1 1 1 1 2 2
1 5 3 1 1 4 2
1 5 3 1 1 4 2
1 5 3 1 1 4 2
1 5 3 1 1 4 2
1 5 1 1 1 1 2
1 1 1 2 2 2 2
");
        assert_valid(&board, &solution);

        assert_eq!(board.solve(&sequential(5)), SolveOutcome::Exhausted);
        assert_eq!(board.solve(&sequential(1)), SolveOutcome::Exhausted);
    }

    #[test]
    fn diagonal_pair_cannot_cover_square() {
        let board = BoardBuilder::with_size(2)
            .add_termini(1, (Location(0, 0), Location(1, 1)))
            .build()
            .unwrap();

        let (outcome, stats) = board.solve_with_statistics(&sequential(1000));
        assert_eq!(outcome, SolveOutcome::Exhausted);
        assert_eq!(stats.backtracks, 2);
        // the search ran on a copy
        assert_eq!(board.grid().color_at(Location(0, 1)), EMPTY);
    }

    #[test]
    fn same_cell_twice_is_not_a_pair() {
        let endpoints = BTreeMap::from([(1, vec![Location(0, 0), Location(0, 0)])]);
        assert_eq!(
            solve(1, &endpoints, &SolverConfig::default()),
            Err(BoardError::InvalidPairCount { color: 1, count: 1 }),
        );
    }

    #[test]
    fn rejects_empty_board() {
        assert_eq!(solve(0, &BTreeMap::new(), &SolverConfig::default()), Err(BoardError::InvalidBoardSize));
    }

    #[test]
    fn no_pairs_on_a_nonempty_board() {
        let outcome = solve(1, &BTreeMap::new(), &sequential(1000)).unwrap();
        assert_eq!(outcome, SolveOutcome::Exhausted);
    }

    #[test]
    fn single_pair_snakes_through_every_cell() {
        let endpoints = BTreeMap::from([(1, vec![Location(0, 0), Location(2, 2)])]);
        let solution = solve(3, &endpoints, &sequential(1000)).unwrap().into_solution().unwrap();

        assert_eq!(format!("{}", solution), "1 1 1
1 1 1
1 1 1
");
        assert_eq!(solution.paths()[&1].cells().len(), 9);
    }

    #[test]
    fn adjacent_termini_connect_directly() {
        let board = BoardBuilder::with_size(2)
            .add_termini(1, (Location(0, 0), Location(0, 1)))
            .add_termini(2, (Location(1, 0), Location(1, 1)))
            .build()
            .unwrap();

        let solution = board.solve(&sequential(1000)).into_solution().unwrap();
        assert_eq!(format!("{}", solution), "1 1
2 2
");
        assert_valid(&board, &solution);
    }

    #[test]
    fn termini_can_be_added_one_at_a_time() {
        let mut builder = BoardBuilder::with_size(2);
        builder.add_endpoint(2, Location(1, 0))
            .add_endpoint(1, Location(0, 0))
            .add_endpoint(1, Location(0, 1))
            .add_endpoint(2, Location(1, 1));

        let board = builder.build().unwrap();
        assert_eq!(board.pairs().iter().map(|pair| pair.color()).collect::<Vec<_>>(), vec![1, 2]);
        assert!(board.solve(&sequential(1000)).is_found());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_search_agrees_with_sequential() {
        let _ = env_logger::builder().is_test(true).try_init();

        let board = sample_seven();
        let parallel = SolverConfig { parallel: true, ..sequential(1000) };

        assert_eq!(board.solve(&parallel), board.solve(&sequential(1000)));
        assert_eq!(board.solve(&SolverConfig { parallel: true, ..sequential(50) }), board.solve(&sequential(50)));
        assert_eq!(board.solve(&SolverConfig { parallel: true, ..sequential(5) }), SolveOutcome::Exhausted);
    }
}
