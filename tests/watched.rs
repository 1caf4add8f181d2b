//! The watched-atom scheme against the free-count reference, problem by problem.

use marten_fd::{
    config::Config,
    context::Context,
    reports::Report,
    structures::{atom::Atom, clause::CClause},
};

fn solve_both_ways(variables: &[u32], clauses: &[CClause]) -> (Context, Context) {
    let mut reference = Context::from_config(Config::default());

    let mut config = Config::default();
    config.watched_literals.value = true;
    let mut watched = Context::from_config(config);

    for ctx in [&mut reference, &mut watched] {
        for domain in variables {
            ctx.add_variable(*domain);
        }
        for clause in clauses {
            ctx.add_clause(clause.clone()).unwrap();
        }
    }

    assert_eq!(reference.solve(), watched.solve());
    (reference, watched)
}

fn assert_same_model(reference: &Context, watched: &Context) {
    for var in 0..reference.variable_db.count() as u32 {
        assert_eq!(
            reference.variable_db.chosen_value(var),
            watched.variable_db.chosen_value(var),
            "schemes diverge on variable {var}"
        );
    }
}

mod watched_equivalence {
    use super::*;

    #[test]
    fn unit_refutation() {
        let (reference, _) =
            solve_both_ways(&[2], &[vec![Atom::eq(0, 0)], vec![Atom::ne(0, 0)]]);
        assert_eq!(reference.report(), Report::Unsatisfiable);
    }

    #[test]
    fn entailed_model() {
        let (reference, watched) =
            solve_both_ways(&[3], &[vec![Atom::ne(0, 0)], vec![Atom::ne(0, 1)]]);
        assert_eq!(reference.report(), Report::Satisfiable);
        assert_same_model(&reference, &watched);
    }

    #[test]
    fn decided_model() {
        let (reference, watched) = solve_both_ways(
            &[2, 2],
            &[
                vec![Atom::eq(0, 0), Atom::eq(1, 1)],
                vec![Atom::eq(0, 1), Atom::eq(1, 0)],
            ],
        );
        assert_eq!(reference.report(), Report::Satisfiable);
        assert_same_model(&reference, &watched);
    }

    #[test]
    fn learned_refutation() {
        let (reference, _) = solve_both_ways(
            &[2, 2, 2],
            &[
                vec![Atom::eq(0, 0), Atom::eq(1, 0)],
                vec![Atom::eq(0, 0), Atom::ne(1, 0)],
                vec![Atom::ne(0, 0), Atom::eq(2, 0)],
                vec![Atom::ne(0, 0), Atom::ne(2, 0)],
            ],
        );
        assert_eq!(reference.report(), Report::Unsatisfiable);
    }

    #[test]
    fn domain_exclusivity() {
        let (reference, _) = solve_both_ways(
            &[3],
            &[
                vec![Atom::eq(0, 0), Atom::eq(0, 1)],
                vec![Atom::ne(0, 0)],
                vec![Atom::ne(0, 1)],
            ],
        );
        assert_eq!(reference.report(), Report::Unsatisfiable);
    }

    #[test]
    fn pigeonhole_refutation() {
        let mut clauses: Vec<CClause> = Vec::default();
        for first in 0..4 {
            for second in first + 1..4 {
                for hole in 0..3 {
                    clauses.push(vec![Atom::ne(first, hole), Atom::ne(second, hole)]);
                }
            }
        }

        let (reference, watched) = solve_both_ways(&[3, 3, 3, 3], &clauses);
        assert_eq!(reference.report(), Report::Unsatisfiable);
        assert_eq!(
            reference.counters.backtracks,
            watched.counters.backtracks,
            "schemes diverge in search"
        );
    }

    #[test]
    fn wide_domains_with_mixed_polarities() {
        let (reference, watched) = solve_both_ways(
            &[4, 4, 2],
            &[
                vec![Atom::ne(0, 0), Atom::ne(1, 0), Atom::eq(2, 0)],
                vec![Atom::eq(0, 1), Atom::eq(1, 2)],
                vec![Atom::ne(1, 2), Atom::ne(2, 0)],
                vec![Atom::eq(0, 3), Atom::eq(2, 1)],
            ],
        );
        assert_eq!(reference.report(), Report::Satisfiable);
        assert_same_model(&reference, &watched);
        assert!(reference.verify_model().is_ok());
        assert!(watched.verify_model().is_ok());
    }
}
