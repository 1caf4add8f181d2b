//! Cross-checks against exhaustive enumeration on small problems.

use rand::{rngs::StdRng, Rng, SeedableRng};

use marten_fd::{
    config::Config,
    context::Context,
    reports::Report,
    structures::{
        atom::{Atom, Polarity, Val},
        clause::CClause,
    },
};

/// Decides satisfiability by walking every total assignment.
fn exhaustively_satisfiable(domains: &[Val], clauses: &[CClause]) -> bool {
    let mut assignment: Vec<Val> = vec![0; domains.len()];

    loop {
        let satisfied = clauses.iter().all(|clause| {
            clause.iter().any(|atom| match atom.polarity {
                Polarity::Eq => assignment[atom.var as usize] == atom.val,
                Polarity::Ne => assignment[atom.var as usize] != atom.val,
            })
        });
        if satisfied {
            return true;
        }

        // Next assignment, odometer style.
        let mut place = 0;
        loop {
            if place == domains.len() {
                return false;
            }
            assignment[place] += 1;
            if assignment[place] < domains[place] {
                break;
            }
            assignment[place] = 0;
            place += 1;
        }
    }
}

fn context_over(domains: &[Val], clauses: &[CClause], config: Config) -> Context {
    let mut ctx = Context::from_config(config);
    for domain in domains {
        ctx.add_variable(*domain);
    }
    for clause in clauses {
        ctx.add_clause(clause.clone()).unwrap();
    }
    ctx
}

#[test]
fn random_problems_agree_with_enumeration() {
    let mut rng = StdRng::seed_from_u64(0xfd);

    for round in 0..200 {
        let domains: Vec<Val> = (0..rng.random_range(2..=4))
            .map(|_| rng.random_range(2..=3))
            .collect();

        let clauses: Vec<CClause> = (0..rng.random_range(2..=7))
            .map(|_| {
                (0..rng.random_range(1..=3))
                    .map(|_| {
                        let var = rng.random_range(0..domains.len() as u32);
                        let val = rng.random_range(0..domains[var as usize]);
                        match rng.random_bool(0.5) {
                            true => Atom::eq(var, val),
                            false => Atom::ne(var, val),
                        }
                    })
                    .collect()
            })
            .collect();

        let expected = match exhaustively_satisfiable(&domains, &clauses) {
            true => Report::Satisfiable,
            false => Report::Unsatisfiable,
        };

        let mut ctx = context_over(&domains, &clauses, Config::default());
        assert_eq!(ctx.solve(), Ok(expected), "round {round} diverged: {clauses:?}");
        ctx.assert_coherent();
        if expected == Report::Satisfiable {
            assert!(ctx.verify_model().is_ok(), "round {round} model failed");
        }

        let mut watched_config = Config::default();
        watched_config.watched_literals.value = true;
        let mut watched = context_over(&domains, &clauses, watched_config);
        assert_eq!(watched.solve(), Ok(expected), "round {round} diverged watched");
    }
}

#[test]
fn random_problems_with_restarts_agree_with_enumeration() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for round in 0..100 {
        let domains: Vec<Val> = (0..rng.random_range(3..=4))
            .map(|_| rng.random_range(2..=3))
            .collect();

        let clauses: Vec<CClause> = (0..rng.random_range(4..=9))
            .map(|_| {
                (0..rng.random_range(1..=2))
                    .map(|_| {
                        let var = rng.random_range(0..domains.len() as u32);
                        let val = rng.random_range(0..domains[var as usize]);
                        match rng.random_bool(0.5) {
                            true => Atom::eq(var, val),
                            false => Atom::ne(var, val),
                        }
                    })
                    .collect()
            })
            .collect();

        let expected = match exhaustively_satisfiable(&domains, &clauses) {
            true => Report::Satisfiable,
            false => Report::Unsatisfiable,
        };

        let mut config = Config::default();
        config.restart_threshold.value = 1;
        let mut ctx = context_over(&domains, &clauses, config);
        assert_eq!(ctx.solve(), Ok(expected), "round {round} diverged: {clauses:?}");
    }
}
