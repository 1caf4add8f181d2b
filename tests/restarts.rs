use marten_fd::{
    config::Config,
    context::Context,
    reports::Report,
    structures::atom::{Atom, Val, Var},
};

/// Four pigeons, three holes: variable `p` is the hole of pigeon `p`, and no two pigeons
/// share. Unsatisfiable, and refuting it takes the solver through several conflicts.
fn pigeonhole_context(config: Config) -> Context {
    let mut ctx = Context::from_config(config);

    let pigeons: Vec<Var> = (0..4).map(|_| ctx.add_variable(3)).collect();

    for (index, first) in pigeons.iter().enumerate() {
        for second in pigeons.iter().skip(index + 1) {
            for hole in 0..3 as Val {
                ctx.add_clause(vec![Atom::ne(*first, hole), Atom::ne(*second, hole)])
                    .unwrap();
            }
        }
    }

    ctx
}

mod restarts {
    use super::*;

    #[test]
    fn threshold_zero_never_restarts() {
        let mut ctx = pigeonhole_context(Config::default());

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert_eq!(ctx.counters.restarts, 0);
        assert!(ctx.counters.backtracks >= 3);
    }

    #[test]
    fn every_second_backtrack_restarts_at_threshold_two() {
        let mut config = Config::default();
        config.restart_threshold.value = 2;

        let mut ctx = pigeonhole_context(config);

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));

        // The threshold fires on each second backtrack, resetting the level to zero.
        assert!(ctx.counters.backtracks >= 3);
        assert_eq!(ctx.counters.restarts, ctx.counters.backtracks / 2);
    }

    #[test]
    fn restarts_preserve_conclusions() {
        let mut threshold_free = pigeonhole_context(Config::default());

        let mut config = Config::default();
        config.restart_threshold.value = 2;
        let mut restarting = pigeonhole_context(config);

        assert_eq!(threshold_free.solve(), restarting.solve());
    }
}
