use marten_fd::{
    config::Config,
    context::Context,
    db::{variable::Reason, LevelIndex},
    structures::atom::Atom,
};

/// Everything a backjump must restore, flattened for comparison.
type Snapshot = (
    Vec<(
        marten_fd::db::variable::ValueStatus,
        Option<LevelIndex>,
        Option<Reason>,
        usize,
        usize,
    )>,
    Vec<(bool, Option<LevelIndex>, usize)>,
    usize,
);

fn snapshot(ctx: &Context) -> Snapshot {
    let mut cells = Vec::default();
    for variable in ctx.variable_db.variables() {
        for cell in &variable.cells {
            cells.push((
                cell.status,
                cell.level,
                cell.reason,
                cell.pos_count,
                cell.neg_count,
            ));
        }
    }

    let clauses = ctx
        .clause_db
        .clauses()
        .iter()
        .map(|clause| (clause.satisfied, clause.sat_level, clause.num_unassigned))
        .collect();

    (cells, clauses, ctx.trail.len())
}

fn three_variable_context() -> Context {
    let mut ctx = Context::from_config(Config::default());

    let v = ctx.add_variable(3);
    let w = ctx.add_variable(3);
    let x = ctx.add_variable(3);

    ctx.add_clause(vec![Atom::ne(v, 0), Atom::eq(w, 1)]).unwrap();
    ctx.add_clause(vec![Atom::ne(x, 0), Atom::ne(w, 2)]).unwrap();
    ctx.add_clause(vec![Atom::eq(v, 0), Atom::eq(x, 1), Atom::eq(w, 0)])
        .unwrap();

    ctx
}

mod round_trips {
    use super::*;

    #[test]
    fn backjump_restores_each_earlier_level() {
        let mut ctx = three_variable_context();

        let at_root = snapshot(&ctx);

        ctx.level = 1;
        ctx.assign(Atom::eq(0, 0), Reason::Decision);
        ctx.refresh_unit_queue();
        ctx.propagate_units();
        assert!(ctx.conflict.is_none());
        ctx.assert_coherent();

        let at_one = snapshot(&ctx);

        ctx.level = 2;
        ctx.assign(Atom::eq(2, 0), Reason::Decision);
        ctx.refresh_unit_queue();
        ctx.propagate_units();
        assert!(ctx.conflict.is_none());
        ctx.assert_coherent();

        ctx.backjump(1);
        ctx.level = 1;
        ctx.assert_coherent();
        assert_eq!(snapshot(&ctx), at_one);

        ctx.backjump(0);
        ctx.level = 0;
        ctx.assert_coherent();
        assert_eq!(snapshot(&ctx), at_root);
    }

    #[test]
    fn backjump_to_the_current_level_changes_nothing() {
        let mut ctx = three_variable_context();

        ctx.level = 1;
        ctx.assign(Atom::eq(1, 1), Reason::Decision);

        let before = snapshot(&ctx);
        ctx.backjump(1);
        assert_eq!(snapshot(&ctx), before);
    }
}

mod idempotence {
    use super::*;

    #[test]
    fn assigning_a_placed_atom_changes_nothing() {
        let mut ctx = three_variable_context();

        ctx.level = 1;
        ctx.assign(Atom::eq(0, 0), Reason::Decision);
        let placed = snapshot(&ctx);

        ctx.assign(Atom::eq(0, 0), Reason::Decision);
        assert_eq!(snapshot(&ctx), placed);
    }

    #[test]
    fn assigning_a_closure_consequence_changes_nothing() {
        let mut ctx = three_variable_context();

        ctx.level = 1;
        ctx.assign(Atom::eq(0, 0), Reason::Decision);
        let placed = snapshot(&ctx);

        // 1 ≠ 1 and 1 ≠ 2 already hold through the closure of 1 = 0.
        ctx.assign(Atom::ne(0, 1), Reason::Decision);
        ctx.assign(Atom::ne(0, 2), Reason::Decision);
        assert_eq!(snapshot(&ctx), placed);
    }
}
