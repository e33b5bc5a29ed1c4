use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlweave::{Condition, Conjunction, Expression, OrderedExpression, postgres_query_param_hook};

/// INSERT ... VALUES with `rows` tuples of eight markers each.
fn build_insert(rows: usize) -> String {
    let mut query = String::from("INSERT INTO t (a, b, c, d, e, f, g, h) VALUES ");
    for row in 0..rows {
        if row > 0 {
            query.push_str(", ");
        }
        query.push_str("(?, ?, ?, ?, ?, ?, ?, ?)");
    }
    query
}

fn bench_param_hook(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrite/postgres");

    for rows in [1, 10, 100, 1000] {
        let query = build_insert(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &query, |b, query| {
            b.iter(|| black_box(postgres_query_param_hook(query)));
        });
    }

    group.bench_function("no_marker", |b| {
        let query = "update apple_attribute set code = 'x' where id = 1 AND ab = '2'";
        b.iter(|| black_box(postgres_query_param_hook(query)));
    });

    group.finish();
}

fn bench_expression(c: &mut Criterion) {
    c.bench_function("expression/add_join_reset", |b| {
        let mut ex = Expression::new();
        b.iter(|| {
            for i in 0..16 {
                ex.add("foo = ?", i);
            }
            black_box(ex.join(", "));
            ex.reset();
        });
    });
}

fn bench_condition_tree(c: &mut Criterion) {
    c.bench_function("condition/render_tree", |b| {
        let mut root = Condition::and();
        root.add_expression("a = ?", 1);
        for depth in 0..8 {
            let mut child = Condition::or();
            child.add_expression("b = ?", depth).add_expression("c IS NULL", ());
            root.merge(Conjunction::Or, [child]);
        }
        b.iter(|| black_box((root.to_string(), root.arguments())));
    });
}

fn bench_ordered(c: &mut Criterion) {
    c.bench_function("ordered/slots_reuse", |b| {
        let mut ex = OrderedExpression::new();
        b.iter(|| {
            ex.add(5, "CASCADE", ()).add(0, "ALTER TABLE", ()).add(2, "products", ());
            black_box(ex.to_string());
            ex.reset();
        });
    });
}

criterion_group!(benches, bench_param_hook, bench_expression, bench_condition_tree, bench_ordered);
criterion_main!(benches);
