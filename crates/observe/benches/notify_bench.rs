//! Benchmarks for ripple-observe dispatch and list churn.
//!
//! Target: single property-change dispatch to 10 observers < 10μs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ripple_observe::{Item, ObservableList, ObservableObject, Value};

fn bench_property_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("object/set");

    for observers in [0usize, 1, 10, 100] {
        let object = ObservableObject::new();
        object.add_property("x", Value::Int(0));
        for _ in 0..observers {
            object.add_change_observer(|event| {
                black_box(&event.name);
            });
        }

        let mut next = 0i64;
        group.bench_with_input(
            BenchmarkId::new("observers", observers),
            &object,
            |b, object| {
                b.iter(|| {
                    next += 1;
                    object.set("x", Value::Int(black_box(next)))
                })
            },
        );
    }

    group.finish();
}

fn bench_list_add_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("list/churn");

    group.bench_function("add_remove_plain", |b| {
        let list = ObservableList::new();
        list.add_change_observer(|event| {
            black_box(event.index);
        }, false);
        b.iter(|| {
            list.add(Item::from(black_box(1i64)));
            list.remove_range(0, 1)
        })
    });

    group.bench_function("add_remove_object", |b| {
        let list = ObservableList::new();
        b.iter(|| {
            let object = ObservableObject::new();
            object.add_property("x", Value::Int(1));
            list.add(Item::Object(object));
            list.remove_range(0, 1)
        })
    });

    group.finish();
}

fn bench_forwarded_item_change(c: &mut Criterion) {
    let mut group = c.benchmark_group("list/forward");

    let list = ObservableList::new();
    let object = ObservableObject::new();
    object.add_property("x", Value::Int(0));
    list.add(Item::Object(object.clone()));
    list.add_change_observer(
        |event| {
            black_box(event.index);
        },
        true,
    );

    let mut next = 0i64;
    group.bench_function("single_item", |b| {
        b.iter(|| {
            next += 1;
            object.set("x", Value::Int(black_box(next)))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_property_set,
    bench_list_add_remove,
    bench_forwarded_item_change
);
criterion_main!(benches);
