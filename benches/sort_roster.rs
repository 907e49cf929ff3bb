//! This bench test measures the roster sorts and searches on a roster of the
//! size the original console tool was capped at.

#![allow(missing_docs)]

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use gradebook::{Roster, Student};

/// Builds a roster in reverse roll order with scattered averages.
fn preseed_roster(size: u32) -> Roster {
    let mut roster = Roster::new();
    for roll in (1..=size).rev() {
        let mark = (roll * 37) % 101;
        let student = Student::try_new("Bench Student", roll, &[mark; 5]).unwrap();
        roster.add(student).unwrap();
    }
    roster
}

fn sorts(c: &mut Criterion) {
    c.bench_function("sort 100 by average", |b| {
        b.iter_batched(
            || preseed_roster(100),
            |mut roster| roster.sort_by_average(),
            BatchSize::SmallInput,
        );
    });

    c.bench_function("sort 100 by roll", |b| {
        b.iter_batched(
            || preseed_roster(100),
            |mut roster| roster.sort_by_roll(),
            BatchSize::SmallInput,
        );
    });
}

fn searches(c: &mut Criterion) {
    let mut sorted = preseed_roster(100);
    sorted.sort_by_roll();

    c.bench_function("linear search 100", |b| {
        b.iter(|| sorted.find_linear(std::hint::black_box(99)).is_some());
    });

    c.bench_function("binary search 100", |b| {
        b.iter(|| {
            gradebook::algorithms::binary_search(sorted.students(), 100, std::hint::black_box(99))
                .is_some()
        });
    });
}

criterion_group!(benches, sorts, searches);
criterion_main!(benches);
