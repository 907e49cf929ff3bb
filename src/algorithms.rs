//! Sorting and searching over a sequence of students.
//!
//! Every function takes the backing slice and a logical count, and works on
//! the prefix `[0, count)`. A count larger than the slice is clamped to the
//! slice length.
//!
//! Both sorts are bubble sorts which only swap neighbours on a strict
//! comparison, so they are stable: students with equal keys keep their
//! relative order.

use std::cmp::Ordering;

use crate::domain::{RollNumber, Student};

/// Sorts the first `count` students from highest to lowest average.
pub fn sort_by_average_descending(students: &mut [Student], count: usize) {
    bubble_sort(prefix_mut(students, count), |left, right| {
        left.average() < right.average()
    });
}

/// Sorts the first `count` students by roll number, lowest first.
///
/// This is the precondition for [`binary_search`].
pub fn sort_by_roll_ascending(students: &mut [Student], count: usize) {
    bubble_sort(prefix_mut(students, count), |left, right| {
        left.roll() > right.roll()
    });
}

/// Scans the first `count` students in their current order and returns the
/// first one with the given roll number.
#[must_use]
pub fn linear_search(students: &[Student], count: usize, roll: RollNumber) -> Option<&Student> {
    prefix(students, count).iter().find(|s| s.roll() == roll)
}

/// Finds a student by roll number by interval halving.
///
/// The first `count` students must already be sorted ascending by roll number
/// (see [`sort_by_roll_ascending`]) and roll numbers must be unique, otherwise
/// the result is unspecified.
#[must_use]
pub fn binary_search(students: &[Student], count: usize, roll: RollNumber) -> Option<&Student> {
    let students = prefix(students, count);

    // inclusive interval [low, high], empty once low passes high
    let mut low = 0;
    let mut high = students.len().checked_sub(1)?;

    while low <= high {
        let mid = low + (high - low) / 2;
        let candidate = &students[mid];

        match roll.cmp(&candidate.roll()) {
            Ordering::Equal => return Some(candidate),
            Ordering::Less => high = mid.checked_sub(1)?,
            Ordering::Greater => low = mid + 1,
        }
    }

    None
}

/// Bubble sort which swaps `slice[j]` and `slice[j + 1]` whenever
/// `out_of_order(&slice[j], &slice[j + 1])` holds.
///
/// Stops early once a pass makes no swaps.
fn bubble_sort<F>(slice: &mut [Student], out_of_order: F)
where
    F: Fn(&Student, &Student) -> bool,
{
    let len = slice.len();
    for pass in 0..len.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..len - pass - 1 {
            if out_of_order(&slice[j], &slice[j + 1]) {
                slice.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

fn prefix(students: &[Student], count: usize) -> &[Student] {
    &students[..count.min(students.len())]
}

fn prefix_mut(students: &mut [Student], count: usize) -> &mut [Student] {
    let len = count.min(students.len());
    &mut students[..len]
}
