//! Algebraic properties of `IndexVec` against a plain `Vec` model,
//! checked by quickcheck rather than enumerated by hand.

use quickcheck_macros::quickcheck;
use wabc_util::index_vec::IndexVec;

#[quickcheck]
fn push_then_index_round_trips(values: Vec<i32>) -> bool {
    let mut vec: IndexVec<usize, i32> = IndexVec::new();
    let ids: Vec<_> = values.iter().map(|&v| vec.push(v)).collect();
    ids.iter().zip(&values).all(|(&id, &v)| vec[id] == v)
}

#[quickcheck]
fn len_matches_push_count(values: Vec<i32>) -> bool {
    let mut vec: IndexVec<usize, i32> = IndexVec::new();
    for v in &values {
        vec.push(*v);
    }
    vec.len() == values.len()
}

#[quickcheck]
fn as_slice_matches_source_order(values: Vec<i32>) -> bool {
    let mut vec: IndexVec<usize, i32> = IndexVec::new();
    for v in &values {
        vec.push(*v);
    }
    vec.as_slice() == values.as_slice()
}

#[quickcheck]
fn clear_always_empties(values: Vec<i32>) -> bool {
    let mut vec: IndexVec<usize, i32> = IndexVec::new();
    for v in &values {
        vec.push(*v);
    }
    vec.clear();
    vec.is_empty() && vec.len() == 0
}
