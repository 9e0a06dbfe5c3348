//! Integration test: `GrowableArray` against `Vec` as a reference model.
//!
//! Random operation sequences are applied to both containers and the
//! contents compared after every step.

use advec_array::GrowableArray;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Push(i32),
    Pop,
    Insert(usize, i32),
    Erase(usize),
    Resize(usize),
    Reserve(usize),
    Truncate(usize),
    Extend(Vec<i32>),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::Push),
        1 => Just(Op::Pop),
        3 => (any::<usize>(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        2 => any::<usize>().prop_map(Op::Erase),
        1 => (0usize..40).prop_map(Op::Resize),
        1 => (0usize..64).prop_map(Op::Reserve),
        1 => (0usize..40).prop_map(Op::Truncate),
        1 => proptest::collection::vec(any::<i32>(), 0..8).prop_map(Op::Extend),
        1 => Just(Op::Clear),
    ]
}

fn apply(array: &mut GrowableArray<i32>, model: &mut Vec<i32>, op: &Op) {
    match op {
        Op::Push(v) => {
            array.push(*v).unwrap();
            model.push(*v);
        }
        Op::Pop => assert_eq!(array.pop(), model.pop()),
        Op::Insert(i, v) => {
            let at = i % (model.len() + 1);
            array.insert(at, *v).unwrap();
            model.insert(at, *v);
        }
        Op::Erase(i) => {
            if !model.is_empty() {
                let at = i % model.len();
                assert_eq!(array.erase(at), at);
                model.remove(at);
            }
        }
        Op::Resize(n) => {
            array.resize(*n).unwrap();
            model.resize(*n, 0);
        }
        Op::Reserve(n) => {
            array.reserve(*n).unwrap();
            assert!(array.capacity() >= *n);
        }
        Op::Truncate(n) => {
            array.truncate(*n);
            model.truncate(*n);
        }
        Op::Extend(values) => {
            array.extend_from_slice(values).unwrap();
            model.extend_from_slice(values);
        }
        Op::Clear => {
            array.clear();
            model.clear();
        }
    }
}

#[test]
fn append_insert_erase_resize_walkthrough() {
    let mut array = GrowableArray::new();
    for v in [1, 2, 3] {
        array.push(v).unwrap();
    }
    assert_eq!(array.len(), 3);
    assert!(array.capacity() >= 3);
    assert_eq!(array, [1, 2, 3]);

    array.insert(1, 99).unwrap();
    assert_eq!(array, [1, 99, 2, 3]);

    array.erase(0);
    assert_eq!(array, [99, 2, 3]);

    array.resize(5).unwrap();
    assert_eq!(array, [99, 2, 3, 0, 0]);

    array.resize(1).unwrap();
    assert_eq!(array, [99]);
}

proptest! {
    #[test]
    fn matches_vec(ops in proptest::collection::vec(op(), 0..200)) {
        let mut array = GrowableArray::new();
        let mut model = Vec::new();
        let mut capacity = 0;
        for op in &ops {
            apply(&mut array, &mut model, op);
            prop_assert_eq!(array.as_slice(), model.as_slice());
            prop_assert!(array.capacity() >= array.len());
            prop_assert!(array.capacity() >= capacity);
            capacity = array.capacity();
        }
    }

    #[test]
    fn insert_then_erase_is_identity(
        values in proptest::collection::vec(any::<i64>(), 0..50),
        position in any::<usize>(),
        inserted in any::<i64>(),
    ) {
        let mut array = GrowableArray::from_slice(&values).unwrap();
        let at = position % (values.len() + 1);
        array.insert(at, inserted).unwrap();
        prop_assert_eq!(array[at], inserted);
        array.erase(at);
        prop_assert_eq!(array.as_slice(), values.as_slice());
    }

    #[test]
    fn push_count_and_capacity(n in 0usize..500) {
        let mut array = GrowableArray::new();
        for i in 0..n {
            array.push(i).unwrap();
        }
        prop_assert_eq!(array.len(), n);
        prop_assert!(array.capacity() >= n);
        prop_assert!(array.capacity() <= (2 * n).max(1));
        prop_assert!(array.iter().copied().eq(0..n));
    }
}
