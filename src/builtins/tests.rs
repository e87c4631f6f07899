//! Tests for range, length and the iteration utilities

use super::*;
use crate::errors::ErrorKind;
use crate::objects::{PyObject, Value};

fn collect(r: Range) -> Vec<i64> {
    r.iter().collect()
}

#[test]
fn test_range_basic() {
    let r = range(0, 5, 1).unwrap();
    let mut it = r.iter();
    assert_eq!(it.next(), Some(0));
    assert_eq!(it.next(), Some(1));
    assert_eq!(it.next(), Some(2));
    assert_eq!(it.next(), Some(3));
    assert_eq!(it.next(), Some(4));
    assert_eq!(it.next(), None);
    assert_eq!(it.next(), None);
}

#[test]
fn test_range_step() {
    assert_eq!(collect(range(0, 10, 2).unwrap()), vec![0, 2, 4, 6, 8]);
    assert_eq!(collect(range(-20, 20, 10).unwrap()), vec![-20, -10, 0, 10]);
    assert_eq!(collect(range(5, 10, 5).unwrap()), vec![5]);
    assert_eq!(collect(range(0, 10, 10).unwrap()), vec![0]);
}

#[test]
fn test_range_negative_step() {
    assert_eq!(collect(range(-4, -10, -2).unwrap()), vec![-4, -6, -8]);
    assert_eq!(collect(range(10, -10, -5).unwrap()), vec![10, 5, 0, -5]);
}

#[test]
fn test_range_empty() {
    for (start, stop, step) in [(0, 0, 10), (10, 10, 1), (12, 10, 2), (5, -5, 1), (0, -1000, 20)] {
        let r = range(start, stop, step).unwrap();
        assert!(r.is_empty());
        assert_eq!(r.iter().next(), None);
    }
}

#[test]
fn test_range_clamps_stop() {
    let r = range(0, -1000, 20).unwrap();
    assert_eq!(r.stop(), 0);
    let r = range(0, 100, -2).unwrap();
    assert_eq!(r.stop(), 0);
    let r = range(40, -40, -2).unwrap();
    assert_eq!(r.stop(), -40);
}

#[test]
fn test_range_len() {
    assert_eq!(range(0, 100, 1).unwrap().len(), 100);
    assert_eq!(range(40, -40, -2).unwrap().len(), 40);
    assert_eq!(range(0, 100, -2).unwrap().len(), 0);
    assert_eq!(range(0, 10, 3).unwrap().len(), 4);
    assert_eq!(len_of(&range(0, 20, 2).unwrap()), 10);
}

#[test]
fn test_range_extremes() {
    let r = range(i64::MIN, i64::MAX, 1).unwrap();
    assert_eq!(r.len() as u128, u64::MAX as u128);

    let r = range(i64::MAX - 1, i64::MAX, 7).unwrap();
    assert_eq!(collect(r), vec![i64::MAX - 1]);

    let r = range(i64::MIN, i64::MAX, i64::MAX).unwrap();
    assert_eq!(collect(r), vec![i64::MIN, -1, i64::MAX - 1]);
}

#[test]
fn test_range_zero_step() {
    let err = range(1, 2, 0).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidArgumentValue);
    assert_eq!(err.message, "range() arg 3 must not be zero");
}

#[test]
fn test_range_short_forms() {
    let r = Range::to(10);
    assert_eq!((r.start(), r.stop(), r.step()), (0, 10, 1));
    let r = Range::between(10, 20);
    assert_eq!((r.start(), r.step(), r.len()), (10, 1, 10));
    assert!(Range::between(5, 1).is_empty());
}

#[test]
fn test_range_count() {
    let r = Range::between(0, 100);
    assert_eq!(r.count(-1), 0);
    assert_eq!(r.count(0), 1);
    assert_eq!(r.count(1), 1);
    assert_eq!(r.count(99), 1);
    assert_eq!(r.count(100), 0);

    let r = range(0, 100, 2).unwrap();
    assert_eq!(r.count(1), 0);
    assert_eq!(r.count(2), 1);
    assert_eq!(r.count(98), 1);
    assert_eq!(r.count(99), 0);

    let r = range(0, 100, 3).unwrap();
    assert_eq!(r.count(0), 1);
    assert_eq!(r.count(1), 0);
    assert_eq!(r.count(2), 0);
    assert_eq!(r.count(3), 1);
}

#[test]
fn test_range_count_negative_step() {
    let r = range(15, -15, -3).unwrap();
    assert_eq!(r.count(15), 1);
    assert_eq!(r.count(14), 0);
    assert_eq!(r.count(13), 0);
    assert_eq!(r.count(12), 1);
    assert_eq!(r.count(0), 1);
    assert_eq!(r.count(-3), 1);
    assert_eq!(r.count(-15), 0);
    assert!(r.contains(-12));
    assert!(!r.contains(18));
}

#[test]
fn test_range_is_restartable() {
    let r = range(1, 10, 2).unwrap();
    let first: Vec<_> = r.iter().collect();
    let second: Vec<_> = (&r).into_iter().collect();
    assert_eq!(first, vec![1, 3, 5, 7, 9]);
    assert_eq!(first, second);

    // Interleaved cursors do not share state
    let mut a = r.iter();
    let mut b = r.iter();
    assert_eq!(a.next(), Some(1));
    assert_eq!(a.next(), Some(3));
    assert_eq!(b.next(), Some(1));
    assert_eq!(r.start(), 1);
}

#[test]
fn test_range_double_ended() {
    let r = range(0, 5, 1).unwrap();
    let mut it = r.iter();
    assert_eq!(it.next(), Some(0));
    assert_eq!(it.next_back(), Some(4));
    assert_eq!(it.next(), Some(1));
    assert_eq!(it.next_back(), Some(3));
    assert_eq!(it.len(), 1);
    assert_eq!(it.next(), Some(2));
    assert_eq!(it.next(), None);
    assert_eq!(it.next_back(), None);

    let reversed: Vec<_> = range(10, -10, -5).unwrap().iter().rev().collect();
    assert_eq!(reversed, vec![-5, 0, 5, 10]);
}

#[test]
fn test_range_repr() {
    assert_eq!(Range::to(10).to_string(), "range(0, 10)");
    assert_eq!(range(0, 10, 2).unwrap().to_string(), "range(0, 10, 2)");
    assert_eq!(range(0, 100, -2).unwrap().to_string(), "range(0, 0, -2)");
}

#[test]
fn test_len_values() {
    assert_eq!(len(&Value::from("hello")).unwrap(), 5);
    assert_eq!(len(&Value::from("💩")).unwrap(), 1);
    assert_eq!(len(&Value::list([Value::None])).unwrap(), 1);
    assert_eq!(len(&Value::Range(range(0, 20, 2).unwrap())).unwrap(), 10);

    let err = len(&Value::from(true)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidArgumentType);
    assert_eq!(err.message, "object of type 'bool' has no len()");
    let err = len(&Value::None).unwrap_err();
    assert_eq!(err.message, "object of type 'NoneType' has no len()");
}

#[test]
fn test_len_slices() {
    let arr = [1, 2, 3, 4, 5];
    assert_eq!(len_of(&arr[..]), 5);
    assert_eq!(len_of(&arr[..3]), 3);
    assert_eq!(len_of(&arr), 5);
    assert_eq!(len_of(""), 0);
}

#[test]
fn test_iter_values() {
    let items: Vec<_> = iter(&Value::list([Value::from(1), Value::from(2)])).unwrap().collect();
    assert_eq!(items, vec![Value::from(1), Value::from(2)]);

    let chars: Vec<_> = iter("a💩").unwrap().collect();
    assert_eq!(chars, vec![Value::from("a"), Value::from("💩")]);

    let ints: Vec<_> = iter(&range(0, 3, 1).unwrap()).unwrap().collect();
    assert_eq!(ints, vec![Value::Int(0), Value::Int(1), Value::Int(2)]);
}

#[test]
fn test_iter_not_iterable() {
    let err = iter(&Value::from(5)).err().unwrap();
    assert_eq!(err.kind, ErrorKind::InvalidArgumentType);
    assert_eq!(err.message, "'int' object is not iterable");

    let err = iter(&Value::None).err().unwrap();
    assert_eq!(err.message, "'NoneType' object is not iterable");

    let err = list(&1.5f64).unwrap_err();
    assert_eq!(err.message, "'float' object is not iterable");
}

#[test]
fn test_list() {
    assert_eq!(
        list(&range(0, 10, 2).unwrap()).unwrap(),
        vec![Value::Int(0), Value::Int(2), Value::Int(4), Value::Int(6), Value::Int(8)]
    );
    assert_eq!(
        list("hallo").unwrap(),
        ["h", "a", "l", "l", "o"].map(Value::from).to_vec()
    );
}

#[test]
fn test_generator_is_reiterable() {
    let gen = Value::object(Generator::new(|| ["a", "b", "c"].into_iter().map(Value::from)));
    assert_eq!(gen.type_name(), "generator");
    assert_eq!(list(&gen).unwrap().len(), 3);
    assert_eq!(list(&gen).unwrap(), ["a", "b", "c"].map(Value::from).to_vec());
}

#[test]
fn test_zip_stops_at_shortest() {
    let rows: Vec<_> = zip([vec![1, 2, 3], vec![4, 5]]).collect();
    assert_eq!(rows, vec![vec![1, 4], vec![2, 5]]);

    let zipped: Vec<_> = zip_values(&[
        Value::list([Value::from(1), Value::from(2), Value::from(3)]),
        Value::list([Value::from("a"), Value::from("b")]),
    ])
    .unwrap()
    .collect();
    assert_eq!(
        zipped,
        vec![
            Value::tuple([Value::from(1), Value::from("a")]),
            Value::tuple([Value::from(2), Value::from("b")]),
        ]
    );
}

#[test]
fn test_zip_edge_cases() {
    let none: Vec<Vec<i64>> = zip(Vec::<Vec<i64>>::new()).collect();
    assert!(none.is_empty());

    let single: Vec<_> = zip([vec![1, 2]]).collect();
    assert_eq!(single, vec![vec![1], vec![2]]);

    let empty: Vec<_> = zip([vec![], vec![1]]).collect();
    assert!(empty.is_empty());

    let three: Vec<_> = zip([range(0, 10, 1).unwrap(), Range::to(3), range(5, 0, -1).unwrap()]).collect();
    assert_eq!(three, vec![vec![0, 0, 5], vec![1, 1, 4], vec![2, 2, 3]]);
}

#[test]
fn test_zip_size_hint() {
    let z = zip([Range::to(10), Range::to(4)]);
    assert_eq!(z.size_hint(), (4, Some(4)));
    let z = zip(Vec::<Range>::new());
    assert_eq!(z.size_hint(), (0, Some(0)));
}

#[test]
fn test_zip_values_rejects_non_iterables() {
    let err = zip_values(&[Value::list([]), Value::from(3)]).err().unwrap();
    assert_eq!(err.message, "'int' object is not iterable");
}

#[test]
fn test_enumerate_offset() {
    let pairs: Vec<_> = enumerate(["a", "b", "c"], -1).collect();
    assert_eq!(pairs, vec![(-1, "a"), (0, "b"), (1, "c")]);

    let pairs: Vec<_> = enumerate(iter("ab").unwrap(), 0).collect();
    assert_eq!(pairs, vec![(0, Value::from("a")), (1, Value::from("b"))]);

    let pairs: Vec<_> = enumerate(range(10, 0, -5).unwrap(), 100).collect();
    assert_eq!(pairs, vec![(100, 10), (101, 5)]);
}

#[test]
fn test_sum() {
    let ints = Value::list([Value::from(1), Value::from(2), Value::from(3)]);
    assert_eq!(sum(&ints, Value::Int(0)).unwrap(), Value::Int(6));
    assert_eq!(sum(&ints, Value::Int(10)).unwrap(), Value::Int(16));
    assert_eq!(sum(&range(0, 10, 2).unwrap(), Value::Int(0)).unwrap(), Value::Int(20));

    let mixed = Value::list([Value::from(1), Value::from(0.5)]);
    assert_eq!(sum(&mixed, Value::Int(0)).unwrap(), Value::Float(1.5));

    let err = sum(&Value::list([Value::from("a")]), Value::Int(0)).unwrap_err();
    assert_eq!(err.message, "unsupported operand type(s) for +: 'int' and 'str'");

    let big = Value::list([Value::from(i64::MAX), Value::from(1)]);
    assert!(sum(&big, Value::Int(0)).unwrap_err().is(ErrorKind::Overflow));
}

#[test]
fn test_range_count_at_extremes() {
    let r = range(i64::MIN, i64::MAX, 1).unwrap();
    assert_eq!(r.len_u64(), u64::MAX);
    assert_eq!(r.count(i64::MIN), 1);
    assert_eq!(r.count(i64::MAX - 1), 1);
    assert_eq!(r.count(i64::MAX), 0);

    let r = range(i64::MIN, i64::MAX, 2).unwrap();
    assert_eq!(r.len_u64(), 1u64 << 63);
    assert!(r.contains(i64::MAX - 1));
    assert!(!r.contains(i64::MAX - 2));
    assert_eq!(r.iter().next_back(), Some(i64::MAX - 1));

    let r = Range::between(i64::MIN, i64::MAX);
    assert_eq!(r.len_u64(), u64::MAX);
    assert_eq!(len(&Value::Range(r)).unwrap() as u64, u64::MAX);
}

#[test]
fn test_enumerate_stops_at_index_limit() {
    let mut pairs = enumerate(["a", "b", "c"], i64::MAX - 1);
    assert_eq!(pairs.size_hint(), (2, Some(2)));
    assert_eq!(pairs.next(), Some((i64::MAX - 1, "a")));
    assert_eq!(pairs.next(), Some((i64::MAX, "b")));
    assert_eq!(pairs.next(), None);
    assert!(pairs.is_index_exhausted());
    assert_eq!(pairs.size_hint(), (0, Some(0)));
    // The unindexed item is still in the input
    assert_eq!(pairs.into_inner().next(), Some("c"));

    let mut exact = enumerate(["a"], i64::MAX);
    assert_eq!(exact.next(), Some((i64::MAX, "a")));
    assert_eq!(exact.next(), None);
    assert!(exact.into_inner().next().is_none());
}

/// Yields `Some` again after its first `None`
struct Flicker {
    calls: u32,
}

impl Iterator for Flicker {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        self.calls += 1;
        if self.calls == 2 {
            None
        } else {
            Some(self.calls)
        }
    }
}

#[test]
fn test_zip_stays_exhausted() {
    let cursors: Vec<Box<dyn Iterator<Item = u32>>> =
        vec![Box::new(Flicker { calls: 0 }), Box::new(10u32..20)];
    let mut z = zip(cursors);

    assert_eq!(z.next(), Some(vec![1, 10]));
    assert_eq!(z.next(), None);
    assert_eq!(z.next(), None);
    assert_eq!(z.size_hint(), (0, Some(0)));
}
