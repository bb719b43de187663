//! Failure-path behavior with instrumented elements.
//!
//! Every scenario ends with the ledger balanced: each probe built was
//! dropped exactly once, whether the failing build returned `Err` or
//! panicked.

use dynarr::{AllocError, ArrayError, DynArray, TryClone};
use dynarr_test_utils::fixtures::{fails_after_42, fails_always};
use dynarr_test_utils::{catch_panic, Failure, Ledger, Probe, ProbeError};

fn probes(ledger: &Ledger, count: usize) -> DynArray<Probe> {
    DynArray::try_from_fn(count, |i| ledger.make(i as u64)).unwrap()
}

fn values(arr: &DynArray<Probe>) -> Vec<u64> {
    arr.iter().map(Probe::value).collect()
}

// ── Reservation ─────────────────────────────────────────────────

#[test]
fn failed_reserve_is_a_no_op() {
    let ledger = Ledger::new();
    let mut arr = probes(&ledger, 3);
    let (ptr, len, cap) = (arr.as_ptr(), arr.len(), arr.capacity());

    let err = arr.try_reserve(usize::MAX).unwrap_err();
    assert!(matches!(err, AllocError::CapacityOverflow { .. }));

    assert_eq!(arr.as_ptr(), ptr);
    assert_eq!(arr.len(), len);
    assert_eq!(arr.capacity(), cap);
    assert_eq!(values(&arr), [0, 1, 2]);
    assert_eq!(ledger.live(), 3);

    drop(arr);
    ledger.assert_balanced();
}

#[test]
#[should_panic(expected = "capacity overflow")]
fn infallible_reserve_panics_on_overflow() {
    let mut arr: DynArray<u64> = DynArray::new();
    arr.reserve(usize::MAX);
}

// ── Growth-triggered append ─────────────────────────────────────

#[test]
fn failed_clone_on_growth_keeps_old_block() {
    let ledger = Ledger::new();
    let mut arr = probes(&ledger, 4);
    assert_eq!(arr.len(), arr.capacity());
    let seed = ledger.make(99).unwrap();
    let (ptr, cap) = (arr.as_ptr(), arr.capacity());

    ledger.arm(0, Failure::Error);
    let err = arr.push_cloned(&seed).unwrap_err();
    assert!(matches!(err, ArrayError::Element(ProbeError { .. })));

    assert_eq!(arr.as_ptr(), ptr);
    assert_eq!(arr.capacity(), cap);
    assert_eq!(values(&arr), [0, 1, 2, 3]);
    assert_eq!(ledger.live(), 5);

    drop(arr);
    drop(seed);
    ledger.assert_balanced();
}

#[test]
fn failed_constructor_on_growth_keeps_old_block() {
    let ledger = Ledger::new();
    let mut arr = probes(&ledger, 2);
    let (ptr, cap) = (arr.as_ptr(), arr.capacity());

    ledger.arm(0, Failure::Error);
    assert!(arr.try_push_with(|| ledger.make(7)).is_err());

    assert_eq!(arr.as_ptr(), ptr);
    assert_eq!(arr.capacity(), cap);
    assert_eq!(values(&arr), [0, 1]);

    drop(arr);
    ledger.assert_balanced();
}

#[test]
fn panicking_clone_on_growth_keeps_old_block() {
    let ledger = Ledger::new();
    let mut arr = probes(&ledger, 4);
    let seed = ledger.make(99).unwrap();
    let (ptr, cap) = (arr.as_ptr(), arr.capacity());

    ledger.arm(0, Failure::Panic);
    assert!(catch_panic(|| arr.push_cloned(&seed)).is_none());

    assert_eq!(arr.as_ptr(), ptr);
    assert_eq!(arr.capacity(), cap);
    assert_eq!(values(&arr), [0, 1, 2, 3]);

    ledger.disarm();
    arr.push_cloned(&seed).unwrap();
    assert_eq!(arr.len(), 5);

    drop(arr);
    drop(seed);
    ledger.assert_balanced();
}

#[test]
fn failed_append_into_spare_capacity_changes_nothing() {
    let ledger = Ledger::new();
    let mut arr: DynArray<Probe> = DynArray::with_capacity(8);
    arr.try_push_with(|| ledger.make(1)).unwrap();

    ledger.arm(0, Failure::Error);
    assert!(arr.try_push_with(|| ledger.make(2)).is_err());
    assert_eq!(values(&arr), [1]);
    assert_eq!(arr.capacity(), 8);

    drop(arr);
    ledger.assert_balanced();
}

// ── Bounded and total failure ───────────────────────────────────

#[test]
fn appends_stop_at_the_42nd_build() {
    let ledger = fails_after_42();
    let mut arr = DynArray::new();
    let mut failures = 0;
    for i in 0..100u64 {
        match arr.try_push_with(|| ledger.make(i)) {
            Ok(()) => {}
            Err(ArrayError::Element(err)) => {
                assert_eq!(err.builds, 42);
                failures += 1;
            }
            Err(other) => panic!("unexpected failure: {other}"),
        }
    }

    assert_eq!(arr.len(), 42);
    assert_eq!(failures, 58);
    assert!(values(&arr).iter().copied().eq(0..42u64));

    drop(arr);
    ledger.assert_balanced();
}

#[test]
fn always_failing_construction_produces_nothing() {
    let ledger = fails_always();
    let result = DynArray::try_from_fn(100, |i| ledger.make(i as u64));
    assert!(matches!(result, Err(ArrayError::Element(_))));
    assert_eq!(ledger.builds(), 0);
    ledger.assert_balanced();
}

#[test]
fn construction_failing_midway_drops_the_prefix() {
    let ledger = Ledger::failing_after(10);
    let result = DynArray::try_from_fn(100, |i| ledger.make(i as u64));
    assert!(result.is_err());
    assert_eq!(ledger.constructed(), 10);
    ledger.assert_balanced();
}

#[test]
fn construction_panicking_midway_drops_the_prefix() {
    let ledger = Ledger::panicking_after(10);
    let result = catch_panic(|| DynArray::try_from_fn(100, |i| ledger.make(i as u64)));
    assert!(result.is_none());
    assert_eq!(ledger.constructed(), 10);
    ledger.assert_balanced();
}

#[test]
fn repeated_value_construction_failing_midway() {
    let ledger = Ledger::new();
    let seed = ledger.make(5).unwrap();
    ledger.arm(3, Failure::Error);
    let err = DynArray::try_from_elem(10, &seed).unwrap_err();
    assert_eq!(err.element().map(|e| e.builds), Some(4));
    assert_eq!(ledger.live(), 1);

    drop(seed);
    ledger.assert_balanced();
}

// ── Copies ──────────────────────────────────────────────────────

#[test]
fn failed_copy_leaves_source_intact() {
    let ledger = Ledger::new();
    let arr = probes(&ledger, 20);
    ledger.arm(5, Failure::Error);

    assert!(arr.try_clone().is_err());
    assert_eq!(ledger.live(), 20);
    assert_eq!(values(&arr), (0..20).collect::<Vec<u64>>());

    ledger.disarm();
    let copy = arr.try_clone().unwrap();
    assert_eq!(values(&copy), values(&arr));
    assert_eq!(copy.capacity(), copy.len());

    drop(arr);
    drop(copy);
    ledger.assert_balanced();
}

#[test]
fn failed_copy_assignment_leaves_destination_empty() {
    let ledger = Ledger::new();
    let mut dst = probes(&ledger, 3);
    let src = probes(&ledger, 10);

    ledger.arm(4, Failure::Error);
    assert!(dst.try_clone_from(&src).is_err());

    assert!(dst.is_empty());
    assert!(dst.capacity() >= src.len());
    assert_eq!(ledger.live(), 10);

    ledger.disarm();
    dst.try_clone_from(&src).unwrap();
    assert_eq!(values(&dst), values(&src));

    drop(dst);
    drop(src);
    ledger.assert_balanced();
}

#[test]
fn panicking_copy_assignment_leaves_destination_empty() {
    let ledger = Ledger::new();
    let mut dst = probes(&ledger, 3);
    let src = probes(&ledger, 10);

    ledger.arm(4, Failure::Panic);
    assert!(catch_panic(|| dst.try_clone_from(&src)).is_none());
    assert!(dst.is_empty());
    assert_eq!(ledger.live(), 10);

    drop(dst);
    drop(src);
    ledger.assert_balanced();
}

#[test]
fn panicking_clone_from_leaves_destination_empty() {
    #[derive(Debug)]
    struct Fragile(u32);

    impl Clone for Fragile {
        fn clone(&self) -> Self {
            if self.0 == 3 {
                panic!("clone of Fragile(3) refused");
            }
            Fragile(self.0)
        }
    }

    let src: DynArray<Fragile> = (0..6).map(Fragile).collect();
    let mut dst: DynArray<Fragile> = (10..12).map(Fragile).collect();

    assert!(catch_panic(|| dst.clone_from(&src)).is_none());
    assert!(dst.is_empty());
    assert_eq!(src.len(), 6);
}

// ── Resize and extend ───────────────────────────────────────────

#[test]
fn failed_resize_keeps_appended_elements() {
    let ledger = Ledger::new();
    let mut arr = probes(&ledger, 2);
    let seed = ledger.make(9).unwrap();

    ledger.arm(3, Failure::Error);
    assert!(arr.try_resize(10, &seed).is_err());
    assert_eq!(values(&arr), [0, 1, 9, 9, 9]);
    assert_eq!(arr.capacity(), 10);

    arr.try_resize(1, &seed).unwrap();
    assert_eq!(values(&arr), [0]);

    drop(arr);
    drop(seed);
    ledger.assert_balanced();
}

#[test]
fn failed_extend_keeps_appended_elements() {
    let ledger = Ledger::new();
    let mut arr = probes(&ledger, 1);
    let extra = probes(&ledger, 4);

    ledger.arm(2, Failure::Error);
    assert!(arr.try_extend_from_slice(&extra).is_err());
    assert_eq!(values(&arr), [0, 0, 1]);

    drop(arr);
    drop(extra);
    ledger.assert_balanced();
}

#[test]
fn failed_resize_reservation_leaves_array_unchanged() {
    let mut arr = DynArray::from([1u32, 2, 3]);
    let err = arr.try_resize(usize::MAX, &0).unwrap_err();
    assert!(matches!(err, ArrayError::Alloc(AllocError::CapacityOverflow { .. })));
    assert_eq!(arr, [1, 2, 3]);
}

// ── Teardown ────────────────────────────────────────────────────

#[test]
fn partially_consumed_iterator_drops_the_rest() {
    let ledger = Ledger::new();
    let arr = probes(&ledger, 6);
    let mut iter = arr.into_iter();
    let first = iter.next().unwrap();
    let last = iter.next_back().unwrap();
    assert_eq!((first.value(), last.value()), (0, 5));
    drop(iter);
    assert_eq!(ledger.live(), 2);

    drop(first);
    drop(last);
    ledger.assert_balanced();
}

#[test]
fn clear_truncate_and_pop_drop_exactly_once() {
    let ledger = Ledger::new();
    let mut arr = probes(&ledger, 8);
    arr.truncate(5);
    assert_eq!(ledger.dropped(), 3);
    let popped = arr.pop().unwrap();
    assert_eq!(popped.value(), 4);
    assert_eq!(ledger.dropped(), 3);
    arr.clear();
    assert_eq!(ledger.dropped(), 7);
    drop(popped);
    drop(arr);
    ledger.assert_balanced();
}

#[test]
fn probes_copy_through_try_clone_only() {
    let ledger = Ledger::new();
    let probe = ledger.make(3).unwrap();
    let copy = probe.try_clone().unwrap();
    assert_eq!(copy, 3u64);
    drop((probe, copy));
    ledger.assert_balanced();
}
