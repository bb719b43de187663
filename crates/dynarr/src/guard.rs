//! Drop guards that keep partially built storage consistent.
//!
//! Two situations build elements one at a time and must survive a failing
//! (or panicking) constructor halfway through:
//!
//! - [`PartialBlock`]: filling a fresh block that nobody else owns yet
//!   (construction, copy construction). On failure every element built so
//!   far is dropped and the block is freed, so no container escapes.
//! - [`TailFill`]: appending into spare capacity of a live array. In the
//!   default mode (resize, extend) the elements already built stay live on
//!   failure and the array's length is updated to cover exactly them. In
//!   all-or-nothing mode (copy assignment) they are dropped instead unless
//!   the fill was committed.

#![allow(unsafe_code)]

use std::mem;
use std::ptr;

use dynarr_core::AllocError;

use crate::raw::RawBuf;

/// A fresh block being filled front to back.
pub(crate) struct PartialBlock<T> {
    buf: RawBuf<T>,
    filled: usize,
}

impl<T> PartialBlock<T> {
    pub(crate) fn allocate(capacity: usize) -> Result<Self, AllocError> {
        Ok(Self {
            buf: RawBuf::try_allocate(capacity)?,
            filled: 0,
        })
    }

    pub(crate) fn push(&mut self, value: T) {
        // Callers allocate the block for exactly the number of pushes they make.
        debug_assert!(self.filled < self.buf.capacity());
        // SAFETY: `filled < capacity`, and the slot has not been written yet.
        unsafe { self.buf.slot(self.filled).write(value) };
        self.filled += 1;
    }

    /// Disarm the guard, handing over the block and its live prefix length.
    pub(crate) fn finish(mut self) -> (RawBuf<T>, usize) {
        let buf = mem::replace(&mut self.buf, RawBuf::new());
        let filled = mem::replace(&mut self.filled, 0);
        (buf, filled)
    }
}

impl<T> Drop for PartialBlock<T> {
    fn drop(&mut self) {
        if self.filled == 0 {
            return;
        }
        #[cfg(debug_assertions)]
        if std::thread::panicking() {
            eprintln!(
                "dynarr: element constructor panicked, unwinding {}/{} built slots",
                self.filled,
                self.buf.capacity(),
            );
        }
        // SAFETY: exactly slots `0..filled` were written by `push`. The block
        // itself is released by `RawBuf::drop` right after.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.as_ptr(),
                self.filled,
            ));
        }
    }
}

/// Appends into the spare capacity of a live array.
///
/// Holds the array's length field and writes the final count back when
/// dropped. A fill opened with [`all_or_nothing`](Self::all_or_nothing)
/// instead drops everything it wrote, unless [`commit`](Self::commit) was
/// called first.
pub(crate) struct TailFill<'a, T> {
    buf: &'a RawBuf<T>,
    len: &'a mut usize,
    start: usize,
    local: usize,
    keep_partial: bool,
}

impl<'a, T> TailFill<'a, T> {
    pub(crate) fn new(buf: &'a RawBuf<T>, len: &'a mut usize) -> Self {
        let start = *len;
        Self {
            buf,
            len,
            start,
            local: start,
            keep_partial: true,
        }
    }

    /// A fill whose writes are rolled back on drop unless committed.
    pub(crate) fn all_or_nothing(buf: &'a RawBuf<T>, len: &'a mut usize) -> Self {
        let mut fill = Self::new(buf, len);
        fill.keep_partial = false;
        fill
    }

    pub(crate) fn len(&self) -> usize {
        self.local
    }

    pub(crate) fn write(&mut self, value: T) {
        // Callers reserve the full target length before filling.
        debug_assert!(self.local < self.buf.capacity());
        // SAFETY: `local < capacity` and slots at or past the array's length
        // are uninitialized.
        unsafe { self.buf.slot(self.local).write(value) };
        self.local += 1;
    }

    /// Keep everything written so far.
    pub(crate) fn commit(mut self) {
        self.keep_partial = true;
    }
}

impl<T> Drop for TailFill<'_, T> {
    fn drop(&mut self) {
        if self.keep_partial {
            *self.len = self.local;
            return;
        }
        // Length first, so a panicking destructor cannot expose dropped slots.
        *self.len = self.start;
        // SAFETY: slots `start..local` were written by `write` and are not
        // counted by the array.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.slot(self.start),
                self.local - self.start,
            ));
        }
    }
}
