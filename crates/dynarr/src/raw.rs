//! Owned blocks of uninitialized element slots.
//!
//! [`RawBuf`] owns an allocation sized in element units and nothing else:
//! it never constructs or drops a `T`. Which slots are live is tracked by
//! the owner (`DynArray`, `IntoIter`, the fill guards). Dropping a `RawBuf`
//! only releases the memory.
//!
//! Zero-sized element types never touch the allocator; their capacity is
//! tracked logically and the pointer stays dangling.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use dynarr_core::AllocError;

pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

impl<T> RawBuf<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// An unallocated buffer with zero capacity.
    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Allocate exactly `capacity` uninitialized slots.
    ///
    /// `capacity == 0` returns an unallocated buffer without calling the
    /// allocator.
    pub(crate) fn try_allocate(capacity: usize) -> Result<Self, AllocError> {
        if capacity == 0 {
            return Ok(Self::new());
        }
        if Self::IS_ZST {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap: capacity,
                _marker: PhantomData,
            });
        }

        let layout = Self::layout_for(capacity)?;
        // SAFETY: `T` is not zero-sized and `capacity > 0`, so the layout has
        // a non-zero size.
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(AllocError::OutOfMemory { layout })?;
        Ok(Self {
            ptr,
            cap: capacity,
            _marker: PhantomData,
        })
    }

    fn layout_for(capacity: usize) -> Result<Layout, AllocError> {
        Layout::array::<T>(capacity).map_err(|_| AllocError::CapacityOverflow {
            requested: capacity,
        })
    }

    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    pub(crate) fn is_allocated(&self) -> bool {
        self.cap != 0
    }

    /// Base pointer. Dangling (but non-null and aligned) when unallocated.
    pub(crate) fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Pointer to slot `index`.
    ///
    /// # Safety
    ///
    /// `index <= self.capacity()`.
    pub(crate) unsafe fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index <= self.cap);
        // SAFETY: in bounds of the allocation (or one past it) per the
        // caller's contract; zero-sized offsets are always fine.
        unsafe { self.ptr.as_ptr().add(index) }
    }

    /// Move the first `count` elements of `self` into the first `count`
    /// slots of `dst`.
    ///
    /// Afterwards those slots of `self` are logically uninitialized: the
    /// caller must not drop them again.
    ///
    /// # Safety
    ///
    /// Slots `0..count` of `self` are live, slots `0..count` of `dst` are
    /// uninitialized, and `count` fits both capacities.
    pub(crate) unsafe fn relocate_into(&self, dst: &mut RawBuf<T>, count: usize) {
        debug_assert!(count <= self.cap && count <= dst.cap);
        // SAFETY: distinct allocations never overlap; bounds per contract.
        unsafe { ptr::copy_nonoverlapping(self.as_ptr(), dst.as_ptr(), count) };
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if self.cap == 0 || Self::IS_ZST {
            return;
        }
        // SAFETY: the same layout was computed successfully when the block
        // was allocated, and `ptr` came from `alloc::alloc` with it.
        unsafe {
            let layout =
                Layout::from_size_align_unchecked(mem::size_of::<T>() * self.cap, mem::align_of::<T>());
            alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout);
        }
    }
}
