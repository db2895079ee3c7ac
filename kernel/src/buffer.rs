use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr::{self, NonNull};

use thiserror::Error;

/// Default alignment of an [`AlignedBuffer`] is `2^DEFAULT_ALIGN_LOG = 32` bytes.
pub const DEFAULT_ALIGN_LOG: u32 = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    #[error("invalid layout: {len} elements aligned to 2^{align_log} bytes overflows usize")]
    LayoutOverflow { len: usize, align_log: u32 },
    #[error("memory allocation failed: size={size} align={align}")]
    OutOfMemory { size: usize, align: usize },
}

/// Fixed-size owned storage for `len` values of `D` whose first element sits
/// on a `2^align_log` byte boundary.
///
/// The raw region is over-allocated by `2^align_log - 1` bytes and the view
/// starts at the first aligned address inside it. The region is released
/// exactly once, on drop. There is no resize.
pub struct AlignedBuffer<D> {
    mem: NonNull<u8>,
    layout: Layout,
    offset: usize,
    len: usize,
    align_log: u32,
    _phantom: PhantomData<D>,
}

unsafe impl<D: Send> Send for AlignedBuffer<D> {}
unsafe impl<D: Sync> Sync for AlignedBuffer<D> {}

impl<D: Default> AlignedBuffer<D> {
    /// Allocates `len` default values aligned to [`DEFAULT_ALIGN_LOG`].
    ///
    /// # Panics
    ///
    /// If the layout overflows or the allocator fails.
    pub fn new(len: usize) -> Self {
        Self::with_align_log(len, DEFAULT_ALIGN_LOG)
    }

    /// Allocates `len` default values aligned to `2^align_log` bytes.
    ///
    /// # Panics
    ///
    /// If the layout overflows or the allocator fails.
    pub fn with_align_log(len: usize, align_log: u32) -> Self {
        Self::from_fn(len, align_log, |_| D::default())
    }

    pub fn try_with_align_log(len: usize, align_log: u32) -> Result<Self, AllocError> {
        Self::try_from_fn(len, align_log, |_| D::default())
    }
}

impl<D> AlignedBuffer<D> {
    /// Allocates `len` values, slot `i` initialised with `f(i)`.
    ///
    /// # Panics
    ///
    /// If the layout overflows or the allocator fails.
    pub fn from_fn<F: FnMut(usize) -> D>(len: usize, align_log: u32, f: F) -> Self {
        match Self::try_from_fn(len, align_log, f) {
            Ok(buf) => buf,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_from_fn<F: FnMut(usize) -> D>(len: usize, align_log: u32, mut f: F) -> Result<Self, AllocError> {
        let overflow = || AllocError::LayoutOverflow { len, align_log };

        let align: usize = 1usize.checked_shl(align_log).ok_or_else(overflow)?;
        let size: usize = len
            .checked_mul(size_of::<D>())
            .and_then(|bytes| bytes.checked_add(align - 1))
            .ok_or_else(overflow)?;

        // zero-sized requests still get a one byte region so that dealloc is uniform
        let layout: Layout = Layout::from_size_align(size.max(1), align_of::<D>()).map_err(|_| overflow())?;

        let mem: NonNull<u8> = NonNull::new(unsafe { alloc::alloc(layout) }).ok_or(AllocError::OutOfMemory {
            size: layout.size(),
            align: layout.align(),
        })?;

        let view_align: usize = align.max(align_of::<D>());
        let addr: usize = mem.as_ptr() as usize;
        let offset: usize = ((addr + view_align - 1) & !(view_align - 1)) - addr;

        debug_assert!(offset + len * size_of::<D>() <= layout.size());

        tracing::trace!(len, align, offset, bytes = layout.size(), "aligned buffer allocated");

        // len grows as slots are written, so a panicking `f` only drops what exists
        let mut buf: Self = Self {
            mem,
            layout,
            offset,
            len: 0,
            align_log,
            _phantom: PhantomData,
        };

        let base: *mut D = buf.as_mut_ptr();
        for i in 0..len {
            unsafe { base.add(i).write(f(i)) };
            buf.len = i + 1;
        }

        Ok(buf)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn align_log(&self) -> u32 {
        self.align_log
    }

    /// Requested alignment in bytes, `2^align_log`.
    pub fn align(&self) -> usize {
        1 << self.align_log
    }

    /// Byte offset of the aligned view inside the raw region.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn as_ptr(&self) -> *const D {
        unsafe { self.mem.as_ptr().add(self.offset) as *const D }
    }

    pub fn as_mut_ptr(&mut self) -> *mut D {
        unsafe { self.mem.as_ptr().add(self.offset) as *mut D }
    }

    pub fn as_slice(&self) -> &[D] {
        unsafe { std::slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [D] {
        unsafe { std::slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Returns the element at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be in `[0, len)`.
    pub unsafe fn get_unchecked(&self, index: usize) -> &D {
        debug_assert!(index < self.len, "index {index} out of bounds for len {}", self.len);
        unsafe { &*self.as_ptr().add(index) }
    }

    /// Returns the element at `index` mutably without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be in `[0, len)`.
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut D {
        debug_assert!(index < self.len, "index {index} out of bounds for len {}", self.len);
        unsafe { &mut *self.as_mut_ptr().add(index) }
    }
}

impl<D> Drop for AlignedBuffer<D> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len));
            alloc::dealloc(self.mem.as_ptr(), self.layout);
        }
        tracing::trace!(len = self.len, bytes = self.layout.size(), "aligned buffer released");
    }
}

impl<D: Clone> Clone for AlignedBuffer<D> {
    fn clone(&self) -> Self {
        let src: &[D] = self.as_slice();
        Self::from_fn(self.len, self.align_log, |i| src[i].clone())
    }
}

impl<D> Deref for AlignedBuffer<D> {
    type Target = [D];

    fn deref(&self) -> &[D] {
        self.as_slice()
    }
}

impl<D> DerefMut for AlignedBuffer<D> {
    fn deref_mut(&mut self) -> &mut [D] {
        self.as_mut_slice()
    }
}

impl<D> Index<usize> for AlignedBuffer<D> {
    type Output = D;

    fn index(&self, index: usize) -> &D {
        &self.as_slice()[index]
    }
}

impl<D> IndexMut<usize> for AlignedBuffer<D> {
    fn index_mut(&mut self, index: usize) -> &mut D {
        &mut self.as_mut_slice()[index]
    }
}

impl<D: fmt::Debug> fmt::Debug for AlignedBuffer<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("len", &self.len)
            .field("align", &self.align())
            .field("data", &self.as_slice())
            .finish()
    }
}
