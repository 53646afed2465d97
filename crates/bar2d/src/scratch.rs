//! Reusable scratch arrays for geometry packing.
//!
//! A [`ScratchPool`] hands out [`Scratch`] guards that deref to a zeroed
//! slice of the requested length. Dropping a guard returns its storage to the
//! pool, so every exit path of a packing routine releases what it acquired.
//! Storage is bucketed by power-of-two capacity and reused across updates.

use std::cell::{Cell, RefCell};
use std::ops::{Deref, DerefMut};

/// Pool of reusable `Vec<T>` allocations.
#[derive(Debug)]
pub struct ScratchPool<T> {
    free: RefCell<Vec<Vec<T>>>,
    outstanding: Cell<usize>,
    max_cached: usize,
}

impl<T> Default for ScratchPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ScratchPool<T> {
    const DEFAULT_MAX_CACHED: usize = 8;

    pub fn new() -> Self {
        Self {
            free: RefCell::new(Vec::new()),
            outstanding: Cell::new(0),
            max_cached: Self::DEFAULT_MAX_CACHED,
        }
    }

    /// Number of guards currently alive.
    pub fn outstanding(&self) -> usize {
        self.outstanding.get()
    }

    /// Number of allocations parked in the pool.
    pub fn cached(&self) -> usize {
        self.free.borrow().len()
    }

    /// Drops every cached allocation.
    pub fn clear(&self) {
        self.free.borrow_mut().clear();
    }

    fn release(&self, mut buf: Vec<T>) {
        self.outstanding.set(self.outstanding.get().saturating_sub(1));
        buf.clear();
        let mut free = self.free.borrow_mut();
        if free.len() < self.max_cached {
            free.push(buf);
        }
    }
}

impl<T: Copy + Default> ScratchPool<T> {
    /// Acquires a slice of `len` default-initialized elements.
    pub fn acquire(&self, len: usize) -> Scratch<'_, T> {
        let bucket = len.next_power_of_two();

        let reused = {
            let mut free = self.free.borrow_mut();
            free.iter()
                .position(|v| v.capacity() >= len)
                .map(|i| free.swap_remove(i))
        };

        let mut buf = reused.unwrap_or_else(|| Vec::with_capacity(bucket));
        buf.resize(len, T::default());

        self.outstanding.set(self.outstanding.get() + 1);
        Scratch { buf: Some(buf), pool: self }
    }
}

/// Scoped scratch slice; returned to its pool on drop.
#[derive(Debug)]
pub struct Scratch<'p, T> {
    buf: Option<Vec<T>>,
    pool: &'p ScratchPool<T>,
}

impl<T> Deref for Scratch<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.buf.as_deref().unwrap_or(&[])
    }
}

impl<T> DerefMut for Scratch<'_, T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.buf.as_deref_mut().unwrap_or(&mut [])
    }
}

impl<T> Drop for Scratch<'_, T> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.release(buf);
        }
    }
}
