//! Slab storage for tree nodes.
//!
//! Nodes refer to each other through `Handle`s rather than pointers, so a parent link is just
//! an index and can never keep its target alive.

use std::mem;
use std::ops::{Index, IndexMut};

/// A reference to an object stored in a `TypedArena<T>`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    index: usize,
}

impl Handle {
    /// Position of the slot in the arena. Unique among live objects.
    pub fn index(self) -> usize {
        self.index
    }
}

enum Slot<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

/// An allocator for a single type of object backed by one `Vec`.
///
/// Freed slots are threaded onto an intrusive free list and reused by later allocations, so a
/// tree that churns through inserts and removals does not grow its storage.
pub struct TypedArena<T> {
    slots: Vec<Slot<T>>,
    head: Option<usize>,
    len: usize,
}

impl<T> TypedArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TypedArena {
            slots: Vec::with_capacity(capacity),
            head: None,
            len: 0,
        }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            None => {
                self.slots.push(Slot::Occupied(value));
                Handle {
                    index: self.slots.len() - 1,
                }
            }
            Some(index) => {
                let vacant = mem::replace(&mut self.slots[index], Slot::Occupied(value));
                match vacant {
                    Slot::Vacant(next) => self.head = next,
                    Slot::Occupied(_) => panic!("Expected the free list to point at a vacant slot."),
                }
                Handle { index }
            }
        }
    }

    /// Deallocates an object and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `handle` refers to an out of bounds or vacant slot.
    pub fn free(&mut self, handle: Handle) -> T {
        if handle.index >= self.slots.len() {
            panic!("Error: attempting to free an out of bounds slot.");
        }
        let old = mem::replace(&mut self.slots[handle.index], Slot::Vacant(self.head));
        match old {
            Slot::Occupied(value) => {
                self.head = Some(handle.index);
                self.len -= 1;
                value
            }
            Slot::Vacant(next) => {
                self.slots[handle.index] = Slot::Vacant(next);
                panic!("Error: attempting to free a vacant slot.");
            }
        }
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.slots.get(handle.index) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slots.get_mut(handle.index) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Drops every object and forgets the free list.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T> Default for TypedArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle refers to a vacant slot.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle refers to a vacant slot.")
    }
}
