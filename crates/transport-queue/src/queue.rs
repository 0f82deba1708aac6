//! Circular Buffer Implementation

use crate::error::QueueError;
use crate::{CAPACITY_MAX, ITEM_SIZE_MAX, ITEM_SIZE_MIN};
use core::cell::RefCell;
use core::mem::size_of;
use critical_section::Mutex;

/// Push/drop counters, updated inside the same critical section as the cursors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Items accepted by `push`
    pub pushed: u32,
    /// Items rejected because the queue was full
    pub dropped: u32,
    /// Items removed by `pop`
    pub popped: u32,
}

/// Cursor state guarded by the critical section
struct Ring<T> {
    /// Pre-allocated storage, `capacity` slots
    slots: Box<[T]>,
    /// Next write slot
    head: usize,
    /// Next read slot
    tail: usize,
    /// Occupied slots
    count: usize,
    stats: QueueStats,
}

impl<T: Copy> Ring<T> {
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn front(&self) -> Option<T> {
        (self.count > 0).then(|| self.slots[self.tail])
    }
}

/// Fixed-capacity SPSC queue of `Copy` records.
///
/// One producer (possibly an interrupt handler) and one consumer (the main
/// loop) share a `&Queue<T>`. `push` and `pop` are O(1) and hold the
/// critical section only for the cursor update and the slot copy.
pub struct Queue<T> {
    ring: Mutex<RefCell<Ring<T>>>,
    capacity: usize,
}

impl<T: Copy + Default> Queue<T> {
    /// Allocate a queue holding up to `capacity` items of type `T`.
    ///
    /// The item size (`size_of::<T>()`) must be within
    /// `ITEM_SIZE_MIN..=ITEM_SIZE_MAX` and the capacity within `1..=CAPACITY_MAX`.
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        let item_size = size_of::<T>();
        if !(ITEM_SIZE_MIN..=ITEM_SIZE_MAX).contains(&item_size)
            || !(1..=CAPACITY_MAX).contains(&capacity)
        {
            return Err(QueueError::InvalidParameter {
                item_size,
                capacity,
            });
        }

        let mut storage: Vec<T> = Vec::new();
        storage
            .try_reserve_exact(capacity)
            .map_err(|_| QueueError::NoMemory { capacity })?;
        storage.resize(capacity, T::default());

        Ok(Self {
            ring: Mutex::new(RefCell::new(Ring {
                slots: storage.into_boxed_slice(),
                head: 0,
                tail: 0,
                count: 0,
                stats: QueueStats::default(),
            })),
            capacity,
        })
    }
}

impl<T: Copy> Queue<T> {
    /// Copy `item` into the next free slot.
    ///
    /// Never blocks: a full queue drops the item and returns `QueueFull`.
    pub fn push(&self, item: T) -> Result<(), QueueError> {
        critical_section::with(|cs| {
            let mut ring = self.ring.borrow_ref_mut(cs);
            if ring.count >= ring.capacity() {
                ring.stats.dropped = ring.stats.dropped.wrapping_add(1);
                return Err(QueueError::QueueFull);
            }

            let head = ring.head;
            ring.slots[head] = item;
            ring.head = (head + 1) % ring.capacity();
            ring.count += 1;
            ring.stats.pushed = ring.stats.pushed.wrapping_add(1);
            Ok(())
        })
    }

    /// Remove and return the oldest item
    pub fn pop(&self) -> Result<T, QueueError> {
        critical_section::with(|cs| {
            let mut ring = self.ring.borrow_ref_mut(cs);
            let item = ring.front().ok_or(QueueError::QueueEmpty)?;

            ring.tail = (ring.tail + 1) % ring.capacity();
            ring.count -= 1;
            ring.stats.popped = ring.stats.popped.wrapping_add(1);
            Ok(item)
        })
    }

    /// Copy the oldest item without removing it
    pub fn peek(&self) -> Result<T, QueueError> {
        critical_section::with(|cs| {
            self.ring
                .borrow_ref(cs)
                .front()
                .ok_or(QueueError::QueueEmpty)
        })
    }

    /// Number of queued items.
    ///
    /// The producer may push right after this returns, so treat the value
    /// as a hint only.
    pub fn count(&self) -> usize {
        critical_section::with(|cs| self.ring.borrow_ref(cs).count)
    }

    /// Check if the queue is empty (hint)
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Check if the queue is full (hint)
    pub fn is_full(&self) -> bool {
        self.count() >= self.capacity
    }

    /// Get the queue capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get a copy of the push/drop counters
    pub fn stats(&self) -> QueueStats {
        critical_section::with(|cs| self.ring.borrow_ref(cs).stats)
    }

    /// Discard every queued item, keeping the allocation
    pub fn clear(&self) {
        critical_section::with(|cs| {
            let mut ring = self.ring.borrow_ref_mut(cs);
            ring.tail = ring.head;
            ring.count = 0;
        });
    }

    #[cfg(test)]
    fn cursors(&self) -> (usize, usize) {
        critical_section::with(|cs| {
            let ring = self.ring.borrow_ref(cs);
            (ring.head, ring.tail)
        })
    }
}

impl<T> core::fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        critical_section::with(|cs| {
            let ring = self.ring.borrow_ref(cs);
            f.debug_struct("Queue")
                .field("capacity", &self.capacity)
                .field("count", &ring.count)
                .field("head", &ring.head)
                .field("tail", &ring.tail)
                .field("stats", &ring.stats)
                .finish()
        })
    }
}
