//! Open-Addressed Table Implementation

use crate::error::DispatchError;
use crate::CAPACITY_MAX;
use tracing::debug;

/// Integer avalanche mix used to pick an identifier's home slot
pub fn mix(id: u32) -> u32 {
    let mut x = id;
    x ^= x >> 16;
    x = x.wrapping_mul(0x045d_9f3b);
    x ^= x >> 16;
    x = x.wrapping_mul(0x045d_9f3b);
    x ^= x >> 16;
    x
}

#[derive(Debug, Clone)]
struct Entry<H> {
    id: u32,
    handler: H,
}

/// Fixed-capacity identifier to handler map.
///
/// Every live entry is reachable from its home slot by probing forward
/// without crossing an empty slot; `remove` shifts later entries back to
/// keep it that way, so no tombstones are needed.
pub struct DispatchTable<H> {
    slots: Box<[Option<Entry<H>>]>,
    len: usize,
}

impl<H> DispatchTable<H> {
    /// Create an empty table with `capacity` slots
    pub fn new(capacity: usize) -> Result<Self, DispatchError> {
        if capacity == 0 || capacity > CAPACITY_MAX {
            return Err(DispatchError::InvalidCapacity(capacity));
        }
        let slots: Vec<Option<Entry<H>>> = (0..capacity).map(|_| None).collect();
        Ok(Self {
            slots: slots.into_boxed_slice(),
            len: 0,
        })
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of routed identifiers
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if nothing is routed
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn home(&self, id: u32) -> usize {
        mix(id) as usize % self.capacity()
    }

    /// Route `id` to `handler`.
    ///
    /// Fails with `Duplicate` if `id` is already routed (the first
    /// registration is kept) and with `Full` if a full probe pass finds no
    /// empty slot.
    pub fn insert(&mut self, id: u32, handler: H) -> Result<(), DispatchError> {
        let cap = self.capacity();
        let start = self.home(id);

        for step in 0..cap {
            let slot = (start + step) % cap;
            match self.slots[slot].as_ref().map(|entry| entry.id) {
                None => {
                    self.slots[slot] = Some(Entry { id, handler });
                    self.len += 1;
                    debug!(id, slot, probes = step + 1, "route registered");
                    return Ok(());
                }
                Some(existing) if existing == id => return Err(DispatchError::Duplicate(id)),
                Some(_) => {}
            }
        }

        Err(DispatchError::Full(id))
    }

    /// Route every identifier in `first..=last` to a clone of `handler`.
    ///
    /// Either the whole range is registered or none of it is.
    pub fn insert_range(&mut self, first: u32, last: u32, handler: H) -> Result<(), DispatchError>
    where
        H: Clone,
    {
        for id in first..=last {
            if let Err(err) = self.insert(id, handler.clone()) {
                for inserted in first..id {
                    self.remove(inserted);
                }
                return Err(err);
            }
        }
        Ok(())
    }

    fn find(&self, id: u32) -> Option<usize> {
        let cap = self.capacity();
        let start = self.home(id);

        for step in 0..cap {
            let slot = (start + step) % cap;
            match &self.slots[slot] {
                None => return None,
                Some(entry) if entry.id == id => return Some(slot),
                Some(_) => {}
            }
        }
        None
    }

    /// Handler routed for `id`, `None` if unrouted
    pub fn lookup(&self, id: u32) -> Option<&H> {
        self.find(id)
            .and_then(|slot| self.slots[slot].as_ref())
            .map(|entry| &entry.handler)
    }

    /// Check if `id` is routed
    pub fn contains(&self, id: u32) -> bool {
        self.find(id).is_some()
    }

    /// Remove the route for `id`, returning its handler
    pub fn remove(&mut self, id: u32) -> Option<H> {
        let mut hole = self.find(id)?;
        let removed = self.slots[hole].take().map(|entry| entry.handler);
        self.len -= 1;

        // Backward-shift: pull later cluster members into the hole unless
        // their home slot lies cyclically within (hole, next].
        let cap = self.capacity();
        let mut next = hole;
        for _ in 0..cap {
            next = (next + 1) % cap;
            let home = match &self.slots[next] {
                None => break,
                Some(entry) => self.home(entry.id),
            };

            let stays = if hole <= next {
                hole < home && home <= next
            } else {
                hole < home || home <= next
            };
            if !stays {
                self.slots[hole] = self.slots[next].take();
                hole = next;
            }
        }

        debug!(id, "route removed");
        removed
    }

    /// Drop every route
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
    }

    /// Live routes as `(slot, id, handler)`, in slot order
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32, &H)> + '_ {
        self.slots.iter().enumerate().filter_map(|(slot, entry)| {
            entry
                .as_ref()
                .map(|entry| (slot, entry.id, &entry.handler))
        })
    }
}

impl<H> core::fmt::Debug for DispatchTable<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DispatchTable")
            .field("capacity", &self.capacity())
            .field("len", &self.len)
            .field(
                "routes",
                &self
                    .iter()
                    .map(|(slot, id, _)| (slot, id))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
