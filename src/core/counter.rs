//! Fixed-capacity open-addressing table counting samples per grid cell.
//!
//! One table per column per render. Capacity is the smallest power of two
//! holding twice the row count, so the load factor never exceeds 50% and
//! the table is never resized. Every `get` must follow an `increment` of
//! the same cell in the same pass; anything else is a bug and panics.

use crate::core::scale::ScaledPoint;

/// Smallest table ever allocated.
const MIN_CAPACITY: usize = 8;

const FNV64_OFFSET_BASIS: u64 = 14_695_981_039_346_656_037;
const FNV64_PRIME: u64 = 1_099_511_628_211;

/// 64-bit FNV-1a.
#[inline]
#[must_use]
pub fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV64_OFFSET_BASIS, |h, &b| {
        (h ^ u64::from(b)).wrapping_mul(FNV64_PRIME)
    })
}

/// Hash of the raw bytes of an (x, y) cell.
#[inline]
#[must_use]
pub fn cell_hash(sp: ScaledPoint) -> u64 {
    let mut buf = [0u8; 16];
    buf[..8].copy_from_slice(&sp.x.to_ne_bytes());
    buf[8..].copy_from_slice(&sp.y.to_ne_bytes());
    fnv1a(&buf)
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    key: ScaledPoint,
    count: usize,
}

#[derive(Debug)]
pub struct Counter {
    slots: Box<[Option<Slot>]>,
    mask: usize,
}

impl Counter {
    /// Table sized for a column of `rows` samples.
    #[must_use]
    pub fn with_rows(rows: usize) -> Self {
        let capacity = rows
            .saturating_mul(2)
            .next_power_of_two()
            .max(MIN_CAPACITY);
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
            mask: capacity - 1,
        }
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Linear scan from the hash slot. Returns the matching slot, or the
    /// first free one, or `None` if the table is full.
    #[allow(clippy::cast_possible_truncation)]
    fn find_slot(&self, key: ScaledPoint) -> Option<usize> {
        let start = cell_hash(key) as usize;
        (0..self.capacity())
            .map(|i| start.wrapping_add(i) & self.mask)
            .find(|&i| self.slots[i].is_none_or(|s| s.key == key))
    }

    /// Count one more sample at `key`.
    ///
    /// # Panics
    /// When the table is full, which the sizing rule makes impossible for
    /// at most `rows` distinct cells.
    pub fn increment(&mut self, key: ScaledPoint) {
        let i = self
            .find_slot(key)
            .unwrap_or_else(|| panic!("counter capacity {} exceeded", self.capacity()));
        self.slots[i].get_or_insert(Slot { key, count: 0 }).count += 1;
    }

    /// Samples counted at `key`.
    ///
    /// # Panics
    /// When `key` was never incremented.
    #[must_use]
    pub fn get(&self, key: ScaledPoint) -> usize {
        match self.find_slot(key).and_then(|i| self.slots[i]) {
            Some(slot) => slot.count,
            None => panic!("counter lookup of unseen cell ({}, {})", key.x, key.y),
        }
    }
}
