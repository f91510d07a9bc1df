use crate::error::{Error, Resource};
use std::cell::Cell;

const FNV_32_PRIME: u32 = 16777619;
const FNV_32_OFFSET_BASIS: u32 = 2166136261;

pub fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_32_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_32_PRIME)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol<'a> {
    pub name: &'a str,
    pub address: u16,
}

/// Fixed-capacity open-addressing map from identifier to address.
///
/// Slots are allocated once. Collisions are resolved by linear probing with
/// wraparound, so a present key is always found before the first free slot.
#[derive(Debug)]
pub struct SymbolTable<'a> {
    kind: Resource,
    slots: Vec<Option<Symbol<'a>>>,
    len: usize,
    collisions: Cell<usize>,
}

impl<'a> SymbolTable<'a> {
    pub fn new(kind: Resource, capacity: usize) -> Self {
        SymbolTable {
            kind,
            slots: vec![None; capacity],
            len: 0,
            collisions: Cell::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sum of probe distances over every lookup and insert so far.
    pub fn collisions(&self) -> usize {
        self.collisions.get()
    }

    /// Index of the slot holding `name`, or of the first free slot on its
    /// probe sequence. `None` only if every slot is taken by another key.
    fn probe(&self, name: &str) -> Option<usize> {
        let capacity = self.capacity();
        if capacity == 0 {
            return None;
        }
        let start = fnv1a(name.as_bytes()) as usize % capacity;
        for distance in 0..capacity {
            let idx = (start + distance) % capacity;
            match &self.slots[idx] {
                Some(symbol) if symbol.name != name => continue,
                _ => {
                    self.collisions.set(self.collisions.get() + distance);
                    return Some(idx);
                }
            }
        }
        None
    }

    /// Probing every slot without finding `name` or a free slot is fatal.
    pub fn get(&self, name: &str) -> Result<Option<u16>, Error> {
        let idx = self.probe(name).ok_or_else(|| self.exhausted())?;
        Ok(self.slots[idx].map(|symbol| symbol.address))
    }

    /// Binds `name` to `address`, overwriting any previous binding, which is
    /// returned.
    pub fn insert(&mut self, name: &'a str, address: u16) -> Result<Option<u16>, Error> {
        if self.len >= self.capacity() {
            return Err(Error::Capacity(self.kind, self.capacity()));
        }
        let idx = self.probe(name).ok_or_else(|| self.exhausted())?;
        let prev = self.slots[idx].replace(Symbol { name, address });
        if prev.is_none() {
            self.len += 1;
        }
        Ok(prev.map(|symbol| symbol.address))
    }

    fn exhausted(&self) -> Error {
        Error::TableExhausted(self.kind, self.capacity())
    }

    /// Live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol<'a>> {
        self.slots.iter().flatten()
    }
}
