use crate::{
    data::ValidatedData,
    error::{InternalError, StoreError},
    traits::EntityKind,
};
use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
};

///
/// Store
///
/// Persistence collaborator. The codec hands data to `create` and
/// mutated entities to `save`; it never owns stored rows.
///

pub trait Store<E: EntityKind> {
    /// Persist a new entity built from `data`, assigning its key.
    fn create(&self, data: &ValidatedData) -> Result<E, InternalError>;

    /// Persist an in-place mutation of an existing entity.
    fn save(&self, entity: &E) -> Result<(), InternalError>;
}

///
/// MemoryStore
///
/// Single-threaded in-memory store. Keys are assigned in increasing order
/// starting at `first_key` and never reused.
///

pub struct MemoryStore<E: EntityKind> {
    rows: RefCell<BTreeMap<u64, E>>,
    next_key: Cell<u64>,
}

impl<E: EntityKind> MemoryStore<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self::with_first_key(1)
    }

    #[must_use]
    pub const fn with_first_key(first_key: u64) -> Self {
        Self {
            rows: RefCell::new(BTreeMap::new()),
            next_key: Cell::new(first_key),
        }
    }

    #[must_use]
    pub fn get(&self, key: u64) -> Option<E> {
        self.rows.borrow().get(&key).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }

    fn allocate_key(&self) -> Result<u64, StoreError> {
        let key = self.next_key.get();
        let next = key.checked_add(1).ok_or_else(|| StoreError::Unavailable {
            message: format!("{} key space exhausted", E::MODEL.ident),
        })?;
        self.next_key.set(next);

        Ok(key)
    }
}

impl<E: EntityKind> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityKind> Store<E> for MemoryStore<E> {
    fn create(&self, data: &ValidatedData) -> Result<E, InternalError> {
        let key = self.allocate_key()?;
        let entity = E::from_data(key, data)?;

        let mut rows = self.rows.borrow_mut();
        if rows.contains_key(&key) {
            return Err(StoreError::Conflict {
                entity: E::MODEL.ident,
                message: format!("key {key} already exists"),
            }
            .into());
        }
        rows.insert(key, entity.clone());

        Ok(entity)
    }

    fn save(&self, entity: &E) -> Result<(), InternalError> {
        let key = entity.key();
        let mut rows = self.rows.borrow_mut();

        match rows.get_mut(&key) {
            Some(row) => {
                *row = entity.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: E::MODEL.ident,
                key,
            }
            .into()),
        }
    }
}
