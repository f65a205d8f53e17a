use std::{
    any::Any,
    cell::{OnceCell, RefCell},
    fmt,
    marker::PhantomData,
    rc::{Rc, Weak},
};

/// Storage for the bodies of recursive parsers.
///
/// Handles into the arena are weak, so a rule that refers to itself does not
/// keep itself alive; the arena owns every body.
pub struct Arena {
    slots: RefCell<Vec<OnceCell<Rc<dyn Any>>>>,
}

impl Arena {
    pub fn new() -> Rc<Self> {
        Rc::new(Arena {
            slots: RefCell::new(Vec::new()),
        })
    }

    pub(crate) fn alloc<P>(self: &Rc<Self>) -> Slot<P> {
        let index = {
            let mut slots = self.slots.borrow_mut();
            slots.push(OnceCell::new());
            slots.len() - 1
        };

        Slot {
            arena: Rc::downgrade(self),
            index,
            _phantom: PhantomData,
        }
    }

    /// Number of rules declared in this arena.
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.borrow();
        let defined = slots.iter().filter(|slot| slot.get().is_some()).count();
        f.debug_struct("Arena")
            .field("declared", &slots.len())
            .field("defined", &defined)
            .finish()
    }
}

pub(crate) struct Slot<P> {
    arena: Weak<Arena>,
    index: usize,
    _phantom: PhantomData<P>,
}

impl<P> Clone for Slot<P> {
    fn clone(&self) -> Self {
        Slot {
            arena: self.arena.clone(),
            index: self.index,
            _phantom: PhantomData,
        }
    }
}

impl<P: 'static> Slot<P> {
    /// The arena this slot belongs to, if it is still alive.
    pub fn arena(&self) -> Option<Rc<Arena>> {
        self.arena.upgrade()
    }

    /// # Panics
    /// Panics if the arena is gone or the slot is already occupied.
    pub fn store(&self, value: P) {
        let arena = self
            .arena
            .upgrade()
            .unwrap_or_else(|| panic!("recursive parser defined after its arena was dropped"));
        let value: Rc<dyn Any> = Rc::new(value);
        if arena.slots.borrow()[self.index].set(value).is_err() {
            panic!("recursive parser defined twice");
        }
    }

    /// The stored value, or `None` when the slot is empty or the arena is gone.
    pub fn get(&self) -> Option<Rc<P>> {
        let arena = self.arena.upgrade()?;
        let value = arena.slots.borrow().get(self.index)?.get()?.clone();
        value.downcast().ok()
    }
}
