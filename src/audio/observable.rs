//! Single-threaded value cells with change notification.

use std::cell::RefCell;
use std::fmt;

type Listener<T> = Box<dyn FnMut(&T)>;

/// A value that notifies subscribers whenever it changes.
///
/// Listeners run synchronously inside [`Observable::set`], on the thread that
/// owns the cell. Setting the value it already holds notifies nobody.
pub struct Observable<T> {
    value: T,
    version: u64,
    listeners: RefCell<Vec<Listener<T>>>,
}

impl<T: Clone + PartialEq> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            version: 0,
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn get(&self) -> T {
        self.value.clone()
    }

    /// Number of changes so far. Lets pollers detect a change cheaply.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Store `value`; returns whether it differed from the previous one.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.version += 1;
        for listener in self.listeners.get_mut().iter_mut() {
            listener(&self.value);
        }
        true
    }

    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("version", &self.version)
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}
