use std::cell::{OnceCell, RefCell};
use std::fmt;

use super::Value;

type Init = Box<dyn FnOnce() -> Value>;

/// A deferred value, produced on first use and cached
pub struct Lazy {
    type_name: String,
    cell: OnceCell<Value>,
    init: RefCell<Option<Init>>,
}

impl Lazy {
    pub fn new(type_name: impl Into<String>, init: impl FnOnce() -> Value + 'static) -> Self {
        Self {
            type_name: type_name.into(),
            cell: OnceCell::new(),
            init: RefCell::new(Some(Box::new(init))),
        }
    }

    /// An already-evaluated lazy value
    pub fn ready(type_name: impl Into<String>, value: Value) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(value);
        Self {
            type_name: type_name.into(),
            cell,
            init: RefCell::new(None),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is_forced(&self) -> bool {
        self.cell.get().is_some()
    }

    /// The cached value, without forcing
    pub fn peek(&self) -> Option<&Value> {
        self.cell.get()
    }

    /// Evaluate (once) and return the inner value
    pub fn force(&self) -> Value {
        self.cell
            .get_or_init(|| {
                let init = self.init.borrow_mut().take();
                init.map(|f| f()).unwrap_or(Value::Null)
            })
            .clone()
    }
}

impl fmt::Debug for Lazy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy")
            .field("type_name", &self.type_name)
            .field("value", &self.cell.get())
            .finish()
    }
}
