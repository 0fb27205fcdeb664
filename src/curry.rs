//! Arity-counted partial application over dynamic argument lists.

use std::fmt;
use std::sync::Arc;

use crate::diagnostics::DescryError;
use crate::value::Value;

pub type CurriedFn = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// A callable that accumulates arguments across calls and fires once it has
/// seen at least `arity` of them.
#[derive(Clone)]
pub struct Curried {
    arity: usize,
    seen: Vec<Value>,
    call: CurriedFn,
}

/// The result of applying arguments to a [`Curried`] callable.
#[derive(Clone)]
pub enum Applied {
    /// More arguments are still needed.
    Partial(Curried),
    /// The underlying callable fired.
    Complete(Value),
}

impl Curried {
    /// Fails with [`DescryError::InvalidWrapper`] when `arity` is zero, the
    /// same definition-time guard the decorator form enforces.
    pub fn new(
        arity: usize,
        call: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> Result<Self, DescryError> {
        if arity == 0 {
            return Err(DescryError::invalid_wrapper(
                "a curried call must declare at least one parameter",
            ));
        }
        Ok(Self {
            arity,
            seen: Vec::new(),
            call: Arc::new(call),
        })
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// How many more arguments are needed before the call fires.
    pub fn remaining(&self) -> usize {
        self.arity.saturating_sub(self.seen.len())
    }

    /// Appends `args` to the accumulated list; fires the underlying call
    /// once the declared arity is reached.
    pub fn apply(mut self, args: impl IntoIterator<Item = Value>) -> Applied {
        self.seen.extend(args);
        if self.seen.len() < self.arity {
            Applied::Partial(self)
        } else {
            Applied::Complete((self.call)(&self.seen))
        }
    }
}

impl fmt::Debug for Curried {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curried")
            .field("arity", &self.arity)
            .field("seen", &self.seen)
            .finish_non_exhaustive()
    }
}
