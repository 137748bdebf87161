//! Deferred decoding run after the host has parsed the command line.

use std::fmt;

use crate::error::FlagResult;

type Callback<'a> = Box<dyn FnMut() -> FlagResult<()> + 'a>;

/// Ordered callbacks produced by a binding pass.
///
/// Each sequence field contributes one callback that decodes the occurrences
/// collected for it. Call [`ParseFn::call`] once the registry has parsed the
/// arguments; calling it earlier decodes empty collectors without error.
#[must_use = "sequence fields stay empty until the parse function is called"]
#[derive(Default)]
pub struct ParseFn<'a> {
    callbacks: Vec<Callback<'a>>,
}

impl<'a> ParseFn<'a> {
    /// Creates an empty parse function.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a callback; callbacks run in insertion order.
    pub fn push<F>(&mut self, callback: F)
    where
        F: FnMut() -> FlagResult<()> + 'a,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Runs every callback in order, stopping at the first failure.
    ///
    /// Repeated calls decode the same collected occurrences again and yield
    /// the same result.
    ///
    /// # Errors
    ///
    /// Returns the first callback's error; later callbacks are not run.
    pub fn call(&mut self) -> FlagResult<()> {
        for (index, callback) in self.callbacks.iter_mut().enumerate() {
            tracing::trace!(index, "running deferred flag decoder");
            callback()?;
        }
        Ok(())
    }

    /// Number of deferred callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Whether no sequence fields were bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for ParseFn<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseFn")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}
