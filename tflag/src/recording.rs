//! An in-memory registrar for exercising bindings without a real registry.

use std::fmt;
use std::time::Duration;

use crate::error::{FlagError, FlagResult};
use crate::registrar::{Registrar, Value};

/// A default value captured by [`RecordingTarget`].
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    /// From [`Registrar::int_var`].
    Int(isize),
    /// From [`Registrar::bool_var`].
    Bool(bool),
    /// From [`Registrar::uint_var`].
    Uint(usize),
    /// From [`Registrar::int64_var`].
    Int64(i64),
    /// From [`Registrar::string_var`].
    String(String),
    /// From [`Registrar::uint64_var`].
    Uint64(u64),
    /// From [`Registrar::float64_var`].
    Float64(f64),
    /// From [`Registrar::duration_var`].
    Duration(Duration),
    /// From [`Registrar::var`]; the value's rendering at registration.
    Value(String),
}

/// One captured registration.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    /// Help text passed at registration.
    pub usage: String,
    /// Default passed at registration.
    pub value: Recorded,
}

/// Captures registrations instead of binding slots.
///
/// Scalar slots are dropped without being written. [`Registrar::var`]
/// values are retained so tests can [`feed`](RecordingTarget::feed) them
/// occurrences, standing in for a registry's parse step.
#[derive(Default)]
pub struct RecordingTarget<'a> {
    registrations: Vec<(String, Registration)>,
    values: Vec<(String, Box<dyn Value + 'a>)>,
}

impl<'a> RecordingTarget<'a> {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The first registration recorded under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Registration> {
        self.registrations
            .iter()
            .find(|(registered, _)| registered == name)
            .map(|(_, registration)| registration)
    }

    /// Whether anything was registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.registrations
            .iter()
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Number of registrations captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Whether nothing was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Applies `occurrences` to the value registered under `name`, as a
    /// registry would while parsing.
    ///
    /// Returns `false` when no value binding exists under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::InvalidValue`] when the value rejects an
    /// occurrence.
    pub fn feed<I, S>(&mut self, name: &str, occurrences: I) -> FlagResult<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some((_, value)) = self.values.iter_mut().find(|(registered, _)| registered == name)
        else {
            return Ok(false);
        };
        for occurrence in occurrences {
            let raw = occurrence.as_ref();
            value.set(raw).map_err(|source| FlagError::InvalidValue {
                flag: name.to_owned(),
                value: raw.to_owned(),
                source,
            })?;
        }
        Ok(true)
    }

    fn record(&mut self, name: &str, usage: &str, value: Recorded) {
        self.registrations.push((
            name.to_owned(),
            Registration {
                usage: usage.to_owned(),
                value,
            },
        ));
    }
}

impl fmt::Debug for RecordingTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingTarget")
            .field("registrations", &self.registrations)
            .finish_non_exhaustive()
    }
}

impl<'a> Registrar<'a> for RecordingTarget<'a> {
    fn var(&mut self, value: Box<dyn Value + 'a>, name: &str, usage: &str) {
        self.record(name, usage, Recorded::Value(value.render()));
        self.values.push((name.to_owned(), value));
    }

    fn int_var(&mut self, _slot: &'a mut isize, name: &str, value: isize, usage: &str) {
        self.record(name, usage, Recorded::Int(value));
    }

    fn bool_var(&mut self, _slot: &'a mut bool, name: &str, value: bool, usage: &str) {
        self.record(name, usage, Recorded::Bool(value));
    }

    fn uint_var(&mut self, _slot: &'a mut usize, name: &str, value: usize, usage: &str) {
        self.record(name, usage, Recorded::Uint(value));
    }

    fn int64_var(&mut self, _slot: &'a mut i64, name: &str, value: i64, usage: &str) {
        self.record(name, usage, Recorded::Int64(value));
    }

    fn string_var(&mut self, _slot: &'a mut String, name: &str, value: &str, usage: &str) {
        self.record(name, usage, Recorded::String(value.to_owned()));
    }

    fn uint64_var(&mut self, _slot: &'a mut u64, name: &str, value: u64, usage: &str) {
        self.record(name, usage, Recorded::Uint64(value));
    }

    fn float64_var(&mut self, _slot: &'a mut f64, name: &str, value: f64, usage: &str) {
        self.record(name, usage, Recorded::Float64(value));
    }

    fn duration_var(&mut self, _slot: &'a mut Duration, name: &str, value: Duration, usage: &str) {
        self.record(name, usage, Recorded::Duration(value));
    }
}
