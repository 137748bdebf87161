//! The registration seam between the binding engine and a flag registry.
//!
//! [`Registrar`] exposes one operation per supported scalar type plus
//! [`Registrar::var`] for self-describing [`Value`] bindings. The walker and
//! binders only ever talk to a registry through this trait, which is what lets
//! [`crate::RecordingTarget`] stand in for [`crate::FlagSet`] in tests.

use std::time::Duration;

use crate::error::ValueError;

/// A flag value that parses its own occurrences.
///
/// Registries call [`Value::set`] once per occurrence of the flag, in
/// command-line order.
pub trait Value {
    /// Applies one occurrence of the flag.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] when `raw` cannot be applied.
    fn set(&mut self, raw: &str) -> Result<(), ValueError>;

    /// Renders the current value for help output.
    fn render(&self) -> String;

    /// Whether the flag may appear without a value (`--name`).
    fn is_bool_flag(&self) -> bool {
        false
    }
}

/// A target that flags are registered against.
///
/// Slots are borrowed for `'a`; a registry is expected to write parsed
/// command-line values into them later. Registration itself is infallible,
/// so registries report problems such as duplicate names when they parse.
pub trait Registrar<'a> {
    /// Registers a self-describing value binding.
    fn var(&mut self, value: Box<dyn Value + 'a>, name: &str, usage: &str);

    /// Registers a signed integer binding.
    fn int_var(&mut self, slot: &'a mut isize, name: &str, value: isize, usage: &str);

    /// Registers a boolean binding.
    fn bool_var(&mut self, slot: &'a mut bool, name: &str, value: bool, usage: &str);

    /// Registers an unsigned integer binding.
    fn uint_var(&mut self, slot: &'a mut usize, name: &str, value: usize, usage: &str);

    /// Registers a 64-bit signed integer binding.
    fn int64_var(&mut self, slot: &'a mut i64, name: &str, value: i64, usage: &str);

    /// Registers a string binding.
    fn string_var(&mut self, slot: &'a mut String, name: &str, value: &str, usage: &str);

    /// Registers a 64-bit unsigned integer binding.
    fn uint64_var(&mut self, slot: &'a mut u64, name: &str, value: u64, usage: &str);

    /// Registers a 64-bit floating point binding.
    fn float64_var(&mut self, slot: &'a mut f64, name: &str, value: f64, usage: &str);

    /// Registers a duration binding.
    fn duration_var(&mut self, slot: &'a mut Duration, name: &str, value: Duration, usage: &str);
}

impl<'a, R> Registrar<'a> for &mut R
where
    R: Registrar<'a> + ?Sized,
{
    fn var(&mut self, value: Box<dyn Value + 'a>, name: &str, usage: &str) {
        (**self).var(value, name, usage);
    }

    fn int_var(&mut self, slot: &'a mut isize, name: &str, value: isize, usage: &str) {
        (**self).int_var(slot, name, value, usage);
    }

    fn bool_var(&mut self, slot: &'a mut bool, name: &str, value: bool, usage: &str) {
        (**self).bool_var(slot, name, value, usage);
    }

    fn uint_var(&mut self, slot: &'a mut usize, name: &str, value: usize, usage: &str) {
        (**self).uint_var(slot, name, value, usage);
    }

    fn int64_var(&mut self, slot: &'a mut i64, name: &str, value: i64, usage: &str) {
        (**self).int64_var(slot, name, value, usage);
    }

    fn string_var(&mut self, slot: &'a mut String, name: &str, value: &str, usage: &str) {
        (**self).string_var(slot, name, value, usage);
    }

    fn uint64_var(&mut self, slot: &'a mut u64, name: &str, value: u64, usage: &str) {
        (**self).uint64_var(slot, name, value, usage);
    }

    fn float64_var(&mut self, slot: &'a mut f64, name: &str, value: f64, usage: &str) {
        (**self).float64_var(slot, name, value, usage);
    }

    fn duration_var(&mut self, slot: &'a mut Duration, name: &str, value: Duration, usage: &str) {
        (**self).duration_var(slot, name, value, usage);
    }
}
