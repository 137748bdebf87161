//! Bind configuration struct fields to command-line flags.
//!
//! Annotate a struct with `#[derive(Flags)]` and per-field
//! `#[tflag(...)]` attributes, then bind it under a namespace:
//!
//! ```
//! use std::time::Duration;
//! use tflag::Flags;
//!
//! #[derive(Flags)]
//! struct Http {
//!     #[tflag(flag = "addr", usage = "listen address", default = "127.0.0.1:2233")]
//!     addr: String,
//!     #[tflag(usage = "http timeout", default = "1s")]
//!     timeout: Duration,
//!     #[tflag(usage = "allowed origins")]
//!     origins: Vec<String>,
//! }
//!
//! let mut cfg = Http {
//!     addr: String::new(),
//!     timeout: Duration::ZERO,
//!     origins: Vec::new(),
//! };
//! let mut flags = tflag::FlagSet::new("server");
//! let mut parse = tflag::var_flag_set(&mut flags, "http", &mut cfg)?;
//! flags.parse_from(["server", "--http.timeout=5s", "--http.origins", "a", "--http.origins", "b"])?;
//! // Sequence fields are decoded after the command line has been parsed.
//! parse.call()?;
//! drop(parse);
//! drop(flags);
//!
//! assert_eq!(cfg.addr, "127.0.0.1:2233");
//! assert_eq!(cfg.timeout, Duration::from_secs(5));
//! assert_eq!(cfg.origins, ["a", "b"]);
//! # Ok::<(), tflag::FlagError>(())
//! ```
//!
//! Recognised field attributes:
//!
//! - `flag = "name"` overrides the lower-cased field name; `flag = "-"` or
//!   `skip` excludes the field.
//! - `usage = "text"` sets the help text.
//! - `default = "literal"` sets the default, parsed for the field's type.
//! - `env = "NAME"` records an environment alias on the
//!   [`Descriptor`]. It is not resolved.
//!
//! Nested `#[derive(Flags)]` structs extend the namespace with their own
//! flag name, so a `listen` field inside an `http` field of a struct bound
//! under `app` registers `app.http.listen`.

extern crate self as tflag;

pub use tflag_macros::Flags;

mod container;
mod deferred;
mod descriptor;
mod duration;
mod error;
mod flag_set;
mod recording;
mod registrar;
mod scalar;
mod value;
mod walker;

pub use container::{Decoder, Element, ElementKind, StringCollector};
pub use deferred::ParseFn;
pub use descriptor::{Descriptor, SKIP};
pub use duration::{format_duration, parse_duration};
pub use error::{DurationError, FlagError, FlagResult, ValueError};
pub use flag_set::{FlagInfo, FlagSet};
pub use recording::{Recorded, RecordingTarget, Registration};
pub use registrar::{Registrar, Value};
pub use value::{
    parse_bool, parse_f64, parse_i64, parse_isize, parse_u64, parse_uint, parse_usize,
};
pub use walker::{Bindable, Binder, Field, Flags, UnsupportedField, Walker};

/// Binds `config` under `namespace` into a new flag set for the running
/// program.
///
/// Parse the returned [`FlagSet`] (for example with [`FlagSet::parse`]) and
/// then call the [`ParseFn`] to decode sequence fields.
///
/// # Errors
///
/// See [`Binder::bind`].
pub fn var<'a, C>(namespace: &str, config: &'a mut C) -> FlagResult<(FlagSet<'a>, ParseFn<'a>)>
where
    C: Bindable + ?Sized,
{
    let mut flags = FlagSet::command_line();
    let parse = var_flag_set(&mut flags, namespace, config)?;
    Ok((flags, parse))
}

/// Binds `config` under `namespace` into an existing flag set.
///
/// # Errors
///
/// See [`Binder::bind`].
pub fn var_flag_set<'a, C>(
    flags: &mut FlagSet<'a>,
    namespace: &str,
    config: &'a mut C,
) -> FlagResult<ParseFn<'a>>
where
    C: Bindable + ?Sized,
{
    Binder::new(namespace).bind(flags, config)
}
