//! Error types produced while binding, parsing and decoding flags.

use std::num::{ParseFloatError, ParseIntError};

use clap::error::ErrorKind;
use thiserror::Error;

use crate::container::ElementKind;

/// Convenience alias for results carrying a [`FlagError`].
pub type FlagResult<T> = Result<T, FlagError>;

/// Errors surfaced by the binding engine and the flag registry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagError {
    /// The configuration root resolved to an empty indirection.
    #[error("configuration must be a non-empty reference to a struct")]
    NilConfig,

    /// A `default` annotation could not be parsed into the field's type.
    #[error("invalid default value for flag {flag}: {source}")]
    InvalidDefault {
        /// Fully-qualified flag name.
        flag: String,
        /// Underlying lexical failure.
        #[source]
        source: ValueError,
    },

    /// A field's type has no flag binding and strict mode is enabled.
    #[error("unsupported type {type_name} for flag {flag}")]
    UnsupportedField {
        /// Fully-qualified flag name.
        flag: String,
        /// Rust type name of the offending field.
        type_name: &'static str,
    },

    /// A sequence field's element type has no decoder.
    #[error(
        "unsupported element type {kind} for flag {flag}, only base types e.g. string, bool, int are supported"
    )]
    UnsupportedElement {
        /// Fully-qualified flag name.
        flag: String,
        /// Element kind that lacks a decoder.
        kind: ElementKind,
    },

    /// A collected occurrence of a sequence flag failed to decode.
    #[error("invalid value {value:?} at position {index} for flag {flag}: {source}")]
    InvalidElement {
        /// Fully-qualified flag name.
        flag: String,
        /// Position of the occurrence within the collected values.
        index: usize,
        /// Raw occurrence text.
        value: String,
        /// Underlying lexical failure.
        #[source]
        source: ValueError,
    },

    /// `clap` rejected the argument vector.
    #[error("failed to parse command-line arguments: {0}")]
    Cli(#[from] Box<clap::Error>),

    /// A command-line value failed the flag's parser.
    #[error("invalid value {value:?} for flag --{flag}: {source}")]
    InvalidValue {
        /// Flag name as registered.
        flag: String,
        /// Raw value supplied on the command line.
        value: String,
        /// Underlying lexical failure.
        #[source]
        source: ValueError,
    },

    /// The same flag name was registered more than once on a flag set.
    #[error("flag redefined: {flag}")]
    Redefined {
        /// Flag name registered twice.
        flag: String,
    },
}

impl FlagError {
    /// Whether this is `clap` asking to print help or version output.
    ///
    /// Such errors are not failures; callers usually print them and exit
    /// successfully via [`clap::Error::exit`].
    #[must_use]
    pub fn is_display_request(&self) -> bool {
        matches!(
            self,
            Self::Cli(err) if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            )
        )
    }
}

/// Lexical failures when converting flag text into a native value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValueError {
    /// Integer text was malformed or overflowed the parse width.
    #[error("invalid integer: {0}")]
    Int(#[from] ParseIntError),

    /// Floating-point text was malformed.
    #[error("invalid float: {0}")]
    Float(#[from] ParseFloatError),

    /// Text is not one of the recognised boolean forms.
    #[error("invalid boolean {0:?}")]
    Bool(String),

    /// The parsed number does not fit the target type.
    #[error("value {value} out of range for {target}")]
    OutOfRange {
        /// Textual form of the parsed number.
        value: String,
        /// Name of the type it was narrowed into.
        target: &'static str,
    },

    /// Duration text was malformed.
    #[error(transparent)]
    Duration(#[from] DurationError),
}

/// Failures of the duration grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DurationError {
    /// The text does not follow the `<number><unit>` grammar.
    #[error("invalid duration {0:?}")]
    Invalid(String),

    /// A number was not followed by a unit.
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    /// A unit suffix is not recognised.
    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit {
        /// Offending unit text.
        unit: String,
        /// Whole duration text.
        input: String,
    },

    /// Negative durations cannot be represented.
    #[error("negative duration {0:?}")]
    Negative(String),

    /// The total exceeds the representable range.
    #[error("duration {0:?} overflows")]
    Overflow(String),
}
