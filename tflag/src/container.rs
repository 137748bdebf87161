//! Sequence fields: occurrence collection and deferred element decoding.
//!
//! A `Vec<E>` field registers a [`StringCollector`] that accumulates every
//! occurrence of its flag. Decoding into `E` waits for the [`ParseFn`]
//! callback, because the registry only fills the collector while parsing.
//!
//! [`ParseFn`]: crate::ParseFn

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::descriptor::Descriptor;
use crate::error::{FlagError, FlagResult, ValueError};
use crate::registrar::{Registrar, Value};
use crate::value::{narrow, parse_bool, parse_f64, parse_i64, parse_u64};
use crate::walker::{Field, Walker};

/// Accumulates every occurrence of a repeated flag, in order.
///
/// Clones share the same storage, so the registry and the deferred decoder
/// see the same values.
#[derive(Debug, Clone, Default)]
pub struct StringCollector {
    values: Rc<RefCell<Vec<String>>>,
}

impl StringCollector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the collected occurrences.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.values.borrow().clone()
    }

    /// Number of collected occurrences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// Whether nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl Value for StringCollector {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        self.values.borrow_mut().push(raw.to_owned());
        Ok(())
    }

    fn render(&self) -> String {
        self.values.borrow().join(",")
    }
}

/// Element type of a sequence field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ElementKind {
    /// `bool`
    Bool,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `isize`
    Isize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `usize`
    Usize,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `String`
    String,
    /// `char`
    Char,
    /// `Duration`
    Duration,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "String",
            Self::Char => "char",
            Self::Duration => "Duration",
        };
        f.write_str(name)
    }
}

/// Converts one collected occurrence into an element.
pub type Decoder<T> = fn(&str) -> Result<T, ValueError>;

/// A type that can appear as the element of a sequence field.
///
/// Element types without a decoder still bind; decoding fails with
/// [`FlagError::UnsupportedElement`] when the parse function runs.
pub trait Element: Sized + 'static {
    /// The element's kind, reported in errors.
    const KIND: ElementKind;

    /// The decoder for this element type, if there is one.
    fn decoder() -> Option<Decoder<Self>>;
}

fn decode_signed<T: TryFrom<i64>>(raw: &str) -> Result<T, ValueError> {
    narrow(parse_i64(raw)?, std::any::type_name::<T>())
}

fn decode_unsigned<T: TryFrom<u64>>(raw: &str) -> Result<T, ValueError> {
    narrow(parse_u64(raw)?, std::any::type_name::<T>())
}

fn decode_f32(raw: &str) -> Result<f32, ValueError> {
    Ok(raw.parse::<f32>()?)
}

fn decode_string(raw: &str) -> Result<String, ValueError> {
    Ok(raw.to_owned())
}

macro_rules! element {
    ($($ty:ty => $kind:ident, $decoder:expr;)*) => {
        $(
            impl Element for $ty {
                const KIND: ElementKind = ElementKind::$kind;

                fn decoder() -> Option<Decoder<Self>> {
                    let decoder: Option<Decoder<Self>> = $decoder;
                    decoder
                }
            }
        )*
    };
}

element! {
    bool => Bool, Some(parse_bool);
    i8 => I8, Some(decode_signed::<i8>);
    i16 => I16, Some(decode_signed::<i16>);
    i32 => I32, Some(decode_signed::<i32>);
    i64 => I64, Some(decode_signed::<i64>);
    isize => Isize, Some(decode_signed::<isize>);
    u8 => U8, Some(decode_unsigned::<u8>);
    u16 => U16, Some(decode_unsigned::<u16>);
    u32 => U32, Some(decode_unsigned::<u32>);
    u64 => U64, Some(decode_unsigned::<u64>);
    usize => Usize, Some(decode_unsigned::<usize>);
    f32 => F32, Some(decode_f32);
    f64 => F64, Some(parse_f64);
    String => String, Some(decode_string);
    char => Char, None;
    Duration => Duration, None;
}

/// Decodes every collected occurrence, replacing `field` only when all of
/// them succeed.
fn decode_into<E: Element>(
    flag: &str,
    collector: &StringCollector,
    field: &mut Vec<E>,
) -> FlagResult<()> {
    let decode = E::decoder().ok_or_else(|| FlagError::UnsupportedElement {
        flag: flag.to_owned(),
        kind: E::KIND,
    })?;
    let decoded = collector
        .values
        .borrow()
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            decode(raw).map_err(|source| FlagError::InvalidElement {
                flag: flag.to_owned(),
                index,
                value: raw.clone(),
                source,
            })
        })
        .collect::<FlagResult<Vec<E>>>()?;
    *field = decoded;
    Ok(())
}

impl<E: Element> Field for Vec<E> {
    fn bind_field<'a, R>(
        &'a mut self,
        desc: &Descriptor,
        prefix: &str,
        walker: &mut Walker<'a, '_, R>,
    ) -> FlagResult<()>
    where
        R: Registrar<'a> + ?Sized,
    {
        let flag = desc.qualified(prefix);
        let collector = StringCollector::new();
        walker
            .registrar()
            .var(Box::new(collector.clone()), &flag, desc.usage());
        tracing::debug!(flag = %flag, element = %E::KIND, "registering sequence flag");
        let field = self;
        walker.defer(move || decode_into(&flag, &collector, &mut *field));
        Ok(())
    }
}
