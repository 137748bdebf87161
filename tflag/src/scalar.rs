//! [`Field`] impls for scalar types.
//!
//! Each supported scalar parses its `default` text (empty text means the
//! type's zero value) and registers through the matching [`Registrar`]
//! operation. Other numeric widths, `char`, paths, `Option`, `Box`, arrays,
//! maps, sets and tuples have no registrar operation and are routed to
//! [`Walker::unsupported`].

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::path::PathBuf;
use std::time::Duration;

use crate::descriptor::Descriptor;
use crate::duration::parse_duration;
use crate::error::{FlagError, FlagResult, ValueError};
use crate::registrar::Registrar;
use crate::value::{parse_bool, parse_f64, parse_i64, parse_isize, parse_u64, parse_uint};
use crate::walker::{Field, Walker};

pub(crate) fn parse_duration_value(raw: &str) -> Result<Duration, ValueError> {
    Ok(parse_duration(raw)?)
}

fn parse_default<T: Default>(
    desc: &Descriptor,
    flag: &str,
    parse: fn(&str) -> Result<T, ValueError>,
) -> FlagResult<T> {
    let text = desc.default_text();
    if text.is_empty() {
        return Ok(T::default());
    }
    parse(text).map_err(|source| FlagError::InvalidDefault {
        flag: flag.to_owned(),
        source,
    })
}

macro_rules! scalar_field {
    ($($ty:ty => $register:ident, $parse:path;)*) => {
        $(
            impl Field for $ty {
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
                    let value: $ty = parse_default(desc, &flag, $parse)?;
                    tracing::debug!(flag = %flag, default = ?value, "registering flag");
                    walker.registrar().$register(self, &flag, value, desc.usage());
                    Ok(())
                }
            }
        )*
    };
}

scalar_field! {
    isize => int_var, parse_isize;
    bool => bool_var, parse_bool;
    usize => uint_var, parse_uint;
    i64 => int64_var, parse_i64;
    u64 => uint64_var, parse_u64;
    f64 => float64_var, parse_f64;
    Duration => duration_var, parse_duration_value;
}

impl Field for String {
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
        tracing::debug!(flag = %flag, default = desc.default_text(), "registering flag");
        walker
            .registrar()
            .string_var(self, &flag, desc.default_text(), desc.usage());
        Ok(())
    }
}

macro_rules! unsupported_field {
    ($([$($generics:tt)*] $ty:ty),* $(,)?) => {
        $(
            impl<$($generics)*> Field for $ty {
                fn bind_field<'a, R>(
                    &'a mut self,
                    desc: &Descriptor,
                    prefix: &str,
                    walker: &mut Walker<'a, '_, R>,
                ) -> FlagResult<()>
                where
                    R: Registrar<'a> + ?Sized,
                {
                    walker.unsupported(desc, prefix, std::any::type_name::<Self>())
                }
            }
        )*
    };
}

unsupported_field! {
    [] i8,
    [] i16,
    [] i32,
    [] i128,
    [] u8,
    [] u16,
    [] u32,
    [] u128,
    [] f32,
    [] char,
    [] PathBuf,
    [] (),
    [T] Option<T>,
    [T: ?Sized] Box<T>,
    [T, const N: usize] [T; N],
    [K, V, S] HashMap<K, V, S>,
    [T, S] HashSet<T, S>,
    [K, V] BTreeMap<K, V>,
    [T] BTreeSet<T>,
    [T] VecDeque<T>,
    [A] (A,),
    [A, B] (A, B),
    [A, B, C] (A, B, C),
    [A, B, C, D] (A, B, C, D),
}
