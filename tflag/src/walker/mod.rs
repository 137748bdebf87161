//! Structural traversal of configuration types.
//!
//! `#[derive(Flags)]` emits a [`Flags`] impl that hands each field, its name
//! and its tag bag to [`Walker::field`] in declaration order. The field's
//! [`Field`] impl then decides how it is bound: scalars register directly,
//! `Vec`s register a collector plus a deferred decoder, and nested structs
//! recurse through [`Walker::descend`] with an extended prefix.

use crate::deferred::ParseFn;
use crate::descriptor::Descriptor;
use crate::error::{FlagError, FlagResult};
use crate::registrar::Registrar;

/// A configuration struct whose fields can be bound to flags.
///
/// Implemented by `#[derive(Flags)]`.
pub trait Flags {
    /// Binds every field of `self`, qualifying flag names with `prefix`.
    ///
    /// # Errors
    ///
    /// Propagates the first field binding failure.
    fn bind_fields<'a, R>(
        &'a mut self,
        prefix: &str,
        walker: &mut Walker<'a, '_, R>,
    ) -> FlagResult<()>
    where
        R: Registrar<'a> + ?Sized;
}

/// A field type that knows how to bind itself.
///
/// Scalar and `Vec` impls ship with the crate; `#[derive(Flags)]` adds one for
/// each derived struct so it can be nested inside another.
pub trait Field {
    /// Binds `self` under `prefix` using the decoded descriptor.
    ///
    /// # Errors
    ///
    /// Returns a [`FlagError`] when the field's default text is invalid or,
    /// in strict mode, when the type is unsupported.
    fn bind_field<'a, R>(
        &'a mut self,
        desc: &Descriptor,
        prefix: &str,
        walker: &mut Walker<'a, '_, R>,
    ) -> FlagResult<()>
    where
        R: Registrar<'a> + ?Sized;
}

/// A binding root, possibly behind indirections.
///
/// Derived structs resolve to themselves; `Box`, `&mut` and `Option` resolve
/// through to their contents, with `None` rejected as
/// [`FlagError::NilConfig`].
pub trait Bindable {
    /// The struct reached after resolving indirections.
    type Config: Flags + ?Sized;

    /// Resolves to the configuration struct.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::NilConfig`] when an indirection is empty.
    fn config_mut(&mut self) -> FlagResult<&mut Self::Config>;
}

impl<T: Bindable + ?Sized> Bindable for Box<T> {
    type Config = T::Config;

    fn config_mut(&mut self) -> FlagResult<&mut Self::Config> {
        (**self).config_mut()
    }
}

impl<T: Bindable + ?Sized> Bindable for &mut T {
    type Config = T::Config;

    fn config_mut(&mut self) -> FlagResult<&mut Self::Config> {
        (**self).config_mut()
    }
}

impl<T: Bindable> Bindable for Option<T> {
    type Config = T::Config;

    fn config_mut(&mut self) -> FlagResult<&mut Self::Config> {
        self.as_mut().ok_or(FlagError::NilConfig)?.config_mut()
    }
}

/// How fields whose type has no flag binding are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnsupportedField {
    /// Skip the field and emit a warning event.
    #[default]
    Skip,
    /// Fail the walk with [`FlagError::UnsupportedField`].
    Reject,
}

/// Traversal state threaded through a binding pass.
pub struct Walker<'a, 'r, R: ?Sized> {
    target: &'r mut R,
    deferred: ParseFn<'a>,
    unsupported: UnsupportedField,
}

impl<'a, 'r, R> Walker<'a, 'r, R>
where
    R: Registrar<'a> + ?Sized,
{
    fn new(target: &'r mut R, unsupported: UnsupportedField) -> Self {
        Self {
            target,
            deferred: ParseFn::new(),
            unsupported,
        }
    }

    /// Decodes a field's descriptor and binds it unless it is skipped.
    ///
    /// # Errors
    ///
    /// Propagates the field's binding failure.
    pub fn field<F>(
        &mut self,
        prefix: &str,
        name: &str,
        tags: &[(&str, &str)],
        field: &'a mut F,
    ) -> FlagResult<()>
    where
        F: Field + ?Sized,
    {
        let desc = Descriptor::decode(name, tags);
        if desc.is_skipped() {
            tracing::debug!(field = name, prefix, "skipping field");
            return Ok(());
        }
        field.bind_field(&desc, prefix, self)
    }

    /// Recurses into a nested struct under `prefix + flag + "."`.
    ///
    /// # Errors
    ///
    /// Propagates failures from the nested struct's fields.
    pub fn descend<T>(
        &mut self,
        desc: &Descriptor,
        prefix: &str,
        nested: &'a mut T,
    ) -> FlagResult<()>
    where
        T: Flags + ?Sized,
    {
        let child = format!("{}.", desc.qualified(prefix));
        nested.bind_fields(&child, self)
    }

    /// Handles a field whose type has no flag binding.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::UnsupportedField`] under
    /// [`UnsupportedField::Reject`].
    pub fn unsupported(
        &mut self,
        desc: &Descriptor,
        prefix: &str,
        type_name: &'static str,
    ) -> FlagResult<()> {
        let flag = desc.qualified(prefix);
        match self.unsupported {
            UnsupportedField::Skip => {
                tracing::warn!(flag = %flag, type_name, "skipping field with unsupported type");
                Ok(())
            }
            UnsupportedField::Reject => Err(FlagError::UnsupportedField { flag, type_name }),
        }
    }

    /// The registration target flags are bound against.
    pub const fn registrar(&mut self) -> &mut R {
        &mut *self.target
    }

    /// Queues a callback to run when the parse function is called.
    pub fn defer<F>(&mut self, callback: F)
    where
        F: FnMut() -> FlagResult<()> + 'a,
    {
        self.deferred.push(callback);
    }
}

/// Binds configuration structs against a registration target.
///
/// # Examples
///
/// ```
/// use tflag::{Binder, Flags, RecordingTarget, Recorded};
///
/// #[derive(Flags)]
/// struct Http {
///     #[tflag(flag = "addr", default = "127.0.0.1:2233")]
///     addr: String,
/// }
///
/// let mut cfg = Http { addr: String::new() };
/// let mut target = RecordingTarget::new();
/// let _parse = Binder::new("http").bind(&mut target, &mut cfg)?;
/// let recorded = target.get("http.addr").map(|r| r.value.clone());
/// assert_eq!(recorded, Some(Recorded::String("127.0.0.1:2233".into())));
/// # Ok::<(), tflag::FlagError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Binder {
    namespace: String,
    unsupported: UnsupportedField,
}

impl Binder {
    /// Creates a binder whose flags live under `namespace`.
    ///
    /// An empty namespace registers flags without a prefix.
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            unsupported: UnsupportedField::Skip,
        }
    }

    /// Sets the policy for fields whose type has no flag binding.
    #[must_use]
    pub const fn unsupported(mut self, policy: UnsupportedField) -> Self {
        self.unsupported = policy;
        self
    }

    /// Shorthand for [`UnsupportedField::Reject`].
    #[must_use]
    pub const fn reject_unsupported(self) -> Self {
        self.unsupported(UnsupportedField::Reject)
    }

    /// The namespace flags are registered under.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn prefix(&self) -> String {
        if self.namespace.is_empty() {
            String::new()
        } else {
            format!("{}.", self.namespace)
        }
    }

    /// Walks `config`, registering its fields against `target`.
    ///
    /// Scalar fields are registered immediately. The returned [`ParseFn`]
    /// decodes sequence fields and must be called after `target` has parsed
    /// the command line.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::NilConfig`] before any registration when `config`
    /// resolves to `None`, and [`FlagError::InvalidDefault`] or
    /// [`FlagError::UnsupportedField`] at the first offending field. Flags
    /// registered before the failure stay registered.
    pub fn bind<'a, R, C>(&self, target: &mut R, config: &'a mut C) -> FlagResult<ParseFn<'a>>
    where
        R: Registrar<'a> + ?Sized,
        C: Bindable + ?Sized,
    {
        let root = config.config_mut()?;
        let prefix = self.prefix();
        let mut walker = Walker::new(target, self.unsupported);
        root.bind_fields(&prefix, &mut walker)?;
        tracing::debug!(
            namespace = %self.namespace,
            deferred = walker.deferred.len(),
            "bound configuration flags"
        );
        Ok(walker.deferred)
    }
}
