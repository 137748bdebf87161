//! The production registry: named flags parsed with `clap`.
//!
//! Registering a flag writes its default into the bound slot straight away.
//! [`FlagSet::parse_from`] builds a [`clap::Command`] with one `--name`
//! argument per flag, then feeds every occurrence to the flag's slot in
//! command-line order, so scalars keep the last value and collectors keep
//! them all.

use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use clap::builder::ValueParser;
use clap::{Arg, ArgAction, Command};

use crate::duration::{format_duration, parse_duration};
use crate::error::{FlagError, FlagResult, ValueError};
use crate::registrar::{Registrar, Value};
use crate::value::{parse_bool, parse_f64, parse_i64, parse_isize, parse_u64, parse_usize};

/// Defaults rendered like this are omitted from help text.
const ZERO_DEFAULTS: &[&str] = &["", "0", "false", "0s"];

/// Id and long name of the generated help argument.
const HELP: &str = "help";

enum Slot<'a> {
    Int(&'a mut isize),
    Bool(&'a mut bool),
    Uint(&'a mut usize),
    Int64(&'a mut i64),
    Str(&'a mut String),
    Uint64(&'a mut u64),
    Float64(&'a mut f64),
    Duration(&'a mut Duration),
    Value(Box<dyn Value + 'a>),
}

impl Slot<'_> {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        match self {
            Self::Int(slot) => **slot = parse_isize(raw)?,
            Self::Bool(slot) => **slot = parse_bool(raw)?,
            Self::Uint(slot) => **slot = parse_usize(raw)?,
            Self::Int64(slot) => **slot = parse_i64(raw)?,
            Self::Str(slot) => raw.clone_into(slot),
            Self::Uint64(slot) => **slot = parse_u64(raw)?,
            Self::Float64(slot) => **slot = parse_f64(raw)?,
            Self::Duration(slot) => **slot = parse_duration(raw)?,
            Self::Value(value) => value.set(raw)?,
        }
        Ok(())
    }

    fn render(&self) -> String {
        match self {
            Self::Int(slot) => slot.to_string(),
            Self::Bool(slot) => slot.to_string(),
            Self::Uint(slot) => slot.to_string(),
            Self::Int64(slot) => slot.to_string(),
            Self::Str(slot) => (**slot).clone(),
            Self::Uint64(slot) => slot.to_string(),
            Self::Float64(slot) => slot.to_string(),
            Self::Duration(slot) => format_duration(**slot),
            Self::Value(value) => value.render(),
        }
    }

    fn is_bool(&self) -> bool {
        match self {
            Self::Bool(_) => true,
            Self::Value(value) => value.is_bool_flag(),
            _ => false,
        }
    }
}

struct Flag<'a> {
    name: String,
    usage: String,
    default: String,
    slot: Slot<'a>,
}

impl Flag<'_> {
    fn help(&self) -> String {
        if ZERO_DEFAULTS.contains(&self.default.as_str()) {
            self.usage.clone()
        } else if self.usage.is_empty() {
            format!("[default: {}]", self.default)
        } else {
            format!("{} [default: {}]", self.usage, self.default)
        }
    }

    fn arg(&self) -> Arg {
        let arg = Arg::new(self.name.clone())
            .long(self.name.clone())
            .help(self.help())
            .action(ArgAction::Append)
            .value_parser(ValueParser::string());
        if self.slot.is_bool() {
            arg.num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
        } else {
            arg.num_args(1).allow_hyphen_values(true)
        }
    }

    fn info(&self) -> FlagInfo {
        FlagInfo {
            name: self.name.clone(),
            usage: self.usage.clone(),
            default: self.default.clone(),
            value: self.slot.render(),
        }
    }
}

/// A snapshot of one registered flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagInfo {
    /// Registered name, without leading dashes.
    pub name: String,
    /// Help text.
    pub usage: String,
    /// Default rendered at registration time.
    pub default: String,
    /// Current value rendered from the bound slot.
    pub value: String,
}

/// A set of named flags bound to borrowed slots.
///
/// # Examples
///
/// ```
/// use tflag::FlagSet;
///
/// let mut port = 0_isize;
/// let mut flags = FlagSet::new("server");
/// tflag::Registrar::int_var(&mut flags, &mut port, "port", 8080, "listen port");
/// flags.parse_from(["server", "--port", "9090"])?;
/// drop(flags);
/// assert_eq!(port, 9090);
/// # Ok::<(), tflag::FlagError>(())
/// ```
pub struct FlagSet<'a> {
    name: String,
    flags: Vec<Flag<'a>>,
    redefined: Vec<String>,
    parsed: bool,
}

impl<'a> FlagSet<'a> {
    /// Creates an empty flag set whose command is called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: Vec::new(),
            redefined: Vec::new(),
            parsed: false,
        }
    }

    /// Creates an empty flag set named after the running executable.
    #[must_use]
    pub fn command_line() -> Self {
        let name = std::env::args_os()
            .next()
            .and_then(|arg0| {
                Path::new(&arg0)
                    .file_name()
                    .map(|file| file.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "program".to_owned());
        Self::new(name)
    }

    /// The command name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a parse has completed successfully.
    #[must_use]
    pub const fn parsed(&self) -> bool {
        self.parsed
    }

    /// Looks up a registered flag by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<FlagInfo> {
        self.flags
            .iter()
            .find(|flag| flag.name == name)
            .map(Flag::info)
    }

    /// Snapshots of every registered flag, in registration order.
    pub fn flags(&self) -> impl Iterator<Item = FlagInfo> + '_ {
        self.flags.iter().map(Flag::info)
    }

    /// Builds the `clap` command describing the registered flags.
    ///
    /// A `--help`/`-h` argument is added unless a registered flag is itself
    /// named `help`, in which case that flag owns `--help`.
    #[must_use]
    pub fn command(&self) -> Command {
        let base = Command::new(self.name.clone())
            .disable_version_flag(true)
            .disable_help_flag(true);
        let with_help = if self.flags.iter().any(|flag| flag.name == HELP) {
            base
        } else {
            base.arg(
                Arg::new(HELP)
                    .short('h')
                    .long(HELP)
                    .action(ArgAction::Help)
                    .help("Print help"),
            )
        };
        self.flags
            .iter()
            .fold(with_help, |command, flag| command.arg(flag.arg()))
    }

    /// Parses the process arguments.
    ///
    /// # Errors
    ///
    /// See [`FlagSet::parse_from`].
    pub fn parse(&mut self) -> FlagResult<()> {
        self.parse_from(std::env::args_os())
    }

    /// Parses `args`, whose first item is the program name, and writes every
    /// occurrence into the bound slots.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Redefined`] when a name was registered twice,
    /// [`FlagError::Cli`] when `clap` rejects the arguments (including help
    /// requests), and [`FlagError::InvalidValue`] when a value does not parse
    /// for its flag.
    pub fn parse_from<I, T>(&mut self, args: I) -> FlagResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        if let Some(flag) = self.redefined.first() {
            return Err(FlagError::Redefined { flag: flag.clone() });
        }
        let matches = self
            .command()
            .try_get_matches_from(args)
            .map_err(Box::new)?;
        for flag in &mut self.flags {
            let Some(values) = matches.get_many::<String>(&flag.name) else {
                continue;
            };
            for raw in values {
                flag.slot
                    .set(raw)
                    .map_err(|source| FlagError::InvalidValue {
                        flag: flag.name.clone(),
                        value: raw.clone(),
                        source,
                    })?;
            }
        }
        self.parsed = true;
        Ok(())
    }

    fn register(&mut self, name: &str, usage: &str, slot: Slot<'a>) {
        if self.flags.iter().any(|flag| flag.name == name) {
            tracing::warn!(flag = name, command = %self.name, "flag redefined");
            self.redefined.push(name.to_owned());
            return;
        }
        tracing::debug!(flag = name, command = %self.name, "flag registered");
        self.flags.push(Flag {
            name: name.to_owned(),
            usage: usage.to_owned(),
            default: slot.render(),
            slot,
        });
    }
}

impl fmt::Debug for FlagSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagSet")
            .field("name", &self.name)
            .field(
                "flags",
                &self.flags.iter().map(|flag| &flag.name).collect::<Vec<_>>(),
            )
            .field("parsed", &self.parsed)
            .finish()
    }
}

impl<'a> Registrar<'a> for FlagSet<'a> {
    fn var(&mut self, value: Box<dyn Value + 'a>, name: &str, usage: &str) {
        self.register(name, usage, Slot::Value(value));
    }

    fn int_var(&mut self, slot: &'a mut isize, name: &str, value: isize, usage: &str) {
        *slot = value;
        self.register(name, usage, Slot::Int(slot));
    }

    fn bool_var(&mut self, slot: &'a mut bool, name: &str, value: bool, usage: &str) {
        *slot = value;
        self.register(name, usage, Slot::Bool(slot));
    }

    fn uint_var(&mut self, slot: &'a mut usize, name: &str, value: usize, usage: &str) {
        *slot = value;
        self.register(name, usage, Slot::Uint(slot));
    }

    fn int64_var(&mut self, slot: &'a mut i64, name: &str, value: i64, usage: &str) {
        *slot = value;
        self.register(name, usage, Slot::Int64(slot));
    }

    fn string_var(&mut self, slot: &'a mut String, name: &str, value: &str, usage: &str) {
        value.clone_into(slot);
        self.register(name, usage, Slot::Str(slot));
    }

    fn uint64_var(&mut self, slot: &'a mut u64, name: &str, value: u64, usage: &str) {
        *slot = value;
        self.register(name, usage, Slot::Uint64(slot));
    }

    fn float64_var(&mut self, slot: &'a mut f64, name: &str, value: f64, usage: &str) {
        *slot = value;
        self.register(name, usage, Slot::Float64(slot));
    }

    fn duration_var(&mut self, slot: &'a mut Duration, name: &str, value: Duration, usage: &str) {
        *slot = value;
        self.register(name, usage, Slot::Duration(slot));
    }
}
