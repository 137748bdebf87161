//! End-to-end binding of derived configuration structs.
//!
//! Covers registration against the recording target and full command-line
//! parsing through `FlagSet`, including deferred sequence decoding.

use std::time::Duration;

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use tflag::{Binder, FlagError, FlagSet, Flags, Recorded, RecordingTarget};

#[derive(Debug, Default, Flags)]
struct Foo {
    #[tflag(flag = "intvar", default = "-10")]
    int_var: isize,
    #[tflag(flag = "durationvar", default = "1s")]
    duration_var: Duration,
}

#[derive(Debug, Default, Flags)]
struct WithHelp {
    #[tflag(usage = "help topic")]
    help: String,
}

#[derive(Debug, Default, Flags)]
struct Named {
    #[tflag(flag = "intvar", default = "-10")]
    int_var: isize,
    name: String,
}

#[derive(Debug, Default, Flags)]
struct Svc {
    #[tflag(flag = "flags", usage = "feature switches")]
    switches: Vec<bool>,
}

#[derive(Debug, Default, Flags)]
struct Scalars {
    #[tflag(default = -3)]
    int: isize,
    #[tflag(default = true)]
    enabled: bool,
    #[tflag(default = 7)]
    uint: usize,
    #[tflag(default = "-9000000000")]
    int64: i64,
    #[tflag(default = "hello")]
    text: String,
    #[tflag(default = "18446744073709551615")]
    uint64: u64,
    #[tflag(default = 2.5)]
    ratio: f64,
    #[tflag(default = "1m30s")]
    wait: Duration,
}

#[derive(Debug, Default, Flags)]
struct Limits {
    #[tflag(usage = "allowed ports")]
    ports: Vec<u16>,
    #[tflag(usage = "origins")]
    origins: Vec<String>,
}

#[derive(Debug, Default, Flags)]
struct App {
    #[tflag(flag = "http")]
    http: Limits,
    #[tflag(env = "APP_NAME", default = "demo")]
    name: String,
}

#[derive(Debug, Default, Flags)]
struct Http {
    #[tflag(flag = "addr", usage = "listen address", default = "127.0.0.1:2233")]
    addr: String,
    #[tflag(flag = "timeout", usage = "http timeout", default = "1s")]
    timeout: Duration,
    #[tflag(usage = "allowed CORS origins")]
    origins: Vec<String>,
}

fn recorded(target: &RecordingTarget<'_>, name: &str) -> Result<Recorded> {
    target
        .get(name)
        .map(|registration| registration.value.clone())
        .ok_or_else(|| anyhow!("{name} was not registered"))
}

#[rstest]
fn registers_scalar_defaults_under_namespace() -> Result<()> {
    let mut cfg = Foo::default();
    let mut target = RecordingTarget::new();
    let parse = Binder::new("foo").bind(&mut target, &mut cfg)?;
    ensure!(parse.is_empty(), "scalar fields need no deferred decoding");
    assert_eq!(recorded(&target, "foo.intvar")?, Recorded::Int(-10));
    assert_eq!(
        recorded(&target, "foo.durationvar")?,
        Recorded::Duration(Duration::from_nanos(1_000_000_000))
    );
    assert_eq!(target.len(), 2);
    Ok(())
}

#[rstest]
fn decodes_boolean_sequence_after_feeding() -> Result<()> {
    let mut cfg = Svc::default();
    let mut target = RecordingTarget::new();
    let mut parse = Binder::new("svc").bind(&mut target, &mut cfg)?;
    ensure!(
        target.feed("svc.flags", ["true", "false", "true"])?,
        "svc.flags should be a collector binding"
    );
    let registration = target
        .get("svc.flags")
        .ok_or_else(|| anyhow!("svc.flags missing"))?;
    assert_eq!(registration.usage, "feature switches");
    parse.call()?;
    drop(parse);
    drop(target);
    assert_eq!(cfg.switches, [true, false, true]);
    Ok(())
}

#[rstest]
fn feed_reports_missing_collectors() -> Result<()> {
    let mut target = RecordingTarget::new();
    ensure!(!target.feed("nothing", ["x"])?, "no collector is registered");
    Ok(())
}

#[rstest]
fn every_scalar_kind_parses_its_default() -> Result<()> {
    let mut cfg = Scalars::default();
    let mut flags = FlagSet::new("scalars");
    let parse = tflag::var_flag_set(&mut flags, "s", &mut cfg)?;
    let names: Vec<String> = flags.flags().map(|info| info.name).collect();
    assert_eq!(
        names,
        [
            "s.int", "s.enabled", "s.uint", "s.int64", "s.text", "s.uint64", "s.ratio", "s.wait"
        ]
    );
    drop(parse);
    drop(flags);
    assert_eq!(cfg.int, -3);
    ensure!(cfg.enabled, "bool default should be applied");
    assert_eq!(cfg.uint, 7);
    assert_eq!(cfg.int64, -9_000_000_000);
    assert_eq!(cfg.text, "hello");
    assert_eq!(cfg.uint64, u64::MAX);
    assert_eq!(cfg.ratio.to_string(), "2.5");
    assert_eq!(cfg.wait, Duration::from_secs(90));
    Ok(())
}

#[rstest]
fn command_line_overrides_defaults_and_fills_sequences() -> Result<()> {
    let mut cfg = App::default();
    let mut flags = FlagSet::new("app");
    let mut parse = tflag::var_flag_set(&mut flags, "app", &mut cfg)?;
    flags.parse_from([
        "app",
        "--app.http.ports",
        "80",
        "--app.http.ports=443",
        "--app.http.origins",
        "https://example.test",
        "--app.name",
        "edge",
    ])?;
    parse.call()?;
    drop(parse);
    drop(flags);
    assert_eq!(cfg.http.ports, [80_u16, 443]);
    assert_eq!(cfg.http.origins, ["https://example.test"]);
    assert_eq!(cfg.name, "edge");
    Ok(())
}

#[rstest]
fn failed_element_leaves_sequence_unmodified() -> Result<()> {
    let mut cfg = Limits {
        ports: vec![22],
        origins: Vec::new(),
    };
    let mut flags = FlagSet::new("limits");
    let mut parse = tflag::var_flag_set(&mut flags, "", &mut cfg)?;
    flags.parse_from(["limits", "--ports", "1", "--ports", "x"])?;
    let err = parse
        .call()
        .err()
        .ok_or_else(|| anyhow!("decoding \"x\" as u16 should fail"))?;
    ensure!(
        matches!(err, FlagError::InvalidElement { index: 1, ref flag, .. } if flag == "ports"),
        "unexpected error: {err}"
    );
    drop(parse);
    drop(flags);
    assert_eq!(cfg.ports, [22_u16]);
    Ok(())
}

#[rstest]
fn calling_the_parse_function_twice_is_idempotent() -> Result<()> {
    let mut cfg = Limits::default();
    let mut flags = FlagSet::new("limits");
    let mut parse = tflag::var_flag_set(&mut flags, "l", &mut cfg)?;
    flags.parse_from(["limits", "--l.ports", "8080", "--l.origins", "a"])?;
    parse.call()?;
    parse.call()?;
    drop(parse);
    drop(flags);
    assert_eq!(cfg.ports, [8080_u16]);
    assert_eq!(cfg.origins, ["a"]);
    Ok(())
}

#[rstest]
fn parse_function_before_parsing_yields_empty_sequences() -> Result<()> {
    let mut cfg = Limits {
        ports: vec![1],
        origins: vec!["stale".to_owned()],
    };
    let mut target = RecordingTarget::new();
    let mut parse = Binder::new("early").bind(&mut target, &mut cfg)?;
    parse.call()?;
    drop(parse);
    drop(target);
    ensure!(cfg.ports.is_empty() && cfg.origins.is_empty(), "sequences should be reset");
    Ok(())
}

#[rstest]
fn var_binds_into_a_program_named_flag_set() -> Result<()> {
    let mut cfg = Foo::default();
    let (flags, _parse) = tflag::var("foo", &mut cfg)?;
    ensure!(!flags.name().is_empty(), "command-line flag set needs a name");
    let info = flags
        .lookup("foo.intvar")
        .ok_or_else(|| anyhow!("foo.intvar missing"))?;
    assert_eq!(info.default, "-10");
    Ok(())
}

#[rstest]
fn boxed_optional_roots_resolve() -> Result<()> {
    let mut cfg: Option<Box<Foo>> = Some(Box::default());
    let mut target = RecordingTarget::new();
    let _parse = Binder::new("boxed").bind(&mut target, &mut cfg)?;
    assert_eq!(target.names(), ["boxed.intvar", "boxed.durationvar"]);
    Ok(())
}

#[rstest]
fn field_named_help_binds_to_the_help_flag() -> Result<()> {
    let mut cfg = WithHelp::default();
    let mut flags = FlagSet::new("app");
    let parse = tflag::var_flag_set(&mut flags, "", &mut cfg)?;
    flags.parse_from(["app", "--help", "x"])?;
    drop(parse);
    drop(flags);
    assert_eq!(cfg.help, "x");
    Ok(())
}

#[rstest]
#[case("--foo.intvar", "-5")]
#[case("--foo.name", "-x")]
fn values_starting_with_a_hyphen_are_accepted(
    #[case] flag: &str,
    #[case] value: &str,
) -> Result<()> {
    let mut cfg = Named::default();
    let mut flags = FlagSet::new("app");
    let parse = tflag::var_flag_set(&mut flags, "foo", &mut cfg)?;
    flags.parse_from(["app", flag, value])?;
    drop(parse);
    drop(flags);
    let rendered = if flag.ends_with("intvar") {
        cfg.int_var.to_string()
    } else {
        cfg.name
    };
    assert_eq!(rendered, value);
    Ok(())
}

#[rstest]
fn http_configuration_keeps_defaults_and_collects_origins() -> Result<()> {
    let mut cfg = Http::default();
    let mut flags = FlagSet::new("server");
    let mut parse = tflag::var_flag_set(&mut flags, "http", &mut cfg)?;
    flags.parse_from([
        "server",
        "--http.timeout=5s",
        "--http.origins",
        "a",
        "--http.origins",
        "b",
    ])?;
    parse.call()?;
    drop(parse);
    drop(flags);
    assert_eq!(cfg.addr, "127.0.0.1:2233");
    assert_eq!(cfg.timeout, Duration::from_secs(5));
    assert_eq!(cfg.origins, ["a", "b"]);
    Ok(())
}
