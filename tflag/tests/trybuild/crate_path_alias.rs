use std::time::Duration;

use tflag::{Binder, Flags, RecordingTarget};

/// Verifies that `#[tflag(crate = "tflag")]` is accepted and the generated
/// code compiles. Uses the real crate name as a self-referential alias so no
/// workspace reconfiguration is needed.
#[derive(Flags)]
#[tflag(crate = "tflag")]
struct CratePathConfig {
    #[tflag(default = "hello")]
    value: String,
    #[tflag(default = "1s")]
    wait: Duration,
    #[tflag(skip)]
    ignored: std::path::PathBuf,
}

fn main() {
    let mut cfg = CratePathConfig {
        value: String::new(),
        wait: Duration::ZERO,
        ignored: std::path::PathBuf::new(),
    };
    let mut target = RecordingTarget::new();
    let result = Binder::new("alias").bind(&mut target, &mut cfg);
    let _: tflag::FlagResult<tflag::ParseFn<'_>> = result;
}
