use tflag as flags_alias;
use flags_alias::Flags;

mod nested {
    pub use tflag as inner;
}

/// Generated code reaches the runtime crate through a re-exported path.
#[derive(Flags)]
#[tflag(crate = "nested::inner")]
struct Renamed<T> {
    #[tflag(default = 3)]
    count: isize,
    inner: T,
}

#[derive(Flags, Default)]
#[tflag(crate = "flags_alias")]
struct Leaf {
    #[tflag(default = true)]
    on: bool,
}

fn main() {
    let mut cfg = Renamed {
        count: 0,
        inner: Leaf::default(),
    };
    let mut flags = nested::inner::FlagSet::new("demo");
    let result = nested::inner::var_flag_set(&mut flags, "r", &mut cfg);
    let _: flags_alias::FlagResult<flags_alias::ParseFn<'_>> = result;
}
