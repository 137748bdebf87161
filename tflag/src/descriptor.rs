//! Binding descriptors decoded from a field's declarative tags.

/// Flag name that excludes a field from binding.
pub const SKIP: &str = "-";

/// Normalised binding metadata for one field.
///
/// Built once per field by [`Descriptor::decode`] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    flag: String,
    usage: String,
    default: String,
    env: String,
}

impl Descriptor {
    /// Decodes a descriptor from a field name and its tag bag.
    ///
    /// Recognised keys are `flag`, `usage`, `default` and `env`; anything
    /// else is ignored. Without a `flag` tag the lower-cased field name is
    /// used. A repeated key keeps its last value.
    ///
    /// # Examples
    ///
    /// ```
    /// use tflag::Descriptor;
    ///
    /// let desc = Descriptor::decode("Timeout", &[("usage", "http timeout")]);
    /// assert_eq!(desc.flag(), "timeout");
    /// assert_eq!(desc.usage(), "http timeout");
    /// assert_eq!(desc.default_text(), "");
    /// ```
    #[must_use]
    pub fn decode(field_name: &str, tags: &[(&str, &str)]) -> Self {
        let mut desc = Self {
            flag: field_name.to_lowercase(),
            ..Self::default()
        };
        for &(key, value) in tags {
            match key {
                "flag" => value.clone_into(&mut desc.flag),
                "env" => value.clone_into(&mut desc.env),
                "usage" => value.clone_into(&mut desc.usage),
                "default" => value.clone_into(&mut desc.default),
                _ => {}
            }
        }
        desc
    }

    /// Flag name relative to the current prefix.
    #[must_use]
    pub fn flag(&self) -> &str {
        &self.flag
    }

    /// Help text for the flag.
    #[must_use]
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Unparsed default value text; empty when absent.
    #[must_use]
    pub fn default_text(&self) -> &str {
        &self.default
    }

    /// Environment alias. Captured for callers; the binder never reads it.
    #[must_use]
    pub fn env(&self) -> &str {
        &self.env
    }

    /// Whether the field is excluded from binding.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.flag == SKIP
    }

    /// Joins `prefix` and the flag name into the registered name.
    #[must_use]
    pub fn qualified(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.flag)
    }
}

#[cfg(test)]
mod tests {
    //! Tag decoding rules.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn falls_back_to_lowercased_field_name() {
        let desc = Descriptor::decode("IntVar", &[]);
        assert_eq!(desc.flag(), "intvar");
        assert_eq!(desc, Descriptor {
            flag: "intvar".into(),
            ..Descriptor::default()
        });
    }

    #[rstest]
    fn captures_every_recognised_key() {
        let desc = Descriptor::decode(
            "addr",
            &[
                ("flag", "listen"),
                ("env", "HTTP_ADDR"),
                ("usage", "listen address"),
                ("default", "127.0.0.1:2233"),
            ],
        );
        assert_eq!(desc.flag(), "listen");
        assert_eq!(desc.env(), "HTTP_ADDR");
        assert_eq!(desc.usage(), "listen address");
        assert_eq!(desc.default_text(), "127.0.0.1:2233");
    }

    #[rstest]
    #[case(&[("flag", "-")], true)]
    #[case(&[("flag", "--")], false)]
    #[case(&[], false)]
    fn recognises_the_skip_sentinel(#[case] tags: &[(&str, &str)], #[case] skipped: bool) {
        assert_eq!(Descriptor::decode("field", tags).is_skipped(), skipped);
    }

    #[rstest]
    fn ignores_unknown_keys_and_keeps_last_duplicate() {
        let desc = Descriptor::decode(
            "Port",
            &[("json", "port"), ("usage", "first"), ("usage", "second")],
        );
        assert_eq!(desc.flag(), "port");
        assert_eq!(desc.usage(), "second");
    }

    #[rstest]
    #[case("", "port")]
    #[case("http.", "http.port")]
    fn qualifies_against_prefix(#[case] prefix: &str, #[case] expected: &str) {
        assert_eq!(Descriptor::decode("Port", &[]).qualified(prefix), expected);
    }
}
