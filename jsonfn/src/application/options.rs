use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::domain::DEFAULT_MAX_DEPTH;

/// How a selector name becomes a relation accessor name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    /// `author` looks up accessor `Author`.
    #[default]
    UpperFirst,
    /// The selector name is used as is.
    Verbatim,
}

impl NamingConvention {
    pub fn accessor_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            NamingConvention::UpperFirst => Cow::Owned(upper_first(name)),
            NamingConvention::Verbatim => Cow::Borrowed(name),
        }
    }
}

/// What happens when a nested relation fails to decode or is not map-shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestedErrorPolicy {
    /// Fail the whole projection with the relation path in the error.
    #[default]
    Propagate,
    /// Leave the relation key out and log a warning.
    Omit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionOptions {
    pub naming: NamingConvention,
    /// Maximum relation nesting below the projected root.
    pub max_depth: usize,
    pub nested_errors: NestedErrorPolicy,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            naming: NamingConvention::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            nested_errors: NestedErrorPolicy::default(),
        }
    }
}

/// Upper-cases the first character, leaving the rest untouched.
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("author", "Author")]
    #[case("Author", "Author")]
    #[case("a", "A")]
    #[case("", "")]
    #[case("ärger", "Ärger")]
    #[case("ßtraße", "SStraße")]
    fn test_upper_first(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(upper_first(input), expected);
    }

    #[test]
    fn test_accessor_name() {
        assert_eq!(NamingConvention::UpperFirst.accessor_name("tags"), "Tags");
        assert_eq!(NamingConvention::Verbatim.accessor_name("tags"), "tags");
    }
}
