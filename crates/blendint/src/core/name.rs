use std::{any::type_name, fmt, str::FromStr};

use convert_case::{Case, Casing};

use crate::error::{Error, Result};

/// Fallback used when a name has no usable characters.
const FALLBACK: &str = "view";

/// A view name: lowercase ASCII letters, digits and underscores.
///
/// Names are used by the debug dump and for looking views up in tests; they
/// are not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewName(String);

/// Is this character allowed in a view name?
fn allowed(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

impl ViewName {
    /// Snake-case an arbitrary string and strip everything that is not allowed.
    ///
    /// `ColorWheel` becomes `color_wheel`, an empty result becomes `view`.
    pub fn convert(raw: &str) -> Self {
        let cleaned: String = raw
            .to_case(Case::Snake)
            .chars()
            .filter(|c| allowed(*c))
            .collect();
        if cleaned.is_empty() {
            Self(FALLBACK.to_string())
        } else {
            Self(cleaned)
        }
    }

    /// Derive a name from the last path segment of a Rust type name.
    pub fn of_type<T: ?Sized>() -> Self {
        let full = type_name::<T>();
        let base = full.split('<').next().unwrap_or(full);
        Self::convert(base.rsplit("::").next().unwrap_or(base))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ViewName {
    type Err = Error;

    /// Parse a name strictly, rejecting anything `convert` would have changed.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || !s.chars().all(allowed) {
            return Err(Error::Invalid(format!("bad view name: {s:?}")));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for ViewName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ColorWheel;
    struct Wrapper<T>(T);

    #[test]
    fn convert_and_parse() {
        assert_eq!(ViewName::convert("MenuItemBin"), "menu_item_bin");
        assert_eq!(ViewName::convert("Tool Button"), "tool_button");
        assert_eq!(ViewName::convert("?!"), "view");
        assert!("menu_item".parse::<ViewName>().is_ok());
        assert!("MenuItem".parse::<ViewName>().is_err());
        assert!("".parse::<ViewName>().is_err());
    }

    #[test]
    fn from_type_names() {
        assert_eq!(ViewName::of_type::<ColorWheel>(), "color_wheel");
        assert_eq!(ViewName::of_type::<Wrapper<ColorWheel>>(), "wrapper");
    }
}
