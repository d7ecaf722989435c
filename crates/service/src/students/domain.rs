use std::str::FromStr;

pub use models::student::{Model as Student, SearchFilters, StudentInput, ValidStudent};

/// Identifier as received from a path segment. A segment that is not an
/// integer is kept as "matches nothing" instead of being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentId(Option<i32>);

impl StudentId {
    pub const fn get(self) -> Option<i32> {
        self.0
    }
}

impl From<i32> for StudentId {
    fn from(id: i32) -> Self {
        Self(Some(id))
    }
}

impl From<&str> for StudentId {
    fn from(raw: &str) -> Self {
        Self(i32::from_str(raw.trim()).ok())
    }
}

impl From<&String> for StudentId {
    fn from(raw: &String) -> Self {
        Self::from(raw.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integers_and_keeps_garbage_as_none() {
        assert_eq!(StudentId::from("42").get(), Some(42));
        assert_eq!(StudentId::from(" 7 ").get(), Some(7));
        assert_eq!(StudentId::from("abc").get(), None);
        assert_eq!(StudentId::from("99999999999").get(), None);
        assert_eq!(StudentId::from(5).get(), Some(5));
    }
}
