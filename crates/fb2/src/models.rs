use std::fmt::{Display, Formatter, Result as FmtResult};

/// An author identified by the exact first/last name pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuthorName {
    pub first_name: String,
    pub last_name: String,
}
impl AuthorName {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self { first_name: first_name.into(), last_name: last_name.into() }
    }
}
impl<F: Into<String>, L: Into<String>> From<(F, L)> for AuthorName {
    fn from((first_name, last_name): (F, L)) -> Self {
        Self::new(first_name, last_name)
    }
}
impl Display for AuthorName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// Normalized metadata of one book document.
///
/// This is the hand-off between the extraction pipeline and the catalog. The
/// author halves are kept separate; a record only has an author when both
/// are present (see [`author`](Self::author)).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedRecord {
    pub name: String,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
    pub year: Option<i32>,
}
impl ParsedRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), author_first_name: None, author_last_name: None, year: None }
    }

    pub fn with_author(mut self, author: impl Into<AuthorName>) -> Self {
        let author = author.into();
        self.author_first_name = Some(author.first_name);
        self.author_last_name = Some(author.last_name);
        self
    }

    pub fn with_year(mut self, year: impl Into<Option<i32>>) -> Self {
        self.year = year.into();
        self
    }

    /// The author, if and only if both name halves are present.
    pub fn author(&self) -> Option<AuthorName> {
        match (&self.author_first_name, &self.author_last_name) {
            (Some(first), Some(last)) => Some(AuthorName::new(first, last)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_requires_both_halves() {
        let mut record = ParsedRecord::new("Solaris").with_author(("Stanisław", "Lem")).with_year(1961);
        assert_eq!(record.author(), Some(AuthorName::new("Stanisław", "Lem")));
        record.author_last_name = None;
        assert_eq!(record.author(), None);
        record.author_first_name = None;
        record.author_last_name = Some("Lem".to_string());
        assert_eq!(record.author(), None);
    }

    #[test]
    fn test_author_display() {
        assert_eq!(AuthorName::new("John", "Doe").to_string(), "John Doe");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_author_serialization() {
        let json = serde_json::to_value(AuthorName::new("John", "Doe")).unwrap();
        assert_eq!(json, serde_json::json!({"first_name": "John", "last_name": "Doe"}));
    }
}
