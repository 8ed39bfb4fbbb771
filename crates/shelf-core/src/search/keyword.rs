//! Search keyword validation
//!
//! Runs before any catalog request is built.

use serde::Serialize;
use thiserror::Error;

/// Characters never sent to the catalog
pub const FORBIDDEN_CHARACTERS: &[char] = &['"', '\'', '`', ';', '#', '-', '/', '*', '='];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeywordError {
    #[error("A book title is required")]
    Empty,
    #[error("Symbols (\"'`;#-/*=) cannot be used, found {0:?}")]
    ForbiddenCharacter(char),
}

/// A keyword that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Keyword(String);

impl Keyword {
    /// Validate user input
    ///
    /// Surrounding whitespace is trimmed; what remains must be non-empty and
    /// free of [`FORBIDDEN_CHARACTERS`].
    pub fn parse(input: &str) -> Result<Self, KeywordError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(KeywordError::Empty);
        }
        if let Some(c) = trimmed.chars().find(|c| FORBIDDEN_CHARACTERS.contains(c)) {
            return Err(KeywordError::ForbiddenCharacter(c));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Catalog query restricting matches to titles
    pub fn title_query(&self) -> String {
        format!("intitle:{}", self.0)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_empty_keywords(#[case] input: &str) {
        assert_eq!(Keyword::parse(input), Err(KeywordError::Empty));
    }

    #[rstest]
    #[case("rust#book", '#')]
    #[case("say \"hi\"", '"')]
    #[case("it's", '\'')]
    #[case("`cmd`", '`')]
    #[case("a;b", ';')]
    #[case("x-y", '-')]
    #[case("a/b", '/')]
    #[case("a*", '*')]
    #[case("a=b", '=')]
    fn test_forbidden_characters(#[case] input: &str, #[case] found: char) {
        assert_eq!(
            Keyword::parse(input),
            Err(KeywordError::ForbiddenCharacter(found))
        );
    }

    #[test]
    fn test_valid_keyword_is_trimmed() {
        let keyword = Keyword::parse("  吾輩は猫である ").unwrap();
        assert_eq!(keyword.as_str(), "吾輩は猫である");
        assert_eq!(keyword.title_query(), "intitle:吾輩は猫である");
    }
}
