use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::errors::{Error, Result};

/// Name of the branch `init` points HEAD at
pub const DEFAULT_BRANCH: &str = "master";

/// Validated branch name
///
/// Follows git's ref-format rules closely enough for a single-level
/// refs/heads namespace: no leading dot or slash, no `..`, no control
/// or glob characters, no `.lock` suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::InvalidTarget("branch name cannot be empty".to_string()));
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .expect("invalid branch name pattern is a constant");

        if re.is_match(name) {
            return Err(Error::InvalidTarget(format!("invalid branch name: {name}")));
        }

        Ok(Self(name.to_string()))
    }

    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("master")]
    #[case("feature/new-parser")]
    #[case("bugfix-123")]
    fn accepts_well_formed_names(#[case] name: &str) {
        assert!(BranchName::try_parse(name).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case(".hidden")]
    #[case("a..b")]
    #[case("name.lock")]
    #[case("/leading")]
    #[case("trailing/")]
    #[case("has space")]
    #[case("star*glob")]
    fn rejects_malformed_names(#[case] name: &str) {
        assert!(BranchName::try_parse(name).is_err());
    }
}
