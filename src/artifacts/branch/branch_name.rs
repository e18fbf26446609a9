use crate::artifacts::branch::{DEFAULT_BRANCH, HEADS_PREFIX, INVALID_BRANCH_NAME_REGEX};
use crate::artifacts::core::errors::GitletError;
use anyhow::Context;
use std::sync::OnceLock;

static INVALID_BRANCH_NAME: OnceLock<regex::Regex> = OnceLock::new();

/// A validated branch name such as `master` or `feature/login`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: impl Into<String>) -> anyhow::Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(GitletError::InvalidBranchName(name).into());
        }

        let invalid = match INVALID_BRANCH_NAME.get() {
            Some(re) => re,
            None => {
                let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX).with_context(|| {
                    format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}")
                })?;
                INVALID_BRANCH_NAME.get_or_init(|| re)
            }
        };

        if invalid.is_match(&name) {
            Err(GitletError::InvalidBranchName(name).into())
        } else {
            Ok(Self(name))
        }
    }

    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }

    /// Contents of HEAD while this branch is checked out
    pub fn to_symref(&self) -> String {
        format!("ref: {HEADS_PREFIX}{}", self.0)
    }

    /// Path of the branch file relative to `.gitlet`
    pub fn as_ref_path(&self) -> String {
        format!("{HEADS_PREFIX}{}", self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::core::errors::as_gitlet_error;
    use pretty_assertions::assert_eq;
    use proptest::proptest;

    proptest! {
        #[test]
        fn plain_names_are_accepted(name in "[a-zA-Z0-9_-]+") {
            assert!(BranchName::try_parse(name).is_ok());
        }

        #[test]
        fn hierarchical_names_are_accepted(
            prefix in "[a-zA-Z0-9_-]+",
            suffix in "[a-zA-Z0-9_-]+"
        ) {
            assert!(BranchName::try_parse(format!("{prefix}/{suffix}")).is_ok());
        }

        #[test]
        fn leading_dot_is_rejected(suffix in "[a-zA-Z0-9_-]+") {
            assert!(BranchName::try_parse(format!(".{suffix}")).is_err());
        }

        #[test]
        fn lock_suffix_is_rejected(prefix in "[a-zA-Z0-9_-]+") {
            assert!(BranchName::try_parse(format!("{prefix}.lock")).is_err());
        }

        #[test]
        fn double_dot_is_rejected(
            prefix in "[a-zA-Z0-9_-]+",
            suffix in "[a-zA-Z0-9_-]+"
        ) {
            assert!(BranchName::try_parse(format!("{prefix}..{suffix}")).is_err());
        }

        #[test]
        fn dangling_slashes_are_rejected(name in "[a-zA-Z0-9_-]+") {
            assert!(BranchName::try_parse(format!("/{name}")).is_err());
            assert!(BranchName::try_parse(format!("{name}/")).is_err());
        }

        #[test]
        fn glob_and_control_characters_are_rejected(
            prefix in "[a-zA-Z0-9_-]+",
            suffix in "[a-zA-Z0-9_-]+",
            special in r"[\*:\?\[\\^~ \x00]"
        ) {
            assert!(BranchName::try_parse(format!("{prefix}{special}{suffix}")).is_err());
        }
    }

    #[test]
    fn empty_name_is_a_typed_error() {
        let error = BranchName::try_parse("").unwrap_err();

        assert_eq!(
            as_gitlet_error(&error),
            Some(&GitletError::InvalidBranchName(String::new()))
        );
    }

    #[test]
    fn symref_points_into_heads() {
        let name = BranchName::try_parse("feature/login").unwrap();

        assert_eq!(name.to_symref(), "ref: refs/heads/feature/login");
        assert_eq!(BranchName::default_branch().as_ref(), "master");
    }
}
