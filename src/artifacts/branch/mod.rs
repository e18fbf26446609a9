//! Branch names and the symbolic reference HEAD holds

pub mod branch_name;

pub const DEFAULT_BRANCH: &str = "master";

/// Anything matching this pattern is not a usable branch name
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Where branch files live, relative to the `.gitlet` directory
pub const HEADS_PREFIX: &str = "refs/heads/";
