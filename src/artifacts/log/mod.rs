//! Commit history listing
//!
//! - `rev_list`: first-parent traversal from a commit down to the root
//!
//! Every listing (`log`, `global-log`) prints commits with [`format_commit`].

pub mod rev_list;

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

/// One history entry, ending with a blank line
///
/// ```text
/// ===
/// commit <digest>
/// Merge: <7 hex> <7 hex>      (merge commits only)
/// Date: Thu Jan 1 00:00:00 1970 +0000
/// <message>
///
/// ```
pub fn format_commit(oid: &ObjectId, commit: &Commit) -> String {
    let mut lines = vec!["===".to_string(), format!("commit {oid}")];

    if let (Some(first), Some(second)) = (commit.parents().first(), commit.parents().second()) {
        lines.push(format!(
            "Merge: {} {}",
            first.to_short_oid(),
            second.to_short_oid()
        ));
    }
    lines.push(format!("Date: {}", commit.readable_timestamp()));
    lines.push(commit.message().to_string());

    format!("{}\n\n", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::commit::FilesMapping;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    fn oid(seed: char) -> ObjectId {
        ObjectId::try_parse(seed.to_string().repeat(40)).unwrap()
    }

    #[test]
    fn root_entry() {
        let entry = format_commit(&oid('a'), &Commit::root());

        assert_eq!(
            entry,
            format!(
                "===\ncommit {}\nDate: Thu Jan 1 00:00:00 1970 +0000\ninitial commit\n\n",
                "a".repeat(40)
            )
        );
    }

    #[test]
    fn merge_entry_shows_abbreviated_parents() {
        let commit = Commit::child(
            "Merged other into master.".into(),
            oid('1'),
            Some(oid('2')),
            &FilesMapping::new(),
            DateTime::UNIX_EPOCH.fixed_offset(),
        );

        let entry = format_commit(&oid('c'), &commit);

        assert!(entry.contains("\nMerge: 1111111 2222222\nDate: "));
        assert!(entry.ends_with("Merged other into master.\n\n"));
    }
}
