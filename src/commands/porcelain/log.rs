use crate::areas::repository::Repository;
use crate::artifacts::core::errors::GitletError;
use crate::artifacts::log::format_commit;
use crate::artifacts::log::rev_list::RevList;
use std::io::Write;

impl Repository {
    /// First-parent history of the current branch, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        let head = self.refs().read_head()?;

        for entry in RevList::new(self.database(), head) {
            let (oid, commit) = entry?;
            write!(self.writer(), "{}", format_commit(&oid, &commit))?;
        }

        Ok(())
    }

    /// Every commit ever made, newest first
    pub fn global_log(&self) -> anyhow::Result<()> {
        let mut commits = self.database().list_commits()?;
        commits.sort_by(|(a_oid, a), (b_oid, b)| {
            b.timestamp()
                .cmp(&a.timestamp())
                .then_with(|| a_oid.cmp(b_oid))
        });

        let mut writer = self.writer();
        for (oid, commit) in &commits {
            write!(writer, "{}", format_commit(oid, commit))?;
        }

        Ok(())
    }

    /// Ids of all commits whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let mut matches = self
            .database()
            .list_commits()?
            .into_iter()
            .filter(|(_, commit)| commit.message() == message)
            .map(|(oid, _)| oid)
            .collect::<Vec<_>>();

        if matches.is_empty() {
            return Err(GitletError::NoCommitWithMessage.into());
        }
        matches.sort();

        let mut writer = self.writer();
        for oid in matches {
            writeln!(writer, "{oid}")?;
        }

        Ok(())
    }
}
