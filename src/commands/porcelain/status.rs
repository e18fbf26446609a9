use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::FilesMapping;
use crate::artifacts::status::status_info::StatusInfo;
use std::io::Write;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        let index = self.load_index()?;
        let (_, head) = self.head_commit()?;
        let current_branch = self.refs().current_branch()?;

        let mut working = FilesMapping::new();
        for name in self.workspace().list_files()? {
            if let Some(oid) = self.workspace().blob_id(&name)? {
                working.insert(name, oid);
            }
        }
        let status = StatusInfo::compute(head.files(), &index, &working);

        let branches = self
            .refs()
            .list_branches()?
            .into_iter()
            .map(|branch| {
                if branch == current_branch {
                    format!("*{branch}")
                } else {
                    branch.to_string()
                }
            })
            .collect::<Vec<_>>();
        let modifications = status
            .workspace_changeset
            .iter()
            .map(|(name, change)| format!("{name} ({change})"))
            .collect::<Vec<_>>();

        self.print_section("Branches", branches)?;
        self.print_section("Staged Files", status.staged_files)?;
        self.print_section("Removed Files", status.removed_files)?;
        self.print_section("Modifications Not Staged For Commit", modifications)?;
        self.print_section("Untracked Files", status.untracked_files)?;

        Ok(())
    }

    fn print_section(
        &self,
        title: &str,
        lines: impl IntoIterator<Item = String>,
    ) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "=== {title} ===")?;
        for line in lines {
            writeln!(writer, "{line}")?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
