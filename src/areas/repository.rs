use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::{GITLET_DIR_NAME, Workspace};
use crate::artifacts::core::config::Config;
use crate::artifacts::core::errors::GitletError;
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::commit::{Commit, Parents};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Handle on one working tree and its `.gitlet` directory
///
/// Every command runs against a repository; the handle owns the object
/// database, the refs and the workspace, and knows where the index lives.
/// The index itself is loaded by each command that needs it.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    config: Config,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        Self::with_config(path, writer, Config::default())
    }

    pub fn with_config(
        path: &str,
        writer: Box<dyn std::io::Write>,
        config: Config,
    ) -> anyhow::Result<Self> {
        let path = Path::new(path)
            .canonicalize()
            .with_context(|| format!("Unable to open working tree {path}"))?;
        let gitlet_path = path.join(GITLET_DIR_NAME);

        Ok(Repository {
            database: Database::new(gitlet_path.join("objects").into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            refs: Refs::new(gitlet_path.into_boxed_path()),
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            config,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn gitlet_path(&self) -> Box<Path> {
        self.path.join(GITLET_DIR_NAME).into_boxed_path()
    }

    pub fn index_path(&self) -> Box<Path> {
        self.gitlet_path().join("index").into_boxed_path()
    }

    pub fn is_initialized(&self) -> bool {
        self.gitlet_path().is_dir()
    }

    /// Fail with `NotInitialized` unless `.gitlet` exists
    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(GitletError::NotInitialized.into())
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn load_index(&self) -> anyhow::Result<Index> {
        Index::load(self.index_path())
    }

    /// Digest and content of the current branch's tip
    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let head = self.refs.read_head()?;
        let commit = self.database.load_commit(&head)?;

        Ok((head, commit))
    }

    /// Graph queries over the commits stored in this repository
    pub fn history(&self) -> SplitPointFinder<impl Fn(&ObjectId) -> anyhow::Result<Parents> + '_> {
        SplitPointFinder::new(|oid: &ObjectId| {
            Ok(self.database.load_commit(oid)?.parents().clone())
        })
    }
}
