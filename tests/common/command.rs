use crate::common::COMMIT_DATE;
use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository with `a.txt` and `dir/b.txt` committed on top of the root commit
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "a".to_string()));
    write_file(FileSpec::new(dir.join("dir").join("b.txt"), "b".to_string()));

    run_gitlet_command(dir, &["add", "a.txt"]).assert().success();
    run_gitlet_command(dir, &["add", "dir/b.txt"])
        .assert()
        .success();
    gitlet_commit(dir, "Add a and b").assert().success();

    init_repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.current_dir(dir);
    cmd.env_remove("GITLET_DIR");
    cmd.env("GITLET_COMMIT_DATE", COMMIT_DATE);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn gitlet_commit(dir: &Path, message: &str) -> Command {
    run_gitlet_command(dir, &["commit", message])
}

/// Commit with an explicit timestamp, `%Y-%m-%d %H:%M:%S %z`
pub fn gitlet_commit_at(dir: &Path, message: &str, date: &str) -> Command {
    let mut cmd = gitlet_commit(dir, message);
    cmd.env("GITLET_COMMIT_DATE", date);
    cmd
}

/// Add every listed file, then commit them
pub fn add_and_commit(dir: &Path, files: &[&str], message: &str) {
    for file in files {
        run_gitlet_command(dir, &["add", file]).assert().success();
    }
    gitlet_commit(dir, message).assert().success();
}

/// Standard output of a command that must succeed
pub fn stdout_of(mut cmd: Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("stdout is not UTF-8")
}

pub fn current_branch(dir: &Path) -> String {
    let head = std::fs::read_to_string(dir.join(".gitlet").join("HEAD"))
        .expect("Failed to read HEAD");

    head.trim()
        .strip_prefix("ref: refs/heads/")
        .expect("HEAD is not a branch reference")
        .to_string()
}

pub fn branch_head(dir: &Path, branch: &str) -> String {
    let path = dir.join(".gitlet").join("refs").join("heads").join(branch);
    std::fs::read_to_string(path)
        .expect("Failed to read branch reference")
        .trim()
        .to_string()
}

/// Digest of the current branch's tip
pub fn head_commit_id(dir: &Path) -> String {
    branch_head(dir, &current_branch(dir))
}
