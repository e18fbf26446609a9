use crate::common::command::{
    add_and_commit, branch_head, committed_repository_dir, gitlet_commit, gitlet_commit_at,
    head_commit_id, init_repository_dir, run_gitlet_command, stdout_of,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use fake::Fake;
use fake::faker::lorem::en::Words;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn commit_advances_the_current_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let root = head_commit_id(dir.path());
    write_file(FileSpec::new(dir.path().join("a.txt"), "a".to_string()));
    let message = Words(3..6).fake::<Vec<String>>().join(" ");

    add_and_commit(dir.path(), &["a.txt"], &message);

    let head = head_commit_id(dir.path());
    assert_ne!(head, root);
    assert_eq!(
        stdout_of(run_gitlet_command(dir.path(), &["log"])),
        format!(
            "===\ncommit {head}\nDate: Sun Jan 1 12:00:00 2023 +0000\n{message}\n\n\
             ===\ncommit {root}\nDate: Thu Jan 1 00:00:00 1970 +0000\ninitial commit\n\n"
        )
    );
}

#[rstest]
fn commit_without_staged_changes_is_refused(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    let head = head_commit_id(dir.path());

    gitlet_commit(dir.path(), "nothing")
        .assert()
        .failure()
        .stdout(predicate::str::contains("No changes added to the commit."));

    assert_eq!(head_commit_id(dir.path()), head);
}

#[rstest]
fn commit_with_blank_message_is_refused(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    dir.child("a.txt").write_str("edited").unwrap();
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    gitlet_commit(dir.path(), "   ")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Please enter a commit message."));
}

#[rstest]
fn committed_removal_stops_tracking_the_file(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    run_gitlet_command(dir.path(), &["rm", "a.txt"])
        .assert()
        .success();
    gitlet_commit(dir.path(), "Remove a").assert().success();

    dir.child("a.txt").write_str("back").unwrap();

    // no longer tracked, so it shows up as untracked
    let status = stdout_of(run_gitlet_command(dir.path(), &["status"]));
    assert!(status.contains("=== Untracked Files ===\na.txt\n\n"));
    run_gitlet_command(dir.path(), &["checkout", "--", "a.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("File does not exist in that commit."));
}

#[rstest]
fn log_follows_first_parents_only(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    let base = head_commit_id(dir.path());
    run_gitlet_command(dir.path(), &["branch", "side"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["checkout", "side"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("side.txt"), "s".to_string()));
    add_and_commit(dir.path(), &["side.txt"], "Side work");
    let side = head_commit_id(dir.path());
    run_gitlet_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("main.txt"), "m".to_string()));
    add_and_commit(dir.path(), &["main.txt"], "Main work");
    let main = head_commit_id(dir.path());

    run_gitlet_command(dir.path(), &["merge", "side"])
        .assert()
        .success();
    let merge = head_commit_id(dir.path());

    let log = stdout_of(run_gitlet_command(dir.path(), &["log"]));
    let commits = log
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .collect::<Vec<_>>();

    assert_eq!(commits.len(), 4);
    assert_eq!(&commits[..3], &[merge.as_str(), main.as_str(), base.as_str()]);
    assert!(!commits.contains(&side.as_str()));
    assert!(log.contains(&format!(
        "Merge: {} {}\n",
        &main[..7],
        &side[..7]
    )));
    assert!(log.contains("Merged side into master.\n"));
}

#[rstest]
fn global_log_lists_every_commit_newest_first(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let root = head_commit_id(dir.path());
    write_file(FileSpec::new(dir.path().join("a.txt"), "a".to_string()));
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    gitlet_commit_at(dir.path(), "older", "2023-01-01 12:00:00 +0000")
        .assert()
        .success();
    let older = head_commit_id(dir.path());
    run_gitlet_command(dir.path(), &["reset", &root[..8]])
        .assert()
        .success();
    dir.child("a.txt").write_str("b").unwrap();
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    gitlet_commit_at(dir.path(), "newer", "2023-06-01 12:00:00 +0000")
        .assert()
        .success();
    let newer = head_commit_id(dir.path());

    let log = stdout_of(run_gitlet_command(dir.path(), &["global-log"]));
    let commits = log
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .collect::<Vec<_>>();

    assert_eq!(commits.len(), 3);
    assert_eq!(&commits[..2], &[newer.as_str(), older.as_str()]);
    assert_eq!(commits[2], root);
    assert_eq!(branch_head(dir.path(), "master"), newer);
}

#[rstest]
fn find_prints_all_commits_with_the_message(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("a.txt"), "1".to_string()));
    add_and_commit(dir.path(), &["a.txt"], "same message");
    let first = head_commit_id(dir.path());
    dir.child("a.txt").write_str("2").unwrap();
    add_and_commit(dir.path(), &["a.txt"], "same message");
    let second = head_commit_id(dir.path());

    let mut expected = vec![first, second];
    expected.sort();

    assert_eq!(
        stdout_of(run_gitlet_command(dir.path(), &["find", "same message"])),
        format!("{}\n", expected.join("\n"))
    );
    run_gitlet_command(dir.path(), &["find", "same"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Found no commit with that message."));
}
