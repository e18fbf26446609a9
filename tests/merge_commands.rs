use crate::common::command::{
    add_and_commit, branch_head, head_commit_id, init_repository_dir, run_gitlet_command,
    stdout_of,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

mod common;

fn checkout(dir: &TempDir, branch: &str) {
    run_gitlet_command(dir.path(), &["checkout", branch])
        .assert()
        .success();
}

fn edit_and_commit(dir: &TempDir, name: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.path().join(name), content.to_string()));
    add_and_commit(dir.path(), &[name], message);
}

/// `a.txt` holds `A` at the fork, `A2` on master and `A3` on `other`
#[fixture]
fn diverged_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir;
    edit_and_commit(&dir, "a.txt", "A\n", "A");
    run_gitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success();
    edit_and_commit(&dir, "a.txt", "A2\n", "A2");
    checkout(&dir, "other");
    edit_and_commit(&dir, "a.txt", "A3\n", "A3");
    checkout(&dir, "master");

    dir
}

#[rstest]
fn conflicting_edits_are_committed_with_markers(diverged_repository_dir: TempDir) {
    let dir = diverged_repository_dir;
    let master = branch_head(dir.path(), "master");
    let other = branch_head(dir.path(), "other");

    run_gitlet_command(dir.path(), &["merge", "other"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    dir.child("a.txt")
        .assert("<<<<<<< HEAD\nA2\n=======\nA3\n>>>>>>>\n");
    let log = stdout_of(run_gitlet_command(dir.path(), &["log"]));
    assert!(log.starts_with(&format!(
        "===\ncommit {}\nMerge: {} {}\n",
        head_commit_id(dir.path()),
        &master[..7],
        &other[..7]
    )));
    assert!(log.contains("Merged other into master.\n"));
    // the conflicted content is what got committed
    let status = stdout_of(run_gitlet_command(dir.path(), &["status"]));
    assert!(!status.contains("a.txt"));
}

#[rstest]
fn delete_versus_edit_conflicts_while_other_files_merge(diverged_repository_dir: TempDir) {
    let dir = diverged_repository_dir;
    edit_and_commit(&dir, "a.txt", "A3\n", "Agree with other");
    edit_and_commit(&dir, "mine.txt", "mine", "Mine");
    checkout(&dir, "other");
    edit_and_commit(&dir, "theirs.txt", "theirs", "Theirs");
    run_gitlet_command(dir.path(), &["rm", "a.txt"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["commit", "Drop a"])
        .assert()
        .success();
    checkout(&dir, "master");

    run_gitlet_command(dir.path(), &["merge", "other"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    // master edited a.txt while other deleted it
    dir.child("a.txt").assert("<<<<<<< HEAD\nA3\n=======\n>>>>>>>\n");
    dir.child("mine.txt").assert("mine");
    dir.child("theirs.txt").assert("theirs");
}

#[rstest]
fn deletion_on_other_side_is_merged(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    edit_and_commit(&dir, "a.txt", "a", "Add a");
    edit_and_commit(&dir, "b.txt", "b", "Add b");
    run_gitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success();
    edit_and_commit(&dir, "c.txt", "c", "Add c");
    checkout(&dir, "other");
    run_gitlet_command(dir.path(), &["rm", "b.txt"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["commit", "Drop b"])
        .assert()
        .success();
    checkout(&dir, "master");

    run_gitlet_command(dir.path(), &["merge", "other"])
        .assert()
        .success()
        .stdout("");

    dir.child("b.txt").assert(predicate::path::missing());
    dir.child("c.txt").assert("c");
    let status = stdout_of(run_gitlet_command(dir.path(), &["status"]));
    assert!(status.contains("=== Removed Files ===\n\n"));
    assert!(status.contains("=== Untracked Files ===\n\n"));
}

#[rstest]
fn merge_of_descendant_fast_forwards(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    edit_and_commit(&dir, "a.txt", "a", "Add a");
    run_gitlet_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    checkout(&dir, "feature");
    edit_and_commit(&dir, "f.txt", "f", "Feature work");
    let feature = head_commit_id(dir.path());
    checkout(&dir, "master");

    run_gitlet_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    assert_eq!(branch_head(dir.path(), "master"), feature);
    dir.child("f.txt").assert("f");
    let log = stdout_of(run_gitlet_command(dir.path(), &["log"]));
    assert!(!log.contains("Merge:"));
}

#[rstest]
fn merge_of_ancestor_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_gitlet_command(dir.path(), &["branch", "old"])
        .assert()
        .success();
    edit_and_commit(&dir, "a.txt", "a", "Add a");

    run_gitlet_command(dir.path(), &["merge", "old"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Given branch is an ancestor of the current branch.",
        ));
}

#[rstest]
fn merge_with_itself_is_refused(diverged_repository_dir: TempDir) {
    run_gitlet_command(diverged_repository_dir.path(), &["merge", "master"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Cannot merge a branch with itself."));
}

#[rstest]
fn merge_with_staged_changes_is_refused(diverged_repository_dir: TempDir) {
    let dir = diverged_repository_dir;
    write_file(FileSpec::new(dir.path().join("new.txt"), "n".to_string()));
    run_gitlet_command(dir.path(), &["add", "new.txt"])
        .assert()
        .success();

    run_gitlet_command(dir.path(), &["merge", "nope"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("You have uncommitted changes."));
}

#[rstest]
fn merge_of_missing_branch_is_refused(diverged_repository_dir: TempDir) {
    run_gitlet_command(diverged_repository_dir.path(), &["merge", "nope"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "A branch with that name does not exist.",
        ));
}

#[rstest]
fn untracked_file_in_the_way_aborts_merge_untouched(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    edit_and_commit(&dir, "a.txt", "a", "Add a");
    run_gitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success();
    edit_and_commit(&dir, "m.txt", "m", "Master work");
    checkout(&dir, "other");
    edit_and_commit(&dir, "a.txt", "changed", "Change a");
    edit_and_commit(&dir, "u.txt", "theirs", "Add u");
    checkout(&dir, "master");
    let master = branch_head(dir.path(), "master");
    dir.child("u.txt").write_str("mine").unwrap();

    run_gitlet_command(dir.path(), &["merge", "other"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "There is an untracked file in the way; delete it, or add and commit it first.",
        ));

    // collisions are found before anything is written
    dir.child("a.txt").assert("a");
    dir.child("u.txt").assert("mine");
    assert_eq!(branch_head(dir.path(), "master"), master);
}
