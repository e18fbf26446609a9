use anyhow::Result;
use clap::{Parser, Subcommand};
use gitlet::areas::repository::Repository;
use gitlet::artifacts::core::config::{Config, LOG_FILTER_VAR};
use gitlet::artifacts::core::errors::as_gitlet_error;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    about = "A small version control system",
    long_about = "Gitlet tracks snapshots of a working tree: files are staged, committed, \
    branched and merged much like in git, with a deliberately smaller feature set.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Create a new repository",
        long_about = "This command creates the .gitlet directory with a single initial commit on branch master."
    )]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "commit", about = "Record the staged changes")]
    Commit {
        #[arg(index = 1, default_value = "", help = "The commit message")]
        message: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stage its removal",
        long_about = "This command unstages a file staged for addition. A file tracked by the current \
        commit is staged for removal and deleted from the working tree."
    )]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged files and working tree changes")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "checkout -- <file> restores a file from the current commit, \
        checkout <commit> -- <file> restores it from the given commit, \
        and checkout <branch> switches to a branch."
    )]
    Checkout {
        #[arg(help = "A branch name, or a commit id when a file follows")]
        target: Option<String>,
        #[arg(last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the current commit")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "reset", about = "Move the current branch to a commit")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    match run(cli) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(error) => match as_gitlet_error(&error) {
            Some(gitlet_error) => {
                tracing::debug!(?gitlet_error, "command refused");
                println!("{gitlet_error}");
                Ok(ExitCode::FAILURE)
            }
            None => Err(error),
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_from_env()?;
    let path = match config.repository_dir() {
        Some(dir) => dir.to_string_lossy().into_owned(),
        None => std::env::current_dir()?.to_string_lossy().into_owned(),
    };
    let repository = Repository::with_config(&path, Box::new(std::io::stdout()), config)?;

    if !matches!(cli.command, Commands::Init) {
        repository.ensure_initialized()?;
    }

    match &cli.command {
        Commands::Init => repository.init(),
        Commands::Add { file } => repository.add(file),
        Commands::Commit { message } => repository.commit(message),
        Commands::Rm { file } => repository.rm(file),
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Find { message } => repository.find(message),
        Commands::Status => repository.status(),
        Commands::Checkout { target, file } => match (target, file) {
            (target, Some(file)) => repository.checkout_file(target.as_deref(), file),
            (Some(branch), None) => repository.checkout_branch(branch),
            (None, None) => anyhow::bail!("Incorrect operands."),
        },
        Commands::Branch { name } => repository.branch(name),
        Commands::RmBranch { name } => repository.rm_branch(name),
        Commands::Reset { commit } => repository.reset(commit),
        Commands::Merge { branch } => repository.merge(branch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case(&["gitlet", "checkout", "--", "a.txt"], None, Some("a.txt"))]
    #[case(&["gitlet", "checkout", "abcd12", "--", "a.txt"], Some("abcd12"), Some("a.txt"))]
    #[case(&["gitlet", "checkout", "topic"], Some("topic"), None)]
    fn checkout_forms_are_parsed(
        #[case] args: &[&str],
        #[case] expected_target: Option<&str>,
        #[case] expected_file: Option<&str>,
    ) {
        let cli = Cli::try_parse_from(args).unwrap();

        let Commands::Checkout { target, file } = cli.command else {
            panic!("expected a checkout command");
        };
        assert_eq!(target.as_deref(), expected_target);
        assert_eq!(file.as_deref(), expected_file);
    }
}
