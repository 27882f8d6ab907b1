// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;

use super::{
    GatewayOptions, OperationArgs, OperationGateway, OperationKind, OperationOutcome,
    StructuredData,
};
use crate::error::{OperationError, ProcessError};
use crate::git::parse::{BranchInfo, RemoteInfo};
use crate::git::test_utils::{Call, Gate, ScriptedRunner};
use crate::registry::RepositoryRegistry;

struct Fixture {
    _temp: TempDir,
    repo: PathBuf,
    gateway: OperationGateway<ScriptedRunner>,
}

impl Fixture {
    fn runner(&self) -> &ScriptedRunner {
        &self.gateway.runner
    }

    /// Recorded calls without the `status --porcelain` validation probes.
    fn op_calls(&self) -> Vec<Call> {
        self.runner()
            .calls()
            .into_iter()
            .filter(|call| call.args != ["status", "--porcelain"])
            .collect()
    }

    fn op_subcommands(&self) -> Vec<String> {
        self.op_calls()
            .into_iter()
            .filter_map(|call| call.args.first().cloned())
            .collect()
    }

    async fn invoke(&self, kind: OperationKind, args: &OperationArgs) -> OperationOutcome {
        self.gateway.invoke(kind, args).await
    }

    async fn try_invoke(
        &self,
        kind: OperationKind,
        args: &OperationArgs,
    ) -> Result<OperationOutcome, OperationError> {
        self.gateway.try_invoke(kind, args).await
    }
}

/// Validation state of the active repository before the first call.
enum Checked {
    Never,
    Valid,
    Invalid,
}

fn fixture(runner: ScriptedRunner, checked: Checked) -> Fixture {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let repo = temp.path().join("repo");
    std::fs::create_dir(&repo).expect("failed to create repo dir");

    let registry = RepositoryRegistry::open(temp.path().join("state.json"));
    registry.add_repository(&repo).expect("add");
    registry.set_active(&repo).expect("set active");
    match checked {
        Checked::Never => {}
        Checked::Valid => {
            registry.record_validation(&repo, true).expect("record");
        }
        Checked::Invalid => {
            registry.record_validation(&repo, false).expect("record");
        }
    }

    let options = GatewayOptions::builder()
        .with_timeout(Duration::from_secs(5))
        .build();
    Fixture {
        _temp: temp,
        repo,
        gateway: OperationGateway::new(runner, registry, options),
    }
}

fn valid(runner: ScriptedRunner) -> Fixture {
    fixture(runner, Checked::Valid)
}

fn no_args() -> OperationArgs {
    OperationArgs::default()
}

fn args_with(f: impl FnOnce(&mut OperationArgs)) -> OperationArgs {
    let mut args = OperationArgs::default();
    f(&mut args);
    args
}

// =============================================================================
// Preconditions
// =============================================================================

#[tokio::test]
async fn test_no_repository_selected() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let registry = RepositoryRegistry::open(temp.path().join("state.json"));
    let gateway = OperationGateway::new(
        ScriptedRunner::new(),
        registry,
        GatewayOptions::default(),
    );

    let outcome = gateway.invoke(OperationKind::Status, &no_args()).await;

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("noRepositorySelected"));
    assert!(gateway.runner.calls().is_empty());
}

#[tokio::test]
async fn test_repository_missing_when_path_deleted() {
    let fx = valid(ScriptedRunner::new());
    std::fs::remove_dir(&fx.repo).expect("remove repo dir");

    let err = fx
        .try_invoke(OperationKind::Status, &no_args())
        .await
        .expect_err("deleted path");

    assert!(matches!(err, OperationError::RepositoryMissing { .. }));
    assert!(fx.op_calls().is_empty());
}

#[tokio::test]
async fn test_tool_unavailable() {
    let fx = valid(ScriptedRunner::new().unavailable());

    let outcome = fx.invoke(OperationKind::Log, &no_args()).await;

    assert_eq!(outcome.error.as_deref(), Some("toolUnavailable"));
    insta::assert_snapshot!(outcome.message, @"'git' is not available on this system");
    assert!(fx.op_calls().is_empty());
}

#[tokio::test]
async fn test_invalid_repository_never_executes() {
    let fx = fixture(ScriptedRunner::new().not_a_repo(), Checked::Invalid);

    let kinds = OperationKind::ALL
        .into_iter()
        .filter(|kind| kind.requires_repository());
    for kind in kinds {
        let args = args_with(|a| {
            a.message = Some("msg".to_string());
            a.name = Some("feature".to_string());
            a.branch = Some("main".to_string());
            a.url = Some("https://example.com/r.git".to_string());
        });
        let err = fx.try_invoke(kind, &args).await.expect_err("invalid repo");
        assert!(
            matches!(err, OperationError::RepositoryMissing { .. }),
            "{kind}: unexpected error {err:?}"
        );
    }

    assert!(fx.op_calls().is_empty());
}

#[tokio::test]
async fn test_unvalidated_repository_is_probed_on_every_call() {
    let fx = fixture(ScriptedRunner::new().not_a_repo(), Checked::Never);

    let first = fx.invoke(OperationKind::BranchList, &no_args()).await;
    let second = fx.invoke(OperationKind::Log, &no_args()).await;

    assert_eq!(first.error.as_deref(), Some("repositoryMissing"));
    assert_eq!(second.error.as_deref(), Some("repositoryMissing"));
    assert_eq!(fx.runner().subcommands(), ["status", "status"]);

    let state = fx.gateway.registry().state();
    let entry = state.get(&fx.repo).expect("entry");
    assert!(!entry.is_valid);
    assert!(entry.is_checked());
}

#[tokio::test]
async fn test_unvalidated_repository_valid_then_runs() {
    let fx = fixture(
        ScriptedRunner::new()
            .valid_repo()
            .on("branch", 0, "* main\n", ""),
        Checked::Never,
    );

    let outcome = fx.invoke(OperationKind::BranchList, &no_args()).await;

    assert!(outcome.success);
    assert_eq!(fx.runner().subcommands(), ["status", "branch"]);
    let state = fx.gateway.registry().state();
    assert!(state.get(&fx.repo).is_some_and(|r| r.is_valid));
}

#[tokio::test]
async fn test_recorded_valid_but_no_longer_a_repository() {
    let fx = valid(ScriptedRunner::new().not_a_repo());

    let outcome = fx.invoke(OperationKind::Add, &no_args()).await;

    assert_eq!(outcome.error.as_deref(), Some("repositoryMissing"));
    assert!(fx.op_calls().is_empty(), "add must not run");
    let state = fx.gateway.registry().state();
    assert!(state.get(&fx.repo).is_some_and(|r| !r.is_valid));
}

#[tokio::test]
async fn test_recorded_invalid_recovers_after_external_init() {
    let fx = fixture(
        ScriptedRunner::new().valid_repo().on("status", 0, "## main\n", ""),
        Checked::Invalid,
    );

    let outcome = fx.invoke(OperationKind::Status, &no_args()).await;

    assert!(outcome.success, "{outcome:?}");
    assert_eq!(fx.op_subcommands(), ["status"]);
    let state = fx.gateway.registry().state();
    assert!(state.get(&fx.repo).is_some_and(|r| r.is_valid));
}

// =============================================================================
// Busy flag
// =============================================================================

#[tokio::test]
async fn test_second_invoke_while_busy_is_rejected() {
    let gate = Gate::default();
    let fx = valid(
        ScriptedRunner::new()
            .on("log", 0, "a1|Ann|now|First\n", "")
            .gated("log", gate.clone()),
    );

    let args = no_args();
    let (first, second) = tokio::join!(fx.invoke(OperationKind::Log, &args), async {
        gate.entered.notified().await;
        assert!(fx.gateway.is_busy());
        let second = fx.try_invoke(OperationKind::Status, &args).await;
        gate.release.notify_one();
        second
    });

    assert!(first.success);
    assert!(matches!(second, Err(OperationError::OperationInProgress)));
    assert_eq!(fx.op_subcommands(), ["log"]);
    assert!(!fx.gateway.is_busy());
}

#[tokio::test]
async fn test_select_while_busy_is_rejected() {
    let gate = Gate::default();
    let fx = valid(ScriptedRunner::new().gated("log", gate.clone()));
    let other = fx.repo.clone();

    let args = no_args();
    let (first, second) = tokio::join!(fx.invoke(OperationKind::Log, &args), async {
        gate.entered.notified().await;
        let second = fx.gateway.select_repository(&other).await;
        gate.release.notify_one();
        second
    });

    assert!(first.success);
    assert!(matches!(second, Err(OperationError::OperationInProgress)));
}

#[tokio::test]
async fn test_busy_flag_released_after_failure() {
    let fx = valid(ScriptedRunner::new().on_timeout("push"));

    let outcome = fx.invoke(OperationKind::Push, &no_args()).await;
    assert_eq!(outcome.error.as_deref(), Some("commandTimedOut"));
    assert!(!fx.gateway.is_busy());

    let outcome = fx.invoke(OperationKind::Status, &no_args()).await;
    assert!(outcome.success);
}

// =============================================================================
// Operations
// =============================================================================

#[tokio::test]
async fn test_status_returns_raw_text() {
    let fx = valid(ScriptedRunner::new().on(
        "status",
        0,
        "On branch main\nnothing to commit, working tree clean\n",
        "",
    ));

    let outcome = fx.invoke(OperationKind::Status, &no_args()).await;

    assert!(outcome.success);
    assert_eq!(
        outcome.message,
        "On branch main\nnothing to commit, working tree clean"
    );
    assert!(outcome.data.is_none());
    let calls = fx.op_calls();
    assert_eq!(calls[0].args, ["status"]);
    assert_eq!(calls[0].working_dir, fx.repo);
}

#[tokio::test]
async fn test_add_stages_everything() {
    let fx = valid(ScriptedRunner::new());

    let outcome = fx.invoke(OperationKind::Add, &no_args()).await;

    assert!(outcome.success);
    assert_eq!(fx.op_calls()[0].args, ["add", "--all"]);
}

#[tokio::test]
async fn test_add_failure_marker() {
    let fx = valid(ScriptedRunner::new().on(
        "add",
        128,
        "",
        "fatal: Unable to create '.git/index.lock': File exists.",
    ));

    let err = fx
        .try_invoke(OperationKind::Add, &no_args())
        .await
        .expect_err("lock held");
    insta::assert_snapshot!(
        err.to_string(),
        @"git add failed: fatal: Unable to create '.git/index.lock': File exists."
    );
}

#[tokio::test]
async fn test_commit_empty_message_never_executes() {
    let fx = valid(ScriptedRunner::new());

    for message in [None, Some(String::new()), Some("   ".to_string())] {
        let args = args_with(|a| a.message = message);
        let outcome = fx.invoke(OperationKind::Commit, &args).await;
        assert_eq!(outcome.error.as_deref(), Some("emptyCommitMessage"));
    }

    assert!(fx.op_calls().is_empty());
}

#[tokio::test]
async fn test_commit_nothing_to_commit_is_declined() {
    let fx = valid(ScriptedRunner::new().on(
        "commit",
        1,
        "On branch main\nnothing to commit, working tree clean\n",
        "",
    ));

    let args = args_with(|a| a.message = Some("wip".to_string()));
    let outcome = fx
        .try_invoke(OperationKind::Commit, &args)
        .await
        .expect("declined is not an error");

    assert!(!outcome.success);
    assert!(outcome.error.is_none());
    insta::assert_snapshot!(outcome.message, @"nothing to commit, working tree clean");
}

#[tokio::test]
async fn test_commit_nothing_to_commit_despite_zero_exit() {
    let fx = valid(ScriptedRunner::new().on("commit", 0, "nothing to commit\n", ""));

    let args = args_with(|a| a.message = Some("wip".to_string()));
    let outcome = fx.invoke(OperationKind::Commit, &args).await;

    assert!(!outcome.success);
}

#[tokio::test]
async fn test_commit_passes_message_as_single_argument() {
    let fx = valid(ScriptedRunner::new().on(
        "commit",
        0,
        "[main 1a2b3c4] fix: handle $(rm -rf) safely\n 1 file changed\n",
        "",
    ));

    let message = "fix: handle $(rm -rf) safely";
    let args = args_with(|a| a.message = Some(message.to_string()));
    let outcome = fx.invoke(OperationKind::Commit, &args).await;

    assert!(outcome.success, "stdout text must not trip the markers");
    assert_eq!(fx.op_calls()[0].args, ["commit", "-m", message]);
}

#[tokio::test]
async fn test_commit_failure() {
    let fx = valid(ScriptedRunner::new().on(
        "commit",
        128,
        "",
        "Author identity unknown\nfatal: unable to auto-detect email address",
    ));

    let args = args_with(|a| a.message = Some("wip".to_string()));
    let outcome = fx.invoke(OperationKind::Commit, &args).await;

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("commandFailed"));
}

#[tokio::test]
async fn test_push_progress_on_stderr_is_success() {
    let fx = valid(ScriptedRunner::new().on(
        "push",
        0,
        "",
        "To https://example.com/r.git\n   1a2b3c4..5d6e7f8  main -> main",
    ));

    let outcome = fx.invoke(OperationKind::Push, &no_args()).await;

    assert!(outcome.success);
    assert!(outcome.message.starts_with("To https://example.com/r.git"));
}

#[tokio::test]
async fn test_pull_failure_marker() {
    let fx = valid(ScriptedRunner::new().on(
        "pull",
        1,
        "",
        "There is no tracking information for the current branch.\nerror: no upstream",
    ));

    let err = fx
        .try_invoke(OperationKind::Pull, &no_args())
        .await
        .expect_err("marker");
    assert!(matches!(err, OperationError::CommandFailed { .. }));
}

#[tokio::test]
async fn test_pull_nonzero_without_marker_is_success() {
    let fx = valid(ScriptedRunner::new().on("pull", 1, "Already up to date.\n", ""));

    let outcome = fx.invoke(OperationKind::Pull, &no_args()).await;

    assert!(outcome.success);
    assert_eq!(outcome.message, "Already up to date.");
}

#[tokio::test]
async fn test_log_parses_commits_with_default_limit() {
    let fx = valid(ScriptedRunner::new().on(
        "log",
        0,
        "a1|Ann|1 hour ago|Second\nb2|Bob|2 days ago|First\n",
        "",
    ));

    let outcome = fx.invoke(OperationKind::Log, &no_args()).await;

    assert!(outcome.success);
    assert_eq!(outcome.message, "2 commits");
    let Some(StructuredData::Commits { commits }) = outcome.data else {
        panic!("expected commits");
    };
    assert_eq!(commits[0].subject, "Second");
    assert_eq!(
        fx.op_calls()[0].args,
        ["log", "--pretty=format:%h|%an|%ar|%s", "-n", "20"]
    );
}

#[tokio::test]
async fn test_log_custom_limit() {
    let fx = valid(ScriptedRunner::new());

    let args = args_with(|a| a.limit = Some(5));
    fx.invoke(OperationKind::Log, &args).await;

    assert_eq!(fx.op_calls()[0].args.last().map(String::as_str), Some("5"));
}

#[tokio::test]
async fn test_log_without_commits_is_empty_success() {
    let fx = valid(ScriptedRunner::new().on(
        "log",
        128,
        "",
        "fatal: your current branch 'main' does not have any commits yet",
    ));

    let outcome = fx.invoke(OperationKind::Log, &no_args()).await;

    assert!(outcome.success);
    assert_eq!(
        outcome.data,
        Some(StructuredData::Commits {
            commits: Vec::new()
        })
    );
}

#[tokio::test]
async fn test_branch_list_is_idempotent() {
    let fx = valid(ScriptedRunner::new().on("branch", 0, "  dev\n* main\n  topic\n", ""));

    let first = fx.invoke(OperationKind::BranchList, &no_args()).await;
    let second = fx.invoke(OperationKind::BranchList, &no_args()).await;

    assert!(first.success);
    assert_eq!(first, second);
    let Some(StructuredData::Branches { branches, current }) = first.data else {
        panic!("expected branches");
    };
    let names: Vec<&str> = branches.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["dev", "main", "topic"]);
    assert_eq!(current.as_deref(), Some("main"));
}

#[tokio::test]
async fn test_branch_list_all_flag() {
    let fx = valid(ScriptedRunner::new());

    let args = args_with(|a| a.all = true);
    fx.invoke(OperationKind::BranchList, &args).await;

    assert_eq!(fx.op_calls()[0].args, ["branch", "--no-color", "--all"]);
}

#[tokio::test]
async fn test_branch_create_rejects_bad_names() {
    let fx = valid(ScriptedRunner::new());

    for name in ["", "  ", "feature/x", "a\\b", "tab\there", "-D"] {
        let args = args_with(|a| a.name = Some(name.to_string()));
        let err = fx
            .try_invoke(OperationKind::BranchCreate, &args)
            .await
            .expect_err("bad name");
        assert!(
            matches!(err, OperationError::InvalidBranchName { .. }),
            "{name:?}: unexpected error {err:?}"
        );
    }

    assert!(fx.op_calls().is_empty());
}

#[tokio::test]
async fn test_branch_create() {
    let fx = valid(ScriptedRunner::new());

    let args = args_with(|a| a.name = Some("topic".to_string()));
    let outcome = fx.invoke(OperationKind::BranchCreate, &args).await;

    assert!(outcome.success);
    insta::assert_snapshot!(outcome.message, @"Created branch 'topic'");
    assert_eq!(fx.op_calls()[0].args, ["branch", "topic"]);
}

#[tokio::test]
async fn test_checkout_requires_existing_branch() {
    let fx = valid(ScriptedRunner::new().on("branch", 0, "* main\n  dev\n", ""));

    let args = args_with(|a| a.branch = Some("Dev".to_string()));
    let err = fx
        .try_invoke(OperationKind::Checkout, &args)
        .await
        .expect_err("case-sensitive match");

    assert!(matches!(err, OperationError::BranchNotFound { ref branch } if branch == "Dev"));
    assert_eq!(fx.op_subcommands(), ["branch"]);
}

#[tokio::test]
async fn test_checkout_matches_name_verbatim() {
    let fx = valid(ScriptedRunner::new().on("branch", 0, "* main\n  dev\n", ""));

    let args = args_with(|a| a.branch = Some(" dev".to_string()));
    let err = fx
        .try_invoke(OperationKind::Checkout, &args)
        .await
        .expect_err("padded name");

    assert!(matches!(err, OperationError::BranchNotFound { ref branch } if branch == " dev"));
    assert_eq!(fx.op_subcommands(), ["branch"]);
}

#[tokio::test]
async fn test_checkout_rejects_detached_head_placeholder() {
    let fx = valid(ScriptedRunner::new().on(
        "branch",
        0,
        "* (HEAD detached at 1a2b3c4)\n  main\n",
        "",
    ));

    let args = args_with(|a| a.branch = Some("(HEAD detached at 1a2b3c4)".to_string()));
    let err = fx
        .try_invoke(OperationKind::Checkout, &args)
        .await
        .expect_err("placeholder is not a branch");

    assert!(matches!(err, OperationError::BranchNotFound { .. }));
    assert_eq!(fx.op_subcommands(), ["branch"]);
}

#[tokio::test]
async fn test_checkout_switches_branch() {
    let fx = valid(
        ScriptedRunner::new()
            .on("branch", 0, "* main\n  dev\n", "")
            .on("checkout", 0, "", "Switched to branch 'dev'\n"),
    );

    let args = args_with(|a| a.branch = Some("dev".to_string()));
    let outcome = fx.invoke(OperationKind::Checkout, &args).await;

    assert!(outcome.success);
    assert_eq!(outcome.message, "Switched to branch 'dev'");
    assert_eq!(fx.op_calls()[1].args, ["checkout", "dev", "--"]);
}

#[tokio::test]
async fn test_checkout_missing_branch_argument() {
    let fx = valid(ScriptedRunner::new());

    let outcome = fx.invoke(OperationKind::Checkout, &no_args()).await;

    assert_eq!(outcome.error.as_deref(), Some("missingArgument"));
    assert!(fx.op_calls().is_empty());
}

#[tokio::test]
async fn test_init_in_existing_repository() {
    let fx = fixture(ScriptedRunner::new().valid_repo(), Checked::Never);

    let err = fx
        .try_invoke(OperationKind::Init, &no_args())
        .await
        .expect_err("already a repository");

    assert!(matches!(err, OperationError::AlreadyARepository { .. }));
    assert_eq!(fx.runner().subcommands(), ["status"]);
}

#[tokio::test]
async fn test_init_ignores_recorded_invalid_verdict_and_records_valid() {
    let fx = fixture(
        ScriptedRunner::new()
            .not_a_repo()
            .valid_repo()
            .on("init", 0, "Initialized empty Git repository in /tmp/repo/.git/\n", ""),
        Checked::Invalid,
    );

    let outcome = fx.invoke(OperationKind::Init, &no_args()).await;

    assert!(outcome.success, "{outcome:?}");
    assert_eq!(fx.runner().subcommands(), ["status", "init", "status"]);
    let state = fx.gateway.registry().state();
    assert!(state.get(&fx.repo).is_some_and(|r| r.is_valid));
}

#[tokio::test]
async fn test_remote_add_argument_checks() {
    let fx = valid(ScriptedRunner::new());

    let cases = [
        (None, Some("u"), "missingArgument"),
        (Some("origin"), Some(" "), "missingArgument"),
        (Some("--upload-pack=evil"), Some("u"), "invalidArgument"),
        (Some("origin"), Some("--upload-pack=evil"), "invalidArgument"),
    ];
    for (name, url, code) in cases {
        let args = args_with(|a| {
            a.name = name.map(str::to_string);
            a.url = url.map(str::to_string);
        });
        let outcome = fx.invoke(OperationKind::RemoteAdd, &args).await;
        assert_eq!(outcome.error.as_deref(), Some(code), "{name:?} {url:?}");
    }

    assert!(fx.op_calls().is_empty());
}

#[tokio::test]
async fn test_remote_add_duplicate() {
    let fx = valid(ScriptedRunner::new().on(
        "remote",
        0,
        "origin\thttps://example.com/a.git (fetch)\norigin\thttps://example.com/a.git (push)\n",
        "",
    ));

    let args = args_with(|a| {
        a.name = Some("origin".to_string());
        a.url = Some("https://example.com/b.git".to_string());
    });
    let err = fx
        .try_invoke(OperationKind::RemoteAdd, &args)
        .await
        .expect_err("duplicate");

    assert!(matches!(err, OperationError::DuplicateRemoteName { ref name } if name == "origin"));
    assert_eq!(fx.op_calls().len(), 1);
}

#[tokio::test]
async fn test_remote_add() {
    let fx = valid(ScriptedRunner::new());

    let args = args_with(|a| {
        a.name = Some("upstream".to_string());
        a.url = Some("https://example.com/u.git".to_string());
    });
    let outcome = fx.invoke(OperationKind::RemoteAdd, &args).await;

    assert!(outcome.success);
    assert_eq!(
        outcome.data,
        Some(StructuredData::Remote(RemoteInfo {
            name: "upstream".to_string(),
            url: "https://example.com/u.git".to_string(),
        }))
    );
    let calls = fx.op_calls();
    assert_eq!(calls[0].args, ["remote", "-v"]);
    assert_eq!(
        calls[1].args,
        ["remote", "add", "upstream", "https://example.com/u.git"]
    );
}

#[tokio::test]
async fn test_remote_list_dedupes() {
    let fx = valid(ScriptedRunner::new().on(
        "remote",
        0,
        "origin\thttps://a (fetch)\norigin\thttps://a (push)\nfork\thttps://b (fetch)\n",
        "",
    ));

    let outcome = fx.invoke(OperationKind::RemoteList, &no_args()).await;

    assert_eq!(outcome.message, "2 remotes");
    let Some(StructuredData::Remotes { remotes }) = outcome.data else {
        panic!("expected remotes");
    };
    let names: Vec<&str> = remotes.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["origin", "fork"]);
}

// =============================================================================
// select_repository
// =============================================================================

#[tokio::test]
async fn test_select_repository_validates_and_activates() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let plain = temp.path().join("plain");
    std::fs::create_dir(&plain).expect("mkdir");
    let gateway = OperationGateway::new(
        ScriptedRunner::new().not_a_repo(),
        RepositoryRegistry::open(temp.path().join("state.json")),
        GatewayOptions::default(),
    );

    let state = gateway.select_repository(&plain).await.expect("select");

    assert_eq!(state.active_repository.as_deref(), Some(plain.as_path()));
    let entry = state.get(&plain).expect("entry");
    assert!(!entry.is_valid);
    assert!(entry.is_checked());
}

#[tokio::test]
async fn test_select_repository_requires_directory() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let gateway = OperationGateway::new(
        ScriptedRunner::new(),
        RepositoryRegistry::open(temp.path().join("state.json")),
        GatewayOptions::default(),
    );

    let err = gateway
        .select_repository(&temp.path().join("missing"))
        .await
        .expect_err("missing dir");

    assert!(matches!(err, OperationError::RepositoryMissing { .. }));
    assert!(gateway.registry().state().repositories.is_empty());
}

#[tokio::test]
async fn test_select_repository_without_tool_skips_validation() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let gateway = OperationGateway::new(
        ScriptedRunner::new().unavailable(),
        RepositoryRegistry::open(temp.path().join("state.json")),
        GatewayOptions::default(),
    );

    let state = gateway.select_repository(temp.path()).await.expect("select");

    assert!(state.active().is_some_and(|r| !r.is_checked()));
    assert!(gateway.runner.calls().is_empty());
}

// =============================================================================
// Wire types
// =============================================================================

#[test]
fn test_operation_kind_names() {
    for kind in OperationKind::ALL {
        let parsed: OperationKind = kind.as_str().parse().expect("round trip");
        assert_eq!(parsed, kind);
        let json = serde_json::to_string(&kind).expect("serialize");
        assert_eq!(json, format!("\"{kind}\""));
    }

    let err = "rebase".parse::<OperationKind>().expect_err("unknown");
    assert_eq!(err.code(), "unknownOperation");
}

#[test]
fn test_outcome_json_shape() {
    let outcome = OperationOutcome::succeeded("1 branch").with_data(StructuredData::Branches {
        branches: vec![BranchInfo {
            name: "main".to_string(),
            is_current: true,
        }],
        current: Some("main".to_string()),
    });
    insta::assert_snapshot!(
        serde_json::to_string(&outcome).expect("serialize"),
        @r#"{"success":true,"message":"1 branch","data":{"kind":"branches","branches":[{"name":"main","isCurrent":true}],"current":"main"}}"#
    );

    let failed = OperationOutcome::from(&OperationError::Process(
        ProcessError::CommandTimedOut {
            command: "git push".to_string(),
            timeout_ms: 5,
        },
    ));
    insta::assert_snapshot!(
        serde_json::to_string(&failed).expect("serialize"),
        @r#"{"success":false,"message":"process 'git push' timed out after 5 ms","error":"commandTimedOut"}"#
    );
}

#[test]
fn test_args_deserialize_from_partial_json() {
    let args: OperationArgs =
        serde_json::from_str(r#"{"message":"hi","limit":3}"#).expect("deserialize");
    assert_eq!(args.message.as_deref(), Some("hi"));
    assert_eq!(args.limit, Some(3));
    assert!(!args.all);

    let empty: OperationArgs = serde_json::from_str("{}").expect("deserialize");
    assert_eq!(empty, OperationArgs::default());
}
