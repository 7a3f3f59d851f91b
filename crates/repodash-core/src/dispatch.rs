use crate::command::CommandRunner;
use crate::model::{RepoEntity, sort_entities};
use std::sync::mpsc;
use std::thread;
use tracing::{debug, info};

/// Phrases matched against status output. These mirror the external tool's
/// wording and must stay verbatim.
pub const BEHIND_UPSTREAM: &str = "branch is behind";
pub const UNSTAGED_CHANGES: &str = "Changes not staged";
pub const STAGED_CHANGES: &str = "Changes to be committed";

/// External command names used to build per-entity argument lists.
#[derive(Clone, Debug)]
pub struct CommandSet {
    pub status: String,
    pub sync: String,
}

impl Default for CommandSet {
    fn default() -> Self {
        Self {
            status: "./status_cmd".to_string(),
            sync: "./sync_cmd".to_string(),
        }
    }
}

/// Runs the pending action of every entity concurrently and returns the
/// merged snapshot sorted by name.
///
/// One worker thread per entity; each worker owns its entity by value and
/// emits exactly one result over the channel, so the merge never needs
/// partial-failure bookkeeping. The thread scope is the join barrier: no
/// partial results are returned, and a slow command delays the whole pass.
pub fn run_all<R: CommandRunner>(
    entities: Vec<RepoEntity>,
    commands: &CommandSet,
    runner: &R,
) -> Vec<RepoEntity> {
    let (tx, rx) = mpsc::channel::<RepoEntity>();
    thread::scope(|scope| {
        for entity in entities {
            let tx = tx.clone();
            scope.spawn(move || {
                let _ = tx.send(run_action(entity, commands, runner));
            });
        }
    });
    drop(tx);

    let mut merged: Vec<RepoEntity> = rx.into_iter().collect();
    sort_entities(&mut merged);
    debug!(count = merged.len(), "dispatch pass merged");
    merged
}

/// Selects and runs at most one action for one entity. Sync outranks check;
/// a simultaneously queued check stays queued and runs on the next pass.
fn run_action<R: CommandRunner>(
    mut entity: RepoEntity,
    commands: &CommandSet,
    runner: &R,
) -> RepoEntity {
    if entity.pending_sync {
        let mut argv = vec![commands.sync.clone(), entity.path.clone()];
        if entity.push_on_sync {
            argv.push("push".to_string());
        }
        info!(repo = %entity.name, push = entity.push_on_sync, "syncing");
        runner.run(&argv);
        // Any sync pulls the remote branch; only a push-sync settles the
        // dirty working tree.
        entity.pending_sync = false;
        entity.out_of_date = false;
        if entity.push_on_sync {
            entity.has_local_changes = false;
        }
    } else if entity.pending_check {
        let argv = vec![commands.status.clone(), entity.path.clone()];
        let output = runner.run(&argv);
        // Positive-evidence classification: both flags are rewritten from
        // this cycle's output, not diffed against prior state. Empty output
        // (including a failed command) therefore reads as clean until the
        // next cycle retries.
        entity.out_of_date = output.contains(BEHIND_UPSTREAM);
        entity.has_local_changes =
            output.contains(UNSTAGED_CHANGES) || output.contains(STAGED_CHANGES);
        entity.pending_check = false;
    }
    entity
}
