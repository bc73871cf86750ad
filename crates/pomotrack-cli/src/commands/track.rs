//! `pomotrack track`: feed timer events from stdin into the lifecycle manager.
//!
//! One event per line, `<kind> <state>` (e.g. `focus active`, `focus pause`).
//! Blank lines and lines starting with `#` are skipped. At end of input any
//! pomodoro still open is finished.

use pomotrack_core::{Config, Database, PomodoroManager, StateEvent};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::CommandResult;

const EVENT_BUFFER: usize = 64;

pub fn run(config: &Config) -> CommandResult {
    let db = Database::open(config)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(track(db))
}

async fn track(db: Database) -> CommandResult {
    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    let reader = tokio::spawn(read_events(tx));

    let mut manager = PomodoroManager::new(db);
    manager.run_channel(rx).await;
    reader.await??;

    if let Some(transition) = manager.finish_running_pomodoro()? {
        println!("{}", serde_json::to_string(&transition)?);
    }
    Ok(())
}

async fn read_events(tx: mpsc::Sender<StateEvent>) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.parse::<StateEvent>() {
            Ok(event) => {
                debug!(line = line_no, %event, "read event");
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            Err(e) => warn!(line = line_no, error = %e, "skipping unparsable event"),
        }
    }
    Ok(())
}
