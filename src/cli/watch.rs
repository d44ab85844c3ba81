//! Watch command: run the progress service until Ctrl-C

use anyhow::Result;
use tokio::sync::broadcast::error::RecvError;

use studyquest::service::start_progress_service;

use super::CliContext;

pub async fn watch_command(ctx: &CliContext) -> Result<()> {
    let tracker = ctx.open_tracker()?;
    let tick = ctx.config.settings.tick_interval();
    let (handle, task) = start_progress_service(tracker, tick);
    let mut events = handle.subscribe();

    let view = handle.view().await?;
    println!(
        "Watching progress: level {} ({}), {} XP. Press Ctrl-C to stop.",
        view.level, view.title, view.current_xp
    );

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => println!("  {}", event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Dropped {} progress events", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    handle.shutdown().await;
    let _ = task.await;
    Ok(())
}
