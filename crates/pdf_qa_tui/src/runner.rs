//! Event loop: draws the app, routes keys, and runs submit cycles on a
//! spawned task that reports back over a channel. The loop is the only
//! owner of the session.

use crate::app::{App, CycleEvent};
use crate::input::{handle_key, InputAction};
use crate::terminal::{init_terminal, restore_terminal, Tui};
use crate::ui;
use crossterm::event::{self, Event};
use pdf_qa_client::{QaClient, Submission};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run both network steps of a cycle and report progress on `tx`.
pub async fn drive_submission(
    client: QaClient,
    submission: Submission,
    tx: mpsc::UnboundedSender<CycleEvent>,
) {
    let result = match submission.upload(&client).await {
        Ok(()) => {
            let _ = tx.send(CycleEvent::Uploaded);
            submission.ask(&client).await
        }
        Err(e) => Err(e),
    };
    let _ = tx.send(CycleEvent::Finished(submission.outcome(result)));
}

/// Take over the terminal and run until the user quits.
pub async fn run(app: &mut App, client: QaClient) -> io::Result<()> {
    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal, app, client).await;
    settle(result, restore_terminal())
}

/// Combine the loop result with the terminal restore. A loop error takes
/// precedence; a restore failure alongside it is only logged.
fn settle(result: io::Result<()>, restored: io::Result<()>) -> io::Result<()> {
    if let (Err(_), Err(e)) = (&result, &restored) {
        tracing::error!(error = %e, "failed to restore terminal");
    }
    result.and(restored)
}

async fn event_loop(terminal: &mut Tui, app: &mut App, client: QaClient) -> io::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<CycleEvent>();

    while !app.should_quit {
        terminal.draw(|frame| {
            let max_scroll = ui::render(frame, app);
            app.max_scroll = max_scroll;
        })?;

        while let Ok(cycle_event) = rx.try_recv() {
            app.apply(cycle_event);
        }

        let timeout = if app.is_busy() {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(50)
        };
        if !event::poll(timeout)? {
            app.tick();
            continue;
        }

        if let Event::Key(key) = event::read()? {
            match handle_key(app, key) {
                InputAction::Submit => {
                    if let Some(submission) = app.begin_submit() {
                        tokio::spawn(drive_submission(client.clone(), submission, tx.clone()));
                    }
                }
                InputAction::Quit => app.should_quit = true,
                InputAction::None => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn err(msg: &str) -> io::Result<()> {
        Err(io::Error::other(msg.to_string()))
    }

    #[test]
    fn loop_error_survives_failed_restore() {
        let out = settle(err("event loop"), err("restore"));
        assert_eq!(out.unwrap_err().to_string(), "event loop");
    }

    #[test]
    fn restore_error_reported_after_clean_loop() {
        let out = settle(Ok(()), err("restore"));
        assert_eq!(out.unwrap_err().to_string(), "restore");
        assert!(settle(Ok(()), Ok(())).is_ok());
    }
}
