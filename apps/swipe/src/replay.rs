//! Drives a session from a recorded pointer script, the way a touch screen would.

use std::{io::Write, time::Duration};

use anyhow::{Context, Result};
use serde::Serialize;
use shared::{error::ErrorPayload, protocol::InputEvent};
use swipe_core::{
    status_badge, ExitAnimation, Point, Product, Session, SessionEvent, SessionView, SwipeError,
};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    pub committed: usize,
    pub cancelled: usize,
    pub errors: usize,
    pub view: SessionView,
    pub cart: Vec<Product>,
    pub favorites: Vec<Product>,
}

/// Accepts a JSON array of events, or one JSON event per line.
pub fn parse_script(raw: &str) -> Result<Vec<InputEvent>> {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("invalid pointer script array");
    }
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("invalid pointer script entry on line {}", idx + 1))
        })
        .collect()
}

pub struct Replayer<W: Write> {
    out: W,
    reveal_delay: Duration,
    strict: bool,
}

impl<W: Write> Replayer<W> {
    pub fn new(out: W, reveal_delay: Duration) -> Self {
        Self {
            out,
            reveal_delay,
            strict: false,
        }
    }

    /// Stop at the first caller-contract violation instead of reporting and continuing.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub async fn run(
        &mut self,
        session: &mut Session,
        script: &[InputEvent],
    ) -> Result<ReplaySummary> {
        let mut events = session.subscribe_events();
        let mut committed = 0;
        let mut cancelled = 0;
        let mut errors = 0;

        for input in script {
            match apply_input(session, input) {
                Ok(Step::Committed(exit)) => {
                    committed += 1;
                    self.drain(&mut events)?;
                    debug!("replay: exit animation {}", exit.class_name());
                    if !self.reveal_delay.is_zero() {
                        tokio::time::sleep(self.reveal_delay).await;
                    }
                }
                Ok(Step::Cancelled) => {
                    cancelled += 1;
                    self.drain(&mut events)?;
                }
                Ok(Step::Applied) => self.drain(&mut events)?,
                Err(err) => {
                    errors += 1;
                    warn!("replay: rejected {input:?}: {err}");
                    self.emit(&SessionEvent::Error(ErrorPayload::from(&err)))?;
                    if self.strict {
                        return Err(err).context("pointer script violated the session protocol");
                    }
                }
            }
        }

        let summary = ReplaySummary {
            committed,
            cancelled,
            errors,
            view: session.view(),
            cart: session.list_cart(),
            favorites: session.list_favorites(),
        };
        info!(
            "replay: done committed={committed} cancelled={cancelled} errors={errors} cart={} favorites={}",
            summary.cart.len(),
            summary.favorites.len()
        );
        Ok(summary)
    }

    fn drain(&mut self, events: &mut broadcast::Receiver<SessionEvent>) -> Result<()> {
        loop {
            match events.try_recv() {
                Ok(event) => self.emit(&event)?,
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("replay: dropped {skipped} session events");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return Ok(()),
            }
        }
    }

    fn emit(&mut self, event: &SessionEvent) -> Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        writeln!(self.out)?;
        Ok(())
    }
}

fn apply_input(session: &mut Session, input: &InputEvent) -> Result<Step, SwipeError> {
    match input {
        InputEvent::PointerDown { x, y } => {
            session.begin_gesture(Point::new(*x, *y))?;
            Ok(Step::Applied)
        }
        InputEvent::PointerMove { x, y } => {
            let status = session.update_gesture(Point::new(*x, *y))?;
            if let Some(badge) = status_badge(status) {
                debug!("replay: showing {badge}");
            }
            Ok(Step::Applied)
        }
        InputEvent::PointerUp => {
            let outcome = session.release_gesture()?;
            Ok(match ExitAnimation::for_action(outcome.action) {
                Some(exit) => Step::Committed(exit),
                None => Step::Cancelled,
            })
        }
        InputEvent::RemoveFromCart { product_id } => {
            session.remove_from_cart(*product_id);
            Ok(Step::Applied)
        }
        InputEvent::RemoveFromFavorites { product_id } => {
            session.remove_from_favorites(*product_id);
            Ok(Step::Applied)
        }
    }
}

enum Step {
    Applied,
    Cancelled,
    Committed(ExitAnimation),
}

#[cfg(test)]
#[path = "tests/replay_tests.rs"]
mod tests;
