use crate::{
    error::ActionError,
    handlers::quiz_handler::Action,
    models::{communication::Response, session::QuizSession, snapshot::QuizSnapshot},
};
use futures_channel::mpsc::{UnboundedReceiver, UnboundedSender};
use futures_timer::Delay;
use futures_util::{
    future::{self, Either},
    StreamExt,
};
use log::{debug, info, warn};
use std::time::Duration;

type Tx = UnboundedSender<Response>;
type Rx = UnboundedReceiver<Action>;

/// One armed countdown step: fires once, then is re-armed by the loop while
/// the session's epoch stays the same.
type PendingTick = Option<(u64, Delay)>;

enum Event {
    Action(Option<Action>),
    Tick(u64),
}

/// Owns the session for its whole life: applies actions from `rx`, drives the
/// countdown, and publishes a response for every action it handles.
///
/// Returns the session once `rx` is closed or nobody listens on `tx` anymore.
pub async fn handle_quiz(
    mut session: QuizSession,
    mut rx: Rx,
    tx: Tx,
    tick_interval: Duration,
) -> QuizSession {
    info!(
        "[{}] Session started with {} questions",
        session.id(),
        session.questions().len()
    );
    if !publish(&tx, Response::Snapshot(session.snapshot())) {
        return session;
    }

    let mut pending_tick: PendingTick = None;
    loop {
        pending_tick = arm_tick(pending_tick, &session, tick_interval);

        let event = match pending_tick.as_mut() {
            Some((armed_epoch, delay)) => {
                let armed_epoch = *armed_epoch;
                match future::select(rx.next(), delay).await {
                    Either::Left((action, _)) => Event::Action(action),
                    Either::Right(_) => Event::Tick(armed_epoch),
                }
            }
            None => Event::Action(rx.next().await),
        };

        let action = match event {
            Event::Action(Some(action)) => action,
            Event::Action(None) => {
                info!("[{}] Action channel closed", session.id());
                break;
            }
            Event::Tick(epoch) => {
                pending_tick = None;
                Action::Tick { epoch }
            }
        };

        let was_completed = session.is_completed();
        let delivered = match session.dispatch(action) {
            Ok(snapshot) => publish_transition(&tx, &session, snapshot, was_completed),
            Err(ActionError::StaleTick { tick, current }) => {
                debug!(
                    "[{}] Dropped stale tick for epoch {} (now {})",
                    session.id(),
                    tick,
                    current
                );
                true
            }
            Err(error) => publish(&tx, Response::from(&error)),
        };
        if !delivered {
            warn!("[{}] Renderer went away, stopping session", session.id());
            break;
        }
    }

    session
}

/// Keeps a pending tick only while it belongs to the running countdown of the
/// current epoch; anything else is dropped, which cancels it.
fn arm_tick(pending: PendingTick, session: &QuizSession, interval: Duration) -> PendingTick {
    if !session.timer_running() {
        return None;
    }
    match pending {
        Some((epoch, delay)) if epoch == session.epoch() => Some((epoch, delay)),
        _ => Some((session.epoch(), Delay::new(interval))),
    }
}

fn publish_transition(
    tx: &Tx,
    session: &QuizSession,
    snapshot: QuizSnapshot,
    was_completed: bool,
) -> bool {
    let just_completed = snapshot.completed && !was_completed;
    if !publish(tx, Response::Snapshot(snapshot)) {
        return false;
    }
    if just_completed {
        if let Ok(review) = session.review() {
            return publish(tx, Response::QuizFinished(review));
        }
    }
    true
}

fn publish(tx: &Tx, response: Response) -> bool {
    tx.unbounded_send(response).is_ok()
}
