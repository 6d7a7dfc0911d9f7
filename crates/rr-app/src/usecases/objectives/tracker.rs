//! Objective tracker.
//!
//! Owns the home-screen objective board and its delayed effects: the reveal
//! ramp, the completion celebration and the automatic removal of completed
//! objectives. Every effect is scheduled on the tracker's [`TimerScope`] and
//! dies with it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, info, info_span, Instrument};

use rr_core::{
    ids::ObjectiveId,
    objective::{Objective, ObjectiveBoard, ObjectiveBoardView, ObjectiveTimings},
    ports::{ObjectiveFeedPort, ObjectiveViewPort, RemoteError, Route, RouterPort},
};

use super::timers::TimerScope;

pub struct ObjectiveTracker {
    feed: Arc<dyn ObjectiveFeedPort>,
    view: Arc<dyn ObjectiveViewPort>,
    router: Arc<dyn RouterPort>,
    board: Arc<Mutex<ObjectiveBoard>>,
    timings: ObjectiveTimings,
    timers: TimerScope,
    mounted: AtomicBool,
}

impl ObjectiveTracker {
    pub fn new(
        feed: Arc<dyn ObjectiveFeedPort>,
        view: Arc<dyn ObjectiveViewPort>,
        router: Arc<dyn RouterPort>,
        timings: ObjectiveTimings,
    ) -> Self {
        Self {
            feed,
            view,
            router,
            board: Arc::new(Mutex::new(ObjectiveBoard::new(timings.max_visible))),
            timings,
            timers: TimerScope::new(),
            mounted: AtomicBool::new(false),
        }
    }

    pub fn timings(&self) -> &ObjectiveTimings {
        &self.timings
    }

    /// Starts the reveal ramp: one more card every `reveal_interval` until
    /// `max_visible` cards are shown. Only the first call starts a ramp.
    pub fn mount(&self) {
        if self.mounted.swap(true, Ordering::AcqRel) {
            debug!("objective tracker already mounted");
            return;
        }
        let board = Arc::clone(&self.board);
        let view = Arc::clone(&self.view);
        let cancel = self.timers.cancel_flag();
        let interval = self.timings.reveal_interval;
        let mut deadline = Instant::now() + interval;

        self.timers.spawn(
            "objectives.reveal",
            async move {
                loop {
                    sleep_until(deadline).await;
                    let mut board = board.lock().await;
                    if cancel.is_cancelled() {
                        break;
                    }
                    let more = board.tick_reveal();
                    debug!(display_count = board.display_count(), "objective reveal tick");
                    view.render(&board.view());
                    if !more {
                        break;
                    }
                    deadline += interval;
                }
            }
            .instrument(info_span!("usecase.objectives.reveal")),
        );
    }

    /// Fetches the objectives and replaces the board.
    ///
    /// Objectives that reach completion for the first time get their
    /// celebration and removal scheduled. On failure the board is left as it
    /// was and the error is logged and returned.
    pub async fn load(&self) -> Result<(), RemoteError> {
        let span = info_span!("usecase.objectives.load");
        async {
            let objectives = match self.feed.fetch_objectives().await {
                Ok(objectives) => objectives,
                Err(err) => {
                    error!(error = %err, "failed to load objectives");
                    return Err(err);
                }
            };

            let count = objectives.len();
            let newly_complete = {
                let mut board = self.board.lock().await;
                let newly_complete = board.replace(objectives);
                self.view.render(&board.view());
                newly_complete
            };
            info!(count, completed = newly_complete.len(), "objectives loaded");

            for objective in &newly_complete {
                self.on_progress_complete(objective);
            }
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Schedules the celebration banner and the removal of a completed
    /// objective. Both are measured from now.
    pub fn on_progress_complete(&self, objective: &Objective) {
        let start = Instant::now();
        info!(objective_id = %objective.id, "objective complete");

        let board = Arc::clone(&self.board);
        let view = Arc::clone(&self.view);
        let cancel = self.timers.cancel_flag();
        let show_at = start + self.timings.celebration_delay;
        let hide_at = show_at + self.timings.celebration_duration;
        self.timers.spawn("objectives.celebration", async move {
            sleep_until(show_at).await;
            {
                let mut board = board.lock().await;
                if cancel.is_cancelled() {
                    return;
                }
                board.show_celebration();
                view.render(&board.view());
            }
            sleep_until(hide_at).await;
            let mut board = board.lock().await;
            if cancel.is_cancelled() {
                return;
            }
            board.hide_celebration();
            view.render(&board.view());
        });

        let board = Arc::clone(&self.board);
        let view = Arc::clone(&self.view);
        let cancel = self.timers.cancel_flag();
        let remove_at = start + self.timings.completion_dwell;
        let id = objective.id.clone();
        self.timers.spawn("objectives.removal", async move {
            sleep_until(remove_at).await;
            let mut board = board.lock().await;
            if cancel.is_cancelled() {
                return;
            }
            if board.dismiss(&id) {
                info!(objective_id = %id, "completed objective removed");
            }
            view.render(&board.view());
        });
    }

    /// Advances the reveal ramp by hand. Returns whether more cards remain.
    pub async fn tick_reveal(&self) -> bool {
        let mut board = self.board.lock().await;
        let more = board.tick_reveal();
        self.view.render(&board.view());
        more
    }

    /// Removes an objective from the board. Removing an unknown id is a
    /// no-op; a pending removal timer for it later finds nothing to do.
    pub async fn dismiss(&self, id: &ObjectiveId) -> bool {
        let mut board = self.board.lock().await;
        let removed = board.dismiss(id);
        if removed {
            info!(objective_id = %id, "objective dismissed");
            self.view.render(&board.view());
        }
        removed
    }

    /// Opens the campaign of an objective. Returns false for unknown ids.
    pub async fn open(&self, id: &ObjectiveId) -> anyhow::Result<bool> {
        let campaign_id = {
            let board = self.board.lock().await;
            match board.get(id) {
                Some(objective) => objective.campaign_id.clone(),
                None => {
                    debug!(objective_id = %id, "open ignored for unknown objective");
                    return Ok(false);
                }
            }
        };
        self.router.navigate(Route::Campaign { campaign_id }).await?;
        Ok(true)
    }

    /// Top objectives by progress, at most `display_count` of them.
    pub async fn visible_set(&self) -> Vec<Objective> {
        let board = self.board.lock().await;
        board.visible_set().into_iter().cloned().collect()
    }

    pub async fn objectives(&self) -> Vec<Objective> {
        self.board.lock().await.objectives().to_vec()
    }

    pub async fn display_count(&self) -> usize {
        self.board.lock().await.display_count()
    }

    pub async fn is_celebrating(&self) -> bool {
        self.board.lock().await.is_celebrating()
    }

    pub async fn view(&self) -> ObjectiveBoardView {
        self.board.lock().await.view()
    }

    /// Cancels every pending effect. No effect starts after this returns;
    /// a body already past its cancellation check may still finish its
    /// render.
    pub fn teardown(&self) {
        self.timers.cancel_all();
        info!("objective tracker torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.timers.is_closed()
    }
}
