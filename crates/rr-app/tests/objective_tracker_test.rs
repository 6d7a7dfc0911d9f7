use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mockall::mock;
use tokio::time::advance;

use rr_app::ObjectiveTracker;
use rr_core::objective::{Objective, ObjectiveBoardView, ObjectiveTimings};
use rr_core::ports::{
    ObjectiveFeedPort, ObjectiveViewPort, RemoteError, Route, RouterPort,
};
use rr_core::{CampaignId, ObjectiveId};

mock! {
    pub Feed {}

    #[async_trait]
    impl ObjectiveFeedPort for Feed {
        async fn fetch_objectives(&self) -> Result<Vec<Objective>, RemoteError>;
    }
}

#[derive(Default)]
struct RecordingView {
    frames: Mutex<Vec<ObjectiveBoardView>>,
}

impl ObjectiveViewPort for RecordingView {
    fn render(&self, view: &ObjectiveBoardView) {
        self.frames.lock().unwrap().push(view.clone());
    }
}

impl RecordingView {
    fn frame_count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }
}

#[derive(Default)]
struct RecordingRouter {
    routes: Mutex<Vec<Route>>,
}

#[async_trait]
impl RouterPort for RecordingRouter {
    async fn navigate(&self, route: Route) -> anyhow::Result<()> {
        self.routes.lock().unwrap().push(route);
        Ok(())
    }
}

fn objective(id: &str, progress: f64) -> Objective {
    Objective {
        id: ObjectiveId::from(id),
        title: format!("Objective {id}"),
        progress,
        trophy_image: format!("https://cdn.example.com/{id}.png"),
        campaign_id: CampaignId::from(format!("campaign-{id}")),
    }
}

fn feed_returning(objectives: Vec<Objective>) -> MockFeed {
    let mut feed = MockFeed::new();
    feed.expect_fetch_objectives()
        .returning(move || Ok(objectives.clone()));
    feed
}

struct Harness {
    tracker: ObjectiveTracker,
    view: Arc<RecordingView>,
    router: Arc<RecordingRouter>,
}

fn harness(feed: MockFeed) -> Harness {
    let view = Arc::new(RecordingView::default());
    let router = Arc::new(RecordingRouter::default());
    let tracker = ObjectiveTracker::new(
        Arc::new(feed),
        view.clone(),
        router.clone(),
        ObjectiveTimings::default(),
    );
    Harness {
        tracker,
        view,
        router,
    }
}

async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

async fn elapse(ms: u64) {
    advance(Duration::from_millis(ms)).await;
    settle().await;
}

fn ids(objectives: &[Objective]) -> Vec<&str> {
    objectives.iter().map(|o| o.id.as_str()).collect()
}

#[tokio::test(start_paused = true)]
async fn visible_set_is_ranked_by_progress() {
    let h = harness(feed_returning(vec![
        objective("A", 0.2),
        objective("B", 0.9),
        objective("C", 0.1),
        objective("D", 0.5),
    ]));
    h.tracker.load().await.expect("load");

    for _ in 0..5 {
        h.tracker.tick_reveal().await;
    }

    assert_eq!(ids(&h.tracker.visible_set().await), vec!["B", "D", "A"]);
}

#[tokio::test(start_paused = true)]
async fn reveal_ramp_adds_one_card_per_interval() {
    let h = harness(feed_returning(vec![
        objective("A", 0.2),
        objective("B", 0.9),
        objective("C", 0.1),
        objective("D", 0.5),
    ]));
    h.tracker.load().await.expect("load");
    h.tracker.mount();
    settle().await;

    assert_eq!(h.tracker.display_count().await, 1);
    assert_eq!(ids(&h.tracker.visible_set().await), vec!["B"]);

    elapse(1_000).await;
    assert_eq!(h.tracker.display_count().await, 2);

    elapse(1_000).await;
    assert_eq!(h.tracker.display_count().await, 3);

    elapse(5_000).await;
    assert_eq!(h.tracker.display_count().await, 3);
    assert_eq!(ids(&h.tracker.visible_set().await), vec!["B", "D", "A"]);
}

#[tokio::test(start_paused = true)]
async fn mounting_twice_keeps_a_single_ramp() {
    let h = harness(feed_returning(vec![
        objective("A", 0.2),
        objective("B", 0.9),
        objective("C", 0.1),
    ]));
    h.tracker.load().await.expect("load");
    h.tracker.mount();
    h.tracker.mount();
    settle().await;

    elapse(1_000).await;
    assert_eq!(h.tracker.display_count().await, 2);

    elapse(1_000).await;
    assert_eq!(h.tracker.display_count().await, 3);
}

#[tokio::test(start_paused = true)]
async fn completed_objective_is_removed_after_dwell() {
    let h = harness(feed_returning(vec![objective("A", 0.4), objective("B", 1.0)]));
    h.tracker.load().await.expect("load");
    h.tracker.tick_reveal().await;
    settle().await;

    assert!(ids(&h.tracker.visible_set().await).contains(&"B"));

    elapse(6_999).await;
    assert!(ids(&h.tracker.visible_set().await).contains(&"B"));

    elapse(1).await;
    assert_eq!(ids(&h.tracker.visible_set().await), vec!["A"]);
}

#[tokio::test(start_paused = true)]
async fn celebration_shows_after_delay_for_its_duration() {
    let h = harness(feed_returning(vec![objective("B", 1.0)]));
    h.tracker.load().await.expect("load");
    settle().await;

    elapse(2_999).await;
    assert!(!h.tracker.is_celebrating().await);

    elapse(1).await;
    assert!(h.tracker.is_celebrating().await);

    elapse(3_999).await;
    assert!(h.tracker.is_celebrating().await);

    elapse(1).await;
    assert!(!h.tracker.is_celebrating().await);
}

#[tokio::test(start_paused = true)]
async fn reload_does_not_celebrate_twice_or_revive_removed_objectives() {
    let h = harness(feed_returning(vec![objective("A", 0.4), objective("B", 1.0)]));
    h.tracker.load().await.expect("load");
    settle().await;
    elapse(7_000).await;
    assert_eq!(ids(&h.tracker.objectives().await), vec!["A"]);

    h.tracker.load().await.expect("reload");
    settle().await;
    elapse(3_000).await;

    assert!(!h.tracker.is_celebrating().await);
    assert_eq!(ids(&h.tracker.objectives().await), vec!["A"]);
}

#[tokio::test(start_paused = true)]
async fn teardown_cancels_pending_effects() {
    let h = harness(feed_returning(vec![objective("A", 0.4), objective("B", 1.0)]));
    h.tracker.load().await.expect("load");
    h.tracker.mount();
    settle().await;
    let frames_before = h.view.frame_count();

    h.tracker.teardown();
    elapse(10_000).await;

    assert!(h.tracker.is_torn_down());
    assert_eq!(h.view.frame_count(), frames_before);
    assert_eq!(h.tracker.display_count().await, 1);
    assert!(!h.tracker.is_celebrating().await);
    assert_eq!(ids(&h.tracker.objectives().await), vec!["A", "B"]);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_tracker_cancels_pending_effects() {
    let view = Arc::new(RecordingView::default());
    {
        let tracker = ObjectiveTracker::new(
            Arc::new(feed_returning(vec![objective("B", 1.0)])),
            view.clone(),
            Arc::new(RecordingRouter::default()),
            ObjectiveTimings::default(),
        );
        tracker.load().await.expect("load");
        tracker.mount();
        settle().await;
    }
    let frames_before = view.frame_count();

    elapse(10_000).await;

    assert_eq!(view.frame_count(), frames_before);
}

#[tokio::test(start_paused = true)]
async fn load_failure_keeps_the_previous_board() {
    let mut feed = MockFeed::new();
    let mut calls = 0;
    feed.expect_fetch_objectives().times(2).returning(move || {
        calls += 1;
        if calls == 1 {
            Ok(vec![objective("A", 0.4)])
        } else {
            Err(RemoteError::FeedRejected { status: 503 })
        }
    });
    let h = harness(feed);
    h.tracker.load().await.expect("first load");

    let err = h.tracker.load().await.expect_err("second load");

    assert!(matches!(err, RemoteError::FeedRejected { status: 503 }));
    assert_eq!(ids(&h.tracker.objectives().await), vec!["A"]);
}

#[tokio::test(start_paused = true)]
async fn dismiss_removes_the_objective_once() {
    let h = harness(feed_returning(vec![objective("A", 0.4), objective("B", 0.6)]));
    h.tracker.load().await.expect("load");

    assert!(h.tracker.dismiss(&ObjectiveId::from("A")).await);
    assert!(!h.tracker.dismiss(&ObjectiveId::from("A")).await);
    assert!(!h.tracker.dismiss(&ObjectiveId::from("missing")).await);

    assert_eq!(ids(&h.tracker.objectives().await), vec!["B"]);
}

#[tokio::test(start_paused = true)]
async fn open_navigates_to_the_objective_campaign() {
    let h = harness(feed_returning(vec![objective("A", 0.4)]));
    h.tracker.load().await.expect("load");

    assert!(h.tracker.open(&ObjectiveId::from("A")).await.expect("open"));
    assert!(!h
        .tracker
        .open(&ObjectiveId::from("missing"))
        .await
        .expect("open missing"));

    assert_eq!(
        *h.router.routes.lock().unwrap(),
        vec![Route::Campaign {
            campaign_id: CampaignId::from("campaign-A")
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn every_change_is_rendered() {
    let h = harness(feed_returning(vec![objective("A", 0.4), objective("B", 0.8)]));
    h.tracker.load().await.expect("load");
    h.tracker.tick_reveal().await;

    let frames = h.view.frames.lock().unwrap().clone();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].cards.len(), 1);
    assert_eq!(frames[1].cards.len(), 2);
    assert_eq!(frames[1].cards[0].title, "Objective B");
}
