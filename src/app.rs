use std::time::{Duration, SystemTime};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::error::{HuntError, HuntResult};
use crate::game::{ElapsedTime, GameSession, GuessOutcome, MinutesRule, Phase};
use crate::leaderboard::{Leaderboard, ScoreEntry};
use crate::notice::{Notice, NoticeBoard};
use crate::region::{hit_test, RegionIndex};
use crate::runtime::GameEvent;
use crate::scene::Scene;
use crate::sync::{ScoreSync, SyncEvent};
use crate::target::Target;
use crate::ui;
use crate::viewport::{Point, ViewportMapper};

pub const MAX_NAME_LEN: usize = 20;

/// Whether the event loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Where the player's guess landed, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guess {
    pub column: u16,
    pub row: u16,
    pub hit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Name entry open.
    Editing,
    /// Optimistically merged, waiting for the store.
    Pending(ScoreEntry),
    /// The store rejected or never received the entry; Enter retries.
    Failed(ScoreEntry),
    Submitted,
}

/// Result of a finished run, computed once at the completion edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub elapsed: ElapsedTime,
    pub is_new_high_score: bool,
    pub submission: Submission,
}

impl Completion {
    pub fn reset_available(&self) -> bool {
        !self.is_new_high_score || self.submission == Submission::Submitted
    }
}

pub struct App {
    scene: Scene,
    session: GameSession,
    regions: Option<RegionIndex>,
    loading: bool,
    mapper: ViewportMapper,
    layout: ui::ScreenLayout,
    leaderboard: Leaderboard,
    notices: NoticeBoard,
    last_guess: Option<Guess>,
    completion: Option<Completion>,
    name_input: String,
    sync: ScoreSync,
}

impl App {
    pub fn new(scene: Scene, sync: ScoreSync, minutes_rule: MinutesRule, notice_ttl: Duration) -> Self {
        Self {
            scene,
            session: GameSession::new(minutes_rule),
            regions: None,
            loading: true,
            mapper: ViewportMapper::new(),
            layout: ui::ScreenLayout::default(),
            leaderboard: Leaderboard::new(),
            notices: NoticeBoard::new(notice_ttl),
            last_guess: None,
            completion: None,
            name_input: String::new(),
            sync,
        }
    }

    /// Kick off the one-per-session region and leaderboard fetches.
    pub fn start(&self) {
        self.sync.request_regions();
        self.sync.request_leaderboard();
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notices.current()
    }

    pub fn last_guess(&self) -> Option<Guess> {
        self.last_guess
    }

    pub fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn layout(&self) -> &ui::ScreenLayout {
        &self.layout
    }

    pub fn handle_event(&mut self, event: GameEvent, now: SystemTime) -> Flow {
        match event {
            GameEvent::Key(key) => return self.on_key(key, now),
            GameEvent::Click { column, row } => self.on_click(column, row, now),
            GameEvent::Resize(w, h) => self.on_resize(Rect::new(0, 0, w, h)),
            GameEvent::Tick => self.notices.tick(now),
            GameEvent::Sync(ev) => self.on_sync(ev, now),
        }
        Flow::Continue
    }

    /// Re-measure the picture. Must run before any click on the new layout
    /// is interpreted.
    pub fn on_resize(&mut self, area: Rect) {
        self.layout = ui::ScreenLayout::new(area, self.scene.min_picture());
        self.mapper.recompute(self.layout.picture.into(), (0.0, 0.0));
        self.notices.clear_layout_notice();
        if !self.layout.fits() {
            warn!(picture = ?self.layout.picture, "picture smaller than the art");
        }
    }

    /// Called after each frame is drawn; the timer starts on the first frame
    /// that shows a playable picture.
    pub fn on_rendered(&mut self, now: SystemTime) {
        if !self.loading && self.layout.fits() && self.session.on_timer_arm(now) {
            info!("timer started");
        }
    }

    fn raise(&mut self, err: HuntError, now: SystemTime) {
        self.notices.raise(&err, now);
    }

    pub fn select_target(&mut self, target: Target, now: SystemTime) {
        match self.session.select_target(target) {
            Ok(()) => self.notices.clear_target_notice(),
            Err(e) => self.raise(e, now),
        }
    }

    fn on_click(&mut self, column: u16, row: u16, now: SystemTime) {
        if self.loading || self.session.phase() == Phase::Completed {
            return;
        }
        if let Some(target) = self.layout.target_at(column, row) {
            self.select_target(target, now);
            return;
        }
        if !self.layout.fits() {
            self.raise(HuntError::Configuration(self.layout.too_small_message()), now);
            return;
        }
        if !self.layout.picture_contains(column, row) {
            return;
        }

        let hit = match self.evaluate_guess(Point::from_cell(column, row)) {
            Ok(hit) => hit,
            Err(e) => {
                self.raise(e, now);
                false
            }
        };
        self.last_guess = Some(Guess { column, row, hit });

        if let GuessOutcome::Completed(elapsed) = self.session.on_guess(hit, now) {
            self.on_completed(elapsed);
        }
    }

    fn evaluate_guess(&self, point: Point) -> HuntResult<bool> {
        let normalized = self.mapper.normalize(point)?;
        let active = self
            .session
            .active()
            .ok_or_else(|| HuntError::UserInput("Every icon is already found".into()))?;
        let regions = self
            .regions
            .as_ref()
            .ok_or(HuntError::TargetNotFound(active))?;
        let hit = hit_test(normalized, active, regions)?;
        debug!(?normalized, target = %active, hit, "guess evaluated");
        Ok(hit)
    }

    fn on_completed(&mut self, elapsed: ElapsedTime) {
        let is_new_high_score = self.leaderboard.qualifies(elapsed.total_seconds);
        info!(
            total_seconds = elapsed.total_seconds,
            is_new_high_score, "run completed"
        );
        self.completion = Some(Completion {
            elapsed,
            is_new_high_score,
            submission: Submission::Editing,
        });
    }

    pub fn submit_name(&mut self, now: SystemTime) {
        let Some(completion) = self.completion.as_mut() else {
            return;
        };
        if !completion.is_new_high_score {
            return;
        }

        match completion.submission.clone() {
            Submission::Pending(_) | Submission::Submitted => {}
            Submission::Failed(entry) => {
                info!(name = %entry.display_name, "retrying score submission");
                completion.submission = Submission::Pending(entry.clone());
                self.sync.submit(entry);
            }
            Submission::Editing => {
                let name = self.name_input.trim().to_string();
                if name.is_empty() {
                    self.raise(HuntError::UserInput("Enter a name first".into()), now);
                    return;
                }
                self.name_input = name.clone();

                let entry = ScoreEntry::new(name, &completion.elapsed);
                let outcome = self.leaderboard.merge(entry.clone());
                self.leaderboard = outcome.updated;
                completion.submission = Submission::Pending(entry.clone());
                self.sync.submit(entry);
            }
        }
    }

    pub fn reset(&mut self) {
        if !self.completion.as_ref().is_some_and(Completion::reset_available) {
            return;
        }
        self.session.reset();
        self.completion = None;
        self.last_guess = None;
        self.name_input.clear();
    }

    fn on_sync(&mut self, event: SyncEvent, now: SystemTime) {
        match event {
            SyncEvent::RegionsLoaded(result) => {
                self.loading = false;
                match result {
                    Ok(index) => {
                        let missing = index.missing_targets();
                        if !missing.is_empty() {
                            warn!(?missing, "region data does not cover every target");
                        }
                        self.regions = Some(index);
                    }
                    Err(e) => self.raise(e, now),
                }
            }
            SyncEvent::LeaderboardLoaded(result) => match result {
                Ok(board) => self.leaderboard = board,
                Err(e) => self.raise(e, now),
            },
            SyncEvent::ScoreSubmitted(result) => {
                let Some(completion) = self.completion.as_mut() else {
                    return;
                };
                let Submission::Pending(entry) = completion.submission.clone() else {
                    return;
                };
                match result {
                    Ok(()) => completion.submission = Submission::Submitted,
                    Err(e) => {
                        completion.submission = Submission::Failed(entry);
                        self.raise(e, now);
                    }
                }
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent, now: SystemTime) -> Flow {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Flow::Quit;
        }

        let Some(completion) = self.completion.as_ref() else {
            match key.code {
                KeyCode::Char('q') => return Flow::Quit,
                KeyCode::Char(c @ '1'..='9') => {
                    let idx = c as usize - '1' as usize;
                    if let Some(target) = Target::from_index(idx) {
                        self.select_target(target, now);
                    }
                }
                KeyCode::Tab => {
                    if let Some(next) = self.session.next_remaining() {
                        self.select_target(next, now);
                    }
                }
                _ => {}
            }
            return Flow::Continue;
        };

        let editing = completion.is_new_high_score
            && matches!(
                completion.submission,
                Submission::Editing | Submission::Failed(_)
            );

        if editing {
            match key.code {
                KeyCode::Enter => self.submit_name(now),
                KeyCode::Backspace => {
                    if completion.submission == Submission::Editing {
                        self.name_input.pop();
                    }
                }
                KeyCode::Char(c) => {
                    if completion.submission == Submission::Editing
                        && self.name_input.chars().count() < MAX_NAME_LEN
                    {
                        self.name_input.push(c);
                    }
                }
                _ => {}
            }
        } else if completion.reset_available() {
            match key.code {
                KeyCode::Char('r') => self.reset(),
                KeyCode::Char('q') => return Flow::Quit,
                _ => {}
            }
        }
        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Backend, LocalBackend, RegionSource};
    use crate::leaderboard::CAPACITY;
    use crate::notice::NoticeKind;
    use crate::scene::DEFAULT_SCENE;
    use crate::store::ScoreDb;
    use assert_matches::assert_matches;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::sync::Arc;

    struct Harness {
        app: App,
        rx: mpsc::Receiver<GameEvent>,
    }

    fn t0() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }

    fn harness_with(backend: Arc<dyn Backend>) -> Harness {
        let (tx, rx) = mpsc::channel();
        let sync = ScoreSync::new(backend, tx).unwrap();
        let scene = Scene::bundled(DEFAULT_SCENE).unwrap();
        let mut app = App::new(scene, sync, MinutesRule::Floor, Duration::from_millis(2000));
        app.on_resize(Rect::new(0, 0, 100, 30));
        Harness { app, rx }
    }

    fn local_backend(db: ScoreDb) -> Arc<dyn Backend> {
        let scene = Scene::bundled(DEFAULT_SCENE).unwrap();
        Arc::new(LocalBackend::new(
            RegionSource::Bundled(scene.regions().clone()),
            db,
        ))
    }

    impl Harness {
        fn pump(&mut self, now: SystemTime) {
            let ev = self.rx.recv_timeout(Duration::from_secs(5)).unwrap();
            self.app.handle_event(ev, now);
        }

        fn ready(mut self) -> Self {
            self.app.start();
            self.pump(t0());
            self.pump(t0());
            self.app.on_rendered(t0());
            self
        }

        /// Terminal cell over the first region of `target`.
        fn cell_for(&self, target: Target) -> (u16, u16) {
            let region = self.app.scene().regions().regions_for(target).unwrap()[0];
            let p = self.app.layout().picture;
            let rel_x = (region.min_x + region.max_x) / 2.0;
            let rel_y = (region.min_y + region.max_y) / 2.0;
            let column = p.x + (rel_x / 100.0 * p.width as f64) as u16;
            let row = p.y + (rel_y / 100.0 * p.height as f64) as u16;
            (column, row)
        }

        fn click_target(&mut self, target: Target, now: SystemTime) {
            let (column, row) = self.cell_for(target);
            self.app
                .handle_event(GameEvent::Click { column, row }, now);
        }

        fn key(&mut self, code: KeyCode) -> Flow {
            self.app.handle_event(
                GameEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)),
                t0(),
            )
        }

        fn type_text(&mut self, s: &str) {
            for c in s.chars() {
                self.key(KeyCode::Char(c));
            }
        }

        fn finish_run(&mut self, secs: u64) {
            for t in Target::ALL {
                self.click_target(t, t0() + Duration::from_secs(secs));
            }
        }
    }

    #[test]
    fn loading_blocks_guesses_and_timer() {
        let mut h = harness_with(local_backend(ScoreDb::open_in_memory().unwrap()));
        assert!(h.app.is_loading());
        h.app.on_rendered(t0());
        assert!(h.app.session().started_at().is_none());
        h.click_target(Target::Parakeet, t0());
        assert!(h.app.last_guess().is_none());
    }

    #[test]
    fn correct_clicks_complete_the_run() {
        let mut h = harness_with(local_backend(ScoreDb::open_in_memory().unwrap())).ready();
        assert_eq!(h.app.session().started_at(), Some(t0()));

        h.click_target(Target::Parakeet, t0() + Duration::from_secs(3));
        assert_eq!(h.app.session().active(), Some(Target::Knight));
        assert!(h.app.last_guess().unwrap().hit);

        h.finish_run(75);
        let c = h.app.completion().unwrap();
        assert_eq!(c.elapsed.total_seconds, 75);
        assert_eq!(c.elapsed.display(), "01 : 15");
        assert!(c.is_new_high_score);
        assert!(!c.reset_available());
    }

    #[test]
    fn wrong_click_marks_a_miss() {
        let mut h = harness_with(local_backend(ScoreDb::open_in_memory().unwrap())).ready();
        let (column, row) = h.cell_for(Target::King);
        h.app.handle_event(GameEvent::Click { column, row }, t0());
        let guess = h.app.last_guess().unwrap();
        assert!(!guess.hit);
        assert_eq!(h.app.session().remaining().len(), 3);
    }

    #[test]
    fn resize_keeps_hits_resolution_independent() {
        let mut h = harness_with(local_backend(ScoreDb::open_in_memory().unwrap())).ready();
        h.app.on_resize(Rect::new(0, 0, 180, 50));
        h.click_target(Target::Parakeet, t0());
        assert!(h.app.last_guess().unwrap().hit);
        h.app.on_resize(Rect::new(0, 0, 60, 24));
        h.click_target(Target::Knight, t0());
        assert!(h.app.last_guess().unwrap().hit);
    }

    #[test]
    fn selecting_found_target_raises_hint() {
        let mut h = harness_with(local_backend(ScoreDb::open_in_memory().unwrap())).ready();
        h.click_target(Target::Parakeet, t0());
        h.key(KeyCode::Char('1'));
        let notice = h.app.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Hint);
        assert_eq!(h.app.session().active(), Some(Target::Knight));

        h.key(KeyCode::Char('3'));
        assert!(h.app.notice().is_none());
        assert_eq!(h.app.session().active(), Some(Target::King));
    }

    #[test]
    fn tab_cycles_remaining_targets() {
        let mut h = harness_with(local_backend(ScoreDb::open_in_memory().unwrap())).ready();
        h.key(KeyCode::Tab);
        assert_eq!(h.app.session().active(), Some(Target::Knight));
        h.key(KeyCode::Tab);
        h.key(KeyCode::Tab);
        assert_eq!(h.app.session().active(), Some(Target::Parakeet));
    }

    #[test]
    fn failed_region_fetch_degrades_gameplay() {
        let mut h = harness_with(Arc::new(LocalBackend::new(
            RegionSource::File("/no/such/regions.json".into()),
            ScoreDb::open_in_memory().unwrap(),
        )))
        .ready();
        assert!(!h.app.is_loading());
        assert!(h.app.notice().is_some());

        h.click_target(Target::Parakeet, t0() + Duration::from_secs(10));
        let notice = h.app.notice().unwrap();
        assert!(notice.message.contains("Icon not found"));
        assert!(!h.app.last_guess().unwrap().hit);
    }

    #[test]
    fn submit_merges_optimistically_then_unlocks_reset() {
        let mut h = harness_with(local_backend(ScoreDb::open_in_memory().unwrap())).ready();
        h.finish_run(42);

        h.key(KeyCode::Enter);
        assert!(h.app.notice().unwrap().message.contains("Enter a name"));

        h.type_text("  ada  ");
        h.key(KeyCode::Enter);
        assert_eq!(h.app.name_input(), "ada");
        assert_eq!(h.app.leaderboard().len(), 1);
        assert_eq!(h.app.leaderboard().entries()[0].display_name, "ada");
        assert!(matches!(
            h.app.completion().unwrap().submission,
            Submission::Pending(_)
        ));

        // Reset is locked until the store confirms.
        h.key(KeyCode::Char('r'));
        assert!(h.app.completion().is_some());

        h.pump(t0());
        assert!(h.app.completion().unwrap().reset_available());
        h.key(KeyCode::Char('r'));
        assert!(h.app.completion().is_none());
        assert_eq!(h.app.session().phase(), Phase::Playing);
        assert!(h.app.name_input().is_empty());
        // The board survives a reset.
        assert_eq!(h.app.leaderboard().len(), 1);
    }

    #[test]
    fn slow_run_on_full_board_goes_straight_to_reset() {
        let mut db = ScoreDb::open_in_memory().unwrap();
        for t in 1..=CAPACITY as u64 {
            db.submit(&ScoreEntry {
                display_name: format!("p{}", t),
                total_seconds: t,
                minutes_part: "00".into(),
                seconds_part: format!("{:02}", t),
            })
            .unwrap();
        }
        let mut h = harness_with(local_backend(db)).ready();
        h.finish_run(600);
        let c = h.app.completion().unwrap();
        assert!(!c.is_new_high_score);
        assert!(c.reset_available());

        h.type_text("zzz");
        assert!(h.app.name_input().is_empty());
        assert_eq!(h.key(KeyCode::Char('q')), Flow::Quit);
    }

    #[test]
    fn clicks_after_completion_are_ignored() {
        let mut h = harness_with(local_backend(ScoreDb::open_in_memory().unwrap())).ready();
        h.finish_run(5);
        let before = h.app.last_guess();
        h.click_target(Target::King, t0());
        assert_eq!(h.app.last_guess(), before);
    }

    #[test]
    fn escape_quits_from_any_state() {
        let mut h = harness_with(local_backend(ScoreDb::open_in_memory().unwrap())).ready();
        assert_eq!(h.key(KeyCode::Esc), Flow::Quit);
        h.finish_run(5);
        assert_eq!(h.key(KeyCode::Esc), Flow::Quit);
    }

    #[test]
    fn name_is_capped() {
        let mut h = harness_with(local_backend(ScoreDb::open_in_memory().unwrap())).ready();
        h.finish_run(5);
        h.type_text(&"x".repeat(MAX_NAME_LEN + 5));
        assert_eq!(h.app.name_input().len(), MAX_NAME_LEN);
        h.key(KeyCode::Backspace);
        assert_eq!(h.app.name_input().len(), MAX_NAME_LEN - 1);
    }

    #[test]
    fn small_picture_rejects_clicks_with_a_notice() {
        let mut h = harness_with(local_backend(ScoreDb::open_in_memory().unwrap())).ready();
        h.app.on_resize(Rect::new(0, 0, 80, 14));
        assert!(!h.app.layout().fits());

        let p = h.app.layout().picture;
        h.app
            .handle_event(GameEvent::Click { column: p.x, row: p.y }, t0());
        let notice = h.app.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.contains("Terminal too small"));
        assert!(h.app.last_guess().is_none());
        assert_eq!(h.app.session().remaining().len(), Target::ALL.len());

        h.app.on_resize(Rect::new(0, 0, 100, 30));
        assert!(h.app.notice().is_none());
        h.click_target(Target::Parakeet, t0());
        assert!(h.app.last_guess().unwrap().hit);
    }

    #[test]
    fn zero_height_picture_still_explains_itself() {
        let mut h = harness_with(local_backend(ScoreDb::open_in_memory().unwrap())).ready();
        h.app.on_resize(Rect::new(0, 0, 80, 4));
        assert_eq!(h.app.layout().picture.height, 0);
        h.app
            .handle_event(GameEvent::Click { column: 10, row: 3 }, t0());
        assert!(h.app.notice().unwrap().layout_related);
    }

    #[test]
    fn timer_waits_for_a_playable_picture() {
        let mut h = harness_with(local_backend(ScoreDb::open_in_memory().unwrap()));
        h.app.on_resize(Rect::new(0, 0, 80, 14));
        h.app.start();
        h.pump(t0());
        h.pump(t0());
        h.app.on_rendered(t0());
        assert_eq!(h.app.session().started_at(), None);

        let later = t0() + Duration::from_secs(7);
        h.app.on_resize(Rect::new(0, 0, 80, 24));
        h.app.on_rendered(later);
        assert_eq!(h.app.session().started_at(), Some(later));
    }

    #[test]
    fn every_target_is_hittable_once_the_picture_fits() {
        let mut h = harness_with(local_backend(ScoreDb::open_in_memory().unwrap())).ready();
        let sizes = (52..=140u16)
            .map(|w| (w, 20u16))
            .chain((20..=50u16).map(|ht| (52u16, ht)));

        for (w, ht) in sizes {
            h.app.on_resize(Rect::new(0, 0, w, ht));
            assert!(h.app.layout().fits(), "{}x{}", w, ht);
            let p = h.app.layout().picture;
            for target in Target::ALL {
                h.app.select_target(target, t0());
                let hits = (p.x..p.x + p.width)
                    .flat_map(|c| (p.y..p.y + p.height).map(move |r| (c, r)))
                    .filter(|&(c, r)| h.app.evaluate_guess(Point::from_cell(c, r)).unwrap())
                    .count();
                assert!(hits > 0, "{} unreachable at {}x{}", target, w, ht);
            }
        }
    }

    struct FlakyBackend {
        inner: LocalBackend,
        failures_left: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Backend for FlakyBackend {
        async fn fetch_regions(&self) -> HuntResult<RegionIndex> {
            self.inner.fetch_regions().await
        }

        async fn fetch_leaderboard(&self) -> HuntResult<Leaderboard> {
            self.inner.fetch_leaderboard().await
        }

        async fn submit_score(&self, entry: &ScoreEntry) -> HuntResult<()> {
            let fail = self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if fail {
                return Err(HuntError::Fetch("Error updating leaderboard: 500".into()));
            }
            self.inner.submit_score(entry).await
        }
    }

    #[test]
    fn failed_submit_keeps_merge_and_retries_on_enter() {
        let scene = Scene::bundled(DEFAULT_SCENE).unwrap();
        let backend = Arc::new(FlakyBackend {
            inner: LocalBackend::new(
                RegionSource::Bundled(scene.regions().clone()),
                ScoreDb::open_in_memory().unwrap(),
            ),
            failures_left: AtomicUsize::new(1),
        });
        let mut h = harness_with(backend).ready();
        h.finish_run(42);
        h.type_text("ada");
        h.key(KeyCode::Enter);
        assert_eq!(h.app.leaderboard().len(), 1);

        h.pump(t0());
        let c = h.app.completion().unwrap();
        assert_matches!(c.submission, Submission::Failed(_));
        assert!(!c.reset_available());
        let notice = h.app.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.contains("Error updating leaderboard"));

        // Still locked, and typing no longer edits the submitted name.
        h.key(KeyCode::Char('r'));
        assert!(h.app.completion().is_some());
        assert_eq!(h.app.name_input(), "ada");

        h.key(KeyCode::Enter);
        assert_matches!(
            h.app.completion().unwrap().submission,
            Submission::Pending(_)
        );
        assert_eq!(h.app.leaderboard().len(), 1);
        assert!(!h.app.completion().unwrap().reset_available());

        h.pump(t0());
        assert_eq!(
            h.app.completion().unwrap().submission,
            Submission::Submitted
        );
        assert!(h.app.completion().unwrap().reset_available());
        assert_eq!(h.app.leaderboard().len(), 1);
    }
}
