//! Search orchestrator
//!
//! Owns the input, the debouncer, the cache, the phase machine, and the
//! worker threads that talk to the API. Single UI thread; workers report
//! back over a channel that is drained once per tick. Each dispatched
//! search carries a generation number and responses for superseded
//! generations are dropped, so results always apply in commit order.

use crate::api::types::{SearchResult, SearchResultSet, TrackEvent, TrendingItem};
use crate::api::SearchClient;
use crate::cache::{CacheLookup, QueryCache};
use crate::config::AppConfig;
use crate::debounce::Debouncer;
use crate::history::{trending_fallback, RecentSearches};
use crate::logging;
use crate::tui::input::InputState;
use crate::tui::results::ResultsState;
use crate::tui::ui;
use crate::Result;
use crossbeam_channel::{unbounded, Receiver, Sender};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use std::thread;
use std::time::{Duration, Instant};

/// How many recent entries the idle view shows after merging in the
/// server-side list
const RECENT_DISPLAY_LIMIT: usize = 6;

/// Where the orchestrator currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No committed query; recent and trending are shown
    Idle,
    /// Typing, debounce timer armed
    Debouncing,
    /// Committed query in flight
    Loading,
    /// Successful response with at least one hit
    Results,
    /// Successful response, zero hits in every category
    Empty,
    /// Request failed; last-good results stay on screen
    Error,
}

/// Messages from worker threads
pub enum BgMessage {
    SearchDone {
        generation: u64,
        query: String,
        outcome: std::result::Result<SearchResultSet, String>,
    },
    TrendingLoaded(std::result::Result<Vec<TrendingItem>, String>),
    ServerRecentLoaded(std::result::Result<Vec<String>, String>),
}

pub struct App {
    config: AppConfig,
    client: SearchClient,

    // Sub-states
    pub input: InputState,
    pub view: ResultsState,
    pub phase: Phase,

    debouncer: Debouncer,
    cache: QueryCache,
    recent: RecentSearches,

    // Idle-view data
    pub trending: Vec<TrendingItem>,
    server_recent: Vec<String>,

    // Committed-query state
    committed_query: String,
    pub current_results: Option<SearchResultSet>,
    pub last_error: Option<String>,
    generation: u64,

    // Channel
    bg_tx: Sender<BgMessage>,
    bg_rx: Receiver<BgMessage>,

    // Exit state
    pub should_quit: bool,
    pub activation: Option<SearchResult>,
}

impl App {
    pub fn new(config: AppConfig, recent: RecentSearches) -> Result<Self> {
        let client = SearchClient::new(config.base_url.clone(), config.request_timeout)?;
        let (bg_tx, bg_rx) = unbounded();

        Ok(Self {
            debouncer: Debouncer::new(config.debounce),
            cache: QueryCache::new(
                config.cache_fresh_ttl,
                config.cache_gc_ttl,
                config.cache_capacity,
            ),
            config,
            client,
            input: InputState::default(),
            view: ResultsState::default(),
            phase: Phase::Idle,
            recent,
            trending: Vec::new(),
            server_recent: Vec::new(),
            committed_query: String::new(),
            current_results: None,
            last_error: None,
            generation: 0,
            bg_tx,
            bg_rx,
            should_quit: false,
            activation: None,
        })
    }

    pub fn run(
        &mut self,
        terminal: &mut Terminal<impl Backend<Error = std::io::Error>>,
    ) -> Result<()> {
        self.load_initial_data();

        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    self.handle_key(key);
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.tick(Instant::now());
                last_tick = Instant::now();
            }

            if self.should_quit {
                // No state updates after teardown: kill the pending
                // debounce; late worker sends die with the receiver.
                self.debouncer.cancel();
                return Ok(());
            }
        }
    }

    /// One scheduler beat: drain worker messages, then the debouncer
    pub fn tick(&mut self, now: Instant) {
        self.process_messages(now);
        if let Some(query) = self.debouncer.poll(now) {
            self.commit(query, now);
        }
    }

    /// Fetch trending and the server-side recent list on open
    fn load_initial_data(&mut self) {
        let client = self.client.clone();
        let tx = self.bg_tx.clone();
        let trending_limit = self.config.trending_limit;
        let recent_limit = self.config.server_recent_limit;

        thread::spawn(move || {
            let trending = client.trending(trending_limit).map_err(|e| e.to_string());
            let _ = tx.send(BgMessage::TrendingLoaded(trending));

            let recent = client.recent(recent_limit).map_err(|e| e.to_string());
            let _ = tx.send(BgMessage::ServerRecentLoaded(recent));
        });
    }

    fn process_messages(&mut self, now: Instant) {
        let messages: Vec<BgMessage> = self.bg_rx.try_iter().collect();
        for msg in messages {
            self.apply_message(msg, now);
        }
    }

    pub fn apply_message(&mut self, msg: BgMessage, now: Instant) {
        match msg {
            BgMessage::SearchDone {
                generation,
                query,
                outcome,
            } => {
                if generation != self.generation {
                    let total = outcome.map(|s| s.total()).unwrap_or(0);
                    logging::log_search_response(generation, &query, total, false);
                    return;
                }
                match outcome {
                    Ok(set) => {
                        logging::log_search_response(generation, &query, set.total(), true);
                        self.cache.put(&query, set.clone(), now);
                        self.track_impression(&query, &set);
                        self.apply_results(&query, set);
                    }
                    Err(msg) => {
                        logging::error("SEARCH", &format!("'{}' failed: {}", query, msg));
                        self.last_error = Some(msg);
                        self.phase = Phase::Error;
                    }
                }
            }
            BgMessage::TrendingLoaded(outcome) => match outcome {
                Ok(items) => self.trending = items,
                Err(e) => {
                    logging::warn("TRENDING", &format!("fetch failed, using fallback: {}", e));
                    self.trending = trending_fallback();
                }
            },
            BgMessage::ServerRecentLoaded(outcome) => match outcome {
                Ok(list) => self.server_recent = list,
                Err(e) => {
                    logging::debug("HISTORY", &format!("server recent unavailable: {}", e));
                }
            },
        }
    }

    /// The debounce timer fired: the query is now committed
    fn commit(&mut self, query: String, now: Instant) {
        if query != self.committed_query {
            self.view.reset_selection();
        }
        self.committed_query = query.clone();

        if query.chars().count() < self.config.min_query_len {
            if query.is_empty() {
                self.current_results = None;
                self.last_error = None;
            }
            self.phase = Phase::Idle;
            return;
        }

        match self.cache.lookup(&query, now) {
            CacheLookup::Fresh(set) => {
                logging::log_cache_hit(&query, "fresh");
                self.apply_results(&query, set);
            }
            CacheLookup::Stale(set) => {
                logging::log_cache_hit(&query, "stale");
                self.apply_results(&query, set);
                self.dispatch(&query);
            }
            CacheLookup::Miss => {
                self.phase = Phase::Loading;
                self.dispatch(&query);
            }
        }
    }

    /// Spawn a worker for the committed query under a fresh generation
    fn dispatch(&mut self, query: &str) {
        self.generation += 1;
        logging::log_search_dispatch(self.generation, query);

        let client = self.client.clone();
        let tx = self.bg_tx.clone();
        let generation = self.generation;
        let query = query.to_string();
        let limit = self.config.page_limit;

        thread::spawn(move || {
            let outcome = client.search(&query, 1, limit).map_err(|e| e.to_string());
            let _ = tx.send(BgMessage::SearchDone {
                generation,
                query,
                outcome,
            });
        });
    }

    fn apply_results(&mut self, query: &str, set: SearchResultSet) {
        self.phase = if set.is_empty() {
            Phase::Empty
        } else {
            Phase::Results
        };
        self.current_results = Some(set);
        self.last_error = None;
        self.view.reset_selection();
        self.recent.record(query);
    }

    fn track_impression(&self, query: &str, set: &SearchResultSet) {
        let client = self.client.clone();
        let event = TrackEvent::impression(query, self.view.active_tab, set.total());
        thread::spawn(move || client.track(&event));
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.handle_key_at(key, Instant::now());
    }

    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.should_quit = true;
            }
            KeyCode::Char('r') if ctrl => {
                self.retry(now);
            }
            KeyCode::Esc => {
                if self.input.is_empty() {
                    self.should_quit = true;
                } else {
                    self.input.clear();
                    self.on_input_changed(now);
                }
            }
            KeyCode::Tab => {
                self.view.next_tab();
            }
            KeyCode::BackTab => {
                self.view.prev_tab();
            }
            KeyCode::Down => {
                self.view.select_next(self.current_tab_len());
            }
            KeyCode::Up => {
                self.view.select_prev(self.current_tab_len());
            }
            KeyCode::Enter => {
                self.activate_selected();
            }
            KeyCode::Backspace => {
                if self.input.backspace() {
                    self.on_input_changed(now);
                }
            }
            KeyCode::Delete => {
                if self.input.delete() {
                    self.on_input_changed(now);
                }
            }
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Char(c) if !ctrl => {
                self.input.insert(c);
                self.on_input_changed(now);
            }
            _ => {}
        }
    }

    /// Every edit rearms the debouncer; clearing goes through the same path
    pub fn on_input_changed(&mut self, now: Instant) {
        self.debouncer.update(&self.input.query, now);
        self.phase = if self.input.is_empty() {
            Phase::Idle
        } else {
            Phase::Debouncing
        };
    }

    fn retry(&mut self, _now: Instant) {
        if self.phase != Phase::Error || self.committed_query.is_empty() {
            return;
        }
        self.phase = Phase::Loading;
        let query = self.committed_query.clone();
        self.dispatch(&query);
    }

    fn activate_selected(&mut self) {
        let Some(index) = self.view.selected else {
            return;
        };
        let Some(results) = &self.current_results else {
            return;
        };
        let Some(result) = results.bucket(self.view.active_tab).get(index) else {
            return;
        };
        let result = result.clone();

        self.recent.record(&self.committed_query);
        let client = self.client.clone();
        let event = TrackEvent::click(&self.committed_query, &result);
        thread::spawn(move || client.track(&event));

        self.activation = Some(result);
        self.should_quit = true;
    }

    // --- View accessors ---

    pub fn committed_query(&self) -> &str {
        &self.committed_query
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_tab_len(&self) -> usize {
        self.current_results
            .as_ref()
            .map(|set| set.bucket(self.view.active_tab).len())
            .unwrap_or(0)
    }

    /// Local recent searches merged with the server-side list, for the
    /// idle view
    pub fn recent_display(&self) -> Vec<String> {
        self.recent
            .merged_with(&self.server_recent, RECENT_DISPLAY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ResultKind;

    fn test_app() -> App {
        let config = AppConfig {
            // Nothing listens here; dispatched workers fail fast and
            // their responses are asserted against, not relied on.
            base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        App::new(config, RecentSearches::in_memory(5)).unwrap()
    }

    fn type_str(app: &mut App, s: &str, now: Instant) {
        for c in s.chars() {
            app.handle_key_at(KeyEvent::from(KeyCode::Char(c)), now);
        }
    }

    fn set_with(restaurants: &[&str]) -> SearchResultSet {
        SearchResultSet {
            restaurants: restaurants
                .iter()
                .map(|name| SearchResult {
                    id: format!("id-{}", name),
                    name: name.to_string(),
                    subtitle: String::new(),
                    kind: ResultKind::Restaurant,
                    location: None,
                    rating: None,
                    metadata: None,
                })
                .collect(),
            ..Default::default()
        }
    }

    fn done(generation: u64, query: &str, set: SearchResultSet) -> BgMessage {
        BgMessage::SearchDone {
            generation,
            query: query.to_string(),
            outcome: Ok(set),
        }
    }

    #[test]
    fn short_query_never_dispatches() {
        let mut app = test_app();
        let t0 = Instant::now();

        type_str(&mut app, "a", t0);
        assert_eq!(app.phase, Phase::Debouncing);

        app.tick(t0 + Duration::from_millis(400));
        assert_eq!(app.generation(), 0);
        assert_eq!(app.phase, Phase::Idle);
    }

    #[test]
    fn keystroke_burst_dispatches_once_with_final_value() {
        let mut app = test_app();
        let t0 = Instant::now();

        type_str(&mut app, "p", t0);
        type_str(&mut app, "i", t0 + Duration::from_millis(50));
        type_str(&mut app, "z", t0 + Duration::from_millis(100));
        type_str(&mut app, "za", t0 + Duration::from_millis(150));

        // Still inside the debounce window of the last keystroke
        app.tick(t0 + Duration::from_millis(300));
        assert_eq!(app.generation(), 0);

        app.tick(t0 + Duration::from_millis(500));
        assert_eq!(app.generation(), 1);
        assert_eq!(app.committed_query(), "pizza");
        assert_eq!(app.phase, Phase::Loading);
    }

    #[test]
    fn stale_generation_response_is_dropped() {
        let mut app = test_app();
        let t0 = Instant::now();

        type_str(&mut app, "aa", t0);
        app.tick(t0 + Duration::from_millis(400));
        assert_eq!(app.generation(), 1);

        type_str(&mut app, "bb", t0 + Duration::from_millis(500));
        app.tick(t0 + Duration::from_millis(900));
        assert_eq!(app.generation(), 2);

        // Query B resolves first
        let t1 = t0 + Duration::from_secs(1);
        app.apply_message(done(2, "aabb", set_with(&["B Diner"])), t1);
        assert_eq!(app.phase, Phase::Results);

        // A's slow response arrives afterwards and must not overwrite
        app.apply_message(done(1, "aa", set_with(&["A Diner"])), t1);
        let shown = app.current_results.as_ref().unwrap();
        assert_eq!(shown.restaurants[0].name, "B Diner");
    }

    #[test]
    fn empty_and_error_are_distinct_phases() {
        let mut app = test_app();
        let t0 = Instant::now();

        type_str(&mut app, "xy", t0);
        app.tick(t0 + Duration::from_millis(400));

        app.apply_message(done(1, "xy", SearchResultSet::default()), t0);
        assert_eq!(app.phase, Phase::Empty);
        assert!(app.last_error.is_none());

        // Next commit fails
        type_str(&mut app, "z", t0);
        app.tick(t0 + Duration::from_millis(800));
        app.apply_message(
            BgMessage::SearchDone {
                generation: app.generation(),
                query: "xyz".to_string(),
                outcome: Err("connection refused".to_string()),
            },
            t0,
        );
        assert_eq!(app.phase, Phase::Error);
        assert!(app.last_error.is_some());
    }

    #[test]
    fn failed_request_retains_previous_results() {
        let mut app = test_app();
        let t0 = Instant::now();

        type_str(&mut app, "ta", t0);
        app.tick(t0 + Duration::from_millis(400));
        app.apply_message(done(1, "ta", set_with(&["Taqueria"])), t0);
        assert_eq!(app.phase, Phase::Results);

        type_str(&mut app, "c", t0);
        app.tick(t0 + Duration::from_millis(800));
        app.apply_message(
            BgMessage::SearchDone {
                generation: app.generation(),
                query: "tac".to_string(),
                outcome: Err("timeout".to_string()),
            },
            t0,
        );

        assert_eq!(app.phase, Phase::Error);
        let retained = app.current_results.as_ref().unwrap();
        assert_eq!(retained.restaurants[0].name, "Taqueria");
    }

    #[test]
    fn fresh_cache_hit_skips_dispatch() {
        let mut app = test_app();
        let t0 = Instant::now();

        type_str(&mut app, "pho", t0);
        app.tick(t0 + Duration::from_millis(400));
        assert_eq!(app.generation(), 1);
        app.apply_message(done(1, "pho", set_with(&["Pho 88"])), t0);

        // Clear, then retype the same query within the fresh window
        app.handle_key_at(KeyEvent::from(KeyCode::Esc), t0);
        type_str(&mut app, "pho", t0 + Duration::from_secs(2));
        app.tick(t0 + Duration::from_secs(3));

        assert_eq!(app.generation(), 1, "no second network dispatch");
        assert_eq!(app.phase, Phase::Results);
    }

    #[test]
    fn clearing_query_returns_to_idle_and_drops_results() {
        let mut app = test_app();
        let t0 = Instant::now();

        type_str(&mut app, "bbq", t0);
        app.tick(t0 + Duration::from_millis(400));
        app.apply_message(done(1, "bbq", set_with(&["Smokehouse"])), t0);

        app.handle_key_at(KeyEvent::from(KeyCode::Esc), t0 + Duration::from_secs(1));
        assert_eq!(app.phase, Phase::Idle);

        // The cleared value flows through the debouncer like any other
        app.tick(t0 + Duration::from_secs(2));
        assert!(app.current_results.is_none());
        assert_eq!(app.phase, Phase::Idle);
    }

    #[test]
    fn tab_switch_resets_selection_to_none() {
        let mut app = test_app();
        let t0 = Instant::now();

        type_str(&mut app, "su", t0);
        app.tick(t0 + Duration::from_millis(400));
        app.apply_message(done(1, "su", set_with(&["Sushi Go", "Sushi Stop"])), t0);

        app.handle_key_at(KeyEvent::from(KeyCode::Down), t0);
        assert_eq!(app.view.selected, Some(0));

        app.handle_key_at(KeyEvent::from(KeyCode::Tab), t0);
        assert_eq!(app.view.selected, None);
        assert_eq!(app.view.active_tab, ResultKind::List);
    }

    #[test]
    fn trending_failure_falls_back_to_static_list() {
        let mut app = test_app();
        app.apply_message(
            BgMessage::TrendingLoaded(Err("503".to_string())),
            Instant::now(),
        );
        assert_eq!(app.trending.len(), 4);
        assert_eq!(app.trending[0].query, "Best pizza NYC");
    }

    #[test]
    fn enter_activates_selection_and_closes() {
        let mut app = test_app();
        let t0 = Instant::now();

        type_str(&mut app, "ra", t0);
        app.tick(t0 + Duration::from_millis(400));
        app.apply_message(done(1, "ra", set_with(&["Ramen-Ya"])), t0);

        app.handle_key_at(KeyEvent::from(KeyCode::Down), t0);
        app.handle_key_at(KeyEvent::from(KeyCode::Enter), t0);

        assert!(app.should_quit);
        assert_eq!(app.activation.as_ref().unwrap().name, "Ramen-Ya");
        assert_eq!(app.recent_display(), vec!["ra".to_string()]);
    }

    #[test]
    fn enter_without_selection_is_noop() {
        let mut app = test_app();
        let t0 = Instant::now();

        type_str(&mut app, "ra", t0);
        app.tick(t0 + Duration::from_millis(400));
        app.apply_message(done(1, "ra", set_with(&["Ramen-Ya"])), t0);

        app.handle_key_at(KeyEvent::from(KeyCode::Enter), t0);
        assert!(!app.should_quit);
        assert!(app.activation.is_none());
    }
}
