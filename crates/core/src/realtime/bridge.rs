use std::fmt;
use std::time::Duration;

use alm_shared::{realtime_url, ArtifactState, RealtimeEnvelope, RealtimeEvent};

use super::Backoff;
use crate::config::RealtimeConfig;
use crate::notify::{Notifier, Severity};
use crate::query::{QueryCache, QueryKeyMatcher};

/// Identifies one transport connection. Events carrying an older id are
/// stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub u64);

/// Identifies one armed reconnect timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn#{}", self.0)
    }
}

/// What the bridge needs to know about the auth session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub authenticated: bool,
    pub token: Option<String>,
    /// `ws://host` or `wss://host` of the API server.
    pub ws_origin: String,
}

impl SessionSnapshot {
    pub fn signed_out() -> Self {
        Self {
            authenticated: false,
            token: None,
            ws_origin: String::new(),
        }
    }

    /// Token to connect with, only while authenticated.
    pub fn active_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .filter(|token| self.authenticated && !token.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Idle,
    Connecting,
    Open,
    Reconnecting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BridgeInput {
    SessionChanged(SessionSnapshot),
    Opened(ConnectionId),
    Message(ConnectionId, String),
    Closed(ConnectionId),
    /// Transport error. Handled as a forced close.
    Errored(ConnectionId),
    ReconnectDue(TimerId),
    /// The owner is going away.
    Shutdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IoCommand {
    Connect { conn: ConnectionId, url: String },
    /// Close the socket (if still open) and release its handle.
    Disconnect { conn: ConnectionId },
    ScheduleReconnect { timer: TimerId, delay: Duration },
    CancelReconnect { timer: TimerId },
}

/// Reconnecting socket owner. At most one live connection and at most one
/// armed timer exist at any time, and never both.
#[derive(Debug)]
pub struct RealtimeBridge {
    config: RealtimeConfig,
    backoff: Backoff,
    state: ConnectionState,
    /// Connect URL for the current session; `None` while signed out.
    url: Option<String>,
    live: Option<ConnectionId>,
    timer: Option<TimerId>,
    next_id: u64,
}

impl RealtimeBridge {
    pub fn new(config: RealtimeConfig) -> Self {
        let backoff = Backoff::new(config.backoff.clone());
        Self {
            config,
            backoff,
            state: ConnectionState::Idle,
            url: None,
            live: None,
            timer: None,
            next_id: 0,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn live_connection(&self) -> Option<ConnectionId> {
        self.live
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Delay the next disconnect will schedule.
    pub fn current_backoff(&self) -> Duration {
        self.backoff.current()
    }

    /// React to one input. Cache invalidations and notifications happen
    /// inline; socket and timer work comes back as commands, in order.
    pub fn handle(
        &mut self,
        input: BridgeInput,
        cache: &dyn QueryCache,
        notifier: &dyn Notifier,
    ) -> Vec<IoCommand> {
        let mut commands = Vec::new();
        match input {
            BridgeInput::SessionChanged(session) => self.on_session(&session, &mut commands),
            BridgeInput::Opened(conn) => self.on_opened(conn),
            BridgeInput::Message(conn, text) => {
                if self.live == Some(conn) {
                    on_message(&text, cache, notifier);
                }
            }
            BridgeInput::Closed(conn) => self.on_closed(conn, false, &mut commands),
            BridgeInput::Errored(conn) => self.on_closed(conn, true, &mut commands),
            BridgeInput::ReconnectDue(timer) => self.on_timer(timer, &mut commands),
            BridgeInput::Shutdown => {
                self.teardown(&mut commands);
                self.url = None;
            }
        }
        commands
    }

    fn on_session(&mut self, session: &SessionSnapshot, commands: &mut Vec<IoCommand>) {
        let url = session
            .active_token()
            .map(|token| realtime_url(&session.ws_origin, &self.config.path, token));
        if url == self.url {
            return;
        }

        self.teardown(commands);
        self.url = url;
        match self.url.clone() {
            Some(url) => self.connect(url, commands),
            None => tracing::info!("realtime bridge idle: no authenticated session"),
        }
    }

    fn on_opened(&mut self, conn: ConnectionId) {
        if self.live != Some(conn) || self.state != ConnectionState::Connecting {
            return;
        }
        self.state = ConnectionState::Open;
        self.backoff.reset();
        tracing::info!(%conn, "realtime connection open");
    }

    fn on_closed(&mut self, conn: ConnectionId, errored: bool, commands: &mut Vec<IoCommand>) {
        if self.live != Some(conn) {
            return;
        }
        if errored {
            tracing::warn!(%conn, "realtime transport error, forcing close");
        } else {
            tracing::info!(%conn, "realtime connection closed");
        }
        self.live = None;
        commands.push(IoCommand::Disconnect { conn });

        let delay = self.backoff.next_delay();
        let timer = TimerId(self.allocate_id());
        self.timer = Some(timer);
        self.state = ConnectionState::Reconnecting;
        tracing::info!(delay_ms = delay.as_millis() as u64, "realtime reconnect scheduled");
        commands.push(IoCommand::ScheduleReconnect { timer, delay });
    }

    fn on_timer(&mut self, timer: TimerId, commands: &mut Vec<IoCommand>) {
        if self.timer != Some(timer) {
            return;
        }
        self.timer = None;
        match self.url.clone() {
            Some(url) => self.connect(url, commands),
            None => self.state = ConnectionState::Idle,
        }
    }

    fn connect(&mut self, url: String, commands: &mut Vec<IoCommand>) {
        debug_assert!(self.live.is_none(), "connect with a live connection");
        debug_assert!(self.timer.is_none(), "connect with an armed timer");
        let conn = ConnectionId(self.allocate_id());
        self.live = Some(conn);
        self.state = ConnectionState::Connecting;
        tracing::debug!(%conn, "realtime connecting");
        commands.push(IoCommand::Connect { conn, url });
    }

    /// Release timer and socket, back to `Idle` at the floor delay.
    fn teardown(&mut self, commands: &mut Vec<IoCommand>) {
        if let Some(timer) = self.timer.take() {
            commands.push(IoCommand::CancelReconnect { timer });
        }
        if let Some(conn) = self.live.take() {
            commands.push(IoCommand::Disconnect { conn });
        }
        if self.state != ConnectionState::Idle {
            tracing::info!("realtime bridge torn down");
        }
        self.state = ConnectionState::Idle;
        self.backoff.reset();
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

fn on_message(text: &str, cache: &dyn QueryCache, notifier: &dyn Notifier) {
    let Some(envelope) = RealtimeEnvelope::parse(text) else {
        tracing::debug!("dropping unparseable realtime frame");
        return;
    };
    match envelope.into_event() {
        RealtimeEvent::ArtifactStateChanged {
            project_id,
            to_state,
            ..
        } => {
            cache.invalidate(&QueryKeyMatcher::project(&project_id));
            notifier.show_notification(&state_change_message(to_state.as_deref()), Severity::Info);
        }
        RealtimeEvent::Ignored { kind } => {
            tracing::trace!(%kind, "ignoring realtime event");
        }
    }
}

/// Toast text for an artifact state change. Known wire names are shown by
/// their column label.
pub fn state_change_message(to_state: Option<&str>) -> String {
    match to_state.map(str::trim).filter(|s| !s.is_empty()) {
        Some(state) => {
            let label = ArtifactState::parse(state).map_or(state, |s| s.label());
            format!("Artifact moved to {label}")
        }
        None => "An artifact was updated".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{QueryCacheState, QueryKey};
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeCache {
        issued: RefCell<Vec<QueryKeyMatcher>>,
    }

    impl QueryCache for FakeCache {
        fn invalidate(&self, matcher: &QueryKeyMatcher) {
            self.issued.borrow_mut().push(matcher.clone());
        }
    }

    #[derive(Default)]
    struct FakeNotifier {
        shown: RefCell<Vec<(String, Severity)>>,
    }

    impl Notifier for FakeNotifier {
        fn show_notification(&self, message: &str, severity: Severity) {
            self.shown.borrow_mut().push((message.to_string(), severity));
        }
    }

    struct Harness {
        bridge: RealtimeBridge,
        cache: FakeCache,
        notifier: FakeNotifier,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                bridge: RealtimeBridge::new(RealtimeConfig::default()),
                cache: FakeCache::default(),
                notifier: FakeNotifier::default(),
            }
        }

        fn send(&mut self, input: BridgeInput) -> Vec<IoCommand> {
            self.bridge.handle(input, &self.cache, &self.notifier)
        }

        fn sign_in(&mut self, token: &str) -> ConnectionId {
            let commands = self.send(BridgeInput::SessionChanged(session(token)));
            match commands.as_slice() {
                [IoCommand::Connect { conn, .. }] => *conn,
                other => panic!("expected a single connect, got {other:?}"),
            }
        }

        /// Drop the live connection and fire the reconnect timer; returns the
        /// scheduled delay and the new connection.
        fn drop_and_retry(&mut self, conn: ConnectionId) -> (Duration, ConnectionId) {
            let commands = self.send(BridgeInput::Closed(conn));
            let (timer, delay) = match commands.as_slice() {
                [IoCommand::Disconnect { .. }, IoCommand::ScheduleReconnect { timer, delay }] => {
                    (*timer, *delay)
                }
                other => panic!("expected disconnect + schedule, got {other:?}"),
            };
            let commands = self.send(BridgeInput::ReconnectDue(timer));
            match commands.as_slice() {
                [IoCommand::Connect { conn, .. }] => (delay, *conn),
                other => panic!("expected reconnect, got {other:?}"),
            }
        }
    }

    fn session(token: &str) -> SessionSnapshot {
        SessionSnapshot {
            authenticated: true,
            token: Some(token.to_string()),
            ws_origin: "wss://alm.example.com".to_string(),
        }
    }

    #[test]
    fn stays_idle_without_a_session() {
        let mut h = Harness::new();
        assert!(h.send(BridgeInput::SessionChanged(SessionSnapshot::signed_out())).is_empty());

        let mut no_token = session("t");
        no_token.token = None;
        assert!(h.send(BridgeInput::SessionChanged(no_token)).is_empty());

        let mut flag_off = session("t");
        flag_off.authenticated = false;
        assert!(h.send(BridgeInput::SessionChanged(flag_off)).is_empty());

        assert_eq!(h.bridge.state(), ConnectionState::Idle);
    }

    #[test]
    fn connects_with_encoded_token() {
        let mut h = Harness::new();
        let commands = h.send(BridgeInput::SessionChanged(session("abc def")));
        assert_eq!(
            commands,
            vec![IoCommand::Connect {
                conn: ConnectionId(1),
                url: "wss://alm.example.com/api/v1/ws?token=abc%20def".to_string(),
            }]
        );
        assert_eq!(h.bridge.state(), ConnectionState::Connecting);

        // Same session again: nothing to do.
        assert!(h.send(BridgeInput::SessionChanged(session("abc def"))).is_empty());
    }

    #[test]
    fn disconnect_after_open_waits_the_floor() {
        let mut h = Harness::new();
        let conn = h.sign_in("t");
        h.send(BridgeInput::Opened(conn));
        assert_eq!(h.bridge.state(), ConnectionState::Open);

        let (delay, _) = h.drop_and_retry(conn);
        assert_eq!(delay, Duration::from_millis(2000));
    }

    #[test]
    fn consecutive_failures_escalate_then_open_resets() {
        let mut h = Harness::new();
        let mut conn = h.sign_in("t");
        h.send(BridgeInput::Opened(conn));

        let mut delays = Vec::new();
        for _ in 0..9 {
            let (delay, next) = h.drop_and_retry(conn);
            delays.push(delay);
            conn = next;
        }
        let expected: Vec<Duration> = (0..9)
            .map(|n| Duration::from_secs_f64((2.0 * 1.5f64.powi(n)).min(30.0)))
            .collect();
        assert_eq!(delays, expected);

        h.send(BridgeInput::Opened(conn));
        let (delay, _) = h.drop_and_retry(conn);
        assert_eq!(delay, Duration::from_millis(2000));
    }

    #[test]
    fn error_forces_close_through_the_same_path() {
        let mut h = Harness::new();
        let conn = h.sign_in("t");
        h.send(BridgeInput::Opened(conn));

        let commands = h.send(BridgeInput::Errored(conn));
        assert!(matches!(
            commands.as_slice(),
            [
                IoCommand::Disconnect { conn: c },
                IoCommand::ScheduleReconnect { delay, .. }
            ] if *c == conn && *delay == Duration::from_millis(2000)
        ));

        // The close that follows the forced close is stale.
        assert!(h.send(BridgeInput::Closed(conn)).is_empty());
        assert!(h.bridge.pending_timer().is_some());
        assert!(h.bridge.live_connection().is_none());
    }

    #[test]
    fn state_change_invalidates_project_and_notifies_once() {
        let mut h = Harness::new();
        let conn = h.sign_in("t");
        h.send(BridgeInput::Opened(conn));

        let commands = h.send(BridgeInput::Message(
            conn,
            r#"{"type":"artifact_state_changed","project_id":"P1","to_state":"Done"}"#.to_string(),
        ));
        assert!(commands.is_empty());

        let issued = h.cache.issued.borrow();
        assert_eq!(issued.as_slice(), &[QueryKeyMatcher::project("P1")]);

        let shown = h.notifier.shown.borrow();
        assert_eq!(shown.len(), 1);
        assert!(shown[0].0.contains("Done"));
        assert_eq!(shown[0].1, Severity::Info);
    }

    #[test]
    fn invalidation_reaches_every_cached_view_of_the_project() {
        let cache = RefCell::new(QueryCacheState::new());
        for key in [
            QueryKey::project_artifacts("acme", "P1"),
            QueryKey::project_members("acme", "P1"),
            QueryKey::project_artifacts("acme", "P2"),
        ] {
            cache.borrow_mut().register(key);
        }
        let notifier = FakeNotifier::default();
        let mut bridge = RealtimeBridge::new(RealtimeConfig::default());
        let conn = match bridge
            .handle(BridgeInput::SessionChanged(session("t")), &cache, &notifier)
            .as_slice()
        {
            [IoCommand::Connect { conn, .. }] => *conn,
            other => panic!("unexpected {other:?}"),
        };
        bridge.handle(BridgeInput::Opened(conn), &cache, &notifier);
        bridge.handle(
            BridgeInput::Message(
                conn,
                r#"{"type":"artifact_state_changed","project_id":"P1"}"#.to_string(),
            ),
            &cache,
            &notifier,
        );

        let cache = cache.borrow();
        assert_eq!(cache.generation(&QueryKey::project_artifacts("acme", "P1")), 1);
        assert_eq!(cache.generation(&QueryKey::project_members("acme", "P1")), 1);
        assert_eq!(cache.generation(&QueryKey::project_artifacts("acme", "P2")), 0);
        assert_eq!(notifier.shown.borrow()[0].0, "An artifact was updated");
    }

    #[test]
    fn unknown_and_malformed_frames_do_nothing() {
        let mut h = Harness::new();
        let conn = h.sign_in("t");
        h.send(BridgeInput::Opened(conn));

        for frame in [
            r#"{"type":"unknown_event"}"#,
            "{not json",
            r#"{"type":"artifact_state_changed","to_state":"Done"}"#,
        ] {
            assert!(h.send(BridgeInput::Message(conn, frame.to_string())).is_empty());
        }
        assert!(h.cache.issued.borrow().is_empty());
        assert!(h.notifier.shown.borrow().is_empty());
        assert_eq!(h.bridge.state(), ConnectionState::Open);
    }

    #[test]
    fn logout_cancels_timer_and_stops_retrying() {
        let mut h = Harness::new();
        let conn = h.sign_in("t");
        let commands = h.send(BridgeInput::Closed(conn));
        let timer = match commands.as_slice() {
            [_, IoCommand::ScheduleReconnect { timer, .. }] => *timer,
            other => panic!("unexpected {other:?}"),
        };

        let commands = h.send(BridgeInput::SessionChanged(SessionSnapshot::signed_out()));
        assert_eq!(commands, vec![IoCommand::CancelReconnect { timer }]);
        assert_eq!(h.bridge.state(), ConnectionState::Idle);

        // A timer that raced the cancellation must not reconnect.
        assert!(h.send(BridgeInput::ReconnectDue(timer)).is_empty());
        assert!(h.bridge.live_connection().is_none());
    }

    #[test]
    fn logout_closes_the_live_connection() {
        let mut h = Harness::new();
        let conn = h.sign_in("t");
        h.send(BridgeInput::Opened(conn));

        let mut logged_out = session("t");
        logged_out.authenticated = false;
        let commands = h.send(BridgeInput::SessionChanged(logged_out));
        assert_eq!(commands, vec![IoCommand::Disconnect { conn }]);

        // Late events from the closed socket are ignored.
        assert!(h.send(BridgeInput::Closed(conn)).is_empty());
        assert!(h
            .send(BridgeInput::Message(
                conn,
                r#"{"type":"artifact_state_changed","project_id":"P1"}"#.to_string()
            ))
            .is_empty());
        assert!(h.cache.issued.borrow().is_empty());
        assert!(h.bridge.pending_timer().is_none());
    }

    #[test]
    fn token_change_replaces_the_connection() {
        let mut h = Harness::new();
        let first = h.sign_in("old");
        h.send(BridgeInput::Opened(first));

        let commands = h.send(BridgeInput::SessionChanged(session("new")));
        match commands.as_slice() {
            [IoCommand::Disconnect { conn }, IoCommand::Connect { conn: next, url }] => {
                assert_eq!(*conn, first);
                assert_ne!(*next, first);
                assert!(url.ends_with("token=new"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn shutdown_releases_everything_and_reauth_starts_fresh() {
        let mut h = Harness::new();
        let conn = h.sign_in("t");
        let (_, conn) = h.drop_and_retry(conn);
        assert_eq!(h.bridge.current_backoff(), Duration::from_millis(3000));

        assert_eq!(
            h.send(BridgeInput::Shutdown),
            vec![IoCommand::Disconnect { conn }]
        );
        assert_eq!(h.bridge.current_backoff(), Duration::from_millis(2000));

        h.sign_in("t");
        assert_eq!(h.bridge.state(), ConnectionState::Connecting);
    }

    #[test]
    fn notification_text_names_the_state_when_known() {
        assert_eq!(state_change_message(Some("Review")), "Artifact moved to Review");
        assert_eq!(state_change_message(Some("in_progress")), "Artifact moved to In Progress");
        assert_eq!(state_change_message(Some("  ")), "An artifact was updated");
        assert_eq!(state_change_message(None), "An artifact was updated");
    }
}
