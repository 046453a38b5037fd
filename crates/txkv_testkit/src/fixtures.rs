//! Test fixtures and session helpers.
//!
//! Provides convenience functions for setting up sessions with seeded data
//! and for driving them line by line.

use txkv_core::{
    AutoApprove, Config, ConfirmationGate, Output, Session, Store, TransactionStack,
};

/// A session that approves every destructive command.
pub struct TestSession {
    /// The session instance.
    pub session: Session,
}

impl TestSession {
    /// Creates an empty test session.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty test session with `config`.
    pub fn with_config(config: Config) -> Self {
        Self {
            session: Session::new(config),
        }
    }

    /// Creates a session whose base store holds `pairs`.
    pub fn seeded<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let base: Store = pairs.into_iter().collect();
        Self {
            session: Session::with_stack(Config::default(), TransactionStack::with_base(base)),
        }
    }

    /// Runs one line, approving any confirmation.
    ///
    /// Panics if the line fails.
    pub fn run(&mut self, line: &str) -> Output {
        self.session
            .execute_with(line, &mut AutoApprove)
            .unwrap_or_else(|e| panic!("`{line}` failed: {e}"))
    }

    /// Runs every line and returns the text of those that produced output.
    pub fn run_all(&mut self, lines: &[&str]) -> Vec<String> {
        run_lines(&mut self.session, lines, &mut AutoApprove)
    }
}

impl Default for TestSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestSession {
    type Target = Session;

    fn deref(&self) -> &Self::Target {
        &self.session
    }
}

impl std::ops::DerefMut for TestSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.session
    }
}

/// Runs a test with a fresh session.
///
/// # Example
///
/// ```rust
/// use txkv_testkit::with_session;
///
/// with_session(|s| {
///     s.run("SET foo 1");
///     assert_eq!(s.run("GET foo").to_string(), "1");
/// });
/// ```
pub fn with_session<F, R>(f: F) -> R
where
    F: FnOnce(&mut TestSession) -> R,
{
    let mut session = TestSession::new();
    f(&mut session)
}

/// Runs `lines` through `session` with `gate`, collecting printed output.
///
/// Silent commands contribute nothing. Panics on the first failing line.
pub fn run_lines<G>(session: &mut Session, lines: &[&str], gate: &mut G) -> Vec<String>
where
    G: ConfirmationGate + ?Sized,
{
    lines
        .iter()
        .filter_map(|line| {
            session
                .execute_with(line, gate)
                .unwrap_or_else(|e| panic!("`{line}` failed: {e}"))
                .text()
        })
        .collect()
}
