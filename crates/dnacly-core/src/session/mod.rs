// ── Caller sessions ──
//
// A session is whatever scopes one caller's token: a CLI run, a browser
// session, a test. The token cache reads through it; nothing else does.

mod cache;
mod file;

pub use cache::SessionTokenCache;
pub(crate) use cache::auth_failure;
pub use file::FileSession;

use dnacly_api::Token;

/// Caller-scoped token storage.
///
/// Implementations decide where the token lives. Storing never fails from
/// the caller's point of view: a session that cannot persist still keeps
/// the token for the current process and logs the problem.
pub trait Session {
    /// The token held by this session, if any.
    fn token(&self) -> Option<Token>;

    /// Replace the session's token.
    fn store_token(&mut self, token: Token);

    /// Forget the session's token.
    fn clear(&mut self);
}

/// In-process session. Lives as long as the value does.
#[derive(Debug, Default, Clone)]
pub struct MemorySession {
    token: Option<Token>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that already carries a token.
    pub fn with_token(token: Token) -> Self {
        Self { token: Some(token) }
    }
}

impl Session for MemorySession {
    fn token(&self) -> Option<Token> {
        self.token.clone()
    }

    fn store_token(&mut self, token: Token) {
        self.token = Some(token);
    }

    fn clear(&mut self) {
        self.token = None;
    }
}

impl<S: Session + ?Sized> Session for Box<S> {
    fn token(&self) -> Option<Token> {
        (**self).token()
    }

    fn store_token(&mut self, token: Token) {
        (**self).store_token(token);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn memory_session_stores_and_clears() {
        let mut session = MemorySession::new();
        assert!(session.token().is_none());

        session.store_token(Token::new("t1").unwrap());
        assert_eq!(session.token().unwrap().expose(), "t1");

        session.store_token(Token::new("t2").unwrap());
        assert_eq!(session.token().unwrap().expose(), "t2");

        session.clear();
        assert!(session.token().is_none());
    }

    #[test]
    fn boxed_session_delegates() {
        let mut session: Box<dyn Session> = Box::new(MemorySession::new());
        session.store_token(Token::new("boxed").unwrap());
        assert_eq!(session.token().unwrap().expose(), "boxed");
    }
}
