use dioxus::prelude::*;
use shared_types::{Role, SessionSnapshot, SessionUser, ShellState};

/// Global session state. Starts in `loading` until the stored session has
/// been checked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionState {
    pub snapshot: Signal<SessionSnapshot>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            snapshot: Signal::new(SessionSnapshot::loading()),
        }
    }

    pub fn shell_state(&self) -> ShellState {
        self.snapshot.read().shell_state()
    }

    pub fn role(&self) -> Option<Role> {
        self.snapshot.read().role()
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.snapshot.read().user.clone()
    }

    /// Resolve the initial check. `None` means nobody is signed in.
    pub fn resolve(&mut self, user: Option<SessionUser>) {
        self.snapshot.set(match user {
            Some(user) => SessionSnapshot::signed_in(user),
            None => SessionSnapshot::signed_out(),
        });
    }

    pub fn set_user(&mut self, user: SessionUser) {
        self.snapshot.set(SessionSnapshot::signed_in(user));
    }

    pub fn clear(&mut self) {
        self.snapshot.set(SessionSnapshot::signed_out());
    }
}

/// Hook to access the session.
pub fn use_session() -> SessionState {
    use_context::<SessionState>()
}
