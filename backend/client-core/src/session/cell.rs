use crate::session::{Effect, Event, transition};

use models::Session;

use log::{debug, info, warn};

/// Single-writer owner of the current session.
///
/// Created once at startup and threaded through the event loop by value;
/// there is no shared or global copy of the session anywhere else.
#[derive(Debug)]
pub struct SessionCell {
    session: Session,
}

impl SessionCell {
    /// Create the initial `Disconnected` session and the effect that opens
    /// the socket.
    pub fn start() -> (Self, Effect) {
        info!("Session started: {}", Session::Disconnected);
        (
            Self {
                session: Session::Disconnected,
            },
            Effect::ConnectSocket,
        )
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Apply one event and return the effect the caller must run.
    pub fn dispatch(&mut self, event: Event) -> Effect {
        debug!("Dispatching {} in state {}", event.name(), self.session);

        let (next, effect) = transition(&self.session, event);

        if next != self.session {
            match next {
                Session::Problem(ref detail) => {
                    warn!("Session {} -> problem: {detail}", self.session)
                }
                _ => info!("Session {} -> {next}", self.session),
            }
        }

        self.session = next;
        effect
    }
}
