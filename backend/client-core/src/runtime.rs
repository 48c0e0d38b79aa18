//! Event loop driving one session.
//!
//! [`SessionRuntime::run`] owns the [`SessionCell`] for its whole lifetime.
//! It waits on four sources, one event at a time:
//!
//! 1. a shutdown future,
//! 2. socket events from the transport,
//! 3. full-text edits from the editor,
//! 4. the fixed-interval retry ticker.
//!
//! After every event it re-renders the session and executes the returned
//! effect through the injected [`SocketTransport`].

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::error::runtime::RuntimeError;
use crate::render::{Renderer, View};
use crate::session::{Effect, Event, SessionCell};
use crate::transport::{SocketCommand, SocketEvent, SocketTransport};

use common::ErrorLocation;
use models::{Session, SocketTarget};

use std::future::Future;
use std::time::Duration;

use log::{debug, info};
use tokio::sync::mpsc::{Receiver, UnboundedReceiver};
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use url::Url;

/// Wiring for a single client session.
pub struct SessionRuntime<T, R> {
    transport: T,
    renderer: R,
    target: SocketTarget,
    frame_base: Url,
    retry_interval: Duration,
}

impl<T, R> SessionRuntime<T, R>
where
    T: SocketTransport,
    R: Renderer,
{
    pub fn new(
        transport: T,
        renderer: R,
        target: SocketTarget,
        frame_base: Url,
        retry_interval: Duration,
    ) -> Self {
        Self {
            transport,
            renderer,
            target,
            frame_base,
            retry_interval,
        }
    }

    /// Build a runtime from validated config values.
    pub fn from_config(
        config: &ClientConfig,
        transport: T,
        renderer: R,
    ) -> Result<Self, CoreError> {
        Ok(Self::new(
            transport,
            renderer,
            config.socket_target()?,
            config.frame_base_url()?,
            config.retry_interval()?,
        ))
    }

    /// Run until the editor stream ends or `shutdown` resolves.
    ///
    /// # Returns
    ///
    /// The session as it stood when the loop stopped.
    ///
    /// # Errors
    ///
    /// - [`RuntimeError::Transport`] if the transport rejects a command
    /// - [`RuntimeError::ChannelClosed`] if the transport's event channel closes
    pub async fn run<F>(
        mut self,
        mut socket_events: UnboundedReceiver<SocketEvent>,
        mut edits: Receiver<String>,
        shutdown: F,
    ) -> Result<Session, RuntimeError>
    where
        F: Future<Output = ()>,
    {
        let (mut cell, initial) = SessionCell::start();
        self.show(cell.session());
        self.apply(initial)?;

        let mut retry = interval_at(Instant::now() + self.retry_interval, self.retry_interval);
        retry.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tokio::pin!(shutdown);

        loop {
            let event = tokio::select! {
                biased;

                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                socket_event = socket_events.recv() => match socket_event {
                    Some(socket_event) => Event::from(socket_event),
                    None => {
                        return Err(RuntimeError::ChannelClosed {
                            message: String::from("Socket event channel closed"),
                            location: ErrorLocation::caller(),
                        });
                    }
                },
                edit = edits.recv() => match edit {
                    Some(source) => Event::EditSubmitted(source),
                    None => {
                        info!("Editor closed, stopping session");
                        break;
                    }
                },
                _ = retry.tick() => {
                    if !cell.session().awaiting_reconnect() {
                        continue;
                    }
                    Event::ReconnectTimerFired
                }
            };

            let was_awaiting = cell.session().awaiting_reconnect();
            let effect = cell.dispatch(event);

            if !was_awaiting && cell.session().awaiting_reconnect() {
                debug!(
                    "Retrying connection every {}",
                    humantime::format_duration(self.retry_interval)
                );
                retry.reset();
            }

            self.show(cell.session());
            self.apply(effect)?;
        }

        Ok(cell.into_session())
    }

    fn show(&mut self, session: &Session) {
        let view = View::from_session(session, &self.frame_base);
        self.renderer.render(&view);
    }

    fn apply(&mut self, effect: Effect) -> Result<(), RuntimeError> {
        let command = match effect {
            Effect::ConnectSocket => SocketCommand::Connect(self.target.clone()),
            Effect::SendOverSocket(content) => SocketCommand::Send {
                name: self.target.name.clone(),
                content,
            },
            Effect::NoEffect => return Ok(()),
        };

        self.transport.execute(command)?;
        Ok(())
    }
}
