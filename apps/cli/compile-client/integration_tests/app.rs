use compile_client::app::run_session;

use client_core::config::ClientConfig;
use client_core::render::{Renderer, View};

use models::Session;

use std::future::ready;
use std::sync::{Arc, Mutex};

// ============================================================================
// Integration tests for the binary's wiring on top of client-core
// ============================================================================

#[derive(Clone, Default)]
struct RecordingRenderer {
    views: Arc<Mutex<Vec<View>>>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, view: &View) {
        self.views.lock().unwrap().push(view.clone());
    }
}

/// **VALUE**: Tests that the full wiring starts, renders and stops on shutdown.
///
/// **WHY THIS MATTERS**: This is the closest we get to running the binary without a
/// terminal: real config, real transport, real file editor.
///
/// **BUG THIS CATCHES**: Would catch if the shutdown future is not honoured, or if any
/// derived config value fails to convert when building the runtime.
///
/// **NOTE**: No backend is needed; the session is stopped before any connect completes.
#[tokio::test]
async fn given_default_config_when_shutdown_immediately_then_returns_disconnected() {
    // GIVEN
    let temp_dir = tempfile::tempdir().unwrap();
    let source = temp_dir.path().join("main.src");
    std::fs::write(&source, "main = 1").unwrap();
    let renderer = RecordingRenderer::default();
    let views = Arc::clone(&renderer.views);

    // WHEN
    let result = run_session(&ClientConfig::default(), &source, renderer, ready(())).await;

    // THEN
    assert_eq!(result.unwrap(), Session::Disconnected);
    let views = views.lock().unwrap();
    assert_eq!(views.len(), 1, "only the initial view is rendered");
    assert!(matches!(views[0], View::Status(_)));
}

/// **VALUE**: Tests that invalid config is reported instead of starting a session.
///
/// **WHY THIS MATTERS**: A zero poll interval would spin the editor task.
///
/// **BUG THIS CATCHES**: Would catch if `run_session` skips the derived-value checks.
#[tokio::test]
async fn given_invalid_poll_interval_when_run_then_errors() {
    // GIVEN
    let temp_dir = tempfile::tempdir().unwrap();
    let mut config = ClientConfig::default();
    config.editor.poll_interval = String::from("0s");

    // WHEN
    let result = run_session(
        &config,
        &temp_dir.path().join("main.src"),
        RecordingRenderer::default(),
        ready(()),
    )
    .await;

    // THEN
    assert!(result.is_err());
}
