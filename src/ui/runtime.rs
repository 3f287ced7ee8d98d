use std::sync::mpsc::{RecvTimeoutError, Sender};
use std::time::Duration;

use anyhow::Context;
use tokio::runtime::Handle;
use tokio::signal;
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::shutdown::{ShutdownCoordinator, ShutdownHandle};
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use crate::ui::worker::spawn_worker;

const TICK_RATE: Duration = Duration::from_millis(250);
const COMMAND_QUEUE: usize = 64;

/// Run the dashboard until the user quits or a signal arrives.
pub fn run(config: &Config, runtime: Handle) -> anyhow::Result<()> {
    let client = ApiClient::new(&config.api).context("Failed to build HTTP client")?;
    tracing::info!(base_url = client.base_url(), "Starting dashboard");

    let shutdown = ShutdownCoordinator::new();
    let (mut terminal, guard) = setup_terminal().context("Failed to initialize terminal")?;

    let mut app = App::new(config);
    let events = EventHandler::new(TICK_RATE, shutdown.handle());

    let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE);
    app.set_command_sender(command_tx);
    let worker = spawn_worker(&runtime, client, command_rx, events.sender());
    let signals = runtime.spawn(forward_signals(events.sender(), shutdown.handle()));

    app.request_catalog();

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(TICK_RATE) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Paste(text)) => app.on_paste(&text),
            Ok(AppEvent::Api(event)) => app.on_api_event(event),
            Ok(AppEvent::Tick) | Ok(AppEvent::Resize(_, _)) => {}
            Ok(AppEvent::Shutdown) => app.request_quit(),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    shutdown.signal();
    signals.abort();
    // Dropping the app closes the command channel; in-flight requests are abandoned.
    drop(app);
    worker.abort();
    drop(guard);
    tracing::info!("Dashboard closed");
    Ok(())
}

async fn forward_signals(events: Sender<AppEvent>, shutdown: ShutdownHandle) {
    #[cfg(unix)]
    {
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(stream) => stream,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to install SIGTERM handler");
                return;
            }
        };
        tokio::select! {
            _ = signal::ctrl_c() => {},
            _ = sigterm.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        if signal::ctrl_c().await.is_err() {
            return;
        }
    }

    shutdown.signal();
    let _ = events.send(AppEvent::Shutdown);
}
