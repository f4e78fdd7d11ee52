mod channels;
mod command;
mod dispatch;
mod effects;
mod state_events;

use std::cell::RefCell;
use std::time::Instant;

use anyhow::{bail, Context, Result};

use crate::binding::BindingTable;
use crate::config::Settings;
use crate::core::{Autostart, Rect, RulesEngine, State};
use crate::event::LoopEvent;
use crate::event_emitter::{create_snapshot, EventEmitter};
use crate::platform::{HeadlessHost, Host, LogBar};
use crate::spawn::{self, DetachedSpawner, ProcLineage};

use channels::{create_channels, run_async, MainChannels};
use dispatch::dispatch_command;
use effects::execute_effects;
use state_events::{capture_event_state, emit_state_change_events};

pub struct App {
    state: RefCell<State>,
    bindings: BindingTable,
    event_emitter: EventEmitter,
}

impl App {
    pub fn run(settings: Settings) -> Result<()> {
        spawn::ignore_children()?;

        let (tokio_channels, main_channels, server_ends) =
            create_channels(settings.status_interval);

        let rt = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
        let servers = {
            let _guard = rt.enter();
            server_ends.bind()?
        };
        std::thread::spawn(move || {
            if let Err(e) = rt.block_on(run_async(tokio_channels, servers)) {
                tracing::error!("Tokio thread failed: {:#}", e);
            }
        });

        let Settings {
            engine,
            rules,
            bindings,
            autostart,
            autostart_timeout,
            monitors,
            ..
        } = settings;
        let state = State::new(
            engine,
            RulesEngine::new(rules),
            Autostart::new(autostart, autostart_timeout),
        );

        let app = App {
            state: RefCell::new(state),
            bindings,
            event_emitter: EventEmitter::new(main_channels.state_event_tx.clone()),
        };

        let manipulator = HeadlessHost;
        let spawner = DetachedSpawner;
        let lineage = ProcLineage;
        let bar = LogBar;
        let host = Host {
            manipulator: &manipulator,
            spawner: &spawner,
            lineage: &lineage,
            bar: &bar,
        };

        app.init(&host, &monitors)?;
        app.run_main_loop(main_channels, &host);

        let _ = std::fs::remove_file(crate::ipc::SOCKET_PATH);
        let _ = std::fs::remove_file(crate::ipc::EVENT_SOCKET_PATH);
        Ok(())
    }

    /// Create the monitors, draw every bar, then launch the startup programs.
    fn init(&self, host: &Host, monitors: &[Rect]) -> Result<()> {
        let pre_state = capture_event_state(&self.state);
        let effects = self.state.borrow_mut().update_screens(monitors);
        if self.state.borrow().monitors.is_empty() {
            bail!("No monitors available");
        }
        if let Err(e) = execute_effects(effects, host, &self.event_emitter) {
            tracing::warn!("Initial arrange failed: {}", e);
        }
        emit_state_change_events(&self.event_emitter, host.bar, &self.state, &pre_state);

        self.state
            .borrow_mut()
            .autostart
            .start(host.spawner, Instant::now());
        Ok(())
    }

    fn run_main_loop(&self, channels: MainChannels, host: &Host) {
        tracing::info!("Starting main loop");

        while let Ok(event) = channels.loop_rx.recv() {
            match event {
                LoopEvent::Ipc(cmd, resp_tx) => {
                    tracing::debug!("Received IPC command: {:?}", cmd);
                    let response = dispatch_command(
                        &cmd,
                        &self.state,
                        &self.bindings,
                        host,
                        &self.event_emitter,
                    );
                    let _ = resp_tx.blocking_send(response);
                }
                LoopEvent::Snapshot(resp_tx) => {
                    let _ = resp_tx.send(create_snapshot(&self.state.borrow()));
                }
                LoopEvent::Tick => {
                    let mut state = self.state.borrow_mut();
                    if state.expire_autostart(Instant::now()) > 0 && state.autostart.is_exhausted()
                    {
                        tracing::info!("No startup program is waiting for a window");
                    }
                }
                LoopEvent::Shutdown => self.state.borrow_mut().quit(),
            }

            if !self.state.borrow().running {
                break;
            }
        }

        tracing::info!("Main loop exited");
    }
}
