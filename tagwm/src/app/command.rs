use crate::binding::BindingTable;
use crate::core::{Rect, State};
use crate::effect::{CommandResult, Effect};
use crate::event_emitter::{monitor_infos, window_infos};
use crate::platform::{PointerOp, ProcessLineage};
use crate::spawn::substitute_monitor;
use tagwm_ipc::{
    Action, Arg, AutostartInfo, ClickContext, Command, HostEvent, Response, SpawnCommand,
    StateInfo,
};

/// Pure function: mutates state and computes effects, performs no side effects.
pub fn process_command<L: ProcessLineage + ?Sized>(
    state: &mut State,
    bindings: &BindingTable,
    lineage: &L,
    cmd: &Command,
) -> CommandResult {
    match cmd {
        Command::Dispatch { action, arg } => run_action(state, *action, arg),
        Command::Host { event } => handle_host_event(state, bindings, lineage, event),

        Command::ListWindows => CommandResult::with_response(Response::Windows {
            windows: window_infos(state),
        }),
        Command::ListMonitors => CommandResult::with_response(Response::Monitors {
            monitors: monitor_infos(state),
        }),
        Command::GetState => CommandResult::with_response(Response::State {
            state: StateInfo {
                visible_tags: state.visible_tags().mask(),
                focused_window_id: state.focused(),
                focused_monitor: state.selected_monitor,
                window_count: state.clients.len(),
                layout: state.layout_symbol().to_string(),
                status_text: state.status_text.clone(),
            },
        }),
        Command::ListBindings => CommandResult::with_response(Response::Bindings {
            bindings: bindings.info(),
        }),
        Command::AutostartStatus => {
            let entries = state
                .autostart
                .entries()
                .iter()
                .map(|entry| AutostartInfo {
                    command: entry.command.join(" "),
                    pid: entry.pid,
                    tags: entry.tags,
                    monitor: entry.monitor,
                    status: entry.status.to_string(),
                })
                .collect();
            CommandResult::with_response(Response::Autostart { entries })
        }
    }
}

fn invalid_arg(action: Action, arg: &Arg) -> CommandResult {
    CommandResult::error(format!("Invalid argument for {}: {:?}", action, arg))
}

/// Run a bindable action against the selected monitor and its selected client.
pub fn run_action(state: &mut State, action: Action, arg: &Arg) -> CommandResult {
    tracing::debug!("Action: {} {}", action, arg);

    let effects = match (action, arg) {
        // No argument swaps back to the previous view
        (Action::View, Arg::None) => state.view(0),
        (Action::View, Arg::Mask(mask)) => state.view(*mask),
        (Action::ToggleView, Arg::Mask(mask)) => state.toggle_view(*mask),
        (Action::Tag, Arg::Mask(mask)) => state.tag_focused(*mask),
        (Action::ToggleTag, Arg::Mask(mask)) => state.toggle_focused_tags(*mask),

        (Action::FocusStack, Arg::Int(delta)) => state.focus_stack(*delta),
        (Action::IncNmaster, Arg::Int(delta)) => state.inc_nmaster(*delta),
        (Action::SetMfact, Arg::Float(f)) => state.set_mfact(*f),
        (Action::SetLayout, Arg::None) => state.set_layout(None),
        (Action::SetLayout, Arg::Layout(index)) => {
            if state.config.layout(*index).is_none() {
                return CommandResult::error(format!("No layout at index {}", index));
            }
            state.set_layout(Some(*index))
        }

        (Action::Zoom, Arg::None) => state.zoom(),
        (Action::ToggleFloating, Arg::None) => state.toggle_floating(),
        (Action::ToggleFullscreen, Arg::None) => state.toggle_fullscreen(),
        (Action::KillClient, Arg::None) => state.kill_client(),

        (Action::FocusMon, Arg::Int(delta)) => state.focus_monitor(*delta),
        (Action::TagMon, Arg::Int(delta)) => state.tag_monitor(*delta),
        (Action::ToggleBar, Arg::None) => state.toggle_bar(),

        (Action::Spawn, Arg::Spawn(command)) => spawn_effects(state, command),
        (Action::MoveMouse, Arg::None) => state.begin_pointer(PointerOp::Move),
        (Action::ResizeMouse, Arg::None) => state.begin_pointer(PointerOp::Resize),

        (Action::Quit, Arg::None) => {
            state.quit();
            vec![]
        }

        (action, arg) => return invalid_arg(action, arg),
    };

    CommandResult::ok_with_effects(effects)
}

/// `{monitor}` in the arguments becomes the selected monitor index.
fn spawn_effects(state: &State, command: &SpawnCommand) -> Vec<Effect> {
    if command.argv.is_empty() {
        tracing::warn!("Ignoring spawn with an empty command");
        return vec![];
    }

    let command = SpawnCommand {
        argv: substitute_monitor(&command.argv, state.selected_monitor),
        notify_status: command.notify_status,
    };
    let notify = command.notify_status;
    let mut effects = vec![Effect::Spawn { command }];
    if notify {
        effects.push(Effect::StatusRefresh);
    }
    effects
}

fn handle_host_event<L: ProcessLineage + ?Sized>(
    state: &mut State,
    bindings: &BindingTable,
    lineage: &L,
    event: &HostEvent,
) -> CommandResult {
    let effects = match event {
        HostEvent::Map { window, attrs } => state.manage(*window, attrs, lineage),
        HostEvent::Unmap { window } => state.unmanage(*window),
        HostEvent::ConfigureRequest {
            window,
            x,
            y,
            width,
            height,
        } => state.configure_request(*window, Rect::new(*x, *y, *width, *height)),
        HostEvent::PointerMoved {
            window,
            x,
            y,
            width,
            height,
        } => state.move_client(*window, Rect::new(*x, *y, *width, *height)),
        HostEvent::Enter { window } => state.enter(*window),
        HostEvent::TitleChanged { window, title } => state.update_title(*window, title),
        HostEvent::UrgencyChanged { window, urgent } => state.set_urgent(*window, *urgent),
        HostEvent::HintsChanged { window, hints } => state.update_hints(*window, *hints),
        HostEvent::FullscreenRequest { window, fullscreen } => {
            state.set_fullscreen(*window, *fullscreen)
        }
        HostEvent::Key { modifiers, keysym } => {
            let Some((action, arg)) = bindings.resolve_key(*modifiers, *keysym) else {
                tracing::debug!("Unbound key {:#x} (modifiers {:#x})", keysym, modifiers);
                return CommandResult::ok();
            };
            return run_action(state, action, &arg);
        }
        HostEvent::Button {
            modifiers,
            button,
            click,
            window,
            tag,
        } => return handle_button(state, bindings, *modifiers, *button, *click, *window, *tag),
        HostEvent::Screens { screens } => {
            let rects: Vec<Rect> = screens.iter().map(Rect::from_screen).collect();
            state.update_screens(&rects)
        }
        HostEvent::StatusText { text } => {
            state.set_status_text(text);
            vec![]
        }
    };

    CommandResult::ok_with_effects(effects)
}

/// A press on a client focuses it before its binding runs.
fn handle_button(
    state: &mut State,
    bindings: &BindingTable,
    modifiers: u32,
    button: u32,
    click: ClickContext,
    window: Option<u32>,
    tag: Option<u32>,
) -> CommandResult {
    let mut effects = Vec::new();
    if click == ClickContext::ClientWindow {
        let Some(window) = window.filter(|w| state.clients.contains_key(w)) else {
            return CommandResult::ok();
        };
        effects.extend(state.enter(window));
        effects.extend(state.restack());
    }

    let Some((action, arg)) = bindings.resolve_button(modifiers, button, click, tag) else {
        return CommandResult::ok_with_effects(effects);
    };
    let result = run_action(state, action, &arg);
    effects.extend(result.effects);
    CommandResult {
        response: result.response,
        effects,
    }
}
