use std::cell::RefCell;

use crate::binding::BindingTable;
use crate::core::State;
use crate::event_emitter::EventEmitter;
use crate::platform::Host;
use tagwm_ipc::{Command, Response};

use super::command::process_command;
use super::effects::execute_effects;
use super::state_events::{capture_event_state, emit_state_change_events};

/// Unified dispatcher for IPC commands and injected host events.
/// Handles the common pattern: capture state -> process command -> execute effects -> emit events.
pub fn dispatch_command(
    cmd: &Command,
    state: &RefCell<State>,
    bindings: &BindingTable,
    host: &Host,
    event_emitter: &EventEmitter,
) -> Response {
    let pre_state = capture_event_state(state);

    let response = handle_command(state, bindings, host, event_emitter, cmd);

    emit_state_change_events(event_emitter, host.bar, state, &pre_state);

    response
}

fn handle_command(
    state: &RefCell<State>,
    bindings: &BindingTable,
    host: &Host,
    event_emitter: &EventEmitter,
    cmd: &Command,
) -> Response {
    let result = process_command(&mut state.borrow_mut(), bindings, host.lineage, cmd);

    if let Err(e) = execute_effects(result.effects, host, event_emitter) {
        tracing::error!("{}", e);
        return Response::Error { message: e };
    }

    result.response
}
