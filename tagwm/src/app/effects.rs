use crate::effect::Effect;
use crate::event_emitter::EventEmitter;
use crate::platform::Host;

/// Execute side effects in order. A failed spawn stops the batch.
pub fn execute_effects(
    effects: Vec<Effect>,
    host: &Host,
    event_emitter: &EventEmitter,
) -> Result<(), String> {
    for effect in effects {
        match effect {
            Effect::Configure {
                window,
                rect,
                border_width,
            } => host.manipulator.configure(window, &rect, border_width),
            Effect::Hide { window, rect } => host.manipulator.hide(window, &rect),
            Effect::Raise { window } => host.manipulator.raise(window),
            Effect::Restack { windows } => host.manipulator.restack(&windows),
            Effect::SetBorder { window, color } => {
                host.manipulator.set_border_color(window, &color)
            }
            Effect::Focus { window } => host.manipulator.set_focus(window),
            Effect::Close { window } => host.manipulator.close(window),
            Effect::BeginPointer { window, op } => host.manipulator.begin_pointer(window, op),
            Effect::Spawn { command } => {
                let pid = host.spawner.spawn(&command.argv)?;
                tracing::debug!("Spawned {:?} as pid {}", command.argv, pid);
            }
            Effect::StatusRefresh => {
                host.bar.status_changed();
                event_emitter.emit_status_refresh();
            }
        }
    }
    Ok(())
}
