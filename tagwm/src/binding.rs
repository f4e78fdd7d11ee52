use tagwm_ipc::{Action, Arg, BindingInfo, ClickContext};

use crate::keys::{self, clean_mask};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Key(u32),
    Button { button: u32, click: ClickContext },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub modifiers: u32,
    pub trigger: Trigger,
    pub action: Action,
    pub arg: Arg,
}

impl Binding {
    pub fn key(modifiers: u32, keysym: u32, action: Action, arg: Arg) -> Self {
        Self {
            modifiers,
            trigger: Trigger::Key(keysym),
            action,
            arg,
        }
    }

    pub fn button(
        click: ClickContext,
        modifiers: u32,
        button: u32,
        action: Action,
        arg: Arg,
    ) -> Self {
        Self {
            modifiers,
            trigger: Trigger::Button { button, click },
            action,
            arg,
        }
    }

    pub fn trigger_name(&self) -> String {
        format_trigger(self.modifiers, self.trigger)
    }
}

pub fn format_trigger(modifiers: u32, trigger: Trigger) -> String {
    let mut parts: Vec<String> = keys::format_modifiers(modifiers)
        .into_iter()
        .map(String::from)
        .collect();
    match trigger {
        Trigger::Key(sym) => parts.push(keys::keysym_name(sym)),
        Trigger::Button { button, click } => {
            parts.push(format!("button{}", button));
            let name = parts.join("-");
            return format!("{} on {:?}", name, click);
        }
    }
    parts.join("-")
}

/// Key and button bindings in declaration order.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    bindings: Vec<Binding>,
}

impl BindingTable {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self { bindings }
    }

    /// First binding whose modifiers match exactly after dropping lock bits.
    pub fn resolve(&self, modifiers: u32, trigger: Trigger) -> Option<(Action, Arg)> {
        let modifiers = clean_mask(modifiers);
        self.bindings
            .iter()
            .find(|b| b.trigger == trigger && clean_mask(b.modifiers) == modifiers)
            .map(|b| (b.action, b.arg.clone()))
    }

    pub fn resolve_key(&self, modifiers: u32, keysym: u32) -> Option<(Action, Arg)> {
        self.resolve(modifiers, Trigger::Key(keysym))
    }

    /// Tag actions bound on the tag bar without an argument act on the clicked tag.
    pub fn resolve_button(
        &self,
        modifiers: u32,
        button: u32,
        click: ClickContext,
        tag: Option<u32>,
    ) -> Option<(Action, Arg)> {
        let (action, arg) = self.resolve(modifiers, Trigger::Button { button, click })?;
        match (click, tag, &arg) {
            (ClickContext::TagBar, Some(tag), Arg::None)
                if action.takes_tag_mask() && tag < 32 =>
            {
                Some((action, Arg::Mask(1 << tag)))
            }
            _ => Some((action, arg)),
        }
    }

    pub fn info(&self) -> Vec<BindingInfo> {
        self.bindings
            .iter()
            .map(|b| BindingInfo {
                trigger: b.trigger_name(),
                action: match &b.arg {
                    Arg::None => b.action.to_string(),
                    arg => format!("{} {}", b.action, arg),
                },
            })
            .collect()
    }
}
