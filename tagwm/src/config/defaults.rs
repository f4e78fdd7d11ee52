//! Built-in tables used when the config file leaves a section out.

use tagwm_ipc::{Action, Arg, ClickContext, SpawnCommand};

use crate::binding::Binding;
use crate::core::{AutostartEntry, Rule};
use crate::keys::{keysym, CONTROL, MOD1, MOD4, SHIFT};

const MODKEY: u32 = MOD4;

const DMENU_FONT: &str = "LXGWWenKaiMono:size=20";

fn term() -> SpawnCommand {
    SpawnCommand::shell("[ \"$GTK_THEME\" = \"Adwaita:dark\" ] && dt || st")
}

fn status_shell(cmd: &str) -> SpawnCommand {
    SpawnCommand::shell(cmd).with_status_notify()
}

pub fn commands() -> Vec<(&'static str, SpawnCommand)> {
    vec![
        (
            "dmenu",
            SpawnCommand::new([
                "dmenu_run",
                "-m",
                "{monitor}",
                "-fn",
                DMENU_FONT,
                "-nb",
                "#222222",
                "-nf",
                "#bbbbbb",
                "-sb",
                "#005577",
                "-sf",
                "#eeeeee",
            ]),
        ),
        ("term", term()),
        (
            "rofi",
            SpawnCommand::new(["/usr/bin/rofi", "-show", "drun", "-show-icons"]),
        ),
        ("oald", SpawnCommand::new(["oald"])),
        ("dict", SpawnCommand::new(["dict"])),
        ("tts", SpawnCommand::new(["tts"])),
        ("anki", SpawnCommand::new(["/usr/bin/anki"])),
        ("xmind", SpawnCommand::new(["/usr/bin/xmind"])),
        ("upvol", status_shell("/usr/bin/amixer -q sset Master 10%+")),
        ("downvol", status_shell("/usr/bin/amixer -q sset Master 10%-")),
        ("mutevol", status_shell("/usr/bin/amixer -q sset Master toggle")),
        (
            "lightup",
            status_shell("/usr/bin/ddcutil -d 2 setvcp 10 + 10; /usr/bin/ddcutil -d 1 setvcp 10 + 10"),
        ),
        (
            "lightdown",
            status_shell("/usr/bin/ddcutil -d 2 setvcp 10 - 10; /usr/bin/ddcutil -d 1 setvcp 10 - 10"),
        ),
        (
            "fd",
            SpawnCommand::new(["/usr/bin/firefox-developer-edition", "--kiosk"]),
        ),
        (
            "ch",
            SpawnCommand::new(["/usr/bin/google-chrome-stable", "--kiosk"]),
        ),
        ("mpv", SpawnCommand::new(["/usr/bin/mpv"])),
        ("ff", SpawnCommand::new(["/usr/bin/firefox"])),
        ("editor", SpawnCommand::new(["/usr/bin/code"])),
    ]
}

fn command(name: &str) -> SpawnCommand {
    commands()
        .into_iter()
        .find(|(n, _)| *n == name)
        .map(|(_, cmd)| cmd)
        .unwrap_or_else(|| SpawnCommand::new([name]))
}

pub fn rules() -> Vec<Rule> {
    vec![
        Rule::class("Surf").with_instance("surf").floating(),
        Rule::class("firefox").with_tags(1 << 6),
        Rule::class("Chromium").with_tags(1 << 6).on_monitor(2),
        Rule::class("Cursor").with_tags(1 << 8),
        Rule::class("Code").with_tags(1 << 7).on_monitor(1),
        Rule::class("mpv").with_tags(1 << 1).on_monitor(1),
    ]
}

pub fn autostart() -> Vec<AutostartEntry> {
    vec![
        AutostartEntry::new(command("fd").argv, 1, 0),
        AutostartEntry::new(term().argv, 1 << 1, 1),
        AutostartEntry::new(term().argv, 1, 1),
        AutostartEntry::new(command("ff").argv, 1, 1),
    ]
}

fn spawn(name: &str) -> Arg {
    Arg::Spawn(command(name))
}

pub fn keys() -> Vec<Binding> {
    use keysym::ascii;

    let mut keys = vec![
        Binding::key(0, keysym::XF86_AUDIO_MUTE, Action::Spawn, spawn("mutevol")),
        Binding::key(0, keysym::XF86_AUDIO_LOWER_VOLUME, Action::Spawn, spawn("downvol")),
        Binding::key(0, keysym::XF86_AUDIO_RAISE_VOLUME, Action::Spawn, spawn("upvol")),
        Binding::key(0, keysym::XF86_MON_BRIGHTNESS_UP, Action::Spawn, spawn("lightup")),
        Binding::key(0, keysym::XF86_MON_BRIGHTNESS_DOWN, Action::Spawn, spawn("lightdown")),
        Binding::key(MOD1, keysym::SPACE, Action::Spawn, spawn("dmenu")),
        Binding::key(MODKEY, ascii('d'), Action::Spawn, spawn("rofi")),
        Binding::key(MOD1, ascii('d'), Action::Spawn, spawn("dict")),
        Binding::key(MOD1, ascii('t'), Action::Spawn, spawn("tts")),
        Binding::key(MODKEY, ascii('s'), Action::Spawn, spawn("oald")),
        Binding::key(MODKEY, keysym::RETURN, Action::Spawn, spawn("term")),
        Binding::key(MODKEY, ascii('b'), Action::ToggleBar, Arg::None),
        Binding::key(MODKEY, ascii('j'), Action::FocusStack, Arg::Int(1)),
        Binding::key(MODKEY, ascii('k'), Action::FocusStack, Arg::Int(-1)),
        Binding::key(MODKEY, ascii('h'), Action::SetMfact, Arg::Float(-0.01)),
        Binding::key(MODKEY, ascii('l'), Action::SetMfact, Arg::Float(0.01)),
        Binding::key(MODKEY | SHIFT, keysym::RETURN, Action::Zoom, Arg::None),
        Binding::key(MODKEY, keysym::TAB, Action::View, Arg::None),
        Binding::key(MODKEY | SHIFT, ascii('q'), Action::KillClient, Arg::None),
        Binding::key(MODKEY, ascii('t'), Action::SetLayout, Arg::Layout(0)),
        Binding::key(MODKEY, ascii('f'), Action::SetLayout, Arg::Layout(1)),
        Binding::key(MODKEY, ascii('m'), Action::SetLayout, Arg::Layout(2)),
        Binding::key(MODKEY, keysym::SPACE, Action::SetLayout, Arg::None),
        Binding::key(MODKEY | SHIFT, keysym::SPACE, Action::ToggleFloating, Arg::None),
        Binding::key(MODKEY, keysym::KEY_0, Action::View, Arg::Mask(!0)),
        Binding::key(MODKEY | SHIFT, keysym::KEY_0, Action::Tag, Arg::Mask(!0)),
        Binding::key(MODKEY, keysym::COMMA, Action::FocusMon, Arg::Int(-1)),
        Binding::key(MODKEY, keysym::PERIOD, Action::FocusMon, Arg::Int(1)),
        Binding::key(MODKEY | SHIFT, keysym::COMMA, Action::TagMon, Arg::Int(-1)),
        Binding::key(MODKEY | SHIFT, keysym::PERIOD, Action::TagMon, Arg::Int(1)),
    ];

    for tag in 0..9u32 {
        let sym = keysym::KEY_1 + tag;
        let mask = Arg::Mask(1 << tag);
        keys.push(Binding::key(MODKEY, sym, Action::View, mask.clone()));
        keys.push(Binding::key(MODKEY | CONTROL, sym, Action::ToggleView, mask.clone()));
        keys.push(Binding::key(MODKEY | SHIFT, sym, Action::Tag, mask.clone()));
        keys.push(Binding::key(
            MODKEY | CONTROL | SHIFT,
            sym,
            Action::ToggleTag,
            mask,
        ));
    }

    keys.push(Binding::key(MODKEY | SHIFT, ascii('e'), Action::Quit, Arg::None));
    keys
}

pub fn buttons() -> Vec<Binding> {
    use ClickContext::*;

    vec![
        Binding::button(LayoutSymbol, 0, 1, Action::SetLayout, Arg::None),
        Binding::button(LayoutSymbol, 0, 3, Action::SetLayout, Arg::Layout(2)),
        Binding::button(WindowTitle, 0, 2, Action::Zoom, Arg::None),
        Binding::button(StatusText, 0, 2, Action::Spawn, spawn("term")),
        Binding::button(ClientWindow, MODKEY, 1, Action::MoveMouse, Arg::None),
        Binding::button(ClientWindow, MODKEY, 2, Action::ToggleFloating, Arg::None),
        Binding::button(ClientWindow, MODKEY, 3, Action::ResizeMouse, Arg::None),
        Binding::button(TagBar, 0, 1, Action::View, Arg::None),
        Binding::button(TagBar, 0, 3, Action::ToggleView, Arg::None),
        Binding::button(TagBar, MODKEY, 1, Action::Tag, Arg::None),
        Binding::button(TagBar, MODKEY, 3, Action::ToggleTag, Arg::None),
    ]
}
