mod app;
mod binding;
mod config;
mod core;
mod effect;
mod event;
mod event_emitter;
mod ipc;
mod keys;
mod layout;
mod platform;
mod spawn;

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use argh::FromArgs;
use ipc::IpcClient;
use tracing_subscriber::EnvFilter;
use tagwm_ipc::{
    Action, Arg, ClickContext, Command, EventFilter, HostEvent, Response, ScreenGeometry,
    SpawnCommand, WindowAttributes,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// tagwm - tag-based tiling window management engine
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Option<SubCommand>,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum SubCommand {
    Start(StartCmd),
    Version(VersionCmd),
    View(ViewCmd),
    ToggleView(ToggleViewCmd),
    Tag(TagCmd),
    ToggleTag(ToggleTagCmd),
    FocusStack(FocusStackCmd),
    IncNmaster(IncNmasterCmd),
    SetMfact(SetMfactCmd),
    SetLayout(SetLayoutCmd),
    Zoom(ZoomCmd),
    ToggleFloating(ToggleFloatingCmd),
    ToggleFullscreen(ToggleFullscreenCmd),
    Kill(KillCmd),
    FocusMon(FocusMonCmd),
    TagMon(TagMonCmd),
    Spawn(SpawnCmd),
    ToggleBar(ToggleBarCmd),
    Quit(QuitCmd),
    ListWindows(ListWindowsCmd),
    ListMonitors(ListMonitorsCmd),
    GetState(GetStateCmd),
    ListBindings(ListBindingsCmd),
    AutostartStatus(AutostartStatusCmd),
    Map(MapCmd),
    Unmap(UnmapCmd),
    Key(KeyCmd),
    Button(ButtonCmd),
    SetStatus(SetStatusCmd),
    SetTitle(SetTitleCmd),
    SetUrgent(SetUrgentCmd),
    Screens(ScreensCmd),
    Subscribe(SubscribeCmd),
}

/// Start the tagwm daemon
#[derive(FromArgs)]
#[argh(subcommand, name = "start")]
struct StartCmd {
    /// config file (default: ~/.config/tagwm/config.toml)
    #[argh(option)]
    config: Option<PathBuf>,
}

/// Show version information
#[derive(FromArgs)]
#[argh(subcommand, name = "version")]
struct VersionCmd {}

/// Show the given tags; no tags swaps back to the previous view
#[derive(FromArgs)]
#[argh(subcommand, name = "view")]
struct ViewCmd {
    /// tag numbers (1-based, 0 for all)
    #[argh(positional)]
    tags: Vec<u32>,
}

/// Toggle tags in the current view
#[derive(FromArgs)]
#[argh(subcommand, name = "toggle-view")]
struct ToggleViewCmd {
    /// tag numbers (1-based, 0 for all)
    #[argh(positional)]
    tags: Vec<u32>,
}

/// Move the focused window to the given tags
#[derive(FromArgs)]
#[argh(subcommand, name = "tag")]
struct TagCmd {
    /// tag numbers (1-based, 0 for all)
    #[argh(positional)]
    tags: Vec<u32>,
}

/// Toggle tags on the focused window
#[derive(FromArgs)]
#[argh(subcommand, name = "toggle-tag")]
struct ToggleTagCmd {
    /// tag numbers (1-based, 0 for all)
    #[argh(positional)]
    tags: Vec<u32>,
}

/// Focus the next or previous visible window
#[derive(FromArgs)]
#[argh(subcommand, name = "focus-stack")]
struct FocusStackCmd {
    /// next, prev or a signed step
    #[argh(positional)]
    delta: String,
}

/// Change the number of master windows
#[derive(FromArgs)]
#[argh(subcommand, name = "inc-nmaster")]
struct IncNmasterCmd {
    /// next, prev or a signed step
    #[argh(positional)]
    delta: String,
}

/// Adjust (+0.05, -0.05) or set (0.6) the master area factor
#[derive(FromArgs)]
#[argh(subcommand, name = "set-mfact")]
struct SetMfactCmd {
    /// signed change or absolute factor
    #[argh(positional)]
    value: String,
}

/// Select a layout by index; no index swaps back to the previous layout
#[derive(FromArgs)]
#[argh(subcommand, name = "set-layout")]
struct SetLayoutCmd {
    /// layout table index
    #[argh(positional)]
    index: Option<usize>,
}

/// Move the focused window to the master position
#[derive(FromArgs)]
#[argh(subcommand, name = "zoom")]
struct ZoomCmd {}

/// Toggle floating on the focused window
#[derive(FromArgs)]
#[argh(subcommand, name = "toggle-floating")]
struct ToggleFloatingCmd {}

/// Toggle fullscreen on the focused window
#[derive(FromArgs)]
#[argh(subcommand, name = "toggle-fullscreen")]
struct ToggleFullscreenCmd {}

/// Close the focused window
#[derive(FromArgs)]
#[argh(subcommand, name = "kill")]
struct KillCmd {}

/// Focus the next or previous monitor
#[derive(FromArgs)]
#[argh(subcommand, name = "focus-mon")]
struct FocusMonCmd {
    /// next, prev or a signed step
    #[argh(positional)]
    delta: String,
}

/// Send the focused window to the next or previous monitor
#[derive(FromArgs)]
#[argh(subcommand, name = "tag-mon")]
struct TagMonCmd {
    /// next, prev or a signed step
    #[argh(positional)]
    delta: String,
}

/// Start a program; `{monitor}` becomes the selected monitor index
#[derive(FromArgs)]
#[argh(subcommand, name = "spawn")]
struct SpawnCmd {
    /// ask the status bar to refresh afterwards
    #[argh(switch)]
    notify_status: bool,
    /// program and arguments
    #[argh(positional, greedy)]
    argv: Vec<String>,
}

/// Show or hide the bar on the selected monitor
#[derive(FromArgs)]
#[argh(subcommand, name = "toggle-bar")]
struct ToggleBarCmd {}

/// Quit the tagwm daemon
#[derive(FromArgs)]
#[argh(subcommand, name = "quit")]
struct QuitCmd {}

/// List all managed windows
#[derive(FromArgs)]
#[argh(subcommand, name = "list-windows")]
struct ListWindowsCmd {}

/// List monitors
#[derive(FromArgs)]
#[argh(subcommand, name = "list-monitors")]
struct ListMonitorsCmd {}

/// Get current window manager state
#[derive(FromArgs)]
#[argh(subcommand, name = "get-state")]
struct GetStateCmd {}

/// List key and button bindings
#[derive(FromArgs)]
#[argh(subcommand, name = "list-bindings")]
struct ListBindingsCmd {}

/// Show startup programs and whether their windows appeared
#[derive(FromArgs)]
#[argh(subcommand, name = "autostart-status")]
struct AutostartStatusCmd {}

/// Report a newly mapped window
#[derive(FromArgs)]
#[argh(subcommand, name = "map")]
struct MapCmd {
    /// window id
    #[argh(positional)]
    window: u32,
    /// window class
    #[argh(option)]
    class: Option<String>,
    /// window instance
    #[argh(option)]
    instance: Option<String>,
    /// window title
    #[argh(option, default = "String::new()")]
    title: String,
    /// owning process id
    #[argh(option)]
    pid: Option<u32>,
    /// window this one is transient for
    #[argh(option)]
    transient_for: Option<u32>,
    /// requested geometry, WxH+X+Y
    #[argh(option, default = "String::from(\"640x480+0+0\")")]
    geometry: String,
    /// window asks to start fullscreen
    #[argh(switch)]
    fullscreen: bool,
}

/// Report that a window went away
#[derive(FromArgs)]
#[argh(subcommand, name = "unmap")]
struct UnmapCmd {
    /// window id
    #[argh(positional)]
    window: u32,
}

/// Report a key press, e.g. super-shift-Return
#[derive(FromArgs)]
#[argh(subcommand, name = "key")]
struct KeyCmd {
    /// modifiers and key name joined by '-'
    #[argh(positional)]
    chord: String,
}

/// Report a button press, e.g. super-button1 --click client-window --window 5
#[derive(FromArgs)]
#[argh(subcommand, name = "button")]
struct ButtonCmd {
    /// modifiers and button joined by '-'
    #[argh(positional)]
    chord: String,
    /// where the press happened
    #[argh(option)]
    click: String,
    /// window under the pointer
    #[argh(option)]
    window: Option<u32>,
    /// tag under the pointer (1-based)
    #[argh(option)]
    tag: Option<u32>,
}

/// Set the status text shown in the bar
#[derive(FromArgs)]
#[argh(subcommand, name = "set-status")]
struct SetStatusCmd {
    /// status text
    #[argh(positional, greedy)]
    text: Vec<String>,
}

/// Report a window title change
#[derive(FromArgs)]
#[argh(subcommand, name = "set-title")]
struct SetTitleCmd {
    /// window id
    #[argh(positional)]
    window: u32,
    /// new title
    #[argh(positional, greedy)]
    title: Vec<String>,
}

/// Report a window's urgency hint
#[derive(FromArgs)]
#[argh(subcommand, name = "set-urgent")]
struct SetUrgentCmd {
    /// window id
    #[argh(positional)]
    window: u32,
    /// clear the hint instead of setting it
    #[argh(switch)]
    clear: bool,
}

/// Report the screen layout, one WxH+X+Y per monitor
#[derive(FromArgs)]
#[argh(subcommand, name = "screens")]
struct ScreensCmd {
    /// monitor geometries
    #[argh(positional)]
    geometry: Vec<String>,
}

/// Print state events as JSON lines
#[derive(FromArgs)]
#[argh(subcommand, name = "subscribe")]
struct SubscribeCmd {
    /// start with a snapshot of the current state
    #[argh(switch)]
    snapshot: bool,
    /// comma separated event groups: window, focus, tags, layout, bar
    #[argh(option)]
    filter: Option<String>,
}

fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    match cli.command {
        None => {
            let args: Vec<&str> = vec!["tagwm", "--help"];
            if let Err(e) = Cli::from_args(&args[..1], &args[1..]) {
                println!("{}", e.output);
            }
            Ok(())
        }
        Some(SubCommand::Start(cmd)) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .init();

            tracing::info!("tagwm {} starting", VERSION);
            let settings = config::Settings::load(cmd.config.as_deref())?;
            app::App::run(settings)
        }
        Some(SubCommand::Version(_)) => {
            println!("tagwm {}", VERSION);
            Ok(())
        }
        Some(SubCommand::Subscribe(cmd)) => {
            let filter = match cmd.filter {
                Some(filter) => parse_filter(&filter)?,
                None => EventFilter::default(),
            };
            ipc::subscribe_and_print(cmd.snapshot, filter)
        }
        Some(subcmd) => run_cli(subcmd),
    }
}

fn run_cli(subcmd: SubCommand) -> Result<()> {
    let cmd = to_command(subcmd)?;
    let mut client = IpcClient::connect()?;
    let response = client.send(&cmd)?;

    match response {
        Response::Ok => {}
        Response::Error { message } => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
        Response::Windows { windows } => {
            for w in windows {
                println!(
                    "{}: {} - {} [tags={:#x}, monitor={}, {}x{} @ ({},{})]{}{}",
                    w.id,
                    w.class.as_deref().unwrap_or("?"),
                    w.title,
                    w.tags,
                    w.monitor,
                    w.width,
                    w.height,
                    w.x,
                    w.y,
                    if w.is_floating { " floating" } else { "" },
                    if w.is_focused { " *" } else { "" }
                );
            }
        }
        Response::Monitors { monitors } => {
            for m in monitors {
                println!(
                    "{}: {}x{} @ ({},{}) tags={:#x} {} mfact={:.2} nmaster={} clients={}{}",
                    m.index,
                    m.width,
                    m.height,
                    m.x,
                    m.y,
                    m.visible_tags,
                    m.layout,
                    m.mfact,
                    m.nmaster,
                    m.client_count,
                    if m.is_focused { " *" } else { "" }
                );
            }
        }
        Response::State { state } => {
            println!("Visible tags: {:#x}", state.visible_tags);
            println!("Focused window: {:?}", state.focused_window_id);
            println!("Focused monitor: {}", state.focused_monitor);
            println!("Window count: {}", state.window_count);
            println!("Layout: {}", state.layout);
            println!("Status: {}", state.status_text);
        }
        Response::Bindings { bindings } => {
            for b in bindings {
                println!("{} -> {}", b.trigger, b.action);
            }
        }
        Response::Autostart { entries } => {
            for e in entries {
                println!(
                    "{} [tags={:#x}, monitor={}] pid={:?} {}",
                    e.command, e.tags, e.monitor, e.pid, e.status
                );
            }
        }
    }

    Ok(())
}

fn dispatch(action: Action, arg: Arg) -> Command {
    Command::Dispatch { action, arg }
}

fn host(event: HostEvent) -> Command {
    Command::Host { event }
}

fn to_command(subcmd: SubCommand) -> Result<Command> {
    let cmd = match subcmd {
        SubCommand::Start(_) | SubCommand::Version(_) | SubCommand::Subscribe(_) => {
            unreachable!("handled in main")
        }
        SubCommand::View(cmd) => {
            if cmd.tags.is_empty() {
                dispatch(Action::View, Arg::None)
            } else {
                dispatch(Action::View, Arg::Mask(parse_tags(&cmd.tags)?))
            }
        }
        SubCommand::ToggleView(cmd) => {
            dispatch(Action::ToggleView, Arg::Mask(parse_tags(&cmd.tags)?))
        }
        SubCommand::Tag(cmd) => dispatch(Action::Tag, Arg::Mask(parse_tags(&cmd.tags)?)),
        SubCommand::ToggleTag(cmd) => {
            dispatch(Action::ToggleTag, Arg::Mask(parse_tags(&cmd.tags)?))
        }
        SubCommand::FocusStack(cmd) => {
            dispatch(Action::FocusStack, Arg::Int(parse_delta(&cmd.delta)?))
        }
        SubCommand::IncNmaster(cmd) => {
            dispatch(Action::IncNmaster, Arg::Int(parse_delta(&cmd.delta)?))
        }
        SubCommand::SetMfact(cmd) => {
            dispatch(Action::SetMfact, Arg::Float(parse_mfact(&cmd.value)?))
        }
        SubCommand::SetLayout(cmd) => match cmd.index {
            Some(index) => dispatch(Action::SetLayout, Arg::Layout(index)),
            None => dispatch(Action::SetLayout, Arg::None),
        },
        SubCommand::Zoom(_) => dispatch(Action::Zoom, Arg::None),
        SubCommand::ToggleFloating(_) => dispatch(Action::ToggleFloating, Arg::None),
        SubCommand::ToggleFullscreen(_) => dispatch(Action::ToggleFullscreen, Arg::None),
        SubCommand::Kill(_) => dispatch(Action::KillClient, Arg::None),
        SubCommand::FocusMon(cmd) => dispatch(Action::FocusMon, Arg::Int(parse_delta(&cmd.delta)?)),
        SubCommand::TagMon(cmd) => dispatch(Action::TagMon, Arg::Int(parse_delta(&cmd.delta)?)),
        SubCommand::Spawn(cmd) => {
            if cmd.argv.is_empty() {
                bail!("spawn requires a program");
            }
            let mut command = SpawnCommand::new(cmd.argv);
            command.notify_status = cmd.notify_status;
            dispatch(Action::Spawn, Arg::Spawn(command))
        }
        SubCommand::ToggleBar(_) => dispatch(Action::ToggleBar, Arg::None),
        SubCommand::Quit(_) => dispatch(Action::Quit, Arg::None),

        SubCommand::ListWindows(_) => Command::ListWindows,
        SubCommand::ListMonitors(_) => Command::ListMonitors,
        SubCommand::GetState(_) => Command::GetState,
        SubCommand::ListBindings(_) => Command::ListBindings,
        SubCommand::AutostartStatus(_) => Command::AutostartStatus,

        SubCommand::Map(cmd) => {
            let geometry = parse_geometry(&cmd.geometry)?;
            host(HostEvent::Map {
                window: cmd.window,
                attrs: WindowAttributes {
                    class: cmd.class,
                    instance: cmd.instance,
                    title: cmd.title,
                    pid: cmd.pid,
                    x: geometry.x,
                    y: geometry.y,
                    width: geometry.width,
                    height: geometry.height,
                    transient_for: cmd.transient_for,
                    is_fullscreen: cmd.fullscreen,
                    ..Default::default()
                },
            })
        }
        SubCommand::Unmap(cmd) => host(HostEvent::Unmap { window: cmd.window }),
        SubCommand::Key(cmd) => {
            let (modifiers, key) = keys::parse_chord(&cmd.chord).map_err(|e| anyhow!(e))?;
            let keysym = keys::parse_keysym(key).map_err(|e| anyhow!(e))?;
            host(HostEvent::Key { modifiers, keysym })
        }
        SubCommand::Button(cmd) => {
            let (modifiers, name) = keys::parse_chord(&cmd.chord).map_err(|e| anyhow!(e))?;
            let button = keys::parse_button(name).map_err(|e| anyhow!(e))?;
            let click: ClickContext = cmd.click.parse().map_err(|e: String| anyhow!(e))?;
            let tag = match cmd.tag {
                Some(0) => bail!("Tags are numbered from 1"),
                Some(tag) => Some(tag - 1),
                None => None,
            };
            host(HostEvent::Button {
                modifiers,
                button,
                click,
                window: cmd.window,
                tag,
            })
        }
        SubCommand::SetStatus(cmd) => host(HostEvent::StatusText {
            text: cmd.text.join(" "),
        }),
        SubCommand::SetTitle(cmd) => host(HostEvent::TitleChanged {
            window: cmd.window,
            title: cmd.title.join(" "),
        }),
        SubCommand::SetUrgent(cmd) => host(HostEvent::UrgencyChanged {
            window: cmd.window,
            urgent: !cmd.clear,
        }),
        SubCommand::Screens(cmd) => {
            if cmd.geometry.is_empty() {
                bail!("screens requires at least one WxH+X+Y geometry");
            }
            let screens = cmd
                .geometry
                .iter()
                .map(|g| parse_geometry(g))
                .collect::<Result<Vec<_>>>()?;
            host(HostEvent::Screens { screens })
        }
    };
    Ok(cmd)
}

/// 1-based tag numbers to a mask; 0 selects every tag.
fn parse_tags(tags: &[u32]) -> Result<u32> {
    if tags.is_empty() {
        bail!("At least one tag is required");
    }
    let mut mask = 0u32;
    for &tag in tags {
        match tag {
            0 => mask = !0,
            1..=32 => mask |= 1 << (tag - 1),
            _ => bail!("Tag out of range: {} (use 1-32, or 0 for all)", tag),
        }
    }
    Ok(mask)
}

fn parse_delta(s: &str) -> Result<i32> {
    match s.to_lowercase().as_str() {
        "next" => Ok(1),
        "prev" => Ok(-1),
        other => other
            .parse::<i32>()
            .map_err(|_| anyhow!("Invalid step: {} (use next, prev or a number)", s)),
    }
}

/// A signed value adjusts the factor; a bare value sets it.
fn parse_mfact(s: &str) -> Result<f32> {
    let value: f32 = s
        .parse()
        .map_err(|_| anyhow!("Invalid factor: {}", s))?;
    if s.starts_with('+') || s.starts_with('-') {
        Ok(value)
    } else {
        Ok(value + 1.0)
    }
}

/// `WxH+X+Y` (offsets may be negative).
fn parse_geometry(s: &str) -> Result<ScreenGeometry> {
    let invalid = || anyhow!("Invalid geometry: {} (expected WxH+X+Y)", s);
    let (width, rest) = s.split_once('x').ok_or_else(invalid)?;
    let offset_at = rest.find(['+', '-']).ok_or_else(invalid)?;
    let (height, offsets) = rest.split_at(offset_at);
    let y_at = offsets[1..]
        .find(['+', '-'])
        .map(|i| i + 1)
        .ok_or_else(invalid)?;
    let (x, y) = offsets.split_at(y_at);

    Ok(ScreenGeometry {
        x: x.parse().map_err(|_| invalid())?,
        y: y.parse().map_err(|_| invalid())?,
        width: width.parse().map_err(|_| invalid())?,
        height: height.parse().map_err(|_| invalid())?,
    })
}

fn parse_filter(s: &str) -> Result<EventFilter> {
    let mut filter = EventFilter::default();
    for group in s.split(',').map(str::trim).filter(|g| !g.is_empty()) {
        match group {
            "window" => filter.window = true,
            "focus" => filter.focus = true,
            "tags" => filter.tags = true,
            "layout" => filter.layout = true,
            "bar" => filter.bar = true,
            _ => bail!("Unknown event group: {}", group),
        }
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(&[1]).unwrap(), 1);
        assert_eq!(parse_tags(&[2, 9]).unwrap(), 0b1_0000_0010);
        assert_eq!(parse_tags(&[0]).unwrap(), !0);
        assert!(parse_tags(&[33]).is_err());
        assert!(parse_tags(&[]).is_err());
    }

    #[test]
    fn test_parse_delta() {
        assert_eq!(parse_delta("next").unwrap(), 1);
        assert_eq!(parse_delta("prev").unwrap(), -1);
        assert_eq!(parse_delta("-2").unwrap(), -2);
        assert!(parse_delta("up").is_err());
    }

    #[test]
    fn test_parse_mfact() {
        assert!((parse_mfact("+0.05").unwrap() - 0.05).abs() < f32::EPSILON);
        assert!((parse_mfact("-0.05").unwrap() + 0.05).abs() < f32::EPSILON);
        assert!((parse_mfact("0.6").unwrap() - 1.6).abs() < 1e-6);
        assert!(parse_mfact("half").is_err());
    }

    #[test]
    fn test_parse_geometry() {
        let g = parse_geometry("1920x1080+0+0").unwrap();
        assert_eq!((g.x, g.y, g.width, g.height), (0, 0, 1920, 1080));

        let g = parse_geometry("800x600-100+20").unwrap();
        assert_eq!((g.x, g.y, g.width, g.height), (-100, 20, 800, 600));

        assert!(parse_geometry("1920x1080").is_err());
        assert!(parse_geometry("widexhigh+0+0").is_err());
    }

    #[test]
    fn test_parse_filter() {
        let filter = parse_filter("tags, bar").unwrap();
        assert!(filter.tags && filter.bar);
        assert!(!filter.window && !filter.focus && !filter.layout);
        assert!(parse_filter("windows").is_err());
    }

    #[test]
    fn test_button_command_uses_zero_based_tag() {
        let cmd = to_command(SubCommand::Button(ButtonCmd {
            chord: "button1".to_string(),
            click: "tag-bar".to_string(),
            window: None,
            tag: Some(3),
        }))
        .unwrap();
        match cmd {
            Command::Host {
                event: HostEvent::Button { tag, click, .. },
            } => {
                assert_eq!(tag, Some(2));
                assert_eq!(click, ClickContext::TagBar);
            }
            _ => panic!("Wrong command"),
        }
    }

    #[test]
    fn test_key_command() {
        let cmd = to_command(SubCommand::Key(KeyCmd {
            chord: "super-shift-Return".to_string(),
        }))
        .unwrap();
        match cmd {
            Command::Host {
                event: HostEvent::Key { modifiers, keysym },
            } => {
                assert_eq!(modifiers, keys::MOD4 | keys::SHIFT);
                assert_eq!(keysym, keys::keysym::RETURN);
            }
            _ => panic!("Wrong command"),
        }
    }
}
