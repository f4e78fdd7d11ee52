//! Configuration file support.
//!
//! Settings come from `~/.config/tagwm/config.toml` (or `--config`). Every
//! section is optional: a missing section keeps the built-in default, a
//! present list section (`rules`, `keys`, `buttons`, ...) replaces the
//! default table as a whole.

mod defaults;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tagwm_ipc::{Action, Arg, ClickContext, ScreenGeometry, SpawnCommand};

use crate::binding::{Binding, BindingTable};
use crate::core::{autostart, AutostartEntry, ColorScheme, Config, Rect, Rule};
use crate::keys;
use crate::layout::LayoutDef;

pub const DEFAULT_STATUS_INTERVAL: Duration = Duration::from_secs(1);

/// Everything the daemon needs at startup, resolved and validated.
#[derive(Debug, Clone)]
pub struct Settings {
    pub engine: Config,
    pub rules: Vec<Rule>,
    pub bindings: BindingTable,
    pub autostart: Vec<AutostartEntry>,
    pub autostart_timeout: Duration,
    pub status_interval: Duration,
    /// Screens of the headless host until the host reports its own
    pub monitors: Vec<Rect>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut bindings = defaults::keys();
        bindings.extend(defaults::buttons());
        Self {
            engine: Config::default(),
            rules: defaults::rules(),
            bindings: BindingTable::new(bindings),
            autostart: defaults::autostart(),
            autostart_timeout: autostart::DEFAULT_TIMEOUT,
            status_interval: DEFAULT_STATUS_INTERVAL,
            monitors: vec![Rect::new(0, 0, 1920, 1080)],
        }
    }
}

impl Settings {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tagwm")
            .join("config.toml")
    }

    /// Load from an explicit path, or the default path if it exists.
    /// A missing explicit file is an error; a missing default file is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        if !explicit && !path.exists() {
            tracing::info!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let settings = Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file {:?}", path))?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(settings)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: FileConfig = toml::from_str(contents)?;
        file.resolve()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub appearance: Option<AppearanceConfig>,
    pub layout: Option<LayoutConfig>,
    pub tags: Option<Vec<String>>,
    pub layouts: Option<Vec<LayoutDef>>,
    pub rules: Option<Vec<Rule>>,
    pub commands: Option<HashMap<String, SpawnCommand>>,
    pub keys: Option<Vec<KeyConfig>>,
    pub buttons: Option<Vec<ButtonConfig>>,
    pub autostart: Option<Vec<AutostartConfig>>,
    pub autostart_timeout_secs: Option<u64>,
    pub status_interval_secs: Option<u64>,
    pub monitors: Option<Vec<ScreenGeometry>>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppearanceConfig {
    pub border_px: u32,
    pub snap: u32,
    pub show_bar: bool,
    pub top_bar: bool,
    pub bar_height: u32,
    pub fonts: Vec<String>,
    pub normal: ColorScheme,
    pub selected: ColorScheme,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        let config = Config::default();
        Self {
            border_px: config.border_px,
            snap: config.snap,
            show_bar: config.show_bar,
            top_bar: config.top_bar,
            bar_height: config.bar_height,
            fonts: config.fonts,
            normal: config.normal,
            selected: config.selected,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub mfact: f32,
    pub nmaster: u32,
    pub resize_hints: bool,
    pub lock_fullscreen: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let config = Config::default();
        Self {
            mfact: config.mfact,
            nmaster: config.nmaster,
            resize_hints: config.resize_hints,
            lock_fullscreen: config.lock_fullscreen,
        }
    }
}

/// Argument of a bound action. At most one field may be set.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ArgConfig {
    pub mask: Option<u32>,
    /// 1-based tag number, shorthand for `mask = 1 << (tag - 1)`
    pub tag: Option<u32>,
    pub int: Option<i32>,
    pub float: Option<f32>,
    pub layout: Option<usize>,
    /// Name of an entry in the command table
    pub command: Option<String>,
    pub argv: Option<Vec<String>>,
    pub shell: Option<String>,
    #[serde(default)]
    pub notify_status: bool,
}

#[derive(Debug, Deserialize)]
pub struct KeyConfig {
    /// e.g. `super-shift-Return`
    pub key: String,
    pub action: String,
    #[serde(flatten)]
    pub arg: ArgConfig,
}

#[derive(Debug, Deserialize)]
pub struct ButtonConfig {
    /// e.g. `super-button1`
    pub button: String,
    pub click: String,
    pub action: String,
    #[serde(flatten)]
    pub arg: ArgConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutostartConfig {
    pub command: Option<String>,
    pub argv: Option<Vec<String>>,
    #[serde(default)]
    pub tags: u32,
    #[serde(default = "default_monitor")]
    pub monitor: i32,
}

fn default_monitor() -> i32 {
    -1
}

impl FileConfig {
    pub fn resolve(self) -> Result<Settings> {
        let defaults = Settings::default();
        let mut engine = defaults.engine;

        let appearance = self.appearance.unwrap_or_default();
        engine.border_px = appearance.border_px;
        engine.snap = appearance.snap;
        engine.show_bar = appearance.show_bar;
        engine.top_bar = appearance.top_bar;
        engine.bar_height = appearance.bar_height;
        engine.fonts = appearance.fonts;
        engine.normal = appearance.normal;
        engine.selected = appearance.selected;

        let layout = self.layout.unwrap_or_default();
        if !(0.05..=0.95).contains(&layout.mfact) {
            bail!("mfact must be within 0.05..=0.95, got {}", layout.mfact);
        }
        engine.mfact = layout.mfact;
        engine.nmaster = layout.nmaster;
        engine.resize_hints = layout.resize_hints;
        engine.lock_fullscreen = layout.lock_fullscreen;

        if let Some(tags) = self.tags {
            if tags.is_empty() || tags.len() > 31 {
                bail!("Between 1 and 31 tags are supported, got {}", tags.len());
            }
            engine.tags = tags;
        }
        if let Some(layouts) = self.layouts {
            if layouts.is_empty() {
                bail!("At least one layout is required");
            }
            engine.layouts = layouts;
        }

        let mut commands: HashMap<String, SpawnCommand> = defaults::commands()
            .into_iter()
            .map(|(name, cmd)| (name.to_string(), cmd))
            .collect();
        if let Some(custom) = self.commands {
            commands = custom;
        }

        let keys = match self.keys {
            Some(keys) => keys
                .iter()
                .map(|k| k.to_binding(&commands, &engine))
                .collect::<Result<Vec<_>>>()?,
            None => defaults::keys(),
        };
        let buttons = match self.buttons {
            Some(buttons) => buttons
                .iter()
                .map(|b| b.to_binding(&commands, &engine))
                .collect::<Result<Vec<_>>>()?,
            None => defaults::buttons(),
        };
        let mut bindings = keys;
        bindings.extend(buttons);

        let autostart = match self.autostart {
            Some(entries) => entries
                .iter()
                .map(|e| e.to_entry(&commands))
                .collect::<Result<Vec<_>>>()?,
            None => defaults.autostart,
        };

        let monitors = match self.monitors {
            Some(screens) if screens.is_empty() => bail!("At least one monitor is required"),
            Some(screens) => screens.iter().map(Rect::from_screen).collect(),
            None => defaults.monitors,
        };

        Ok(Settings {
            engine,
            rules: self.rules.unwrap_or(defaults.rules),
            bindings: BindingTable::new(bindings),
            autostart,
            autostart_timeout: self
                .autostart_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.autostart_timeout),
            status_interval: self
                .status_interval_secs
                .filter(|&secs| secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.status_interval),
            monitors,
        })
    }
}

fn lookup_command(commands: &HashMap<String, SpawnCommand>, name: &str) -> Result<SpawnCommand> {
    commands
        .get(name)
        .cloned()
        .with_context(|| format!("Unknown command: {}", name))
}

impl ArgConfig {
    pub fn to_arg(&self, commands: &HashMap<String, SpawnCommand>) -> Result<Arg> {
        let set = [
            self.mask.is_some(),
            self.tag.is_some(),
            self.int.is_some(),
            self.float.is_some(),
            self.layout.is_some(),
            self.command.is_some(),
            self.argv.is_some(),
            self.shell.is_some(),
        ]
        .iter()
        .filter(|&&s| s)
        .count();
        if set > 1 {
            bail!("Only one argument may be given");
        }

        let arg = if let Some(mask) = self.mask {
            Arg::Mask(mask)
        } else if let Some(tag) = self.tag {
            if !(1..=31).contains(&tag) {
                bail!("Tag number out of range: {}", tag);
            }
            Arg::Mask(1 << (tag - 1))
        } else if let Some(i) = self.int {
            Arg::Int(i)
        } else if let Some(f) = self.float {
            Arg::Float(f)
        } else if let Some(layout) = self.layout {
            Arg::Layout(layout)
        } else if let Some(name) = &self.command {
            Arg::Spawn(lookup_command(commands, name)?)
        } else if let Some(argv) = &self.argv {
            if argv.is_empty() {
                bail!("Empty argv");
            }
            Arg::Spawn(SpawnCommand::new(argv.iter().cloned()))
        } else if let Some(shell) = &self.shell {
            Arg::Spawn(SpawnCommand::shell(shell))
        } else {
            Arg::None
        };

        Ok(match arg {
            Arg::Spawn(mut cmd) => {
                cmd.notify_status |= self.notify_status;
                Arg::Spawn(cmd)
            }
            arg => arg,
        })
    }
}

fn parse_action(name: &str, arg: Arg, engine: &Config) -> Result<(Action, Arg)> {
    let action: Action = name.parse().map_err(anyhow::Error::msg)?;
    match (&action, &arg) {
        (Action::Spawn, Arg::Spawn(_)) => {}
        (Action::Spawn, _) => bail!("spawn needs a command, argv or shell argument"),
        (_, Arg::Spawn(_)) => bail!("{} does not take a command", action),
        (Action::SetLayout, Arg::Layout(index)) if engine.layout(*index).is_none() => {
            bail!("Unknown layout index: {}", index)
        }
        _ => {}
    }
    Ok((action, arg))
}

impl KeyConfig {
    fn to_binding(&self, commands: &HashMap<String, SpawnCommand>, engine: &Config) -> Result<Binding> {
        let (modifiers, key) = keys::parse_chord(&self.key).map_err(anyhow::Error::msg)?;
        let keysym = keys::parse_keysym(key).map_err(anyhow::Error::msg)?;
        let arg = self
            .arg
            .to_arg(commands)
            .with_context(|| format!("In key binding '{}'", self.key))?;
        let (action, arg) = parse_action(&self.action, arg, engine)
            .with_context(|| format!("In key binding '{}'", self.key))?;
        Ok(Binding::key(modifiers, keysym, action, arg))
    }
}

impl ButtonConfig {
    fn to_binding(&self, commands: &HashMap<String, SpawnCommand>, engine: &Config) -> Result<Binding> {
        let (modifiers, button) = keys::parse_chord(&self.button).map_err(anyhow::Error::msg)?;
        let button = keys::parse_button(button).map_err(anyhow::Error::msg)?;
        let click: ClickContext = self.click.parse().map_err(anyhow::Error::msg)?;
        let arg = self
            .arg
            .to_arg(commands)
            .with_context(|| format!("In button binding '{}'", self.button))?;
        let (action, arg) = parse_action(&self.action, arg, engine)
            .with_context(|| format!("In button binding '{}'", self.button))?;
        Ok(Binding::button(click, modifiers, button, action, arg))
    }
}

impl AutostartConfig {
    fn to_entry(&self, commands: &HashMap<String, SpawnCommand>) -> Result<AutostartEntry> {
        let argv = match (&self.command, &self.argv) {
            (Some(_), Some(_)) => bail!("Autostart entry has both command and argv"),
            (Some(name), None) => lookup_command(commands, name)?.argv,
            (None, Some(argv)) => argv.clone(),
            (None, None) => bail!("Autostart entry needs a command or argv"),
        };
        Ok(AutostartEntry::new(argv, self.tags, self.monitor))
    }
}
