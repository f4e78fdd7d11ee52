//! X11-compatible modifier masks and keysyms, and their textual names.

pub const SHIFT: u32 = 1 << 0;
pub const LOCK: u32 = 1 << 1;
pub const CONTROL: u32 = 1 << 2;
pub const MOD1: u32 = 1 << 3;
pub const MOD2: u32 = 1 << 4;
pub const MOD3: u32 = 1 << 5;
pub const MOD4: u32 = 1 << 6;
pub const MOD5: u32 = 1 << 7;

pub const NUMLOCK: u32 = MOD2;

/// Strip lock modifiers and anything that is not a real modifier bit.
pub fn clean_mask(mask: u32) -> u32 {
    mask & !(LOCK | NUMLOCK) & (SHIFT | CONTROL | MOD1 | MOD3 | MOD4 | MOD5)
}

pub mod keysym {
    pub const SPACE: u32 = 0x0020;
    pub const COMMA: u32 = 0x002c;
    pub const PERIOD: u32 = 0x002e;
    pub const KEY_0: u32 = 0x0030;
    pub const KEY_1: u32 = 0x0031;
    pub const TAB: u32 = 0xff09;
    pub const RETURN: u32 = 0xff0d;
    pub const XF86_MON_BRIGHTNESS_UP: u32 = 0x1008_ff02;
    pub const XF86_MON_BRIGHTNESS_DOWN: u32 = 0x1008_ff03;
    pub const XF86_AUDIO_LOWER_VOLUME: u32 = 0x1008_ff11;
    pub const XF86_AUDIO_MUTE: u32 = 0x1008_ff12;
    pub const XF86_AUDIO_RAISE_VOLUME: u32 = 0x1008_ff13;

    /// Keysym of a lowercase ASCII letter or digit.
    pub const fn ascii(c: char) -> u32 {
        c as u32
    }
}

const NAMED_KEYS: &[(&str, u32)] = &[
    ("space", keysym::SPACE),
    ("comma", keysym::COMMA),
    ("period", keysym::PERIOD),
    ("minus", 0x002d),
    ("equal", 0x003d),
    ("slash", 0x002f),
    ("semicolon", 0x003b),
    ("apostrophe", 0x0027),
    ("grave", 0x0060),
    ("bracketleft", 0x005b),
    ("bracketright", 0x005d),
    ("backslash", 0x005c),
    ("BackSpace", 0xff08),
    ("Tab", keysym::TAB),
    ("Return", keysym::RETURN),
    ("Escape", 0xff1b),
    ("Delete", 0xffff),
    ("Home", 0xff50),
    ("Left", 0xff51),
    ("Up", 0xff52),
    ("Right", 0xff53),
    ("Down", 0xff54),
    ("Prior", 0xff55),
    ("Next", 0xff56),
    ("End", 0xff57),
    ("Print", 0xff61),
    ("F1", 0xffbe),
    ("F2", 0xffbf),
    ("F3", 0xffc0),
    ("F4", 0xffc1),
    ("F5", 0xffc2),
    ("F6", 0xffc3),
    ("F7", 0xffc4),
    ("F8", 0xffc5),
    ("F9", 0xffc6),
    ("F10", 0xffc7),
    ("F11", 0xffc8),
    ("F12", 0xffc9),
    ("XF86MonBrightnessUp", keysym::XF86_MON_BRIGHTNESS_UP),
    ("XF86MonBrightnessDown", keysym::XF86_MON_BRIGHTNESS_DOWN),
    ("XF86AudioLowerVolume", keysym::XF86_AUDIO_LOWER_VOLUME),
    ("XF86AudioMute", keysym::XF86_AUDIO_MUTE),
    ("XF86AudioRaiseVolume", keysym::XF86_AUDIO_RAISE_VOLUME),
    ("XF86AudioPlay", 0x1008_ff14),
    ("XF86AudioStop", 0x1008_ff15),
    ("XF86AudioPrev", 0x1008_ff16),
    ("XF86AudioNext", 0x1008_ff17),
];

pub fn parse_keysym(name: &str) -> Result<u32, String> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphanumeric() {
            return Ok(keysym::ascii(c.to_ascii_lowercase()));
        }
    }
    NAMED_KEYS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, sym)| sym)
        .ok_or_else(|| format!("Unknown key: {}", name))
}

pub fn keysym_name(sym: u32) -> String {
    if let Some(c) = char::from_u32(sym).filter(|c| c.is_ascii_alphanumeric()) {
        return c.to_string();
    }
    NAMED_KEYS
        .iter()
        .find(|&&(_, s)| s == sym)
        .map(|(n, _)| n.to_string())
        .unwrap_or_else(|| format!("{:#x}", sym))
}

pub fn parse_modifier(name: &str) -> Result<u32, String> {
    match name.to_lowercase().as_str() {
        "super" | "mod4" | "win" => Ok(MOD4),
        "alt" | "mod1" => Ok(MOD1),
        "ctrl" | "control" => Ok(CONTROL),
        "shift" => Ok(SHIFT),
        "mod3" => Ok(MOD3),
        "mod5" => Ok(MOD5),
        _ => Err(format!("Unknown modifier: {}", name)),
    }
}

pub fn format_modifiers(mask: u32) -> Vec<&'static str> {
    let mut parts = Vec::new();
    if mask & MOD4 != 0 {
        parts.push("super");
    }
    if mask & MOD1 != 0 {
        parts.push("alt");
    }
    if mask & CONTROL != 0 {
        parts.push("ctrl");
    }
    if mask & SHIFT != 0 {
        parts.push("shift");
    }
    if mask & MOD3 != 0 {
        parts.push("mod3");
    }
    if mask & MOD5 != 0 {
        parts.push("mod5");
    }
    parts
}

pub fn parse_button(name: &str) -> Result<u32, String> {
    name.to_lowercase()
        .strip_prefix("button")
        .and_then(|n| n.parse::<u32>().ok())
        .filter(|n| (1..=9).contains(n))
        .ok_or_else(|| format!("Unknown button: {}", name))
}

/// Split `super-shift-Return` into a modifier mask and the final key or button name.
pub fn parse_chord(chord: &str) -> Result<(u32, &str), String> {
    let parts: Vec<&str> = chord.split('-').collect();
    let Some((key, modifiers)) = parts.split_last() else {
        return Err("Empty key string".to_string());
    };
    if key.is_empty() {
        return Err(format!("Missing key in '{}'", chord));
    }

    let mut mask = 0;
    for part in modifiers {
        mask |= parse_modifier(part)?;
    }
    Ok((mask, key))
}
