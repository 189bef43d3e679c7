use indexmap::IndexMap;

/// Fallback for any type label absent from the table.
pub const DEFAULT_COLOR: &str = "#ccc";

const BUILTIN: &[(&str, &str)] = &[
    ("Électrique", "#FFD700"),
    ("Plante", "#78C850"),
    ("Poison", "#A040A0"),
    ("Feu", "#F08030"),
    ("Eau", "#6890F0"),
    ("Normal", "#A8A878"),
    ("Fée", "#EE99AC"),
    ("Spectre", "#705898"),
    ("Combat", "#C03028"),
    ("Vol", "#A890F0"),
    ("Glace", "#98D8D8"),
    ("Roche", "#B8A038"),
    ("Sol", "#E0C068"),
    ("Psy", "#F85888"),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeColors {
    colors: IndexMap<String, String>,
    default: String,
}

impl TypeColors {
    pub fn builtin() -> Self {
        let colors = BUILTIN
            .iter()
            .map(|(label, color)| (label.to_string(), color.to_string()))
            .collect();
        Self {
            colors,
            default: DEFAULT_COLOR.to_string(),
        }
    }

    /// Builtin table with `overrides` merged on top. Existing labels keep
    /// their position, new labels are appended.
    pub fn with_overrides(overrides: &IndexMap<String, String>, default: Option<&str>) -> Self {
        let mut table = Self::builtin();
        for (label, color) in overrides {
            let label = label.trim();
            let color = color.trim();
            if label.is_empty() || color.is_empty() {
                continue;
            }
            table.colors.insert(label.to_string(), color.to_string());
        }
        if let Some(default) = default.map(str::trim).filter(|d| !d.is_empty()) {
            table.default = default.to_string();
        }
        table
    }

    pub fn color_for(&self, label: &str) -> &str {
        self.colors
            .get(label.trim())
            .map(String::as_str)
            .unwrap_or(&self.default)
    }

    pub fn is_mapped(&self, label: &str) -> bool {
        self.colors.contains_key(label.trim())
    }

    pub fn default_color(&self) -> &str {
        &self.default
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }
}

impl Default for TypeColors {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `#rgb` / `#rrggbb` to an RGB triple, for terminal rendering.
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let expand = |c: char| -> Option<u8> {
        let v = c.to_digit(16)? as u8;
        Some(v * 16 + v)
    };
    match hex.len() {
        3 => {
            let mut chars = hex.chars();
            Some((
                expand(chars.next()?)?,
                expand(chars.next()?)?,
                expand(chars.next()?)?,
            ))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}
