use std::collections::HashSet;

/// Base directory every image key is resolved against.
pub const IMAGE_BASE: &str = "images/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pokemon {
    pub name: String,
    /// Raw comma-separated type field, e.g. `Plante,Poison`.
    pub types: String,
    pub level: Option<u32>,
    pub img: String,
}

impl Pokemon {
    pub fn new(name: &str, types: &str, level: u32, img: &str) -> Self {
        Self {
            name: name.to_string(),
            types: types.to_string(),
            level: Some(level),
            img: img.to_string(),
        }
    }

    /// Type labels in field order, trimmed. A stray comma yields an empty label.
    pub fn types(&self) -> Vec<&str> {
        split_types(&self.types)
    }

    pub fn image_path(&self) -> String {
        format!("{IMAGE_BASE}{}", self.img)
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.types().iter().all(|t| t.is_empty()) {
            missing.push("type");
        }
        if matches!(self.level, None | Some(0)) {
            missing.push("level");
        }
        if self.img.trim().is_empty() {
            missing.push("img");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

pub fn split_types(raw: &str) -> Vec<&str> {
    raw.split(',').map(str::trim).collect()
}

const BUILTIN: &[(&str, &str, u32, &str)] = &[
    ("Pikachu", "Électrique", 35, "pikachu.png"),
    ("Bulbizarre", "Plante,Poison", 15, "bulbizarre.png"),
    ("Salamèche", "Feu", 20, "salameche.png"),
    ("Carapuce", "Eau", 10, "carapuce.png"),
    ("Rondoudou", "Normal,Fée", 25, "rondoudou.png"),
    ("Ectoplasma", "Spectre,Poison", 45, "ectoplasma.png"),
    ("Évoli", "Normal,Combat", 22, "evoli.png"),
    ("Dracaufeu", "Feu,Vol", 50, "dracaufeu.png"),
    ("Florizarre", "Plante,Poison", 55, "florizarre.png"),
    ("Tortank", "Eau", 52, "tortank.png"),
    ("Mélofée", "Fée", 18, "melofee.png"),
    ("Raichu", "Électrique", 40, "raichu.png"),
    ("Magicarpe", "Eau", 5, "magicarpe.png"),
    ("Lokhlass", "Eau,Glace", 35, "lokhlass.png"),
    ("Onix", "Roche,Sol", 30, "onix.png"),
    ("Ronflex", "Normal", 45, "ronflex.png"),
    ("Mewtwo", "Psy", 70, "mewtwo.png"),
];

/// Fixed, ordered record list. Never mutated once built.
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: Vec<Pokemon>,
}

impl Catalog {
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(name, types, level, img)| Pokemon::new(name, types, *level, img))
            .collect();
        Self { entries }
    }

    pub fn from_entries(entries: Vec<Pokemon>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Pokemon] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Pokemon> {
        self.entries.iter().find(|p| p.name == name)
    }

    /// Every type label in first-seen catalog order; feeds the type selector.
    pub fn distinct_types(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .flat_map(|p| p.types())
            .filter(|t| !t.is_empty() && seen.insert(*t))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
