use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::model::{
    Color, DialogueData, Direction, DisplayNames, Gender, LineSet, NpcAppearance, NpcData,
    RoleLines, World,
};
use super::validator::{dialogue_warnings, validate_world};
use crate::config::Settings;
use crate::error::{GameError, Result};

////////////////////
/// TOML STRUCTS ///
////////////////////

#[derive(Deserialize)]
struct ScenarioFile {
    scenario: ScenarioHeader,
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    npc: Vec<NpcConfig>, // [[npc]] blocks
    #[serde(default)]
    dialogue: Option<DialogueConfig>,
}

#[derive(Deserialize)]
struct ScenarioHeader {
    id: String,
    name: String,
    #[serde(default)]
    desc: String,
}

#[derive(Deserialize)]
struct NpcConfig {
    id: String,
    name: String,
    hat: String,
    hair: String,
    mask: String,
    clothes: String,
    shoe: String,
    gender: String,

    /// Position relative to the plaza center: "up", "down", "left", "right".
    position: String,

    #[serde(default)]
    sprite: Option<String>,
}

#[derive(Deserialize, Default)]
struct DialogueConfig {
    #[serde(default)]
    opening_story: String,
    #[serde(default)]
    victory_story: String,
    #[serde(default)]
    defeat_story: String,
    #[serde(default)]
    criminal: RoleConfig, // [dialogue.criminal.man] / [dialogue.criminal.woman]
    #[serde(default)]
    innocent: RoleConfig,
    #[serde(default)]
    names: NamesConfig,
}

#[derive(Deserialize, Default)]
struct RoleConfig {
    #[serde(default)]
    man: LineSetConfig,
    #[serde(default)]
    woman: LineSetConfig,
}

#[derive(Deserialize, Default)]
struct LineSetConfig {
    #[serde(default)]
    inquiry: Vec<String>,
    #[serde(default)]
    hinted: Vec<String>,
    #[serde(default)]
    accused: Vec<String>,
}

#[derive(Deserialize, Default)]
struct NamesConfig {
    #[serde(default)]
    colors: HashMap<String, String>,
    #[serde(default)]
    genders: HashMap<String, String>,
    #[serde(default)]
    directions: HashMap<String, String>,
}

/////////////////////////////
/// TOML PARSER FUNCTIONS ///
/////////////////////////////

/// Public API: load a scenario from a .toml file on disk.
pub fn load_world_from_file(path: &Path) -> Result<World> {
    let contents = fs::read_to_string(path)?;
    load_world_from_str(&contents)
}

/// Public API: load a scenario from TOML text.
pub fn load_world_from_str(contents: &str) -> Result<World> {
    let file: ScenarioFile = toml::from_str(contents)?;

    if file.scenario.id.trim().is_empty() {
        return Err(GameError::Invalid("scenario.id may not be empty".into()));
    }
    if file.settings.time_limit_secs < 0.0 || !file.settings.time_limit_secs.is_finite() {
        return Err(GameError::Invalid(format!(
            "settings.time_limit_secs must be a non-negative number, got {}",
            file.settings.time_limit_secs
        )));
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut npcs: Vec<NpcData> = Vec::with_capacity(file.npc.len());

    for nc in file.npc {
        if !seen.insert(nc.id.clone()) {
            return Err(GameError::Invalid(format!("Duplicate npc id: {}", nc.id)));
        }
        npcs.push(build_npc(nc)?);
    }

    let dialogue = file.dialogue.map(build_dialogue).transpose()?;

    let world = World {
        id: file.scenario.id,
        name: file.scenario.name,
        desc: normalize_multiline_desc(&file.scenario.desc),
        settings: file.settings,
        npcs,
        dialogue,
    };

    let errors = validate_world(&world);
    if !errors.is_empty() {
        return Err(GameError::Validation(errors));
    }

    match &world.dialogue {
        Some(d) => {
            for w in dialogue_warnings(d) {
                warn!("{w}");
            }
        }
        None => warn!(scenario = %world.id, "scenario has no [dialogue] table"),
    }

    debug!(scenario = %world.id, npcs = world.npcs.len(), "scenario loaded");
    Ok(world)
}

fn build_npc(nc: NpcConfig) -> Result<NpcData> {
    let (primary_name, aliases) = parse_name_and_aliases(&nc.name);
    if primary_name.trim().is_empty() {
        return Err(GameError::Invalid(format!("NPC '{}' has an empty name", nc.id)));
    }

    let field = |label: &str, raw: &str| -> Result<Color> {
        Color::parse(raw).ok_or_else(|| {
            GameError::Invalid(format!(
                "NPC '{}' {label} '{raw}' is not one of: {}",
                nc.id,
                Color::ALL.map(Color::key).join(", ")
            ))
        })
    };

    let appearance = NpcAppearance {
        hat: field("hat", &nc.hat)?,
        hair: field("hair", &nc.hair)?,
        mask: field("mask", &nc.mask)?,
        clothes: field("clothes", &nc.clothes)?,
        shoe: field("shoe", &nc.shoe)?,
        gender: Gender::parse(&nc.gender).ok_or_else(|| {
            GameError::Invalid(format!(
                "NPC '{}' gender '{}': expected 'man' or 'woman'",
                nc.id, nc.gender
            ))
        })?,
        position_from_center: Direction::parse(&nc.position).ok_or_else(|| {
            GameError::Invalid(format!(
                "NPC '{}' position '{}': expected 'up', 'down', 'left' or 'right'",
                nc.id, nc.position
            ))
        })?,
    };

    Ok(NpcData {
        id: nc.id,
        name: primary_name,
        aliases,
        appearance,
        sprite: nc.sprite,
    })
}

fn build_dialogue(dc: DialogueConfig) -> Result<DialogueData> {
    Ok(DialogueData {
        opening_story: normalize_multiline_desc(&dc.opening_story),
        victory_story: normalize_multiline_desc(&dc.victory_story),
        defeat_story: normalize_multiline_desc(&dc.defeat_story),
        criminal: build_role(dc.criminal),
        innocent: build_role(dc.innocent),
        names: build_names(dc.names)?,
    })
}

fn build_role(rc: RoleConfig) -> RoleLines {
    RoleLines {
        man: build_line_set(rc.man),
        woman: build_line_set(rc.woman),
    }
}

fn build_line_set(lc: LineSetConfig) -> LineSet {
    let norm = |v: Vec<String>| -> Vec<String> {
        v.iter()
            .map(|s| normalize_multiline_desc(s))
            .filter(|s| !s.is_empty())
            .collect()
    };
    LineSet {
        inquiry: norm(lc.inquiry),
        hinted: norm(lc.hinted),
        accused: norm(lc.accused),
    }
}

fn build_names(nc: NamesConfig) -> Result<DisplayNames> {
    let mut names = DisplayNames::default();

    for (k, v) in nc.colors {
        let c = Color::parse(&k)
            .ok_or_else(|| GameError::Invalid(format!("dialogue.names.colors: unknown color '{k}'")))?;
        names.colors.insert(c, v);
    }
    for (k, v) in nc.genders {
        let g = Gender::parse(&k)
            .ok_or_else(|| GameError::Invalid(format!("dialogue.names.genders: unknown gender '{k}'")))?;
        names.genders.insert(g, v);
    }
    for (k, v) in nc.directions {
        let d = Direction::parse(&k).ok_or_else(|| {
            GameError::Invalid(format!("dialogue.names.directions: unknown direction '{k}'"))
        })?;
        names.directions.insert(d, v);
    }

    Ok(names)
}

fn normalize_multiline_desc(raw: &str) -> String {
    let mut result = String::new();
    let mut pending_blank_lines = 0usize;
    let mut first_text_seen = false;

    for line in raw.lines() {
        // Indentation in TOML must not leak into what the player sees.
        let trimmed = line.trim();

        if trimmed.is_empty() {
            pending_blank_lines += 1;
            continue;
        }

        if !first_text_seen {
            result.push_str(trimmed);
            first_text_seen = true;
        } else {
            match pending_blank_lines {
                // wrapped line
                0 => {
                    result.push(' ');
                    result.push_str(trimmed);
                }
                1 => {
                    result.push('\n');
                    result.push_str(trimmed);
                }
                // paragraph break
                _ => {
                    result.push_str("\n\n");
                    result.push_str(trimmed);
                }
            }
        }

        pending_blank_lines = 0;
    }

    result
}

fn parse_name_and_aliases(raw: &str) -> (String, Vec<String>) {
    // Split on | and keep non-empty trimmed parts
    let parts: Vec<String> = raw
        .split('|')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect();

    if parts.is_empty() {
        return (String::new(), Vec::new());
    }

    let primary = parts[0].clone();
    let aliases = parts.into_iter().skip(1).collect();
    (primary, aliases)
}
