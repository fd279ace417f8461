use super::model::{DialogueData, Gender, LineSet, World};
use crate::engine::Placeholder;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(msg: impl Into<String>) -> Self {
        ValidationError {
            message: msg.into(),
        }
    }
}

pub fn validate_world(world: &World) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    if world.npcs.is_empty() {
        errors.push(ValidationError::new("scenario has no npcs"));
    }

    for npc in &world.npcs {
        if npc.id.trim().is_empty() {
            errors.push(ValidationError::new(format!(
                "npc '{}' has an empty id",
                npc.name
            )));
        }
        for alias in &npc.aliases {
            if alias.trim().is_empty() {
                errors.push(ValidationError::new(format!(
                    "npc '{}' has an empty alias",
                    npc.id
                )));
            }
        }
    }

    // Display names are substituted in a single pass; a brace inside one
    // would read as a placeholder to anyone post-processing the line.
    if let Some(dialogue) = &world.dialogue {
        for name in dialogue.names.all_values() {
            if name.contains('{') || name.contains('}') {
                errors.push(ValidationError::new(format!(
                    "display name '{}' may not contain braces",
                    name
                )));
            }
        }
    }

    errors
}

/// Non-fatal authoring problems: empty line lists and unknown placeholders.
pub fn dialogue_warnings(dialogue: &DialogueData) -> Vec<String> {
    let mut warnings: Vec<String> = Vec::new();

    for (role, lines) in [("criminal", &dialogue.criminal), ("innocent", &dialogue.innocent)] {
        for gender in [Gender::Man, Gender::Woman] {
            check_line_set(
                lines.for_gender(gender),
                &format!("{}.{}", role, gender.key()),
                &mut warnings,
            );
        }
    }

    warnings
}

fn check_line_set(set: &LineSet, label: &str, warnings: &mut Vec<String>) {
    for (stage, lines) in [
        ("inquiry", &set.inquiry),
        ("hinted", &set.hinted),
        ("accused", &set.accused),
    ] {
        if lines.is_empty() {
            warnings.push(format!("dialogue.{}.{} has no lines", label, stage));
        }

        for line in lines {
            for token in Placeholder::unknown_tokens(line) {
                warnings.push(format!(
                    "dialogue.{}.{} uses unknown placeholder {{{}}}",
                    label, stage, token
                ));
            }
        }
    }
}
