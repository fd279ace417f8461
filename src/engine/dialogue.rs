//! Line selection and placeholder substitution over an authored
//! [`DialogueData`] table.
//!
//! A line is chosen along four dimensions: criminal or innocent, the
//! conversation stage (inquiry, hinted, accused) and the speaker's gender.
//! Within the chosen list the caller's index picks the line; an index that
//! falls outside the list picks one at random instead.

use rand::Rng;

use crate::engine::npc::NpcState;
use crate::world::{DialogueData, DisplayNames, Gender, NpcAppearance};

/// Tokens recognized inside dialogue lines, written as `{TOKEN}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    ClothesColor,
    MaskColor,
    HairColor,
    HatColor,
    ShoeColor,
    /// Shorthand for the clothes color.
    Color,
    Gender,
    Direction,
}

impl Placeholder {
    pub fn from_token(token: &str) -> Option<Placeholder> {
        Some(match token {
            "CLOTHES_COLOR" => Placeholder::ClothesColor,
            "MASK_COLOR" => Placeholder::MaskColor,
            "HAIR_COLOR" => Placeholder::HairColor,
            "HAT_COLOR" => Placeholder::HatColor,
            "SHOE_COLOR" => Placeholder::ShoeColor,
            "COLOR" => Placeholder::Color,
            "GENDER" => Placeholder::Gender,
            "DIRECTION" => Placeholder::Direction,
            _ => return None,
        })
    }

    fn resolve<'a>(self, a: &NpcAppearance, names: &'a DisplayNames) -> &'a str {
        match self {
            Placeholder::ClothesColor | Placeholder::Color => names.color(a.clothes),
            Placeholder::MaskColor => names.color(a.mask),
            Placeholder::HairColor => names.color(a.hair),
            Placeholder::HatColor => names.color(a.hat),
            Placeholder::ShoeColor => names.color(a.shoe),
            Placeholder::Gender => names.gender(a.gender),
            Placeholder::Direction => names.direction(a.position_from_center),
        }
    }

    /// Brace-delimited tokens in `text` that are not recognized placeholders.
    pub fn unknown_tokens(text: &str) -> Vec<&str> {
        let mut unknown = Vec::new();
        scan(text, |piece| {
            if let Piece::Token(t) = piece {
                if Placeholder::from_token(t).is_none() {
                    unknown.push(t);
                }
            }
        });
        unknown
    }
}

enum Piece<'a> {
    Literal(&'a str),
    Token(&'a str),
}

/// Split `text` into literal runs and `{TOKEN}` bodies, left to right.
/// An opening brace without a closing one is literal.
fn scan<'a>(text: &'a str, mut f: impl FnMut(Piece<'a>)) {
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        // a nested '{' restarts the token at the inner brace
        if let Some(inner) = after[..close].rfind('{') {
            f(Piece::Literal(&rest[..open + 1 + inner]));
            rest = &rest[open + 1 + inner..];
            continue;
        }
        if open > 0 {
            f(Piece::Literal(&rest[..open]));
        }
        f(Piece::Token(&after[..close]));
        rest = &after[close + 1..];
    }
    if !rest.is_empty() {
        f(Piece::Literal(rest));
    }
}

/// Replace every recognized placeholder with the appearance value's
/// display name. Unrecognized tokens are copied through unchanged.
pub fn replace_placeholders(text: &str, appearance: &NpcAppearance, names: &DisplayNames) -> String {
    let mut out = String::with_capacity(text.len());
    scan(text, |piece| match piece {
        Piece::Literal(s) => out.push_str(s),
        Piece::Token(t) => match Placeholder::from_token(t) {
            Some(p) => out.push_str(p.resolve(appearance, names)),
            None => {
                out.push('{');
                out.push_str(t);
                out.push('}');
            }
        },
    });
    out
}

impl DialogueData {
    /// The authored list for one combination of state and speaker gender.
    /// Accusation takes precedence over the hint stage.
    pub fn lines_for(&self, state: NpcState, gender: Gender) -> &[String] {
        let role = if state.criminal {
            &self.criminal
        } else {
            &self.innocent
        };
        let set = role.for_gender(gender);

        if state.accused {
            &set.accused
        } else if state.hinted {
            &set.hinted
        } else {
            &set.inquiry
        }
    }

    /// Returns `None` when the selected list is empty.
    pub fn get_dialogue<R: Rng + ?Sized>(
        &self,
        state: NpcState,
        gender: Gender,
        index: usize,
        criminal_appearance: Option<&NpcAppearance>,
        rng: &mut R,
    ) -> Option<String> {
        let lines = self.lines_for(state, gender);
        if lines.is_empty() {
            return None;
        }

        let index = if index < lines.len() {
            index
        } else {
            rng.gen_range(0..lines.len())
        };

        let line = &lines[index];
        Some(match criminal_appearance {
            Some(a) => replace_placeholders(line, a, &self.names),
            None => line.clone(),
        })
    }
}

/// Human-readable label for a state combination, used in logs and errors.
pub fn describe_combination(state: NpcState, gender: Gender) -> String {
    let role = if state.criminal { "criminal" } else { "innocent" };
    let stage = if state.accused {
        "accused"
    } else if state.hinted {
        "hinted"
    } else {
        "inquiry"
    };
    format!("{role}.{}.{stage}", gender.key())
}
