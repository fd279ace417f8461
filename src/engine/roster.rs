use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::MissingDialogue;
use crate::engine::dialogue::describe_combination;
use crate::engine::npc::{Npc, NpcController};
use crate::error::{GameError, Result};
use crate::world::{Color, DialogueData, Direction, Gender, NpcAppearance};

/// Every NPC in the current session, who among them is the criminal, and the
/// dialogue table they speak from.
pub struct Roster<N: Npc = NpcController> {
    npcs: Vec<N>,
    dialogue: Option<DialogueData>,
    missing_dialogue: MissingDialogue,
    placeholder: String,
}

/// Attribute filter for narrowing down suspects. `None` fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuspectFilter {
    pub gender: Option<Gender>,
    pub direction: Option<Direction>,
    pub hat: Option<Color>,
    pub hair: Option<Color>,
    pub mask: Option<Color>,
    pub clothes: Option<Color>,
    pub shoe: Option<Color>,
}

impl SuspectFilter {
    pub fn matches(&self, a: &NpcAppearance) -> bool {
        fn ok<T: PartialEq>(want: &Option<T>, have: &T) -> bool {
            want.as_ref().is_none_or(|w| w == have)
        }
        ok(&self.gender, &a.gender)
            && ok(&self.direction, &a.position_from_center)
            && ok(&self.hat, &a.hat)
            && ok(&self.hair, &a.hair)
            && ok(&self.mask, &a.mask)
            && ok(&self.clothes, &a.clothes)
            && ok(&self.shoe, &a.shoe)
    }

    pub fn is_empty(&self) -> bool {
        *self == SuspectFilter::default()
    }
}

impl<N: Npc> Roster<N> {
    pub fn new(
        dialogue: Option<DialogueData>,
        missing_dialogue: MissingDialogue,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            npcs: Vec::new(),
            dialogue,
            missing_dialogue,
            placeholder: placeholder.into(),
        }
    }

    /// Append `npc` unless an NPC with the same id is already registered.
    /// The first successful registration with no criminal picked yet rolls one.
    pub fn register<R: Rng + ?Sized>(&mut self, npc: N, rng: &mut R) -> bool {
        if self.index_of(npc.id()).is_some() {
            return false;
        }

        debug!(npc = %npc.id(), "npc registered");
        self.npcs.push(npc);

        if self.criminal_index().is_none() {
            debug!("no criminal yet, rolling one");
            self.randomize_criminal(rng);
        }
        true
    }

    /// Clear every criminal flag, then flag one NPC picked uniformly at random.
    pub fn randomize_criminal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        if self.npcs.is_empty() {
            warn!("no npcs registered, cannot pick a criminal");
            return None;
        }

        for npc in &mut self.npcs {
            npc.set_criminal(false);
        }

        let idx = rng.gen_range(0..self.npcs.len());
        self.npcs[idx].set_criminal(true);
        info!(npc = %self.npcs[idx].id(), index = idx, "criminal chosen");
        Some(idx)
    }

    pub fn criminal_index(&self) -> Option<usize> {
        self.npcs.iter().position(|n| n.is_criminal())
    }

    pub fn criminal(&self) -> Option<&N> {
        self.npcs.iter().find(|n| n.is_criminal())
    }

    pub fn get(&self, index: usize) -> Option<&N> {
        self.npcs.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.npcs.iter().position(|n| n.id() == id)
    }

    pub fn npcs(&self) -> &[N] {
        &self.npcs
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }

    pub fn dialogue(&self) -> Option<&DialogueData> {
        self.dialogue.as_ref()
    }

    /// The line NPC `index` says right now, given its flags and the
    /// criminal's appearance. The registry index doubles as the line index.
    pub fn get_dialogue_for_npc<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> Result<String> {
        let npc = self.npcs.get(index).ok_or(GameError::UnknownNpc(index))?;

        let Some(dialogue) = &self.dialogue else {
            return self.missing(GameError::NoDialogueTable);
        };

        let state = npc.state();
        let gender = npc.data().appearance.gender;

        let criminal_appearance = match self.criminal() {
            Some(c) => Some(&c.data().appearance),
            None => {
                warn!("no criminal chosen yet, dialogue placeholders stay unresolved");
                None
            }
        };

        debug!(
            npc = %npc.id(),
            criminal = state.criminal,
            hinted = state.hinted,
            accused = state.accused,
            gender = gender.key(),
            "resolving dialogue"
        );

        match dialogue.get_dialogue(state, gender, index, criminal_appearance, rng) {
            Some(line) => Ok(line),
            None => self.missing(GameError::MissingDialogue {
                context: describe_combination(state, gender),
            }),
        }
    }

    fn missing(&self, err: GameError) -> Result<String> {
        match self.missing_dialogue {
            MissingDialogue::Placeholder => {
                warn!("{err}; showing placeholder");
                Ok(self.placeholder.clone())
            }
            MissingDialogue::Error => Err(err),
        }
    }

    pub fn set_all_hints_received(&mut self, received: bool) {
        for npc in &mut self.npcs {
            npc.set_hint_received(received);
        }
    }

    /// Flag NPC `index` as accused; returns whether it is the criminal.
    pub fn accuse(&mut self, index: usize) -> Result<bool> {
        let npc = self.npcs.get_mut(index).ok_or(GameError::UnknownNpc(index))?;
        npc.set_accused(true);
        Ok(npc.is_criminal())
    }

    /// Clear all per-session flags, criminal included.
    pub fn reset_session(&mut self) {
        for npc in &mut self.npcs {
            npc.reset();
        }
    }

    /// NPCs whose appearance matches `target` on every attribute.
    pub fn by_appearance(&self, target: &NpcAppearance) -> Vec<&N> {
        self.npcs
            .iter()
            .filter(|n| &n.data().appearance == target)
            .collect()
    }

    pub fn by_gender(&self, gender: Gender) -> Vec<&N> {
        self.filter(&SuspectFilter {
            gender: Some(gender),
            ..Default::default()
        })
    }

    pub fn by_direction(&self, direction: Direction) -> Vec<&N> {
        self.filter(&SuspectFilter {
            direction: Some(direction),
            ..Default::default()
        })
    }

    pub fn by_clothes_color(&self, color: Color) -> Vec<&N> {
        self.filter(&SuspectFilter {
            clothes: Some(color),
            ..Default::default()
        })
    }

    pub fn filter(&self, filter: &SuspectFilter) -> Vec<&N> {
        self.npcs
            .iter()
            .filter(|n| filter.matches(&n.data().appearance))
            .collect()
    }
}
