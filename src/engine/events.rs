use std::collections::VecDeque;

use crate::engine::outcome::Ending;

/// Everything one part of the game announces to another.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    GameStart,
    GameEnd(Ending),
    TimeUpdate { remaining_secs: f32 },
    NpcInteractionStarted { npc: String },
    NpcInteractionEnded,
    /// A minigame was cleared; every NPC now speaks from the hinted lines.
    HintReceived,
    NpcAccused { npc: String, was_criminal: bool },
}

/// FIFO queue drained by the session after each command. Handlers may emit
/// follow-up events while the queue is being drained.
#[derive(Debug, Default)]
pub struct EventBus {
    queue: VecDeque<GameEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: GameEvent) {
        tracing::trace!(?event, "event emitted");
        self.queue.push_back(event);
    }

    pub fn pop(&mut self) -> Option<GameEvent> {
        self.queue.pop_front()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}
