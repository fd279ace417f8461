use crate::world::NpcData;

/// Runtime view of an NPC, as the roster and dialogue lookups see it.
pub trait Npc {
    fn data(&self) -> &NpcData;

    fn is_criminal(&self) -> bool;
    fn set_criminal(&mut self, criminal: bool);

    fn has_received_hint(&self) -> bool;
    fn set_hint_received(&mut self, received: bool);

    fn is_accused(&self) -> bool;
    fn set_accused(&mut self, accused: bool);

    fn id(&self) -> &str {
        &self.data().id
    }

    fn name(&self) -> &str {
        &self.data().name
    }

    /// Clear all three per-session flags.
    fn reset(&mut self) {
        self.set_criminal(false);
        self.set_hint_received(false);
        self.set_accused(false);
    }

    fn state(&self) -> NpcState {
        NpcState {
            criminal: self.is_criminal(),
            hinted: self.has_received_hint(),
            accused: self.is_accused(),
        }
    }
}

/// Snapshot of the three per-session flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NpcState {
    pub criminal: bool,
    pub hinted: bool,
    pub accused: bool,
}

#[derive(Debug, Clone)]
pub struct NpcController {
    data: NpcData,
    criminal: bool,
    hint_received: bool,
    accused: bool,
}

impl NpcController {
    pub fn new(data: NpcData) -> Self {
        Self {
            data,
            criminal: false,
            hint_received: false,
            accused: false,
        }
    }
}

impl Npc for NpcController {
    fn data(&self) -> &NpcData {
        &self.data
    }

    fn is_criminal(&self) -> bool {
        self.criminal
    }

    fn set_criminal(&mut self, criminal: bool) {
        self.criminal = criminal;
    }

    fn has_received_hint(&self) -> bool {
        self.hint_received
    }

    fn set_hint_received(&mut self, received: bool) {
        self.hint_received = received;
    }

    fn is_accused(&self) -> bool {
        self.accused
    }

    fn set_accused(&mut self, accused: bool) {
        self.accused = accused;
    }
}
