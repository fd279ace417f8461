mod clock;
mod dialogue;
mod events;
mod npc;
mod npcs;
mod outcome;
mod output;
mod render;
mod roster;

pub use clock::{Countdown, format_remaining};
pub use dialogue::{Placeholder, describe_combination, replace_placeholders};
pub use events::{EventBus, GameEvent};
pub use npc::{Npc, NpcController, NpcState};
pub use outcome::{DefeatReason, Ending, GameStats, render_ending};
pub use output::{Output, OutputBlock};
pub use render::render_plaza;
pub use roster::{Roster, SuspectFilter};

pub use npcs::{
    NpcMatch, describe_appearance, find_npc_by_words_scored, handle_accuse, handle_examine_npc,
    handle_suspects, handle_talk_to_npc, parse_suspect_filter,
};
