use crate::engine::output::Output;
use crate::world::DialogueData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum DefeatReason {
    WrongSuspect,
    TimeUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Ending {
    Victory,
    Defeat(DefeatReason),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStats {
    pub clear_time_secs: u32,
    pub hints_used: u32,
}

pub fn render_ending(
    out: &mut Output,
    ending: Ending,
    stats: GameStats,
    dialogue: Option<&DialogueData>,
) {
    match ending {
        Ending::Victory => {
            out.title("Case closed");
            let story = dialogue.map(|d| d.victory_story.trim()).unwrap_or("");
            if story.is_empty() {
                out.say("The culprit is led away. The festival goes on.");
            } else {
                out.say(story);
            }
            out.event(format!("ResultTime: {}", stats.clear_time_secs));
            out.event(format!("UseHint: {}", stats.hints_used));
        }
        Ending::Defeat(reason) => {
            out.title("The culprit got away");
            if reason == DefeatReason::TimeUp {
                out.event("Time is up.");
            }
            let story = dialogue.map(|d| d.defeat_story.trim()).unwrap_or("");
            if story.is_empty() {
                out.say("By the time you realize your mistake, the masked thief is long gone.");
            } else {
                out.say(story);
            }
        }
    }
    out.event("Type 'restart' to play again or 'quit' to leave.");
}
