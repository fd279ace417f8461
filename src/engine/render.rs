use crate::engine::npc::Npc;
use crate::engine::npcs::plaza_side;
use crate::engine::output::Output;
use crate::engine::roster::Roster;
use crate::world::{Direction, DisplayNames};

/// Describe the plaza: who stands on which side, with the one detail the
/// eye catches first (clothes).
pub fn render_plaza<N: Npc>(out: &mut Output, title: &str, roster: &Roster<N>, names: &DisplayNames) {
    out.title(title);

    if roster.is_empty() {
        out.say("The plaza is empty.");
        return;
    }

    for side in Direction::ALL {
        let mut here: Vec<String> = roster
            .by_direction(side)
            .into_iter()
            .map(|n| {
                let marker = if n.is_accused() { ", accused" } else { "" };
                format!(
                    "{} ({} clothes{})",
                    n.name(),
                    names.color(n.data().appearance.clothes),
                    marker
                )
            })
            .collect();

        if here.is_empty() {
            continue;
        }
        here.sort();

        out.say(format!("On the {} side: {}.", plaza_side(side), here.join(", ")));
    }
}
