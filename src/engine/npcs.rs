use rand::Rng;

use crate::engine::events::{EventBus, GameEvent};
use crate::engine::npc::Npc;
use crate::engine::output::Output;
use crate::engine::roster::{Roster, SuspectFilter};
use crate::world::{Color, Direction, DisplayNames, Gender, NpcData};

#[derive(Debug, PartialEq, Eq)]
pub enum NpcMatch {
    None,
    One(usize),
    Many(Vec<usize>),
}

fn words(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split_whitespace()
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
}

/// Basic full-word overlap scoring on id, name and aliases.
pub fn find_npc_by_words_scored<N: Npc>(roster: &Roster<N>, query: &str) -> NpcMatch {
    let query_words: Vec<String> = words(query).collect();
    if query_words.is_empty() {
        return NpcMatch::None;
    }

    let mut scored: Vec<(usize, usize)> = Vec::new();

    for (idx, npc) in roster.npcs().iter().enumerate() {
        let data = npc.data();
        let mut all_words: Vec<String> = words(&data.name).collect();
        all_words.push(data.id.to_lowercase());
        for alias in &data.aliases {
            all_words.extend(words(alias));
        }

        let score = query_words
            .iter()
            .filter(|qw| all_words.iter().any(|nw| nw == *qw))
            .count();

        if score > 0 {
            scored.push((idx, score));
        }
    }

    let Some(max_score) = scored.iter().map(|(_, s)| *s).max() else {
        return NpcMatch::None;
    };

    let mut best: Vec<usize> = scored
        .into_iter()
        .filter(|(_, s)| *s == max_score)
        .map(|(i, _)| i)
        .collect();

    match best.len() {
        1 => NpcMatch::One(best[0]),
        _ => {
            best.sort_by(|a, b| roster.npcs()[*a].name().cmp(roster.npcs()[*b].name()));
            NpcMatch::Many(best)
        }
    }
}

/// Resolve `query` to one NPC, answering the player when it doesn't.
fn resolve_one<N: Npc>(out: &mut Output, roster: &Roster<N>, query: &str) -> Option<usize> {
    match find_npc_by_words_scored(roster, query) {
        NpcMatch::One(i) => Some(i),
        NpcMatch::Many(_) => {
            out.say("Be more specific.");
            None
        }
        NpcMatch::None => {
            out.say(format!("There is no one called '{}' here.", query.trim()));
            None
        }
    }
}

pub fn handle_talk_to_npc<N: Npc, R: Rng + ?Sized>(
    out: &mut Output,
    roster: &Roster<N>,
    bus: &mut EventBus,
    target_name: &str,
    rng: &mut R,
) {
    let query = target_name.trim();
    if query.is_empty() {
        out.say("Talk to whom?");
        return;
    }

    let Some(idx) = resolve_one(out, roster, query) else {
        return;
    };
    let npc = &roster.npcs()[idx];

    bus.emit(GameEvent::NpcInteractionStarted {
        npc: npc.id().to_string(),
    });

    match roster.get_dialogue_for_npc(idx, rng) {
        Ok(line) => out.speech(npc.name(), line),
        Err(e) => out.event(format!("{} stares at you blankly. ({e})", npc.name())),
    }

    bus.emit(GameEvent::NpcInteractionEnded);
}

pub fn describe_appearance(data: &NpcData, names: &DisplayNames) -> String {
    let a = &data.appearance;
    let who = match a.gender {
        Gender::Man => "He",
        Gender::Woman => "She",
    };
    format!(
        "{} is a {} standing on the {} side of the plaza. {} wears a {} hat, a {} mask, {} clothes and {} shoes, and has {} hair.",
        data.name,
        names.gender(a.gender),
        plaza_side(a.position_from_center),
        who,
        names.color(a.hat),
        names.color(a.mask),
        names.color(a.clothes),
        names.color(a.shoe),
        names.color(a.hair),
    )
}

pub fn plaza_side(d: Direction) -> &'static str {
    match d {
        Direction::Up => "north",
        Direction::Down => "south",
        Direction::Left => "west",
        Direction::Right => "east",
    }
}

/// Examine an NPC: appearance only, no dialogue.
pub fn handle_examine_npc<N: Npc>(
    out: &mut Output,
    roster: &Roster<N>,
    names: &DisplayNames,
    target_name: &str,
) {
    let query = target_name.trim();
    if query.is_empty() {
        out.say("Examine whom?");
        return;
    }
    if let Some(idx) = resolve_one(out, roster, query) {
        out.say(describe_appearance(roster.npcs()[idx].data(), names));
    }
}

/// Accuse an NPC. Returns `Some(was_criminal)` when an accusation was made.
pub fn handle_accuse<N: Npc, R: Rng + ?Sized>(
    out: &mut Output,
    roster: &mut Roster<N>,
    bus: &mut EventBus,
    target_name: &str,
    rng: &mut R,
) -> Option<bool> {
    let query = target_name.trim();
    if query.is_empty() {
        out.say("Accuse whom?");
        return None;
    }

    let idx = resolve_one(out, roster, query)?;
    let was_criminal = match roster.accuse(idx) {
        Ok(b) => b,
        Err(e) => {
            out.event(e.to_string());
            return None;
        }
    };

    let npc = &roster.npcs()[idx];
    out.event(format!("You point at {} and call for the guards.", npc.name()));
    match roster.get_dialogue_for_npc(idx, rng) {
        Ok(line) => out.speech(npc.name(), line),
        Err(e) => out.event(format!("{} says nothing. ({e})", npc.name())),
    }

    bus.emit(GameEvent::NpcAccused {
        npc: npc.id().to_string(),
        was_criminal,
    });
    Some(was_criminal)
}

/// Parse `suspects` arguments: pairs of `<attribute> <value>`.
pub fn parse_suspect_filter(args: &str) -> Result<SuspectFilter, String> {
    let tokens: Vec<String> = words(args).collect();
    let mut filter = SuspectFilter::default();

    if tokens.len() % 2 != 0 {
        return Err("Filters come in pairs, like 'clothes red' or 'gender woman'.".into());
    }

    for pair in tokens.chunks(2) {
        let (attr, value) = (pair[0].as_str(), pair[1].as_str());
        let color = || Color::parse(value).ok_or_else(|| format!("'{value}' is not a color I know."));
        match attr {
            "gender" => {
                filter.gender =
                    Some(Gender::parse(value).ok_or_else(|| format!("'{value}' is not a gender I know."))?)
            }
            "direction" | "side" | "position" => {
                filter.direction = Some(
                    Direction::parse(value).ok_or_else(|| format!("'{value}' is not a direction I know."))?,
                )
            }
            "hat" => filter.hat = Some(color()?),
            "hair" => filter.hair = Some(color()?),
            "mask" => filter.mask = Some(color()?),
            "clothes" | "color" => filter.clothes = Some(color()?),
            "shoe" | "shoes" => filter.shoe = Some(color()?),
            other => return Err(format!("I can't filter by '{other}'.")),
        }
    }

    Ok(filter)
}

pub fn handle_suspects<N: Npc>(out: &mut Output, roster: &Roster<N>, args: &str) {
    let filter = match parse_suspect_filter(args) {
        Ok(f) => f,
        Err(msg) => {
            out.say(msg);
            return;
        }
    };

    let mut names: Vec<&str> = roster.filter(&filter).into_iter().map(|n| n.name()).collect();
    names.sort();

    if names.is_empty() {
        out.say("Nobody matches that description.");
    } else if filter.is_empty() {
        out.say(format!("Suspects: {}.", names.join(", ")));
    } else {
        out.say(format!("Matching suspects: {}.", names.join(", ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissingDialogue;
    use crate::engine::npc::NpcController;
    use crate::world::{DialogueData, LineSet, NpcAppearance};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn npc(id: &str, name: &str, aliases: &[&str], gender: Gender, clothes: Color) -> NpcController {
        NpcController::new(NpcData {
            id: id.into(),
            name: name.into(),
            aliases: aliases.iter().map(|s| s.to_string()).collect(),
            appearance: NpcAppearance {
                hat: Color::Yellow,
                hair: Color::Black,
                mask: Color::White,
                clothes,
                shoe: Color::Black,
                gender,
                position_from_center: Direction::Right,
            },
            sprite: None,
        })
    }

    fn roster(rng: &mut StdRng) -> Roster {
        let mut d = DialogueData::default();
        for role in [&mut d.criminal, &mut d.innocent] {
            for set in [&mut role.man, &mut role.woman] {
                *set = LineSet {
                    inquiry: vec!["Lovely evening.".into()],
                    hinted: vec!["Look for {COLOR}.".into()],
                    accused: vec!["How dare you!".into()],
                };
            }
        }
        let mut r: Roster = Roster::new(Some(d), MissingDialogue::Placeholder, "...");
        r.register(npc("mira", "Mira Vale", &["florist"], Gender::Woman, Color::Red), rng);
        r.register(npc("otto", "Otto Vale", &["baker"], Gender::Man, Color::Blue), rng);
        r.register(npc("ines", "Ines", &[], Gender::Woman, Color::Blue), rng);
        r
    }

    #[test]
    fn matches_by_name_alias_and_id() {
        let mut rng = StdRng::seed_from_u64(2);
        let r = roster(&mut rng);
        assert_eq!(find_npc_by_words_scored(&r, "florist"), NpcMatch::One(0));
        assert_eq!(find_npc_by_words_scored(&r, "OTTO"), NpcMatch::One(1));
        assert_eq!(find_npc_by_words_scored(&r, "ines"), NpcMatch::One(2));
        assert_eq!(find_npc_by_words_scored(&r, "mira vale"), NpcMatch::One(0));
        assert_eq!(find_npc_by_words_scored(&r, "vale"), NpcMatch::Many(vec![0, 1]));
        assert_eq!(find_npc_by_words_scored(&r, "nobody"), NpcMatch::None);
        assert_eq!(find_npc_by_words_scored(&r, "   "), NpcMatch::None);
    }

    #[test]
    fn talking_emits_interaction_events() {
        let mut rng = StdRng::seed_from_u64(2);
        let r = roster(&mut rng);
        let mut bus = EventBus::new();
        let mut out = Output::new();

        handle_talk_to_npc(&mut out, &r, &mut bus, "baker", &mut rng);
        assert_eq!(out.lines(), vec!["Otto Vale: \"Lovely evening.\""]);
        let events: Vec<_> = bus.drain().collect();
        assert_eq!(
            events,
            vec![
                GameEvent::NpcInteractionStarted { npc: "otto".into() },
                GameEvent::NpcInteractionEnded
            ]
        );
    }

    #[test]
    fn ambiguous_or_unknown_targets_do_not_talk() {
        let mut rng = StdRng::seed_from_u64(2);
        let r = roster(&mut rng);
        let mut bus = EventBus::new();

        let mut out = Output::new();
        handle_talk_to_npc(&mut out, &r, &mut bus, "vale", &mut rng);
        assert_eq!(out.lines(), vec!["Be more specific."]);

        let mut out = Output::new();
        handle_talk_to_npc(&mut out, &r, &mut bus, "zed", &mut rng);
        assert!(out.lines()[0].contains("no one called 'zed'"));
        assert!(bus.is_empty());
    }

    #[test]
    fn accusing_reports_and_uses_accused_lines() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut r = roster(&mut rng);
        let mut bus = EventBus::new();
        let guilty_id = r.criminal().unwrap().id().to_string();

        let mut out = Output::new();
        let verdict = handle_accuse(&mut out, &mut r, &mut bus, &guilty_id, &mut rng);
        assert_eq!(verdict, Some(true));
        assert!(out.lines().iter().any(|l| l.ends_with("\"How dare you!\"")));
        assert_eq!(
            bus.pop(),
            Some(GameEvent::NpcAccused {
                npc: guilty_id,
                was_criminal: true
            })
        );
    }

    #[test]
    fn suspect_filters_parse_and_apply() {
        let mut rng = StdRng::seed_from_u64(2);
        let r = roster(&mut rng);

        let f = parse_suspect_filter("gender Woman clothes blue").unwrap();
        assert_eq!(f.gender, Some(Gender::Woman));
        assert_eq!(f.clothes, Some(Color::Blue));

        let mut out = Output::new();
        handle_suspects(&mut out, &r, "gender woman clothes blue");
        assert_eq!(out.lines(), vec!["Matching suspects: Ines."]);

        let mut out = Output::new();
        handle_suspects(&mut out, &r, "");
        assert_eq!(out.lines(), vec!["Suspects: Ines, Mira Vale, Otto Vale."]);

        assert!(parse_suspect_filter("hat").is_err());
        assert!(parse_suspect_filter("hat purple").is_err());
        assert!(parse_suspect_filter("height tall").is_err());
    }

    #[test]
    fn appearance_description_uses_display_names() {
        let mut names = DisplayNames::default();
        names.colors.insert(Color::Red, "scarlet".into());
        let data = npc("mira", "Mira", &[], Gender::Woman, Color::Red);
        let text = describe_appearance(data.data(), &names);
        assert!(text.starts_with("Mira is a woman standing on the east side"));
        assert!(text.contains("scarlet clothes"));
    }
}
