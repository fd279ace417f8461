use rand::SeedableRng;
use rand::rngs::StdRng;

use whodunit::engine::{DefeatReason, Ending, Npc, OutputBlock};
use whodunit::{GameSession, Phase, load_world_from_str};

const PLAZA: &str = r#"
[scenario]
id = "plaza"
name = "Test Plaza"
desc = "Three guests, one thief."

[settings]
time_limit_secs = 60

[[npc]]
id = "ann"
name = "Ann"
hat = "black"
hair = "yellow"
mask = "white"
clothes = "red"
shoe = "black"
gender = "woman"
position = "up"

[[npc]]
id = "ben"
name = "Ben"
hat = "white"
hair = "black"
mask = "green"
clothes = "blue"
shoe = "white"
gender = "man"
position = "left"

[[npc]]
id = "cleo"
name = "Cleo"
hat = "red"
hair = "red"
mask = "blue"
clothes = "green"
shoe = "yellow"
gender = "woman"
position = "right"

[dialogue]
opening_story = "Find the thief."
victory_story = "Justice is served."
defeat_story = "The thief slipped away."

[dialogue.criminal.man]
inquiry = ["criminal inquiry"]
hinted = ["criminal hinted"]
accused = ["criminal accused"]

[dialogue.criminal.woman]
inquiry = ["criminal inquiry"]
hinted = ["criminal hinted"]
accused = ["criminal accused"]

[dialogue.innocent.man]
inquiry = ["innocent inquiry"]
hinted = ["the thief wore {CLOTHES_COLOR}"]
accused = ["innocent accused"]

[dialogue.innocent.woman]
inquiry = ["innocent inquiry"]
hinted = ["the thief wore {CLOTHES_COLOR}"]
accused = ["innocent accused"]
"#;

fn session(seed: u64) -> GameSession {
    let world = load_world_from_str(PLAZA).unwrap();
    let mut s = GameSession::with_rng(world, StdRng::seed_from_u64(seed));
    s.initialize();
    s
}

fn criminal_id(s: &GameSession) -> String {
    s.roster().criminal().unwrap().id().to_string()
}

fn innocent_id(s: &GameSession) -> String {
    s.roster()
        .npcs()
        .iter()
        .find(|n| !n.is_criminal())
        .unwrap()
        .id()
        .to_string()
}

fn run(s: &mut GameSession, input: &str) -> Vec<String> {
    let (out, quit) = s.step(input);
    assert!(!quit);
    out.lines()
}

#[test]
fn initialize_shows_opening_and_status_last() {
    let world = load_world_from_str(PLAZA).unwrap();
    let mut s = GameSession::with_rng(world, StdRng::seed_from_u64(1));
    let out = s.initialize();

    let lines = out.lines();
    assert_eq!(lines[0], "Welcome to Test Plaza!");
    assert!(lines.contains(&"Find the thief.".to_string()));
    assert!(matches!(
        out.blocks.last(),
        Some(OutputBlock::Status(s)) if s == "Time 01:00"
    ));
    assert_eq!(s.phase(), Phase::Investigating);
}

#[test]
fn exactly_one_criminal_after_start() {
    let s = session(7);
    let criminals = s.roster().npcs().iter().filter(|n| n.is_criminal()).count();
    assert_eq!(criminals, 1);
}

#[test]
fn accusing_the_criminal_wins_with_stats() {
    let mut s = session(3);
    s.advance_time(12.5);
    let target = criminal_id(&s);

    let lines = run(&mut s, &format!("accuse {target}"));

    assert_eq!(s.phase(), Phase::Over(Ending::Victory));
    assert!(lines.iter().any(|l| l.ends_with("\"criminal accused\"")));
    assert!(lines.contains(&"Justice is served.".to_string()));
    assert!(lines.contains(&"ResultTime: 12".to_string()));
    assert!(lines.contains(&"UseHint: 0".to_string()));
}

#[test]
fn accusing_an_innocent_loses() {
    let mut s = session(3);
    let target = innocent_id(&s);

    let lines = run(&mut s, &format!("accuse {target}"));

    assert_eq!(
        s.phase(),
        Phase::Over(Ending::Defeat(DefeatReason::WrongSuspect))
    );
    assert!(lines.iter().any(|l| l.ends_with("\"innocent accused\"")));
    assert!(lines.contains(&"The thief slipped away.".to_string()));
    assert!(!lines.iter().any(|l| l.starts_with("ResultTime")));
}

#[test]
fn running_out_of_time_loses() {
    let mut s = session(5);
    assert!(s.advance_time(30.0).lines().is_empty());
    assert!(!s.is_over());

    let lines = s.advance_time(31.0).lines();
    assert_eq!(s.phase(), Phase::Over(Ending::Defeat(DefeatReason::TimeUp)));
    assert!(lines.contains(&"Time is up.".to_string()));

    // further ticks do not end the game twice
    assert!(s.advance_time(10.0).lines().is_empty());
}

#[test]
fn hints_unlock_placeholder_lines() {
    let mut s = session(11);
    let witness = innocent_id(&s);
    let thief_clothes = s
        .roster()
        .criminal()
        .unwrap()
        .data()
        .appearance
        .clothes
        .key();

    let before = run(&mut s, &format!("talk to {witness}"));
    assert!(before[0].ends_with("\"innocent inquiry\""));

    let hint = run(&mut s, "hint");
    assert!(hint.iter().any(|l| l.contains("remembers more")));
    assert_eq!(s.hints_used(), 1);

    let after = run(&mut s, &format!("talk {witness}"));
    assert!(after[0].ends_with(&format!("\"the thief wore {thief_clothes}\"")));

    let target = criminal_id(&s);
    let lines = run(&mut s, &format!("accuse {target}"));
    assert!(lines.contains(&"UseHint: 1".to_string()));
}

#[test]
fn commands_are_blocked_once_the_case_is_closed() {
    let mut s = session(2);
    let target = criminal_id(&s);
    run(&mut s, &format!("accuse {target}"));
    assert!(s.is_over());

    let lines = run(&mut s, "talk ann");
    assert_eq!(lines, vec!["The case is closed. Type 'restart' to play again."]);

    let lines = run(&mut s, "look");
    assert_eq!(lines[0], "The plaza");
}

#[test]
fn restart_rerolls_and_clears_flags() {
    let mut s = session(9);
    run(&mut s, "hint");
    let target = innocent_id(&s);
    run(&mut s, &format!("accuse {target}"));
    assert!(s.is_over());

    let mut seen = std::collections::HashSet::new();
    for _ in 0..20 {
        run(&mut s, "restart");
        assert_eq!(s.phase(), Phase::Investigating);
        assert_eq!(s.hints_used(), 0);
        assert_eq!(s.remaining_secs(), 60.0);
        assert!(s.roster().npcs().iter().all(|n| !n.is_accused() && !n.has_received_hint()));
        assert_eq!(s.roster().npcs().iter().filter(|n| n.is_criminal()).count(), 1);
        seen.insert(criminal_id(&s));
    }
    assert!(seen.len() > 1);
}

#[test]
fn status_line_tracks_the_clock() {
    let mut s = session(4);
    s.advance_time(15.0);
    let (out, _) = s.step("time");
    assert!(matches!(
        out.blocks.last(),
        Some(OutputBlock::Status(s)) if s == "Time 00:45"
    ));
}

#[test]
fn zero_time_limit_never_expires() {
    let mut world = load_world_from_str(PLAZA).unwrap();
    world.settings.time_limit_secs = 0.0;
    let mut s = GameSession::with_rng(world, StdRng::seed_from_u64(1));
    s.initialize();

    s.advance_time(100_000.0);
    assert!(!s.is_over());
    assert_eq!(run(&mut s, "time"), vec!["There is no time limit tonight."]);
}

#[test]
fn unknown_commands_and_quit() {
    let mut s = session(1);
    assert_eq!(
        run(&mut s, "dance")[0],
        "I don't understand that command."
    );
    let (out, quit) = s.step("quit");
    assert!(quit);
    assert_eq!(out.lines(), vec!["Goodbye."]);
}

#[test]
fn bundled_scenario_loads_and_plays() {
    let world = load_world_from_str(include_str!("../public/masquerade.toml")).unwrap();
    assert_eq!(world.npcs.len(), 8);
    let names = &world.dialogue.as_ref().unwrap().names;
    assert_eq!(names.color(whodunit::world::Color::Red), "crimson");

    let mut s = GameSession::with_rng(world, StdRng::seed_from_u64(42));
    let lines = s.initialize().lines();
    assert_eq!(lines[0], "Welcome to The Lantern Masquerade!");
    assert!(lines.iter().any(|l| l.starts_with("On the north side:")));

    let lines = run(&mut s, "suspects gender woman clothes blue");
    assert_eq!(lines, vec!["Matching suspects: Noor."]);

    let lines = run(&mut s, "examine baker");
    assert!(lines[0].starts_with("Otto is a man standing on the north side"));
}
