pub mod config;
pub mod engine;
pub mod error;
pub mod world;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use config::Settings;
use engine::{
    Countdown, DefeatReason, Ending, EventBus, GameEvent, GameStats, NpcController, Output,
    Roster, format_remaining, handle_accuse, handle_examine_npc, handle_suspects,
    handle_talk_to_npc, render_ending, render_plaza,
};
use world::{DisplayNames, World};

pub use error::{GameError, Result};
pub use world::{load_world_from_file, load_world_from_str};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Investigating,
    Over(Ending),
}

/// One play-through: the cast, who did it, the clock, and the event queue.
pub struct GameSession {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub settings: Settings,
    roster: Roster,
    bus: EventBus,
    clock: Countdown,
    rng: StdRng,
    phase: Phase,
    hints_used: u32,
    action_index: u64,
}

const HELP: &[&str] = &[
    "look                 see who is on the plaza",
    "talk <name>          ask someone what they saw",
    "examine <name>       study someone's appearance",
    "hint                 clear a minigame; everyone remembers more",
    "suspects [filters]   e.g. 'suspects clothes red gender woman'",
    "accuse <name>        make your final accusation",
    "time                 show the time left",
    "restart | quit",
];

#[cfg(feature = "wasm")]
mod wasm_bindings {
    use super::*;
    use serde::Serialize;
    use serde_wasm_bindgen::to_value;
    use wasm_bindgen::prelude::*;

    #[derive(Serialize)]
    struct WasmStepResult {
        blocks: Vec<engine::OutputBlock>,
        quit: bool,
        over: bool,
    }

    #[wasm_bindgen]
    pub struct WasmGame {
        session: GameSession,
        initialized: bool,
    }

    #[wasm_bindgen]
    impl WasmGame {
        /// Create a new game from a TOML scenario string. The seed comes from the
        /// host page. Call `init()` to get the opening output.
        #[wasm_bindgen(constructor)]
        pub fn new(scenario_toml: &str, seed: u64) -> std::result::Result<WasmGame, JsValue> {
            let world = load_world_from_str(scenario_toml)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(WasmGame {
                session: GameSession::with_rng(world, StdRng::seed_from_u64(seed)),
                initialized: false,
            })
        }

        #[wasm_bindgen]
        pub fn init(&mut self) -> JsValue {
            self.initialized = true;
            let out = self.session.initialize();
            self.result(out, false)
        }

        /// Process a player command and return the resulting output blocks and quit flag.
        #[wasm_bindgen]
        pub fn step(&mut self, input: &str) -> JsValue {
            if !self.initialized {
                let _ = self.init();
            }
            let (out, quit) = self.session.step(input);
            self.result(out, quit)
        }

        /// Advance the countdown by `dt` seconds of real time.
        #[wasm_bindgen]
        pub fn tick(&mut self, dt: f32) -> JsValue {
            let out = self.session.advance_time(dt);
            self.result(out, false)
        }
    }

    impl WasmGame {
        fn result(&self, out: Output, quit: bool) -> JsValue {
            to_value(&WasmStepResult {
                blocks: out.blocks,
                quit,
                over: self.session.is_over(),
            })
            .unwrap_or(JsValue::NULL)
        }
    }
}

impl GameSession {
    /// Seeded from `settings.seed` when present, otherwise from OS entropy.
    pub fn new(world: World) -> Self {
        let rng = match world.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(world, rng)
    }

    pub fn with_rng(world: World, mut rng: StdRng) -> Self {
        let World {
            id,
            name,
            desc,
            settings,
            npcs,
            dialogue,
        } = world;

        let mut roster = Roster::new(dialogue, settings.missing_dialogue, settings.placeholder.clone());
        for data in npcs {
            roster.register(NpcController::new(data), &mut rng);
        }

        GameSession {
            id,
            name,
            desc,
            clock: Countdown::new(settings.time_limit_secs),
            settings,
            roster,
            bus: EventBus::new(),
            rng,
            phase: Phase::Investigating,
            hints_used: 0,
            action_index: 0,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over(_))
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn remaining_secs(&self) -> f32 {
        self.clock.remaining()
    }

    fn names(&self) -> DisplayNames {
        self.roster
            .dialogue()
            .map(|d| d.names.clone())
            .unwrap_or_default()
    }

    /// Start the game: roll the criminal, start the clock, show the opening.
    pub fn initialize(&mut self) -> Output {
        let mut out = Output::new();
        self.bus.emit(GameEvent::GameStart);
        self.pump(&mut out);

        out.title(format!("Welcome to {}!", self.name));
        out.say(self.desc.trim());
        if let Some(d) = self.roster.dialogue() {
            out.say(d.opening_story.trim());
        }
        out.event("Type 'help' for commands.");
        render_plaza(&mut out, "The plaza", &self.roster, &self.names());
        self.push_status(&mut out);
        out
    }

    /// Process a single player input; returns (output, quit?)
    pub fn step(&mut self, input: &str) -> (Output, bool) {
        let mut out = Output::new();
        let input = input.trim();
        let lower = input.to_lowercase();
        self.action_index = self.action_index.wrapping_add(1);
        debug!(action = self.action_index, input, "command");

        let mut parts = lower.split_whitespace();
        let verb = parts.next().unwrap_or("");
        let rest = parts.collect::<Vec<&str>>().join(" ");

        match verb {
            "" => {}
            "quit" | "exit" => {
                out.say("Goodbye.");
                return (out, true);
            }
            "help" | "?" => {
                for line in HELP {
                    out.say(*line);
                }
            }
            "restart" => {
                self.bus.emit(GameEvent::GameStart);
                self.pump(&mut out);
                out.event("The lanterns are relit. Somewhere in the crowd, a new culprit hides.");
                render_plaza(&mut out, "The plaza", &self.roster, &self.names());
            }
            "look" | "l" if rest.is_empty() => {
                render_plaza(&mut out, "The plaza", &self.roster, &self.names());
            }
            _ if self.is_over() => {
                out.say("The case is closed. Type 'restart' to play again.");
            }
            "talk" | "speak" => {
                let target = rest.strip_prefix("to ").unwrap_or(&rest);
                handle_talk_to_npc(&mut out, &self.roster, &mut self.bus, target, &mut self.rng);
            }
            "examine" | "x" | "look" => {
                let target = rest.strip_prefix("at ").unwrap_or(&rest);
                handle_examine_npc(&mut out, &self.roster, &self.names(), target);
            }
            "hint" | "solve" => {
                self.bus.emit(GameEvent::HintReceived);
            }
            "accuse" => {
                handle_accuse(&mut out, &mut self.roster, &mut self.bus, &rest, &mut self.rng);
            }
            "suspects" | "filter" => {
                handle_suspects(&mut out, &self.roster, &rest);
            }
            "time" => {
                if !self.clock.is_limited() {
                    out.say("There is no time limit tonight.");
                }
            }
            _ => out.say("I don't understand that command."),
        }

        self.pump(&mut out);
        self.push_status(&mut out);
        (out, false)
    }

    /// Advance the countdown by `dt` seconds.
    pub fn advance_time(&mut self, dt: f32) -> Output {
        let mut out = Output::new();
        if let Some(remaining) = self.clock.advance(dt) {
            if self.clock.is_limited() {
                self.bus.emit(GameEvent::TimeUpdate {
                    remaining_secs: remaining,
                });
            }
        }
        self.pump(&mut out);
        out
    }

    fn push_status(&self, out: &mut Output) {
        if !self.is_over() && self.clock.is_limited() {
            out.set_status(format_remaining(self.clock.remaining()));
        }
    }

    fn pump(&mut self, out: &mut Output) {
        while let Some(event) = self.bus.pop() {
            self.handle_event(event, out);
        }
    }

    fn handle_event(&mut self, event: GameEvent, out: &mut Output) {
        match event {
            GameEvent::GameStart => {
                self.roster.reset_session();
                self.roster.randomize_criminal(&mut self.rng);
                self.clock.start();
                self.hints_used = 0;
                self.phase = Phase::Investigating;
                info!(scenario = %self.id, "game started");
            }
            GameEvent::HintReceived => {
                self.roster.set_all_hints_received(true);
                self.hints_used += 1;
                info!(hints = self.hints_used, "hint received");
                out.event("You cleared the challenge. Word spreads: everyone on the plaza suddenly remembers more.");
            }
            GameEvent::NpcInteractionStarted { npc } => {
                debug!(%npc, "conversation started");
            }
            GameEvent::NpcInteractionEnded => {
                debug!("conversation ended");
            }
            GameEvent::NpcAccused { npc, was_criminal } => {
                info!(%npc, was_criminal, "accusation made");
                let ending = if was_criminal {
                    Ending::Victory
                } else {
                    Ending::Defeat(DefeatReason::WrongSuspect)
                };
                self.bus.emit(GameEvent::GameEnd(ending));
            }
            GameEvent::TimeUpdate { remaining_secs } => {
                if remaining_secs <= 0.0 && !self.is_over() {
                    self.bus
                        .emit(GameEvent::GameEnd(Ending::Defeat(DefeatReason::TimeUp)));
                }
            }
            GameEvent::GameEnd(ending) => {
                if self.is_over() {
                    return;
                }
                self.clock.stop();
                self.phase = Phase::Over(ending);
                let stats = GameStats {
                    clear_time_secs: self.clock.elapsed_secs().floor() as u32,
                    hints_used: self.hints_used,
                };
                info!(?ending, ?stats, "game over");
                render_ending(out, ending, stats, self.roster.dialogue());
            }
        }
    }
}
