use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use tracing::error;
use tracing_subscriber::EnvFilter;

use whodunit::GameSession;
use whodunit::engine::{Output, OutputBlock};

fn flush_output(out: Output) {
    let mut printed_anything = false;
    let mut started_events = false;

    for block in out.blocks {
        match block {
            OutputBlock::Title(t) => {
                println!("\n{}", t);
                printed_anything = true;
            }
            OutputBlock::Text(line) => {
                println!("{}", line);
                printed_anything = true;
            }
            OutputBlock::Speech { speaker, line } => {
                println!("{}: \"{}\"", speaker, line);
                printed_anything = true;
            }
            OutputBlock::Event(ev) => {
                if !started_events {
                    if printed_anything {
                        println!(); // visual separation before first event
                    }
                    started_events = true;
                }
                println!("{}", ev);
                printed_anything = true;
            }
            OutputBlock::Status(s) => {
                println!("\n[{}]", s);
                printed_anything = true;
            }
        }
    }
}

fn init_tracing() {
    // Logs go to stderr so they never interleave with the game text.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn main() -> io::Result<()> {
    init_tracing();

    let scenario_path: PathBuf = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("public/masquerade.toml"));

    let mut world = match whodunit::load_world_from_file(&scenario_path) {
        Ok(w) => w,
        Err(e) => {
            error!(path = %scenario_path.display(), "failed to load scenario");
            eprintln!("Failed to load scenario '{}': {e}", scenario_path.display());
            std::process::exit(1);
        }
    };
    world.settings = world.settings.with_env_overrides();

    let mut session = GameSession::new(world);
    flush_output(session.initialize());

    let stdin = io::stdin();
    let mut last_input = Instant::now();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        let bytes_read = stdin.read_line(&mut input)?;
        if bytes_read == 0 {
            println!("\nGoodbye.");
            break;
        }

        // Time spent thinking at the prompt counts against the clock.
        let now = Instant::now();
        let mut out = session.advance_time(now.duration_since(last_input).as_secs_f32());
        last_input = now;

        let input = input.trim();
        if input.is_empty() && !out.blocks.is_empty() {
            flush_output(out);
            continue;
        }
        if input.is_empty() {
            continue;
        }

        let (step_out, quit) = session.step(input);
        out.extend(step_out);
        flush_output(out);

        if quit {
            break;
        }
    }

    Ok(())
}
