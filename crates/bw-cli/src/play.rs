//! The interactive game loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use bw_fiction::{Difficulty, Ending, FileSlot, GameConfig, GameSession, Outcome};

use crate::render;

/// Startup settings gathered from the command line.
pub struct Options {
    pub seed: u64,
    pub difficulty: Option<Difficulty>,
    pub save: PathBuf,
}

/// Line reader over stdin that also answers the puzzle prompts.
struct Console<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> Console<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }

    /// Print `prompt` and read one trimmed line. `None` on end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{prompt}");
        io::stdout().flush()?;

        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Ok(None);
        }
        Ok(Some(self.line.trim().to_string()))
    }

    /// Answer a puzzle prompt. A read failure counts as no answer.
    fn ask(&mut self, question: &str) -> Option<String> {
        match self.read_line(question) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "could not read prompt answer");
                None
            }
        }
    }
}

pub fn run(options: Options) -> Result<(), String> {
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock());

    render::banner(options.seed);
    let difficulty = match options.difficulty {
        Some(d) => d,
        None => match choose_difficulty(&mut console)? {
            Some(d) => d,
            None => return Ok(()),
        },
    };
    tracing::debug!(%difficulty, seed = options.seed, "starting game");

    let config = GameConfig::default().with_seed(options.seed).with_difficulty(difficulty);
    let mut session = GameSession::new(config)
        .map_err(|e| format!("failed to start session: {e}"))?
        .with_slot(FileSlot::new(options.save));

    render::prologue();
    let mut redraw = true;

    loop {
        if redraw {
            render::status(&session.status());
            let view = session.room_view().map_err(|e| e.to_string())?;
            render::room(&view);
        }
        redraw = false;

        let Some(line) = console.read_line("\n> ").map_err(|e| e.to_string())? else {
            break; // EOF
        };
        let Some(turn) = session.process(&line, &mut |q: &str| console.ask(q)) else {
            continue;
        };

        if let Some(correction) = &turn.correction {
            render::correction(correction);
        }
        match &turn.result {
            Ok(Outcome::Quit) => break,
            Ok(outcome) => {
                render::outcome(&session, outcome);
                redraw = shows_new_scene(outcome);
            }
            Err(e) => render::error(e),
        }

        match turn.ending {
            Some(Ending::Escaped { .. }) => break,
            Some(Ending::Died(cause)) => {
                render::death(cause);
                if !second_chance(&mut session, &mut console)? {
                    break;
                }
                redraw = true;
            }
            None => {}
        }
    }

    render::ending(session.ending());
    Ok(())
}

fn choose_difficulty<R: BufRead>(console: &mut Console<R>) -> Result<Option<Difficulty>, String> {
    render::difficulty_menu();
    loop {
        let Some(choice) = console
            .read_line("Choice (1-3): ")
            .map_err(|e| e.to_string())?
        else {
            return Ok(None);
        };
        if let Some(difficulty) = Difficulty::parse(&choice) {
            return Ok(Some(difficulty));
        }
    }
}

/// After a death the player gets one more line. Returns whether play goes on.
fn second_chance<R: BufRead>(
    session: &mut GameSession,
    console: &mut Console<R>,
) -> Result<bool, String> {
    render::rewind_offer();
    let Some(line) = console.read_line("> ").map_err(|e| e.to_string())? else {
        return Ok(false);
    };
    let Some(turn) = session.process(&line, &mut |q: &str| console.ask(q)) else {
        return Ok(false);
    };
    match &turn.result {
        Ok(outcome) => render::outcome(session, outcome),
        Err(e) => render::error(e),
    }
    Ok(!session.is_over())
}

fn shows_new_scene(outcome: &Outcome) -> bool {
    matches!(
        outcome,
        Outcome::Moved { death: None, .. }
            | Outcome::LookedAround
            | Outcome::Undone
            | Outcome::Loaded { .. }
    )
}
