//! Interactive read-eval-print loop

use log::info;
use rustyline::{error::ReadlineError, DefaultEditor};

use crate::session::Session;
use crate::syntax;

/// REPL settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    /// Text shown before each input line
    pub prompt: String,

    /// Input that ends the session
    pub quit_command: String,

    /// Print the syntax tree instead of evaluating
    pub parse_only: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "|> ".to_string(),
            quit_command: "quit".to_string(),
            parse_only: false,
        }
    }
}

/// One line of REPL output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A result, printed to stdout
    Value(String),

    /// A diagnostic, printed to stderr
    Error(String),
}

/// What the REPL does with one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// End the session
    Quit,

    /// Print these lines and read the next input
    Print(Vec<Line>),
}

/// The interactive loop over a [`Session`].
pub struct Repl {
    session: Session,
    config: ReplConfig,
}

impl Repl {
    /// Create a REPL over the built-in environment.
    pub fn new(config: ReplConfig) -> Self {
        Self::with_session(Session::new(), config)
    }

    /// Create a REPL over an existing session.
    pub fn with_session(session: Session, config: ReplConfig) -> Self {
        Self { session, config }
    }

    /// Work out the reply to one input line.
    ///
    /// Each top-level expression on the line gets its own output line, so
    /// one failing expression does not hide the others.
    pub fn respond(&self, input: &str) -> Reply {
        let trimmed = input.trim();
        if trimmed == self.config.quit_command {
            return Reply::Quit;
        }
        if trimmed.is_empty() {
            return Reply::Print(Vec::new());
        }

        if self.config.parse_only {
            let line = match syntax::parse(trimmed) {
                Ok(program) => Line::Value(program.pretty().trim_end().to_string()),
                Err(err) => Line::Error(format!("Syntax error: {}", err)),
            };
            return Reply::Print(vec![line]);
        }

        match self.session.eval_source(trimmed) {
            Ok(outcomes) => Reply::Print(
                outcomes
                    .into_iter()
                    .map(|outcome| match outcome {
                        Ok(entity) => Line::Value(entity.to_string()),
                        Err(err) => Line::Error(err.diagnostic()),
                    })
                    .collect(),
            ),
            Err(err) => Reply::Print(vec![Line::Error(format!("Syntax error: {}", err))]),
        }
    }

    /// Read lines from the terminal until quit, Ctrl-C or Ctrl-D.
    pub fn run(&self) -> Result<(), ReadlineError> {
        let mut editor = DefaultEditor::new()?;
        println!("REPL");

        loop {
            match editor.readline(&self.config.prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        editor.add_history_entry(line.trim()).ok();
                    }
                    match self.respond(&line) {
                        Reply::Quit => {
                            println!("Bye for now!");
                            break;
                        }
                        Reply::Print(lines) => {
                            for line in lines {
                                match line {
                                    Line::Value(text) => println!("{}", text),
                                    Line::Error(text) => eprintln!("{}", text),
                                }
                            }
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    info!("input closed");
                    break;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}
