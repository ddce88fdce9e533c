use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use ragchat_core::{update, AppState, Effect, Msg};
use ragchat_logging::{chat_debug, chat_info, chat_warn};

use super::cli::CliArgs;
use super::config;
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{parse_line, Command, HELP_TEXT};
use super::ui::render::{render, Viewport};

/// Everything the dispatch loop reacts to.
#[derive(Debug)]
pub enum AppInput {
    Msg(Msg),
    Line(String),
    /// Stdin closed.
    Eof,
}

pub fn run_app() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let (file_config, source) =
        config::load(args.config.as_deref()).context("loading configuration")?;
    let config = file_config.apply_cli(&args);

    logging::initialize(config.log_destination, config.log_level, &config.log_file);
    match &source {
        Some(path) => chat_info!("Loaded config from {:?}", path),
        None => chat_info!("No config file found, using defaults"),
    }

    let (input_tx, input_rx) = mpsc::channel::<AppInput>();
    let runner = EffectRunner::new(config.backend_settings(), input_tx.clone())
        .context("starting backend engine")?;
    spawn_stdin_reader(input_tx.clone());

    let mut app = App {
        state: AppState::new(),
        viewport: Viewport::new(config.max_visible_turns),
        runner,
    };
    app.print_frame();

    if let Some(pdf) = args.pdf {
        app.dispatch(Msg::FileSelected(Some(pdf)));
        app.dispatch(Msg::UploadClicked);
    }

    while let Ok(input) = input_rx.recv() {
        match input {
            AppInput::Msg(msg) => app.dispatch(msg),
            AppInput::Line(line) => {
                if !app.handle_line(&line) {
                    break;
                }
            }
            AppInput::Eof => break,
        }
    }

    chat_info!("Exiting");
    Ok(())
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<AppInput>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        let mut reader = stdin.lock();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    if input_tx.send(AppInput::Line(decode_line(&buf))).is_err() {
                        return;
                    }
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    chat_warn!("Failed to read stdin: {}", err);
                    break;
                }
            }
        }
        let _ = input_tx.send(AppInput::Eof);
    });
}

/// Invalid UTF-8 is replaced rather than ending the session.
fn decode_line(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    text.trim_end_matches(['\n', '\r']).to_string()
}

struct App {
    state: AppState,
    viewport: Viewport,
    runner: EffectRunner,
}

impl App {
    /// Returns false when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> bool {
        match parse_line(line) {
            Command::Dispatch(msgs) => {
                for msg in msgs {
                    self.dispatch(msg);
                }
            }
            Command::ScrollUp => {
                if self.viewport.scroll_up() {
                    self.print_frame();
                }
            }
            Command::ScrollDown => {
                let turns = self.state.history().len();
                if self.viewport.scroll_down(turns) {
                    self.print_frame();
                }
            }
            Command::Help => println!("{HELP_TEXT}"),
            Command::Quit => return false,
            Command::Unknown(text) => println!("Unknown command {text:?}; try /help"),
        }
        true
    }

    fn dispatch(&mut self, msg: Msg) {
        chat_debug!("dispatch {:?}", msg);
        let (state, effects) = update(std::mem::take(&mut self.state), msg);
        self.state = state;

        for effect in effects {
            match effect {
                Effect::ScrollToLatest { turns } => self.viewport.scroll_to(turns),
                other => self.runner.run(other),
            }
        }

        if self.state.consume_dirty() {
            self.print_frame();
        }
    }

    fn print_frame(&self) {
        let frame = render(&self.state.view(), &self.viewport);
        let mut out = io::stdout().lock();
        for line in frame {
            let _ = writeln!(out, "{line}");
        }
        let _ = write!(out, "> ");
        let _ = out.flush();
    }
}
