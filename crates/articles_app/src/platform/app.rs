use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use articles_core::{update, AppState};
use articles_engine::{ensure_data_dir, FileTokenStore, ReqwestArticlesApi, TokenStore};
use articles_logging::{articles_info, articles_warn};

use super::config::{ArticlesConfig, CONFIG_FILENAME};
use super::effects::{AppEvent, EffectRunner};
use super::logging;
use super::ui;

pub fn run_app() -> anyhow::Result<()> {
    let config =
        ArticlesConfig::load(Path::new(CONFIG_FILENAME))?.with_env(|key| std::env::var(key).ok());
    ensure_data_dir(&config.data_dir)
        .with_context(|| format!("failed to prepare data dir {:?}", config.data_dir))?;
    logging::initialize(config.log_destination, &config.data_dir);
    articles_info!("Starting articles client against {}", config.base_url);

    let api = ReqwestArticlesApi::new(config.api_settings())
        .with_context(|| format!("invalid base url {:?}", config.base_url))?;
    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(config.data_dir.clone()));
    match tokens.get() {
        Ok(Some(_)) => articles_info!("Found a stored session token"),
        Ok(None) => articles_info!("No stored session token"),
        Err(err) => articles_warn!("Could not read stored token: {}", err),
    }

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(Arc::new(api), tokens, event_tx.clone())
        .context("failed to start request engine")?;

    spawn_input_reader(event_tx);

    let mut app = App {
        state: AppState::new(),
        runner,
    };
    app.present(true);
    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Msg(msg) => {
                app.dispatch(msg);
            }
            AppEvent::Quit => break,
        }
    }
    articles_info!("Shutting down");
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn dispatch(&mut self, msg: articles_core::Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
        let dirty = self.state.consume_dirty();
        self.present(dirty);
    }

    fn present(&self, dirty: bool) {
        if !dirty {
            return;
        }
        let mut stdout = io::stdout().lock();
        let _ = write!(
            stdout,
            "\n{}{}",
            ui::render::render(&self.state.view()),
            ui::constants::PROMPT
        );
        let _ = stdout.flush();
    }
}

/// Turns stdin lines into events; end of input quits.
fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            match ui::commands::parse(&line) {
                Ok(Some(ui::commands::Command::Dispatch(msg))) => {
                    if event_tx.send(AppEvent::Msg(msg)).is_err() {
                        return;
                    }
                }
                Ok(Some(ui::commands::Command::Help)) => {
                    println!("{}", ui::constants::HELP_TEXT);
                    print_prompt();
                }
                Ok(Some(ui::commands::Command::Quit)) => break,
                Ok(None) => print_prompt(),
                Err(err) => {
                    println!("{err}");
                    print_prompt();
                }
            }
        }
        let _ = event_tx.send(AppEvent::Quit);
    });
}

fn print_prompt() {
    let mut stdout = io::stdout().lock();
    let _ = write!(stdout, "{}", ui::constants::PROMPT);
    let _ = stdout.flush();
}
