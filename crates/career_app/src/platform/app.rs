use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use career_core::{update, AppState, Effect, Msg, Screen};
use career_engine::{EngineHandle, FileStore, ReqwestApi, SessionStore};
use career_logging::{career_debug, career_info};

use super::cli::{Cli, Command};
use super::config::ClientConfig;
use super::effects::EffectRunner;
use super::input;
use super::logging::{self, LogDestination};
use super::ui::render::Renderer;

pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = ClientConfig::from_cli(cli);
    logging::initialize(
        LogDestination::new(&config.log_file, config.verbose),
        config.log_level(),
    );
    career_info!(
        "career starting: api={} session={}",
        config.api_url,
        config.session_file.display()
    );

    let session = SessionStore::new(Arc::new(FileStore::new(&config.session_file)));
    if config.command == Command::Logout {
        session
            .clear()
            .with_context(|| format!("clearing {}", config.session_file.display()))?;
        println!("Signed out.");
        return Ok(ExitCode::SUCCESS);
    }

    let api = ReqwestApi::new(config.api_settings(), session.clone())
        .with_context(|| format!("invalid api url {}", config.api_url))?;
    let engine = EngineHandle::new(Arc::new(api)).context("starting request engine")?;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(engine, session, msg_tx.clone());
    let mut app = App {
        state: AppState::with_default_top_n(config.top_n),
        runner,
        renderer: Renderer::new(),
    };

    app.start(&config.command)?;
    spawn_input_reader(msg_tx)?;

    while app.state.screen() != Screen::Exited {
        let Ok(msg) = msg_rx.recv() else {
            break;
        };
        app.dispatch(msg)?;
    }
    career_info!("career exiting");
    Ok(ExitCode::SUCCESS)
}

struct App {
    state: AppState,
    runner: EffectRunner,
    renderer: Renderer,
}

impl App {
    fn start(&mut self, command: &Command) -> io::Result<()> {
        match command {
            Command::Login { email, password } => {
                self.render()?;
                self.prefill(email.as_deref(), password.as_deref(), None, false)
            }
            Command::Register {
                email,
                password,
                full_name,
            } => {
                self.render()?;
                self.prefill(
                    email.as_deref(),
                    password.as_deref(),
                    full_name.as_deref(),
                    true,
                )
            }
            Command::Dashboard | Command::Logout => {
                self.apply_effects(vec![Effect::OpenDashboard])
            }
        }
    }

    fn prefill(
        &mut self,
        email: Option<&str>,
        password: Option<&str>,
        full_name: Option<&str>,
        register: bool,
    ) -> io::Result<()> {
        if register {
            self.dispatch(Msg::AuthModeToggled)?;
        }
        if let Some(email) = email {
            self.dispatch(Msg::EmailChanged(email.to_string()))?;
        }
        if let Some(password) = password {
            self.dispatch(Msg::PasswordChanged(password.to_string()))?;
        }
        if let Some(full_name) = full_name {
            self.dispatch(Msg::FullNameChanged(full_name.to_string()))?;
        }
        if email.is_some() && password.is_some() {
            self.dispatch(Msg::LoginSubmitted)?;
        }
        Ok(())
    }

    /// Applies `msg` and every message its synchronous effects produce.
    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            if self.state.consume_dirty() {
                self.render()?;
            }
            inbox.extend(self.runner.run(effects));
        }
        Ok(())
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) -> io::Result<()> {
        for msg in self.runner.run(effects) {
            self.dispatch(msg)?;
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let lines = self.renderer.render(&self.state.view());
        if lines.is_empty() {
            return Ok(());
        }
        let mut out = io::stdout().lock();
        for line in lines {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}

fn spawn_input_reader(msg_tx: mpsc::Sender<Msg>) -> io::Result<()> {
    thread::Builder::new()
        .name("career-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                for msg in input::parse_line(&line) {
                    if msg_tx.send(msg).is_err() {
                        return;
                    }
                }
            }
            career_debug!("Input closed");
            let _ = msg_tx.send(Msg::InputClosed);
        })?;
    Ok(())
}
