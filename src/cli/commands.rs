//! Command dispatch and the interactive terminal presenter

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::CommandFactory;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::application::services::{Presenter, SessionService, SessionView};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{
    compute_result_payload, next_stage, parse_route_step, Answer, IgnoreReason, Outcome,
    QuestionId, Submission,
};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::Prompter;
use crate::infrastructure::InfraError;

/// Execute the parsed command.
pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Run { no_delay }) => cmd_run(container, *no_delay),
        Some(Commands::Route { answers, json }) => cmd_route(container, answers, *json),
        Some(Commands::Result { outcome, json }) => cmd_result(container, outcome, *json),
        Some(Commands::Tree) => cmd_tree(),
        Some(Commands::Config { command }) => cmd_config(container, command, cli),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => cmd_run(container, false),
    }
}

/// One line of interactive input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Answer(Answer),
    Back,
    Reset,
    Quit,
}

/// Parse a line typed at the prompt.
pub fn parse_input(line: &str) -> Option<Input> {
    match line.trim().to_ascii_lowercase().as_str() {
        "b" | "back" => Some(Input::Back),
        "r" | "reset" | "restart" => Some(Input::Reset),
        "q" | "quit" | "exit" => Some(Input::Quit),
        other => other.parse::<Answer>().ok().map(Input::Answer),
    }
}

fn prompt_for(view: &SessionView) -> &'static str {
    if view.active_result.is_some() {
        "[r]estart, [q]uit >"
    } else if view.can_go_back {
        "[y]es, [n]o, [b]ack, [r]eset, [q]uit >"
    } else {
        "[y]es, [n]o, [q]uit >"
    }
}

/// Drive a session from `prompter` input until quit or end of input.
///
/// Returns the outcome reached, if any.
#[instrument(skip_all, fields(session = %service.id()))]
pub fn run_session(
    service: &mut SessionService,
    settings: &Settings,
    prompter: &dyn Prompter,
    presenter: &mut dyn Presenter,
) -> CliResult<Option<Outcome>> {
    loop {
        let view = service.view(settings);
        presenter.render(&view);

        let line = prompter
            .read_line(prompt_for(&view))
            .map_err(|e| InfraError::io("read input", e))?;
        let Some(line) = line else {
            debug!("end of input");
            break;
        };

        match parse_input(&line) {
            Some(Input::Answer(answer)) => {
                let Some(question) = view.active_question else {
                    presenter.notice("already at a result: reset to start over");
                    continue;
                };
                match service.submit_answer(question, answer) {
                    Submission::Scheduled(_) => {
                        presenter.render(&service.view(settings));
                        service.settle();
                    }
                    Submission::Ignored(reason) => {
                        presenter.notice(&ignored_message(reason));
                    }
                }
            }
            Some(Input::Back) => {
                if !service.go_back(1) {
                    presenter.notice("nothing to go back to");
                }
            }
            Some(Input::Reset) => service.reset(),
            Some(Input::Quit) => break,
            None => presenter.notice(&format!("unrecognised input: {:?}", line)),
        }
    }

    let outcome = service.engine().terminal();
    info!("session ended at {}", service.engine().stage());
    Ok(outcome)
}

fn ignored_message(reason: IgnoreReason) -> String {
    match reason {
        IgnoreReason::Terminal => "already at a result".to_string(),
        IgnoreReason::NotActive { active } => format!("question {} is active", active.number()),
        IgnoreReason::AlreadyPending => "answer already being applied".to_string(),
    }
}

/// Presenter writing to the terminal.
pub struct TerminalPresenter {
    show_progress: bool,
    show_breadcrumbs: bool,
}

impl TerminalPresenter {
    pub fn new(settings: &Settings) -> Self {
        Self {
            show_progress: settings.show_progress,
            show_breadcrumbs: settings.show_breadcrumbs,
        }
    }
}

impl Presenter for TerminalPresenter {
    fn render(&mut self, view: &SessionView) {
        if view.pending {
            if let Some(answer) = view.selected {
                output::detail(&format!("→ {}", answer));
            }
            return;
        }

        println!();
        if let (Some(payload), Some(link)) = (&view.active_result, &view.result_link) {
            output::success("Recommendation");
            output::header(&payload.title);
            output::detail(&payload.description);
            output::action("Learn more", link);
            return;
        }

        if self.show_breadcrumbs {
            output::info(&output::breadcrumb_trail(&view.breadcrumbs));
        }
        if let (true, Some(step)) = (self.show_progress, view.step) {
            output::info(&format!(
                "Step {} of {} {}",
                step,
                view.total_steps,
                output::progress_bar(view.progress_fraction, 12)
            ));
        }
        if let Some(prompt) = &view.prompt {
            output::header(prompt);
        }
    }

    fn notice(&mut self, message: &str) {
        output::warning(message);
    }
}

#[instrument(skip(container))]
fn cmd_run(container: &ServiceContainer, no_delay: bool) -> CliResult<()> {
    let settings = container.settings.as_ref();
    let mut service = if no_delay {
        SessionService::new(Arc::clone(&container.clock), Duration::ZERO)
    } else {
        container.session_service()
    };
    let mut presenter = TerminalPresenter::new(settings);
    run_session(
        &mut service,
        settings,
        container.prompter.as_ref(),
        &mut presenter,
    )?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct RecommendationJson {
    outcome: Outcome,
    title: &'static str,
    description: &'static str,
    link: String,
}

impl RecommendationJson {
    fn new(outcome: Outcome, settings: &Settings) -> Self {
        let payload = compute_result_payload(outcome);
        Self {
            outcome,
            title: payload.title,
            description: payload.description,
            link: settings.result_link(&payload),
        }
    }
}

fn print_recommendation(outcome: Outcome, settings: &Settings, json: bool) -> CliResult<()> {
    let rec = RecommendationJson::new(outcome, settings);
    if json {
        let text = serde_json::to_string_pretty(&rec).map_err(InfraError::from)?;
        output::info(&text);
    } else {
        output::header(&rec.title);
        output::detail(&rec.description);
        output::action("Learn more", &rec.link);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_route(container: &ServiceContainer, answers: &[String], json: bool) -> CliResult<()> {
    let steps = answers
        .iter()
        .map(|s| parse_route_step(s))
        .collect::<Result<Vec<(QuestionId, Answer)>, _>>()
        .map_err(crate::application::ApplicationError::from)?;
    let outcome = container.route_service().route(&steps)?;
    print_recommendation(outcome, &container.settings, json)
}

#[instrument(skip(container))]
fn cmd_result(container: &ServiceContainer, outcome: &str, json: bool) -> CliResult<()> {
    let outcome: Outcome = outcome
        .parse()
        .map_err(|e: crate::domain::DomainError| CliError::InvalidArgs(e.to_string()))?;
    print_recommendation(outcome, &container.settings, json)
}

fn cmd_tree() -> CliResult<()> {
    output::header("Transitions");
    for question in QuestionId::ALL {
        for answer in [Answer::Yes, Answer::No] {
            output::detail(&format!(
                "{} {:<3} -> {}",
                question,
                answer,
                next_stage(question, answer)
            ));
        }
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands, cli: &Cli) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => print_config_location("global", &path),
                None => output::warning("cannot determine global config directory"),
            }
            let local_dir = match &cli.config_dir {
                Some(dir) => dir.clone(),
                None => std::env::current_dir()
                    .map_err(|e| InfraError::io("determine current directory", e))?,
            };
            print_config_location("local", &local_config_path(&local_dir));
        }
        ConfigCommands::Template => {
            output::info(&Settings::template());
        }
    }
    Ok(())
}

fn print_config_location(label: &str, path: &Path) {
    let state = if path.exists() { "" } else { " (not found)" };
    output::action(label, &format!("{}{}", path.display(), state));
}

fn cmd_completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
