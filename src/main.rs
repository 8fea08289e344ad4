mod chat_ui;

use chat_ui::ChatUI;
use chrono::Local;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vastucraft::config::load_env_file;
use vastucraft::{
    ConciergeSession, Config, ContactInquiry, ConversationEngine, Error, FormRelay, LeadSink,
    LoggingSink, Result, VastuAssistant,
};

const SERVICES: [&str; 6] = [
    "Architecture Design",
    "Interior Design",
    "Exterior & Facade",
    "AI-Powered Transformation",
    "Construction",
    "Vastu Consulting",
];

/// Concierge commands. Only `/`-prefixed input is a command; anything else,
/// including a bare "exit", is an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConciergeCommand {
    Exit,
    Help,
    Reset,
    Save,
}

impl ConciergeCommand {
    fn parse(input: &str) -> Option<Self> {
        let command = input.trim().strip_prefix('/')?;
        match command.to_ascii_lowercase().as_str() {
            "exit" | "quit" => Some(Self::Exit),
            "help" => Some(Self::Help),
            "reset" => Some(Self::Reset),
            "save" => Some(Self::Save),
            _ => None,
        }
    }
}

fn prompt_error(e: dialoguer::Error) -> Error {
    Error::Other(format!("Prompt failed: {}", e))
}

fn history_dir() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".vastucraft_history")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_concierge(
    ui: &ChatUI,
    config: &Config,
    sink: Arc<dyn LeadSink>,
    assistant: &VastuAssistant,
) -> Result<()> {
    let mut engine = ConversationEngine::new(sink);
    if config.ai_summary && assistant.is_configured() {
        engine = engine.with_summarizer(Arc::new(assistant.clone()));
    }
    let mut session = ConciergeSession::new(engine, config.typing_delay);
    let mut shown = 0;

    ui.print_concierge_help();

    loop {
        let state = session.snapshot().await;
        for entry in &state.transcript[shown..] {
            ui.print_entry(entry);
        }
        shown = state.transcript.len();

        if session.is_complete().await {
            let choice = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Consultation recorded")
                .items(&["Start New Consultation", "Back to main menu"])
                .default(0)
                .interact()
                .map_err(prompt_error)?;
            if choice == 0 {
                session.reset().await;
                shown = 0;
                continue;
            }
            return Ok(());
        }

        let prompt = match state.current_step {
            3 => "Describe your requirements",
            4 => "Enter your email or phone",
            _ => "You",
        };
        let input: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;

        match ConciergeCommand::parse(&input) {
            Some(ConciergeCommand::Exit) => return Ok(()),
            Some(ConciergeCommand::Help) => {
                ui.print_concierge_help();
                continue;
            }
            Some(ConciergeCommand::Reset) => {
                session.reset().await;
                shown = 0;
                println!();
                continue;
            }
            Some(ConciergeCommand::Save) => {
                let name: String = Input::with_theme(&ColorfulTheme::default())
                    .with_prompt("Save transcript as")
                    .default(format!("consultation_{}", Local::now().format("%Y%m%d_%H%M%S")))
                    .interact_text()
                    .map_err(prompt_error)?;
                let path = history_dir().join(format!("{}.json", name));
                match session.snapshot().await.save_to(&path) {
                    Ok(()) => ui.print_success(&format!("Transcript saved to: {}", path.display())),
                    Err(e) => ui.print_error(&format!("Failed to save transcript: {}", e)),
                }
                continue;
            }
            None => {}
        }

        if !session.submit(&input).await {
            continue;
        }

        let state = session.snapshot().await;
        for entry in &state.transcript[shown..] {
            ui.print_entry(entry);
        }
        shown = state.transcript.len();

        let pb = ui.typing_indicator("Concierge is typing...");
        session.settle().await;
        pb.finish_and_clear();
    }
}

async fn run_assistant(ui: &ChatUI, assistant: &VastuAssistant) -> Result<()> {
    ui.print_assistant_reply(&vastucraft::AssistantReply {
        text: "Namaste! I am the VastuCraft AI Assistant. Ask me about Vastu directions or our smart construction services.".to_string(),
        is_error: false,
    });
    ui.print_notice("Type 'exit' to return to the main menu.");

    loop {
        let query: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Ask about Vastu")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;

        let trimmed = query.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            return Ok(());
        }

        let pb = ui.typing_indicator("VastuBot is thinking...");
        let reply = assistant.ask(&query).await;
        pb.finish_and_clear();
        ui.print_assistant_reply(&reply);
    }
}

async fn run_contact_form(ui: &ChatUI, relay: Option<&FormRelay>) -> Result<()> {
    let Some(relay) = relay else {
        ui.print_error("The contact form is unavailable: WEB3FORMS_ACCESS_KEY is not configured.");
        return Ok(());
    };

    let theme = ColorfulTheme::default();
    let name: String = Input::with_theme(&theme)
        .with_prompt("Your name")
        .interact_text()
        .map_err(prompt_error)?;
    let email: String = Input::with_theme(&theme)
        .with_prompt("Email")
        .interact_text()
        .map_err(prompt_error)?;
    let phone: String = Input::with_theme(&theme)
        .with_prompt("Phone (optional)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;
    let service = Select::with_theme(&theme)
        .with_prompt("Service of interest")
        .items(&SERVICES)
        .default(0)
        .interact()
        .map_err(prompt_error)?;
    let message: String = Input::with_theme(&theme)
        .with_prompt("Message")
        .interact_text()
        .map_err(prompt_error)?;

    let inquiry = ContactInquiry {
        name,
        email,
        phone: Some(phone).filter(|p| !p.trim().is_empty()),
        service: SERVICES[service].to_string(),
        message,
    };

    let pb = ui.typing_indicator("Sending your message...");
    let result = relay.submit_inquiry(&inquiry).await;
    pb.finish_and_clear();

    match result {
        Ok(_) => ui.print_success("Message sent! We'll get back to you within 24 hours."),
        Err(Error::Request(e)) => {
            tracing::error!(error = %e, "Contact inquiry transport failure");
            ui.print_error("Network error. Please try again later.");
        }
        Err(e) => ui.print_error(&e.to_string()),
    }
    println!();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let ui = ChatUI::new();

    match load_env_file() {
        Ok(Some(path)) => tracing::debug!(path = %path.display(), "Loaded environment file"),
        Ok(None) => {}
        Err(e) => ui.print_error(&e.to_string()),
    }

    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    });

    ui.print_welcome();

    let relay = config
        .relay_access_key
        .clone()
        .map(|key| FormRelay::new(key, config.relay_endpoint.clone()));
    let sink: Arc<dyn LeadSink> = match &relay {
        Some(relay) => {
            tracing::debug!(endpoint = relay.endpoint(), "Leads will be sent to the form relay");
            Arc::new(relay.clone())
        }
        None => {
            ui.print_notice("WEB3FORMS_ACCESS_KEY not set: leads will be logged, not sent.");
            Arc::new(LoggingSink)
        }
    };

    let assistant = VastuAssistant::new(
        config.assistant_api_key.clone(),
        config.assistant_model.clone(),
    )
    .with_base_url(config.assistant_base_url.clone());

    let menu = ["Project Concierge", "Ask VastuBot", "Contact the studio", "Exit"];
    loop {
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Main menu")
            .items(&menu)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        match selection {
            0 => run_concierge(&ui, &config, Arc::clone(&sink), &assistant).await?,
            1 => run_assistant(&ui, &assistant).await?,
            2 => run_contact_form(&ui, relay.as_ref()).await?,
            _ => {
                println!("\n{}", "🙏 Thank you for visiting VastuCraft!".yellow());
                break;
            }
        }
        println!();
    }
    Ok(())
}
