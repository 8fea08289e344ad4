use chrono::{DateTime, Local, Utc};
use colored::*;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::Duration;
use vastucraft::{AssistantReply, Sender, TranscriptEntry};

pub struct ChatUI {
    term: Term,
}

impl ChatUI {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    pub fn print_welcome(&self) {
        let _ = self.term.clear_screen();
        println!(
            "{}",
            "╔═══════════════════════════════════════════════════════════╗".bright_yellow()
        );
        println!(
            "{}",
            "║              🏛️  VastuCraft AI Studio  🏛️                 ║".bright_yellow()
        );
        println!(
            "{}",
            "╚═══════════════════════════════════════════════════════════╝".bright_yellow()
        );
        println!();
        println!("{}", "What would you like to do?".yellow());
        println!(
            "  • {} - Plan your project with our guided concierge",
            "Project Concierge".cyan()
        );
        println!(
            "  • {} - Ask quick questions about Vastu and smart construction",
            "Ask VastuBot".cyan()
        );
        println!("  • {} - Send a message to the studio", "Contact".cyan());
        println!("{}", "─".repeat(60).dimmed());
        println!();
    }

    pub fn print_concierge_help(&self) {
        println!("\n{}", "Concierge commands:".yellow().bold());
        println!("  {} - Start a new consultation", "/reset".cyan());
        println!("  {} - Save the transcript", "/save".cyan());
        println!("  {} - Show this help message", "/help".cyan());
        println!("  {} or {} - Back to the main menu", "/exit".cyan(), "/quit".cyan());
        println!();
    }

    pub fn print_entry(&self, entry: &TranscriptEntry) {
        let timestamp = local_time(entry.sent_at);
        match entry.sender {
            Sender::User => {
                println!(
                    "{} {} {}",
                    format!("[{}]", timestamp).dimmed(),
                    "You:".green().bold(),
                    entry.text
                );
            }
            Sender::Bot => {
                println!(
                    "{} {} {}",
                    format!("[{}]", timestamp).dimmed(),
                    "Concierge:".yellow().bold(),
                    entry.text
                );
            }
        }
    }

    pub fn print_assistant_reply(&self, reply: &AssistantReply) {
        let timestamp = Local::now().format("%H:%M:%S");
        let label = if reply.is_error {
            "VastuBot:".red().bold()
        } else {
            "VastuBot:".blue().bold()
        };
        println!("{} {} {}", format!("[{}]", timestamp).dimmed(), label, reply.text);
    }

    /// Spinner shown while a reply is pending
    pub fn typing_indicator(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.yellow} {msg}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn print_success(&self, message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    pub fn print_notice(&self, message: &str) {
        println!("{} {}", "ℹ".blue(), message.dimmed());
    }

    pub fn print_error(&self, error: &str) {
        println!("{} {}", "Error:".red().bold(), error);
    }
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}
