use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::{LevelFilter, info};
use std::time::Duration;

use peregrine::config::EngineConfig;
use peregrine::engine::{CoachEngine, Message};
use peregrine::logging::{init_logger, parse_level};

use crossterm::event::{self, KeyCode, KeyEventKind};
use ratatui::{
    DefaultTerminal,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

#[derive(Parser, Debug)]
#[command(version, about = "Peregrine - Fitness Coach CLI", long_about = None)]
struct Args {
    /// SQLite file holding the coach's memory (overrides DATABASE_URL)
    #[arg(short, long, global = true)]
    database: Option<String>,
    /// off, error, warn, info, debug or trace (overrides PEREGRINE_LOG)
    #[arg(short, long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive chat with the coach
    Chat,
    /// Send a single message and print the reply
    Send { text: String },
    /// Print the persistent and combined context as JSON
    Context,
}

const NORMAL_HELP: &str = "i: type a message | j/k: scroll | c: clear conversation | q: quit";
const EDITING_HELP: &str = "Enter: send | Esc: cancel";

enum InputMode {
    Normal,
    Editing,
}

struct ChatScreen {
    messages: Vec<Message>,
    selected: Option<usize>,
    follow: bool,
    status_message: String,
    input_mode: InputMode,
    input_buffer: String,
}

impl ChatScreen {
    fn new() -> Self {
        Self {
            messages: Vec::new(),
            selected: None,
            follow: true,
            status_message: NORMAL_HELP.to_string(),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
        }
    }

    async fn refresh(&mut self, engine: &CoachEngine) {
        self.messages = engine.messages().await;
        if self.messages.is_empty() {
            self.selected = None;
        } else if self.follow {
            self.selected = Some(self.messages.len() - 1);
        } else if let Some(selected) = self.selected {
            self.selected = Some(selected.min(self.messages.len() - 1));
        }
    }

    fn scroll_down(&mut self) {
        if let Some(selected) = self.selected {
            if selected + 1 < self.messages.len() {
                self.selected = Some(selected + 1);
            }
            self.follow = selected + 2 >= self.messages.len();
        }
    }

    fn scroll_up(&mut self) {
        if let Some(selected) = self.selected {
            self.selected = Some(selected.saturating_sub(1));
            self.follow = false;
        }
    }

    fn enter_edit_mode(&mut self) {
        self.input_mode = InputMode::Editing;
        self.input_buffer.clear();
        self.status_message = EDITING_HELP.to_string();
    }

    fn leave_edit_mode(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.status_message = NORMAL_HELP.to_string();
    }

    async fn submit(&mut self, engine: &CoachEngine) -> Result<()> {
        let text = self.input_buffer.trim().to_string();
        if text.is_empty() {
            self.leave_edit_mode();
            return Ok(());
        }
        // The reply lands in the transcript on its own; no need to wait here.
        let _pending = engine.submit(text).await?;
        self.follow = true;
        self.leave_edit_mode();
        Ok(())
    }
}

fn render_message(message: &Message) -> String {
    let speaker = if message.is_from_user() { "You" } else { "Coach" };
    format!(
        "[{}] {}:\n{}\n",
        message.timestamp.format("%H:%M"),
        speaker,
        message.text.replace("**", "")
    )
}

async fn run_chat(mut terminal: DefaultTerminal, engine: CoachEngine) -> Result<()> {
    let mut screen = ChatScreen::new();

    loop {
        screen.refresh(&engine).await;
        let composing = engine.is_composing();

        terminal.draw(|frame| {
            let chunks = Layout::vertical([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
            ])
            .split(frame.area());

            // Header
            let header = Paragraph::new("Peregrine - Fitness Coach")
                .style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(header, chunks[0]);

            // Conversation
            if screen.messages.is_empty() {
                let empty_msg = Paragraph::new(
                    "No messages yet.\nPress 'i' and ask for a workout to get started!",
                )
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().borders(Borders::ALL).title("Conversation"));
                frame.render_widget(empty_msg, chunks[1]);
            } else {
                let items: Vec<ListItem> = screen
                    .messages
                    .iter()
                    .enumerate()
                    .map(|(idx, message)| {
                        let mut style = if message.is_from_user() {
                            Style::default().fg(Color::Yellow)
                        } else {
                            Style::default()
                        };
                        if Some(idx) == screen.selected && !screen.follow {
                            style = style.add_modifier(Modifier::REVERSED);
                        }
                        ListItem::new(render_message(message)).style(style)
                    })
                    .collect();

                let title = if composing {
                    "Conversation (coach is typing...)".to_string()
                } else {
                    format!("Conversation ({} messages)", screen.messages.len())
                };
                let list =
                    List::new(items).block(Block::default().borders(Borders::ALL).title(title));

                let mut list_state = ListState::default();
                list_state.select(screen.selected);

                frame.render_stateful_widget(list, chunks[1], &mut list_state);
            }

            // Footer: input box or status
            let footer = match screen.input_mode {
                InputMode::Normal => Paragraph::new(screen.status_message.as_str())
                    .style(Style::default().fg(Color::White))
                    .block(Block::default().borders(Borders::ALL).title("Status")),
                InputMode::Editing => Paragraph::new(screen.input_buffer.as_str())
                    .style(Style::default().fg(Color::Yellow))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(screen.status_message.as_str()),
                    ),
            };
            frame.render_widget(footer, chunks[2]);
        })?;

        // Poll so replies from the worker show up without a key press.
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        if let event::Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match screen.input_mode {
                InputMode::Normal => match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => {
                        return Ok(());
                    }
                    KeyCode::Char('j') | KeyCode::Down => {
                        screen.scroll_down();
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        screen.scroll_up();
                    }
                    KeyCode::Char('i') | KeyCode::Char('I') | KeyCode::Enter => {
                        screen.enter_edit_mode();
                    }
                    KeyCode::Char('c') | KeyCode::Char('C') => {
                        engine.clear_conversation().await;
                        screen.follow = true;
                        screen.status_message = "Conversation cleared".to_string();
                    }
                    _ => {}
                },
                InputMode::Editing => match key.code {
                    KeyCode::Enter => {
                        if let Err(e) = screen.submit(&engine).await {
                            screen.leave_edit_mode();
                            screen.status_message = format!("Error sending message: {}", e);
                        }
                    }
                    KeyCode::Esc => {
                        screen.leave_edit_mode();
                    }
                    KeyCode::Char(c) => {
                        screen.input_buffer.push(c);
                    }
                    KeyCode::Backspace => {
                        screen.input_buffer.pop();
                    }
                    _ => {}
                },
            }
        }
    }
}

fn build_config(args: &Args) -> Result<EngineConfig> {
    let mut config = EngineConfig::from_env();
    if let Some(database) = &args.database {
        config.database_path = Some(database.clone());
    }
    if let Some(level) = &args.log_level {
        config.log_level = parse_level(level)
            .ok_or_else(|| anyhow::anyhow!("Unknown log level: {}", level))?;
    }
    Ok(config)
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();
    let config = build_config(&args)?;

    match args.command {
        Commands::Chat => {
            // Log lines on stdout would tear the terminal UI.
            init_logger(LevelFilter::Off);
            let engine = CoachEngine::open(&config).await?;
            let terminal = ratatui::init();
            let result = run_chat(terminal, engine).await;
            ratatui::restore();
            result
        }
        Commands::Send { text } => {
            init_logger(config.log_level);
            let engine = CoachEngine::open(&config).await?;
            info!("Sending one message to the coach");
            let reply = engine.send_message(text).await?;
            println!("{}", reply.text);
            Ok(())
        }
        Commands::Context => {
            init_logger(config.log_level);
            let engine = CoachEngine::open(&config).await?;
            let dump = serde_json::json!({
                "persistent": engine.persistent_context().await,
                "combined": engine.combined_context().await,
            });
            println!("{}", serde_json::to_string_pretty(&dump)?);
            Ok(())
        }
    }
}
