use synapse_chat::adapters::{FileNavigator, ReqwestHttpClient};
use synapse_chat::app::{ChatApp, UiEvent};
use synapse_chat::cli::{
    parse_args, usage, version_line, ChatRef, CliCommand, InputCommand, RunOptions, HELP,
};
use synapse_chat::config::{ClientConfig, ENV_SPACER_GAP};
use synapse_chat::error::ChatError;
use synapse_chat::models::Attachment;
use synapse_chat::render::PlainFormatter;
use synapse_chat::terminal::{
    setup_panic_hook, ui, InputLine, KeyAction, TerminalGuard, TerminalView, TERMINAL_SPACER_GAP,
};
use synapse_chat::traits::Navigator;

use color_eyre::Result;
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

type App = ChatApp<ReqwestHttpClient, TerminalView, FileNavigator>;

/// How often the loop checks the screen for changes made by the controller.
const TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let options = match parse_args(std::env::args()) {
        CliCommand::Version => {
            println!("{}", version_line());
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", usage());
            return Ok(());
        }
        CliCommand::Invalid(message) => {
            eprintln!("error: {}\n\n{}", message, usage());
            std::process::exit(2);
        }
        CliCommand::Run(options) => options,
    };

    color_eyre::install()?;
    init_logging();
    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(options))
}

/// Log to `<data_dir>/synapse/synapse.log`; the terminal belongs to the UI.
fn init_logging() {
    let Some(dir) = dirs::data_dir().map(|d| d.join("synapse")) else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("synapse.log"))
    else {
        return;
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("synapse_chat=info,synapse=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

async fn run(options: RunOptions) -> Result<()> {
    let mut config = ClientConfig::from_env();
    if std::env::var_os(ENV_SPACER_GAP).is_none() {
        config = config.with_spacer_gap(TERMINAL_SPACER_GAP);
    }
    if let Some(url) = options.api_url {
        config = config.with_api_base_url(url);
    }

    let location = FileNavigator::default_path()
        .unwrap_or_else(|| PathBuf::from(".synapse-location"));
    let mut navigator = FileNavigator::open(location);
    if let Some(chat) = options.chat.as_deref() {
        navigator.set_chat_id(Some(chat))?;
    }

    let mut guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;
    let size = terminal.size()?;

    let view = TerminalView::new(size.width, size.height);
    let app: App = ChatApp::new(
        ReqwestHttpClient::new(),
        view.clone(),
        navigator,
        Box::new(PlainFormatter),
        config,
    );
    tracing::info!(api = %app.config().api_base_url, "Starting synapse");

    let (jobs_tx, jobs_rx) = mpsc::unbounded_channel();
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    let controller = tokio::spawn(run_controller(app, jobs_rx, done_tx));

    let mut input = InputLine::new();
    let mut events = EventStream::new();
    let mut sending = false;
    let mut redraw = true;

    loop {
        let dirty = view.lock().take_dirty();
        if dirty || redraw {
            let screen = view.lock();
            terminal.draw(|f| ui::render(f, &screen, &input))?;
            redraw = false;
        }

        tokio::select! {
            _ = tokio::time::sleep(TICK) => {}

            finished = done_rx.recv() => match finished {
                Some(was_send) => sending &= !was_send,
                None => break,
            },

            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => {
                    redraw = true;
                    match input.handle_key(key) {
                        KeyAction::Quit => break,
                        KeyAction::Back => view.lock().show_messages(),
                        KeyAction::Submit(line) => {
                            let flow = submit(&line, &view, &jobs_tx, &mut sending).await;
                            if flow.is_break() {
                                break;
                            }
                        }
                        KeyAction::None => {}
                    }
                }
                Some(Ok(Event::Paste(text))) => {
                    input.insert_str(&text);
                    redraw = true;
                }
                Some(Ok(Event::Resize(width, height))) => view.lock().resize(width, height),
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::error!("Terminal input failed: {}", e);
                    break;
                }
                None => break,
            },
        }
    }

    tracing::info!("Exiting");
    controller.abort();
    guard.cleanup();
    Ok(())
}

/// Run controller work one job at a time, reporting each completion.
///
/// The flag sent back says whether the finished job was a send.
async fn run_controller(
    mut app: App,
    mut jobs: mpsc::UnboundedReceiver<UiEvent>,
    done: mpsc::UnboundedSender<bool>,
) {
    if let Err(e) = app.init().await {
        report(app.view(), "Startup sync failed", &e);
    }
    let _ = done.send(false);

    while let Some(event) = jobs.recv().await {
        let was_send = matches!(event, UiEvent::Send(_));
        if let Err(e) = app.handle(event).await {
            report(app.view(), "Event failed", &e);
        }
        if done.send(was_send).is_err() {
            break;
        }
    }
}

fn report(view: &TerminalView, context: &str, error: &ChatError) {
    tracing::warn!(code = error.error_code(), "{}: {}", context, error);
    view.lock().set_status(Some(error.user_message().as_str()));
}

/// Act on one submitted prompt line.
async fn submit(
    line: &str,
    view: &TerminalView,
    jobs: &mpsc::UnboundedSender<UiEvent>,
    sending: &mut bool,
) -> ControlFlow<()> {
    view.lock().set_status(None);

    let event = match InputCommand::parse(line) {
        InputCommand::Quit => return ControlFlow::Break(()),
        InputCommand::Empty => return ControlFlow::Continue(()),
        InputCommand::Help => {
            view.lock().show_notice(HELP);
            return ControlFlow::Continue(());
        }
        InputCommand::Invalid(message) => {
            view.lock().set_status(Some(message.as_str()));
            return ControlFlow::Continue(());
        }
        InputCommand::Message(text) => {
            if *sending {
                report(view, "Send rejected", &ChatError::SendInProgress);
                return ControlFlow::Continue(());
            }
            *sending = true;
            view.lock().show_messages();
            UiEvent::Send(text)
        }
        InputCommand::New => {
            view.lock().show_messages();
            UiEvent::NewChat
        }
        InputCommand::Chats => {
            view.lock().show_list();
            UiEvent::RefreshChats
        }
        InputCommand::Open(ChatRef::Id(id)) => {
            view.lock().show_messages();
            UiEvent::SelectChat(id)
        }
        InputCommand::Open(ChatRef::Index(n)) => {
            let mut screen = view.lock();
            match screen.chat_at(n).map(|c| c.id.clone()) {
                Some(id) => {
                    screen.show_messages();
                    UiEvent::SelectChat(id)
                }
                None => {
                    let message = format!("No conversation #{} (try /chats)", n);
                    screen.set_status(Some(message.as_str()));
                    return ControlFlow::Continue(());
                }
            }
        }
        InputCommand::Attach(path) => match Attachment::from_path(&path).await {
            Ok(attachment) => UiEvent::Attach(attachment),
            Err(e) => {
                tracing::warn!(path = %path.display(), "Attach failed: {}", e);
                let message = format!("Cannot attach {}: {}", path.display(), e);
                view.lock().set_status(Some(message.as_str()));
                return ControlFlow::Continue(());
            }
        },
        InputCommand::Detach => UiEvent::RemoveAttachment,
    };

    if jobs.send(event).is_err() {
        tracing::error!("Controller stopped; exiting");
        return ControlFlow::Break(());
    }
    ControlFlow::Continue(())
}
