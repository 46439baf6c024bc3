use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use engine::{PlayerId, PlayerRef, SlotIndex, TransferController, TransferEvent, TransferOutcome};
use tokio::sync::mpsc;

use api_types::transfer::TransferMade;

use crate::{
    client::{self, Client, ClientError},
    config::AppConfig,
    error::{AppError, Result},
    feed::{CandidateFeed, FilterTicket},
    ui::{self, keymap::AppAction},
};

pub const NO_SELECTION_MESSAGE: &str = "Please select a player from your team first";
pub const SUBMISSION_PENDING_MESSAGE: &str = "Submission in progress, transfers are locked";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Transfers,
    /// Shown after the remote service accepted the roster.
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Roster,
    Candidates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A message that must be acknowledged before anything else is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Side effects requested by a state transition, run by [`App`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Filter(FilterTicket),
    Submit(Vec<PlayerId>),
    Quit,
}

/// Results of background requests, fed back into the state machine.
#[derive(Debug)]
pub enum NetworkMessage {
    Filter {
        seq: u64,
        result: std::result::Result<Vec<PlayerRef>, ClientError>,
    },
    Submission(std::result::Result<TransferMade, ClientError>),
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub focus: Pane,
    pub transfers: TransferController,
    pub roster_cursor: usize,
    pub feed: CandidateFeed,
    pub editing_filter: bool,
    pub notice: Option<Notice>,
    pub status: Option<String>,
    pub submitting: bool,
    pub confirmation: Option<String>,
    pub base_url: String,
}

impl AppState {
    pub fn new(transfers: TransferController, initial_filter: &str, base_url: &str) -> Self {
        Self {
            screen: Screen::Transfers,
            focus: Pane::Roster,
            transfers,
            roster_cursor: 0,
            feed: CandidateFeed::new(initial_filter),
            editing_filter: false,
            notice: None,
            status: None,
            submitting: false,
            confirmation: None,
            base_url: base_url.to_string(),
        }
    }

    /// Query that fills the candidate list when the view opens.
    pub fn initial_query(&mut self) -> Command {
        Command::Filter(self.feed.begin_query())
    }

    pub fn on_action(&mut self, action: AppAction) -> Result<Option<Command>> {
        if action == AppAction::Interrupt {
            return Ok(Some(Command::Quit));
        }

        if self.notice.is_some() {
            if matches!(action, AppAction::Activate | AppAction::Cancel) {
                self.notice = None;
            }
            return Ok(None);
        }

        match self.screen {
            Screen::Submitted => Ok(self.on_submitted_action(action)),
            Screen::Transfers if self.editing_filter => Ok(self.on_filter_action(action)),
            Screen::Transfers => self.on_transfers_action(action),
        }
    }

    fn on_submitted_action(&mut self, action: AppAction) -> Option<Command> {
        match action {
            AppAction::Activate | AppAction::Cancel => {
                self.screen = Screen::Transfers;
                self.confirmation = None;
                self.roster_cursor = 0;
                self.focus = Pane::Roster;
                // Fresh transfer view: reload the candidates as well.
                Some(Command::Filter(self.feed.begin_query()))
            }
            AppAction::Input('q') => Some(Command::Quit),
            _ => None,
        }
    }

    fn on_filter_action(&mut self, action: AppAction) -> Option<Command> {
        match action {
            AppAction::Input(ch) => Some(Command::Filter(self.feed.push_char(ch))),
            AppAction::Backspace => Some(Command::Filter(self.feed.pop_char())),
            AppAction::Activate | AppAction::Cancel | AppAction::NextPane => {
                self.editing_filter = false;
                None
            }
            _ => None,
        }
    }

    fn on_transfers_action(&mut self, action: AppAction) -> Result<Option<Command>> {
        match action {
            AppAction::NextPane => {
                self.focus = match self.focus {
                    Pane::Roster => Pane::Candidates,
                    Pane::Candidates => Pane::Roster,
                };
            }
            AppAction::Up | AppAction::Input('k') => self.move_cursor(false),
            AppAction::Down | AppAction::Input('j') => self.move_cursor(true),
            AppAction::Activate => self.activate()?,
            AppAction::Cancel | AppAction::Input('c') => {
                self.apply_event(TransferEvent::ClearSelection)?;
            }
            AppAction::Input('/') => {
                self.editing_filter = true;
            }
            AppAction::Input('p') => return Ok(Some(Command::Filter(self.feed.cycle_preset()))),
            AppAction::Input('r') => return Ok(Some(Command::Filter(self.feed.begin_query()))),
            AppAction::Input('s') => return Ok(self.submit()),
            AppAction::Input('q') => return Ok(Some(Command::Quit)),
            _ => {}
        }
        Ok(None)
    }

    fn move_cursor(&mut self, down: bool) {
        match (self.focus, down) {
            (Pane::Roster, true) => {
                let last = self.transfers.roster().len().saturating_sub(1);
                self.roster_cursor = (self.roster_cursor + 1).min(last);
            }
            (Pane::Roster, false) => self.roster_cursor = self.roster_cursor.saturating_sub(1),
            (Pane::Candidates, true) => self.feed.select_next(),
            (Pane::Candidates, false) => self.feed.select_prev(),
        }
    }

    fn activate(&mut self) -> Result<()> {
        match self.focus {
            Pane::Roster => self.apply_event(TransferEvent::SelectEntry(SlotIndex(self.roster_cursor))),
            Pane::Candidates => {
                // The ids in flight are the ones the confirmation reports.
                if self.submitting {
                    self.status = Some(SUBMISSION_PENDING_MESSAGE.to_string());
                    return Ok(());
                }
                // Resolved against the list on screen right now.
                let Some(candidate) = self.feed.selected().cloned() else {
                    return Ok(());
                };
                self.apply_event(TransferEvent::PickCandidate(candidate))
            }
        }
    }

    fn apply_event(&mut self, event: TransferEvent) -> Result<()> {
        match self.transfers.handle(event)? {
            TransferOutcome::Armed(slot) => {
                let name = &self.transfers.roster().entry(slot)?.player.name;
                self.status = Some(format!("{name} selected for replacement"));
            }
            TransferOutcome::Cleared => self.status = None,
            TransferOutcome::Committed(receipt) => {
                self.status = Some(format!(
                    "{} in for {}, {} remaining",
                    receipt.incoming.name, receipt.outgoing.name, receipt.remaining_after
                ));
            }
            TransferOutcome::Rejected(reason) => self.raise(NoticeLevel::Error, reason.to_string()),
            TransferOutcome::NoSelection => self.raise(NoticeLevel::Info, NO_SELECTION_MESSAGE),
        }
        Ok(())
    }

    fn submit(&mut self) -> Option<Command> {
        if self.submitting {
            self.status = Some(SUBMISSION_PENDING_MESSAGE.to_string());
            return None;
        }
        self.submitting = true;
        self.status = Some("Submitting transfers...".to_string());
        Some(Command::Submit(self.transfers.proposed_ids()))
    }

    pub fn on_network(&mut self, message: NetworkMessage) {
        match message {
            NetworkMessage::Filter { seq, result } => {
                let result = result.map_err(|err| client::filter_message_for_error(&err));
                self.feed.apply(seq, result);
            }
            NetworkMessage::Submission(Ok(made)) => {
                tracing::info!(message = %made.message, "transfers accepted");
                self.submitting = false;
                self.status = None;
                self.transfers.rebase();
                self.raise(NoticeLevel::Success, made.message.clone());
                self.confirmation = Some(made.message);
                self.screen = Screen::Submitted;
            }
            NetworkMessage::Submission(Err(err)) => {
                tracing::warn!(%err, "transfer submission failed");
                self.submitting = false;
                self.status = None;
                self.raise(NoticeLevel::Error, client::submission_message_for_error(&err));
            }
        }
    }

    fn raise(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notice = Some(Notice {
            level,
            message: message.into(),
        });
    }
}

pub struct App {
    client: Client,
    pub state: AppState,
    tx: mpsc::UnboundedSender<NetworkMessage>,
    rx: mpsc::UnboundedReceiver<NetworkMessage>,
    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig, transfers: TransferController) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let state = AppState::new(transfers, &config.initial_filter, &config.base_url);
        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            client,
            state,
            tx,
            rx,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(50);
        let initial = self.state.initial_query();
        self.execute(initial);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let action = ui::keymap::map_key(key);
                        if let Some(command) = self.state.on_action(action)? {
                            self.execute(command);
                        }
                    }
                }
            }

            while let Ok(message) = self.rx.try_recv() {
                self.state.on_network(message);
            }

            tokio::task::yield_now().await;
        }

        Ok(())
    }

    /// Runs a command without waiting for it: requests complete on their own
    /// task and report back through the channel.
    fn execute(&mut self, command: Command) {
        match command {
            Command::Quit => self.should_quit = true,
            Command::Filter(ticket) => {
                let client = self.client.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = client.filter(&ticket.argument).await;
                    let _ = tx.send(NetworkMessage::Filter {
                        seq: ticket.seq,
                        result,
                    });
                });
            }
            Command::Submit(players) => {
                tracing::info!(players = players.len(), "submitting roster");
                let client = self.client.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = client.make_transfer(&players).await;
                    let _ = tx.send(NetworkMessage::Submission(result));
                });
            }
        }
    }
}
