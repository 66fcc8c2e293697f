//! Command dispatcher and interactive loop.
//!
//! [`UciHandler`] owns all process-wide front-end state: the option table,
//! the current position and its state chain, the engine collaborators and
//! the output. Handlers take one command at a time; malformed input degrades
//! to a no-op or a partial effect, and only an unknown option name is
//! reported back to the GUI.

use std::io::{BufRead, Write};
use std::time::Instant;

use crate::engine::{Engine, Search, SearchLimits, Tablebases, TranspositionTable};
use crate::position::Position;
use crate::states::PositionHistory;

use super::command::{parse_uci_command, UciCommand};
use super::error::{OptionError, UciError};
use super::options::{parse_setoption, OptionAction, OptionsMap};
use super::print::{self, Output};
use super::{parse_limits, to_move, START_FEN};

/// Whether the loop should keep reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    Continue,
    Quit,
}

type PositionOf<S> = <S as Search>::Position;

pub struct UciHandler<S: Search, T, B, W> {
    options: OptionsMap,
    position: PositionOf<S>,
    history: PositionHistory<PositionOf<S>>,
    /// False while the last setup was rejected; the position is unbound then
    position_set: bool,
    engine: Engine<S, T, B>,
    out: Output<W>,
}

impl<S, T, B, W> UciHandler<S, T, B, W>
where
    S: Search,
    T: TranspositionTable,
    B: Tablebases,
    W: Write + Send + 'static,
{
    /// Create a handler with default options, set up at the start position
    #[must_use]
    pub fn new(engine: Engine<S, T, B>, out: Output<W>) -> Self {
        let mut handler = UciHandler {
            options: OptionsMap::new(),
            position: <S::Position as Default>::default(),
            history: PositionHistory::new(),
            position_set: false,
            engine,
            out,
        };
        let chess960 = handler.options.chess960();
        handler.setup(START_FEN, chess960);
        handler
    }

    #[must_use]
    pub fn options(&self) -> &OptionsMap {
        &self.options
    }

    #[must_use]
    pub fn position(&self) -> &PositionOf<S> {
        &self.position
    }

    #[must_use]
    pub fn history(&self) -> &PositionHistory<PositionOf<S>> {
        &self.history
    }

    #[must_use]
    pub fn engine(&self) -> &Engine<S, T, B> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<S, T, B> {
        &mut self.engine
    }

    #[must_use]
    pub fn output(&self) -> &Output<W> {
        &self.out
    }

    /// Read commands until `quit` or end of input.
    ///
    /// A search still running at end of input is allowed to finish.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<(), UciError> {
        for line in input.lines() {
            if self.execute(&line?) == CommandResult::Quit {
                break;
            }
        }
        self.engine.threads_mut().wait_for_search_finished();
        Ok(())
    }

    /// Handle one protocol line
    pub fn execute(&mut self, line: &str) -> CommandResult {
        let Some(cmd) = parse_uci_command(line) else {
            return CommandResult::Continue;
        };

        match cmd {
            UciCommand::Uci => {
                print::print_id(&self.out);
                self.out.line(&self.options);
                self.out.line("uciok");
            }
            UciCommand::IsReady => print::print_ready(&self.out),
            UciCommand::UciNewGame => self.new_game(),
            UciCommand::Position(args) => self.position_command(&args),
            UciCommand::SetOption(args) => self.setoption(&args),
            UciCommand::Go(args) => self.go(&args),
            UciCommand::Stop => self.engine.threads().stop(),
            UciCommand::PonderHit => self.engine.threads().ponderhit(),
            UciCommand::Quit => {
                self.engine.threads().stop();
                self.engine.threads_mut().wait_for_search_finished();
                return CommandResult::Quit;
            }
            UciCommand::Unknown(text) => log::debug!("ignoring unknown command '{text}'"),
        }

        CommandResult::Continue
    }

    /// `position (startpos | fen <fen>) [moves <m1> ... <mk>]`
    ///
    /// Any other first token leaves everything untouched. The move list stops
    /// silently at the first token that is not a legal move; moves before it
    /// stay applied.
    pub fn position_command(&mut self, args: &[&str]) {
        let mut tokens = args.iter().copied();

        let descriptor = match tokens.next() {
            Some("startpos") => {
                // Skip the "moves" marker, if any
                tokens.next();
                START_FEN.to_string()
            }
            Some("fen") => tokens
                .by_ref()
                .take_while(|&t| t != "moves")
                .collect::<Vec<_>>()
                .join(" "),
            other => {
                log::debug!("ignoring position command starting with {other:?}");
                return;
            }
        };

        let chess960 = self.options.chess960();
        if !self.setup(&descriptor, chess960) {
            return;
        }

        for token in tokens {
            match to_move(&self.position, token) {
                Some(m) if m.is_ok() => self.history.apply_move(&mut self.position, m),
                _ => {
                    log::debug!("move list stops at '{token}'");
                    break;
                }
            }
        }
    }

    /// `setoption name <name> [value <value>]`
    pub fn setoption(&mut self, args: &[&str]) {
        let (name, value) = parse_setoption(args);

        // Plain values take effect at once; only collaborator actions wait
        // for a running search.
        match self.options.set(&name, &value) {
            Ok(Some(action)) => self.apply_option_action(action),
            Ok(None) => {}
            Err(e @ OptionError::NoSuchOption { .. }) => self.out.line(e),
            Err(e) => log::debug!("{e}"),
        }
    }

    fn apply_option_action(&mut self, action: OptionAction) {
        match action {
            OptionAction::ResizeHash(mb) => self.engine.resize_hash(mb),
            OptionAction::ClearHash => self.engine.threads_mut().clear(),
            OptionAction::InitTablebases(path) => self.engine.init_tablebases(&path),
        }
    }

    /// Tokenized `go`: parse limits against the current position and start
    /// searching without waiting for the result.
    pub fn go(&mut self, args: &[&str]) {
        let start_time = Instant::now();
        if !self.position_set {
            log::warn!("go ignored: no valid position is set");
            return;
        }
        let limits = parse_limits(&self.position, args, start_time);
        if let Err(e) = self.start_search(limits) {
            log::error!("{e}");
        }
    }

    /// Batch `go`: echo `descriptor`, set it up from scratch with standard
    /// castling notation, search it with engine-default limits and wait for
    /// the result.
    ///
    /// A descriptor the position rejects is echoed but not searched.
    pub fn go_descriptor(&mut self, descriptor: &str) {
        let start_time = Instant::now();
        self.out.text(print::format_descriptor_echo(descriptor));

        if !self.setup(descriptor, false) {
            self.out.line("");
            return;
        }

        match self.start_search(SearchLimits::new(start_time)) {
            Ok(()) => self.engine.threads_mut().wait_for_search_finished(),
            Err(e) => {
                log::error!("{e}");
                self.out.line("");
            }
        }
    }

    /// The `ucinewgame` reset
    pub fn new_game(&mut self) {
        let hash_mb = self.options.hash_mb();
        let path = self.options.syzygy_path().to_string();
        self.engine.new_game(hash_mb, &path);
    }

    /// Reset the history and replace the position. On rejection the position
    /// is left unset and `false` is returned.
    fn setup(&mut self, descriptor: &str, chess960: bool) -> bool {
        self.engine.threads_mut().wait_for_search_finished();
        let worker = self.engine.threads().main();

        match self.history.setup(descriptor, chess960, worker) {
            Ok(pos) => {
                self.position = pos;
                self.position_set = true;
                true
            }
            Err(e) => {
                log::warn!("rejected position '{descriptor}': {e}");
                self.position = <S::Position as Default>::default();
                self.position_set = false;
                false
            }
        }
    }

    fn start_search(&mut self, limits: SearchLimits) -> Result<(), UciError> {
        let out = self.out.clone();
        let time = std::sync::Arc::clone(self.engine.time());
        self.engine
            .threads_mut()
            .start_thinking(
                &self.position,
                self.history.states(),
                limits,
                time,
                move |pos, outcome| print::print_outcome(&out, &outcome, pos.is_chess960()),
            )
            .map_err(UciError::SpawnSearch)
    }
}
