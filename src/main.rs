//! Line-oriented driver and entry point.
//!
//! Wires the library to a terminal: configuration comes from `key=value`
//! arguments, each stdin line is mapped to an [`Event`], fetches run on the
//! background worker, and a frame is printed after every visible change.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │      Driver thread      │
//! │  ┌──────────────────┐   │
//! │  │  Store(AppState) │   │  ← event handling, view models
//! │  └──────────────────┘   │
//! │          │  mpsc        │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │  CatalogWorker   │   │  ← JSON catalog, asset probes
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Commands
//!
//! Table and selection:
//! - `filter <title|platform|region|edition|genre> [text]`: Set or clear a column filter
//! - `dates <from|-> <to|->`: Release date range, `-` leaves a side open
//! - `clear`: Clear every filter
//! - `sort <column>`: Sort by a column, again to reverse
//! - `page <first|prev|next|last|N>`, `size <10|20>`
//! - `row <N>`: Click row N of the visible page
//! - `title <game id>`, `platform|region|edition [code]`, `confirm`
//!
//! Keys:
//! - `tab`: Show or hide the selection panel
//! - `1`..`5`: Case, cover, disc, manual, additional
//! - `e`: Open or close the case, flip the cover
//! - `q`: Info box, cover text, manual viewer
//! - `a`/`d`: Previous or next manual spread
//! - `up`/`down`/`r`: Zoom in, out, reset
//! - `esc`: Close the viewer, then the panel
//! - `dismiss`, `help`, `quit`

#![allow(clippy::multiple_crate_versions)]

use chrono::NaiveDate;
use game_library::app::SubscriptionId;
use game_library::selection::SelectionLevel;
use game_library::table::{DateRange, SortKey, TextColumn};
use game_library::worker::{WorkerHandle, WorkerResponse};
use game_library::{Action, Config, Event, Store, ViewMode};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::rc::Rc;
use std::time::Duration;

/// How long the driver waits for an outstanding worker response.
const WORKER_TIMEOUT: Duration = Duration::from_secs(5);

const DEFAULT_ROWS: usize = 40;
const DEFAULT_COLS: usize = 120;

/// Driver state: the store plus the worker endpoint.
struct Driver {
    store: Store,
    worker: WorkerHandle,

    /// Requests posted but not yet answered.
    in_flight: usize,

    /// Set by the store subscription when state changed.
    dirty: Rc<Cell<bool>>,
    subscription: SubscriptionId,

    rows: usize,
    cols: usize,
    running: bool,
}

fn main() -> ExitCode {
    let config = Config::from_map(&parse_args(std::env::args().skip(1)));
    let trace_file = game_library::observability::init_tracing(&config);

    let span = tracing::debug_span!("driver_start");
    let guard = span.enter();
    tracing::debug!(?config, ?trace_file, "configuration parsed");

    let worker = match game_library::spawn_worker(&config) {
        Ok(worker) => worker,
        Err(e) => {
            eprintln!("game-library: {e}");
            eprintln!("catalog: {}", config.catalog_path().display());
            return ExitCode::FAILURE;
        }
    };

    let mut driver = Driver::new(game_library::initialize(&config), worker);
    drop(guard);

    match driver.run(io::stdin().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("game-library: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Collects `key=value` arguments. Arguments without `=` are ignored.
fn parse_args(args: impl Iterator<Item = String>) -> BTreeMap<String, String> {
    args.filter_map(|arg| {
        arg.split_once('=')
            .map(|(key, value)| (key.trim().to_string(), value.to_string()))
    })
    .collect()
}

impl Driver {
    fn new(state: game_library::AppState, worker: WorkerHandle) -> Self {
        let mut store = Store::new(state);
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        let subscription = store.subscribe(move |_| flag.set(true));

        Self {
            store,
            worker,
            in_flight: 0,
            dirty,
            subscription,
            rows: env_size("LINES", DEFAULT_ROWS),
            cols: env_size("COLUMNS", DEFAULT_COLS),
            running: true,
        }
    }

    fn run(&mut self, input: impl BufRead) -> game_library::Result<()> {
        self.dispatch(&Event::Start)?;
        self.pump_worker()?;
        self.present();

        for line in input.lines() {
            let line = line?;
            let command = line.trim();
            if command.is_empty() {
                continue;
            }

            let span = tracing::debug_span!("driver_command", command = %command);
            let _guard = span.enter();

            match map_command(command) {
                Ok(Some(event)) => {
                    if let Err(e) = self.dispatch(&event) {
                        tracing::debug!(error = %e, "command rejected");
                        println!("! {e}");
                    }
                }
                Ok(None) => {
                    println!("{HELP}");
                    continue;
                }
                Err(message) => {
                    println!("! {message}");
                    continue;
                }
            }

            self.pump_worker()?;
            if !self.running {
                break;
            }
            self.present();
        }

        self.store.unsubscribe(self.subscription);
        tracing::debug!("driver loop finished");
        Ok(())
    }

    fn dispatch(&mut self, event: &Event) -> game_library::Result<()> {
        let actions = self.store.dispatch(event)?;
        tracing::debug!(action_count = actions.len(), "event handled");
        for action in actions {
            self.execute_action(action)?;
        }
        Ok(())
    }

    /// Waits for every outstanding response, dispatching each as it arrives.
    ///
    /// A response may trigger follow-up requests (asset probes after an
    /// auto-commit), which are waited for too.
    fn pump_worker(&mut self) -> game_library::Result<()> {
        while self.in_flight > 0 {
            let Some(response) = self.worker.recv_timeout(WORKER_TIMEOUT)? else {
                tracing::warn!(in_flight = self.in_flight, "worker response timed out");
                break;
            };
            self.in_flight -= 1;
            self.deliver(response);
        }

        // Late answers to requests that timed out earlier.
        while let Some(response) = self.worker.try_recv()? {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.deliver(response);
        }
        Ok(())
    }

    fn deliver(&mut self, response: WorkerResponse) {
        if let Err(e) = self.dispatch(&Event::WorkerResponse(response)) {
            tracing::warn!(error = %e, "worker response rejected");
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) -> game_library::Result<()> {
        match action {
            Action::PostToWorker(message) => {
                self.worker.post(message)?;
                self.in_flight += 1;
            }
            Action::PlaySound { cue, volume } => {
                tracing::info!(%cue, volume, "sound cue");
                println!("♪ {cue} ({volume:.1})");
            }
            Action::Quit => {
                tracing::debug!("quit requested");
                self.running = false;
            }
        }
        Ok(())
    }

    fn present(&self) {
        if !self.dirty.replace(false) {
            return;
        }
        let frame = game_library::ui::render(self.store.state(), self.rows, self.cols);
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(frame.as_bytes());
        let _ = writeln!(stdout);
        let _ = stdout.flush();
    }
}

fn env_size(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .filter(|size| *size > 0)
        .unwrap_or(default)
}

const HELP: &str = "\
commands: filter <column> [text] | dates <from|-> <to|-> | clear | sort <column>
          page <first|prev|next|last|N> | size <10|20> | row <N>
          title <id> | platform|region|edition [code] | confirm | dismiss
keys:     tab | 1-5 | e | q | a | d | up | down | r | esc | quit";

/// Maps one input line to an event.
///
/// `Ok(None)` asks for the help text; `Err` carries a usage message.
fn map_command(line: &str) -> Result<Option<Event>, String> {
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let mut chars = word.chars();
    if let (Some(key), None) = (chars.next(), chars.next()) {
        if let Some(mode) = ViewMode::from_key(key) {
            return Ok(Some(Event::SelectMode(mode)));
        }
    }

    let event = match word.to_lowercase().as_str() {
        "help" | "?" => return Ok(None),
        "quit" | "exit" => Event::Quit,
        "tab" => Event::ToggleCatalogPanel,
        "e" => Event::Interact,
        "q" => Event::Inspect,
        "esc" => Event::Escape,
        "a" => Event::PreviousManualPage,
        "d" => Event::NextManualPage,
        "up" | "+" => Event::ZoomIn,
        "down" | "-" => Event::ZoomOut,
        "r" => Event::ResetZoom,
        "dismiss" => Event::DismissError,
        "confirm" => Event::ConfirmSelection,
        "clear" => Event::ClearFilters,
        "mode" => Event::SelectMode(
            ViewMode::from_name(rest).ok_or_else(|| format!("unknown mode: {rest}"))?,
        ),
        "filter" => map_filter(rest)?,
        "dates" => map_dates(rest)?,
        "sort" => Event::SortBy(SortKey::from_name(rest).ok_or_else(|| format!("unknown column: {rest}"))?),
        "page" => map_page(rest)?,
        "size" => Event::SetPageSize(parse_number(rest)?),
        "row" => Event::RowClicked(parse_number(rest)?),
        "title" => Event::SelectTitle(rest.parse().map_err(|_| format!("not a game id: {rest}"))?),
        "platform" => select(SelectionLevel::Platform, rest),
        "region" => select(SelectionLevel::Region, rest),
        "edition" => select(SelectionLevel::Edition, rest),
        other => return Err(format!("unknown command: {other} (try help)")),
    };
    Ok(Some(event))
}

fn select(level: SelectionLevel, value: &str) -> Event {
    Event::SelectOption {
        level,
        value: value.to_string(),
    }
}

fn map_filter(rest: &str) -> Result<Event, String> {
    let (column, value) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(column, value)| (column, value.trim()));

    if column.eq_ignore_ascii_case("genre") {
        return Ok(Event::FilterGenre(value.to_string()));
    }
    let column = TextColumn::from_name(column).ok_or_else(|| format!("unknown filter column: {column}"))?;
    Ok(Event::FilterText {
        column,
        value: value.to_string(),
    })
}

fn map_dates(rest: &str) -> Result<Event, String> {
    let mut bounds = rest.split_whitespace();
    let start = parse_bound(bounds.next())?;
    let end = parse_bound(bounds.next())?;
    Ok(Event::FilterDates(DateRange { start, end }))
}

fn parse_bound(raw: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match raw {
        None | Some("-") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| format!("bad date {raw}: {e}")),
    }
}

fn map_page(rest: &str) -> Result<Event, String> {
    Ok(match rest.to_lowercase().as_str() {
        "first" => Event::FirstPage,
        "prev" | "previous" => Event::PreviousPage,
        "next" => Event::NextPage,
        "last" => Event::LastPage,
        number => Event::GoToPage(parse_number(number)?),
    })
}

fn parse_number(raw: &str) -> Result<usize, String> {
    raw.trim().parse().map_err(|_| format!("not a number: {raw}"))
}

impl std::fmt::Debug for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("in_flight", &self.in_flight)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}
