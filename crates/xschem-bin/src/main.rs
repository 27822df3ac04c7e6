//! Entrypoint for the editing engine (spec §6's CLI surface). Wires the
//! `Editor` value to a clap-parsed `Args`, the no-op stand-ins for the
//! three out-of-scope collaborators (a real GUI renderer, a Tcl
//! interpreter, and the `.sch`/`.sym` parser all live outside this
//! crate), and drives either a single batch pass or an interactive
//! console loop over an async event pump, following `ox-bin`'s
//! `AppStartup`/logging/panic-hook shape.

mod console;
mod editor;

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Once;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossbeam_channel::{Receiver, Sender, unbounded};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use console::ConsoleOutcome;
use editor::Editor;
use xschem_io::{NoopRenderer, NoopScriptBridge, NoopSchematicIo};

/// CLI arguments (spec §6): `-b` batch mode, `-s`/`-y` select which kind
/// of file the session edits, `--tcl` injects a setup script before any
/// file is loaded.
#[derive(Parser, Debug)]
#[command(name = "xschem", version, about = "Schematic and symbol capture")]
struct Args {
    /// Schematic or symbol file to open at startup.
    pub path: Option<PathBuf>,

    /// Optional configuration file path (overrides discovery of `xschem.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Batch mode: run any `--tcl` script and/or load `path`, then exit
    /// without entering the console loop.
    #[arg(short = 'b', long = "batch")]
    pub batch: bool,

    /// Force schematic-editing mode regardless of the path's extension.
    #[arg(short = 's', long = "schematic")]
    pub schematic: bool,

    /// Force symbol-editing mode regardless of the path's extension.
    #[arg(short = 'y', long = "symbol")]
    pub symbol: bool,

    /// A command string evaluated through the scripting bridge before
    /// `path` is loaded.
    #[arg(long = "tcl")]
    pub tcl: Option<String>,
}

enum InputLine {
    Line(String),
    Eof,
}

fn configure_logging() -> Result<Option<WorkerGuard>> {
    let log_dir = std::path::Path::new(".");
    let log_path = log_dir.join("xschem.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "xschem.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Ok(Some(guard)),
        Err(_) => Ok(None),
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

/// Spawns a background thread reading stdin lines into `tx`, so the
/// async event pump can select between console input and the tick
/// source without blocking on a synchronous read.
fn spawn_stdin_reader(tx: Sender<InputLine>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(l) => {
                    if tx.send(InputLine::Line(l)).is_err() {
                        return;
                    }
                }
                Err(_) => {
                    let _ = tx.send(InputLine::Eof);
                    return;
                }
            }
        }
        let _ = tx.send(InputLine::Eof);
    })
}

/// `XSCHEM_START_WINDOW` set to the empty string suppresses the startup
/// window the way the source's flag of the same name does; here that
/// means the interactive console loop is skipped even outside `-b`.
fn start_window_suppressed() -> bool {
    matches!(std::env::var("XSCHEM_START_WINDOW"), Ok(v) if v.is_empty())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = configure_logging()?;
    install_panic_hook();

    let args = Args::parse();
    info!(target: "runtime", batch = args.batch, schematic = args.schematic, symbol = args.symbol, "startup");

    let config = xschem_config::load_from(args.config.clone())?;
    let mut ed = Editor::new(config);

    let io = NoopSchematicIo;
    let mut bridge = NoopScriptBridge;
    let mut renderer = NoopRenderer;

    if let Some(cmd) = args.tcl.as_deref() {
        let result = bridge.eval(cmd);
        info!(target: "runtime", cmd, result, "tcl_startup_script");
    }

    if let Some(path) = args.path.as_ref() {
        ed.load_schematic(&io, path);
    }

    if args.batch || start_window_suppressed() {
        info!(target: "runtime", "batch_exit");
        return Ok(());
    }

    run_console(&mut ed, &io, &mut bridge, &mut renderer).await
}

/// Drives the interactive console: an async select between stdin lines
/// and a periodic tick, mirroring `ox-bin`'s `EventSourceRegistry`/
/// `TickEventSource` pump but over a single `Editor` rather than a
/// terminal-wide render scheduler.
async fn run_console(
    ed: &mut Editor,
    io: &dyn xschem_io::SchematicIo,
    bridge: &mut dyn xschem_io::ScriptBridge,
    renderer: &mut dyn xschem_io::Renderer,
) -> Result<()> {
    let (tx, rx): (Sender<InputLine>, Receiver<InputLine>) = unbounded();
    spawn_stdin_reader(tx);

    let mut ticker = tokio::time::interval(Duration::from_millis(250));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                ed.dispatch(xschem_events::Event::Tick, renderer);
            }
            line = next_line(&rx) => {
                match line {
                    InputLine::Eof => {
                        info!(target: "runtime", "stdin_closed");
                        break;
                    }
                    InputLine::Line(l) => {
                        if let Some(path) = l.strip_prefix("save ") {
                            let path = PathBuf::from(path.trim());
                            if !ed.save_schematic(io, bridge, &path) {
                                warn!(target: "runtime", path = %path.display(), "save_failed_or_cancelled");
                            }
                            continue;
                        }
                        if let ConsoleOutcome::Quit = console::handle_line(ed, renderer, bridge, &l) {
                            break;
                        }
                    }
                }
            }
        }
    }

    info!(target: "runtime", "shutdown");
    Ok(())
}

async fn next_line(rx: &Receiver<InputLine>) -> InputLine {
    loop {
        match rx.try_recv() {
            Ok(line) => return line,
            Err(crossbeam_channel::TryRecvError::Empty) => {
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
            Err(crossbeam_channel::TryRecvError::Disconnected) => return InputLine::Eof,
        }
    }
}
