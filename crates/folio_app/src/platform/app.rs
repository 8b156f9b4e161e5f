use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use folio_core::{update, Msg, SwipeSettings, ViewerSettings, ViewerState, Viewport};
use folio_engine::ApiClient;
use folio_logging::{folio_info, folio_trace};

use super::effects::EffectRunner;
use super::ui;
use super::ui::input::{parse_line, ReaderInput};
use crate::cli::ReadArgs;

pub enum AppEvent {
    Msg(Msg),
    Input(ReaderInput),
    InputClosed,
}

pub fn run_reader(api: &ApiClient, args: ReadArgs) -> anyhow::Result<()> {
    let settings = ViewerSettings {
        swipe: SwipeSettings {
            threshold_px: args.swipe_threshold,
        },
        flip_duration_ms: args.flip_ms,
        initial_viewport: Viewport::new(args.width, args.height),
        ..ViewerSettings::default()
    };
    let (msg_tx, msg_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(api, msg_tx.clone());
    spawn_stdin_reader(msg_tx.clone());

    println!("{}", ui::constants::READER_HELP);
    let _ = msg_tx.send(AppEvent::Msg(Msg::OpenPublication(args.slug)));

    let mut state = ViewerState::with_settings(settings);
    let mut stdout = io::stdout();
    while let Ok(event) = msg_rx.recv() {
        match event {
            AppEvent::Msg(msg) => state = dispatch(state, msg, &runner, &mut stdout)?,
            AppEvent::Input(ReaderInput::Messages(msgs)) => {
                for msg in msgs {
                    state = dispatch(state, msg, &runner, &mut stdout)?;
                }
            }
            AppEvent::Input(ReaderInput::Help) => {
                writeln!(stdout, "{}", ui::constants::READER_HELP)?;
            }
            AppEvent::Input(ReaderInput::Invalid(reason)) => {
                writeln!(stdout, "{reason} (type `help`)")?;
            }
            AppEvent::Input(ReaderInput::Quit) | AppEvent::InputClosed => break,
        }
    }

    folio_info!("Reader closed");
    Ok(())
}

fn dispatch(
    state: ViewerState,
    msg: Msg,
    runner: &EffectRunner,
    out: &mut impl Write,
) -> io::Result<ViewerState> {
    folio_trace!("dispatch {:?}", msg);
    let (mut state, effects) = update(state, msg);
    runner.run(effects);
    if state.consume_dirty() {
        write!(out, "{}{}", ui::render::render(&state.view()), ui::constants::PROMPT)?;
        out.flush()?;
    }
    Ok(state)
}

fn spawn_stdin_reader(msg_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if msg_tx.send(AppEvent::Input(parse_line(&line))).is_err() {
                return;
            }
        }
        let _ = msg_tx.send(AppEvent::InputClosed);
    });
}
