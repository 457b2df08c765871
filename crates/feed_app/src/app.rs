use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use feed_client::ApiError;
use feed_core::{
    update, ControlChange, FeedState, FeedViewModel, FeedbackAction, Msg, UploadField,
};
use feed_logging::feed_info;

use crate::effects::EffectRunner;
use crate::render;

/// Events funneled into the dispatch loop from every producer thread.
pub enum AppEvent {
    Msg(Msg),
    Command(Command),
    Quit,
}

/// One console command, parsed from a line of input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Refresh,
    MinScore(f64),
    Serendipity(bool),
    Diversity(bool),
    Feedback { card: usize, action: FeedbackAction },
    Add { title: String, content: String },
    Help,
    Quit,
}

const HELP: &str = "\
commands:
  refresh                    re-run retrieval with the current filters
  min-score <0..10>          only show items scoring at least this much
  serendipity on|off         bias retrieval toward unexpected items
  diversity on|off           reduce topical redundancy in results
  helpful <card>             mark the numbered card as helpful
  unhelpful <card>           mark the numbered card as not helpful
  expand <card>              read the numbered card in full
  add <title> | <content>    submit content for analysis
  quit";

pub fn run(base_url: String) -> Result<(), ApiError> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(base_url, event_tx.clone())?;
    spawn_input_thread(event_tx);

    let mut state = FeedState::new();
    feed_info!("Feed client starting");
    dispatch(&mut state, Msg::Started, &runner);
    render_if_dirty(&mut state);

    loop {
        match event_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(AppEvent::Msg(msg)) => {
                dispatch(&mut state, msg, &runner);
                render_if_dirty(&mut state);
            }
            Ok(AppEvent::Command(command)) => {
                for msg in command_msgs(&state.view(), command) {
                    dispatch(&mut state, msg, &runner);
                }
                render_if_dirty(&mut state);
            }
            Ok(AppEvent::Quit) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    feed_info!("Feed client exiting");
    Ok(())
}

fn dispatch(state: &mut FeedState, msg: Msg, runner: &EffectRunner) {
    let current = std::mem::take(state);
    let (next, effects) = update(current, msg);
    *state = next;
    runner.enqueue(effects);
}

fn render_if_dirty(state: &mut FeedState) {
    if state.consume_dirty() {
        println!("{}", render::render(&state.view()));
    }
}

/// Resolves a console command against the current view.
///
/// Card numbers are 1-based as rendered; an out-of-range number is reported
/// and produces no message.
fn command_msgs(view: &FeedViewModel, command: Command) -> Vec<Msg> {
    match command {
        Command::Refresh => vec![Msg::ControlChanged(ControlChange::Refresh)],
        Command::MinScore(value) => vec![Msg::ControlChanged(ControlChange::MinScore(value))],
        Command::Serendipity(on) => vec![Msg::ControlChanged(ControlChange::Serendipity(on))],
        Command::Diversity(on) => vec![Msg::ControlChanged(ControlChange::Diversity(on))],
        Command::Feedback { card, action } => match view.cards.get(card.wrapping_sub(1)) {
            Some(card_view) => {
                if action == FeedbackAction::Expand {
                    println!("{}", render::render_expanded(card_view));
                }
                vec![Msg::FeedbackClicked {
                    content_id: card_view.id.clone(),
                    action,
                }]
            }
            None => {
                println!("no card numbered {card}");
                Vec::new()
            }
        },
        Command::Add { title, content } => vec![
            Msg::UploadOpened,
            Msg::UploadFieldChanged {
                field: UploadField::Title,
                value: title,
            },
            Msg::UploadFieldChanged {
                field: UploadField::Content,
                value: content,
            },
            Msg::UploadSubmitted,
        ],
        Command::Help => {
            println!("{HELP}");
            Vec::new()
        }
        Command::Quit => Vec::new(),
    }
}

fn spawn_input_thread(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                Ok(Some(Command::Quit)) => {
                    let _ = tx.send(AppEvent::Quit);
                    break;
                }
                Ok(Some(command)) => {
                    if tx.send(AppEvent::Command(command)).is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(usage) => println!("{usage}"),
            }
        }
    });
}

/// Parses one input line. `Ok(None)` means a blank line.
fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb {
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "refresh" => Command::Refresh,
        "serendipity" => Command::Serendipity(parse_toggle(verb, rest)?),
        "diversity" => Command::Diversity(parse_toggle(verb, rest)?),
        "min-score" => {
            let value: f64 = rest
                .parse()
                .map_err(|_| format!("usage: min-score <0..10>, got {rest:?}"))?;
            if !(0.0..=10.0).contains(&value) {
                return Err("min-score must be between 0 and 10".to_string());
            }
            Command::MinScore(value)
        }
        "helpful" | "unhelpful" | "expand" => {
            let card: usize = rest
                .parse()
                .map_err(|_| format!("usage: {verb} <card number>"))?;
            let action = match verb {
                "helpful" => FeedbackAction::Helpful,
                "unhelpful" => FeedbackAction::Unhelpful,
                _ => FeedbackAction::Expand,
            };
            Command::Feedback { card, action }
        }
        "add" => {
            let (title, content) = rest
                .split_once('|')
                .ok_or_else(|| "usage: add <title> | <content>".to_string())?;
            Command::Add {
                title: title.trim().to_string(),
                content: content.trim().to_string(),
            }
        }
        other => return Err(format!("unknown command {other:?}; try \"help\"")),
    };
    Ok(Some(command))
}

fn parse_toggle(verb: &str, rest: &str) -> Result<bool, String> {
    match rest {
        "on" => Ok(true),
        "off" => Ok(false),
        _ => Err(format!("usage: {verb} on|off")),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_command, Command};
    use feed_core::FeedbackAction;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn toggles_and_scores_parse() {
        assert_eq!(
            parse_command("serendipity on"),
            Ok(Some(Command::Serendipity(true)))
        );
        assert_eq!(
            parse_command("min-score 7.5"),
            Ok(Some(Command::MinScore(7.5)))
        );
        assert!(parse_command("min-score eleven").is_err());
        assert!(parse_command("min-score 12").is_err());
    }

    #[test]
    fn feedback_takes_a_card_number() {
        assert_eq!(
            parse_command("helpful 2"),
            Ok(Some(Command::Feedback {
                card: 2,
                action: FeedbackAction::Helpful
            }))
        );
        assert!(parse_command("expand two").is_err());
    }

    #[test]
    fn add_splits_title_and_content() {
        assert_eq!(
            parse_command("add A title | the body"),
            Ok(Some(Command::Add {
                title: "A title".to_string(),
                content: "the body".to_string(),
            }))
        );
        assert!(parse_command("add no separator").is_err());
    }
}
