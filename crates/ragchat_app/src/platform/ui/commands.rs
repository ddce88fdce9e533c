use std::path::PathBuf;

use ragchat_core::{Msg, ViewerKind};

/// What a line of user input asks the app to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Feed these messages to the core, in order.
    Dispatch(Vec<Msg>),
    ScrollUp,
    ScrollDown,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP_TEXT: &str = "\
Commands:
  /file <path>      select a PDF (no path clears the selection)
  /upload [path]    upload the selected PDF, or select and upload <path>
  /results          open the top results viewer
  /metrics          open the metrics viewer
  /close [which]    close viewers (results, metrics, or both)
  /dismiss          dismiss the notification
  /up, /down        scroll the transcript
  /help             show this help
  /quit             exit
Any other line is sent as a question.";

pub fn parse_line(line: &str) -> Command {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Dispatch(vec![Msg::QuestionChanged(line.to_string()), Msg::AskClicked]);
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest.trim_end(), ""),
    };

    match name {
        "file" => Command::Dispatch(vec![Msg::FileSelected(parse_path(arg))]),
        "upload" => match parse_path(arg) {
            Some(path) => Command::Dispatch(vec![Msg::FileSelected(Some(path)), Msg::UploadClicked]),
            None => Command::Dispatch(vec![Msg::UploadClicked]),
        },
        "results" => Command::Dispatch(vec![Msg::ViewerOpened(ViewerKind::Results)]),
        "metrics" => Command::Dispatch(vec![Msg::ViewerOpened(ViewerKind::Metrics)]),
        "close" => match arg {
            "results" => Command::Dispatch(vec![Msg::ViewerClosed(ViewerKind::Results)]),
            "metrics" => Command::Dispatch(vec![Msg::ViewerClosed(ViewerKind::Metrics)]),
            "" => Command::Dispatch(vec![
                Msg::ViewerClosed(ViewerKind::Results),
                Msg::ViewerClosed(ViewerKind::Metrics),
            ]),
            _ => Command::Unknown(line.to_string()),
        },
        "dismiss" => Command::Dispatch(vec![Msg::ToastDismissed]),
        "up" => Command::ScrollUp,
        "down" => Command::ScrollDown,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

fn parse_path(arg: &str) -> Option<PathBuf> {
    let unquoted = arg
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| arg.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(arg);
    (!unquoted.is_empty()).then(|| PathBuf::from(unquoted))
}
