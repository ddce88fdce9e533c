use colored::Colorize;
use ragchat_core::{
    AppViewModel, ChatTurn, TranscriptView, UploadStatus, ViewerBody, ViewerKind, ViewerPanel,
    WELCOME_TEXT,
};

const TITLE: &str = "Local RAG Chatbot";
const RULE: &str = "----------------------------------------";

/// Which slice of the transcript is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    max_turns: usize,
    /// One past the last visible turn.
    end: usize,
}

impl Viewport {
    pub fn new(max_turns: usize) -> Self {
        Self {
            max_turns: max_turns.max(1),
            end: 0,
        }
    }

    pub fn scroll_to(&mut self, turns: usize) {
        self.end = turns;
    }

    /// Returns true if the viewport moved.
    pub fn scroll_up(&mut self) -> bool {
        let floor = self.max_turns.min(self.end);
        if self.end > floor {
            self.end -= 1;
            true
        } else {
            false
        }
    }

    /// Returns true if the viewport moved.
    pub fn scroll_down(&mut self, turns: usize) -> bool {
        if self.end < turns {
            self.end += 1;
            true
        } else {
            false
        }
    }

    fn visible<'a>(&self, turns: &'a [ChatTurn]) -> &'a [ChatTurn] {
        let end = self.end.min(turns.len());
        let start = end.saturating_sub(self.max_turns);
        &turns[start..end]
    }
}

pub fn render(view: &AppViewModel, viewport: &Viewport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("== {} ==", TITLE).bold().to_string());
    lines.push(match &view.selected_file {
        Some(path) => format!("File: {}", path.display()),
        None => "File: (none selected, use /file <path>)".dimmed().to_string(),
    });
    if let Some(status) = upload_status_line(view.upload_status) {
        lines.push(status);
    }
    lines.push(
        format!(
            "[{} /results]  [{} /metrics]",
            ViewerKind::Results.button_label(),
            ViewerKind::Metrics.button_label()
        )
        .dimmed()
        .to_string(),
    );
    lines.push(RULE.to_string());

    match &view.transcript {
        TranscriptView::Welcome => lines.push(WELCOME_TEXT.to_string()),
        TranscriptView::Turns(turns) => {
            let visible = viewport.visible(turns);
            let hidden = turns.len() - visible.len();
            if hidden > 0 {
                lines.push(
                    format!("({hidden} more turn(s) off screen, /up and /down to scroll)")
                        .dimmed()
                        .to_string(),
                );
            }
            for turn in visible {
                lines.push(format!("{} {}", "You:".bold(), turn.question));
                lines.push(format!("{} {}", "Bot:".cyan().bold(), turn.answer));
                lines.push(String::new());
            }
        }
    }

    if view.loading {
        lines.push("Thinking...".yellow().to_string());
    }

    for panel in view.viewers.iter().filter(|panel| panel.open) {
        lines.extend(render_panel(panel));
    }

    if let Some(message) = &view.toast {
        lines.push(format!("{} {}  (/dismiss)", "!".cyan().bold(), message));
    }

    lines.push(RULE.to_string());
    lines.push(if view.ask_enabled {
        "Ask your question...".to_string()
    } else {
        "Ask (disabled while waiting for an answer)".dimmed().to_string()
    });
    lines
}

fn upload_status_line(status: UploadStatus) -> Option<String> {
    match status {
        UploadStatus::InProgress => Some("Uploading PDF...".yellow().to_string()),
        UploadStatus::Success => Some(format!("{} PDF uploaded successfully!", "✓".green())),
        // A failed upload only clears the indicator; details are in the log.
        UploadStatus::NotStarted | UploadStatus::Failed => None,
    }
}

fn render_panel(panel: &ViewerPanel) -> Vec<String> {
    let mut lines = vec![format!("[{}]  (/close)", panel.kind.title())
        .bold()
        .to_string()];
    match &panel.body {
        ViewerBody::Placeholder(text) => lines.push(format!("  {text}")),
        ViewerBody::Entries(rows) => {
            for row in rows {
                lines.push(format!("  Score: {}", row.score));
                lines.push(format!("  Relevant Chunk: {}", row.chunk));
            }
        }
    }
    lines
}
