//! Results viewer: one overlay component, instantiated per [`ViewerKind`].

use crate::ScoredChunk;

/// Shown in place of the list when there is nothing to display yet.
pub const EMPTY_PLACEHOLDER: &str =
    "Upload PDF & ask a question to see its top relevant chunks and scores.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerKind {
    /// Chunks decoded from the `top_results` field.
    Results,
    /// Entries from the `metrics` field.
    Metrics,
}

impl ViewerKind {
    pub fn button_label(self) -> &'static str {
        match self {
            ViewerKind::Results => "See top results",
            ViewerKind::Metrics => "See metrics",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewerKind::Results => "Chunks & Score",
            ViewerKind::Metrics => "Metrics",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsViewer {
    kind: ViewerKind,
    open: bool,
}

impl ResultsViewer {
    pub fn new(kind: ViewerKind) -> Self {
        Self { kind, open: false }
    }

    pub fn kind(&self) -> ViewerKind {
        self.kind
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns true if the visibility changed.
    pub fn open(&mut self) -> bool {
        !std::mem::replace(&mut self.open, true)
    }

    /// Returns true if the visibility changed.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    pub fn render(&self, data: &[ScoredChunk]) -> ViewerPanel {
        let body = if data.is_empty() {
            ViewerBody::Placeholder(EMPTY_PLACEHOLDER)
        } else {
            ViewerBody::Entries(
                data.iter()
                    .map(|item| ChunkRowView {
                        score: format!("{:.2}", item.score),
                        chunk: item.chunk.clone(),
                    })
                    .collect(),
            )
        };
        ViewerPanel {
            kind: self.kind,
            open: self.open,
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerPanel {
    pub kind: ViewerKind,
    pub open: bool,
    pub body: ViewerBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerBody {
    Placeholder(&'static str),
    Entries(Vec<ChunkRowView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRowView {
    /// Score rounded to two decimal places.
    pub score: String,
    pub chunk: String,
}
