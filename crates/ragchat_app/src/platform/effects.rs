use std::sync::mpsc;
use std::thread;

use ragchat_core::{AskOutcome, AskReply, Effect, Msg, ScoredChunk, UploadOutcome};
use ragchat_engine::{
    Answer, BackendSettings, EngineError, EngineEvent, EngineEvents, EngineHandle, RankedChunk,
};
use ragchat_logging::{chat_info, chat_trace, chat_warn};

use super::app::AppInput;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: BackendSettings,
        input_tx: mpsc::Sender<AppInput>,
    ) -> Result<Self, EngineError> {
        chat_info!("Backend at {}", settings.base_url);
        let (engine, events) = EngineHandle::with_settings(settings)?;
        spawn_event_loop(events, input_tx);
        Ok(Self { engine })
    }

    pub fn run(&self, effect: Effect) {
        match effect {
            Effect::UploadPdf { attempt, path } => {
                chat_info!("UploadPdf attempt={} path={}", attempt, path.display());
                self.engine.upload(attempt, path);
            }
            Effect::Ask {
                request_id,
                question,
            } => {
                chat_info!(
                    "Ask request_id={} question_len={}",
                    request_id,
                    question.len()
                );
                self.engine.ask(request_id, question);
            }
            Effect::ScrollToLatest { turns } => {
                // Viewport effects belong to the frontend.
                chat_trace!("ScrollToLatest turns={} ignored by runner", turns);
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, input_tx: mpsc::Sender<AppInput>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if input_tx.send(AppInput::Msg(map_event(event))).is_err() {
                break;
            }
        }
    });
}

/// Translates engine completions into core messages, logging every failure.
pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadCompleted { attempt, result } => {
            let outcome = match result {
                Ok(_) => {
                    chat_info!("Upload attempt {} succeeded", attempt);
                    UploadOutcome::Success
                }
                Err(err) => {
                    chat_warn!("Error uploading PDF (attempt {}): {}", attempt, err);
                    UploadOutcome::Failed
                }
            };
            Msg::UploadFinished { attempt, outcome }
        }
        EngineEvent::AskCompleted { request_id, result } => {
            let outcome = match result {
                Ok(answer) => {
                    chat_info!("Ask {} answered", request_id);
                    AskOutcome::Answered(map_answer(answer))
                }
                Err(err) => {
                    chat_warn!("Error asking question (request {}): {}", request_id, err);
                    AskOutcome::Failed
                }
            };
            Msg::AskFinished {
                request_id,
                outcome,
            }
        }
    }
}

fn map_answer(answer: Answer) -> AskReply {
    AskReply {
        answer: answer.answer,
        metrics: answer.metrics.into_iter().map(map_chunk).collect(),
        top_results: answer.top_results.into_iter().map(map_chunk).collect(),
    }
}

fn map_chunk(chunk: RankedChunk) -> ScoredChunk {
    ScoredChunk {
        score: chunk.score,
        chunk: chunk.chunk,
    }
}
