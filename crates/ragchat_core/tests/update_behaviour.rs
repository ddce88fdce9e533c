use std::path::PathBuf;
use std::sync::Once;

use ragchat_core::{
    update, AppState, AskOutcome, AskReply, ChatTurn, ClientError, Effect, Msg, ScoredChunk,
    TranscriptView, UploadOutcome, UploadStatus, WELCOME_TEXT,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(ragchat_logging::initialize_for_tests);
}

fn uploaded_state() -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::FileSelected(Some(PathBuf::from("paper.pdf"))),
    );
    let (state, _) = update(state, Msg::UploadClicked);
    let (state, _) = update(
        state,
        Msg::UploadFinished {
            attempt: 1,
            outcome: UploadOutcome::Success,
        },
    );
    state
}

fn ask(state: AppState, question: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::QuestionChanged(question.to_string()));
    update(state, Msg::AskClicked)
}

fn reply(answer: &str) -> AskReply {
    AskReply {
        answer: answer.to_string(),
        metrics: vec![ScoredChunk {
            score: 0.5,
            chunk: "latency".to_string(),
        }],
        top_results: vec![ScoredChunk {
            score: 0.87,
            chunk: "The sky is blue".to_string(),
        }],
    }
}

#[test]
fn upload_without_file_raises_validation_toast() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::UploadClicked);

    assert!(effects.is_empty());
    assert_eq!(state.upload_status(), UploadStatus::NotStarted);
    assert!(state.toast().visible);
    assert_eq!(state.toast().message, ClientError::Validation.to_string());
    assert_eq!(state.toast().message, "Please select a PDF file to upload.");
    assert!(state.consume_dirty());
}

#[test]
fn upload_with_file_goes_in_progress_and_emits_effect() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::FileSelected(Some(PathBuf::from("paper.pdf"))),
    );
    let (state, effects) = update(state, Msg::UploadClicked);

    assert_eq!(state.upload_status(), UploadStatus::InProgress);
    assert_eq!(
        effects,
        vec![Effect::UploadPdf {
            attempt: 1,
            path: PathBuf::from("paper.pdf"),
        }]
    );
    assert!(!state.toast().visible);
}

#[test]
fn failed_upload_flips_status_without_toast() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::FileSelected(Some(PathBuf::from("paper.pdf"))),
    );
    let (state, _) = update(state, Msg::UploadClicked);
    let (state, effects) = update(
        state,
        Msg::UploadFinished {
            attempt: 1,
            outcome: UploadOutcome::Failed,
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.upload_status(), UploadStatus::Failed);
    assert!(!state.toast().visible);
}

#[test]
fn retrying_upload_resets_to_in_progress() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::FileSelected(Some(PathBuf::from("paper.pdf"))),
    );
    let (state, _) = update(state, Msg::UploadClicked);
    let (state, _) = update(
        state,
        Msg::UploadFinished {
            attempt: 1,
            outcome: UploadOutcome::Failed,
        },
    );
    let (state, effects) = update(state, Msg::UploadClicked);

    assert_eq!(state.upload_status(), UploadStatus::InProgress);
    assert_eq!(
        effects,
        vec![Effect::UploadPdf {
            attempt: 2,
            path: PathBuf::from("paper.pdf"),
        }]
    );
}

#[test]
fn ask_before_upload_raises_precondition_toast() {
    init_logging();
    let (state, effects) = ask(AppState::new(), "What is RAG?");

    assert!(effects.is_empty());
    assert!(!state.is_loading());
    assert!(state.toast().visible);
    assert_eq!(state.toast().message, "Please upload a PDF first!");
    assert!(state.history().is_empty());
}

#[test]
fn ask_allowed_while_upload_in_progress_or_failed() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::FileSelected(Some(PathBuf::from("paper.pdf"))),
    );
    let (state, _) = update(state, Msg::UploadClicked);
    let (state, effects) = ask(state, "early?");
    assert_eq!(effects.len(), 1);
    assert!(state.is_loading());
}

#[test]
fn happy_path_appends_turn_and_clears_draft() {
    init_logging();
    let state = uploaded_state();
    assert_eq!(state.upload_status(), UploadStatus::Success);
    assert!(state.history().is_empty());

    let (state, effects) = ask(state, "What is RAG?");
    assert_eq!(
        effects,
        vec![Effect::Ask {
            request_id: 1,
            question: "What is RAG?".to_string(),
        }]
    );
    assert!(state.view().loading);
    assert!(!state.view().ask_enabled);

    let (state, effects) = update(
        state,
        Msg::AskFinished {
            request_id: 1,
            outcome: AskOutcome::Answered(reply("Retrieval-augmented generation.")),
        },
    );

    assert_eq!(effects, vec![Effect::ScrollToLatest { turns: 1 }]);
    assert_eq!(
        state.history(),
        &[ChatTurn {
            question: "What is RAG?".to_string(),
            answer: "Retrieval-augmented generation.".to_string(),
        }]
    );
    assert_eq!(state.question_draft(), "");
    assert!(!state.view().loading);
    assert_eq!(state.top_results()[0].chunk, "The sky is blue");
    assert_eq!(state.metrics()[0].chunk, "latency");
}

#[test]
fn empty_question_is_sent_as_is() {
    init_logging();
    let (state, _) = update(uploaded_state(), Msg::AskClicked);
    assert!(state.is_loading());
}

#[test]
fn failed_ask_leaves_history_and_clears_loading_silently() {
    init_logging();
    let (state, _) = ask(uploaded_state(), "What is RAG?");
    let (state, effects) = update(
        state,
        Msg::AskFinished {
            request_id: 1,
            outcome: AskOutcome::Failed,
        },
    );

    assert!(effects.is_empty());
    assert!(state.history().is_empty());
    assert!(!state.is_loading());
    assert!(!state.toast().visible);
    assert_eq!(state.question_draft(), "What is RAG?");
}

#[test]
fn empty_history_shows_welcome() {
    init_logging();
    let view = AppState::new().view();
    assert_eq!(view.transcript, TranscriptView::Welcome);
    assert!(!WELCOME_TEXT.is_empty());
    assert_eq!(view.toast, None);
    assert_eq!(view.viewers.len(), 2);
}

#[test]
fn history_keeps_submission_order() {
    init_logging();
    let mut state = uploaded_state();
    for (id, question) in [(1, "first"), (2, "second"), (3, "third")] {
        let (next, _) = ask(state, question);
        let (next, effects) = update(
            next,
            Msg::AskFinished {
                request_id: id,
                outcome: AskOutcome::Answered(reply(&format!("answer {id}"))),
            },
        );
        assert_eq!(
            effects,
            vec![Effect::ScrollToLatest {
                turns: id as usize
            }]
        );
        state = next;
    }

    let questions: Vec<_> = state.history().iter().map(|t| t.question.as_str()).collect();
    assert_eq!(questions, vec!["first", "second", "third"]);
    match state.view().transcript {
        TranscriptView::Turns(turns) => assert_eq!(turns.len(), 3),
        TranscriptView::Welcome => panic!("expected transcript"),
    }
}

#[test]
fn toast_dismiss_is_idempotent() {
    init_logging();
    let (mut state, _) = update(AppState::new(), Msg::UploadClicked);
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::ToastDismissed);
    assert!(!state.toast().visible);
    assert!(state.consume_dirty());
    let snapshot = state.clone();

    let (mut state, effects) = update(state, Msg::ToastDismissed);
    assert!(effects.is_empty());
    assert_eq!(state, snapshot);
    assert!(!state.consume_dirty());
}

#[test]
fn new_toast_overwrites_previous() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::UploadClicked);
    let (state, _) = ask(state, "q");

    assert!(state.toast().visible);
    assert_eq!(state.toast().message, "Please upload a PDF first!");
}
