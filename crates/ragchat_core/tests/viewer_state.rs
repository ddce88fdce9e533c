use std::path::PathBuf;

use ragchat_core::{
    update, AppState, AskOutcome, AskReply, ChunkRowView, Msg, ScoredChunk, UploadOutcome,
    ViewerBody, ViewerKind, EMPTY_PLACEHOLDER,
};

fn answered_state() -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::FileSelected(Some(PathBuf::from("a.pdf"))),
    );
    let (state, _) = update(state, Msg::UploadClicked);
    let (state, _) = update(
        state,
        Msg::UploadFinished {
            attempt: 1,
            outcome: UploadOutcome::Success,
        },
    );
    let (state, _) = update(state, Msg::AskClicked);
    let (state, _) = update(
        state,
        Msg::AskFinished {
            request_id: 1,
            outcome: AskOutcome::Answered(AskReply {
                answer: "blue".to_string(),
                metrics: vec![ScoredChunk {
                    score: 12.5,
                    chunk: "retrieval_ms".to_string(),
                }],
                top_results: vec![
                    ScoredChunk {
                        score: 0.87,
                        chunk: "The sky is blue".to_string(),
                    },
                    ScoredChunk {
                        score: 0.42,
                        chunk: "Water boils at 100C".to_string(),
                    },
                ],
            }),
        },
    );
    state
}

#[test]
fn viewers_start_closed_with_placeholder() {
    ragchat_logging::initialize_for_tests();
    let view = AppState::new().view();
    for panel in &view.viewers {
        assert!(!panel.open);
        assert_eq!(panel.body, ViewerBody::Placeholder(EMPTY_PLACEHOLDER));
    }
    assert_eq!(view.viewers[0].kind, ViewerKind::Results);
    assert_eq!(view.viewers[1].kind, ViewerKind::Metrics);
}

#[test]
fn viewers_toggle_independently() {
    ragchat_logging::initialize_for_tests();
    let (mut state, _) = update(answered_state(), Msg::ViewerOpened(ViewerKind::Metrics));
    assert!(state.consume_dirty());
    assert!(state.viewer(ViewerKind::Metrics).is_open());
    assert!(!state.viewer(ViewerKind::Results).is_open());

    // Opening an open viewer changes nothing.
    let (mut state, _) = update(state, Msg::ViewerOpened(ViewerKind::Metrics));
    assert!(!state.consume_dirty());
}

#[test]
fn closing_a_closed_viewer_leaves_state_untouched() {
    ragchat_logging::initialize_for_tests();
    let mut state = answered_state();
    state.consume_dirty();

    let (mut next, effects) = update(state.clone(), Msg::ViewerClosed(ViewerKind::Results));
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(next, state);
}

#[test]
fn reopening_shows_identical_data() {
    ragchat_logging::initialize_for_tests();
    let (state, _) = update(answered_state(), Msg::ViewerOpened(ViewerKind::Results));
    let first = state.view().viewers[0].clone();
    assert!(first.open);
    assert_eq!(
        first.body,
        ViewerBody::Entries(vec![
            ChunkRowView {
                score: "0.87".to_string(),
                chunk: "The sky is blue".to_string(),
            },
            ChunkRowView {
                score: "0.42".to_string(),
                chunk: "Water boils at 100C".to_string(),
            },
        ])
    );

    let (state, _) = update(state, Msg::ViewerClosed(ViewerKind::Results));
    assert!(!state.view().viewers[0].open);
    assert_eq!(state.top_results().len(), 2);

    let (state, _) = update(state, Msg::ViewerOpened(ViewerKind::Results));
    assert_eq!(state.view().viewers[0], first);
}

#[test]
fn metrics_viewer_renders_metrics_entries() {
    ragchat_logging::initialize_for_tests();
    let view = answered_state().view();
    assert_eq!(
        view.viewers[1].body,
        ViewerBody::Entries(vec![ChunkRowView {
            score: "12.50".to_string(),
            chunk: "retrieval_ms".to_string(),
        }])
    );
}
