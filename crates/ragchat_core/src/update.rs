use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(path) => {
            state.select_file(path);
            Vec::new()
        }
        Msg::UploadClicked => match state.submit_upload() {
            Ok(effect) => vec![effect],
            Err(err) => {
                state.raise_toast(err.to_string());
                Vec::new()
            }
        },
        Msg::UploadFinished { attempt, outcome } => {
            state.finish_upload(attempt, outcome);
            Vec::new()
        }
        Msg::QuestionChanged(text) => {
            state.set_question_draft(text);
            Vec::new()
        }
        Msg::AskClicked => match state.submit_question() {
            Ok(effect) => vec![effect],
            Err(err) => {
                state.raise_toast(err.to_string());
                Vec::new()
            }
        },
        Msg::AskFinished {
            request_id,
            outcome,
        } => {
            let before = state.history().len();
            state.finish_ask(request_id, outcome);
            let turns = state.history().len();
            // Scrolling follows history length, not content.
            if turns != before {
                vec![Effect::ScrollToLatest { turns }]
            } else {
                Vec::new()
            }
        }
        Msg::ToastDismissed => {
            state.dismiss_toast();
            Vec::new()
        }
        Msg::ViewerOpened(kind) => {
            if state.viewer_mut(kind).open() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ViewerClosed(kind) => {
            if state.viewer_mut(kind).close() {
                state.mark_dirty();
            }
            Vec::new()
        }
    };

    (state, effects)
}
