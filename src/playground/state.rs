use std::cell::RefCell;
use std::rc::Rc;
use yew::Reducible;

/// Identifies one asynchronous operation (a decode or a generation).
/// Completions carrying an outdated ticket are dropped.
pub type Ticket = u64;

pub fn next_ticket(counter: &RefCell<Ticket>) -> Ticket {
    let mut counter = counter.borrow_mut();
    *counter += 1;
    *counter
}

/// Guards against submitting twice before the button has re-rendered disabled.
#[derive(Debug, Default)]
pub struct InFlight {
    busy: bool,
}

impl InFlight {
    /// Claims the slot; false if a submission is already running.
    pub fn try_begin(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    pub fn finish(&mut self) {
        self.busy = false;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Generating {
        ticket: Ticket,
    },
    Done {
        result_url: String,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaygroundState {
    /// Data URL of the selected image, once decoded.
    pub preview: Option<String>,
    pub phase: Phase,
    /// Upload zone highlighted while something is dragged over it.
    pub dragging: bool,
    pending_decode: Option<Ticket>,
}

pub enum PlaygroundAction {
    DragOver,
    DragLeave,
    BeginDecode { ticket: Ticket },
    PreviewReady { ticket: Ticket, data_url: String },
    DecodeFailed { ticket: Ticket },
    Generate { ticket: Ticket },
    Generated { ticket: Ticket, result_url: String },
    GenerationFailed { ticket: Ticket },
    Reset,
}

impl PlaygroundState {
    pub fn is_generating(&self) -> bool {
        matches!(self.phase, Phase::Generating { .. })
    }

    pub fn is_decoding(&self) -> bool {
        self.pending_decode.is_some()
    }

    pub fn can_generate(&self) -> bool {
        self.preview.is_some() && !self.is_generating()
    }

    pub fn can_download(&self) -> bool {
        matches!(self.phase, Phase::Done { .. })
    }

    pub fn result_url(&self) -> Option<&str> {
        match &self.phase {
            Phase::Done { result_url } => Some(result_url),
            _ => None,
        }
    }

    pub fn generate_label(&self) -> &'static str {
        if self.is_generating() {
            "Generating..."
        } else {
            "Generate"
        }
    }

    pub fn show_upload_placeholder(&self) -> bool {
        self.preview.is_none()
    }

    pub fn show_loading(&self) -> bool {
        self.is_generating()
    }

    pub fn show_result(&self) -> bool {
        self.can_download()
    }

    pub fn show_result_placeholder(&self) -> bool {
        self.phase == Phase::Idle
    }
}

impl Reducible for PlaygroundState {
    type Action = PlaygroundAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();

        match action {
            PlaygroundAction::DragOver => {
                if self.dragging {
                    return self;
                }
                next.dragging = true;
            }
            PlaygroundAction::DragLeave => {
                if !self.dragging {
                    return self;
                }
                next.dragging = false;
            }
            PlaygroundAction::BeginDecode { ticket } => {
                next.pending_decode = Some(ticket);
            }
            PlaygroundAction::PreviewReady { ticket, data_url } => {
                if next.pending_decode != Some(ticket) {
                    return self;
                }
                next.pending_decode = None;
                next.preview = Some(data_url);
            }
            PlaygroundAction::DecodeFailed { ticket } => {
                if next.pending_decode != Some(ticket) {
                    return self;
                }
                next.pending_decode = None;
            }
            PlaygroundAction::Generate { ticket } => {
                if !self.can_generate() {
                    return self;
                }
                next.phase = Phase::Generating { ticket };
            }
            PlaygroundAction::Generated { ticket, result_url } => {
                if self.phase != (Phase::Generating { ticket }) {
                    return self;
                }
                next.phase = Phase::Done { result_url };
            }
            PlaygroundAction::GenerationFailed { ticket } => {
                if self.phase != (Phase::Generating { ticket }) {
                    return self;
                }
                next.phase = Phase::Idle;
            }
            PlaygroundAction::Reset => {
                next = PlaygroundState {
                    dragging: self.dragging,
                    ..PlaygroundState::default()
                };
            }
        }

        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &str = "data:image/png;base64,iVBORw0KGgo=";
    const DEMO: &str = "images/gallery-1.jpg";

    fn apply(state: Rc<PlaygroundState>, actions: Vec<PlaygroundAction>) -> Rc<PlaygroundState> {
        actions.into_iter().fold(state, |state, action| state.reduce(action))
    }

    fn with_preview() -> Rc<PlaygroundState> {
        apply(
            Rc::new(PlaygroundState::default()),
            vec![
                PlaygroundAction::BeginDecode { ticket: 1 },
                PlaygroundAction::PreviewReady { ticket: 1, data_url: PNG.to_string() },
            ],
        )
    }

    fn assert_initial_visuals(state: &PlaygroundState) {
        assert!(state.show_upload_placeholder());
        assert_eq!(state.preview, None);
        assert!(!state.can_generate());
        assert!(!state.can_download());
        assert!(!state.show_result());
        assert!(!state.show_loading());
        assert!(state.show_result_placeholder());
        assert_eq!(state.generate_label(), "Generate");
    }

    #[test]
    fn initial_state_has_nothing_enabled() {
        assert_initial_visuals(&PlaygroundState::default());
    }

    #[test]
    fn generate_stays_disabled_until_decode_completes() {
        let state = Rc::new(PlaygroundState::default())
            .reduce(PlaygroundAction::BeginDecode { ticket: 1 });
        assert!(state.is_decoding());
        assert!(!state.can_generate());
        assert!(state.show_upload_placeholder());

        let state = state.reduce(PlaygroundAction::PreviewReady { ticket: 1, data_url: PNG.to_string() });
        assert!(!state.is_decoding());
        assert!(state.can_generate());
        assert!(!state.show_upload_placeholder());
        assert_eq!(state.preview.as_deref(), Some(PNG));
    }

    #[test]
    fn duplicate_decode_completion_is_ignored() {
        let state = with_preview();
        let again = state.clone().reduce(PlaygroundAction::PreviewReady {
            ticket: 1,
            data_url: "data:image/png;base64,other".to_string(),
        });
        assert!(Rc::ptr_eq(&state, &again));
    }

    #[test]
    fn failed_decode_leaves_preview_untouched() {
        let state = Rc::new(PlaygroundState::default())
            .reduce(PlaygroundAction::BeginDecode { ticket: 4 })
            .reduce(PlaygroundAction::DecodeFailed { ticket: 4 });
        assert!(!state.is_decoding());
        assert_initial_visuals(&state);
    }

    #[test]
    fn decode_finishing_after_reset_is_dropped() {
        let state = apply(
            Rc::new(PlaygroundState::default()),
            vec![
                PlaygroundAction::BeginDecode { ticket: 1 },
                PlaygroundAction::Reset,
                PlaygroundAction::PreviewReady { ticket: 1, data_url: PNG.to_string() },
            ],
        );
        assert_initial_visuals(&state);
    }

    #[test]
    fn newer_selection_wins_over_slower_older_one() {
        let state = apply(
            Rc::new(PlaygroundState::default()),
            vec![
                PlaygroundAction::BeginDecode { ticket: 1 },
                PlaygroundAction::BeginDecode { ticket: 2 },
                PlaygroundAction::PreviewReady { ticket: 2, data_url: "data:image/png;base64,new".to_string() },
                PlaygroundAction::PreviewReady { ticket: 1, data_url: "data:image/png;base64,old".to_string() },
            ],
        );
        assert_eq!(state.preview.as_deref(), Some("data:image/png;base64,new"));
    }

    #[test]
    fn generate_shows_loading_and_disables_itself() {
        let state = with_preview().reduce(PlaygroundAction::Generate { ticket: 2 });
        assert!(state.is_generating());
        assert!(state.show_loading());
        assert!(!state.show_result());
        assert!(!state.show_result_placeholder());
        assert!(!state.can_generate());
        assert!(!state.can_download());
        assert_eq!(state.generate_label(), "Generating...");
    }

    #[test]
    fn generate_without_preview_is_ignored() {
        let state = Rc::new(PlaygroundState::default());
        let next = state.clone().reduce(PlaygroundAction::Generate { ticket: 1 });
        assert!(Rc::ptr_eq(&state, &next));
    }

    #[test]
    fn generation_completes_with_demo_result() {
        let state = apply(
            with_preview(),
            vec![
                PlaygroundAction::Generate { ticket: 2 },
                PlaygroundAction::Generated { ticket: 2, result_url: DEMO.to_string() },
            ],
        );
        assert_eq!(state.result_url(), Some(DEMO));
        assert!(state.show_result());
        assert!(!state.show_loading());
        assert!(state.can_download());
        assert!(state.can_generate());
        assert_eq!(state.generate_label(), "Generate");
    }

    #[test]
    fn generating_again_from_done_reaches_same_terminal_state() {
        let state = apply(
            with_preview(),
            vec![
                PlaygroundAction::Generate { ticket: 2 },
                PlaygroundAction::Generated { ticket: 2, result_url: DEMO.to_string() },
                PlaygroundAction::Generate { ticket: 3 },
            ],
        );
        assert!(!state.show_result());
        assert!(!state.can_download());

        let state = state.reduce(PlaygroundAction::Generated { ticket: 3, result_url: DEMO.to_string() });
        assert_eq!(state.result_url(), Some(DEMO));
        assert!(state.can_download());
        assert!(state.can_generate());
    }

    #[test]
    fn failed_generation_returns_to_idle() {
        let state = apply(
            with_preview(),
            vec![
                PlaygroundAction::Generate { ticket: 2 },
                PlaygroundAction::GenerationFailed { ticket: 2 },
            ],
        );
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.can_generate());
        assert!(state.show_result_placeholder());
        assert!(!state.show_loading());
    }

    #[test]
    fn reset_mid_loading_restores_initial_state() {
        let state = apply(
            with_preview(),
            vec![PlaygroundAction::Generate { ticket: 2 }, PlaygroundAction::Reset],
        );
        assert!(!state.show_loading());
        assert_initial_visuals(&state);

        // The timer still fires later; its result must not resurface.
        let state = state.reduce(PlaygroundAction::Generated { ticket: 2, result_url: DEMO.to_string() });
        assert_initial_visuals(&state);
    }

    #[test]
    fn reset_from_done_restores_initial_state() {
        let state = apply(
            with_preview(),
            vec![
                PlaygroundAction::Generate { ticket: 2 },
                PlaygroundAction::Generated { ticket: 2, result_url: DEMO.to_string() },
                PlaygroundAction::Reset,
            ],
        );
        assert_initial_visuals(&state);
    }

    #[test]
    fn drag_highlight_is_idempotent() {
        let state = apply(
            Rc::new(PlaygroundState::default()),
            vec![
                PlaygroundAction::DragOver,
                PlaygroundAction::DragOver,
                PlaygroundAction::DragOver,
            ],
        );
        assert!(state.dragging);
        let state = state.reduce(PlaygroundAction::DragLeave);
        assert!(!state.dragging);
    }

    #[test]
    fn repeated_drag_events_keep_the_same_state() {
        let hovering = Rc::new(PlaygroundState::default()).reduce(PlaygroundAction::DragOver);
        let again = hovering.clone().reduce(PlaygroundAction::DragOver);
        assert!(Rc::ptr_eq(&hovering, &again));

        let idle = Rc::new(PlaygroundState::default());
        let left = idle.clone().reduce(PlaygroundAction::DragLeave);
        assert!(Rc::ptr_eq(&idle, &left));
    }

    #[test]
    fn second_submission_is_refused_until_first_finishes() {
        let mut in_flight = InFlight::default();
        assert!(in_flight.try_begin());
        assert!(!in_flight.try_begin());
        in_flight.finish();
        assert!(in_flight.try_begin());
    }

    #[test]
    fn tickets_increase_monotonically() {
        let counter = RefCell::new(0);
        assert_eq!(next_ticket(&counter), 1);
        assert_eq!(next_ticket(&counter), 2);
        assert_eq!(next_ticket(&counter), 3);
    }
}
