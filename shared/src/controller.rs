//! The recommendation request controller: form gating, the in-flight request,
//! and the post-success cooldown.
//!
//! The decision logic lives in [`Controller`], a synchronous state machine
//! that turns events into effects and never touches a clock or a socket. The
//! [`CoachRuntime`] owns the machine, executes its effects on tokio (the
//! upstream call, the one-second cooldown timer), and feeds the results back
//! through a single event queue, so there is one logical thread of control.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, warn};
use validator::Validate;

use crate::models::{RecommendationRequest, RecommendationResponse};
use crate::recommendations::RecommendationService;
use crate::upstream::PromptModel;

/// Seconds a successful response keeps the submit gate closed.
pub const COOLDOWN_SECONDS: u32 = 10;

/// User-facing text shown when a submission fails.
pub const FAILURE_NOTICE: &str = "There was a problem with the AI. Please try again later.";

/// Where the controller currently is in the request cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    /// Nothing submitted yet, or the view was torn down.
    Idle,
    /// A submission is in flight; the submit gate is closed.
    Pending,
    /// A result arrived; the gate stays closed while the countdown runs.
    Cooldown {
        seconds_remaining: u32,
        response: RecommendationResponse,
    },
    /// The countdown expired; the result stays displayed and the gate is open.
    Succeeded { response: RecommendationResponse },
    /// The last submission failed; resubmission is allowed immediately.
    Failed { message: String },
}

/// Inputs the state machine reacts to.
#[derive(Debug)]
pub enum Event {
    /// The user pressed submit with the given form contents.
    Submit(RecommendationRequest),
    /// The upstream call tagged with `generation` resolved.
    UpstreamResolved {
        generation: u64,
        result: std::result::Result<RecommendationResponse, String>,
    },
    /// One second of cooldown elapsed.
    CooldownTick,
    /// The view hosting the controller went away.
    Teardown,
}

/// Side effects the runtime must perform after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Invoke the service exactly once for this generation.
    CallUpstream {
        generation: u64,
        request: RecommendationRequest,
    },
    /// Start the one-second cooldown timer, replacing any running one.
    StartCooldown,
    /// Stop the cooldown timer.
    CancelCooldown,
    /// Surface a generic failure notification to the user.
    NotifyFailure(String),
    /// Show field-level validation messages on the form.
    ShowFieldErrors(Vec<FieldError>),
}

/// A validation message attached to one form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Pure state machine for the request/cooldown cycle.
///
/// Every accepted submission gets a fresh generation number; a resolution
/// carrying any other generation is dropped without touching state, which is
/// what discards replies that arrive after teardown.
#[derive(Debug)]
pub struct Controller {
    state: RequestState,
    generation: u64,
    torn_down: bool,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            state: RequestState::Idle,
            generation: 0,
            torn_down: false,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.torn_down
            && matches!(
                self.state,
                RequestState::Idle | RequestState::Succeeded { .. } | RequestState::Failed { .. }
            )
    }

    /// The response currently on screen, if any.
    pub fn displayed_response(&self) -> Option<&RecommendationResponse> {
        match &self.state {
            RequestState::Cooldown { response, .. } | RequestState::Succeeded { response } => {
                Some(response)
            }
            _ => None,
        }
    }

    /// Apply one event, returning the effects the runtime must execute.
    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        if self.torn_down {
            return Vec::new();
        }

        match event {
            Event::Submit(form) => {
                if !self.can_submit() {
                    return Vec::new();
                }
                if let Err(errors) = form.validate() {
                    return vec![Effect::ShowFieldErrors(flatten_field_errors(&errors))];
                }
                self.generation += 1;
                self.state = RequestState::Pending;
                vec![Effect::CallUpstream {
                    generation: self.generation,
                    request: form,
                }]
            }

            Event::UpstreamResolved { generation, result } => {
                if generation != self.generation || self.state != RequestState::Pending {
                    return Vec::new();
                }
                match result {
                    Ok(response) => {
                        self.state = RequestState::Cooldown {
                            seconds_remaining: COOLDOWN_SECONDS,
                            response,
                        };
                        vec![Effect::StartCooldown]
                    }
                    Err(_) => {
                        self.state = RequestState::Failed {
                            message: FAILURE_NOTICE.to_string(),
                        };
                        vec![Effect::NotifyFailure(FAILURE_NOTICE.to_string())]
                    }
                }
            }

            Event::CooldownTick => match &mut self.state {
                RequestState::Cooldown {
                    seconds_remaining,
                    response,
                } => {
                    *seconds_remaining -= 1;
                    if *seconds_remaining == 0 {
                        let response = response.clone();
                        self.state = RequestState::Succeeded { response };
                        vec![Effect::CancelCooldown]
                    } else {
                        Vec::new()
                    }
                }
                // A tick with no cooldown running means a timer outlived its
                // state; stop it rather than let it keep firing.
                _ => vec![Effect::CancelCooldown],
            },

            Event::Teardown => {
                self.torn_down = true;
                let was_cooling = matches!(self.state, RequestState::Cooldown { .. });
                self.state = RequestState::Idle;
                if was_cooling {
                    vec![Effect::CancelCooldown]
                } else {
                    Vec::new()
                }
            }
        }
    }
}

fn flatten_field_errors(errors: &validator::ValidationErrors) -> Vec<FieldError> {
    let mut flattened: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(|error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string()),
            })
        })
        .collect();
    flattened.sort_by(|a, b| a.field.cmp(&b.field));
    flattened
}

/// Drives a [`Controller`] against tokio time and a live service.
pub struct CoachRuntime<M> {
    service: Arc<RecommendationService<M>>,
    controller: Controller,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    cooldown: Option<JoinHandle<()>>,
    last_notice: Option<String>,
    field_errors: Vec<FieldError>,
}

impl<M: PromptModel + 'static> CoachRuntime<M> {
    pub fn new(service: RecommendationService<M>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            service: Arc::new(service),
            controller: Controller::new(),
            events_tx,
            events_rx,
            cooldown: None,
            last_notice: None,
            field_errors: Vec::new(),
        }
    }

    pub fn state(&self) -> &RequestState {
        self.controller.state()
    }

    pub fn can_submit(&self) -> bool {
        self.controller.can_submit()
    }

    pub fn displayed_response(&self) -> Option<&RecommendationResponse> {
        self.controller.displayed_response()
    }

    /// The failure notification currently shown, if any.
    pub fn last_notice(&self) -> Option<&str> {
        self.last_notice.as_deref()
    }

    /// Field-level validation messages from the last submit attempt.
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Feed one user submission into the loop.
    pub fn submit(&mut self, form: RecommendationRequest) {
        self.apply(Event::Submit(form));
    }

    /// Tear the view down; anything still in flight resolves into the void.
    pub fn teardown(&mut self) {
        self.apply(Event::Teardown);
    }

    /// Wait for the next queued event and apply it.
    pub async fn tick(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.apply(event);
        }
    }

    /// Apply everything already queued without waiting.
    pub fn drain(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: Event) {
        if matches!(event, Event::Submit(_)) {
            self.field_errors.clear();
        }
        for effect in self.controller.update(event) {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::CallUpstream {
                generation,
                request,
            } => {
                self.last_notice = None;
                let service = Arc::clone(&self.service);
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    let result = service
                        .recommend(request)
                        .await
                        .map_err(|e| e.to_string());
                    if let Err(message) = &result {
                        error!("Recommendation request failed: {}", message);
                    }
                    // The receiver is gone after the runtime is dropped; the
                    // result is discarded either way.
                    let _ = events.send(Event::UpstreamResolved { generation, result });
                });
            }

            Effect::StartCooldown => {
                if let Some(task) = self.cooldown.take() {
                    task.abort();
                }
                let events = self.events_tx.clone();
                self.cooldown = Some(tokio::spawn(async move {
                    let mut interval = tokio::time::interval(Duration::from_secs(1));
                    // The first tick completes immediately; skip it.
                    interval.tick().await;
                    loop {
                        interval.tick().await;
                        if events.send(Event::CooldownTick).is_err() {
                            break;
                        }
                    }
                }));
            }

            Effect::CancelCooldown => {
                if let Some(task) = self.cooldown.take() {
                    task.abort();
                }
            }

            Effect::NotifyFailure(message) => {
                warn!("Showing failure notice: {}", message);
                self.last_notice = Some(message);
            }

            Effect::ShowFieldErrors(errors) => {
                self.field_errors = errors;
            }
        }
    }
}

impl<M> Drop for CoachRuntime<M> {
    fn drop(&mut self) {
        if let Some(task) = self.cooldown.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RecommendationRequest {
        RecommendationRequest {
            dietary_needs: "vegetarian, no nuts".to_string(),
            health_goals: "lose weight".to_string(),
            food_preferences: "loves spicy food".to_string(),
        }
    }

    fn response() -> RecommendationResponse {
        RecommendationResponse {
            recommendations: "Lentil curry".to_string(),
            reasoning: "High in protein".to_string(),
        }
    }

    #[test]
    fn test_short_field_reports_error_without_upstream_call() {
        let mut controller = Controller::new();

        let form = RecommendationRequest {
            dietary_needs: "vegan".to_string(),
            ..valid_form()
        };
        let effects = controller.update(Event::Submit(form));

        assert_eq!(
            effects,
            vec![Effect::ShowFieldErrors(vec![FieldError {
                field: "dietary_needs".to_string(),
                message: "Please describe your dietary needs in at least 10 characters."
                    .to_string(),
            }])]
        );
        assert_eq!(*controller.state(), RequestState::Idle);
        assert!(controller.can_submit());
    }

    #[test]
    fn test_valid_submit_goes_pending_with_one_call() {
        let mut controller = Controller::new();

        let effects = controller.update(Event::Submit(valid_form()));

        assert_eq!(
            effects,
            vec![Effect::CallUpstream {
                generation: 1,
                request: valid_form(),
            }]
        );
        assert_eq!(*controller.state(), RequestState::Pending);
        assert!(!controller.can_submit());
    }

    #[test]
    fn test_resubmission_while_pending_is_rejected() {
        let mut controller = Controller::new();
        controller.update(Event::Submit(valid_form()));

        let effects = controller.update(Event::Submit(valid_form()));

        assert!(effects.is_empty());
        assert_eq!(*controller.state(), RequestState::Pending);
    }

    #[test]
    fn test_success_starts_ten_second_cooldown() {
        let mut controller = Controller::new();
        controller.update(Event::Submit(valid_form()));

        let effects = controller.update(Event::UpstreamResolved {
            generation: 1,
            result: Ok(response()),
        });

        assert_eq!(effects, vec![Effect::StartCooldown]);
        assert_eq!(
            *controller.state(),
            RequestState::Cooldown {
                seconds_remaining: COOLDOWN_SECONDS,
                response: response(),
            }
        );
        assert!(!controller.can_submit());
        assert_eq!(controller.displayed_response(), Some(&response()));
    }

    #[test]
    fn test_gate_reopens_after_exactly_ten_ticks() {
        let mut controller = Controller::new();
        controller.update(Event::Submit(valid_form()));
        controller.update(Event::UpstreamResolved {
            generation: 1,
            result: Ok(response()),
        });

        for tick in 1..COOLDOWN_SECONDS {
            let effects = controller.update(Event::CooldownTick);
            assert!(effects.is_empty(), "tick {} should not emit effects", tick);
            assert!(!controller.can_submit(), "gate closed through tick {}", tick);
        }

        let effects = controller.update(Event::CooldownTick);
        assert_eq!(effects, vec![Effect::CancelCooldown]);
        assert!(controller.can_submit());
        assert_eq!(
            *controller.state(),
            RequestState::Succeeded {
                response: response()
            }
        );
        assert_eq!(controller.displayed_response(), Some(&response()));
    }

    #[test]
    fn test_failure_reopens_gate_immediately() {
        let mut controller = Controller::new();
        controller.update(Event::Submit(valid_form()));

        let effects = controller.update(Event::UpstreamResolved {
            generation: 1,
            result: Err("Upstream error: timeout".to_string()),
        });

        assert_eq!(
            effects,
            vec![Effect::NotifyFailure(FAILURE_NOTICE.to_string())]
        );
        assert_eq!(
            *controller.state(),
            RequestState::Failed {
                message: FAILURE_NOTICE.to_string()
            }
        );
        assert!(controller.can_submit());
        assert_eq!(controller.displayed_response(), None);
    }

    #[test]
    fn test_stale_generation_resolution_is_dropped() {
        let mut controller = Controller::new();
        controller.update(Event::Submit(valid_form()));

        let effects = controller.update(Event::UpstreamResolved {
            generation: 7,
            result: Ok(response()),
        });

        assert!(effects.is_empty());
        assert_eq!(*controller.state(), RequestState::Pending);
    }

    #[test]
    fn test_resolution_after_teardown_is_dropped() {
        let mut controller = Controller::new();
        controller.update(Event::Submit(valid_form()));
        controller.update(Event::Teardown);

        let effects = controller.update(Event::UpstreamResolved {
            generation: 1,
            result: Ok(response()),
        });

        assert!(effects.is_empty());
        assert_eq!(*controller.state(), RequestState::Idle);
        assert!(!controller.can_submit());
    }

    #[test]
    fn test_teardown_during_cooldown_cancels_timer() {
        let mut controller = Controller::new();
        controller.update(Event::Submit(valid_form()));
        controller.update(Event::UpstreamResolved {
            generation: 1,
            result: Ok(response()),
        });

        let effects = controller.update(Event::Teardown);
        assert_eq!(effects, vec![Effect::CancelCooldown]);
    }

    #[test]
    fn test_stray_tick_outside_cooldown_stops_timer() {
        let mut controller = Controller::new();

        let effects = controller.update(Event::CooldownTick);

        assert_eq!(effects, vec![Effect::CancelCooldown]);
        assert_eq!(*controller.state(), RequestState::Idle);
    }

    #[test]
    fn test_retry_after_failure_uses_next_generation() {
        let mut controller = Controller::new();
        controller.update(Event::Submit(valid_form()));
        controller.update(Event::UpstreamResolved {
            generation: 1,
            result: Err("boom".to_string()),
        });

        let effects = controller.update(Event::Submit(valid_form()));

        assert_eq!(
            effects,
            vec![Effect::CallUpstream {
                generation: 2,
                request: valid_form(),
            }]
        );
    }
}

#[cfg(test)]
mod runtime_tests {
    use super::*;
    use crate::Error;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stand-in model sharing its call counter with the test.
    struct CountingModel {
        reply: std::result::Result<String, String>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PromptModel for CountingModel {
        async fn complete(&self, _prompt: &str) -> crate::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .clone()
                .map_err(Error::Upstream)
        }
    }

    const REPLY: &str = r#"{"recommendations": "Lentil curry", "reasoning": "High in protein"}"#;

    fn runtime_with(
        reply: std::result::Result<&str, &str>,
    ) -> (CoachRuntime<CountingModel>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let model = CountingModel {
            reply: reply.map(String::from).map_err(String::from),
            calls: Arc::clone(&calls),
        };
        (CoachRuntime::new(RecommendationService::new(model)), calls)
    }

    fn valid_form() -> RecommendationRequest {
        RecommendationRequest {
            dietary_needs: "vegetarian, no nuts".to_string(),
            health_goals: "lose weight".to_string(),
            food_preferences: "loves spicy food".to_string(),
        }
    }

    async fn finish_cooldown(runtime: &mut CoachRuntime<CountingModel>) {
        for _ in 0..COOLDOWN_SECONDS {
            assert!(!runtime.can_submit());
            runtime.tick().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_success_cooldown_cycle() {
        let (mut runtime, calls) = runtime_with(Ok(REPLY));

        runtime.submit(valid_form());
        assert_eq!(*runtime.state(), RequestState::Pending);
        assert!(!runtime.can_submit());

        // Upstream resolution.
        runtime.tick().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            runtime.state(),
            RequestState::Cooldown {
                seconds_remaining: COOLDOWN_SECONDS,
                ..
            }
        ));
        assert!(runtime.displayed_response().is_some());

        finish_cooldown(&mut runtime).await;
        assert!(runtime.can_submit());
        assert!(matches!(runtime.state(), RequestState::Succeeded { .. }));

        // The timer is gone; nothing left in the queue changes state.
        runtime.drain();
        assert!(matches!(runtime.state(), RequestState::Succeeded { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_shows_notice_without_cooldown() {
        let (mut runtime, calls) = runtime_with(Err("connection timed out"));

        runtime.submit(valid_form());
        runtime.tick().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(runtime.can_submit());
        assert_eq!(runtime.last_notice(), Some(FAILURE_NOTICE));
        assert!(runtime.displayed_response().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_form_never_calls_upstream() {
        let (mut runtime, calls) = runtime_with(Ok(REPLY));

        runtime.submit(RecommendationRequest {
            dietary_needs: "vegan".to_string(),
            ..valid_form()
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(runtime.field_errors().len(), 1);
        assert_eq!(runtime.field_errors()[0].field, "dietary_needs");
        assert!(runtime.can_submit());
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_discards_in_flight_response() {
        let (mut runtime, calls) = runtime_with(Ok(REPLY));

        runtime.submit(valid_form());
        runtime.teardown();

        // Let the spawned call resolve and deliver its event.
        runtime.tick().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*runtime.state(), RequestState::Idle);
        assert!(runtime.displayed_response().is_none());
        assert!(!runtime.can_submit());
    }

    #[tokio::test(start_paused = true)]
    async fn test_identical_submissions_are_independent_calls() {
        let (mut runtime, calls) = runtime_with(Ok(REPLY));

        runtime.submit(valid_form());
        runtime.tick().await;
        finish_cooldown(&mut runtime).await;

        runtime.submit(valid_form());
        runtime.tick().await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(matches!(runtime.state(), RequestState::Cooldown { .. }));
    }
}
