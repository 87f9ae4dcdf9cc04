use leptos::*;
use std::{cell::Cell, rc::Rc, time::Duration};

use crate::api::{ApiError, ErrorReporter};

pub const MAX_VISIBLE_TOASTS: usize = 5;
pub const MISSING_CLIENT_ID_HINT: &str =
    "Configure o CLIENT_ID em config.json ou a chave \"clientId\" no localStorage";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn duration(&self) -> Duration {
        match self {
            ToastKind::Success => Duration::from_secs(3),
            ToastKind::Error => Duration::from_secs(5),
            ToastKind::Info => Duration::from_secs(4),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone)]
pub struct ToastState {
    toasts: RwSignal<Vec<Toast>>,
    next_id: Rc<Cell<u64>>,
}

impl ToastState {
    pub fn new() -> Self {
        Self {
            toasts: create_rw_signal(Vec::new()),
            next_id: Rc::new(Cell::new(1)),
        }
    }

    pub fn toasts(&self) -> Signal<Vec<Toast>> {
        self.toasts.into()
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let toast = Toast {
            id,
            kind,
            message: message.into(),
        };
        self.toasts.update(|list| {
            list.push(toast);
            if list.len() > MAX_VISIBLE_TOASTS {
                let overflow = list.len() - MAX_VISIBLE_TOASTS;
                list.drain(..overflow);
            }
        });
        self.schedule_dismiss(id, kind.duration());
        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Error, message)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Info, message)
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|toast| toast.id != id));
    }

    #[cfg(target_arch = "wasm32")]
    fn schedule_dismiss(&self, id: u64, after: Duration) {
        let state = self.clone();
        let millis = u32::try_from(after.as_millis()).unwrap_or(u32::MAX);
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(millis).await;
            state.dismiss(id);
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn schedule_dismiss(&self, _id: u64, _after: Duration) {}

    /// Turns every final API failure into error toasts.
    pub fn error_reporter(&self) -> ErrorReporter {
        let state = self.clone();
        Rc::new(move |error: &ApiError| {
            state.error(error.toast_message());
            if error.is_missing_client_id() {
                state.error(MISSING_CLIENT_ID_HINT);
            }
        })
    }
}

impl Default for ToastState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toasts() -> ToastState {
    match use_context::<ToastState>() {
        Some(state) => state,
        None => {
            let state = ToastState::new();
            provide_context(state.clone());
            state
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn durations_match_kind() {
        assert_eq!(ToastKind::Success.duration(), Duration::from_secs(3));
        assert_eq!(ToastKind::Error.duration(), Duration::from_secs(5));
        assert_eq!(ToastKind::Info.duration(), Duration::from_secs(4));
    }

    #[test]
    fn keeps_only_the_newest_five() {
        with_runtime(|| {
            let toasts = ToastState::new();
            for i in 0..7 {
                toasts.info(format!("t{}", i));
            }
            let visible: Vec<String> = toasts
                .toasts()
                .get()
                .into_iter()
                .map(|t| t.message)
                .collect();
            assert_eq!(visible, vec!["t2", "t3", "t4", "t5", "t6"]);
        });
    }

    #[test]
    fn dismiss_removes_by_id() {
        with_runtime(|| {
            let toasts = ToastState::new();
            let first = toasts.success("ok");
            let second = toasts.error("fail");
            assert_ne!(first, second);
            toasts.dismiss(first);
            let left = toasts.toasts().get();
            assert_eq!(left.len(), 1);
            assert_eq!(left[0].kind, ToastKind::Error);
        });
    }

    #[test]
    fn reporter_adds_client_id_hint() {
        with_runtime(|| {
            let toasts = ToastState::new();
            let report = toasts.error_reporter();
            report(&ApiError::from_response(
                400,
                r#"{"error":{"code":"integration.missing_client_id","message":"Client id ausente","status":400,"request_id":"r1"}}"#,
            ));
            report(&ApiError::from_response(500, r#"{"error":"Erro interno"}"#));
            let messages: Vec<String> =
                toasts.toasts().get().into_iter().map(|t| t.message).collect();
            assert_eq!(
                messages,
                vec![
                    "Client id ausente (ID: r1)".to_string(),
                    MISSING_CLIENT_ID_HINT.to_string(),
                    "Erro interno".to_string(),
                ]
            );
        });
    }

    #[test]
    fn use_toasts_shares_context() {
        with_runtime(|| {
            use_toasts().info("hello");
            assert_eq!(use_toasts().toasts().get().len(), 1);
        });
    }
}
