use super::{
    repository::SyncRepository,
    utils::{limit_for, success_toast, DEFAULT_LIMIT},
};
use crate::{
    api::{ApiClient, ApiError, SyncMode, SyncRequest, SyncResponse},
    state::{
        query::use_query_client,
        toast::{use_toasts, ToastState},
    },
};
use leptos::*;
use std::rc::Rc;

pub const CACHE_CLEARED_MESSAGE: &str = "Cache de imagens limpo com sucesso!";
pub const PRODUCTS_DELETED_MESSAGE: &str = "Todos os produtos foram excluídos com sucesso!";
pub const DELETE_FAILED_MESSAGE: &str = "Erro ao excluir produtos";
pub const SYNC_FAILED_MESSAGE: &str = "Erro na sincronização";

#[derive(Clone, Copy)]
pub struct SyncViewModel {
    pub limit: RwSignal<u32>,
    pub last_result: RwSignal<Option<SyncResponse>>,
    pub show_result: RwSignal<bool>,
    pub confirm_clear_cache: RwSignal<bool>,
    pub confirm_delete: RwSignal<bool>,
    pub sync_action: Action<SyncRequest, Result<SyncResponse, ApiError>>,
    pub delete_action: Action<(), Result<(), ApiError>>,
    repository: StoredValue<SyncRepository>,
    toasts: StoredValue<ToastState>,
}

impl SyncViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let queries = use_query_client();
        let toasts = use_toasts();
        let repository = store_value(SyncRepository::new_with_client(Rc::new(api), queries));

        let limit = create_rw_signal(DEFAULT_LIMIT);
        let last_result = create_rw_signal(None::<SyncResponse>);
        let show_result = create_rw_signal(false);

        let sync_action = create_action(move |request: &SyncRequest| {
            let repo = repository.get_value();
            let request = request.clone();
            async move { repo.sync(request).await }
        });
        let delete_action = create_action(move |_: &()| {
            let repo = repository.get_value();
            async move { repo.delete_all().await }
        });

        let vm = Self {
            limit,
            last_result,
            show_result,
            confirm_clear_cache: create_rw_signal(false),
            confirm_delete: create_rw_signal(false),
            sync_action,
            delete_action,
            repository,
            toasts: store_value(toasts),
        };
        create_effect(move |_| {
            if let Some(outcome) = sync_action.value().get() {
                vm.apply_sync_outcome(outcome);
            }
        });
        create_effect(move |_| {
            if let Some(outcome) = delete_action.value().get() {
                vm.apply_delete_outcome(outcome);
            }
        });
        vm
    }

    pub fn apply_sync_outcome(&self, outcome: Result<SyncResponse, ApiError>) {
        match outcome {
            Ok(response) => {
                log::info!(
                    "Sync {} finished: {} imported, {} updated, {} skipped",
                    response.mode,
                    response.result.imported,
                    response.result.updated,
                    response.result.skipped
                );
                self.toasts
                    .with_value(|toasts| toasts.success(success_toast(&response)));
                self.last_result.set(Some(response));
                self.show_result.set(true);
            }
            Err(err) => {
                log::error!("Sync failed: {}", err);
                self.toasts.with_value(|toasts| toasts.error(SYNC_FAILED_MESSAGE));
            }
        }
    }

    pub fn apply_delete_outcome(&self, outcome: Result<(), ApiError>) {
        match outcome {
            Ok(()) => {
                log::info!("All products deleted");
                self.toasts
                    .with_value(|toasts| toasts.success(PRODUCTS_DELETED_MESSAGE));
                self.last_result.set(None);
                self.show_result.set(false);
            }
            Err(err) => {
                log::error!("Delete all failed: {}", err);
                self.toasts
                    .with_value(|toasts| toasts.error(DELETE_FAILED_MESSAGE));
            }
        }
    }

    pub fn is_syncing(&self) -> Signal<bool> {
        self.sync_action.pending().into()
    }

    pub fn is_deleting(&self) -> Signal<bool> {
        self.delete_action.pending().into()
    }

    pub fn start_sync(&self, mode: SyncMode) {
        if self.sync_action.pending().get_untracked() {
            return;
        }
        let limit = limit_for(mode, self.limit.get_untracked());
        self.sync_action.dispatch(SyncRequest::new(mode, limit));
    }

    pub fn clear_image_cache(&self) {
        self.confirm_clear_cache.set(false);
        self.repository.with_value(|repo| repo.clear_image_cache());
        self.toasts.with_value(|toasts| {
            toasts.success(CACHE_CLEARED_MESSAGE);
        });
    }

    pub fn delete_all(&self) {
        self.confirm_delete.set(false);
        self.delete_action.dispatch(());
    }
}

pub fn use_sync_view_model() -> SyncViewModel {
    match use_context::<SyncViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = SyncViewModel::new();
            provide_context(vm);
            vm
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::sync_json;
    use crate::state::toast::ToastKind;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn clearing_image_cache_closes_dialog_and_toasts() {
        with_runtime(|| {
            let toasts = ToastState::new();
            provide_context(toasts.clone());
            let vm = SyncViewModel::new();
            vm.confirm_clear_cache.set(true);

            vm.clear_image_cache();

            assert!(!vm.confirm_clear_cache.get_untracked());
            let shown = toasts.toasts().get_untracked();
            assert_eq!(shown.len(), 1);
            assert_eq!(shown[0].kind, ToastKind::Success);
            assert_eq!(shown[0].message, CACHE_CLEARED_MESSAGE);
        });
    }

    fn sync_response() -> SyncResponse {
        serde_json::from_value(sync_json("limited")).unwrap()
    }

    #[test]
    fn successful_sync_stores_result_and_opens_dialog() {
        with_runtime(|| {
            let toasts = ToastState::new();
            provide_context(toasts.clone());
            let vm = SyncViewModel::new();

            vm.apply_sync_outcome(Ok(sync_response()));

            assert!(vm.show_result.get_untracked());
            assert_eq!(vm.last_result.get_untracked().map(|r| r.result.imported), Some(3));
            let shown = toasts.toasts().get_untracked();
            assert_eq!(shown.len(), 1);
            assert_eq!(shown[0].kind, ToastKind::Success);
            assert_eq!(
                shown[0].message,
                "Sincronização limited concluída! 3 importados, 1 atualizados"
            );
        });
    }

    #[test]
    fn failed_sync_keeps_previous_result() {
        with_runtime(|| {
            let toasts = ToastState::new();
            provide_context(toasts.clone());
            let vm = SyncViewModel::new();
            vm.last_result.set(Some(sync_response()));

            vm.apply_sync_outcome(Err(ApiError::request_failed("timeout")));

            assert!(vm.last_result.get_untracked().is_some());
            assert!(!vm.show_result.get_untracked());
            let shown = toasts.toasts().get_untracked();
            assert_eq!(shown.len(), 1);
            assert_eq!(shown[0].kind, ToastKind::Error);
            assert_eq!(shown[0].message, SYNC_FAILED_MESSAGE);
        });
    }

    #[test]
    fn delete_all_resets_last_result() {
        with_runtime(|| {
            let toasts = ToastState::new();
            provide_context(toasts.clone());
            let vm = SyncViewModel::new();
            vm.last_result.set(Some(sync_response()));
            vm.show_result.set(true);

            vm.apply_delete_outcome(Ok(()));

            assert!(vm.last_result.get_untracked().is_none());
            assert!(!vm.show_result.get_untracked());
            let shown = toasts.toasts().get_untracked();
            assert_eq!(shown[0].kind, ToastKind::Success);
            assert_eq!(shown[0].message, PRODUCTS_DELETED_MESSAGE);
        });
    }

    #[test]
    fn failed_delete_shows_error_and_keeps_result() {
        with_runtime(|| {
            let toasts = ToastState::new();
            provide_context(toasts.clone());
            let vm = SyncViewModel::new();
            vm.last_result.set(Some(sync_response()));

            vm.apply_delete_outcome(Err(ApiError::request_failed("boom")));

            assert!(vm.last_result.get_untracked().is_some());
            let shown = toasts.toasts().get_untracked();
            assert_eq!(shown.len(), 1);
            assert_eq!(shown[0].kind, ToastKind::Error);
            assert_eq!(shown[0].message, DELETE_FAILED_MESSAGE);
        });
    }

    #[test]
    fn starts_with_default_limit_and_no_result() {
        with_runtime(|| {
            let vm = SyncViewModel::new();
            assert_eq!(vm.limit.get_untracked(), DEFAULT_LIMIT);
            assert!(vm.last_result.get_untracked().is_none());
            assert!(!vm.is_syncing().get_untracked());
        });
    }
}
