use super::{
    components::{mode_card::SyncModeCard, result_summary::SyncResultSummary},
    utils::{result_chart, result_title, MODE_CARDS},
    view_model::{use_sync_view_model, SyncViewModel},
};
use crate::components::{
    chart::{ChartKind, DoughnutChart},
    common::{Button, ButtonVariant, Spinner},
    confirm_dialog::ConfirmDialog,
    layout::SuccessMessage,
    modal::Modal,
};
use leptos::*;

#[component]
pub fn SyncPage() -> impl IntoView {
    let vm = use_sync_view_model();
    view! {
        <div class="space-y-6">
            <SyncHeader vm=vm/>
            <div class="grid grid-cols-1 gap-6 sm:grid-cols-2 lg:grid-cols-3">
                {MODE_CARDS
                    .into_iter()
                    .map(|card| view! {
                        <SyncModeCard
                            card=card
                            limit=vm.limit
                            disabled=vm.is_syncing()
                            on_sync=Callback::new(move |mode| vm.start_sync(mode))
                        />
                    })
                    .collect_view()}
            </div>
            <SyncProgress vm=vm/>
            <LastResult vm=vm/>
            <ResultDialog vm=vm/>
            <ConfirmDialog
                is_open=vm.confirm_clear_cache.into()
                title="Limpar Cache"
                message="Tem certeza que deseja limpar o cache de imagens?"
                confirm_label="Sim, limpar"
                on_confirm=Callback::new(move |_| vm.clear_image_cache())
                on_cancel=Callback::new(move |_| vm.confirm_clear_cache.set(false))
            />
            <ConfirmDialog
                is_open=vm.confirm_delete.into()
                title="Confirmar Exclusão"
                message="Tem certeza que deseja excluir TODOS os produtos? Esta ação não pode ser desfeita."
                confirm_label="Sim, excluir tudo"
                on_confirm=Callback::new(move |_| vm.delete_all())
                on_cancel=Callback::new(move |_| vm.confirm_delete.set(false))
                destructive=true
            />
        </div>
    }
}

#[component]
fn SyncHeader(vm: SyncViewModel) -> impl IntoView {
    let syncing = vm.is_syncing();
    let deleting = vm.is_deleting();
    view! {
        <div class="flex flex-wrap items-center justify-between gap-4">
            <div>
                <h1 class="text-2xl font-bold text-fg">"Sincronização"</h1>
                <p class="mt-1 text-sm text-fg-muted">"Gerencie a sincronização de dados com a Fake Store API"</p>
            </div>
            <div class="flex gap-2">
                <Button
                    variant=ButtonVariant::SecondaryOutlined
                    disabled=Signal::derive(move || syncing.get() || deleting.get())
                    on:click=move |_| vm.confirm_clear_cache.set(true)
                >
                    <span aria-hidden="true">"⟳"</span>
                    "Limpar Cache"
                </Button>
                <Button
                    variant=ButtonVariant::DangerOutlined
                    loading=deleting
                    disabled=syncing
                    on:click=move |_| vm.confirm_delete.set(true)
                >
                    <span aria-hidden="true">"🗑"</span>
                    "Limpar Dados"
                </Button>
            </div>
        </div>
    }
}

#[component]
fn SyncProgress(vm: SyncViewModel) -> impl IntoView {
    let syncing = vm.is_syncing();
    view! {
        <Show when=move || syncing.get()>
            <div class="bg-surface-elevated shadow rounded-lg p-6 text-center">
                <Spinner class="h-10 w-10 mx-auto"/>
                <h3 class="mt-3 mb-2 text-lg font-semibold text-fg">"Sincronizando..."</h3>
                <p class="text-fg-muted">"Por favor, aguarde enquanto os dados são processados."</p>
            </div>
        </Show>
    }
}

#[component]
fn LastResult(vm: SyncViewModel) -> impl IntoView {
    let syncing = vm.is_syncing();
    move || {
        if syncing.get() {
            return ().into_view();
        }
        match vm.last_result.get() {
            None => ().into_view(),
            Some(response) => {
                let chart = result_chart(&response.result);
                view! {
                    <div class="grid grid-cols-1 gap-6 lg:grid-cols-3">
                        <div class="bg-surface-elevated shadow rounded-lg border border-border p-4 lg:col-span-2">
                            <h3 class="text-lg font-semibold text-fg mb-3">{result_title(&response)}</h3>
                            <SyncResultSummary result=response.result.clone()/>
                        </div>
                        <div class="bg-surface-elevated shadow rounded-lg border border-border p-4">
                            <h3 class="text-lg font-semibold text-fg mb-3">"Resumo da Sincronização"</h3>
                            <DoughnutChart kind=ChartKind::Pie items=Signal::derive(move || chart.clone())/>
                        </div>
                    </div>
                }
                .into_view()
            }
        }
    }
}

#[component]
fn ResultDialog(vm: SyncViewModel) -> impl IntoView {
    let close = Callback::new(move |_| vm.show_result.set(false));
    view! {
        <Modal
            is_open=vm.show_result.into()
            title="Sincronização Concluída"
            on_close=close
            class="max-w-[1000px] w-[80vw]"
            footer=ViewFn::from(move || view! {
                <Button variant=ButtonVariant::Success on:click=move |_| close.call(())>
                    "Fechar" <span aria-hidden="true">"✓"</span>
                </Button>
            })
        >
            {move || vm.last_result.get().map(|response| view! {
                <div>
                    <SuccessMessage message=format!("Sincronização {} concluída com sucesso!", response.mode)/>
                    <SyncResultSummary result=response.result/>
                </div>
            })}
        </Modal>
    }
}
