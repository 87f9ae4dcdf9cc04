use crate::{
    api::{SkippedProduct, SyncMode, SyncResponse, SyncResult, SyncedProduct},
    components::common::ButtonVariant,
    utils::chart::{
        ChartItem, SYNC_ERRORS_COLOR, SYNC_IMPORTED_COLOR, SYNC_SKIPPED_COLOR, SYNC_UPDATED_COLOR,
    },
};

pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 20;
pub const DEFAULT_LIMIT: u32 = 5;
pub const RESULT_ROWS_PER_PAGE: u32 = 5;

/// Limit typed by the user; empty, zero or unparsable falls back to 5.
pub fn parse_limit(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(0) | Err(_) => DEFAULT_LIMIT,
        Ok(value) => value.clamp(MIN_LIMIT as i64, MAX_LIMIT as i64) as u32,
    }
}

/// Static copy for one mode card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeCard {
    pub mode: SyncMode,
    pub title: &'static str,
    pub hint: &'static str,
    pub icon: &'static str,
    pub variant: ButtonVariant,
}

pub const MODE_CARDS: [ModeCard; 3] = [
    ModeCard {
        mode: SyncMode::Full,
        title: "Sincronização Completa",
        hint: "Pode demorar alguns minutos para processar todos os produtos",
        icon: "⬇",
        variant: ButtonVariant::Warning,
    },
    ModeCard {
        mode: SyncMode::Delta,
        title: "Atualizar Produtos",
        hint: "Processo mais rápido, ideal para atualizações regulares",
        icon: "⟳",
        variant: ButtonVariant::Info,
    },
    ModeCard {
        mode: SyncMode::Limited,
        title: "Importar por quantidade",
        hint: "Ideal para testes ou importações parciais",
        icon: "⚲",
        variant: ButtonVariant::Success,
    },
];

pub fn button_label(mode: SyncMode, limit: u32) -> String {
    match mode {
        SyncMode::Full => "Importar Tudo".to_string(),
        SyncMode::Delta => "Sincronizar Produtos".to_string(),
        SyncMode::Limited => format!("Importar {}", limit),
    }
}

/// Limit sent with the request; only the limited mode carries one.
pub fn limit_for(mode: SyncMode, limit: u32) -> Option<u32> {
    (mode == SyncMode::Limited).then_some(limit)
}

/// Pie slices for a result; zero counts are left out.
pub fn result_chart(result: &SyncResult) -> Vec<ChartItem> {
    [
        ("Importados", result.imported as f64, SYNC_IMPORTED_COLOR),
        ("Atualizados", result.updated as f64, SYNC_UPDATED_COLOR),
        ("Ignorados", result.skipped as f64, SYNC_SKIPPED_COLOR),
        ("Erros", result.errors.len() as f64, SYNC_ERRORS_COLOR),
    ]
    .into_iter()
    .filter(|(_, value, _)| *value > 0.0)
    .map(|(label, value, color)| ChartItem::new(label, value, color))
    .collect()
}

pub fn result_title(response: &SyncResponse) -> String {
    match response.limit.filter(|limit| *limit > 0) {
        Some(limit) => format!(
            "Último Resultado da Sincronização ({} - {} produtos)",
            response.mode, limit
        ),
        None => format!("Último Resultado da Sincronização ({})", response.mode),
    }
}

/// One line of the imported/updated/skipped tables. `last` is the internal
/// id for synced products and the reason for skipped ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub key: i64,
    pub title: String,
    pub external_id: i64,
    pub last: String,
}

pub fn synced_rows(products: &[SyncedProduct]) -> Vec<ResultRow> {
    products
        .iter()
        .map(|p| ResultRow {
            key: p.id,
            title: p.title.clone(),
            external_id: p.external_id,
            last: p.id.to_string(),
        })
        .collect()
}

pub fn skipped_rows(products: &[SkippedProduct]) -> Vec<ResultRow> {
    products
        .iter()
        .map(|p| ResultRow {
            key: p.id,
            title: p.title.clone(),
            external_id: p.external_id,
            last: p.reason.clone(),
        })
        .collect()
}

pub fn success_toast(response: &SyncResponse) -> String {
    format!(
        "Sincronização {} concluída! {} importados, {} atualizados",
        response.mode, response.result.imported, response.result.updated
    )
}
