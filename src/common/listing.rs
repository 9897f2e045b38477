// src/common/listing.rs
//
// Filtro / paginação das telas de listagem. Tudo em memória sobre registros
// já serializados, sem índice: o custo é O(n · tamanho do registro).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_SIZE: usize = 8;
pub const EMPTY_PLACEHOLDER: &str = "No records found.";

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Busca textual em qualquer campo do registro
    pub q: Option<String>,
    /// Igualdade no campo `status` ("all" desliga o filtro)
    pub status: Option<String>,
    /// Início inclusivo sobre `createdAt`
    pub from: Option<NaiveDate>,
    /// Fim inclusivo sobre `createdAt`
    pub to: Option<NaiveDate>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
    #[schema(value_type = Vec<Object>)]
    pub rows: Vec<Value>,
    pub page: usize,
    pub per_page: usize,
    pub page_count: usize,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl ListQuery {
    /// Passos 1 a 3: busca, status e intervalo de datas. Preserva a ordem de entrada.
    pub fn filter(&self, records: &[Value]) -> Vec<Value> {
        let needle = self
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let status = self
            .status
            .as_deref()
            .filter(|s| !s.is_empty() && *s != "all");

        let start = self
            .from
            .map(|d| d.and_time(NaiveTime::MIN).and_utc());
        let end = self
            .to
            .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
            .map(|dt| dt.and_utc());

        records
            .iter()
            .filter(|record| match &needle {
                Some(needle) => record.to_string().to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .filter(|record| match status {
                Some(status) => record.get("status").and_then(Value::as_str) == Some(status),
                None => true,
            })
            .filter(|record| {
                if start.is_none() && end.is_none() {
                    return true;
                }
                let Some(created_at) = created_at(record) else {
                    return false;
                };
                start.is_none_or(|s| created_at >= s) && end.is_none_or(|e| created_at <= e)
            })
            .cloned()
            .collect()
    }

    /// Filtra e devolve a página pedida.
    pub fn apply(&self, records: &[Value]) -> ListPage {
        let filtered = self.filter(records);
        paginate(
            filtered,
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

fn created_at(record: &Value) -> Option<DateTime<Utc>> {
    record
        .get("createdAt")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// `pageCount = max(1, ceil(total / per_page))`. Páginas fora do intervalo são
/// trazidas para a borda mais próxima.
pub fn paginate(rows: Vec<Value>, page: usize, per_page: usize) -> ListPage {
    let per_page = per_page.max(1);
    let total = rows.len();
    let page_count = total.div_ceil(per_page).max(1);
    let page = page.clamp(1, page_count);

    let rows: Vec<Value> = rows
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    let placeholder = rows
        .is_empty()
        .then(|| EMPTY_PLACEHOLDER.to_string());

    ListPage {
        rows,
        page,
        per_page,
        page_count,
        total,
        placeholder,
    }
}
