// src/services/sequence.rs

use std::sync::Arc;

use crate::{common::error::AppError, db::store::DocumentStore};

pub const QUOTATION_SEQUENCE: &str = "quotationId";
pub const ORDER_SEQUENCE: &str = "orderId";

/// Emite números legíveis ("Q-00042") a partir dos contadores do store.
/// Números são únicos mas podem ter buracos: um valor consumido por um
/// save que falhou depois não volta.
#[derive(Clone)]
pub struct SequenceIssuer {
    store: Arc<dyn DocumentStore>,
}

impl SequenceIssuer {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn next(&self, sequence: &str) -> Result<i64, AppError> {
        let n = self.store.next_sequence(sequence).await?;
        tracing::debug!(sequence, n, "número de sequência emitido");
        Ok(n)
    }
}

pub fn format_sequence(prefix: &str, n: i64) -> String {
    format!("{}-{:05}", prefix, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[test]
    fn pads_to_five_digits() {
        assert_eq!(format_sequence("Q", 1), "Q-00001");
        assert_eq!(format_sequence("O", 1024), "O-01024");
        // Passa de 5 dígitos sem truncar
        assert_eq!(format_sequence("Q", 123456), "Q-123456");
    }

    #[tokio::test]
    async fn first_number_is_one() {
        let issuer = SequenceIssuer::new(Arc::new(MemoryStore::new()));
        assert_eq!(issuer.next(QUOTATION_SEQUENCE).await.unwrap(), 1);
        assert_eq!(issuer.next(QUOTATION_SEQUENCE).await.unwrap(), 2);
        assert_eq!(issuer.next(ORDER_SEQUENCE).await.unwrap(), 1);
    }
}
