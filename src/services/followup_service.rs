// src/services/followup_service.rs

use crate::{
    common::{
        error::AppError,
        listing::{ListPage, ListQuery},
        validation::trimmed,
    },
    db::Repository,
    models::{
        crm::Lead,
        followup::{CreateFollowUpPayload, FollowUp, RelatedType},
        record::Record,
        sales::Quotation,
    },
    services::crm_service::list_view,
};

#[derive(Clone)]
pub struct FollowUpService {
    followups: Repository<FollowUp>,
    leads: Repository<Lead>,
    quotations: Repository<Quotation>,
}

impl FollowUpService {
    pub fn new(
        followups: Repository<FollowUp>,
        leads: Repository<Lead>,
        quotations: Repository<Quotation>,
    ) -> Self {
        Self {
            followups,
            leads,
            quotations,
        }
    }

    pub async fn create(&self, payload: CreateFollowUpPayload) -> Result<Record<FollowUp>, AppError> {
        let (Some(related_type), Some(related_id), Some(follow_up_date)) =
            (payload.related_type, payload.related_id, payload.follow_up_date)
        else {
            return Err(AppError::InvalidInput(
                "relatedType, relatedId and followUpDate are required".to_string(),
            ));
        };

        // A referência precisa existir na coleção indicada
        let exists = match related_type {
            RelatedType::Lead => self.leads.exists(related_id).await?,
            RelatedType::Quotation => self.quotations.exists(related_id).await?,
        };
        if !exists {
            return Err(AppError::InvalidReference(format!(
                "{:?} {} does not exist",
                related_type, related_id
            )));
        }

        let followup = FollowUp {
            related_type,
            related_id,
            follow_up_date,
            notes: trimmed(payload.notes),
            status: payload.status,
        };

        let record = self.followups.insert(&followup).await?;
        tracing::info!(followup_id = %record.id, ?related_type, "follow-up agendado");
        Ok(record)
    }

    /// Ordenados pela data do follow-up, mais próximos primeiro.
    pub async fn list(&self) -> Result<Vec<Record<FollowUp>>, AppError> {
        let mut records = self.followups.list().await?;
        records.sort_by_key(|r| r.data.follow_up_date);
        Ok(records)
    }

    pub async fn view(&self, query: &ListQuery) -> Result<ListPage, AppError> {
        list_view(&self.list().await?, query)
    }
}
