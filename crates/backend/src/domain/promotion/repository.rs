//! Durable storage for promotions.
//!
//! The repository is the sole writer of the `promotions` table. Every write
//! runs inside a single transaction: commit on success, rollback on any
//! failure, so a failed operation never leaves a partial row behind. Audit
//! timestamps are maintained here and never exposed to callers.

use chrono::{NaiveDate, Utc};
use contracts::promotion::Promotion;
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveValue, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "promotions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub promotion_type: String,
    pub value: i32,
    pub product_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub last_updated: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Promotion {
    fn from(m: Model) -> Self {
        Promotion {
            id: Some(m.id),
            name: m.name,
            promotion_type: m.promotion_type,
            value: m.value,
            product_id: m.product_id,
            start_date: m.start_date,
            end_date: m.end_date,
        }
    }
}

/// Persistence operations for promotions.
///
/// The connection is injected at construction; its lifecycle is owned by the
/// process entry point, not by this module.
#[derive(Clone)]
pub struct PromotionRepository {
    db: DatabaseConnection,
}

impl PromotionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a new promotion, assigning its id and audit timestamps.
    pub async fn create(&self, entity: &Promotion) -> Result<Promotion, ServiceError> {
        tracing::info!("Creating promotion '{}'", entity.name);
        let now = Utc::now();
        let txn = self.db.begin().await?;
        let model = ActiveModel {
            id: ActiveValue::NotSet,
            name: Set(entity.name.clone()),
            promotion_type: Set(entity.promotion_type.clone()),
            value: Set(entity.value),
            product_id: Set(entity.product_id),
            start_date: Set(entity.start_date),
            end_date: Set(entity.end_date),
            created_at: Set(Some(now)),
            last_updated: Set(Some(now)),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;
        Ok(model.into())
    }

    /// Full-record replace of all public fields. The id itself is immutable.
    pub async fn update(&self, id: i32, entity: &Promotion) -> Result<Promotion, ServiceError> {
        tracing::info!("Updating promotion {id}");
        let txn = self.db.begin().await?;
        let existing = Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        let mut active: ActiveModel = existing.into();
        active.name = Set(entity.name.clone());
        active.promotion_type = Set(entity.promotion_type.clone());
        active.value = Set(entity.value);
        active.product_id = Set(entity.product_id);
        active.start_date = Set(entity.start_date);
        active.end_date = Set(entity.end_date);
        active.last_updated = Set(Some(Utc::now()));
        let model = active.update(&txn).await?;
        txn.commit().await?;
        Ok(model.into())
    }

    /// Restricted update used by deactivation: only `end_date` moves.
    pub async fn set_end_date(
        &self,
        id: i32,
        end_date: NaiveDate,
    ) -> Result<Promotion, ServiceError> {
        tracing::info!("Setting end_date of promotion {id} to {end_date}");
        let txn = self.db.begin().await?;
        let existing = Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        let mut active: ActiveModel = existing.into();
        active.end_date = Set(end_date);
        active.last_updated = Set(Some(Utc::now()));
        let model = active.update(&txn).await?;
        txn.commit().await?;
        Ok(model.into())
    }

    /// Physical delete. A missing id is an error, not a no-op.
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        tracing::info!("Deleting promotion {id}");
        let txn = self.db.begin().await?;
        let result = Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(id));
        }
        txn.commit().await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Promotion>, ServiceError> {
        let model = Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    pub async fn find_all(&self) -> Result<Vec<Promotion>, ServiceError> {
        let models = Entity::find().all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Promotion>, ServiceError> {
        let models = Entity::find()
            .filter(Column::Name.eq(name))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_product_id(&self, product_id: i32) -> Result<Vec<Promotion>, ServiceError> {
        let models = Entity::find()
            .filter(Column::ProductId.eq(product_id))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_promotion_type(
        &self,
        promotion_type: &str,
    ) -> Result<Vec<Promotion>, ServiceError> {
        let models = Entity::find()
            .filter(Column::PromotionType.eq(promotion_type))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    /// Promotions whose inclusive window contains `on`.
    pub async fn find_active(&self, on: NaiveDate) -> Result<Vec<Promotion>, ServiceError> {
        let models = Entity::find()
            .filter(Column::StartDate.lte(on))
            .filter(Column::EndDate.gte(on))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    /// Promotions not yet started or already ended as of `on`.
    pub async fn find_inactive(&self, on: NaiveDate) -> Result<Vec<Promotion>, ServiceError> {
        let models = Entity::find()
            .filter(
                Condition::any()
                    .add(Column::StartDate.gt(on))
                    .add(Column::EndDate.lt(on)),
            )
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}
