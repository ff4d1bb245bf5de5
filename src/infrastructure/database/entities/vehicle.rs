//! Vehicle entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub brand: String,
    pub model: String,
    pub year: i32,

    /// Base day rate
    pub price_per_day: Decimal,

    pub description: Option<String>,
    pub image_url: Option<String>,

    /// Derived: true iff the vehicle has at least one availability period
    pub is_available: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::availability_period::Entity")]
    AvailabilityPeriods,
}

impl Related<super::availability_period::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AvailabilityPeriods.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
