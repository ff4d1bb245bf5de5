//! Reservation entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Loose reference: historical bookings outlive fleet edits, so no FK
    pub vehicle_id: String,
    pub customer_id: String,

    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,

    pub pickup_location: String,
    pub return_location: String,

    pub with_driver: bool,

    /// JSON array of option catalog ids as selected at booking time
    pub selected_option_ids: String,

    /// Priced once at creation; status updates never touch this column
    pub total_price: Decimal,

    /// Reservation status: pending, confirmed, completed, cancelled
    pub status: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
