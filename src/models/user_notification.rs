use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

// État de lecture d'une notification pour un destinataire donné
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_notification")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub notification_id: i32,
    pub user_affected_id: i32,
    pub is_read: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::notification::Entity",
        from = "Column::NotificationId",
        to = "super::notification::Column::Id"
    )]
    Notification,

    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserAffectedId",
        to = "super::users::Column::Id"
    )]
    UserAffected,
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notification.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserAffected.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
