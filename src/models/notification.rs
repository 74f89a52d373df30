use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notification")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    // Utilisateur à l'origine de l'action
    pub user_action_id: i32,
    #[serde(rename = "type")]
    #[sea_orm(column_name = "type")]
    pub notification_type: Option<String>,
    pub message: String,
    pub date_created: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserActionId",
        to = "super::users::Column::Id"
    )]
    UserAction,

    #[sea_orm(has_many = "super::user_notification::Entity")]
    UserNotification,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserAction.def()
    }
}

impl Related<super::user_notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserNotification.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
