use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

// Statuts d'une demande de congé
pub const STATUT_EN_ATTENTE: &str = "en_attente";
pub const STATUT_ACCEPTE: &str = "accepte";
pub const STATUT_REFUSE: &str = "refuse";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "conge")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub employee_id: i32,
    pub date_debut: Date,
    pub date_fin: Date,
    pub statut: String,
    // Obligatoire quand statut == refuse
    pub raison_refus: Option<String>,
    // Employé (responsable) ayant accepté ou refusé la demande
    pub responsable_id: Option<i32>,
    pub date_creation: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,

    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::ResponsableId",
        to = "super::employee::Column::Id"
    )]
    Responsable,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
