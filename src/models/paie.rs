use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

// Une fiche de paie reste modifiable après export (convention, pas
// d'invariant en base); l'export est visible dans l'historique.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "paie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub employee_id: i32,
    pub mois: String,
    pub annee: i32,
    pub salaire_base: Decimal,
    pub primes: Decimal,
    pub retenues: Decimal,
    pub salaire_net: Decimal,
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
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
