use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "competence")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nom: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::employee_competence::Entity")]
    EmployeeCompetence,
}

impl Related<super::employee_competence::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeCompetence.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
