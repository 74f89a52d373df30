use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

// Entrée du catalogue de services/articles. Les factures copient
// ces valeurs dans leurs lignes, elles ne référencent jamais l'id.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nom_service: String,
    pub prix_unitaire: Decimal,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
