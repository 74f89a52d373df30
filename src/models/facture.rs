use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

// Types de document
pub const TYPE_FACTURE: &str = "Facture";
pub const TYPE_DEVIS: &str = "Devis";

// États
pub const ETAT_BROUILLON: &str = "Brouillon";
pub const ETAT_FINALISEE: &str = "Finalisee";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "facture")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client: String,
    #[serde(rename = "type")]
    #[sea_orm(column_name = "type")]
    pub type_facture: String,
    pub etat_facture: String,
    // F<annee>-<seq> ou (FPROV<annee>-<seq>); jamais régénérée une fois
    // posée. La contrainte d'unicité ferme la course de génération.
    #[sea_orm(unique)]
    pub reference: String,
    pub date_facture: Date,
    // Lignes copiées par valeur: [{description, quantite, prix}, ...]
    pub services: Json,
    pub created_by_id: Option<i32>,
    pub date_creation: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedById",
        to = "super::users::Column::Id"
    )]
    CreatedBy,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedBy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
