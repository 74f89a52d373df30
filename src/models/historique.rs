use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

// Journal d'audit en insertion seule: aucune ligne n'est jamais
// modifiée ni supprimée.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "historique")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub utilisateur_id: i32,
    // create / update / delete / export
    pub action: String,
    pub consequence: String,
    pub utilisateur_affecte_id: Option<i32>,
    // employe / conge / emploi_du_temps / evenement / paie / facture
    pub categorie: String,
    pub date_action: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UtilisateurId",
        to = "super::users::Column::Id"
    )]
    Utilisateur,

    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UtilisateurAffecteId",
        to = "super::users::Column::Id"
    )]
    UtilisateurAffecte,
}

impl ActiveModelBehavior for ActiveModel {}
