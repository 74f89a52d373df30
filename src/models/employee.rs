use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

// Statuts d'un salarié:
// - "T" : au travail
// - "C" : en congé (positionné à l'acceptation d'une demande)
pub const STATUT_TRAVAIL: &str = "T";
pub const STATUT_CONGE: &str = "C";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub nom: String,
    pub prenom: String,
    pub sexe: Option<String>,
    pub statut_matrimonial: Option<String>,
    pub email: Option<String>,
    pub pays: Option<String>,
    pub code_postal: Option<String>,
    pub date_naissance: Option<Date>,
    pub date_embauche: Option<Date>,
    pub type_salarie: Option<String>,
    pub type_contrat: Option<String>,
    pub statut: String,
    // Jours de congé annuels alloués; le solde restant se calcule en
    // déduisant les congés acceptés
    pub solde_conges: i32,
    pub departement_id: Option<i32>,
    pub poste_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::departement::Entity",
        from = "Column::DepartementId",
        to = "super::departement::Column::Id"
    )]
    Departement,

    #[sea_orm(
        belongs_to = "super::poste::Entity",
        from = "Column::PosteId",
        to = "super::poste::Column::Id"
    )]
    Poste,

    #[sea_orm(has_many = "super::conge::Entity")]
    Conge,

    #[sea_orm(has_many = "super::schedule::Entity")]
    Schedule,

    #[sea_orm(has_many = "super::paie::Entity")]
    Paie,

    #[sea_orm(has_many = "super::employee_competence::Entity")]
    EmployeeCompetence,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::departement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Departement.def()
    }
}

impl Related<super::poste::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Poste.def()
    }
}

impl Related<super::conge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Conge.def()
    }
}

impl Related<super::schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedule.def()
    }
}

impl Related<super::paie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Paie.def()
    }
}

impl Related<super::employee_competence::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeCompetence.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
