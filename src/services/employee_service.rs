use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QuerySelect, RelationTrait, Set,
};

use crate::errors::ApiError;
use crate::models::dto::{EmployeeListItem, EmployeeListResponse, EmployeeRequest};
use crate::models::{departement, employee, employee_competence, poste};
use crate::services::journal_service::JournalService;
use crate::services::permission_service::Acteur;
use crate::utils::pagination::PageParams;
use crate::utils::requete;

/// Filtres du listing employés. Conjonctifs entre champs; disjonctifs
/// à l'intérieur d'un champ répétable (poste, departement, competence).
#[derive(Debug, Default)]
pub struct EmployeeFiltres {
    pub id: Option<i32>,
    pub nom: Option<String>,
    pub postes: Vec<i32>,
    pub type_salarie: Option<String>,
    pub statut: Option<String>,
    pub date_embauche: Option<NaiveDate>,
    pub departements: Vec<i32>,
    pub competences: Vec<i32>,
}

impl EmployeeFiltres {
    pub fn depuis_query(query: &str) -> Self {
        EmployeeFiltres {
            id: requete::valeur_parsee(query, "id"),
            nom: requete::valeur(query, "nom"),
            postes: requete::valeurs_multiples(query, "poste"),
            type_salarie: requete::valeur(query, "type_salarie"),
            statut: requete::valeur(query, "statut"),
            date_embauche: requete::valeur_parsee(query, "date_embauche"),
            departements: requete::valeurs_multiples(query, "departement"),
            competences: requete::valeurs_multiples(query, "competence"),
        }
    }
}

pub struct EmployeeService;

impl EmployeeService {
    /// Listing filtré et paginé, avec noms de poste/département résolus
    pub async fn lister(
        db: &DatabaseConnection,
        filtres: &EmployeeFiltres,
        page: PageParams,
    ) -> Result<EmployeeListResponse, ApiError> {
        let mut selection = employee::Entity::find();

        if let Some(id) = filtres.id {
            selection = selection.filter(employee::Column::Id.eq(id));
        }
        if let Some(nom) = &filtres.nom {
            // Sous-chaîne insensible à la casse
            selection = selection.filter(
                Expr::expr(Func::lower(Expr::col(employee::Column::Nom)))
                    .like(format!("%{}%", nom.to_lowercase())),
            );
        }
        if !filtres.postes.is_empty() {
            selection = selection.filter(employee::Column::PosteId.is_in(filtres.postes.clone()));
        }
        if let Some(type_salarie) = &filtres.type_salarie {
            selection = selection.filter(employee::Column::TypeSalarie.eq(type_salarie));
        }
        if let Some(statut) = &filtres.statut {
            selection = selection.filter(employee::Column::Statut.eq(statut));
        }
        if let Some(date_embauche) = filtres.date_embauche {
            selection = selection.filter(employee::Column::DateEmbauche.eq(date_embauche));
        }
        if !filtres.departements.is_empty() {
            selection = selection
                .filter(employee::Column::DepartementId.is_in(filtres.departements.clone()));
        }
        if !filtres.competences.is_empty() {
            // La jointure plusieurs-à-plusieurs peut dupliquer les lignes
            selection = selection
                .join(
                    JoinType::InnerJoin,
                    employee::Relation::EmployeeCompetence.def(),
                )
                .filter(
                    employee_competence::Column::CompetenceId.is_in(filtres.competences.clone()),
                )
                .distinct();
        }

        let paginateur = selection.paginate(db, page.page_size);
        let comptage = paginateur.num_items_and_pages().await?;
        let lignes = paginateur.fetch_page(page.index()).await?;

        // Référentiels id -> nom pour l'affichage
        let postes: HashMap<i32, String> = poste::Entity::find()
            .all(db)
            .await?
            .into_iter()
            .map(|p| (p.id, p.nom))
            .collect();
        let departements: HashMap<i32, String> = departement::Entity::find()
            .all(db)
            .await?
            .into_iter()
            .map(|d| (d.id, d.nom))
            .collect();

        let employees = lignes
            .into_iter()
            .map(|e| EmployeeListItem {
                id: e.id,
                nom: e.nom,
                prenom: e.prenom,
                poste: e.poste_id.and_then(|id| postes.get(&id).cloned()),
                type_salarie: e.type_salarie,
                statut: e.statut,
                date_embauche: e.date_embauche,
                departement: e.departement_id.and_then(|id| departements.get(&id).cloned()),
                email: e.email,
            })
            .collect();

        Ok(EmployeeListResponse {
            employees,
            total_employees: comptage.number_of_items,
            num_pages: comptage.number_of_pages,
            page: page.page,
        })
    }

    pub async fn creer(
        db: &DatabaseConnection,
        acteur: &Acteur,
        request: EmployeeRequest,
    ) -> Result<employee::Model, ApiError> {
        let nouveau = employee::ActiveModel {
            user_id: Set(request.user_id),
            nom: Set(request.nom.clone()),
            prenom: Set(request.prenom.clone()),
            sexe: Set(request.sexe),
            statut_matrimonial: Set(request.statut_matrimonial),
            email: Set(request.email),
            pays: Set(request.pays),
            code_postal: Set(request.code_postal),
            date_naissance: Set(request.date_naissance),
            date_embauche: Set(request.date_embauche),
            type_salarie: Set(request.type_salarie),
            type_contrat: Set(request.type_contrat),
            statut: Set(employee::STATUT_TRAVAIL.to_string()),
            solde_conges: Set(request.solde_conges.unwrap_or(25)),
            departement_id: Set(request.departement_id),
            poste_id: Set(request.poste_id),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Self::remplacer_competences(db, nouveau.id, &request.competences).await?;

        JournalService::consigner_apres_coup(
            db,
            acteur,
            "create",
            "employe",
            format!(
                "Ajout d'un nouvel employé : {} {}",
                nouveau.nom, nouveau.prenom
            ),
            Some(nouveau.user_id),
            None,
            format!("Un nouvel employé {} a été ajouté.", nouveau.nom),
        )
        .await;

        Ok(nouveau)
    }

    pub async fn modifier(
        db: &DatabaseConnection,
        acteur: &Acteur,
        id: i32,
        request: EmployeeRequest,
    ) -> Result<employee::Model, ApiError> {
        let existant = employee::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::introuvable("Employé", id))?;

        let mut active: employee::ActiveModel = existant.into();
        active.nom = Set(request.nom.clone());
        active.prenom = Set(request.prenom.clone());
        active.sexe = Set(request.sexe);
        active.statut_matrimonial = Set(request.statut_matrimonial);
        active.email = Set(request.email);
        active.pays = Set(request.pays);
        active.code_postal = Set(request.code_postal);
        active.date_naissance = Set(request.date_naissance);
        active.date_embauche = Set(request.date_embauche);
        active.type_salarie = Set(request.type_salarie);
        active.type_contrat = Set(request.type_contrat);
        if let Some(solde) = request.solde_conges {
            active.solde_conges = Set(solde);
        }
        active.departement_id = Set(request.departement_id);
        active.poste_id = Set(request.poste_id);

        let modifie = active.update(db).await?;

        Self::remplacer_competences(db, modifie.id, &request.competences).await?;

        JournalService::consigner_apres_coup(
            db,
            acteur,
            "update",
            "employe",
            format!(
                "Mise à jour des informations de l'employé : {} {}",
                modifie.nom, modifie.prenom
            ),
            Some(modifie.user_id),
            None,
            format!("L'employé {} a été modifié.", modifie.nom),
        )
        .await;

        Ok(modifie)
    }

    /// Remplace l'ensemble des compétences liées
    async fn remplacer_competences(
        db: &DatabaseConnection,
        employee_id: i32,
        competences: &[i32],
    ) -> Result<(), ApiError> {
        employee_competence::Entity::delete_many()
            .filter(employee_competence::Column::EmployeeId.eq(employee_id))
            .exec(db)
            .await?;

        for competence_id in competences {
            employee_competence::ActiveModel {
                employee_id: Set(employee_id),
                competence_id: Set(*competence_id),
            }
            .insert(db)
            .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filtres_repetables() {
        let f = EmployeeFiltres::depuis_query("departement=1&departement=2&competence=5");
        assert_eq!(f.departements, vec![1, 2]);
        assert_eq!(f.competences, vec![5]);
        assert!(f.postes.is_empty());
        assert!(f.nom.is_none());
    }

    #[test]
    fn test_filtres_simples() {
        let f = EmployeeFiltres::depuis_query(
            "id=12&nom=Dupont&type_salarie=cadre&statut=T&date_embauche=2024-01-15",
        );
        assert_eq!(f.id, Some(12));
        assert_eq!(f.nom.as_deref(), Some("Dupont"));
        assert_eq!(f.type_salarie.as_deref(), Some("cadre"));
        assert_eq!(f.statut.as_deref(), Some("T"));
        assert_eq!(
            f.date_embauche,
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }
}
