use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::errors::ApiError;
use crate::models::dto::{CreateCongeRequest, UpdateCongeRequest};
use crate::models::{conge, employee};
use crate::services::journal_service::JournalService;
use crate::services::permission_service::{Acteur, PermissionService};

pub struct CongeService;

impl CongeService {
    /// Nombre de jours demandés, bornes incluses
    pub fn jours_demandes(date_debut: NaiveDate, date_fin: NaiveDate) -> Result<i64, ApiError> {
        if date_fin < date_debut {
            return Err(ApiError::Validation(
                "La date de fin doit être postérieure à la date de début.".to_string(),
            ));
        }
        Ok((date_fin - date_debut).num_days() + 1)
    }

    /// Solde restant après déduction: allocation annuelle moins jours
    /// déjà pris sur congés acceptés, moins jours demandés. Un congé en
    /// cours de réexamen est exclu du décompte via `conge_exclu`.
    pub async fn jours_restants<C: ConnectionTrait>(
        db: &C,
        salarie: &employee::Model,
        jours_demandes: i64,
        conge_exclu: Option<i32>,
    ) -> Result<i64, ApiError> {
        let acceptes = conge::Entity::find()
            .filter(conge::Column::EmployeeId.eq(salarie.id))
            .filter(conge::Column::Statut.eq(conge::STATUT_ACCEPTE))
            .all(db)
            .await?;

        let jours_pris: i64 = acceptes
            .iter()
            .filter(|c| Some(c.id) != conge_exclu)
            .map(|c| (c.date_fin - c.date_debut).num_days() + 1)
            .sum();

        Ok(i64::from(salarie.solde_conges) - jours_pris - jours_demandes)
    }

    /// Crée une demande (statut en_attente) après contrôle du solde
    pub async fn creer(
        db: &DatabaseConnection,
        acteur: &Acteur,
        request: CreateCongeRequest,
    ) -> Result<conge::Model, ApiError> {
        let salarie = employee::Entity::find_by_id(request.employee_id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::introuvable("Employé", request.employee_id))?;

        let jours = Self::jours_demandes(request.date_debut, request.date_fin)?;
        let restants = Self::jours_restants(db, &salarie, jours, None).await?;
        if restants < 0 {
            return Err(ApiError::Regle(format!(
                "Pas assez de jours de congé pour {}.",
                salarie.nom
            )));
        }

        let demande = conge::ActiveModel {
            employee_id: Set(salarie.id),
            date_debut: Set(request.date_debut),
            date_fin: Set(request.date_fin),
            statut: Set(conge::STATUT_EN_ATTENTE.to_string()),
            raison_refus: Set(None),
            responsable_id: Set(None),
            date_creation: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        JournalService::consigner_apres_coup(
            db,
            acteur,
            "create",
            "conge",
            format!("Création d'un congé pour {} {}.", salarie.nom, salarie.prenom),
            Some(salarie.user_id),
            Some("demande_conge"),
            format!(
                "Un nouveau congé pour {} {} a été créé.",
                salarie.nom, salarie.prenom
            ),
        )
        .await;

        Ok(demande)
    }

    /// Modifie les dates d'une demande, solde recontrôlé
    pub async fn modifier(
        db: &DatabaseConnection,
        acteur: &Acteur,
        conge_id: i32,
        request: UpdateCongeRequest,
    ) -> Result<conge::Model, ApiError> {
        let demande = Self::charger(db, acteur, conge_id).await?;
        let salarie = employee::Entity::find_by_id(demande.employee_id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::introuvable("Employé", demande.employee_id))?;

        let date_debut = request.date_debut.unwrap_or(demande.date_debut);
        let date_fin = request.date_fin.unwrap_or(demande.date_fin);

        let jours = Self::jours_demandes(date_debut, date_fin)?;
        let restants = Self::jours_restants(db, &salarie, jours, Some(demande.id)).await?;
        if restants < 0 {
            return Err(ApiError::Regle(format!(
                "Pas assez de jours de congé pour {}.",
                salarie.nom
            )));
        }

        let mut active: conge::ActiveModel = demande.into();
        active.date_debut = Set(date_debut);
        active.date_fin = Set(date_fin);
        let demande = active.update(db).await?;

        JournalService::consigner_apres_coup(
            db,
            acteur,
            "update",
            "conge",
            format!(
                "Le congé de {} {} a été modifié.",
                salarie.nom, salarie.prenom
            ),
            Some(salarie.user_id),
            None,
            format!("Le congé de {} a été modifié.", salarie.nom),
        )
        .await;

        Ok(demande)
    }

    /// Accepte une demande: statut du congé, statut du salarié,
    /// responsable et journal commitent dans la même transaction
    pub async fn accepter(
        db: &DatabaseConnection,
        acteur: &Acteur,
        conge_id: i32,
    ) -> Result<(), ApiError> {
        PermissionService::exiger_codename(acteur, "manage_conge")?;

        let txn = db.begin().await?;

        let demande = conge::Entity::find_by_id(conge_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ApiError::introuvable("Congé", conge_id))?;
        let salarie = employee::Entity::find_by_id(demande.employee_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ApiError::introuvable("Employé", demande.employee_id))?;

        let jours = Self::jours_demandes(demande.date_debut, demande.date_fin)?;
        let restants = Self::jours_restants(&txn, &salarie, jours, Some(demande.id)).await?;
        if restants < 0 {
            return Err(ApiError::Regle(format!(
                "Impossible d'accepter le congé. Il ne reste pas suffisamment de jours de congé pour {}.",
                salarie.nom
            )));
        }

        let responsable = Self::fiche_employe(&txn, acteur).await?;

        let mut demande_active: conge::ActiveModel = demande.into();
        demande_active.statut = Set(conge::STATUT_ACCEPTE.to_string());
        demande_active.responsable_id = Set(Some(responsable.id));
        demande_active.update(&txn).await?;

        let mut salarie_active: employee::ActiveModel = salarie.clone().into();
        salarie_active.statut = Set(employee::STATUT_CONGE.to_string());
        salarie_active.update(&txn).await?;

        JournalService::consigner_et_notifier(
            &txn,
            acteur,
            "update",
            "conge",
            format!(
                "Une demande de congé de {} {} a été approuvée par {}.",
                salarie.nom, salarie.prenom, acteur.username
            ),
            Some(salarie.user_id),
            Some("conge_approuve"),
            format!(
                "Le congé de {} {} a été accepté par {}.",
                salarie.nom, salarie.prenom, acteur.username
            ),
        )
        .await?;

        txn.commit().await?;
        Ok(())
    }

    /// Refuse une demande: raison obligatoire, statut du salarié inchangé
    pub async fn refuser(
        db: &DatabaseConnection,
        acteur: &Acteur,
        conge_id: i32,
        raison: &str,
    ) -> Result<(), ApiError> {
        PermissionService::exiger_codename(acteur, "manage_conge")?;

        if raison.trim().is_empty() {
            return Err(ApiError::Validation(
                "La raison du refus est obligatoire.".to_string(),
            ));
        }

        let txn = db.begin().await?;

        let demande = conge::Entity::find_by_id(conge_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ApiError::introuvable("Congé", conge_id))?;
        let salarie = employee::Entity::find_by_id(demande.employee_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ApiError::introuvable("Employé", demande.employee_id))?;

        let responsable = Self::fiche_employe(&txn, acteur).await?;

        let mut demande_active: conge::ActiveModel = demande.into();
        demande_active.statut = Set(conge::STATUT_REFUSE.to_string());
        demande_active.raison_refus = Set(Some(raison.to_string()));
        demande_active.responsable_id = Set(Some(responsable.id));
        demande_active.update(&txn).await?;

        JournalService::consigner_et_notifier(
            &txn,
            acteur,
            "update",
            "conge",
            format!(
                "Une demande de congé de {} {} a été refusée car {}.",
                salarie.nom, salarie.prenom, raison
            ),
            Some(salarie.user_id),
            None,
            format!("Le congé de {} a été refusé car {}.", salarie.nom, raison),
        )
        .await?;

        txn.commit().await?;
        Ok(())
    }

    /// Liste restreinte: acces_all_conge voit tout, sinon seulement les
    /// congés du salarié de l'acteur
    pub async fn lister(
        db: &DatabaseConnection,
        acteur: &Acteur,
    ) -> Result<Vec<conge::Model>, ApiError> {
        let mut selection = conge::Entity::find().order_by_desc(conge::Column::DateCreation);

        if !acteur.has_perm("acces_all_conge") {
            let fiche = employee::Entity::find()
                .filter(employee::Column::UserId.eq(acteur.user_id))
                .one(db)
                .await?;
            let employee_id = match fiche {
                Some(f) => f.id,
                // Pas de fiche employé: aucun congé visible
                None => return Ok(Vec::new()),
            };
            selection = selection.filter(conge::Column::EmployeeId.eq(employee_id));
        }

        Ok(selection.all(db).await?)
    }

    /// Congés d'un employé donné, avec contrôle objet
    pub async fn lister_pour_employe(
        db: &DatabaseConnection,
        acteur: &Acteur,
        employee_id: i32,
    ) -> Result<Vec<conge::Model>, ApiError> {
        let salarie = employee::Entity::find_by_id(employee_id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::introuvable("Employé", employee_id))?;

        if !PermissionService::peut_acceder_objet(acteur, "acces_all_conge", salarie.user_id) {
            return Err(ApiError::Interdit(
                "Vous n'avez pas accès aux congés de cet employé.".to_string(),
            ));
        }

        Ok(conge::Entity::find()
            .filter(conge::Column::EmployeeId.eq(employee_id))
            .order_by_desc(conge::Column::DateCreation)
            .all(db)
            .await?)
    }

    /// Charge une demande avec contrôle objet (acces_all ou propriétaire)
    pub async fn charger(
        db: &DatabaseConnection,
        acteur: &Acteur,
        conge_id: i32,
    ) -> Result<conge::Model, ApiError> {
        let demande = conge::Entity::find_by_id(conge_id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::introuvable("Congé", conge_id))?;

        let salarie = employee::Entity::find_by_id(demande.employee_id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::introuvable("Employé", demande.employee_id))?;

        if !PermissionService::peut_acceder_objet(acteur, "acces_all_conge", salarie.user_id) {
            return Err(ApiError::Interdit(
                "Vous n'avez pas accès à ce congé.".to_string(),
            ));
        }

        Ok(demande)
    }

    /// Fiche employé de l'acteur (le responsable enregistré sur la
    /// décision)
    async fn fiche_employe<C: ConnectionTrait>(
        db: &C,
        acteur: &Acteur,
    ) -> Result<employee::Model, ApiError> {
        employee::Entity::find()
            .filter(employee::Column::UserId.eq(acteur.user_id))
            .one(db)
            .await?
            .ok_or_else(|| {
                ApiError::Regle("L'approbateur n'a pas de fiche employé.".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jour(a: i32, m: u32, j: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(a, m, j).unwrap()
    }

    #[test]
    fn test_jours_demandes_bornes_incluses() {
        assert_eq!(
            CongeService::jours_demandes(jour(2026, 8, 10), jour(2026, 8, 10)).unwrap(),
            1
        );
        assert_eq!(
            CongeService::jours_demandes(jour(2026, 8, 10), jour(2026, 8, 14)).unwrap(),
            5
        );
    }

    #[test]
    fn test_jours_demandes_plage_inversee() {
        assert!(CongeService::jours_demandes(jour(2026, 8, 14), jour(2026, 8, 10)).is_err());
    }

    #[test]
    fn test_jours_demandes_sur_deux_mois() {
        assert_eq!(
            CongeService::jours_demandes(jour(2026, 1, 30), jour(2026, 2, 2)).unwrap(),
            4
        );
    }
}
