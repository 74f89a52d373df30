use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::ApiError;
use crate::models::dto::PaieRequest;
use crate::models::{employee, paie};
use crate::services::journal_service::JournalService;
use crate::services::permission_service::{Acteur, PermissionService};
use crate::utils::pagination::PageParams;

pub struct PaieService;

impl PaieService {
    /// Liste paginée, du plus récent au plus ancien. Sans acces_all_paie,
    /// seules les fiches du salarié de l'acteur sont visibles.
    pub async fn lister(
        db: &DatabaseConnection,
        acteur: &Acteur,
        page: PageParams,
    ) -> Result<(Vec<paie::Model>, u64, u64), ApiError> {
        let mut selection = paie::Entity::find().order_by_desc(paie::Column::DateCreation);

        if !acteur.has_perm("acces_all_paie") {
            let fiche = employee::Entity::find()
                .filter(employee::Column::UserId.eq(acteur.user_id))
                .one(db)
                .await?;
            let employee_id = match fiche {
                Some(f) => f.id,
                None => return Ok((Vec::new(), 0, 0)),
            };
            selection = selection.filter(paie::Column::EmployeeId.eq(employee_id));
        }

        let paginateur = selection.paginate(db, page.page_size);
        let comptage = paginateur.num_items_and_pages().await?;
        let fiches = paginateur.fetch_page(page.index()).await?;

        Ok((fiches, comptage.number_of_items, comptage.number_of_pages))
    }

    /// Charge une fiche avec contrôle objet (acces_all_paie ou
    /// propriétaire), et le salarié associé
    pub async fn charger(
        db: &DatabaseConnection,
        acteur: &Acteur,
        paie_id: i32,
    ) -> Result<(paie::Model, employee::Model), ApiError> {
        let fiche = paie::Entity::find_by_id(paie_id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::introuvable("Fiche de paie", paie_id))?;

        let salarie = employee::Entity::find_by_id(fiche.employee_id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::introuvable("Employé", fiche.employee_id))?;

        if !PermissionService::peut_acceder_objet(acteur, "acces_all_paie", salarie.user_id) {
            return Err(ApiError::Interdit(
                "Vous n'avez pas accès à cette fiche de paie.".to_string(),
            ));
        }

        Ok((fiche, salarie))
    }

    pub async fn creer(
        db: &DatabaseConnection,
        acteur: &Acteur,
        request: PaieRequest,
    ) -> Result<paie::Model, ApiError> {
        let salarie = employee::Entity::find_by_id(request.employee_id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::introuvable("Employé", request.employee_id))?;

        let fiche = paie::ActiveModel {
            employee_id: Set(salarie.id),
            mois: Set(request.mois),
            annee: Set(request.annee),
            salaire_base: Set(request.salaire_base),
            primes: Set(request.primes),
            retenues: Set(request.retenues),
            salaire_net: Set(request.salaire_net),
            date_creation: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        JournalService::consigner_apres_coup(
            db,
            acteur,
            "create",
            "paie",
            format!(
                "Une fiche de paie a été créée par: {} pour {} {}",
                acteur.username, salarie.nom, salarie.prenom
            ),
            Some(salarie.user_id),
            None,
            format!(
                "Une fiche de paie a été créée pour {} {}.",
                salarie.nom, salarie.prenom
            ),
        )
        .await;

        Ok(fiche)
    }

    pub async fn modifier(
        db: &DatabaseConnection,
        acteur: &Acteur,
        paie_id: i32,
        request: PaieRequest,
    ) -> Result<paie::Model, ApiError> {
        let existante = paie::Entity::find_by_id(paie_id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::introuvable("Fiche de paie", paie_id))?;

        let salarie = employee::Entity::find_by_id(request.employee_id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::introuvable("Employé", request.employee_id))?;

        let mut active: paie::ActiveModel = existante.into();
        active.employee_id = Set(salarie.id);
        active.mois = Set(request.mois);
        active.annee = Set(request.annee);
        active.salaire_base = Set(request.salaire_base);
        active.primes = Set(request.primes);
        active.retenues = Set(request.retenues);
        active.salaire_net = Set(request.salaire_net);

        let fiche = active.update(db).await?;

        JournalService::consigner_apres_coup(
            db,
            acteur,
            "update",
            "paie",
            format!(
                "La fiche de paie a été mise à jour par: {} pour {} {}",
                acteur.username, salarie.nom, salarie.prenom
            ),
            Some(salarie.user_id),
            None,
            format!(
                "La fiche de paie de {} {} a été modifiée.",
                salarie.nom, salarie.prenom
            ),
        )
        .await;

        Ok(fiche)
    }
}
