use std::collections::HashMap;

use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait, QueryOrder, Set,
};
use validator::Validate;

use crate::errors::ApiError;
use crate::middleware::AuthUser;
use crate::models::dto::{ScheduleGroup, ScheduleRequest, ScheduleSlot};
use crate::models::{departement, employee, poste, schedule};
use crate::services::journal_service::JournalService;
use crate::services::permission_service::PermissionService;
use crate::utils::pagination::PageParams;
use crate::utils::requete;

/// GET /schedules - Emplois du temps paginés, regroupés par employé
#[get("")]
pub async fn list_schedules(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "list", "schedule")?;

    let query = req.query_string();
    let page = PageParams::new(
        requete::valeur_parsee(query, "page"),
        requete::valeur_parsee(query, "page_size"),
    );

    let paginateur = schedule::Entity::find()
        .order_by_asc(schedule::Column::EmployeeId)
        .paginate(db.get_ref(), page.page_size);
    let comptage = paginateur.num_items_and_pages().await?;
    let lignes = paginateur.fetch_page(page.index()).await?;

    // Référentiels pour enrichir l'affichage
    let postes: HashMap<i32, String> = poste::Entity::find()
        .all(db.get_ref())
        .await?
        .into_iter()
        .map(|p| (p.id, p.nom))
        .collect();
    let departements: HashMap<i32, String> = departement::Entity::find()
        .all(db.get_ref())
        .await?
        .into_iter()
        .map(|d| (d.id, d.nom))
        .collect();

    // Regrouper les horaires de la page par employé
    let mut groupes: Vec<ScheduleGroup> = Vec::new();
    let mut index_par_employe: HashMap<i32, usize> = HashMap::new();

    for ligne in lignes {
        let position = match index_par_employe.get(&ligne.employee_id).copied() {
            Some(i) => i,
            None => {
                let salarie = employee::Entity::find_by_id(ligne.employee_id)
                    .one(db.get_ref())
                    .await?
                    .ok_or_else(|| ApiError::introuvable("Employé", ligne.employee_id))?;

                groupes.push(ScheduleGroup {
                    employee_nom: salarie.nom,
                    employee_prenom: salarie.prenom,
                    employee_poste: salarie.poste_id.and_then(|id| postes.get(&id).cloned()),
                    employee_departement: salarie
                        .departement_id
                        .and_then(|id| departements.get(&id).cloned()),
                    schedules: Vec::new(),
                });
                index_par_employe.insert(ligne.employee_id, groupes.len() - 1);
                groupes.len() - 1
            }
        };

        groupes[position].schedules.push(ScheduleSlot {
            start_time: ligne.start_time,
            end_time: ligne.end_time,
            jour_debut: ligne.jour_debut,
            jour_fin: ligne.jour_fin,
            location: ligne.location,
        });
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "schedules": groupes,
        "total_emploiedutemps": comptage.number_of_items,
        "num_pages": comptage.number_of_pages,
        "page": page.page,
    })))
}

/// POST /schedules - Créer un emploi du temps
#[post("")]
pub async fn create_schedule(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    request: web::Json<ScheduleRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "status": "error",
            "errors": errors
        })));
    }

    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "create", "schedule")?;

    let salarie = employee::Entity::find_by_id(request.employee_id)
        .one(db.get_ref())
        .await?
        .ok_or_else(|| ApiError::introuvable("Employé", request.employee_id))?;

    let request = request.into_inner();
    schedule::ActiveModel {
        employee_id: Set(salarie.id),
        start_time: Set(request.start_time),
        end_time: Set(request.end_time),
        jour_debut: Set(request.jour_debut),
        jour_fin: Set(request.jour_fin),
        location: Set(request.location),
        ..Default::default()
    }
    .insert(db.get_ref())
    .await?;

    JournalService::consigner_apres_coup(
        db.get_ref(),
        &acteur,
        "create",
        "emploi_du_temps",
        format!(
            "Ajout d'un emploi du temps pour {} {} par {}.",
            salarie.nom, salarie.prenom, acteur.username
        ),
        Some(salarie.user_id),
        Some("schedule_create"),
        format!(
            "Un nouvel emploi du temps a été ajouté pour {} {} par {}.",
            salarie.nom, salarie.prenom, acteur.username
        ),
    )
    .await;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "status": "success",
        "message": "Emploi du temps créé avec succès."
    })))
}

/// PUT /schedules/{id} - Modifier un emploi du temps
#[put("/{id}")]
pub async fn update_schedule(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    chemin: web::Path<i32>,
    request: web::Json<ScheduleRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "status": "error",
            "errors": errors
        })));
    }

    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "update", "schedule")?;

    let id = chemin.into_inner();
    let existant = schedule::Entity::find_by_id(id)
        .one(db.get_ref())
        .await?
        .ok_or_else(|| ApiError::introuvable("Emploi du temps", id))?;

    let salarie = employee::Entity::find_by_id(request.employee_id)
        .one(db.get_ref())
        .await?
        .ok_or_else(|| ApiError::introuvable("Employé", request.employee_id))?;

    let request = request.into_inner();
    let mut active: schedule::ActiveModel = existant.into();
    active.employee_id = Set(salarie.id);
    active.start_time = Set(request.start_time);
    active.end_time = Set(request.end_time);
    active.jour_debut = Set(request.jour_debut);
    active.jour_fin = Set(request.jour_fin);
    active.location = Set(request.location);
    active.update(db.get_ref()).await?;

    JournalService::consigner_apres_coup(
        db.get_ref(),
        &acteur,
        "update",
        "emploi_du_temps",
        format!(
            "Mise à jour de l'emploi du temps pour {} {}.",
            salarie.nom, salarie.prenom
        ),
        Some(salarie.user_id),
        None,
        format!(
            "L'emploi du temps de {} {} a été modifié.",
            salarie.nom, salarie.prenom
        ),
    )
    .await;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "message": "Emploi du temps modifié avec succès."
    })))
}

/// DELETE /schedules/{id} - Supprimer un emploi du temps
#[delete("/{id}")]
pub async fn delete_schedule(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    chemin: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "delete", "schedule")?;

    let id = chemin.into_inner();
    let existant = schedule::Entity::find_by_id(id)
        .one(db.get_ref())
        .await?
        .ok_or_else(|| ApiError::introuvable("Emploi du temps", id))?;

    let salarie = employee::Entity::find_by_id(existant.employee_id)
        .one(db.get_ref())
        .await?;

    existant.delete(db.get_ref()).await?;

    let (consequence, affecte) = match &salarie {
        Some(s) => (
            format!(
                "Suppression de l'emploi du temps de {} {}.",
                s.nom, s.prenom
            ),
            Some(s.user_id),
        ),
        None => ("Suppression d'un emploi du temps.".to_string(), None),
    };

    JournalService::consigner_apres_coup(
        db.get_ref(),
        &acteur,
        "delete",
        "emploi_du_temps",
        consequence.clone(),
        affecte,
        None,
        consequence,
    )
    .await;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "message": "Emploi du temps supprimé avec succès."
    })))
}

pub fn schedule_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/schedules")
            .service(list_schedules)
            .service(create_schedule)
            .service(update_schedule)
            .service(delete_schedule),
    );
}
