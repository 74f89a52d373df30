use actix_web::{delete, get, post, put, web, HttpResponse};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set};
use validator::Validate;

use crate::errors::ApiError;
use crate::middleware::AuthUser;
use crate::models::agenda_event;
use crate::models::dto::AgendaEventRequest;
use crate::services::journal_service::JournalService;
use crate::services::permission_service::PermissionService;

/// GET /agenda - Tous les événements, par date croissante
#[get("")]
pub async fn list_events(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "list", "agendaevent")?;

    let evenements = agenda_event::Entity::find()
        .order_by_asc(agenda_event::Column::StartDate)
        .all(db.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "events": evenements })))
}

/// POST /agenda - Créer un événement; tous les utilisateurs sont notifiés
#[post("")]
pub async fn create_event(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    request: web::Json<AgendaEventRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "status": "error",
            "errors": errors
        })));
    }

    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "create", "agendaevent")?;

    let request = request.into_inner();
    let evenement = agenda_event::ActiveModel {
        title: Set(request.title),
        description: Set(request.description),
        start_date: Set(request.start_date),
        start_time: Set(request.start_time),
        ..Default::default()
    }
    .insert(db.get_ref())
    .await?;

    if let Err(e) = JournalService::notifier_tous(
        db.get_ref(),
        &acteur,
        format!(
            "Un nouvel événement a été ajouté : {} par {}.",
            evenement.title, acteur.username
        ),
    )
    .await
    {
        tracing::warn!("échec de la notification globale: {}", e);
    }

    if let Err(e) = JournalService::consigner(
        db.get_ref(),
        &acteur,
        "create",
        "evenement",
        format!("Ajout d'un nouvel événement : {}", evenement.title),
        Some(acteur.user_id),
    )
    .await
    {
        tracing::warn!("échec d'écriture du journal: {}", e);
    }

    Ok(HttpResponse::Created().json(serde_json::json!({
        "status": "success",
        "message": "Événement créé avec succès."
    })))
}

/// PUT /agenda/{id} - Modifier un événement
#[put("/{id}")]
pub async fn update_event(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    chemin: web::Path<i32>,
    request: web::Json<AgendaEventRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "status": "error",
            "errors": errors
        })));
    }

    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "update", "agendaevent")?;

    let id = chemin.into_inner();
    let existant = agenda_event::Entity::find_by_id(id)
        .one(db.get_ref())
        .await?
        .ok_or_else(|| ApiError::introuvable("Événement", id))?;

    let request = request.into_inner();
    let mut active: agenda_event::ActiveModel = existant.into();
    active.title = Set(request.title);
    active.description = Set(request.description);
    active.start_date = Set(request.start_date);
    active.start_time = Set(request.start_time);
    let evenement = active.update(db.get_ref()).await?;

    if let Err(e) = JournalService::consigner(
        db.get_ref(),
        &acteur,
        "update",
        "evenement",
        format!("Mise à jour de l'événement : {}", evenement.title),
        Some(acteur.user_id),
    )
    .await
    {
        tracing::warn!("échec d'écriture du journal: {}", e);
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "message": "Événement modifié avec succès."
    })))
}

/// DELETE /agenda/{id} - Supprimer un événement
#[delete("/{id}")]
pub async fn delete_event(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    chemin: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "delete", "agendaevent")?;

    let id = chemin.into_inner();
    let existant = agenda_event::Entity::find_by_id(id)
        .one(db.get_ref())
        .await?
        .ok_or_else(|| ApiError::introuvable("Événement", id))?;

    let titre = existant.title.clone();
    existant.delete(db.get_ref()).await?;

    if let Err(e) = JournalService::consigner(
        db.get_ref(),
        &acteur,
        "delete",
        "evenement",
        format!("Suppression de l'événement : {}", titre),
        Some(acteur.user_id),
    )
    .await
    {
        tracing::warn!("échec d'écriture du journal: {}", e);
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "message": "Événement supprimé avec succès."
    })))
}

pub fn agenda_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/agenda")
            .service(list_events)
            .service(create_event)
            .service(update_event)
            .service(delete_event),
    );
}
