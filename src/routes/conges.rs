use actix_web::{get, post, put, web, HttpResponse};
use sea_orm::{DatabaseConnection, EntityTrait};
use validator::Validate;

use crate::errors::ApiError;
use crate::middleware::AuthUser;
use crate::models::dto::{CreateCongeRequest, RefusCongeRequest, UpdateCongeRequest};
use crate::models::employee;
use crate::services::conge_service::CongeService;
use crate::services::permission_service::PermissionService;

/// GET /conges - Liste restreinte aux congés visibles par l'acteur
#[get("")]
pub async fn list_conges(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "list", "conge")?;

    let conges = CongeService::lister(db.get_ref(), &acteur).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "conges": conges })))
}

/// GET /conges/employee/{employee_id} - Congés d'un employé donné
#[get("/employee/{employee_id}")]
pub async fn conges_for_employee(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    chemin: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "retrieve", "conge")?;

    let conges =
        CongeService::lister_pour_employe(db.get_ref(), &acteur, chemin.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "conges": conges })))
}

/// POST /conges - Créer une demande de congé
#[post("")]
pub async fn create_conge(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    request: web::Json<CreateCongeRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "status": "error",
            "errors": errors
        })));
    }

    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "create", "conge")?;

    let demande = CongeService::creer(db.get_ref(), &acteur, request.into_inner()).await?;

    let salarie = employee::Entity::find_by_id(demande.employee_id)
        .one(db.get_ref())
        .await?
        .ok_or_else(|| ApiError::introuvable("Employé", demande.employee_id))?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "status": "success",
        "message": format!(
            "Le congé de {} {} a été créé avec succès.",
            salarie.nom, salarie.prenom
        )
    })))
}

/// PUT /conges/{id} - Modifier les dates d'une demande
#[put("/{id}")]
pub async fn update_conge(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    chemin: web::Path<i32>,
    request: web::Json<UpdateCongeRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "status": "error",
            "errors": errors
        })));
    }

    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "update", "conge")?;

    let demande =
        CongeService::modifier(db.get_ref(), &acteur, chemin.into_inner(), request.into_inner())
            .await?;

    let salarie = employee::Entity::find_by_id(demande.employee_id)
        .one(db.get_ref())
        .await?
        .ok_or_else(|| ApiError::introuvable("Employé", demande.employee_id))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "message": format!(
            "Le congé de {} {} a été modifié avec succès.",
            salarie.nom, salarie.prenom
        )
    })))
}

/// POST /conges/{id}/{action} - Accepter ou refuser une demande.
/// L'acceptation exige manage_conge et un solde suffisant; le refus
/// exige manage_conge et une raison non vide.
#[post("/{id}/{action}")]
pub async fn decide_conge(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    chemin: web::Path<(i32, String)>,
    corps: Option<web::Json<RefusCongeRequest>>,
) -> Result<HttpResponse, ApiError> {
    let (conge_id, action) = chemin.into_inner();
    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;

    match action.as_str() {
        "accepter" => {
            CongeService::accepter(db.get_ref(), &acteur, conge_id).await?;
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "status": "success",
                "message": "Le congé a été accepté."
            })))
        }
        "refuser" => {
            let corps = corps.ok_or_else(|| {
                ApiError::Validation("La raison du refus est obligatoire.".to_string())
            })?;
            if let Err(errors) = corps.validate() {
                return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                    "status": "error",
                    "errors": errors
                })));
            }

            CongeService::refuser(db.get_ref(), &acteur, conge_id, &corps.reason).await?;
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "status": "success",
                "message": "Le congé a été refusé."
            })))
        }
        _ => Err(ApiError::Regle("Action non reconnue.".to_string())),
    }
}

pub fn conge_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/conges")
            .service(list_conges)
            .service(conges_for_employee)
            .service(create_conge)
            .service(update_conge)
            .service(decide_conge),
    );
}
