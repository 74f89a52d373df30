use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};
use validator::Validate;

use crate::errors::ApiError;
use crate::middleware::AuthUser;
use crate::models::dto::{CreateFactureRequest, ServiceRequest, UpdateFactureRequest};
use crate::models::{facture, service};
use crate::services::facture_service::{FactureFiltres, FactureService};
use crate::services::permission_service::PermissionService;

/// GET /factures - Factures et devis, filtrés indépendamment par
/// année/mois (fact_annee, fact_mois, dev_annee, dev_mois)
#[get("")]
pub async fn list_factures(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "list", "facture")?;

    let filtres = FactureFiltres::depuis_query(req.query_string());
    let reponse = FactureService::lister(db.get_ref(), &filtres).await?;

    Ok(HttpResponse::Ok().json(reponse))
}

/// POST /factures/facture - Créer une facture
#[post("/facture")]
pub async fn create_facture(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    request: web::Json<CreateFactureRequest>,
) -> Result<HttpResponse, ApiError> {
    creer_document(db, auth_user, request, facture::TYPE_FACTURE).await
}

/// POST /factures/devis - Créer un devis. Même chemin séquentiel que
/// les factures: les références aléatoires de l'ancienne application
/// pouvaient entrer en collision.
#[post("/devis")]
pub async fn create_devis(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    request: web::Json<CreateFactureRequest>,
) -> Result<HttpResponse, ApiError> {
    creer_document(db, auth_user, request, facture::TYPE_DEVIS).await
}

async fn creer_document(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    request: web::Json<CreateFactureRequest>,
    type_facture: &str,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "status": "error",
            "errors": errors
        })));
    }

    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "create", "facture")?;

    let document =
        FactureService::creer(db.get_ref(), &acteur, type_facture, request.into_inner()).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "status": "success",
        "message": "Facture ajoutée avec succès.",
        "reference": document.reference,
    })))
}

/// PUT /factures/{id} - Modifier une facture (référence conservée)
#[put("/{id}")]
pub async fn update_facture(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    chemin: web::Path<i32>,
    request: web::Json<UpdateFactureRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "status": "error",
            "errors": errors
        })));
    }

    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "update", "facture")?;

    FactureService::modifier(db.get_ref(), &acteur, chemin.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "message": "Facture modifiée avec succès."
    })))
}

/// DELETE /factures/{id} - Supprimer une facture
#[delete("/{id}")]
pub async fn delete_facture(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    chemin: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "delete", "facture")?;

    FactureService::supprimer(db.get_ref(), &acteur, chemin.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "message": "Facture supprimée avec succès."
    })))
}

// ---------------------------------------------------------------------------
// Catalogue de services/articles. Les factures copient ces valeurs,
// la suppression d'une entrée ne touche donc aucune facture existante.
// ---------------------------------------------------------------------------

/// GET /factures/services - Catalogue complet
#[get("/services")]
pub async fn list_services(
    db: web::Data<DatabaseConnection>,
    _auth_user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let services = service::Entity::find().all(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "services": services })))
}

/// POST /factures/services - Ajouter une entrée au catalogue
#[post("/services")]
pub async fn create_service(
    db: web::Data<DatabaseConnection>,
    _auth_user: AuthUser,
    request: web::Json<ServiceRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "status": "error",
            "errors": errors
        })));
    }

    let request = request.into_inner();
    service::ActiveModel {
        nom_service: Set(request.nom_service),
        prix_unitaire: Set(request.prix_unitaire),
        description: Set(request.description),
        ..Default::default()
    }
    .insert(db.get_ref())
    .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "status": "success",
        "message": "Service ajouté avec succès."
    })))
}

/// PUT /factures/services/{id} - Modifier une entrée du catalogue
#[put("/services/{id}")]
pub async fn update_service(
    db: web::Data<DatabaseConnection>,
    _auth_user: AuthUser,
    chemin: web::Path<i32>,
    request: web::Json<ServiceRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "status": "error",
            "errors": errors
        })));
    }

    let id = chemin.into_inner();
    let existant = service::Entity::find_by_id(id)
        .one(db.get_ref())
        .await?
        .ok_or_else(|| ApiError::introuvable("Service", id))?;

    let request = request.into_inner();
    let mut active: service::ActiveModel = existant.into();
    active.nom_service = Set(request.nom_service);
    active.prix_unitaire = Set(request.prix_unitaire);
    active.description = Set(request.description);
    active.update(db.get_ref()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "message": "Service modifié avec succès."
    })))
}

/// DELETE /factures/services/{id} - Supprimer une entrée du catalogue
#[delete("/services/{id}")]
pub async fn delete_service(
    db: web::Data<DatabaseConnection>,
    _auth_user: AuthUser,
    chemin: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = chemin.into_inner();
    let existant = service::Entity::find_by_id(id)
        .one(db.get_ref())
        .await?
        .ok_or_else(|| ApiError::introuvable("Service", id))?;

    existant.delete(db.get_ref()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "message": "Service supprimé avec succès."
    })))
}

pub fn facture_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/factures")
            .service(list_services)
            .service(create_service)
            .service(update_service)
            .service(delete_service)
            .service(list_factures)
            .service(create_facture)
            .service(create_devis)
            .service(update_facture)
            .service(delete_facture),
    );
}
