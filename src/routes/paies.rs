use actix_web::{get, post, put, web, HttpRequest, HttpResponse};
use sea_orm::{DatabaseConnection, EntityTrait};
use validator::Validate;

use crate::errors::ApiError;
use crate::middleware::AuthUser;
use crate::models::dto::PaieRequest;
use crate::models::{employee, paie};
use crate::services::journal_service::JournalService;
use crate::services::paie_service::PaieService;
use crate::services::pdf_service::PdfService;
use crate::services::permission_service::PermissionService;
use crate::utils::pagination::PageParams;
use crate::utils::requete;

/// GET /paies - Liste paginée des fiches de paie visibles par l'acteur
#[get("")]
pub async fn list_paies(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "list", "paie")?;

    let query = req.query_string();
    let page = PageParams::new(
        requete::valeur_parsee(query, "page"),
        requete::valeur_parsee(query, "page_size"),
    );

    let (fiches, total, num_pages) = PaieService::lister(db.get_ref(), &acteur, page).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "paies": fiches,
        "total": total,
        "num_pages": num_pages,
        "page": page.page,
    })))
}

/// GET /paies/{id} - Détail d'une fiche de paie
#[get("/{id}")]
pub async fn get_paie(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    chemin: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "retrieve", "paie")?;

    let (fiche, _) = PaieService::charger(db.get_ref(), &acteur, chemin.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "paie": fiche })))
}

/// POST /paies - Créer une fiche de paie
#[post("")]
pub async fn create_paie(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    request: web::Json<PaieRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "errors": errors
        })));
    }

    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "create", "paie")?;

    PaieService::creer(db.get_ref(), &acteur, request.into_inner()).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "message": "Fiche de paie créée avec succès."
    })))
}

/// PUT /paies/{id} - Mettre à jour une fiche de paie
#[put("/{id}")]
pub async fn update_paie(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    chemin: web::Path<i32>,
    request: web::Json<PaieRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "errors": errors
        })));
    }

    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "update", "paie")?;

    PaieService::modifier(db.get_ref(), &acteur, chemin.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Fiche de paie mise à jour avec succès."
    })))
}

/// GET /paies/{id}/export - Export PDF de la fiche.
/// L'export est consigné dans l'historique dès que le document est
/// produit, que le téléchargement aboutisse ou non.
#[get("/{id}/export")]
pub async fn export_paie(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    chemin: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger_codename(&acteur, "export_paie")?;

    let id = chemin.into_inner();
    let fiche = paie::Entity::find_by_id(id)
        .one(db.get_ref())
        .await?
        .ok_or_else(|| ApiError::introuvable("Fiche de paie", id))?;
    let salarie = employee::Entity::find_by_id(fiche.employee_id)
        .one(db.get_ref())
        .await?
        .ok_or_else(|| ApiError::introuvable("Employé", fiche.employee_id))?;

    let document = PdfService::generer_fiche_de_paie(&fiche, &salarie)?;
    let nom_fichier = PdfService::nom_fichier(&salarie.nom, &salarie.prenom, &fiche.mois);

    JournalService::consigner_apres_coup(
        db.get_ref(),
        &acteur,
        "export",
        "paie",
        format!(
            "Une fiche de paie de {} {} a été exportée",
            salarie.nom, salarie.prenom
        ),
        Some(salarie.user_id),
        None,
        format!(
            "La fiche de paie de {} {} a été exportée.",
            salarie.nom, salarie.prenom
        ),
    )
    .await;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", nom_fichier),
        ))
        .body(document))
}

pub fn paie_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/paies")
            .service(list_paies)
            .service(create_paie)
            .service(export_paie)
            .service(get_paie)
            .service(update_paie),
    );
}
