use actix_web::{get, web, HttpResponse};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::errors::ApiError;
use crate::middleware::AuthUser;
use crate::models::historique;
use crate::services::permission_service::PermissionService;

/// GET /historique - Journal d'audit complet, du plus récent au plus
/// ancien. Lecture seule: aucune route de modification n'existe.
#[get("")]
pub async fn list_historique(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger_codename(&acteur, "view_historique")?;

    let historiques = historique::Entity::find()
        .order_by_desc(historique::Column::DateAction)
        .all(db.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "historiques": historiques })))
}

pub fn historique_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/historique").service(list_historique));
}
