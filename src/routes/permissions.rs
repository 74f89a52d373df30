use actix_web::{get, post, web, HttpResponse};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use validator::Validate;

use crate::errors::ApiError;
use crate::middleware::AuthUser;
use crate::models::dto::{SetPermissionsRequest, UserPermissionsItem};
use crate::models::{user_permission, users};
use crate::services::permission_service::{PermissionService, PERMISSIONS_CONNUES};

/// GET /permissions - Utilisateurs avec leurs codenames, et le
/// catalogue des codenames connus
#[get("")]
pub async fn list_permissions(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger_codename(&acteur, "manage_permissions")?;

    let comptes = users::Entity::find().all(db.get_ref()).await?;
    let lignes = user_permission::Entity::find().all(db.get_ref()).await?;

    let utilisateurs: Vec<UserPermissionsItem> = comptes
        .into_iter()
        .map(|u| {
            let permissions = lignes
                .iter()
                .filter(|p| p.user_id == u.id)
                .map(|p| p.codename.clone())
                .collect();
            UserPermissionsItem {
                id: u.id,
                username: u.username,
                permissions,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "users": utilisateurs,
        "permissions": PERMISSIONS_CONNUES,
    })))
}

/// POST /permissions - Remplace l'ensemble des codenames d'un
/// utilisateur. Les codenames inconnus sont rejetés.
#[post("")]
pub async fn set_permissions(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    request: web::Json<SetPermissionsRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "status": "error",
            "errors": errors
        })));
    }

    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger_codename(&acteur, "manage_permissions")?;

    let request = request.into_inner();

    let inconnus: Vec<&String> = request
        .permissions
        .iter()
        .filter(|c| !PERMISSIONS_CONNUES.contains(&c.as_str()))
        .collect();
    if !inconnus.is_empty() {
        return Err(ApiError::Validation(format!(
            "Codenames inconnus: {}.",
            inconnus
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    let compte = users::Entity::find_by_id(request.user_id)
        .one(db.get_ref())
        .await?
        .ok_or_else(|| ApiError::introuvable("Utilisateur", request.user_id))?;

    user_permission::Entity::delete_many()
        .filter(user_permission::Column::UserId.eq(compte.id))
        .exec(db.get_ref())
        .await?;

    for codename in &request.permissions {
        user_permission::ActiveModel {
            user_id: Set(compte.id),
            codename: Set(codename.clone()),
            ..Default::default()
        }
        .insert(db.get_ref())
        .await?;
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Permissions mises à jour avec succès."
    })))
}

pub fn permission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/permissions")
            .service(list_permissions)
            .service(set_permissions),
    );
}
