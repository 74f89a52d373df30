use actix_web::{post, get, web, HttpResponse};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::middleware::AuthUser;
use crate::models::user_settings;
use crate::models::users::{ActiveModel as UserActiveModel, Column as UserColumn, Entity as Users};
use crate::services::journal_service::JournalService;
use crate::services::permission_service::PermissionService;
use crate::utils::{jwt, password};

// DTO pour l'inscription
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

// DTO pour la connexion
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// DTO pour changer le mot de passe
#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

// Réponse après login/register
#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i32,
    pub username: String,
}

/// POST /auth/register - Créer un compte (PUBLIC)
#[post("/register")]
pub async fn register(
    body: web::Json<RegisterRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    // 1. Vérifier si l'utilisateur existe déjà
    let existant = Users::find()
        .filter(UserColumn::Username.eq(&body.username))
        .one(db.get_ref())
        .await?;

    if existant.is_some() {
        return Ok(HttpResponse::Conflict().json(serde_json::json!({
            "status": "error",
            "message": "Ce nom d'utilisateur existe déjà."
        })));
    }

    // 2. Hasher le mot de passe
    let password_hash = password::hash_password(&body.password).map_err(ApiError::Interne)?;

    // 3. Créer l'utilisateur et ses paramètres par défaut
    let user = UserActiveModel {
        username: Set(body.username.clone()),
        password_hash: Set(password_hash),
        ..Default::default()
    }
    .insert(db.get_ref())
    .await?;

    user_settings::ActiveModel {
        user_id: Set(user.id),
        language: Set("fr".to_string()),
        theme: Set("clair".to_string()),
        receive_desktop_notifications: Set(true),
        receive_email_notifications: Set(true),
        ..Default::default()
    }
    .insert(db.get_ref())
    .await?;

    // 4. Générer le JWT
    let token = jwt::generate_token(user.id, &user.username).map_err(ApiError::Interne)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user_id: user.id,
        username: user.username,
    }))
}

/// POST /auth/login - Se connecter (PUBLIC)
#[post("/login")]
pub async fn login(
    body: web::Json<LoginRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let identifiants_invalides = || {
        HttpResponse::Unauthorized().json(serde_json::json!({
            "status": "error",
            "message": "Nom d'utilisateur ou mot de passe invalide."
        }))
    };

    // 1. Trouver l'utilisateur
    let user = match Users::find()
        .filter(UserColumn::Username.eq(&body.username))
        .one(db.get_ref())
        .await?
    {
        Some(user) => user,
        None => return Ok(identifiants_invalides()),
    };

    // 2. Vérifier le mot de passe
    let valide = password::verify_password(&body.password, &user.password_hash)
        .map_err(ApiError::Interne)?;
    if !valide {
        return Ok(identifiants_invalides());
    }

    // 3. Générer le JWT
    let token = jwt::generate_token(user.id, &user.username).map_err(ApiError::Interne)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user_id: user.id,
        username: user.username,
    }))
}

/// GET /auth/me - Vérifier le token (PROTÉGÉE)
#[get("/me")]
pub async fn me(auth_user: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "user_id": auth_user.user_id,
        "username": auth_user.username,
    }))
}

/// POST /auth/change-password - Changer son mot de passe (PROTÉGÉE)
#[post("/change-password")]
pub async fn change_password(
    auth_user: AuthUser,
    body: web::Json<ChangePasswordRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    // 1. Récupérer l'utilisateur
    let user = Users::find_by_id(auth_user.user_id)
        .one(db.get_ref())
        .await?
        .ok_or_else(|| ApiError::introuvable("Utilisateur", auth_user.user_id))?;

    // 2. Vérifier l'ancien mot de passe
    let valide = password::verify_password(&body.old_password, &user.password_hash)
        .map_err(ApiError::Interne)?;
    if !valide {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "status": "error",
            "message": "L'ancien mot de passe est incorrect."
        })));
    }

    // 3. Hasher et enregistrer le nouveau mot de passe
    let nouveau_hash = password::hash_password(&body.new_password).map_err(ApiError::Interne)?;

    let username = user.username.clone();
    let mut active: UserActiveModel = user.into();
    active.password_hash = Set(nouveau_hash);
    active.update(db.get_ref()).await?;

    // 4. Consigner le changement dans l'historique
    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    if let Err(e) = JournalService::consigner(
        db.get_ref(),
        &acteur,
        "update",
        "employe",
        format!("{} a mis à jour son mot de passe.", username),
        Some(auth_user.user_id),
    )
    .await
    {
        tracing::warn!("échec d'écriture du journal: {}", e);
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Mot de passe mis à jour avec succès."
    })))
}

pub fn auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(register)
            .service(login)
            .service(me)
            .service(change_password),
    );
}
