use actix_web::{get, post, put, web, HttpRequest, HttpResponse};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use validator::Validate;

use crate::errors::ApiError;
use crate::middleware::AuthUser;
use crate::models::dto::{EmployeeRequest, UpdateProfileRequest};
use crate::models::employee;
use crate::services::employee_service::{EmployeeFiltres, EmployeeService};
use crate::services::permission_service::PermissionService;
use crate::utils::pagination::PageParams;
use crate::utils::requete;

/// GET /employees - Listing filtré et paginé.
/// Filtres: id, nom, poste (répétable), type_salarie, statut,
/// date_embauche, departement (répétable), competence (répétable).
#[get("")]
pub async fn list_employees(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "list", "employee")?;

    let query = req.query_string();
    let filtres = EmployeeFiltres::depuis_query(query);
    let page = PageParams::new(
        requete::valeur_parsee(query, "page"),
        requete::valeur_parsee(query, "page_size"),
    );

    let reponse = EmployeeService::lister(db.get_ref(), &filtres, page).await?;
    Ok(HttpResponse::Ok().json(reponse))
}

/// POST /employees - Créer un employé
#[post("")]
pub async fn create_employee(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    request: web::Json<EmployeeRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "status": "error",
            "errors": errors
        })));
    }

    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "create", "employee")?;

    let nouveau = EmployeeService::creer(db.get_ref(), &acteur, request.into_inner()).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "status": "success",
        "message": format!("L'employé {} {} a été ajouté avec succès.", nouveau.nom, nouveau.prenom)
    })))
}

/// PUT /employees/{id} - Modifier un employé
#[put("/{id}")]
pub async fn update_employee(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    chemin: web::Path<i32>,
    request: web::Json<EmployeeRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "status": "error",
            "errors": errors
        })));
    }

    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger(&acteur, "update", "employee")?;

    let modifie =
        EmployeeService::modifier(db.get_ref(), &acteur, chemin.into_inner(), request.into_inner())
            .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "message": format!("L'employé {} {} a été modifié avec succès.", modifie.nom, modifie.prenom)
    })))
}

/// GET /employees/profile - Fiche employé de l'utilisateur connecté
#[get("/profile")]
pub async fn get_profile(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let fiche = employee::Entity::find()
        .filter(employee::Column::UserId.eq(auth_user.user_id))
        .one(db.get_ref())
        .await?
        .ok_or_else(|| {
            ApiError::Introuvable(
                "Aucune information d'employé trouvée pour cet utilisateur.".to_string(),
            )
        })?;

    let mut user_data = serde_json::to_value(&fiche)
        .map_err(|e| ApiError::Interne(format!("sérialisation du profil: {}", e)))?;
    user_data["username"] = serde_json::Value::String(auth_user.username);

    Ok(HttpResponse::Ok().json(serde_json::json!({ "user": user_data })))
}

/// PUT /employees/profile - Mettre à jour sa propre fiche
#[put("/profile")]
pub async fn update_profile(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    request: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "status": "error",
            "errors": errors
        })));
    }

    let fiche = employee::Entity::find()
        .filter(employee::Column::UserId.eq(auth_user.user_id))
        .one(db.get_ref())
        .await?
        .ok_or_else(|| {
            ApiError::Introuvable(
                "Aucune information d'employé trouvée pour cet utilisateur.".to_string(),
            )
        })?;

    let request = request.into_inner();
    let mut active: employee::ActiveModel = fiche.into();
    if let Some(email) = request.email {
        active.email = Set(Some(email));
    }
    if let Some(pays) = request.pays {
        active.pays = Set(Some(pays));
    }
    if let Some(code_postal) = request.code_postal {
        active.code_postal = Set(Some(code_postal));
    }
    if let Some(statut_matrimonial) = request.statut_matrimonial {
        active.statut_matrimonial = Set(Some(statut_matrimonial));
    }
    active.update(db.get_ref()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "success",
        "message": "Profil mis à jour avec succès."
    })))
}

pub fn employee_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/employees")
            .service(get_profile)
            .service(update_profile)
            .service(list_employees)
            .service(create_employee)
            .service(update_employee),
    );
}
