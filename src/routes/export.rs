use actix_web::{post, web, Either, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::errors::ApiError;
use crate::middleware::AuthUser;
use crate::models::dto::ExportRequest;
use crate::services::export_service::ExportService;
use crate::services::journal_service::JournalService;
use crate::services::permission_service::PermissionService;

/// POST /export - Export SQL administratif. Corps formulaire ou JSON
/// avec un champ `table`: un nom de la liste blanche, ou "all" pour la
/// base entière. Tout autre nom est rejeté en 400 sans produire de
/// fichier.
#[post("")]
pub async fn export_database(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    corps: Either<web::Form<ExportRequest>, web::Json<ExportRequest>>,
) -> Result<HttpResponse, ApiError> {
    let acteur = PermissionService::charger_acteur(db.get_ref(), &auth_user).await?;
    PermissionService::exiger_codename(&acteur, "export_database")?;

    let table = match corps {
        Either::Left(form) => form.into_inner().table,
        Either::Right(json) => json.into_inner().table,
    };

    let sql = ExportService::exporter(&table).await?;
    let nom_fichier = ExportService::nom_fichier(&table);

    if let Err(e) = JournalService::consigner(
        db.get_ref(),
        &acteur,
        "export",
        "export_base",
        format!("Export de la base de données ({}) par {}.", table, acteur.username),
        None,
    )
    .await
    {
        tracing::warn!("échec d'écriture du journal: {}", e);
    }

    Ok(HttpResponse::Ok()
        .content_type("application/sql")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", nom_fichier),
        ))
        .body(sql))
}

pub fn export_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/export").service(export_database));
}
