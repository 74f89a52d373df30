use actix_web::{get, post, web, HttpResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::ApiError;
use crate::middleware::AuthUser;
use crate::models::dto::NotificationItem;
use crate::models::{notification, user_notification};

/// GET /notifications - Notifications de l'utilisateur connecté,
/// de la plus récente à la plus ancienne
#[get("")]
pub async fn list_notifications(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let lignes = user_notification::Entity::find()
        .filter(user_notification::Column::UserAffectedId.eq(auth_user.user_id))
        .find_also_related(notification::Entity)
        .order_by_desc(notification::Column::DateCreated)
        .all(db.get_ref())
        .await?;

    let notifications: Vec<NotificationItem> = lignes
        .into_iter()
        .filter_map(|(etat, notif)| {
            notif.map(|n| NotificationItem {
                notification_id: n.id,
                message: n.message,
                date_created: n.date_created,
                is_read: etat.is_read,
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({ "notifications": notifications })))
}

/// POST /notifications/{notification_id}/read - Marquer comme lue.
/// 404 si la notification n'appartient pas à l'utilisateur connecté.
#[post("/{notification_id}/read")]
pub async fn mark_as_read(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    chemin: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let notification_id = chemin.into_inner();

    let etat = user_notification::Entity::find()
        .filter(user_notification::Column::NotificationId.eq(notification_id))
        .filter(user_notification::Column::UserAffectedId.eq(auth_user.user_id))
        .one(db.get_ref())
        .await?
        .ok_or_else(|| ApiError::introuvable("Notification", notification_id))?;

    let mut active: user_notification::ActiveModel = etat.into();
    active.is_read = Set(true);
    active.update(db.get_ref()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Notification marquée comme lue."
    })))
}

pub fn notification_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notifications")
            .service(list_notifications)
            .service(mark_as_read),
    );
}
