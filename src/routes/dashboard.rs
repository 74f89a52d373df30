use actix_web::{get, web, HttpResponse};
use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use crate::errors::ApiError;
use crate::middleware::AuthUser;
use crate::models::{agenda_event, employee, notification, user_notification};

/// GET /dashboard - Synthèse: effectifs, notifications non lues,
/// événements du jour et du lendemain
#[get("")]
pub async fn dashboard(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let total_salaries = employee::Entity::find().count(db.get_ref()).await?;
    let salaries_en_conge = employee::Entity::find()
        .filter(employee::Column::Statut.eq(employee::STATUT_CONGE))
        .count(db.get_ref())
        .await?;
    let salaries_disponibles = employee::Entity::find()
        .filter(employee::Column::Statut.eq(employee::STATUT_TRAVAIL))
        .count(db.get_ref())
        .await?;

    let non_lues = user_notification::Entity::find()
        .filter(user_notification::Column::UserAffectedId.eq(auth_user.user_id))
        .filter(user_notification::Column::IsRead.eq(false))
        .find_also_related(notification::Entity)
        .all(db.get_ref())
        .await?;
    let unread_notifications: Vec<_> = non_lues
        .into_iter()
        .filter_map(|(_, notif)| notif)
        .map(|n| {
            serde_json::json!({
                "message": n.message,
                "date_created": n.date_created,
            })
        })
        .collect();

    let aujourd_hui = Utc::now().date_naive();
    let demain = aujourd_hui + Duration::days(1);

    let today_events = agenda_event::Entity::find()
        .filter(agenda_event::Column::StartDate.eq(aujourd_hui))
        .order_by_asc(agenda_event::Column::StartTime)
        .all(db.get_ref())
        .await?;
    let tomorrow_events = agenda_event::Entity::find()
        .filter(agenda_event::Column::StartDate.eq(demain))
        .order_by_asc(agenda_event::Column::StartTime)
        .all(db.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "total_salaries": total_salaries,
        "salaries_en_conge": salaries_en_conge,
        "salaries_disponibles": salaries_disponibles,
        "unread_notifications": unread_notifications,
        "today_events": today_events,
        "tomorrow_events": tomorrow_events,
    })))
}

pub fn dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/dashboard").service(dashboard));
}
