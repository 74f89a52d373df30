pub mod agenda;
pub mod auth;
pub mod conges;
pub mod dashboard;
pub mod employees;
pub mod export;
pub mod factures;
pub mod health;
pub mod historique;
pub mod notifications;
pub mod paies;
pub mod permissions;
pub mod schedules;
pub mod settings;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(health::health_check)
            .configure(auth::auth_routes)
            .configure(dashboard::dashboard_routes)
            .configure(employees::employee_routes)
            .configure(conges::conge_routes)
            .configure(schedules::schedule_routes)
            .configure(agenda::agenda_routes)
            .configure(paies::paie_routes)
            .configure(notifications::notification_routes)
            .configure(historique::historique_routes)
            .configure(settings::settings_routes)
            .configure(permissions::permission_routes)
            .configure(factures::facture_routes)
            .configure(export::export_routes),
    );
}
