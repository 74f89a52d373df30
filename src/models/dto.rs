// Data Transfer Objects des requêtes et réponses API.
// Les champs de formulaire dynamiques de l'ancienne application
// (description-<id>, quantite-<id>, prix-<id>) sont remplacés par une
// liste de lignes typée, validée à la frontière.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

// ---------------------------------------------------------------------------
// Facturation
// ---------------------------------------------------------------------------

/// Une ligne de facture, copiée par valeur depuis le catalogue (ou saisie
/// librement). Aucun id de service n'est conservé.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LigneFacture {
    #[validate(length(min = 1, message = "La description est obligatoire."))]
    pub description: String,
    #[validate(range(min = 1, message = "La quantité doit être positive."))]
    pub quantite: i32,
    pub prix: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFactureRequest {
    #[validate(length(min = 1, message = "Le client est obligatoire."))]
    pub client: String,
    pub date_facture: NaiveDate,
    /// "Brouillon" ou "Finalisee"
    #[validate(length(min = 1))]
    pub etat_facture: String,
    #[validate(length(min = 1, message = "Au moins une ligne est requise."), nested)]
    pub lignes: Vec<LigneFacture>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFactureRequest {
    pub client: Option<String>,
    pub date_facture: Option<NaiveDate>,
    #[validate(nested)]
    pub lignes: Option<Vec<LigneFacture>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ServiceRequest {
    #[validate(length(min = 1, message = "Le nom du service est obligatoire."))]
    pub nom_service: String,
    pub prix_unitaire: Decimal,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FactureListResponse {
    pub factures: Vec<super::facture::Model>,
    pub devis: Vec<super::facture::Model>,
}

// ---------------------------------------------------------------------------
// Personnel
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct EmployeeRequest {
    pub user_id: i32,
    #[validate(length(min = 1, message = "Le nom est obligatoire."))]
    pub nom: String,
    #[validate(length(min = 1, message = "Le prénom est obligatoire."))]
    pub prenom: String,
    pub sexe: Option<String>,
    pub statut_matrimonial: Option<String>,
    #[validate(email(message = "Adresse email invalide."))]
    pub email: Option<String>,
    pub pays: Option<String>,
    pub code_postal: Option<String>,
    pub date_naissance: Option<NaiveDate>,
    pub date_embauche: Option<NaiveDate>,
    pub type_salarie: Option<String>,
    pub type_contrat: Option<String>,
    pub solde_conges: Option<i32>,
    pub departement_id: Option<i32>,
    pub poste_id: Option<i32>,
    #[serde(default)]
    pub competences: Vec<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(email(message = "Adresse email invalide."))]
    pub email: Option<String>,
    pub pays: Option<String>,
    pub code_postal: Option<String>,
    pub statut_matrimonial: Option<String>,
}

/// Ligne du listing employés (noms de poste/département résolus)
#[derive(Debug, Serialize)]
pub struct EmployeeListItem {
    pub id: i32,
    pub nom: String,
    pub prenom: String,
    pub poste: Option<String>,
    pub type_salarie: Option<String>,
    pub statut: String,
    pub date_embauche: Option<NaiveDate>,
    pub departement: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmployeeListResponse {
    pub employees: Vec<EmployeeListItem>,
    pub total_employees: u64,
    pub num_pages: u64,
    pub page: u64,
}

// ---------------------------------------------------------------------------
// Congés
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCongeRequest {
    pub employee_id: i32,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCongeRequest {
    pub date_debut: Option<NaiveDate>,
    pub date_fin: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RefusCongeRequest {
    #[validate(length(min = 1, message = "La raison du refus est obligatoire."))]
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Emplois du temps et agenda
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct ScheduleRequest {
    pub employee_id: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[validate(length(min = 1))]
    pub jour_debut: String,
    #[validate(length(min = 1))]
    pub jour_fin: String,
    pub location: Option<String>,
}

/// Horaires d'un employé regroupés pour le listing calendrier
#[derive(Debug, Serialize)]
pub struct ScheduleGroup {
    pub employee_nom: String,
    pub employee_prenom: String,
    pub employee_poste: Option<String>,
    pub employee_departement: Option<String>,
    pub schedules: Vec<ScheduleSlot>,
}

#[derive(Debug, Serialize)]
pub struct ScheduleSlot {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub jour_debut: String,
    pub jour_fin: String,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AgendaEventRequest {
    #[validate(length(min = 1, message = "Le titre est obligatoire."))]
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
}

// ---------------------------------------------------------------------------
// Paie
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct PaieRequest {
    pub employee_id: i32,
    #[validate(length(min = 1, message = "Le mois est obligatoire."))]
    pub mois: String,
    pub annee: i32,
    pub salaire_base: Decimal,
    pub primes: Decimal,
    pub retenues: Decimal,
    pub salaire_net: Decimal,
}

// ---------------------------------------------------------------------------
// Paramètres, permissions, notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct SettingsRequest {
    pub language: Option<String>,
    pub theme: Option<String>,
    pub receive_desktop_notifications: Option<bool>,
    pub receive_email_notifications: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetPermissionsRequest {
    pub user_id: i32,
    pub permissions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct UserPermissionsItem {
    pub id: i32,
    pub username: String,
    pub permissions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct NotificationItem {
    pub notification_id: i32,
    pub message: String,
    pub date_created: chrono::DateTime<chrono::Utc>,
    pub is_read: bool,
}

// ---------------------------------------------------------------------------
// Export base de données
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub table: String,
}
