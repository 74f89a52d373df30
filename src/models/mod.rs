// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Description:
//   Point d'entrée pour tous les modèles de données.
//   Chaque modèle correspond à une table PostgreSQL avec SeaORM.
//
// Liste des modules:
//   - users : Comptes utilisateurs (authentification JWT)
//   - user_permission : Codenames de permission par utilisateur
//   - user_settings : Préférences utilisateur (langue, thème, notifications)
//   - employee : Salariés (lien un-à-un avec users)
//   - departement / poste / competence : Référentiels RH
//   - employee_competence : Table de jointure employé <-> compétence
//   - conge : Demandes de congé (en_attente / accepte / refuse)
//   - schedule : Emplois du temps
//   - agenda_event : Événements d'agenda partagés
//   - paie : Fiches de paie (exportables en PDF)
//   - notification / user_notification : Notifications et état de lecture
//   - historique : Journal d'audit (insertion seule)
//   - service : Catalogue de services/articles facturables
//   - facture : Factures et devis (lignes copiées en JSON)
//   - dto : Data Transfer Objects pour les requêtes/réponses API
//
// Points d'attention:
//   - Tous les modèles utilisent SeaORM (pas de SQL brut)
//   - Les relations entre tables sont définies dans chaque modèle
//   - historique ne reçoit jamais d'update ni de delete
//
// ============================================================================

pub mod agenda_event;
pub mod competence;
pub mod conge;
pub mod departement;
pub mod dto;
pub mod employee;
pub mod employee_competence;
pub mod facture;
pub mod historique;
pub mod notification;
pub mod paie;
pub mod poste;
pub mod schedule;
pub mod service;
pub mod user_notification;
pub mod user_permission;
pub mod user_settings;
pub mod users;
