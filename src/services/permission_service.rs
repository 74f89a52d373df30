use std::collections::HashSet;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::errors::ApiError;
use crate::middleware::AuthUser;
use crate::models::user_permission;

/// Catalogue des codenames connus, exposé par l'endpoint de gestion
/// des permissions.
pub const PERMISSIONS_CONNUES: &[&str] = &[
    "add_employee",
    "change_employee",
    "view_employee",
    "add_conge",
    "change_conge",
    "view_conge",
    "manage_conge",
    "acces_all_conge",
    "add_schedule",
    "change_schedule",
    "view_schedule",
    "delete_schedule",
    "add_agendaevent",
    "change_agendaevent",
    "view_agendaevent",
    "delete_agendaevent",
    "add_paie",
    "change_paie",
    "view_paie",
    "delete_paie",
    "acces_all_paie",
    "export_paie",
    "view_historique",
    "add_facture",
    "change_facture",
    "view_facture",
    "delete_facture",
    "manage_permissions",
    "export_database",
];

/// Acteur authentifié, passé explicitement aux prédicats et au journal.
/// Porte l'ensemble des codenames chargés depuis user_permission —
/// aucun état de session ambiant.
#[derive(Debug, Clone)]
pub struct Acteur {
    pub user_id: i32,
    pub username: String,
    permissions: HashSet<String>,
}

impl Acteur {
    pub fn new(user_id: i32, username: String, permissions: impl IntoIterator<Item = String>) -> Self {
        Acteur {
            user_id,
            username,
            permissions: permissions.into_iter().collect(),
        }
    }

    pub fn has_perm(&self, codename: &str) -> bool {
        self.permissions.contains(codename)
    }
}

pub struct PermissionService;

impl PermissionService {
    /// Charge l'acteur (codenames inclus) pour l'utilisateur du token
    pub async fn charger_acteur(
        db: &DatabaseConnection,
        auth_user: &AuthUser,
    ) -> Result<Acteur, ApiError> {
        let codenames = user_permission::Entity::find()
            .filter(user_permission::Column::UserId.eq(auth_user.user_id))
            .all(db)
            .await?
            .into_iter()
            .map(|p| p.codename);

        Ok(Acteur::new(
            auth_user.user_id,
            auth_user.username.clone(),
            codenames,
        ))
    }

    /// Prédicat de base: une action sur une ressource exige le codename
    /// <prefixe>_<ressource>. Toute action non reconnue est refusée.
    pub fn autorise(acteur: &Acteur, action: &str, ressource: &str) -> bool {
        let prefixe = match action {
            "create" => "add",
            "update" | "partial_update" => "change",
            "list" | "retrieve" => "view",
            "delete" => "delete",
            _ => return false,
        };
        acteur.has_perm(&format!("{}_{}", prefixe, ressource))
    }

    /// Règle objet: le détenteur du codename "acces_all" agit sur tout
    /// enregistrement; sinon l'enregistrement doit appartenir à l'acteur.
    pub fn peut_acceder_objet(acteur: &Acteur, acces_all: &str, proprietaire_user_id: i32) -> bool {
        acteur.has_perm(acces_all) || acteur.user_id == proprietaire_user_id
    }

    /// Variante Result pour les handlers: 403 avec message si refusé
    pub fn exiger(acteur: &Acteur, action: &str, ressource: &str) -> Result<(), ApiError> {
        if Self::autorise(acteur, action, ressource) {
            return Ok(());
        }
        Err(ApiError::Interdit(
            "Vous n'avez pas la permission d'effectuer cette action.".to_string(),
        ))
    }

    pub fn exiger_codename(acteur: &Acteur, codename: &str) -> Result<(), ApiError> {
        if acteur.has_perm(codename) {
            return Ok(());
        }
        Err(ApiError::Interdit(
            "Vous n'avez pas la permission d'effectuer cette action.".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acteur_avec(perms: &[&str]) -> Acteur {
        Acteur::new(1, "test".into(), perms.iter().map(|p| p.to_string()))
    }

    #[test]
    fn test_autorise_par_codename() {
        let acteur = acteur_avec(&["add_conge", "view_conge"]);
        assert!(PermissionService::autorise(&acteur, "create", "conge"));
        assert!(PermissionService::autorise(&acteur, "list", "conge"));
        assert!(PermissionService::autorise(&acteur, "retrieve", "conge"));
        assert!(!PermissionService::autorise(&acteur, "update", "conge"));
        assert!(!PermissionService::autorise(&acteur, "delete", "conge"));
    }

    #[test]
    fn test_action_inconnue_refusee() {
        let acteur = acteur_avec(PERMISSIONS_CONNUES);
        assert!(!PermissionService::autorise(&acteur, "approve", "conge"));
        assert!(!PermissionService::autorise(&acteur, "", "conge"));
    }

    #[test]
    fn test_sans_permission_refuse() {
        let acteur = acteur_avec(&[]);
        assert!(!PermissionService::autorise(&acteur, "create", "employee"));
        assert!(PermissionService::exiger(&acteur, "create", "employee").is_err());
    }

    #[test]
    fn test_regle_objet() {
        let direction = acteur_avec(&["acces_all_conge"]);
        let employe = acteur_avec(&[]);

        // acces_all: tout enregistrement
        assert!(PermissionService::peut_acceder_objet(&direction, "acces_all_conge", 99));
        // sinon: seulement ses propres enregistrements
        assert!(PermissionService::peut_acceder_objet(&employe, "acces_all_conge", 1));
        assert!(!PermissionService::peut_acceder_objet(&employe, "acces_all_conge", 2));
    }
}
