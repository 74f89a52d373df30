// Export administratif de la base: pg_dump restreint à une liste
// blanche de tables, ou la sentinelle "all" pour la base entière.

use std::env;
use tokio::process::Command;

use crate::errors::ApiError;

pub const TABLE_TOUTES: &str = "all";

pub const TABLES_AUTORISEES: [&str; 4] = ["employee", "paie", "conge", "schedule"];

pub struct ExportService;

impl ExportService {
    pub fn table_autorisee(table: &str) -> bool {
        table == TABLE_TOUTES || TABLES_AUTORISEES.contains(&table)
    }

    pub fn nom_fichier(table: &str) -> String {
        if table == TABLE_TOUTES {
            "full_database_backup.sql".to_string()
        } else {
            format!("{}_backup.sql", table)
        }
    }

    /// Lance pg_dump et retourne le SQL produit. Toute table hors liste
    /// blanche est rejetée avant de lancer le moindre sous-processus.
    pub async fn exporter(table: &str) -> Result<Vec<u8>, ApiError> {
        if !Self::table_autorisee(table) {
            return Err(ApiError::Regle(format!(
                "Table '{}' non autorisée pour l'exportation.",
                table
            )));
        }

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ApiError::Export("DATABASE_URL non défini".to_string()))?;

        let mut commande = Command::new("pg_dump");
        commande.arg(&database_url);
        if table != TABLE_TOUTES {
            commande.arg("--table").arg(table);
        }

        let sortie = commande
            .output()
            .await
            .map_err(|e| ApiError::Export(format!("lancement de pg_dump: {}", e)))?;

        if !sortie.status.success() {
            return Err(ApiError::Export(format!(
                "pg_dump a échoué: {}",
                String::from_utf8_lossy(&sortie.stderr)
            )));
        }

        Ok(sortie.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liste_blanche() {
        assert!(ExportService::table_autorisee("employee"));
        assert!(ExportService::table_autorisee("paie"));
        assert!(ExportService::table_autorisee("conge"));
        assert!(ExportService::table_autorisee("schedule"));
        assert!(ExportService::table_autorisee("all"));
    }

    #[test]
    fn test_tables_refusees() {
        assert!(!ExportService::table_autorisee("auth_user"));
        assert!(!ExportService::table_autorisee("users"));
        assert!(!ExportService::table_autorisee(""));
        assert!(!ExportService::table_autorisee("employee; DROP TABLE users"));
    }

    #[test]
    fn test_nom_fichier() {
        assert_eq!(ExportService::nom_fichier("all"), "full_database_backup.sql");
        assert_eq!(ExportService::nom_fichier("paie"), "paie_backup.sql");
    }
}
