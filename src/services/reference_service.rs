use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};

use crate::errors::ApiError;
use crate::models::facture;

pub struct ReferenceService;

impl ReferenceService {
    /// Construit la référence d'une facture ou d'un devis.
    /// Brouillon: (FPROV<annee>-<seq>), finalisée: F<annee>-<seq>,
    /// séquence sur 6 chiffres. Jamais régénérée une fois posée.
    pub fn construire(etat_facture: &str, annee: i32, sequence: i64) -> String {
        if etat_facture == facture::ETAT_BROUILLON {
            format!("(FPROV{}-{:06})", annee, sequence)
        } else {
            format!("F{}-{:06}", annee, sequence)
        }
    }

    /// Prochaine séquence: dernier id persisté + 1.
    /// Échoue explicitement quand aucune facture n'existe encore,
    /// plutôt que de retomber silencieusement sur une valeur par défaut.
    pub async fn prochaine_sequence<C: ConnectionTrait>(db: &C) -> Result<i64, ApiError> {
        let derniere = facture::Entity::find()
            .order_by_desc(facture::Column::Id)
            .one(db)
            .await?;

        match derniere {
            Some(f) => Ok(i64::from(f.id) + 1),
            None => Err(ApiError::Interne(
                "aucune facture existante: impossible de déterminer la prochaine séquence".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_finalisee() {
        assert_eq!(
            ReferenceService::construire(facture::ETAT_FINALISEE, 2026, 42),
            "F2026-000042"
        );
    }

    #[test]
    fn test_format_brouillon() {
        assert_eq!(
            ReferenceService::construire(facture::ETAT_BROUILLON, 2026, 42),
            "(FPROV2026-000042)"
        );
    }

    #[test]
    fn test_sequence_sur_six_chiffres() {
        assert_eq!(
            ReferenceService::construire(facture::ETAT_FINALISEE, 2025, 1234567),
            "F2025-1234567"
        );
        assert_eq!(
            ReferenceService::construire(facture::ETAT_FINALISEE, 2025, 7),
            "F2025-000007"
        );
    }

    #[test]
    fn test_references_croissantes() {
        // À séquence croissante, l'ordre lexicographique suit pour une
        // même année
        let a = ReferenceService::construire(facture::ETAT_FINALISEE, 2026, 10);
        let b = ReferenceService::construire(facture::ETAT_FINALISEE, 2026, 11);
        assert!(a < b);
        assert_ne!(a, b);
    }
}
