use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};

use crate::errors::ApiError;
use crate::models::dto::{CreateFactureRequest, FactureListResponse, UpdateFactureRequest};
use crate::models::facture;
use crate::services::journal_service::JournalService;
use crate::services::permission_service::Acteur;
use crate::services::reference_service::ReferenceService;
use crate::utils::requete;

// Deux créations concurrentes peuvent lire le même dernier id; la
// contrainte d'unicité sur la référence fait échouer la seconde, qui
// recalcule et réessaie.
const TENTATIVES_REFERENCE: usize = 3;

/// Filtres du listing: année/mois indépendants pour factures et devis
#[derive(Debug, Default)]
pub struct FactureFiltres {
    pub fact_annee: Option<i32>,
    pub fact_mois: Option<u32>,
    pub dev_annee: Option<i32>,
    pub dev_mois: Option<u32>,
}

impl FactureFiltres {
    pub fn depuis_query(query: &str) -> Self {
        FactureFiltres {
            fact_annee: requete::valeur_parsee(query, "fact_annee"),
            fact_mois: requete::valeur_parsee(query, "fact_mois"),
            dev_annee: requete::valeur_parsee(query, "dev_annee"),
            dev_mois: requete::valeur_parsee(query, "dev_mois"),
        }
    }
}

pub struct FactureService;

impl FactureService {
    /// Crée une facture ou un devis avec sa référence séquentielle.
    /// L'insertion et l'entrée d'historique partagent la même
    /// transaction; en cas de collision de référence, la transaction
    /// est rejouée avec une séquence recalculée.
    pub async fn creer(
        db: &DatabaseConnection,
        acteur: &Acteur,
        type_facture: &str,
        request: CreateFactureRequest,
    ) -> Result<facture::Model, ApiError> {
        if request.etat_facture != facture::ETAT_BROUILLON
            && request.etat_facture != facture::ETAT_FINALISEE
        {
            return Err(ApiError::Validation(format!(
                "État de facture inconnu: {}.",
                request.etat_facture
            )));
        }

        let lignes = serde_json::to_value(&request.lignes)
            .map_err(|e| ApiError::Interne(format!("sérialisation des lignes: {}", e)))?;
        let annee = Utc::now().year();

        let mut derniere_collision = None;
        for _ in 0..TENTATIVES_REFERENCE {
            let txn = db.begin().await?;

            let sequence = ReferenceService::prochaine_sequence(&txn).await?;
            let reference = ReferenceService::construire(&request.etat_facture, annee, sequence);

            let insertion = facture::ActiveModel {
                client: Set(request.client.clone()),
                type_facture: Set(type_facture.to_string()),
                etat_facture: Set(request.etat_facture.clone()),
                reference: Set(reference),
                date_facture: Set(request.date_facture),
                services: Set(lignes.clone()),
                created_by_id: Set(Some(acteur.user_id)),
                date_creation: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&txn)
            .await;

            match insertion {
                Ok(modele) => {
                    JournalService::consigner(
                        &txn,
                        acteur,
                        "create",
                        "facture",
                        format!(
                            "Ajout d'un document {} {} pour {}.",
                            modele.type_facture, modele.reference, modele.client
                        ),
                        None,
                    )
                    .await?;
                    txn.commit().await?;
                    return Ok(modele);
                }
                Err(e) => {
                    let _ = txn.rollback().await;
                    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                        tracing::debug!("collision de référence, nouvelle tentative");
                        derniere_collision = Some(e);
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(ApiError::Interne(format!(
            "collisions répétées lors de la génération de référence: {}",
            derniere_collision
                .map(|e| e.to_string())
                .unwrap_or_default()
        )))
    }

    /// Met à jour client, date ou lignes. La référence posée à la
    /// création n'est jamais régénérée.
    pub async fn modifier(
        db: &DatabaseConnection,
        acteur: &Acteur,
        id: i32,
        request: UpdateFactureRequest,
    ) -> Result<facture::Model, ApiError> {
        let existante = facture::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::introuvable("Facture", id))?;

        let reference = existante.reference.clone();
        let mut active: facture::ActiveModel = existante.into();

        if let Some(client) = request.client {
            active.client = Set(client);
        }
        if let Some(date_facture) = request.date_facture {
            active.date_facture = Set(date_facture);
        }
        if let Some(lignes) = request.lignes {
            let json = serde_json::to_value(&lignes)
                .map_err(|e| ApiError::Interne(format!("sérialisation des lignes: {}", e)))?;
            active.services = Set(json);
        }

        let modele = active.update(db).await?;

        if let Err(e) = JournalService::consigner(
            db,
            acteur,
            "update",
            "facture",
            format!("La facture {} a été modifiée.", reference),
            None,
        )
        .await
        {
            tracing::warn!("échec d'écriture du journal: {}", e);
        }

        Ok(modele)
    }

    pub async fn supprimer(
        db: &DatabaseConnection,
        acteur: &Acteur,
        id: i32,
    ) -> Result<(), ApiError> {
        let existante = facture::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::introuvable("Facture", id))?;

        let reference = existante.reference.clone();
        existante.delete(db).await?;

        if let Err(e) = JournalService::consigner(
            db,
            acteur,
            "delete",
            "facture",
            format!("La facture {} a été supprimée.", reference),
            None,
        )
        .await
        {
            tracing::warn!("échec d'écriture du journal: {}", e);
        }

        Ok(())
    }

    /// Factures et devis, filtrés indépendamment par année/mois
    pub async fn lister(
        db: &DatabaseConnection,
        filtres: &FactureFiltres,
    ) -> Result<FactureListResponse, ApiError> {
        let factures =
            Self::lister_type(db, facture::TYPE_FACTURE, filtres.fact_annee, filtres.fact_mois)
                .await?;
        let devis =
            Self::lister_type(db, facture::TYPE_DEVIS, filtres.dev_annee, filtres.dev_mois).await?;

        Ok(FactureListResponse { factures, devis })
    }

    async fn lister_type(
        db: &DatabaseConnection,
        type_facture: &str,
        annee: Option<i32>,
        mois: Option<u32>,
    ) -> Result<Vec<facture::Model>, ApiError> {
        let mut selection = facture::Entity::find()
            .filter(facture::Column::TypeFacture.eq(type_facture))
            .order_by_desc(facture::Column::DateFacture);

        if let Some(a) = annee {
            let debut = NaiveDate::from_ymd_opt(a, 1, 1)
                .ok_or_else(|| ApiError::Validation(format!("Année invalide: {}.", a)))?;
            let fin = NaiveDate::from_ymd_opt(a, 12, 31)
                .ok_or_else(|| ApiError::Validation(format!("Année invalide: {}.", a)))?;
            selection = selection.filter(facture::Column::DateFacture.between(debut, fin));
        }

        let mut liste = selection.all(db).await?;

        // Le filtre mois s'applique toutes années confondues quand
        // l'année n'est pas donnée
        if let Some(m) = mois {
            liste.retain(|f| f.date_facture.month() == m);
        }

        Ok(liste)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filtres_depuis_query() {
        let f = FactureFiltres::depuis_query("fact_annee=2026&fact_mois=3&dev_annee=2025");
        assert_eq!(f.fact_annee, Some(2026));
        assert_eq!(f.fact_mois, Some(3));
        assert_eq!(f.dev_annee, Some(2025));
        assert_eq!(f.dev_mois, None);
    }

    #[test]
    fn test_filtres_vides() {
        let f = FactureFiltres::depuis_query("");
        assert!(f.fact_annee.is_none());
        assert!(f.dev_mois.is_none());
    }
}
