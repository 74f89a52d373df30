// Couche d'effets de bord: chaque mutation réussie d'une entité suivie
// produit exactement une entrée d'historique et, quand un utilisateur
// affecté distinct existe, une notification avec sa ligne d'état de
// lecture. Les fonctions sont génériques sur ConnectionTrait: un
// appelant qui tient une transaction y inscrit le journal dans la même
// portée transactionnelle; les autres consignent après coup, au mieux.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, Set};

use crate::models::{historique, notification, user_notification, users};
use crate::services::permission_service::Acteur;

pub struct JournalService;

impl JournalService {
    /// Ajoute une entrée d'historique (insertion seule)
    pub async fn consigner<C: ConnectionTrait>(
        db: &C,
        acteur: &Acteur,
        action: &str,
        categorie: &str,
        consequence: String,
        utilisateur_affecte_id: Option<i32>,
    ) -> Result<(), DbErr> {
        historique::ActiveModel {
            utilisateur_id: Set(acteur.user_id),
            action: Set(action.to_string()),
            consequence: Set(consequence),
            utilisateur_affecte_id: Set(utilisateur_affecte_id),
            categorie: Set(categorie.to_string()),
            date_action: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(())
    }

    /// Crée une notification et sa ligne d'état de lecture pour un
    /// destinataire
    pub async fn notifier<C: ConnectionTrait>(
        db: &C,
        acteur: &Acteur,
        type_notification: Option<&str>,
        message: String,
        destinataire_id: i32,
    ) -> Result<(), DbErr> {
        let notif = notification::ActiveModel {
            user_action_id: Set(acteur.user_id),
            notification_type: Set(type_notification.map(|t| t.to_string())),
            message: Set(message),
            date_created: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        user_notification::ActiveModel {
            notification_id: Set(notif.id),
            user_affected_id: Set(destinataire_id),
            is_read: Set(false),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(())
    }

    /// Notification globale: une ligne d'état de lecture par utilisateur
    pub async fn notifier_tous<C: ConnectionTrait>(
        db: &C,
        acteur: &Acteur,
        message: String,
    ) -> Result<(), DbErr> {
        let notif = notification::ActiveModel {
            user_action_id: Set(acteur.user_id),
            notification_type: Set(None),
            message: Set(message),
            date_created: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        for user in users::Entity::find().all(db).await? {
            user_notification::ActiveModel {
                notification_id: Set(notif.id),
                user_affected_id: Set(user.id),
                is_read: Set(false),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }

        Ok(())
    }

    /// Historique + notification du destinataire en un appel
    pub async fn consigner_et_notifier<C: ConnectionTrait>(
        db: &C,
        acteur: &Acteur,
        action: &str,
        categorie: &str,
        consequence: String,
        utilisateur_affecte_id: Option<i32>,
        type_notification: Option<&str>,
        message_notification: String,
    ) -> Result<(), DbErr> {
        Self::consigner(db, acteur, action, categorie, consequence, utilisateur_affecte_id).await?;

        if let Some(destinataire) = utilisateur_affecte_id {
            Self::notifier(db, acteur, type_notification, message_notification, destinataire).await?;
        }

        Ok(())
    }

    /// Variante après-coup pour les mutations déjà validées hors
    /// transaction: l'échec du journal n'annule pas la mutation, il est
    /// journalisé puis avalé
    pub async fn consigner_apres_coup<C: ConnectionTrait>(
        db: &C,
        acteur: &Acteur,
        action: &str,
        categorie: &str,
        consequence: String,
        utilisateur_affecte_id: Option<i32>,
        type_notification: Option<&str>,
        message_notification: String,
    ) {
        if let Err(e) = Self::consigner_et_notifier(
            db,
            acteur,
            action,
            categorie,
            consequence,
            utilisateur_affecte_id,
            type_notification,
            message_notification,
        )
        .await
        {
            tracing::warn!("échec d'écriture du journal ({} / {}): {}", action, categorie, e);
        }
    }
}
