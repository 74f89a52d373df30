// Extraction des paramètres de filtre depuis la query string.
// Certains filtres sont répétables (departement=1&departement=2) et ne
// passent donc pas par web::Query.

use url::form_urlencoded;

/// Première valeur du paramètre `cle`, si présente et non vide
pub fn valeur(query: &str, cle: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, v)| k == cle && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}

/// Première valeur du paramètre `cle`, parsée
pub fn valeur_parsee<T: std::str::FromStr>(query: &str, cle: &str) -> Option<T> {
    valeur(query, cle).and_then(|v| v.parse().ok())
}

/// Toutes les occurrences du paramètre `cle`, parsées en identifiants.
/// Les valeurs non numériques sont ignorées.
pub fn valeurs_multiples(query: &str, cle: &str) -> Vec<i32> {
    form_urlencoded::parse(query.as_bytes())
        .filter(|(k, _)| k == cle)
        .filter_map(|(_, v)| v.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valeur_simple() {
        let q = "nom=Dupont&statut=T";
        assert_eq!(valeur(q, "nom").as_deref(), Some("Dupont"));
        assert_eq!(valeur(q, "statut").as_deref(), Some("T"));
        assert_eq!(valeur(q, "absent"), None);
        assert_eq!(valeur("nom=", "nom"), None);
    }

    #[test]
    fn test_valeurs_repetees() {
        let q = "departement=1&departement=2&competence=5";
        assert_eq!(valeurs_multiples(q, "departement"), vec![1, 2]);
        assert_eq!(valeurs_multiples(q, "competence"), vec![5]);
        assert!(valeurs_multiples(q, "poste").is_empty());
    }

    #[test]
    fn test_valeurs_invalides_ignorees() {
        assert_eq!(valeurs_multiples("poste=abc&poste=3", "poste"), vec![3]);
    }

    #[test]
    fn test_valeur_encodee() {
        assert_eq!(valeur("nom=L%C3%A9on", "nom").as_deref(), Some("Léon"));
    }
}
