// Export PDF d'une fiche de paie. La composition est directe (printpdf),
// la mise en page est fixe: en-tête, identité du salarié, rubriques de
// rémunération, net à payer.

use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::io::BufWriter;

use crate::errors::ApiError;
use crate::models::{employee, paie};

pub struct PdfService;

impl PdfService {
    /// Nom d'attachement déterministe: fiche_de_paie_de_<nom>_<prenom>_<mois>.pdf
    pub fn nom_fichier(nom: &str, prenom: &str, mois: &str) -> String {
        format!("fiche_de_paie_de_{}_{}_{}.pdf", nom, prenom, mois)
    }

    /// Rend la fiche en flux d'octets PDF (A4 portrait)
    pub fn generer_fiche_de_paie(
        fiche: &paie::Model,
        salarie: &employee::Model,
    ) -> Result<Vec<u8>, ApiError> {
        let (document, page, calque) =
            PdfDocument::new("Fiche de paie", Mm(210.0), Mm(297.0), "contenu");

        let police = document
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ApiError::Pdf(e.to_string()))?;
        let police_grasse = document
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ApiError::Pdf(e.to_string()))?;

        let contenu = document.get_page(page).get_layer(calque);

        contenu.use_text("FICHE DE PAIE", 18.0, Mm(20.0), Mm(270.0), &police_grasse);
        contenu.use_text(
            format!("Période : {} {}", fiche.mois, fiche.annee),
            11.0,
            Mm(20.0),
            Mm(260.0),
            &police,
        );

        contenu.use_text(
            format!("Salarié : {} {}", salarie.nom, salarie.prenom),
            11.0,
            Mm(20.0),
            Mm(245.0),
            &police,
        );
        if let Some(type_contrat) = &salarie.type_contrat {
            contenu.use_text(
                format!("Contrat : {}", type_contrat),
                11.0,
                Mm(20.0),
                Mm(238.0),
                &police,
            );
        }
        if let Some(date_embauche) = salarie.date_embauche {
            contenu.use_text(
                format!("Date d'embauche : {}", date_embauche),
                11.0,
                Mm(20.0),
                Mm(231.0),
                &police,
            );
        }

        contenu.use_text("Rubrique", 11.0, Mm(20.0), Mm(210.0), &police_grasse);
        contenu.use_text("Montant", 11.0, Mm(150.0), Mm(210.0), &police_grasse);

        let rubriques = [
            ("Salaire de base", fiche.salaire_base),
            ("Primes", fiche.primes),
            ("Retenues", fiche.retenues),
        ];
        let mut ligne_y = 200.0;
        for (libelle, montant) in rubriques {
            contenu.use_text(libelle, 11.0, Mm(20.0), Mm(ligne_y), &police);
            contenu.use_text(format!("{}", montant), 11.0, Mm(150.0), Mm(ligne_y), &police);
            ligne_y -= 8.0;
        }

        contenu.use_text(
            format!("Net à payer : {}", fiche.salaire_net),
            13.0,
            Mm(20.0),
            Mm(ligne_y - 10.0),
            &police_grasse,
        );

        let mut tampon = Vec::new();
        document
            .save(&mut BufWriter::new(&mut tampon))
            .map_err(|e| ApiError::Pdf(e.to_string()))?;

        Ok(tampon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nom_fichier_deterministe() {
        assert_eq!(
            PdfService::nom_fichier("Dupont", "Marie", "Janvier"),
            "fiche_de_paie_de_Dupont_Marie_Janvier.pdf"
        );
    }
}
