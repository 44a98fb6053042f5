// src/noyau/format.rs
//
// Affichage lisible d’un résultat (valeur ou erreur positionnée).

use super::resultat::{Erreur, Portee, Resultat};

/// Chiffres significatifs affichés (équivalent de "%.10g").
const CHIFFRES_SIGNIFICATIFS: usize = 10;

/* ------------------------ Valeurs ------------------------ */

fn retire_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Valeur sur 10 chiffres significatifs, zéros finaux retirés.
/// Notation scientifique si l’exposant est < -4 ou >= 10.
pub fn format_valeur(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    if v == 0.0 {
        return "0".to_string();
    }

    // l’exposant est lu APRÈS arrondi (9.9999999999 -> 1e1)
    let sci = format!("{:.*e}", CHIFFRES_SIGNIFICATIFS - 1, v);
    let (mantisse, exposant) = match sci.split_once('e') {
        Some(parts) => parts,
        None => return sci,
    };
    let exposant: i32 = match exposant.parse() {
        Ok(e) => e,
        Err(_) => return sci,
    };

    if exposant < -4 || exposant >= CHIFFRES_SIGNIFICATIFS as i32 {
        return format!("{}e{exposant}", retire_zeros(mantisse));
    }

    let decimales = (CHIFFRES_SIGNIFICATIFS as i32 - 1 - exposant).max(0) as usize;
    let fixe = format!("{:.*}", decimales, v);
    retire_zeros(&fixe).to_string()
}

/* ------------------------ Erreurs ------------------------ */

/// Ligne de soulignement sous la portée fautive (au moins un ^).
pub fn souligne(expression: &str, portee: Portee) -> String {
    let debut = portee.position.min(expression.len());
    let avant = expression.get(..debut).map_or(debut, |s| s.chars().count());
    let fin = portee.position.saturating_add(portee.longueur).min(expression.len());
    let largeur = expression
        .get(debut..fin)
        .map_or(portee.longueur, |s| s.chars().count())
        .max(1);

    format!("{}{}", " ".repeat(avant), "^".repeat(largeur))
}

pub fn format_erreur(e: &Erreur) -> String {
    let tete = format!("<{e}>");
    match (e.portee(), e.fragment()) {
        (Some(p), Some(fragment)) => {
            format!("{tete} à la position {} : \"{fragment}\"", p.position)
        }
        _ => tete,
    }
}

/// Une ligne par résultat, comme le banc d’essai : "= 3" ou "<erreur ...> à la position P : "…"".
pub fn format_resultat(r: &Resultat) -> String {
    match r {
        Ok(v) => format!("= {}", format_valeur(*v)),
        Err(e) => format_erreur(e),
    }
}
