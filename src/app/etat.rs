//! src/app/etat.rs
//!
//! État UI (sans vue, sans évaluation).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, valeur courante,
//! démarche, historique) et offrir des opérations simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici : on reçoit un Calcul ou une Erreur du noyau, on les met en forme.
//! - Actions déterministes, sans effet de bord caché.
//! - Historique borné.

use calculatrice_flottante::noyau::format::{format_erreur, format_resultat, format_valeur, souligne};
use calculatrice_flottante::noyau::{Calcul, Demarche, Erreur, Options, Resultat};

/// Garde-fou : nombre de lignes gardées dans l’historique.
const HISTORIQUE_MAX: usize = 50;

#[derive(Clone, Default, Debug, PartialEq)]
pub struct ErreurUi {
    pub message: String,
    /// Expression normalisée + ligne de ^ sous la portée fautive (vide si aucune portée).
    pub expression: String,
    pub soulignement: String,
}

impl ErreurUi {
    pub fn depuis(e: &Erreur) -> Self {
        Self {
            message: format_erreur(e),
            expression: e.expression().to_string(),
            soulignement: e
                .portee()
                .map(|p| souligne(e.expression(), p))
                .unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String,
    pub erreur: Option<ErreurUi>,

    // --- valeur courante (dernier résultat) : alimente % et x ---
    pub courant: Option<f64>,

    // --- démarche + historique ---
    pub demarche: Demarche,
    pub historique: Vec<String>,

    // --- paramètres ---
    pub degres: bool,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            erreur: None,
            courant: None,
            demarche: Demarche::default(),
            historique: Vec::new(),
            degres: Options::default().use_degrees,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    pub fn options(&self) -> Options {
        Options {
            use_degrees: self.degres,
        }
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + valeur courante + historique).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.courant = None;
        self.historique.clear();
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + erreur + démarche (la valeur courante reste).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur = None;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// On CONSERVE le dernier résultat et la valeur courante : une faute n’efface pas l’écran.
    pub fn set_erreur(&mut self, erreur: &Erreur) {
        self.historise(&Err(erreur.clone()));
        self.erreur = Some(ErreurUi::depuis(erreur));
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Dépose un résultat : il devient la valeur courante et entre dans l’historique.
    pub fn set_resultat(&mut self, calcul: Calcul) {
        self.historise(&Ok(calcul.valeur));

        self.erreur = None;
        self.resultat = format_valeur(calcul.valeur);
        self.courant = Some(calcul.valeur);
        self.demarche = calcul.demarche;
        self.focus_entree = true;
    }

    /// Une ligne par évaluation : "entrée = v" ou "entrée <erreur> à la position P : ...".
    fn historise(&mut self, r: &Resultat) {
        self.historique
            .push(format!("{} {}", self.entree.trim(), format_resultat(r)));
        if self.historique.len() > HISTORIQUE_MAX {
            let trop = self.historique.len() - HISTORIQUE_MAX;
            self.historique.drain(..trop);
        }
    }
}
