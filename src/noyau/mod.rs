//! Noyau flottant
//!
//! Organisation interne :
//! - operateurs.rs : table des opérateurs (précédence, associativité, arité) + application
//! - jetons.rs     : normalisation, validation, tokenisation (unaire/binaire)
//! - rpn.rs        : shunting-yard évalué sur place
//! - resultat.rs   : Resultat / Erreur positionnée
//! - format.rs     : affichage lisible d’un résultat
//! - eval.rs       : pipeline complet

pub mod eval;
pub mod format;
pub mod jetons;
pub mod operateurs;
pub mod resultat;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique
pub use eval::{demarche, evaluate, evaluate_avec_courant, Calcul, Demarche, Evaluateur, Options};
pub use resultat::{Erreur, GenreEvaluation, GenreParsing, Portee, Resultat};
