//! Calculatrice flottante : noyau d’évaluation infixe (shunting-yard, f64).
//!
//! La bibliothèque expose le noyau seul ; l’interface eframe vit dans le binaire.

pub mod noyau;
