//! Noyau — évaluation (pipeline réel)
//!
//! normalise -> valide -> tokenize (unaire/binaire) -> shunting-yard évalué sur place -> Resultat
//!
//! Sans état : chaque appel construit ses jetons et ses piles, et les jette au retour.
//! Seule la table des opérateurs est partagée (lecture seule).

use super::jetons::{format_jetons, normalise, tokenize};
use super::operateurs::{TableOperateurs, TABLE};
use super::resultat::{Erreur, GenreParsing, Resultat};
use super::rpn::{Echec, Moteur};

/// Paramètres d’évaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Arguments trig en degrés (sinon radians).
    pub use_degrees: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { use_degrees: true }
    }
}

/// Évaluateur lié à une table d’opérateurs explicite.
#[derive(Clone, Copy, Debug)]
pub struct Evaluateur<'t> {
    table: &'t TableOperateurs,
    options: Options,
}

impl Default for Evaluateur<'static> {
    fn default() -> Self {
        Self::new(&TABLE, Options::default())
    }
}

impl<'t> Evaluateur<'t> {
    pub fn new(table: &'t TableOperateurs, options: Options) -> Self {
        Self { table, options }
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Évalue une expression infixe. `courant` alimente `%` et `x`.
    pub fn evaluate(&self, expression: &str, courant: Option<f64>) -> Resultat {
        self.evaluate_detaille(expression, courant).map(|c| c.valeur)
    }

    /// Comme `evaluate`, en gardant la démarche (normalisée + jetons) du même passage.
    pub fn evaluate_detaille(&self, expression: &str, courant: Option<f64>) -> Result<Calcul, Erreur> {
        let s = normalise(expression);
        tracing::debug!(expression = %s, ?courant, options = ?self.options, "évaluation");

        let jetons = tokenize(&s).map_err(|trou| {
            tracing::debug!(position = trou.position, longueur = trou.longueur, "lexème inconnu");
            Erreur::parsing(GenreParsing::Syntaxe, &s, Some(trou))
        })?;
        let listing = format_jetons(&jetons);
        tracing::trace!(jetons = %listing, "tokenisation");

        let valeur = Moteur::new(self.table, self.options, courant)
            .execute(&jetons)
            .map_err(|echec| {
                let e = match echec {
                    Echec::Parsing(genre, portee) => Erreur::parsing(genre, &s, portee),
                    Echec::Evaluation(genre, portee) => Erreur::evaluation(genre, &s, portee),
                };
                tracing::debug!(erreur = %e, portee = ?e.portee(), "échec");
                e
            })?;

        Ok(Calcul {
            valeur,
            demarche: Demarche {
                normalisee: s,
                jetons: listing,
            },
        })
    }
}

/// API publique : évalue avec la table partagée.
pub fn evaluate(expression: &str, options: Options, courant: Option<f64>) -> Resultat {
    Evaluateur::new(&TABLE, options).evaluate(expression, courant)
}

/// Même chose, valeur courante en premier.
pub fn evaluate_avec_courant(expression: &str, courant: f64, options: Options) -> Resultat {
    evaluate(expression, options, Some(courant))
}

/// Démarche affichable : expression normalisée + jetons résolus.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    pub normalisee: String,
    pub jetons: String,
}

/// Succès détaillé : la valeur et la démarche qui y mène.
#[derive(Clone, Debug, PartialEq)]
pub struct Calcul {
    pub valeur: f64,
    pub demarche: Demarche,
}

/// Calcule la démarche sans évaluer. Même erreur de syntaxe que `evaluate`.
pub fn demarche(expression: &str) -> Result<Demarche, Erreur> {
    let s = normalise(expression);
    let jetons = tokenize(&s).map_err(|trou| Erreur::parsing(GenreParsing::Syntaxe, &s, Some(trou)))?;
    let jetons = format_jetons(&jetons);
    Ok(Demarche {
        normalisee: s,
        jetons,
    })
}
