//! Noyau — résultat d’une évaluation.
//!
//! `Ok(valeur)` ou `Erreur` (parsing / évaluation), toujours accompagnée de
//! l’expression normalisée pour que l’appelant puisse découper la portée fautive.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GenreParsing {
    #[error("expression vide")]
    Vide,
    #[error("parenthèses non appariées")]
    ParenthesesNonAppariees,
    #[error("erreur de syntaxe")]
    Syntaxe,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GenreEvaluation {
    #[error("division par zéro")]
    DivisionParZero,
    #[error("valeur courante attendue")]
    ValeurCouranteAttendue,
    #[error("arguments manquants")]
    ArgumentsManquants,
    #[error("nombre imaginaire")]
    NombreImaginaire,
    #[error("jeton inattendu")]
    JetonInattendu,
}

/// Portée fautive dans l’expression normalisée (octets).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Portee {
    pub position: usize,
    pub longueur: usize,
}

impl Portee {
    pub fn new(position: usize, longueur: usize) -> Self {
        Self { position, longueur }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum Erreur {
    #[error("erreur de parsing : {genre}")]
    Parsing {
        genre: GenreParsing,
        expression: String,
        portee: Option<Portee>,
    },

    #[error("erreur d’évaluation : {genre}")]
    Evaluation {
        genre: GenreEvaluation,
        expression: String,
        portee: Option<Portee>,
    },
}

pub type Resultat = Result<f64, Erreur>;

impl Erreur {
    pub fn parsing(genre: GenreParsing, expression: &str, portee: Option<Portee>) -> Self {
        Erreur::Parsing {
            genre,
            expression: expression.to_string(),
            portee,
        }
    }

    pub fn evaluation(genre: GenreEvaluation, expression: &str, portee: Option<Portee>) -> Self {
        Erreur::Evaluation {
            genre,
            expression: expression.to_string(),
            portee,
        }
    }

    /// Expression normalisée (espaces compressés, minuscules).
    pub fn expression(&self) -> &str {
        match self {
            Erreur::Parsing { expression, .. } | Erreur::Evaluation { expression, .. } => expression,
        }
    }

    pub fn portee(&self) -> Option<Portee> {
        match self {
            Erreur::Parsing { portee, .. } | Erreur::Evaluation { portee, .. } => *portee,
        }
    }

    /// Texte fautif, borné à l’expression. `None` si aucune portée.
    pub fn fragment(&self) -> Option<&str> {
        let p = self.portee()?;
        let s = self.expression();
        let debut = p.position.min(s.len());
        let fin = p.position.saturating_add(p.longueur).min(s.len());
        s.get(debut..fin)
    }
}
