// src/noyau/rpn.rs
//
// Shunting-yard -> postfixe évalué sur place
// Objectif:
// - Parcourir les jetons une seule fois
// - Appliquer chaque opérateur dès qu’il sort de la pile (pas de liste RPN intermédiaire)
//
// Règles de dépilement (opérateur entrant `e`, sommet `s`) :
// - e gauche : dépile tant que prec(e) <= prec(s)
// - e droite : dépile tant que prec(e) <  prec(s)
// Les parenthèses ont la précédence 0 : aucun opérateur ne les fait sortir.

use super::eval::Options;
use super::jetons::{GenreJeton, Jeton};
use super::operateurs::{Assoc, OpKind, TableOperateurs};
use super::resultat::{GenreEvaluation, GenreParsing, Portee};

/// Échec interne du moteur, converti en `Erreur` par `eval.rs`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Echec {
    Parsing(GenreParsing, Option<Portee>),
    Evaluation(GenreEvaluation, Option<Portee>),
}

pub struct Moteur<'t, 'a> {
    table: &'t TableOperateurs,
    options: Options,
    courant: Option<f64>,
    valeurs: Vec<f64>,
    pile: Vec<Jeton<'a>>,
}

impl<'t, 'a> Moteur<'t, 'a> {
    pub fn new(table: &'t TableOperateurs, options: Options, courant: Option<f64>) -> Self {
        Self {
            table,
            options,
            courant,
            valeurs: Vec::new(),
            pile: Vec::new(),
        }
    }

    /// Consomme tous les jetons et retourne la valeur finale.
    pub fn execute(mut self, jetons: &[Jeton<'a>]) -> Result<f64, Echec> {
        for jeton in jetons {
            self.pousse(*jeton)?;
        }
        self.termine()
    }

    fn pousse(&mut self, jeton: Jeton<'a>) -> Result<(), Echec> {
        let kind = match jeton.genre {
            GenreJeton::Nombre(v) => {
                self.valeurs.push(v);
                return Ok(());
            }
            GenreJeton::Operateur(k) => k,
        };

        match kind {
            OpKind::ParenL => self.pile.push(jeton),
            OpKind::ParenR => self.ferme_parenthese(jeton)?,
            _ => {
                let entrant = *self.table.lookup(kind);
                while let Some(sommet) = self.pile.last() {
                    let haut = *self.table.lookup(sommet.op().unwrap_or(OpKind::Null));
                    let sort = match entrant.assoc {
                        Assoc::Gauche => entrant.precedence <= haut.precedence,
                        Assoc::Droite => entrant.precedence < haut.precedence,
                        Assoc::Aucune => false,
                    };
                    if !sort {
                        break;
                    }
                    self.applique_sommet()?;
                }
                self.pile.push(jeton);
            }
        }
        Ok(())
    }

    fn ferme_parenthese(&mut self, fermante: Jeton<'a>) -> Result<(), Echec> {
        let desequilibre = Echec::Parsing(GenreParsing::ParenthesesNonAppariees, Some(fermante.portee()));

        loop {
            match self.pile.last().and_then(Jeton::op) {
                None => return Err(desequilibre),
                Some(OpKind::ParenL) => {
                    self.pile.pop();
                    return Ok(());
                }
                Some(_) => self.applique_sommet()?,
            }
        }
    }

    /// Fin des jetons : vide la pile d’opérateurs puis contrôle le nombre d’opérandes.
    fn termine(mut self) -> Result<f64, Echec> {
        while let Some(sommet) = self.pile.last() {
            if sommet.op() == Some(OpKind::ParenL) {
                // parenthèse jamais fermée
                return Err(Echec::Parsing(
                    GenreParsing::ParenthesesNonAppariees,
                    Some(sommet.portee()),
                ));
            }
            self.applique_sommet()?;
        }

        match self.valeurs.as_slice() {
            [] => Err(Echec::Parsing(GenreParsing::Vide, None)),
            [v] => Ok(*v),
            // plusieurs opérandes sans opérateur : aucun jeton précis à blâmer
            _ => Err(Echec::Parsing(GenreParsing::Syntaxe, None)),
        }
    }

    /// Pop-and-evaluate : retire le sommet et l’applique sur la pile de valeurs.
    fn applique_sommet(&mut self) -> Result<(), Echec> {
        let Some(jeton) = self.pile.pop() else {
            return Ok(());
        };

        let portee = Some(jeton.portee());
        let op = match jeton.op() {
            Some(k) => self.table.lookup(k),
            None => self.table.null_operator(),
        };

        op.eval(&mut self.valeurs, self.options, self.courant)
            .map_err(|genre| Echec::Evaluation(genre, portee))
    }
}
