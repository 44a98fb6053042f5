// src/noyau/operateurs.rs
//
// Table des opérateurs
// --------------------
// - OpKind : ensemble fermé, discriminant dense (= index dans la table)
// - Operateur : associativité, précédence, arité, nom (diagnostic seulement)
// - TableOperateurs : construite une seule fois (const), lecture seule ensuite
// - Operateur::eval : application sur la pile de valeurs (match exhaustif)
//
// Bandes de précédence (croissantes) :
//   parenthèses(0) < +/-(10) < * /(20) < % x(30) < trig(40) < ^(90) < unaires(100) < constantes(200)

use num_traits::FloatConst;

use super::eval::Options;
use super::resultat::GenreEvaluation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assoc {
    Aucune,
    Gauche,
    Droite,
}

/// Genre d’opérateur. L’ordre des variantes est l’ordre de `TableOperateurs`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
    ParenL,
    ParenR,

    Add,
    Subtract,
    Multiply,
    Divide,

    Percentage,
    Times,

    Sine,
    Cosine,
    Tangent,
    Cosecant,
    Secant,
    Cotangent,

    Exponent,

    UnaryMinus,
    UnaryPlus,

    E,
    Pi,
    Tau,

    Null,
}

impl OpKind {
    pub const COUNT: usize = 21;

    pub const ALL: [OpKind; OpKind::COUNT] = [
        OpKind::ParenL,
        OpKind::ParenR,
        OpKind::Add,
        OpKind::Subtract,
        OpKind::Multiply,
        OpKind::Divide,
        OpKind::Percentage,
        OpKind::Times,
        OpKind::Sine,
        OpKind::Cosine,
        OpKind::Tangent,
        OpKind::Cosecant,
        OpKind::Secant,
        OpKind::Cotangent,
        OpKind::Exponent,
        OpKind::UnaryMinus,
        OpKind::UnaryPlus,
        OpKind::E,
        OpKind::Pi,
        OpKind::Tau,
        OpKind::Null,
    ];

    fn trig(self) -> Option<TrigFn> {
        match self {
            OpKind::Sine => Some(TrigFn::Sin),
            OpKind::Cosine => Some(TrigFn::Cos),
            OpKind::Tangent => Some(TrigFn::Tan),
            OpKind::Cosecant => Some(TrigFn::Csc),
            OpKind::Secant => Some(TrigFn::Sec),
            OpKind::Cotangent => Some(TrigFn::Cot),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
    Csc,
    Sec,
    Cot,
}

impl TrigFn {
    /// Applique la fonction sur un angle en radians.
    /// Aucun traitement de domaine : tan(π/2) donne un très grand flottant.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            TrigFn::Sin => x.sin(),
            TrigFn::Cos => x.cos(),
            TrigFn::Tan => x.tan(),
            TrigFn::Csc => 1.0 / x.sin(),
            TrigFn::Sec => 1.0 / x.cos(),
            TrigFn::Cot => 1.0 / x.tan(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operateur {
    pub kind: OpKind,
    pub assoc: Assoc,
    pub precedence: i32,
    pub arite: usize,
    pub nom: &'static str,
}

const fn op(kind: OpKind, assoc: Assoc, precedence: i32, arite: usize, nom: &'static str) -> Operateur {
    Operateur {
        kind,
        assoc,
        precedence,
        arite,
        nom,
    }
}

/// Registre immuable des opérateurs, indexé par `OpKind as usize`.
#[derive(Debug)]
pub struct TableOperateurs {
    defs: [Operateur; OpKind::COUNT],
}

/// Table partagée du processus (construite à la compilation).
pub static TABLE: TableOperateurs = TableOperateurs::new();

impl TableOperateurs {
    pub const fn new() -> Self {
        use Assoc::*;
        use OpKind::*;

        Self {
            defs: [
                op(ParenL, Aucune, 0, 0, "("),
                op(ParenR, Aucune, 0, 0, ")"),
                op(Add, Gauche, 10, 2, "add"),
                op(Subtract, Gauche, 10, 2, "sub"),
                op(Multiply, Gauche, 20, 2, "mul"),
                op(Divide, Gauche, 20, 2, "div"),
                op(Percentage, Gauche, 30, 1, "%"),
                op(Times, Gauche, 30, 1, "x"),
                op(Sine, Droite, 40, 1, "sin"),
                op(Cosine, Droite, 40, 1, "cos"),
                op(Tangent, Droite, 40, 1, "tan"),
                op(Cosecant, Droite, 40, 1, "csc"),
                op(Secant, Droite, 40, 1, "sec"),
                op(Cotangent, Droite, 40, 1, "cot"),
                op(Exponent, Droite, 90, 2, "exp"),
                op(UnaryMinus, Droite, 100, 1, "neg"),
                op(UnaryPlus, Droite, 100, 1, "pos"),
                op(E, Gauche, 200, 0, "e"),
                op(Pi, Gauche, 200, 0, "pi"),
                op(Tau, Gauche, 200, 0, "tau"),
                op(Null, Aucune, -1, 0, "?"),
            ],
        }
    }

    /// Définition d’un genre d’opérateur. Totale : `Null` donne l’opérateur nul.
    pub fn lookup(&self, kind: OpKind) -> &Operateur {
        &self.defs[kind as usize]
    }

    pub fn null_operator(&self) -> &Operateur {
        self.lookup(OpKind::Null)
    }
}

impl Default for TableOperateurs {
    fn default() -> Self {
        Self::new()
    }
}

impl Operateur {
    /// Dépile les opérandes, applique l’opérateur, empile le résultat.
    ///
    /// Binaire : `b` est dépilé d’abord, puis `a` ; on calcule `a <op> b`.
    pub fn eval(
        &self,
        valeurs: &mut Vec<f64>,
        options: Options,
        courant: Option<f64>,
    ) -> Result<(), GenreEvaluation> {
        if valeurs.len() < self.arite {
            return Err(GenreEvaluation::ArgumentsManquants);
        }

        use OpKind::*;

        let r = match self.kind {
            ParenL | ParenR | Null => return Err(GenreEvaluation::JetonInattendu),

            // constantes
            E => f64::E(),
            Pi => f64::PI(),
            Tau => f64::TAU(),

            // unaires
            Sine | Cosine | Tangent | Cosecant | Secant | Cotangent => {
                let v = depile(valeurs)?;
                let f = self.kind.trig().ok_or(GenreEvaluation::JetonInattendu)?;
                f.apply(en_radians(v, options))
            }
            Percentage => {
                let v = depile(valeurs)?;
                v * valeur_courante(courant)? / 100.0
            }
            Times => {
                let v = depile(valeurs)?;
                v * valeur_courante(courant)?
            }
            UnaryMinus => -depile(valeurs)?,
            UnaryPlus => depile(valeurs)?,

            // binaires
            Add | Subtract | Multiply | Divide | Exponent => {
                let b = depile(valeurs)?;
                let a = depile(valeurs)?;
                binaire(self.kind, a, b)?
            }
        };

        tracing::trace!(op = self.nom, valeur = r, "application");
        valeurs.push(r);
        Ok(())
    }
}

fn binaire(kind: OpKind, a: f64, b: f64) -> Result<f64, GenreEvaluation> {
    match kind {
        OpKind::Add => Ok(a + b),
        OpKind::Subtract => Ok(a - b),
        OpKind::Multiply => Ok(a * b),
        OpKind::Divide => {
            if b == 0.0 {
                return Err(GenreEvaluation::DivisionParZero);
            }
            Ok(a / b)
        }
        OpKind::Exponent => {
            // base négative + exposant fractionnaire : pas de réel (inf et NaN passent à powf)
            if a < 0.0 && b.is_finite() && b.fract() != 0.0 {
                return Err(GenreEvaluation::NombreImaginaire);
            }
            Ok(a.powf(b))
        }
        _ => Err(GenreEvaluation::JetonInattendu),
    }
}

fn depile(valeurs: &mut Vec<f64>) -> Result<f64, GenreEvaluation> {
    valeurs.pop().ok_or(GenreEvaluation::ArgumentsManquants)
}

fn valeur_courante(courant: Option<f64>) -> Result<f64, GenreEvaluation> {
    courant
        .filter(|c| !c.is_nan())
        .ok_or(GenreEvaluation::ValeurCouranteAttendue)
}

fn en_radians(v: f64, options: Options) -> f64 {
    if options.use_degrees {
        v * (f64::PI() / 180.0)
    } else {
        v
    }
}
