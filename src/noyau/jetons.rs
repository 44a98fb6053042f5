// src/noyau/jetons.rs
//
// Normalisation + validation + tokenisation
// -----------------------------------------
// Grammaire fermée des lexèmes (après normalisation) :
// - nombres      : \d*\.?\d+(e[+-]?\d+)?
// - opérateurs   : ( ) + - * / ^ % x
// - mots-clés    : cos sin tan cot csc sec e pi tau
// - séparateur   : espace (ou simple adjacence)
//
// Les positions sont des offsets en octets dans la chaîne normalisée.
// Tous les lexèmes sont ASCII : un trou commence et finit toujours sur une frontière de caractère.

use super::operateurs::{OpKind, TABLE};
use super::resultat::Portee;

/// Blancs compressés en un seul espace.
const BLANCS: [char; 6] = [' ', '\t', '\n', '\r', '\x0C', '\x0B'];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GenreJeton {
    Nombre(f64),
    Operateur(OpKind),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Jeton<'a> {
    pub texte: &'a str,
    pub position: usize,
    pub genre: GenreJeton,
}

impl Jeton<'_> {
    pub fn portee(&self) -> Portee {
        Portee::new(self.position, self.texte.len())
    }

    pub fn op(&self) -> Option<OpKind> {
        match self.genre {
            GenreJeton::Operateur(k) => Some(k),
            GenreJeton::Nombre(_) => None,
        }
    }
}

/// Lexème reconnu avant résolution unaire/binaire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Symbole {
    ParenL,
    ParenR,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Caret,
    Percent,
    X,
    Cos,
    Sin,
    Tan,
    Cot,
    Csc,
    Sec,
    E,
    Pi,
    Tau,
}

impl Symbole {
    /// `+`/`-` deviennent unaires quand le jeton de gauche est un bord.
    fn resout(self, bord: bool) -> OpKind {
        match self {
            Symbole::ParenL => OpKind::ParenL,
            Symbole::ParenR => OpKind::ParenR,
            Symbole::Plus if bord => OpKind::UnaryPlus,
            Symbole::Plus => OpKind::Add,
            Symbole::Minus if bord => OpKind::UnaryMinus,
            Symbole::Minus => OpKind::Subtract,
            Symbole::Asterisk => OpKind::Multiply,
            Symbole::Slash => OpKind::Divide,
            Symbole::Caret => OpKind::Exponent,
            Symbole::Percent => OpKind::Percentage,
            Symbole::X => OpKind::Times,
            Symbole::Cos => OpKind::Cosine,
            Symbole::Sin => OpKind::Sine,
            Symbole::Tan => OpKind::Tangent,
            Symbole::Cot => OpKind::Cotangent,
            Symbole::Csc => OpKind::Cosecant,
            Symbole::Sec => OpKind::Secant,
            Symbole::E => OpKind::E,
            Symbole::Pi => OpKind::Pi,
            Symbole::Tau => OpKind::Tau,
        }
    }
}

/// Ordre = priorité d’essai (premier qui correspond).
const MOTS_CLES: [(&str, Symbole); 9] = [
    ("cos", Symbole::Cos),
    ("sin", Symbole::Sin),
    ("tan", Symbole::Tan),
    ("cot", Symbole::Cot),
    ("csc", Symbole::Csc),
    ("sec", Symbole::Sec),
    ("e", Symbole::E),
    ("pi", Symbole::Pi),
    ("tau", Symbole::Tau),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lexeme {
    Nombre,
    Symbole(Symbole),
    Espace,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Morceau {
    Lexeme(Lexeme, Portee),
    Trou(Portee),
}

/// Compresse les blancs et passe en minuscules (ASCII : les offsets restent stables).
pub fn normalise(entree: &str) -> String {
    let mut out = String::with_capacity(entree.len());
    let mut dans_blanc = false;

    for c in entree.chars() {
        if BLANCS.contains(&c) {
            if !dans_blanc {
                out.push(' ');
            }
            dans_blanc = true;
        } else {
            out.push(c.to_ascii_lowercase());
            dans_blanc = false;
        }
    }

    out
}

/// Premier trou (portion non reconnue) de la chaîne normalisée.
pub fn valide(s: &str) -> Result<(), Portee> {
    match Decoupeur::new(s).find_map(|m| match m {
        Morceau::Trou(p) => Some(p),
        Morceau::Lexeme(..) => None,
    }) {
        Some(trou) => Err(trou),
        None => Ok(()),
    }
}

/// Tokenize une chaîne normalisée.
///
/// La résolution unaire/binaire est un pli sur les lexèmes avec un accumulateur `bord` :
/// vrai au départ, vrai après tout opérateur sauf `)`, faux après un nombre ou `)`.
pub fn tokenize(s: &str) -> Result<Vec<Jeton<'_>>, Portee> {
    valide(s)?;

    Decoupeur::new(s)
        .filter_map(|m| match m {
            Morceau::Lexeme(Lexeme::Espace, _) | Morceau::Trou(_) => None,
            Morceau::Lexeme(l, p) => Some((l, p)),
        })
        .scan(true, |bord, (lexeme, portee)| {
            let texte = &s[portee.position..portee.position + portee.longueur];

            let genre = match lexeme {
                Lexeme::Symbole(sym) => Ok(GenreJeton::Operateur(sym.resout(*bord))),
                _ => texte
                    .parse::<f64>()
                    .map(GenreJeton::Nombre)
                    .map_err(|_| portee),
            };

            *bord = matches!(genre, Ok(GenreJeton::Operateur(k)) if k != OpKind::ParenR);

            Some(genre.map(|genre| Jeton {
                texte,
                position: portee.position,
                genre,
            }))
        })
        .collect()
}

/// Liste de jetons en texte (nombres tels que saisis, opérateurs par leur nom).
pub fn format_jetons(jetons: &[Jeton<'_>]) -> String {
    jetons
        .iter()
        .map(|j| match j.genre {
            GenreJeton::Nombre(_) => j.texte,
            GenreJeton::Operateur(k) => TABLE.lookup(k).nom,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/* ------------------------ Découpage ------------------------ */

struct Decoupeur<'a> {
    s: &'a [u8],
    i: usize,
}

impl<'a> Decoupeur<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            s: s.as_bytes(),
            i: 0,
        }
    }
}

impl Iterator for Decoupeur<'_> {
    type Item = Morceau;

    fn next(&mut self) -> Option<Morceau> {
        if self.i >= self.s.len() {
            return None;
        }

        let debut = self.i;
        if let Some((lexeme, n)) = reconnait(self.s, debut) {
            self.i += n;
            return Some(Morceau::Lexeme(lexeme, Portee::new(debut, n)));
        }

        // trou : jusqu’au prochain lexème reconnu
        while self.i < self.s.len() && reconnait(self.s, self.i).is_none() {
            self.i += 1;
        }
        Some(Morceau::Trou(Portee::new(debut, self.i - debut)))
    }
}

fn reconnait(s: &[u8], i: usize) -> Option<(Lexeme, usize)> {
    if let Some(n) = longueur_nombre(s, i) {
        return Some((Lexeme::Nombre, n));
    }

    let simple = match s[i] {
        b'(' => Some(Symbole::ParenL),
        b')' => Some(Symbole::ParenR),
        b'+' => Some(Symbole::Plus),
        b'-' => Some(Symbole::Minus),
        b'*' => Some(Symbole::Asterisk),
        b'/' => Some(Symbole::Slash),
        b'^' => Some(Symbole::Caret),
        b'%' => Some(Symbole::Percent),
        b'x' => Some(Symbole::X),
        _ => None,
    };
    if let Some(sym) = simple {
        return Some((Lexeme::Symbole(sym), 1));
    }

    for (mot, sym) in MOTS_CLES {
        if s[i..].starts_with(mot.as_bytes()) {
            return Some((Lexeme::Symbole(sym), mot.len()));
        }
    }

    if s[i] == b' ' {
        let n = s[i..].iter().take_while(|&&b| b == b' ').count();
        return Some((Lexeme::Espace, n));
    }

    None
}

/// \d*\.?\d+(e[+-]?\d+)? ancré en `i` (même retour arrière qu’une regex : "12." -> "12").
fn longueur_nombre(s: &[u8], i: usize) -> Option<usize> {
    let chiffres = |k: usize| s[k..].iter().take_while(|b| b.is_ascii_digit()).count();

    let entiers = chiffres(i);
    let mut j = i + entiers;

    if s.get(j) == Some(&b'.') && s.get(j + 1).is_some_and(u8::is_ascii_digit) {
        j += 1 + chiffres(j + 1);
    } else if entiers == 0 {
        return None;
    }

    // exposant optionnel : seulement s’il est complet
    if s.get(j) == Some(&b'e') {
        let mut k = j + 1;
        if matches!(s.get(k), Some(b'+') | Some(b'-')) {
            k += 1;
        }
        let d = chiffres(k);
        if d > 0 {
            j = k + d;
        }
    }

    Some(j - i)
}
