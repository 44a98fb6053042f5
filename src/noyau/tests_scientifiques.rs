//! Tests scientifiques (campagne) : table de cas + propriétés.
//!
//! - Table complète du banc d’essai : erreurs de parsing, erreurs d’évaluation, succès exacts.
//! - Propriétés : casse/blancs, associativité, précédence, degrés/radians, portées bornées.
//!
//! Les succès sont comparés à l’égalité stricte quand le calcul Rust suit le même ordre
//! d’opérations ; la trig passe par une tolérance.

use pretty_assertions::assert_eq;

use super::{evaluate, Erreur, GenreEvaluation, GenreParsing, Options, Portee};

const DEG: Options = Options { use_degrees: true };
const RAD: Options = Options { use_degrees: false };

fn eval_ok(expr: &str, courant: Option<f64>) -> f64 {
    evaluate(expr, Options::default(), courant).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_valeur(expr: &str, attendu: f64) {
    assert_eq!(eval_ok(expr, None), attendu, "expr={expr:?}");
}

fn assert_proche(expr: &str, options: Options, attendu: f64) {
    let v = evaluate(expr, options, None).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    assert!((v - attendu).abs() < 1e-9, "expr={expr:?} v={v} attendu={attendu}");
}

fn assert_parsing(expr: &str, attendu: GenreParsing) {
    match evaluate(expr, Options::default(), None) {
        Err(Erreur::Parsing { genre, .. }) => assert_eq!(genre, attendu, "expr={expr:?}"),
        autre => panic!("expr={expr:?} : attendu parsing {attendu:?}, obtenu {autre:?}"),
    }
}

fn assert_evaluation(expr: &str, courant: Option<f64>, attendu: GenreEvaluation) {
    match evaluate(expr, Options::default(), courant) {
        Err(Erreur::Evaluation { genre, .. }) => assert_eq!(genre, attendu, "expr={expr:?}"),
        autre => panic!("expr={expr:?} : attendu évaluation {attendu:?}, obtenu {autre:?}"),
    }
}

fn portee(expr: &str) -> Option<Portee> {
    evaluate(expr, Options::default(), None).err().and_then(|e| e.portee())
}

/* ------------------------ Erreurs de parsing ------------------------ */

#[test]
fn sci_parsing_vide() {
    assert_parsing("", GenreParsing::Vide);
    assert_parsing(" \x0C\n\r\t\x0B", GenreParsing::Vide);
    assert_parsing("()", GenreParsing::Vide);
    assert_parsing("(())", GenreParsing::Vide);
}

#[test]
fn sci_parsing_parentheses() {
    assert_parsing("1(1+", GenreParsing::ParenthesesNonAppariees);
    assert_parsing("((1)", GenreParsing::ParenthesesNonAppariees);
    assert_parsing("(1))", GenreParsing::ParenthesesNonAppariees);
    assert_parsing("1 + (2 - (3 * (4 / (5)))))", GenreParsing::ParenthesesNonAppariees);
    assert_parsing(")", GenreParsing::ParenthesesNonAppariees);
}

#[test]
fn sci_parsing_syntaxe() {
    assert_parsing("(1)1", GenreParsing::Syntaxe);
    assert_parsing("1a", GenreParsing::Syntaxe);
    assert_parsing("abc", GenreParsing::Syntaxe);
    assert_parsing("a + b * c", GenreParsing::Syntaxe);
    assert_parsing("1 2 3", GenreParsing::Syntaxe);
    assert_parsing("12.", GenreParsing::Syntaxe);
    assert_parsing("1 + 2 # 3", GenreParsing::Syntaxe);
}

#[test]
fn sci_syntaxe_positions() {
    assert_eq!(portee("1a"), Some(Portee::new(1, 1)));
    assert_eq!(portee("abc"), Some(Portee::new(0, 3)));
    assert_eq!(portee("12."), Some(Portee::new(2, 1)));
    assert_eq!(portee("1 + 2 # 3"), Some(Portee::new(6, 1)));

    // plusieurs opérandes restants : pas de position inventée
    assert_eq!(portee("1 2 3"), None);
    assert_eq!(portee("(1)1"), None);
}

/* ------------------------ Erreurs d’évaluation ------------------------ */

#[test]
fn sci_evaluation_erreurs() {
    assert_evaluation("1 / (1 - 1)", None, GenreEvaluation::DivisionParZero);
    assert_evaluation("50%", None, GenreEvaluation::ValeurCouranteAttendue);
    assert_evaluation("2x", None, GenreEvaluation::ValeurCouranteAttendue);
    assert_evaluation("50%", Some(f64::NAN), GenreEvaluation::ValeurCouranteAttendue);
    assert_evaluation("+", None, GenreEvaluation::ArgumentsManquants);
    assert_evaluation("1 *", None, GenreEvaluation::ArgumentsManquants);
    assert_evaluation("(1 + ) + 1", None, GenreEvaluation::ArgumentsManquants);
    assert_evaluation("-", None, GenreEvaluation::ArgumentsManquants);
    assert_evaluation("--", None, GenreEvaluation::ArgumentsManquants);
    assert_evaluation("sin", None, GenreEvaluation::ArgumentsManquants);
    assert_evaluation("-1 ^ 2 ^ 3.4", None, GenreEvaluation::NombreImaginaire);
    assert_evaluation("-1^2^3.4", None, GenreEvaluation::NombreImaginaire);
}

#[test]
fn sci_evaluation_positions() {
    assert_eq!(portee("1 / (1 - 1)"), Some(Portee::new(2, 1)));
    assert_eq!(portee("1 *"), Some(Portee::new(2, 1)));
    assert_eq!(portee("sin"), Some(Portee::new(0, 3)));
    assert_eq!(portee("(-8) ^ .5"), Some(Portee::new(5, 1)));
}

/* ------------------------ Succès ------------------------ */

#[test]
fn sci_nombres() {
    assert_valeur("1", 1.0);
    assert_valeur("123", 123.0);
    assert_valeur("1.23", 1.23);
    assert_valeur(".12", 0.12);
    assert_valeur("1e2", 1e2);
    assert_valeur("1e+2 + 3", 1e2 + 3.0);
    assert_valeur("1e-2 - 3", 1e-2 - 3.0);
}

#[test]
fn sci_signes_unaires() {
    assert_valeur("+1", 1.0);
    assert_valeur("++1", 1.0);
    assert_valeur("+++1", 1.0);
    assert_valeur("-1", -1.0);
    assert_valeur("--1", 1.0);
    assert_valeur("---1", -1.0);
    assert_valeur("+-+-1++--++--++--+2-3+4", 4.0);
}

#[test]
fn sci_parentheses() {
    assert_valeur("((1))", 1.0);
    assert_valeur("1 + 2", 3.0);
    assert_valeur("1 + (2)", 3.0);
    assert_valeur("(1) + 2", 3.0);
    assert_valeur("+(1 + 2)", 3.0);
    assert_valeur("-(1 - 2)", 1.0);
    assert_valeur("1 + 2 * 3", 7.0);
    assert_valeur("1 + (2 * 3)", 7.0);
    assert_valeur("(1 + 2) * 3", 9.0);
}

#[test]
fn sci_exposants() {
    assert_valeur("-1 ^ 2", (-1f64).powf(2.0));
    assert_valeur("(-1) ^ 2", (-1f64).powf(2.0));
    assert_valeur("-(1 ^ 2)", -(1f64.powf(2.0)));
    assert_valeur("4 ^ -2", 4f64.powf(-2.0));
    assert_valeur("(-4 ^ 2)", (-4f64).powf(2.0));
    assert_valeur("2 * 2 ^ 3", 16.0);
    assert_valeur("2 * (2 ^ 3)", 16.0);
    assert_valeur("(2 * 2) ^ 3", 64.0);
    assert_valeur("2 ^ 2 ^ 3", 256.0);
    assert_valeur("2^2^3", 256.0);
    assert_valeur("2 ^ (2 ^ 3)", 256.0);
    assert_valeur("(2 ^ 2) ^ 3", 64.0);
    assert_valeur("1 + .2 * -3 / +4 ^ 5", 1.0 + 0.2 * -3.0 / 4f64.powf(5.0));
}

#[test]
fn sci_exposant_non_fini() {
    // 1e400 déborde en inf : pas de partie fractionnaire, donc pas d’imaginaire
    assert_valeur("(-2) ^ 1e400", f64::INFINITY);
    assert!(eval_ok("(-2) ^ (1e400 - 1e400)", None).is_nan());
    assert_evaluation("(-2) ^ 1.5", None, GenreEvaluation::NombreImaginaire);
}

#[test]
fn sci_valeur_courante() {
    assert_eq!(eval_ok("50%", Some(1.0)), 0.5);
    assert_eq!(eval_ok("50%", Some(200.0)), 100.0);
    assert_eq!(eval_ok("3x", Some(4.0)), 12.0);
    assert_eq!(eval_ok("1 + 10%", Some(50.0)), 6.0);
}

/* ------------------------ Trig ------------------------ */

#[test]
fn sci_trig_degres() {
    assert_proche("cos 180", DEG, -1.0);
    assert_proche("sin 90", DEG, 1.0);
    assert_proche("sin 30", DEG, 0.5);
    assert_proche("tan 45", DEG, 1.0);
    assert_proche("csc 90", DEG, 1.0);
    assert_proche("sec 0", DEG, 1.0);
    assert_proche("cot 45", DEG, 1.0);
}

#[test]
fn sci_trig_radians() {
    assert_proche("cos(tau)", RAD, 1.0);
    assert_proche("sin(pi / 2)", RAD, 1.0);
    assert_proche("cos pi", RAD, -1.0);
    assert_proche("tan(pi / 4)", RAD, 1.0);
}

#[test]
fn sci_trig_degeneree_reste_flottante() {
    let v = eval_ok("tan 90", None);
    assert!(v.is_finite() && v.abs() > 1e15, "tan 90 = {v}");
}

#[test]
fn sci_trig_liaison() {
    // sin s’applique avant + (40 > 10) mais après ^ (90 > 40)
    assert_proche("sin 90 + 1", DEG, 2.0);
    assert_proche("sin 3 ^ 2", DEG, (9f64.to_radians()).sin());
}

/* ------------------------ Propriétés ------------------------ */

#[test]
fn sci_casse_et_blancs() {
    let v = eval_ok("sin 90", None);
    for s in ["SIN 90", "sin   90", "Sin90", "\tSiN\n90\x0B"] {
        assert_eq!(eval_ok(s, None), v, "expr={s:?}");
    }
    assert_eq!(eval_ok("PI", None), std::f64::consts::PI);
    assert_eq!(eval_ok("E", None), std::f64::consts::E);
    assert_eq!(eval_ok("Tau", None), std::f64::consts::TAU);
}

#[test]
fn sci_portees_bornees() {
    let cas = [
        "1a",
        "abc",
        "12.",
        "1 + 2 # 3",
        "(1))",
        "1(1+",
        "((1)",
        "1 / (1 - 1)",
        "50%",
        "1 *",
        "(1 + ) + 1",
        "-1 ^ 2 ^ 3.4",
        "  (  1  ))",
        "1 + é",
    ];

    for expr in cas {
        let e = evaluate(expr, Options::default(), None).expect_err(expr);
        let n = e.expression().len();
        let p = e.portee().unwrap_or_else(|| panic!("portée absente pour {expr:?}"));
        assert!(p.position <= n, "expr={expr:?} {p:?}");
        assert!(p.position + p.longueur <= n, "expr={expr:?} {p:?}");
        assert!(e.fragment().is_some_and(|f| !f.is_empty()), "expr={expr:?}");
    }
}
