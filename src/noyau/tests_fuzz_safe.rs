//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants clés :
//!   - une expression bien formée ne donne jamais d’erreur de parsing
//!   - toute portée rapportée tient dans l’expression normalisée
//!   - même entrée => même sortie

use std::time::{Duration, Instant};

use super::format::format_resultat;
use super::jetons::normalise;
use super::{evaluate, Erreur, Options};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(5) {
        0 => format!("{}", rng.pick(10)),
        1 => format!("{}.{}", rng.pick(100), rng.pick(100)),
        2 => format!(".{}", rng.pick(1000)),
        3 => format!("{}e{}", rng.pick(9) + 1, rng.pick(4)),
        _ => format!("{}e-{}", rng.pick(9) + 1, rng.pick(4)),
    }
}

fn gen_atome(rng: &mut Rng, depth: usize) -> String {
    let sous = |rng: &mut Rng| {
        if depth == 0 {
            gen_nombre(rng)
        } else {
            gen_expr(rng, depth - 1)
        }
    };

    match rng.pick(8) {
        0 | 1 | 2 => gen_nombre(rng),
        // constante toujours parenthésée : le signe qui suit reste binaire
        3 => ["(pi)", "(e)", "(tau)"][rng.pick(3) as usize].to_string(),
        4 => format!("({})", sous(rng)),
        5 => {
            let f = ["sin", "cos", "tan", "csc", "sec", "cot"][rng.pick(6) as usize];
            format!("{f}({})", sous(rng))
        }
        6 => format!("-({})", sous(rng)),
        _ => format!("+{}", gen_nombre(rng)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    let mut s = gen_atome(rng, depth);
    for _ in 0..rng.pick(4) {
        let op = ["+", "-", "*", "/", "^"][rng.pick(5) as usize];
        let espace = if rng.coin() { " " } else { "" };
        s.push_str(espace);
        s.push_str(op);
        s.push_str(espace);
        s.push_str(&gen_atome(rng, depth));
    }
    s
}

/// Soupe de lexèmes (y compris invalides), sans aucune garantie de forme.
fn gen_soupe(rng: &mut Rng) -> String {
    const VOCAB: [&str; 22] = [
        "1", "2.5", ".5", "1e3", "(", ")", "+", "-", "*", "/", "^", "%", "x", "sin", "COS",
        "pi", "e", " ", "\t", "#", "a", "é",
    ];
    let n = rng.pick(12) as usize;
    (0..n).map(|_| VOCAB[rng.pick(VOCAB.len() as u32) as usize]).collect()
}

fn check_portee(expr: &str, e: &Erreur) {
    let n = e.expression().len();
    if let Some(p) = e.portee() {
        assert!(p.position <= n, "expr={expr:?} {p:?} n={n}");
        assert!(p.position + p.longueur <= n, "expr={expr:?} {p:?} n={n}");
    }
    assert_eq!(e.expression(), normalise(expr), "expr={expr:?}");
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_bien_forme_jamais_erreur_de_parsing() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        match evaluate(&expr, Options::default(), None) {
            Ok(_) => seen_ok += 1,
            Err(e @ Erreur::Parsing { .. }) => {
                panic!("erreur de parsing sur une expression bien formée: expr={expr:?} err={e}")
            }
            Err(e) => check_portee(&expr, &e),
        }
    }

    // On veut voir des succès, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 30, "trop peu de succès: {seen_ok}");
}

#[test]
fn fuzz_safe_soupe_portees_bornees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_err = 0usize;

    for _ in 0..500 {
        budget(t0, max);

        let expr = gen_soupe(&mut rng);
        let courant = if rng.coin() { Some(2.0) } else { None };
        if let Err(e) = evaluate(&expr, Options::default(), courant) {
            check_portee(&expr, &e);
            seen_err += 1;
        }
    }

    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    let mut a = Rng::new(42);
    let mut b = Rng::new(42);

    for _ in 0..100 {
        let ea = gen_expr(&mut a, 2);
        let eb = gen_expr(&mut b, 2);
        assert_eq!(ea, eb);

        let ra = format_resultat(&evaluate(&ea, Options::default(), Some(3.0)));
        let rb = format_resultat(&evaluate(&eb, Options::default(), Some(3.0)));
        assert_eq!(ra, rb, "expr={ea:?}");
    }
}

#[test]
fn fuzz_safe_normalisation_idempotente() {
    let mut rng = Rng::new(7);
    for _ in 0..200 {
        let s = gen_soupe(&mut rng);
        let une = normalise(&s);
        assert_eq!(normalise(&une), une, "s={s:?}");
    }
}

#[test]
fn fuzz_safe_longue_somme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // pas de récursion : la longueur n’est bornée que par la mémoire
    let expr = vec!["1"; 5000].join(" + ");
    let r = evaluate(&expr, Options::default(), None);
    budget(t0, max);

    assert_eq!(r, Ok(5000.0));
}

#[test]
fn fuzz_safe_parentheses_profondes() {
    let n = 2000;
    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(evaluate(&expr, Options::default(), None), Ok(1.0));

    let desequilibre = format!("{}1{}", "(".repeat(n), ")".repeat(n + 1));
    assert!(matches!(
        evaluate(&desequilibre, Options::default(), None),
        Err(Erreur::Parsing { .. })
    ));
}
