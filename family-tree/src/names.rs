//! Name generation for seeded family trees
//!
//! Names are the only key of the store, so every generated name carries a
//! serial number.

use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "Michael", "Jennifer", "William", "Linda",
    "David", "Elizabeth", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Margaret", "Anthony", "Betty",
    "George", "Dorothy", "Edward", "Helen", "Henry", "Ruth", "Walter", "Evelyn",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Wilson", "Anderson", "Taylor", "Moore", "Jackson", "Martin", "Lee", "Thompson",
    "White", "Harris", "Clark", "Lewis", "Walker", "Young", "Allen", "King",
];

pub fn random_first_name<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    FIRST_NAMES.choose(rng).copied().unwrap_or("Anon")
}

pub fn random_last_name<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    LAST_NAMES.choose(rng).copied().unwrap_or("Doe")
}

/// "First Last #serial"; unique as long as serials are.
pub fn unique_name<R: Rng + ?Sized>(rng: &mut R, serial: u64) -> String {
    format!(
        "{} {} #{}",
        random_first_name(rng),
        random_last_name(rng),
        serial
    )
}

/// Keep the family name, pick a new first name.
pub fn child_name<R: Rng + ?Sized>(rng: &mut R, family: &str, serial: u64) -> String {
    let last = family
        .split_whitespace()
        .nth(1)
        .unwrap_or_else(|| random_last_name(rng));
    format!("{} {} #{}", random_first_name(rng), last, serial)
}
