//! Virtual number generation
//!
//! Every account gets an 11-digit number at registration. It is the
//! identifier chat threads are keyed by. Numbers are drawn uniformly from
//! `10000000000..=99999999999`, so they never start with a zero.

use rand::Rng;

pub const VIRTUAL_NUMBER_LEN: usize = 11;

const LOWEST: u64 = 10_000_000_000;
const HIGHEST: u64 = 99_999_999_999;

/// Draw a random virtual number. Uniqueness is enforced by the database.
pub fn generate_virtual_number() -> String {
    generate_with(&mut rand::thread_rng())
}

pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(LOWEST..=HIGHEST).to_string()
}

/// Whether `candidate` has the shape of a virtual number
pub fn is_virtual_number(candidate: &str) -> bool {
    candidate.len() == VIRTUAL_NUMBER_LEN
        && candidate.bytes().all(|b| b.is_ascii_digit())
        && !candidate.starts_with('0')
}
