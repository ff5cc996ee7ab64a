use chrono::Utc;
use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};

pub const SUFFIX_LEN: usize = 5;

/// Generates a stored-file stem of the form `<unix millis>-<5 lowercase letters>`.
///
/// Names are not globally unique: two names generated within the same
/// millisecond collide with probability 1/26^5 (about 8.4e-8). The image
/// store refuses to overwrite, so a collision costs a retry, not data.
pub fn generate_file_stem() -> String {
    generate_file_stem_with(Utc::now().timestamp_millis(), &mut rand::thread_rng())
}

pub fn generate_file_stem_with<R: Rng + ?Sized>(millis: i64, rng: &mut R) -> String {
    format!("{}-{}", millis, random_lowercase(rng, SUFFIX_LEN))
}

fn random_lowercase<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    let letters = Uniform::new_inclusive(b'a', b'z');
    (0..len).map(|_| letters.sample(&mut *rng) as char).collect()
}
