use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Deterministic RNG for one engine decision, keyed by (seed, game_id, ply).
///
/// The ply lands in the high bits so that neighbouring game ids and plies
/// never collide on the same derived seed. Equal inputs give equal sequences.
#[inline]
pub fn rng_for_ply(seed: u64, game_id: u64, ply: u16) -> impl Rng {
    let derived: u64 = seed ^ game_id ^ (u64::from(ply) << 48);
    Pcg64::seed_from_u64(derived)
}
