use rand::RngCore;

pub fn random_bytes<'r>(mut rng: impl RngCore + 'r) -> impl Iterator<Item = u8> + 'r {
    std::iter::from_fn(move || Some(rng.next_u32())).flat_map(u32::to_ne_bytes)
}

/// picks a uniform value in `0..=bound` by rejection sampling
pub fn next_bound(bound: usize, mut rng: impl RngCore, max_tries: usize) -> usize {
    if bound == 0 {
        return 0;
    }
    let mask = (1usize << (bound.ilog2() + 1)) - 1;
    for _ in 0..max_tries {
        let pick = rng.next_u64() as usize & mask;
        if pick <= bound {
            return pick;
        }
    }
    panic!("to many tries");
}

#[allow(clippy::module_name_repetitions)]
#[cfg(test)]
pub fn seeded_rng() -> ([u8; 32], rand::rngs::StdRng) {
    let mut seed = [0; 32];
    rand::rngs::OsRng
        .try_fill_bytes(&mut seed)
        .expect("failed to generate seed");
    let rng = <rand::rngs::StdRng as rand::SeedableRng>::from_seed(seed);
    (seed, rng)
}
