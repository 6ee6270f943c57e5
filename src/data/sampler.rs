// ============================================================
// Layer 4 — Split Sampler
// ============================================================
// Full IMDB splits hold 25k reviews each, which is hours of
// BERT-base on a laptop GPU. `subsample` picks a seeded random
// subset so quick runs stay reproducible.
//
// The IMDB test shard is sorted by label (all negatives first),
// so a plain prefix would be single-class: the subset is always
// drawn after a Fisher-Yates shuffle.
//
// Reference: rand crate documentation

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Return at most `limit` items chosen uniformly at random.
///
/// With no limit, or a limit at least as large as the input,
/// the items come back untouched and in their original order.
pub fn subsample<T>(mut items: Vec<T>, limit: Option<usize>, seed: u64) -> Vec<T> {
    let Some(limit) = limit else { return items };
    if limit >= items.len() {
        return items;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    items.shuffle(&mut rng);
    items.truncate(limit);

    tracing::debug!("Subsampled split to {} items (seed={})", items.len(), seed);
    items
}
