//! Batch Monte Carlo runs over independent decks.

use tracing::debug;

use super::simulator::run_to_termination;
use crate::cards::{ArtifactSchedule, DeckBuilder};
use crate::core::{EngineResult, TempleConfig, TempleRng};

/// Run `simulations` always-continue walks and return each walk's
/// `cards_revealed`, in a deterministic order for a given seed and worker
/// count.
///
/// Walks are split across `workers` scoped threads. Each worker owns an RNG
/// forked from `seed`, so no shuffling state is shared between threads.
pub fn simulate_batch(
    config: &TempleConfig,
    simulations: usize,
    seed: u64,
    workers: usize,
) -> EngineResult<Vec<u32>> {
    config.validate()?;

    let workers = workers.clamp(1, simulations.max(1));
    let base = simulations / workers;
    let extra = simulations % workers;

    let mut root = TempleRng::new(seed);
    let jobs: Vec<(usize, TempleRng)> = (0..workers)
        .map(|i| (base + usize::from(i < extra), root.fork()))
        .collect();

    debug!(simulations, workers, seed, "running path simulations");

    let chunks: Vec<Vec<u32>> = std::thread::scope(|scope| {
        let handles: Vec<_> = jobs
            .into_iter()
            .map(|(count, mut rng)| scope.spawn(move || run_chunk(config, count, &mut rng)))
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(chunk) => chunk,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    Ok(chunks.into_iter().flatten().collect())
}

fn run_chunk(config: &TempleConfig, count: usize, rng: &mut TempleRng) -> Vec<u32> {
    (0..count)
        .map(|_| {
            let schedule = ArtifactSchedule::shuffled(&config.artifact_values, rng);
            let deck = DeckBuilder::new(config, schedule).build(1, rng);
            run_to_termination(deck).cards_revealed
        })
        .collect()
}
