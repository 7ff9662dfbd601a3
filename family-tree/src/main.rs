//! Family Tree Benchmark
//!
//! Seeds a root generation in parallel, grows younger generations on top of
//! it, then walks the ancestry of the youngest person.

use family_tree::names;
use family_tree::{FamilyTree, NewPerson, Order, TracingSink, TreeConfig};
use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const ROOT_POPULATION: u64 = 20_000;
const GENERATIONS: u64 = 4;
const CHILDREN_PER_GENERATION: u64 = 10_000;
const GENERATION_GAP: i32 = 20;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = TreeConfig::from_env()?;
    info!("Family tree benchmark starting (max age {})...", config.max_age);
    let tree = FamilyTree::with_config(Arc::new(TracingSink), &config)?;

    // Root generation, added from every rayon worker at once
    let oldest = config.max_age;
    let youngest_root = (oldest - 10).max(0);
    let start = Instant::now();
    let mut generation: Vec<String> = (0..ROOT_POPULATION)
        .into_par_iter()
        .map(|serial| -> anyhow::Result<String> {
            let mut rng = rand::thread_rng();
            let name = names::unique_name(&mut rng, serial);
            let age = rng.gen_range(youngest_root..=oldest);
            tree.add_person(NewPerson::new(name.clone(), age))?;
            Ok(name)
        })
        .collect::<anyhow::Result<_>>()?;
    info!("Seeded {} people in {:?}", tree.len(), start.elapsed());

    // Younger generations, each child linked to two random members of the last one
    let mut serial = ROOT_POPULATION;
    let mut rng = rand::thread_rng();
    for level in 1..=GENERATIONS {
        let age_ceiling = youngest_root - GENERATION_GAP * level as i32;
        if age_ceiling < 1 {
            info!("Age range exhausted after {} generations", level - 1);
            break;
        }

        let start = Instant::now();
        let mut next = Vec::with_capacity(CHILDREN_PER_GENERATION as usize);
        let mut rejected = 0u32;
        for _ in 0..CHILDREN_PER_GENERATION {
            let pair: Vec<&String> = generation.choose_multiple(&mut rng, 2).collect();
            let [first, second] = pair.as_slice() else {
                break;
            };
            let name = names::child_name(&mut rng, first, serial);
            serial += 1;
            let age = rng.gen_range((age_ceiling - 10).max(0)..age_ceiling);
            let request =
                NewPerson::new(name.clone(), age).parents(first.as_str(), second.as_str());
            match tree.add_person(request) {
                Ok(()) => next.push(name),
                // Both slots taken or a shared ancestor
                Err(err) if err.validation().is_some() => rejected += 1,
                Err(err) => return Err(err.into()),
            }
        }
        info!(
            "Generation {}: {} added, {} rejected in {:?}",
            level,
            next.len(),
            rejected,
            start.elapsed()
        );
        if next.len() < 2 {
            break;
        }
        generation = next;
    }

    let start = Instant::now();
    let ordered = tree.get_ordered_list(Order::Asc);
    info!(
        "Ordered listing of {} people in {:?}",
        ordered.len(),
        start.elapsed()
    );

    if let Some(youngest) = ordered.first() {
        let start = Instant::now();
        let ancestors = tree.ancestors(&youngest.name)?;
        info!(
            "Ancestor walk from {} visited {} entries in {:?}",
            youngest.name,
            ancestors.len(),
            start.elapsed()
        );
        for entry in ancestors.iter().take(7) {
            info!("  {}: {}", entry.label(), entry.name);
        }
    }

    if let Some(stats) = memory_stats::memory_stats() {
        info!(
            "Physical memory: {:.1} MiB",
            stats.physical_mem as f64 / (1024.0 * 1024.0)
        );
    }

    Ok(())
}
