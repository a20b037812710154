//! Random call for a class of 75, with a few students weighted up.
//!
//! Shows the difference between repeated single draws (with replacement) and a
//! multi-draw (without replacement, renormalized after every pick).

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use randpick::{format_ids, RangeSelector, DEFAULT_WEIGHT};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut class = RangeSelector::with_rng(1, 75, DEFAULT_WEIGHT, ChaCha8Rng::seed_from_u64(7))?;

    // Students who have not been called on in a while.
    for (id, weight) in [(3, 5.0), (17, 5.0), (42, 10.0)] {
        class.add_or_update_weight(id, weight)?;
    }

    let singles: Vec<u32> = (0..5).map(|_| class.select_one()).collect::<Result<_, _>>()?;
    println!("five single draws (may repeat): {}", format_ids(&singles, ","));

    let mut picks: Vec<u32> = class.select_multiple(5)?.collect();
    picks.sort_unstable();
    println!("five distinct students:         {}", format_ids(&picks, ","));

    let draws = 10_000;
    let hits = (0..draws)
        .filter(|_| matches!(class.select_one(), Ok(42)))
        .count();
    println!(
        "student 42 drawn {:.1}% of the time (expected {:.1}%)",
        100.0 * hits as f64 / draws as f64,
        100.0 * 10.0 / class.total_weight()
    );

    Ok(())
}
