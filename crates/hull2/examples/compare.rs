//! Run every algorithm on one generated point set and print the hulls.
//!
//! Usage:
//!   cargo run -p hull2 --example compare -- 40 7
//!
//! Arguments: point count (default 30), seed (default 1).

use hull2::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let count = args.next().and_then(|s| s.parse().ok()).unwrap_or(30);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);

    let Some(points) = generate_points(GenCfg::with_count(count), ReplayToken::new(seed)) else {
        eprintln!("could not place {count} points in general position");
        return;
    };
    let oracle = match naive_hull(&points) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("naive hull failed: {e}");
            return;
        }
    };
    println!("n={count} seed={seed} hull vertices={}", oracle.len());
    for algo in Algorithm::ALL {
        match algo.compute(&points) {
            Ok(hull) => println!(
                "{:<34} {:>3} vertices  matches oracle: {}",
                algo.name(),
                hull.len(),
                hull.is_rotation_of(&oracle)
            ),
            Err(e) => println!("{:<34} error: {e}", algo.name()),
        }
    }
    for p in oracle.points() {
        println!("{:.3} {:.3}", p.x, p.y);
    }
}
