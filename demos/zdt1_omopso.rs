//! Solves ZDT1 with OMOPSO and prints the distance of the obtained front
//! to the true one.
//!
//! ```text
//! RUST_LOG=info cargo run --example zdt1_omopso
//! ```

use u_moopt::algorithm::Algorithm;
use u_moopt::benchmarks::Zdt1;
use u_moopt::omopso::{Omopso, OmopsoConfig};
use u_moopt::OptimError;

fn main() -> Result<(), OptimError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let problem = Zdt1::default();
    let reference = problem.pareto_optimal_front(100);

    let config = OmopsoConfig::default()
        .with_swarm_size(100)
        .with_max_iterations(250)
        .with_seed(42);
    let mut omopso = Omopso::new(problem, config)?;
    omopso.initialize(None)?;
    let front = omopso.execute()?;

    // generational distance to the sampled optimal front
    let gd = front
        .iter()
        .map(|s| {
            reference
                .iter()
                .map(|r| {
                    let d0 = s.objective(0) - r.objective(0);
                    let d1 = s.objective(1) - r.objective(1);
                    (d0 * d0 + d1 * d1).sqrt()
                })
                .fold(f64::INFINITY, f64::min)
        })
        .sum::<f64>()
        / front.len() as f64;

    log::info!("{} leaders, generational distance {gd:.5}", front.len());
    for s in front.iter().take(10) {
        println!("{:.4}\t{:.4}", s.objective(0), s.objective(1));
    }
    Ok(())
}
