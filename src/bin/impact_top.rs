//! Debug tool: sample the live system twice and print the processes with
//! the highest instantaneous energy impact. Attribution and smoothing are
//! not involved; this shows the raw per-process scores the engine starts
//! from.

use std::thread;
use std::time::{Duration, Instant};

use app_energy::{impact_scores, ProcSampler, ProcessDataSource};

fn main() {
    env_logger::init();

    let sampler = ProcSampler::new();

    let first = sampler.sample();
    let started = Instant::now();
    thread::sleep(Duration::from_secs(2));
    let second = sampler.sample();
    let dt = started.elapsed().as_secs_f64();

    let mut scores: Vec<_> = impact_scores(&second, &first, dt).into_iter().collect();
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    log::info!("{} of {} processes above the noise floor", scores.len(), second.len());

    println!("{:>8}  {:>10}  exe", "pid", "impact");
    for (pid, score) in scores.iter().take(20) {
        let exe = sampler
            .executable_path(*pid)
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "?".into());
        println!("{pid:>8}  {score:>10.2}  {exe}");
    }
}
