use rand::rngs::StdRng;
use rand::SeedableRng;

// Each integration test binary compiles this module separately and not every
// binary uses every helper.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// The small four-sample dataset the MLP scenarios train on.
#[allow(dead_code)]
pub fn toy_dataset() -> (Vec<[f64; 3]>, Vec<f64>) {
    let xs = vec![
        [2.0, 3.0, -1.0],
        [3.0, -1.0, 0.5],
        [0.5, 1.0, 1.0],
        [1.0, 1.0, -1.0],
    ];
    let ys = vec![1.0, -1.0, -1.0, 1.0];
    (xs, ys)
}
