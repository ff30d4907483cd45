//! Quickstart demo: filtering a poisoned round before aggregation

use gkde_fl::{LearningTask, MemoryModelStore, ParameterMap, RoundEvaluator};
use ndarray::ArrayD;

fn mnist_model(fill: f32, tweak: f32) -> ParameterMap {
    let mut map = ParameterMap::new();
    map.insert("layer1.0.weight", ArrayD::from_elem(vec![16, 1, 5, 5], fill));
    map.insert("layer1.0.bias", ArrayD::from_elem(vec![16], fill + tweak));
    map.insert("fc.weight", ArrayD::from_elem(vec![10, 2304], fill));
    map.insert("fc.bias", ArrayD::from_elem(vec![10], fill));
    map
}

fn main() {
    env_logger::init();

    println!("GKDE-FL Quickstart Demo\n");
    println!("Simulating round 5: 7 honest clients, 3 poisoned...\n");

    let global = mnist_model(0.1, 0.0);

    // 7 honest clients with small local drift
    let mut locals: Vec<ParameterMap> = (0..7)
        .map(|i| mnist_model(0.1, 0.001 * (i as f32 - 3.0)))
        .collect();

    // 3 sign-flip attackers
    locals.extend((0..3).map(|_| mnist_model(-0.1, 0.0)));

    let mut store = MemoryModelStore::new();
    store.insert_round(LearningTask::Mnist, 5, global, locals);

    let evaluator = RoundEvaluator::new(store);
    let outcome = evaluator
        .evaluate(LearningTask::Mnist, 5)
        .expect("evaluation failed");

    println!("Filtering complete!");
    println!("   Benign updates retained:    {}", outcome.report.benign);
    println!("   Malicious updates discarded: {}", outcome.report.malicious);
    println!("\nRetained scores (all near 0):");
    for sm in &outcome.retained {
        println!("   score = {:.6}", sm.score);
    }
    println!("\nOnly the retained updates proceed to aggregation.");
}
