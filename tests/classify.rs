use std::io::Cursor;
use std::sync::Arc;

use knn::{
    classify, parse_csv, ClassifierConfig, Dataset, ExecutionStrategy, KNNClassifier, KnnError,
    SelectionMethod, StrategyKind, WorkerPool,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_dataset(n: usize, dim: usize, classes: u32, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let features = (0..n)
        .map(|_| (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect())
        .collect();
    let labels = (0..n).map(|_| rng.gen_range(0..classes)).collect();
    Dataset::from_parts(features, labels).unwrap()
}

#[test]
fn test_end_to_end_five_instances() {
    let dataset = Dataset::from_parts(
        vec![
            vec![0.0, 0.0, 0.0],
            vec![0.2, 0.1, 0.0],
            vec![3.0, 3.0, 3.0],
            vec![3.1, 2.9, 3.0],
            vec![2.8, 3.2, 3.1],
        ],
        vec![0, 0, 1, 1, 1],
    )
    .unwrap();
    assert_eq!(classify(&dataset, &[2.5, 2.5, 2.5], 3).unwrap(), 1);
}

#[test]
fn test_dimension_mismatch_query() {
    let dataset = Dataset::from_parts(vec![vec![1.0, 2.0, 3.0]; 4], vec![0, 1, 0, 1]).unwrap();
    assert!(matches!(
        classify(&dataset, &[1.0, 2.0], 1),
        Err(KnnError::DimensionMismatch {
            expected: 3,
            found: 2
        })
    ));
}

#[test]
fn test_sequential_and_parallel_agree() {
    let pool = Arc::new(WorkerPool::with_threads(4).unwrap());
    let dataset = random_dataset(10_000, 3, 5, 7);
    let mut rng = StdRng::seed_from_u64(11);

    for k in [1, 3, 7, 25] {
        let sequential = KNNClassifier::new(k, dataset.clone());
        let parallel = KNNClassifier::new(k, dataset.clone())
            .with_strategy(ExecutionStrategy::Parallel(Arc::clone(&pool)));
        let heap = KNNClassifier::new(k, dataset.clone())
            .with_strategy(ExecutionStrategy::Parallel(Arc::clone(&pool)))
            .with_selection(SelectionMethod::BoundedHeap);

        for _ in 0..20 {
            let query: Vec<f64> = (0..3).map(|_| rng.gen_range(-1.0..1.0)).collect();
            let expected = sequential.predict(&query).unwrap();
            assert_eq!(parallel.predict(&query).unwrap(), expected);
            assert_eq!(heap.predict(&query).unwrap(), expected);

            let seq_nearest = sequential.nearest(&query).unwrap();
            let par_nearest = parallel.nearest(&query).unwrap();
            assert_eq!(seq_nearest, par_nearest);
        }
    }
}

#[test]
fn test_repeated_calls_are_deterministic() {
    let dataset = random_dataset(2_000, 4, 3, 3);
    let config = ClassifierConfig::new(9).with_strategy(StrategyKind::Parallel);
    let classifier = KNNClassifier::from_config(dataset, &config).unwrap();
    let query = [0.1, -0.2, 0.3, 0.0];
    let first = classifier.predict(&query).unwrap();
    for _ in 0..50 {
        assert_eq!(classifier.predict(&query).unwrap(), first);
    }
}

#[test]
fn test_loaded_dataset_classifies() {
    let csv = "x,y,z,label\n\
               -0.0170,0.0002,0.0190,1\n\
               -0.0160,0.0000,0.0195,1\n\
               0.9000,0.8000,0.7000,0\n\
               0.8500,0.9000,0.7500,0\n\
               -0.0100,0.0010,0.0200,2\n";
    let dataset = parse_csv(Cursor::new(csv)).unwrap();
    let config = ClassifierConfig::new(3).with_threads(2);
    let classifier = KNNClassifier::from_config(dataset, &config).unwrap();
    let prediction = classifier
        .predict_timed(&[-0.0166, 0.0001, 0.0191])
        .unwrap();
    assert_eq!(prediction.label, 1);
    assert_eq!(prediction.workers, 2);
}
