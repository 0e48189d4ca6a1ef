use std::sync::Arc;
use std::thread;

use loyalty_qr::{
    GenerationStatus, QrEncoder, QrMetrics, QrValidator, RenderSettings, ValidationResult,
};

const THREADS: usize = 8;
const PER_THREAD: usize = 50;

#[test]
fn concurrent_validation_counts_every_call() {
    let metrics = Arc::new(QrMetrics::register(&prometheus::Registry::new()).unwrap());
    let validator = Arc::new(QrValidator::new(metrics.clone()));

    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let validator = validator.clone();
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    // Cycle through one valid and two invalid shapes.
                    let code = match i % 3 {
                        0 => format!("QR-PERF{t:02}{i:04}"),
                        1 => format!("BAD-{t}{i}"),
                        _ => format!("QR-low{t}{i}"),
                    };
                    validator.validate(&code);
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let per_kind = |k: usize| (0..PER_THREAD).filter(|i| i % 3 == k).count() as u64 * THREADS as u64;
    assert_eq!(metrics.validations(ValidationResult::Valid), per_kind(0));
    assert_eq!(metrics.validations(ValidationResult::InvalidFormat), per_kind(1));
    assert_eq!(
        metrics.validations(ValidationResult::InvalidCharacters),
        per_kind(2)
    );
    assert_eq!(metrics.validation_samples(), (THREADS * PER_THREAD) as u64);
}

#[test]
fn concurrent_generation_counts_every_call() {
    let metrics = Arc::new(QrMetrics::register(&prometheus::Registry::new()).unwrap());
    let encoder = Arc::new(QrEncoder::new(
        RenderSettings {
            module_size: 2,
            border: 1,
        },
        metrics.clone(),
    ));

    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let encoder = encoder.clone();
            thread::spawn(move || {
                for i in 0..10 {
                    encoder
                        .generate(&format!("QR-CONCURRENT{t}{i}"), 1, "50.00")
                        .unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(
        metrics.generated(GenerationStatus::Success),
        (THREADS * 10) as u64
    );
    assert_eq!(metrics.generated(GenerationStatus::Error), 0);
    assert_eq!(metrics.generation_samples(), (THREADS * 10) as u64);
}
