//! Integration tests for Accessbench
//!
//! These tests drive the harness end to end with short iterations: engine
//! runs over the full strategy set, fail-fast resolution, and the report
//! pipeline down to rendered output.

use accessbench::{
    BindingCache, ExecutionEngine, HarnessError, MemberNames, OutputFormat, Phase,
    ResolutionError, RunConfig, StrategyKind, TimeUnit, build_report, generate_csv_report,
    generate_human_report, generate_json_report,
};
use std::time::Duration;

fn short_config(threads: usize) -> RunConfig {
    RunConfig {
        warmup_iterations: 1,
        measurement_iterations: 2,
        iteration_duration: Duration::from_millis(25),
        threads,
        ..RunConfig::default()
    }
}

/// Every strategy in the closed set completes a short run and reports
/// the configured number of samples, all with work done.
#[test]
fn test_full_strategy_sweep() {
    let config = short_config(2);
    let cache = BindingCache::resolve(&config.names).unwrap();
    let mut engine = ExecutionEngine::new(config).unwrap();

    for kind in StrategyKind::ALL {
        let measurement = engine.run(kind, &cache).unwrap();
        assert_eq!(measurement.strategy, kind);
        assert_eq!(measurement.samples.len(), 2, "{kind}");
        for sample in &measurement.samples {
            assert!(sample.operations > 0, "{kind}");
            assert!(sample.elapsed > Duration::ZERO, "{kind}");
        }
    }
    assert_eq!(engine.phase(), Phase::Done);
}

/// A misnamed member fails resolution before any measurement: the error
/// carries the offending name and no samples exist.
#[test]
fn test_misnamed_member_fails_fast() {
    let names = MemberNames {
        number_setter: "setIntValue".to_string(),
        ..MemberNames::default()
    };
    let err = BindingCache::resolve(&names).unwrap_err();
    assert_eq!(err, ResolutionError::UnknownMethod("setIntValue".to_string()));
}

/// Per-call lookup strategies carry their names to the hot loop, so a bad
/// name surfaces during the run itself and aborts it.
#[test]
fn test_per_call_lookup_failure_aborts_run() {
    let config = RunConfig {
        names: MemberNames {
            text_field: "strValue".to_string(),
            ..MemberNames::default()
        },
        ..short_config(1)
    };
    // The cache still resolves with correct names; only the per-call path
    // sees the bad one.
    let cache = BindingCache::resolve(&MemberNames::default()).unwrap();
    let mut engine = ExecutionEngine::new(config).unwrap();
    let err = engine
        .run(StrategyKind::GenericHandleUncached, &cache)
        .unwrap_err();
    assert!(matches!(err, HarnessError::Resolution(_)));
}

/// More worker threads never lose operations: per-worker counts are summed,
/// so the aggregate at four threads is positive and at least as trustworthy
/// as the sample count says.
#[test]
fn test_multithreaded_aggregation() {
    let config = short_config(4);
    let cache = BindingCache::resolve(&config.names).unwrap();
    let mut engine = ExecutionEngine::new(config).unwrap();

    let measurement = engine.run(StrategyKind::Direct, &cache).unwrap();
    assert_eq!(measurement.threads, 4);
    assert!(measurement.total_operations() > 0);
    // Elapsed is per-worker wall-clock, not summed across workers.
    for sample in &measurement.samples {
        assert!(sample.elapsed < Duration::from_millis(500));
    }
}

/// The report pipeline: measurements in, every rendered format out, with
/// scores in the requested unit and JSON round-tripping.
#[test]
fn test_report_pipeline() {
    let config = short_config(1);
    let cache = BindingCache::resolve(&config.names).unwrap();
    let mut engine = ExecutionEngine::new(config.clone()).unwrap();

    let measurements = vec![
        engine.run(StrategyKind::Direct, &cache).unwrap(),
        engine
            .run(StrategyKind::ReflectiveFieldCached, &cache)
            .unwrap(),
    ];
    let report = build_report(&measurements, &config, TimeUnit::Millis, "0.1.0");

    assert_eq!(report.results.len(), 2);
    for result in &report.results {
        assert!(result.score > 0.0);
        assert_eq!(result.iterations.len(), 2);
    }

    let json = generate_json_report(&report).unwrap();
    let parsed: accessbench::Report = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.results.len(), 2);
    assert_eq!(parsed.meta.time_unit, TimeUnit::Millis);
    assert_eq!(parsed.results[0].strategy, "direct");

    let csv = generate_csv_report(&report);
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("reflective-field-cached"));

    let table = generate_human_report(&report);
    assert!(table.contains("ops/ms"));
    assert!(table.contains("direct"));
}

/// Under an identical configuration, the per-call reflective lookup never
/// beats the direct baseline: the lookup pays a hash probe and a downcast
/// per operation that direct calls simply do not have.
#[test]
fn test_reflective_lookup_never_beats_direct() {
    let config = RunConfig {
        warmup_iterations: 1,
        measurement_iterations: 2,
        iteration_duration: Duration::from_millis(100),
        threads: 1,
        ..RunConfig::default()
    };
    let cache = BindingCache::resolve(&config.names).unwrap();
    let mut engine = ExecutionEngine::new(config).unwrap();

    let direct = engine.run(StrategyKind::Direct, &cache).unwrap();
    let reflective = engine
        .run(StrategyKind::ReflectiveFieldUncached, &cache)
        .unwrap();

    assert!(direct.total_operations() > 0);
    assert!(reflective.total_operations() > 0);
    assert!(
        reflective.total_operations() <= direct.total_operations(),
        "reflective {} vs direct {}",
        reflective.total_operations(),
        direct.total_operations()
    );
}

/// A cached strategy's aggregate operation count grows with worker threads
/// when the hardware actually offers the parallelism.
#[test]
fn test_throughput_scales_with_threads() {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    if cores < 4 {
        return;
    }

    let base = RunConfig {
        warmup_iterations: 1,
        measurement_iterations: 2,
        iteration_duration: Duration::from_millis(200),
        ..RunConfig::default()
    };
    let cache = BindingCache::resolve(&base.names).unwrap();

    let mut single = ExecutionEngine::new(RunConfig {
        threads: 1,
        ..base.clone()
    })
    .unwrap();
    let one = single
        .run(StrategyKind::ReflectiveFieldCached, &cache)
        .unwrap();

    let mut quad = ExecutionEngine::new(RunConfig {
        threads: 4,
        ..base
    })
    .unwrap();
    let four = quad
        .run(StrategyKind::ReflectiveFieldCached, &cache)
        .unwrap();

    // Not 4x, but materially more than one thread manages alone.
    assert!(
        four.total_operations() as f64 > one.total_operations() as f64 * 1.5,
        "4 threads: {}, 1 thread: {}",
        four.total_operations(),
        one.total_operations()
    );
}

/// Aborting between iterations discards the run.
#[test]
fn test_abort_discards_run() {
    let config = short_config(1);
    let cache = BindingCache::resolve(&config.names).unwrap();
    let mut engine = ExecutionEngine::new(config).unwrap();
    engine.abort_handle().abort();
    assert!(matches!(
        engine.run(StrategyKind::Direct, &cache),
        Err(HarnessError::Aborted)
    ));
}

/// Output format strings parse the way the CLI documents them.
#[test]
fn test_output_format_parsing() {
    assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert_eq!("human".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
    assert!("html".parse::<OutputFormat>().is_err());
}
