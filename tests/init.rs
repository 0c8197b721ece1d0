use travel_assistant::instrumentation::config::InstrumentationConfig;
use travel_assistant::instrumentation::tracing::try_init_tracing;

// Runs in its own test binary: installing the global subscriber is a
// process-wide, one-time operation.
#[test]
fn tracing_initializes_exactly_once_per_process() {
    let tracer =
        try_init_tracing(InstrumentationConfig::default()).expect("first initialization succeeds");

    let err = try_init_tracing(InstrumentationConfig::default())
        .err()
        .expect("second initialization is rejected");
    assert!(err.to_string().contains("could not start tracing"));

    drop(tracer);
}
