// Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Installs a test subscriber once per binary; `RUST_LOG` controls output.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Deterministic strings of mixed lengths, including multi-byte prefixes.
pub fn sample_strings(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| match i % 7 {
            0 => String::new(),
            1 => "x".repeat(127),
            2 => "y".repeat(128 + i % 500),
            3 => format!("ünïcode-{i}"),
            _ => i.to_string(),
        })
        .collect()
}
