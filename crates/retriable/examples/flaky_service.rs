//! Example: retrying a flaky call with jittered exponential backoff
//!
//! This example demonstrates:
//! 1. Classifying errors so only transient ones are retried
//! 2. Loading the retry cap from the environment (`RETRIABLE_MAX_RETRIES`)
//! 3. Mapping the final outcome to an exit code
//!
//! Run with:
//! ```bash
//! RUST_LOG=warn RETRIABLE_MAX_RETRIES=4 cargo run -p retriable --example flaky_service
//! ```

use retriable::{Classify, OutcomeCodes, RetriableSet, RetryConfig, RetryExecutor, catch_errors};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ServiceErrorKind {
    Unavailable,
    Rejected,
}

#[derive(Debug)]
struct ServiceError {
    kind: ServiceErrorKind,
    message: String,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ServiceError {}

impl Classify for ServiceError {
    type Kind = ServiceErrorKind;

    fn kind(&self) -> ServiceErrorKind {
        self.kind
    }
}

/// A simulated service that is unavailable for the first few calls
struct FlakyService {
    calls: AtomicU32,
    outage: u32,
}

impl FlakyService {
    fn fetch(&self) -> Result<String, ServiceError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.outage {
            println!("  Call {}: unavailable", call);
            Err(ServiceError {
                kind: ServiceErrorKind::Unavailable,
                message: format!("503 on call {}", call),
            })
        } else {
            println!("  Call {}: ok", call);
            Ok(format!("payload after {} calls", call))
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = RetryConfig::from_env()?;
    let executor = RetryExecutor::from_config(&config);
    let retriable = RetriableSet::from([ServiceErrorKind::Unavailable]);
    let codes = OutcomeCodes::from([
        (ServiceErrorKind::Unavailable, 75),
        (ServiceErrorKind::Rejected, 77),
    ]);

    let service = FlakyService {
        calls: AtomicU32::new(0),
        outage: 2,
    };

    println!(
        "Fetching with max_retries = {:?}",
        executor.max_retries()
    );

    let work = || {
        let code = catch_errors(&codes, || {
            let body = executor.execute(&retriable, || service.fetch())?;
            println!("Received: {}", body);
            Ok::<(), ServiceError>(())
        });
        code.map_err(anyhow::Error::from)
    };

    #[cfg(unix)]
    let code = retriable::with_default_sigint(work)??;
    #[cfg(not(unix))]
    let code = work()?;

    println!("Exit code: {}", code);
    std::process::exit(code);
}
