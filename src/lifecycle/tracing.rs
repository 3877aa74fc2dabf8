//! # Logging
//!
//! [`setup_tracing`] installs a compact `fmt` subscriber filtered by
//! `RUST_LOG`. Without `RUST_LOG` only errors are printed, so command output
//! stays clean.
//!
//! ```bash
//! RUST_LOG=info order-desk order --item Notebook=2
//! RUST_LOG=debug order-desk products list    # request payloads too
//! ```
//!
//! With `RUST_LOG=info`, placing an order logs one line per cart line:
//!
//! ```text
//! INFO submit_order: Submitting order lines=2 eligible=2
//! INFO submit_order: Line placed lines=2 product=Notebook
//! WARN submit_order: Line failed lines=2 product=Pen error=Rejected with status 409: out of stock
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
