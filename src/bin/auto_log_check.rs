//! Standalone elapsed-time check. Takes no arguments and never fails.
//!
//! Runs exactly what an embedding program gets from
//! `progress_log::check::run_best_effort()`.

use progress_log::check;
use progress_log::utils::init_tracing;

fn main() {
    init_tracing(false);
    check::run_best_effort();
}
