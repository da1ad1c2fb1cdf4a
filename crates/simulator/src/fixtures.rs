//! Expected-call table generation.
//!
//! The network test suite pins its broadcast tests to literal per-node
//! `{reads, writes}` tables. This module renders those tables from one
//! run's counters so regenerating fixtures after a tuning change is a
//! single command instead of a hand-transcription.

use raintree_simulation::StatisticsCollector;
use raintree_types::AddressBook;
use std::fs;
use std::io;
use std::path::Path;

/// Render the expected-call table, one entry per member in membership
/// order. Reads are genuine deliveries; writes are sends.
pub fn expected_call_table(membership: &AddressBook, stats: &StatisticsCollector) -> String {
    let mut out = String::new();
    for (idx, addr) in membership.iter().enumerate() {
        let reads = stats.received_count(addr);
        let writes = stats.sent_count(addr);
        out.push_str(&format!(
            "validatorId({}): {{{}, {}}}, // {}\n",
            idx + 1,
            reads,
            writes,
            addr
        ));
    }
    out
}

/// Write the expected-call table to `path`.
pub fn write_expected_calls(
    path: &Path,
    membership: &AddressBook,
    stats: &StatisticsCollector,
) -> io::Result<()> {
    fs::write(path, expected_call_table(membership, stats))
}
