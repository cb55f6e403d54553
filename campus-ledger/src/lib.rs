//! Enrollment ledger for the campus records engine.
//!
//! Two pieces live here:
//!
//! - [`EnrollmentLedger`] — the durable set of enrollment records, with
//!   active-count queries, a per-record version compare-and-set, and the
//!   single atomic commit point for admissions.
//! - [`CourseSections`] — the per-course exclusive sections the admission
//!   controller runs its check pipeline inside. Sections for different
//!   courses are independent; waiters for one course queue FIFO.
//!
//! The ledger is the single logical admission authority: every record
//! mutation flows through it, and its write lock is the atomic boundary
//! that makes the capacity and load invariants hold.

mod error;
mod ledger;
mod sections;

pub use error::{LedgerError, LedgerResult};
pub use ledger::EnrollmentLedger;
pub use sections::{CourseSections, SectionGuard};
