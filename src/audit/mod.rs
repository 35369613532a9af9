//! Audit logging for SplitLedger
//!
//! Every change to a group, its members or its expenses is appended to a
//! line-delimited JSON log with before/after snapshots.
//!
//! - `AuditEntry`: one operation on one entity, with optional before/after values.
//! - `AuditLogger`: appends entries to the log file and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
