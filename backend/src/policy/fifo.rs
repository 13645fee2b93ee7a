//! FIFO (First-In-First-Out) Policy
//!
//! Simplest baseline: every newcomer joins the tail and waits for everyone
//! already in line.
//!
//! # Behavior
//!
//! - Admission always appends to the tail
//! - Expected wait is the full queued workload
//! - Completion order equals admission order

use crate::models::server::QueuedCustomer;
use std::collections::VecDeque;

/// Total service seconds of every queued customer
pub(super) fn queued_work_ahead(queue: &VecDeque<QueuedCustomer>) -> u64 {
    queue
        .iter()
        .fold(0, |total: u64, queued| total.saturating_add(queued.service_seconds))
}

/// FIFO always inserts at the tail
pub(super) fn admission_index(queue: &VecDeque<QueuedCustomer>) -> usize {
    queue.len()
}
