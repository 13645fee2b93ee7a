//! Two-class Priority Policy
//!
//! Customers with at most `threshold` items ("small") are placed behind every
//! small customer already waiting but ahead of every waiting large customer.
//! Large customers always join the tail. Nobody ever preempts the customer
//! currently at the till.
//!
//! Admission keeps the queue partitioned as `[small..., large...]`, so the
//! estimate below can skip large customers without reordering anything.

use crate::models::server::QueuedCustomer;
use std::collections::VecDeque;

/// Service seconds of queued customers that would still be ahead of a
/// candidate with `item_count` items
pub(super) fn queued_work_ahead(
    queue: &VecDeque<QueuedCustomer>,
    item_count: u32,
    threshold: u32,
) -> u64 {
    let large = item_count > threshold;
    queue
        .iter()
        .filter(|queued| large || queued.item_count <= threshold)
        .fold(0, |total: u64, queued| total.saturating_add(queued.service_seconds))
}

/// Small customers go right after the last queued small customer (or to the
/// head if there is none); large customers go to the tail
pub(super) fn admission_index(
    queue: &VecDeque<QueuedCustomer>,
    item_count: u32,
    threshold: u32,
) -> usize {
    if item_count > threshold {
        return queue.len();
    }
    queue
        .iter()
        .rposition(|queued| queued.item_count <= threshold)
        .map_or(0, |last_small| last_small + 1)
}
