use std::collections::{HashSet, VecDeque};

use log::warn;

use crate::engine::group::Group;
use crate::engine::settings::{SearchOrder, Settings};

/// The work queue of pending groups plus the seen-set that deduplicates
/// previously-encountered group identities.
///
/// The seen-set is logically unbounded. To keep memory bounded it is
/// cleared whenever it reaches `seen_limit`; some already-seen groups may
/// then be re-expanded. That trades deduplication accuracy for bounded
/// memory and is an accepted imprecision, not a correctness concern.
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<Group>,
    seen: HashSet<String>,
    order: SearchOrder,
    preserve_order: bool,
    seen_limit: usize,
    queued_total: u64,
    cache_hit_total: u64,
    seen_resets: u64,
}

impl Frontier {
    pub fn new(settings: &Settings) -> Self {
        Self {
            queue: VecDeque::new(),
            seen: HashSet::new(),
            order: settings.search_order,
            preserve_order: settings.preserve_order,
            seen_limit: settings.seen_limit,
            queued_total: 0,
            cache_hit_total: 0,
            seen_resets: 0,
        }
    }

    /// Enqueue a group unless its identity has been seen before.
    /// Returns true if the group was enqueued.
    pub fn offer(&mut self, group: Group) -> bool {
        let id = group.id(self.preserve_order);
        if self.seen.contains(&id) {
            self.cache_hit_total += 1;
            return false;
        }
        if self.seen.len() >= self.seen_limit {
            warn!(
                "Seen-set reached {} entries; resetting (some groups may be re-expanded)",
                self.seen.len()
            );
            self.seen.clear();
            self.seen_resets += 1;
        }
        self.seen.insert(id);
        self.queue.push_back(group);
        self.queued_total += 1;
        true
    }

    /// Dequeue the next group in the configured traversal order.
    pub fn next(&mut self) -> Option<Group> {
        match self.order {
            SearchOrder::BreadthFirst => self.queue.pop_front(),
            SearchOrder::DepthFirst => self.queue.pop_back(),
        }
    }

    pub fn queue_size(&self) -> usize {
        self.queue.len()
    }

    pub fn cache_size(&self) -> usize {
        self.seen.len()
    }

    pub fn queued_total(&self) -> u64 {
        self.queued_total
    }

    pub fn cache_hit_total(&self) -> u64 {
        self.cache_hit_total
    }

    pub fn seen_resets(&self) -> u64 {
        self.seen_resets
    }
}
