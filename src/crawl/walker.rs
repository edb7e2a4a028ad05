// src/crawl/walker.rs
// =============================================================================
// Breadth-first (level-order) walk over the document tree.
//
// How it works:
// 1. Start at the root, with the root in a FIFO queue (the "frontier")
// 2. Yield the current node
// 3. Move to its next sibling
// 4. No sibling left? Pop the oldest node off the frontier and move to its
//    first child instead. Keep popping until a child turns up or the
//    frontier runs dry (end of the document)
// 5. Whatever node we land on goes onto the frontier, so its own children
//    are only visited after the rest of its level
//
// Every element is yielded exactly once, all of depth d before any of
// depth d + 1.
//
// Rust concepts:
// - Iterator trait: implement next() and get for/take/find/collect for free
// - VecDeque: queue with cheap push_back and pop_front
// - Generics: LevelOrder<N> works for any N that implements TreeNode
// =============================================================================

use std::collections::VecDeque;

use tracing::debug;

use super::links::LinkList;
use super::tree::TreeNode;
use super::validator::admissible_url;

pub struct LevelOrder<N> {
    current: Option<N>,
    frontier: VecDeque<N>,
}

impl<N: TreeNode> LevelOrder<N> {
    // `root` is None for a document without any element
    pub fn new(root: Option<N>) -> Self {
        let mut frontier = VecDeque::new();
        if let Some(node) = &root {
            frontier.push_back(node.clone());
        }

        Self {
            current: root,
            frontier,
        }
    }

    fn advance(&mut self, from: &N) -> Option<N> {
        let mut next = from.next_sibling();

        while next.is_none() {
            match self.frontier.pop_front() {
                Some(parent) => next = parent.first_child(),
                None => break,
            }
        }

        if let Some(node) = &next {
            self.frontier.push_back(node.clone());
        }

        next
    }
}

impl<N: TreeNode> Iterator for LevelOrder<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let current = self.current.take()?;
        self.current = self.advance(&current);
        Some(current)
    }
}

// Walks the tree and collects admissible links, in discovery order
//
// Parameters:
//   root: the root element (None for an empty document)
//   max_urls: the list's capacity; the walk stops as soon as it is full
//
// Returns: the filled LinkList, NOT sorted yet
pub fn collect_links<N: TreeNode>(root: Option<N>, max_urls: usize) -> LinkList {
    let mut links = LinkList::with_capacity(max_urls);

    for node in LevelOrder::new(root) {
        if links.is_full() {
            break;
        }

        if let Some(url) = admissible_url(&node, &links) {
            debug!(url = %url, "link admitted");
            links.push(url);
        }
    }

    links
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why an Iterator instead of a loop that does everything?
//    - The traversal order is the interesting part, and as an iterator it
//      can be tested on its own (collect the ids, compare with the expected
//      order)
//    - collect_links() then just reads like "for each node, in order..."
//
// 2. What does `self.current.take()?` do?
//    - take() moves the value out of the Option and leaves None behind
//    - `?` on an Option returns None from next() early, which ends iteration
//
// 3. Why is breadth-first important here?
//    - With a small max_urls, the links nearest the top of the page win
//    - A depth-first walk would instead fill up on the first deep subtree
// -----------------------------------------------------------------------------
