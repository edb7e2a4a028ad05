// src/crawl/validator.rs
// =============================================================================
// Decides whether a node is a link worth keeping.
//
// The checks run in this order and stop at the first failure:
//   1. the element must be an <a>
//   2. its href must resolve to a non-empty absolute URL
//   3. that URL must not have been collected already
//   4. the raw href must not start with '#' (a jump within the same page)
// =============================================================================

use super::links::LinkList;
use super::tree::TreeNode;

// Returns the node's raw absolute URL if the node is an admissible link,
// None otherwise.
pub fn admissible_url<N: TreeNode>(node: &N, discovered: &LinkList) -> Option<String> {
    if node.tag() != "a" {
        return None;
    }

    let url = node.resolved_href()?;
    if url.is_empty() || discovered.contains(&url) {
        return None;
    }

    // resolved_href() succeeded, so the attribute is there
    let href = node.attribute("href")?;
    if href.starts_with('#') {
        return None;
    }

    Some(url)
}
