// src/crawl/tree.rs
// =============================================================================
// The document tree, as seen by the walker and the validator.
//
// The walker never talks to `scraper` directly. It only needs five things
// from a node, captured by the `TreeNode` trait:
//   - its tag name
//   - an attribute lookup
//   - its href resolved to an absolute URL
//   - its first child element
//   - its next sibling element
//
// `HtmlNode` implements the trait on top of a parsed `scraper::Html`
// document. Tests implement it on a small in-memory tree instead, so the
// traversal can be checked without HTML parsing or network access.
//
// Rust concepts:
// - Traits: shared behaviour that several types can implement
// - Lifetimes: HtmlNode<'a> borrows from the parsed document and base URL,
//   so it can never outlive them
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use url::Url;

// Everything the traversal needs to know about one element.
//
// Only element nodes are part of this view: text and comment nodes are
// skipped over by first_child() and next_sibling().
pub trait TreeNode: Clone {
    /// Lowercase tag name, e.g. "a" or "div"
    fn tag(&self) -> &str;

    /// Raw attribute value exactly as written in the document
    fn attribute(&self, name: &str) -> Option<&str>;

    /// The href attribute resolved against the document base
    ///
    /// None when there is no href, it is empty, or it can't be resolved.
    fn resolved_href(&self) -> Option<String>;

    fn first_child(&self) -> Option<Self>;

    fn next_sibling(&self) -> Option<Self>;
}

// Resolves a (possibly relative) href against a base URL
//
// Examples with base = "https://example.com/page":
//   "/docs"             -> Some("https://example.com/docs")
//   "other"             -> Some("https://example.com/other")
//   "https://other.com" -> Some("https://other.com/")
//   ""                  -> None
pub fn resolve_href(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    // join() handles both cases: absolute hrefs replace the base entirely
    base.join(href).ok().map(|url| url.to_string())
}

// Works out the URL relative links are resolved against
//
// That's the page URL (after redirects), unless the document declares a
// <base href="...">, in which case the first such element wins.
pub fn document_base(document: &Html, page_url: &Url) -> Url {
    let declared = Selector::parse("base[href]").ok().and_then(|selector| {
        document
            .select(&selector)
            .next()
            .and_then(|element| element.value().attr("href"))
            .and_then(|href| page_url.join(href.trim()).ok())
    });

    declared.unwrap_or_else(|| page_url.clone())
}

// An element of a parsed HTML document
#[derive(Clone)]
pub struct HtmlNode<'a> {
    element: ElementRef<'a>,
    base: &'a Url,
}

impl<'a> HtmlNode<'a> {
    // The <html> element. html5ever always creates one, even for fragments.
    pub fn root(document: &'a Html, base: &'a Url) -> Self {
        Self {
            element: document.root_element(),
            base,
        }
    }

    fn wrap(&self, element: ElementRef<'a>) -> Self {
        Self {
            element,
            base: self.base,
        }
    }
}

impl<'a> TreeNode for HtmlNode<'a> {
    fn tag(&self) -> &str {
        self.element.value().name()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    fn resolved_href(&self) -> Option<String> {
        resolve_href(self.base, self.attribute("href")?)
    }

    fn first_child(&self) -> Option<Self> {
        self.element
            .children()
            .find_map(ElementRef::wrap)
            .map(|element| self.wrap(element))
    }

    fn next_sibling(&self) -> Option<Self> {
        self.element
            .next_siblings()
            .find_map(ElementRef::wrap)
            .map(|element| self.wrap(element))
    }
}


// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `TreeNode: Clone`?
//    - The walker keeps a node as "current" AND puts it in its queue
//    - Both HtmlNode and TestNode are just a couple of references, cloning
//      them copies pointers, not the document
//
// 2. What is find_map?
//    - Walks an iterator and returns the first Some(...) a closure produces
//    - ElementRef::wrap returns None for text/comment nodes, so
//      `children().find_map(ElementRef::wrap)` means "first child ELEMENT"
//
// 3. Why does HtmlNode hold `&'a Url` and not `Url`?
//    - Every node in a document shares the same base
//    - Borrowing it means creating a node never allocates
// -----------------------------------------------------------------------------
