//! Request matching logic.
//!
//! # Responsibilities
//! - Match the request method (GET and HEAD only)
//! - Match the path suffix (`.css`, case-sensitive)
//! - Combine conditions with AND semantics
//!
//! # Design Decisions
//! - Only the path is inspected; the query string never affects matching
//! - No regex to guarantee O(n) matching

use axum::body::Body;
use axum::http::{Method, Request};

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, req: &Request<Body>) -> bool;
}

/// Matches one of a fixed set of methods.
#[derive(Debug, Clone)]
pub struct MethodMatcher {
    methods: Vec<Method>,
}

impl MethodMatcher {
    pub fn new(methods: impl IntoIterator<Item = Method>) -> Self {
        Self {
            methods: methods.into_iter().collect(),
        }
    }

    /// GET and HEAD, the methods that can be answered with a stylesheet.
    pub fn read_only() -> Self {
        Self::new([Method::GET, Method::HEAD])
    }
}

impl Matcher for MethodMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        self.methods.contains(req.method())
    }
}

/// Matches the request path suffix.
#[derive(Debug, Clone)]
pub struct PathSuffixMatcher {
    suffix: String,
}

impl PathSuffixMatcher {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl Matcher for PathSuffixMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        req.uri().path().ends_with(&self.suffix)
    }
}

/// Combines multiple matchers with AND semantics.
#[derive(Debug)]
pub struct AndMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AndMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AndMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        self.matchers.iter().all(|m| m.matches(req))
    }
}

/// The filter in front of the stylesheet middleware: GET/HEAD for `*.css`.
pub fn stylesheet_matcher() -> AndMatcher {
    AndMatcher::new(vec![
        Box::new(MethodMatcher::read_only()),
        Box::new(PathSuffixMatcher::new(".css")),
    ])
}
