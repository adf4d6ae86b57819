//! Dispatch rule table.
//!
//! # Responsibilities
//! - Store the ordered dispatch rules
//! - Report every rule a request matches, in table order
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Rules are evaluated in full; there is no early exit
//! - The last matching rule decides the response, so `/news` overrides `/`

use axum::http::Method;

use crate::routing::matcher::{AndMatcher, Matcher, MethodMatcher, NotMatcher, PathPrefixMatcher};

/// What the edge does once a rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Static `Hello worker!` text.
    Greeting,
    /// Pass the news upstream payload through.
    News,
    /// Pass the exchange-rate upstream payload through.
    ExchangeRate,
    /// `500 Expected GET`.
    RejectMethod,
}

/// A named (condition, action) pair.
#[derive(Debug)]
pub struct Rule {
    name: &'static str,
    matcher: Box<dyn Matcher>,
    action: Action,
}

impl Rule {
    pub fn new(name: &'static str, matcher: Box<dyn Matcher>, action: Action) -> Self {
        Self {
            name,
            matcher,
            action,
        }
    }

    /// A rule for `GET` requests whose path starts with `prefix`.
    pub fn get_prefix(name: &'static str, prefix: &str, action: Action) -> Self {
        Self::new(
            name,
            Box::new(AndMatcher::new(vec![
                Box::new(MethodMatcher::new(Method::GET)),
                Box::new(PathPrefixMatcher::new(prefix)),
            ])),
            action,
        )
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn matches(&self, method: &Method, path: &str) -> bool {
        self.matcher.matches(method, path)
    }
}

/// Ordered rule list evaluated in full for every request.
#[derive(Debug)]
pub struct DispatchTable {
    rules: Vec<Rule>,
}

impl DispatchTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The edge's fixed routes.
    pub fn standard() -> Self {
        Self::new(vec![
            Rule::get_prefix("root", "/", Action::Greeting),
            Rule::get_prefix("news", "/news", Action::News),
            Rule::get_prefix(
                "exchange_rate",
                "/getCurrencyExchangeRate",
                Action::ExchangeRate,
            ),
            Rule::new(
                "reject_method",
                Box::new(NotMatcher::new(Box::new(MethodMatcher::new(Method::GET)))),
                Action::RejectMethod,
            ),
        ])
    }

    /// Every rule that matches, in table order.
    pub fn matching<'a>(&'a self, method: &'a Method, path: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |rule| rule.matches(method, path))
    }

    /// The action that ends up answering the request.
    pub fn resolve(&self, method: &Method, path: &str) -> Option<Action> {
        self.matching(method, path).last().map(Rule::action)
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_and_unmatched_paths_greet() {
        let table = DispatchTable::standard();
        assert_eq!(table.resolve(&Method::GET, "/"), Some(Action::Greeting));
        assert_eq!(table.resolve(&Method::GET, "/foo"), Some(Action::Greeting));
    }

    #[test]
    fn test_later_rules_override_root() {
        let table = DispatchTable::standard();

        let names: Vec<_> = table.matching(&Method::GET, "/news").map(Rule::name).collect();
        assert_eq!(names, vec!["root", "news"]);
        assert_eq!(table.resolve(&Method::GET, "/news"), Some(Action::News));

        let names: Vec<_> = table
            .matching(&Method::GET, "/getCurrencyExchangeRate")
            .map(Rule::name)
            .collect();
        assert_eq!(names, vec!["root", "exchange_rate"]);
        assert_eq!(
            table.resolve(&Method::GET, "/getCurrencyExchangeRate"),
            Some(Action::ExchangeRate)
        );
    }

    #[test]
    fn test_prefix_is_not_segment_aware() {
        let table = DispatchTable::standard();
        assert_eq!(table.resolve(&Method::GET, "/newsfeed"), Some(Action::News));
        assert_eq!(
            table.resolve(&Method::GET, "/getCurrencyExchangeRates/x"),
            Some(Action::ExchangeRate)
        );
    }

    #[test]
    fn test_non_get_methods_rejected() {
        let table = DispatchTable::standard();
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::HEAD, Method::PATCH] {
            assert_eq!(table.resolve(&method, "/news"), Some(Action::RejectMethod));
        }
    }

    #[test]
    fn test_empty_table_resolves_nothing() {
        let table = DispatchTable::new(Vec::new());
        assert_eq!(table.resolve(&Method::GET, "/"), None);
    }
}
