//! Route table for the GeoTrackr single-page application.
//!
//! # Design
//! Three fixed routes map application paths to page views. Matching is done
//! with `matchit`, whose static-segment priority keeps `/users` distinct from
//! `/users/{id}`. Route params are percent-decoded on the way out and
//! percent-encoded when building hrefs.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::RouteError;

const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Page-level view a route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    UsersSearch,
    UserProfile,
}

/// Stable identifier of a route, used for reverse lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Home,
    Users,
    UserProfile,
}

impl RouteName {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteName::Home => "Home",
            RouteName::Users => "Users",
            RouteName::UserProfile => "UserProfile",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Navigation backend. Only path-based browser history is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum History {
    #[default]
    Web,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: RouteName,
    pub view: View,
}

pub const ROUTES: [Route; 3] = [
    Route {
        path: "/",
        name: RouteName::Home,
        view: View::Home,
    },
    Route {
        path: "/users",
        name: RouteName::Users,
        view: View::UsersSearch,
    },
    Route {
        path: "/users/{id}",
        name: RouteName::UserProfile,
        view: View::UserProfile,
    },
];

/// Result of resolving a location against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub name: RouteName,
    pub view: View,
    pub params: HashMap<String, String>,
}

impl RouteMatch {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

pub struct Router {
    history: History,
    routes: Vec<Route>,
    matcher: matchit::Router<usize>,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("history", &self.history)
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

impl Router {
    /// The application's route table.
    pub fn new(history: History) -> Result<Self, RouteError> {
        Self::with_routes(history, &ROUTES)
    }

    pub fn with_routes(history: History, routes: &[Route]) -> Result<Self, RouteError> {
        let mut matcher = matchit::Router::new();
        for (index, route) in routes.iter().enumerate() {
            matcher.insert(route.path.to_ascii_lowercase(), index)?;
        }
        Ok(Self {
            history,
            routes: routes.to_vec(),
            matcher,
        })
    }

    pub fn history(&self) -> History {
        self.history
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve a browser location (path, optionally with `?query` and
    /// `#fragment`) to a route. Static segments match case-insensitively and
    /// one trailing `/` is ignored.
    pub fn resolve(&self, location: &str) -> Option<RouteMatch> {
        let path = location
            .split(['?', '#'])
            .next()
            .filter(|p| !p.is_empty())
            .unwrap_or("/");
        let path = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => path,
        };

        let folded = path.to_ascii_lowercase();
        let matched = self.matcher.at(&folded).ok()?;
        let route = self.routes[*matched.value];
        // Param text comes from the original path, not the case-folded one.
        let params = route
            .path
            .split('/')
            .zip(path.split('/'))
            .filter_map(|(pattern, segment)| {
                let key = pattern.strip_prefix('{')?.strip_suffix('}')?;
                Some((key.to_string(), decode(segment).into_owned()))
            })
            .collect();

        tracing::trace!(location, route = %route.name, "resolved route");
        Some(RouteMatch {
            name: route.name,
            view: route.view,
            params,
        })
    }

    /// Build the path for a named route, substituting `params`.
    pub fn href(&self, name: RouteName, params: &[(&str, &str)]) -> Result<String, RouteError> {
        let route = self
            .routes
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;

        let mut href = String::with_capacity(route.path.len());
        for segment in route.path.split('/').skip(1) {
            href.push('/');
            match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(param) => {
                    let value = params
                        .iter()
                        .find(|(key, _)| *key == param)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| RouteError::MissingParam {
                            route: name.to_string(),
                            param: param.to_string(),
                        })?;
                    href.extend(utf8_percent_encode(value, SEGMENT));
                }
                None => href.push_str(segment),
            }
        }
        Ok(href)
    }
}

/// Percent-decode a param, keeping the raw text when it is not valid UTF-8.
fn decode(value: &str) -> Cow<'_, str> {
    percent_decode_str(value)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(value))
}
