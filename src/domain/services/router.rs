#[cfg(test)]
#[path = "router_test.rs"]
mod tests;

use crate::domain::models::Route;

/// Decides which view may render for the requested route. Protected routes
/// fall back to the login view while signed out.
pub fn guard(route: Route, authenticated: bool) -> Route {
    if route.is_protected() && !authenticated {
        return Route::Login;
    }

    return route;
}

pub struct Router {
    requested: Route,
}

impl Router {
    pub fn new(path: &str) -> Router {
        return Router {
            requested: Route::parse(path),
        };
    }

    pub fn requested(&self) -> Route {
        return self.requested;
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(route = route.path(), "navigate");
        self.requested = route;
    }

    /// Applies the guard and replaces the requested route with the one that
    /// actually renders, so a denied route is not retried on the next frame.
    pub fn resolve(&mut self, authenticated: bool) -> Route {
        let route = guard(self.requested, authenticated);
        if route != self.requested {
            tracing::debug!(
                from = self.requested.path(),
                to = route.path(),
                "Redirecting unauthenticated route"
            );
            self.requested = route;
        }

        return route;
    }
}
