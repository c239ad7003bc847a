#[cfg(test)]
#[path = "route_test.rs"]
mod tests;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
}

impl Route {
    /// Resolves a navigation path. Anything unknown lands on the login view.
    pub fn parse(path: &str) -> Route {
        let path = path.trim().trim_end_matches('/');
        match path {
            "/register" => return Route::Register,
            "/dashboard" => return Route::Dashboard,
            _ => return Route::Login,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => return "/login",
            Route::Register => return "/register",
            Route::Dashboard => return "/dashboard",
        }
    }

    pub fn is_protected(&self) -> bool {
        return *self == Route::Dashboard;
    }
}
