/// Every screen the client navigates between. Paths are parsed at the edge;
/// policy and guards only ever match on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Home,
    Customer,
    Technician,
    MyVisits,
    Organization,
    Users,
    Forbidden,
}

impl Route {
    pub const ALL: [Route; 8] = [
        Route::Login,
        Route::Home,
        Route::Customer,
        Route::Technician,
        Route::MyVisits,
        Route::Organization,
        Route::Users,
        Route::Forbidden,
    ];

    pub fn parse(path: &str) -> Option<Route> {
        match path {
            "/login" => Some(Route::Login),
            "/techvisit/home" => Some(Route::Home),
            "/techvisit/customer" => Some(Route::Customer),
            "/techvisit/technician" => Some(Route::Technician),
            "/techvisit/my-visits" => Some(Route::MyVisits),
            "/admin/organization" => Some(Route::Organization),
            "/admin/users" => Some(Route::Users),
            "/not-authorized" => Some(Route::Forbidden),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Home => "/techvisit/home",
            Route::Customer => "/techvisit/customer",
            Route::Technician => "/techvisit/technician",
            Route::MyVisits => "/techvisit/my-visits",
            Route::Organization => "/admin/organization",
            Route::Users => "/admin/users",
            Route::Forbidden => "/not-authorized",
        }
    }

    /// Reachable without credentials.
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login)
    }

    /// Back-office screens, admin role only.
    pub fn is_admin_only(&self) -> bool {
        matches!(self, Route::Organization | Route::Users)
    }

    /// The technician's own operating surface.
    pub fn is_technician_only(&self) -> bool {
        matches!(self, Route::MyVisits)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
