use super::RouteRecord;

/// Public Route Tree
///
/// Screens reachable without a session, rendered in the blank layout. The
/// guard additionally treats `/`, `/login`, `/login1` and `/register` as
/// public whatever their metadata says.
///
/// Every route here gets SEO metadata injected after navigation; the landing
/// page pins its slug to `home`, the others derive it from their last path
/// segment.
pub fn public_routes() -> RouteRecord {
    RouteRecord::new("/")
        .view("layouts/blank/BlankLayout")
        .requires_auth(false)
        .children(vec![
            // GET /
            RouteRecord::new("")
                .name("Landing")
                .view("views/landing/LandingPage")
                .slug("home"),
            // Primary sign-in screen. Signed-in users are bounced to the dashboard.
            RouteRecord::new("/login")
                .name("Login")
                .view("views/authentication/LoginPage"),
            // Alternate sign-in screen, same bounce rule as `/login`.
            RouteRecord::new("/login1")
                .name("LoginAlt")
                .view("views/authentication/auth/LoginPage"),
            RouteRecord::new("/register")
                .name("Register")
                .view("views/authentication/auth/RegisterPage"),
            RouteRecord::new("/error")
                .name("Error404")
                .view("views/admin/pages/maintenance/error/Error404Page"),
        ])
}
