use super::RouteRecord;

/// Landing route of the admin shell. Used after login and as the silent
/// redirect target when a role check fails.
pub const DEFAULT_LANDING: &str = "/admin/dashboard";

/// Admin Route Tree
///
/// The dashboard shell under `/admin`. `requires_auth` is declared once on
/// the root and inherited by every child. Titles are static: admin routes
/// never fetch SEO metadata, the post-navigation hook copies `title` into
/// the document instead.
pub fn admin_routes() -> RouteRecord {
    RouteRecord::new("/admin")
        .view("layouts/dashboard/DashboardLayout")
        .requires_auth(true)
        .redirect(DEFAULT_LANDING)
        .children(vec![
            RouteRecord::new("dashboard")
                .name("Dashboard")
                .title("Dashboard - Gudang Grosiran")
                .view("views/admin/dashboard/DefaultDashboard"),
            // --- Content Pages ---
            RouteRecord::new("pages/about")
                .name("About")
                .title("Pages About - Gudang Grosiran")
                .view("views/admin/pages/about/About"),
            RouteRecord::new("pages/settings")
                .name("Settings Pages About")
                .title("Settings")
                .roles(["admin"])
                .view("views/admin/pages/settings/settings"),
            RouteRecord::new("pages/blogs")
                .name("Blogs")
                .title("Blogs - Gudang Grosiran")
                .view("views/admin/pages/blogs/Blogs"),
            RouteRecord::new("pages/blogs/:id")
                .name("Blog Detail")
                .title("Blog Detail - Gudang Grosiran")
                .view("views/admin/pages/blogs/DetailBlogs"),
            // --- Catalogue ---
            RouteRecord::new("ecommerce/products")
                .name("Products")
                .title("Products - Gudang Grosiran")
                .view("views/admin/pages/products/Products"),
            RouteRecord::new("ecommerce/products/add")
                .name("Add Product")
                .title("Add Product - Gudang Grosiran")
                .view("views/admin/pages/products/AddProduct"),
            RouteRecord::new("ecommerce/products/:id")
                .name("Edit Product")
                .title("Edit Product - Gudang Grosiran")
                .view("views/admin/pages/products/EditProduct"),
            // --- Style Guide ---
            RouteRecord::new("typography")
                .name("Typography")
                .view("views/admin/typography/TypographyPage"),
            RouteRecord::new("colors")
                .name("Colors")
                .view("views/admin/colors/ColorPage"),
            RouteRecord::new("shadow")
                .name("Shadow")
                .view("views/admin/shadows/ShadowPage"),
            RouteRecord::new("icon/ant")
                .name("AntIcons")
                .view("views/admin/icons/AntDesignIcons"),
            RouteRecord::new("sample-page")
                .name("SamplePage")
                .view("views/admin/StarterPage"),
        ])
}
