use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SitemapRoute {
    /// `"/"` for the home page, otherwise a path segment without a leading slash.
    pub path: &'static str,
    pub changefreq: &'static str,
    pub priority: f32,
}

/// The site's indexable pages. No fragments, query strings or admin routes.
pub const DEFAULT_ROUTES: &[SitemapRoute] = &[
    SitemapRoute { path: "/", changefreq: "weekly", priority: 1.0 },
    SitemapRoute { path: "gems", changefreq: "weekly", priority: 0.9 },
    SitemapRoute { path: "featured", changefreq: "weekly", priority: 0.8 },
    SitemapRoute { path: "newsletter", changefreq: "monthly", priority: 0.5 },
    SitemapRoute { path: "feature-your-business", changefreq: "monthly", priority: 0.6 },
    SitemapRoute { path: "events", changefreq: "weekly", priority: 0.7 },
    SitemapRoute { path: "blog", changefreq: "weekly", priority: 0.7 },
    SitemapRoute { path: "contact", changefreq: "yearly", priority: 0.3 },
    SitemapRoute { path: "privacy", changefreq: "yearly", priority: 0.2 },
    SitemapRoute { path: "about", changefreq: "yearly", priority: 0.2 },
];

pub fn render_sitemap(base_url: &str, routes: &[SitemapRoute]) -> String {
    let base = base_url.trim_end_matches('/');
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for route in routes {
        let loc = if route.path == "/" {
            format!("{base}/")
        } else {
            format!("{base}/{}", route.path.trim_start_matches('/'))
        };
        // Writing into a String cannot fail.
        let _ = writeln!(
            xml,
            "  <url><loc>{}</loc><changefreq>{}</changefreq><priority>{:.1}</priority></url>",
            escape_xml(&loc),
            route.changefreq,
            route.priority
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
