//! Binary technical checks: viewport, canonical, HTTPS, sitemap.
//! None of these has a warning tier.

use crate::analyzer::rules::{CheckOutcome, CheckRule};
use crate::document::Document;
use crate::CheckKind;

/// Declares a pass/fail rule over one boolean signal
macro_rules! presence_rule {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:expr, |$doc:ident| $present:expr,
        pass: ($pass_expl:expr, $pass_rec:expr),
        fail: ($fail_expl:expr, $fail_rec:expr) $(,)?
    ) => {
        $(#[$meta])*
        pub struct $name;

        impl $name {
            pub fn new() -> Self {
                Self
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl CheckRule for $name {
            fn kind(&self) -> CheckKind {
                $kind
            }

            fn evaluate(&self, $doc: &Document) -> CheckOutcome {
                if $present {
                    CheckOutcome::pass($pass_expl, $pass_rec)
                } else {
                    CheckOutcome::fail($fail_expl, $fail_rec)
                }
            }
        }
    };
}

presence_rule!(
    /// `<meta name="viewport">` for mobile-first indexing
    MobileViewportRule, CheckKind::MobileViewport, |doc| doc.has_viewport_meta,
    pass: (
        "Viewport meta tag is present; the page is set up for mobile rendering.",
        "Mobile setup is good. Test the page on small screens to confirm the layout holds."
    ),
    fail: (
        "No viewport meta tag found. Mobile browsers will render the page at desktop width.",
        "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"> to the page head."
    ),
);

presence_rule!(
    /// `<link rel="canonical">`
    CanonicalUrlRule, CheckKind::CanonicalUrl, |doc| doc.has_canonical,
    pass: (
        "Canonical link is present, which prevents duplicate-content dilution.",
        "Canonical tag is set. Make sure it points to the preferred URL of this page."
    ),
    fail: (
        "No canonical link found. Duplicate URLs may split ranking signals.",
        "Add <link rel=\"canonical\" href=\"...\"> pointing to the preferred URL of this page."
    ),
);

presence_rule!(
    /// Decided strictly by the URL scheme
    HttpsRule, CheckKind::Https, |doc| doc.is_https(),
    pass: (
        "Page is served over HTTPS.",
        "HTTPS is in place. Keep certificates renewed and redirect all HTTP traffic."
    ),
    fail: (
        "Page is not served over HTTPS. Browsers flag it as not secure and search engines rank it lower.",
        "Serve the page over HTTPS and redirect HTTP requests to the secure URL."
    ),
);

presence_rule!(
    /// A discoverable XML sitemap reference
    XmlSitemapRule, CheckKind::XmlSitemap, |doc| doc.has_sitemap,
    pass: (
        "An XML sitemap is discoverable for this site.",
        "Sitemap found. Keep it updated as pages are added or removed."
    ),
    fail: (
        "No XML sitemap reference could be discovered.",
        "Publish a sitemap.xml and reference it from robots.txt so crawlers can find every page."
    ),
);
