//! # Site Map
//!
//! Static list of public pages. Purely declarative: the web front end
//! serves it as JSON and as `sitemap.xml`, the CLI prints it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// What kind of page a path is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Home,
    Calculator,
    Legal,
    Info,
}

impl FromStr for PageKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(PageKind::Home),
            "calculator" | "calculators" => Ok(PageKind::Calculator),
            "legal" => Ok(PageKind::Legal),
            "info" => Ok(PageKind::Info),
            other => Err(CalcError::not_found(format!("page kind '{}'", other))),
        }
    }
}

/// One public page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub path: &'static str,
    pub title: &'static str,
    pub kind: PageKind,
    /// Calculator tag (as in `CalculatorRequest`) or API feature backing the page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculator: Option<&'static str>,
}

const fn page(path: &'static str, title: &'static str, kind: PageKind, calculator: Option<&'static str>) -> Page {
    Page { path, title, kind, calculator }
}

static PAGES: &[Page] = &[
    page("/", "Quickcalc - Free Online Calculators", PageKind::Home, None),
    page("/mass-converter", "Mass Converter", PageKind::Calculator, Some("conversion")),
    page("/speed-converter", "Speed Converter", PageKind::Calculator, Some("conversion")),
    page("/length-converter", "Length Converter", PageKind::Calculator, Some("conversion")),
    page("/px-to-em", "Pixel to Em Converter", PageKind::Calculator, Some("px_em")),
    page("/fuel-cost-calculator", "Fuel Cost Calculator", PageKind::Calculator, Some("fuel_cost")),
    page("/modulo-calculator", "Modulo Calculator", PageKind::Calculator, Some("modulo")),
    page("/lucky-number-calculator", "Lucky Number Calculator", PageKind::Calculator, Some("lucky_number")),
    page("/love-calculator", "Love Calculator", PageKind::Calculator, Some("love_score")),
    page("/percentage-calculator", "Percentage Calculator", PageKind::Calculator, Some("percentage")),
    page("/bmi-calculator", "BMI Calculator", PageKind::Calculator, Some("bmi")),
    page("/age-calculator", "Age Calculator", PageKind::Calculator, Some("age")),
    page("/income-tax-calculator", "Income Tax Calculator", PageKind::Calculator, Some("income_tax")),
    page("/algebra-solver", "Algebra Problem Solver", PageKind::Calculator, Some("algebra")),
    page("/about", "About Us", PageKind::Info, None),
    page("/contact", "Contact", PageKind::Info, None),
    page("/privacy-policy", "Privacy Policy", PageKind::Legal, None),
    page("/terms-of-service", "Terms of Service", PageKind::Legal, None),
    page("/disclaimer", "Disclaimer", PageKind::Legal, None),
    page("/cookie-policy", "Cookie Policy", PageKind::Legal, None),
];

/// All public pages, in navigation order
pub fn pages() -> &'static [Page] {
    PAGES
}

/// Look up a page by path (trailing slash tolerated)
pub fn find(path: &str) -> Option<&'static Page> {
    let normalized = match path.trim_end_matches('/') {
        "" => "/",
        p => p,
    };
    PAGES.iter().find(|p| p.path == normalized)
}

/// Pages of one kind
pub fn pages_of(kind: PageKind) -> impl Iterator<Item = &'static Page> {
    PAGES.iter().filter(move |p| p.kind == kind)
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Render `sitemap.xml` for `base_url`.
pub fn sitemap_xml(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    for page in PAGES {
        let priority = match page.kind {
            PageKind::Home => "1.0",
            PageKind::Calculator => "0.8",
            PageKind::Info => "0.5",
            PageKind::Legal => "0.3",
        };
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", xml_escape(&format!("{}{}", base, page.path))));
        xml.push_str(&format!("    <priority>{}</priority>\n", priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_unique_and_absolute() {
        for (i, page) in pages().iter().enumerate() {
            assert!(page.path.starts_with('/'));
            assert!(!pages()[..i].iter().any(|p| p.path == page.path), "duplicate {}", page.path);
        }
    }

    #[test]
    fn test_find() {
        assert_eq!(find("/").unwrap().kind, PageKind::Home);
        assert_eq!(find("/modulo-calculator/").unwrap().calculator, Some("modulo"));
        assert!(find("/nope").is_none());
    }

    #[test]
    fn test_every_kind_present() {
        for kind in [PageKind::Home, PageKind::Calculator, PageKind::Legal, PageKind::Info] {
            assert!(pages_of(kind).next().is_some());
        }
    }

    #[test]
    fn test_page_kind_from_str() {
        assert_eq!("Legal".parse::<PageKind>().unwrap(), PageKind::Legal);
        assert_eq!("calculators".parse::<PageKind>().unwrap(), PageKind::Calculator);
        assert!("blog".parse::<PageKind>().is_err());
        assert_eq!(pages_of("legal".parse().unwrap()).count(), 4);
    }

    #[test]
    fn test_sitemap_xml() {
        let xml = sitemap_xml("https://calc.example/");
        assert!(xml.contains("<loc>https://calc.example/love-calculator</loc>"));
        assert!(xml.contains("<loc>https://calc.example/</loc>"));
        assert_eq!(xml.matches("<url>").count(), pages().len());

        let xml = sitemap_xml("https://calc.example/?a=1&b=2");
        assert!(xml.contains("&amp;"));
    }
}
