//! Static HTML report.

use huescan_scan::ScanOutcome;
use minijinja::{Environment, context};

use crate::error::Result;
use crate::view::ReportView;

const TEMPLATE_NAME: &str = "report.html";
const TEMPLATE: &str = include_str!("../templates/report.html.j2");
const STYLES: &str = include_str!("../templates/styles.css");

/// Render a scan as a standalone HTML page with inlined styles.
///
/// # Errors
///
/// [`crate::ReportError::Template`] when the template fails to render.
pub fn render_html(outcome: &ScanOutcome, title: &str) -> Result<String> {
    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE)?;

    let view = ReportView::new(&outcome.report);
    let html = env.get_template(TEMPLATE_NAME)?.render(context! {
        title => title,
        styles => STYLES,
        view => view,
        issues => outcome.issues,
    })?;
    Ok(html)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use huescan_css::{Aggregator, SearchMode};

    use super::*;

    fn outcome(mode: SearchMode, text: &str) -> ScanOutcome {
        let mut agg = Aggregator::new(mode);
        agg.ingest(Path::new("a.less"), text);
        ScanOutcome {
            files: agg.files().to_vec(),
            report: agg.finish(0),
            issues: Vec::new(),
        }
    }

    #[test]
    fn test_swatch_markup() {
        let html = render_html(&outcome(SearchMode::Colors, "a { color: #123456; }"), "t").unwrap();
        assert!(html.contains(r#"<li class="color color--dark" style="background-color: #123456">"#));
        assert!(html.contains(r#"<span class="color__counter">1 in 1</span>"#));
        assert!(!html.contains("Keywords"));
    }

    #[test]
    fn test_variables_markup_is_escaped() {
        let html = render_html(
            &outcome(SearchMode::Variables, "@a: #fff;\n@font: \"<b>\";"),
            "t",
        )
        .unwrap();
        assert!(html.contains(r#"<span class="color__var">@a</span>"#));
        assert!(html.contains("<dt>@font</dt>"));
        assert!(!html.contains("<b>"));
    }
}
