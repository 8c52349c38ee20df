//! Shared "load and mount" logic used by every front-end.
//!
//! page source -> `Page` -> mounted `Dashboard` (optionally switched)
//!
//! The CLI commands and the TUI then only differ in presentation.

use std::path::Path;

use crate::cli::PageSource;
use crate::dashboard::{ChartRegistry, Dashboard};
use crate::domain::Period;
use crate::error::AppError;
use crate::io::{Page, PortalClient};

/// Where a page will be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOrigin<'a> {
    Url(&'a str),
    File(&'a Path),
    Empty,
}

impl PageSource {
    /// An explicit `--url` wins over `--page`, which may come from `PORTAL_PAGE`.
    pub fn origin(&self) -> PageOrigin<'_> {
        match (&self.url, &self.page) {
            (Some(url), _) => PageOrigin::Url(url),
            (None, Some(path)) => PageOrigin::File(path),
            (None, None) => PageOrigin::Empty,
        }
    }
}

/// Load the page named by `source`.
///
/// With neither `--page` nor `--url` the page is empty, which mounts nothing.
pub fn load_page(source: &PageSource) -> Result<Page, AppError> {
    match source.origin() {
        PageOrigin::Url(url) => PortalClient::from_env()?.fetch_page(url),
        PageOrigin::File(path) => Page::load(path),
        PageOrigin::Empty => {
            tracing::warn!("no page given (--page, --url or PORTAL_PAGE); nothing to mount");
            Ok(Page::default())
        }
    }
}

/// Mount the dashboard for `page` on an in-memory registry and apply the
/// requested period, if any.
pub fn mount_dashboard(page: &Page, period: Option<Period>) -> Dashboard<ChartRegistry> {
    let mut dash = Dashboard::mount(page, ChartRegistry::new());
    if let Some(period) = period {
        dash.switch_chart_period(period.control_arg());
    }
    dash
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_source_gives_empty_page() {
        let page = load_page(&PageSource::default()).unwrap();
        assert!(page.elements.is_empty());
    }

    #[test]
    fn url_takes_precedence_over_page() {
        let both = PageSource {
            page: Some("dash.html".into()),
            url: Some("/org/dashboard/".to_string()),
        };
        assert_eq!(both.origin(), PageOrigin::Url("/org/dashboard/"));

        let file = PageSource {
            page: Some("dash.html".into()),
            url: None,
        };
        assert_eq!(file.origin(), PageOrigin::File(Path::new("dash.html")));
        assert_eq!(PageSource::default().origin(), PageOrigin::Empty);
    }

    #[test]
    fn loads_attribute_map_and_switches() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"donationChart": {{"data-trends": {{"yearly": {{"labels": ["2024"], "values": [9]}}}}}}}}"#
        )
        .unwrap();

        let source = PageSource {
            page: Some(file.path().to_path_buf()),
            url: None,
        };
        let page = load_page(&source).unwrap();
        let dash = mount_dashboard(&page, Some(Period::Year));

        let state = dash.active_state().unwrap();
        assert_eq!(state.series.labels, vec!["2024"]);
        assert_eq!(state.title.as_deref(), Some("Yearly Donations"));
    }

    #[test]
    fn missing_page_file_is_an_input_error() {
        let source = PageSource {
            page: Some("/definitely/not/here.html".into()),
            url: None,
        };
        let err = load_page(&source).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }
}
