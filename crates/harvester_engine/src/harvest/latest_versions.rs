use harvester_core::{parse_version_link, Report};
use scraper::Html;

use super::HarvestContext;
use crate::extract::{element_text, find_all, find_tag, required_attr, ExtractionTarget};
use crate::session::{fetch_page, FetchFailure};
use crate::HarvestError;

const HEADER: [&str; 3] = ["Documentation link", "Version", "Status"];
const ALL_VERSIONS_MARKER: &str = "All versions";

/// `(href, visible text)` of every link in the sidebar's version list.
///
/// The version list is the first sidebar `ul` whose text mentions
/// "All versions"; without one the page layout is not what we expect.
pub fn version_links(html: &str) -> Result<Vec<(String, String)>, HarvestError> {
    let document = Html::parse_document(html);
    let sidebar = find_tag(
        document.root_element(),
        &ExtractionTarget::new("div").class("sphinxsidebarwrapper"),
    )?;
    let list = find_all(sidebar, &ExtractionTarget::new("ul"))
        .into_iter()
        .find(|list| element_text(*list).contains(ALL_VERSIONS_MARKER))
        .ok_or(HarvestError::VersionListNotFound)?;

    let anchor = ExtractionTarget::new("a");
    find_all(list, &anchor)
        .into_iter()
        .map(|link| -> Result<(String, String), HarvestError> {
            let href = required_attr(link, &anchor, "href")?;
            Ok((href.to_string(), element_text(link)))
        })
        .collect()
}

pub async fn latest_versions(ctx: HarvestContext<'_>) -> Result<Option<Report<3>>, HarvestError> {
    let Some(index) = fetch_page(
        ctx.session,
        ctx.config.main_doc_url.as_str(),
        FetchFailure::AbortHarvest,
    )
    .await?
    else {
        return Ok(None);
    };

    let mut report = Report::with_header(HEADER);
    for (href, text) in version_links(&index.text)? {
        let entry = parse_version_link(&text);
        report.push([href, entry.version, entry.status]);
    }
    Ok(Some(report))
}
