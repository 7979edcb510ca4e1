use harvester_core::{Mode, Report};
use scraper::Html;

use super::{resolve, HarvestContext};
use crate::extract::{
    element_text, find_all, find_tag, find_unique_tag, required_attr, ExtractError,
    ExtractionTarget,
};
use crate::session::{fetch_page, FetchFailure};
use crate::HarvestError;

const HEADER: [&str; 3] = ["Article link", "Title", "Editor, author"];

/// Links of the first-level entries in the "What's New" table of contents.
pub fn entry_links(html: &str) -> Result<Vec<String>, ExtractError> {
    let document = Html::parse_document(html);
    let section = find_unique_tag(
        document.root_element(),
        &ExtractionTarget::new("section").id("what-s-new-in-python"),
    )?;
    let toc = find_tag(
        section,
        &ExtractionTarget::new("div").class("toctree-wrapper compound"),
    )?;

    let anchor = ExtractionTarget::new("a");
    find_all(toc, &ExtractionTarget::new("li").class("toctree-l1"))
        .into_iter()
        .map(|entry| -> Result<String, ExtractError> {
            let link = find_tag(entry, &anchor)?;
            required_attr(link, &anchor, "href").map(str::to_string)
        })
        .collect()
}

/// Heading and flattened editor/author list of one article.
pub fn article_fields(html: &str) -> Result<(String, String), ExtractError> {
    let document = Html::parse_document(html);
    let root = document.root_element();
    let heading = element_text(find_tag(root, &ExtractionTarget::new("h1"))?);
    let authors = element_text(find_tag(root, &ExtractionTarget::new("dl"))?).replace('\n', " ");
    Ok((heading, authors))
}

/// One row per "What's New" article. Any failed fetch drops the whole report.
pub async fn whats_new(ctx: HarvestContext<'_>) -> Result<Option<Report<3>>, HarvestError> {
    let index_url = resolve(&ctx.config.main_doc_url, "whatsnew/")?;
    let Some(index) = fetch_page(ctx.session, index_url.as_str(), FetchFailure::AbortHarvest).await?
    else {
        return Ok(None);
    };
    let links = entry_links(&index.text)?;

    let mut report = Report::with_header(HEADER);
    let total = links.len();
    for (position, href) in links.iter().enumerate() {
        let url = resolve(&index_url, href)?;
        let Some(page) = fetch_page(ctx.session, url.as_str(), FetchFailure::AbortHarvest).await?
        else {
            return Ok(None);
        };
        let (heading, authors) = article_fields(&page.text)?;
        report.push([url.to_string(), heading, authors]);
        ctx.progress(Mode::WhatsNew, position + 1, total);
    }
    Ok(Some(report))
}
