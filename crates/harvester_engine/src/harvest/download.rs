use std::path::PathBuf;
use std::sync::LazyLock;

use engine_logging::engine_info;
use regex::Regex;
use scraper::Html;

use super::{resolve, HarvestContext};
use crate::extract::{find_tag, required_attr, ExtractError, ExtractionTarget};
use crate::persist::AtomicFileWriter;
use crate::session::{fetch_page, FetchFailure};
use crate::HarvestError;

static ARCHIVE_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pdf-a4\.zip$").expect("archive pattern is valid"));

/// Href of the A4 PDF archive in the first documentation table of the
/// downloads page.
pub fn locate_archive(html: &str) -> Result<String, ExtractError> {
    let document = Html::parse_document(html);
    let main = find_tag(
        document.root_element(),
        &ExtractionTarget::new("div").attr("role", "main"),
    )?;
    let table = find_tag(main, &ExtractionTarget::new("table").class("docutils"))?;
    let anchor = ExtractionTarget::new("a").attr_matches("href", ARCHIVE_HREF.clone());
    let link = find_tag(table, &anchor)?;
    required_attr(link, &anchor, "href").map(str::to_string)
}

/// Save the documentation archive into the downloads directory.
///
/// A failed downloads-page fetch ends the harvest quietly; a failed archive
/// transfer is fatal.
pub async fn download(ctx: HarvestContext<'_>) -> Result<Option<PathBuf>, HarvestError> {
    let downloads_url = resolve(&ctx.config.main_doc_url, "download.html")?;
    let Some(page) =
        fetch_page(ctx.session, downloads_url.as_str(), FetchFailure::AbortHarvest).await?
    else {
        return Ok(None);
    };

    let archive_url = resolve(&downloads_url, &locate_archive(&page.text)?)?;
    let file_name = archive_url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| HarvestError::NoFileName(archive_url.to_string()))?
        .to_string();

    let archive = ctx
        .session
        .get_uncached(archive_url.as_str())
        .await
        .map_err(|source| HarvestError::Fetch {
            url: archive_url.to_string(),
            source,
        })?;

    let writer = AtomicFileWriter::new(ctx.config.downloads_dir());
    let path = writer.write(&file_name, &archive.bytes)?;
    engine_info!("Archive downloaded and saved: {}", path.display());
    Ok(Some(path))
}
