use engine_logging::engine_warn;
use harvester_core::{
    detect_status, parse_status_code, reconcile, Mode, PepStatus, Report, StatusTally,
};
use scraper::Html;

use super::{resolve, HarvestContext};
use crate::extract::{
    element_text, find_all, find_tag, find_unique_tag, required_attr, ExtractError,
    ExtractionTarget,
};
use crate::session::{fetch_page, FetchFailure};
use crate::{EngineEvent, HarvestError};

/// One PEP as listed in the numerical index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRow {
    pub code: Option<char>,
    pub href: String,
}

/// Rows of the numerical index that link to a PEP page.
///
/// Header rows carry no `td` cells and are skipped.
pub fn index_rows(html: &str) -> Result<Vec<IndexRow>, ExtractError> {
    let document = Html::parse_document(html);
    let section = find_unique_tag(
        document.root_element(),
        &ExtractionTarget::new("section").id("numerical-index"),
    )?;

    let cell_target = ExtractionTarget::new("td");
    let anchor = ExtractionTarget::new("a");
    let mut rows = Vec::new();
    for row in find_all(section, &ExtractionTarget::new("tr")) {
        let mut code = None;
        let mut href = None;
        for (position, cell) in find_all(row, &cell_target).into_iter().enumerate() {
            if position == 0 {
                code = parse_status_code(&element_text(cell));
                continue;
            }
            let link = find_tag(cell, &anchor)?;
            href = Some(required_attr(link, &anchor, "href")?.to_string());
            break;
        }
        if let Some(href) = href {
            rows.push(IndexRow { code, href });
        }
    }
    Ok(rows)
}

/// Status declared in the header field list of a PEP page.
pub fn detail_status(html: &str) -> Result<Option<PepStatus>, ExtractError> {
    let document = Html::parse_document(html);
    let fields = find_unique_tag(
        document.root_element(),
        &ExtractionTarget::new("dl").class("rfc2822 field-list simple"),
    )?;
    Ok(detect_status(&element_text(fields)))
}

/// Count PEPs by the status on their own page, checking each against the
/// index. Mismatches are logged and emitted but never change the counts.
pub async fn pep(ctx: HarvestContext<'_>) -> Result<Option<Report<2>>, HarvestError> {
    let index_url = &ctx.config.pep_url;
    let Some(index) = fetch_page(ctx.session, index_url.as_str(), FetchFailure::Fatal).await?
    else {
        return Ok(None);
    };
    let rows = index_rows(&index.text)?;

    let mut tally = StatusTally::new();
    let total = rows.len();
    for (position, row) in rows.iter().enumerate() {
        let url = resolve(index_url, &row.href)?;
        let Some(page) = fetch_page(ctx.session, url.as_str(), FetchFailure::Fatal).await? else {
            return Ok(None);
        };
        let status = detail_status(&page.text)?;

        if let Some(discrepancy) = reconcile(url.as_str(), row.code, status) {
            engine_warn!("{}", discrepancy);
            ctx.sink.emit(EngineEvent::Discrepancy(discrepancy));
        }
        tally.record(status);
        ctx.progress(Mode::Pep, position + 1, total);
    }
    Ok(Some(tally.into_report()))
}
