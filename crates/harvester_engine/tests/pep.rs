mod common;

use harvester_core::{Expected, Mode, PepStatus};
use harvester_engine::{
    detail_status, index_rows, EngineEvent, ExtractError, HarvestError, HarvestOutcome, IndexRow,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wiremock::MockServer;

fn index(rows: &[(&str, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(code, href)| {
            format!(
                r#"<tr><td><abbr title="type, status">{code}</abbr></td><td><a class="pep reference internal" href="{href}">PEP</a></td><td>Title</td><td>Author</td></tr>"#
            )
        })
        .collect();
    format!(
        r#"<html><body>
        <section id="index-by-category"><table><tr><td>SF</td><td><a href="pep-9999/">ignored</a></td></tr></table></section>
        <section id="numerical-index">
          <table class="pep-zero-table">
            <thead><tr><th>·</th><th>PEP</th><th>Title</th><th>Authors</th></tr></thead>
            <tbody>{body}</tbody>
          </table>
        </section>
        </body></html>"#
    )
}

fn detail(status: &str) -> String {
    format!(
        r#"<html><body><section id="pep-content"><h1>PEP</h1>
        <dl class="rfc2822 field-list simple">
        <dt class="field-odd">Author<span class="colon">:</span></dt>
        <dd class="field-odd">Barry Warsaw</dd>
        <dt class="field-even">Status<span class="colon">:</span></dt>
        <dd class="field-even"><abbr title="Accepted and implementation complete">{status}</abbr></dd>
        <dt class="field-odd">Type<span class="colon">:</span></dt>
        <dd class="field-odd">Process</dd>
        </dl></section></body></html>"#
    )
}

async fn serve_peps(server: &MockServer, peps: &[(&str, &str, &str)]) {
    let rows: Vec<(&str, &str)> = peps.iter().map(|(code, href, _)| (*code, *href)).collect();
    common::serve_html(server, "/peps/", &index(&rows)).await;
    for (_, href, status) in peps {
        common::serve_html(server, &format!("/peps/{href}"), &detail(status)).await;
    }
}

fn table_rows(outcome: HarvestOutcome) -> Vec<(String, String)> {
    let HarvestOutcome::Report(table) = outcome else {
        panic!("expected a report, got {outcome:?}");
    };
    table
        .rows()
        .iter()
        .map(|row| (row[0].clone(), row[1].clone()))
        .collect()
}

#[tokio::test]
async fn tally_counts_every_pep_and_mismatches_are_only_reported() {
    let server = MockServer::start().await;
    serve_peps(
        &server,
        &[
            ("SF", "pep-0001/", "Final"),
            ("PD", "pep-0002/", "Final"),
            ("I", "pep-0003/", "Rejected"),
            ("SA", "pep-0004/", "Active"),
            ("PF", "pep-0005/", "Unknown"),
        ],
    )
    .await;

    let temp = TempDir::new().unwrap();
    let engine = common::engine(&server, temp.path());
    let sink = common::CollectingSink::new();

    let outcome = engine.run(Mode::Pep, &sink).await.unwrap();
    let pairs = |items: &[(&str, &str)]| -> Vec<(String, String)> {
        items
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    };
    assert_eq!(
        table_rows(outcome),
        pairs(&[
            ("Status", "Count"),
            ("Final", "2"),
            ("Rejected", "1"),
            ("Active", "1"),
            ("none observed", "1"),
            ("Total", "5"),
        ])
    );

    let discrepancies = sink.discrepancies();
    assert_eq!(discrepancies.len(), 3);

    assert_eq!(discrepancies[0].link, format!("{}/peps/pep-0002/", server.uri()));
    assert_eq!(discrepancies[0].detected, Some(PepStatus::Final));
    assert_eq!(discrepancies[0].expected, Expected::Status(PepStatus::Draft));

    assert_eq!(discrepancies[1].detected, Some(PepStatus::Rejected));
    assert_eq!(
        discrepancies[1].expected,
        Expected::OneOf(vec![PepStatus::Active, PepStatus::Draft])
    );

    assert_eq!(discrepancies[2].detected, None);
    assert_eq!(discrepancies[2].expected, Expected::Status(PepStatus::Final));
}

#[tokio::test]
async fn progress_is_reported_per_pep() {
    let server = MockServer::start().await;
    serve_peps(&server, &[("SF", "pep-0001/", "Final"), ("SD", "pep-0002/", "Draft")]).await;

    let temp = TempDir::new().unwrap();
    let engine = common::engine(&server, temp.path());
    let sink = common::CollectingSink::new();
    engine.run(Mode::Pep, &sink).await.unwrap();

    let progress: Vec<(usize, usize)> = sink
        .take()
        .into_iter()
        .filter_map(|event| match event {
            EngineEvent::Progress(p) => Some((p.current, p.total)),
            EngineEvent::Discrepancy(_) => None,
        })
        .collect();
    assert_eq!(progress, vec![(1, 2), (2, 2)]);
}

#[tokio::test]
async fn unreachable_detail_page_is_fatal() {
    let server = MockServer::start().await;
    let unreachable = common::unreachable_url();
    common::serve_html(&server, "/peps/", &index(&[("SF", &unreachable)])).await;

    let temp = TempDir::new().unwrap();
    let engine = common::engine(&server, temp.path());

    let err = engine
        .run(Mode::Pep, &common::CollectingSink::new())
        .await
        .unwrap_err();
    match err {
        HarvestError::Fetch { url, .. } => assert_eq!(url, unreachable),
        other => panic!("expected fetch failure, got {other:?}"),
    }
}

#[tokio::test]
async fn detail_page_without_field_list_is_fatal() {
    let server = MockServer::start().await;
    common::serve_html(&server, "/peps/", &index(&[("SF", "pep-0001/")])).await;
    common::serve_html(&server, "/peps/pep-0001/", "<html><body><dl><dt>x</dt></dl></body></html>").await;

    let temp = TempDir::new().unwrap();
    let engine = common::engine(&server, temp.path());

    let err = engine
        .run(Mode::Pep, &common::CollectingSink::new())
        .await
        .unwrap_err();
    assert!(matches!(err, HarvestError::Extract(ExtractError::Missing { .. })));
}

#[test]
fn index_rows_read_code_and_link_from_numerical_section_only() {
    let html = index(&[("SF", "pep-0001/"), ("I", "pep-0002/"), ("", "pep-0003/")]);
    assert_eq!(
        index_rows(&html).unwrap(),
        vec![
            IndexRow { code: Some('F'), href: "pep-0001/".into() },
            IndexRow { code: None, href: "pep-0002/".into() },
            IndexRow { code: None, href: "pep-0003/".into() },
        ]
    );
}

#[test]
fn detail_status_takes_first_known_literal() {
    assert_eq!(detail_status(&detail("April Fool!")).unwrap(), Some(PepStatus::AprilFool));
    assert_eq!(detail_status(&detail("Unknown")).unwrap(), None);
}
