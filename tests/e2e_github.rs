//! GitHub source E2E tests

mod helper;

use mockito::{Matcher, Server, ServerGuard};

use release_lines::config::{Config, FetchPolicy};
use release_lines::release::github::GitHubReleases;
use release_lines::release::resolver::resolve_target;

use helper::target;

fn source(server: &ServerGuard, per_page: u32) -> GitHubReleases {
    let mut config = Config::default();
    config.github.base_url = server.url();
    config.github.per_page = per_page;
    GitHubReleases::from_config(&config).unwrap()
}

fn releases_body(tags: &[&str]) -> String {
    let items: Vec<String> = tags
        .iter()
        .map(|t| format!(r#"{{"tag_name": "{}", "draft": false}}"#, t))
        .collect();
    format!("[{}]", items.join(","))
}

fn next_link(server: &ServerGuard, page: u32) -> String {
    format!(
        r#"<{}/repositories/42/releases?per_page=3&page={}>; rel="next""#,
        server.url(),
        page
    )
}

fn page_query(page: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("per_page".into(), "3".into()),
        Matcher::UrlEncoded("page".into(), page.into()),
    ])
}

#[tokio::test]
async fn resolves_across_pages_and_stops_at_floor() {
    let mut server = Server::new_async().await;
    let link_to_2 = next_link(&server, 2);
    let link_to_3 = next_link(&server, 3);
    let page1 = server
        .mock("GET", "/repos/prometheus/prometheus/releases")
        .match_query(page_query("1"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("link", &link_to_2)
        .with_body(releases_body(&["v2.4.1", "v2.4.0-rc.0", "v2.3.2"]))
        .create_async()
        .await;
    let page2 = server
        .mock("GET", "/repos/prometheus/prometheus/releases")
        .match_query(page_query("2"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("link", &link_to_3)
        .with_body(releases_body(&["v2.3.1", "nightly", "v2.1.0"]))
        .create_async()
        .await;
    let page3 = server
        .mock("GET", "/repos/prometheus/prometheus/releases")
        .match_query(page_query("3"))
        .expect(0)
        .create_async()
        .await;

    let result = resolve_target(
        &source(&server, 3),
        &target("prometheus/prometheus", "2.2.0"),
        &FetchPolicy::default(),
    )
    .await
    .unwrap();

    page1.assert_async().await;
    page2.assert_async().await;
    page3.assert_async().await;
    assert_eq!(result.to_string(), "[2.4.1 2.3.2]");
}

#[tokio::test]
async fn retries_page_after_server_error() {
    let mut server = Server::new_async().await;
    let failing = server
        .mock("GET", "/repos/owner/repo/releases")
        .match_query(page_query("1"))
        .with_status(502)
        .expect(1)
        .create_async()
        .await;
    let succeeding = server
        .mock("GET", "/repos/owner/repo/releases")
        .match_query(page_query("1"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(releases_body(&["1.0.1", "1.0.0"]))
        .expect(1)
        .create_async()
        .await;

    let result = resolve_target(
        &source(&server, 3),
        &target("owner/repo", "1.0.0"),
        &FetchPolicy { max_attempts: 2 },
    )
    .await
    .unwrap();

    failing.assert_async().await;
    succeeding.assert_async().await;
    assert_eq!(result.to_string(), "[1.0.1]");
}
