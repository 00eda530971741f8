use super::*;
use crate::pager::LoadState;

fn page_of(rows: Vec<&'static str>, total: u64) -> Page<&'static str> {
    Page { rows, total_record_count: total }
}

#[tokio::test]
async fn fetch_listing_loads_first_page() {
    let mut pager = Pager::for_request(1, 10);
    let rows = fetch_listing(&mut pager, |offset, limit| async move {
        assert_eq!(offset, 0);
        assert_eq!(limit, 10);
        Ok(page_of(vec!["a", "b"], 2))
    })
    .await
    .unwrap();

    assert_eq!(rows, vec!["a", "b"]);
    assert_eq!(pager.state(), LoadState::Loaded);
    assert_eq!(pager.total_pages(), 1);
}

#[tokio::test]
async fn fetch_listing_refetches_after_page_overshoot() {
    // Page 9 of a 25-record set: clamp to page 3 and fetch again.
    let mut pager = Pager::for_request(9, 10);
    let rows = fetch_listing(&mut pager, |offset, _limit| async move {
        if offset >= 25 {
            Ok(page_of(vec![], 25))
        } else {
            Ok(page_of(vec!["x", "y", "z", "w", "v"], 25))
        }
    })
    .await
    .unwrap();

    assert_eq!(rows.len(), 5);
    assert_eq!(pager.page(), 3);
    assert_eq!(pager.state(), LoadState::Loaded);
}

#[tokio::test]
async fn fetch_listing_empty_dataset_is_empty_state() {
    let mut pager = Pager::for_request(1, 10);
    let rows: Vec<&str> = fetch_listing(&mut pager, |_, _| async { Ok(page_of(vec![], 0)) })
        .await
        .unwrap();

    assert!(rows.is_empty());
    assert_eq!(pager.state(), LoadState::Empty);
}

#[tokio::test]
async fn fetch_listing_surfaces_backend_errors() {
    let mut pager = Pager::for_request(1, 10);
    let result: Result<Vec<&str>, _> = fetch_listing(&mut pager, |_, _| async {
        Err(ApiError::Decode("bad envelope".into()))
    })
    .await;

    assert!(result.is_err());
}

#[test]
fn list_query_builds_positioned_pager() {
    let query = ListQuery { page: Some(3), size: Some(20), q: Some("alice".into()), notice: None };
    let pager = query.pager();
    assert_eq!(pager.page(), 3);
    assert_eq!(pager.size(), 20);
    assert_eq!(pager.filter(), "alice");
}

#[test]
fn list_query_defaults() {
    let pager = ListQuery::default().pager();
    assert_eq!(pager.page(), 1);
    assert_eq!(pager.size(), DEFAULT_PAGE_SIZE);
    assert_eq!(pager.filter(), "");
}

#[test]
fn notice_redirect_encodes_the_banner_text() {
    let redirect = notice_redirect("/user", "User Promoted to Admin");
    let response = redirect.into_response();
    let location = response.headers().get(axum::http::header::LOCATION).unwrap();
    assert_eq!(location, "/user?notice=User%20Promoted%20to%20Admin");
}
