use agrichain_dashboard::models::role::{Participant, ParticipantRole, RoleStatus};
use agrichain_dashboard::models::view::{ALL_FILTER, ViewQuery};
use agrichain_dashboard::services::view_pipeline::{apply, filter};
use chrono::NaiveDate;
use proptest::prelude::*;

fn participant(id: i64, name: String, role: ParticipantRole, status: RoleStatus) -> Participant {
    Participant {
        id,
        wallet_id: format!("0x{:04x}...beef", id),
        name,
        role,
        status,
        registration_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        location: "Iowa, USA".to_string(),
    }
}

fn participants() -> impl Strategy<Value = Vec<Participant>> {
    let row = (
        "[A-Za-z ]{1,12}",
        prop::sample::select(ParticipantRole::ALL.to_vec()),
        prop::sample::select(RoleStatus::ALL.to_vec()),
    );
    prop::collection::vec(row, 0..60).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, role, status))| participant(i as i64 + 1, name, role, status))
            .collect()
    })
}

fn searchable(page_size: i32) -> ViewQuery {
    ViewQuery::new(page_size).searching(["name", "walletId", "location"])
}

proptest! {
    #[test]
    fn blank_query_keeps_everything(rows in participants(), blank in "[ \t]{0,3}") {
        let result = apply(&rows, &searchable(10).with_search(blank)).unwrap();
        prop_assert_eq!(result.total_filtered_count, rows.len());
    }

    #[test]
    fn page_never_exceeds_page_size(rows in participants(), page_size in 1i32..30, page in -5i32..20, needle in "[a-z]{0,2}") {
        let query = searchable(page_size).with_search(needle).with_page(page);
        let result = apply(&rows, &query).unwrap();

        prop_assert!(result.items.len() <= page_size as usize);
        if result.total_filtered_count == 0 {
            prop_assert!(result.items.is_empty());
            prop_assert_eq!(result.total_pages, 0);
            prop_assert_eq!(result.current_page, 1);
        } else {
            prop_assert!(result.current_page >= 1 && result.current_page <= result.total_pages);
        }
    }

    #[test]
    fn pipeline_is_deterministic(rows in participants(), needle in "[a-z]{0,3}") {
        let query = searchable(7).with_search(needle);
        prop_assert_eq!(apply(&rows, &query).unwrap(), apply(&rows, &query).unwrap());
    }

    #[test]
    fn search_ignores_case(rows in participants(), needle in "[a-zA-Z]{1,3}") {
        let lower = apply(&rows, &searchable(100).with_search(needle.to_lowercase())).unwrap();
        let upper = apply(&rows, &searchable(100).with_search(needle.to_uppercase())).unwrap();
        prop_assert_eq!(lower, upper);
    }

    #[test]
    fn equality_filters_commute(
        rows in participants(),
        role in prop::sample::select(ParticipantRole::ALL.to_vec()),
        status in prop::sample::select(RoleStatus::ALL.to_vec()),
    ) {
        let role_first = ViewQuery::new(100).with_filter("role", role.as_str()).with_filter("status", status.as_str());
        let status_first = ViewQuery::new(100).with_filter("status", status.as_str()).with_filter("role", role.as_str());

        let a = filter(&rows, &role_first);
        let b = filter(&rows, &status_first);
        prop_assert_eq!(a.records(), b.records());
        prop_assert!(a.iter().all(|p| p.role == role && p.status == status));
    }

    #[test]
    fn all_sentinel_is_unconstrained(rows in participants()) {
        let query = ViewQuery::new(100).with_filter("role", ALL_FILTER).with_filter("status", ALL_FILTER);
        prop_assert_eq!(filter(&rows, &query).count(), rows.len());
    }
}

#[test]
fn out_of_range_page_is_clamped() {
    let rows: Vec<Participant> = (1..=25)
        .map(|id| participant(id, format!("Farmer {id}"), ParticipantRole::Farmer, RoleStatus::Approved))
        .collect();

    let result = apply(&rows, &searchable(10).with_page(5)).unwrap();
    assert_eq!(result.total_filtered_count, 25);
    assert_eq!(result.total_pages, 3);
    assert_eq!(result.current_page, 3);
    assert_eq!(result.items.len(), 5);
    assert_eq!(result.items[0].id, 21);
    assert!(!result.has_next());
    assert!(result.has_prev());
}

#[test]
fn zero_page_size_is_rejected() {
    let rows = vec![participant(1, "Only".to_string(), ParticipantRole::Farmer, RoleStatus::Pending)];
    assert!(apply(&rows, &searchable(0)).is_err());
}
