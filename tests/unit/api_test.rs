//! Tests for API request/response models

use meal_queue_core::core::{AccessPath, MealItem, MealPlanner, PlannerSettings, Principal};
use meal_queue_core::infra::InMemoryMealStore;
use meal_queue_core::runtime::{
    check_edit, health, queue_view, reorder_queue, EditCheckRequest, ReorderRequest,
};

fn planner() -> MealPlanner<InMemoryMealStore> {
    MealPlanner::new(
        PlannerSettings::default(),
        InMemoryMealStore::with_meals(vec![
            MealItem::queued("A", 0).owned_by("u1"),
            MealItem::queued("B", 1).owned_by("u1"),
        ]),
    )
}

#[test]
fn test_check_edit_from_json() {
    let json = r#"{
        "principal": {
            "current_user_id": "admin-1",
            "is_admin": true,
            "admin_mode_active": true,
            "impersonated_user_id": "owner-1"
        },
        "resource_owner_id": "owner-1"
    }"#;
    let req: EditCheckRequest = serde_json::from_str(json).unwrap();
    let resp = check_edit(&req);
    assert!(resp.can_edit);
    assert_eq!(resp.path, AccessPath::Impersonation);
}

#[test]
fn test_check_edit_denied_serializes_path() {
    let resp = check_edit(&EditCheckRequest {
        principal: Principal::anonymous(),
        resource_owner_id: None,
    });
    let value = serde_json::to_value(resp).unwrap();
    assert_eq!(value["can_edit"], false);
    assert_eq!(value["path"], "denied");
}

#[tokio::test]
async fn test_reorder_queue_roundtrip() {
    let planner = planner();
    let resp = reorder_queue(
        &planner,
        &Principal::user("u1"),
        ReorderRequest {
            owner_id: "u1".into(),
            meal_id: "B".into(),
            from_index: 1,
            to_index: 0,
        },
    )
    .await
    .unwrap();
    assert!(resp.failed.is_empty());
    assert_eq!(resp.updates.len(), 2);
    let ids: Vec<_> = resp.queue.unscheduled.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["B", "A"]);

    let view = queue_view(&planner, "u1").await.unwrap();
    assert_eq!(view.unscheduled[0].id, "B");
}

#[tokio::test]
async fn test_reorder_queue_error_is_string() {
    let planner = planner();
    let err = reorder_queue(
        &planner,
        &Principal::user("u1"),
        ReorderRequest {
            owner_id: "u1".into(),
            meal_id: "A".into(),
            from_index: 0,
            to_index: 9,
        },
    )
    .await
    .unwrap_err();
    assert!(err.starts_with("invalid move"));
}

#[test]
fn test_health() {
    assert!(health().ok);
}
