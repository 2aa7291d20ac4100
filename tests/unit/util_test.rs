//! Tests for utility functions

use meal_queue_core::util::{now_ms, MealId, QueuePosition, UserId};

#[test]
fn test_now_ms_is_monotonic_enough() {
    let a = now_ms();
    let b = now_ms();
    assert!(a > 0);
    assert!(b >= a);
}

#[test]
fn test_id_aliases() {
    let user: UserId = "user1".to_string();
    let meal: MealId = "meal1".to_string();
    let pos: QueuePosition = -3;
    assert_eq!(user, "user1");
    assert_eq!(meal, "meal1");
    assert!(pos < 0);
}
