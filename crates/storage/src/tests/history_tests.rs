use health_gauge_core::Bucket;

use super::{at, create_test_storage, test_input};
use crate::traits::{GaugeStore, ValueStore};

#[tokio::test]
async fn test_monthly_history_newest_first() {
    let (storage, _temp_dir) = create_test_storage().await;
    let gauge = storage.create_gauge(&test_input("Steps", "steps")).await.unwrap();

    storage.record_value(gauge.id, 50.0, at(2025, 1, 15)).await.unwrap();
    storage.record_value(gauge.id, 75.0, at(2025, 2, 15)).await.unwrap();
    storage.record_value(gauge.id, 100.0, at(2025, 3, 15)).await.unwrap();

    let history = storage.history(gauge.id, Bucket::Month).await.unwrap();
    let labels: Vec<&str> = history.iter().map(|b| b.bucket.as_str()).collect();
    let averages: Vec<f64> = history.iter().map(|b| b.average).collect();
    assert_eq!(labels, vec!["2025-03", "2025-02", "2025-01"]);
    assert_eq!(averages, vec![100.0, 75.0, 50.0]);
}

#[tokio::test]
async fn test_history_averages_within_bucket() {
    let (storage, _temp_dir) = create_test_storage().await;
    let gauge = storage.create_gauge(&test_input("Sleep", "hours")).await.unwrap();

    storage.record_value(gauge.id, 6.0, at(2025, 4, 1)).await.unwrap();
    storage.record_value(gauge.id, 8.0, at(2025, 4, 20)).await.unwrap();
    storage.record_value(gauge.id, 7.0, at(2025, 4, 30)).await.unwrap();

    let history = storage.history(gauge.id, Bucket::Month).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].average, 7.0);
    assert_eq!(history[0].samples, 3);
}

#[tokio::test]
async fn test_history_skips_empty_buckets() {
    let (storage, _temp_dir) = create_test_storage().await;
    let gauge = storage.create_gauge(&test_input("Water", "liters")).await.unwrap();

    storage.record_value(gauge.id, 2.0, at(2024, 11, 3)).await.unwrap();
    storage.record_value(gauge.id, 3.0, at(2025, 2, 3)).await.unwrap();

    let history = storage.history(gauge.id, Bucket::Month).await.unwrap();
    let labels: Vec<&str> = history.iter().map(|b| b.bucket.as_str()).collect();
    assert_eq!(labels, vec!["2025-02", "2024-11"]);
}

#[tokio::test]
async fn test_weekly_history() {
    let (storage, _temp_dir) = create_test_storage().await;
    let gauge = storage.create_gauge(&test_input("Water", "liters")).await.unwrap();

    // Monday and Wednesday of the same week, then the following Monday.
    storage.record_value(gauge.id, 1.0, at(2025, 1, 6)).await.unwrap();
    storage.record_value(gauge.id, 3.0, at(2025, 1, 8)).await.unwrap();
    storage.record_value(gauge.id, 5.0, at(2025, 1, 13)).await.unwrap();

    let history = storage.history(gauge.id, Bucket::Week).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].bucket, "2025-W03");
    assert_eq!(history[0].average, 5.0);
    assert_eq!(history[1].bucket, "2025-W02");
    assert_eq!(history[1].average, 2.0);
}

#[tokio::test]
async fn test_weekly_history_spans_new_year() {
    let (storage, _temp_dir) = create_test_storage().await;
    let gauge = storage.create_gauge(&test_input("Water", "liters")).await.unwrap();

    // Monday 2024-12-30 and Wednesday 2025-01-01 share a calendar week.
    storage.record_value(gauge.id, 2.0, at(2024, 12, 30)).await.unwrap();
    storage.record_value(gauge.id, 4.0, at(2025, 1, 1)).await.unwrap();
    storage.record_value(gauge.id, 9.0, at(2024, 12, 29)).await.unwrap();

    let history = storage.history(gauge.id, Bucket::Week).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].bucket, "2025-W01");
    assert_eq!(history[0].average, 3.0);
    assert_eq!(history[0].samples, 2);
    assert_eq!(history[1].bucket, "2024-W52");
    assert_eq!(history[1].average, 9.0);
}

#[tokio::test]
async fn test_history_is_per_gauge() {
    let (storage, _temp_dir) = create_test_storage().await;
    let a = storage.create_gauge(&test_input("A", "units")).await.unwrap();
    let b = storage.create_gauge(&test_input("B", "units")).await.unwrap();
    storage.record_value(a.id, 10.0, at(2025, 5, 5)).await.unwrap();
    storage.record_value(b.id, 90.0, at(2025, 5, 5)).await.unwrap();

    let history = storage.history(a.id, Bucket::Month).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].average, 10.0);
}

#[tokio::test]
async fn test_history_empty_and_missing() {
    let (storage, _temp_dir) = create_test_storage().await;
    let gauge = storage.create_gauge(&test_input("Empty", "units")).await.unwrap();
    assert!(storage.history(gauge.id, Bucket::Month).await.unwrap().is_empty());
    assert!(storage.history(999, Bucket::Week).await.unwrap_err().is_not_found());
}
