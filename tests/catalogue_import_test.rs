// ==========================================
// 场次目录导入 集成测试
// ==========================================
// 测试目标: CSV 解析、时区补齐、坏行隔离、重复导入覆盖
// ==========================================


use chrono::NaiveDate;
use festival_planner::api::ApiError;
use festival_planner::config::config_keys;
use test_helpers::{create_test_state, write_catalogue_csv, SAMPLE_CATALOGUE};

#[tokio::test]
async fn test_import_sample_catalogue() {
    let (_temp, state) = create_test_state().expect("Failed to create state");
    let csv = write_catalogue_csv(SAMPLE_CATALOGUE).unwrap();

    let report = state
        .catalogue_api
        .import_catalogue(csv.path().to_str().unwrap())
        .await
        .unwrap();
    assert_eq!(report.imported, 6);
    assert!(report.rejected.is_empty());

    let all = state.catalogue_api.list_screenings().unwrap();
    assert_eq!(all.len(), 6);
    assert_eq!(all[0].screening_id, "s1");

    let sunday = state
        .catalogue_api
        .list_screenings_by_date(NaiveDate::from_ymd_opt(2025, 3, 16).unwrap())
        .unwrap();
    let ids: Vec<&str> = sunday.iter().map(|s| s.screening_id.as_str()).collect();
    assert_eq!(ids, vec!["s5", "s6"]);

    let s1 = state.catalogue_api.get_screening("s1").unwrap();
    assert_eq!(s1.venue_name, "Cinema X");
    assert_eq!(s1.section.as_deref(), Some("Competition"));
}

#[tokio::test]
async fn test_naive_times_use_festival_offset() {
    let (_temp, state) = create_test_state().unwrap();
    state
        .config_manager
        .set_global_config_value(config_keys::FESTIVAL_UTC_OFFSET, "+01:00")
        .unwrap();

    let csv = write_catalogue_csv(
        "screening_id,film_title,start,duration_minutes,venue_id\n\
         n1,Naive,2025-03-15 23:30,90,X\n",
    )
    .unwrap();
    state
        .catalogue_api
        .import_catalogue(csv.path().to_str().unwrap())
        .await
        .unwrap();

    let n1 = state.catalogue_api.get_screening("n1").unwrap();
    assert_eq!(n1.start.offset().local_minus_utc(), 3600);
    assert_eq!(n1.start.to_rfc3339(), "2025-03-15T23:30:00+01:00");
}

#[tokio::test]
async fn test_bad_rows_are_reported_not_fatal() {
    let (_temp, state) = create_test_state().unwrap();
    let csv = write_catalogue_csv(
        "screening_id,film_title,start,duration_minutes,venue_id\n\
         ok1,Fine,2025-03-15T14:00:00+01:00,100,X\n\
         bad1,No Time,tomorrow,100,X\n\
         bad2,Zero,2025-03-15T16:00:00+01:00,0,X\n\
         ,Anonymous,2025-03-15T18:00:00+01:00,90,X\n\
         ok2,No Venue,2025-03-15T20:00:00+01:00,95,\n",
    )
    .unwrap();

    let report = state
        .catalogue_api
        .import_catalogue(csv.path().to_str().unwrap())
        .await
        .unwrap();

    assert_eq!(report.imported, 2);
    let rows: Vec<usize> = report.rejected.iter().map(|r| r.row).collect();
    assert_eq!(rows, vec![3, 4, 5]);
    assert_eq!(report.rejected[0].screening_id.as_deref(), Some("bad1"));
    assert!(report.rejected[2].screening_id.is_none());

    // 未解析场馆以空标识入库
    let ok2 = state.catalogue_api.get_screening("ok2").unwrap();
    assert_eq!(ok2.venue_id, "");
}

#[tokio::test]
async fn test_reimport_updates_existing_screenings() {
    let (_temp, state) = create_test_state().unwrap();
    let first = write_catalogue_csv(
        "screening_id,film_title,start,duration_minutes,venue_id\n\
         r1,Draft Title,2025-03-15T14:00:00+01:00,100,X\n",
    )
    .unwrap();
    let second = write_catalogue_csv(
        "screening_id,film_title,start,duration_minutes,venue_id\n\
         r1,Final Title,2025-03-15T14:30:00+01:00,100,Y\n",
    )
    .unwrap();

    for csv in [&first, &second] {
        state
            .catalogue_api
            .import_catalogue(csv.path().to_str().unwrap())
            .await
            .unwrap();
    }

    assert_eq!(state.catalogue_api.count_screenings().unwrap(), 1);
    let r1 = state.catalogue_api.get_screening("r1").unwrap();
    assert_eq!(r1.film_title, "Final Title");
    assert_eq!(r1.venue_id, "Y");
}

#[tokio::test]
async fn test_missing_file_and_empty_path() {
    let (_temp, state) = create_test_state().unwrap();

    assert!(matches!(
        state.catalogue_api.import_catalogue("").await.unwrap_err(),
        ApiError::InvalidInput(_)
    ));
    assert!(matches!(
        state
            .catalogue_api
            .import_catalogue("/nonexistent/catalogue.csv")
            .await
            .unwrap_err(),
        ApiError::ImportError(_)
    ));
}

#[tokio::test]
async fn test_oversized_duration_is_rejected_and_schedule_stays_usable() {
    let (_temp, state) = create_test_state().unwrap();
    let csv = write_catalogue_csv(
        "screening_id,film_title,start,duration_minutes,venue_id\n\
         big,Huge,2025-03-15T14:00:00+01:00,999999999999999,X\n\
         s2,Normal,2025-03-15T15:00:00+01:00,90,Y\n",
    )
    .unwrap();

    let report = state
        .catalogue_api
        .import_catalogue(csv.path().to_str().unwrap())
        .await
        .unwrap();
    assert_eq!(report.imported, 1);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].screening_id.as_deref(), Some("big"));

    state.schedule_api.add_selection("s2").await.unwrap();
    assert!(matches!(
        state.schedule_api.preview_conflicts("big").unwrap_err(),
        ApiError::NotFound(_)
    ));
}
