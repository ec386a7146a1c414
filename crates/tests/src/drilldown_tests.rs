use pretty_assertions::assert_eq;
use shared_types::{AnalystCourseDetail, Role};
use std::time::Duration;
use view_state::{DetailDrilldown, DetailStatus};

use crate::common;

#[tokio::test]
async fn course_detail_decodes_with_defaults() {
    let (base, _backend) = common::spawn_backend(common::seeded()).await;
    let (_session, api) = common::signed_in(&base, Role::Analyst).await;

    let detail = api.analyst_course_detail(5).await.unwrap();

    assert_eq!(detail.course_name, "Data Engineering");
    assert_eq!(detail.enrollment_count, 1);
    assert_eq!(detail.enrolled_students[0].student_id, common::STUDENT_ID);
    assert_eq!(detail.enrolled_students[0].evaluation_score, 72.5);
    assert!(detail.topics.is_empty());
    assert_eq!(detail.instructor_name, None);
}

#[tokio::test]
async fn later_open_wins_over_a_slower_earlier_one() {
    let mut seed = common::seeded();
    seed.detail_delay_ms.insert(3, 200);
    let (base, _backend) = common::spawn_backend(seed).await;
    let (_session, api) = common::signed_in(&base, Role::Analyst).await;
    let drill: DetailDrilldown<AnalystCourseDetail> = DetailDrilldown::new("analyst-course");

    let (first, second) = futures::join!(drill.open(api.analyst_course_detail(3)), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        drill.open(api.analyst_course_detail(7)).await
    });

    assert!(!first);
    assert!(second);
    let state = drill.state();
    assert!(state.visible);
    assert_eq!(state.status(), Some(DetailStatus::Ready));
    assert_eq!(state.entity().map(|c| c.course_id), Some(7));
}

#[tokio::test]
async fn missing_course_renders_absent() {
    let (base, _backend) = common::spawn_backend(common::seeded()).await;
    let (_session, api) = common::signed_in(&base, Role::Analyst).await;
    let drill: DetailDrilldown<AnalystCourseDetail> = DetailDrilldown::new("analyst-course");

    assert!(drill.open(api.analyst_course_detail(99)).await);

    let state = drill.state();
    assert!(state.visible);
    assert_eq!(state.status(), Some(DetailStatus::Absent));
    assert!(state.entity().is_none());
}

#[tokio::test]
async fn closing_discards_the_pending_detail() {
    let mut seed = common::seeded();
    seed.detail_delay_ms.insert(5, 100);
    let (base, _backend) = common::spawn_backend(seed).await;
    let (_session, api) = common::signed_in(&base, Role::Analyst).await;
    let drill: DetailDrilldown<AnalystCourseDetail> = DetailDrilldown::new("analyst-course");

    let (applied, ()) = futures::join!(drill.open(api.analyst_course_detail(5)), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        drill.close();
    });

    assert!(!applied);
    let state = drill.state();
    assert!(!state.visible);
    assert_eq!(state.status(), None);
}
