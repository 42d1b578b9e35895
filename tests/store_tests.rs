//! End-to-end tests against the directory-backed store

use amal_stats::core::import::{import_bundle, Bundle};
use amal_stats::core::models::{Category, Course, CourseStatus, EntityId, Role, User, Video};
use amal_stats::core::report::{category_report, write_report, ReportFormat};
use amal_stats::core::store::{JsonFileStore, Store};
use amal_stats::core::AcademyService;
use chrono::Utc;
use std::fs;
use tempfile::TempDir;

fn seeded_bundle() -> (Bundle, Category, Course, Video, User) {
    let category = Category::new("Islamic Studies".to_string());
    let instructor = User::new(
        "Yusuf".to_string(),
        "yusuf@example.com".to_string(),
        Role::Instructor,
    );
    let student = User::new(
        "Mariam".to_string(),
        "mariam@example.com".to_string(),
        Role::Student,
    );
    let mut course = Course::new("Tajweed".to_string(), instructor.id, category.id);
    course.status = CourseStatus::Published;
    let video = Video::new(course.id, "Makharij".to_string(), 600.0);

    let bundle = Bundle {
        categories: vec![category.clone()],
        courses: vec![course.clone()],
        videos: vec![video.clone()],
        users: vec![instructor, student.clone()],
    };
    (bundle, category, course, video, student)
}

#[test]
fn import_mutate_and_reopen() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (bundle, category, course, video, student) = seeded_bundle();

    {
        let service = AcademyService::new(JsonFileStore::open(temp_dir.path()).unwrap());
        let summary = import_bundle(service.store(), &bundle).unwrap();
        assert_eq!(summary.total(), 5);

        service.enroll(course.id, student.id).unwrap();
        service.update_progress(course.id, student.id, 100).unwrap();
        service.add_rating(course.id, student.id, 4, None).unwrap();
        service
            .update_student_progress(video.id, student.id, 540.0, false)
            .unwrap();
        service.rollup_category(category.id).unwrap();
    }

    let reopened = JsonFileStore::open(temp_dir.path()).unwrap();
    let stored: Category = reopened.load(category.id).unwrap();
    assert_eq!(stored.stats.total_courses, 1);
    assert_eq!(stored.stats.total_students, 1);
    assert!((stored.stats.average_rating - 4.0).abs() < f64::EPSILON);
    assert!((stored.stats.total_watch_time - 540.0).abs() < f64::EPSILON);
    assert!((stored.stats.completion_rate - 100.0).abs() < f64::EPSILON);

    let user: User = reopened.load(student.id).unwrap();
    let mirror = user.course_enrollment(course.id).unwrap();
    assert_eq!(mirror.progress, 100);
    assert!(mirror.completed_at.is_some());

    let stored_video: Video = reopened.load(video.id).unwrap();
    assert!(stored_video.progress_for(student.id).unwrap().is_completed);
}

#[test]
fn report_written_to_reports_dir() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = JsonFileStore::open(temp_dir.path().join("data")).unwrap();
    let (bundle, category, course, _, student) = seeded_bundle();
    import_bundle(&store, &bundle).unwrap();

    let service = AcademyService::new(store);
    service.enroll(course.id, student.id).unwrap();
    service.rollup_category(category.id).unwrap();

    let report = category_report(service.store(), category.id, Utc::now()).unwrap();
    let reports_dir = temp_dir.path().join("reports");

    let md = write_report(&report, ReportFormat::Markdown, None, &reports_dir).unwrap();
    assert_eq!(md, reports_dir.join("islamic_studies.md"));
    let content = fs::read_to_string(&md).unwrap();
    assert!(content.contains("| Tajweed | 1 |"));

    let explicit = temp_dir.path().join("out.html");
    let html = write_report(&report, ReportFormat::Html, Some(&explicit), &reports_dir).unwrap();
    assert_eq!(html, explicit);
    assert!(fs::read_to_string(&html).unwrap().contains("<h1>Islamic Studies</h1>"));
}

#[test]
fn missing_documents_are_reported() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let service = AcademyService::new(JsonFileStore::open(temp_dir.path()).unwrap());

    assert!(service.enroll(EntityId::new(), EntityId::new()).is_err());
    assert!(service.rollup_category(EntityId::new()).is_err());
    let none: Option<Course> = service.store().find_by_id(EntityId::new()).unwrap();
    assert!(none.is_none());
}

#[test]
fn concurrent_enrollments_on_disk() {
    const STUDENTS: usize = 12;
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let service = AcademyService::new(JsonFileStore::open(temp_dir.path()).unwrap());
    let mut course = Course::new("Seerah".to_string(), EntityId::new(), EntityId::new());
    course.status = CourseStatus::Published;
    service.store().save(&course).unwrap();

    std::thread::scope(|scope| {
        for _ in 0..STUDENTS {
            scope.spawn(|| {
                service.enroll(course.id, EntityId::new()).unwrap();
            });
        }
    });

    let reopened = JsonFileStore::open(temp_dir.path()).unwrap();
    let stored: Course = reopened.load(course.id).unwrap();
    assert_eq!(stored.enrolled_students.len(), STUDENTS);
    assert_eq!(stored.total_enrollments as usize, STUDENTS);
}
