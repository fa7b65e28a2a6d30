// End to end in memory tests for the report generation flow:
// calendar fetch, parsing, staged validation, month-scoped consistency,
// artifact naming and persistence.

mod fixtures;

use std::sync::Arc;

use chrono::NaiveDate;
use fixtures::RawEventBuilder;
use timesheets::adapters::in_memory::in_memory_calendar::InMemoryCalendarSource;
use timesheets::adapters::in_memory::in_memory_report_store::InMemoryReportStore;
use timesheets::application::errors::RunError;
use timesheets::application::generate_report::GenerateReportHandler;
use timesheets::core::event::Verdict;
use timesheets::core::ports::ReportStore;
use timesheets::core::report::{Period, ReportKind};

fn handler(
    events: Vec<timesheets::core::event::RawEvent>,
    store: Arc<InMemoryReportStore>,
) -> GenerateReportHandler<InMemoryCalendarSource, InMemoryReportStore> {
    GenerateReportHandler::new(Arc::new(InMemoryCalendarSource::new(events)), store)
}

#[tokio::test]
async fn generates_a_weekly_report_with_verdicts_and_a_fresh_name() {
    let store = Arc::new(InMemoryReportStore::new());
    let events = vec![
        RawEventBuilder::new().on_day(2025, 11, 3, 8).build(),
        RawEventBuilder::new()
            .subject("Office")
            .body("Task: NA\nPhase: NA")
            .on_day(2025, 11, 4, 2)
            .employee("ABC")
            .build(),
        // Unknown task code, rejected at the code stage.
        RawEventBuilder::new()
            .body("WID: W-2\nTask: XX\nPhase: DD")
            .on_day(2025, 11, 5, 4)
            .build(),
    ];
    let handler = handler(events, Arc::clone(&store));

    let period = Period::Weekly {
        as_of: NaiveDate::from_ymd_opt(2025, 11, 14).unwrap(),
    };
    let report = handler.run(ReportKind::Weekly, period).await.unwrap();

    assert_eq!(report.name, "timesheet_weekly_report_2025_11_14_a");
    assert_eq!(report.events.len(), 3);
    assert_eq!(report.conflict_count(), 1);
    assert!(matches!(
        report.events[2].verdict,
        Verdict::RejectedInvalidCode(_)
    ));

    let loaded = store.load(report.id).await.unwrap();
    assert_eq!(loaded.name, report.name);
}

#[tokio::test]
async fn advances_the_name_suffix_on_repeated_runs() {
    let store = Arc::new(InMemoryReportStore::new());
    let events = vec![RawEventBuilder::new().build()];
    let handler = handler(events, Arc::clone(&store));
    let period = Period::Weekly {
        as_of: NaiveDate::from_ymd_opt(2025, 11, 14).unwrap(),
    };

    let first = handler.run(ReportKind::Weekly, period).await.unwrap();
    let second = handler.run(ReportKind::Weekly, period).await.unwrap();

    assert_eq!(first.name, "timesheet_weekly_report_2025_11_14_a");
    assert_eq!(second.name, "timesheet_weekly_report_2025_11_14_b");
}

#[tokio::test]
async fn rejects_a_retroactive_project_id_change_within_the_month() {
    let store = Arc::new(InMemoryReportStore::new());

    // First half of the month: "Riverside Tower" is P100.
    let weekly = handler(
        vec![RawEventBuilder::new().on_day(2025, 11, 3, 8).build()],
        Arc::clone(&store),
    );
    weekly
        .run(
            ReportKind::Weekly,
            Period::Weekly {
                as_of: NaiveDate::from_ymd_opt(2025, 11, 14).unwrap(),
            },
        )
        .await
        .unwrap();

    // Month close: the same project name now claims P999.
    let monthly = handler(
        vec![
            RawEventBuilder::new()
                .subject("Riverside Tower: P999")
                .on_day(2025, 11, 20, 8)
                .build(),
        ],
        Arc::clone(&store),
    );
    let report = monthly
        .run(
            ReportKind::Monthly,
            Period::Monthly {
                year: 2025,
                month: 11,
            },
        )
        .await
        .unwrap();

    assert_eq!(report.name, "timesheet_monthly_report_2025_11_a");
    assert!(matches!(
        report.events[0].verdict,
        Verdict::RejectedInconsistentProject(_)
    ));
}

#[tokio::test]
async fn accepts_a_report_where_every_event_is_rejected() {
    let store = Arc::new(InMemoryReportStore::new());
    let handler = handler(
        vec![RawEventBuilder::new().body("no labels here").build()],
        store,
    );

    let report = handler
        .run(
            ReportKind::Monthly,
            Period::Monthly {
                year: 2025,
                month: 11,
            },
        )
        .await
        .unwrap();

    assert_eq!(report.conflict_count(), 1);
    assert!(report.accepted_events().next().is_none());
}

#[tokio::test]
async fn fails_when_the_period_has_no_events() {
    let store = Arc::new(InMemoryReportStore::new());
    let handler = handler(Vec::new(), store);

    let result = handler
        .run(
            ReportKind::Monthly,
            Period::Monthly {
                year: 2025,
                month: 11,
            },
        )
        .await;

    assert!(matches!(result, Err(RunError::NoEvents)));
}

#[tokio::test]
async fn fails_when_kind_and_period_disagree() {
    let store = Arc::new(InMemoryReportStore::new());
    let handler = handler(vec![RawEventBuilder::new().build()], store);

    let result = handler
        .generate(
            ReportKind::Weekly,
            Period::Monthly {
                year: 2025,
                month: 11,
            },
            vec![RawEventBuilder::new().build()],
        )
        .await;

    assert!(matches!(
        result,
        Err(RunError::KindPeriodMismatch { .. })
    ));
}
