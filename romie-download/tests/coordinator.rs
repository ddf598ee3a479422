use romie_core::settings::DownloadSettings;
use romie_core::{Catalog, CatalogEntry, HardwareVariant, PatchStatus, Quality, Region};
use romie_download::{
    AssetKind, DownloadCoordinator, DownloadEvent, DownloadOptions, DownloadOutcome, SkipReason,
    plan_downloads,
};
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn verified(title: &str, rom: String, image: String) -> CatalogEntry {
    CatalogEntry {
        title: title.to_string(),
        listing_link: format!("https://site.example/{title}/"),
        filename: format!("{title}.gb"),
        download_link: rom,
        image_link: image,
        region: Region::Usa,
        quality: Quality::Verified,
        patch: PatchStatus::No,
        hardware: HardwareVariant::Classic,
    }
}

async fn file_server() -> MockServer {
    let server = MockServer::start().await;
    for (at, body) in [
        ("/roms/tetris.gb", &b"TETRIS-ROM"[..]),
        ("/covers/tetris.jpg", &b"JPEG"[..]),
        ("/roms/kirby.gb", &b"KIRBY-ROM-DATA"[..]),
    ] {
        Mock::given(method("GET"))
            .and(path(at))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/covers/kirby.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    server
}

fn catalog_for(server: &MockServer) -> Catalog {
    let uri = server.uri();
    Catalog::from(vec![
        verified(
            "Tetris",
            format!("{uri}/roms/tetris.gb"),
            format!("{uri}/covers/tetris.jpg"),
        ),
        verified(
            "Kirby",
            format!("{uri}/roms/kirby.gb"),
            format!("{uri}/covers/kirby.jpg"),
        ),
        // Unresolved entry: both its tasks fail without a request.
        verified("Zelda", String::new(), String::new()),
    ])
}

fn coordinator(options: DownloadOptions) -> DownloadCoordinator {
    DownloadCoordinator::new(&DownloadSettings::default(), "romie-tests", options).unwrap()
}

#[tokio::test]
async fn failures_do_not_affect_siblings() {
    let server = file_server().await;
    let dir = tempfile::tempdir().unwrap();
    let tasks = plan_downloads(&catalog_for(&server), dir.path());
    assert_eq!(tasks.len(), 6);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let coord = coordinator(DownloadOptions {
        concurrency: 2,
        ..DownloadOptions::default()
    });
    let report = coord.run(tasks, &tx).await;

    assert_eq!(report.len(), 6);
    let summary = report.summary();
    assert_eq!(summary.downloaded, 3);
    assert_eq!(summary.failed, 3);
    assert_eq!(summary.bytes, 10 + 4 + 14);

    let results = report.results();
    assert_eq!(results[0].task.title, "Tetris");
    assert_eq!(results[0].outcome, DownloadOutcome::Downloaded { bytes: 10 });
    assert_eq!(results[3].task.kind, AssetKind::Cover);
    match &results[3].outcome {
        DownloadOutcome::Failed { error } => assert!(error.contains("404"), "{error}"),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(results[4].outcome.is_failure());
    assert!(results[5].outcome.is_failure());

    assert_eq!(std::fs::read(dir.path().join("Tetris.gb")).unwrap(), b"TETRIS-ROM");
    assert_eq!(std::fs::read(dir.path().join("Tetris.jpg")).unwrap(), b"JPEG");
    assert_eq!(std::fs::read(dir.path().join("Kirby.gb")).unwrap(), b"KIRBY-ROM-DATA");
    assert!(!dir.path().join("Kirby.jpg").exists());
    assert!(!dir.path().join("Kirby.jpg.part").exists());

    drop(tx);
    let mut finished = 0;
    let mut done_failed = None;
    while let Some(event) = rx.recv().await {
        match event {
            DownloadEvent::Started { total } => assert_eq!(total, 6),
            DownloadEvent::TaskFinished { .. } => finished += 1,
            DownloadEvent::Done { failed } => done_failed = Some(failed),
        }
    }
    assert_eq!(finished, 6);
    assert_eq!(done_failed, Some(3));
}

#[tokio::test]
async fn existing_files_are_skipped_unless_forced() {
    let server = file_server().await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Tetris.gb"), b"OLD").unwrap();
    let (tx, _rx) = mpsc::unbounded_channel();

    let tasks = plan_downloads(&catalog_for(&server), dir.path());
    let report = coordinator(DownloadOptions::default()).run(tasks, &tx).await;
    assert_eq!(
        report.results()[0].outcome,
        DownloadOutcome::Skipped {
            reason: SkipReason::Exists
        }
    );
    assert_eq!(std::fs::read(dir.path().join("Tetris.gb")).unwrap(), b"OLD");

    let tasks = plan_downloads(&catalog_for(&server), dir.path());
    let forced = coordinator(DownloadOptions {
        force: true,
        ..DownloadOptions::default()
    });
    let report = forced.run(tasks, &tx).await;
    assert_eq!(report.results()[0].outcome, DownloadOutcome::Downloaded { bytes: 10 });
    assert_eq!(std::fs::read(dir.path().join("Tetris.gb")).unwrap(), b"TETRIS-ROM");
}

#[tokio::test]
async fn dry_run_touches_nothing() {
    let server = file_server().await;
    let dir = tempfile::tempdir().unwrap();
    let (tx, _rx) = mpsc::unbounded_channel();

    let tasks = plan_downloads(&catalog_for(&server), dir.path());
    let report = coordinator(DownloadOptions {
        dry_run: true,
        ..DownloadOptions::default()
    })
    .run(tasks, &tx)
    .await;

    assert_eq!(report.summary().skipped, 6);
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrency_of_zero_still_runs() {
    let server = file_server().await;
    let dir = tempfile::tempdir().unwrap();
    let (tx, _rx) = mpsc::unbounded_channel();

    let tasks = plan_downloads(&catalog_for(&server), dir.path());
    let report = coordinator(DownloadOptions {
        concurrency: 0,
        ..DownloadOptions::default()
    })
    .run(tasks, &tx)
    .await;

    assert_eq!(report.summary().downloaded, 3);
}
