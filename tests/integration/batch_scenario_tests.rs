//! End-to-end batch scenarios against a mock render service

#[cfg(test)]
mod tests {
    use crate::common::{MockRenderService, TileFactory, package_entries};
    use std::sync::Arc;
    use tile_batch::{
        BatchOrchestrator, DisplayGrid, Identity, RenderClient, RenderOptions, RenderOutcome,
        Viewport,
    };

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\nrendered";

    fn orchestrator_for(service: &MockRenderService) -> BatchOrchestrator {
        let client = RenderClient::new(&service.uri()).unwrap();
        BatchOrchestrator::new(Arc::new(client))
    }

    /// Two files, one rendered and one rejected with 404
    #[tokio::test]
    async fn test_mixed_batch_scenario() {
        let service = MockRenderService::start().await;
        service.render_ok("5,-3.zip", PNG).await;
        service.render_error("notes.txt", 404, "not found").await;

        let orchestrator = orchestrator_for(&service);
        let files = vec![
            TileFactory::coordinate(5, -3),
            TileFactory::named("notes.txt"),
        ];
        let mut session = orchestrator.submit(files, &RenderOptions::new().with_light("full"));
        let mut grid = DisplayGrid::for_batch(Viewport::default(), session.dispatched());

        let summary = session.drain(&mut grid).await;

        // Two display entries in total
        assert!(grid.is_complete());
        assert_eq!(grid.entries().len(), 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);

        // The failure is labelled from its opaque identity
        let placeholder = grid
            .entries()
            .iter()
            .find(|e| e.is_placeholder())
            .expect("missing failure entry");
        assert_eq!(placeholder.label(), Identity::opaque("notes.txt").to_string());
        assert_eq!(placeholder.caption(), "notes.txt 404 not found");

        // Exactly one archive entry, keyed by the coordinate
        let names: Vec<_> = session.archive().entry_names().collect();
        assert_eq!(names, vec!["5,-3.png"]);

        let package = session.finalize().await.unwrap();
        assert_eq!(
            package_entries(&package),
            vec![("5,-3.png".to_string(), PNG.to_vec())]
        );

        // Both requests carried the light option
        let queries = service.queries().await;
        assert_eq!(queries.len(), 2);
        assert!(queries.iter().all(|q| q.as_deref() == Some("light=full")));
    }

    #[tokio::test]
    async fn test_batch_without_options_sends_no_query() {
        let service = MockRenderService::start().await;
        service.render_ok("0,0.zip", PNG).await;

        let mut session = orchestrator_for(&service)
            .submit(vec![TileFactory::coordinate(0, 0)], &RenderOptions::new());
        session.collect().await;

        assert_eq!(service.queries().await, vec![None]);
    }

    #[tokio::test]
    async fn test_large_batch_every_file_settles_once() {
        let service = MockRenderService::start().await;
        let files = TileFactory::row(7, -10..30);
        for file in &files {
            if file.name.starts_with('-') {
                service.render_error(&file.name, 400, "bad tile").await;
            } else {
                service.render_ok(&file.name, file.name.as_bytes()).await;
            }
        }

        let mut session = orchestrator_for(&service).submit(files, &RenderOptions::new());
        let outcomes = session.collect().await;

        assert_eq!(outcomes.len(), 40);
        let failures = outcomes.iter().filter(|o| !o.is_success()).count();
        assert_eq!(failures, 10);
        assert_eq!(session.archive().len(), 30);

        for outcome in &outcomes {
            if let RenderOutcome::Success { identity, blob } = outcome {
                assert_eq!(session.archive().get(identity), Some(blob));
            }
        }

        let package = session.finalize().await.unwrap();
        assert_eq!(package.entries, 30);
        assert_eq!(package_entries(&package).len(), 30);
    }

    #[tokio::test]
    async fn test_new_batch_gets_fresh_archive() {
        let service = MockRenderService::start().await;
        service.render_ok("1,1.zip", PNG).await;
        service.render_ok("2,2.zip", PNG).await;
        let orchestrator = orchestrator_for(&service);

        let mut first =
            orchestrator.submit(vec![TileFactory::coordinate(1, 1)], &RenderOptions::new());
        first.collect().await;

        let mut second =
            orchestrator.submit(vec![TileFactory::coordinate(2, 2)], &RenderOptions::new());
        second.collect().await;

        assert_eq!(first.archive().entry_names().collect::<Vec<_>>(), vec!["1,1.png"]);
        assert_eq!(second.archive().entry_names().collect::<Vec<_>>(), vec!["2,2.png"]);
    }

    #[tokio::test]
    async fn test_duplicate_identity_keeps_last_settled() {
        let service = MockRenderService::start().await;
        service.render_ok("3,4.zip", PNG).await;

        let orchestrator = orchestrator_for(&service);
        let files = vec![TileFactory::coordinate(3, 4), TileFactory::coordinate(3, 4)];
        let mut session = orchestrator.submit(files, &RenderOptions::new());
        let outcomes = session.collect().await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(session.archive().len(), 1);
    }
}
