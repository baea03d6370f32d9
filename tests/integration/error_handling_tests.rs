//! Error handling integration tests
//!
//! Per-tile failures stay inside their outcome; batch-level errors surface as
//! `TileBatchError`.

#[cfg(test)]
mod tests {
    use crate::common::{MockRenderService, TileFactory};
    use std::sync::Arc;
    use tile_batch::{
        BatchOrchestrator, Config, RenderClient, RenderError, RenderOptions, TileBatchError,
    };

    #[tokio::test]
    async fn test_unreachable_service_fails_every_tile() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = RenderClient::new(&format!("http://{}", addr)).unwrap();
        let mut session = BatchOrchestrator::new(Arc::new(client)).submit(
            vec![TileFactory::coordinate(0, 0), TileFactory::named("a.zip")],
            &RenderOptions::new(),
        );
        let outcomes = session.collect().await;

        assert_eq!(outcomes.len(), 2);
        for outcome in &outcomes {
            let error = outcome.error().expect("expected failure");
            assert!(matches!(error, RenderError::Network(_)));
            assert_eq!(error.status_code(), 0);
            assert_eq!(error.message(), "");
        }
        assert!(session.archive().is_empty());

        // An empty archive still yields a valid package.
        let package = session.finalize().await.unwrap();
        assert_eq!(package.entries, 0);
    }

    #[tokio::test]
    async fn test_server_error_message_is_preserved() {
        let service = MockRenderService::start().await;
        service
            .render_error("9,9.zip", 400, "invalid tile: missing data entry")
            .await;

        let client = RenderClient::new(&service.uri()).unwrap();
        let mut session = BatchOrchestrator::new(Arc::new(client))
            .submit(vec![TileFactory::coordinate(9, 9)], &RenderOptions::new());
        let outcome = session.next_outcome().await.unwrap();

        assert_eq!(
            outcome.error(),
            Some(&RenderError::Http {
                status: 400,
                message: "invalid tile: missing data entry".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_package_save_to_missing_dir_fails_without_losing_entries() {
        let service = MockRenderService::start().await;
        service.render_ok("1,2.zip", b"png").await;

        let client = RenderClient::new(&service.uri()).unwrap();
        let mut session = BatchOrchestrator::new(Arc::new(client))
            .submit(vec![TileFactory::coordinate(1, 2)], &RenderOptions::new());
        session.collect().await;

        let package = session.finalize().await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = package
            .save_to(dir.path().join("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, TileBatchError::Io(_)));

        // Finalize again and save somewhere that exists.
        let retry = session.finalize().await.unwrap();
        let path = retry.save_to(dir.path()).await.unwrap();
        assert!(path.exists());
        assert_eq!(retry.entries, 1);
    }

    #[test]
    fn test_client_from_config() {
        let config = Config {
            endpoint: "http://render.example:8080/".to_string(),
            ..Config::default()
        };
        let client = RenderClient::from_config(&config).unwrap();
        assert_eq!(client.render_url().as_str(), "http://render.example:8080/render");
    }

    #[test]
    fn test_bad_endpoint_is_config_error() {
        let err = RenderClient::new("::::").unwrap_err();
        assert!(matches!(err, TileBatchError::Config(_)));
    }
}
