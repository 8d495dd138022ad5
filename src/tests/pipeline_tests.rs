use super::mock_browser::{Heights, MockBrowser, fast_config, listing};
use crate::error::ScrapeError;
use crate::pipeline::{run, run_with};

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[tokio::test]
    async fn test_writes_matched_links() {
        let dir = tempfile::tempdir().unwrap();
        let config = fast_config(dir.path());
        let browser = MockBrowser::new(
            Heights::Sequence(vec![100, 200, 200]),
            listing(&[
                "https://soundcloud.com/a/sets/x",
                "https://soundcloud.com/a/sets/y",
            ]),
        );
        let calls = browser.calls.clone();

        let collection = run_with(browser, &config).await.unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(calls.scrolls(), 2);
        assert_eq!(calls.closes(), 1);
        assert_eq!(
            calls.visited.lock().unwrap().as_slice(),
            ["https://soundcloud.com/a/sets"]
        );

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&config.output_path).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!({
                "playlists": [
                    "https://soundcloud.com/a/sets/x",
                    "https://soundcloud.com/a/sets/y"
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_zero_matches_writes_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let config = fast_config(dir.path());
        let browser = MockBrowser::new(
            Heights::Sequence(vec![100]),
            "<html><body><p>nothing here</p></body></html>",
        );
        let calls = browser.calls.clone();

        let collection = run_with(browser, &config).await.unwrap();

        assert_eq!(collection.len(), 0);
        assert_eq!(calls.closes(), 1);
        assert_eq!(
            std::fs::read_to_string(&config.output_path).unwrap(),
            "{\n  \"playlists\": []\n}"
        );
    }

    #[tokio::test]
    async fn test_fail_on_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = fast_config(dir.path());
        config.fail_on_empty = true;
        let browser = MockBrowser::new(Heights::Sequence(vec![100]), "<html></html>");
        let calls = browser.calls.clone();

        let result = run_with(browser, &config).await;

        assert!(matches!(result, Err(ScrapeError::NoMatches { .. })));
        assert_eq!(calls.closes(), 1);
        assert!(!config.output_path.exists());
    }

    #[tokio::test]
    async fn test_closes_once_when_extraction_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = fast_config(dir.path());
        let mut browser = MockBrowser::new(
            Heights::Sequence(vec![100]),
            listing(&["https://soundcloud.com/a/sets/x"]),
        );
        browser.fail_source = true;
        let calls = browser.calls.clone();

        let result = run_with(browser, &config).await;

        assert!(matches!(result, Err(ScrapeError::Io(_))));
        assert_eq!(calls.closes(), 1);
        assert!(!config.output_path.exists());
    }

    #[tokio::test]
    async fn test_closes_once_when_page_never_ready() {
        let dir = tempfile::tempdir().unwrap();
        let config = fast_config(dir.path());
        let mut browser = MockBrowser::new(Heights::Sequence(vec![100]), listing(&[]));
        browser.ready_state = "loading".to_string();
        let calls = browser.calls.clone();

        let result = run_with(browser, &config).await;

        assert!(matches!(result, Err(ScrapeError::PageNotReady { .. })));
        assert_eq!(calls.scrolls(), 0);
        assert_eq!(calls.closes(), 1);
    }

    #[tokio::test]
    async fn test_closes_once_when_scrolling_does_not_converge() {
        let dir = tempfile::tempdir().unwrap();
        let config = fast_config(dir.path());
        let browser = MockBrowser::new(
            Heights::Growing { step: 50 },
            listing(&["https://soundcloud.com/a/sets/x"]),
        );
        let calls = browser.calls.clone();

        let result = run_with(browser, &config).await;

        assert!(matches!(
            result,
            Err(ScrapeError::DidNotConverge { scrolls: 10, .. })
        ));
        assert_eq!(calls.closes(), 1);
    }

    #[tokio::test]
    async fn test_rerun_overwrites_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = fast_config(dir.path());

        let first = MockBrowser::new(
            Heights::Sequence(vec![100]),
            listing(&["/a/sets/x", "/a/sets/y", "/a/sets/z"]),
        );
        run_with(first, &config).await.unwrap();

        let second = MockBrowser::new(Heights::Sequence(vec![100]), listing(&["/a/sets/w"]));
        run_with(second, &config).await.unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&config.output_path).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!({ "playlists": ["https://soundcloud.com/a/sets/w"] })
        );
    }

    #[tokio::test]
    async fn test_invalid_selector_still_closes() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = fast_config(dir.path());
        config.selector = "a[".to_string();
        config.ready_selector = Some(".soundList".to_string());
        let browser = MockBrowser::new(Heights::Sequence(vec![100]), listing(&[]));
        let calls = browser.calls.clone();

        let result = run_with(browser, &config).await;

        assert!(matches!(result, Err(ScrapeError::InvalidSelector(_))));
        assert_eq!(calls.closes(), 1);
    }

    #[tokio::test]
    async fn test_run_rejects_bad_selector_before_connecting() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = fast_config(dir.path());
        config.selector = "a[".to_string();
        // Nothing listens here, so reaching the driver would fail with Connect
        config.webdriver_url = "http://127.0.0.1:1".to_string();

        let result = run(&config).await;

        assert!(matches!(result, Err(ScrapeError::InvalidSelector(s)) if s == "a["));
        assert!(!config.output_path.exists());
    }
}
