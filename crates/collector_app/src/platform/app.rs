use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use chrono::{Local, Utc};
use collector_engine::{
    export_filename, load_channel_list, write_csv_export, Clock, Collector, CollectorConfig,
    ExportSummary, RunReport, TokioSleeper, YouTubeApi,
};
use collector_logging::{collector_debug, collector_error, collector_info, collector_warn};

use super::config::{api_key, Env, Settings};
use super::logging;

/// How a run that got past setup ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    NoChannels,
    NoRecords,
    Exported(ExportSummary),
    /// Records were collected but the export could not be written.
    ExportFailed,
}

pub fn run() -> ExitCode {
    let env = |key: &str| std::env::var(key).ok();
    let settings = Settings::from_env(&env);
    logging::initialize(settings.log_destination, settings.log_level);

    let result = run_with(&settings, &env, Arc::new(Utc::now));
    ExitCode::from(exit_status(&result))
}

/// 1 for fatal setup failures, 0 otherwise.
fn exit_status(result: &anyhow::Result<RunOutcome>) -> u8 {
    match result {
        Ok(outcome) => {
            collector_debug!("run finished: {outcome:?}");
            0
        }
        Err(err) => {
            collector_error!("{err:#}");
            1
        }
    }
}

/// Setup, collection and export. `Err` only for fatal setup failures; per-channel
/// and export problems are logged and reflected in the outcome.
pub fn run_with(settings: &Settings, env: Env, clock: Clock) -> anyhow::Result<RunOutcome> {
    let channels = load_channel_list(&settings.channel_list).with_context(|| {
        format!(
            "cannot load channel list {}",
            settings.channel_list.display()
        )
    })?;
    let api_key = api_key(env)?;

    if channels.is_empty() {
        collector_warn!(
            "channel list {} contains no channels; nothing to do",
            settings.channel_list.display()
        );
        return Ok(RunOutcome::NoChannels);
    }

    let mut config = CollectorConfig::default();
    if let Some(base_url) = &settings.api_base_url {
        config.api.base_url = base_url.clone();
    }
    config.now_utc = clock;

    let api = YouTubeApi::new(&config.api, api_key).context("cannot build the API client")?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start the async runtime")?;

    let output_dir = &settings.output_dir;
    let collector = Collector::new(Arc::new(api), Arc::new(TokioSleeper), config);
    let report = runtime.block_on(collector.run(&channels));
    log_summary(&report);

    if report.records.is_empty() {
        collector_info!("no uploads from yesterday (UTC) in any channel; no file written");
        return Ok(RunOutcome::NoRecords);
    }

    let filename = export_filename(Local::now().naive_local());
    match write_csv_export(&report.records, output_dir, &filename) {
        Ok(summary) => {
            collector_info!(
                "saved {} record(s) to {}",
                summary.record_count,
                summary.output_path.display()
            );
            Ok(RunOutcome::Exported(summary))
        }
        Err(err) => {
            collector_error!("failed to write {filename} in {}: {err}", output_dir.display());
            Ok(RunOutcome::ExportFailed)
        }
    }
}

fn log_summary(report: &RunReport) {
    collector_info!("processed {} channel(s)", report.channels.len());
    for channel in &report.channels {
        collector_info!(
            "  {} ({}): {} record(s)",
            channel.channel.name,
            channel.channel_title,
            channel.records
        );
    }
    collector_info!("{} record(s) collected in total", report.records.len());
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;

    use chrono::{DateTime, Duration, TimeZone, Utc};
    use tempfile::TempDir;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::platform::config::{ConfigError, API_KEY_VAR};
    use crate::platform::logging::LogDestination;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap()
    }

    fn settings(dir: &Path, base_url: &str) -> Settings {
        Settings {
            channel_list: dir.join("channels.csv"),
            output_dir: dir.join("out"),
            api_base_url: Some(base_url.to_string()),
            log_level: log::LevelFilter::Debug,
            log_destination: LogDestination::Terminal,
        }
    }

    fn write_channels(dir: &Path, body: &str) {
        fs::write(dir.join("channels.csv"), body).unwrap();
    }

    fn env_with_key(key: Option<&str>) -> impl Fn(&str) -> Option<String> {
        let mut vars = HashMap::new();
        if let Some(key) = key {
            vars.insert(API_KEY_VAR.to_string(), key.to_string());
        }
        move |name: &str| vars.get(name).cloned()
    }

    async fn mount_channel(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/channels"))
            .and(query_param("id", "UC1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{
                    "contentDetails": { "relatedPlaylists": { "uploads": "UU1" } },
                    "snippet": { "title": "Remote News" }
                }]
            })))
            .mount(server)
            .await;
    }

    #[test]
    fn missing_credential_fails_before_any_request() {
        collector_logging::initialize_for_tests();
        let rt = tokio::runtime::Runtime::new().unwrap();
        let server = rt.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200))
                .expect(0)
                .mount(&server)
                .await;
            server
        });
        let dir = TempDir::new().unwrap();
        write_channels(dir.path(), "channel_id,channel_name\nUC1,News\n");

        let env = env_with_key(None);
        let err = run_with(&settings(dir.path(), &server.uri()), &env, Arc::new(fixed_now))
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::MissingCredential(API_KEY_VAR))
        );
        rt.block_on(server.verify());
    }

    #[test]
    fn missing_credential_exits_with_status_one() {
        let dir = TempDir::new().unwrap();
        write_channels(dir.path(), "channel_id,channel_name\nUC1,News\n");
        let env = env_with_key(None);

        let result = run_with(
            &settings(dir.path(), "http://127.0.0.1:9"),
            &env,
            Arc::new(fixed_now),
        );

        assert_eq!(exit_status(&result), 1);
    }

    #[test]
    fn completed_runs_exit_with_status_zero() {
        let dir = TempDir::new().unwrap();
        write_channels(dir.path(), "channel_id,channel_name\n");
        let env = env_with_key(Some("test-key"));

        let result = run_with(
            &settings(dir.path(), "http://127.0.0.1:9"),
            &env,
            Arc::new(fixed_now),
        );

        assert_eq!(exit_status(&result), 0);
        assert_eq!(exit_status(&Ok(RunOutcome::ExportFailed)), 0);
    }

    #[test]
    fn missing_channel_list_is_fatal() {
        let dir = TempDir::new().unwrap();
        let env = env_with_key(Some("test-key"));
        let result = run_with(
            &settings(dir.path(), "http://127.0.0.1:9"),
            &env,
            Arc::new(fixed_now),
        );
        assert!(result.is_err());
    }

    #[test]
    fn empty_channel_list_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        write_channels(dir.path(), "채널 ID,채널명\n");
        let env = env_with_key(Some("test-key"));

        let outcome = run_with(
            &settings(dir.path(), "http://127.0.0.1:9"),
            &env,
            Arc::new(fixed_now),
        )
        .unwrap();

        assert_eq!(outcome, RunOutcome::NoChannels);
    }

    #[test]
    fn channel_without_uploads_yesterday_writes_nothing() {
        collector_logging::initialize_for_tests();
        let rt = tokio::runtime::Runtime::new().unwrap();
        let server = rt.block_on(async {
            let server = MockServer::start().await;
            mount_channel(&server).await;
            Mock::given(method("GET"))
                .and(path("/playlistItems"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "items": [{
                        "snippet": { "publishedAt": "2024-05-08T10:00:00Z" },
                        "contentDetails": { "videoId": "old1" }
                    }]
                })))
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path("/videos"))
                .respond_with(ResponseTemplate::new(200))
                .expect(0)
                .mount(&server)
                .await;
            server
        });
        let dir = TempDir::new().unwrap();
        write_channels(dir.path(), "channel_id,channel_name\nUC1,News\n");
        let env = env_with_key(Some("test-key"));

        let outcome = run_with(&settings(dir.path(), &server.uri()), &env, Arc::new(fixed_now))
            .unwrap();

        assert_eq!(outcome, RunOutcome::NoRecords);
        assert!(!dir.path().join("out").exists());
        rt.block_on(server.verify());
    }

    #[test]
    fn collected_uploads_are_exported() {
        collector_logging::initialize_for_tests();
        let yesterday = fixed_now() - Duration::hours(12);
        let rt = tokio::runtime::Runtime::new().unwrap();
        let server = rt.block_on(async {
            let server = MockServer::start().await;
            mount_channel(&server).await;
            Mock::given(method("GET"))
                .and(path("/playlistItems"))
                .and(query_param("playlistId", "UU1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "items": [{
                        "snippet": { "publishedAt": yesterday.to_rfc3339() },
                        "contentDetails": { "videoId": "vid1" }
                    }]
                })))
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path("/videos"))
                .and(query_param("id", "vid1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "items": [{
                        "id": "vid1",
                        "snippet": { "title": "Morning <br> bulletin" }
                    }]
                })))
                .expect(1)
                .mount(&server)
                .await;
            server
        });
        let dir = TempDir::new().unwrap();
        write_channels(dir.path(), "\u{feff}채널 ID,채널명\nUC1,News\n");
        let env = env_with_key(Some("test-key"));

        let outcome = run_with(&settings(dir.path(), &server.uri()), &env, Arc::new(fixed_now))
            .unwrap();

        let RunOutcome::Exported(summary) = outcome else {
            panic!("expected an export, got {outcome:?}");
        };
        assert_eq!(summary.record_count, 1);
        assert!(summary.output_path.starts_with(dir.path().join("out")));

        let content = fs::read_to_string(&summary.output_path).unwrap();
        let content = content.strip_prefix('\u{feff}').expect("BOM");
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("channel_name,video_id,url,title"));
        let row = lines.next().unwrap();
        assert!(row.starts_with(
            "Remote News,vid1,https://www.youtube.com/watch?v=vid1,Morning bulletin,"
        ));
        assert_eq!(lines.next(), None);
        rt.block_on(server.verify());
    }
}
