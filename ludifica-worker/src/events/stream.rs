use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{error, info, warn};

use ludifica_block::points::{EventReport, PlatformEvent, handle_event};
use ludifica_core::Data;
use ludifica_utils::time::now_unix_secs;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub processed: u64,
    pub rejected: u64,
    pub failed: u64,
}

#[derive(Debug, Serialize)]
struct DoneLine<'a> {
    line: u64,
    event: &'a str,
    user_id: u64,
    #[serde(flatten)]
    report: EventReport,
}

#[derive(Debug, Serialize)]
struct FailedLine {
    line: u64,
    error: String,
}

/// Blank lines are skipped; everything else must be one JSON event.
pub fn parse_line(raw: &str) -> Option<Result<PlatformEvent, serde_json::Error>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(serde_json::from_str(raw))
}

/// Consume JSON-lines events from `reader` until EOF, writing one result per event.
pub async fn run<R, W>(data: &Data, reader: R, mut writer: W) -> anyhow::Result<StreamStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut stats = StreamStats::default();
    let mut line_no = 0u64;

    while let Some(raw) = lines.next_line().await? {
        line_no += 1;

        let event = match parse_line(&raw) {
            None => continue,
            Some(Ok(event)) => event,
            Some(Err(source)) => {
                warn!(line = line_no, ?source, "skipping malformed event");
                stats.rejected += 1;
                write_line(
                    &mut writer,
                    &FailedLine {
                        line: line_no,
                        error: "invalid event".to_owned(),
                    },
                )
                .await?;
                continue;
            }
        };

        match handle_event(&data.db, &event, now_unix_secs()).await {
            Ok(report) => {
                stats.processed += 1;
                let done = DoneLine {
                    line: line_no,
                    event: event.name(),
                    user_id: event.user_id(),
                    report,
                };
                write_line(&mut writer, &done).await?;
            }
            Err(err) => {
                stats.failed += 1;
                if err.is_internal() {
                    error!(line = line_no, event = event.name(), ?err, "event processing failed");
                } else {
                    warn!(line = line_no, event = event.name(), %err, "event refused");
                }
                let failed = FailedLine {
                    line: line_no,
                    error: err.localized(data.lang),
                };
                write_line(&mut writer, &failed).await?;
            }
        }
    }

    info!(
        processed = stats.processed,
        rejected = stats.rejected,
        failed = stats.failed,
        "event stream finished"
    );
    Ok(stats)
}

async fn write_line<W, T>(writer: &mut W, line: &T) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut payload = serde_json::to_vec(line)?;
    payload.push(b'\n');
    writer.write_all(&payload).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{DoneLine, parse_line};
    use ludifica_block::points::{EventReport, PlatformEvent};

    #[test]
    fn blank_lines_are_skipped() {
        assert!(parse_line("   ").is_none());
    }

    #[test]
    fn events_parse_and_garbage_is_rejected() {
        let parsed = parse_line(r#"{"event":"user_created","user_id":4}"#);
        assert!(matches!(
            parsed,
            Some(Ok(PlatformEvent::UserCreated { user_id: 4 }))
        ));
        assert!(matches!(parse_line("{not json"), Some(Err(_))));
    }

    #[test]
    fn results_serialize_flat() {
        let line = DoneLine {
            line: 3,
            event: "user_created",
            user_id: 4,
            report: EventReport::default(),
        };
        let json = serde_json::to_value(&line).expect("encode");
        assert_eq!(json["line"], 3);
        assert_eq!(json["event"], "user_created");
        assert!(json["award"].is_null());
        assert_eq!(json["badges"], serde_json::json!([]));
    }
}
