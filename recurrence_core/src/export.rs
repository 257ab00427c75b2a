//! Export of scheduled events and occurrence dates.
//!
//! Events are written either as CSV (one header row, times as `HH:MM`) or as
//! JSON Lines, the two shapes a bulk insert usually accepts.

use crate::{Result, ScheduledEvent};
use chrono::NaiveDate;
use std::io::Write;

/// Destination for scheduled events
pub trait EventSink {
    fn append(&mut self, event: &ScheduledEvent) -> Result<()>;

    /// Flush anything buffered
    fn finish(&mut self) -> Result<()>;
}

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    series_id: String,
    sequence: usize,
    date: String,
    title: String,
    start_time: Option<String>,
    end_time: Option<String>,
    location: Option<String>,
    description: Option<String>,
}

impl From<&ScheduledEvent> for CsvRow {
    fn from(event: &ScheduledEvent) -> Self {
        CsvRow {
            series_id: event.series_id.to_string(),
            sequence: event.sequence,
            date: event.date.format("%Y-%m-%d").to_string(),
            title: event.title.clone(),
            start_time: event.start_time.map(|t| t.format("%H:%M").to_string()),
            end_time: event.end_time.map(|t| t.format("%H:%M").to_string()),
            location: event.location.clone(),
            description: event.description.clone(),
        }
    }
}

/// CSV sink; the header row is written with the first event
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }
}

impl<W: Write> EventSink for CsvSink<W> {
    fn append(&mut self, event: &ScheduledEvent) -> Result<()> {
        self.writer.serialize(CsvRow::from(event))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// JSON Lines sink, one event object per line
pub struct JsonlSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> EventSink for JsonlSink<W> {
    fn append(&mut self, event: &ScheduledEvent) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Write every event to a sink and flush it
pub fn write_events(sink: &mut dyn EventSink, events: &[ScheduledEvent]) -> Result<usize> {
    for event in events {
        sink.append(event)?;
    }
    sink.finish()?;

    tracing::debug!("Exported {} events", events.len());
    Ok(events.len())
}

pub fn write_csv<W: Write>(writer: W, events: &[ScheduledEvent]) -> Result<usize> {
    write_events(&mut CsvSink::new(writer), events)
}

pub fn write_jsonl<W: Write>(writer: W, events: &[ScheduledEvent]) -> Result<usize> {
    write_events(&mut JsonlSink::new(writer), events)
}

/// Plain-text listing, one formatted date per line
pub fn write_dates<W: Write>(mut writer: W, dates: &[NaiveDate], date_format: &str) -> Result<()> {
    for date in dates {
        writeln!(writer, "{}", date.format(date_format))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{schedule, EventTemplate, Pattern, RecurrenceRule};
    use chrono::{NaiveTime, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_events() -> Vec<ScheduledEvent> {
        let rule = RecurrenceRule::new(
            Pattern::Weekly {
                weekday: Weekday::Sun,
            },
            date(2024, 2, 1),
            Some(date(2024, 2, 15)),
        );
        let template = EventTemplate {
            title: "Worship, Prayer".into(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_time: None,
            location: None,
            description: None,
        };
        schedule(&rule, &template).unwrap().events
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let events = sample_events();
        let mut buf = Vec::new();
        let count = write_csv(&mut buf, &events).unwrap();
        assert_eq!(count, 2);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "series_id,sequence,date,title,start_time,end_time,location,description"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains(",1,2024-02-04,\"Worship, Prayer\",09:00,,,"));
        assert!(lines[2].contains(",2,2024-02-11,"));
    }

    #[test]
    fn test_jsonl_one_object_per_line() {
        let events = sample_events();
        let mut buf = Vec::new();
        write_jsonl(&mut buf, &events).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let parsed: Vec<ScheduledEvent> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed, events);
    }

    #[test]
    fn test_empty_csv_writes_nothing() {
        let mut buf = Vec::new();
        assert_eq!(write_csv(&mut buf, &[]).unwrap(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_write_dates_with_format() {
        let mut buf = Vec::new();
        write_dates(&mut buf, &[date(2024, 1, 5), date(2024, 1, 12)], "%d/%m/%Y").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "05/01/2024\n12/01/2024\n");
    }
}
