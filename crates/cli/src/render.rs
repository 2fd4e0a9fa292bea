//! Table rendering for the terminal

use jobby_core::application::describe_etc;
use jobby_core::domain::{HistoryViewRecord, JobViewRecord};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct RunningRow {
    #[tabled(rename = "Job")]
    job: String,
    #[tabled(rename = "Started")]
    started: String,
    #[tabled(rename = "Est. End")]
    end: String,
    #[tabled(rename = "ETC")]
    etc: String,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Job")]
    job: String,
    #[tabled(rename = "Started")]
    started: String,
    #[tabled(rename = "Stopped")]
    stopped: String,
    #[tabled(rename = "Duration")]
    duration: String,
}

pub fn running_table(views: &[JobViewRecord]) -> String {
    let rows: Vec<RunningRow> = views
        .iter()
        .map(|v| RunningRow {
            job: v.job.clone(),
            started: v.start_time.clone(),
            end: v.end_time.clone(),
            etc: describe_etc(v.etc_minutes),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn history_table(views: &[HistoryViewRecord]) -> String {
    let rows: Vec<HistoryRow> = views
        .iter()
        .map(|v| HistoryRow {
            job: v.job.clone(),
            started: v.start_time.clone(),
            stopped: v
                .end_time
                .clone()
                .unwrap_or_else(|| "running".to_string()),
            duration: if v.running {
                format!("{:.1} min so far", v.duration_minutes)
            } else {
                format!("{:.1} min", v.duration_minutes)
            },
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// e.g. `3 running, 1 overdue`
pub fn running_summary(views: &[JobViewRecord]) -> String {
    let overdue = views.iter().filter(|v| v.is_overdue()).count();
    if overdue == 0 {
        format!("{} running", views.len())
    } else {
        format!("{} running, {} overdue", views.len(), overdue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(job: &str, etc_minutes: f64) -> JobViewRecord {
        JobViewRecord {
            job: job.to_string(),
            start_time: "11/14/2023 at 10:13:20 PM".to_string(),
            end_time: "11/14/2023 at 10:14:20 PM".to_string(),
            etc_minutes,
            start_millis: 0,
            end_millis: 0,
            params: None,
        }
    }

    #[test]
    fn test_running_table_columns() {
        let table = running_table(&[view("build-1", 0.5), view("deploy", -2.0)]);
        assert!(table.contains("Est. End"));
        assert!(table.contains("build-1"));
        assert!(table.contains("in 0.5 min"));
        assert!(table.contains("2.0 min overdue"));
        assert!(table.contains("11/14/2023 at 10:14:20 PM"));
    }

    #[test]
    fn test_running_summary() {
        assert_eq!(running_summary(&[]), "0 running");
        assert_eq!(
            running_summary(&[view("a", 1.0), view("b", -1.0)]),
            "2 running, 1 overdue"
        );
    }

    #[test]
    fn test_history_table_running_row() {
        let views = vec![HistoryViewRecord {
            job: "backup".to_string(),
            start_time: "1/1/1970 at 12:00:00 AM".to_string(),
            end_time: None,
            duration_minutes: 1.25,
            running: true,
            start_millis: 0,
            end_millis: None,
            params: None,
        }];
        let table = history_table(&views);
        assert!(table.contains("Stopped"));
        assert!(table.contains("running"));
        assert!(table.contains("1.2 min so far") || table.contains("1.3 min so far"));
    }
}
