use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use flowlink::loader::Expectation;

const CSV_HEADER: [&str; 9] = [
    "file",
    "board_size",
    "colors",
    "expected_solvable",
    "solved",
    "seconds",
    "case",
    "correct",
    "error",
];

/// The outcome of running the solver on one board file.
#[derive(Clone, Debug)]
pub(crate) struct CaseReport {
    pub(crate) file: String,
    pub(crate) expectation: Option<Expectation>,
    pub(crate) board_size: usize,
    pub(crate) colors: usize,
    pub(crate) solved: bool,
    pub(crate) seconds: f64,
    pub(crate) error: Option<String>,
}

impl CaseReport {
    pub(crate) fn new(file: String, expectation: Option<Expectation>) -> Self {
        Self {
            file,
            expectation,
            board_size: 0,
            colors: 0,
            solved: false,
            seconds: 0.0,
            error: None,
        }
    }

    /// Whether the solver's verdict matches the file name, if the name says anything.
    pub(crate) fn correct(&self) -> Option<bool> {
        match (&self.error, self.expectation) {
            (None, Some(expectation)) => Some(expectation.solvable == self.solved),
            _ => None,
        }
    }

    fn csv_record(&self) -> [String; 9] {
        let yes_no = |flag: bool| (if flag { "yes" } else { "no" }).to_owned();

        [
            self.file.clone(),
            self.board_size.to_string(),
            self.colors.to_string(),
            self.expectation.map(|e| yes_no(e.solvable)).unwrap_or_default(),
            yes_no(self.solved),
            format!("{:.6}", self.seconds),
            self.expectation.map(|e| e.case.to_string()).unwrap_or_default(),
            match (&self.error, self.correct()) {
                (Some(_), _) => "error".to_owned(),
                (None, Some(correct)) => yes_no(correct),
                (None, None) => "unknown".to_owned(),
            },
            self.error.clone().unwrap_or_default(),
        ]
    }
}

pub(crate) fn write_csv(path: &Path, reports: &[CaseReport]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;

    writer.write_record(CSV_HEADER)?;
    for report in reports {
        writer.write_record(report.csv_record())?;
    }
    writer.flush()?;

    Ok(())
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 { 0.0 } else { part as f64 * 100.0 / total as f64 }
}

pub(crate) fn log_summary(reports: &[CaseReport]) {
    if reports.is_empty() {
        info!("no boards were run");
        return;
    }

    let total = reports.len();
    let valid = reports.iter().filter(|r| r.error.is_none()).collect::<Vec<_>>();
    let solved = valid.iter().filter(|r| r.solved).count();
    let unsolved = valid.len() - solved;
    let errors = total - valid.len();
    let seconds = reports.iter().map(|r| r.seconds).sum::<f64>();

    info!("boards run: {total}");
    info!("solved: {solved} ({:.1}%)", percent(solved, total));
    info!("not solved: {unsolved} ({:.1}%)", percent(unsolved, total));
    info!("errors: {errors} ({:.1}%)", percent(errors, total));
    info!("time: {seconds:.3}s total, {:.3}s average", seconds / total as f64);

    let judged = valid.iter().filter_map(|r| r.correct()).collect::<Vec<_>>();
    if !judged.is_empty() {
        let correct = judged.iter().filter(|&&c| c).count();
        info!("accuracy: {correct}/{} ({:.1}%)", judged.len(), percent(correct, judged.len()));
    }

    let by_time = |a: &&&CaseReport, b: &&&CaseReport| a.seconds.total_cmp(&b.seconds);
    if let (Some(fastest), Some(slowest)) = (valid.iter().min_by(by_time), valid.iter().max_by(by_time)) {
        info!("fastest: {} ({:.3}s)", fastest.file, fastest.seconds);
        info!("slowest: {} ({:.3}s)", slowest.file, slowest.seconds);
    }

    let mut by_size: BTreeMap<usize, Vec<&CaseReport>> = BTreeMap::new();
    for report in &valid {
        by_size.entry(report.board_size).or_default().push(report);
    }
    for (size, group) in by_size {
        let solved = group.iter().filter(|r| r.solved).count();
        let average = group.iter().map(|r| r.seconds).sum::<f64>() / group.len() as f64;
        info!("{size}x{size}: {solved}/{} solved, {average:.3}s average", group.len());
    }

    for report in valid.iter().filter(|r| !r.solved) {
        info!("not solved: {} ({}x{}, {} colors)", report.file, report.board_size, report.board_size, report.colors);
    }
    for report in reports.iter().filter(|r| r.error.is_some()) {
        info!("error: {}: {}", report.file, report.error.as_deref().unwrap_or_default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str, solved: bool, error: Option<&str>) -> CaseReport {
        let mut report = CaseReport::new(name.to_owned(), flowlink::loader::expectation_from_file_name(name));
        report.board_size = 5;
        report.colors = 4;
        report.solved = solved;
        report.error = error.map(str::to_owned);
        report
    }

    #[test]
    fn correctness_follows_file_name() {
        assert_eq!(report("tablero_5x5_s1.txt", true, None).correct(), Some(true));
        assert_eq!(report("tablero_5x5_n2.txt", true, None).correct(), Some(false));
        assert_eq!(report("custom.txt", true, None).correct(), None);
        assert_eq!(report("tablero_5x5_s1.txt", false, Some("bad header")).correct(), None);
    }

    #[test]
    fn csv_rows_line_up_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        write_csv(&path, &[
            report("tablero_5x5_s1.txt", true, None),
            report("broken.txt", false, Some("line 1: bad header")),
        ]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines = written.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "file,board_size,colors,expected_solvable,solved,seconds,case,correct,error");
        assert_eq!(lines[1], "tablero_5x5_s1.txt,5,4,yes,yes,0.000000,1,yes,");
        assert_eq!(lines[2], "broken.txt,5,4,,no,0.000000,,error,line 1: bad header");
    }
}
