//! 통계 및 유틸리티 모듈
//!
//! 실행 요약 출력, 처리 시간 포맷팅, 에러 로그 / JSON 리포트 저장을 담당합니다.

use colored::Colorize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, WavCleanError};
use crate::processor::RunSummary;

/// 일반 처리 통계 요약 출력
pub fn print_summary(summary: &RunSummary) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!("{}", " 📊 처리 통계".bright_white().bold());
    println!("{}", "═".repeat(50).bright_blue());

    println!(
        "  {} 처리 시간:    {}",
        "⏱️".bright_cyan(),
        format_elapsed(summary.elapsed)
    );
    println!(
        "  {} 발견된 파일:  {}",
        "📁".bright_cyan(),
        summary.total_found
    );
    println!(
        "  {} 성공:         {}",
        "✅".bright_green(),
        summary.success_count.to_string().green()
    );

    if summary.has_failures() {
        println!(
            "  {} 실패:         {}",
            "❌".bright_red(),
            summary.failure_count.to_string().red()
        );
    } else {
        println!("  {} 실패:         {}", "✅".bright_green(), "0".green());
    }

    if summary.total_found > 0 {
        println!(
            "  {} 성공률:       {:.1}%",
            "📈".bright_white(),
            summary.success_rate()
        );
    }

    println!("{}", "═".repeat(50).bright_blue());
}

/// 실패 목록 출력
pub fn print_failures(summary: &RunSummary, verbose: bool) {
    let stdout = io::stdout();
    let _ = write_failures(&mut stdout.lock(), summary, verbose);
}

/// 실패 목록을 writer에 출력
///
/// 파일마다 진단 메시지 첫 줄을 항상 표시하고, 상세 모드에서는 나머지 줄도 표시합니다.
pub fn write_failures<W: Write>(out: &mut W, summary: &RunSummary, verbose: bool) -> io::Result<()> {
    if !summary.has_failures() {
        return Ok(());
    }

    writeln!(out, "\n{}", "❌ 실패한 파일:".bright_red())?;
    for failed in &summary.failures {
        let mut lines = failed.diagnostic.lines();
        let first = lines.next().unwrap_or_default();
        writeln!(out, "  {} {}", "•".red(), failed.file_name)?;
        writeln!(out, "    {}", first.dimmed())?;
        if verbose {
            for line in lines {
                writeln!(out, "    {}", line.dimmed())?;
            }
        }
    }
    Ok(())
}

/// 경과 시간을 `1h 2m 3s` 형식으로 변환
///
/// 0인 상위 단위는 생략합니다.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use wavclean::stats::format_elapsed;
///
/// assert_eq!(format_elapsed(Duration::from_secs(5)), "5s");
/// assert_eq!(format_elapsed(Duration::from_secs(125)), "2m 5s");
/// ```
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64().round() as u64;
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// 에러 로그 파일 작성
pub fn write_error_log(log_path: &Path, summary: &RunSummary) -> Result<()> {
    let write_err = |e: std::io::Error| WavCleanError::WriteError {
        path: log_path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut log_file = BufWriter::new(File::create(log_path).map_err(write_err)?);

    writeln!(log_file, "wavclean 에러 로그").map_err(write_err)?;
    writeln!(log_file, "처리 시간: {}", format_elapsed(summary.elapsed)).map_err(write_err)?;
    writeln!(log_file, "총 에러 수: {}", summary.failure_count).map_err(write_err)?;
    writeln!(log_file, "{}", "=".repeat(50)).map_err(write_err)?;

    for failed in &summary.failures {
        writeln!(log_file, "\n파일: {}", failed.full_path.display()).map_err(write_err)?;
        writeln!(log_file, "에러: {}", failed.diagnostic).map_err(write_err)?;
    }

    log_file.flush().map_err(write_err)?;
    Ok(())
}

/// JSON 리포트 파일 작성
pub fn write_report(report_path: &Path, summary: &RunSummary) -> Result<()> {
    let write_err = |reason: String| WavCleanError::WriteError {
        path: report_path.to_path_buf(),
        reason,
    };

    let file = File::create(report_path).map_err(|e| write_err(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary).map_err(|e| write_err(e.to_string()))?;
    writer.flush().map_err(|e| write_err(e.to_string()))?;
    Ok(())
}
