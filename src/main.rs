//! wavclean - WAV FOLDER CLEANER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};

use wavclean::{
    cleanup::delete_files,
    cli::Args,
    logging,
    runner::{BatchRunner, RunEvent, RunHandle},
    scanner::{scan, EligibleSet},
    stats::{print_failures, print_summary, write_error_log, write_report},
    FfmpegTranscoder, RunSummary,
};

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init(args.verbose);

    let transcoder = args.transcoder();

    // 헤더 출력
    print_header(&args, &transcoder);

    let request = args.run_request()?;

    // 드라이런 모드
    if args.dry_run {
        let eligible = scan(&request.source_root, &request.scan)?;
        print_dry_run(&eligible);
        return Ok(());
    }

    println!("\n{}", "📁 파일 검색 중...".bright_cyan());

    let runner = BatchRunner::new();
    let handle = runner.start(request, transcoder)?;

    render_events(&handle, args.verbose);

    let summary = handle.join().context("변환을 시작할 수 없습니다")?;

    // 통계 및 실패 목록 출력
    print_summary(&summary);
    print_failures(&summary, args.verbose);

    // 로그 파일 작성
    if let Some(ref log_path) = args.log {
        write_error_log(log_path, &summary)?;
        println!("\n{} 에러 로그 저장: {:?}", "📝".bright_cyan(), log_path);
    }

    if let Some(ref report_path) = args.report {
        write_report(report_path, &summary)?;
        println!("\n{} 리포트 저장: {:?}", "📝".bright_cyan(), report_path);
    }

    // 실패 파일 정리
    if args.delete_failed && summary.has_failures() {
        run_cleanup(&summary, args.yes)?;
    }

    println!("\n{} 완료: {:?}\n", "✅".bright_green(), args.output);

    Ok(())
}

/// 헤더 출력
fn print_header(args: &Args, transcoder: &FfmpegTranscoder) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!("{}", " 🎧 WAV FOLDER CLEANER".bright_white().bold());
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 입력 폴더: {:?}", "📂".bright_cyan(), args.input);
    println!("  {} 출력 폴더: {:?}", "📂".bright_green(), args.output);
    println!("  {} ffmpeg: {:?}", "⚙️".bright_yellow(), transcoder.program());
    println!(
        "  {} 대상: *.{}  (제외: *.{}, {})",
        "🔍".bright_magenta(),
        args.extension,
        args.marker,
        args.marker_policy
    );

    if let Some(depth) = args.max_depth {
        println!("  {} 최대 깊이: {}", "📏".bright_white(), depth);
    }

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 변환 없음)".yellow()
        );
    }

    println!("{}", "═".repeat(50).bright_blue());
}

/// 드라이런 출력
fn print_dry_run(eligible: &EligibleSet) {
    println!("\n{}", "📋 처리 예정 파일 목록:".bright_cyan());
    for (i, file) in eligible.iter().enumerate() {
        println!("  {}. {}", i + 1, file.full_path.display());
    }
    println!(
        "\n{} 총 {} 개의 파일이 처리될 예정입니다.",
        "ℹ️".bright_blue(),
        eligible.len().to_string().bright_green()
    );
}

/// 워커 이벤트를 받아 화면에 표시
///
/// 워커가 끝나 채널이 닫힐 때까지 반복합니다.
fn render_events(handle: &RunHandle, verbose: bool) {
    let mut pb: Option<ProgressBar> = None;

    for event in handle.events() {
        match event {
            RunEvent::Started { total } => {
                println!(
                    "  {} 발견된 파일 수: {}",
                    "📋".bright_white(),
                    total.to_string().bright_green()
                );
                if total == 0 {
                    println!("{}", "⚠️ 처리할 파일이 없습니다.".yellow());
                }
                println!("\n{}", "⚡ 변환 중...".bright_cyan());
                pb = Some(create_progress_bar(total));
            }
            RunEvent::FileSucceeded { file_name } => {
                if let Some(ref pb) = pb {
                    pb.println(format!("  {} {}", "✓".green(), file_name));
                    pb.inc(1);
                }
            }
            RunEvent::FileFailed {
                file_name,
                diagnostic,
            } => {
                if let Some(ref pb) = pb {
                    let shown = if verbose {
                        diagnostic.as_str()
                    } else {
                        diagnostic.lines().next().unwrap_or_default()
                    };
                    pb.println(format!("  {} {} {}", "✗".red(), file_name, shown.dimmed()));
                    pb.inc(1);
                }
            }
            RunEvent::Completed(_) => {
                if let Some(ref pb) = pb {
                    pb.finish_with_message("완료!");
                }
            }
            RunEvent::Aborted { reason } => {
                println!("\n{} {}", "❌".bright_red(), reason.red());
            }
        }
    }
}

/// 진행률 바 생성
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░");
    pb.set_style(style);
    pb
}

/// 실패한 원본 파일 삭제
fn run_cleanup(summary: &RunSummary, assume_yes: bool) -> Result<()> {
    let paths = summary.failed_paths();

    if !assume_yes && !confirm(&format!("실패한 원본 파일 {}개를 삭제할까요?", paths.len()))? {
        println!("  {} 삭제를 건너뜁니다.", "ℹ️".bright_blue());
        return Ok(());
    }

    let report = delete_files(paths);

    println!(
        "\n{} 삭제된 파일: {}",
        "🗑️".bright_white(),
        report.deleted.len().to_string().green()
    );

    if !report.is_clean() {
        println!("{}", "❌ 삭제 실패:".bright_red());
        for (path, error) in &report.errors {
            println!("  {} {:?}", "•".red(), path);
            println!("    {}", error.dimmed());
        }
    }

    Ok(())
}

/// y/N 확인
fn confirm(question: &str) -> Result<bool> {
    print!("\n{} {} [y/N] ", "❓".bright_yellow(), question);
    io::stdout().flush().context("stdout 플러시 실패")?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("입력을 읽을 수 없습니다")?;

    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "YES"))
}
