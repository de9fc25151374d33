//! 통합 테스트 모듈
//!
//! 탐색부터 변환, 정리까지 wavclean의 전체 흐름을 테스트합니다.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 테스트용 오디오 파일 생성 헬퍼
fn create_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, b"RIFF....WAVE").unwrap();
    path
}

/// 다운로드 중 파일이 섞인 입력 폴더 생성
fn setup_source_directory() -> TempDir {
    let temp_dir = TempDir::new().unwrap();

    create_file(temp_dir.path(), "a.wav");
    create_file(temp_dir.path(), "b.wav");
    create_file(temp_dir.path(), "b.wav.download");
    create_file(temp_dir.path(), "c.wav");
    create_file(temp_dir.path(), "notes.txt");

    temp_dir
}

fn default_options() -> wavclean::ScanOptions {
    wavclean::ScanOptions::new("wav", "download").unwrap()
}

/// 가짜 ffmpeg 스크립트 생성
///
/// 인자는 `-y -loglevel error -i <input> <output>` 순서이므로 `$5`가 입력, `$6`이 출력입니다.
#[cfg(unix)]
fn fake_ffmpeg(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("ffmpeg");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

mod scanner_tests {
    use super::*;
    use walkdir::WalkDir;
    use wavclean::{scan, MarkerPolicy, WavCleanError};

    #[test]
    fn test_scenario_a_marker_excludes_file() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "a.wav");
        create_file(temp_dir.path(), "b.wav");
        create_file(temp_dir.path(), "b.wav.download");

        let set = scan(temp_dir.path(), &default_options()).unwrap();
        let names: Vec<&str> = set.iter().map(|f| f.file_name.as_str()).collect();

        assert_eq!(names, vec!["a.wav"]);
    }

    #[test]
    fn test_scenario_e_same_name_first_sorted_path_wins() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "2024/mix.wav");
        let first = create_file(temp_dir.path(), "2023/mix.wav");

        let set = scan(temp_dir.path(), &default_options()).unwrap();

        assert_eq!(set.paths(), vec![first]);
    }

    #[test]
    fn test_scenario_e_string_order_beats_component_order() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "a/song.wav");
        let first = create_file(temp_dir.path(), "a-b/song.wav");

        let set = scan(temp_dir.path(), &default_options()).unwrap();

        assert_eq!(set.paths(), vec![first]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_wav_is_candidate() {
        let temp_dir = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        create_file(temp_dir.path(), "plain.wav");
        let real = create_file(elsewhere.path(), "real.wav");
        std::os::unix::fs::symlink(&real, temp_dir.path().join("link.wav")).unwrap();

        let set = scan(temp_dir.path(), &default_options()).unwrap();
        let names: Vec<&str> = set.iter().map(|f| f.file_name.as_str()).collect();

        assert_eq!(names, vec!["link.wav", "plain.wav"]);
    }

    #[test]
    fn test_no_eligible_path_inside_marker_path() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "x/a.wav");
        create_file(temp_dir.path(), "x/a.wav.download");
        create_file(temp_dir.path(), "x/b.wav");
        create_file(temp_dir.path(), "y/c.wav");
        create_file(temp_dir.path(), "y/c.wav.part.download");
        create_file(temp_dir.path(), "z.wav.download/z.wav");

        let markers: Vec<String> = walk_names(temp_dir.path())
            .into_iter()
            .filter(|p| p.ends_with(".download"))
            .collect();

        let set = scan(temp_dir.path(), &default_options()).unwrap();

        for path in set.paths() {
            let path = path.to_string_lossy().to_string();
            assert!(markers.iter().all(|m| !m.contains(&path)), "{}", path);
        }
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_scan_is_deterministic() {
        let temp_dir = setup_source_directory();
        create_file(temp_dir.path(), "sub/d.wav");

        let first = scan(temp_dir.path(), &default_options()).unwrap().paths();
        let second = scan(temp_dir.path(), &default_options()).unwrap().paths();

        assert_eq!(first, second);
    }

    #[test]
    fn test_sibling_policy() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "b.wav");
        create_file(temp_dir.path(), "b.wav_backup/other.download");

        let options = default_options().with_policy(MarkerPolicy::Sibling);
        let set = scan(temp_dir.path(), &options).unwrap();

        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_missing_source_fails_fast() {
        let temp_dir = TempDir::new().unwrap();
        let result = scan(&temp_dir.path().join("gone"), &default_options());

        let err = result.unwrap_err();
        assert!(matches!(err, WavCleanError::SourceNotFound { .. }));
        assert!(err.to_string().contains("gone"));
    }

    fn walk_names(root: &Path) -> Vec<String> {
        WalkDir::new(root)
            .min_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.path().to_string_lossy().to_string())
            .collect()
    }
}

#[cfg(unix)]
mod conversion_tests {
    use super::*;
    use wavclean::{convert_all, scan, ConversionOutcome, FfmpegTranscoder};

    #[test]
    fn test_scenario_b_success_writes_output() {
        let source = setup_source_directory();
        let destination = TempDir::new().unwrap();
        let bin = TempDir::new().unwrap();
        let ffmpeg = fake_ffmpeg(bin.path(), r#"cp "$5" "$6""#);

        let set = scan(source.path(), &default_options()).unwrap();
        let mut succeeded = Vec::new();
        let summary = convert_all(
            &set,
            destination.path(),
            &FfmpegTranscoder::new(ffmpeg),
            |outcome| {
                if let ConversionOutcome::Success { file_name } = outcome {
                    succeeded.push(file_name.clone());
                }
            },
        );

        assert_eq!(succeeded, vec!["a.wav", "c.wav"]);
        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.failure_count, 0);
        assert!(destination.path().join("a.wav").exists());
        assert!(destination.path().join("c.wav").exists());
        assert!(!destination.path().join("b.wav").exists());
    }

    #[test]
    fn test_scenario_c_invalid_data_normalized() {
        let source = setup_source_directory();
        let destination = TempDir::new().unwrap();
        let bin = TempDir::new().unwrap();
        let ffmpeg = fake_ffmpeg(
            bin.path(),
            r#"case "$5" in
  *c.wav) echo "$5: Invalid data found when processing input" >&2; exit 1 ;;
esac
cp "$5" "$6""#,
        );

        let set = scan(source.path(), &default_options()).unwrap();
        let summary = convert_all(&set, destination.path(), &FfmpegTranscoder::new(ffmpeg), |_| {});

        assert_eq!(summary.success_count, 1);
        assert_eq!(summary.failure_count, 1);
        assert_eq!(summary.failures[0].file_name, "c.wav");
        assert_eq!(summary.failures[0].diagnostic, "Invalid data: c.wav");
        assert_eq!(summary.failures[0].full_path, source.path().join("c.wav"));
    }

    #[test]
    fn test_raw_stderr_kept_verbatim() {
        let source = TempDir::new().unwrap();
        create_file(source.path(), "a.wav");
        let destination = TempDir::new().unwrap();
        let bin = TempDir::new().unwrap();
        let ffmpeg = fake_ffmpeg(bin.path(), "echo 'Unknown encoder pcm_xyz' >&2\nexit 1");

        let set = scan(source.path(), &default_options()).unwrap();
        let summary = convert_all(&set, destination.path(), &FfmpegTranscoder::new(ffmpeg), |_| {});

        assert_eq!(summary.failures[0].diagnostic, "Unknown encoder pcm_xyz");
    }

    #[test]
    fn test_missing_destination_is_per_file_failure() {
        let source = setup_source_directory();
        let destination = TempDir::new().unwrap();
        let missing = destination.path().join("missing");
        let bin = TempDir::new().unwrap();
        let ffmpeg = fake_ffmpeg(bin.path(), r#"cp "$5" "$6""#);

        let set = scan(source.path(), &default_options()).unwrap();
        let summary = convert_all(&set, &missing, &FfmpegTranscoder::new(ffmpeg), |_| {});

        assert_eq!(summary.failure_count, set.len());
        assert_eq!(summary.success_count, 0);
    }

    #[test]
    fn test_second_run_overwrites_with_same_classification() {
        let source = setup_source_directory();
        let destination = TempDir::new().unwrap();
        let bin = TempDir::new().unwrap();
        let ffmpeg = fake_ffmpeg(
            bin.path(),
            r#"case "$5" in
  *c.wav) echo "Invalid data found when processing input" >&2; exit 1 ;;
esac
cp "$5" "$6""#,
        );
        let transcoder = FfmpegTranscoder::new(ffmpeg);
        let set = scan(source.path(), &default_options()).unwrap();

        let mut first = Vec::new();
        convert_all(&set, destination.path(), &transcoder, |o| first.push(o.clone()));
        let mut second = Vec::new();
        convert_all(&set, destination.path(), &transcoder, |o| second.push(o.clone()));

        assert_eq!(first, second);
    }
}

mod missing_tool_tests {
    use super::*;
    use wavclean::{convert_all, scan, FfmpegTranscoder};

    #[test]
    fn test_scenario_d_missing_converter_fails_every_file() {
        let source = setup_source_directory();
        let destination = TempDir::new().unwrap();
        let transcoder = FfmpegTranscoder::new(source.path().join("no-such-ffmpeg"));

        let set = scan(source.path(), &default_options()).unwrap();
        let summary = convert_all(&set, destination.path(), &transcoder, |_| {});

        assert_eq!(summary.failure_count, set.len());
        assert_eq!(summary.success_count, 0);
        assert_eq!(summary.success_count + summary.failure_count, summary.total_found);
        for failed in &summary.failures {
            assert!(failed.diagnostic.contains("ffmpeg를 찾을 수 없습니다"));
        }
    }
}

mod runner_tests {
    use super::*;
    use wavclean::{BatchRunner, FfmpegTranscoder, RunEvent, RunRequest};

    #[test]
    fn test_runner_reports_every_file_once() {
        let source = setup_source_directory();
        let destination = TempDir::new().unwrap();
        let request = RunRequest {
            source_root: source.path().to_path_buf(),
            destination_root: destination.path().to_path_buf(),
            scan: default_options(),
        };

        let runner = BatchRunner::new();
        let handle = runner
            .start(request, FfmpegTranscoder::new("/no/such/ffmpeg"))
            .unwrap();

        let events: Vec<RunEvent> = handle.events().iter().collect();
        let summary = handle.join().unwrap();

        let failed = events
            .iter()
            .filter(|e| matches!(e, RunEvent::FileFailed { .. }))
            .count();
        assert_eq!(events.first(), Some(&RunEvent::Started { total: 2 }));
        assert_eq!(failed, 2);
        assert_eq!(events.last(), Some(&RunEvent::Completed(summary)));
    }
}

mod cleanup_tests {
    use super::*;
    use wavclean::delete_files;

    #[test]
    fn test_delete_failed_sources() {
        let source = setup_source_directory();
        let a = source.path().join("a.wav");
        let gone = source.path().join("gone.wav");

        let report = delete_files(vec![gone.clone(), a.clone()]);

        assert_eq!(report.deleted, vec![a.clone()]);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].0, gone);
        assert!(!a.exists());
        assert!(source.path().join("c.wav").exists());
    }
}

mod error_tests {
    use std::path::PathBuf;
    use wavclean::WavCleanError;

    #[test]
    fn test_error_display() {
        let error = WavCleanError::SourceNotFound {
            path: PathBuf::from("/nonexistent"),
        };
        let msg = error.to_string();
        assert!(msg.contains("입력 폴더를 찾을 수 없습니다"));
        assert!(msg.contains("/nonexistent"));
    }

    #[test]
    fn test_invalid_data_display() {
        let error = WavCleanError::InvalidData {
            file_name: "c.wav".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid data: c.wav");
    }
}
