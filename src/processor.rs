//! 변환 처리 모듈
//!
//! 변환 대상 집합을 순서대로 변환기에 넘기고 파일별 결과와 전체 통계를 모읍니다.

use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::scanner::{CandidateFile, EligibleSet};
use crate::transcoder::Transcoder;

/// 실패한 파일 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    /// 파일 이름
    pub file_name: String,
    /// 원본 전체 경로
    pub full_path: PathBuf,
    /// 정규화된 진단 메시지
    pub diagnostic: String,
}

/// 파일 하나의 변환 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConversionOutcome {
    /// 변환 성공
    Success { file_name: String },
    /// 변환 실패
    Failure(FailedFile),
}

impl ConversionOutcome {
    /// 파일 이름
    pub fn file_name(&self) -> &str {
        match self {
            ConversionOutcome::Success { file_name } => file_name,
            ConversionOutcome::Failure(failed) => &failed.file_name,
        }
    }
}

/// 실행 요약
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// 처리 시간
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    /// 발견된 변환 대상 수
    pub total_found: usize,
    /// 성공 수
    pub success_count: usize,
    /// 실패 수
    pub failure_count: usize,
    /// 실패 목록 (처리 순서)
    pub failures: Vec<FailedFile>,
}

impl RunSummary {
    /// 새 요약 생성
    pub fn new(total_found: usize) -> Self {
        Self {
            total_found,
            ..Default::default()
        }
    }

    /// 결과 하나 반영
    pub fn record(&mut self, outcome: &ConversionOutcome) {
        match outcome {
            ConversionOutcome::Success { .. } => self.success_count += 1,
            ConversionOutcome::Failure(failed) => {
                self.failure_count += 1;
                self.failures.push(failed.clone());
            }
        }
    }

    /// 실패한 원본 경로 목록
    pub fn failed_paths(&self) -> Vec<PathBuf> {
        self.failures.iter().map(|f| f.full_path.clone()).collect()
    }

    /// 실패가 있는지 확인
    pub fn has_failures(&self) -> bool {
        self.failure_count > 0
    }

    /// 성공률 (%)
    pub fn success_rate(&self) -> f64 {
        if self.total_found == 0 {
            return 0.0;
        }
        (self.success_count as f64 / self.total_found as f64) * 100.0
    }
}

fn serialize_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// 출력 파일 경로 생성
pub fn output_path(destination_root: &Path, file: &CandidateFile) -> PathBuf {
    destination_root.join(&file.file_name)
}

/// 단일 파일 변환
///
/// # Arguments
/// * `file` - 변환할 파일
/// * `destination_root` - 출력 폴더
/// * `transcoder` - 변환기
///
/// # Returns
/// 변환 결과를 담은 `ConversionOutcome`
pub fn convert_file(
    file: &CandidateFile,
    destination_root: &Path,
    transcoder: &dyn Transcoder,
) -> ConversionOutcome {
    let output = output_path(destination_root, file);

    match transcoder.transcode(&file.full_path, &output) {
        Ok(()) => ConversionOutcome::Success {
            file_name: file.file_name.clone(),
        },
        Err(e) => {
            tracing::debug!(file = %file.full_path.display(), error = %e, "conversion failed");
            ConversionOutcome::Failure(FailedFile {
                file_name: file.file_name.clone(),
                full_path: file.full_path.clone(),
                diagnostic: e.to_string(),
            })
        }
    }
}

/// 변환 대상 전체 변환
///
/// 파일은 집합의 순서(전체 경로 순)대로 하나씩 변환되며, 실패해도 중단하지 않습니다.
/// 결과는 파일마다 `on_outcome`으로 즉시 전달됩니다.
pub fn convert_all<F>(
    eligible: &EligibleSet,
    destination_root: &Path,
    transcoder: &dyn Transcoder,
    on_outcome: F,
) -> RunSummary
where
    F: FnMut(&ConversionOutcome),
{
    convert_all_since(Instant::now(), eligible, destination_root, transcoder, on_outcome)
}

/// `started` 시점부터 처리 시간을 재는 `convert_all`
///
/// 탐색 시간까지 처리 시간에 포함하려면 탐색 전에 잰 시점을 넘깁니다.
pub fn convert_all_since<F>(
    started: Instant,
    eligible: &EligibleSet,
    destination_root: &Path,
    transcoder: &dyn Transcoder,
    mut on_outcome: F,
) -> RunSummary
where
    F: FnMut(&ConversionOutcome),
{
    let mut summary = RunSummary::new(eligible.len());

    tracing::info!(
        total = eligible.len(),
        destination = %destination_root.display(),
        converter = transcoder.name(),
        "conversion started"
    );

    for file in eligible {
        let outcome = convert_file(file, destination_root, transcoder);
        summary.record(&outcome);
        on_outcome(&outcome);
    }

    summary.elapsed = started.elapsed();

    tracing::info!(
        success = summary.success_count,
        failed = summary.failure_count,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "conversion finished"
    );

    summary
}
