//! 외부 변환기 실행 모듈
//!
//! 파일 하나를 외부 ffmpeg 프로세스로 재인코딩하고 결과를 에러 타입으로 분류합니다.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Result, WavCleanError};

/// 기본 ffmpeg 실행 파일 (PATH에서 검색)
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// ffmpeg가 손상된 입력에 대해 출력하는 문구
pub const INVALID_DATA_MARKER: &str = "Invalid data found when processing input";

/// 파일 하나를 변환하는 변환기
pub trait Transcoder: Send + Sync {
    /// 변환기 이름
    fn name(&self) -> &str;

    /// `input`을 `output`으로 변환
    ///
    /// 실패는 파일 단위 에러로 반환되며, 호출자는 다음 파일로 계속 진행합니다.
    fn transcode(&self, input: &Path, output: &Path) -> Result<()>;
}

/// ffmpeg 기반 변환기
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    program: PathBuf,
}

impl FfmpegTranscoder {
    /// 실행 파일 경로로 변환기 생성
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// 실행 파일 경로
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// ffmpeg 인자 생성
    ///
    /// 덮어쓰기, 에러만 출력, 입력, 출력 순서입니다.
    pub fn build_args(input: &Path, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            output.to_string_lossy().to_string(),
        ]
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new(DEFAULT_FFMPEG)
    }
}

impl Transcoder for FfmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn transcode(&self, input: &Path, output: &Path) -> Result<()> {
        let args = Self::build_args(input, output);
        tracing::debug!(program = %self.program.display(), ?args, "running converter");

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output();

        let output_result = match result {
            Ok(out) => out,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(WavCleanError::ConverterNotFound {
                    path: self.program.clone(),
                });
            }
            Err(e) => {
                return Err(WavCleanError::ConverterSpawn {
                    path: self.program.clone(),
                    reason: e.to_string(),
                });
            }
        };

        if output_result.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output_result.stderr);
        let file_name = input
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.to_string_lossy().into_owned());

        Err(classify_failure(
            &file_name,
            &stderr,
            output_result.status.code(),
        ))
    }
}

/// 0이 아닌 종료 결과를 에러로 분류
///
/// 손상된 입력 문구가 있으면 `Invalid data: <파일명>`으로 정규화하고,
/// 그 외에는 stderr를 그대로 보존합니다.
pub fn classify_failure(file_name: &str, stderr: &str, code: Option<i32>) -> WavCleanError {
    if stderr.contains(INVALID_DATA_MARKER) {
        return WavCleanError::InvalidData {
            file_name: file_name.to_string(),
        };
    }

    let trimmed = stderr.trim_end();
    let diagnostic = if !trimmed.is_empty() {
        trimmed.to_string()
    } else {
        match code {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        }
    };

    WavCleanError::ConverterFailed { diagnostic }
}
