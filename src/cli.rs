//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::Parser;
use std::path::PathBuf;

use crate::error::Result;
use crate::runner::RunRequest;
use crate::scanner::{MarkerPolicy, ScanOptions, DEFAULT_AUDIO_EXTENSION, DEFAULT_MARKER_EXTENSION};
use crate::transcoder::{FfmpegTranscoder, DEFAULT_FFMPEG};

/// wavclean CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "wavclean",
    author = "YourName <your@email.com>",
    version,
    about = "WAV FOLDER CLEANER - 폴더 내 오디오 파일을 ffmpeg로 재인코딩하는 CLI 도구",
    long_about = r#"
WAV FOLDER CLEANER
==================

입력 폴더를 재귀적으로 탐색하여 오디오 파일을 찾고,
ffmpeg로 하나씩 재인코딩하여 출력 폴더에 저장합니다.

특징:
  • 다운로드 중인 파일(.download) 자동 제외
  • 같은 이름의 파일은 한 번만 변환
  • 파일별 성공/실패 실시간 표시 및 요약 통계
  • 실패한 원본 파일 일괄 삭제

예제:
  wavclean -i ./music -o ./out
  wavclean -i ./music -o ./out --dry-run
  wavclean -i ./music -o ./out --ffmpeg /opt/homebrew/bin/ffmpeg
  wavclean -i ./music -o ./out --marker-policy sibling
  wavclean -i ./music -o ./out --delete-failed --yes
"#
)]
pub struct Args {
    /// 오디오 파일들이 있는 입력 폴더 경로
    #[arg(short, long)]
    pub input: PathBuf,

    /// 변환된 파일을 저장할 출력 폴더 경로
    #[arg(short, long)]
    pub output: PathBuf,

    /// ffmpeg 실행 파일 경로
    #[arg(long, default_value = DEFAULT_FFMPEG)]
    pub ffmpeg: PathBuf,

    /// 변환 대상 오디오 확장자
    #[arg(long, default_value = DEFAULT_AUDIO_EXTENSION)]
    pub extension: String,

    /// 다운로드 중 마커 확장자
    #[arg(long, default_value = DEFAULT_MARKER_EXTENSION)]
    pub marker: String,

    /// 다운로드 중 판정 방식
    #[arg(long, value_enum, default_value_t = MarkerPolicy::Containment)]
    pub marker_policy: MarkerPolicy,

    /// 최대 폴더 탐색 깊이
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,

    /// 실제 변환 없이 처리될 파일 목록만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 에러 로그 파일 경로
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// JSON 리포트 파일 경로
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// 변환 실패한 원본 파일 삭제
    #[arg(long)]
    pub delete_failed: bool,

    /// 삭제 확인 생략
    #[arg(short, long)]
    pub yes: bool,
}

impl Args {
    /// 탐색 옵션 생성
    pub fn scan_options(&self) -> Result<ScanOptions> {
        Ok(ScanOptions::new(&self.extension, &self.marker)?
            .with_policy(self.marker_policy)
            .with_max_depth(self.max_depth))
    }

    /// 실행 요청 생성
    pub fn run_request(&self) -> Result<RunRequest> {
        Ok(RunRequest {
            source_root: self.input.clone(),
            destination_root: self.output.clone(),
            scan: self.scan_options()?,
        })
    }

    /// 변환기 생성
    pub fn transcoder(&self) -> FfmpegTranscoder {
        FfmpegTranscoder::new(self.ffmpeg.clone())
    }
}
