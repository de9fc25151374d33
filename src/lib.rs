//! wavclean - WAV FOLDER CLEANER
//!
//! 폴더 내 오디오 파일을 찾아 ffmpeg로 재인코딩하여 Pioneer XDJ에서 읽을 수 있는 파일로 만드는 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - 🔍 **재귀 탐색**: 하위 폴더까지 오디오 파일 검색
//! - ⏳ **다운로드 중 파일 제외**: `.download` 마커가 있는 파일은 건너뜀
//! - 🧹 **중복 제거**: 같은 파일 이름은 한 번만 변환 (경로 순 첫 번째)
//! - 🎛️ **순차 변환**: 파일마다 ffmpeg를 하나씩 실행, 실패해도 계속 진행
//! - 📡 **실시간 보고**: 워커 스레드가 채널로 진행 상황 전달
//! - 📈 **상세 통계**: 성공/실패 수, 처리 시간, 실패 사유 표시
//! - 🗑️ **실패 파일 정리**: 변환 실패한 원본 일괄 삭제
//!
//! # 예제
//!
//! ```bash
//! # 기본 사용법
//! wavclean -i ~/Downloads/music -o /Volumes/USB/music
//!
//! # 변환 대상만 확인
//! wavclean -i ./music -o ./out --dry-run
//!
//! # 실패 파일 삭제까지
//! wavclean -i ./music -o ./out --delete-failed
//! ```

pub mod cleanup;
pub mod cli;
pub mod error;
pub mod logging;
pub mod pattern;
pub mod processor;
pub mod runner;
pub mod scanner;
pub mod stats;
pub mod transcoder;

// Re-exports for convenient access
pub use cleanup::{delete_files, DeleteReport};
pub use cli::Args;
pub use error::{Result, WavCleanError};
pub use pattern::PatternMatcher;
pub use processor::{convert_all, convert_all_since, ConversionOutcome, FailedFile, RunSummary};
pub use runner::{BatchRunner, RunEvent, RunHandle, RunRequest};
pub use scanner::{scan, CandidateFile, EligibleSet, MarkerPolicy, ScanOptions};
pub use stats::format_elapsed;
pub use transcoder::{FfmpegTranscoder, Transcoder};
