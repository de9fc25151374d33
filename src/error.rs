//! 에러 타입 정의 모듈
//!
//! wavclean에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// wavclean에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum WavCleanError {
    /// 입력 폴더가 존재하지 않음
    #[error("입력 폴더를 찾을 수 없습니다: {path}")]
    SourceNotFound { path: PathBuf },

    /// 입력이 폴더가 아님
    #[error("입력 경로가 폴더가 아닙니다: {path}")]
    NotADirectory { path: PathBuf },

    /// 입력 폴더 목록을 읽을 수 없음
    #[error("입력 폴더를 읽을 수 없습니다 ({path}): {reason}")]
    SourceUnreadable { path: PathBuf, reason: String },

    /// 유효하지 않은 패턴
    #[error("유효하지 않은 패턴: {pattern}")]
    InvalidPattern { pattern: String },

    /// 변환기 실행 파일 없음
    #[error("ffmpeg를 찾을 수 없습니다: {path}")]
    ConverterNotFound { path: PathBuf },

    /// 변환기 프로세스 실행 실패
    #[error("ffmpeg 실행 실패 ({path}): {reason}")]
    ConverterSpawn { path: PathBuf, reason: String },

    /// 손상되었거나 읽을 수 없는 입력
    #[error("Invalid data: {file_name}")]
    InvalidData { file_name: String },

    /// 변환기가 0이 아닌 종료 코드를 반환
    #[error("{diagnostic}")]
    ConverterFailed { diagnostic: String },

    /// 이미 실행 중인 변환 작업이 있음
    #[error("이미 변환 작업이 실행 중입니다")]
    RunInProgress,

    /// 워커 스레드 생성 실패
    #[error("변환 워커를 시작할 수 없습니다: {reason}")]
    WorkerSpawn { reason: String },

    /// 워커 스레드가 비정상 종료
    #[error("변환 워커가 비정상 종료되었습니다")]
    WorkerPanicked,

    /// 파일 쓰기 실패
    #[error("파일 쓰기 실패 ({path}): {reason}")]
    WriteError { path: PathBuf, reason: String },
}

/// wavclean 결과 타입 별칭
pub type Result<T> = std::result::Result<T, WavCleanError>;
