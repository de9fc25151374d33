//! 실행 관리 모듈
//!
//! 탐색과 변환을 별도 워커 스레드에서 실행하고, 진행 상황을 채널로 화면 쪽에 전달합니다.
//! 동시에 하나의 실행만 허용됩니다.

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::error::{Result, WavCleanError};
use crate::processor::{convert_all_since, ConversionOutcome, RunSummary};
use crate::scanner::{scan, ScanOptions};
use crate::transcoder::Transcoder;

/// 워커 → 화면 이벤트
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// 탐색 완료, 변환 시작
    Started { total: usize },
    /// 파일 변환 성공
    FileSucceeded { file_name: String },
    /// 파일 변환 실패
    FileFailed { file_name: String, diagnostic: String },
    /// 전체 실행 완료
    Completed(RunSummary),
    /// 변환 시작 전 치명적 오류
    Aborted { reason: String },
}

impl From<&ConversionOutcome> for RunEvent {
    fn from(outcome: &ConversionOutcome) -> Self {
        match outcome {
            ConversionOutcome::Success { file_name } => RunEvent::FileSucceeded {
                file_name: file_name.clone(),
            },
            ConversionOutcome::Failure(failed) => RunEvent::FileFailed {
                file_name: failed.file_name.clone(),
                diagnostic: failed.diagnostic.clone(),
            },
        }
    }
}

/// 실행 요청
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// 입력 폴더
    pub source_root: PathBuf,
    /// 출력 폴더
    pub destination_root: PathBuf,
    /// 탐색 옵션
    pub scan: ScanOptions,
}

/// 실행 중 플래그를 해제하는 가드
struct RunGuard(Arc<AtomicBool>);

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// 단일 실행기
///
/// 실행 중에는 `start`가 `RunInProgress`를 반환합니다.
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    busy: Arc<AtomicBool>,
}

impl BatchRunner {
    /// 새 실행기 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 실행 중인지 확인
    pub fn is_running(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// 워커 스레드에서 실행 시작
    pub fn start<T>(&self, request: RunRequest, transcoder: T) -> Result<RunHandle>
    where
        T: Transcoder + 'static,
    {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(WavCleanError::RunInProgress);
        }
        let guard = RunGuard(Arc::clone(&self.busy));

        let (tx, rx) = unbounded();
        let spawned = thread::Builder::new()
            .name("wavclean-worker".to_string())
            .spawn(move || {
                let _guard = guard;
                execute(&request, &transcoder, &tx)
            });

        // 스폰 실패 시 클로저와 함께 가드도 해제됨
        let worker = spawned.map_err(|e| WavCleanError::WorkerSpawn {
            reason: e.to_string(),
        })?;

        Ok(RunHandle { events: rx, worker })
    }
}

/// 실행 핸들
pub struct RunHandle {
    events: Receiver<RunEvent>,
    worker: JoinHandle<Result<RunSummary>>,
}

impl RunHandle {
    /// 이벤트 수신 채널
    ///
    /// 워커가 끝나면 채널이 닫혀 반복이 종료됩니다.
    pub fn events(&self) -> &Receiver<RunEvent> {
        &self.events
    }

    /// 워커 종료 대기
    pub fn join(self) -> Result<RunSummary> {
        self.worker
            .join()
            .map_err(|_| WavCleanError::WorkerPanicked)?
    }
}

/// 탐색 → 변환 실행
///
/// 화면이 이미 닫혀 이벤트 전송이 실패해도 변환은 계속됩니다.
fn execute(
    request: &RunRequest,
    transcoder: &dyn Transcoder,
    tx: &Sender<RunEvent>,
) -> Result<RunSummary> {
    tracing::info!(
        source = %request.source_root.display(),
        destination = %request.destination_root.display(),
        "run started"
    );

    let started = Instant::now();
    let eligible = match scan(&request.source_root, &request.scan) {
        Ok(set) => set,
        Err(e) => {
            tracing::error!(error = %e, "run aborted");
            let _ = tx.send(RunEvent::Aborted {
                reason: e.to_string(),
            });
            return Err(e);
        }
    };

    let _ = tx.send(RunEvent::Started {
        total: eligible.len(),
    });

    let summary = convert_all_since(
        started,
        &eligible,
        &request.destination_root,
        transcoder,
        |outcome| {
            let _ = tx.send(RunEvent::from(outcome));
        },
    );

    let _ = tx.send(RunEvent::Completed(summary.clone()));
    Ok(summary)
}
