//! 실패 파일 정리 모듈
//!
//! 변환에 실패한 원본 파일을 일괄 삭제합니다. 개별 삭제 실패는 기록만 하고 계속 진행합니다.

use std::fs;
use std::path::PathBuf;

/// 일괄 삭제 결과
#[derive(Debug, Default)]
pub struct DeleteReport {
    /// 삭제된 파일
    pub deleted: Vec<PathBuf>,
    /// 삭제 실패 (경로, 사유)
    pub errors: Vec<(PathBuf, String)>,
}

impl DeleteReport {
    /// 모든 파일이 삭제되었는지 확인
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// 파일 목록 일괄 삭제
pub fn delete_files<I>(paths: I) -> DeleteReport
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut report = DeleteReport::default();

    for path in paths {
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "deleted failed source");
                report.deleted.push(path);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "delete failed");
                report.errors.push((path, e.to_string()));
            }
        }
    }

    report
}
