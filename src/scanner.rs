//! 파일 탐색 모듈
//!
//! 입력 폴더를 재귀적으로 탐색하여 다운로드 중인 파일을 걸러내고,
//! 파일 이름 기준으로 중복을 제거한 변환 대상 목록을 만듭니다.

use clap::ValueEnum;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, WavCleanError};
use crate::pattern::PatternMatcher;

/// 다운로드 마커 판정 방식
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum MarkerPolicy {
    /// 후보 경로 문자열이 마커 경로 문자열 어딘가에 포함되면 제외
    #[default]
    Containment,
    /// 같은 폴더의 같은 이름 마커, 또는 마커 폴더 내부의 파일만 제외
    Sibling,
}

impl std::fmt::Display for MarkerPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerPolicy::Containment => write!(f, "Containment"),
            MarkerPolicy::Sibling => write!(f, "Sibling"),
        }
    }
}

/// 기본 오디오 확장자
pub const DEFAULT_AUDIO_EXTENSION: &str = "wav";

/// 기본 다운로드 마커 확장자
pub const DEFAULT_MARKER_EXTENSION: &str = "download";

/// 탐색 옵션
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// 변환 대상 오디오 파일 매처
    pub audio: PatternMatcher,
    /// 다운로드 중 마커 매처
    pub marker: PatternMatcher,
    /// 마커 판정 방식
    pub policy: MarkerPolicy,
    /// 최대 탐색 깊이
    pub max_depth: Option<usize>,
}

impl ScanOptions {
    /// 확장자로 옵션 생성
    pub fn new(audio_extension: &str, marker_extension: &str) -> Result<Self> {
        Ok(Self {
            audio: PatternMatcher::for_extension(audio_extension)?,
            marker: PatternMatcher::for_extension(marker_extension)?,
            policy: MarkerPolicy::default(),
            max_depth: None,
        })
    }

    /// 마커 판정 방식 설정
    pub fn with_policy(mut self, policy: MarkerPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 최대 탐색 깊이 설정
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// 탐색 중 발견된 후보 파일
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// 전체 경로
    pub full_path: PathBuf,
    /// 파일 이름 (중복 제거 및 표시 키)
    pub file_name: String,
}

impl CandidateFile {
    fn from_path(full_path: PathBuf) -> Option<Self> {
        let file_name = full_path.file_name()?.to_string_lossy().into_owned();
        Some(Self {
            full_path,
            file_name,
        })
    }

    /// 전체 경로 문자열 기준 비교
    ///
    /// 경로 구성요소 단위가 아니라 바이트 순이므로 `a-b/`가 `a/`보다 앞섭니다.
    pub fn cmp_path(&self, other: &Self) -> Ordering {
        self.full_path.as_os_str().cmp(other.full_path.as_os_str())
    }
}

/// 변환 대상 파일 집합
///
/// 파일 이름당 하나의 항목만 가지며, 전체 경로 순으로 정렬되어 있습니다.
#[derive(Debug, Clone, Default)]
pub struct EligibleSet {
    entries: Vec<CandidateFile>,
    names: HashSet<String>,
}

impl EligibleSet {
    /// 빈 집합 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 파일 추가
    ///
    /// 같은 파일 이름이 이미 있으면 무시하고 `false`를 반환합니다.
    pub fn insert(&mut self, file: CandidateFile) -> bool {
        if !self.names.insert(file.file_name.clone()) {
            return false;
        }
        let at = self
            .entries
            .partition_point(|e| e.cmp_path(&file) == Ordering::Less);
        self.entries.insert(at, file);
        true
    }

    /// 파일 이름 포함 여부
    pub fn contains_name(&self, file_name: &str) -> bool {
        self.names.contains(file_name)
    }

    /// 항목 수
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 비어 있는지 확인
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 전체 경로 순 반복자
    pub fn iter(&self) -> std::slice::Iter<'_, CandidateFile> {
        self.entries.iter()
    }

    /// 전체 경로 목록
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|e| e.full_path.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a EligibleSet {
    type Item = &'a CandidateFile;
    type IntoIter = std::slice::Iter<'a, CandidateFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// 입력 폴더를 탐색하여 변환 대상 집합을 생성
///
/// # Arguments
/// * `source_root` - 입력 폴더
/// * `options` - 탐색 옵션
///
/// # Returns
/// 다운로드 중 파일이 제외되고 파일 이름 기준으로 중복이 제거된 `EligibleSet`
pub fn scan(source_root: &Path, options: &ScanOptions) -> Result<EligibleSet> {
    validate_source(source_root)?;

    let mut markers: Vec<PathBuf> = Vec::new();
    let mut candidates: Vec<CandidateFile> = Vec::new();

    for entry in walker(source_root, options.max_depth) {
        let name = entry.file_name().to_string_lossy();

        if options.marker.matches(&name) {
            markers.push(entry.path().to_path_buf());
        } else if entry.file_type().is_file() && options.audio.matches(&name) {
            if let Some(candidate) = CandidateFile::from_path(entry.path().to_path_buf()) {
                candidates.push(candidate);
            }
        }
    }

    candidates.sort_by(CandidateFile::cmp_path);

    tracing::debug!(
        root = %source_root.display(),
        candidates = candidates.len(),
        markers = markers.len(),
        "scan finished"
    );

    let mut eligible = EligibleSet::new();
    for candidate in candidates {
        if is_incomplete(&candidate.full_path, &markers, options) {
            tracing::debug!(path = %candidate.full_path.display(), "skip incomplete file");
            continue;
        }
        if !eligible.insert(candidate.clone()) {
            tracing::debug!(path = %candidate.full_path.display(), "skip duplicate file name");
        }
    }

    Ok(eligible)
}

/// 입력 경로 유효성 검사
fn validate_source(source_root: &Path) -> Result<()> {
    if !source_root.exists() {
        return Err(WavCleanError::SourceNotFound {
            path: source_root.to_path_buf(),
        });
    }

    if !source_root.is_dir() {
        return Err(WavCleanError::NotADirectory {
            path: source_root.to_path_buf(),
        });
    }

    fs::read_dir(source_root).map_err(|e| WavCleanError::SourceUnreadable {
        path: source_root.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(())
}

/// 숨김 항목을 건너뛰는 재귀 탐색기
///
/// 심볼릭 링크는 따라가며, 순환 링크는 에러로 기록하고 건너뜁니다.
fn walker(source_root: &Path, max_depth: Option<usize>) -> impl Iterator<Item = DirEntry> {
    let walker = WalkDir::new(source_root).follow_links(true);
    let walker = if let Some(max_depth) = max_depth {
        walker.max_depth(max_depth)
    } else {
        walker
    };

    walker
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skip unreadable entry");
                None
            }
        })
        .filter(|e| e.depth() > 0)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

/// 다운로드 중인 파일인지 판정
fn is_incomplete(path: &Path, markers: &[PathBuf], options: &ScanOptions) -> bool {
    match options.policy {
        MarkerPolicy::Containment => {
            let path = path.to_string_lossy();
            markers
                .iter()
                .any(|marker| marker.to_string_lossy().contains(path.as_ref()))
        }
        MarkerPolicy::Sibling => markers
            .iter()
            .any(|marker| is_sibling_marker(path, marker, &options.marker)),
    }
}

/// 같은 폴더의 같은 이름 마커이거나 마커 폴더 내부인지 확인
fn is_sibling_marker(path: &Path, marker: &Path, matcher: &PatternMatcher) -> bool {
    if path.starts_with(marker) {
        return true;
    }

    if path.parent() != marker.parent() {
        return false;
    }

    let marker_name = marker.file_name().map(|s| s.to_string_lossy());
    let Some(stripped) = marker_name.as_deref().and_then(|n| matcher.strip(n)) else {
        return false;
    };

    let file_name = path.file_name().map(|s| s.to_string_lossy());
    let file_stem = path.file_stem().map(|s| s.to_string_lossy());

    file_name.as_deref() == Some(stripped) || file_stem.as_deref() == Some(stripped)
}
