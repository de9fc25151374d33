//! 패턴 매칭 모듈
//!
//! glob 패턴을 사용한 오디오 파일 / 다운로드 마커 파일 이름 판별을 담당합니다.

use glob::{MatchOptions, Pattern};

use crate::error::{WavCleanError, Result};

/// 파일 이름 비교 옵션
///
/// 대소문자를 구분하지 않고, 셸 glob처럼 `.`으로 시작하는 이름은 `*`에 매칭되지 않습니다.
const NAME_MATCH: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// 확장자 기반 파일 이름 매처
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Pattern,
    extension: String,
}

impl PatternMatcher {
    /// 확장자로 `*.<ext>` 매처 생성
    ///
    /// # Arguments
    /// * `extension` - 확장자 (앞의 `.`은 있어도 없어도 됨)
    ///
    /// # Examples
    /// ```
    /// use wavclean::pattern::PatternMatcher;
    ///
    /// let matcher = PatternMatcher::for_extension("wav").unwrap();
    /// assert!(matcher.matches("track.wav"));
    /// assert!(matcher.matches("TRACK.WAV"));
    /// assert!(!matcher.matches("track.wav.download"));
    /// ```
    pub fn for_extension(extension: &str) -> Result<Self> {
        let extension = extension.trim().trim_start_matches('.').to_string();
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(WavCleanError::InvalidPattern { pattern: extension });
        }

        let raw = format!("*.{}", Pattern::escape(&extension));
        let pattern =
            Pattern::new(&raw).map_err(|_| WavCleanError::InvalidPattern { pattern: raw.clone() })?;

        Ok(Self { pattern, extension })
    }

    /// 파일 이름이 패턴과 일치하는지 확인
    pub fn matches(&self, file_name: &str) -> bool {
        self.pattern.matches_with(file_name, NAME_MATCH)
    }

    /// 확장자 (`.` 제외)
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// 파일 이름에서 `.<ext>` 접미사를 제거한 나머지
    ///
    /// 매칭되지 않는 이름이면 `None`
    pub fn strip<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        if !self.matches(file_name) {
            return None;
        }
        let cut = file_name.len() - self.extension.len() - 1;
        file_name.get(..cut)
    }
}
