use super::assumptions::find_state;

/// 자유 형식 주소에서 두 글자 주 코드를 추정한다.
///
/// 대문자 두 글자로 된 독립 토큰 중 요금 테이블에 있는 마지막 것을 고른다.
/// 주소 끝쪽(도시, 주, 우편번호 순)에 주 코드가 오는 미국식 표기를 가정한다.
pub fn extract_state_code(address: &str) -> Option<&'static str> {
    address
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|token| token.len() == 2 && token.bytes().all(|b| b.is_ascii_uppercase()))
        .filter_map(|token| find_state(token).map(|s| s.code))
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_code_before_zip() {
        assert_eq!(
            extract_state_code("1200 Getty Center Dr, Los Angeles, CA 90049"),
            Some("CA")
        );
    }

    #[test]
    fn ignores_lowercase_and_unknown_tokens() {
        assert_eq!(extract_state_code("12 Main st, Springfield, il"), None);
        assert_eq!(extract_state_code("Unit ZZ, Austin TX"), Some("TX"));
        assert_eq!(extract_state_code(""), None);
    }
}
