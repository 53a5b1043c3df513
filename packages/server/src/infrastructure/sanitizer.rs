//! Inbound text sanitization.

/// HTML として解釈される文字をエスケープする
///
/// ブラウザのクライアントがメッセージをそのまま描画しても、
/// タグやスクリプトとして実行されないようにする。
pub fn sanitize(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_escapes_markup() {
        // テスト項目: HTML の特殊文字がエスケープされる
        // given (前提条件):
        let input = r#"<script>alert("x" & 'y')</script>"#;

        // when (操作):
        let result = sanitize(input);

        // then (期待する結果):
        assert_eq!(
            result,
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#39;y&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_sanitize_keeps_plain_text() {
        // テスト項目: 特殊文字を含まない文字列はそのまま
        // given (前提条件):
        let input = "こんにちは, world!";

        // when (操作) / then (期待する結果):
        assert_eq!(sanitize(input), input);
    }
}
