//! HTML fragments for the display surface.
//!
//! Diagnostic text is always escaped. Model output in
//! [`ReviewOutcome::Success`] is emitted as-is because the surface renders it
//! as markdown.

use crate::core::normalizer::NO_VALID_RESULT;
use crate::domain::model::{BatchReviewResult, FileReview, FileStatus, ReviewOutcome};
use crate::utils::error::ReviewError;

pub const NO_FILES: &str = "<div class='error'>请选择文件。</div>";

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn error_div(text: &str) -> String {
    format!("<div class='error'>{}</div>", text)
}

fn warning_div(text: &str) -> String {
    format!("<div class='warning'>{}</div>", text)
}

pub fn render_outcome(outcome: &ReviewOutcome) -> String {
    match outcome {
        ReviewOutcome::Success { text } => text.clone(),
        ReviewOutcome::ApiError { message } => warning_div(&escape_html(message)),
        ReviewOutcome::Blocked { reason } => warning_div(&format!(
            "{}。AI被阻断，原因: {}",
            NO_VALID_RESULT,
            escape_html(reason)
        )),
        ReviewOutcome::TransportError { message } => {
            error_div(&format!("API请求错误: {}", escape_html(message)))
        }
        ReviewOutcome::ParseError { message } => {
            error_div(&format!("响应解析错误: {}", escape_html(message)))
        }
    }
}

/// Fragment for a pre-flight failure (missing key, blank code, bad base URL).
pub fn render_rejection(message: &str) -> String {
    error_div(&escape_html(message))
}

pub fn render_error(error: &ReviewError) -> String {
    match error {
        ReviewError::InvalidInput { message } => render_rejection(message),
        other => render_rejection(&other.user_friendly_message()),
    }
}

pub fn render_single(review: &FileReview) -> String {
    let name = escape_html(&review.filename);
    match &review.status {
        FileStatus::Reviewed(outcome) => {
            format!("<h3>文件 '{}' 评审结果:</h3>{}", name, render_outcome(outcome))
        }
        FileStatus::Rejected(message) => {
            format!("<h3>文件 '{}' 评审结果:</h3>{}", name, render_rejection(message))
        }
        FileStatus::Empty => warning_div(&format!("文件 '{}' 是空的，请检查。", name)),
        FileStatus::Unreadable(message) => error_div(&format!(
            "读取文件 '{}' 时出错: {}",
            name,
            escape_html(message)
        )),
    }
}

pub fn render_batch(batch: &BatchReviewResult) -> String {
    if batch.is_empty() {
        return NO_FILES.to_string();
    }

    let mut fragments = vec![format!("<h3>收到 {} 个文件的批量评审请求...</h3>", batch.len())];

    for review in &batch.entries {
        let name = escape_html(&review.filename);
        let body = match &review.status {
            FileStatus::Reviewed(outcome) => render_outcome(outcome),
            FileStatus::Rejected(message) => render_rejection(message),
            FileStatus::Empty => warning_div(&format!("文件 '{}' 是空的。", name)),
            FileStatus::Unreadable(message) => {
                fragments.push(error_div(&format!(
                    "处理文件 '{}' 时出错: {}",
                    name,
                    escape_html(message)
                )));
                continue;
            }
        };
        fragments.push(format!(
            "<details><summary>📄 {}</summary><div>{}</div></details>",
            name, body
        ));
    }

    fragments.concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(filename: &str, status: FileStatus) -> FileReview {
        FileReview {
            filename: filename.to_string(),
            status,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_success_is_not_escaped() {
        let outcome = ReviewOutcome::Success {
            text: "## 评分: 2/10\n<b>屎山</b>".to_string(),
        };
        assert_eq!(render_outcome(&outcome), "## 评分: 2/10\n<b>屎山</b>");
    }

    #[test]
    fn test_parse_error_is_escaped() {
        let outcome = ReviewOutcome::ParseError {
            message: "expected value near <script>".to_string(),
        };
        let html = render_outcome(&outcome);
        assert!(!html.contains("<script>"));
        assert_eq!(
            html,
            "<div class='error'>响应解析错误: expected value near &lt;script&gt;</div>"
        );
    }

    #[test]
    fn test_transport_error_fragment() {
        let outcome = ReviewOutcome::TransportError {
            message: "operation timed out".to_string(),
        };
        assert_eq!(
            render_outcome(&outcome),
            "<div class='error'>API请求错误: operation timed out</div>"
        );
    }

    #[test]
    fn test_blocked_and_api_error_fragments() {
        let blocked = ReviewOutcome::Blocked {
            reason: "SAFETY".to_string(),
        };
        assert_eq!(
            render_outcome(&blocked),
            "<div class='warning'>未能获取有效评审结果。AI被阻断，原因: SAFETY</div>"
        );

        let api = ReviewOutcome::ApiError {
            message: "未能获取有效评审结果 - quota exceeded".to_string(),
        };
        assert_eq!(
            render_outcome(&api),
            "<div class='warning'>未能获取有效评审结果 - quota exceeded</div>"
        );
    }

    #[test]
    fn test_render_error_uses_invalid_input_message() {
        let err = ReviewError::invalid_input("请提供有效的API密钥");
        assert_eq!(render_error(&err), "<div class='error'>请提供有效的API密钥</div>");
    }

    #[test]
    fn test_render_single_variants() {
        let ok = entry(
            "main.py",
            FileStatus::Reviewed(ReviewOutcome::Success {
                text: "fine".to_string(),
            }),
        );
        assert_eq!(render_single(&ok), "<h3>文件 'main.py' 评审结果:</h3>fine");

        let empty = entry("empty.py", FileStatus::Empty);
        assert_eq!(
            render_single(&empty),
            "<div class='warning'>文件 'empty.py' 是空的，请检查。</div>"
        );

        let unreadable = entry("gone.py", FileStatus::Unreadable("No such file".to_string()));
        assert_eq!(
            render_single(&unreadable),
            "<div class='error'>读取文件 'gone.py' 时出错: No such file</div>"
        );
    }

    #[test]
    fn test_render_batch_preserves_order() {
        let batch = BatchReviewResult {
            entries: vec![
                entry("empty.py", FileStatus::Empty),
                entry(
                    "good.py",
                    FileStatus::Reviewed(ReviewOutcome::Success {
                        text: "nice".to_string(),
                    }),
                ),
                entry("broken.py", FileStatus::Unreadable("invalid utf-8".to_string())),
            ],
        };
        let html = render_batch(&batch);

        assert!(html.starts_with("<h3>收到 3 个文件的批量评审请求...</h3>"));
        let empty_at = html.find("文件 'empty.py' 是空的。").unwrap();
        let good_at = html.find("<summary>📄 good.py</summary><div>nice</div>").unwrap();
        let broken_at = html
            .find("<div class='error'>处理文件 'broken.py' 时出错: invalid utf-8</div>")
            .unwrap();
        assert!(empty_at < good_at && good_at < broken_at);
        assert!(!html.contains("<summary>📄 broken.py"));
    }

    #[test]
    fn test_render_empty_batch() {
        assert_eq!(render_batch(&BatchReviewResult::default()), NO_FILES);
    }
}
