use std::fmt::Write;

use super::models::Digest;

/// Render the digest as Markdown: header, statistics, per-source counts,
/// then one list entry per item with its summary on an indented line.
pub fn render_markdown(digest: &Digest, title: &str, window_hours: u32) -> String {
    let stats = digest.stats();
    let mut out = String::new();

    let _ = writeln!(out, "# {} — {}", title, digest.date().format("%Y-%m-%d"));
    out.push('\n');
    let _ = writeln!(out, "本摘要为近 {} 小时内聚合内容，按来源排序。", window_hours);
    out.push('\n');

    out.push_str("## 📊 统计\n\n");
    let _ = writeln!(out, "- 文章总数: **{}**", stats.total);
    let _ = writeln!(out, "- 来源数量: **{}**", stats.source_count());
    out.push('\n');

    out.push_str("### 来源分布\n\n");
    for (source, count) in &stats.per_source {
        let _ = writeln!(out, "- {}: {} 篇", source, count);
    }
    out.push_str("\n---\n\n");

    out.push_str("## 📰 资讯\n\n");
    for item in digest.items() {
        let _ = writeln!(
            out,
            "- **{}**: [{}](<{}>)",
            item.source,
            escape_link_text(&item.title),
            escape_link_target(&item.link)
        );
        match &item.summary {
            Some(summary) => {
                let _ = write!(out, "  \n  要点: {}\n\n", summary);
            }
            None => out.push('\n'),
        }
    }

    out
}

fn escape_link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}

/// Angle-bracket destinations allow spaces and parentheses but not `<`, `>`
/// or line breaks
fn escape_link_target(link: &str) -> String {
    link.replace('<', "%3C")
        .replace('>', "%3E")
        .replace(['\n', '\r'], "")
}
