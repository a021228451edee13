use pulldown_cmark::{html, Options, Parser};

/// Convert Markdown to an HTML fragment (CommonMark plus tables)
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Wrap a rendered digest body in the styled email page
pub fn render_email_html(title: &str, date_label: &str, body_html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
      body {{ font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 20px; background-color: #f9f9f9; }}
      .container {{ max-width: 800px; margin: 0 auto; background-color: #fff; padding: 30px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }}
      h1 {{ color: #0066cc; border-bottom: 3px solid #0066cc; padding-bottom: 10px; margin-top: 0; }}
      h2 {{ color: #0099ff; margin-top: 20px; font-size: 18px; }}
      h3 {{ color: #0088dd; font-size: 15px; margin-top: 15px; }}
      .summary {{ background-color: #f0f7ff; border-left: 4px solid #0066cc; padding: 15px; margin-bottom: 20px; border-radius: 4px; }}
      .summary p {{ margin: 8px 0; font-size: 15px; }}
      .summary .headline {{ margin-top: 0; font-size: 16px; color: #0066cc; font-weight: bold; }}
      li {{ margin: 6px 0; }}
      hr {{ margin: 25px 0; border: none; border-top: 1px solid #ddd; }}
      a {{ color: #0066cc; text-decoration: none; }}
      a:hover {{ text-decoration: underline; }}
      .footer {{ font-size: 12px; color: #999; text-align: center; margin-top: 30px; }}
    </style>
  </head>
  <body>
    <div class="container">
      <div class="summary">
        <p class="headline">📰 {title}</p>
        <p>精选全球 AI 和科技领域最新资讯，帮助你快速了解行业动态。</p>
      </div>
      {body}
      <hr>
      <div class="footer">
        <p>自动生成于 {date}</p>
      </div>
    </div>
  </body>
</html>
"#,
        title = escape_html(title),
        date = escape_html(date_label),
        body = body_html,
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
